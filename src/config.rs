//! Project configuration, loaded from `stylebook.yaml`.

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The project file name searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "stylebook.yaml";

/// The project configuration. Every option has a default, so an empty
/// project file is valid; relative paths are resolved against the project
/// root on load.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The directory of module source files.
    pub source: PathBuf,

    /// The collection types to render, in output order.
    pub output_collection: Vec<String>,

    /// The declared category names per collection type, in declared order.
    pub collection: HashMap<String, Vec<String>>,

    /// The destination root for the generated site.
    pub dest: PathBuf,

    /// The directory of template files.
    pub template_dir: PathBuf,

    /// The template file extension per template engine.
    pub template_ext: HashMap<String, String>,

    /// The active template engine.
    pub template_engine: String,

    /// The chrono format string for the run timestamp.
    pub timestamp_format: String,

    /// An optional markdown document embedded into the index page.
    pub index: Option<PathBuf>,

    /// Whether to render the color-palette page.
    pub color_palette: bool,

    /// The color values shown on the palette page.
    pub colors: Vec<String>,
}

impl Default for Config {
    fn default() -> Config {
        let mut template_ext = HashMap::new();
        template_ext.insert("gtmpl".to_owned(), ".html".to_owned());
        Config {
            source: PathBuf::from("modules"),
            output_collection: Vec::new(),
            collection: HashMap::new(),
            dest: PathBuf::from("styleguide"),
            template_dir: PathBuf::from("templates"),
            template_ext,
            template_engine: "gtmpl".to_owned(),
            timestamp_format: "%Y-%m-%d %H:%M:%S".to_owned(),
            index: None,
            color_palette: false,
            colors: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the configuration for `dir`, searching it and its parent
    /// directories for the nearest `stylebook.yaml`.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    /// Loads the configuration from a project file and resolves its
    /// relative paths against the file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        let file = File::open(path).map_err(|e| {
            anyhow!("Opening project file `{}`: {}", path.display(), e)
        })?;
        let mut config: Config = serde_yaml::from_reader(file)?;
        if let Some(root) = path.parent() {
            config.source = root.join(&config.source);
            config.template_dir = root.join(&config.template_dir);
            config.dest = root.join(&config.dest);
            config.index = config.index.take().map(|index| root.join(index));
        }
        Ok(config)
    }
}
