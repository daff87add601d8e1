//! Exports the [`build_site`] function which stitches together the
//! high-level steps of building the styleguide: parsing the modules
//! ([`crate::parser`]), rendering every page ([`crate::render`]), writing
//! the pages to disk, and copying the template assets into the destination
//! directory.

use crate::config::Config;
use crate::parser::{self, parse_modules};
use crate::render::{self, Page, Renderer};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Builds the styleguide from a [`Config`] object. This calls into
/// [`parse_modules`] and [`Renderer::render`] which do the heavy lifting,
/// then persists the result. Rendering is all-or-nothing: nothing is
/// written unless every page rendered.
pub fn build_site(config: &Config) -> Result<()> {
    let modules = parse_modules(&config.source)?;
    info!(
        "parsed {} modules from `{}`",
        modules.len(),
        config.source.display(),
    );

    let renderer = Renderer::new(config, &modules)?;
    let pages = renderer.render()?;
    write_pages(&pages)?;
    info!("wrote {} pages under `{}`", pages.len(), config.dest.display());

    // The template directory may carry an `assets/` directory with the
    // stylesheet and scripts the generated pages reference via their root
    // prefix.
    let assets = config.template_dir.join("assets");
    if assets.is_dir() {
        copy_dir(&assets, &config.dest.join("assets"))?;
    }

    Ok(())
}

// Creates each output directory at most once, then writes every page.
fn write_pages(pages: &[Page]) -> Result<()> {
    let mut seen_dirs: HashSet<PathBuf> = HashSet::new();
    for page in pages {
        if let Some(dir) = page.output_path.parent() {
            if seen_dirs.insert(dir.to_owned()) {
                std::fs::create_dir_all(dir)?;
            }
        }
        std::fs::write(&page.output_path, &page.html)?;
    }
    Ok(())
}

fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &dst.join(entry.file_name()))?;
        } else {
            std::fs::copy(entry.path(), dst.join(entry.file_name()))?;
        }
    }
    Ok(())
}

/// The result of a fallible site-build operation.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can occur during module
/// parsing, rendering, and output I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors during module parsing.
    Parse(parser::Error),

    /// Returned for errors while rendering pages.
    Render(render::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Parse(err) => err.fmt(f),
            Error::Render(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Render(err) => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<parser::Error> for Error {
    /// Converts [`parser::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: parser::Error) -> Error {
        Error::Parse(err)
    }
}

impl From<render::Error> for Error {
    /// Converts [`render::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: render::Error) -> Error {
        Error::Render(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_site() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("templates")).unwrap();
        fs::write(
            root.join("templates/layout.html"),
            "{{.title}}|{{.root}}|{{len .modules}}",
        )
        .unwrap();
        fs::write(root.join("templates/index.html"), "index|{{.root}}|{{.html}}")
            .unwrap();
        fs::create_dir(root.join("modules")).unwrap();
        fs::write(
            root.join("modules/button.md"),
            "---\nname: Button\ncomponent: button\n---\n# Usage\n",
        )
        .unwrap();

        let mut config = Config::default();
        config.source = root.join("modules");
        config.template_dir = root.join("templates");
        config.dest = root.join("styleguide");
        config.output_collection = vec![String::from("component")];
        config
            .collection
            .insert(String::from("component"), vec![String::from("button")]);

        build_site(&config).unwrap();

        assert_eq!(
            "button|../../|1",
            fs::read_to_string(root.join("styleguide/component/button/index.html"))
                .unwrap(),
        );
        assert_eq!(
            "index|./|",
            fs::read_to_string(root.join("styleguide/index.html")).unwrap(),
        );
    }

    #[test]
    fn test_build_site_missing_template_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("modules")).unwrap();

        let mut config = Config::default();
        config.source = root.join("modules");
        config.template_dir = root.join("templates");
        config.dest = root.join("styleguide");

        match build_site(&config) {
            Err(Error::Render(render::Error::OpenTemplate { .. })) => {}
            _ => panic!("expected a template-load error"),
        }
        assert!(!root.join("styleguide").exists());
    }
}
