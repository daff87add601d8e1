//! Defines the logic for parsing [`Module`]s from markdown source files
//! into memory. A module source file is structured as follows:
//!
//! 1. Initial frontmatter fence (`---`)
//! 2. YAML frontmatter: an optional `name`, plus one key per collection
//!    type assigning the module to one or more categories
//! 3. Terminal frontmatter fence (`---`)
//! 4. The module's documentation body (markdown)
//!
//! For example:
//!
//! ```md
//! ---
//! name: Primary button
//! component: button
//! ---
//! # Usage
//!
//! Use for the main action of a view.
//! ```

use crate::markdown;
use crate::module::{Module, ModuleConfig};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

const MARKDOWN_EXTENSION: &str = ".md";

/// Searches `source_directory` recursively for module source files
/// (extension = `.md`) and returns the parsed modules sorted by id, so
/// every run categorizes and renders them in the same order.
pub fn parse_modules(source_directory: &Path) -> Result<Vec<Module>> {
    let mut modules = Vec::new();
    for result in WalkDir::new(source_directory) {
        let entry = result?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(source_directory)
            .unwrap() // entries always sit under source_directory
            .to_string_lossy()
            .into_owned();
        if !relative.ends_with(MARKDOWN_EXTENSION) {
            continue;
        }
        let id = relative.trim_end_matches(MARKDOWN_EXTENSION);

        let mut contents = String::new();
        File::open(entry.path())?.read_to_string(&mut contents)?;
        match parse_module(id, &contents) {
            Ok(module) => {
                debug!("parsed module `{}`", module.id);
                modules.push(module);
            }
            Err(e) => {
                return Err(Error::Annotated(
                    format!("parsing module `{}`", entry.path().display()),
                    Box::new(e),
                ))
            }
        }
    }

    modules.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(modules)
}

/// Parses a single [`Module`] from its id and source text. The frontmatter
/// becomes the module's config; the body is rendered to HTML.
pub fn parse_module(id: &str, input: &str) -> Result<Module> {
    fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
        const FENCE: &str = "---";
        if !input.starts_with(FENCE) {
            return Err(Error::FrontmatterMissingStartFence);
        }
        match input[FENCE.len()..].find(FENCE) {
            None => Err(Error::FrontmatterMissingEndFence),
            Some(offset) => Ok((
                FENCE.len(),                        // yaml_start
                FENCE.len() + offset,               // yaml_stop
                FENCE.len() + offset + FENCE.len(), // body_start
            )),
        }
    }

    let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
    let config: ModuleConfig = serde_yaml::from_str(&input[yaml_start..yaml_stop])?;
    let mut html = String::new();
    markdown::to_html(&mut html, &input[body_start..]);
    Ok(Module {
        id: id.to_owned(),
        config,
        html,
    })
}

/// Represents the result of a [`Module`]-parse operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error parsing a [`Module`] object.
#[derive(Debug)]
pub enum Error {
    /// Returned when a module source file is missing its starting
    /// frontmatter fence (`---`).
    FrontmatterMissingStartFence,

    /// Returned when a module source file is missing its terminal
    /// frontmatter fence (i.e., the starting fence was found but the ending
    /// one was missing).
    FrontmatterMissingEndFence,

    /// Returned when there was an error parsing the frontmatter as YAML.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for other I/O errors.
    Io(std::io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "Module must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "Missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Converts a [`serde_yaml::Error`] into an [`Error`]. This allows us
    /// to use the `?` operator for [`serde_yaml`] deserialization functions.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    /// Converts a [`walkdir::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible directory walks.
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts a [`std::io::Error`] into an [`Error`]. This allows us to
    /// use the `?` operator for fallible I/O functions.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::module::CategoryNames;

    #[test]
    fn test_parse_module() -> Result<()> {
        let module = parse_module(
            "button-primary",
            "---\nname: Primary button\ncomponent: button\n---\n# Usage\n",
        )?;
        assert_eq!("button-primary", module.id);
        assert_eq!("Primary button", module.config.name);
        assert_eq!(
            Some(&CategoryNames::Single(String::from("button"))),
            module.config.collections.get("component"),
        );
        assert_eq!("<h3>Usage</h3>\n", module.html);
        Ok(())
    }

    #[test]
    fn test_parse_module_list_assignment() -> Result<()> {
        let module = parse_module(
            "form-control",
            "---\ncomponent: [button, input]\n---\nBody\n",
        )?;
        assert_eq!(
            Some(&CategoryNames::Multiple(vec![
                String::from("button"),
                String::from("input"),
            ])),
            module.config.collections.get("component"),
        );
        Ok(())
    }

    #[test]
    fn test_missing_start_fence() {
        match parse_module("nofence", "component: button\n") {
            Err(Error::FrontmatterMissingStartFence) => {}
            _ => panic!("expected a missing-start-fence error"),
        }
    }

    #[test]
    fn test_missing_end_fence() {
        match parse_module("nofence", "---\ncomponent: button\n") {
            Err(Error::FrontmatterMissingEndFence) => {}
            _ => panic!("expected a missing-end-fence error"),
        }
    }

    #[test]
    fn test_parse_modules_sorted_by_id() -> Result<()> {
        let dir = tempfile::tempdir()?;
        std::fs::create_dir(dir.path().join("forms"))?;
        std::fs::write(
            dir.path().join("zebra-stripes.md"),
            "---\ncomponent: table\n---\n",
        )?;
        std::fs::write(
            dir.path().join("forms/input.md"),
            "---\ncomponent: input\n---\n",
        )?;
        std::fs::write(dir.path().join("notes.txt"), "not a module")?;

        let modules = parse_modules(dir.path())?;
        assert_eq!(
            vec!["forms/input", "zebra-stripes"],
            modules.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
        );
        Ok(())
    }
}
