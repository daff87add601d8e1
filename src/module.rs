//! Defines the [`Module`] type, a single documented styleguide entry, along
//! with its frontmatter configuration.

use serde::Deserialize;
use std::collections::HashMap;

/// A documented UI module. Modules are parsed from markdown source files by
/// [`crate::parser`] and are read-only to the rendering pipeline.
pub struct Module {
    /// The module's identifier: its source path relative to the source
    /// directory, minus the `.md` extension.
    pub id: String,

    /// The module's frontmatter configuration.
    pub config: ModuleConfig,

    /// The module's documentation body, rendered to HTML.
    pub html: String,
}

impl Module {
    /// The module's display name, falling back to the id when the
    /// frontmatter doesn't carry a `name`.
    pub fn display_name(&self) -> &str {
        match self.config.name.is_empty() {
            true => &self.id,
            false => &self.config.name,
        }
    }
}

/// The parsed frontmatter of a module source file. Besides the display
/// name, every remaining frontmatter key names a collection type and
/// assigns the module to one or more categories of that type.
#[derive(Deserialize)]
pub struct ModuleConfig {
    /// The module's display name.
    #[serde(default)]
    pub name: String,

    /// Category assignment per collection type. A module may take part in
    /// any number of collection types.
    #[serde(flatten)]
    pub collections: HashMap<String, CategoryNames>,
}

/// A category assignment for one collection type: either a single category
/// name or a list of names. The two shapes are distinguished once, here at
/// the data-model boundary; [`CategoryNames::names`] gives downstream code a
/// uniform view.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CategoryNames {
    Single(String),
    Multiple(Vec<String>),
}

impl CategoryNames {
    /// The assignment as a slice of category names.
    pub fn names(&self) -> &[String] {
        match self {
            CategoryNames::Single(name) => std::slice::from_ref(name),
            CategoryNames::Multiple(names) => names,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_deserialize_single() -> Result<(), serde_yaml::Error> {
        let config: ModuleConfig =
            serde_yaml::from_str("name: Button\ncomponent: button\n")?;
        assert_eq!("Button", config.name);
        assert_eq!(
            Some(&CategoryNames::Single(String::from("button"))),
            config.collections.get("component"),
        );
        Ok(())
    }

    #[test]
    fn test_deserialize_multiple() -> Result<(), serde_yaml::Error> {
        let config: ModuleConfig =
            serde_yaml::from_str("component: [button, input]\n")?;
        assert_eq!("", config.name);
        assert_eq!(
            Some(&CategoryNames::Multiple(vec![
                String::from("button"),
                String::from("input"),
            ])),
            config.collections.get("component"),
        );
        Ok(())
    }

    #[test]
    fn test_names_single_equals_one_element_list() {
        let single = CategoryNames::Single(String::from("button"));
        let multiple = CategoryNames::Multiple(vec![String::from("button")]);
        assert_eq!(single.names(), multiple.names());
    }
}
