//! Buckets modules into the declared categories of one collection type.

use crate::module::Module;
use std::collections::HashMap;
use std::fmt;

/// A named bucket of modules within one collection type. Every category
/// becomes one listing page downstream.
pub struct Category<'a> {
    /// The category's declared name.
    pub name: String,

    /// The modules assigned to the category, in encounter order.
    pub modules: Vec<&'a Module>,
}

/// Buckets `modules` into the categories declared for `collection_type`.
///
/// Every declared category appears in the result, empty or not, in declared
/// order; this is what makes downstream pages exist even for categories no
/// module references yet. A module without a config entry for
/// `collection_type` is skipped for that type. A module naming a category
/// that was never declared is a configuration error rather than a silent
/// drop.
pub fn categorize<'a>(
    modules: &'a [Module],
    collection_type: &str,
    declared: &[String],
) -> Result<Vec<Category<'a>>> {
    let mut categories: Vec<Category> = declared
        .iter()
        .map(|name| Category {
            name: name.clone(),
            modules: Vec::new(),
        })
        .collect();

    let index: HashMap<&str, usize> = declared
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    for module in modules {
        let assigned = match module.config.collections.get(collection_type) {
            None => continue,
            Some(assigned) => assigned,
        };
        for name in assigned.names() {
            match index.get(name.as_str()) {
                Some(&i) => categories[i].modules.push(module),
                None => {
                    return Err(Error::UndeclaredCategory {
                        module: module.id.clone(),
                        category: name.clone(),
                        collection_type: collection_type.to_owned(),
                    })
                }
            }
        }
    }

    Ok(categories)
}

/// Represents the result of a categorization.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents a categorization error.
#[derive(Debug)]
pub enum Error {
    /// Returned when a module references a category name that isn't
    /// declared for its collection type in the project configuration.
    UndeclaredCategory {
        module: String,
        category: String,
        collection_type: String,
    },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UndeclaredCategory {
                module,
                category,
                collection_type,
            } => write!(
                f,
                "Module `{}` references category `{}` which is not declared \
                 for collection type `{}`",
                module, category, collection_type,
            ),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}
