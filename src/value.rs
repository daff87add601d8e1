//! Conversions from domain types into template [`Value`]s.

use crate::config::Config;
use crate::module::{CategoryNames, Module};
use gtmpl_value::Value;
use std::collections::HashMap;

impl From<&Module> for Value {
    /// Converts [`Module`]s into [`Value`]s for templating. The module's
    /// collection config is exposed so templates can cross-link categories.
    fn from(module: &Module) -> Value {
        let config: HashMap<String, Value> = module
            .config
            .collections
            .iter()
            .map(|(collection_type, names)| (collection_type.clone(), names.into()))
            .collect();

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("id".to_owned(), module.id.as_str().into());
        m.insert("name".to_owned(), module.display_name().into());
        m.insert("html".to_owned(), module.html.as_str().into());
        m.insert("config".to_owned(), Value::Object(config));
        Value::Object(m)
    }
}

impl From<&CategoryNames> for Value {
    /// Converts a category assignment into an array of name [`Value`]s,
    /// regardless of whether it was declared as a scalar or a list.
    fn from(names: &CategoryNames) -> Value {
        Value::Array(names.names().iter().map(|name| name.as_str().into()).collect())
    }
}

impl From<&Config> for Value {
    /// Converts the [`Config`] into a [`Value`] so templates can reach any
    /// configured option.
    fn from(config: &Config) -> Value {
        let strings = |values: &[String]| -> Value {
            Value::Array(values.iter().map(|v| v.as_str().into()).collect())
        };

        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert(
            "dest".to_owned(),
            config.dest.to_string_lossy().to_string().into(),
        );
        m.insert(
            "template_dir".to_owned(),
            config.template_dir.to_string_lossy().to_string().into(),
        );
        m.insert(
            "template_engine".to_owned(),
            config.template_engine.as_str().into(),
        );
        m.insert(
            "timestamp_format".to_owned(),
            config.timestamp_format.as_str().into(),
        );
        m.insert(
            "output_collection".to_owned(),
            strings(&config.output_collection),
        );
        m.insert("collection".to_owned(), collection_value(&config.collection));
        m.insert("color_palette".to_owned(), config.color_palette.into());
        m.insert("colors".to_owned(), strings(&config.colors));
        Value::Object(m)
    }
}

/// The declared collection map as a template value: collection-type name to
/// array of declared category names.
pub fn collection_value(collection: &HashMap<String, Vec<String>>) -> Value {
    Value::Object(
        collection
            .iter()
            .map(|(collection_type, names)| {
                (
                    collection_type.clone(),
                    Value::Array(names.iter().map(|name| name.as_str().into()).collect()),
                )
            })
            .collect(),
    )
}
