//! The library code for the `stylebook` styleguide generator. The
//! architecture can be generally broken down into two distinct steps:
//!
//! 1. Parsing documented modules from markdown source files
//!    ([`crate::parser`])
//! 2. Rendering the modules into output pages ([`crate::render`])
//!
//! Of the two, the second step is the more involved. For every collection
//! type named in the configuration, the modules are bucketed into that
//! type's declared categories ([`crate::categorize`]); each category
//! becomes one listing page, and each page computes the relative prefix
//! back to the site root ([`crate::paths`]) so shared assets resolve at any
//! nesting depth. The pass finishes with the index page and, when
//! configured, the color-palette page.
//!
//! The final step is pretty straight-forward: [`crate::build`] writes the
//! full page sequence to disk in one pass and copies the template assets
//! into the destination directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod categorize;
pub mod config;
pub mod markdown;
pub mod module;
pub mod parser;
pub mod paths;
pub mod render;
pub mod value;
