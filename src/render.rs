//! Responsible for templating the styleguide pages: one listing page per
//! declared category of every configured collection type, the index page,
//! and the optional color-palette page. Pages are produced in memory as
//! [`Page`] values; writing them to disk is [`crate::build`]'s job.

use crate::categorize::{self, categorize};
use crate::config::Config;
use crate::markdown;
use crate::module::Module;
use crate::paths::compute_root;
use crate::value::collection_value;
use chrono::Local;
use gtmpl::{Context, Template, Value};
use gtmpl_derive::Gtmpl;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::PathBuf;

const INDEX_FILE: &str = "index.html";
const COLORS_FILE: &str = "color.html";

/// An output page: rendered markup plus the path it should be written to.
/// Pages are produced here and never mutated afterwards.
pub struct Page {
    /// The rendered HTML.
    pub html: String,

    /// The target location on disk for the output file. Always rooted under
    /// the configured destination directory.
    pub output_path: PathBuf,
}

/// The per-page template helper, carrying the data templates most commonly
/// reach for: the page's relative root prefix and the declared collection
/// map. A fresh value is built for every page, so no state is shared
/// between template invocations.
#[derive(Gtmpl)]
struct Helper {
    root: String,
    collection: Value,
}

/// Renders the full set of styleguide pages from a module list. The two
/// template variants are loaded and the run timestamp is formatted at
/// construction; a failure there means no page is ever produced.
pub struct Renderer<'a> {
    config: &'a Config,
    modules: &'a [Module],
    layout_template: Template,
    index_template: Template,
    timestamp: String,
}

/// The inputs for templating a single page. Listing pages fill in the
/// collection type, category name, and module list; the index and palette
/// pages fill in a raw HTML body and set `is_index`, which selects the
/// index-style template variant and pins the page to the site root.
struct PageParams<'a> {
    collection_type: &'a str,
    name: &'a str,
    modules: &'a [&'a Module],
    html: &'a str,
    title: Option<&'a str>,
    file_name: &'a str,
    is_index: bool,
}

impl Default for PageParams<'_> {
    fn default() -> Self {
        PageParams {
            collection_type: "",
            name: "",
            modules: &[],
            html: "",
            title: None,
            file_name: INDEX_FILE,
            is_index: false,
        }
    }
}

impl<'a> Renderer<'a> {
    /// Constructs a [`Renderer`], loading the listing-style (`layout`) and
    /// index-style (`index`) template variants from the configured template
    /// directory.
    pub fn new(config: &'a Config, modules: &'a [Module]) -> Result<Renderer<'a>> {
        Ok(Renderer {
            layout_template: load_template(config, "layout")?,
            index_template: load_template(config, "index")?,
            timestamp: format_timestamp(&config.timestamp_format)?,
            config,
            modules,
        })
    }

    /// Renders every page of the site: for each collection type in
    /// configured order, one listing page per declared category (empty
    /// categories included), then the index page, then the color-palette
    /// page when configured. Rendering is all-or-nothing; the first failure
    /// aborts the whole pass.
    pub fn render(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        for collection_type in &self.config.output_collection {
            let declared = self
                .config
                .collection
                .get(collection_type)
                .ok_or_else(|| Error::UndeclaredCollectionType(collection_type.clone()))?;
            for category in categorize(self.modules, collection_type, declared)? {
                pages.push(self.render_page(PageParams {
                    collection_type,
                    name: &category.name,
                    modules: &category.modules,
                    ..PageParams::default()
                })?);
            }
        }
        pages.push(self.render_index()?);
        if self.config.color_palette {
            pages.push(self.render_colors()?);
        }
        Ok(pages)
    }

    /// Renders the top-level landing page. When an index document is
    /// configured its markdown becomes the page body; otherwise the body is
    /// empty.
    fn render_index(&self) -> Result<Page> {
        let mut html = String::new();
        if let Some(index) = &self.config.index {
            let mut md = String::new();
            File::open(index)
                .map_err(|e| Error::OpenIndex {
                    path: index.clone(),
                    err: e,
                })?
                .read_to_string(&mut md)
                .map_err(|e| Error::OpenIndex {
                    path: index.clone(),
                    err: e,
                })?;
            markdown::to_html(&mut html, &md);
        }
        self.render_page(PageParams {
            title: Some("index"),
            html: &html,
            is_index: true,
            ..PageParams::default()
        })
    }

    /// Renders the color-palette page: one swatch block per configured
    /// color, joined by newlines, through the index-style template variant.
    fn render_colors(&self) -> Result<Page> {
        let html = self
            .config
            .colors
            .iter()
            .map(|color| {
                format!(
                    concat!(
                        r#"<div class="sb-palette">"#,
                        r#"<div class="sb-palette__color" style="background-color: {color};"></div>"#,
                        r#"<div class="sb-palette__label">{color}</div>"#,
                        r#"</div>"#,
                    ),
                    color = color,
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        self.render_page(PageParams {
            title: Some("colors"),
            html: &html,
            file_name: COLORS_FILE,
            is_index: true,
            ..PageParams::default()
        })
    }

    /// Templates a single page. The output path is
    /// `{dest}/{type}/{name}/{file_name}` with empty components collapsing
    /// away, and the page's root prefix is derived from that path (pinned
    /// to `./` for index-style pages, which sit at the site root by
    /// definition).
    fn render_page(&self, params: PageParams) -> Result<Page> {
        let template = match params.is_index {
            true => &self.index_template,
            false => &self.layout_template,
        };
        let output_path = self
            .config
            .dest
            .join(params.collection_type)
            .join(params.name)
            .join(params.file_name);
        let root = match params.is_index {
            true => String::from("./"),
            false => compute_root(&output_path, &self.config.dest),
        };
        let helper = Helper {
            root: root.clone(),
            collection: collection_value(&self.config.collection),
        };

        let mut context: HashMap<String, Value> = HashMap::new();
        context.insert(
            "modules".to_owned(),
            Value::Array(params.modules.iter().map(|&m| m.into()).collect()),
        );
        context.insert("html".to_owned(), params.html.into());
        context.insert("config".to_owned(), self.config.into());
        context.insert("timestamp".to_owned(), self.timestamp.as_str().into());
        context.insert(
            "title".to_owned(),
            params.title.unwrap_or(params.name).into(),
        );
        context.insert("root".to_owned(), root.into());
        context.insert("helper".to_owned(), helper.into());
        context.insert(
            "output_path".to_owned(),
            output_path.to_string_lossy().to_string().into(),
        );
        context.insert(
            "template_dir".to_owned(),
            self.config.template_dir.to_string_lossy().to_string().into(),
        );

        let mut buf: Vec<u8> = Vec::new();
        template.execute(
            &mut buf,
            &Context::from(Value::Object(context)).unwrap(),
        )?;
        Ok(Page {
            html: String::from_utf8_lossy(&buf).into_owned(),
            output_path,
        })
    }
}

// Loads one template variant from the configured template directory and
// parses it. The file name is the variant name plus the extension mapped to
// the active template engine.
fn load_template(config: &Config, name: &str) -> Result<Template> {
    let ext = config
        .template_ext
        .get(&config.template_engine)
        .ok_or_else(|| Error::UnknownTemplateEngine(config.template_engine.clone()))?;
    let path = config.template_dir.join(format!("{}{}", name, ext));

    let mut contents = String::new();
    File::open(&path)
        .map_err(|e| Error::OpenTemplate {
            path: path.clone(),
            err: e,
        })?
        .read_to_string(&mut contents)
        .map_err(|e| Error::OpenTemplate {
            path: path.clone(),
            err: e,
        })?;

    let mut template = Template::default();
    template.parse(&contents).map_err(|e| Error::ParseTemplate {
        path,
        err: e.to_string(),
    })?;
    Ok(template)
}

// chrono only reports a bad format string once the formatted value is
// written out, so route it through `write!` rather than `to_string`.
fn format_timestamp(format: &str) -> Result<String> {
    use std::fmt::Write;
    let mut timestamp = String::new();
    write!(timestamp, "{}", Local::now().format(format))
        .map_err(|_| Error::TimestampFormat(format.to_owned()))?;
    Ok(timestamp)
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a rendering operation.
#[derive(Debug)]
pub enum Error {
    /// Returned when `output_collection` names a collection type with no
    /// entry in the `collection` map.
    UndeclaredCollectionType(String),

    /// Returned when a module references an undeclared category.
    Categorize(categorize::Error),

    /// Returned when `template_engine` has no extension in `template_ext`.
    UnknownTemplateEngine(String),

    /// Returned for I/O problems while reading a template file.
    OpenTemplate { path: PathBuf, err: io::Error },

    /// Returned for errors parsing a template file.
    ParseTemplate { path: PathBuf, err: String },

    /// Returned for errors executing a template.
    Template(String),

    /// Returned for I/O problems while reading the configured index
    /// document.
    OpenIndex { path: PathBuf, err: io::Error },

    /// Returned when `timestamp_format` isn't a valid chrono format string.
    TimestampFormat(String),
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as human-readable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UndeclaredCollectionType(collection_type) => write!(
                f,
                "Collection type `{}` has no declared categories in the \
                 `collection` option",
                collection_type,
            ),
            Error::Categorize(err) => err.fmt(f),
            Error::UnknownTemplateEngine(engine) => write!(
                f,
                "Template engine `{}` has no extension in the `template_ext` \
                 option",
                engine,
            ),
            Error::OpenTemplate { path, err } => {
                write!(f, "Opening template file `{}`: {}", path.display(), err)
            }
            Error::ParseTemplate { path, err } => {
                write!(f, "Parsing template file `{}`: {}", path.display(), err)
            }
            Error::Template(err) => err.fmt(f),
            Error::OpenIndex { path, err } => {
                write!(f, "Reading index document `{}`: {}", path.display(), err)
            }
            Error::TimestampFormat(format) => {
                write!(f, "Invalid timestamp format `{}`", format)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UndeclaredCollectionType(_) => None,
            Error::Categorize(err) => Some(err),
            Error::UnknownTemplateEngine(_) => None,
            Error::OpenTemplate { path: _, err } => Some(err),
            Error::ParseTemplate { .. } => None,
            Error::Template(_) => None,
            Error::OpenIndex { path: _, err } => Some(err),
            Error::TimestampFormat(_) => None,
        }
    }
}

impl From<categorize::Error> for Error {
    /// Converts [`categorize::Error`]s into [`Error`]. This allows us to
    /// use the `?` operator around categorization.
    fn from(err: categorize::Error) -> Error {
        Error::Categorize(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`].
    /// This allows us to use the `?` operator for fallible template
    /// operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::module::{CategoryNames, ModuleConfig};

    fn template(source: &str) -> Template {
        let mut template = Template::default();
        template.parse(source).unwrap();
        template
    }

    fn module(id: &str, collection_type: &str, names: CategoryNames) -> Module {
        let mut collections = HashMap::new();
        collections.insert(collection_type.to_owned(), names);
        Module {
            id: id.to_owned(),
            config: ModuleConfig {
                name: String::new(),
                collections,
            },
            html: String::new(),
        }
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.dest = PathBuf::from("/site");
        config.output_collection = vec![String::from("component")];
        config.collection.insert(
            String::from("component"),
            vec![String::from("button"), String::from("input")],
        );
        config
    }

    fn renderer<'a>(config: &'a Config, modules: &'a [Module]) -> Renderer<'a> {
        Renderer {
            config,
            modules,
            layout_template: template("{{.title}}|{{.root}}|{{len .modules}}"),
            index_template: template("index|{{.root}}|{{.html}}"),
            timestamp: String::from("2021-04-16 00:00:00"),
        }
    }

    #[test]
    fn test_render_listing_pages_then_index() -> Result<()> {
        let config = config();
        let modules = vec![
            module(
                "button-primary",
                "component",
                CategoryNames::Single(String::from("button")),
            ),
            module(
                "form-control",
                "component",
                CategoryNames::Multiple(vec![
                    String::from("button"),
                    String::from("input"),
                ]),
            ),
        ];
        let pages = renderer(&config, &modules).render()?;

        assert_eq!(3, pages.len());
        assert_eq!(
            PathBuf::from("/site/component/button/index.html"),
            pages[0].output_path,
        );
        assert_eq!("button|../../|2", pages[0].html);
        assert_eq!(
            PathBuf::from("/site/component/input/index.html"),
            pages[1].output_path,
        );
        assert_eq!("input|../../|1", pages[1].html);
        assert_eq!(PathBuf::from("/site/index.html"), pages[2].output_path);
        assert_eq!("index|./|", pages[2].html);
        Ok(())
    }

    #[test]
    fn test_render_collection_types_in_configured_order() -> Result<()> {
        let mut config = config();
        config.output_collection =
            vec![String::from("component"), String::from("page")];
        config
            .collection
            .insert(String::from("page"), vec![String::from("guide")]);
        let modules = vec![module(
            "getting-started",
            "page",
            CategoryNames::Single(String::from("guide")),
        )];
        let pages = renderer(&config, &modules).render()?;

        // button + input + guide + index.
        assert_eq!(4, pages.len());
        assert_eq!(
            PathBuf::from("/site/component/button/index.html"),
            pages[0].output_path,
        );
        assert_eq!(
            PathBuf::from("/site/page/guide/index.html"),
            pages[2].output_path,
        );
        assert_eq!("guide|../../|1", pages[2].html);
        assert_eq!(PathBuf::from("/site/index.html"), pages[3].output_path);
        Ok(())
    }

    #[test]
    fn test_empty_categories_still_render() -> Result<()> {
        let config = config();
        let pages = renderer(&config, &[]).render()?;

        assert_eq!(3, pages.len());
        assert_eq!("button|../../|0", pages[0].html);
        assert_eq!("input|../../|0", pages[1].html);
        Ok(())
    }

    #[test]
    fn test_render_color_palette() -> Result<()> {
        let mut config = config();
        config.color_palette = true;
        config.colors = vec![String::from("#fff"), String::from("#000")];
        let pages = renderer(&config, &[]).render()?;

        assert_eq!(4, pages.len());
        let palette = &pages[3];
        assert_eq!(PathBuf::from("/site/color.html"), palette.output_path);
        assert!(palette.html.starts_with("index|./|"));
        assert!(palette.html.contains("background-color: #fff;"));
        assert!(palette.html.contains(r#"<div class="sb-palette__label">#000</div>"#));
        Ok(())
    }

    #[test]
    fn test_undeclared_collection_type_is_an_error() {
        let mut config = config();
        config.output_collection = vec![String::from("page")];
        match renderer(&config, &[]).render() {
            Err(Error::UndeclaredCollectionType(collection_type)) => {
                assert_eq!("page", collection_type)
            }
            _ => panic!("expected an undeclared-collection-type error"),
        }
    }

    #[test]
    fn test_undeclared_category_aborts_the_render() {
        let config = config();
        let modules = vec![module(
            "hero-banner",
            "component",
            CategoryNames::Single(String::from("hero")),
        )];
        match renderer(&config, &modules).render() {
            Err(Error::Categorize(_)) => {}
            _ => panic!("expected a categorization error"),
        }
    }
}
