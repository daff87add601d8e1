use clap::{App, Arg};
use std::path::{Path, PathBuf};
use stylebook::build::build_site;
use stylebook::config::Config;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let matches = App::new("stylebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders documented UI modules into a static styleguide site")
        .arg(
            Arg::with_name("project")
                .help("Project directory to search for `stylebook.yaml`")
                .index(1),
        )
        .arg(
            Arg::with_name("dest")
                .short("d")
                .long("dest")
                .takes_value(true)
                .help("Overrides the configured destination directory"),
        )
        .get_matches();

    let project = matches.value_of("project").unwrap_or(".");
    let mut config = Config::from_directory(Path::new(project))?;
    if let Some(dest) = matches.value_of("dest") {
        config.dest = PathBuf::from(dest);
    }
    build_site(&config)?;
    Ok(())
}
