use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, SubCommand};
use folio::build::build_site;
use folio::config::Config;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("folio")
        .about("Builds a markdown site with paginated article listings")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Builds the site")
                .arg(
                    Arg::with_name("project")
                        .long("project")
                        .short("p")
                        .takes_value(true)
                        .help("The project directory (default: current directory)"),
                )
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .takes_value(true)
                        .help("The output directory (default: `_output` in the project)"),
                ),
        )
        .get_matches();

    if let Some(matches) = matches.subcommand_matches("build") {
        let project = match matches.value_of("project") {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().context("getting the current directory")?,
        };
        let config = Config::from_directory(&project).context("loading configuration")?;
        let output = match matches.value_of("output") {
            Some(dir) => PathBuf::from(dir),
            None => config.root_directory.join("_output"),
        };
        let pages = build_site(&config, &output).context("building site")?;
        info!(pages, output = %output.display(), "done");
    }
    Ok(())
}

