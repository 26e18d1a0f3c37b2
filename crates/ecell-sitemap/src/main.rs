use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use ecell_sitemap::{generate, SitemapConfig, DEFAULT_BASE_URL};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("generate-sitemap")
        .version(ecell_sitemap::VERSION)
        .about("Write sitemap.xml from the site's route declarations")
        .arg(
            Arg::new("src")
                .long("src")
                .default_value("src")
                .value_parser(value_parser!(PathBuf))
                .help("Source directory to scan"),
        )
        .arg(
            Arg::new("out")
                .long("out")
                .default_value("public/sitemap.xml")
                .value_parser(value_parser!(PathBuf))
                .help("Output file"),
        )
        .arg(
            Arg::new("base-url")
                .long("base-url")
                .default_value(DEFAULT_BASE_URL)
                .help("Public origin of the site"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .action(ArgAction::Append)
                .help("Additional route to leave out (repeatable)"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    let mut config = SitemapConfig::default();
    if let Some(src) = matches.get_one::<PathBuf>("src") {
        config = config.with_src_dir(src.clone());
    }
    if let Some(out) = matches.get_one::<PathBuf>("out") {
        config = config.with_out_path(out.clone());
    }
    if let Some(base) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base.clone());
    }
    if let Some(extra) = matches.get_many::<String>("exclude") {
        config = config.with_excluded(extra.cloned());
    }

    let routes = generate(&config)
        .with_context(|| format!("generating sitemap from {}", config.src_dir.display()))?;
    println!("sitemap.xml generated with {} routes", routes.len());
    Ok(())
}
