use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use ecell_backend::{BackendConfig, RestStore};
use ecell_content::prelude::*;
use ecell_content::team::CURRENT_BATCH;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("ecell")
        .version(ecell_backend::VERSION)
        .about("E-Cell site content tools")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Backend config TOML (default: ECELL_* environment variables)"),
        )
        .arg(
            Arg::new("cache-dir")
                .long("cache-dir")
                .global(true)
                .default_value(".ecell-cache")
                .value_parser(value_parser!(PathBuf))
                .help("Directory for the local content cache"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("load")
                .about("Load a collection with cache and default fallback")
                .arg(
                    Arg::new("collection")
                        .required(true)
                        .value_parser(value_parser!(Collection))
                        .help("Table name, e.g. gallery_items"),
                )
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .help("Maximum rows"),
                ),
        )
        .subcommand(
            Command::new("roster")
                .about("Print the ranked team roster")
                .arg(
                    Arg::new("batch")
                        .long("batch")
                        .default_value(CURRENT_BATCH)
                        .help("Batch year, e.g. 2024-25"),
                ),
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

fn loader(matches: &ArgMatches) -> Result<ContentLoader> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => BackendConfig::load_file(path)?,
        None => BackendConfig::from_env().context("backend not configured")?,
    };
    let cache_dir = matches
        .get_one::<PathBuf>("cache-dir")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(".ecell-cache"));

    info!(url = %config.url, cache_dir = %cache_dir.display(), "using backend");
    let store = RestStore::new(&config)?;
    Ok(ContentLoader::new(Arc::new(store), Arc::new(FileCacheStore::new(cache_dir))))
}

async fn load<R: ContentRecord>(
    loader: &ContentLoader,
    limit: Option<usize>,
    defaults: Vec<R>,
) -> Result<String> {
    let mut options = LoadOptions::<R>::new().with_defaults(defaults);
    if let Some(limit) = limit {
        options = options.with_limit(limit);
    }
    to_json(&loader.load(options).await)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

async fn run_load(loader: &ContentLoader, args: &ArgMatches) -> Result<String> {
    let collection = *args
        .get_one::<Collection>("collection")
        .context("collection is required")?;
    let limit = args.get_one::<usize>("limit").copied();

    match collection {
        Collection::TeamMembers => load::<TeamMember>(loader, limit, defaults::team_members()).await,
        Collection::MemberSocialLinks => load::<MemberSocialLink>(loader, limit, Vec::new()).await,
        Collection::GalleryItems => load::<GalleryItem>(loader, limit, defaults::gallery_items()).await,
        Collection::Initiatives => load::<Initiative>(loader, limit, defaults::initiatives()).await,
        Collection::Testimonials => load::<Testimonial>(loader, limit, Vec::new()).await,
        Collection::BulletinItems => load::<BulletinItem>(loader, limit, Vec::new()).await,
        Collection::BlogPosts => load::<BlogPost>(loader, limit, Vec::new()).await,
        Collection::AdminCredentials => bail!("refusing to print {collection}"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    let output = match matches.subcommand() {
        Some(("load", args)) => run_load(&loader(&matches)?, args).await?,
        Some(("roster", args)) => {
            let batch = args
                .get_one::<String>("batch")
                .map_or(CURRENT_BATCH, String::as_str);
            let directory = TeamDirectory::new(loader(&matches)?);
            to_json(&directory.load_roster(batch, defaults::team_members()).await)?
        }
        _ => bail!("unknown command"),
    };

    println!("{output}");
    Ok(())
}
