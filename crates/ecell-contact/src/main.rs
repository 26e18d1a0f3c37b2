use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use ecell_contact::{ContactConfig, ContactRelay, ResendTransport};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli() -> Command {
    Command::new("ecell-contact")
        .version(ecell_contact::VERSION)
        .about("Contact form email relay")
        .arg(
            Arg::new("bind")
                .long("bind")
                .env("CONTACT_BIND")
                .default_value("0.0.0.0:8787")
                .value_parser(value_parser!(SocketAddr))
                .help("Address to listen on"),
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
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    let addr = *matches
        .get_one::<SocketAddr>("bind")
        .context("bind address is required")?;
    let config = ContactConfig::from_env().context("contact relay not configured")?;
    let transport = ResendTransport::new(&config)?;
    let relay = Arc::new(ContactRelay::new(Arc::new(transport), config));

    ecell_contact::server::serve(relay, addr).await?;
    Ok(())
}
