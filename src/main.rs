/// aktor-lookup - resolve a national identity number against the actor registry
use aktor_client::{
    config::AktorConfig,
    transport::ReqwestTransport,
    AktorClient, IdentGroup,
};
use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "aktor-lookup", version, about)]
struct Args {
    /// Identifier to look up (fnr unless --group says otherwise)
    search_ident: String,

    /// Identifier group to resolve to
    #[arg(long, value_enum, default_value_t = Group::AktoerId)]
    group: Group,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Group {
    AktoerId,
    NorskIdent,
    Folkeregisterident,
}

impl From<Group> for IdentGroup {
    fn from(group: Group) -> Self {
        match group {
            Group::AktoerId => IdentGroup::AktoerId,
            Group::NorskIdent => IdentGroup::NorskIdent,
            Group::Folkeregisterident => IdentGroup::Folkeregisterident,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = AktorConfig::from_env().context("Failed to load configuration")?;
    init_logging(&config);
    config.validate()?;

    let transport = ReqwestTransport::new(&config.transport_config())
        .context("Failed to create HTTP client")?;
    let client = AktorClient::new(
        config.client_config(),
        config.token_provider()?,
        Arc::new(transport),
    );

    let ident = client
        .resolve_identifier(&args.search_ident, args.group.into())
        .await?;
    println!("{}", ident);

    Ok(())
}

fn init_logging(config: &AktorConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.logging.level)
        .unwrap_or_else(|_| "aktor_client=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
