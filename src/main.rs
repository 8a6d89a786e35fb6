//! Name Resolver CLI
//!
//! Loads a YAML catalog fixture into the in-memory stores and runs a
//! search or resolve against one domain, printing JSON.
//!
//! # Usage
//!
//! ```bash
//! # Ranked suggestions
//! name-resolver --catalog fixtures/catalog.yaml search --domain cards bolt
//!
//! # Resolve a hand-typed artist byline
//! name-resolver --catalog fixtures/catalog.yaml resolve --domain artists "Seb McKinnon"
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use name_resolver::config::{ARTISTS_DOMAIN, CARDS_DOMAIN};
use name_resolver::{
    ArtistRecord, CandidateRecord, CardRecord, EntityRecord, MemoryCatalog, MemoryTrigramIndex,
    ResolveError, ResolverConfig, TrigramSearchService,
};

#[derive(Parser)]
#[command(name = "name-resolver")]
#[command(version)]
#[command(about = "Trigram name search and resolution over a catalog fixture")]
struct Cli {
    /// Resolver config (YAML); defaults apply when omitted
    #[arg(long, env = "NAME_RESOLVER_CONFIG")]
    config: Option<PathBuf>,

    /// Catalog fixture with `cards` and `artists` lists
    #[arg(long)]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ranked suggestions for a partial name
    Search {
        #[arg(long, value_enum, default_value = "cards")]
        domain: Domain,
        term: String,
    },

    /// Resolve a name to exactly one catalog record
    Resolve {
        #[arg(long, value_enum, default_value = "cards")]
        domain: Domain,
        term: String,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Domain {
    Cards,
    Artists,
}

impl Domain {
    fn nickname(self) -> &'static str {
        match self {
            Domain::Cards => CARDS_DOMAIN,
            Domain::Artists => ARTISTS_DOMAIN,
        }
    }
}

impl Commands {
    fn domain(&self) -> Domain {
        match self {
            Commands::Search { domain, .. } | Commands::Resolve { domain, .. } => *domain,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFixture {
    cards: Vec<CardRecord>,
    artists: Vec<ArtistRecord>,
}

impl CatalogFixture {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog '{}'", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid catalog YAML in '{}'", path.display()))
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "name_resolver=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(outcome) => {
            println!("{}", outcome.body);
            if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "name-resolver failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Printed result; `success` is false for resolve errors
struct Outcome {
    body: String,
    success: bool,
}

async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let config = match &cli.config {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading configuration");
            ResolverConfig::from_file(path)?
        }
        None => ResolverConfig::default(),
    };

    tracing::info!(path = %cli.catalog.display(), "Loading catalog");
    let fixture = CatalogFixture::load(&cli.catalog)?;
    tracing::info!(
        cards = fixture.cards.len(),
        artists = fixture.artists.len(),
        "Catalog loaded"
    );

    match cli.command.domain() {
        Domain::Cards => {
            execute(&config, Domain::Cards, fixture.cards, CardRecord::candidate, &cli.command)
                .await
        }
        Domain::Artists => {
            execute(
                &config,
                Domain::Artists,
                fixture.artists,
                ArtistRecord::candidate,
                &cli.command,
            )
            .await
        }
    }
}

async fn execute<C, R>(
    config: &ResolverConfig,
    domain: Domain,
    records: Vec<R>,
    to_candidate: fn(&R) -> C,
    command: &Commands,
) -> anyhow::Result<Outcome>
where
    C: CandidateRecord,
    R: EntityRecord + Serialize,
{
    let nickname = domain.nickname();
    let namespaces = config.domain(nickname)?;

    let index = Arc::new(MemoryTrigramIndex::<C>::new());
    index
        .refresh(
            &namespaces.index_namespace,
            records.iter().map(to_candidate).collect(),
        )
        .await;
    let catalog = Arc::new(MemoryCatalog::<R>::new());
    catalog.refresh(&namespaces.catalog_namespace, records).await;

    let service = TrigramSearchService::<C, R>::from_config(config, nickname, index, catalog)?;

    let result = match command {
        Commands::Search { term, .. } => service
            .search(term)
            .await
            .map(|hits| json!({ "domain": nickname, "query": term, "results": hits })),
        Commands::Resolve { term, .. } => service
            .resolve_by_name(term)
            .await
            .map(|record| json!({ "domain": nickname, "query": term, "entity": record })),
    };

    let (body, success) = match result {
        Ok(body) => (body, true),
        Err(e) => (error_body(nickname, &e), false),
    };
    Ok(Outcome {
        body: serde_json::to_string_pretty(&body)?,
        success,
    })
}

fn error_body(nickname: &str, err: &ResolveError) -> serde_json::Value {
    let mut body = json!({
        "domain": nickname,
        "error": err.code(),
        "message": err.to_string(),
    });
    if let ResolveError::Ambiguous { alternatives, .. } = err {
        body["alternatives"] = json!(alternatives);
    }
    body
}
