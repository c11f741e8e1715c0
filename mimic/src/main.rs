use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mimic::api::{create_router, AppState};
use mimic::config::Config;
use mimic::llm::LlmProvider;
use mimic::models::{parse_raw_corpus, RawPost};
use mimic::processing::{LexiconSentiment, TextNormalizer};
use mimic::services::CloneService;
use mimic::store::ProfileStore;

#[derive(Parser)]
#[command(name = "mimic")]
#[command(about = "Learns a writing style from social-media posts and answers in that voice")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Train a profile from a corpus file and persist it
    Train {
        /// JSON file holding `{"posts": [...]}` or a bare array of posts
        #[arg(long)]
        corpus: PathBuf,
    },
    /// Answer one question and print the result
    Ask {
        question: String,
        /// Train in-process from this corpus instead of loading the stored profile
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mimic=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if let Some(reason) = llm.unavailable_reason() {
        tracing::warn!(reason, "LLM unavailable; every answer will be the apology fallback");
    }

    let store = ProfileStore::new(&config.profile.store_path);
    let clone = Arc::new(CloneService::new(
        TextNormalizer::new(Arc::new(LexiconSentiment::new())),
        Arc::new(llm.clone()),
        Some(store.clone()),
        &config.profile,
    ));

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, clone, llm, &store).await,
        Command::Train { corpus } => {
            let posts = read_corpus(&corpus).await?;
            let report = clone.train(&posts).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Command::Ask { question, corpus } => {
            match corpus {
                Some(path) => {
                    let posts = read_corpus(&path).await?;
                    if let Err(e) = clone.train(&posts).await {
                        // The profile is still in memory; only persistence failed.
                        tracing::warn!(error = %e, "Trained profile was not saved");
                    }
                }
                None => clone.load().await.with_context(|| {
                    format!(
                        "No stored profile at {}; train first or pass --corpus",
                        store.path().display()
                    )
                })?,
            }
            println!("{}", clone.ask(&question).await);
            Ok(())
        }
    }
}

async fn serve(
    config: Config,
    clone: Arc<CloneService>,
    llm: LlmProvider,
    store: &ProfileStore,
) -> anyhow::Result<()> {
    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "MIMIC_API_KEYS is not set; /clone:* and /profile stay locked until it is"
        );
    }

    if store.exists().await {
        if let Err(e) = clone.load().await {
            tracing::warn!(error = %e, "Starting without a profile");
        }
    } else {
        tracing::info!(path = %store.path().display(), "No stored profile yet");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config, clone, llm));

    tracing::info!("Mimic starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI document: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn read_corpus(path: &Path) -> anyhow::Result<Vec<RawPost>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read corpus {}", path.display()))?;
    let posts = parse_raw_corpus(&raw)?;
    tracing::info!(posts = posts.len(), path = %path.display(), "Corpus loaded");
    Ok(posts)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
