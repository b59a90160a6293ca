mod cli;
mod telemetry;

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use anyhow::Context;
use api::AppState;
use clap::Parser;
use faq_index::{
    EmbeddingsProvider, FaqIndex, IndexConfig, embed::openai::OpenAiEmbedder,
    progress::IndicatifProgress,
};
use responder::{FaqResponder, OpenAiChat};
use tracing::{info, warn};

use crate::cli::{Cli, Commands};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8123;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real environment variables still apply.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    telemetry::init_tracing(&level)?;
    info!(%level, "log level configured");

    let llm = Arc::new(LlmServiceProfiles::from_env().context("invalid LLM configuration")?);
    let embedder: Arc<dyn EmbeddingsProvider> = Arc::new(OpenAiEmbedder::new(llm.clone()));
    let index_cfg = IndexConfig::from_env().context("invalid FAQ index configuration")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(index_cfg, llm, embedder).await,
        Commands::BuildIndex { dataset, index } => {
            build_index(index_cfg, dataset, index, embedder).await
        }
    }
}

async fn serve(
    cfg: IndexConfig,
    llm: Arc<LlmServiceProfiles>,
    embedder: Arc<dyn EmbeddingsProvider>,
) -> anyhow::Result<()> {
    let status = faq_index::ensure_ready(&cfg, embedder.as_ref())
        .await
        .context("FAQ_INDEX_REQUIRED is set")?;
    info!(?status, "FAQ index bootstrap finished");
    if !status.is_ready() {
        warn!("serving without a FAQ index");
    }

    let index = FaqIndex::new(cfg)?;
    let responder = FaqResponder::new(index, embedder, Arc::new(OpenAiChat::new(llm)));
    let state = Arc::new(AppState::new(responder));

    api::start(&bind_addr()?, state).await?;
    Ok(())
}

async fn build_index(
    mut cfg: IndexConfig,
    dataset: Option<std::path::PathBuf>,
    index_path: Option<std::path::PathBuf>,
    embedder: Arc<dyn EmbeddingsProvider>,
) -> anyhow::Result<()> {
    if let Some(p) = dataset {
        cfg.dataset_path = p;
    }
    if let Some(p) = index_path {
        cfg.index_path = p;
    }
    let dataset_path = cfg.dataset_path.clone();
    let index = FaqIndex::new(cfg)?;

    let progress = IndicatifProgress::bar();
    let n = index
        .build_from_dataset(&dataset_path, embedder.as_ref(), &progress)
        .await
        .with_context(|| format!("failed to build index from {}", dataset_path.display()))?;

    info!(entries = n, path = %index.config().index_path.display(), "FAQ index built");
    Ok(())
}

/// `API_HOST:PORT`.
fn bind_addr() -> anyhow::Result<String> {
    let host = std::env::var("API_HOST")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = match std::env::var("PORT") {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<u16>()
            .with_context(|| format!("PORT must be a port number, got {raw:?}"))?,
        _ => DEFAULT_PORT,
    };
    Ok(format!("{host}:{port}"))
}
