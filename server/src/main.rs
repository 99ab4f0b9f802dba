use anyhow::Result;
use axum::Router;
use clap::Parser;
use recommender_core::config::{DEFAULT_MATCH_CUTOFF, DEFAULT_TOP_K};
use recommender_core::{IndexHandle, RecommenderConfig};
use server::{build_app, load_index, CorpusSource};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// JSON/JSONL file or directory holding the course rows
    #[arg(long, conflicts_with = "db", required_unless_present = "db")]
    corpus: Option<PathBuf>,
    /// sled database written by `catalog import`
    #[arg(long)]
    db: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Number of recommendations per query
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    top_k: usize,
    /// Minimum title similarity ratio for a match
    #[arg(long, default_value_t = DEFAULT_MATCH_CUTOFF)]
    match_cutoff: f64,
    /// Leave the matched course out of its own recommendations
    #[arg(long, default_value_t = false)]
    exclude_self: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let source = match (args.corpus, args.db) {
        (Some(path), _) => CorpusSource::Json(path),
        (None, Some(path)) => CorpusSource::Sled(path),
        (None, None) => anyhow::bail!("one of --corpus or --db is required"),
    };
    let config = RecommenderConfig { top_k: args.top_k, match_cutoff: args.match_cutoff, include_self: !args.exclude_self };
    let index = load_index(&source, config)?;
    let app: Router = build_app(Arc::new(IndexHandle::new(index)));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
