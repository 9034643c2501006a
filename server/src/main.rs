use anyhow::Result;
use axum::Router;
use clap::Parser;
use invert_core::config::DEFAULT_CONTEXT_WINDOW;
use invert_core::EngineConfig;
use invert_server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory of plain-text documents
    #[arg(long, default_value = "./corpus")]
    corpus: PathBuf,
    /// Stoplist file, one word per line
    #[arg(long)]
    stoplist: Option<PathBuf>,
    /// Context window width in tokens
    #[arg(long, default_value_t = DEFAULT_CONTEXT_WINDOW)]
    window: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let engine = EngineConfig::new(args.window)?;
    let app: Router = build_app(ServerConfig { corpus: args.corpus, stoplist: args.stoplist, engine })?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
