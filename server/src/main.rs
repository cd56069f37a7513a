use anyhow::Result;
use axum::Router;
use clap::Parser;
use server::{build_app, AppContext};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};
use vidrec_core::{VectorizerOptions, DEFAULT_KEYWORDS};

#[derive(Parser)]
#[command(name = "vidrec-server", about = "Serve keyword-based video recommendations")]
struct Args {
    /// Cleaned dataset CSV path
    #[arg(long, default_value = "cleaned.csv")]
    data: String,
    /// Host to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 3005)]
    port: u16,
    /// Keyword query used for every recommendation request
    #[arg(long, default_value = DEFAULT_KEYWORDS)]
    keywords: String,
    /// Stem terms before weighting (folds plurals such as "songs" into "song")
    #[arg(long, default_value_t = false)]
    stem: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let options = VectorizerOptions { stem: args.stem, ..VectorizerOptions::default() };
    let ctx = AppContext::load(&args.data, args.keywords.clone(), options);
    if !ctx.is_ready() {
        tracing::warn!(data = %args.data, "starting in degraded mode");
    }
    let app: Router = build_app(ctx);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
