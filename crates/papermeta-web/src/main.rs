use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use papermeta_core::config_file;
use papermeta_web::config::{Overrides, ServerSettings, overrides_from_env};
use papermeta_web::{AppState, router};

/// Scholarly PDF metadata extraction server
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Address to bind (default 0.0.0.0)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (default 5000)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory for temporary uploads (default ./temp_uploads)
    #[arg(long)]
    upload_dir: Option<PathBuf>,

    /// Maximum upload size in megabytes (default 50)
    #[arg(long)]
    max_upload_mb: Option<usize>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            bind: self.bind.clone(),
            port: self.port,
            upload_dir: self.upload_dir.clone(),
            max_upload_mb: self.max_upload_mb,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("papermeta=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = config_file::load_config();
    let env = overrides_from_env(|key| std::env::var(key).ok())?;
    let settings = ServerSettings::resolve(file.server.as_ref(), &env, &args.overrides());
    let extraction = file.extraction.unwrap_or_default();

    let state = Arc::new(AppState::build(&settings, &extraction)?);
    let app = router(state);

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
