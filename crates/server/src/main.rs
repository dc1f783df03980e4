use clap::Parser;
use tcline_server::config::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,tcline_server=debug,tcline_media=debug,tower_http=debug")
        }))
        .init();

    let config = ServerConfig::parse();
    if let Some(dir) = &config.static_dir {
        info!("serving static files from {}", dir.display());
    }

    let listener = tokio::net::TcpListener::bind(config.listen).await?;
    info!("tcline backend listening on http://{}", config.listen);
    info!("  POST /process  - extract start/end times from a .tc or .mp4 upload");

    axum::serve(listener, tcline_server::router(config)).await?;
    Ok(())
}
