use clap::Parser;
use medianode_uptime::dashboard::{DashboardState, DashboardView};
use medianode_uptime::server::config::DashboardConfig;
use medianode_uptime::services::node_loader::HttpNodeSource;
use medianode_uptime::web::{self, middleware::i18n::DEFAULT_LOCALE, render::Renderer};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Load the node list once, write the rendered page to this file and exit
    #[arg(long)]
    render_to: Option<PathBuf>,
}

fn init_logging(log_dir: &str) {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily(log_dir, "dashboard.log");
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    // Default to `info` level if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper_util=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for the shutdown signal.");
    }
    info!("Shutdown signal received.");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config = DashboardConfig::load(args.config.as_deref())?;
    init_logging(&config.log_dir);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        endpoint = %config.endpoint,
        "Starting media-node uptime dashboard."
    );

    let source = Arc::new(HttpNodeSource::new(
        config.endpoint.clone(),
        config.request_timeout(),
    )?);
    let renderer = Arc::new(Renderer::new()?);
    let mut view = DashboardView::new(DashboardState::shared(), source, &config);

    view.mount().await;

    if let Some(path) = args.render_to {
        view.wait_for_load().await;
        let request_url = config.public_url.clone().unwrap_or_else(|| "/".to_string());
        let html = renderer
            .render_shared(&view.state(), DEFAULT_LOCALE, &request_url)
            .await?;
        view.unmount().await;
        tokio::fs::write(&path, html).await?;
        info!(path = %path.display(), "Dashboard written.");
        return Ok(());
    }

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "HTTP server listening");

    let app = web::create_axum_router(view.state(), renderer);
    let served = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Tear the view down either way so a pending request is aborted.
    view.unmount().await;
    served?;

    Ok(())
}
