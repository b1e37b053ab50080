//! Play Mode - countdown/stopwatch clock and multi-team scoreboard for a game session
//!
//! This is the main entry point for the play-mode host.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use play_mode::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("play_mode={},tower_http=info", config.log_level()))
        .init();

    info!("Starting play-mode server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    if let Some(game) = config.startup_game() {
        let session = state.enter_session(&game).await?;
        info!("Opened startup session for {:?} at {}", session.game_name, session.timer.display);
    }

    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /session        - Enter play mode for a game");
    info!("  GET    /session        - Current session state");
    info!("  POST   /session/intent - Apply a user intent");
    info!("  DELETE /session        - Exit play mode");
    info!("  GET    /health         - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    // release the tick source of a session left open
    if state.has_session().await {
        state.exit_session().await?;
    }

    info!("Server shutdown complete");
    Ok(())
}
