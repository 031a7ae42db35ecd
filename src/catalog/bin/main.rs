use std::process::ExitCode;
use tokio::net::TcpListener;
use tracing::{error, info};
use bookshelf::catalog::controller::build_router;
use bookshelf::core::controller::AppState;
use bookshelf::core::domain::Configuration;
use bookshelf::core::library::LibraryResult;
use bookshelf::utils::logging::setup_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    // a missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = match Configuration::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };
    setup_tracing(&config);

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn serve(config: Configuration) -> LibraryResult<()> {
    let addr = config.bind_address();
    let app = build_router(AppState::new(config));

    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
