use tracing_subscriber::EnvFilter;
use crate::core::domain::{Configuration, LogFormat};

// RUST_LOG wins over the configured level when set.
pub fn setup_tracing(config: &Configuration) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bookshelf={},tower_http={}", config.log_level, config.log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disable printing the name of the module in every log line.
        .with_target(false);

    match config.log_format {
        LogFormat::Text => builder.init(),
        // ANSI color codes would end up inside the JSON strings.
        LogFormat::Json => builder.with_ansi(false).json().init(),
    }
}
