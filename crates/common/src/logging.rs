//! Logging and tracing initialization.
//!
//! Logs go to stderr so the CLI can keep stdout for the gesture guide and
//! config dumps.

use crate::config::LoggingConfig;

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` wins over `config.level` when set. Calling this twice is a
/// no-op; the first subscriber stays installed.
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if config.json {
        let subscriber = builder.json().finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = builder
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}

/// Initialize logging at `debug` when `verbose`, otherwise at the configured level.
pub fn init_cli_logging(config: &LoggingConfig, verbose: bool) {
    if verbose {
        init_logging(&LoggingConfig {
            level: "debug".to_string(),
            ..config.clone()
        });
    } else {
        init_logging(config);
    }
}
