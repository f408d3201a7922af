use quadsearch_config::LoggingConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Filter directive to use: command line level, else the config file's
/// `logging.level` (which may name per-crate directives).
pub fn directive(requested: Option<LevelFilter>, config: &LoggingConfig) -> String {
    match requested {
        Some(level) => level.to_string().to_lowercase(),
        None => config.level.clone(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins when set.
///
/// Logs go to stderr so JSON on stdout stays parseable.
pub fn init(directive: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
