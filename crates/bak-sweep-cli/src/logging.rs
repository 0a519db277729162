use std::env;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Our own crates at info, dependencies only when they warn.
const DEFAULT_FILTER: &str = "warn,bak_sweep_core=info,bak_sweep_cli=info";

fn filter_layer(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Console output for the sweep summary plus a plain-text copy under
/// `LOG_FILE_PATH`; verbosity from `TRACING_LEVEL`.
pub fn init_logger() -> impl Drop {
    let log_file_path =
        env::var("LOG_FILE_PATH").unwrap_or_else(|_| "./logs/bak-sweep.log".to_string());

    let file_appender = tracing_appender::rolling::never("./", log_file_path);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(false)
                .with_level(false)
                .without_time()
                .with_ansi(true),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_thread_names(true)
                .with_ansi(false),
        )
        .with(filter_layer(env::var("TRACING_LEVEL").ok()))
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_is_valid() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(filter_layer(Some("debug".to_string())).to_string(), "debug");
    }

    #[test]
    fn test_unparsable_level_falls_back_to_default() {
        let fallback = filter_layer(Some("bak_sweep_core=loud".to_string())).to_string();
        assert_eq!(fallback, filter_layer(None).to_string());
    }
}
