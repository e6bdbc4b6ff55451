use super::config::{LogConfig, LogFormat, RotationPolicy};
use anyhow::{Context, Result};
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_NAME: &str = "tilewatch.log";

/// Logger implementation using tracing
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Initialize the global subscriber with the given configuration
    ///
    /// # Returns
    /// * `Result<Self>` - Logger instance with guard to keep the file writer alive
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a subscriber is already set
    pub fn init(config: &LogConfig) -> Result<Self> {
        let (layers, guard) = build_layers(config)?;

        tracing_subscriber::registry()
            .with(layers)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        tracing::info!(
            level = %config.level,
            format = ?config.format,
            file_output = config.log_dir.is_some(),
            "logger initialized"
        );

        Ok(Self { _guard: guard })
    }
}

fn build_layers(config: &LogConfig) -> Result<(Vec<BoxedLayer>, Option<WorkerGuard>)> {
    let default_level = parse_log_level(&config.level)?;
    let env_filter = || {
        EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy()
    };

    let mut layers: Vec<BoxedLayer> = Vec::new();
    let mut guard = None;

    if let Some(ref log_dir) = config.log_dir {
        let file_appender = match config.rotation {
            RotationPolicy::Daily => rolling::daily(log_dir, LOG_FILE_NAME),
            RotationPolicy::Hourly => rolling::hourly(log_dir, LOG_FILE_NAME),
            RotationPolicy::Never => rolling::never(log_dir, LOG_FILE_NAME),
        };
        let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

        // Files are always JSON for structured ingestion
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(env_filter())
                .boxed(),
        );
        guard = Some(file_guard);
    }

    if config.enable_console {
        let console_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
                .with_filter(env_filter())
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_writer(io::stderr)
                .with_target(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(env_filter())
                .boxed(),
        };
        layers.push(console_layer);
    }

    Ok((layers, guard))
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_log_level("debug"), Ok(Level::DEBUG)));
        assert!(matches!(parse_log_level("info"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("warn"), Ok(Level::WARN)));
        assert!(matches!(parse_log_level("error"), Ok(Level::ERROR)));
        assert!(matches!(parse_log_level("TRACE"), Ok(Level::TRACE)));
        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_build_layers_console_only() {
        let (layers, guard) = build_layers(&LogConfig::default()).unwrap();
        assert_eq!(layers.len(), 1);
        assert!(guard.is_none());
    }

    #[test]
    fn test_build_layers_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = LogConfig {
            log_dir: Some(dir.path().to_path_buf()),
            enable_console: false,
            rotation: RotationPolicy::Never,
            ..LogConfig::default()
        };

        let (layers, guard) = build_layers(&config).unwrap();
        assert_eq!(layers.len(), 1);
        assert!(guard.is_some());
    }

    #[test]
    fn test_build_layers_rejects_bad_level() {
        let config = LogConfig {
            level: "loud".to_string(),
            ..LogConfig::default()
        };
        assert!(build_layers(&config).is_err());
    }
}
