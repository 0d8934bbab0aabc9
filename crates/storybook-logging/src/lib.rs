//! Structured logging for the storybook
//!
//! Installs one global `tracing` subscriber with up to two outputs:
//!
//! - **Console**: JSONL by default, or human-readable with `pretty`
//! - **File**: JSONL session logs, rotated daily/hourly via tracing-appender
//!   or written to a single truncated file
//!
//! `RUST_LOG` always overrides the configured default level.
//!
//! # Quick Start
//!
//! ```ignore
//! use storybook_logging::{FileConfig, LogConfig, StorybookSubscriberBuilder};
//!
//! // Development mode with pretty human-readable output
//! let _guard = StorybookSubscriberBuilder::new()
//!     .with_config(LogConfig::development())
//!     .try_init()?;
//!
//! // JSONL console plus session files; keep the guard alive until exit
//! let _guard = StorybookSubscriberBuilder::new()
//!     .with_file_output(FileConfig::new("./logs"))
//!     .try_init()?;
//! ```

pub mod config;
pub mod error;

pub use config::{ConsoleConfig, FileConfig, JsonlConfig, LogConfig, RotationStrategy};
pub use error::{LoggingError, LoggingResult};
pub use tracing_appender::non_blocking::WorkerGuard;

use std::fs::{self, File};

use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Builder for configuring and initializing the storybook logging subscriber
///
/// By default, console output uses JSONL format. Use `LogConfig::development()`
/// or [`with_pretty`](Self::with_pretty) for human-readable output.
#[derive(Debug, Clone, Default)]
pub struct StorybookSubscriberBuilder {
    config: LogConfig,
}

impl StorybookSubscriberBuilder {
    /// Create a new subscriber builder with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific configuration
    pub fn with_config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the default log level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.default_level = level.into();
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enabled: bool) -> Self {
        self.config.console.enabled = enabled;
        self
    }

    /// Switch the console between pretty and JSONL output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.config.console.pretty = pretty;
        self.config.console.ansi = pretty;
        self
    }

    /// Configure file output
    pub fn with_file_output(mut self, config: FileConfig) -> Self {
        self.config.file = Some(config);
        self
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Filter from `RUST_LOG`, falling back to the configured level
    pub fn build_filter(&self) -> LoggingResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(level_filter(&self.config.default_level)?),
        }
    }

    /// Install the subscriber globally
    ///
    /// Returns the file writer's guard when file output is configured; it
    /// must be kept alive for the duration of the program so buffered lines
    /// are flushed.
    pub fn try_init(self) -> LoggingResult<Option<WorkerGuard>> {
        let env_filter = self.build_filter()?;
        let mut layers: Vec<BoxedLayer> = Vec::new();
        let mut guard = None;

        if self.config.console.enabled {
            let console = &self.config.console;
            if console.pretty {
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(console.ansi)
                        .with_target(true)
                        .boxed(),
                );
            } else {
                layers.push(jsonl_layer(&self.config.jsonl, std::io::stdout));
            }
        }

        if let Some(file_config) = &self.config.file {
            let (writer, file_guard) = file_writer(file_config)?;
            layers.push(jsonl_layer(&self.config.jsonl, writer));
            guard = Some(file_guard);
        }

        Registry::default().with(layers).with(env_filter).try_init()?;
        Ok(guard)
    }
}

/// Parse a level or directive string ("info", "storybook_core=trace,warn")
pub fn level_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}

fn jsonl_layer<W>(jsonl: &JsonlConfig, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(jsonl.include_current_span)
        .with_span_list(jsonl.include_spans)
        .flatten_event(jsonl.flatten_events)
        .with_thread_ids(jsonl.include_thread_info)
        .with_thread_names(jsonl.include_thread_info)
        .with_file(jsonl.include_location)
        .with_line_number(jsonl.include_location)
        .with_writer(writer)
        .boxed()
}

/// Create the non-blocking file writer. `Never` truncates a single file;
/// the rotating strategies append.
fn file_writer(file_config: &FileConfig) -> LoggingResult<(NonBlocking, WorkerGuard)> {
    fs::create_dir_all(&file_config.directory)?;
    let rotation = match file_config.rotation {
        RotationStrategy::Never => {
            let file = File::create(file_config.single_file_path())?;
            return Ok(tracing_appender::non_blocking(file));
        }
        RotationStrategy::Daily => Rotation::DAILY,
        RotationStrategy::Hourly => Rotation::HOURLY,
    };

    let mut builder = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(file_config.prefix.clone())
        .filename_suffix("jsonl");
    if let Some(max_files) = file_config.max_files {
        builder = builder.max_log_files(max_files);
    }
    let appender = builder.build(&file_config.directory)?;
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize logging for testing (minimal output); repeated calls are no-ops
pub fn init_testing() {
    let _ = StorybookSubscriberBuilder::new()
        .with_config(LogConfig::testing())
        .try_init();
}
