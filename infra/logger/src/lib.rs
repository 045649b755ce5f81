//! # Logger
//!
//! Installs the global `tracing` subscriber for kiln command-line tools.
//!
//! * Console output goes to **stderr** so that stdout stays reserved for command results
//!   (descriptors, property values) that callers may pipe elsewhere.
//! * An optional rolling file layer (`tracing-appender`) keeps a history of runs,
//!   optionally as JSON lines.
//! * `RUST_LOG` is honoured; the builder level (or [`LoggerBuilder::verbosity`]) is only the
//!   default directive.
//!
//! ## Example
//!
//! ```rust
//! # use kiln_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder("kiln")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//!
//! tracing::debug!("subscriber installed");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Maps a repeated `-v` flag count onto a level: warnings by default, then info, debug, trace.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    level: LevelFilter,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self { console: true, level: LevelFilter::WARN, env_filter: None }
    }
}

#[derive(Debug)]
pub struct NoFile;

#[derive(Debug)]
pub struct WithFile {
    directory: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

mod private {
    pub trait Sealed {}
}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Configures and installs the global subscriber. File-only options become available after
/// [`LoggerBuilder::directory`].
#[derive(Debug)]
pub struct LoggerBuilder<F: Sealed = NoFile> {
    name: String,
    config: LoggerConfig,
    file: F,
}

impl<F: Sealed> LoggerBuilder<F> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Shorthand for `level(level_for_verbosity(verbosity))`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn verbosity(self, verbosity: u8) -> Self {
        self.level(level_for_verbosity(verbosity))
    }

    /// Adds explicit directives (e.g., `kiln_properties=trace`) on top of the level.
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }
}

impl LoggerBuilder<NoFile> {
    /// Also writes logs into rolling files under `directory`, named after the logger.
    pub fn directory(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithFile> {
        LoggerBuilder {
            name: self.name,
            config: self.config,
            file: WithFile {
                directory: directory.into(),
                rotation: Rotation::DAILY,
                max_files: DEFAULT_MAX_FILES,
                json: false,
            },
        }
    }

    /// Installs the subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] when the console is disabled (nothing
    /// would be written) or the filter is invalid, and [`LoggerError::Subscriber`] if a global
    /// subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_name(&self.name)?;
        if !self.config.console {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable the console or a log directory."
                    .into(),
                context: None,
            });
        }

        let filter = build_env_filter(&self.config)?;
        tracing_subscriber::registry().with(filter).with(console_layer()).try_init()?;

        Ok(Logger { guard: None })
    }
}

impl LoggerBuilder<WithFile> {
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.file.rotation = rotation;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.file.max_files = max;
        self
    }

    /// Writes the file layer as JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.file.json = enabled;
        self
    }

    /// Installs the subscriber with the file layer (and the console layer, if enabled).
    ///
    /// The returned [`Logger`] owns the non-blocking writer guard; keep it alive until exit.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for a zero `max_files` or an invalid
    /// filter, [`LoggerError::Io`] when the directory cannot be created,
    /// [`LoggerError::Appender`] when the appender cannot be built, and
    /// [`LoggerError::Subscriber`] if a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_name(&self.name)?;
        if self.file.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }

        let filter = build_env_filter(&self.config)?;

        fs::create_dir_all(&self.file.directory).context(format!(
            "Failed to create log directory: {}",
            self.file.directory.display()
        ))?;

        let appender = RollingFileAppender::builder()
            .rotation(self.file.rotation)
            .filename_prefix(&self.name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.file.max_files)
            .build(&self.file.directory)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let file_layer = layer().with_writer(writer).with_ansi(false);
        let file_layer =
            if self.file.json { file_layer.json().boxed() } else { file_layer.boxed() };

        let mut layers = vec![file_layer];
        if self.config.console {
            layers.push(console_layer());
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;

        Ok(Logger { guard: Some(guard) })
    }
}

/// Handle to the installed subscriber. Dropping it flushes and stops the file writer.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a builder. `name` prefixes rolling log files (e.g., `kiln.2026-10-18.log`).
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder(name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder { name: name.into(), config: LoggerConfig::default(), file: NoFile }
    }

    /// Returns the file writer guard, present only when a log directory was configured.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

fn console_layer<S>() -> Box<dyn Layer<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .boxed()
}

fn validate_name(name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match &config.env_filter {
        None => Ok(builder.from_env_lossy()),
        Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid env filter '{filter}': {e}").into(),
            context: None,
        }),
    }
}
