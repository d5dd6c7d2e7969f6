//! `tracing` setup shared by the TDE binaries
//!
//! Events can go to stderr, to a daily rolling file, or to both, as plain
//! text or JSON. Stdout is never used, so `--format json` output can be piped.
//! Every setting can be overridden through `LOG_*` environment variables.
//!
//! Library code only emits events, with structured fields where they help:
//!
//! ```rust
//! let dataset_id = 7;
//! tracing::warn!(dataset_id, "Failed to fetch dataset files");
//! ```
//!
//! Binaries pick a base configuration, let the environment adjust it, and
//! install it once:
//!
//! ```no_run
//! use tde_common::logging::{init_logging, LogConfig, LogLevel};
//!
//! let base = LogConfig::builder().level(LogLevel::Warn).build();
//! let config = base.clone().merge_env().unwrap_or(base);
//! init_logging(&config).ok();
//! ```

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type DynLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Case-insensitive lookup of `raw` in an alias table
fn pick<T: Copy>(what: &str, raw: &str, aliases: &[(&str, T)]) -> Result<T> {
    let wanted = raw.trim().to_ascii_lowercase();
    aliases
        .iter()
        .find(|(alias, _)| *alias == wanted)
        .map(|(_, value)| *value)
        .ok_or_else(|| anyhow!("Unknown {what} '{raw}'"))
}

/// Minimum severity that gets recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        pick(
            "log level",
            raw,
            &[
                ("trace", Self::Trace),
                ("debug", Self::Debug),
                ("info", Self::Info),
                ("warn", Self::Warn),
                ("warning", Self::Warn),
                ("error", Self::Error),
            ],
        )
    }
}

/// Destination of log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Console,
    File,
    Both,
}

impl LogOutput {
    fn to_stderr(self) -> bool {
        self != Self::File
    }

    fn to_file(self) -> bool {
        self != Self::Console
    }
}

impl FromStr for LogOutput {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        pick(
            "log output",
            raw,
            &[
                ("console", Self::Console),
                ("stderr", Self::Console),
                ("file", Self::File),
                ("both", Self::Both),
                ("all", Self::Both),
            ],
        )
    }
}

/// Line encoding of log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        pick(
            "log format",
            raw,
            &[("text", Self::Text), ("pretty", Self::Text), ("json", Self::Json)],
        )
    }
}

/// Everything [`init_logging`] needs to know
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: LogLevel,
    pub output: LogOutput,
    pub format: LogFormat,
    /// Where rolling files are written; unused for console-only output
    pub log_dir: PathBuf,
    /// File name stem; the appender adds the date, as in `tde-cli.2025-01-18`
    pub log_file_prefix: String,
    /// Comma separated `EnvFilter` directives such as `reqwest=warn,tde_cli=debug`
    pub filter_directives: Option<String>,
    pub include_targets: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            output: LogOutput::default(),
            format: LogFormat::default(),
            log_dir: "./logs".into(),
            log_file_prefix: "tde".into(),
            filter_directives: None,
            include_targets: true,
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl LogConfig {
    pub fn builder() -> LogConfigBuilder {
        LogConfigBuilder(Self::default())
    }

    /// Defaults adjusted by the environment, see [`LogConfig::merge_env`]
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env()
    }

    /// Apply `LOG_LEVEL`, `LOG_OUTPUT`, `LOG_FORMAT`, `LOG_DIR`,
    /// `LOG_FILE_PREFIX` and `LOG_FILTER` on top of `self`
    ///
    /// Unset or blank variables leave the current value alone. An
    /// unrecognised level, output or format is an error.
    pub fn merge_env(mut self) -> Result<Self> {
        if let Some(raw) = env_value("LOG_LEVEL") {
            self.level = raw.parse().context("LOG_LEVEL")?;
        }
        if let Some(raw) = env_value("LOG_OUTPUT") {
            self.output = raw.parse().context("LOG_OUTPUT")?;
        }
        if let Some(raw) = env_value("LOG_FORMAT") {
            self.format = raw.parse().context("LOG_FORMAT")?;
        }
        self.log_dir = env_value("LOG_DIR").map(PathBuf::from).unwrap_or(self.log_dir);
        self.log_file_prefix = env_value("LOG_FILE_PREFIX").unwrap_or(self.log_file_prefix);
        self.filter_directives = env_value("LOG_FILTER").or(self.filter_directives);

        Ok(self)
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        let base = EnvFilter::builder()
            .with_default_directive(LevelFilter::from(self.level).into())
            .from_env_lossy();

        let extra = self.filter_directives.as_deref().unwrap_or_default();
        extra
            .split(',')
            .map(str::trim)
            .filter(|directive| !directive.is_empty())
            .try_fold(base, |filter, directive| {
                let parsed = directive
                    .parse()
                    .with_context(|| format!("Bad filter directive '{directive}'"))?;
                Ok(filter.add_directive(parsed))
            })
    }
}

/// Fluent construction of a [`LogConfig`], starting from the defaults
#[derive(Debug, Clone)]
pub struct LogConfigBuilder(LogConfig);

impl LogConfigBuilder {
    pub fn level(self, level: LogLevel) -> Self {
        Self(LogConfig { level, ..self.0 })
    }

    pub fn output(self, output: LogOutput) -> Self {
        Self(LogConfig { output, ..self.0 })
    }

    pub fn format(self, format: LogFormat) -> Self {
        Self(LogConfig { format, ..self.0 })
    }

    pub fn log_dir(self, log_dir: impl Into<PathBuf>) -> Self {
        Self(LogConfig {
            log_dir: log_dir.into(),
            ..self.0
        })
    }

    pub fn log_file_prefix(self, prefix: impl Into<String>) -> Self {
        Self(LogConfig {
            log_file_prefix: prefix.into(),
            ..self.0
        })
    }

    pub fn filter_directives(self, directives: impl Into<String>) -> Self {
        Self(LogConfig {
            filter_directives: Some(directives.into()),
            ..self.0
        })
    }

    pub fn include_targets(self, include_targets: bool) -> Self {
        Self(LogConfig {
            include_targets,
            ..self.0
        })
    }

    pub fn build(self) -> LogConfig {
        self.0
    }
}

/// Install the global subscriber described by `config`
///
/// Only the first call in a process succeeds; later calls return an error
/// and leave the installed subscriber in place.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let mut sinks: Vec<DynLayer> = Vec::with_capacity(2);
    if config.output.to_stderr() {
        sinks.push(encode(
            fmt::layer().with_writer(std::io::stderr).with_target(config.include_targets),
            config.format,
        ));
    }
    if config.output.to_file() {
        sinks.push(rolling_file(config)?);
    }

    tracing_subscriber::registry()
        .with(sinks)
        .with(config.env_filter()?)
        .try_init()
        .context("A tracing subscriber is already installed")
}

type PlainLayer<W> = fmt::Layer<Registry, fmt::format::DefaultFields, fmt::format::Format, W>;

fn encode<W>(layer: PlainLayer<W>, format: LogFormat) -> DynLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().boxed(),
    }
}

fn rolling_file(config: &LogConfig) -> Result<DynLayer> {
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Cannot create log directory {}", config.log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&config.log_dir, &config.log_file_prefix);
    let (writer, flush_guard) = tracing_appender::non_blocking(appender);
    // Dropping the guard stops the writer thread; the subscriber outlives main.
    std::mem::forget(flush_guard);

    Ok(encode(
        fmt::layer()
            .with_writer(writer)
            .with_target(config.include_targets)
            .with_ansi(false),
        config.format,
    ))
}
