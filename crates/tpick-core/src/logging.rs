#![forbid(unsafe_code)]

//! Logging configuration and subscriber installation.
//!
//! The library crates only *emit* `tracing` events. Binaries decide how to
//! print them: [`LogConfig`] reads the filter and output format from the
//! environment, and [`init`] (feature `subscriber`) installs a
//! `tracing-subscriber` fmt subscriber accordingly.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TPICK_LOG` | env-filter directive, e.g. `tpick_widget=debug` | `warn` |
//! | `TPICK_LOG_FORMAT` | `pretty`, `compact`, or `json` | `compact` |

use core::fmt;
use core::str::FromStr;

/// Environment variable holding the filter directive.
pub const ENV_FILTER: &str = "TPICK_LOG";
/// Environment variable holding the output format.
pub const ENV_FORMAT: &str = "TPICK_LOG_FORMAT";

const DEFAULT_FILTER: &str = "warn";

/// Output format for the fmt subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human readable output.
    Pretty,
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Newline-delimited JSON objects.
    Json,
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" | "text" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LogError::UnknownFormat(other.to_string())),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// env-filter directive.
    pub filter: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Read configuration using a custom environment lookup (for tests).
    ///
    /// An unparseable format is ignored and the default is kept.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(filter) = get_env(ENV_FILTER)
            && !filter.trim().is_empty()
        {
            config.filter = filter;
        }
        if let Some(format) = get_env(ENV_FORMAT)
            && let Ok(format) = format.parse()
        {
            config.format = format;
        }
        config
    }

    /// Override the output format (builder).
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Override the filter directive (builder).
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Logging setup error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The format name is not one of `pretty`, `compact`, `json`.
    UnknownFormat(String),
    /// The filter directive did not parse.
    InvalidFilter(String),
    /// A global subscriber was already installed.
    AlreadyInstalled,
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFormat(name) => write!(f, "unknown log format: {name}"),
            Self::InvalidFilter(msg) => write!(f, "invalid log filter: {msg}"),
            Self::AlreadyInstalled => f.write_str("a global tracing subscriber is already installed"),
        }
    }
}

impl std::error::Error for LogError {}

/// Install the global fmt subscriber described by `config`.
///
/// Output goes to stderr so that stdout stays machine readable.
///
/// # Errors
///
/// Returns [`LogError::InvalidFilter`] when the directive does not parse and
/// [`LogError::AlreadyInstalled`] when a global subscriber exists.
#[cfg(feature = "subscriber")]
pub fn init(config: &LogConfig) -> Result<(), LogError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|err| LogError::InvalidFilter(err.to_string()))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|_| LogError::AlreadyInstalled)
}
