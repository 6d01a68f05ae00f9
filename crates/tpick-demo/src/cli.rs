#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via the `TPICK_DEMO_*` prefix.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
tpick-demo: drive a headless theme picker from the command line

USAGE:
    tpick-demo [OPTIONS]

OPTIONS:
    --catalog=PATH       Load themes from a JSON catalog (default: built-in)
    --select=KEY         Write KEY to the picker's theme-key attribute
    --random             Select a random theme after --select
    --more-info          Expand every \"more info\" panel
    --seed=N             Seed for --random (default: wall clock)
    --markup             Print the picker's markup
    --list               List the catalog's groups and themes, then exit
    --log-format=FMT     Log format: pretty, compact (default), or json
    --help, -h           Show this help message
    --version, -V        Show version

OUTPUT:
    One JSON line per emitted notification, then the trigger label.

ENVIRONMENT VARIABLES:
    TPICK_DEMO_CATALOG   Override --catalog
    TPICK_DEMO_SELECT    Override --select
    TPICK_DEMO_SEED      Override --seed
    TPICK_LOG            Log filter directive (default: warn)
    TPICK_LOG_FORMAT     Log format (pretty|compact|json)
    TPICK_PLACEHOLDER    Trigger label when nothing is selected";

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Opts {
    /// JSON catalog path; `None` uses the built-in catalog.
    pub catalog: Option<PathBuf>,
    /// Key written to the observed attribute.
    pub select: Option<String>,
    /// Select a random theme.
    pub random: bool,
    /// Expand detail panels.
    pub more_info: bool,
    /// Random seed.
    pub seed: Option<u64>,
    /// Print markup.
    pub markup: bool,
    /// List the catalog and exit.
    pub list: bool,
    /// Log format name.
    pub log_format: Option<String>,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo.
    Run(Opts),
    /// Print help.
    Help,
    /// Print the version.
    Version,
}

/// A rejected argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Flag value failed to parse.
    InvalidValue {
        /// Flag name, with dashes.
        flag: &'static str,
        /// Offending value.
        value: String,
    },
    /// Unrecognized argument.
    Unknown(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue { flag, value } => write!(f, "Invalid {flag} value: {value}"),
            Self::Unknown(arg) => write!(f, "Unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl Opts {
    /// Parse the process arguments and environment, exiting on `--help`,
    /// `--version`, or a bad argument.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match parse_from(&args, |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("tpick-demo {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }
}

/// Parse `args` (without the program name) with a custom environment lookup.
///
/// Environment variables take precedence over defaults but are overridden
/// by explicit command-line flags.
///
/// # Errors
///
/// [`CliError`] for an unknown argument or a malformed value.
pub fn parse_from<F>(args: &[String], get_env: F) -> Result<Command, CliError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut opts = Opts::default();

    // Apply environment variable defaults first
    if let Some(val) = get_env("TPICK_DEMO_CATALOG")
        && !val.is_empty()
    {
        opts.catalog = Some(PathBuf::from(val));
    }
    if let Some(val) = get_env("TPICK_DEMO_SELECT")
        && !val.is_empty()
    {
        opts.select = Some(val);
    }
    if let Some(val) = get_env("TPICK_DEMO_SEED")
        && let Ok(n) = val.parse()
    {
        opts.seed = Some(n);
    }

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--random" => opts.random = true,
            "--more-info" => opts.more_info = true,
            "--markup" => opts.markup = true,
            "--list" => opts.list = true,
            other => {
                if let Some(val) = other.strip_prefix("--catalog=") {
                    opts.catalog = Some(PathBuf::from(val));
                } else if let Some(val) = other.strip_prefix("--select=") {
                    opts.select = Some(val.to_string());
                } else if let Some(val) = other.strip_prefix("--seed=") {
                    let seed = val.parse().map_err(|_| CliError::InvalidValue {
                        flag: "--seed",
                        value: val.to_string(),
                    })?;
                    opts.seed = Some(seed);
                } else if let Some(val) = other.strip_prefix("--log-format=") {
                    opts.log_format = Some(val.to_string());
                } else {
                    return Err(CliError::Unknown(other.to_string()));
                }
            }
        }
    }

    Ok(Command::Run(opts))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.catalog, None);
        assert_eq!(opts.select, None);
        assert!(!opts.random);
        assert!(!opts.markup);
        assert_eq!(opts.seed, None);
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_lists_flags() {
        assert!(HELP_TEXT.contains("--catalog=PATH"));
        assert!(HELP_TEXT.contains("--select=KEY"));
        assert!(HELP_TEXT.contains("TPICK_DEMO_SEED"));
    }

    #[test]
    fn parses_flags() {
        let cmd = parse_from(
            &args(&[
                "--catalog=themes.json",
                "--select=dorian",
                "--random",
                "--more-info",
                "--seed=9",
                "--markup",
                "--log-format=json",
            ]),
            no_env,
        )
        .unwrap();
        let Command::Run(opts) = cmd else {
            panic!("expected run, got {cmd:?}");
        };
        assert_eq!(opts.catalog, Some(PathBuf::from("themes.json")));
        assert_eq!(opts.select.as_deref(), Some("dorian"));
        assert!(opts.random && opts.more_info && opts.markup);
        assert_eq!(opts.seed, Some(9));
        assert_eq!(opts.log_format.as_deref(), Some("json"));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_from(&args(&["-h", "--bogus"]), no_env), Ok(Command::Help));
        assert_eq!(parse_from(&args(&["--version"]), no_env), Ok(Command::Version));
    }

    #[test]
    fn env_is_overridden_by_flags() {
        let env = |key: &str| match key {
            "TPICK_DEMO_SELECT" => Some("ionian".to_string()),
            "TPICK_DEMO_SEED" => Some("3".to_string()),
            _ => None,
        };
        let Ok(Command::Run(opts)) = parse_from(&args(&[]), env) else {
            panic!("expected run");
        };
        assert_eq!(opts.select.as_deref(), Some("ionian"));
        assert_eq!(opts.seed, Some(3));

        let Ok(Command::Run(opts)) = parse_from(&args(&["--select=aeolian"]), env) else {
            panic!("expected run");
        };
        assert_eq!(opts.select.as_deref(), Some("aeolian"));
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse_from(&args(&["--seed=soon"]), no_env),
            Err(CliError::InvalidValue {
                flag: "--seed",
                value: "soon".to_string()
            })
        );
        let err = parse_from(&args(&["--frobnicate"]), no_env).unwrap_err();
        assert_eq!(err.to_string(), "Unknown argument: --frobnicate");
    }
}
