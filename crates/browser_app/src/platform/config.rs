use std::path::PathBuf;
use std::time::Duration;

use browser_engine::FetchSettings;
use browser_logging::{LevelFilter, LogDestination};
use clap::{Parser, ValueEnum};

pub const DEFAULT_MANIFEST_URL: &str = "http://max.bcit.ca/comp.json";

/// Lists the websites named in a JSON manifest and opens the one you pick.
#[derive(Debug, Parser)]
#[command(name = "browser_app", version)]
pub struct Args {
    /// URL of the manifest: a JSON array of {"name", "url"} objects.
    #[arg(default_value = DEFAULT_MANIFEST_URL)]
    pub manifest_url: String,

    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Write logs to this file instead of stderr.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Also log to stderr when --log-file is set.
    #[arg(long, requires = "log_file")]
    pub log_to_terminal: bool,

    /// Whole-request timeout for the manifest fetch.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub manifest_url: String,
    pub fetch: FetchSettings,
    pub log_level: LevelFilter,
    pub log_destination: LogDestination,
}

impl ShellConfig {
    pub fn from_args() -> Self {
        Args::parse().into()
    }
}

impl From<Args> for ShellConfig {
    fn from(args: Args) -> Self {
        let log_destination = match (args.log_file, args.log_to_terminal) {
            (Some(path), true) => LogDestination::Both(path),
            (Some(path), false) => LogDestination::File(path),
            (None, _) => LogDestination::Terminal,
        };
        Self {
            manifest_url: args.manifest_url,
            fetch: FetchSettings {
                request_timeout: Duration::from_secs(args.timeout_secs),
                ..FetchSettings::default()
            },
            log_level: args.log_level.into(),
            log_destination,
        }
    }
}
