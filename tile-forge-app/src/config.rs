use crate::error::AppError;
use clap::{Parser, ValueEnum};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "TILE_FORGE_";

/// How the generated grid is written to disk.
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One row per line, space-separated tile indices.
    #[default]
    Text,
    /// The full generation report as pretty-printed JSON.
    Json,
}

#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GlobalLogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

/// Command-line flags.
///
/// Every flag is optional so that an absent flag leaves the value from the
/// config file, the environment or the built-in defaults in place.
#[derive(Parser, Debug, Default)]
#[command(name = "tile-forge", author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the RON or JSON rule file defining tiles and edge compatibility.
    #[arg(short, long, value_name = "FILE")]
    pub rule_file: Option<PathBuf>,

    /// Width of the output grid [default: 10].
    #[arg(long)]
    pub width: Option<usize>,

    /// Height of the output grid [default: 10].
    #[arg(long)]
    pub height: Option<usize>,

    /// Seed for the random number generator. Random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Iteration cap per attempt [default: width * height * 10].
    #[arg(long)]
    pub max_iterations: Option<u64>,

    /// Number of attempts, each with the next seed, before giving up [default: 1].
    #[arg(long)]
    pub attempts: Option<u32>,

    /// Path to save the generated output grid [default: output.txt].
    #[arg(short, long, value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Output file format [default: text].
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Report progress updates every specified interval (e.g., "1s", "500ms").
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub report_progress_interval: Option<Duration>,

    /// Global log level; RUST_LOG takes precedence when set [default: info].
    #[arg(long, value_enum)]
    pub log_level: Option<GlobalLogLevel>,

    /// Optional TOML file with any of the settings above.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Raw, layered settings as read by figment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_file: Option<PathBuf>,
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u64>,
    pub attempts: u32,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    /// Humantime duration string such as `"250ms"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_progress_interval: Option<String>,
    pub log_level: GlobalLogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rule_file: None,
            width: 10,
            height: 10,
            seed: None,
            max_iterations: None,
            attempts: 1,
            output_path: PathBuf::from("output.txt"),
            output_format: OutputFormat::Text,
            report_progress_interval: None,
            log_level: GlobalLogLevel::Info,
        }
    }
}

/// The subset of settings given on the command line.
#[derive(Serialize, Debug, Default)]
struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_iterations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    attempts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_format: Option<OutputFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report_progress_interval: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<GlobalLogLevel>,
}

impl From<&Cli> for CliOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            rule_file: cli.rule_file.clone(),
            width: cli.width,
            height: cli.height,
            seed: cli.seed,
            max_iterations: cli.max_iterations,
            attempts: cli.attempts,
            output_path: cli.output_path.clone(),
            output_format: cli.output_format,
            report_progress_interval: cli
                .report_progress_interval
                .map(|interval| humantime::format_duration(interval).to_string()),
            log_level: cli.log_level,
        }
    }
}

/// Fully resolved configuration for the Tile Forge application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub rule_file: PathBuf,
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub max_iterations: Option<u64>,
    pub attempts: u32,
    pub output_path: PathBuf,
    pub output_format: OutputFormat,
    pub report_progress_interval: Option<Duration>,
    pub log_level: GlobalLogLevel,
}

impl AppConfig {
    /// Layers defaults, the optional TOML file, `TILE_FORGE_*` environment
    /// variables and finally the command-line flags.
    pub fn figment(cli: &Cli) -> Result<Figment, AppError> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));
        if let Some(path) = &cli.config {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        Ok(figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(CliOverrides::from(cli))))
    }

    pub fn load(cli: &Cli) -> Result<Self, AppError> {
        let settings: Settings = Self::figment(cli)?.extract()?;
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let rule_file = settings.rule_file.ok_or_else(|| {
            AppError::Config(
                "No rule file given; pass --rule-file or set `rule_file` in the config file"
                    .to_string(),
            )
        })?;
        if settings.attempts == 0 {
            return Err(AppError::Config("`attempts` must be at least 1".to_string()));
        }
        let report_progress_interval = settings
            .report_progress_interval
            .as_deref()
            .map(humantime::parse_duration)
            .transpose()
            .map_err(|e| AppError::Config(format!("Invalid report_progress_interval: {e}")))?;

        Ok(Self {
            rule_file,
            width: settings.width,
            height: settings.height,
            seed: settings.seed,
            max_iterations: settings.max_iterations,
            attempts: settings.attempts,
            output_path: settings.output_path,
            output_format: settings.output_format,
            report_progress_interval,
            log_level: settings.log_level,
        })
    }
}
