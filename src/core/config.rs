//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.ranker/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ComponentType;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RankerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub component_type: Option<ComponentType>,
    pub log_level: Option<String>,
    pub log_path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    pub emit_path: Option<String>,
    pub report_path: Option<String>,
    pub report_title: Option<String>,
    pub report_format: Option<ReportFormat>,
}

/// Layout of the ranking export written on exit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable ranking with a timestamp header.
    #[default]
    Txt,
    /// One row per ranked item, for data analysis.
    Csv,
    /// Non-baseline items in play order with durations, for playback scripts.
    Automation,
}

/// Values taken from CLI flags (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub component_type: Option<ComponentType>,
    pub emit_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub report_format: Option<ReportFormat>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_PATH: &str = "ranker.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_REPORT_TITLE: &str = "RANKING";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub component_type: ComponentType,
    pub log_level: LevelFilter,
    pub log_path: PathBuf,
    /// Where emissions go. `None` = the mode's default sink.
    pub emit_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub report_title: String,
    pub report_format: ReportFormat,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for std::io::Error {
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Io(e) => e,
            ConfigError::Parse(e) => std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.ranker/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".ranker").join("config.toml"))
}

/// Load config from `~/.ranker/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RankerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<RankerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(RankerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(RankerConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<RankerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RankerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Ranker Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# component_type = "youtube"      # "youtube" or "audio"
# log_level = "debug"             # "error", "warn", "info", "debug", "trace"
# log_path = "ranker.log"         # Or set RANKER_LOG_PATH env var

# [output]
# emit_path = "emissions.jsonl"   # Or set RANKER_EMIT_PATH env var
# report_path = "ranking.txt"     # Or set RANKER_REPORT_PATH env var
# report_title = "AUDIO RANKING 1"
# report_format = "txt"           # "txt", "csv" or "automation"; or RANKER_REPORT_FORMAT
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &RankerConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with the environment supplied by `env`.
pub fn resolve_with(
    config: &RankerConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Component type: CLI → env → config → default
    let component_type = cli
        .component_type
        .or_else(|| env("RANKER_COMPONENT_TYPE").and_then(|s| parse_component_type_env(&s)))
        .or(config.general.component_type)
        .unwrap_or_default();

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|s| match s.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log_level '{}', using {}", s, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log path: env → config → default
    let log_path = env("RANKER_LOG_PATH")
        .or_else(|| config.general.log_path.clone())
        .unwrap_or_else(|| DEFAULT_LOG_PATH.to_string());

    // Emit path: CLI → env → config → mode default
    let emit_path = cli.emit_path.clone().or_else(|| {
        env("RANKER_EMIT_PATH")
            .or_else(|| config.output.emit_path.clone())
            .map(PathBuf::from)
    });

    let report_path = cli.report_path.clone().or_else(|| {
        env("RANKER_REPORT_PATH")
            .or_else(|| config.output.report_path.clone())
            .map(PathBuf::from)
    });

    // Report format: CLI → env → config → default
    let report_format = cli
        .report_format
        .or_else(|| env("RANKER_REPORT_FORMAT").and_then(|s| parse_report_format_env(&s)))
        .or(config.output.report_format)
        .unwrap_or_default();

    ResolvedConfig {
        component_type,
        log_level,
        log_path: PathBuf::from(log_path),
        emit_path,
        report_path,
        report_title: config
            .output
            .report_title
            .clone()
            .unwrap_or_else(|| DEFAULT_REPORT_TITLE.to_string()),
        report_format,
    }
}

fn parse_report_format_env(value: &str) -> Option<ReportFormat> {
    let parsed = <ReportFormat as ValueEnum>::from_str(value.trim(), true).ok();
    if parsed.is_none() {
        warn!("Ignoring RANKER_REPORT_FORMAT={:?}: unknown format", value);
    }
    parsed
}

fn parse_component_type_env(value: &str) -> Option<ComponentType> {
    let parsed = ComponentType::parse(value);
    if parsed.is_none() {
        warn!("Ignoring RANKER_COMPONENT_TYPE={:?}: unknown component type", value);
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = RankerConfig::default();
        assert!(config.general.component_type.is_none());
        assert!(config.output.emit_path.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = RankerConfig::default();
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(resolved.report_title, DEFAULT_REPORT_TITLE);
        assert_eq!(resolved.report_format, ReportFormat::Txt);
        assert!(resolved.report_path.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = RankerConfig {
            general: GeneralConfig {
                component_type: Some(ComponentType::Audio),
                log_level: Some("warn".to_string()),
                log_path: None,
            },
            output: OutputConfig {
                emit_path: None,
                report_path: None,
                report_title: Some("AUDIO RANKING 2".to_string()),
                report_format: None,
            },
        };
        let resolved = resolve_with(&config, &CliOverrides::default(), no_env);
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.report_title, "AUDIO RANKING 2");
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = RankerConfig {
            general: GeneralConfig {
                component_type: Some(ComponentType::Youtube),
                ..Default::default()
            },
            output: OutputConfig {
                report_path: Some("from-config.txt".to_string()),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            component_type: Some(ComponentType::Audio),
            emit_path: None,
            report_path: Some(PathBuf::from("from-cli.txt")),
            report_format: Some(ReportFormat::Csv),
        };
        let resolved = resolve_with(&config, &cli, no_env);
        assert_eq!(resolved.component_type, ComponentType::Audio);
        assert_eq!(resolved.report_format, ReportFormat::Csv);
        assert_eq!(resolved.report_path, Some(PathBuf::from("from-cli.txt")));
    }

    #[test]
    fn test_resolve_env_sits_between_config_and_cli() {
        let config = RankerConfig {
            general: GeneralConfig {
                component_type: Some(ComponentType::Youtube),
                log_path: Some("config.log".to_string()),
                ..Default::default()
            },
            output: OutputConfig {
                report_path: Some("from-config.txt".to_string()),
                ..Default::default()
            },
        };
        let env = |key: &str| match key {
            "RANKER_COMPONENT_TYPE" => Some("audio".to_string()),
            "RANKER_LOG_PATH" => Some("env.log".to_string()),
            "RANKER_REPORT_PATH" => Some("from-env.txt".to_string()),
            "RANKER_REPORT_FORMAT" => Some("Automation".to_string()),
            _ => None,
        };

        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.component_type, ComponentType::Audio);
        assert_eq!(resolved.log_path, PathBuf::from("env.log"));
        assert_eq!(resolved.report_path, Some(PathBuf::from("from-env.txt")));
        assert_eq!(resolved.report_format, ReportFormat::Automation);

        let cli = CliOverrides {
            report_path: Some(PathBuf::from("from-cli.txt")),
            ..Default::default()
        };
        let resolved = resolve_with(&config, &cli, env);
        assert_eq!(resolved.report_path, Some(PathBuf::from("from-cli.txt")));
    }

    #[test]
    fn test_unknown_env_component_type_is_ignored() {
        let config = RankerConfig {
            general: GeneralConfig {
                component_type: Some(ComponentType::Audio),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "RANKER_COMPONENT_TYPE").then(|| "vinyl".to_string());
        let resolved = resolve_with(&config, &CliOverrides::default(), env);
        assert_eq!(resolved.component_type, ComponentType::Audio);
    }

    #[test]
    fn test_unknown_log_level_falls_back() {
        let config = RankerConfig {
            general: GeneralConfig {
                log_level: Some("loud".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            resolve_with(&config, &CliOverrides::default(), no_env).log_level,
            DEFAULT_LOG_LEVEL
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
component_type = "audio"
log_level = "info"

[output]
emit_path = "out.jsonl"
report_title = "AUDIO RANKING 3 (SHUFFLED)"
"#;
        let config: RankerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.component_type, Some(ComponentType::Audio));
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(config.output.emit_path.as_deref(), Some("out.jsonl"));
        assert_eq!(
            config.output.report_title.as_deref(),
            Some("AUDIO RANKING 3 (SHUFFLED)")
        );
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[output]
report_path = "ranking.csv"
report_format = "csv"
"#;
        let config: RankerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.report_path.as_deref(), Some("ranking.csv"));
        assert_eq!(config.output.report_format, Some(ReportFormat::Csv));
        assert!(config.general.component_type.is_none());
    }

    #[test]
    fn test_bad_component_type_is_a_parse_error() {
        let toml_str = r#"
[general]
component_type = "vinyl"
"#;
        assert!(toml::from_str::<RankerConfig>(toml_str).is_err());
    }
}
