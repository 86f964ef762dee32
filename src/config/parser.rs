use crate::config::types::Settings;
use crate::ConfigError;
use std::path::{Path, PathBuf};

/// File name of the per-user config file, looked up in the home directory
pub const DEFAULT_CONFIG_FILE: &str = ".chart.toml";

/// Prefix of environment variables that override config file values
pub const ENV_PREFIX: &str = "CHART_";

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Settings)` - Successfully loaded settings
/// * `Err(ConfigError)` - Failed to read or parse the file
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_chart::config::load_config;
///
/// let settings = load_config(Path::new("chart.toml")).unwrap();
/// println!("Depth: {:?}", settings.depth);
/// ```
pub fn load_config(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

/// Returns `$HOME/.chart.toml`, if a home directory is known
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DEFAULT_CONFIG_FILE))
}

/// Loads the per-user config file if it exists
///
/// # Returns
///
/// * `Ok(Some((path, settings)))` - The default file exists and parsed
/// * `Ok(None)` - No home directory, or no file there
/// * `Err(ConfigError)` - The file exists but could not be read or parsed
pub fn load_default_config() -> Result<Option<(PathBuf, Settings)>, ConfigError> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };

    if !path.is_file() {
        return Ok(None);
    }

    let settings = load_config(&path)?;
    Ok(Some((path, settings)))
}

/// Reads `CHART_*` overrides from the process environment
pub fn settings_from_env() -> Result<Settings, ConfigError> {
    settings_from_vars(std::env::vars())
}

/// Builds settings from `CHART_*` key/value pairs
///
/// Recognized keys are `CHART_DEPTH`, `CHART_FORMAT`, `CHART_CONCURRENCY`,
/// `CHART_RATE_LIMIT`, `CHART_USER_AGENT` and `CHART_TIMEOUT`. Other keys
/// are ignored.
pub fn settings_from_vars<I>(vars: I) -> Result<Settings, ConfigError>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut settings = Settings::default();

    for (key, value) in vars {
        let Some(name) = key.strip_prefix(ENV_PREFIX) else {
            continue;
        };

        match name {
            "DEPTH" => settings.depth = Some(parse_env(&key, &value)?),
            "FORMAT" => settings.format = Some(value),
            "CONCURRENCY" => settings.concurrency = Some(parse_env(&key, &value)?),
            "RATE_LIMIT" => settings.rate_limit = Some(parse_env(&key, &value)?),
            "USER_AGENT" => settings.user_agent = Some(value),
            "TIMEOUT" => settings.timeout = Some(value),
            _ => {}
        }
    }

    Ok(settings)
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| {
        ConfigError::Validation(format!("Invalid value '{}' for {}", value, key))
    })
}
