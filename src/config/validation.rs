use crate::config::types::{
    RunConfig, Settings, DEFAULT_CONCURRENCY, DEFAULT_DEPTH, DEFAULT_RATE_LIMIT,
    DEFAULT_USER_AGENT,
};
use crate::crawler::{MAX_CONCURRENCY, MAX_RATE_LIMIT};
use crate::output::OutputFormat;
use crate::ConfigError;
use std::time::Duration;

impl RunConfig {
    /// Validates merged settings and fills in defaults
    ///
    /// Out-of-range concurrency and rate values are clamped rather than
    /// rejected. An unknown format, an unparseable timeout or an empty user
    /// agent are validation errors.
    pub fn resolve(settings: Settings) -> Result<RunConfig, ConfigError> {
        let format = match settings.format.as_deref() {
            Some(format) => format.parse::<OutputFormat>()?,
            None => OutputFormat::Xml,
        };

        let user_agent = settings
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(ConfigError::Validation(
                "user-agent cannot be empty".to_string(),
            ));
        }

        let timeout = match settings.timeout.as_deref() {
            Some(raw) => Some(parse_duration(raw)?).filter(|d| !d.is_zero()),
            None => None,
        };

        Ok(RunConfig {
            max_depth: settings.depth.unwrap_or(DEFAULT_DEPTH),
            format,
            concurrency: clamp_concurrency(
                settings.concurrency.unwrap_or(DEFAULT_CONCURRENCY as i64),
            ),
            rate_limit: clamp_rate_limit(settings.rate_limit.unwrap_or(DEFAULT_RATE_LIMIT)),
            user_agent,
            timeout,
        })
    }
}

/// Clamps a requested concurrency into `1..=100`
pub fn clamp_concurrency(requested: i64) -> usize {
    requested.clamp(1, MAX_CONCURRENCY as i64) as usize
}

/// Clamps a requested rate into `0..=100` requests per second
pub fn clamp_rate_limit(requested: f64) -> f64 {
    if requested.is_nan() {
        return 0.0;
    }
    requested.clamp(0.0, MAX_RATE_LIMIT)
}

/// Parses a duration such as `30s`, `1m30s`, `1.5h` or `500ms`
///
/// Supported units are `h`, `m`, `s` and `ms`. A bare `0` is accepted and
/// means no duration.
pub fn parse_duration(input: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(input.to_string());
    let trimmed = input.trim();

    if trimmed == "0" {
        return Ok(Duration::ZERO);
    }
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut rest = trimmed;
    let mut seconds = 0.0_f64;

    while !rest.is_empty() {
        let number_end = rest.find(|c: char| !is_number(c)).unwrap_or(rest.len());
        if number_end == 0 {
            return Err(invalid());
        }
        let value: f64 = rest[..number_end].parse().map_err(|_| invalid())?;
        rest = &rest[number_end..];

        let unit_end = rest.find(is_number).unwrap_or(rest.len());
        let scale = match &rest[..unit_end] {
            "h" => 3600.0,
            "m" => 60.0,
            "s" => 1.0,
            "ms" => 0.001,
            _ => return Err(invalid()),
        };
        rest = &rest[unit_end..];

        seconds += value * scale;
    }

    Duration::try_from_secs_f64(seconds).map_err(|_| invalid())
}
