//! Environment variable helpers shared by every configuration struct.

use std::str::FromStr;

use crate::error::ConfigError;

/// Read a required variable. Empty values count as missing.
pub fn required(var: &'static str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(var)),
    }
}

/// Read the first of several variables that is set, reporting the first
/// name when none are.
pub fn required_any(vars: &[&'static str]) -> Result<String, ConfigError> {
    vars.iter()
        .find_map(|var| required(var).ok())
        .ok_or_else(|| ConfigError::Missing(vars.first().copied().unwrap_or("<unnamed>")))
}

/// Read an optional variable, falling back to `default`.
pub fn or_default(var: &'static str, default: &str) -> String {
    std::env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read and parse an optional variable, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error rather than being
/// silently replaced by the default.
pub fn parsed_or<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

/// Split a comma-separated list, dropping blank entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
