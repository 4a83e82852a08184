//! Game configuration: column count and speed level.
//!
//! Configuration arrives loosely typed (a JSON object, or environment strings)
//! and is validated once into a [`Config`]. Missing fields fall back to
//! [`DEFAULT_ROW`] / [`DEFAULT_LEVEL`]; anything present must be an integer in range.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::{DEFAULT_LEVEL, DEFAULT_ROW, LEVEL_MAX, LEVEL_MIN, ROW_MAX, ROW_MIN};

/// Configuration validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config.{field} must be a number")]
    NotANumber { field: &'static str },

    #[error("config.{field} must be a whole number, got {value}")]
    NotAnInteger { field: &'static str, value: f64 },

    #[error("config.{field} must be between {min}~{max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: u8,
        max: u8,
        value: i64,
    },

    #[error("tick interval must be at least 1ms, got {value}")]
    TickInterval { value: u64 },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unvalidated configuration, as supplied by the caller.
///
/// Fields are raw JSON values so that non-numeric input can be reported
/// instead of silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub row: Option<Value>,
    #[serde(default)]
    pub level: Option<Value>,
}

impl RawConfig {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read `TILES_ROW` and `TILES_LEVEL`.
    ///
    /// Unset or blank variables count as missing.
    pub fn from_env() -> Self {
        Self {
            row: env_value("TILES_ROW"),
            level: env_value("TILES_LEVEL"),
        }
    }

    pub fn with_row(mut self, row: impl Into<Value>) -> Self {
        self.row = Some(row.into());
        self
    }

    pub fn with_level(mut self, level: impl Into<Value>) -> Self {
        self.level = Some(level.into());
        self
    }
}

fn env_value(key: &str) -> Option<Value> {
    let raw = std::env::var(key).ok()?;
    string_value(raw.trim())
}

/// Interpret a string the way a JSON number literal would be; anything else
/// stays a string and fails validation later.
fn string_value(s: &str) -> Option<Value> {
    if s.is_empty() {
        return None;
    }
    Some(
        serde_json::from_str::<serde_json::Number>(s)
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(s.to_string())),
    )
}

/// Validated configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of columns (2..=8)
    pub row: u8,
    /// Speed in surface units per tick (1..=3)
    pub level: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            row: DEFAULT_ROW,
            level: DEFAULT_LEVEL,
        }
    }
}

impl Config {
    pub fn new(row: u8, level: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            row: check_range("row", row as i64, ROW_MIN, ROW_MAX)?,
            level: validate_level(level)?,
        })
    }

    pub fn from_raw(raw: &RawConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            row: resolve("row", raw.row.as_ref(), DEFAULT_ROW, ROW_MIN, ROW_MAX)?,
            level: resolve(
                "level",
                raw.level.as_ref(),
                DEFAULT_LEVEL,
                LEVEL_MIN,
                LEVEL_MAX,
            )?,
        })
    }
}

/// Check a speed level against the same bounds construction enforces.
pub fn validate_level(level: u8) -> Result<u8, ConfigError> {
    check_range("level", level as i64, LEVEL_MIN, LEVEL_MAX)
}

fn resolve(
    field: &'static str,
    value: Option<&Value>,
    default: u8,
    min: u8,
    max: u8,
) -> Result<u8, ConfigError> {
    let n = match value {
        None | Some(Value::Null) => return Ok(default),
        Some(Value::Number(n)) => n,
        Some(_) => return Err(ConfigError::NotANumber { field }),
    };

    if let Some(i) = n.as_i64() {
        return check_range(field, i, min, max);
    }
    if n.as_u64().is_some() {
        // Larger than i64::MAX; certainly out of range.
        return Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value: i64::MAX,
        });
    }

    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() == 0.0 && f.is_finite() {
        check_range(field, f as i64, min, max)
    } else {
        Err(ConfigError::NotAnInteger { field, value: f })
    }
}

fn check_range(field: &'static str, value: i64, min: u8, max: u8) -> Result<u8, ConfigError> {
    if value < min as i64 || value > max as i64 {
        return Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(value as u8)
}
