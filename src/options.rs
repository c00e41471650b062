//! Logger options
//!
//! Options are plain string key/value pairs. `dateFormat` controls the
//! timestamp at the start of each line; `interpolateContext` turns on
//! `{key}` placeholder substitution. Any other key is kept but ignored.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result as AnyResult};
use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, Result};

/// Key of the timestamp format option
pub const DATE_FORMAT: &str = "dateFormat";

/// Key of the context interpolation switch
pub const INTERPOLATE_CONTEXT: &str = "interpolateContext";

/// Default timestamp format, e.g. `2024.03.15 14:22:01`
pub const DEFAULT_DATE_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

/// Options applied when formatting log lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct Options {
    /// chrono strftime format for timestamps
    #[serde(rename = "dateFormat")]
    date_format: String,

    /// Unrecognized keys, stored for forward compatibility
    #[serde(flatten)]
    extra: BTreeMap<String, String>,
}

/// Options as read from a config document, before validation
#[derive(Deserialize)]
struct RawOptions {
    #[serde(rename = "dateFormat", default = "default_date_format")]
    date_format: String,

    /// Non-string values (`interpolateContext = true`) are kept in text form
    #[serde(flatten)]
    extra: BTreeMap<String, toml::Value>,
}

impl TryFrom<RawOptions> for Options {
    type Error = LogError;

    fn try_from(raw: RawOptions) -> Result<Self> {
        let mut options = Options::default();
        options.set(DATE_FORMAT, raw.date_format)?;
        for (key, value) in raw.extra {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            options.set(&key, value)?;
        }
        Ok(options)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            extra: BTreeMap::new(),
        }
    }
}

impl Options {
    /// Parse options from a TOML document
    pub fn from_toml_str(content: &str) -> AnyResult<Self> {
        toml::from_str(content).context("Failed to parse logger options")
    }

    /// Load options from a TOML file, falling back to defaults if it is missing
    pub fn load(path: &Path) -> AnyResult<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read logger options file")?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Set one option, overwriting any previous value
    ///
    /// `dateFormat` must be a strftime pattern chrono can format with; on
    /// rejection the old value is kept.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let value = value.into();
        if key == DATE_FORMAT {
            let sample = Local.timestamp_opt(0, 0).single().unwrap_or_else(Local::now);
            format_with(&value, &sample)?;
            self.date_format = value;
        } else {
            self.extra.insert(key.to_string(), value);
        }
        Ok(())
    }

    /// Get the current value of an option
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == DATE_FORMAT {
            Some(&self.date_format)
        } else {
            self.extra.get(key).map(String::as_str)
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Whether `{key}` placeholders should be filled from the log context
    pub fn interpolate_context(&self) -> bool {
        self.extra
            .get(INTERPOLATE_CONTEXT)
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Format a timestamp with the configured date format
    pub fn format_timestamp(&self, at: &DateTime<Local>) -> Result<String> {
        format_with(&self.date_format, at)
    }
}

/// chrono reports unknown and parse-only specifiers as a `fmt::Error`
fn format_with(format: &str, at: &DateTime<Local>) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", at.format(format)).map_err(|_| LogError::InvalidOption {
        key: DATE_FORMAT.to_string(),
        value: format.to_string(),
    })?;
    Ok(out)
}
