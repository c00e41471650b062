//! Severity levels and their output tags

use std::fmt;

/// Severity of a log entry
///
/// Only used to pick the tag written between the brackets of each line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Level {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    #[default]
    Info,
    Debug,
}

impl Level {
    /// Every level, most severe first
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    /// Get the tag written to the log for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Emergency => "EMERGENCY",
            Level::Alert => "ALERT",
            Level::Critical => "CRITICAL",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Notice => "NOTICE",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }

    /// Parse a level name, falling back to `Info` for anything unknown
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "emergency" => Level::Emergency,
            "alert" => Level::Alert,
            "critical" => Level::Critical,
            "error" => Level::Error,
            "warning" => Level::Warning,
            "notice" => Level::Notice,
            "debug" => Level::Debug,
            _ => Level::Info,
        }
    }
}

impl From<&str> for Level {
    fn from(name: &str) -> Self {
        Level::parse(name)
    }
}

impl From<String> for Level {
    fn from(name: String) -> Self {
        Level::parse(&name)
    }
}

impl From<&String> for Level {
    fn from(name: &String) -> Self {
        Level::parse(name)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_tags() {
        let tags: Vec<&str> = Level::ALL.iter().map(Level::as_str).collect();
        assert_eq!(
            tags,
            vec![
                "EMERGENCY",
                "ALERT",
                "CRITICAL",
                "ERROR",
                "WARNING",
                "NOTICE",
                "INFO",
                "DEBUG"
            ]
        );
    }

    #[test]
    fn test_parse_known_names() {
        for level in Level::ALL {
            let name = level.as_str().to_lowercase();
            assert_eq!(Level::parse(&name), level);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Level::parse("Warning"), Level::Warning);
        assert_eq!(Level::parse(" DEBUG "), Level::Debug);
    }

    #[test]
    fn test_unknown_falls_back_to_info() {
        assert_eq!(Level::parse("verbose"), Level::Info);
        assert_eq!(Level::parse(""), Level::Info);
        assert_eq!(Level::from("warn"), Level::Info);
    }

    #[test]
    fn test_from_owned_string() {
        let name = String::from("alert");
        assert_eq!(Level::from(&name), Level::Alert);
        assert_eq!(Level::from(name), Level::Alert);
        assert_eq!(Level::from(String::from("loud")), Level::Info);
    }

    #[test]
    fn test_display_matches_tag() {
        assert_eq!(Level::Critical.to_string(), "CRITICAL");
    }
}
