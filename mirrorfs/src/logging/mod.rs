//! Log level resolution and subscriber installation.
//!
//! The verbosity threshold comes from a single environment variable,
//! `MIRRORFS_LOG_LEVEL`, resolved once at startup. Resolution is a pure
//! token lookup; installing the process-wide subscriber is a separate,
//! one-shot side effect, so the mapping stays testable.

use tracing::level_filters::LevelFilter;

/// Environment variable consulted for the logging threshold.
pub const LOG_LEVEL_ENV: &str = "MIRRORFS_LOG_LEVEL";

/// Logging threshold for the process.
///
/// `Off` doubles as the disabled sentinel and the default: with no token,
/// or an unrecognized one, nothing is ever emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Most verbose; also surfaces the engine's per-request output.
    Debug,
    Info,
    Warn,
    Error,
    #[default]
    Off,
}

impl LogLevel {
    /// Map a verbosity token to a level.
    ///
    /// Matching is case-insensitive and accepts the common abbreviations
    /// of each level. Unrecognized tokens return `None` so the caller
    /// keeps its default.
    pub fn from_token(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "debug" | "dbg" | "d" | "trace" | "trc" | "t" => Some(Self::Debug),
            "informational" | "info" | "inf" | "i" => Some(Self::Info),
            "warning" | "warn" | "wrn" | "w" => Some(Self::Warn),
            "error" | "err" | "e" | "fatal" | "ftl" | "f" => Some(Self::Error),
            "off" | "none" | "null" | "nil" | "no" | "n" => Some(Self::Off),
            _ => None,
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error => LevelFilter::ERROR,
            Self::Off => LevelFilter::OFF,
        }
    }
}

/// Resolve the logging threshold from the environment.
pub fn resolve() -> LogLevel {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(token) => LogLevel::from_token(&token).unwrap_or_default(),
        Err(_) => LogLevel::default(),
    }
}

/// Install the process-wide subscriber at the given threshold.
///
/// Writes to stderr with source file and line annotation. Must run before
/// any other component logs; call exactly once.
pub fn init(level: LogLevel) {
    tracing_subscriber::fmt()
        .with_max_level(level.filter())
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_synonyms() {
        for token in ["debug", "dbg", "d", "trace", "trc", "t"] {
            assert_eq!(LogLevel::from_token(token), Some(LogLevel::Debug), "{token}");
        }
    }

    #[test]
    fn test_info_synonyms() {
        for token in ["informational", "info", "inf", "i"] {
            assert_eq!(LogLevel::from_token(token), Some(LogLevel::Info), "{token}");
        }
    }

    #[test]
    fn test_warn_synonyms() {
        for token in ["warning", "warn", "wrn", "w"] {
            assert_eq!(LogLevel::from_token(token), Some(LogLevel::Warn), "{token}");
        }
    }

    #[test]
    fn test_error_synonyms() {
        for token in ["error", "err", "e", "fatal", "ftl", "f"] {
            assert_eq!(LogLevel::from_token(token), Some(LogLevel::Error), "{token}");
        }
    }

    #[test]
    fn test_disabled_synonyms() {
        for token in ["off", "none", "null", "nil", "no", "n"] {
            assert_eq!(LogLevel::from_token(token), Some(LogLevel::Off), "{token}");
        }
    }

    #[test]
    fn test_tokens_are_case_insensitive() {
        assert_eq!(LogLevel::from_token("DeBuG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_token("INFO"), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_token("Warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_token("FATAL"), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_token("None"), Some(LogLevel::Off));
    }

    #[test]
    fn test_unrecognized_token_keeps_default() {
        assert_eq!(LogLevel::from_token("verbose"), None);
        assert_eq!(LogLevel::from_token(""), None);
        assert_eq!(LogLevel::from_token("2"), None);
        assert_eq!(LogLevel::default(), LogLevel::Off);
    }

    #[test]
    fn test_disabled_filter_admits_nothing() {
        assert_eq!(LogLevel::Off.filter(), LevelFilter::OFF);
        // OFF sits below the least verbose filter, so no record passes it
        assert!(LevelFilter::OFF < LevelFilter::ERROR);
    }
}
