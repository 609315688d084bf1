//! Configuration errors
//!
//! The simulation itself never fails; only loading tuning data can.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The tuning file could not be read
    Io { path: String, message: String },
    /// The tuning JSON is malformed
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    /// A value parsed but is out of range
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read tuning file {path}: {message}"),
            Self::Parse {
                line,
                column,
                message,
            } => write!(f, "invalid tuning json at {line}:{column}: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid() {
        let err = ConfigError::Invalid {
            field: "pistol.clip_size",
            reason: "must be at least 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid tuning value `pistol.clip_size`: must be at least 1"
        );
    }

    #[test]
    fn test_from_serde_error_keeps_position() {
        let err: ConfigError = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }")
            .unwrap_err()
            .into();
        match err {
            ConfigError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
