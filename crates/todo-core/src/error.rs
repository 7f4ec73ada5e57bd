use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigReadError,
    ConfigParseError,
    DuplicateTitle,
    TerminalIo,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigReadError => "E1001",
            Self::ConfigParseError => "E1002",
            Self::DuplicateTitle => "E2001",
            Self::TerminalIo => "E5001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigReadError => "Config file could not be read",
            Self::ConfigParseError => "Config file parse error",
            Self::DuplicateTitle => "A task with this title already exists",
            Self::TerminalIo => "Terminal I/O failed",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint for the user.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigReadError => Some("Check that the config path exists and is readable."),
            Self::ConfigParseError => Some("Fix syntax in config.toml and retry."),
            Self::DuplicateTitle => Some("Choose a different title and submit again."),
            Self::TerminalIo => Some("Run `todo` from an interactive terminal."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised by the task screen and its configuration layer.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// `add` was given a title that exactly matches an existing task.
    #[error("{}: task '{title}' already exists", ErrorCode::DuplicateTitle.code())]
    DuplicateTitle { title: String },

    /// The config file exists but could not be read.
    #[error("{}: failed to read {}: {source}", ErrorCode::ConfigReadError.code(), path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::Config`].
    #[error("{}: failed to parse {}: {source}", ErrorCode::ConfigParseError.code(), path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl TodoError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::DuplicateTitle { .. } => ErrorCode::DuplicateTitle,
            Self::ConfigRead { .. } => ErrorCode::ConfigReadError,
            Self::ConfigParse { .. } => ErrorCode::ConfigParseError,
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, TodoError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigReadError,
            ErrorCode::ConfigParseError,
            ErrorCode::DuplicateTitle,
            ErrorCode::TerminalIo,
            ErrorCode::InternalUnexpected,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::DuplicateTitle.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn duplicate_title_display_carries_code_and_title() {
        let err = TodoError::DuplicateTitle {
            title: "Buy milk".into(),
        };
        assert_eq!(err.code(), ErrorCode::DuplicateTitle);
        let text = err.to_string();
        assert!(text.starts_with("E2001"));
        assert!(text.contains("Buy milk"));
        assert!(err.hint().is_some());
    }
}
