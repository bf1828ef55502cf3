//! Problems found in the user's input during a parse pass.
//!
//! Diagnostics never abort parsing; they are collected in order and handed
//! back to the caller, who decides whether to report them and exit.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnknownArgument,
    MissingValue,
    FlagWithValue,
    UnexpectedPositional,
    MissingRequired,
    TooFewValues,
    TooManyValues,
    MutuallyExclusive,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("unknown argument `{}`", .0)]
    UnknownArgument(String),

    #[error("missing value for option `{}`", .0)]
    MissingValue(String),

    #[error("flag `{}` does not take a value", .0)]
    FlagWithValue(String),

    #[error("unexpected positional argument `{}`", .0)]
    UnexpectedPositional(String),

    #[error("missing required argument `{}`", .0)]
    MissingRequired(String),

    #[error("too few values for `{}`: expected at least {}, got {}", .name, .min, .found)]
    TooFewValues {
        name: String,
        min: usize,
        found: usize,
    },

    #[error("too many values for `{}`: expected at most {}, got {}", .name, .max, .found)]
    TooManyValues {
        name: String,
        max: usize,
        found: usize,
    },

    #[error("arguments in group `{}` are mutually exclusive, but got {}", .group, .supplied.join(", "))]
    MutuallyExclusive { group: String, supplied: Vec<String> },
}

impl Diagnostic {
    #[must_use]
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::UnknownArgument(_) => DiagnosticKind::UnknownArgument,
            Self::MissingValue(_) => DiagnosticKind::MissingValue,
            Self::FlagWithValue(_) => DiagnosticKind::FlagWithValue,
            Self::UnexpectedPositional(_) => DiagnosticKind::UnexpectedPositional,
            Self::MissingRequired(_) => DiagnosticKind::MissingRequired,
            Self::TooFewValues { .. } => DiagnosticKind::TooFewValues,
            Self::TooManyValues { .. } => DiagnosticKind::TooManyValues,
            Self::MutuallyExclusive { .. } => DiagnosticKind::MutuallyExclusive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutually_exclusive_message() {
        let diagnostic = Diagnostic::MutuallyExclusive {
            group: "format".to_string(),
            supplied: vec!["--json".to_string(), "--yaml".to_string()],
        };
        assert_eq!(
            diagnostic.to_string(),
            "arguments in group `format` are mutually exclusive, but got --json, --yaml"
        );
        assert_eq!(diagnostic.kind(), DiagnosticKind::MutuallyExclusive);
    }

    #[test]
    fn test_count_messages() {
        let too_few = Diagnostic::TooFewValues {
            name: "files".to_string(),
            min: 2,
            found: 1,
        };
        assert_eq!(
            too_few.to_string(),
            "too few values for `files`: expected at least 2, got 1"
        );
        assert_eq!(
            Diagnostic::UnknownArgument("--bogus".to_string()).to_string(),
            "unknown argument `--bogus`"
        );
    }
}
