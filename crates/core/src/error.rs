use thiserror::Error;

use crate::declarations::ValueType;

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration-time errors raised while declaring arguments or loading a
/// declaration manifest.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Argument `{}` is already declared", .0)]
    DuplicateName(String),

    #[error("Mutex group `{}` is already declared", .0)]
    DuplicateGroup(String),

    #[error("Invalid argument name `{}`: {}", .name, .reason)]
    InvalidName { name: String, reason: String },

    #[error("No argument named `{}` has been declared", .0)]
    UnknownName(String),

    #[error("Mutex group `{}` needs at least two distinct members", .0)]
    GroupTooSmall(String),

    #[error("Mutex group `{}` may only contain flags and options, found `{}`", .0, .1)]
    InvalidGroupMember(String, String),

    #[error("Invalid bounds for `{}`: {}", .name, .reason)]
    InvalidBounds { name: String, reason: String },

    #[error("Invalid occurrence range for positional `{}`: min {} max {}", .name, .min, .max)]
    InvalidRange { name: String, min: usize, max: usize },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_name(name: &str, reason: &str) -> Self {
        Self::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_bounds(name: &str, reason: &str) -> Self {
        Self::InvalidBounds {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}

/// Discriminant of an [`AccessError`], for callers that branch on the
/// failure without caring about its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    NotFound,
    NoValue,
    InvalidType,
    ParseFailure,
    OutOfRange,
    InvalidValue,
}

/// Failure of a typed read. These are detected lazily, when the stored text
/// is converted, not while parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccessError {
    #[error("no option named `{}` has been declared", .0)]
    NotFound(String),

    #[error("option `{}` has no value", .0)]
    NoValue(String),

    #[error("option `{}` is declared as {} but was read as {}", .name, .declared, .requested)]
    InvalidType {
        name: String,
        declared: ValueType,
        requested: ValueType,
    },

    #[error("value `{}` for `{}` is not a valid {}", .value, .name, .expected)]
    ParseFailure {
        name: String,
        value: String,
        expected: ValueType,
    },

    #[error("value {} for `{}` is outside the range [{}, {}]", .value, .name, .min, .max)]
    OutOfRange {
        name: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("value `{}` for `{}` is not a boolean (expected true/yes/1 or false/no/0)", .value, .name)]
    InvalidValue { name: String, value: String },
}

impl AccessError {
    #[must_use]
    pub fn kind(&self) -> AccessErrorKind {
        match self {
            Self::NotFound(_) => AccessErrorKind::NotFound,
            Self::NoValue(_) => AccessErrorKind::NoValue,
            Self::InvalidType { .. } => AccessErrorKind::InvalidType,
            Self::ParseFailure { .. } => AccessErrorKind::ParseFailure,
            Self::OutOfRange { .. } => AccessErrorKind::OutOfRange,
            Self::InvalidValue { .. } => AccessErrorKind::InvalidValue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_kind() {
        let error = AccessError::OutOfRange {
            name: "--count".to_string(),
            value: "20".to_string(),
            min: "1".to_string(),
            max: "10".to_string(),
        };
        assert_eq!(error.kind(), AccessErrorKind::OutOfRange);
        assert_eq!(
            error.to_string(),
            "value 20 for `--count` is outside the range [1, 10]"
        );
    }

    #[test]
    fn test_error_display() {
        let error = Error::invalid_name("-vv", "short names are a dash and one character");
        assert_eq!(
            error.to_string(),
            "Invalid argument name `-vv`: short names are a dash and one character"
        );
        assert_eq!(
            Error::DuplicateName("--count".to_string()).to_string(),
            "Argument `--count` is already declared"
        );
    }
}
