//! Typed reads of option values.
//!
//! Values are stored as text during parsing and converted on every read, so a
//! value can be accepted by the parser and still be rejected here.

use std::str::FromStr;

use crate::declarations::{ArgumentId, Bounds, OptionDeclaration, ValueType};
use crate::error::AccessError;
use crate::parser::Parser;

/// Decodes a boolean literal: `true`/`yes`/`1` or `false`/`no`/`0`, ignoring
/// case and surrounding whitespace.
#[must_use]
pub fn parse_bool_literal(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn typed_option<'a>(
    parser: &'a Parser,
    name: &str,
    requested: ValueType,
) -> Result<(&'a OptionDeclaration, &'a str), AccessError> {
    let Some(ArgumentId::Option(index)) = parser.registry.lookup(name) else {
        return Err(AccessError::NotFound(name.to_string()));
    };

    let option = parser.registry.option(index);
    if option.value_type != requested {
        return Err(AccessError::InvalidType {
            name: name.to_string(),
            declared: option.value_type,
            requested,
        });
    }

    let value = option
        .value()
        .ok_or_else(|| AccessError::NoValue(name.to_string()))?;

    Ok((option, value))
}

fn lex<T: FromStr>(name: &str, value: &str, expected: ValueType) -> Result<T, AccessError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| AccessError::ParseFailure {
            name: name.to_string(),
            value: value.to_string(),
            expected,
        })
}

fn out_of_range(name: &str, value: &str, min: impl ToString, max: impl ToString) -> AccessError {
    AccessError::OutOfRange {
        name: name.to_string(),
        value: value.trim().to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

impl Parser {
    /// Reads an int option, enforcing its declared bounds.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the option is unknown, not declared as
    /// int, has no value, does not parse, or is out of range.
    pub fn option_int(&self, name: &str) -> Result<i64, AccessError> {
        let (option, value) = typed_option(self, name, ValueType::Int)?;
        let parsed: i64 = lex(name, value, ValueType::Int)?;

        match option.bounds {
            Some(Bounds::Int { min, max }) if !(min..=max).contains(&parsed) => {
                Err(out_of_range(name, value, min, max))
            }
            _ => Ok(parsed),
        }
    }

    /// Reads a float option, enforcing its declared bounds. NaN never
    /// satisfies a bound.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the option is unknown, not declared as
    /// float, has no value, does not parse, or is out of range.
    pub fn option_float(&self, name: &str) -> Result<f64, AccessError> {
        let (option, value) = typed_option(self, name, ValueType::Float)?;
        let parsed: f64 = lex(name, value, ValueType::Float)?;

        match option.bounds {
            Some(Bounds::Float { min, max }) if !(min..=max).contains(&parsed) => {
                Err(out_of_range(name, value, min, max))
            }
            _ => Ok(parsed),
        }
    }

    /// Reads a bool option.
    ///
    /// # Errors
    ///
    /// Returns an [`AccessError`] if the option is unknown, not declared as
    /// bool, has no value, or is not a recognised boolean literal.
    pub fn option_bool(&self, name: &str) -> Result<bool, AccessError> {
        let (_, value) = typed_option(self, name, ValueType::Bool)?;

        parse_bool_literal(value).ok_or_else(|| AccessError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}
