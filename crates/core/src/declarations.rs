//! Declaration records for flags, options, and positional arguments.
//!
//! Each declaration is built with a small builder API and then handed to the
//! [`Registry`](crate::registry::Registry), which owns it for the rest of the
//! parser's lifetime. Only the runtime state (counts and values) changes
//! after registration.

use std::fmt::{Display, Formatter};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// The declared type of an option's value.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    String,
    Int,
    Float,
    Bool,
}

impl Display for ValueType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            ValueType::String => "string",
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::Bool => "bool",
        })
    }
}

/// Inclusive numeric bounds for an int or float option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64 },
}

impl Bounds {
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Bounds::Int { .. } => ValueType::Int,
            Bounds::Float { .. } => ValueType::Float,
        }
    }

    /// `min <= max`, and no NaN endpoints.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        match *self {
            Bounds::Int { min, max } => min <= max,
            Bounds::Float { min, max } => min <= max,
        }
    }
}

impl Display for Bounds {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Bounds::Int { min, max } => write!(formatter, "{min}..{max}"),
            Bounds::Float { min, max } => write!(formatter, "{min}..{max}"),
        }
    }
}

/// Identifies a flag or option slot in the registry. All spellings of one
/// argument map to the same identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentId {
    Flag(usize),
    Option(usize),
}

/// A value-less switch, counted each time any of its spellings appears.
#[derive(Debug, Clone)]
pub struct FlagDeclaration {
    pub short: String,
    pub long: Option<String>,
    pub help: String,
    pub required: bool,
    pub group: Option<String>,
    pub(crate) count: usize,
}

impl FlagDeclaration {
    /// Starts a flag declaration from its short spelling, e.g. `-v`.
    #[must_use]
    pub fn new(short: &str) -> Self {
        Self {
            short: short.to_string(),
            long: None,
            help: String::new(),
            required: false,
            group: None,
            count: 0,
        }
    }

    #[must_use]
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Number of times the flag was supplied in the last parse.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Long spelling when there is one, otherwise the short spelling.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.long.as_deref().unwrap_or(&self.short)
    }

    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.short.as_str()).chain(self.long.as_deref())
    }
}

/// A named argument that takes exactly one value.
#[derive(Debug, Clone)]
pub struct OptionDeclaration {
    pub long: String,
    pub short: Option<String>,
    pub help: String,
    pub required: bool,
    pub group: Option<String>,
    pub value_type: ValueType,
    pub default: Option<String>,
    pub bounds: Option<Bounds>,
    pub(crate) value: Option<String>,
    pub(crate) count: usize,
}

impl OptionDeclaration {
    /// Starts an option declaration from its long spelling, e.g. `--count`.
    #[must_use]
    pub fn new(long: &str) -> Self {
        Self {
            long: long.to_string(),
            short: None,
            help: String::new(),
            required: false,
            group: None,
            value_type: ValueType::String,
            default: None,
            bounds: None,
            value: None,
            count: 0,
        }
    }

    #[must_use]
    pub fn short(mut self, short: &str) -> Self {
        self.short = Some(short.to_string());
        self
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    #[must_use]
    pub fn default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    #[must_use]
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Declares the option as an int restricted to `[min, max]`.
    #[must_use]
    pub fn int_range(mut self, min: i64, max: i64) -> Self {
        self.value_type = ValueType::Int;
        self.bounds = Some(Bounds::Int { min, max });
        self
    }

    /// Declares the option as a float restricted to `[min, max]`.
    #[must_use]
    pub fn float_range(mut self, min: f64, max: f64) -> Self {
        self.value_type = ValueType::Float;
        self.bounds = Some(Bounds::Float { min, max });
        self
    }

    /// The parsed value, or the default when the option was not supplied.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().or(self.default.as_deref())
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.long.as_str()).chain(self.short.as_deref())
    }
}

/// An argument matched by position, accepting between `min` and `max`
/// values.
#[derive(Debug, Clone)]
pub struct PositionalDeclaration {
    pub name: String,
    pub help: String,
    pub default: Option<String>,
    pub min: usize,
    pub max: usize,
    pub(crate) required: Option<bool>,
    pub(crate) values: Vec<String>,
}

impl PositionalDeclaration {
    /// A positional taking exactly one value.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            help: String::new(),
            default: None,
            min: 1,
            max: 1,
            required: None,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    #[must_use]
    pub fn default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    /// A required positional needs at least one value; an optional one may
    /// receive none. Applied on registration, after [`Self::range`], so the
    /// call order does not matter.
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    #[must_use]
    pub fn range(mut self, min: usize, max: usize) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.min > 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.values.len() >= self.max
    }

    /// All received values joined by a single space, or the default when
    /// nothing was received.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        if self.values.is_empty() {
            self.default.clone()
        } else {
            Some(self.values.join(" "))
        }
    }

    /// The discrete values received in the last parse.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// A named set of flags/options of which at most one may be supplied.
#[derive(Debug, Clone)]
pub struct MutexGroup {
    pub name: String,
    pub(crate) members: IndexSet<ArgumentId>,
}

impl MutexGroup {
    pub fn members(&self) -> impl Iterator<Item = ArgumentId> + '_ {
        self.members.iter().copied()
    }

    #[must_use]
    pub fn contains(&self, id: ArgumentId) -> bool {
        self.members.contains(&id)
    }
}
