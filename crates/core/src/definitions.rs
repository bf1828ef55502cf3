//! Serde model of a declaration manifest.
//!
//! A manifest describes the arguments a program accepts. It never supplies
//! argument values; it only replaces a sequence of `add_*` calls.
//!
//! ```yaml
//! program: convert
//! description: Converts files between formats.
//! flags:
//!   - short: -v
//!     long: --verbose
//!     help: Print more output
//! options:
//!   - long: --count
//!     short: -c
//!     type: int
//!     default: 3
//!     min: 1
//!     max: 10
//! positionals:
//!   - name: files
//!     min: 1
//!     max: 3
//! groups:
//!   - name: format
//!     members: [--json, --yaml]
//! ```

use serde::{Deserialize, Serialize};

use crate::declarations::{
    FlagDeclaration, OptionDeclaration, PositionalDeclaration, ValueType,
};
use crate::error::{Error, Result};
use crate::parser::Parser;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Number::Integer(value) => value as f64,
            Number::Real(value) => value,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct FlagDefinition {
    pub short: String,
    pub long: Option<String>,
    pub help: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub group: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OptionDefinition {
    pub long: String,
    pub short: Option<String>,
    pub help: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub group: Option<String>,
    #[serde(rename = "type", default)]
    pub value_type: ValueType,
    /// Kept as written: `default: 1.10` stays `"1.10"`.
    pub default: Option<String>,
    pub min: Option<Number>,
    pub max: Option<Number>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PositionalDefinition {
    pub name: String,
    pub help: Option<String>,
    pub required: Option<bool>,
    pub default: Option<String>,
    pub min: Option<usize>,
    pub max: Option<usize>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GroupDefinition {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ParserDefinition {
    pub program: String,
    pub description: Option<String>,
    #[serde(default)]
    pub flags: Vec<FlagDefinition>,
    #[serde(default)]
    pub options: Vec<OptionDefinition>,
    #[serde(default)]
    pub positionals: Vec<PositionalDefinition>,
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
    /// Names to mark as required after everything is declared.
    #[serde(default)]
    pub required: Vec<String>,
}

impl FlagDefinition {
    fn to_declaration(&self) -> FlagDeclaration {
        let mut flag = FlagDeclaration::new(&self.short).required(self.required);
        flag.long.clone_from(&self.long);
        flag.group.clone_from(&self.group);
        if let Some(help) = &self.help {
            flag = flag.help(help);
        }
        flag
    }
}

impl OptionDefinition {
    fn to_declaration(&self) -> Result<OptionDeclaration> {
        let mut option = OptionDeclaration::new(&self.long)
            .required(self.required)
            .value_type(self.value_type);
        option.short.clone_from(&self.short);
        option.group.clone_from(&self.group);
        option.default.clone_from(&self.default);
        if let Some(help) = &self.help {
            option = option.help(help);
        }

        match (self.value_type, self.min, self.max) {
            (_, None, None) => Ok(option),
            (ValueType::Int, Some(Number::Integer(min)), Some(Number::Integer(max))) => {
                Ok(option.int_range(min, max))
            }
            (ValueType::Int, Some(_), Some(_)) => Err(Error::invalid_bounds(
                &self.long,
                "int options need integer bounds",
            )),
            (ValueType::Float, Some(min), Some(max)) => {
                Ok(option.float_range(min.as_f64(), max.as_f64()))
            }
            (ValueType::Int | ValueType::Float, _, _) => Err(Error::invalid_bounds(
                &self.long,
                "both `min` and `max` are required",
            )),
            (value_type, _, _) => Err(Error::invalid_bounds(
                &self.long,
                &format!("bounds are not allowed on {value_type} options"),
            )),
        }
    }
}

impl PositionalDefinition {
    fn to_declaration(&self) -> PositionalDeclaration {
        let min = self.min.unwrap_or(1);
        let max = self.max.unwrap_or_else(|| min.max(1));

        let mut positional = PositionalDeclaration::new(&self.name).range(min, max);
        if let Some(required) = self.required {
            positional = positional.required(required);
        }
        positional.default.clone_from(&self.default);
        if let Some(help) = &self.help {
            positional = positional.help(help);
        }
        positional
    }
}

impl ParserDefinition {
    /// Declares every argument of the manifest on a fresh [`Parser`].
    ///
    /// # Errors
    ///
    /// Returns the first registration error, e.g. a duplicate name or a
    /// group member that was never declared.
    pub fn build(&self) -> Result<Parser> {
        let mut parser = Parser::new(&self.program);
        if let Some(description) = &self.description {
            parser = parser.description(description);
        }

        for flag in &self.flags {
            parser.add_flag(flag.to_declaration())?;
        }

        for option in &self.options {
            parser.add_option(option.to_declaration()?)?;
        }

        for positional in &self.positionals {
            parser.add_positional(positional.to_declaration())?;
        }

        for group in &self.groups {
            parser.add_mutex_group(&group.name, &group.members)?;
        }

        for name in &self.required {
            parser.require(name)?;
        }

        Ok(parser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
program: convert
description: Converts files between formats.
flags:
  - short: -v
    long: --verbose
    help: Print more output
  - short: -j
    long: --json
    group: Format
  - short: -y
    long: --yaml
    group: Format
options:
  - long: --count
    short: -c
    type: int
    default: 3
    min: 1
    max: 10
  - long: --ratio
    type: float
    min: 0
    max: 1
  - long: --output
    required: true
positionals:
  - name: files
    min: 1
    max: 3
groups:
  - name: format
    members: [--json, -y]
"#;

    fn manifest() -> ParserDefinition {
        serde_yaml::from_str(MANIFEST).unwrap()
    }

    #[test]
    fn test_defaults_keep_source_text() {
        let definition = manifest();
        assert_eq!(definition.options[0].default.as_deref(), Some("3"));

        let option: OptionDefinition =
            serde_yaml::from_str("{long: --version-tag, default: 1.10}").unwrap();
        assert_eq!(option.to_declaration().unwrap().value(), Some("1.10"));

        let option: OptionDefinition =
            serde_yaml::from_str("{long: --id, type: int, default: 18446744073709551615}")
                .unwrap();
        assert_eq!(
            option.to_declaration().unwrap().value(),
            Some("18446744073709551615")
        );

        let option: OptionDefinition =
            serde_yaml::from_str("{long: --strict, type: bool, default: yes}").unwrap();
        assert_eq!(option.to_declaration().unwrap().value(), Some("yes"));
    }

    #[test]
    fn test_build_from_manifest() {
        let mut parser = manifest().build().unwrap();
        assert_eq!(parser.program(), "convert");
        assert_eq!(parser.option("--count"), Some("3"));

        let errors = parser.parse(["-j", "--ratio", "0.5", "--output", "out", "a", "b"]);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(parser.option_float("--ratio"), Ok(0.5));
        assert_eq!(parser.positional_values("files"), ["a", "b"]);

        parser.parse(["-j", "--yaml", "--output", "out", "a"]);
        assert_eq!(parser.errors().len(), 1);
    }

    #[test]
    fn test_float_option_widens_int_bounds() {
        let option = &manifest().options[1];
        let declaration = option.to_declaration().unwrap();
        assert_eq!(
            declaration.bounds,
            Some(crate::declarations::Bounds::Float { min: 0.0, max: 1.0 })
        );
    }

    #[test]
    fn test_invalid_bounds() {
        let option: OptionDefinition =
            serde_yaml::from_str("{long: --count, type: int, min: 0.5, max: 2}").unwrap();
        assert!(matches!(
            option.to_declaration(),
            Err(Error::InvalidBounds { .. })
        ));

        let option: OptionDefinition =
            serde_yaml::from_str("{long: --name, min: 1, max: 2}").unwrap();
        assert!(matches!(
            option.to_declaration(),
            Err(Error::InvalidBounds { .. })
        ));

        let option: OptionDefinition =
            serde_yaml::from_str("{long: --count, type: int, min: 1}").unwrap();
        assert!(option.to_declaration().is_err());
    }

    fn build_positional(yaml: &str) -> Result<(usize, usize)> {
        let positional: PositionalDefinition = serde_yaml::from_str(yaml).unwrap();
        let mut parser = Parser::new("test");
        parser.add_positional(positional.to_declaration())?;
        let declared = parser.registry().positional(&positional.name).unwrap();
        Ok((declared.min, declared.max))
    }

    #[test]
    fn test_positional_defaults() {
        assert_eq!(build_positional("{name: input}").unwrap(), (1, 1));
        assert_eq!(
            build_positional("{name: input, required: false}").unwrap(),
            (0, 1)
        );
        assert_eq!(
            build_positional("{name: input, required: false, max: 4}").unwrap(),
            (0, 4)
        );
    }

    #[test]
    fn test_required_positional_keeps_a_minimum() {
        assert_eq!(
            build_positional("{name: input, required: true, min: 0, max: 2}").unwrap(),
            (1, 2)
        );

        let mut parser = ParserDefinition {
            program: "test".to_string(),
            description: None,
            flags: Vec::new(),
            options: Vec::new(),
            positionals: vec![serde_yaml::from_str(
                "{name: input, required: true, min: 0, max: 2}",
            )
            .unwrap()],
            groups: Vec::new(),
            required: Vec::new(),
        }
        .build()
        .unwrap();
        assert_eq!(parser.parse(Vec::<&str>::new()).len(), 1);
    }

    #[test]
    fn test_optional_positional_with_minimum_is_rejected() {
        assert!(matches!(
            build_positional("{name: input, required: false, min: 2, max: 3}"),
            Err(Error::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_unknown_group_member_fails_build() {
        let mut definition = manifest();
        definition.groups[0].members.push("--nope".to_string());
        assert!(matches!(definition.build(), Err(Error::UnknownName(_))));
    }
}
