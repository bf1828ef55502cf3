//! Declaration storage and name resolution.
//!
//! Flags and options live in arenas; every spelling (short or long) maps to
//! one [`ArgumentId`], so aliases always observe the same record. Positionals
//! are kept in declaration order.

use std::collections::{HashMap, HashSet};

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::declarations::{
    ArgumentId, FlagDeclaration, MutexGroup, OptionDeclaration, PositionalDeclaration,
};
use crate::error::Error::{
    DuplicateGroup, DuplicateName, GroupTooSmall, InvalidGroupMember, InvalidRange, UnknownName,
};
use crate::error::{Error, Result};

pub(crate) const SHORT_PREFIX: &str = "-";
pub(crate) const LONG_PREFIX: &str = "--";

/// What a name passed to [`Registry::require`] or a group refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Named(ArgumentId),
    Positional(usize),
}

#[derive(Debug, Default, Clone)]
pub struct Registry {
    flags: Vec<FlagDeclaration>,
    options: Vec<OptionDeclaration>,
    spellings: HashMap<String, ArgumentId>,
    positionals: IndexMap<String, PositionalDeclaration>,
    groups: IndexMap<String, MutexGroup>,
}

fn validate_short(name: &str) -> Result<()> {
    let mut rest = match name.strip_prefix(SHORT_PREFIX) {
        Some(rest) => rest.chars(),
        None => return Err(Error::invalid_name(name, "short names must start with `-`")),
    };

    match (rest.next(), rest.next()) {
        (Some(c), None) if c != '-' => Ok(()),
        _ => Err(Error::invalid_name(
            name,
            "short names are a dash followed by exactly one character",
        )),
    }
}

fn validate_long(name: &str) -> Result<()> {
    let Some(rest) = name.strip_prefix(LONG_PREFIX) else {
        return Err(Error::invalid_name(name, "long names must start with `--`"));
    };

    if rest.is_empty() {
        return Err(Error::invalid_name(name, "long names may not be empty"));
    }

    if rest.contains('=') || rest.contains(char::is_whitespace) {
        return Err(Error::invalid_name(
            name,
            "long names may not contain `=` or whitespace",
        ));
    }

    Ok(())
}

fn validate_positional_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_name(name, "positional names may not be empty"));
    }

    if name.starts_with(SHORT_PREFIX) {
        return Err(Error::invalid_name(
            name,
            "positional names may not start with `-`",
        ));
    }

    Ok(())
}

fn validate_bounds(option: &OptionDeclaration) -> Result<()> {
    let Some(bounds) = option.bounds else {
        return Ok(());
    };

    if bounds.value_type() != option.value_type {
        return Err(Error::invalid_bounds(
            &option.long,
            &format!(
                "{} bounds given for an option of type {}",
                bounds.value_type(),
                option.value_type
            ),
        ));
    }

    if !bounds.is_ordered() {
        return Err(Error::invalid_bounds(&option.long, "min must not exceed max"));
    }

    Ok(())
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unused<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let mut fresh = HashSet::new();
        for name in names {
            if self.spellings.contains_key(name) || !fresh.insert(name) {
                return Err(DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Registers a flag under its short spelling and optional long alias.
    ///
    /// # Errors
    ///
    /// Returns an error if a spelling is malformed or already taken.
    pub fn add_flag(&mut self, flag: FlagDeclaration) -> Result<()> {
        validate_short(&flag.short)?;
        if let Some(long) = &flag.long {
            validate_long(long)?;
        }
        self.check_unused(flag.spellings())?;

        let id = ArgumentId::Flag(self.flags.len());
        for spelling in flag.spellings() {
            self.spellings.insert(spelling.to_string(), id);
        }
        debug!("Declared flag `{}`", flag.display_name());
        self.flags.push(flag);
        Ok(())
    }

    /// Registers an option under its long spelling and optional short alias.
    ///
    /// # Errors
    ///
    /// Returns an error if a spelling is malformed or already taken, or if
    /// the declared bounds do not match the declared type.
    pub fn add_option(&mut self, option: OptionDeclaration) -> Result<()> {
        validate_long(&option.long)?;
        if let Some(short) = &option.short {
            validate_short(short)?;
        }
        validate_bounds(&option)?;
        self.check_unused(option.spellings())?;

        let id = ArgumentId::Option(self.options.len());
        for spelling in option.spellings() {
            self.spellings.insert(spelling.to_string(), id);
        }
        debug!("Declared option `{}` ({})", option.long, option.value_type);
        self.options.push(option);
        Ok(())
    }

    /// Registers a positional after all previously registered ones.
    ///
    /// # Errors
    ///
    /// Returns an error for a malformed or duplicate name, an empty or
    /// inverted occurrence range, or an optional positional whose range
    /// demands more than one value.
    pub fn add_positional(&mut self, mut positional: PositionalDeclaration) -> Result<()> {
        validate_positional_name(&positional.name)?;

        match positional.required {
            Some(true) => positional.min = positional.min.max(1),
            Some(false) if positional.min > 1 => {
                return Err(InvalidRange {
                    name: positional.name.clone(),
                    min: positional.min,
                    max: positional.max,
                })
            }
            Some(false) => positional.min = 0,
            None => {}
        }

        if positional.max == 0 || positional.min > positional.max {
            return Err(InvalidRange {
                name: positional.name.clone(),
                min: positional.min,
                max: positional.max,
            });
        }

        if self.positionals.contains_key(&positional.name) {
            return Err(DuplicateName(positional.name.clone()));
        }

        debug!(
            "Declared positional `{}` ({}..{})",
            positional.name, positional.min, positional.max
        );
        self.positionals.insert(positional.name.clone(), positional);
        Ok(())
    }

    /// Registers a mutual-exclusion group over already declared flags or
    /// options, referenced by any of their spellings.
    ///
    /// # Errors
    ///
    /// Returns an error if the group name is taken, a member is unknown or
    /// positional, or fewer than two distinct arguments are listed.
    pub fn add_mutex_group<I, S>(&mut self, name: &str, members: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.groups.contains_key(name) {
            return Err(DuplicateGroup(name.to_string()));
        }

        let mut ids = IndexSet::new();
        for member in members {
            match self.resolve(member.as_ref())? {
                Target::Named(id) => {
                    ids.insert(id);
                }
                Target::Positional(_) => {
                    return Err(InvalidGroupMember(
                        name.to_string(),
                        member.as_ref().to_string(),
                    ))
                }
            }
        }

        if ids.len() < 2 {
            return Err(GroupTooSmall(name.to_string()));
        }

        debug!("Declared mutex group `{}` with {} members", name, ids.len());
        self.groups.insert(
            name.to_string(),
            MutexGroup {
                name: name.to_string(),
                members: ids,
            },
        );
        Ok(())
    }

    /// Marks an existing argument as required. Requiring a positional raises
    /// its minimum occurrence count to one.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownName`] if nothing is declared under `name`.
    pub fn require(&mut self, name: &str) -> Result<()> {
        match self.resolve(name)? {
            Target::Named(ArgumentId::Flag(index)) => self.flags[index].required = true,
            Target::Named(ArgumentId::Option(index)) => self.options[index].required = true,
            Target::Positional(index) => {
                if let Some((_, positional)) = self.positionals.get_index_mut(index) {
                    positional.min = positional.min.max(1);
                }
            }
        }
        Ok(())
    }

    /// Assigns the display group used by the grouped help styles.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a flag or option spelling.
    pub fn set_group(&mut self, name: &str, group: &str) -> Result<()> {
        match self.lookup(name) {
            Some(ArgumentId::Flag(index)) => self.flags[index].group = Some(group.to_string()),
            Some(ArgumentId::Option(index)) => {
                self.options[index].group = Some(group.to_string());
            }
            None => return Err(UnknownName(name.to_string())),
        }
        Ok(())
    }

    /// Resolves a spelling to its shared declaration slot.
    #[must_use]
    pub fn lookup(&self, spelling: &str) -> Option<ArgumentId> {
        self.spellings.get(spelling).copied()
    }

    /// Resolves a flag/option spelling or a positional name.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownName`] when nothing matches.
    pub fn resolve(&self, name: &str) -> Result<Target> {
        if let Some(id) = self.lookup(name) {
            return Ok(Target::Named(id));
        }

        self.positionals
            .get_index_of(name)
            .map(Target::Positional)
            .ok_or_else(|| UnknownName(name.to_string()))
    }

    /// The name used for an argument in diagnostics and help.
    #[must_use]
    pub(crate) fn display_name(&self, id: ArgumentId) -> &str {
        match id {
            ArgumentId::Flag(index) => self.flags[index].display_name(),
            ArgumentId::Option(index) => &self.options[index].long,
        }
    }

    /// Number of times the argument was supplied in the last parse.
    #[must_use]
    pub(crate) fn occurrences(&self, id: ArgumentId) -> usize {
        match id {
            ArgumentId::Flag(index) => self.flags[index].count,
            ArgumentId::Option(index) => self.options[index].count,
        }
    }

    #[must_use]
    pub(crate) fn flag(&self, index: usize) -> &FlagDeclaration {
        &self.flags[index]
    }

    pub(crate) fn flag_mut(&mut self, index: usize) -> &mut FlagDeclaration {
        &mut self.flags[index]
    }

    #[must_use]
    pub(crate) fn option(&self, index: usize) -> &OptionDeclaration {
        &self.options[index]
    }

    pub(crate) fn option_mut(&mut self, index: usize) -> &mut OptionDeclaration {
        &mut self.options[index]
    }

    pub fn flags(&self) -> impl Iterator<Item = &FlagDeclaration> {
        self.flags.iter()
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionDeclaration> {
        self.options.iter()
    }

    pub fn positionals(&self) -> impl Iterator<Item = &PositionalDeclaration> {
        self.positionals.values()
    }

    #[must_use]
    pub fn positional(&self, name: &str) -> Option<&PositionalDeclaration> {
        self.positionals.get(name)
    }

    pub(crate) fn positional_at_mut(&mut self, index: usize) -> Option<&mut PositionalDeclaration> {
        self.positionals
            .get_index_mut(index)
            .map(|(_, positional)| positional)
    }

    #[must_use]
    pub fn positional_count(&self) -> usize {
        self.positionals.len()
    }

    pub fn groups(&self) -> impl Iterator<Item = &MutexGroup> {
        self.groups.values()
    }

    /// The mutex group an argument belongs to, if any. When an argument is in
    /// several groups the first declared one is returned.
    #[must_use]
    pub fn group_of(&self, id: ArgumentId) -> Option<&MutexGroup> {
        self.groups.values().find(|group| group.contains(id))
    }

    /// Every registered spelling, for suggestion lookups.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        self.spellings.keys().map(String::as_str)
    }

    /// Clears counts and parsed values, keeping every declaration.
    pub(crate) fn reset(&mut self) {
        for flag in &mut self.flags {
            flag.count = 0;
        }
        for option in &mut self.options {
            option.count = 0;
            option.value = None;
        }
        for positional in self.positionals.values_mut() {
            positional.values.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::ValueType;

    fn registry_with_verbose() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_flag(FlagDeclaration::new("-v").long("--verbose"))
            .unwrap();
        registry
    }

    #[test]
    fn test_validate_short() {
        assert!(validate_short("-v").is_ok());
        assert!(validate_short("-?").is_ok());
        assert!(validate_short("v").is_err());
        assert!(validate_short("-").is_err());
        assert!(validate_short("--").is_err());
        assert!(validate_short("-vv").is_err());
    }

    #[test]
    fn test_validate_long() {
        assert!(validate_long("--verbose").is_ok());
        assert!(validate_long("--dry-run").is_ok());
        assert!(validate_long("--").is_err());
        assert!(validate_long("-verbose").is_err());
        assert!(validate_long("--a=b").is_err());
        assert!(validate_long("--a b").is_err());
    }

    #[test]
    fn test_aliases_share_one_slot() {
        let registry = registry_with_verbose();
        assert_eq!(registry.lookup("-v"), Some(ArgumentId::Flag(0)));
        assert_eq!(registry.lookup("--verbose"), Some(ArgumentId::Flag(0)));
        assert_eq!(registry.lookup("--quiet"), None);
    }

    #[test]
    fn test_duplicate_spelling_is_rejected() {
        let mut registry = registry_with_verbose();

        let result = registry.add_option(OptionDeclaration::new("--verbose"));
        assert!(matches!(result, Err(DuplicateName(name)) if name == "--verbose"));

        let result = registry.add_flag(FlagDeclaration::new("-v"));
        assert!(matches!(result, Err(DuplicateName(_))));

        // The original declaration is untouched.
        assert_eq!(registry.flags().count(), 1);
        assert_eq!(registry.options().count(), 0);
    }

    #[test]
    fn test_same_spelling_twice_in_one_declaration() {
        let mut registry = Registry::new();
        let result = registry.add_option(OptionDeclaration::new("--out").short("-o"));
        assert!(result.is_ok());

        let result = registry.add_flag(FlagDeclaration::new("-x").long("--out"));
        assert!(matches!(result, Err(DuplicateName(_))));
        // Nothing from the failed declaration leaked into the table.
        assert_eq!(registry.lookup("-x"), None);
    }

    #[test]
    fn test_duplicate_positional_is_rejected() {
        let mut registry = Registry::new();
        registry
            .add_positional(PositionalDeclaration::new("input"))
            .unwrap();
        let result = registry.add_positional(PositionalDeclaration::new("input"));
        assert!(matches!(result, Err(DuplicateName(_))));
    }

    #[test]
    fn test_invalid_positional_range() {
        let mut registry = Registry::new();
        let result = registry.add_positional(PositionalDeclaration::new("files").range(3, 2));
        assert!(matches!(result, Err(InvalidRange { .. })));

        let result = registry.add_positional(PositionalDeclaration::new("none").range(0, 0));
        assert!(matches!(result, Err(InvalidRange { .. })));
    }

    #[test]
    fn test_positional_required_ignores_call_order() {
        let mut registry = Registry::new();
        registry
            .add_positional(PositionalDeclaration::new("first").required(true).range(0, 3))
            .unwrap();
        registry
            .add_positional(PositionalDeclaration::new("second").range(0, 3).required(true))
            .unwrap();
        registry
            .add_positional(PositionalDeclaration::new("third").required(false).range(1, 2))
            .unwrap();

        assert_eq!(registry.positional("first").unwrap().min, 1);
        assert_eq!(registry.positional("second").unwrap().min, 1);
        assert_eq!(registry.positional("third").unwrap().min, 0);

        for positional in [
            PositionalDeclaration::new("fourth").range(2, 3).required(false),
            PositionalDeclaration::new("fourth").required(false).range(2, 3),
        ] {
            assert!(matches!(
                registry.add_positional(positional),
                Err(InvalidRange { min: 2, max: 3, .. })
            ));
        }
        assert!(registry.positional("fourth").is_none());
    }

    #[test]
    fn test_bounds_must_match_type() {
        let mut registry = Registry::new();
        let mut option = OptionDeclaration::new("--count").int_range(1, 10);
        option.value_type = ValueType::Float;
        assert!(matches!(
            registry.add_option(option),
            Err(Error::InvalidBounds { .. })
        ));

        let option = OptionDeclaration::new("--count").int_range(10, 1);
        assert!(matches!(
            registry.add_option(option),
            Err(Error::InvalidBounds { .. })
        ));
    }

    #[test]
    fn test_mutex_group_members() {
        let mut registry = registry_with_verbose();
        registry
            .add_flag(FlagDeclaration::new("-q").long("--quiet"))
            .unwrap();
        registry
            .add_mutex_group("noise", ["--verbose", "-q"])
            .unwrap();

        let group = registry.group_of(ArgumentId::Flag(1)).unwrap();
        assert_eq!(group.name, "noise");
        assert_eq!(
            group.members().collect::<Vec<_>>(),
            vec![ArgumentId::Flag(0), ArgumentId::Flag(1)]
        );
    }

    #[test]
    fn test_mutex_group_errors() {
        let mut registry = registry_with_verbose();
        registry
            .add_positional(PositionalDeclaration::new("input"))
            .unwrap();

        assert!(matches!(
            registry.add_mutex_group("g", ["--verbose", "--missing"]),
            Err(UnknownName(_))
        ));
        assert!(matches!(
            registry.add_mutex_group("g", ["--verbose", "-v"]),
            Err(GroupTooSmall(_))
        ));
        assert!(matches!(
            registry.add_mutex_group("g", ["--verbose", "input"]),
            Err(InvalidGroupMember(_, _))
        ));
    }

    #[test]
    fn test_require() {
        let mut registry = registry_with_verbose();
        registry
            .add_positional(PositionalDeclaration::new("input").required(false))
            .unwrap();

        registry.require("-v").unwrap();
        registry.require("input").unwrap();

        assert!(registry.flag(0).required);
        assert!(registry.positional("input").unwrap().is_required());
        assert!(matches!(registry.require("--nope"), Err(UnknownName(_))));
    }

    #[test]
    fn test_set_group() {
        let mut registry = registry_with_verbose();
        registry.set_group("-v", "Output").unwrap();
        assert_eq!(registry.flag(0).group.as_deref(), Some("Output"));
        assert!(registry.set_group("--nope", "Output").is_err());
    }
}
