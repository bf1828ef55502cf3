//! The single-pass parsing engine and the untyped read API.

use log::{debug, trace};

use crate::declarations::{
    ArgumentId, FlagDeclaration, OptionDeclaration, PositionalDeclaration,
};
use crate::diagnostics::Diagnostic;
use crate::error::Result;
use crate::registry::{Registry, LONG_PREFIX, SHORT_PREFIX};

/// Drops the leading program name from a full process argument vector.
fn without_program_name<I: IntoIterator>(args: I) -> std::iter::Skip<I::IntoIter> {
    args.into_iter().skip(1)
}

/// How one raw token is interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Token {
    /// `--`: everything after it is positional.
    Terminator,
    /// `--name` or `--name=value`.
    Long {
        spelling: String,
        attached: Option<String>,
    },
    /// `-x`.
    Short(String),
    Positional(String),
}

fn classify(token: String) -> Token {
    if token == LONG_PREFIX {
        return Token::Terminator;
    }

    if token.starts_with(LONG_PREFIX) {
        return match token.split_once('=') {
            Some((spelling, value)) => Token::Long {
                spelling: spelling.to_string(),
                attached: Some(value.to_string()),
            },
            None => Token::Long {
                spelling: token,
                attached: None,
            },
        };
    }

    if token.starts_with(SHORT_PREFIX) && token.chars().count() == 2 {
        return Token::Short(token);
    }

    Token::Positional(token)
}

/// Declares arguments, parses an argument vector against them, and exposes
/// the results.
///
/// The argument vector passed to [`Parser::parse`] must not include the
/// program name; use [`Parser::parse_env`] to parse the process arguments.
///
/// # Examples
///
/// ```
/// use argot_core::declarations::{FlagDeclaration, OptionDeclaration};
/// use argot_core::parser::Parser;
///
/// let mut parser = Parser::new("demo");
/// parser.add_flag(FlagDeclaration::new("-v").long("--verbose"))?;
/// parser.add_option(OptionDeclaration::new("--count").int_range(1, 10).default("1"))?;
///
/// let errors = parser.parse(["-v", "--verbose", "--count", "7"]);
/// assert!(errors.is_empty());
/// assert_eq!(parser.flag_count("-v"), 2);
/// assert_eq!(parser.option_int("--count"), Ok(7));
/// # Ok::<(), argot_core::error::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    program: String,
    description: Option<String>,
    pub(crate) registry: Registry,
    diagnostics: Vec<Diagnostic>,
    next_positional: usize,
    overflow: usize,
}

impl Parser {
    #[must_use]
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            description: None,
            registry: Registry::new(),
            diagnostics: Vec::new(),
            next_positional: 0,
            overflow: 0,
        }
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn about(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// # Errors
    ///
    /// See [`Registry::add_flag`].
    pub fn add_flag(&mut self, flag: FlagDeclaration) -> Result<()> {
        self.registry.add_flag(flag)
    }

    /// # Errors
    ///
    /// See [`Registry::add_option`].
    pub fn add_option(&mut self, option: OptionDeclaration) -> Result<()> {
        self.registry.add_option(option)
    }

    /// # Errors
    ///
    /// See [`Registry::add_positional`].
    pub fn add_positional(&mut self, positional: PositionalDeclaration) -> Result<()> {
        self.registry.add_positional(positional)
    }

    /// # Errors
    ///
    /// See [`Registry::add_mutex_group`].
    pub fn add_mutex_group<I, S>(&mut self, name: &str, members: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.add_mutex_group(name, members)
    }

    /// # Errors
    ///
    /// See [`Registry::require`].
    pub fn require(&mut self, name: &str) -> Result<()> {
        self.registry.require(name)
    }

    /// # Errors
    ///
    /// See [`Registry::set_group`].
    pub fn set_group(&mut self, name: &str, group: &str) -> Result<()> {
        self.registry.set_group(name, group)
    }

    /// Parses the process arguments, skipping the program name.
    pub fn parse_env(&mut self) -> &[Diagnostic] {
        self.parse(without_program_name(std::env::args()))
    }

    /// Parses `args` (without the program name) in one left-to-right pass,
    /// then checks required arguments, positional counts and mutex groups.
    ///
    /// Every token is copied, so the parser never borrows from `args`.
    /// Calling this again starts from a clean state.
    pub fn parse<I, S>(&mut self, args: I) -> &[Diagnostic]
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.registry.reset();
        self.diagnostics.clear();
        self.next_positional = 0;
        self.overflow = 0;

        let mut tokens = args.into_iter().map(|arg| arg.as_ref().to_string());
        let mut options_ended = false;

        while let Some(token) = tokens.next() {
            if options_ended {
                self.push_positional(token);
                continue;
            }

            match classify(token) {
                Token::Terminator => {
                    debug!("End of options marker found");
                    options_ended = true;
                }
                Token::Long { spelling, attached } => {
                    self.apply_named(spelling, attached, &mut tokens);
                }
                Token::Short(spelling) => self.apply_named(spelling, None, &mut tokens),
                Token::Positional(value) => self.push_positional(value),
            }
        }

        self.check_required();
        self.check_positional_counts();
        self.check_mutex_groups();

        &self.diagnostics
    }

    fn apply_named(
        &mut self,
        spelling: String,
        attached: Option<String>,
        rest: &mut impl Iterator<Item = String>,
    ) {
        match self.registry.lookup(&spelling) {
            Some(ArgumentId::Flag(index)) => {
                if attached.is_some() {
                    self.diagnostics.push(Diagnostic::FlagWithValue(spelling));
                    return;
                }
                let flag = self.registry.flag_mut(index);
                flag.count += 1;
                debug!("Flag `{}` seen ({} times)", spelling, flag.count);
            }
            Some(ArgumentId::Option(index)) => match attached.or_else(|| rest.next()) {
                Some(value) => {
                    debug!("Option `{}` set to `{}`", spelling, value);
                    let option = self.registry.option_mut(index);
                    option.value = Some(value);
                    option.count += 1;
                }
                None => self.diagnostics.push(Diagnostic::MissingValue(spelling)),
            },
            None => {
                debug!("Unknown argument `{}`", spelling);
                self.diagnostics.push(Diagnostic::UnknownArgument(spelling));
            }
        }
    }

    fn push_positional(&mut self, value: String) {
        let last = self.registry.positional_count();

        while self.next_positional < last {
            match self.registry.positional_at_mut(self.next_positional) {
                Some(positional) if !positional.is_full() => {
                    trace!("Positional `{}` takes `{}`", positional.name, value);
                    positional.values.push(value);
                    return;
                }
                _ => self.next_positional += 1,
            }
        }

        if last > 0 {
            self.overflow += 1;
        }
        self.diagnostics
            .push(Diagnostic::UnexpectedPositional(value));
    }

    fn check_required(&mut self) {
        let flags = self
            .registry
            .flags()
            .filter(|flag| flag.required && flag.count == 0)
            .map(|flag| flag.display_name().to_string());

        let options = self
            .registry
            .options()
            .filter(|option| option.required && option.count == 0 && option.default.is_none())
            .map(|option| option.long.clone());

        let missing: Vec<String> = flags.chain(options).collect();
        self.diagnostics
            .extend(missing.into_iter().map(Diagnostic::MissingRequired));
    }

    fn check_positional_counts(&mut self) {
        let last = self.registry.positional_count().saturating_sub(1);

        for (index, positional) in self.registry.positionals().enumerate() {
            let received = positional.values.len();
            let found = match index == last {
                true => received + self.overflow,
                false => received,
            };

            // An absent positional is reported once, as missing.
            if received == 0 {
                if positional.min > 0 && positional.default.is_none() {
                    self.diagnostics
                        .push(Diagnostic::MissingRequired(positional.name.clone()));
                }
            } else if received < positional.min {
                self.diagnostics.push(Diagnostic::TooFewValues {
                    name: positional.name.clone(),
                    min: positional.min,
                    found,
                });
            }

            if found > positional.max {
                self.diagnostics.push(Diagnostic::TooManyValues {
                    name: positional.name.clone(),
                    max: positional.max,
                    found,
                });
            }
        }
    }

    fn check_mutex_groups(&mut self) {
        for group in self.registry.groups() {
            let supplied: Vec<String> = group
                .members()
                .filter(|&id| self.registry.occurrences(id) > 0)
                .map(|id| self.registry.display_name(id).to_string())
                .collect();

            if supplied.len() > 1 {
                self.diagnostics.push(Diagnostic::MutuallyExclusive {
                    group: group.name.clone(),
                    supplied,
                });
            }
        }
    }

    /// Diagnostics from the last parse, in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn error_messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// How many times any spelling of the flag appeared. Unknown names and
    /// options count as zero.
    #[must_use]
    pub fn flag_count(&self, name: &str) -> usize {
        match self.registry.lookup(name) {
            Some(ArgumentId::Flag(index)) => self.registry.flag(index).count(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn flag_present(&self, name: &str) -> bool {
        self.flag_count(name) > 0
    }

    /// The option's raw value: the parsed token, else its default.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        match self.registry.lookup(name) {
            Some(ArgumentId::Option(index)) => self.registry.option(index).value(),
            _ => None,
        }
    }

    /// A positional's values joined by spaces, else its default.
    #[must_use]
    pub fn positional(&self, name: &str) -> Option<String> {
        self.registry.positional(name).and_then(PositionalDeclaration::value)
    }

    /// A positional's discrete values from the last parse.
    #[must_use]
    pub fn positional_values(&self, name: &str) -> &[String] {
        self.registry
            .positional(name)
            .map(PositionalDeclaration::values)
            .unwrap_or_default()
    }

    /// Positionals in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &PositionalDeclaration> {
        self.registry.positionals()
    }
}
