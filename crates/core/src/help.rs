//! Help text rendering.
//!
//! Rendering reads declarations only, never parse results, so help can be
//! shown before or after [`Parser::parse`](crate::parser::Parser::parse).

use std::io::Write;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::config::{HELP_INDENT, HELP_WRAP_WIDTH};
use crate::declarations::{ArgumentId, FlagDeclaration, OptionDeclaration, PositionalDeclaration};
use crate::parser::Parser;
use crate::registry::Registry;

const UNGROUPED: &str = "(ungrouped)";

/// Layout of the rendered help.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HelpStyle {
    /// Flags, options and positionals in one section each.
    #[default]
    Flat,
    /// One section per display group, unassigned entries last.
    SimpleGrouped,
    /// Like [`HelpStyle::SimpleGrouped`], with mutex group members nested
    /// under their group inside each section.
    ComplexGrouped,
}

#[derive(Debug, Clone, Copy)]
enum Entry<'a> {
    Flag(usize, &'a FlagDeclaration),
    Option(usize, &'a OptionDeclaration),
}

impl<'a> Entry<'a> {
    fn id(&self) -> ArgumentId {
        match self {
            Entry::Flag(index, _) => ArgumentId::Flag(*index),
            Entry::Option(index, _) => ArgumentId::Option(*index),
        }
    }

    fn group(&self) -> Option<&'a str> {
        match *self {
            Entry::Flag(_, flag) => flag.group.as_deref(),
            Entry::Option(_, option) => option.group.as_deref(),
        }
    }

    fn render(&self, lines: &mut Vec<String>, indent: usize) {
        match self {
            Entry::Flag(_, flag) => push_entry(lines, indent, &flag_label(flag), &flag_help(flag)),
            Entry::Option(_, option) => {
                push_entry(lines, indent, &option_label(option), &option_help(option));
            }
        }
    }
}

/// Greedy word wrap on whitespace. Words longer than `width` get a line of
/// their own.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn metavar(option: &OptionDeclaration) -> String {
    option.value_type.to_string().to_uppercase()
}

fn flag_label(flag: &FlagDeclaration) -> String {
    match &flag.long {
        Some(long) => format!("{}, {}", flag.short, long),
        None => flag.short.clone(),
    }
}

fn option_label(option: &OptionDeclaration) -> String {
    match &option.short {
        Some(short) => format!("{short}, {} <{}>", option.long, metavar(option)),
        None => format!("    {} <{}>", option.long, metavar(option)),
    }
}

fn positional_label(positional: &PositionalDeclaration) -> String {
    match positional.max > 1 {
        true => format!("{}...", positional.name),
        false => positional.name.clone(),
    }
}

fn flag_help(flag: &FlagDeclaration) -> String {
    let required = flag.required.then(|| "[required]".to_string());
    [Some(flag.help.clone()), required]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .join(" ")
}

fn option_help(option: &OptionDeclaration) -> String {
    let required = option.required.then(|| "[required]".to_string());
    let default = option
        .default
        .as_ref()
        .map(|default| format!("(default: {default})"));
    let bounds = option.bounds.map(|bounds| format!("(range: {bounds})"));

    [Some(option.help.clone()), required, default, bounds]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .join(" ")
}

fn positional_help(positional: &PositionalDeclaration) -> String {
    let required = (positional.is_required() && positional.default.is_none())
        .then(|| "[required]".to_string());
    let default = positional
        .default
        .as_ref()
        .map(|default| format!("(default: {default})"));
    let count = (positional.min != 1 || positional.max != 1)
        .then(|| format!("(takes {}..{} values)", positional.min, positional.max));

    [Some(positional.help.clone()), required, default, count]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .join(" ")
}

fn push_entry(lines: &mut Vec<String>, indent: usize, label: &str, help: &str) {
    let prefix = format!("{:indent$}{label}", "");
    let wrapped = wrap_text(help, HELP_WRAP_WIDTH);
    let mut wrapped = wrapped.into_iter();

    // Labels that run into the help column push the help to the next line.
    if prefix.chars().count() + 2 > HELP_INDENT {
        lines.push(prefix);
    } else {
        match wrapped.next() {
            Some(first) => lines.push(format!("{prefix:<width$}{first}", width = HELP_INDENT)),
            None => lines.push(prefix),
        }
    }

    for line in wrapped {
        lines.push(format!("{:width$}{line}", "", width = HELP_INDENT));
    }
}

fn usage_line(parser: &Parser) -> String {
    let registry = parser.registry();

    let flags = registry.flags().map(|flag| match flag.required {
        true => flag.short.clone(),
        false => format!("[{}]", flag.short),
    });

    let options = registry.options().map(|option| {
        let body = format!("{} <{}>", option.long, metavar(option));
        match option.required && option.default.is_none() {
            true => body,
            false => format!("[{body}]"),
        }
    });

    let positionals = registry.positionals().map(|positional| {
        let body = match positional.max > 1 {
            true => format!("<{}>...", positional.name),
            false => format!("<{}>", positional.name),
        };
        match positional.is_required() && positional.default.is_none() {
            true => body,
            false => format!("[{body}]"),
        }
    });

    std::iter::once(format!("Usage: {}", parser.program()))
        .chain(flags)
        .chain(options)
        .chain(positionals)
        .join(" ")
}

fn entries(registry: &Registry) -> Vec<Entry<'_>> {
    let flags = registry
        .flags()
        .enumerate()
        .map(|(index, flag)| Entry::Flag(index, flag));
    let options = registry
        .options()
        .enumerate()
        .map(|(index, option)| Entry::Option(index, option));

    flags.chain(options).collect()
}

fn render_flat(registry: &Registry, lines: &mut Vec<String>) {
    let (flags, options): (Vec<Entry>, Vec<Entry>) = entries(registry)
        .into_iter()
        .partition(|entry| matches!(entry, Entry::Flag(..)));

    for (heading, section) in [("Flags:", flags), ("Options:", options)] {
        if section.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.to_string());
        for entry in section {
            entry.render(lines, 2);
        }
    }
}

fn render_grouped(registry: &Registry, lines: &mut Vec<String>, nest_mutex_groups: bool) {
    let mut sections: IndexMap<&str, Vec<Entry>> = IndexMap::new();
    let mut ungrouped = Vec::new();

    for entry in entries(registry) {
        match entry.group() {
            Some(group) => sections.entry(group).or_default().push(entry),
            None => ungrouped.push(entry),
        }
    }

    if !ungrouped.is_empty() {
        sections.entry(UNGROUPED).or_default().extend(ungrouped);
    }

    for (heading, section) in sections {
        lines.push(String::new());
        lines.push(format!("{heading}:"));

        if !nest_mutex_groups {
            for entry in &section {
                entry.render(lines, 2);
            }
            continue;
        }

        let (exclusive, free): (Vec<Entry>, Vec<Entry>) = section
            .into_iter()
            .partition(|entry| registry.group_of(entry.id()).is_some());

        for entry in &free {
            entry.render(lines, 2);
        }

        for group in registry.groups() {
            let members = exclusive
                .iter()
                .filter(|entry| registry.group_of(entry.id()).map(|g| &g.name) == Some(&group.name))
                .collect_vec();
            if members.is_empty() {
                continue;
            }
            lines.push(format!("  one of {}:", group.name));
            for entry in members {
                entry.render(lines, 4);
            }
        }
    }
}

fn render_positionals(registry: &Registry, lines: &mut Vec<String>) {
    if registry.positional_count() == 0 {
        return;
    }

    lines.push(String::new());
    lines.push("Positional arguments:".to_string());
    for positional in registry.positionals() {
        push_entry(
            lines,
            2,
            &positional_label(positional),
            &positional_help(positional),
        );
    }
}

fn render_group_summary(registry: &Registry, lines: &mut Vec<String>) {
    let mut groups = registry.groups().peekable();
    if groups.peek().is_none() {
        return;
    }

    lines.push(String::new());
    lines.push("Mutually exclusive groups:".to_string());
    for group in groups {
        let members = group
            .members()
            .map(|id| registry.display_name(id))
            .join(" | ");
        lines.push(format!("  {}: {members}", group.name));
    }
}

impl Parser {
    /// Renders the help text in the given style.
    #[must_use]
    pub fn render_help(&self, style: HelpStyle) -> String {
        let registry = self.registry();
        let mut lines = vec![usage_line(self)];

        if let Some(description) = self.about() {
            lines.push(String::new());
            lines.extend(wrap_text(description, HELP_INDENT + HELP_WRAP_WIDTH));
        }

        match style {
            HelpStyle::Flat => render_flat(registry, &mut lines),
            HelpStyle::SimpleGrouped => render_grouped(registry, &mut lines, false),
            HelpStyle::ComplexGrouped => render_grouped(registry, &mut lines, true),
        }

        render_positionals(registry, &mut lines);

        if style == HelpStyle::ComplexGrouped {
            render_group_summary(registry, &mut lines);
        }

        lines.into_iter().map(|line| line + "\n").collect()
    }

    /// Writes the help text to `out`, typically stdout or stderr.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer.
    pub fn write_help<W: Write>(&self, out: &mut W, style: HelpStyle) -> std::io::Result<()> {
        out.write_all(self.render_help(style).as_bytes())?;
        out.flush()
    }
}
