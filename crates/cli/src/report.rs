//! Printing parse results and diagnostics.

use std::io::Write;

use argot_core::declarations::{OptionDeclaration, ValueType};
use argot_core::diagnostics::Diagnostic;
use argot_core::error::Result;
use argot_core::parser::Parser;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetForegroundColor};
use itertools::Itertools;

use crate::suggestions::suggest;

/// Writes every diagnostic on its own line, highlighted, with a suggestion
/// for unknown arguments when a close spelling exists.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_diagnostics<W: Write>(out: &mut W, parser: &Parser) -> Result<()> {
    for diagnostic in parser.errors() {
        queue!(
            out,
            SetForegroundColor(Color::Red),
            SetAttribute(Attribute::Bold),
            Print("error: "),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Color::Reset),
            Print(diagnostic),
        )?;

        if let Diagnostic::UnknownArgument(spelling) = diagnostic {
            if let Some(suggestion) = suggest(spelling, parser.registry().spellings()) {
                queue!(
                    out,
                    SetForegroundColor(Color::Yellow),
                    Print(format!(" (did you mean `{suggestion}`?)")),
                    SetForegroundColor(Color::Reset),
                )?;
            }
        }

        queue!(out, Print("\n"))?;
    }

    out.flush()?;
    Ok(())
}

fn typed_read(parser: &Parser, option: &OptionDeclaration) -> Option<String> {
    let read = match option.value_type {
        ValueType::String => return None,
        ValueType::Int => parser.option_int(&option.long).map(|v| v.to_string()),
        ValueType::Float => parser.option_float(&option.long).map(|v| v.to_string()),
        ValueType::Bool => parser.option_bool(&option.long).map(|v| v.to_string()),
    };

    Some(match read {
        Ok(value) => format!("{}: {value}", option.value_type),
        Err(e) => format!("{}: {e}", option.value_type),
    })
}

/// Writes the value of every declared argument after a successful parse.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn write_report<W: Write>(out: &mut W, parser: &Parser) -> Result<()> {
    let registry = parser.registry();

    let mut flags = registry.flags().peekable();
    if flags.peek().is_some() {
        writeln!(out, "Flags:")?;
        for flag in flags {
            writeln!(out, "  {}: {}", flag.display_name(), flag.count())?;
        }
    }

    let mut options = registry.options().peekable();
    if options.peek().is_some() {
        writeln!(out, "Options:")?;
        for option in options {
            let value = option.value().unwrap_or("<unset>");
            match typed_read(parser, option) {
                Some(typed) => writeln!(out, "  {} = {value} ({typed})", option.long)?,
                None => writeln!(out, "  {} = {value}", option.long)?,
            }
        }
    }

    let mut positionals = parser.positionals().peekable();
    if positionals.peek().is_some() {
        writeln!(out, "Positionals:")?;
        for positional in positionals {
            let value = positional.value().unwrap_or_else(|| "<unset>".to_string());
            let values = positional.values().iter().map(|v| format!("`{v}`")).join(", ");
            writeln!(out, "  {} = {value} [{values}]", positional.name)?;
        }
    }

    out.flush()?;
    Ok(())
}
