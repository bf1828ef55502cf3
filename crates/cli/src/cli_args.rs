//! Command-line argument parsing for the `argot` binary.
//!
//! The binary's own options are handled with `clap`; the argument vector
//! after `--` is handed untouched to the parser built from the manifest.

use argot_core::help::HelpStyle;
use clap::{Parser, ValueEnum};

/// Help layout names accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HelpStyleArg {
    #[default]
    Flat,
    SimpleGrouped,
    ComplexGrouped,
}

impl From<HelpStyleArg> for HelpStyle {
    fn from(value: HelpStyleArg) -> Self {
        match value {
            HelpStyleArg::Flat => HelpStyle::Flat,
            HelpStyleArg::SimpleGrouped => HelpStyle::SimpleGrouped,
            HelpStyleArg::ComplexGrouped => HelpStyle::ComplexGrouped,
        }
    }
}

/// Command-line arguments for the argot CLI tool.
///
/// Loads a declaration manifest and parses an argument vector against it,
/// printing either the parsed values or every problem found.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use argot_cli::cli_args::Args;
///
/// let args = Args::parse_from(["argot", "-d", "defs.yml", "--", "-v", "input.txt"]);
/// assert_eq!(args.arguments, vec!["-v", "input.txt"]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the declaration manifest YAML.
    ///
    /// If not provided, defaults to `~/.argot/definitions.yml`.
    #[arg(long, short = 'd')]
    pub definitions: Option<String>,

    /// Layout used when rendering help for the manifest.
    #[arg(long, short = 's', value_enum, default_value_t = HelpStyleArg::Flat)]
    pub help_style: HelpStyleArg,

    /// Render help for the declared arguments instead of parsing.
    #[arg(long, short = 'H', action)]
    pub show_help: bool,

    /// The argument vector to parse, given after `--`.
    ///
    /// # Examples
    /// ```bash
    /// argot -d convert.yml -- --count 3 -v a.txt b.txt
    /// ```
    #[arg(last = true)]
    pub arguments: Vec<String>,
}
