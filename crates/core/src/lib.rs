//! Argot Core Library
//!
//! This crate provides a declarative command-line argument parser. Programs
//! declare flags, options, and positional arguments, parse an argument vector
//! in a single pass, and then read typed values plus a list of every problem
//! found in the input.
//!
//! # Key Features
//!
//! - **Declarations**: Flags, typed options with bounds, positional ranges
//! - **Aliases**: Short and long spellings share one record
//! - **Diagnostics**: All input problems collected, never fail-fast
//! - **Typed Access**: Int, float and bool reads validated at read time
//! - **Help Rendering**: Flat and grouped layouts with word wrapping
//! - **Manifests**: Declarations loaded from YAML files
//!
//! # Examples
//!
//! ```
//! use argot_core::declarations::{FlagDeclaration, OptionDeclaration, PositionalDeclaration};
//! use argot_core::help::HelpStyle;
//! use argot_core::parser::Parser;
//!
//! let mut parser = Parser::new("convert");
//! parser.add_flag(FlagDeclaration::new("-v").long("--verbose").help("Print more output"))?;
//! parser.add_option(OptionDeclaration::new("--ratio").float_range(0.0, 1.0).default("0.5"))?;
//! parser.add_positional(PositionalDeclaration::new("files").range(1, 3))?;
//!
//! let errors = parser.parse(["-v", "a.txt", "b.txt"]);
//! assert!(errors.is_empty());
//! assert_eq!(parser.option_float("--ratio"), Ok(0.5));
//! assert_eq!(parser.positional("files"), Some("a.txt b.txt".to_string()));
//!
//! println!("{}", parser.render_help(HelpStyle::Flat));
//! # Ok::<(), argot_core::error::Error>(())
//! ```

pub mod accessors;
pub mod config;
pub mod declarations;
pub mod definitions;
pub mod diagnostics;
pub mod error;
pub mod file_handling;
pub mod help;
pub mod parser;
pub mod registry;
