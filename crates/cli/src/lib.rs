//! Argot CLI Library
//!
//! This crate provides the `argot` binary, a consumer of `argot-core` that
//! loads a declaration manifest, parses an argument vector against it, and
//! reports the result. It is useful for trying out declarations before
//! embedding them in a program.
//!
//! # Architecture
//!
//! - [`cli_args`]: The binary's own command-line options
//! - [`report`]: Printing parsed values and highlighted diagnostics
//! - [`suggestions`]: Fuzzy "did you mean" lookups for unknown arguments
//!
//! # Examples
//!
//! ```bash
//! # Parse an argument vector against a manifest
//! argot -d convert.yml -- --count 3 -v a.txt b.txt
//!
//! # Render help for the manifest, grouped by section
//! argot -d convert.yml --show-help --help-style simple-grouped
//! ```

pub mod cli_args;
pub mod report;
pub mod suggestions;
