//! Configuration constants and path utilities for argot.
//!
//! This module provides the default location of the declaration manifest,
//! shell expansion of user supplied paths, and the help layout constants.

/// Default path for the declaration manifest
const DEFAULT_DEFINITIONS_PATH: &str = "~/.argot/definitions.yml";

/// Column at which help text starts
pub const HELP_INDENT: usize = 28;

/// Maximum width of help text after the indent
pub const HELP_WRAP_WIDTH: usize = 50;

/// Resolves the declaration manifest path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the default
/// manifest path. Shell expansions like `~` are resolved.
///
/// # Examples
///
/// ```
/// use argot_core::config::get_definitions_path;
///
/// let default_path = get_definitions_path(None);
/// let custom_path = get_definitions_path(Some("/path/to/definitions.yml"));
/// assert_eq!(custom_path, "/path/to/definitions.yml");
/// ```
#[must_use]
pub fn get_definitions_path(definitions_path_arg: Option<&str>) -> String {
    let definitions_path = definitions_path_arg.unwrap_or(DEFAULT_DEFINITIONS_PATH);

    shellexpand::tilde(definitions_path).to_string()
}
