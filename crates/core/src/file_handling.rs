//! Reading declaration manifests from disk.

use std::fs::File;

use log::debug;

use crate::definitions::ParserDefinition;
use crate::error::{Error, Result};
use crate::parser::Parser;

fn get_reader(file_description: &str, path: &str) -> Result<File> {
    File::open(path)
        .map_err(|e| Error::io_error(file_description.to_string(), path.to_string(), e))
}

/// Loads a declaration manifest from a YAML file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be read
/// - The YAML is malformed or doesn't match the manifest structure
///
/// # Examples
///
/// ```no_run
/// use argot_core::file_handling::get_parser_definition;
///
/// let definition = get_parser_definition("~/.argot/definitions.yml")?;
/// println!("Loaded declarations for {}", definition.program);
/// # Ok::<(), argot_core::error::Error>(())
/// ```
pub fn get_parser_definition(path: &str) -> Result<ParserDefinition> {
    let reader = get_reader("definitions", path)?;

    let definition: ParserDefinition = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "definitions".to_string(),
            path.to_string(),
            e,
        )
    })?;

    debug!(
        "Loaded {} flags, {} options, {} positionals from `{}`",
        definition.flags.len(),
        definition.options.len(),
        definition.positionals.len(),
        path
    );

    Ok(definition)
}

/// Loads a manifest and declares its arguments on a new [`Parser`].
///
/// # Errors
///
/// Returns an error if the manifest cannot be read or one of its
/// declarations is rejected.
pub fn load_parser(path: &str) -> Result<Parser> {
    get_parser_definition(path)?.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_manifest(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{content}").unwrap();
        temp_file
    }

    #[test]
    fn test_get_parser_definition_valid_yaml() {
        let temp_file = write_manifest(
            r#"
program: "greet"
flags:
  - short: "-l"
    long: "--loud"
"#,
        );

        let definition = get_parser_definition(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(definition.program, "greet");
        assert_eq!(definition.flags.len(), 1);
        assert!(definition.options.is_empty());
    }

    #[test]
    fn test_get_parser_definition_invalid_yaml() {
        let temp_file = write_manifest("invalid: yaml: content: [");
        let result = get_parser_definition(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_parser_definition_missing_program() {
        let temp_file = write_manifest("flags: []");
        let result = get_parser_definition(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_parser_definition_file_not_found() {
        let result = get_parser_definition("/this/path/does/not/exist.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_parser_rejects_duplicates() {
        let temp_file = write_manifest(
            r#"
program: "dup"
flags:
  - short: "-x"
options:
  - long: "--extra"
    short: "-x"
"#,
        );

        let result = load_parser(temp_file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::DuplicateName(name)) if name == "-x"));
    }
}
