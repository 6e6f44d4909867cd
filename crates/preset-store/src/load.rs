use std::collections::BTreeMap;
use std::path::Path;

use mold_params::PresetData;
use serde_json::{Map, Value};
use tracing::warn;

use crate::errors::StoreError;

/// All entries of one library file, by name.
pub type Library = BTreeMap<String, PresetData>;

/// Parse a library from a JSON string: a flat object of name → field map.
///
/// Entries whose value is not an object are skipped with a warning; their
/// siblings are kept.
pub fn parse_library(json: &str) -> Result<Library, StoreError> {
    let raw: Map<String, Value> =
        serde_json::from_str(json).map_err(|e| StoreError::ParseError(e.to_string()))?;
    let mut lib = Library::new();
    for (name, value) in raw {
        match value {
            Value::Object(fields) => {
                lib.insert(name, fields.into_iter().collect());
            }
            other => {
                warn!(name = %name, value = %other, "skipping malformed library entry");
            }
        }
    }
    Ok(lib)
}

/// Read a library file. A missing or unreadable file reads as empty.
pub fn read_library(path: &Path) -> Library {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Library::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preset library unreadable, using empty");
            return Library::new();
        }
    };
    match parse_library(&text) {
        Ok(lib) => lib,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preset library corrupt, using empty");
            Library::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_maps() {
        let lib = parse_library(r#"{"PRO": {"Wheelbase": 46.0}, "KID": {}}"#).unwrap();
        assert_eq!(lib.len(), 2);
        assert_eq!(lib["PRO"]["Wheelbase"], 46.0);
    }

    #[test]
    fn skips_non_object_entries() {
        let lib = parse_library(r#"{"PRO": {"Wheelbase": 46.0}, "BAD": 3, "ALSO": [1]}"#).unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib["PRO"]["Wheelbase"], 46.0);
    }

    #[test]
    fn rejects_non_object_files() {
        assert!(matches!(parse_library("[1, 2]"), Err(StoreError::ParseError(_))));
        assert!(parse_library("[").is_err());
    }

    #[test]
    fn missing_file_is_empty() {
        let lib = read_library(Path::new("/definitely/not/here/presets.json"));
        assert!(lib.is_empty());
    }
}
