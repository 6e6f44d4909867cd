use std::path::Path;

use mold_params::CUSTOM;

use crate::errors::StoreError;
use crate::load::Library;

/// Stored form of a user-typed name: trimmed and upper-cased.
pub fn normalize_name(name: &str) -> Result<String, StoreError> {
    let stored = name.trim().to_uppercase();
    if stored.is_empty() || stored.eq_ignore_ascii_case(CUSTOM) {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(stored)
}

/// Serialize a library to pretty-printed JSON.
pub fn render_library(lib: &Library) -> Result<String, StoreError> {
    serde_json::to_string_pretty(lib).map_err(|e| StoreError::ParseError(e.to_string()))
}

/// Rewrite the whole library file, creating its directory if needed.
pub fn write_library(path: &Path, lib: &Library) -> Result<(), StoreError> {
    let io = |e: std::io::Error| StoreError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(io)?;
    }
    std::fs::write(path, render_library(lib)?).map_err(io)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_upper_cased() {
        assert_eq!(normalize_name("  street pro ").unwrap(), "STREET PRO");
    }

    #[test]
    fn custom_and_blank_are_reserved() {
        assert!(normalize_name("custom").is_err());
        assert!(normalize_name("   ").is_err());
    }
}
