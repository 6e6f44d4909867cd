//! JSON-file preset and shape-template libraries.
//!
//! Each library is one file holding a flat object of name → field map. Reads
//! never fail: a missing or corrupt file is an empty library. Writes rewrite
//! the whole file.

pub mod errors;
pub mod load;
pub mod save;

use std::path::{Path, PathBuf};

use mold_params::{
    capture_preset, ParameterSet, PresetData, PresetSource, CUSTOM, TAPER_START_KEY,
};
use serde_json::Value;
use tracing::info;

pub use errors::StoreError;
pub use load::{parse_library, read_library, Library};
pub use save::{normalize_name, render_library, write_library};

/// One library file and its current contents.
#[derive(Debug, Clone)]
pub struct JsonLibrary {
    path: PathBuf,
    entries: Library,
}

impl JsonLibrary {
    /// Open (or start) the library at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_library(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, picking up changes made by other writers.
    pub fn reload(&mut self) {
        self.entries = read_library(&self.path);
    }

    /// Store the preset subset of `params` under `name`. Returns the stored name.
    pub fn save_preset(&mut self, name: &str, params: &ParameterSet) -> Result<String, StoreError> {
        self.save(name, capture_preset(params))
    }

    /// Store a shape template holding only the taper start.
    pub fn save_shape(&mut self, name: &str, taper_start: f64) -> Result<String, StoreError> {
        let mut data = PresetData::new();
        data.insert(TAPER_START_KEY.to_string(), Value::from(taper_start));
        self.save(name, data)
    }

    pub fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        if self.entries.remove(name).is_none() {
            return Err(StoreError::NotFound {
                name: name.to_string(),
            });
        }
        write_library(&self.path, &self.entries)?;
        info!(name, path = %self.path.display(), "library entry deleted");
        Ok(())
    }

    fn save(&mut self, name: &str, data: PresetData) -> Result<String, StoreError> {
        let stored = normalize_name(name)?;
        let previous = self.entries.insert(stored.clone(), data);
        if let Err(e) = write_library(&self.path, &self.entries) {
            match previous {
                Some(old) => self.entries.insert(stored, old),
                None => self.entries.remove(&stored),
            };
            return Err(e);
        }
        info!(name = %stored, path = %self.path.display(), "library entry saved");
        Ok(stored)
    }
}

impl PresetSource for JsonLibrary {
    fn list_names(&self) -> Vec<String> {
        self.entries
            .keys()
            .filter(|name| name.as_str() != CUSTOM)
            .cloned()
            .collect()
    }

    fn load(&self, name: &str) -> Option<PresetData> {
        self.entries.get(name).cloned()
    }
}
