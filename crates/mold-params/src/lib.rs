//! Typed parameter store and constraint propagation for fingerboard molds.

pub mod bounds;
pub mod presets;
pub mod propagate;
pub mod set;
pub mod types;

pub use presets::{
    capture_preset, select_preset, select_shape, MemorySource, PresetData, PresetSource,
    PRESET_FIELDS, TAPER_START_KEY,
};
pub use propagate::{is_consistent, normalize, write};
pub use set::ParameterSet;
pub use types::*;
