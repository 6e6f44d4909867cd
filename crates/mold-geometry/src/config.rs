//! Geometry constants for the mold build pipeline.

use serde::{Deserialize, Serialize};

/// Interlock boss/pocket sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideLockConfig {
    /// How far a lock sticks out past each end of the mold.
    pub extension: f64,
    /// Clearance between boss and pocket.
    pub tolerance: f64,
    /// Overlap into the mold body so the fuse is not tangent.
    pub overlap: f64,
    /// Added to the male height to get the pentagon's apex height.
    pub clearance: f64,
}

impl Default for SideLockConfig {
    fn default() -> Self {
        Self {
            extension: 6.0,
            tolerance: 0.05,
            overlap: 0.1,
            clearance: 5.0,
        }
    }
}

/// Every tunable constant of the build pipeline. Lengths in millimetres,
/// angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// The deck surfaces run this far past each end of the mold.
    pub overrun_margin: f64,
    /// Length of cutter extrusions and half-length of drill cylinders.
    pub extrusion_limit: f64,
    /// Samples per kick, not counting the start sample.
    pub kick_steps: usize,
    /// Concave radii above this are built as straight profiles.
    pub flat_radius_threshold: f64,
    /// Radius used for a deck without concave.
    pub flat_concave_radius: f64,
    /// Gap and veneer radii are only offset below this concave radius.
    pub offset_radius_limit: f64,
    /// Kick radius used when the kick angle is effectively zero.
    pub flat_kick_radius: f64,
    pub kick_radius_min: f64,
    pub kick_radius_max: f64,
    /// Profiles are this much wider than the core block.
    pub generating_width_margin: f64,
    /// Floor for the concave length so the flat-center slices never coincide.
    pub min_concave_length: f64,
    /// Distance of the extra flat-center slices from each kick start.
    pub flat_slice_offset: f64,
    /// Slack on the concave zone edge when deciding to flatten a slice.
    pub concave_edge_tolerance: f64,
    /// Slices rotated by more than this are flattened.
    pub kick_rotation_tolerance: f64,
    pub fillet_radius: f64,
    pub side_lock: SideLockConfig,
    /// Half width of the blunt nose and tail tips of the outline.
    pub tip_half_width: f64,
    /// Distance of the end guide pins from the mold ends.
    pub guide_inset: f64,
    /// Height of the board top above datum for the shaper template.
    pub board_top_datum: f64,
    pub shaper_block_depth: f64,
    /// The preview slab overhangs the core and the mold length by this much.
    pub preview_margin: f64,
    /// Height of the preview slab and of the cookie-cutter extrusion.
    pub preview_height: f64,
    /// Headroom above the deck surface for the male core block.
    pub safe_bound_margin: f64,
    /// Female core block starts this far below the deck surface.
    pub female_core_margin: f64,
    /// Edge length of the fallback cube.
    pub sentinel_size: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            overrun_margin: 4.0,
            extrusion_limit: 100.0,
            kick_steps: 5,
            flat_radius_threshold: 50_000.0,
            flat_concave_radius: 100_000.0,
            offset_radius_limit: 5_000.0,
            flat_kick_radius: 500.0,
            kick_radius_min: 2.0,
            kick_radius_max: 1000.0,
            generating_width_margin: 5.0,
            min_concave_length: 0.1,
            flat_slice_offset: 0.1,
            concave_edge_tolerance: 0.01,
            kick_rotation_tolerance: 0.1,
            fillet_radius: 10.0,
            side_lock: SideLockConfig::default(),
            tip_half_width: 0.1,
            guide_inset: 10.0,
            board_top_datum: 5.0,
            shaper_block_depth: 100.0,
            preview_margin: 50.0,
            preview_height: 100.0,
            safe_bound_margin: 50.0,
            female_core_margin: 5.0,
            sentinel_size: 20.0,
        }
    }
}

impl BuildConfig {
    /// Load a partial override. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
