//! Cross-section, loft and boolean pipeline for fingerboard molds.
//!
//! [`build_variant`] runs one full recompute: derive dimensions, sample the
//! slice stations, loft the three deck surfaces and assemble the requested
//! variant. Every step returns an explicit error; nothing here panics on bad
//! geometry.

pub mod assemble;
pub mod config;
pub mod dims;
pub mod features;
pub mod kick;
pub mod loft;
pub mod outline;
pub mod profile;
pub mod slices;
pub mod types;

use mold_kernel::GeometryKernel;
use mold_params::{MoldVariant, ParameterSet};
use tracing::{info, instrument};

pub use assemble::{assemble, Cutters};
pub use config::{BuildConfig, SideLockConfig};
pub use dims::MoldDims;
pub use kick::{sample_kick, KickProfile, KickSample};
pub use loft::{build_surface, build_surfaces, SurfaceRole, SurfaceTriplet};
pub use outline::{build_outline_face, OutlinePlan};
pub use profile::{ProfileCurve, ProfileSegment, ProfileShape};
pub use slices::{Slice, SliceSet};
pub use types::*;

/// Build the solid for `variant` from a parameter snapshot.
#[instrument(skip(kernel, params, config))]
pub fn build_variant(
    kernel: &mut dyn GeometryKernel,
    params: &ParameterSet,
    variant: MoldVariant,
    config: &BuildConfig,
) -> Result<BuildOutput, GeometryError> {
    let dims = MoldDims::derive(params, config)?;
    let slices = SliceSet::build(&dims, config);
    let surfaces = build_surfaces(kernel, &slices, &dims, config)?;
    let cutters = Cutters::build(kernel, &surfaces, &dims, config)?;
    let solid = assemble(kernel, variant, &dims, config, &cutters)?;
    info!(slices = slices.slices.len(), "mold rebuilt");
    Ok(BuildOutput {
        solid,
        info: dims.info(),
    })
}
