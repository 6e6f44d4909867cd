//! Deck surfaces lofted through the slice stations.

use mold_kernel::{GeometryKernel, ShapeHandle, Vector};
use mold_params::ConcaveStyle;
use tracing::{debug, instrument};

use crate::config::BuildConfig;
use crate::dims::MoldDims;
use crate::profile::{ProfileCurve, ProfileShape};
use crate::slices::SliceSet;
use crate::types::GeometryError;

/// The three parallel deck surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRole {
    /// Top of the male mold.
    Core,
    /// Bottom of the female mold, one mold gap above the core.
    Gap,
    /// Underside of the pressed veneer stack.
    Veneer,
}

impl SurfaceRole {
    pub const ALL: [SurfaceRole; 3] = [SurfaceRole::Core, SurfaceRole::Gap, SurfaceRole::Veneer];

    pub fn name(self) -> &'static str {
        match self {
            SurfaceRole::Core => "core",
            SurfaceRole::Gap => "gap",
            SurfaceRole::Veneer => "veneer",
        }
    }

    /// Generating radius and vertical offset of this role's profiles.
    pub fn radius_and_offset(self, dims: &MoldDims) -> (f64, f64) {
        match self {
            SurfaceRole::Core => (dims.concave_radius, 0.0),
            SurfaceRole::Gap => (dims.gap_radius, dims.mold_gap),
            SurfaceRole::Veneer => (dims.veneer_radius, -dims.veneer_thickness),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceTriplet {
    pub core: ShapeHandle,
    pub gap: ShapeHandle,
    pub veneer: ShapeHandle,
}

/// Build all three surfaces from one slice set. Any failure aborts.
pub fn build_surfaces(
    kernel: &mut dyn GeometryKernel,
    slices: &SliceSet,
    dims: &MoldDims,
    config: &BuildConfig,
) -> Result<SurfaceTriplet, GeometryError> {
    Ok(SurfaceTriplet {
        core: build_surface(kernel, slices, SurfaceRole::Core, dims, config)?,
        gap: build_surface(kernel, slices, SurfaceRole::Gap, dims, config)?,
        veneer: build_surface(kernel, slices, SurfaceRole::Veneer, dims, config)?,
    })
}

/// Loft one surface.
///
/// Organic decks are one smooth loft. Flat decks are lofted as tail kick,
/// ruled center and nose kick, then sewn together, which keeps the center
/// straight between stations. Fewer than five slices always loft organic.
#[instrument(skip(kernel, slices, dims, config), fields(slices = slices.slices.len()))]
pub fn build_surface(
    kernel: &mut dyn GeometryKernel,
    slices: &SliceSet,
    role: SurfaceRole,
    dims: &MoldDims,
    config: &BuildConfig,
) -> Result<ShapeHandle, GeometryError> {
    let (radius, offset) = role.radius_and_offset(dims);
    let sections = slices
        .slices
        .iter()
        .map(|s| {
            let shape = ProfileShape {
                width: dims.generating_width,
                radius,
                flat: s.flat,
                tub_width: dims.tub_width,
            };
            ProfileCurve::new(shape, config.flat_radius_threshold)?
                .placed(s.rotation, Vector::new(0.0, s.y, s.z + offset))
                .realize(kernel)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let loft_err = |e: mold_kernel::KernelError| GeometryError::DegenerateLoft {
        surface: role.name(),
        reason: e.to_string(),
    };

    let surface = if dims.concave_style == ConcaveStyle::Organic || sections.len() < 5 {
        debug!(role = role.name(), "organic loft");
        kernel.make_loft(&sections, false, false).map_err(loft_err)?
    } else {
        let tail = &sections[..=slices.split_tail];
        let center = &sections[slices.split_tail..=slices.split_nose];
        let nose = &sections[slices.split_nose..];
        let parts = [
            kernel.make_loft(tail, false, false).map_err(loft_err)?,
            kernel.make_loft(center, true, false).map_err(loft_err)?,
            kernel.make_loft(nose, false, false).map_err(loft_err)?,
        ];
        debug!(role = role.name(), "segmented loft");
        kernel.make_shell(&parts).map_err(loft_err)?
    };

    if kernel.is_null(&surface) {
        return Err(GeometryError::DegenerateLoft {
            surface: role.name(),
            reason: "empty surface".into(),
        });
    }
    Ok(surface)
}
