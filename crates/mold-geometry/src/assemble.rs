//! Variant assembly: turn the deck surfaces into the requested solid.

use mold_kernel::primitives::make_rounded_box;
use mold_kernel::{BoundingBox, GeometryKernel, Point, ShapeHandle, Vector};
use mold_params::MoldVariant;
use tracing::{debug, instrument};

use crate::config::BuildConfig;
use crate::dims::MoldDims;
use crate::features::{build_drills, build_female_caps, build_fillet_fillers, build_male_locks};
use crate::loft::SurfaceTriplet;
use crate::outline::build_outline_face;
use crate::types::{ensure_valid, GeometryError};

/// Shared inputs of every variant branch.
#[derive(Debug, Clone)]
pub struct Cutters {
    /// Core surface swept up. Carves the male deck.
    pub up: ShapeHandle,
    /// Gap surface swept down. Carves the female deck.
    pub gap_down: ShapeHandle,
    /// Veneer surface swept down. Underside of the board.
    pub veneer_down: ShapeHandle,
    pub drills: ShapeHandle,
    /// Extent of the core surface.
    pub core_bounds: BoundingBox,
}

impl Cutters {
    pub fn build(
        kernel: &mut dyn GeometryKernel,
        surfaces: &SurfaceTriplet,
        dims: &MoldDims,
        config: &BuildConfig,
    ) -> Result<Self, GeometryError> {
        let reach = config.extrusion_limit;
        let core_bounds = kernel.bounding_box(&surfaces.core)?;
        let up = kernel.extrude(&surfaces.core, Vector::new(0.0, 0.0, reach))?;
        let gap_down = kernel.extrude(&surfaces.gap, Vector::new(0.0, 0.0, -reach))?;
        let veneer_down = kernel.extrude(&surfaces.veneer, Vector::new(0.0, 0.0, -reach))?;
        Ok(Self {
            up: ensure_valid(kernel, up, "upper cutter")?,
            gap_down: ensure_valid(kernel, gap_down, "gap cutter")?,
            veneer_down: ensure_valid(kernel, veneer_down, "veneer cutter")?,
            drills: build_drills(kernel, dims, config)?,
            core_bounds,
        })
    }

    /// Height of a lock prism standing on `z_base` whose apex sits the lock
    /// clearance above the core surface. The male boss and the female pocket
    /// stand on different bases but share this apex.
    pub fn lock_height(&self, z_base: f64, config: &BuildConfig) -> f64 {
        self.core_bounds.max.z - z_base + config.side_lock.clearance
    }

    /// Floor of the female lock caps.
    fn cap_ground(&self) -> f64 {
        self.core_bounds.min.z
    }
}

fn male_bottom(dims: &MoldDims) -> f64 {
    -dims.core_height - dims.base_height
}

/// Build the solid for `variant`.
#[instrument(skip(kernel, dims, config, cutters))]
pub fn assemble(
    kernel: &mut dyn GeometryKernel,
    variant: MoldVariant,
    dims: &MoldDims,
    config: &BuildConfig,
    cutters: &Cutters,
) -> Result<ShapeHandle, GeometryError> {
    match variant {
        MoldVariant::MaleMold => male(kernel, dims, config, cutters),
        MoldVariant::FemaleMold => female(kernel, dims, config, cutters),
        MoldVariant::ShaperTemplate => shaper(kernel, dims, config, cutters),
        MoldVariant::BoardPreview => preview(kernel, dims, config, cutters),
    }
}

/// Rounded base block with its bottom at `z`. `None` for a zero-height base.
fn base_block(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    z: f64,
) -> Result<Option<ShapeHandle>, GeometryError> {
    if dims.base_height <= 0.0 {
        return Ok(None);
    }
    let block = make_rounded_box(
        kernel,
        dims.base_width,
        dims.mold_length,
        dims.base_height,
        dims.corner_radius,
    )?;
    let placed = kernel.translate(&block, Vector::new(0.0, 0.0, z))?;
    Ok(Some(ensure_valid(kernel, placed, "base block")?))
}

/// Core block spanning `[z_bottom, z_top]`.
fn core_block(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    z_bottom: f64,
    z_top: f64,
) -> Result<ShapeHandle, GeometryError> {
    let block = kernel.make_box(
        Point::new(-dims.core_width / 2.0, -dims.mold_length / 2.0, z_bottom),
        Vector::new(dims.core_width, dims.mold_length, z_top - z_bottom),
    )?;
    ensure_valid(kernel, block, "core block")
}

fn fuse_all(
    kernel: &mut dyn GeometryKernel,
    mut solid: ShapeHandle,
    parts: &[ShapeHandle],
    step: &'static str,
) -> Result<ShapeHandle, GeometryError> {
    for part in parts {
        let fused = kernel.fuse(&solid, part)?;
        solid = ensure_valid(kernel, fused, step)?;
    }
    Ok(solid)
}

fn cut_step(
    kernel: &mut dyn GeometryKernel,
    solid: &ShapeHandle,
    tool: &ShapeHandle,
    step: &'static str,
) -> Result<ShapeHandle, GeometryError> {
    let result = kernel.cut(solid, tool)?;
    ensure_valid(kernel, result, step)
}

fn male(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
    cutters: &Cutters,
) -> Result<ShapeHandle, GeometryError> {
    let z_bottom = male_bottom(dims);
    let z_top = cutters.core_bounds.max.z + config.safe_bound_margin;
    let mut body = core_block(kernel, dims, z_bottom, z_top)?;
    if dims.add_fillet {
        let fillers = build_fillet_fillers(
            kernel,
            dims,
            z_bottom + dims.base_height,
            config.fillet_radius,
            true,
        )?;
        body = fuse_all(kernel, body, &[fillers], "male fillets")?;
    }
    let mut male = cut_step(kernel, &body, &cutters.up, "male deck cut")?;
    if let Some(base) = base_block(kernel, dims, z_bottom)? {
        male = fuse_all(kernel, male, &[base], "male base")?;
    }
    male = cut_step(kernel, &male, &cutters.drills, "male drills")?;

    if dims.side_locks {
        let height = cutters.lock_height(z_bottom, config);
        debug!(height, "adding male side locks");
        let locks = build_male_locks(kernel, dims, config, height, z_bottom)?;
        male = fuse_all(kernel, male, &locks, "male side locks")?;
    }
    Ok(male)
}

fn female(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
    cutters: &Cutters,
) -> Result<ShapeHandle, GeometryError> {
    let z_top = dims.core_height + 2.0 * dims.base_height + dims.mold_gap;
    let base_z = z_top - dims.base_height;
    let z_bottom = cutters.core_bounds.min.z - config.female_core_margin;
    let mut body = core_block(kernel, dims, z_bottom, z_top)?;
    if dims.add_fillet {
        let fillers = build_fillet_fillers(kernel, dims, base_z, config.fillet_radius, false)?;
        body = fuse_all(kernel, body, &[fillers], "female fillets")?;
    }
    let mut female = cut_step(kernel, &body, &cutters.gap_down, "female deck cut")?;
    if let Some(base) = base_block(kernel, dims, base_z)? {
        female = fuse_all(kernel, female, &[base], "female base")?;
    }
    female = cut_step(kernel, &female, &cutters.drills, "female drills")?;

    if dims.side_locks {
        let ground = cutters.cap_ground();
        let height = cutters.lock_height(ground, config);
        debug!(height, "adding female side lock caps");
        let caps = build_female_caps(kernel, dims, config, height, z_top - ground, ground)?;
        female = fuse_all(kernel, female, &caps, "female side locks")?;
    }
    Ok(female)
}

fn shaper(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
    cutters: &Cutters,
) -> Result<ShapeHandle, GeometryError> {
    let face = build_outline_face(kernel, dims, config)?;
    let block = kernel.extrude(&face, Vector::new(0.0, 0.0, -config.shaper_block_depth))?;
    let block = kernel.translate(
        &block,
        Vector::new(0.0, 0.0, config.board_top_datum + dims.shaper_height),
    )?;
    let block = ensure_valid(kernel, block, "shaper block")?;
    let shaped = cut_step(kernel, &block, &cutters.veneer_down, "shaper deck cut")?;
    cut_step(kernel, &shaped, &cutters.drills, "shaper drills")
}

fn preview(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
    cutters: &Cutters,
) -> Result<ShapeHandle, GeometryError> {
    let width = dims.core_width + config.preview_margin;
    let length = dims.mold_length + config.preview_margin;
    let height = config.preview_height;
    let slab = kernel.make_box(
        Point::new(-width / 2.0, -length / 2.0, -height / 2.0),
        Vector::new(width, length, height),
    )?;
    let slab = ensure_valid(kernel, slab, "preview slab")?;
    let pressed = cut_step(kernel, &slab, &cutters.up, "preview top cut")?;
    let pressed = cut_step(kernel, &pressed, &cutters.veneer_down, "preview bottom cut")?;

    let face = build_outline_face(kernel, dims, config)?;
    let cookie = kernel.extrude(&face, Vector::new(0.0, 0.0, height))?;
    let cookie = kernel.translate(&cookie, Vector::new(0.0, 0.0, -height / 2.0))?;
    let cookie = ensure_valid(kernel, cookie, "outline cutter")?;
    let board = kernel.common(&pressed, &cookie)?;
    let board = ensure_valid(kernel, board, "outline trim")?;
    cut_step(kernel, &board, &cutters.drills, "preview drills")
}
