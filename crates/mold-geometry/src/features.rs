//! Drill holes, fillet fillers and side-lock bosses and pockets.

use mold_kernel::primitives::{make_pentagon_prism, make_vertical_cylinders};
use mold_kernel::{GeometryKernel, Point, ShapeHandle, Vector};

use crate::config::BuildConfig;
use crate::dims::MoldDims;
use crate::types::{ensure_valid, GeometryError};

/// Guide pin centers: three per side, at the middle and near both ends.
pub fn guide_positions(dims: &MoldDims, config: &BuildConfig) -> [(f64, f64); 6] {
    let gx = dims.core_width / 2.0 + (dims.base_width - dims.core_width) / 4.0;
    let gy = dims.mold_length / 2.0 - config.guide_inset;
    [
        (gx, 0.0),
        (gx, gy),
        (gx, -gy),
        (-gx, 0.0),
        (-gx, gy),
        (-gx, -gy),
    ]
}

/// Truck mounting hole centers, four per truck.
pub fn truck_positions(dims: &MoldDims) -> [(f64, f64); 8] {
    let tx = dims.truck_hole_dist_w / 2.0;
    let inner = dims.wheelbase / 2.0;
    let outer = inner + dims.truck_hole_dist_l;
    [
        (tx, inner),
        (-tx, inner),
        (tx, outer),
        (-tx, outer),
        (tx, -inner),
        (-tx, -inner),
        (tx, -outer),
        (-tx, -outer),
    ]
}

/// All drill cylinders as one compound, long enough to pierce every variant.
pub fn build_drills(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
) -> Result<ShapeHandle, GeometryError> {
    let reach = config.extrusion_limit;
    let mut cylinders = make_vertical_cylinders(
        kernel,
        &guide_positions(dims, config),
        dims.guide_diameter / 2.0,
        -reach,
        2.0 * reach,
    )?;
    cylinders.extend(make_vertical_cylinders(
        kernel,
        &truck_positions(dims),
        dims.truck_hole_diam / 2.0,
        -reach,
        2.0 * reach,
    )?);
    let drills = kernel.make_compound(&cylinders)?;
    ensure_valid(kernel, drills, "drill compound")
}

/// Quarter-round fillers for the inside corner where the core meets the
/// base, on both sides. `z_start` is the base face the fillers sit on;
/// `upward` grows them into +z.
pub fn build_fillet_fillers(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    z_start: f64,
    radius: f64,
    upward: bool,
) -> Result<ShapeHandle, GeometryError> {
    let x = dims.core_width / 2.0;
    let y = -dims.mold_length / 2.0;
    let (box_z, center_z) = if upward {
        (z_start, z_start + radius)
    } else {
        (z_start - radius, z_start - radius)
    };
    let block = kernel.make_box(
        Point::new(x, y, box_z),
        Vector::new(radius, dims.mold_length, radius),
    )?;
    let round = kernel.make_cylinder(
        Point::new(x + radius, y, center_z),
        Vector::y(),
        radius,
        dims.mold_length,
    )?;
    let right = kernel.cut(&block, &round)?;
    let right = ensure_valid(kernel, right, "fillet filler")?;
    let left = kernel.mirror(&right, Point::origin(), Vector::x())?;
    let both = kernel.fuse(&right, &left)?;
    ensure_valid(kernel, both, "fillet fillers")
}

/// Where the two lock features sit: just inside each end of the mold.
fn lock_offsets(dims: &MoldDims, config: &BuildConfig) -> [f64; 2] {
    let lock = &config.side_lock;
    [
        dims.mold_length / 2.0 - lock.overlap,
        -dims.mold_length / 2.0 - lock.extension + lock.overlap,
    ]
}

/// Pentagon bosses on both ends of the male mold, bottom at `z_base`.
pub fn build_male_locks(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
    lock_height: f64,
    z_base: f64,
) -> Result<[ShapeHandle; 2], GeometryError> {
    let mut out = Vec::with_capacity(2);
    for y in lock_offsets(dims, config) {
        let prism = make_pentagon_prism(
            kernel,
            dims.core_width,
            lock_height,
            config.side_lock.extension,
            0.0,
        )?;
        let placed = kernel.translate(&prism, Vector::new(0.0, y, z_base))?;
        out.push(ensure_valid(kernel, placed, "male lock")?);
    }
    Ok([out[0], out[1]])
}

/// Caps on both ends of the female mold with a pocket matching the male
/// boss plus the lock tolerance.
pub fn build_female_caps(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
    lock_height: f64,
    cap_height: f64,
    z_base: f64,
) -> Result<[ShapeHandle; 2], GeometryError> {
    let lock = &config.side_lock;
    let mut out = Vec::with_capacity(2);
    for y in lock_offsets(dims, config) {
        let block = kernel.make_box(
            Point::new(-dims.core_width / 2.0, 0.0, 0.0),
            Vector::new(dims.core_width, lock.extension, cap_height),
        )?;
        let pocket = make_pentagon_prism(
            kernel,
            dims.core_width,
            lock_height,
            lock.extension,
            lock.tolerance,
        )?;
        let cap = kernel.cut(&block, &pocket)?;
        let placed = kernel.translate(&cap, Vector::new(0.0, y, z_base))?;
        out.push(ensure_valid(kernel, placed, "female cap")?);
    }
    Ok([out[0], out[1]])
}
