//! Higher-level primitive builders on top of the kernel trait.
//!
//! Everything here is composed from lines, arcs, polygons, faces and
//! extrusions so any `GeometryKernel` implementation gets them for free.

use crate::traits::GeometryKernel;
use crate::types::*;
use tracing::trace;

/// Inset of the three-point corner arc's middle point, as a fraction of the
/// corner radius. Close to 1 − cos(45°).
const CORNER_ARC_INSET: f64 = 0.29;

/// Box centered on the origin in x and y, sitting on z = 0.
pub fn make_centered_box(
    kernel: &mut dyn GeometryKernel,
    width: f64,
    length: f64,
    height: f64,
) -> Result<ShapeHandle, KernelError> {
    kernel.make_box(
        Point::new(-width / 2.0, -length / 2.0, 0.0),
        Vector::new(width, length, height),
    )
}

/// Box centered on the origin in x and y with rounded vertical edges,
/// sitting on z = 0. Falls back to a plain box when `corner_radius <= 0.1`.
pub fn make_rounded_box(
    kernel: &mut dyn GeometryKernel,
    width: f64,
    length: f64,
    height: f64,
    corner_radius: f64,
) -> Result<ShapeHandle, KernelError> {
    if corner_radius <= 0.1 {
        trace!(corner_radius, "corner radius too small, plain box");
        return make_centered_box(kernel, width, length, height);
    }
    let x = width / 2.0;
    let y = length / 2.0;
    let r = corner_radius;
    let m = r * CORNER_ARC_INSET;
    let p = |px: f64, py: f64| Point::new(px, py, 0.0);

    let p1 = p(x - r, -y);
    let p2 = p(x, -y + r);
    let p3 = p(x, y - r);
    let p4 = p(x - r, y);
    let p5 = p(-x + r, y);
    let p6 = p(-x, y - r);
    let p7 = p(-x, -y + r);
    let p8 = p(-x + r, -y);

    let edges = [
        kernel.make_line(p8, p1)?,
        kernel.make_arc(p1, p(x - m, -y + m), p2)?,
        kernel.make_line(p2, p3)?,
        kernel.make_arc(p3, p(x - m, y - m), p4)?,
        kernel.make_line(p4, p5)?,
        kernel.make_arc(p5, p(-x + m, y - m), p6)?,
        kernel.make_line(p6, p7)?,
        kernel.make_arc(p7, p(-x + m, -y + m), p8)?,
    ];
    let wire = kernel.make_wire(&edges)?;
    let face = kernel.make_face(&wire)?;
    kernel.extrude(&face, Vector::new(0.0, 0.0, height))
}

/// Five-sided prism in the XZ plane extruded along +y from y = 0.
///
/// The base spans `base_width + 2·tolerance` on z = 0, the apex sits at
/// `total_height + tolerance`. Shoulder height is `sqrt(R² − (w/2)²)` for
/// `R = total_height`, or `R/2` when the prism is too squat for that.
pub fn make_pentagon_prism(
    kernel: &mut dyn GeometryKernel,
    base_width: f64,
    total_height: f64,
    length: f64,
    tolerance: f64,
) -> Result<ShapeHandle, KernelError> {
    let half_width = (base_width + 2.0 * tolerance) / 2.0;
    let shoulder = pentagon_shoulder_height(base_width, total_height);
    let outline = [
        Point::new(-half_width, 0.0, 0.0),
        Point::new(half_width, 0.0, 0.0),
        Point::new(half_width, 0.0, shoulder),
        Point::new(0.0, 0.0, total_height + tolerance),
        Point::new(-half_width, 0.0, shoulder),
        Point::new(-half_width, 0.0, 0.0),
    ];
    let wire = kernel.make_polygon(&outline)?;
    let face = kernel.make_face(&wire)?;
    kernel.extrude(&face, Vector::new(0.0, length, 0.0))
}

pub fn pentagon_shoulder_height(base_width: f64, total_height: f64) -> f64 {
    let a = base_width / 2.0;
    if total_height > a + 1.0 {
        (total_height * total_height - a * a).sqrt()
    } else {
        total_height * 0.5
    }
}

/// Vertical cylinders of one radius at each (x, y) center, spanning
/// `[z_start, z_start + height]`.
pub fn make_vertical_cylinders(
    kernel: &mut dyn GeometryKernel,
    centers: &[(f64, f64)],
    radius: f64,
    z_start: f64,
    height: f64,
) -> Result<Vec<ShapeHandle>, KernelError> {
    centers
        .iter()
        .map(|&(x, y)| {
            kernel.make_cylinder(Point::new(x, y, z_start), Vector::z(), radius, height)
        })
        .collect()
}
