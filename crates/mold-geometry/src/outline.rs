//! Board planform: straight sides with Bézier tapers into blunt tips.

use mold_kernel::{GeometryKernel, Point, ShapeHandle, Vector};
use tracing::instrument;

use crate::config::BuildConfig;
use crate::dims::MoldDims;
use crate::types::{ensure_valid, GeometryError};

/// Control points of the right half outline, in the XY plane.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePlan {
    /// Nose taper, from the straight side to the tip.
    pub nose: [Point; 4],
    /// Tail taper, from the straight side to the tip.
    pub tail: [Point; 4],
    pub y_nose: f64,
    pub y_tail: f64,
}

/// Poles of one taper. `toward_tip` is +1 for the nose and −1 for the tail.
fn taper_poles(
    half_width: f64,
    tip_half_width: f64,
    y_end: f64,
    taper: f64,
    flatness: f64,
    toward_tip: f64,
) -> [Point; 4] {
    let y_start = y_end - toward_tip * taper;
    [
        Point::new(half_width, y_start, 0.0),
        Point::new(half_width, y_start + toward_tip * taper * flatness, 0.0),
        Point::new(tip_half_width + (half_width - tip_half_width) * flatness, y_end, 0.0),
        Point::new(tip_half_width, y_end, 0.0),
    ]
}

impl OutlinePlan {
    pub fn new(dims: &MoldDims, config: &BuildConfig) -> Result<Self, GeometryError> {
        let inner = dims.wheelbase / 2.0 + dims.truck_hole_dist_l + dims.kick_gap;
        let y_nose = inner + dims.nose_length;
        let y_tail = -(inner + dims.tail_length);
        let half_width = dims.board_width / 2.0;
        let tip = config.tip_half_width;

        let nose = taper_poles(half_width, tip, y_nose, dims.nose_taper_start, dims.nose_flatness, 1.0);
        let tail = taper_poles(half_width, tip, y_tail, dims.tail_taper_start, dims.tail_flatness, -1.0);
        if nose[0].y <= tail[0].y {
            return Err(GeometryError::infeasible(format!(
                "nose taper start {} overlaps tail taper start {}",
                nose[0].y, tail[0].y
            )));
        }
        Ok(Self {
            nose,
            tail,
            y_nose,
            y_tail,
        })
    }

    /// Points along the right half, tail tip to nose tip.
    pub fn half_points(&self) -> Vec<Point> {
        let mut pts = vec![Point::new(0.0, self.y_tail, 0.0)];
        pts.extend(self.tail.iter().rev());
        pts.extend(self.nose.iter());
        pts.push(Point::new(0.0, self.y_nose, 0.0));
        pts
    }
}

/// Closed planform face on z = 0.
#[instrument(skip_all)]
pub fn build_outline_face(
    kernel: &mut dyn GeometryKernel,
    dims: &MoldDims,
    config: &BuildConfig,
) -> Result<ShapeHandle, GeometryError> {
    let plan = OutlinePlan::new(dims, config)?;
    let mut tail_poles = plan.tail;
    tail_poles.reverse();

    let edges = [
        kernel.make_line(Point::new(0.0, plan.y_tail, 0.0), plan.tail[3])?,
        kernel.make_bezier(&tail_poles)?,
        kernel.make_line(plan.tail[0], plan.nose[0])?,
        kernel.make_bezier(&plan.nose)?,
        kernel.make_line(plan.nose[3], Point::new(0.0, plan.y_nose, 0.0))?,
    ];
    let half = kernel.make_wire(&edges)?;
    let other = kernel.mirror(&half, Point::origin(), Vector::x())?;
    let full = kernel.make_wire(&[half, other])?;
    let face = kernel.make_face(&full)?;
    ensure_valid(kernel, face, "outline face")
}
