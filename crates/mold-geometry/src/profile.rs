//! Transverse deck profiles.
//!
//! A profile is computed as plain points first and only turned into kernel
//! edges by [`ProfileCurve::realize`], so its shape can be checked without a
//! kernel.

use mold_kernel::{GeometryKernel, Point, ShapeHandle, Vector};
use nalgebra::{Isometry3, Translation3, UnitQuaternion};

use crate::types::GeometryError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProfileSegment {
    Line { start: Point, end: Point },
    /// Circular arc through three points.
    Arc { start: Point, mid: Point, end: Point },
}

impl ProfileSegment {
    pub fn start(&self) -> Point {
        match self {
            ProfileSegment::Line { start, .. } | ProfileSegment::Arc { start, .. } => *start,
        }
    }

    pub fn end(&self) -> Point {
        match self {
            ProfileSegment::Line { end, .. } | ProfileSegment::Arc { end, .. } => *end,
        }
    }

    fn map(&self, f: impl Fn(&Point) -> Point) -> Self {
        match self {
            ProfileSegment::Line { start, end } => ProfileSegment::Line {
                start: f(start),
                end: f(end),
            },
            ProfileSegment::Arc { start, mid, end } => ProfileSegment::Arc {
                start: f(start),
                mid: f(mid),
                end: f(end),
            },
        }
    }
}

/// Input to [`ProfileCurve::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileShape {
    /// Full width of the profile.
    pub width: f64,
    /// Concave radius. Ignored when the profile is flat.
    pub radius: f64,
    pub flat: bool,
    /// Width of the flat tub floor. Values up to 0.1 mean no tub.
    pub tub_width: f64,
}

/// One transverse cross-section, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
    pub segments: Vec<ProfileSegment>,
}

impl ProfileCurve {
    /// Build the profile in the XZ plane with its lowest point at z = 0.
    ///
    /// Radii above `flat_threshold` are treated as flat.
    pub fn new(shape: ProfileShape, flat_threshold: f64) -> Result<Self, GeometryError> {
        let ProfileShape {
            width,
            radius: r,
            tub_width,
            ..
        } = shape;
        let flat = shape.flat || r > flat_threshold;
        let half = width / 2.0;
        let p = |x: f64, z: f64| Point::new(x, 0.0, z);

        let segments = if tub_width > 0.1 {
            let side = ((width - tub_width) / 2.0).max(0.01);
            let tub = tub_width / 2.0;
            if flat {
                vec![
                    ProfileSegment::Line { start: p(-half, 0.0), end: p(-tub, 0.0) },
                    ProfileSegment::Line { start: p(-tub, 0.0), end: p(tub, 0.0) },
                    ProfileSegment::Line { start: p(tub, 0.0), end: p(half, 0.0) },
                ]
            } else {
                if side > r {
                    return Err(GeometryError::infeasible(format!(
                        "concave radius {r} smaller than tub side width {side}"
                    )));
                }
                let edge_z = r - (r * r - side * side).max(0.0).sqrt();
                let half_angle = (side / r).asin() / 2.0;
                let mid_x = tub + r * half_angle.sin();
                let mid_z = r * (1.0 - half_angle.cos());
                vec![
                    ProfileSegment::Arc {
                        start: p(-half, edge_z),
                        mid: p(-mid_x, mid_z),
                        end: p(-tub, 0.0),
                    },
                    ProfileSegment::Line { start: p(-tub, 0.0), end: p(tub, 0.0) },
                    ProfileSegment::Arc {
                        start: p(tub, 0.0),
                        mid: p(mid_x, mid_z),
                        end: p(half, edge_z),
                    },
                ]
            }
        } else if flat {
            vec![ProfileSegment::Line { start: p(-half, 0.0), end: p(half, 0.0) }]
        } else {
            let edge_z = r - (r * r - half * half).max(0.0).sqrt();
            vec![ProfileSegment::Arc {
                start: p(-half, edge_z),
                mid: p(0.0, 0.0),
                end: p(half, edge_z),
            }]
        };
        Ok(Self { segments })
    }

    /// Tilt about the x axis by `rotation_deg`, then move by `offset`.
    pub fn placed(&self, rotation_deg: f64, offset: Vector) -> Self {
        let iso = Isometry3::from_parts(
            Translation3::from(offset),
            UnitQuaternion::from_axis_angle(&Vector::x_axis(), rotation_deg.to_radians()),
        );
        Self {
            segments: self.segments.iter().map(|s| s.map(|pt| iso.transform_point(pt))).collect(),
        }
    }

    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(ProfileSegment::start)
    }

    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(ProfileSegment::end)
    }

    /// Create one kernel edge per segment and join them into a wire.
    pub fn realize(&self, kernel: &mut dyn GeometryKernel) -> Result<ShapeHandle, GeometryError> {
        let edges = self
            .segments
            .iter()
            .map(|s| match *s {
                ProfileSegment::Line { start, end } => kernel.make_line(start, end),
                ProfileSegment::Arc { start, mid, end } => kernel.make_arc(start, mid, end),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(kernel.make_wire(&edges)?)
    }
}
