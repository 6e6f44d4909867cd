use nalgebra::{Point3, Rotation3, Unit, Vector3};

pub type Point = Point3<f64>;
pub type Vector = Vector3<f64>;

/// Opaque handle to a shape in the geometry kernel.
/// NEVER persisted. Valid only for the kernel session that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub(crate) u64);

impl ShapeHandle {
    /// Wrap a raw id handed out by an adapter implementing the kernel trait.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Topological class of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Edge,
    Wire,
    Face,
    Shell,
    Solid,
    Compound,
}

impl ShapeKind {
    /// Curves that can be joined into wires and lofted through.
    pub fn is_curve(self) -> bool {
        matches!(self, ShapeKind::Edge | ShapeKind::Wire)
    }

    /// Surfaces that can be shelled together or extruded into solids.
    pub fn is_surface(self) -> bool {
        matches!(self, ShapeKind::Face | ShapeKind::Shell)
    }

    /// Shapes that can take part in a boolean.
    pub fn is_volume(self) -> bool {
        matches!(self, ShapeKind::Solid | ShapeKind::Compound)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut bb = Self::new(*first, *first);
        for p in &points[1..] {
            bb.min = bb.min.inf(p);
            bb.max = bb.max.sup(p);
        }
        Some(bb)
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(self.min.inf(&other.min), self.max.sup(&other.max))
    }

    /// Overlap of two boxes, `None` when they do not overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = self.min.sup(&other.min);
        let max = self.max.inf(&other.max);
        if min.x > max.x || min.y > max.y || min.z > max.z {
            None
        } else {
            Some(BoundingBox::new(min, max))
        }
    }

    pub fn translated(&self, offset: &Vector) -> BoundingBox {
        BoundingBox::new(self.min + offset, self.max + offset)
    }

    pub fn corners(&self) -> [Point; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point::new(a.x, a.y, a.z),
            Point::new(b.x, a.y, a.z),
            Point::new(a.x, b.y, a.z),
            Point::new(b.x, b.y, a.z),
            Point::new(a.x, a.y, b.z),
            Point::new(b.x, a.y, b.z),
            Point::new(a.x, b.y, b.z),
            Point::new(b.x, b.y, b.z),
        ]
    }

    /// Box enclosing the rotated corners. Conservative for curved geometry.
    pub fn rotated(&self, origin: &Point, axis: &Vector, degrees: f64) -> BoundingBox {
        let rot = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), degrees.to_radians());
        let pts: Vec<Point> = self
            .corners()
            .iter()
            .map(|p| origin + rot * (p - origin))
            .collect();
        // corners is never empty
        BoundingBox::from_points(&pts).unwrap_or(*self)
    }

    /// Box enclosing the corners reflected across the plane through `origin`.
    pub fn mirrored(&self, origin: &Point, normal: &Vector) -> BoundingBox {
        let n = normal.normalize();
        let pts: Vec<Point> = self
            .corners()
            .iter()
            .map(|p| p - n * (2.0 * (p - origin).dot(&n)))
            .collect();
        BoundingBox::from_points(&pts).unwrap_or(*self)
    }

    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn center(&self) -> Point {
        nalgebra::center(&self.min, &self.max)
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("invalid input to {operation}: {reason}")]
    InvalidInput { operation: String, reason: String },

    #[error("loft failed: {reason}")]
    LoftFailed { reason: String },

    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("shape not found: {handle:?}")]
    ShapeNotFound { handle: ShapeHandle },

    #[error("shape is null")]
    NullShape,

    #[error("kernel error: {message}")]
    Other { message: String },
}

impl KernelError {
    pub(crate) fn invalid(operation: &str, reason: impl Into<String>) -> Self {
        KernelError::InvalidInput {
            operation: operation.to_string(),
            reason: reason.into(),
        }
    }
}
