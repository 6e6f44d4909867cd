use crate::types::*;

/// Core geometry kernel trait. Every construction and modification returns a
/// fresh handle; inputs are never mutated.
///
/// Implemented by MockKernel (deterministic test double) and by adapters over
/// a real B-rep modeler.
pub trait GeometryKernel {
    /// Straight edge between two points.
    fn make_line(&mut self, start: Point, end: Point) -> Result<ShapeHandle, KernelError>;

    /// Circular arc edge through three points.
    fn make_arc(
        &mut self,
        start: Point,
        through: Point,
        end: Point,
    ) -> Result<ShapeHandle, KernelError>;

    /// Bezier edge defined by its control poles.
    fn make_bezier(&mut self, poles: &[Point]) -> Result<ShapeHandle, KernelError>;

    /// Polyline wire through the points. Closed when the first and last coincide.
    fn make_polygon(&mut self, points: &[Point]) -> Result<ShapeHandle, KernelError>;

    /// Join edges (or wires) end to end into one wire.
    fn make_wire(&mut self, edges: &[ShapeHandle]) -> Result<ShapeHandle, KernelError>;

    /// Planar face bounded by a closed wire.
    fn make_face(&mut self, wire: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Axis-aligned box from its minimum corner and extents.
    fn make_box(&mut self, origin: Point, size: Vector) -> Result<ShapeHandle, KernelError>;

    /// Cylinder with its base circle centered on `base`, extending along `axis`.
    fn make_cylinder(
        &mut self,
        base: Point,
        axis: Vector,
        radius: f64,
        height: f64,
    ) -> Result<ShapeHandle, KernelError>;

    /// Surface lofted through the section curves in order.
    fn make_loft(
        &mut self,
        sections: &[ShapeHandle],
        ruled: bool,
        closed: bool,
    ) -> Result<ShapeHandle, KernelError>;

    /// Sew surfaces into a single shell.
    fn make_shell(&mut self, surfaces: &[ShapeHandle]) -> Result<ShapeHandle, KernelError>;

    fn make_compound(&mut self, shapes: &[ShapeHandle]) -> Result<ShapeHandle, KernelError>;

    /// Sweep a shape along a vector. Faces and shells become solids.
    fn extrude(&mut self, shape: &ShapeHandle, vector: Vector) -> Result<ShapeHandle, KernelError>;

    /// Boolean union.
    fn fuse(&mut self, a: &ShapeHandle, b: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn cut(&mut self, a: &ShapeHandle, b: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    /// Boolean intersection. May yield a null shape when the operands are disjoint.
    fn common(&mut self, a: &ShapeHandle, b: &ShapeHandle) -> Result<ShapeHandle, KernelError>;

    fn translate(&mut self, shape: &ShapeHandle, offset: Vector)
        -> Result<ShapeHandle, KernelError>;

    /// Rotate about the axis through `origin`, angle in degrees.
    fn rotate(
        &mut self,
        shape: &ShapeHandle,
        origin: Point,
        axis: Vector,
        degrees: f64,
    ) -> Result<ShapeHandle, KernelError>;

    /// Reflect across the plane through `origin` with the given normal.
    fn mirror(
        &mut self,
        shape: &ShapeHandle,
        origin: Point,
        normal: Vector,
    ) -> Result<ShapeHandle, KernelError>;

    fn bounding_box(&self, shape: &ShapeHandle) -> Result<BoundingBox, KernelError>;

    /// True when the shape is empty or unknown to this kernel.
    fn is_null(&self, shape: &ShapeHandle) -> bool;

    fn shape_kind(&self, shape: &ShapeHandle) -> Option<ShapeKind>;
}
