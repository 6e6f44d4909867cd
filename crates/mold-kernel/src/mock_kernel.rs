//! MockKernel: deterministic test double implementing GeometryKernel.
//!
//! Tracks a conservative bounding box and the construction recipe for each
//! shape. Recipes can be rendered as id-free fingerprints so two builds can be
//! compared structurally. Individual operations can be forced to fail.

use crate::traits::GeometryKernel;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use tracing::debug;

/// Operation selector for failure injection and call counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Line,
    Arc,
    Bezier,
    Polygon,
    Wire,
    Face,
    Box,
    Cylinder,
    Loft,
    Shell,
    Compound,
    Extrude,
    Fuse,
    Cut,
    Common,
    Translate,
    Rotate,
    Mirror,
}

#[derive(Debug, Clone)]
enum Recipe {
    Line { start: Point, end: Point },
    Arc { start: Point, through: Point, end: Point },
    Bezier { poles: Vec<Point> },
    Polygon { points: Vec<Point> },
    Wire { edges: Vec<u64> },
    Face { wire: u64 },
    Box { origin: Point, size: Vector },
    Cylinder { base: Point, axis: Vector, radius: f64, height: f64 },
    Loft { sections: Vec<u64>, ruled: bool, closed: bool },
    Shell { surfaces: Vec<u64> },
    Compound { shapes: Vec<u64> },
    Extrude { shape: u64, vector: Vector },
    Boolean { op: MockOp, a: u64, b: u64 },
    Translate { shape: u64, offset: Vector },
    Rotate { shape: u64, origin: Point, axis: Vector, degrees: f64 },
    Mirror { shape: u64, origin: Point, normal: Vector },
}

#[derive(Debug, Clone)]
struct MockShape {
    kind: ShapeKind,
    /// `None` marks a null (empty) shape.
    bbox: Option<BoundingBox>,
    recipe: Recipe,
}

/// Deterministic test double for the geometry kernel.
#[derive(Debug, Default)]
pub struct MockKernel {
    next_handle: u64,
    shapes: HashMap<u64, MockShape>,
    failing: HashSet<MockOp>,
    calls: HashMap<MockOp, usize>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            ..Default::default()
        }
    }

    /// Make every subsequent call of `op` return an error.
    pub fn fail_on(&mut self, op: MockOp) {
        self.failing.insert(op);
    }

    pub fn clear_failures(&mut self) {
        self.failing.clear();
    }

    /// Number of times `op` was invoked, including failed calls.
    pub fn call_count(&self, op: MockOp) -> usize {
        self.calls.get(&op).copied().unwrap_or(0)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Structural description of how a shape was built, free of handle ids.
    /// Two builds from identical inputs produce identical fingerprints.
    pub fn fingerprint(&self, handle: &ShapeHandle) -> Option<String> {
        let mut out = String::new();
        self.write_fingerprint(handle.0, &mut out)?;
        Some(out)
    }

    fn write_fingerprint(&self, id: u64, out: &mut String) -> Option<()> {
        let shape = self.shapes.get(&id)?;
        match &shape.recipe {
            Recipe::Line { start, end } => {
                let _ = write!(out, "line({},{})", pt(start), pt(end));
            }
            Recipe::Arc {
                start,
                through,
                end,
            } => {
                let _ = write!(out, "arc({},{},{})", pt(start), pt(through), pt(end));
            }
            Recipe::Bezier { poles } => {
                let _ = write!(out, "bezier({})", pts(poles));
            }
            Recipe::Polygon { points } => {
                let _ = write!(out, "polygon({})", pts(points));
            }
            Recipe::Wire { edges } => self.write_list("wire", edges, out)?,
            Recipe::Face { wire } => {
                out.push_str("face(");
                self.write_fingerprint(*wire, out)?;
                out.push(')');
            }
            Recipe::Box { origin, size } => {
                let _ = write!(out, "box({},{})", pt(origin), vec(size));
            }
            Recipe::Cylinder {
                base,
                axis,
                radius,
                height,
            } => {
                let _ = write!(
                    out,
                    "cylinder({},{},{:?},{:?})",
                    pt(base),
                    vec(axis),
                    radius,
                    height
                );
            }
            Recipe::Loft {
                sections,
                ruled,
                closed,
            } => {
                let _ = write!(out, "loft[ruled={ruled},closed={closed}]");
                self.write_list("", sections, out)?;
            }
            Recipe::Shell { surfaces } => self.write_list("shell", surfaces, out)?,
            Recipe::Compound { shapes } => self.write_list("compound", shapes, out)?,
            Recipe::Extrude { shape, vector } => {
                out.push_str("extrude(");
                self.write_fingerprint(*shape, out)?;
                let _ = write!(out, ",{})", vec(vector));
            }
            Recipe::Boolean { op, a, b } => {
                let _ = write!(out, "{op:?}(");
                self.write_fingerprint(*a, out)?;
                out.push(',');
                self.write_fingerprint(*b, out)?;
                out.push(')');
            }
            Recipe::Translate { shape, offset } => {
                out.push_str("translate(");
                self.write_fingerprint(*shape, out)?;
                let _ = write!(out, ",{})", vec(offset));
            }
            Recipe::Rotate {
                shape,
                origin,
                axis,
                degrees,
            } => {
                out.push_str("rotate(");
                self.write_fingerprint(*shape, out)?;
                let _ = write!(out, ",{},{},{:?})", pt(origin), vec(axis), degrees);
            }
            Recipe::Mirror {
                shape,
                origin,
                normal,
            } => {
                out.push_str("mirror(");
                self.write_fingerprint(*shape, out)?;
                let _ = write!(out, ",{},{})", pt(origin), vec(normal));
            }
        }
        Some(())
    }

    fn write_list(&self, name: &str, ids: &[u64], out: &mut String) -> Option<()> {
        out.push_str(name);
        out.push('[');
        for (i, id) in ids.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            self.write_fingerprint(*id, out)?;
        }
        out.push(']');
        Some(())
    }

    /// Count the call and honor injected failures.
    fn enter(&mut self, op: MockOp) -> Result<(), KernelError> {
        *self.calls.entry(op).or_insert(0) += 1;
        if self.failing.contains(&op) {
            debug!(?op, "injected kernel failure");
            return Err(KernelError::Other {
                message: format!("injected failure in {op:?}"),
            });
        }
        Ok(())
    }

    fn insert(&mut self, kind: ShapeKind, bbox: Option<BoundingBox>, recipe: Recipe) -> ShapeHandle {
        let id = self.next_handle.max(1);
        self.next_handle = id + 1;
        self.shapes.insert(id, MockShape { kind, bbox, recipe });
        ShapeHandle(id)
    }

    fn get(&self, handle: &ShapeHandle) -> Result<&MockShape, KernelError> {
        self.shapes
            .get(&handle.0)
            .ok_or(KernelError::ShapeNotFound { handle: *handle })
    }

    /// Look up every handle and require a non-null shape whose kind passes `accept`.
    fn collect(
        &self,
        operation: &str,
        handles: &[ShapeHandle],
        accept: fn(ShapeKind) -> bool,
    ) -> Result<(Vec<u64>, BoundingBox), KernelError> {
        let mut bbox: Option<BoundingBox> = None;
        for h in handles {
            let s = self.get(h)?;
            if !accept(s.kind) {
                return Err(KernelError::invalid(
                    operation,
                    format!("unexpected {:?} input", s.kind),
                ));
            }
            let b = s.bbox.ok_or(KernelError::NullShape)?;
            bbox = Some(match bbox {
                Some(acc) => acc.union(&b),
                None => b,
            });
        }
        let bbox = bbox.ok_or_else(|| KernelError::invalid(operation, "no inputs"))?;
        Ok((handles.iter().map(|h| h.0).collect(), bbox))
    }

    fn volume_operands(
        &self,
        a: &ShapeHandle,
        b: &ShapeHandle,
    ) -> Result<(Option<BoundingBox>, Option<BoundingBox>), KernelError> {
        let sa = self.get(a)?;
        let sb = self.get(b)?;
        if !sa.kind.is_volume() || !sb.kind.is_volume() {
            return Err(KernelError::BooleanFailed {
                reason: format!("operands must be solids, got {:?} and {:?}", sa.kind, sb.kind),
            });
        }
        Ok((sa.bbox, sb.bbox))
    }

    fn transformed(
        &mut self,
        shape: &ShapeHandle,
        map: impl Fn(&BoundingBox) -> BoundingBox,
        recipe: Recipe,
    ) -> Result<ShapeHandle, KernelError> {
        let s = self.get(shape)?;
        let (kind, bbox) = (s.kind, s.bbox.map(|b| map(&b)));
        Ok(self.insert(kind, bbox, recipe))
    }
}

fn pt(p: &Point) -> String {
    format!("({:?},{:?},{:?})", p.x, p.y, p.z)
}

fn vec(v: &Vector) -> String {
    format!("<{:?},{:?},{:?}>", v.x, v.y, v.z)
}

fn pts(points: &[Point]) -> String {
    points.iter().map(pt).collect::<Vec<_>>().join(",")
}

fn all_finite(points: &[Point]) -> bool {
    points
        .iter()
        .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
}

fn finite_vector(v: &Vector) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

impl GeometryKernel for MockKernel {
    fn make_line(&mut self, start: Point, end: Point) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Line)?;
        if !all_finite(&[start, end]) {
            return Err(KernelError::invalid("line", "non-finite point"));
        }
        if (end - start).norm() < 1e-9 {
            return Err(KernelError::invalid("line", "zero length"));
        }
        let bbox = BoundingBox::from_points(&[start, end]);
        Ok(self.insert(ShapeKind::Edge, bbox, Recipe::Line { start, end }))
    }

    fn make_arc(
        &mut self,
        start: Point,
        through: Point,
        end: Point,
    ) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Arc)?;
        if !all_finite(&[start, through, end]) {
            return Err(KernelError::invalid("arc", "non-finite point"));
        }
        if (through - start).cross(&(end - start)).norm() < 1e-12 {
            return Err(KernelError::invalid("arc", "points are collinear"));
        }
        let bbox = BoundingBox::from_points(&[start, through, end]);
        Ok(self.insert(
            ShapeKind::Edge,
            bbox,
            Recipe::Arc {
                start,
                through,
                end,
            },
        ))
    }

    fn make_bezier(&mut self, poles: &[Point]) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Bezier)?;
        if poles.len() < 2 {
            return Err(KernelError::invalid("bezier", "need at least two poles"));
        }
        if !all_finite(poles) {
            return Err(KernelError::invalid("bezier", "non-finite pole"));
        }
        let bbox = BoundingBox::from_points(poles);
        Ok(self.insert(
            ShapeKind::Edge,
            bbox,
            Recipe::Bezier {
                poles: poles.to_vec(),
            },
        ))
    }

    fn make_polygon(&mut self, points: &[Point]) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Polygon)?;
        if points.len() < 2 {
            return Err(KernelError::invalid("polygon", "need at least two points"));
        }
        if !all_finite(points) {
            return Err(KernelError::invalid("polygon", "non-finite point"));
        }
        let bbox = BoundingBox::from_points(points);
        Ok(self.insert(
            ShapeKind::Wire,
            bbox,
            Recipe::Polygon {
                points: points.to_vec(),
            },
        ))
    }

    fn make_wire(&mut self, edges: &[ShapeHandle]) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Wire)?;
        let (ids, bbox) = self.collect("wire", edges, ShapeKind::is_curve)?;
        Ok(self.insert(ShapeKind::Wire, Some(bbox), Recipe::Wire { edges: ids }))
    }

    fn make_face(&mut self, wire: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Face)?;
        let s = self.get(wire)?;
        if s.kind != ShapeKind::Wire {
            return Err(KernelError::invalid("face", format!("expected wire, got {:?}", s.kind)));
        }
        let bbox = s.bbox.ok_or(KernelError::NullShape)?;
        Ok(self.insert(ShapeKind::Face, Some(bbox), Recipe::Face { wire: wire.0 }))
    }

    fn make_box(&mut self, origin: Point, size: Vector) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Box)?;
        if !all_finite(&[origin]) || !finite_vector(&size) {
            return Err(KernelError::invalid("box", "non-finite dimensions"));
        }
        if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
            return Err(KernelError::invalid("box", "extents must be positive"));
        }
        let bbox = BoundingBox::new(origin, origin + size);
        Ok(self.insert(ShapeKind::Solid, Some(bbox), Recipe::Box { origin, size }))
    }

    fn make_cylinder(
        &mut self,
        base: Point,
        axis: Vector,
        radius: f64,
        height: f64,
    ) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Cylinder)?;
        if !(radius > 0.0 && height > 0.0) || !radius.is_finite() || !height.is_finite() {
            return Err(KernelError::invalid("cylinder", "radius and height must be positive"));
        }
        if axis.norm() < 1e-12 || !finite_vector(&axis) || !all_finite(&[base]) {
            return Err(KernelError::invalid("cylinder", "degenerate axis"));
        }
        let dir = axis.normalize();
        let top = base + dir * height;
        let r = Vector::repeat(radius);
        let bbox = BoundingBox::new(base.inf(&top) - r, base.sup(&top) + r);
        Ok(self.insert(
            ShapeKind::Solid,
            Some(bbox),
            Recipe::Cylinder {
                base,
                axis,
                radius,
                height,
            },
        ))
    }

    fn make_loft(
        &mut self,
        sections: &[ShapeHandle],
        ruled: bool,
        closed: bool,
    ) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Loft)?;
        if sections.len() < 2 {
            return Err(KernelError::LoftFailed {
                reason: format!("need at least two sections, got {}", sections.len()),
            });
        }
        let (ids, bbox) = self
            .collect("loft", sections, ShapeKind::is_curve)
            .map_err(|e| KernelError::LoftFailed {
                reason: e.to_string(),
            })?;
        let kind = if closed {
            ShapeKind::Solid
        } else {
            ShapeKind::Shell
        };
        Ok(self.insert(
            kind,
            Some(bbox),
            Recipe::Loft {
                sections: ids,
                ruled,
                closed,
            },
        ))
    }

    fn make_shell(&mut self, surfaces: &[ShapeHandle]) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Shell)?;
        let (ids, bbox) = self.collect("shell", surfaces, ShapeKind::is_surface)?;
        Ok(self.insert(ShapeKind::Shell, Some(bbox), Recipe::Shell { surfaces: ids }))
    }

    fn make_compound(&mut self, shapes: &[ShapeHandle]) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Compound)?;
        let (ids, bbox) = self.collect("compound", shapes, |_| true)?;
        Ok(self.insert(ShapeKind::Compound, Some(bbox), Recipe::Compound { shapes: ids }))
    }

    fn extrude(&mut self, shape: &ShapeHandle, vector: Vector) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Extrude)?;
        if vector.norm() < 1e-12 || !finite_vector(&vector) {
            return Err(KernelError::invalid("extrude", "zero or non-finite vector"));
        }
        let s = self.get(shape)?;
        let kind = match s.kind {
            ShapeKind::Edge | ShapeKind::Wire => ShapeKind::Face,
            ShapeKind::Face | ShapeKind::Shell | ShapeKind::Solid => ShapeKind::Solid,
            ShapeKind::Compound => ShapeKind::Compound,
        };
        let b = s.bbox.ok_or(KernelError::NullShape)?;
        let bbox = b.union(&b.translated(&vector));
        Ok(self.insert(
            kind,
            Some(bbox),
            Recipe::Extrude {
                shape: shape.0,
                vector,
            },
        ))
    }

    fn fuse(&mut self, a: &ShapeHandle, b: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Fuse)?;
        let bbox = match self.volume_operands(a, b)? {
            (Some(x), Some(y)) => Some(x.union(&y)),
            (Some(x), None) | (None, Some(x)) => Some(x),
            (None, None) => None,
        };
        Ok(self.insert(
            ShapeKind::Solid,
            bbox,
            Recipe::Boolean {
                op: MockOp::Fuse,
                a: a.0,
                b: b.0,
            },
        ))
    }

    fn cut(&mut self, a: &ShapeHandle, b: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Cut)?;
        let (bbox, _) = self.volume_operands(a, b)?;
        Ok(self.insert(
            ShapeKind::Solid,
            bbox,
            Recipe::Boolean {
                op: MockOp::Cut,
                a: a.0,
                b: b.0,
            },
        ))
    }

    fn common(&mut self, a: &ShapeHandle, b: &ShapeHandle) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Common)?;
        let bbox = match self.volume_operands(a, b)? {
            (Some(x), Some(y)) => x.intersection(&y),
            _ => None,
        };
        Ok(self.insert(
            ShapeKind::Solid,
            bbox,
            Recipe::Boolean {
                op: MockOp::Common,
                a: a.0,
                b: b.0,
            },
        ))
    }

    fn translate(
        &mut self,
        shape: &ShapeHandle,
        offset: Vector,
    ) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Translate)?;
        let recipe = Recipe::Translate {
            shape: shape.0,
            offset,
        };
        self.transformed(shape, |b| b.translated(&offset), recipe)
    }

    fn rotate(
        &mut self,
        shape: &ShapeHandle,
        origin: Point,
        axis: Vector,
        degrees: f64,
    ) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Rotate)?;
        if axis.norm() < 1e-12 || !degrees.is_finite() {
            return Err(KernelError::invalid("rotate", "degenerate axis or angle"));
        }
        let recipe = Recipe::Rotate {
            shape: shape.0,
            origin,
            axis,
            degrees,
        };
        self.transformed(shape, |b| b.rotated(&origin, &axis, degrees), recipe)
    }

    fn mirror(
        &mut self,
        shape: &ShapeHandle,
        origin: Point,
        normal: Vector,
    ) -> Result<ShapeHandle, KernelError> {
        self.enter(MockOp::Mirror)?;
        if normal.norm() < 1e-12 {
            return Err(KernelError::invalid("mirror", "degenerate normal"));
        }
        let recipe = Recipe::Mirror {
            shape: shape.0,
            origin,
            normal,
        };
        self.transformed(shape, |b| b.mirrored(&origin, &normal), recipe)
    }

    fn bounding_box(&self, shape: &ShapeHandle) -> Result<BoundingBox, KernelError> {
        self.get(shape)?.bbox.ok_or(KernelError::NullShape)
    }

    fn is_null(&self, shape: &ShapeHandle) -> bool {
        self.shapes
            .get(&shape.0)
            .map_or(true, |s| s.bbox.is_none())
    }

    fn shape_kind(&self, shape: &ShapeHandle) -> Option<ShapeKind> {
        self.shapes.get(&shape.0).map(|s| s.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box(k: &mut MockKernel, x: f64) -> ShapeHandle {
        k.make_box(Point::new(x, 0.0, 0.0), Vector::new(1.0, 1.0, 1.0))
            .unwrap()
    }

    #[test]
    fn test_box_bbox() {
        let mut k = MockKernel::new();
        let b = k
            .make_box(Point::new(-1.0, -2.0, 0.0), Vector::new(2.0, 4.0, 3.0))
            .unwrap();
        let bb = k.bounding_box(&b).unwrap();
        assert_eq!(bb.max, Point::new(1.0, 2.0, 3.0));
        assert_eq!(k.shape_kind(&b), Some(ShapeKind::Solid));
    }

    #[test]
    fn test_zero_extent_box_rejected() {
        let mut k = MockKernel::new();
        let r = k.make_box(Point::origin(), Vector::new(1.0, 0.0, 1.0));
        assert!(matches!(r, Err(KernelError::InvalidInput { .. })));
    }

    #[test]
    fn test_disjoint_common_is_null() {
        let mut k = MockKernel::new();
        let a = unit_box(&mut k, 0.0);
        let b = unit_box(&mut k, 5.0);
        let c = k.common(&a, &b).unwrap();
        assert!(k.is_null(&c));
        assert!(matches!(k.bounding_box(&c), Err(KernelError::NullShape)));
    }

    #[test]
    fn test_fuse_and_cut_bboxes() {
        let mut k = MockKernel::new();
        let a = unit_box(&mut k, 0.0);
        let b = unit_box(&mut k, 3.0);
        let f = k.fuse(&a, &b).unwrap();
        assert_relative_eq!(k.bounding_box(&f).unwrap().size().x, 4.0);
        let c = k.cut(&f, &b).unwrap();
        assert_relative_eq!(k.bounding_box(&c).unwrap().size().x, 4.0);
    }

    #[test]
    fn test_boolean_rejects_faces() {
        let mut k = MockKernel::new();
        let a = unit_box(&mut k, 0.0);
        let w = k
            .make_polygon(&[
                Point::origin(),
                Point::new(1.0, 0.0, 0.0),
                Point::new(1.0, 1.0, 0.0),
                Point::origin(),
            ])
            .unwrap();
        let f = k.make_face(&w).unwrap();
        assert!(matches!(k.cut(&a, &f), Err(KernelError::BooleanFailed { .. })));
    }

    #[test]
    fn test_loft_needs_two_sections() {
        let mut k = MockKernel::new();
        let l = k
            .make_line(Point::origin(), Point::new(1.0, 0.0, 0.0))
            .unwrap();
        let w = k.make_wire(&[l]).unwrap();
        assert!(matches!(
            k.make_loft(&[w], false, false),
            Err(KernelError::LoftFailed { .. })
        ));
        let w2 = k.translate(&w, Vector::new(0.0, 1.0, 0.0)).unwrap();
        let s = k.make_loft(&[w, w2], true, false).unwrap();
        assert_eq!(k.shape_kind(&s), Some(ShapeKind::Shell));
        assert_relative_eq!(k.bounding_box(&s).unwrap().size().y, 1.0);
    }

    #[test]
    fn test_collinear_arc_rejected() {
        let mut k = MockKernel::new();
        let r = k.make_arc(
            Point::origin(),
            Point::new(1.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
        );
        assert!(r.is_err());
    }

    #[test]
    fn test_extrude_face_becomes_solid() {
        let mut k = MockKernel::new();
        let w = k
            .make_polygon(&[
                Point::origin(),
                Point::new(2.0, 0.0, 0.0),
                Point::new(2.0, 2.0, 0.0),
                Point::origin(),
            ])
            .unwrap();
        let f = k.make_face(&w).unwrap();
        let s = k.extrude(&f, Vector::new(0.0, 0.0, -5.0)).unwrap();
        assert_eq!(k.shape_kind(&s), Some(ShapeKind::Solid));
        let bb = k.bounding_box(&s).unwrap();
        assert_relative_eq!(bb.min.z, -5.0);
        assert_relative_eq!(bb.max.z, 0.0);
    }

    #[test]
    fn test_fingerprint_ignores_handle_ids() {
        let mut k1 = MockKernel::new();
        let a = unit_box(&mut k1, 0.0);
        let b = unit_box(&mut k1, 0.5);
        let c1 = k1.cut(&a, &b).unwrap();

        let mut k2 = MockKernel::new();
        // Shift handle numbering.
        unit_box(&mut k2, 9.0);
        let a = unit_box(&mut k2, 0.0);
        let b = unit_box(&mut k2, 0.5);
        let c2 = k2.cut(&a, &b).unwrap();

        assert_ne!(c1.raw(), c2.raw());
        assert_eq!(k1.fingerprint(&c1), k2.fingerprint(&c2));

        let f = k2.fuse(&a, &b).unwrap();
        assert_ne!(k2.fingerprint(&f), k2.fingerprint(&c2));
    }

    #[test]
    fn test_injected_failure() {
        let mut k = MockKernel::new();
        k.fail_on(MockOp::Box);
        assert!(k
            .make_box(Point::origin(), Vector::new(1.0, 1.0, 1.0))
            .is_err());
        assert_eq!(k.call_count(MockOp::Box), 1);
        k.clear_failures();
        assert!(k
            .make_box(Point::origin(), Vector::new(1.0, 1.0, 1.0))
            .is_ok());
    }

    #[test]
    fn test_unknown_handle_is_null() {
        let k = MockKernel::new();
        assert!(k.is_null(&ShapeHandle::from_raw(42)));
    }
}
