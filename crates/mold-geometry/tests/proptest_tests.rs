//! Property-based tests for the profile, kick and outline builders.

use mold_geometry::{
    dims::concave_radius, BuildConfig, KickProfile, MoldDims, OutlinePlan, ProfileCurve,
    ProfileSegment, ProfileShape, SliceSet,
};
use mold_kernel::Point;
use mold_params::{write, ApplyMode, ParamId, ParamValue, ParameterSet};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_profile_shape() -> impl Strategy<Value = ProfileShape> {
    (34.0f64..65.0, 20.0f64..200_000.0, any::<bool>(), prop_oneof![Just(0.0), 1.0f64..20.0])
        .prop_map(|(width, radius, flat, tub_width)| ProfileShape {
            width,
            radius,
            flat,
            tub_width,
        })
}

fn arb_kick() -> impl Strategy<Value = KickProfile> {
    (0.1f64..14.5, 0.0f64..45.0)
        .prop_map(|(t, a)| KickProfile::from_transition(t, a, 500.0, 2.0, 1000.0))
}

/// A parameter set built through the engine from random edits.
fn arb_params() -> impl Strategy<Value = ParameterSet> {
    let ids = vec![
        ParamId::BoardWidth,
        ParamId::Wheelbase,
        ParamId::ConcaveDrop,
        ParamId::ConcaveLength,
        ParamId::TubWidth,
        ParamId::NoseLength,
        ParamId::TailLength,
        ParamId::NoseAngle,
        ParamId::TailAngle,
        ParamId::NoseFlatness,
        ParamId::TailFlatness,
        ParamId::NoseTaperStart,
        ParamId::TailTaperStart,
    ];
    prop::collection::vec((prop::sample::select(ids), 0.0f64..100.0), 0..20).prop_map(|edits| {
        let mut p = ParameterSet::default();
        for (id, v) in edits {
            write(&mut p, id, v.into(), ApplyMode::Interactive).unwrap();
        }
        p
    })
}

fn mirrored(p: &Point) -> Point {
    Point::new(-p.x, p.y, p.z)
}

fn close(a: &Point, b: &Point) -> bool {
    (a - b).norm() < 1e-9
}

// ---------------------------------------------------------------------------
// 1. Every transverse profile is mirror-symmetric about x = 0
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn profiles_are_symmetric(shape in arb_profile_shape()) {
        // Tub sides wider than the radius are rejected, not built.
        if let Ok(curve) = ProfileCurve::new(shape, 50_000.0) {
            let n = curve.segments.len();
            for (i, seg) in curve.segments.iter().enumerate() {
                let twin = &curve.segments[n - 1 - i];
                prop_assert!(close(&seg.start(), &mirrored(&twin.end())));
                prop_assert!(close(&seg.end(), &mirrored(&twin.start())));
                if let (ProfileSegment::Arc { mid: a, .. }, ProfileSegment::Arc { mid: b, .. }) = (seg, twin) {
                    prop_assert!(close(a, &mirrored(b)));
                }
            }
            let lowest = curve
                .segments
                .iter()
                .flat_map(|s| [s.start().z, s.end().z])
                .fold(f64::INFINITY, f64::min);
            prop_assert!(lowest >= -1e-9);
        }
    }
}

// ---------------------------------------------------------------------------
// 2. The planform outline is mirror-symmetric
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn outline_half_is_on_one_side(p in arb_params()) {
        let cfg = BuildConfig::default();
        let dims = MoldDims::derive(&p, &cfg).unwrap();
        if let Ok(plan) = OutlinePlan::new(&dims, &cfg) {
            let pts = plan.half_points();
            prop_assert_eq!(pts[0].x, 0.0);
            prop_assert_eq!(pts[pts.len() - 1].x, 0.0);
            prop_assert!(pts.iter().all(|q| q.x >= 0.0 && q.x <= dims.board_width / 2.0 + 1e-9));
            prop_assert!(pts.iter().all(|q| q.y >= plan.y_tail && q.y <= plan.y_nose));
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Kicks leave the flat deck tangentially
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn kick_start_is_flat(kick in arb_kick()) {
        prop_assert_eq!(kick.height_at(0.0), 0.0);
        prop_assert_eq!(kick.rotation_at(0.0), 0.0);
        let d = 1e-4;
        prop_assert!(kick.height_at(d) < 1e-6);
        prop_assert!(kick.rotation_at(d) < 0.01);
    }

    #[test]
    fn kick_is_monotonic(kick in arb_kick(), a in 0.0f64..40.0, b in 0.0f64..40.0) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        prop_assert!(kick.height_at(lo) <= kick.height_at(hi) + 1e-12);
        prop_assert!(kick.rotation_at(hi) <= kick.angle_deg + 1e-9);
    }
}

// ---------------------------------------------------------------------------
// 4. Boundary cases
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn zero_drop_is_flat_deck(board in 29.0f64..60.0, tub in 0.0f64..27.0) {
        let r = concave_radius(board, tub, 0.0, &BuildConfig::default());
        prop_assert!(r >= 100_000.0);
    }

    #[test]
    fn zero_nose_angle_is_flat_extension(p in arb_params()) {
        let mut p = p;
        write(&mut p, ParamId::NoseAngle, ParamValue::Number(0.0), ApplyMode::Interactive).unwrap();
        let cfg = BuildConfig::default();
        let dims = MoldDims::derive(&p, &cfg).unwrap();
        let slices = SliceSet::build(&dims, &cfg);
        prop_assert!(slices.nose().iter().all(|s| s.z == 0.0 && s.rotation == 0.0));
        prop_assert_eq!(dims.info().nose_height, 0.0);
    }
}
