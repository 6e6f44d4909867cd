//! Integration tests for the mold object: edits, presets, recompute fallback
//! and the variant sweep.

use std::panic::{catch_unwind, AssertUnwindSafe};

use approx::assert_relative_eq;
use mold_engine::{BuildStatus, Libraries, MoldObject, RecomputeError};
use mold_kernel::{GeometryKernel, MockKernel, MockOp, Point, ShapeKind};
use mold_params::{
    is_consistent, ConcaveStyle, KickSide, MemorySource, MoldVariant, ParamId, ParamValue,
    PresetData,
};
use proptest::prelude::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn data(v: serde_json::Value) -> PresetData {
    serde_json::from_value(v).unwrap()
}

fn presets() -> MemorySource {
    MemorySource::new().with(
        "STREET",
        data(json!({
            "Wheelbase": 46.0,
            "NoseLength": 15.0,
            "TailLength": 14.0,
            "NoseAngle": 20.0,
            "TailAngle": 22.0,
            "ConcaveDrop": 1.2,
        })),
    )
}

fn shapes() -> MemorySource {
    MemorySource::new().with("POINTY", data(json!({ "TaperStart": 30.0 })))
}

fn built(variant: MoldVariant) -> (MoldObject, MockKernel) {
    let mut k = MockKernel::new();
    let mut obj = MoldObject::default();
    obj.set_variant(variant, &mut k);
    (obj, k)
}

// ---------------------------------------------------------------------------
// Edits
// ---------------------------------------------------------------------------

#[test]
fn board_width_within_core_is_kept() {
    let (mut obj, mut k) = built(MoldVariant::MaleMold);
    let (p, s) = (MemorySource::new(), MemorySource::new());
    let libs = Libraries { presets: &p, shapes: &s };
    let report = obj
        .set(ParamId::BoardWidth, ParamValue::Number(34.0), libs, &mut k)
        .unwrap();
    assert!(report.warnings.is_empty());
    assert_eq!(obj.params.board_width, 34.0);
}

#[test]
fn wide_board_clamps_with_warning() {
    let (mut obj, mut k) = built(MoldVariant::MaleMold);
    let (p, s) = (MemorySource::new(), MemorySource::new());
    let libs = Libraries { presets: &p, shapes: &s };
    obj.set(ParamId::BoardWidth, ParamValue::Number(70.0), libs, &mut k)
        .unwrap();
    assert_eq!(obj.params.board_width, 45.0);
    assert_eq!(obj.warnings.len(), 1);
    assert_eq!(obj.warnings[0].param, ParamId::BoardWidth);
    assert!(obj.status.is_built());
}

#[test]
fn read_only_info_is_rejected() {
    let (mut obj, mut k) = built(MoldVariant::MaleMold);
    let (p, s) = (MemorySource::new(), MemorySource::new());
    let libs = Libraries { presets: &p, shapes: &s };
    let before = obj.params.clone();
    assert!(obj
        .set(ParamId::NoseHeightCheck, ParamValue::Number(3.0), libs, &mut k)
        .is_err());
    assert_eq!(obj.params, before);
}

#[test]
fn edit_detaches_from_preset() {
    let mut k = MockKernel::new();
    let (p, s) = (presets(), shapes());
    let libs = Libraries { presets: &p, shapes: &s };
    let mut obj = MoldObject::default();
    obj.select_preset("STREET", libs, &mut k);
    assert_eq!(obj.params.preset, "STREET");

    obj.set_flag(ParamId::AddFillet, false, &mut k).unwrap();
    assert_eq!(obj.params.preset, "STREET");

    obj.set(ParamId::NoseAngle, ParamValue::Number(25.0), libs, &mut k)
        .unwrap();
    assert_eq!(obj.params.preset, "Custom");
}

#[test]
fn concave_style_switch_rebuilds() {
    let (mut obj, mut k) = built(MoldVariant::MaleMold);
    let lofts = k.call_count(MockOp::Loft);
    let report = obj.set_concave_style(ConcaveStyle::Organic, &mut k).unwrap();
    assert!(report.recompute);
    // One loft per surface instead of three.
    assert_eq!(k.call_count(MockOp::Loft) - lofts, 3);
}

// ---------------------------------------------------------------------------
// Presets and shapes
// ---------------------------------------------------------------------------

#[test]
fn preset_through_set_loads_values() {
    let mut k = MockKernel::new();
    let (p, s) = (presets(), shapes());
    let libs = Libraries { presets: &p, shapes: &s };
    let mut obj = MoldObject::default();
    let report = obj
        .set(ParamId::Preset, ParamValue::Text("STREET".into()), libs, &mut k)
        .unwrap();
    assert!(report.recompute);
    assert_eq!(obj.params.wheelbase, 46.0);
    assert_eq!(obj.params.preset, "STREET");
    assert_eq!(obj.params.nose_shape, "Custom");
    assert!(obj.status.is_built());
}

#[test]
fn preset_twice_is_idempotent() {
    let mut k = MockKernel::new();
    let (p, s) = (presets(), shapes());
    let libs = Libraries { presets: &p, shapes: &s };
    let mut obj = MoldObject::default();
    obj.select_preset("STREET", libs, &mut k);
    let first = obj.params.clone();
    obj.select_preset("STREET", libs, &mut k);
    assert_eq!(obj.params, first);
}

#[test]
fn missing_preset_changes_nothing() {
    let mut k = MockKernel::new();
    let (p, s) = (presets(), shapes());
    let libs = Libraries { presets: &p, shapes: &s };
    let mut obj = MoldObject::default();
    let before = obj.params.clone();
    let report = obj.select_preset("NOPE", libs, &mut k);
    assert!(!report.recompute);
    assert_eq!(report.notes.len(), 1);
    assert_eq!(obj.params, before);
    assert!(obj.solid.is_none());
}

#[test]
fn shape_template_sets_taper_only() {
    let mut k = MockKernel::new();
    let (p, s) = (presets(), shapes());
    let libs = Libraries { presets: &p, shapes: &s };
    let mut obj = MoldObject::default();
    obj.set(ParamId::TailShape, ParamValue::Text("POINTY".into()), libs, &mut k)
        .unwrap();
    assert_eq!(obj.params.tail_taper_start, 30.0);
    assert_eq!(obj.params.tail_shape, "POINTY");
    assert_eq!(obj.params.nose_taper_start, 22.0);

    obj.select_shape(KickSide::Nose, "POINTY", libs, &mut k);
    assert_eq!(obj.params.nose_taper_start, 30.0);
}

// ---------------------------------------------------------------------------
// Recompute
// ---------------------------------------------------------------------------

#[test]
fn recompute_writes_info_back() {
    let (obj, _k) = built(MoldVariant::MaleMold);
    assert_relative_eq!(obj.params.total_length_check, 94.0);
    assert!(obj.params.nose_height_check > 0.0);
    assert_relative_eq!(obj.params.nose_height_check, obj.params.tail_height_check);
    assert_eq!(obj.params.preset, "Custom");
    assert!(is_consistent(&obj.params));
}

#[test]
fn infeasible_snapshot_yields_sentinel() {
    let mut k = MockKernel::new();
    let mut obj = MoldObject::default();
    obj.params.guide_diameter = 50.0;
    obj.set_variant(MoldVariant::MaleMold, &mut k);

    assert!(matches!(
        obj.status,
        BuildStatus::Fallback {
            error: RecomputeError::Geometry(_)
        }
    ));
    let solid = obj.solid.unwrap();
    assert_eq!(k.shape_kind(&solid), Some(ShapeKind::Solid));
    let bb = k.bounding_box(&solid).unwrap();
    assert_eq!(bb.max, Point::new(20.0, 20.0, 20.0));
}

#[test]
fn recovery_after_fallback() {
    let mut k = MockKernel::new();
    k.fail_on(MockOp::Loft);
    let mut obj = MoldObject::default();
    obj.set_variant(MoldVariant::FemaleMold, &mut k);
    assert!(obj.status.is_fallback());

    k.clear_failures();
    obj.recompute(&mut k);
    assert!(obj.status.is_built());
    let bb = k.bounding_box(&obj.solid.unwrap()).unwrap();
    assert!(bb.max.x - bb.min.x > 20.0);
}

// ---------------------------------------------------------------------------
// Variant switches and sweeps
// ---------------------------------------------------------------------------

#[test]
fn variant_round_trip_is_identical() {
    let (mut obj, mut k) = built(MoldVariant::MaleMold);
    let first = k.fingerprint(&obj.solid.unwrap()).unwrap();
    for v in [
        MoldVariant::FemaleMold,
        MoldVariant::ShaperTemplate,
        MoldVariant::MaleMold,
    ] {
        assert!(obj.set_variant(v, &mut k));
    }
    let again = k.fingerprint(&obj.solid.unwrap()).unwrap();
    assert_eq!(first, again);
}

#[test]
fn same_variant_is_a_no_op() {
    let (mut obj, mut k) = built(MoldVariant::MaleMold);
    let count = k.shape_count();
    assert!(!obj.set_variant(MoldVariant::MaleMold, &mut k));
    assert_eq!(k.shape_count(), count);
}

#[test]
fn sweep_visits_and_restores() {
    let (mut obj, mut k) = built(MoldVariant::BoardPreview);
    let original = obj.solid;
    let mut seen = Vec::new();
    obj.sweep_variants(
        &[MoldVariant::MaleMold, MoldVariant::FemaleMold],
        &mut k,
        |v, solid, status| {
            assert!(status.is_built());
            seen.push((v, solid.copied()));
        },
    );
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].0, MoldVariant::MaleMold);
    assert_ne!(seen[0].1, seen[1].1);
    assert_eq!(obj.variant, MoldVariant::BoardPreview);
    assert_eq!(obj.solid, original);
    assert!(obj.status.is_built());
}

#[test]
fn sweep_restores_when_visitor_panics() {
    let (mut obj, mut k) = built(MoldVariant::ShaperTemplate);
    let original = obj.solid;
    let result = catch_unwind(AssertUnwindSafe(|| {
        obj.sweep_variants(&MoldVariant::ALL, &mut k, |_, _, _| panic!("export failed"));
    }));
    assert!(result.is_err());
    assert_eq!(obj.variant, MoldVariant::ShaperTemplate);
    assert_eq!(obj.solid, original);
}

// ---------------------------------------------------------------------------
// Random edits always leave a renderable object
// ---------------------------------------------------------------------------

fn arb_edit() -> impl Strategy<Value = (ParamId, f64)> {
    let ids = vec![
        ParamId::MoldCoreWidth,
        ParamId::MoldBaseWidth,
        ParamId::GuideDiameter,
        ParamId::BoardWidth,
        ParamId::TubWidth,
        ParamId::ConcaveDrop,
        ParamId::NoseLength,
        ParamId::TailAngle,
        ParamId::TransitionLength,
        ParamId::NoseTaperStart,
    ];
    (prop::sample::select(ids), -50.0f64..150.0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn edits_always_leave_a_solid(
        edits in prop::collection::vec(arb_edit(), 1..8),
        variant in prop::sample::select(MoldVariant::ALL.to_vec()),
    ) {
        let mut k = MockKernel::new();
        let (p, s) = (MemorySource::new(), MemorySource::new());
        let libs = Libraries { presets: &p, shapes: &s };
        let mut obj = MoldObject::default();
        obj.set_variant(variant, &mut k);
        for (id, v) in edits {
            obj.set(id, ParamValue::Number(v), libs, &mut k).unwrap();
            prop_assert!(is_consistent(&obj.params));
        }
        prop_assert!(obj.solid.is_some());
        prop_assert!(!matches!(obj.status, BuildStatus::NotBuilt));
    }
}
