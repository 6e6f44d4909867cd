//! MoldBench driver behavior.

use mold_params::{ConcaveStyle, MoldVariant, ParamId, ParamValue};
use preset_store::{JsonLibrary, StoreError};
use test_harness::helpers::temp_library_path;
use test_harness::{HarnessError, MoldBench};

#[test]
fn unknown_parameter_name() {
    let mut m = MoldBench::new();
    let err = m.set("Camber", 1.0).unwrap_err();
    assert!(matches!(err, HarnessError::UnknownParameter { .. }));
    assert!(m.history().is_empty());
}

#[test]
fn engine_errors_pass_through() {
    let mut m = MoldBench::new();
    let err = m.set("TotalLengthCheck", 10.0).unwrap_err();
    assert!(matches!(err, HarnessError::Engine(_)));
    assert!(matches!(
        m.flag(ParamId::Wheelbase, true).unwrap_err(),
        HarnessError::Engine(_)
    ));
}

#[test]
fn no_solid_before_build() {
    let m = MoldBench::new();
    assert!(matches!(m.solid(), Err(HarnessError::NoSolid { .. })));
}

#[test]
fn history_records_each_step() {
    let mut m = MoldBench::new();
    m.variant(MoldVariant::FemaleMold);
    m.set("ConcaveDrop", 2.0).unwrap();
    m.flag(ParamId::SideLocks, true).unwrap();
    m.concave_style(ConcaveStyle::Organic).unwrap();
    let actions: Vec<&str> = m.history().iter().map(|(a, _)| a.as_str()).collect();
    assert_eq!(
        actions,
        vec!["variant", "set ConcaveDrop", "flag SideLocks", "concave style"]
    );
    m.assert_oracles_pass().unwrap();
}

#[test]
fn text_values_round_trip() {
    let mut m = MoldBench::new();
    m.set_value("ConcaveStyle", ParamValue::Text("Organic".into()))
        .unwrap();
    assert_eq!(
        m.value("ConcaveStyle").unwrap(),
        ParamValue::Text("Organic".into())
    );
}

#[test]
fn presets_from_a_saved_library() {
    let path = temp_library_path("presets.json");
    let mut lib = JsonLibrary::open(&path);
    let mut source = MoldBench::new();
    source.set("Wheelbase", 48.0).unwrap();
    source.set("NoseAngle", 18.0).unwrap();
    assert_eq!(source.save_preset(&mut lib, "saved").unwrap(), "SAVED");

    let reopened = JsonLibrary::open(&path);
    let data = mold_params::PresetSource::load(&reopened, "SAVED").unwrap();
    let mut m = MoldBench::new().with_preset("SAVED", data);
    m.variant(MoldVariant::MaleMold);
    m.preset("SAVED").unwrap();
    assert_eq!(m.params().wheelbase, 48.0);
    assert_eq!(m.params().nose_angle, 18.0);
    m.assert_oracles_pass().unwrap();
}

#[test]
fn saved_preset_is_selectable_on_the_same_bench() {
    let mut lib = JsonLibrary::open(temp_library_path("presets.json"));
    let mut m = MoldBench::new();
    m.set("Wheelbase", 48.0).unwrap();
    m.save_preset(&mut lib, "mine").unwrap();
    m.set("Wheelbase", 40.0).unwrap();

    m.preset("MINE").unwrap();
    assert_eq!(m.params().wheelbase, 48.0);
    assert_eq!(m.history().last().unwrap().0, "preset");
}

#[test]
fn store_errors_pass_through() {
    let mut lib = JsonLibrary::open(temp_library_path("presets.json"));
    let mut m = MoldBench::new();
    let err = m.save_preset(&mut lib, " custom ").unwrap_err();
    assert!(matches!(err, HarnessError::Store(StoreError::InvalidName { .. })));
    assert!(m.history().is_empty());
}
