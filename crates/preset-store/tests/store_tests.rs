use std::path::PathBuf;

use mold_params::{
    select_preset, select_shape, write, ApplyMode, KickSide, ParamId, ParamValue, ParameterSet,
    PresetSource, PRESET_FIELDS,
};
use preset_store::{JsonLibrary, StoreError};
use proptest::prelude::*;
use uuid::Uuid;

// ── Helper Functions ─────────────────────────────────────────────────────

/// A fresh file path under the system temp dir.
fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("preset-store-{}", Uuid::new_v4()))
        .join(name)
}

fn edited() -> ParameterSet {
    let mut p = ParameterSet::default();
    for (id, v) in [
        (ParamId::Wheelbase, 47.0),
        (ParamId::NoseAngle, 21.5),
        (ParamId::TailLength, 15.25),
        (ParamId::ConcaveDrop, 2.2),
        (ParamId::NoseTaperStart, 27.0),
    ] {
        write(&mut p, id, ParamValue::Number(v), ApplyMode::Interactive).unwrap();
    }
    p
}

// ── Reading ──────────────────────────────────────────────────────────────

#[test]
fn missing_file_is_empty_library() {
    let lib = JsonLibrary::open(temp_file("presets.json"));
    assert!(lib.list_names().is_empty());
    assert!(lib.load("PRO").is_none());
}

#[test]
fn corrupt_file_is_empty_library() {
    let path = temp_file("presets.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "{ not json").unwrap();
    let lib = JsonLibrary::open(&path);
    assert!(lib.list_names().is_empty());
}

#[test]
fn malformed_entry_does_not_cost_its_siblings() {
    let path = temp_file("presets.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"GOOD": {"Wheelbase": 46.0}, "BAD": 3}"#).unwrap();

    let mut lib = JsonLibrary::open(&path);
    assert_eq!(lib.list_names(), vec!["GOOD".to_string()]);
    lib.save_preset("NEW", &edited()).unwrap();

    let reopened = JsonLibrary::open(&path);
    assert_eq!(reopened.list_names(), vec!["GOOD".to_string(), "NEW".to_string()]);
    assert_eq!(reopened.load("GOOD").unwrap()["Wheelbase"], 46.0);
}

#[test]
fn custom_is_never_listed() {
    let path = temp_file("presets.json");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, r#"{"Custom": {}, "B": {}, "A": {}}"#).unwrap();
    let lib = JsonLibrary::open(&path);
    assert_eq!(lib.list_names(), vec!["A".to_string(), "B".to_string()]);
}

// ── Writing ──────────────────────────────────────────────────────────────

#[test]
fn save_preset_stores_subset_only() {
    let path = temp_file("presets.json");
    let mut lib = JsonLibrary::open(&path);
    let name = lib.save_preset("  street ", &edited()).unwrap();
    assert_eq!(name, "STREET");

    let data = lib.load("STREET").unwrap();
    assert_eq!(data.len(), PRESET_FIELDS.len());
    assert!(!data.contains_key("BoardWidth"));
    assert_eq!(data["Wheelbase"], 47.0);

    let reopened = JsonLibrary::open(&path);
    assert_eq!(reopened.load("STREET"), Some(data));
}

#[test]
fn save_overwrites_existing_name() {
    let mut lib = JsonLibrary::open(temp_file("presets.json"));
    lib.save_preset("pro", &ParameterSet::default()).unwrap();
    lib.save_preset("PRO", &edited()).unwrap();
    assert_eq!(lib.list_names(), vec!["PRO".to_string()]);
    assert_eq!(lib.load("PRO").unwrap()["Wheelbase"], 47.0);
}

#[test]
fn reserved_names_are_rejected() {
    let mut lib = JsonLibrary::open(temp_file("presets.json"));
    let err = lib.save_preset("Custom", &ParameterSet::default()).unwrap_err();
    assert!(matches!(err, StoreError::InvalidName { .. }));
    assert!(lib.save_shape("", 20.0).is_err());
}

#[test]
fn delete_removes_and_persists() {
    let path = temp_file("shapes.json");
    let mut lib = JsonLibrary::open(&path);
    lib.save_shape("pointy", 30.0).unwrap();
    lib.save_shape("round", 18.0).unwrap();
    lib.delete("POINTY").unwrap();
    assert_eq!(JsonLibrary::open(&path).list_names(), vec!["ROUND".to_string()]);
    assert_eq!(
        lib.delete("POINTY"),
        Err(StoreError::NotFound {
            name: "POINTY".to_string()
        })
    );
}

#[test]
fn reload_sees_other_writers() {
    let path = temp_file("presets.json");
    let mut a = JsonLibrary::open(&path);
    let mut b = JsonLibrary::open(&path);
    b.save_preset("other", &ParameterSet::default()).unwrap();
    assert!(a.list_names().is_empty());
    a.reload();
    assert_eq!(a.list_names(), vec!["OTHER".to_string()]);
}

// ── Applying stored data ─────────────────────────────────────────────────

#[test]
fn saved_preset_round_trips() {
    let original = edited();
    let mut lib = JsonLibrary::open(temp_file("presets.json"));
    lib.save_preset("mine", &original).unwrap();

    let mut p = ParameterSet::default();
    select_preset(&mut p, "MINE", &lib);
    for id in PRESET_FIELDS {
        assert_eq!(p.number(id), original.number(id), "{id} differs");
    }
    assert_eq!(p.preset, "MINE");
}

#[test]
fn saved_shape_sets_taper() {
    let mut lib = JsonLibrary::open(temp_file("shapes.json"));
    lib.save_shape("blunt", 12.0).unwrap();
    let mut p = ParameterSet::default();
    select_shape(&mut p, KickSide::Tail, "BLUNT", &lib);
    assert_eq!(p.tail_taper_start, 12.0);
    assert_eq!(p.tail_shape, "BLUNT");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn any_saved_subset_round_trips(
        wheelbase in 30.0f64..50.0,
        drop in 0.0f64..3.4,
        angle in 0.0f64..45.0,
    ) {
        let mut original = ParameterSet::default();
        write(&mut original, ParamId::Wheelbase, ParamValue::Number(wheelbase), ApplyMode::Bulk).unwrap();
        write(&mut original, ParamId::ConcaveDrop, ParamValue::Number(drop), ApplyMode::Bulk).unwrap();
        write(&mut original, ParamId::TailAngle, ParamValue::Number(angle), ApplyMode::Bulk).unwrap();

        let mut lib = JsonLibrary::open(temp_file("presets.json"));
        lib.save_preset("p", &original).unwrap();
        let mut p = ParameterSet::default();
        select_preset(&mut p, "P", &lib);
        for id in PRESET_FIELDS {
            prop_assert_eq!(p.number(id), original.number(id));
        }
    }
}
