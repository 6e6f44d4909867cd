//! Named presets and nose/tail shape templates.
//!
//! Data comes from any [`PresetSource`] as opaque key → JSON value maps.
//! Application goes through [`crate::propagate::write`] in bulk mode, so every
//! value is clamped exactly like a user edit but the preset marker is left
//! alone until the whole preset is in.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::propagate::{diff, write};
use crate::set::ParameterSet;
use crate::types::{ApplyMode, ChangeReport, KickSide, ParamId, ParamValue, CUSTOM};

/// One saved preset or shape template.
pub type PresetData = BTreeMap<String, Value>;

/// Key of the single field a shape template carries.
pub const TAPER_START_KEY: &str = "TaperStart";

/// The board-shape-defining subset captured by a preset.
pub const PRESET_FIELDS: [ParamId; 14] = [
    ParamId::MoldCoreHeight,
    ParamId::Wheelbase,
    ParamId::ConcaveDrop,
    ParamId::NoseLength,
    ParamId::TailLength,
    ParamId::NoseAngle,
    ParamId::TailAngle,
    ParamId::ConcaveLength,
    ParamId::NoseFlatness,
    ParamId::TailFlatness,
    ParamId::NoseTaperStart,
    ParamId::TailTaperStart,
    ParamId::TransitionLength,
    ParamId::TransitionSmoothness,
];

/// Read side of preset persistence.
pub trait PresetSource {
    /// Stored names, sorted. Never includes "Custom".
    fn list_names(&self) -> Vec<String>;

    fn load(&self, name: &str) -> Option<PresetData>;
}

/// In-memory source, for tests and for hosts that keep presets elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    entries: BTreeMap<String, PresetData>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, data: PresetData) {
        self.entries.insert(name.into(), data);
    }

    pub fn with(mut self, name: impl Into<String>, data: PresetData) -> Self {
        self.insert(name, data);
        self
    }
}

impl PresetSource for MemorySource {
    fn list_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn load(&self, name: &str) -> Option<PresetData> {
        self.entries.get(name).cloned()
    }
}

/// Snapshot the preset subset of `params`.
pub fn capture_preset(params: &ParameterSet) -> PresetData {
    PRESET_FIELDS
        .iter()
        .filter_map(|id| params.number(*id).map(|v| (id.name().to_string(), Value::from(v))))
        .collect()
}

/// Select a named preset.
///
/// "Custom" only sets the marker. A named preset is written field by field in
/// dependency order, then the marker is set and both shape selectors are
/// reset to "Custom". Bad keys are skipped with a note; a missing preset
/// leaves everything untouched.
#[instrument(skip(params, source))]
pub fn select_preset(
    params: &mut ParameterSet,
    name: &str,
    source: &dyn PresetSource,
) -> ChangeReport {
    let before = params.clone();
    if name == CUSTOM {
        params.preset = CUSTOM.to_string();
        return finish(&before, params, ChangeReport::default(), false);
    }

    let Some(data) = source.load(name) else {
        warn!(preset = name, "preset not found");
        return ChangeReport {
            notes: vec![format!("preset {name:?} not found")],
            ..Default::default()
        };
    };

    let report = apply_data(params, &data);
    params.preset = name.to_string();
    params.nose_shape = CUSTOM.to_string();
    params.tail_shape = CUSTOM.to_string();
    info!(preset = name, fields = data.len(), "preset applied");
    finish(&before, params, report, true)
}

/// Select a shape template for one end. Only the taper start is loaded.
#[instrument(skip(params, source))]
pub fn select_shape(
    params: &mut ParameterSet,
    side: KickSide,
    name: &str,
    source: &dyn PresetSource,
) -> ChangeReport {
    let before = params.clone();
    let marker = match side {
        KickSide::Nose => &mut params.nose_shape,
        KickSide::Tail => &mut params.tail_shape,
    };
    if name == CUSTOM {
        *marker = CUSTOM.to_string();
        return finish(&before, params, ChangeReport::default(), false);
    }

    let Some(data) = source.load(name) else {
        warn!(shape = name, "shape template not found");
        return ChangeReport {
            notes: vec![format!("shape template {name:?} not found")],
            ..Default::default()
        };
    };

    let mut report = ChangeReport::default();
    match data.get(TAPER_START_KEY).map(json_to_value) {
        Some(Some(value)) => match write(params, side.taper_start(), value, ApplyMode::Bulk) {
            Ok(r) => report.merge(r),
            Err(e) => skip(&mut report, TAPER_START_KEY, &e.to_string()),
        },
        Some(None) => skip(&mut report, TAPER_START_KEY, "unsupported value"),
        None => {}
    }
    match side {
        KickSide::Nose => params.nose_shape = name.to_string(),
        KickSide::Tail => params.tail_shape = name.to_string(),
    }
    finish(&before, params, report, true)
}

/// Write every recognized key of `data` in dependency order.
fn apply_data(params: &mut ParameterSet, data: &PresetData) -> ChangeReport {
    let mut report = ChangeReport::default();
    for id in ParamId::ALL {
        let Some(raw) = data.get(id.name()) else {
            continue;
        };
        if matches!(id, ParamId::Preset | ParamId::NoseShape | ParamId::TailShape) {
            skip(&mut report, id.name(), "selector keys are not applied");
            continue;
        }
        let Some(value) = json_to_value(raw) else {
            skip(&mut report, id.name(), "unsupported value");
            continue;
        };
        match write(params, id, value, ApplyMode::Bulk) {
            Ok(r) => report.merge(r),
            Err(e) => skip(&mut report, id.name(), &e.to_string()),
        }
    }
    for key in data.keys() {
        if key.parse::<ParamId>().is_err() {
            skip(&mut report, key, "unknown parameter");
        }
    }
    report
}

fn json_to_value(raw: &Value) -> Option<ParamValue> {
    match raw {
        Value::Number(n) => n.as_f64().map(ParamValue::Number),
        Value::Bool(b) => Some(ParamValue::Flag(*b)),
        Value::String(s) => Some(ParamValue::Text(s.clone())),
        _ => None,
    }
}

fn skip(report: &mut ChangeReport, key: &str, reason: &str) {
    warn!(key, reason, "skipping preset key");
    report.notes.push(format!("skipped {key}: {reason}"));
}

fn finish(
    before: &ParameterSet,
    params: &ParameterSet,
    mut report: ChangeReport,
    recompute: bool,
) -> ChangeReport {
    report.changed = diff(before, params);
    report.recompute = recompute;
    report
}
