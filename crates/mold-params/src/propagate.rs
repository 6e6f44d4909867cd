//! Constraint propagation: clamp a written value, re-clamp everything whose
//! bounds read it, and keep the preset marker honest.

use tracing::{debug, instrument, warn};

use crate::bounds::{bound_inputs, bounds, clamp, describe};
use crate::set::ParameterSet;
use crate::types::{
    ApplyMode, ChangeReport, ParamError, ParamId, ParamKind, ParamValue, RangeWarning, CUSTOM,
};

/// Write one parameter through the clamp rules.
///
/// Numbers are clamped into their (possibly value-dependent) range with a
/// warning on correction, dependents are re-clamped in dependency order and
/// the total length is re-derived. Interactive writes of shape-defining
/// parameters reset the preset marker to "Custom"; bulk writes never do.
///
/// Writing `Preset`, `NoseShape` or `TailShape` here only stores the marker.
/// Loading the named data is done by [`crate::presets`].
#[instrument(skip(params, value), fields(param = %id))]
pub fn write(
    params: &mut ParameterSet,
    id: ParamId,
    value: ParamValue,
    mode: ApplyMode,
) -> Result<ChangeReport, ParamError> {
    if id.is_read_only() {
        return Err(ParamError::ReadOnly { param: id });
    }

    let before = params.clone();
    let mut report = ChangeReport::default();

    if id.kind() == ParamKind::Number {
        let requested = value
            .as_number()
            .ok_or_else(|| ParamError::mismatch(id, "number", &value))?;
        if !requested.is_finite() {
            return Err(ParamError::NonFinite { param: id });
        }
        clamp_into(params, id, requested, &mut report);
    } else {
        params.put_raw(id, value)?;
    }

    propagate(params, id, &mut report);

    if mode == ApplyMode::Interactive && id.invalidates_preset() && params.preset != CUSTOM {
        debug!(preset = %params.preset, "detaching from preset");
        params.preset = CUSTOM.to_string();
    }

    report.changed = diff(&before, params);
    report.recompute = report.changed.iter().any(|c| affects_geometry(*c));
    Ok(report)
}

/// Re-clamp every bounded parameter in dependency order and re-derive the
/// total length. Brings a snapshot that bypassed [`write`] back in range.
pub fn normalize(params: &mut ParameterSet) -> Vec<RangeWarning> {
    let mut report = ChangeReport::default();
    for id in ParamId::ALL {
        if id == ParamId::TotalLengthCheck {
            params.total_length_check = params.derived_total_length();
            continue;
        }
        if let Some(current) = params.number(id) {
            clamp_into(params, id, current, &mut report);
        }
    }
    report.warnings
}

/// True when `params` already satisfies every bound.
pub fn is_consistent(params: &ParameterSet) -> bool {
    ParamId::ALL.iter().all(|&id| match (bounds(id, params), params.number(id)) {
        (Some((lo, hi)), Some(v)) => v >= lo && v <= hi.max(lo),
        _ => true,
    }) && params.total_length_check == params.derived_total_length()
}

fn affects_geometry(id: ParamId) -> bool {
    matches!(id.kind(), ParamKind::Number | ParamKind::Flag) || id == ParamId::ConcaveStyle
}

/// Store `clamp(requested)` and record a warning when it differs.
fn clamp_into(
    params: &mut ParameterSet,
    id: ParamId,
    requested: f64,
    report: &mut ChangeReport,
) -> f64 {
    let Some((lo, hi)) = bounds(id, params) else {
        return requested;
    };
    // NaN fails every comparison, fall back to the lower bound
    let applied = if requested.is_nan() {
        lo
    } else {
        clamp(requested, lo, hi)
    };
    params.set_number(id, applied);
    if applied != requested {
        let message = describe(id, lo, hi, applied);
        warn!(param = %id, requested, applied, "{message}");
        report.warnings.push(RangeWarning {
            param: id,
            requested,
            applied,
            message,
        });
    }
    applied
}

/// Re-clamp every parameter whose bounds read a changed value.
fn propagate(params: &mut ParameterSet, origin: ParamId, report: &mut ChangeReport) {
    let mut dirty = vec![origin];
    for id in ParamId::ALL {
        if id == origin || !bound_inputs(id).iter().any(|i| dirty.contains(i)) {
            continue;
        }
        if id == ParamId::TotalLengthCheck {
            let total = params.derived_total_length();
            if total != params.total_length_check {
                params.total_length_check = total;
                dirty.push(id);
            }
            continue;
        }
        if let Some(current) = params.number(id) {
            if clamp_into(params, id, current, report) != current {
                dirty.push(id);
            }
        }
    }
}

pub(crate) fn diff(before: &ParameterSet, after: &ParameterSet) -> Vec<ParamId> {
    ParamId::ALL
        .iter()
        .copied()
        .filter(|id| before.get(*id) != after.get(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn set(p: &mut ParameterSet, id: ParamId, v: f64) -> ChangeReport {
        write(p, id, v.into(), ApplyMode::Interactive).unwrap()
    }

    #[test]
    fn in_range_value_accepted() {
        let mut p = ParameterSet::default();
        let r = set(&mut p, ParamId::BoardWidth, 34.0);
        assert!(r.warnings.is_empty());
        assert!(r.changed.is_empty());
        assert!(!r.recompute);
        assert_eq!(p.board_width, 34.0);
    }

    #[test]
    fn board_width_clamps_to_core() {
        let mut p = ParameterSet::default();
        let r = set(&mut p, ParamId::BoardWidth, 70.0);
        assert_eq!(p.board_width, 45.0);
        assert_eq!(r.warnings.len(), 1);
        assert_eq!(r.warnings[0].requested, 70.0);
        assert_eq!(r.warnings[0].applied, 45.0);
        assert!(r.recompute);
    }

    #[test]
    fn concave_length_limited_by_wheelbase() {
        let mut p = ParameterSet::default();
        set(&mut p, ParamId::ConcaveLength, 50.0);
        assert_eq!(p.concave_length, 44.0);
    }

    #[test]
    fn transition_length_limited_by_kicks() {
        let mut p = ParameterSet::default();
        let r = set(&mut p, ParamId::TransitionLength, 10.0);
        assert!(r.warnings.is_empty());
        assert_eq!(p.transition_length, 10.0);
        set(&mut p, ParamId::TransitionLength, 20.0);
        assert_eq!(p.transition_length, 14.5);
    }

    #[test]
    fn shrinking_core_cascades() {
        let mut p = ParameterSet::default();
        p.board_width = 40.0;
        p.guide_diameter = 13.0;
        let r = set(&mut p, ParamId::MoldCoreWidth, 35.0);
        // Base keeps 75 but its max is now 75, guide limit grows to 18
        assert_eq!(p.mold_base_width, 75.0);
        assert_eq!(p.board_width, 35.0);
        assert_eq!(p.guide_diameter, 13.0);
        assert!(r.changed(ParamId::BoardWidth));
        assert!(r.warnings.iter().any(|w| w.param == ParamId::BoardWidth));
    }

    #[test]
    fn widening_core_pulls_base_and_guide() {
        let mut p = ParameterSet::default();
        set(&mut p, ParamId::MoldCoreWidth, 60.0);
        assert_eq!(p.mold_base_width, 75.0);
        assert_relative_eq!(p.guide_diameter, 5.5);
    }

    #[test]
    fn total_length_rederived_and_mold_length_follows() {
        let mut p = ParameterSet::default();
        p.mold_length = 95.0;
        let r = set(&mut p, ParamId::NoseLength, 23.0);
        assert_eq!(p.total_length_check, 100.5);
        assert_eq!(p.mold_length, 100.5);
        assert!(r.changed(ParamId::TotalLengthCheck));
        assert!(r.changed(ParamId::MoldLength));
    }

    #[test]
    fn veneer_raises_mold_gap() {
        let mut p = ParameterSet::default();
        set(&mut p, ParamId::VeneerThickness, 3.0);
        assert_eq!(p.mold_gap, 3.0);
    }

    #[test]
    fn interactive_edit_detaches_preset() {
        let mut p = ParameterSet::default();
        p.preset = "PRO".into();
        set(&mut p, ParamId::Wheelbase, 45.0);
        assert_eq!(p.preset, CUSTOM);
    }

    #[test]
    fn bulk_edit_keeps_preset() {
        let mut p = ParameterSet::default();
        p.preset = "PRO".into();
        write(&mut p, ParamId::Wheelbase, 45.0.into(), ApplyMode::Bulk).unwrap();
        assert_eq!(p.preset, "PRO");
    }

    #[test]
    fn add_fillet_keeps_preset_but_recomputes() {
        let mut p = ParameterSet::default();
        p.preset = "PRO".into();
        let r = write(&mut p, ParamId::AddFillet, false.into(), ApplyMode::Interactive).unwrap();
        assert_eq!(p.preset, "PRO");
        assert!(r.recompute);
    }

    #[test]
    fn read_only_rejected() {
        let mut p = ParameterSet::default();
        let err = write(&mut p, ParamId::TotalLengthCheck, 1.0.into(), ApplyMode::Interactive);
        assert_eq!(
            err,
            Err(ParamError::ReadOnly {
                param: ParamId::TotalLengthCheck
            })
        );
    }

    #[test]
    fn non_finite_rejected() {
        let mut p = ParameterSet::default();
        let before = p.clone();
        assert!(write(&mut p, ParamId::Wheelbase, f64::NAN.into(), ApplyMode::Interactive).is_err());
        assert_eq!(p, before);
    }

    #[test]
    fn normalize_fixes_bypassed_snapshot() {
        let mut p = ParameterSet::default();
        p.board_width = 90.0;
        p.tub_width = 80.0;
        p.wheelbase = 10.0;
        assert!(!is_consistent(&p));
        let warnings = normalize(&mut p);
        assert_eq!(p.board_width, 45.0);
        assert_eq!(p.tub_width, 43.0);
        assert_eq!(p.wheelbase, 30.0);
        assert_eq!(p.concave_length, 30.0);
        assert!(warnings.len() >= 4);
        assert!(is_consistent(&p));
    }
}
