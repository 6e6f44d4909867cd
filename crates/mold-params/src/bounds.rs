//! Range table for every bounded parameter.
//!
//! Several bounds are other current values. `bound_inputs` lists what each
//! bound reads so a change can be propagated to its dependents.

use crate::set::ParameterSet;
use crate::types::ParamId;

/// `max(min(v, hi), lo)`. When a dependent `hi` falls below `lo`, `lo` wins.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

/// Inclusive `(min, max)` for a bounded numeric parameter, evaluated against
/// the current values of `p`. `None` for flags, choices and info fields.
pub fn bounds(id: ParamId, p: &ParameterSet) -> Option<(f64, f64)> {
    let b = match id {
        ParamId::MoldCoreWidth => (29.0, 60.0),
        ParamId::MoldCoreHeight => (5.0, 25.0),
        ParamId::MoldBaseWidth => (p.mold_core_width, p.mold_core_width + 40.0),
        ParamId::MoldBaseHeight => (0.0, 20.0),
        ParamId::MoldCornerRadius => (0.1, 5.0),
        ParamId::GuideDiameter => (0.1, guide_diameter_limit(p)),
        ParamId::BoardWidth => (29.0, p.mold_core_width),
        ParamId::TubWidth => (0.0, p.board_width - 2.0),
        ParamId::Wheelbase => (30.0, 50.0),
        ParamId::ConcaveDrop => (0.0, 3.4),
        ParamId::ConcaveLength => (0.0, p.wheelbase),
        ParamId::VeneerThickness => (1.0, 3.5),
        ParamId::MoldGap => (p.veneer_thickness, 4.0),
        ParamId::KickGap => (0.0, 5.0),
        ParamId::NoseLength | ParamId::TailLength => (5.0, 23.0),
        ParamId::NoseAngle | ParamId::TailAngle => (0.0, 45.0),
        ParamId::TransitionLength => (0.1, transition_length_limit(p)),
        ParamId::TransitionSmoothness => (0.0, 100.0),
        ParamId::TruckHoleDiam => (0.5, 5.0),
        ParamId::TruckHoleDistL | ParamId::TruckHoleDistW => (1.0, 20.0),
        ParamId::MoldLength => (p.total_length_check, 130.0),
        ParamId::ShaperHeight => (0.5, 50.0),
        ParamId::NoseFlatness | ParamId::TailFlatness => (0.0, 100.0),
        ParamId::NoseTaperStart | ParamId::TailTaperStart => (1.0, 60.0),
        ParamId::AddFillet
        | ParamId::SideLocks
        | ParamId::ConcaveStyle
        | ParamId::NoseShape
        | ParamId::TailShape
        | ParamId::Preset
        | ParamId::TotalLengthCheck
        | ParamId::NoseHeightCheck
        | ParamId::TailHeightCheck => return None,
    };
    Some(b)
}

/// Largest guide pin that still leaves 1 mm of base on either side.
pub fn guide_diameter_limit(p: &ParameterSet) -> f64 {
    (p.mold_base_width - p.mold_core_width) / 2.0 - 2.0
}

/// The transition arc must fit inside the shorter kick with 2 mm to spare,
/// but is never capped below 1 mm.
pub fn transition_length_limit(p: &ParameterSet) -> f64 {
    (p.nose_length.min(p.tail_length) - 2.0).max(1.0)
}

/// Parameters read by `id`'s bounds (or, for the derived total length, by
/// its formula).
pub fn bound_inputs(id: ParamId) -> &'static [ParamId] {
    match id {
        ParamId::MoldBaseWidth | ParamId::BoardWidth => &[ParamId::MoldCoreWidth],
        ParamId::GuideDiameter => &[ParamId::MoldBaseWidth, ParamId::MoldCoreWidth],
        ParamId::TubWidth => &[ParamId::BoardWidth],
        ParamId::ConcaveLength => &[ParamId::Wheelbase],
        ParamId::MoldGap => &[ParamId::VeneerThickness],
        ParamId::TransitionLength => &[ParamId::NoseLength, ParamId::TailLength],
        ParamId::TotalLengthCheck => &[
            ParamId::Wheelbase,
            ParamId::TruckHoleDistL,
            ParamId::KickGap,
            ParamId::NoseLength,
            ParamId::TailLength,
        ],
        ParamId::MoldLength => &[ParamId::TotalLengthCheck],
        _ => &[],
    }
}

/// Human-readable reason attached to a range warning.
pub(crate) fn describe(id: ParamId, lo: f64, hi: f64, applied: f64) -> String {
    if applied == lo {
        format!("{id} minimum is {lo}mm")
    } else if applied == hi {
        match bound_inputs(id).first() {
            Some(anchor) => format!("{id} limited to {hi}mm by {anchor}"),
            None => format!("{id} maximum is {hi}mm"),
        }
    } else {
        format!("{id} adjusted to {applied}")
    }
}
