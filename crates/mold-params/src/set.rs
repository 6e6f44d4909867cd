use serde::{Deserialize, Serialize};

use crate::types::{ConcaveStyle, ParamError, ParamId, ParamKind, ParamValue, CUSTOM};

/// The complete typed parameter set of one mold object.
///
/// Field names serialize as the host property names. Missing fields take
/// their defaults so partial snapshots load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ParameterSet {
    // Mold base
    pub mold_base_width: f64,
    pub mold_base_height: f64,
    pub guide_diameter: f64,
    pub mold_corner_radius: f64,
    pub add_fillet: bool,
    pub side_locks: bool,

    // Mold core
    pub mold_core_width: f64,
    pub mold_core_height: f64,
    pub mold_length: f64,
    pub mold_gap: f64,

    // Board geometry
    pub board_width: f64,
    pub wheelbase: f64,
    pub concave_drop: f64,
    pub concave_length: f64,
    pub concave_style: ConcaveStyle,
    pub tub_width: f64,
    pub veneer_thickness: f64,

    // Kicks
    pub transition_length: f64,
    pub transition_smoothness: f64,
    pub kick_gap: f64,
    pub nose_length: f64,
    pub tail_length: f64,
    pub nose_angle: f64,
    pub tail_angle: f64,

    // Truck holes
    pub truck_hole_diam: f64,
    pub truck_hole_dist_l: f64,
    pub truck_hole_dist_w: f64,

    // Shaper
    pub shaper_height: f64,
    pub nose_flatness: f64,
    pub tail_flatness: f64,
    pub nose_taper_start: f64,
    pub tail_taper_start: f64,
    pub nose_shape: String,
    pub tail_shape: String,

    pub preset: String,

    // Info, derived
    pub total_length_check: f64,
    pub nose_height_check: f64,
    pub tail_height_check: f64,
}

impl Default for ParameterSet {
    fn default() -> Self {
        let mut set = Self {
            mold_base_width: 75.0,
            mold_base_height: 10.0,
            guide_diameter: 6.5,
            mold_corner_radius: 5.0,
            add_fillet: true,
            side_locks: false,
            mold_core_width: 45.0,
            mold_core_height: 5.0,
            mold_length: 115.0,
            mold_gap: 2.5,
            board_width: 34.0,
            wheelbase: 44.0,
            concave_drop: 1.5,
            concave_length: 40.0,
            concave_style: ConcaveStyle::Flat,
            tub_width: 8.0,
            veneer_thickness: 2.5,
            transition_length: 8.0,
            transition_smoothness: 50.0,
            kick_gap: 1.0,
            nose_length: 16.5,
            tail_length: 16.5,
            nose_angle: 24.0,
            tail_angle: 24.0,
            truck_hole_diam: 1.7,
            truck_hole_dist_l: 7.5,
            truck_hole_dist_w: 5.5,
            shaper_height: 10.0,
            nose_flatness: 60.0,
            tail_flatness: 60.0,
            nose_taper_start: 22.0,
            tail_taper_start: 22.0,
            nose_shape: CUSTOM.to_string(),
            tail_shape: CUSTOM.to_string(),
            preset: CUSTOM.to_string(),
            total_length_check: 0.0,
            nose_height_check: 0.0,
            tail_height_check: 0.0,
        };
        set.total_length_check = set.derived_total_length();
        set
    }
}

impl ParameterSet {
    /// Board length from truck holes, kick gaps and both kicks.
    pub fn derived_total_length(&self) -> f64 {
        self.wheelbase
            + 2.0 * self.truck_hole_dist_l
            + 2.0 * self.kick_gap
            + self.nose_length
            + self.tail_length
    }

    /// Numeric parameter by id. `None` for flags and choices.
    pub fn number(&self, id: ParamId) -> Option<f64> {
        self.number_slot(id).copied()
    }

    pub fn get(&self, id: ParamId) -> ParamValue {
        match id {
            ParamId::AddFillet => ParamValue::Flag(self.add_fillet),
            ParamId::SideLocks => ParamValue::Flag(self.side_locks),
            ParamId::ConcaveStyle => ParamValue::Text(self.concave_style.to_string()),
            ParamId::NoseShape => ParamValue::Text(self.nose_shape.clone()),
            ParamId::TailShape => ParamValue::Text(self.tail_shape.clone()),
            ParamId::Preset => ParamValue::Text(self.preset.clone()),
            _ => ParamValue::Number(self.number(id).unwrap_or_default()),
        }
    }

    /// Store a value without any clamping or propagation. Only checks that
    /// the value has the right type for the parameter.
    pub fn put_raw(&mut self, id: ParamId, value: ParamValue) -> Result<(), ParamError> {
        match id.kind() {
            ParamKind::Number | ParamKind::Info => {
                let v = value
                    .as_number()
                    .ok_or_else(|| ParamError::mismatch(id, "number", &value))?;
                self.set_number(id, v);
            }
            ParamKind::Flag => {
                let v = value
                    .as_flag()
                    .ok_or_else(|| ParamError::mismatch(id, "flag", &value))?;
                match id {
                    ParamId::AddFillet => self.add_fillet = v,
                    _ => self.side_locks = v,
                }
            }
            ParamKind::Choice => {
                let v = value
                    .as_text()
                    .ok_or_else(|| ParamError::mismatch(id, "text", &value))?;
                match id {
                    ParamId::ConcaveStyle => self.concave_style = v.parse()?,
                    ParamId::NoseShape => self.nose_shape = v.to_string(),
                    ParamId::TailShape => self.tail_shape = v.to_string(),
                    _ => self.preset = v.to_string(),
                }
            }
        }
        Ok(())
    }

    /// Overwrite a numeric slot. No-op for non-numeric ids.
    pub(crate) fn set_number(&mut self, id: ParamId, value: f64) {
        if let Some(slot) = self.number_slot_mut(id) {
            *slot = value;
        }
    }

    fn number_slot(&self, id: ParamId) -> Option<&f64> {
        Some(match id {
            ParamId::MoldCoreWidth => &self.mold_core_width,
            ParamId::MoldCoreHeight => &self.mold_core_height,
            ParamId::MoldBaseWidth => &self.mold_base_width,
            ParamId::MoldBaseHeight => &self.mold_base_height,
            ParamId::MoldCornerRadius => &self.mold_corner_radius,
            ParamId::GuideDiameter => &self.guide_diameter,
            ParamId::BoardWidth => &self.board_width,
            ParamId::TubWidth => &self.tub_width,
            ParamId::Wheelbase => &self.wheelbase,
            ParamId::ConcaveDrop => &self.concave_drop,
            ParamId::ConcaveLength => &self.concave_length,
            ParamId::VeneerThickness => &self.veneer_thickness,
            ParamId::MoldGap => &self.mold_gap,
            ParamId::KickGap => &self.kick_gap,
            ParamId::NoseLength => &self.nose_length,
            ParamId::TailLength => &self.tail_length,
            ParamId::NoseAngle => &self.nose_angle,
            ParamId::TailAngle => &self.tail_angle,
            ParamId::TransitionLength => &self.transition_length,
            ParamId::TransitionSmoothness => &self.transition_smoothness,
            ParamId::TruckHoleDiam => &self.truck_hole_diam,
            ParamId::TruckHoleDistL => &self.truck_hole_dist_l,
            ParamId::TruckHoleDistW => &self.truck_hole_dist_w,
            ParamId::TotalLengthCheck => &self.total_length_check,
            ParamId::MoldLength => &self.mold_length,
            ParamId::NoseHeightCheck => &self.nose_height_check,
            ParamId::TailHeightCheck => &self.tail_height_check,
            ParamId::ShaperHeight => &self.shaper_height,
            ParamId::NoseFlatness => &self.nose_flatness,
            ParamId::TailFlatness => &self.tail_flatness,
            ParamId::NoseTaperStart => &self.nose_taper_start,
            ParamId::TailTaperStart => &self.tail_taper_start,
            ParamId::AddFillet
            | ParamId::SideLocks
            | ParamId::ConcaveStyle
            | ParamId::NoseShape
            | ParamId::TailShape
            | ParamId::Preset => return None,
        })
    }

    fn number_slot_mut(&mut self, id: ParamId) -> Option<&mut f64> {
        Some(match id {
            ParamId::MoldCoreWidth => &mut self.mold_core_width,
            ParamId::MoldCoreHeight => &mut self.mold_core_height,
            ParamId::MoldBaseWidth => &mut self.mold_base_width,
            ParamId::MoldBaseHeight => &mut self.mold_base_height,
            ParamId::MoldCornerRadius => &mut self.mold_corner_radius,
            ParamId::GuideDiameter => &mut self.guide_diameter,
            ParamId::BoardWidth => &mut self.board_width,
            ParamId::TubWidth => &mut self.tub_width,
            ParamId::Wheelbase => &mut self.wheelbase,
            ParamId::ConcaveDrop => &mut self.concave_drop,
            ParamId::ConcaveLength => &mut self.concave_length,
            ParamId::VeneerThickness => &mut self.veneer_thickness,
            ParamId::MoldGap => &mut self.mold_gap,
            ParamId::KickGap => &mut self.kick_gap,
            ParamId::NoseLength => &mut self.nose_length,
            ParamId::TailLength => &mut self.tail_length,
            ParamId::NoseAngle => &mut self.nose_angle,
            ParamId::TailAngle => &mut self.tail_angle,
            ParamId::TransitionLength => &mut self.transition_length,
            ParamId::TransitionSmoothness => &mut self.transition_smoothness,
            ParamId::TruckHoleDiam => &mut self.truck_hole_diam,
            ParamId::TruckHoleDistL => &mut self.truck_hole_dist_l,
            ParamId::TruckHoleDistW => &mut self.truck_hole_dist_w,
            ParamId::TotalLengthCheck => &mut self.total_length_check,
            ParamId::MoldLength => &mut self.mold_length,
            ParamId::NoseHeightCheck => &mut self.nose_height_check,
            ParamId::TailHeightCheck => &mut self.tail_height_check,
            ParamId::ShaperHeight => &mut self.shaper_height,
            ParamId::NoseFlatness => &mut self.nose_flatness,
            ParamId::TailFlatness => &mut self.tail_flatness,
            ParamId::NoseTaperStart => &mut self.nose_taper_start,
            ParamId::TailTaperStart => &mut self.tail_taper_start,
            ParamId::AddFillet
            | ParamId::SideLocks
            | ParamId::ConcaveStyle
            | ParamId::NoseShape
            | ParamId::TailShape
            | ParamId::Preset => return None,
        })
    }
}
