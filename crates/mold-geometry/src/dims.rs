//! Derived dimensions for one recompute.
//!
//! Everything downstream reads `MoldDims` only, never the raw parameter set,
//! so a snapshot that bypassed the propagation engine is brought back in
//! range here.

use mold_params::{bounds, normalize, ConcaveStyle, KickSide, ParamId, ParameterSet};
use tracing::{debug, warn};

use crate::config::BuildConfig;
use crate::kick::KickProfile;
use crate::types::{GeometryError, InfoValues};

#[derive(Debug, Clone, PartialEq)]
pub struct MoldDims {
    pub core_width: f64,
    pub core_height: f64,
    pub base_width: f64,
    pub base_height: f64,
    pub corner_radius: f64,
    pub guide_diameter: f64,
    pub add_fillet: bool,
    pub side_locks: bool,

    pub mold_length: f64,
    pub mold_gap: f64,
    pub board_width: f64,
    pub tub_width: f64,
    pub veneer_thickness: f64,
    pub wheelbase: f64,
    pub kick_gap: f64,
    pub concave_style: ConcaveStyle,
    /// Half of the concave length, never below half the configured floor.
    pub concave_end: f64,

    pub truck_hole_diam: f64,
    pub truck_hole_dist_l: f64,
    pub truck_hole_dist_w: f64,

    pub nose_length: f64,
    pub tail_length: f64,
    pub nose_kick: KickProfile,
    pub tail_kick: KickProfile,

    pub concave_radius: f64,
    pub gap_radius: f64,
    pub veneer_radius: f64,
    /// Width of every transverse profile.
    pub generating_width: f64,
    /// `|y|` where both kicks start.
    pub kick_start: f64,
    /// `|y|` of the last sampled slice on either end.
    pub tip: f64,

    pub shaper_height: f64,
    /// Fractions in `[0, 1]`.
    pub nose_flatness: f64,
    pub tail_flatness: f64,
    pub nose_taper_start: f64,
    pub tail_taper_start: f64,

    pub total_length: f64,
}

impl MoldDims {
    pub fn derive(params: &ParameterSet, config: &BuildConfig) -> Result<Self, GeometryError> {
        for id in ParamId::ALL {
            if let Some(v) = params.number(id) {
                if !v.is_finite() {
                    return Err(GeometryError::infeasible(format!("{id} is not finite ({v})")));
                }
            }
        }
        check_guide_fit(params)?;

        let mut p = params.clone();
        let corrected = normalize(&mut p);
        if !corrected.is_empty() {
            warn!(count = corrected.len(), "snapshot out of range, clamped for build");
        }

        let nose_kick = kick_for(&p, KickSide::Nose, config);
        let tail_kick = kick_for(&p, KickSide::Tail, config);

        let concave_radius = concave_radius(p.board_width, p.tub_width, p.concave_drop, config);
        let (gap_radius, veneer_radius) = if concave_radius < config.offset_radius_limit {
            (
                concave_radius + p.mold_gap,
                concave_radius - p.veneer_thickness,
            )
        } else {
            (concave_radius, concave_radius)
        };

        let flat_zone = p.wheelbase + 2.0 * p.truck_hole_dist_l + 2.0 * p.kick_gap;
        let dims = Self {
            core_width: p.mold_core_width,
            core_height: p.mold_core_height,
            base_width: p.mold_base_width,
            base_height: p.mold_base_height,
            corner_radius: p.mold_corner_radius,
            guide_diameter: p.guide_diameter,
            add_fillet: p.add_fillet,
            side_locks: p.side_locks,
            mold_length: p.mold_length,
            mold_gap: p.mold_gap,
            board_width: p.board_width,
            tub_width: p.tub_width,
            veneer_thickness: p.veneer_thickness,
            wheelbase: p.wheelbase,
            kick_gap: p.kick_gap,
            concave_style: p.concave_style,
            concave_end: p.concave_length.max(config.min_concave_length) / 2.0,
            truck_hole_diam: p.truck_hole_diam,
            truck_hole_dist_l: p.truck_hole_dist_l,
            truck_hole_dist_w: p.truck_hole_dist_w,
            nose_length: p.nose_length,
            tail_length: p.tail_length,
            nose_kick,
            tail_kick,
            concave_radius,
            gap_radius,
            veneer_radius,
            generating_width: p.mold_core_width + config.generating_width_margin,
            kick_start: flat_zone / 2.0,
            tip: p.mold_length / 2.0 + config.overrun_margin,
            shaper_height: p.shaper_height,
            nose_flatness: (p.nose_flatness / 100.0).clamp(0.0, 1.0),
            tail_flatness: (p.tail_flatness / 100.0).clamp(0.0, 1.0),
            nose_taper_start: p.nose_taper_start,
            tail_taper_start: p.tail_taper_start,
            total_length: p.total_length_check,
        };
        debug!(
            concave_radius,
            nose_radius = dims.nose_kick.radius,
            tail_radius = dims.tail_kick.radius,
            "derived mold dimensions"
        );
        Ok(dims)
    }

    pub fn info(&self) -> InfoValues {
        InfoValues {
            total_length: self.total_length,
            nose_height: self.nose_kick.height_at(self.nose_length),
            tail_height: self.tail_kick.height_at(self.tail_length),
        }
    }
}

/// Circular-segment radius for half-width `(board − tub)/2` and depth `drop`.
pub fn concave_radius(board_width: f64, tub_width: f64, drop: f64, config: &BuildConfig) -> f64 {
    let h = (board_width - tub_width) / 2.0;
    if drop > 0.01 && h > 0.1 {
        (h * h + drop * drop) / (2.0 * drop)
    } else {
        config.flat_concave_radius
    }
}

fn kick_for(p: &ParameterSet, side: KickSide, config: &BuildConfig) -> KickProfile {
    let angle = match side {
        KickSide::Nose => p.nose_angle,
        KickSide::Tail => p.tail_angle,
    };
    KickProfile::from_transition(
        p.transition_length,
        angle,
        config.flat_kick_radius,
        config.kick_radius_min,
        config.kick_radius_max,
    )
}

/// Guide pins must fit between core and base edge. Checked on the raw value
/// since normalizing would silently shrink the pin.
fn check_guide_fit(p: &ParameterSet) -> Result<(), GeometryError> {
    let mut fit = p.clone();
    for id in [ParamId::MoldCoreWidth, ParamId::MoldBaseWidth] {
        if let (Some((lo, hi)), Some(v)) = (bounds::bounds(id, &fit), fit.number(id)) {
            let clamped = bounds::clamp(v, lo, hi);
            match id {
                ParamId::MoldCoreWidth => fit.mold_core_width = clamped,
                _ => fit.mold_base_width = clamped,
            }
        }
    }
    let limit = bounds::guide_diameter_limit(&fit);
    if limit < 0.1 {
        return Err(GeometryError::infeasible(format!(
            "no room for guide pins between core ({}) and base ({})",
            fit.mold_core_width, fit.mold_base_width
        )));
    }
    if p.guide_diameter > limit {
        return Err(GeometryError::infeasible(format!(
            "guide diameter {} exceeds {limit}",
            p.guide_diameter
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn derive(p: &ParameterSet) -> MoldDims {
        MoldDims::derive(p, &BuildConfig::default()).unwrap()
    }

    #[test]
    fn default_dims() {
        let d = derive(&ParameterSet::default());
        // h = 13, d = 1.5
        assert_relative_eq!(d.concave_radius, (169.0 + 2.25) / 3.0, epsilon = 1e-12);
        assert_relative_eq!(d.gap_radius, d.concave_radius + 2.5);
        assert_relative_eq!(d.veneer_radius, d.concave_radius - 2.5);
        assert_eq!(d.generating_width, 50.0);
        assert_eq!(d.kick_start, (44.0 + 15.0 + 2.0) / 2.0);
        assert_eq!(d.tip, 115.0 / 2.0 + 4.0);
        assert_eq!(d.concave_end, 20.0);
        assert_eq!(d.nose_flatness, 0.6);
        assert_eq!(d.total_length, 94.0);
    }

    #[test]
    fn zero_drop_is_flat() {
        let mut p = ParameterSet::default();
        p.concave_drop = 0.0;
        let d = derive(&p);
        assert!(d.concave_radius >= 100_000.0);
        assert_eq!(d.gap_radius, d.concave_radius);
        assert_eq!(d.veneer_radius, d.concave_radius);
    }

    #[test]
    fn zero_concave_length_is_floored() {
        let mut p = ParameterSet::default();
        p.concave_length = 0.0;
        assert_relative_eq!(derive(&p).concave_end, 0.05);
    }

    #[test]
    fn info_heights() {
        let d = derive(&ParameterSet::default());
        let info = d.info();
        assert_eq!(info.total_length, 94.0);
        assert!(info.nose_height > 0.0);
        assert_relative_eq!(info.nose_height, info.tail_height);

        let mut p = ParameterSet::default();
        p.nose_angle = 0.0;
        assert_eq!(derive(&p).info().nose_height, 0.0);
    }

    #[test]
    fn out_of_range_snapshot_is_clamped() {
        let mut p = ParameterSet::default();
        p.board_width = 70.0;
        p.wheelbase = 10.0;
        let d = derive(&p);
        assert_eq!(d.board_width, 45.0);
        assert_eq!(d.wheelbase, 30.0);
        assert_eq!(d.total_length, 80.0);
    }

    #[test]
    fn oversized_guide_is_infeasible() {
        let mut p = ParameterSet::default();
        p.guide_diameter = 50.0;
        let err = MoldDims::derive(&p, &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, GeometryError::Infeasible { .. }));
    }

    #[test]
    fn narrow_base_is_infeasible() {
        let mut p = ParameterSet::default();
        p.mold_base_width = 47.0;
        p.guide_diameter = 0.1;
        assert!(MoldDims::derive(&p, &BuildConfig::default()).is_err());
    }

    #[test]
    fn non_finite_is_infeasible() {
        let mut p = ParameterSet::default();
        p.nose_angle = f64::NAN;
        assert!(MoldDims::derive(&p, &BuildConfig::default()).is_err());
    }
}
