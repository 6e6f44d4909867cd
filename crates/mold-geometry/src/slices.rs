//! Longitudinal slice stations.

use mold_params::KickSide;

use crate::config::BuildConfig;
use crate::dims::MoldDims;
use crate::kick::{sample_kick, KickSample};

/// Placement of one transverse profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    pub y: f64,
    pub z: f64,
    /// Tilt about the x axis in degrees.
    pub rotation: f64,
    /// Outside the concave zone or on a tilted kick.
    pub flat: bool,
}

/// Slices in increasing y: tail kick, flat center, nose kick.
///
/// `split_tail` is the last tail-kick slice (the tail kick start) and
/// `split_nose` the last flat-center slice. Adjacent segments share their
/// boundary slice when lofted separately.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSet {
    pub slices: Vec<Slice>,
    pub split_tail: usize,
    pub split_nose: usize,
}

impl SliceSet {
    pub fn build(dims: &MoldDims, config: &BuildConfig) -> Self {
        let concave_end = dims.concave_end;
        let start = dims.kick_start;
        let is_flat = |y: f64, rotation: f64| {
            y.abs() > concave_end + config.concave_edge_tolerance
                || rotation.abs() > config.kick_rotation_tolerance
        };
        let slice = |s: KickSample| Slice {
            y: s.y,
            z: s.z,
            rotation: s.rotation,
            flat: is_flat(s.y, s.rotation),
        };
        let center = |y: f64| Slice {
            y,
            z: 0.0,
            rotation: 0.0,
            flat: is_flat(y, 0.0),
        };

        let mut slices: Vec<Slice> =
            sample_kick(&dims.tail_kick, KickSide::Tail, start, dims.tip, config.kick_steps)
                .into_iter()
                .map(slice)
                .collect();
        let split_tail = slices.len() - 1;

        if start > concave_end {
            slices.push(center(-start + config.flat_slice_offset));
        }
        slices.push(center(-concave_end));
        slices.push(center(concave_end));
        if start > concave_end {
            slices.push(center(start - config.flat_slice_offset));
        }
        let split_nose = slices.len() - 1;

        slices.extend(
            sample_kick(&dims.nose_kick, KickSide::Nose, start, dims.tip, config.kick_steps)
                .into_iter()
                .map(slice),
        );

        Self {
            slices,
            split_tail,
            split_nose,
        }
    }

    pub fn tail(&self) -> &[Slice] {
        &self.slices[..=self.split_tail]
    }

    pub fn center(&self) -> &[Slice] {
        &self.slices[self.split_tail..=self.split_nose]
    }

    pub fn nose(&self) -> &[Slice] {
        &self.slices[self.split_nose..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mold_params::ParameterSet;

    fn set_for(p: &ParameterSet) -> SliceSet {
        let cfg = BuildConfig::default();
        SliceSet::build(&MoldDims::derive(p, &cfg).unwrap(), &cfg)
    }

    #[test]
    fn default_layout() {
        let s = set_for(&ParameterSet::default());
        // 6 tail + 4 center + 6 nose
        assert_eq!(s.slices.len(), 16);
        assert_eq!(s.split_tail, 5);
        assert_eq!(s.split_nose, 9);
        assert!(s.slices.windows(2).all(|w| w[1].y > w[0].y));
        assert_eq!(s.tail().len(), 6);
        assert_eq!(s.center().len(), 5);
        assert_eq!(s.nose().len(), 7);
    }

    #[test]
    fn only_concave_zone_is_curved() {
        let s = set_for(&ParameterSet::default());
        for sl in &s.slices {
            assert_eq!(sl.flat, sl.y.abs() > 20.01 || sl.rotation.abs() > 0.1, "{sl:?}");
        }
        assert!(!s.slices[7].flat);
        assert!(s.slices[6].flat);
    }

    #[test]
    fn center_slices_bracket_concave_zone() {
        let s = set_for(&ParameterSet::default());
        let expected = [-30.5, -30.4, -20.0, 20.0, 30.4];
        assert_eq!(s.center().len(), expected.len());
        for (sl, y) in s.center().iter().zip(expected) {
            assert_relative_eq!(sl.y, y, epsilon = 1e-12);
        }
        assert!(s.center().iter().all(|sl| sl.z == 0.0 && sl.rotation == 0.0));
    }

    #[test]
    fn flat_kicks_have_no_tilt() {
        let mut p = ParameterSet::default();
        p.nose_angle = 0.0;
        let s = set_for(&p);
        assert!(s.nose().iter().all(|sl| sl.z == 0.0 && sl.rotation == 0.0));
    }
}
