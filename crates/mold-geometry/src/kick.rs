//! Nose and tail kick blends.
//!
//! A kick is a circular arc tangent to the flat deck, followed by a straight
//! ramp at the kick angle once the arc has turned through that angle.

use mold_params::KickSide;

/// One sampled station along a kick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickSample {
    /// Longitudinal position.
    pub y: f64,
    /// Lift above the flat deck.
    pub z: f64,
    /// Tilt about the x axis in degrees. Negative on the tail.
    pub rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickProfile {
    pub angle_deg: f64,
    pub radius: f64,
}

impl KickProfile {
    /// Blend radius from the transition length: `t / sin(angle)`, or
    /// `flat_radius` for a near-zero angle, clamped to `[min, max]`.
    pub fn from_transition(
        transition_length: f64,
        angle_deg: f64,
        flat_radius: f64,
        min: f64,
        max: f64,
    ) -> Self {
        let sin = angle_deg.to_radians().sin();
        let radius = if sin > 0.001 {
            transition_length / sin
        } else {
            flat_radius
        };
        Self {
            angle_deg,
            radius: mold_params::bounds::clamp(radius, min, max),
        }
    }

    /// Longitudinal extent of the arc part, `R·sin(angle)`.
    pub fn arc_extent(&self) -> f64 {
        self.radius * self.angle_deg.to_radians().sin()
    }

    /// Lift at distance `d` from the kick start.
    pub fn height_at(&self, d: f64) -> f64 {
        if d <= 0.0 {
            return 0.0;
        }
        let r = self.radius;
        let extent = self.arc_extent();
        if d <= extent {
            r - (r * r - d * d).max(0.0).sqrt()
        } else {
            let a = self.angle_deg.to_radians();
            r * (1.0 - a.cos()) + (d - extent) * a.tan()
        }
    }

    /// Tilt in degrees at distance `d` from the kick start, always >= 0.
    pub fn rotation_at(&self, d: f64) -> f64 {
        if d <= self.arc_extent() {
            (d / self.radius).clamp(-1.0, 1.0).asin().to_degrees()
        } else {
            self.angle_deg
        }
    }
}

/// Sample one kick from its start (`|y| = start`) out to the overrun tip
/// (`|y| = tip`) in `steps` equal intervals.
///
/// The tail is returned tip first so that concatenating tail, center and
/// nose samples runs in increasing y.
pub fn sample_kick(
    kick: &KickProfile,
    side: KickSide,
    start: f64,
    tip: f64,
    steps: usize,
) -> Vec<KickSample> {
    let steps = steps.max(1);
    let span = tip - start;
    (0..=steps)
        .map(|i| {
            let idx = match side {
                KickSide::Nose => i,
                KickSide::Tail => steps - i,
            };
            let d = span * idx as f64 / steps as f64;
            let z = kick.height_at(d);
            let rot = kick.rotation_at(d);
            match side {
                KickSide::Nose => KickSample {
                    y: start + d,
                    z,
                    rotation: rot,
                },
                KickSide::Tail => KickSample {
                    y: -start - d,
                    z,
                    rotation: -rot,
                },
            }
        })
        .collect()
}
