//! Assertion helpers with diagnostic output.
//!
//! Every failure names the context, the expected and actual values.

use mold_engine::{BuildStatus, RecomputeError};
use mold_kernel::{GeometryKernel, Point, ShapeHandle};
use mold_params::{ParamId, ParameterSet, RangeWarning};

use crate::helpers::HarnessError;

/// Assert the solid's bounding box matches expected corners within tolerance.
pub fn assert_bounding_box(
    kernel: &dyn GeometryKernel,
    solid: &ShapeHandle,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let bb = kernel.bounding_box(solid)?;
    let corners = [("min", bb.min, expected_min), ("max", bb.max, expected_max)];
    for (label, actual, expected) in corners {
        for i in 0..3 {
            if (actual[i] - expected[i]).abs() > tol {
                return Err(HarnessError::AssertionFailed {
                    detail: format!(
                        "[{}] bounding box {}[{}]: expected {:.3}, got {:.3} (tol={})",
                        ctx, label, i, expected[i], actual[i], tol,
                    ),
                });
            }
        }
    }
    Ok(())
}

/// Assert a numeric parameter's stored value.
pub fn assert_param(
    params: &ParameterSet,
    id: ParamId,
    expected: f64,
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = params.number(id).ok_or_else(|| HarnessError::AssertionFailed {
        detail: format!("[{ctx}] {id} is not numeric"),
    })?;
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] {id}: expected {expected}, got {actual} (tol={tol})"),
        })
    }
}

/// Assert that a range correction was reported for `id`.
pub fn assert_warned(warnings: &[RangeWarning], id: ParamId, ctx: &str) -> Result<(), HarnessError> {
    if warnings.iter().any(|w| w.param == id) {
        Ok(())
    } else {
        let seen: Vec<String> = warnings.iter().map(|w| w.param.to_string()).collect();
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected a warning for {}. Warned: [{}]",
                ctx,
                id,
                seen.join(", "),
            ),
        })
    }
}

/// Assert the object fell back to the sentinel cube of edge `size`.
pub fn assert_sentinel(
    kernel: &dyn GeometryKernel,
    solid: Option<&ShapeHandle>,
    status: &BuildStatus,
    size: f64,
    ctx: &str,
) -> Result<&'static str, HarnessError> {
    let cause = match status {
        BuildStatus::Fallback {
            error: RecomputeError::Geometry(_),
        } => "geometry",
        BuildStatus::Fallback {
            error: RecomputeError::Panic { .. },
        } => "panic",
        other => {
            return Err(HarnessError::AssertionFailed {
                detail: format!("[{ctx}] expected a fallback, got {other:?}"),
            })
        }
    };
    let solid = solid.ok_or_else(|| HarnessError::NoSolid {
        context: ctx.to_string(),
    })?;
    let bb = kernel.bounding_box(solid)?;
    if bb.min != Point::origin() || bb.max != Point::new(size, size, size) {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{ctx}] sentinel spans {:?} -> {:?}, expected a {size} cube at the origin",
                bb.min, bb.max
            ),
        });
    }
    Ok(cause)
}
