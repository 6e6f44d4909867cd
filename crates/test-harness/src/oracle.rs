//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail instead of
//! panicking, so one pass collects every failure.

use mold_engine::BuildStatus;
use mold_geometry::{BuildConfig, MoldDims};
use mold_kernel::{GeometryKernel, ShapeHandle, ShapeKind};
use mold_params::bounds::bounds;
use mold_params::{ParamId, ParamKind, ParameterSet};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::pass(name, detail)
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::fail(name, detail)
        }
    }
}

// ── Parameter Oracles ───────────────────────────────────────────────────────

/// Every bounded parameter lies inside its current range.
pub fn check_params_in_bounds(params: &ParameterSet) -> OracleVerdict {
    let mut outside = Vec::new();
    for id in ParamId::ALL {
        if id.kind() != ParamKind::Number {
            continue;
        }
        let (Some(v), Some((lo, hi))) = (params.number(id), bounds(id, params)) else {
            continue;
        };
        if v < lo || v > hi {
            outside.push(format!("{id}={v} not in [{lo}, {hi}]"));
        }
    }
    if outside.is_empty() {
        OracleVerdict::pass("params_in_bounds", "all parameters in range".to_string())
    } else {
        OracleVerdict::fail("params_in_bounds", outside.join("; "))
    }
}

/// The stored total length agrees with the truck, gap and kick lengths.
pub fn check_total_length(params: &ParameterSet) -> OracleVerdict {
    let derived = params.derived_total_length();
    let stored = params.total_length_check;
    if (derived - stored).abs() < 1e-9 {
        OracleVerdict::pass_val("total_length", format!("{stored:.3}"), stored)
    } else {
        OracleVerdict::fail_val(
            "total_length",
            format!("stored {stored:.3}, derived {derived:.3}"),
            stored,
        )
    }
}

// ── Solid Oracles ───────────────────────────────────────────────────────────

/// The handle is a non-null solid.
pub fn check_is_solid(kernel: &dyn GeometryKernel, solid: &ShapeHandle) -> OracleVerdict {
    match kernel.shape_kind(solid) {
        _ if kernel.is_null(solid) => OracleVerdict::fail("is_solid", "null shape".to_string()),
        Some(ShapeKind::Solid) => OracleVerdict::pass("is_solid", "solid".to_string()),
        other => OracleVerdict::fail("is_solid", format!("shape kind {other:?}")),
    }
}

/// The bounding box is centered on the x = 0 mirror plane.
pub fn check_mirror_symmetric(
    kernel: &dyn GeometryKernel,
    solid: &ShapeHandle,
    tol: f64,
) -> OracleVerdict {
    match kernel.bounding_box(solid) {
        Ok(bb) => {
            let skew = bb.min.x + bb.max.x;
            if skew.abs() <= tol {
                OracleVerdict::pass_val(
                    "mirror_symmetric",
                    format!("x in [{:.3}, {:.3}]", bb.min.x, bb.max.x),
                    skew,
                )
            } else {
                OracleVerdict::fail_val(
                    "mirror_symmetric",
                    format!("x in [{:.3}, {:.3}], skew {skew:.3}", bb.min.x, bb.max.x),
                    skew,
                )
            }
        }
        Err(e) => OracleVerdict::fail("mirror_symmetric", e.to_string()),
    }
}

/// The build did not fall back to the sentinel cube.
pub fn check_not_fallback(status: &BuildStatus) -> OracleVerdict {
    match status {
        BuildStatus::Built => OracleVerdict::pass("not_fallback", "built".to_string()),
        BuildStatus::NotBuilt => OracleVerdict::fail("not_fallback", "never built".to_string()),
        BuildStatus::Fallback { error } => OracleVerdict::fail("not_fallback", error.to_string()),
    }
}

/// The solid spans at least the mold length along y.
pub fn check_spans_mold_length(
    kernel: &dyn GeometryKernel,
    solid: &ShapeHandle,
    params: &ParameterSet,
) -> OracleVerdict {
    let Ok(bb) = kernel.bounding_box(solid) else {
        return OracleVerdict::fail("spans_mold_length", "no bounding box".to_string());
    };
    let span = bb.max.y - bb.min.y;
    if span + 1e-9 >= params.mold_length {
        OracleVerdict::pass_val("spans_mold_length", format!("y span {span:.3}"), span)
    } else {
        OracleVerdict::fail_val(
            "spans_mold_length",
            format!("y span {span:.3} < mold length {:.3}", params.mold_length),
            span,
        )
    }
}

/// The derived kick heights written back match a fresh derivation.
pub fn check_kick_heights(params: &ParameterSet, config: &BuildConfig) -> OracleVerdict {
    let info = match MoldDims::derive(params, config) {
        Ok(dims) => dims.info(),
        Err(e) => return OracleVerdict::fail("kick_heights", e.to_string()),
    };
    let dn = (info.nose_height - params.nose_height_check).abs();
    let dt = (info.tail_height - params.tail_height_check).abs();
    if dn < 1e-9 && dt < 1e-9 {
        OracleVerdict::pass(
            "kick_heights",
            format!("nose {:.3}, tail {:.3}", info.nose_height, info.tail_height),
        )
    } else {
        OracleVerdict::fail(
            "kick_heights",
            format!(
                "stored nose {:.3} / tail {:.3}, derived {:.3} / {:.3}",
                params.nose_height_check, params.tail_height_check, info.nose_height, info.tail_height
            ),
        )
    }
}
