//! The single failure boundary around the geometry pipeline.

use std::panic::{catch_unwind, AssertUnwindSafe};

use mold_geometry::{build_variant, BuildConfig};
use mold_kernel::{GeometryKernel, Point, ShapeHandle, Vector};
use mold_params::{MoldVariant, ParameterSet};
use tracing::{debug, error, instrument};

use crate::types::{BuildStatus, RecomputeError, RecomputeOutcome};

/// Rebuild the solid for `variant` from a parameter snapshot.
///
/// Never fails: geometry errors and panics inside the pipeline are logged and
/// replaced by the sentinel cube so the host always has something to show.
#[instrument(skip(kernel, params, config))]
pub fn recompute(
    kernel: &mut dyn GeometryKernel,
    params: &ParameterSet,
    variant: MoldVariant,
    config: &BuildConfig,
) -> RecomputeOutcome {
    let result = catch_unwind(AssertUnwindSafe(|| {
        build_variant(&mut *kernel, params, variant, config)
    }));

    let err = match result {
        Ok(Ok(output)) => {
            debug!(total_length = output.info.total_length, "recompute succeeded");
            return RecomputeOutcome {
                solid: Some(output.solid),
                status: BuildStatus::Built,
                info: Some(output.info),
            };
        }
        Ok(Err(e)) => RecomputeError::from(e),
        Err(payload) => RecomputeError::Panic {
            message: panic_message(payload.as_ref()),
        },
    };

    error!(error = %err, "mold recompute failed, using sentinel solid");
    RecomputeOutcome {
        solid: sentinel(kernel, config),
        status: BuildStatus::Fallback { error: err },
        info: None,
    }
}

/// The fixed cube shown in place of a failed build.
fn sentinel(kernel: &mut dyn GeometryKernel, config: &BuildConfig) -> Option<ShapeHandle> {
    match kernel.make_box(Point::origin(), Vector::repeat(config.sentinel_size)) {
        Ok(cube) if !kernel.is_null(&cube) => Some(cube),
        Ok(_) => {
            error!("sentinel solid is null");
            None
        }
        Err(e) => {
            error!(error = %e, "sentinel solid could not be built");
            None
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
