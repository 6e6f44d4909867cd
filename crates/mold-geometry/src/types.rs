use mold_kernel::{GeometryKernel, KernelError, ShapeHandle};

/// Errors from the geometry pipeline.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeometryError {
    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("{step} produced a null shape")]
    NullShape { step: &'static str },

    #[error("{surface} surface loft failed: {reason}")]
    DegenerateLoft {
        surface: &'static str,
        reason: String,
    },

    #[error("infeasible dimensions: {reason}")]
    Infeasible { reason: String },
}

impl GeometryError {
    pub(crate) fn infeasible(reason: impl Into<String>) -> Self {
        GeometryError::Infeasible {
            reason: reason.into(),
        }
    }
}

/// Read-only values derived during a build and written back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InfoValues {
    pub total_length: f64,
    pub nose_height: f64,
    pub tail_height: f64,
}

/// Final solid plus the derived info values.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub solid: ShapeHandle,
    pub info: InfoValues,
}

/// Turn a null kernel result into an error naming the pipeline step.
pub(crate) fn ensure_valid(
    kernel: &dyn GeometryKernel,
    shape: ShapeHandle,
    step: &'static str,
) -> Result<ShapeHandle, GeometryError> {
    if kernel.is_null(&shape) {
        Err(GeometryError::NullShape { step })
    } else {
        Ok(shape)
    }
}
