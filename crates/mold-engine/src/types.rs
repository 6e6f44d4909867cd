use mold_geometry::{GeometryError, InfoValues};
use mold_kernel::ShapeHandle;
use mold_params::{ParamError, ParamId, PresetSource};
use serde::Serialize;

/// Why a recompute fell back to the sentinel solid.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RecomputeError {
    #[error("geometry error: {0}")]
    Geometry(#[from] GeometryError),

    #[error("geometry pipeline panicked: {message}")]
    Panic { message: String },
}

/// State of the stored solid.
#[derive(Debug, Clone, Default)]
pub enum BuildStatus {
    /// Nothing computed yet.
    #[default]
    NotBuilt,
    Built,
    /// The sentinel cube stands in for the real solid.
    Fallback { error: RecomputeError },
}

impl BuildStatus {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildStatus::Built)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, BuildStatus::Fallback { .. })
    }
}

/// Result of one pass through the failure boundary.
#[derive(Debug, Clone)]
pub struct RecomputeOutcome {
    /// The built solid, the sentinel cube, or `None` if even the sentinel
    /// could not be made.
    pub solid: Option<ShapeHandle>,
    pub status: BuildStatus,
    /// Derived values, only when the build succeeded.
    pub info: Option<InfoValues>,
}

/// Where named presets and shape templates come from.
#[derive(Clone, Copy)]
pub struct Libraries<'a> {
    pub presets: &'a dyn PresetSource,
    pub shapes: &'a dyn PresetSource,
}

/// Errors from host-object edits. Geometry failures never surface here.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("{param} must be set through its dedicated selector")]
    WrongSelector { param: ParamId },
}

/// Serializable summary of an object, for hosts that persist or display it.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub id: uuid::Uuid,
    pub variant: mold_params::MoldVariant,
    pub built: bool,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}
