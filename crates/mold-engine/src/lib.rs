//! Host-facing mold object: a parameter set, the transient variant selector
//! and the stored solid, kept in step through the propagation engine and the
//! recompute boundary.

pub mod recompute;
pub mod types;

use mold_geometry::BuildConfig;
use mold_kernel::{GeometryKernel, ShapeHandle};
use mold_params::{
    write, ApplyMode, ChangeReport, ConcaveStyle, KickSide, MoldVariant, ParamError, ParamId,
    ParamKind, ParamValue, ParameterSet, RangeWarning,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

pub use recompute::recompute;
pub use types::*;

/// One parametric mold in a host document.
#[derive(Debug, Clone)]
pub struct MoldObject {
    pub id: Uuid,
    pub params: ParameterSet,
    /// Which solid is produced. Not part of the stored parameters.
    pub variant: MoldVariant,
    pub config: BuildConfig,
    pub solid: Option<ShapeHandle>,
    pub status: BuildStatus,
    /// Range corrections from the most recent edit.
    pub warnings: Vec<RangeWarning>,
}

impl Default for MoldObject {
    fn default() -> Self {
        Self::new(ParameterSet::default(), BuildConfig::default())
    }
}

impl MoldObject {
    /// A new object with nothing built yet.
    pub fn new(params: ParameterSet, config: BuildConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            params,
            variant: MoldVariant::default(),
            config,
            solid: None,
            status: BuildStatus::NotBuilt,
            warnings: Vec::new(),
        }
    }

    /// Write one parameter as a user edit and recompute if geometry changed.
    ///
    /// Preset and shape selectors load their named data from `libs`.
    #[instrument(skip(self, value, libs, kernel), fields(id = %self.id, param = %id))]
    pub fn set(
        &mut self,
        id: ParamId,
        value: ParamValue,
        libs: Libraries<'_>,
        kernel: &mut dyn GeometryKernel,
    ) -> Result<ChangeReport, EngineError> {
        let report = match id {
            ParamId::Preset => {
                let name = text(id, &value)?;
                mold_params::select_preset(&mut self.params, name, libs.presets)
            }
            ParamId::NoseShape | ParamId::TailShape => {
                let name = text(id, &value)?;
                let side = if id == ParamId::NoseShape {
                    KickSide::Nose
                } else {
                    KickSide::Tail
                };
                mold_params::select_shape(&mut self.params, side, name, libs.shapes)
            }
            _ => write(&mut self.params, id, value, ApplyMode::Interactive)?,
        };
        Ok(self.settle(report, kernel))
    }

    /// Select a named preset ("Custom" only sets the marker).
    pub fn select_preset(
        &mut self,
        name: &str,
        libs: Libraries<'_>,
        kernel: &mut dyn GeometryKernel,
    ) -> ChangeReport {
        let report = mold_params::select_preset(&mut self.params, name, libs.presets);
        self.settle(report, kernel)
    }

    /// Select a shape template for one end.
    pub fn select_shape(
        &mut self,
        side: KickSide,
        name: &str,
        libs: Libraries<'_>,
        kernel: &mut dyn GeometryKernel,
    ) -> ChangeReport {
        let report = mold_params::select_shape(&mut self.params, side, name, libs.shapes);
        self.settle(report, kernel)
    }

    /// Switch the produced variant. Returns whether anything changed.
    pub fn set_variant(&mut self, variant: MoldVariant, kernel: &mut dyn GeometryKernel) -> bool {
        if variant == self.variant && !matches!(self.status, BuildStatus::NotBuilt) {
            return false;
        }
        debug!(from = %self.variant, to = %variant, "variant switch");
        self.variant = variant;
        self.recompute(kernel);
        true
    }

    /// Toggle one of the boolean features.
    pub fn set_flag(
        &mut self,
        id: ParamId,
        on: bool,
        kernel: &mut dyn GeometryKernel,
    ) -> Result<ChangeReport, EngineError> {
        if id.kind() != ParamKind::Flag {
            return Err(EngineError::WrongSelector { param: id });
        }
        let report = write(&mut self.params, id, ParamValue::Flag(on), ApplyMode::Interactive)?;
        Ok(self.settle(report, kernel))
    }

    pub fn set_concave_style(
        &mut self,
        style: ConcaveStyle,
        kernel: &mut dyn GeometryKernel,
    ) -> Result<ChangeReport, EngineError> {
        let report = write(
            &mut self.params,
            ParamId::ConcaveStyle,
            ParamValue::Text(style.to_string()),
            ApplyMode::Interactive,
        )?;
        Ok(self.settle(report, kernel))
    }

    /// Rebuild the stored solid from the current parameters and variant.
    ///
    /// The solid is replaced wholesale. Derived info values are written back
    /// without touching the preset marker.
    #[instrument(skip_all, fields(id = %self.id, variant = %self.variant))]
    pub fn recompute(&mut self, kernel: &mut dyn GeometryKernel) -> &BuildStatus {
        let outcome = recompute(kernel, &self.params, self.variant, &self.config);
        if let Some(values) = outcome.info {
            self.params.total_length_check = values.total_length;
            self.params.nose_height_check = values.nose_height;
            self.params.tail_height_check = values.tail_height;
            info!(
                nose_height = values.nose_height,
                tail_height = values.tail_height,
                "mold recomputed"
            );
        }
        self.solid = outcome.solid;
        self.status = outcome.status;
        &self.status
    }

    /// Build each of `variants` in turn and hand the result to `visit`.
    ///
    /// The selector, solid and status are restored afterwards, also when the
    /// visitor panics.
    pub fn sweep_variants<F>(
        &mut self,
        variants: &[MoldVariant],
        kernel: &mut dyn GeometryKernel,
        mut visit: F,
    ) where
        F: FnMut(MoldVariant, Option<&ShapeHandle>, &BuildStatus),
    {
        let guard = SweepGuard {
            variant: self.variant,
            solid: self.solid,
            status: self.status.clone(),
            object: self,
        };
        for &variant in variants {
            guard.object.variant = variant;
            guard.object.recompute(kernel);
            visit(variant, guard.object.solid.as_ref(), &guard.object.status);
        }
    }

    /// Serializable view for hosts that log or persist object state.
    pub fn summary(&self) -> ObjectSummary {
        let error = match &self.status {
            BuildStatus::Fallback { error } => Some(error.to_string()),
            _ => None,
        };
        ObjectSummary {
            id: self.id,
            variant: self.variant,
            built: self.status.is_built(),
            error,
            warnings: self.warnings.iter().map(|w| w.message.clone()).collect(),
        }
    }

    fn settle(&mut self, report: ChangeReport, kernel: &mut dyn GeometryKernel) -> ChangeReport {
        self.warnings = report.warnings.clone();
        if report.recompute {
            self.recompute(kernel);
        }
        report
    }
}

/// Puts the selector and solid back when a sweep ends.
struct SweepGuard<'a> {
    object: &'a mut MoldObject,
    variant: MoldVariant,
    solid: Option<ShapeHandle>,
    status: BuildStatus,
}

impl Drop for SweepGuard<'_> {
    fn drop(&mut self) {
        self.object.variant = self.variant;
        self.object.solid = self.solid;
        self.object.status = std::mem::take(&mut self.status);
    }
}

fn text(id: ParamId, value: &ParamValue) -> Result<&str, EngineError> {
    value.as_text().ok_or_else(|| {
        EngineError::Param(ParamError::TypeMismatch {
            param: id,
            expected: "text",
            got: value.type_name(),
        })
    })
}
