//! MoldBench: fluent API for scripting mold edits in tests.
//!
//! Drives a real `MoldObject` over the deterministic `MockKernel`, with
//! in-memory preset and shape libraries. Parameters are addressed by their
//! host property names for readability.

use mold_engine::{BuildStatus, Libraries, MoldObject};
use mold_geometry::BuildConfig;
use mold_kernel::{BoundingBox, GeometryKernel, MockKernel, MockOp, ShapeHandle};
use mold_params::{
    capture_preset, ChangeReport, ConcaveStyle, KickSide, MemorySource, MoldVariant, ParamId,
    ParamValue, ParameterSet, PresetData, RangeWarning,
};
use preset_store::JsonLibrary;

use tracing::debug;

use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};
use crate::report::MoldReport;

/// A fluent driver for one mold object.
pub struct MoldBench {
    pub object: MoldObject,
    pub kernel: MockKernel,
    presets: MemorySource,
    shapes: MemorySource,
    history: Vec<(String, String)>,
    auto_check: bool,
}

impl Default for MoldBench {
    fn default() -> Self {
        Self::new()
    }
}

impl MoldBench {
    /// Default parameters, nothing built.
    pub fn new() -> Self {
        Self::with_config(BuildConfig::default())
    }

    pub fn with_config(config: BuildConfig) -> Self {
        Self {
            object: MoldObject::new(ParameterSet::default(), config),
            kernel: MockKernel::new(),
            presets: MemorySource::new(),
            shapes: MemorySource::new(),
            history: Vec::new(),
            auto_check: false,
        }
    }

    /// After every edit, fail unless the parameters are in range.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    pub fn with_preset(mut self, name: &str, data: PresetData) -> Self {
        self.presets.insert(name, data);
        self
    }

    pub fn with_shape(mut self, name: &str, data: PresetData) -> Self {
        self.shapes.insert(name, data);
        self
    }

    // ── Edits ───────────────────────────────────────────────────────────

    /// Write a number by property name.
    pub fn set(&mut self, name: &str, value: f64) -> Result<ChangeReport, HarnessError> {
        self.set_value(name, ParamValue::Number(value))
    }

    /// Write any value by property name.
    pub fn set_value(&mut self, name: &str, value: ParamValue) -> Result<ChangeReport, HarnessError> {
        let id: ParamId = name.parse().map_err(|_| HarnessError::UnknownParameter {
            name: name.to_string(),
        })?;
        let shown = format!("{value:?}");
        let libs = Libraries {
            presets: &self.presets,
            shapes: &self.shapes,
        };
        let report = self.object.set(id, value, libs, &mut self.kernel)?;
        self.record(&format!("set {name}"), &shown)?;
        Ok(report)
    }

    pub fn flag(&mut self, id: ParamId, on: bool) -> Result<ChangeReport, HarnessError> {
        let report = self.object.set_flag(id, on, &mut self.kernel)?;
        self.record(&format!("flag {id}"), &on.to_string())?;
        Ok(report)
    }

    pub fn concave_style(&mut self, style: ConcaveStyle) -> Result<ChangeReport, HarnessError> {
        let report = self.object.set_concave_style(style, &mut self.kernel)?;
        self.record("concave style", &style.to_string())?;
        Ok(report)
    }

    pub fn preset(&mut self, name: &str) -> Result<ChangeReport, HarnessError> {
        let libs = Libraries {
            presets: &self.presets,
            shapes: &self.shapes,
        };
        let report = self.object.select_preset(name, libs, &mut self.kernel);
        self.record("preset", name)?;
        Ok(report)
    }

    pub fn shape(&mut self, side: KickSide, name: &str) -> Result<ChangeReport, HarnessError> {
        let libs = Libraries {
            presets: &self.presets,
            shapes: &self.shapes,
        };
        let report = self.object.select_shape(side, name, libs, &mut self.kernel);
        self.record(&format!("{side:?} shape"), name)?;
        Ok(report)
    }

    /// Save the current parameters to `library` and make the stored name
    /// selectable on this bench. Returns the stored name.
    pub fn save_preset(
        &mut self,
        library: &mut JsonLibrary,
        name: &str,
    ) -> Result<String, HarnessError> {
        let stored = library.save_preset(name, &self.object.params)?;
        self.presets
            .insert(stored.as_str(), capture_preset(&self.object.params));
        self.record("save preset", &stored)?;
        Ok(stored)
    }

    /// Select a variant, building it if anything changed.
    pub fn variant(&mut self, variant: MoldVariant) -> &mut Self {
        self.object.set_variant(variant, &mut self.kernel);
        self.history.push(("variant".to_string(), variant.to_string()));
        self
    }

    /// Overwrite the snapshot directly, bypassing the clamp rules, as corrupt
    /// stored data would.
    pub fn force(&mut self, edit: impl FnOnce(&mut ParameterSet)) -> &mut Self {
        edit(&mut self.object.params);
        self.history.push(("force".to_string(), String::new()));
        self
    }

    pub fn recompute(&mut self) -> &BuildStatus {
        self.object.recompute(&mut self.kernel)
    }

    pub fn fail_on(&mut self, op: MockOp) -> &mut Self {
        self.kernel.fail_on(op);
        self
    }

    pub fn clear_failures(&mut self) -> &mut Self {
        self.kernel.clear_failures();
        self
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn params(&self) -> &ParameterSet {
        &self.object.params
    }

    pub fn value(&self, name: &str) -> Result<ParamValue, HarnessError> {
        let id: ParamId = name.parse().map_err(|_| HarnessError::UnknownParameter {
            name: name.to_string(),
        })?;
        Ok(self.object.params.get(id))
    }

    pub fn warnings(&self) -> &[RangeWarning] {
        &self.object.warnings
    }

    pub fn status(&self) -> &BuildStatus {
        &self.object.status
    }

    pub fn solid(&self) -> Result<ShapeHandle, HarnessError> {
        self.object.solid.ok_or_else(|| HarnessError::NoSolid {
            context: self.object.variant.to_string(),
        })
    }

    pub fn bounding_box(&self) -> Result<BoundingBox, HarnessError> {
        Ok(self.kernel.bounding_box(&self.solid()?)?)
    }

    /// Structural fingerprint of the current solid.
    pub fn fingerprint(&self) -> Result<String, HarnessError> {
        let solid = self.solid()?;
        self.kernel
            .fingerprint(&solid)
            .ok_or_else(|| HarnessError::NoSolid {
                context: "fingerprint".to_string(),
            })
    }

    /// Build every listed variant and return each fingerprint, leaving the
    /// object as it was.
    pub fn sweep(&mut self, variants: &[MoldVariant]) -> Vec<(MoldVariant, Option<String>)> {
        let mut solids = Vec::new();
        self.object
            .sweep_variants(variants, &mut self.kernel, |v, solid, _| {
                solids.push((v, solid.copied()))
            });
        solids
            .into_iter()
            .map(|(v, solid)| (v, solid.and_then(|s| self.kernel.fingerprint(&s))))
            .collect()
    }

    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    // ── Checks ──────────────────────────────────────────────────────────

    /// Run every applicable oracle against the current state.
    pub fn run_oracles(&self) -> Vec<OracleVerdict> {
        let params = &self.object.params;
        let mut verdicts = vec![
            oracle::check_params_in_bounds(params),
            oracle::check_total_length(params),
            oracle::check_not_fallback(&self.object.status),
        ];
        if self.object.status.is_built() {
            verdicts.push(oracle::check_kick_heights(params, &self.object.config));
            if let Some(solid) = &self.object.solid {
                verdicts.push(oracle::check_is_solid(&self.kernel, solid));
                verdicts.push(oracle::check_mirror_symmetric(&self.kernel, solid, 1e-6));
                if matches!(
                    self.object.variant,
                    MoldVariant::MaleMold | MoldVariant::FemaleMold
                ) {
                    verdicts.push(oracle::check_spans_mold_length(&self.kernel, solid, params));
                }
            }
        }
        verdicts
    }

    /// Fail with the first failing oracle.
    pub fn assert_oracles_pass(&self) -> Result<(), HarnessError> {
        match self.run_oracles().into_iter().find(|v| !v.passed) {
            None => Ok(()),
            Some(v) => Err(HarnessError::OracleFailure {
                oracle: v.oracle_name,
                detail: v.detail,
            }),
        }
    }

    pub fn assert_built(&self) -> Result<(), HarnessError> {
        let verdict = oracle::check_not_fallback(&self.object.status);
        if verdict.passed {
            Ok(())
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("[{}] not built: {}", self.object.variant, verdict.detail),
            })
        }
    }

    pub fn report(&self) -> MoldReport {
        MoldReport::from_bench(self)
    }

    fn record(&mut self, action: &str, detail: &str) -> Result<(), HarnessError> {
        debug!(action, detail, "bench step");
        self.history.push((action.to_string(), detail.to_string()));
        if self.auto_check {
            let verdict = oracle::check_params_in_bounds(&self.object.params);
            if !verdict.passed {
                return Err(HarnessError::OracleFailure {
                    oracle: verdict.oracle_name,
                    detail: format!("after {action} {detail}: {}", verdict.detail),
                });
            }
        }
        Ok(())
    }
}
