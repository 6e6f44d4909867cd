//! Structured text reports of a mold object's state.
//!
//! Reports are plain text, not JSON, so they read well in test failure output.

use std::fmt;

use mold_engine::BuildStatus;
use mold_params::{ParamId, ParamKind};

use crate::oracle::OracleVerdict;
use crate::workflow::MoldBench;

/// A complete report with all sections.
pub struct MoldReport {
    pub id: String,
    pub variant: String,
    pub status: String,
    pub parameters: Vec<ParamEntry>,
    pub bounding_box: Option<([f64; 3], [f64; 3])>,
    pub oracle_results: Vec<OracleVerdict>,
    pub warnings: Vec<String>,
    pub history_len: usize,
}

/// One parameter line.
pub struct ParamEntry {
    pub name: String,
    pub value: String,
    pub read_only: bool,
}

impl MoldReport {
    pub fn from_bench(bench: &MoldBench) -> Self {
        let object = &bench.object;
        let status = match &object.status {
            BuildStatus::NotBuilt => "not built".to_string(),
            BuildStatus::Built => "built".to_string(),
            BuildStatus::Fallback { error } => format!("FALLBACK ({error})"),
        };

        let parameters = ParamId::ALL
            .iter()
            .map(|&id| {
                let value = match object.params.number(id) {
                    Some(v) => format!("{v:.3}"),
                    None => format!("{:?}", object.params.get(id)),
                };
                ParamEntry {
                    name: id.to_string(),
                    value,
                    read_only: id.kind() == ParamKind::Info,
                }
            })
            .collect();

        let bounding_box = bench.bounding_box().ok().map(|bb| {
            (
                [bb.min.x, bb.min.y, bb.min.z],
                [bb.max.x, bb.max.y, bb.max.z],
            )
        });

        Self {
            id: object.id.to_string(),
            variant: object.variant.to_string(),
            status,
            parameters,
            bounding_box,
            oracle_results: bench.run_oracles(),
            warnings: object.warnings.iter().map(|w| w.message.clone()).collect(),
            history_len: bench.history().len(),
        }
    }

    pub fn failed(&self) -> impl Iterator<Item = &OracleVerdict> {
        self.oracle_results.iter().filter(|v| !v.passed)
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Fingerboard Mold Report ===\n\n");
        out.push_str(&format!("Object: {}\n", self.id));
        out.push_str(&format!("Variant: {} | Status: {}\n", self.variant, self.status));
        out.push_str(&format!("Steps: {}\n", self.history_len));

        out.push_str(&format!("\nParameters ({}):\n", self.parameters.len()));
        for p in &self.parameters {
            let ro = if p.read_only { " [INFO]" } else { "" };
            out.push_str(&format!("  {} = {}{}\n", p.name, p.value, ro));
        }

        if let Some((min, max)) = self.bounding_box {
            out.push_str(&format!(
                "\nBounding Box: ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})\n",
                min[0], min[1], min[2], max[0], max[1], max[2],
            ));
        }

        if !self.oracle_results.is_empty() {
            out.push_str(&format!(
                "\nOracle Results ({} checks):\n",
                self.oracle_results.len()
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        if self.warnings.is_empty() {
            out.push_str("\nWarnings: none\n");
        } else {
            out.push_str(&format!("\nWarnings ({}):\n", self.warnings.len()));
            for w in &self.warnings {
                out.push_str(&format!("  {w}\n"));
            }
        }

        out
    }
}

impl fmt::Display for MoldReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}
