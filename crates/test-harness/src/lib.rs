//! Test harness for scripted fingerboard mold workflows.
//!
//! Provides a fluent driver over the mock kernel, oracles that check a
//! mold's state without panicking, and text reports for diagnostics.
//!
//! # Key Components
//!
//! - [`MoldBench`]: fluent API for editing and rebuilding a mold object
//! - [`oracle`]: verification functions returning pass/fail verdicts
//! - [`report`]: structured text descriptions of an object
//! - [`helpers`]: error type, tracing setup and log capture, preset data builders
//! - [`assertions`]: assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::{capture_logs, init_tracing, preset_data, HarnessError};
pub use oracle::OracleVerdict;
pub use report::MoldReport;
pub use workflow::MoldBench;
