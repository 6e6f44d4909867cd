//! Helper functions: error type, logging setup, preset data builders.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Once};

use mold_params::PresetData;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("unknown parameter: {name}")]
    UnknownParameter { name: String },

    #[error("engine error: {0}")]
    Engine(#[from] mold_engine::EngineError),

    #[error("no solid: {context}")]
    NoSolid { context: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("kernel error: {0}")]
    Kernel(#[from] mold_kernel::KernelError),

    #[error("store error: {0}")]
    Store(#[from] preset_store::StoreError),
}

// ── Logging ─────────────────────────────────────────────────────────────────

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once per process. Filter via `RUST_LOG`,
/// defaulting to warnings.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Shared in-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber that records every event at debug
/// level or above, and return its result with the formatted log text.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let text = match buffer.0.lock() {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    };
    (result, text)
}

// ── Data Builders ───────────────────────────────────────────────────────────

/// Preset data from `(field, value)` pairs.
pub fn preset_data(fields: &[(&str, f64)]) -> PresetData {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
        .collect()
}

/// A library file path no other test uses.
pub fn temp_library_path(file: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("mold-harness-{}", Uuid::new_v4()))
        .join(file)
}
