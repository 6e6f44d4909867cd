/// Errors on the write path of a preset library.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse library: {0}")]
    ParseError(String),

    #[error("no entry named {name:?}")]
    NotFound { name: String },

    #[error("invalid entry name {name:?}")]
    InvalidName { name: String },
}
