//! Engine errors
//!
//! These cover the one operation with a real failure surface:
//! preference persistence. A reason why one entry cannot be chosen is
//! not an error; it travels on the entry itself as denial text.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StashError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no preference directory available on this platform")]
    NoPrefsDir,
}
