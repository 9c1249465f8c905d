//! Typed error surface of the engine.
//!
//! Ingestion failures never appear here: any error inside the background
//! ingestion task is contained into the document's `failed` status and
//! discovered by polling. Everything else propagates to the immediate
//! caller through [`EngineError`].

use askdoc_core::models::DocumentStatus;
use thiserror::Error;

/// Errors surfaced synchronously by [`Engine`](crate::engine::Engine)
/// operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Declared file type outside the supported set; rejected before any
    /// document state is created.
    #[error("unsupported file type: {0}")]
    UnsupportedInput(String),

    /// Reference to an unknown document where the operation requires
    /// existence. History reads are lenient and never produce this.
    #[error("document not found: {0}")]
    NotFound(String),

    /// Chunk lookup against a document that is still processing or
    /// already failed.
    #[error("document {id} is not ready: status is {status}")]
    NotReady { id: String, status: DocumentStatus },

    /// The external completion call errored or returned a malformed
    /// response. Propagated as-is: no retry, no fallback answer.
    #[error("completion service failure: {0}")]
    Service(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
