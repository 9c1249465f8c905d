//! Storage abstraction for askdoc.
//!
//! The [`DocumentStore`] and [`SessionStore`] traits define the storage
//! operations needed by the ingestion pipeline and the answer
//! orchestrator, enabling pluggable backends. The shipped backend is
//! in-memory ([`memory`]); state lives for the process lifetime with no
//! eviction and no persistence.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Chunk, Document, DocumentStatus, Turn};

/// Storage for uploaded documents and their ingestion outcomes.
///
/// The per-document status transition is write-once: a record enters as
/// `Processing` via [`insert`](DocumentStore::insert) and settles exactly
/// once through [`complete`](DocumentStore::complete) or
/// [`fail`](DocumentStore::fail). `complete` attaches the chunk list and
/// flips the status in a single mutation, so concurrent readers observe
/// either the pre-ingestion empty state or the fully populated completed
/// state — never a torn chunk list.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a fresh `Processing` record. Rejects duplicate ids.
    async fn insert(&self, doc: Document) -> Result<()>;

    /// Fetch a full document snapshot by id.
    async fn get(&self, id: &str) -> Result<Option<Document>>;

    /// Fetch just the status of a document by id.
    async fn status(&self, id: &str) -> Result<Option<DocumentStatus>>;

    /// Settle a document as `Completed`, attaching its chunks atomically.
    /// Rejects unknown ids and already-settled documents.
    async fn complete(&self, id: &str, chunks: Vec<Chunk>) -> Result<()>;

    /// Settle a document as `Failed`, recording the diagnostic cause.
    /// Rejects unknown ids and already-settled documents.
    async fn fail(&self, id: &str, cause: &str) -> Result<()>;
}

/// Storage for per-session conversation history.
///
/// Sessions are created lazily on first reference and live for the
/// process lifetime. History is append-only, and a question/answer pair
/// is appended as one atomic exchange so concurrent asks against the
/// same session cannot interleave inside a pair.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Ensure a session exists, creating it with empty history if needed.
    async fn touch(&self, session_id: &str) -> Result<()>;

    /// Append a user turn followed by an assistant turn, atomically.
    /// Lazily creates the session.
    async fn append_exchange(&self, session_id: &str, question: &str, answer: &str) -> Result<()>;

    /// Read a session's ordered history. Unknown sessions read as empty
    /// rather than erroring.
    async fn history(&self, session_id: &str) -> Result<Vec<Turn>>;
}
