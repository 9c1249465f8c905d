//! The engine facade — the operations a thin transport layer wraps.
//!
//! [`Engine`] owns the in-memory document and session stores, the
//! configuration, and the completion provider, and exposes the five
//! core operations: `create_document`, `document_status`,
//! `document_chunks`, `ask`, and `session_history`.
//!
//! `create_document` is accept-and-return: it parks the uploaded bytes,
//! records a `processing` document, spawns the ingestion task, and
//! comes back immediately. Everything else is synchronous
//! request/response, with the single completion call inside `ask` as
//! the only suspension point.

use std::sync::Arc;

use askdoc_core::models::{AnswerRecord, Chunk, Document, DocumentStatus, Turn};
use askdoc_core::store::memory::{MemoryDocumentStore, MemorySessionStore};
use askdoc_core::store::{DocumentStore, SessionStore};
use serde::Serialize;
use tracing::info;

use crate::answer;
use crate::completion::CompletionProvider;
use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::extract::DocumentKind;
use crate::ingest;

/// What an uploader gets back: the generated id and the initial status.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentHandle {
    pub id: String,
    pub filename: String,
    pub status: DocumentStatus,
}

/// The document question-answering engine.
pub struct Engine {
    config: Config,
    documents: Arc<dyn DocumentStore>,
    sessions: Arc<dyn SessionStore>,
    provider: Arc<dyn CompletionProvider>,
}

impl Engine {
    /// Build an engine with fresh in-memory stores. State lives for the
    /// process lifetime; nothing is persisted.
    pub fn new(config: Config, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            config,
            documents: Arc::new(MemoryDocumentStore::new()),
            sessions: Arc::new(MemorySessionStore::new()),
            provider,
        }
    }

    /// Accept an upload: park the bytes, record a `processing` document,
    /// and spawn its ingestion task. Returns before ingestion runs;
    /// callers discover the outcome by polling
    /// [`document_status`](Engine::document_status).
    ///
    /// Rejects filenames whose extension is outside `{txt, pdf, docx}`
    /// before any state is created.
    pub async fn create_document(&self, bytes: &[u8], filename: &str) -> Result<DocumentHandle> {
        let kind = DocumentKind::from_filename(filename)
            .ok_or_else(|| EngineError::UnsupportedInput(filename.to_string()))?;

        let doc = Document::new(filename);
        let id = doc.id.clone();

        tokio::fs::create_dir_all(&self.config.storage.upload_dir).await?;
        let path = self
            .config
            .storage
            .upload_dir
            .join(format!("{}.{}", id, kind.extension()));
        tokio::fs::write(&path, bytes).await?;

        self.documents.insert(doc).await?;
        info!(doc_id = %id, %filename, "document accepted for processing");

        ingest::spawn_ingestion(
            Arc::clone(&self.documents),
            id.clone(),
            path,
            kind,
            self.config.chunking.max_chars,
        );

        Ok(DocumentHandle {
            id,
            filename: filename.to_string(),
            status: DocumentStatus::Processing,
        })
    }

    /// Current status of a document.
    pub async fn document_status(&self, doc_id: &str) -> Result<DocumentStatus> {
        self.documents
            .status(doc_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(doc_id.to_string()))
    }

    /// The chunk list of a completed document. `NotReady` while the
    /// document is still processing or after it failed.
    pub async fn document_chunks(&self, doc_id: &str) -> Result<Vec<Chunk>> {
        let doc = self
            .documents
            .get(doc_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(doc_id.to_string()))?;
        if doc.status != DocumentStatus::Completed {
            return Err(EngineError::NotReady {
                id: doc_id.to_string(),
                status: doc.status,
            });
        }
        Ok(doc.chunks)
    }

    /// Answer a question against a set of documents within a session.
    pub async fn ask(
        &self,
        session_id: &str,
        document_ids: &[String],
        question: &str,
    ) -> Result<AnswerRecord> {
        answer::answer(
            self.documents.as_ref(),
            self.sessions.as_ref(),
            self.provider.as_ref(),
            session_id,
            document_ids,
            question,
        )
        .await
    }

    /// Ordered conversation history for a session. Unknown sessions read
    /// as empty — lenient by design, not an error.
    pub async fn session_history(&self, session_id: &str) -> Result<Vec<Turn>> {
        Ok(self.sessions.history(session_id).await?)
    }
}
