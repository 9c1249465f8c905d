//! Core data models used throughout askdoc.
//!
//! These types represent the documents, chunks, conversation turns, and
//! answer records that flow through the ingestion and answering pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing state of an uploaded document.
///
/// The transition is write-once: a document is created `Processing` and
/// settles exactly once into `Completed` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Completed,
    Failed,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Processing => write!(f, "processing"),
            DocumentStatus::Completed => write!(f, "completed"),
            DocumentStatus::Failed => write!(f, "failed"),
        }
    }
}

/// An uploaded document and its ingestion outcome.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: String,
    /// Original upload filename, informational only.
    pub filename: String,
    pub status: DocumentStatus,
    /// Populated only once `status` is [`DocumentStatus::Completed`].
    pub chunks: Vec<Chunk>,
    pub created_at: DateTime<Utc>,
    /// Internal diagnostic cause when ingestion failed. The external
    /// contract exposes only the status value.
    #[serde(skip_serializing)]
    pub failure: Option<String>,
}

impl Document {
    /// Create a fresh document record in the `Processing` state with a
    /// generated id.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filename: filename.into(),
            status: DocumentStatus::Processing,
            chunks: Vec::new(),
            created_at: Utc::now(),
            failure: None,
        }
    }
}

/// A fixed-size slice of a document's extracted text.
///
/// `chunk_id` is sequential within the parent document, starting at 0,
/// ordered by offset in the source text. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub chunk_id: i64,
    pub text: String,
}

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry in a session's conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// A chunk selected by retrieval — a view over stored data, not an
/// owned entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetrievedChunk {
    pub document_id: String,
    pub chunk_id: i64,
    pub text: String,
}

/// Token accounting reported by the completion service.
///
/// Counters missing from the service response default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub candidate_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// The outcome of one `ask` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRecord {
    pub answer: String,
    pub session_id: String,
    pub source_chunks: Vec<RetrievedChunk>,
    pub chunk_count: usize,
    pub usage: TokenUsage,
}
