//! In-memory [`DocumentStore`] and [`SessionStore`] implementations.
//!
//! `HashMap`s behind `std::sync::RwLock` for thread safety. One write
//! lock scope covers each status settle and each turn-pair append, which
//! is what makes those operations atomic from a reader's perspective.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::models::{Chunk, Document, DocumentStatus, Role, Turn};

use super::{DocumentStore, SessionStore};

/// Process-lifetime document store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryDocumentStore {
    docs: RwLock<HashMap<String, Document>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(&self, doc: Document) -> Result<()> {
        let mut docs = self.docs.write().unwrap();
        if docs.contains_key(&doc.id) {
            bail!("document {} already exists", doc.id);
        }
        docs.insert(doc.id.clone(), doc);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Document>> {
        let docs = self.docs.read().unwrap();
        Ok(docs.get(id).cloned())
    }

    async fn status(&self, id: &str) -> Result<Option<DocumentStatus>> {
        let docs = self.docs.read().unwrap();
        Ok(docs.get(id).map(|d| d.status))
    }

    async fn complete(&self, id: &str, chunks: Vec<Chunk>) -> Result<()> {
        let mut docs = self.docs.write().unwrap();
        let doc = match docs.get_mut(id) {
            Some(d) => d,
            None => bail!("document {} not found", id),
        };
        if doc.status != DocumentStatus::Processing {
            bail!("document {} already settled as {}", id, doc.status);
        }
        doc.chunks = chunks;
        doc.status = DocumentStatus::Completed;
        Ok(())
    }

    async fn fail(&self, id: &str, cause: &str) -> Result<()> {
        let mut docs = self.docs.write().unwrap();
        let doc = match docs.get_mut(id) {
            Some(d) => d,
            None => bail!("document {} not found", id),
        };
        if doc.status != DocumentStatus::Processing {
            bail!("document {} already settled as {}", id, doc.status);
        }
        doc.status = DocumentStatus::Failed;
        doc.failure = Some(cause.to_string());
        Ok(())
    }
}

/// Process-lifetime session store backed by a `HashMap`.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Vec<Turn>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn touch(&self, session_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.entry(session_id.to_string()).or_default();
        Ok(())
    }

    async fn append_exchange(&self, session_id: &str, question: &str, answer: &str) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push(Turn {
            role: Role::User,
            content: question.to_string(),
        });
        history.push(Turn {
            role: Role::Assistant,
            content: answer.to_string(),
        });
        Ok(())
    }

    async fn history(&self, session_id: &str) -> Result<Vec<Turn>> {
        let sessions = self.sessions.read().unwrap();
        Ok(sessions.get(session_id).cloned().unwrap_or_default())
    }
}
