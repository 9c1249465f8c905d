//! Answer orchestration: retrieval → prompt → completion → session.
//!
//! One `ask` ties the pieces together: ensure the session exists, pull
//! matching chunks, and either short-circuit with the sentinel answer
//! (empty retrieval — nothing is appended to history) or make the single
//! completion call and record the question/answer exchange. The
//! completion call is the only latency-bound step and its failure
//! propagates to the caller untouched.

use askdoc_core::models::{AnswerRecord, RetrievedChunk, TokenUsage};
use askdoc_core::retrieve::retrieve;
use askdoc_core::store::{DocumentStore, SessionStore};
use tracing::debug;

use crate::completion::CompletionProvider;
use crate::error::{EngineError, Result};

/// Fixed answer returned when retrieval finds no matching chunks.
pub const NOT_FOUND_ANSWER: &str = "Answer not found in the provided documents.";

/// Build the single prompt sent to the completion service: the question
/// plus every retrieved chunk labelled by its chunk id, one per line, in
/// retrieval order.
pub fn build_prompt(question: &str, chunks: &[RetrievedChunk]) -> String {
    let mut context = String::new();
    for c in chunks {
        context.push_str(&format!("[CHUNK {}]: {}\n", c.chunk_id, c.text));
    }

    format!(
        "You are a helpful assistant.\n\
         Answer ONLY using the context.\n\
         \n\
         QUESTION:\n{question}\n\
         \n\
         CONTEXT:\n{context}"
    )
}

/// Answer a question against a set of documents within a session.
pub async fn answer(
    documents: &dyn DocumentStore,
    sessions: &dyn SessionStore,
    provider: &dyn CompletionProvider,
    session_id: &str,
    document_ids: &[String],
    question: &str,
) -> Result<AnswerRecord> {
    sessions.touch(session_id).await?;

    let retrieved = retrieve(documents, document_ids, question).await?;
    if retrieved.is_empty() {
        debug!(%session_id, "no matching chunks, returning sentinel answer");
        return Ok(AnswerRecord {
            answer: NOT_FOUND_ANSWER.to_string(),
            session_id: session_id.to_string(),
            source_chunks: Vec::new(),
            chunk_count: 0,
            usage: TokenUsage::default(),
        });
    }

    let prompt = build_prompt(question, &retrieved);
    let completion = provider
        .complete(&prompt)
        .await
        .map_err(|e| EngineError::Service(e.to_string()))?;

    sessions
        .append_exchange(session_id, question, &completion.text)
        .await?;

    Ok(AnswerRecord {
        answer: completion.text,
        session_id: session_id.to_string(),
        chunk_count: retrieved.len(),
        source_chunks: retrieved,
        usage: completion.usage,
    })
}
