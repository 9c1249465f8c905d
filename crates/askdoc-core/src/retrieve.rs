//! Keyword retrieval over stored document chunks.
//!
//! The retrieval rule is presence-matching, not ranking: a chunk is
//! selected when at least one query token occurs as a literal substring
//! of the chunk's normalized text. Results come back in traversal order
//! — documents in the order the caller supplied them, chunks in
//! ascending `chunk_id` within each document — with no scoring.
//!
//! # Normalization
//!
//! Both the question and (at match time) each chunk are lowercased and
//! stripped of every character that is not an ASCII lowercase letter, an
//! ASCII digit, or whitespace. Chunk text is normalized per query rather
//! than precomputed, so cost is proportional to corpus size per call.
//!
//! Substring matching is deliberately loose: the token `cat` matches a
//! chunk containing `catalog`. This mirrors the source system's behavior
//! and is kept rather than upgraded to word-boundary matching.

use anyhow::Result;

use crate::models::RetrievedChunk;
use crate::store::DocumentStore;

/// Lowercase `text` and strip everything that is not `a-z`, `0-9`, or
/// whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

/// Normalize a question and split it into a de-duplicated token list.
///
/// Order is preserved for determinism but carries no meaning; matching
/// treats the result as a set.
pub fn query_tokens(question: &str) -> Vec<String> {
    let normalized = normalize(question);
    let mut tokens: Vec<String> = Vec::new();
    for word in normalized.split_whitespace() {
        if !tokens.iter().any(|t| t == word) {
            tokens.push(word.to_string());
        }
    }
    tokens
}

/// Select chunks relevant to `question` from the given documents.
///
/// - Document ids unknown to the store are silently skipped.
/// - Documents not yet completed contribute zero chunks (their chunk
///   list is empty by the store's settle invariant).
/// - An empty query-token set (e.g. a question with no alphanumeric
///   characters) yields an empty result: "any token matches" over an
///   empty set is vacuously false.
pub async fn retrieve<S: DocumentStore + ?Sized>(
    store: &S,
    document_ids: &[String],
    question: &str,
) -> Result<Vec<RetrievedChunk>> {
    let tokens = query_tokens(question);
    if tokens.is_empty() {
        return Ok(Vec::new());
    }

    let mut results = Vec::new();

    for doc_id in document_ids {
        let doc = match store.get(doc_id).await? {
            Some(d) => d,
            None => continue,
        };

        // Chunks are stored in ascending chunk_id order by construction.
        for chunk in &doc.chunks {
            let haystack = normalize(&chunk.text);
            if tokens.iter().any(|t| haystack.contains(t.as_str())) {
                results.push(RetrievedChunk {
                    document_id: doc_id.clone(),
                    chunk_id: chunk.chunk_id,
                    text: chunk.text.clone(),
                });
            }
        }
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Chunk, Document};
    use crate::store::memory::MemoryDocumentStore;

    fn chunks(texts: &[&str]) -> Vec<Chunk> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Chunk {
                chunk_id: i as i64,
                text: (*t).to_string(),
            })
            .collect()
    }

    async fn completed_doc(store: &MemoryDocumentStore, texts: &[&str]) -> String {
        let doc = Document::new("fixture.txt");
        let id = doc.id.clone();
        store.insert(doc).await.unwrap();
        store.complete(&id, chunks(texts)).await.unwrap();
        id
    }

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("Where did the cat sit?"), "where did the cat sit");
        assert_eq!(normalize("A-B_C 1/2!"), "ab c 12");
    }

    #[test]
    fn test_query_tokens_deduplicates() {
        assert_eq!(
            query_tokens("The cat and the CAT!"),
            vec!["the", "cat", "and"]
        );
        assert!(query_tokens("???").is_empty());
        assert!(query_tokens("  \t ").is_empty());
    }

    #[tokio::test]
    async fn test_single_token_match() {
        let store = MemoryDocumentStore::new();
        let id = completed_doc(&store, &["The cat sat on the mat."]).await;

        let results = retrieve(&store, &[id.clone()], "Where did the cat sit?")
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document_id, id);
        assert_eq!(results[0].chunk_id, 0);
        assert_eq!(results[0].text, "The cat sat on the mat.");
    }

    #[tokio::test]
    async fn test_no_overlap_yields_empty() {
        let store = MemoryDocumentStore::new();
        let id = completed_doc(&store, &["The cat sat on the mat."]).await;

        let results = retrieve(&store, &[id], "xyz123").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_empty_token_set_yields_empty() {
        let store = MemoryDocumentStore::new();
        let id = completed_doc(&store, &["anything at all"]).await;

        let results = retrieve(&store, &[id], "???").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_substring_matches_inside_words() {
        let store = MemoryDocumentStore::new();
        let id = completed_doc(&store, &["See the product catalog for details."]).await;

        // "cat" matches "catalog" — loose substring semantics are kept.
        let results = retrieve(&store, &[id], "cat").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_documents_silently_skipped() {
        let store = MemoryDocumentStore::new();
        let id = completed_doc(&store, &["cats everywhere"]).await;

        let ids = vec!["missing".to_string(), id.clone()];
        let results = retrieve(&store, &ids, "cats").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].document_id, id);
    }

    #[tokio::test]
    async fn test_processing_document_contributes_nothing() {
        let store = MemoryDocumentStore::new();
        let doc = Document::new("pending.pdf");
        let id = doc.id.clone();
        store.insert(doc).await.unwrap();

        let results = retrieve(&store, &[id], "anything").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_traversal_order_is_caller_order_then_chunk_id() {
        let store = MemoryDocumentStore::new();
        let first = completed_doc(&store, &["rust here", "nothing", "rust again"]).await;
        let second = completed_doc(&store, &["more rust"]).await;

        // Supply documents in reverse creation order.
        let ids = vec![second.clone(), first.clone()];
        let results = retrieve(&store, &ids, "rust").await.unwrap();

        let order: Vec<(&str, i64)> = results
            .iter()
            .map(|r| (r.document_id.as_str(), r.chunk_id))
            .collect();
        assert_eq!(
            order,
            vec![(second.as_str(), 0), (first.as_str(), 0), (first.as_str(), 2)]
        );
    }

    #[tokio::test]
    async fn test_retrieval_is_deterministic() {
        let store = MemoryDocumentStore::new();
        let id = completed_doc(&store, &["alpha beta", "beta gamma", "gamma delta"]).await;

        let ids = vec![id];
        let a = retrieve(&store, &ids, "beta gamma").await.unwrap();
        let b = retrieve(&store, &ids, "beta gamma").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }
}
