//! Asynchronous document ingestion.
//!
//! One upload spawns exactly one ingestion task for its freshly
//! generated document id; the upload call returns while the document is
//! still `processing`. The task runs extract → chunk → store-write →
//! status-flip as a strict sequence; readers see either the empty
//! pre-ingestion state or the fully populated completed state, never a
//! partial chunk list (the store's `complete` is atomic).
//!
//! Errors at any step are contained: the document settles as `failed`
//! with the cause recorded for diagnostics, nothing crosses the task
//! boundary, and the parked upload file is left in place for external
//! cleanup. The file is deleted only on success.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use askdoc_core::chunk::chunk_text;
use askdoc_core::store::DocumentStore;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::extract::{extract_text, DocumentKind};

/// Spawn the fire-and-forget ingestion task for one uploaded document.
///
/// The returned handle signals task completion; the ingestion *outcome*
/// is observable only through the document's status.
pub fn spawn_ingestion(
    documents: Arc<dyn DocumentStore>,
    doc_id: String,
    path: PathBuf,
    kind: DocumentKind,
    max_chars: usize,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match run(documents.as_ref(), &doc_id, &path, kind, max_chars).await {
            Ok(chunk_count) => {
                info!(%doc_id, chunk_count, "ingestion completed");
            }
            Err(e) => {
                warn!(%doc_id, cause = %e, "ingestion failed");
                if let Err(store_err) = documents.fail(&doc_id, &e.to_string()).await {
                    error!(%doc_id, error = %store_err, "failed to record ingestion failure");
                }
            }
        }
    })
}

async fn run(
    documents: &dyn DocumentStore,
    doc_id: &str,
    path: &Path,
    kind: DocumentKind,
    max_chars: usize,
) -> anyhow::Result<usize> {
    let text = extract_text(path, kind)?;
    let chunks = chunk_text(&text, max_chars);
    let chunk_count = chunks.len();
    documents.complete(doc_id, chunks).await?;

    // The parked upload is only removable once the document has settled
    // as completed; a failed delete downgrades to a warning since the
    // document state is already correct.
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!(%doc_id, path = %path.display(), error = %e, "could not remove uploaded file");
    }

    Ok(chunk_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use askdoc_core::models::{Document, DocumentStatus};
    use askdoc_core::store::memory::MemoryDocumentStore;

    async fn inserted_doc(store: &MemoryDocumentStore, filename: &str) -> String {
        let doc = Document::new(filename);
        let id = doc.id.clone();
        store.insert(doc).await.unwrap();
        id
    }

    #[tokio::test]
    async fn text_file_ingests_to_completed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("note.txt");
        std::fs::write(&path, "The cat sat on the mat.").unwrap();

        let store = Arc::new(MemoryDocumentStore::new());
        let id = inserted_doc(&store, "note.txt").await;

        spawn_ingestion(
            store.clone(),
            id.clone(),
            path.clone(),
            DocumentKind::Text,
            500,
        )
        .await
        .unwrap();

        let doc = store.get(&id).await.unwrap().unwrap();
        assert_eq!(doc.status, DocumentStatus::Completed);
        assert_eq!(doc.chunks.len(), 1);
        assert_eq!(doc.chunks[0].chunk_id, 0);
        assert_eq!(doc.chunks[0].text, "The cat sat on the mat.");
        assert!(!path.exists(), "upload should be deleted on success");
    }

    #[tokio::test]
    async fn large_text_reassembles_losslessly() {
        let text = "word boundary does not matter here ".repeat(60);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.txt");
        std::fs::write(&path, &text).unwrap();

        let store = Arc::new(MemoryDocumentStore::new());
        let id = inserted_doc(&store, "big.txt").await;

        spawn_ingestion(store.clone(), id.clone(), path, DocumentKind::Text, 500)
            .await
            .unwrap();

        let doc = store.get(&id).await.unwrap().unwrap();
        assert_eq!(doc.status, DocumentStatus::Completed);
        let rejoined: String = doc.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rejoined, text);
        for c in &doc.chunks {
            assert!(c.text.chars().count() <= 500);
        }
    }

    #[tokio::test]
    async fn extraction_failure_settles_failed_and_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        let store = Arc::new(MemoryDocumentStore::new());
        let id = inserted_doc(&store, "broken.pdf").await;

        spawn_ingestion(store.clone(), id.clone(), path.clone(), DocumentKind::Pdf, 500)
            .await
            .unwrap();

        let doc = store.get(&id).await.unwrap().unwrap();
        assert_eq!(doc.status, DocumentStatus::Failed);
        assert!(doc.chunks.is_empty());
        assert!(doc.failure.is_some());
        assert!(path.exists(), "upload should be kept on failure");
    }

    #[tokio::test]
    async fn missing_file_settles_failed() {
        let store = Arc::new(MemoryDocumentStore::new());
        let id = inserted_doc(&store, "ghost.txt").await;

        spawn_ingestion(
            store.clone(),
            id.clone(),
            PathBuf::from("/nowhere/ghost.txt"),
            DocumentKind::Text,
            500,
        )
        .await
        .unwrap();

        assert_eq!(
            store.status(&id).await.unwrap(),
            Some(DocumentStatus::Failed)
        );
    }

    #[tokio::test]
    async fn concurrent_ingestions_settle_independently() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.txt");
        let bad = dir.path().join("bad.pdf");
        std::fs::write(&good, "plain text content").unwrap();
        std::fs::write(&bad, "still not a pdf").unwrap();

        let store = Arc::new(MemoryDocumentStore::new());
        let good_id = inserted_doc(&store, "good.txt").await;
        let bad_id = inserted_doc(&store, "bad.pdf").await;

        let h1 = spawn_ingestion(store.clone(), good_id.clone(), good, DocumentKind::Text, 500);
        let h2 = spawn_ingestion(store.clone(), bad_id.clone(), bad, DocumentKind::Pdf, 500);
        h1.await.unwrap();
        h2.await.unwrap();

        assert_eq!(
            store.status(&good_id).await.unwrap(),
            Some(DocumentStatus::Completed)
        );
        assert_eq!(
            store.status(&bad_id).await.unwrap(),
            Some(DocumentStatus::Failed)
        );
    }
}
