//! # Askdoc
//!
//! **A document question-answering engine with grounded answers.**
//!
//! Askdoc ingests uploaded documents (plain text, PDF, docx), splits
//! them into fixed-size chunks, and answers questions against them by
//! retrieving keyword-matching chunks and handing them to an external
//! completion service. Conversation history is kept per session for the
//! lifetime of the process.
//!
//! ## Data Flow
//!
//! ```text
//! ┌──────────┐   ┌───────────┐   ┌────────────┐
//! │  Upload  │──▶│ Ingestion │──▶│  Document  │
//! │  bytes   │   │  (async)  │   │   Store    │
//! └──────────┘   └───────────┘   └─────┬──────┘
//!                                      │
//!                ┌───────────┐   ┌─────▼──────┐
//!                │  Session  │◀──│  Answer    │◀── question
//!                │   Store   │   │Orchestrator│──▶ completion
//!                └───────────┘   └────────────┘    service
//! ```
//!
//! 1. [`engine::Engine::create_document`] stores the upload, records a
//!    `processing` document, and spawns the [`ingest`] task — the call
//!    returns before extraction begins.
//! 2. The ingestion task runs [`extract`] and the fixed-size chunker
//!    from `askdoc-core`, then settles the document as `completed` or
//!    `failed`. Completion is observable only by polling status.
//! 3. [`engine::Engine::ask`] retrieves matching chunks, builds a
//!    prompt, calls the [`completion`] provider once, and appends the
//!    question/answer pair to the session ([`answer`]).
//!
//! The HTTP transport wrapping these operations is intentionally not
//! part of this crate; `Engine` is the surface a thin router would call.

pub mod answer;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod ingest;

pub use engine::{DocumentHandle, Engine};
pub use error::{EngineError, Result};
