//! # Askdoc Core
//!
//! Shared, I/O-free logic for askdoc: data models, fixed-size chunking,
//! store abstractions, and the keyword retrieval algorithm.
//!
//! This crate contains no filesystem access, no HTTP, and no background
//! tasks. Everything latency-bound (extraction, ingestion scheduling,
//! completion calls) lives in the `askdoc` engine crate and operates
//! through the traits defined here.

pub mod chunk;
pub mod models;
pub mod retrieve;
pub mod store;
