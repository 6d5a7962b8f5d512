//! trackr - coursework task extraction and priority ranking
//!
//! This library ingests raw coursework/job-posting markup, extracts
//! structured task records, scores them for priority via a generative model
//! call with a deterministic heuristic fallback, and persists both raw and
//! ranked records idempotently.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod api;
pub mod config;
pub mod fetch;
pub mod models;
pub mod output;
pub mod parser;
pub mod ranking;
pub mod server;
pub mod storage;
pub mod workflow;
