//! Assignment fan-out and analytics aggregation services.
//!
//! This crate is the library boundary between storage and any presentation
//! layer: `fanout` turns an assignment request into idempotent assignment
//! rows, and `analytics` composes the read repositories with the pure
//! aggregation math in `learnbase-core`.

pub mod analytics;
pub mod error;
pub mod fanout;

mod subject;

pub use error::EngineError;
