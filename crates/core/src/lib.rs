//! Pure domain logic for the learnbase platform.
//!
//! Everything in this crate is side-effect free: status derivation,
//! scope/target vocabulary, fan-out expansion planning, and the aggregation
//! math behind the analytics endpoints. Persistence lives in `learnbase-db`,
//! orchestration in `learnbase-engine`.

pub mod analytics;
pub mod error;
pub mod fanout;
pub mod scope;
pub mod status;
pub mod target;
pub mod types;
