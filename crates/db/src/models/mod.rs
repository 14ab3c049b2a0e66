//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Status fields map to Postgres enum types via `sqlx::Type`.

pub mod analytics;
pub mod assignment;
pub mod department;
pub mod evaluation;
pub mod question;
pub mod result;
pub mod training;
pub mod user;
