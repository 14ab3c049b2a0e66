//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Tenant scoping is always a bind
//! parameter (`($n::BIGINT IS NULL OR tenant_id = $n)`), never interpolated
//! text, so an unscoped read is an explicit `None` bind.

pub mod analytics_repo;
pub mod assignment_repo;
pub mod department_repo;
pub mod evaluation_repo;
pub mod question_repo;
pub mod result_repo;
pub mod training_repo;
pub mod user_repo;

pub use analytics_repo::AnalyticsRepo;
pub use assignment_repo::AssignmentRepo;
pub use department_repo::DepartmentRepo;
pub use evaluation_repo::EvaluationRepo;
pub use question_repo::QuestionRepo;
pub use result_repo::ResultRepo;
pub use training_repo::TrainingRepo;
pub use user_repo::UserRepo;
