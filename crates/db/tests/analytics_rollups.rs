//! Integration tests for the aggregation queries.
//!
//! Exercises the read side against a real database:
//! - Tenant isolation of every aggregate
//! - Zero-valued results on empty scopes
//! - Null-score exclusion from distributions
//! - Department rows including empty departments
//! - Month bucketing and question difficulty ordering

use chrono::{Duration, Utc};
use learnbase_core::scope::{AnalyticsScope, TenantScope};
use learnbase_db::models::assignment::SubjectKind;
use learnbase_db::models::department::CreateDepartment;
use learnbase_db::models::evaluation::CreateEvaluation;
use learnbase_db::models::question::{CreateQuestion, CreateQuestionOption, QuestionKind};
use learnbase_db::models::result::RecordResponse;
use learnbase_db::models::training::CreateTraining;
use learnbase_db::models::user::CreateUser;
use learnbase_db::repositories::{
    AnalyticsRepo, AssignmentRepo, DepartmentRepo, EvaluationRepo, QuestionRepo, ResultRepo,
    TrainingRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_user(pool: &PgPool, tenant_id: i64, email: &str) -> i64 {
    UserRepo::create(
        pool,
        tenant_id,
        &CreateUser {
            display_name: email.split('@').next().unwrap().to_string(),
            email: email.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_training(pool: &PgPool, tenant_id: i64, title: &str, created_by: i64) -> i64 {
    TrainingRepo::create(
        pool,
        tenant_id,
        &CreateTraining {
            title: title.to_string(),
            description: None,
            objectives: None,
            duration_minutes: None,
            difficulty: None,
            created_by,
        },
    )
    .await
    .unwrap()
    .id
}

async fn assignment_id_for(pool: &PgPool, subject_id: i64, user_id: i64) -> i64 {
    AssignmentRepo::list(
        pool,
        TenantScope::Unscoped,
        None,
        Some(subject_id),
        Some(user_id),
        1,
        0,
    )
    .await
    .unwrap()
    .remove(0)
    .id
}

// ---------------------------------------------------------------------------
// Test: completion counts are tenant-isolated and zero on empty scopes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_counts_tenant_isolation(pool: PgPool) {
    let a1 = seed_user(&pool, 1, "a1@example.com").await;
    let a2 = seed_user(&pool, 1, "a2@example.com").await;
    let b1 = seed_user(&pool, 2, "b1@example.com").await;
    let ours = seed_training(&pool, 1, "Ours", a1).await;
    let theirs = seed_training(&pool, 2, "Theirs", b1).await;

    AssignmentRepo::bulk_assign(&pool, SubjectKind::Training, ours, 1, &[a1, a2])
        .await
        .unwrap();
    AssignmentRepo::bulk_assign(&pool, SubjectKind::Training, theirs, 2, &[b1])
        .await
        .unwrap();
    let done = assignment_id_for(&pool, ours, a1).await;
    AssignmentRepo::record_completion(&pool, done, Some(90.0))
        .await
        .unwrap();

    let tenant_one = AnalyticsRepo::completion_counts(&pool, None, &AnalyticsScope::tenant(1))
        .await
        .unwrap();
    assert_eq!(tenant_one.assigned, 2);
    assert_eq!(tenant_one.completed, 1);

    let global = AnalyticsRepo::completion_counts(&pool, None, &AnalyticsScope::unscoped())
        .await
        .unwrap();
    assert_eq!(global.assigned, 3);

    let empty = AnalyticsRepo::completion_counts(&pool, None, &AnalyticsScope::tenant(99))
        .await
        .unwrap();
    assert_eq!(empty.assigned, 0);
    assert_eq!(empty.completed, 0);
}

// ---------------------------------------------------------------------------
// Test: per-subject counts and scoreless completions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_subject_counts_and_null_score_exclusion(pool: PgPool) {
    let u1 = seed_user(&pool, 1, "u1@example.com").await;
    let u2 = seed_user(&pool, 1, "u2@example.com").await;
    let u3 = seed_user(&pool, 1, "u3@example.com").await;
    let training = seed_training(&pool, 1, "Forklift", u1).await;

    AssignmentRepo::bulk_assign(&pool, SubjectKind::Training, training, 1, &[u1, u2, u3])
        .await
        .unwrap();
    let first = assignment_id_for(&pool, training, u1).await;
    let second = assignment_id_for(&pool, training, u2).await;
    // One completion carries a score, one does not (external completion
    // without grading).
    AssignmentRepo::record_completion(&pool, first, Some(80.0))
        .await
        .unwrap();
    AssignmentRepo::record_completion(&pool, second, None)
        .await
        .unwrap();

    let counts = AnalyticsRepo::completion_counts_for_subject(
        &pool,
        SubjectKind::Training,
        training,
        TenantScope::Tenant(1),
    )
    .await
    .unwrap();
    assert_eq!(counts.assigned, 3);
    assert_eq!(counts.completed, 2);

    let scores = AnalyticsRepo::completed_scores_for_subject(
        &pool,
        SubjectKind::Training,
        training,
        TenantScope::Tenant(1),
    )
    .await
    .unwrap();
    assert_eq!(scores, vec![80.0], "null scores are excluded, not coerced");
}

// ---------------------------------------------------------------------------
// Test: department rows include empty departments and average per member
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_department_rows_include_empty_departments(pool: PgPool) {
    let s1 = seed_user(&pool, 1, "s1@example.com").await;
    let s2 = seed_user(&pool, 1, "s2@example.com").await;
    let o1 = seed_user(&pool, 1, "o1@example.com").await;
    let sales = DepartmentRepo::create(&pool, 1, &CreateDepartment { name: "Sales".into() })
        .await
        .unwrap();
    let ops = DepartmentRepo::create(&pool, 1, &CreateDepartment { name: "Operations".into() })
        .await
        .unwrap();
    DepartmentRepo::create(&pool, 1, &CreateDepartment { name: "New Team".into() })
        .await
        .unwrap();
    DepartmentRepo::add_member(&pool, sales.id, s1).await.unwrap();
    DepartmentRepo::add_member(&pool, sales.id, s2).await.unwrap();
    DepartmentRepo::add_member(&pool, ops.id, o1).await.unwrap();

    let training = seed_training(&pool, 1, "Quota", s1).await;
    AssignmentRepo::bulk_assign(&pool, SubjectKind::Training, training, 1, &[s1, s2, o1])
        .await
        .unwrap();
    let first = assignment_id_for(&pool, training, s1).await;
    let second = assignment_id_for(&pool, training, s2).await;
    AssignmentRepo::record_completion(&pool, first, Some(60.0))
        .await
        .unwrap();
    AssignmentRepo::record_completion(&pool, second, Some(80.0))
        .await
        .unwrap();

    let rows = AnalyticsRepo::department_performance_rows(&pool, &AnalyticsScope::tenant(1))
        .await
        .unwrap();
    assert_eq!(rows.len(), 3, "empty departments are included");

    let sales_row = rows.iter().find(|r| r.name == "Sales").unwrap();
    assert_eq!(sales_row.member_count, 2);
    assert_eq!(sales_row.assigned_count, 2);
    assert_eq!(sales_row.completed_count, 2);
    assert_eq!(sales_row.average_score, Some(70.0));

    let ops_row = rows.iter().find(|r| r.name == "Operations").unwrap();
    assert_eq!(ops_row.completed_count, 0);
    assert_eq!(ops_row.average_score, None);

    let new_row = rows.iter().find(|r| r.name == "New Team").unwrap();
    assert_eq!(new_row.member_count, 0);
    assert_eq!(new_row.assigned_count, 0);
}

// ---------------------------------------------------------------------------
// Test: monthly buckets land in the current month
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_monthly_counts_bucket_current_activity(pool: PgPool) {
    let u1 = seed_user(&pool, 1, "m1@example.com").await;
    let u2 = seed_user(&pool, 1, "m2@example.com").await;
    let training = seed_training(&pool, 1, "Reporting", u1).await;
    AssignmentRepo::bulk_assign(&pool, SubjectKind::Training, training, 1, &[u1, u2])
        .await
        .unwrap();
    let done = assignment_id_for(&pool, training, u1).await;
    AssignmentRepo::record_completion(&pool, done, Some(100.0))
        .await
        .unwrap();

    let since = Utc::now() - Duration::days(120);
    let scope = AnalyticsScope::tenant(1);

    let assigned = AnalyticsRepo::monthly_assigned_counts(&pool, &scope, since)
        .await
        .unwrap();
    assert_eq!(assigned.len(), 1, "all activity is in the current month");
    assert_eq!(assigned[0].count, 2);

    let completed = AnalyticsRepo::monthly_completed_counts(&pool, &scope, since)
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].count, 1);
}

// ---------------------------------------------------------------------------
// Test: question difficulty orders hardest first and skips unanswered
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_question_difficulty_ordering(pool: PgPool) {
    let u1 = seed_user(&pool, 1, "q1@example.com").await;
    let u2 = seed_user(&pool, 1, "q2@example.com").await;
    let evaluation = EvaluationRepo::create(
        &pool,
        1,
        &CreateEvaluation {
            training_id: None,
            title: "Final Exam".to_string(),
            passing_score: None,
            time_limit_minutes: None,
            created_by: u1,
        },
    )
    .await
    .unwrap();

    let mut questions = Vec::new();
    for (index, text) in ["Hard one", "Easy one", "Never answered"].iter().enumerate() {
        let question = QuestionRepo::add(
            &pool,
            SubjectKind::Evaluation,
            evaluation.id,
            &CreateQuestion {
                text: text.to_string(),
                kind: QuestionKind::SingleChoice,
                order_index: index as i32,
                options: vec![
                    CreateQuestionOption {
                        text: "Right".to_string(),
                        is_correct: true,
                    },
                    CreateQuestionOption {
                        text: "Wrong".to_string(),
                        is_correct: false,
                    },
                ],
            },
        )
        .await
        .unwrap();
        questions.push(question);
    }

    AssignmentRepo::bulk_assign(&pool, SubjectKind::Evaluation, evaluation.id, 1, &[u1, u2])
        .await
        .unwrap();

    for (user, correct_on_hard) in [(u1, false), (u2, true)] {
        let assignment = assignment_id_for(&pool, evaluation.id, user).await;
        let result = ResultRepo::open_for_assignment(&pool, assignment).await.unwrap();
        let hard = &questions[0];
        let easy = &questions[1];
        let hard_option = hard.options.iter().find(|o| o.is_correct == correct_on_hard);
        ResultRepo::record_response(
            &pool,
            result.id,
            &RecordResponse {
                question_id: hard.question.id,
                option_id: hard_option.map(|o| o.id),
            },
        )
        .await
        .unwrap();
        ResultRepo::record_response(
            &pool,
            result.id,
            &RecordResponse {
                question_id: easy.question.id,
                option_id: easy.options.iter().find(|o| o.is_correct).map(|o| o.id),
            },
        )
        .await
        .unwrap();
    }

    let rows =
        AnalyticsRepo::question_difficulty(&pool, SubjectKind::Evaluation, evaluation.id, 10)
            .await
            .unwrap();
    assert_eq!(rows.len(), 2, "unanswered question is excluded");
    assert_eq!(rows[0].text, "Hard one");
    assert_eq!(rows[0].answer_count, 2);
    assert_eq!(rows[0].correct_count, 1);
    assert_eq!(rows[1].text, "Easy one");
    assert_eq!(rows[1].correct_count, 2);
}

// ---------------------------------------------------------------------------
// Test: result completion is atomic with the assignment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_result_completion_is_atomic_and_once_only(pool: PgPool) {
    let u1 = seed_user(&pool, 1, "r1@example.com").await;
    let evaluation = EvaluationRepo::create(
        &pool,
        1,
        &CreateEvaluation {
            training_id: None,
            title: "Quiz".to_string(),
            passing_score: Some(50.0),
            time_limit_minutes: Some(30),
            created_by: u1,
        },
    )
    .await
    .unwrap();
    AssignmentRepo::bulk_assign(&pool, SubjectKind::Evaluation, evaluation.id, 1, &[u1])
        .await
        .unwrap();
    let assignment = assignment_id_for(&pool, evaluation.id, u1).await;

    let opened = ResultRepo::open_for_assignment(&pool, assignment).await.unwrap();
    let reopened = ResultRepo::open_for_assignment(&pool, assignment).await.unwrap();
    assert_eq!(opened.id, reopened.id, "reopening returns the same result");

    assert!(ResultRepo::complete(&pool, assignment, 85.0).await.unwrap());
    assert!(
        !ResultRepo::complete(&pool, assignment, 10.0).await.unwrap(),
        "completion must not be re-recorded"
    );

    let result = ResultRepo::find_by_assignment(&pool, assignment)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(result.score, Some(85.0));
    assert!(result.completed_at.is_some());

    let row = AssignmentRepo::find_by_id(&pool, TenantScope::Tenant(1), assignment)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.score, Some(85.0));
    assert!(row.completed_at.is_some());
}
