//! Request-boundary tests: validation, ownership, and the balance
//! pre-check all fire before any state is touched.

mod common;

use common::{count_content_rows, seed_project_with_source, test_user, TestApp, TestHarness};
use rust_decimal::Decimal;
use server_core::common::{ApiError, ProjectId};
use server_core::domains::billing::UserProfile;
use server_core::domains::studio::actions::request_generation;
use server_core::domains::studio::options::{GenerationRequest, SlideDeckOptions};
use server_core::kernel::MockCompletioner;

fn slide_request(count: u32) -> GenerationRequest {
    GenerationRequest::SlideDeck(SlideDeckOptions { slide_count: count })
}

async fn set_balance(pool: &sqlx::PgPool, user_id: server_core::common::UserId, balance: Decimal) {
    UserProfile::get_or_create(user_id, pool).await.unwrap();
    sqlx::query("UPDATE user_profiles SET token_balance = $2 WHERE user_id = $1")
        .bind(user_id)
        .bind(balance)
        .execute(pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn insufficient_balance_rejects_before_any_state_change() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"text")
        .await
        .unwrap();

    // balance 0.05 < threshold 0.09
    set_balance(&harness.db_pool, user, Decimal::new(5, 2)).await;

    let result = request_generation(project.id, user, slide_request(8), &app.deps).await;
    assert!(matches!(result, Err(ApiError::InsufficientFunds)));

    // No content row was created or mutated, so no job can reference one
    assert_eq!(
        count_content_rows(&harness.db_pool, project.id.into_uuid())
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn balance_at_threshold_is_admitted() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"text")
        .await
        .unwrap();

    set_balance(&harness.db_pool, user, Decimal::new(9, 2)).await;

    let result = request_generation(project.id, user, slide_request(8), &app.deps).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn missing_project_is_not_found() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let result =
        request_generation(ProjectId::new(), test_user(), slide_request(8), &app.deps).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn foreign_project_is_invisible() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let owner = test_user();
    let stranger = test_user();
    let project = seed_project_with_source(&app, owner, "notes.txt", b"text")
        .await
        .unwrap();

    let result = request_generation(project.id, stranger, slide_request(8), &app.deps).await;
    assert!(matches!(result, Err(ApiError::NotFound(_))));
}

#[tokio::test]
async fn out_of_range_options_are_rejected_not_clamped() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"text")
        .await
        .unwrap();

    let result = request_generation(project.id, user, slide_request(25), &app.deps).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));

    assert_eq!(
        count_content_rows(&harness.db_pool, project.id.into_uuid())
            .await
            .unwrap(),
        0
    );
}
