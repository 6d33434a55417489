//! Podcast script stage tests: synchronous, row-free, cost settled
//! immediately.

mod common;

use common::{seed_project_with_source, test_user, TestApp, TestHarness};
use rust_decimal::Decimal;
use server_core::common::ApiError;
use server_core::domains::billing::UserProfile;
use server_core::domains::studio::actions::generate_podcast_script;
use server_core::domains::studio::options::{ContentFocus, PodcastLength, PodcastScriptRequest};
use server_core::kernel::MockCompletioner;

fn script_json() -> String {
    serde_json::json!({
        "script": {
            "title": "Cells, Explained",
            "description": "A tour of the cell",
            "body": "Welcome to this learning session on cell biology."
        }
    })
    .to_string()
}

fn script_request() -> PodcastScriptRequest {
    PodcastScriptRequest {
        podcast_length: PodcastLength::Medium,
        content_focus: ContentFocus::FullDocument,
    }
}

#[tokio::test]
async fn script_is_returned_without_touching_content_rows() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(
        harness.db_pool.clone(),
        MockCompletioner::new().with_response(&script_json()),
    );

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"cell biology notes")
        .await
        .unwrap();

    let script = generate_podcast_script(project.id, user, script_request(), &app.deps)
        .await
        .unwrap();
    assert_eq!(script.title, "Cells, Explained");
    assert!(script.body.starts_with("Welcome"));

    let count = common::count_content_rows(&harness.db_pool, project.id.into_uuid())
        .await
        .unwrap();
    assert_eq!(count, 0, "script stage must not persist a content row");
}

#[tokio::test]
async fn script_cost_is_settled_immediately() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(
        harness.db_pool.clone(),
        MockCompletioner::new().with_response(&script_json()),
    );

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"notes")
        .await
        .unwrap();

    let before = UserProfile::get_or_create(user, &harness.db_pool)
        .await
        .unwrap()
        .token_balance;

    generate_podcast_script(project.id, user, script_request(), &app.deps)
        .await
        .unwrap();

    let after = UserProfile::get_or_create(user, &harness.db_pool)
        .await
        .unwrap()
        .token_balance;
    assert!(after < before);
}

#[tokio::test]
async fn script_stage_enforces_the_balance_pre_check() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"notes")
        .await
        .unwrap();

    UserProfile::get_or_create(user, &harness.db_pool).await.unwrap();
    sqlx::query("UPDATE user_profiles SET token_balance = $2 WHERE user_id = $1")
        .bind(user)
        .bind(Decimal::new(1, 2))
        .execute(&harness.db_pool)
        .await
        .unwrap();

    let result = generate_podcast_script(project.id, user, script_request(), &app.deps).await;
    assert!(matches!(result, Err(ApiError::InsufficientFunds)));
    assert!(app.ai.prompts().is_empty(), "no paid work before admission");
}

#[tokio::test]
async fn empty_documents_cannot_become_podcasts() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "scan.png", b"\x89PNG")
        .await
        .unwrap();

    let result = generate_podcast_script(project.id, user, script_request(), &app.deps).await;
    assert!(matches!(result, Err(ApiError::Validation(_))));
}
