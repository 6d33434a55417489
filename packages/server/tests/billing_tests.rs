//! Balance lifecycle tests: race-safe lazy creation, atomic decrement,
//! and settlement by the generation pipeline.

mod common;

use common::{seed_project_with_source, slide_deck_json, test_user, TestApp, TestHarness};
use rust_decimal::Decimal;
use server_core::domains::billing::{calculate_cost, UserProfile};
use server_core::domains::studio::actions::request_generation;
use server_core::domains::studio::options::{GenerationRequest, SlideDeckOptions};
use server_core::kernel::traits::TokenUsage;
use server_core::kernel::{MockCompletioner, GPT_5_NANO};

#[tokio::test]
async fn profile_creation_is_race_safe() {
    let harness = TestHarness::new().await.unwrap();
    let user = test_user();

    // Several concurrent entry points racing to create the profile
    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = harness.db_pool.clone();
        handles.push(tokio::spawn(async move {
            UserProfile::get_or_create(user, &pool).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user_profiles WHERE user_id = $1",
    )
    .bind(user)
    .fetch_one(&harness.db_pool)
    .await
    .unwrap();
    assert_eq!(count, 1);

    let profile = UserProfile::get_or_create(user, &harness.db_pool).await.unwrap();
    assert_eq!(profile.token_balance, Decimal::new(50000, 4));
}

#[tokio::test]
async fn concurrent_debits_accumulate_without_lost_updates() {
    let harness = TestHarness::new().await.unwrap();
    let user = test_user();
    UserProfile::get_or_create(user, &harness.db_pool).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = harness.db_pool.clone();
        handles.push(tokio::spawn(async move {
            UserProfile::debit(user, Decimal::new(1, 1), &pool).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let profile = UserProfile::get_or_create(user, &harness.db_pool).await.unwrap();
    // 5.00 - 10 * 0.1
    assert_eq!(profile.token_balance, Decimal::new(40000, 4));
}

#[tokio::test]
async fn debit_may_drive_balance_negative() {
    let harness = TestHarness::new().await.unwrap();
    let user = test_user();
    UserProfile::get_or_create(user, &harness.db_pool).await.unwrap();

    let profile = UserProfile::debit(user, Decimal::new(6, 0), &harness.db_pool)
        .await
        .unwrap();
    assert!(profile.token_balance < Decimal::ZERO);
}

#[tokio::test]
async fn successful_generation_settles_the_reported_cost() {
    let harness = TestHarness::new().await.unwrap();
    let usage = TokenUsage {
        prompt_tokens: 2_000,
        completion_tokens: 1_000,
    };
    let app = TestApp::new(
        harness.db_pool.clone(),
        MockCompletioner::new().with_response_and_usage(&slide_deck_json(8), Some(usage)),
    );

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"some text")
        .await
        .unwrap();

    let before = UserProfile::get_or_create(user, &harness.db_pool)
        .await
        .unwrap()
        .token_balance;

    let accepted = request_generation(
        project.id,
        user,
        GenerationRequest::SlideDeck(SlideDeckOptions { slide_count: 8 }),
        &app.deps,
    )
    .await
    .unwrap();
    app.run_job(accepted.job_id).await.unwrap();

    let after = UserProfile::get_or_create(user, &harness.db_pool)
        .await
        .unwrap()
        .token_balance;

    let expected_cost = calculate_cost(GPT_5_NANO, &usage);
    assert!(expected_cost > Decimal::ZERO);
    assert_eq!(before - after, expected_cost);
}

#[tokio::test]
async fn usage_free_responses_settle_nothing() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(
        harness.db_pool.clone(),
        MockCompletioner::new().with_response_and_usage(&slide_deck_json(8), None),
    );

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"some text")
        .await
        .unwrap();

    let before = UserProfile::get_or_create(user, &harness.db_pool)
        .await
        .unwrap()
        .token_balance;

    let accepted = request_generation(
        project.id,
        user,
        GenerationRequest::SlideDeck(SlideDeckOptions { slide_count: 8 }),
        &app.deps,
    )
    .await
    .unwrap();
    app.run_job(accepted.job_id).await.unwrap();

    let after = UserProfile::get_or_create(user, &harness.db_pool)
        .await
        .unwrap()
        .token_balance;
    assert_eq!(before, after);
}
