//! Chat flow tests: session-per-project, append-only messages, AI reply job.

mod common;

use common::{seed_project_with_source, test_user, TestApp, TestHarness};
use server_core::domains::chat::actions::{get_session, post_message, PostMessageRequest};
use server_core::domains::chat::models::{ChatMessage, ChatSession, Sender};
use server_core::kernel::MockCompletioner;

#[tokio::test]
async fn first_message_creates_the_session_and_dispatches_a_reply() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(
        harness.db_pool.clone(),
        MockCompletioner::new().with_response("It is about cell biology."),
    );

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"cell biology notes")
        .await
        .unwrap();

    let accepted = post_message(
        user,
        PostMessageRequest {
            project_id: project.id,
            message: "What is this document about?".into(),
        },
        &app.deps,
    )
    .await
    .unwrap();

    app.run_job(accepted.job_id).await.unwrap();

    let detail = get_session(project.id, user, &app.deps).await.unwrap();
    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.messages[0].sender, Sender::User);
    assert_eq!(detail.messages[1].sender, Sender::Assistant);
    assert_eq!(detail.messages[1].body, "It is about cell biology.");

    // The document context reached the model
    let prompts = app.ai.prompts();
    assert!(prompts[0].contains("cell biology notes"));
    assert!(prompts[0].contains("What is this document about?"));
}

#[tokio::test]
async fn repeated_messages_reuse_one_session() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(
        harness.db_pool.clone(),
        MockCompletioner::new()
            .with_response("answer one")
            .with_response("answer two"),
    );

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"notes")
        .await
        .unwrap();

    let first = post_message(
        user,
        PostMessageRequest {
            project_id: project.id,
            message: "first?".into(),
        },
        &app.deps,
    )
    .await
    .unwrap();
    app.run_job(first.job_id).await.unwrap();

    let second = post_message(
        user,
        PostMessageRequest {
            project_id: project.id,
            message: "second?".into(),
        },
        &app.deps,
    )
    .await
    .unwrap();
    app.run_job(second.job_id).await.unwrap();

    assert_eq!(first.session_id, second.session_id);

    let messages = ChatMessage::list_for_session(first.session_id, &harness.db_pool)
        .await
        .unwrap();
    assert_eq!(messages.len(), 4);

    // Time-ordered: user, assistant, user, assistant
    let senders: Vec<Sender> = messages.iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![Sender::User, Sender::Assistant, Sender::User, Sender::Assistant]
    );
}

#[tokio::test]
async fn concurrent_session_creation_yields_one_row() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"notes")
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = harness.db_pool.clone();
        let project_id = project.id;
        handles.push(tokio::spawn(async move {
            ChatSession::get_or_create(project_id, user, &pool).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM chat_sessions WHERE project_id = $1")
            .bind(project.id)
            .fetch_one(&harness.db_pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn empty_messages_are_rejected() {
    let harness = TestHarness::new().await.unwrap();
    let app = TestApp::new(harness.db_pool.clone(), MockCompletioner::new());

    let user = test_user();
    let project = seed_project_with_source(&app, user, "notes.txt", b"notes")
        .await
        .unwrap();

    let result = post_message(
        user,
        PostMessageRequest {
            project_id: project.id,
            message: "   ".into(),
        },
        &app.deps,
    )
    .await;
    assert!(result.is_err());
}
