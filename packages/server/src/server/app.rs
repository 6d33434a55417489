//! Application setup and router assembly.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domains::chat::jobs::register_chat_jobs;
use crate::domains::studio::job_handlers::register_studio_jobs;
use crate::kernel::jobs::{JobQueue, JobRegistry, JobRunner, PostgresJobQueue};
use crate::kernel::{
    AzureSpeechSynthesizer, OpenAiCompletioner, S3ObjectStorage, ServerDeps,
};
use crate::server::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    pub jwt_service: Arc<JwtService>,
}

/// Build the job registry with every domain's handlers.
pub fn build_job_registry() -> JobRegistry {
    let mut registry = JobRegistry::new();
    register_studio_jobs(&mut registry);
    register_chat_jobs(&mut registry);
    registry
}

/// Assemble ServerDeps from configuration.
pub async fn build_deps(pool: PgPool, config: &crate::Config) -> Arc<ServerDeps> {
    let openai_client = openai_client::OpenAIClient::new(config.openai_api_key.clone());
    let speech_client =
        speech_client::SpeechClient::new(config.speech_api_key.clone(), &config.speech_region);
    let storage = S3ObjectStorage::connect(
        config.storage_bucket.clone(),
        config.storage_region.clone(),
    )
    .await;

    let job_queue: Arc<dyn JobQueue> = Arc::new(PostgresJobQueue::new(pool.clone()));

    Arc::new(ServerDeps::new(
        pool,
        Arc::new(OpenAiCompletioner::new(openai_client)),
        Arc::new(storage),
        Arc::new(AzureSpeechSynthesizer::new(speech_client)),
        job_queue,
    ))
}

/// Build the Axum application router.
///
/// When `spawn_runner` is true the job runner starts as a background
/// task in this process; the standalone `worker` binary runs it alone
/// instead.
pub fn build_app(deps: Arc<ServerDeps>, jwt_service: Arc<JwtService>, spawn_runner: bool) -> Router {
    if spawn_runner {
        let registry = Arc::new(build_job_registry());
        let runner = JobRunner::new(deps.jobs.clone(), registry, deps.clone());
        tokio::spawn(async move {
            if let Err(e) = runner.run().await {
                tracing::error!(error = %e, "job runner exited with error");
            }
        });
    }

    let app_state = AppState {
        deps,
        jwt_service: jwt_service.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let jwt_service_for_middleware = jwt_service;

    Router::new()
        // Projects
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route("/projects/upload", post(routes::projects::upload_file))
        .route(
            "/projects/:id",
            get(routes::projects::get_project).delete(routes::projects::delete_project),
        )
        // Generation
        .route("/projects/:id/generate", post(routes::studio::generate_content))
        .route(
            "/projects/:id/podcast/script",
            post(routes::studio::generate_podcast_script),
        )
        .route(
            "/projects/:id/podcast/audio",
            post(routes::studio::generate_podcast_audio),
        )
        // Polling surface
        .route("/projects/:id/contents", get(routes::studio::list_contents))
        .route("/contents/:id", get(routes::studio::get_content))
        // Chat
        .route("/chat/messages", post(routes::chat::post_message))
        .route("/projects/:id/chat", get(routes::chat::get_session))
        // Profile
        .route("/profile", get(routes::profile::get_profile))
        // Health check (no auth required)
        .route("/health", get(routes::health::health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
