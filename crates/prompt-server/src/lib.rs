pub mod error;
pub mod models;
pub mod rate_limit;
pub mod service;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};

pub use error::ApiError;
pub use models::{ErrorResponse, GenerateResponse, ModelsResponse, PromptRequest, WelcomeResponse};
pub use service::{GenerationService, Generator};

pub const WELCOME_MESSAGE: &str = "Welcome to the prompt console backend!";

pub type AppState = Arc<GenerationService>;

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/generate_response", post(generate_response))
        .route("/api/models", get(list_models))
        .fallback(not_found)
        .with_state(state)
}

pub async fn run_server(app: Router, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    tracing::info!(port, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutting down the prompt console backend");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE,
    })
}

async fn generate_response(
    State(service): State<AppState>,
    payload: Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::error!("invalid request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let options = request.validate().map_err(|err| {
        tracing::error!("validation error: {err}");
        ApiError::from(err)
    })?;

    let response = service
        .generate(&request.prompt, request.model.as_deref(), &options)
        .await
        .map_err(|err| {
            tracing::error!("error calling {}: {err:#}", service.provider().display_name());
            ApiError::Generation(err.to_string())
        })?;

    Ok(Json(GenerateResponse { response }))
}

async fn list_models(State(service): State<AppState>) -> Result<Json<ModelsResponse>, ApiError> {
    let models = service.list_models().await.map_err(|err| {
        tracing::error!("failed to list models: {err:#}");
        ApiError::Generation(err.to_string())
    })?;

    Ok(Json(ModelsResponse {
        provider: service.provider(),
        models,
    }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
