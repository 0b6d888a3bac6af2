use axum::{routing::get, Router};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::snapshot::FetchError;

use super::api::balloons as balloon_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to build upstream client: {0}")]
    Client(#[from] FetchError),
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/balloons", get(balloon_handlers::get_balloons))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    log::info!(
        "Upstream {} (timeout {}), cache TTL {}",
        config.source.base_url,
        humantime::format_duration(config.source.timeout),
        humantime::format_duration(config.cache.ttl)
    );

    let state = AppState::from_config(&config)?;
    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
