use crate::config::Config;
use crate::models::{ItemView, MediaType, RecommendationOutcome, SearchQuery};
use crate::recommend::{self, SearchController};
use crate::render;
use crate::tmdb::{TmdbApi, TmdbClient};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{info, warn};

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub tmdb: Arc<dyn TmdbApi>,
    pub controller: Arc<SearchController>,
    pub image_base: String,
}

impl AppState {
    pub fn new(tmdb: Arc<dyn TmdbApi>, image_base: impl Into<String>) -> Self {
        Self {
            tmdb,
            controller: Arc::new(SearchController::new()),
            image_base: image_base.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub media_type: Option<String>,
}

impl SearchParams {
    fn into_query(self) -> Result<SearchQuery> {
        let media_type = match self.media_type.as_deref() {
            Some(raw) => raw.parse::<MediaType>()?,
            None => MediaType::default(),
        };
        Ok(SearchQuery::new(self.title, media_type))
    }
}

pub async fn run_server(config: Config) -> Result<()> {
    let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::from_config(&config)?);
    let state = AppState::new(tmdb, config.image_base.clone());
    let app = build_router(state);

    info!("Listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/search", post(submit_search))
        .route("/api/recommendations", get(api_recommendations))
        .route("/health", get(health))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let view = state.controller.snapshot().await;
    Html(render::render_page(&view, &state.image_base))
}

async fn submit_search(
    State(state): State<AppState>,
    Form(params): Form<SearchParams>,
) -> Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => {
            warn!("Rejecting search: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    info!("Search for {} '{}'", query.media_type, query.title);
    state.controller.submit(state.tmdb.as_ref(), query).await;
    Redirect::to("/").into_response()
}

async fn api_recommendations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = match params.into_query() {
        Ok(q) => q,
        Err(e) => {
            warn!("Rejecting API search: {}", e);
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() })))
                .into_response();
        }
    };
    let outcome = recommend::fetch_outcome(state.tmdb.as_ref(), &query).await;
    let items: Vec<ItemView> = outcome
        .items()
        .iter()
        .map(|item| ItemView::from_item(item, &state.image_base))
        .collect();
    let mut body = json!({
        "status": outcome.status(),
        "items": items,
    });
    if let RecommendationOutcome::TransportError(reason) = &outcome {
        body["error"] = json!(reason);
    }
    Json(body).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C)");
        }
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM)");
        }
    }
}
