//! HTTP front end.
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/karefoNER/{word}` | GET | Classify a word |
//! | `/health` | GET | Report whether artifacts loaded |

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use karefo_ai::{LookupError, NerService};
use karefo_core::{ErrorBody, NerResult};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub dictionary_words: usize,
}

pub fn router(service: NerService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/karefoNER/:word", get(lookup_word))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(service)
}

pub async fn serve(service: NerService, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, degraded = service.is_degraded(), "karefo listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn lookup_word(State(service): State<NerService>, Path(word): Path<String>) -> Response {
    lookup_response(service.lookup(&word))
}

async fn health(State(service): State<NerService>) -> Json<Health> {
    Json(Health {
        status: if service.is_degraded() { "degraded" } else { "ok" },
        dictionary_words: service.dictionary_len(),
    })
}

fn lookup_response(outcome: Result<NerResult, LookupError>) -> Response {
    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::from_fault(&e)),
        )
            .into_response(),
    }
}
