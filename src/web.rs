use crate::assembler::PuzzleAssembler;
use crate::history::{FileHistory, HistoryStore};
use crate::puzzle::Puzzle;
use crate::resolver::{NoLookup, RelationSource};
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use parking_lot::Mutex;
use rand::thread_rng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info};

#[derive(Clone)]
pub struct WebConfig {
    pub addr: SocketAddr,
    pub history_path: PathBuf,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            history_path: PathBuf::from("quadwords-history.json"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared server state: the assembler behind a lock, since acceptance
/// mutates the history store.
pub struct AppState<S, H> {
    assembler: Mutex<PuzzleAssembler<S, H>>,
}

impl<S, H> AppState<S, H> {
    pub fn new(assembler: PuzzleAssembler<S, H>) -> Self {
        Self {
            assembler: Mutex::new(assembler),
        }
    }
}

type SharedState<S, H> = Arc<AppState<S, H>>;

pub async fn serve(config: WebConfig) -> Result<(), WebError> {
    let history = FileHistory::open(&config.history_path);
    let state = Arc::new(AppState::new(PuzzleAssembler::new(NoLookup, history)));
    let router = build_router(state);
    info!(%config.addr, history = %config.history_path.display(), "Binding HTTP listener");
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

pub fn build_router<S, H>(state: SharedState<S, H>) -> Router
where
    S: RelationSource + Send + 'static,
    H: HistoryStore + Send + 'static,
{
    Router::new()
        .route("/api/puzzle", get(api_puzzle))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CompressionLayer::new())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = json!({ "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupPayload {
    pub title: String,
    pub words: Vec<String>,
    pub color: String,
}

/// Wire shape of a fetched puzzle: four groups in easy→extreme order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzlePayload {
    pub groups: Vec<GroupPayload>,
}

impl PuzzlePayload {
    fn from_puzzle(puzzle: &Puzzle) -> Self {
        Self {
            groups: puzzle
                .groups()
                .iter()
                .map(|group| GroupPayload {
                    title: group.title().to_string(),
                    words: group.words().to_vec(),
                    color: group.color().to_string(),
                })
                .collect(),
        }
    }
}

async fn api_puzzle<S, H>(
    State(state): State<SharedState<S, H>>,
) -> Result<Json<PuzzlePayload>, ApiError>
where
    S: RelationSource + Send + 'static,
    H: HistoryStore + Send + 'static,
{
    let assembled = state.assembler.lock().assemble(&mut thread_rng());
    match assembled {
        Ok(assembled) => {
            if !assembled.fresh {
                info!("served a puzzle that repeats recent history");
            }
            Ok(Json(PuzzlePayload::from_puzzle(&assembled.puzzle)))
        }
        Err(err) => {
            error!(error = %err, "puzzle assembly failed");
            Err(ApiError::internal("could not create puzzle"))
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "service": "quadwords-web" }))
}
