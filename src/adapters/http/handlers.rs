//! HTTP handlers wiring routes to the session controller.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tokio::sync::Mutex;

use crate::application::{ExpandError, ExpandOutcome, SessionController, SkipReason};
use crate::domain::foundation::NodeId;
use crate::ports::CompletionService;

use super::dto::{ErrorResponse, ExpandRequest, GenerateRequest, SessionResponse};

/// Shared application state.
///
/// The single session sits behind an async lock, so concurrent expand
/// requests queue instead of racing on overlapping tree snapshots.
#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<SessionController<dyn CompletionService>>>,
}

impl AppState {
    /// Wraps a controller for sharing across handlers.
    pub fn new(session: SessionController<dyn CompletionService>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }
}

/// POST /submit - generate a fresh tree from the described situation.
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let outcome = session.expand_from_root(&request.input).await?;

    match outcome {
        ExpandOutcome::Skipped(SkipReason::EmptyPrompt) => Err(ApiError::InputRequired),
        _ => Ok(Json(SessionResponse::from_state(session.state()))),
    }
}

/// POST /expand - expand the clicked scenario into three further outcomes.
pub async fn expand(
    State(state): State<AppState>,
    Json(request): Json<ExpandRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let parent = NodeId::new(request.parent_node_id);
    session
        .expand_from_scenario(&parent, request.scenario_index, &request.scenario_text)
        .await?;

    Ok(Json(SessionResponse::from_state(session.state())))
}

/// GET /tree - current session snapshot for the render layer.
pub async fn tree(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse::from_state(session.state()))
}

/// API-level error mapped onto the original wire contract.
#[derive(Debug)]
pub enum ApiError {
    /// The submitted input was blank.
    InputRequired,
    /// The expansion cycle failed.
    Expansion(ExpandError),
}

impl From<ExpandError> for ApiError {
    fn from(err: ExpandError) -> Self {
        ApiError::Expansion(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ApiError::InputRequired => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new("Input is required")),
            )
                .into_response(),
            ApiError::Expansion(err) => {
                tracing::error!(error = %err, "expansion failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new("Failed to generate scenarios")),
                )
                    .into_response()
            }
        }
    }
}
