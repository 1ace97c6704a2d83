//! REST routes over the shared [`Board`].

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use kanban_core::board::Board;
use kanban_core::error::CoreError;
use kanban_core::models::{NewTaskData, Task, TaskPriority, TaskStatus, UpdateTaskData};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Board>,
}

impl AppState {
    pub fn new(board: Arc<Board>) -> Self {
        Self { board }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks", get(current_tasks).post(create_task))
        .route("/api/tasks/current", get(current_tasks))
        .route("/api/tasks/history", get(history_dates))
        .route("/api/tasks/history/{date}", get(history))
        .route("/api/tasks/{id}", put(update_task).delete(delete_task))
        .route("/api/tasks/{id}/status", put(update_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Maps [`CoreError`] onto a status code and a `{"message": ...}` body.
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CoreError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            CoreError::InvalidInput(message) => (StatusCode::BAD_REQUEST, message),
            CoreError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            other => {
                tracing::error!(error = ?other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub priority: Option<String>,
}

impl CreateTaskRequest {
    fn into_new_task(self) -> Result<NewTaskData, CoreError> {
        let (Some(title), Some(status), Some(task_type), Some(priority)) = (
            non_empty(self.title),
            non_empty(self.status),
            non_empty(self.task_type),
            non_empty(self.priority),
        ) else {
            return Err(CoreError::InvalidInput(
                "Title, status, type, and priority are required".to_string(),
            ));
        };

        Ok(NewTaskData {
            title,
            status: parse_status(&status)?,
            task_type,
            priority: parse_priority(&priority)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub task_type: Option<String>,
    pub priority: Option<String>,
}

impl UpdateTaskRequest {
    /// Empty strings count as "not provided".
    fn into_update(self) -> Result<UpdateTaskData, CoreError> {
        Ok(UpdateTaskData {
            title: non_empty(self.title),
            task_type: non_empty(self.task_type),
            priority: non_empty(self.priority)
                .map(|p| parse_priority(&p))
                .transpose()?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(rename = "newStatus")]
    pub new_status: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_status(raw: &str) -> Result<TaskStatus, CoreError> {
    raw.parse::<TaskStatus>()
        .map_err(|e| CoreError::InvalidInput(e.to_string()))
}

fn parse_priority(raw: &str) -> Result<TaskPriority, CoreError> {
    raw.parse::<TaskPriority>()
        .map_err(|e| CoreError::InvalidInput(e.to_string()))
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let open_day = state.board.open_day().await;
    Json(json!({ "status": "ok", "open_day": open_day }))
}

async fn current_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    Json(state.board.current().await)
}

async fn history_dates(State(state): State<AppState>) -> ApiResult<Json<Vec<NaiveDate>>> {
    Ok(Json(state.board.processed_dates().await?))
}

async fn history(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let view = state.board.resolve_str(&date).await?;
    Ok(([("x-snapshot-source", view.source.as_str())], Json(view.tasks)))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(request) = payload?;
    let data = request.into_new_task()?;
    let task = state.board.create_task(data).await?;
    tracing::info!(id = %task.id, status = %task.status, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(request) = payload?;
    let data = request.into_update()?;
    Ok(Json(state.board.update_task(&id, data).await?))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let Json(request) = payload?;
    let raw = non_empty(request.new_status)
        .ok_or_else(|| CoreError::InvalidInput("New status is required".to_string()))?;
    let status = parse_status(&raw)?;
    Ok(Json(state.board.set_status(&id, status).await?))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.board.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
