use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tally_api::v1::{ErrorBody, Todo, TodoDraft, Validate, ValidationErrors};
use tracing::info;
use uuid::Uuid;

use crate::store::StoreError;
use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todos", post(create_todo))
        .route("/todos/:id", get(get_todo))
        .route("/todos/:id", put(update_todo))
        .route("/todos/:id", delete(delete_todo))
        .route("/todos/:id/toggle", post(toggle_todo))
}

/// A failed request: status code plus the structured body the client
/// decodes. Database error text is logged here, never surfaced.
struct ApiFailure {
    status: StatusCode,
    body: ErrorBody,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<ValidationErrors> for ApiFailure {
    fn from(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: ErrorBody::validation(&errors),
        }
    }
}

impl From<StoreError> for ApiFailure {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(id) => Self {
                status: StatusCode::NOT_FOUND,
                body: ErrorBody::not_found(id),
            },
            StoreError::Db(err) => {
                tracing::error!("database failure: {err}");

                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody::internal(),
                }
            }
        }
    }
}

async fn list_todos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Todo>>, ApiFailure> {
    Ok(Json(state.store.list_all().await?))
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<TodoDraft>,
) -> Result<(StatusCode, Json<Todo>), ApiFailure> {
    draft.validate()?;

    let todo = state.store.create(draft).await?;

    info!(
        id = %todo.id,
        title = %todo.title,
        "created todo"
    );

    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ApiFailure> {
    Ok(Json(state.store.find_by_id(id).await?))
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(draft): Json<TodoDraft>,
) -> Result<Json<Todo>, ApiFailure> {
    draft.validate()?;

    let todo = state.store.update_fields(id, draft).await?;

    info!(
        id = %todo.id,
        title = %todo.title,
        "updated todo"
    );

    Ok(Json(todo))
}

async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ApiFailure> {
    let todo = state.store.toggle_completed(id).await?;

    info!(
        id = %todo.id,
        completed = todo.completed,
        "toggled todo"
    );

    Ok(Json(todo))
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiFailure> {
    state.store.delete(id).await?;

    info!(id = %id, "deleted todo");

    Ok(StatusCode::NO_CONTENT)
}
