use std::sync::Arc;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use crate::books::factory::create_book_repository;
use crate::books::repository::BookRepository;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;

// AppState owns the shelf; every handler shares the same repository through it.
#[derive(Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) books: Arc<dyn BookRepository>,
}

impl AppState {
    pub fn new(config: Configuration) -> AppState {
        AppState {
            config,
            books: create_book_repository(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Fail,
    Error,
}

// ApiResponse is the JSON envelope shared by every route
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self { status: ResponseStatus::Success, message: None, data: Some(data) }
    }

    pub fn message_with_data(message: &str, data: T) -> Self {
        Self { status: ResponseStatus::Success, message: Some(message.to_string()), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self { status: ResponseStatus::Success, message: Some(message.to_string()), data: None }
    }

    fn failure(status: ResponseStatus, message: &str) -> Self {
        Self { status, message: Some(message.to_string()), data: None }
    }
}

#[derive(Debug)]
pub struct ServerError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl ServerError {
    pub fn new(status: StatusCode, message: &str) -> Self {
        Self { status, message: message.to_string() }
    }
}

pub fn json_to_server_error(action: &str, err: impl std::fmt::Display) -> ServerError {
    ServerError::new(StatusCode::BAD_REQUEST, format!("{}. {}", action, err).as_str())
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let status = match err {
            CommandError::DuplicateKey { .. } => StatusCode::CONFLICT,
            CommandError::NotFound { .. } => StatusCode::NOT_FOUND,
            CommandError::Runtime { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            CommandError::Serialization { .. } => StatusCode::BAD_REQUEST,
            CommandError::Validation { .. } => StatusCode::BAD_REQUEST,
        };
        if status.is_server_error() {
            error!(?err, "command failed");
        }
        ServerError::new(status, err.message())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = if self.status.is_server_error() {
            ResponseStatus::Error
        } else {
            warn!(status = self.status.as_u16(), message = self.message.as_str(), "request failed");
            ResponseStatus::Fail
        };
        (self.status, Json(ApiResponse::failure(status, self.message.as_str()))).into_response()
    }
}
