//! Boundary to the remote todo API.
//!
//! [`TaskApi`] is the seam the controller talks through; [`HttpApi`] is the
//! reqwest implementation and tests substitute `MockTaskApi`.

mod http;

pub use http::HttpApi;

use serde::Serialize;

use crate::model::{DashboardSummary, ImportedTask, NewTask, Session, Task, TaskFilter, TaskStatus, UserId};

/// Fallback message when a rejected login/registration carries no `detail`
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// Error type for API calls
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network unreachable, timeout, connection reset
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// Response body was not the JSON we expected
    #[error("malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },
    /// The API answered with a failure status and (maybe) a reason
    #[error("{0}")]
    Rejected(String),
}

/// Which credential endpoint to call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    pub fn path(self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Register => "register",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// HTTP status of a mutation. Mutations are fire-and-reload: the caller logs
/// a failure status but still resynchronizes from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationStatus(pub u16);

impl MutationStatus {
    pub const OK: MutationStatus = MutationStatus(200);

    pub fn is_success(self) -> bool {
        (200..300).contains(&self.0)
    }
}

/// Operations exposed by the remote todo API
#[cfg_attr(test, mockall::automock)]
pub trait TaskApi {
    /// `POST /{login|register}`
    fn authenticate(&self, action: AuthAction, credentials: &Credentials) -> Result<Session, ApiError>;

    /// `GET /dashboard/{user_id}`
    fn dashboard(&self, user_id: &UserId) -> Result<DashboardSummary, ApiError>;

    /// `GET /tasks/{user_id}` with optional `search` / `status` query
    fn list_tasks(&self, user_id: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, ApiError>;

    /// `POST /tasks`
    fn create_task(&self, task: &NewTask) -> Result<MutationStatus, ApiError>;

    /// `PUT /tasks/{id}/status?status=`
    fn update_status(&self, task_id: i64, status: &TaskStatus) -> Result<MutationStatus, ApiError>;

    /// `DELETE /tasks/{id}/`
    fn delete_task(&self, task_id: i64) -> Result<MutationStatus, ApiError>;

    /// `POST /todos/`, used only by bulk import
    fn import_task(&self, task: &ImportedTask) -> Result<MutationStatus, ApiError>;
}
