use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{ApiError, AuthAction, Credentials, MutationStatus, TaskApi, AUTH_FAILED_MESSAGE};
use crate::model::{
    DashboardSummary, ImportedTask, NewTask, Session, Task, TaskFilter, TaskStatus, UserId,
};

/// Blocking reqwest client bound to one API base URL
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

#[derive(Deserialize)]
struct AuthResponse {
    user_id: UserId,
    username: String,
}

impl HttpApi {
    /// Build a client for `base_url`. `timeout = None` waits indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a read request and decode its JSON body, turning failure statuses
    /// into `Rejected` with the API's `detail` when there is one.
    fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, endpoint: &str) -> Result<T, ApiError> {
        tracing::debug!(endpoint, "GET");
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let fallback = format!("{} failed with status {}", endpoint, status.as_u16());
            return Err(ApiError::Rejected(rejection_detail(response).unwrap_or(fallback)));
        }
        decode(response, endpoint)
    }

    fn mutate(&self, request: RequestBuilder, endpoint: &str) -> Result<MutationStatus, ApiError> {
        let response = request.send()?;
        let status = MutationStatus(response.status().as_u16());
        tracing::debug!(endpoint, status = status.0, "mutation sent");
        Ok(status)
    }
}

fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T, ApiError> {
    let text = response.text()?;
    serde_json::from_str(&text).map_err(|e| ApiError::Malformed {
        endpoint: endpoint.to_string(),
        message: e.to_string(),
    })
}

/// The `detail` string of an error body, if the body is JSON and has one.
/// Validation errors carry a list under `detail`; those fall back too.
fn rejection_detail(response: Response) -> Option<String> {
    let body: serde_json::Value = serde_json::from_str(&response.text().ok()?).ok()?;
    body.get("detail")?.as_str().map(str::to_string)
}

impl TaskApi for HttpApi {
    fn authenticate(&self, action: AuthAction, credentials: &Credentials) -> Result<Session, ApiError> {
        let endpoint = action.path();
        tracing::debug!(endpoint, username = %credentials.username, "POST");
        let response = self.client.post(self.url(endpoint)).json(credentials).send()?;
        if !response.status().is_success() {
            // A non-JSON error body is reported as malformed
            let body: serde_json::Value = decode(response, endpoint)?;
            let message = body
                .get("detail")
                .and_then(serde_json::Value::as_str)
                .map_or_else(|| AUTH_FAILED_MESSAGE.to_string(), str::to_string);
            return Err(ApiError::Rejected(message));
        }
        let body: AuthResponse = decode(response, endpoint)?;
        Ok(Session {
            user_id: body.user_id,
            username: body.username,
        })
    }

    fn dashboard(&self, user_id: &UserId) -> Result<DashboardSummary, ApiError> {
        let path = format!("dashboard/{}", user_id);
        self.fetch(self.client.get(self.url(&path)), &path)
    }

    fn list_tasks(&self, user_id: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, ApiError> {
        let path = format!("tasks/{}", user_id);
        let request = self.client.get(self.url(&path)).query(&filter.query_pairs());
        self.fetch(request, &path)
    }

    fn create_task(&self, task: &NewTask) -> Result<MutationStatus, ApiError> {
        self.mutate(self.client.post(self.url("tasks")).json(task), "tasks")
    }

    fn update_status(&self, task_id: i64, status: &TaskStatus) -> Result<MutationStatus, ApiError> {
        let path = format!("tasks/{}/status", task_id);
        let request = self
            .client
            .put(self.url(&path))
            .query(&[("status", status.as_str())]);
        self.mutate(request, &path)
    }

    fn delete_task(&self, task_id: i64) -> Result<MutationStatus, ApiError> {
        let path = format!("tasks/{}/", task_id);
        self.mutate(self.client.delete(self.url(&path)), &path)
    }

    fn import_task(&self, task: &ImportedTask) -> Result<MutationStatus, ApiError> {
        self.mutate(self.client.post(self.url("todos/")).json(task), "todos/")
    }
}
