//! The client controller: session lifecycle, the last fetched snapshot, and
//! every user-facing operation. Both the CLI and the TUI drive this type.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::api::{ApiError, AuthAction, Credentials, MutationStatus, TaskApi};
use crate::io::session_store::{SessionError, SessionStore};
use crate::model::{
    DashboardSummary, ImportedTask, NewTask, Session, Task, TaskFields, TaskFilter, TaskStatus,
    UserId,
};
use crate::ops::export;
use crate::ops::import::{self, ImportError};

/// Error type for controller operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("please enter both username and password")]
    MissingCredentials,
    #[error("not logged in (run `td login`)")]
    NotLoggedIn,
    #[error("a task needs a title")]
    EmptyTitle,
    #[error("invalid due date '{0}' (expected YYYY-MM-DD)")]
    InvalidDueDate(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error("import stopped after {imported} of {total} todos: {source}")]
    ImportInterrupted {
        imported: usize,
        total: usize,
        source: ApiError,
    },
    #[error("could not write export: {0}")]
    Export(#[from] std::io::Error),
    #[error("could not encode tasks as JSON: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A load the caller should run, stamped with its generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub user_id: UserId,
    pub filter: TaskFilter,
}

/// Result of one dashboard + task list fetch
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub dashboard: DashboardSummary,
    pub tasks: Vec<Task>,
}

/// Dashboard first, then the filtered list, as two sequential requests
pub fn fetch_snapshot<A: TaskApi + ?Sized>(api: &A, request: &LoadRequest) -> Result<Snapshot, ApiError> {
    let dashboard = api.dashboard(&request.user_id)?;
    let tasks = api.list_tasks(&request.user_id, &request.filter)?;
    tracing::debug!(
        generation = request.generation,
        tasks = tasks.len(),
        "snapshot fetched"
    );
    Ok(Snapshot { dashboard, tasks })
}

/// Check credentials locally before any request is made
pub fn validate_credentials(username: &str, password: &str) -> Result<Credentials, ClientError> {
    if username.is_empty() || password.is_empty() {
        return Err(ClientError::MissingCredentials);
    }
    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Log a mutation whose response status was a failure. The caller reloads
/// either way; the failure is otherwise not surfaced.
pub fn note_mutation(action: &str, status: MutationStatus) {
    if !status.is_success() {
        tracing::warn!(action, status = status.0, "mutation rejected by server");
    }
}

/// Send import payloads one at a time, awaiting each before the next.
/// Returns the number sent. Nothing is rolled back when a request fails.
pub fn send_imports<A: TaskApi + ?Sized>(api: &A, payloads: &[ImportedTask]) -> Result<usize, ClientError> {
    let total = payloads.len();
    for (imported, payload) in payloads.iter().enumerate() {
        match api.import_task(payload) {
            Ok(status) => note_mutation("import", status),
            Err(source) => {
                return Err(ClientError::ImportInterrupted {
                    imported,
                    total,
                    source,
                });
            }
        }
    }
    tracing::info!(count = total, "import finished");
    Ok(total)
}

/// Controller state. LOGGED_IN iff `session` is set.
pub struct Client<A> {
    api: A,
    store: SessionStore,
    session: Option<Session>,
    todos: Vec<Task>,
    dashboard: DashboardSummary,
    pub filter: TaskFilter,
    issued_generation: u64,
    applied_generation: u64,
}

impl<A: TaskApi> Client<A> {
    /// Construct the controller, hydrating the session from storage
    pub fn new(api: A, store: SessionStore) -> Self {
        let session = store.load();
        Client {
            api,
            store,
            session,
            todos: Vec::new(),
            dashboard: DashboardSummary::default(),
            filter: TaskFilter::default(),
            issued_generation: 0,
            applied_generation: 0,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    /// The last applied task snapshot
    pub fn todos(&self) -> &[Task] {
        &self.todos
    }

    pub fn dashboard(&self) -> DashboardSummary {
        self.dashboard
    }

    fn require_session(&self) -> Result<&Session, ClientError> {
        self.session.as_ref().ok_or(ClientError::NotLoggedIn)
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    /// Log in or register, then load the initial data.
    ///
    /// A failed initial load does not undo the login; it is logged and the
    /// snapshot stays empty.
    pub fn authenticate(&mut self, action: AuthAction, username: &str, password: &str) -> Result<(), ClientError> {
        let credentials = validate_credentials(username, password)?;
        let session = self.api.authenticate(action, &credentials)?;
        self.establish_session(session)?;
        if let Err(e) = self.load_data() {
            tracing::warn!(error = %e, "initial load after login failed");
        }
        Ok(())
    }

    /// Persist a session returned by the API and switch to LOGGED_IN
    pub fn establish_session(&mut self, session: Session) -> Result<(), ClientError> {
        self.store.save(&session)?;
        tracing::info!(user = %session.username, "logged in");
        self.session = Some(session);
        Ok(())
    }

    /// Clear all persisted state and return to the initial LOGGED_OUT state.
    /// In-memory state is reset even if the session file cannot be removed.
    pub fn logout(&mut self) -> Result<(), ClientError> {
        let cleared = self.store.clear();
        self.session = None;
        self.todos.clear();
        self.dashboard = DashboardSummary::default();
        self.filter = TaskFilter::default();
        // Anything issued before now belongs to the old session
        self.applied_generation = self.issued_generation;
        tracing::info!("logged out");
        cleared.map_err(ClientError::from)
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Stamp a new load with the current filter. `None` when logged out.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        let session = self.session.as_ref()?;
        self.issued_generation += 1;
        Some(LoadRequest {
            generation: self.issued_generation,
            user_id: session.user_id.clone(),
            filter: self.filter.clone(),
        })
    }

    /// Apply a finished load. Returns `Ok(false)` when the result is stale
    /// (older than what is already shown, or from before a logout) and was
    /// dropped.
    pub fn apply_load(&mut self, generation: u64, result: Result<Snapshot, ApiError>) -> Result<bool, ApiError> {
        if self.session.is_none() || generation <= self.applied_generation || generation > self.issued_generation {
            tracing::debug!(generation, applied = self.applied_generation, "dropping stale load");
            return Ok(false);
        }
        let snapshot = result?;
        self.applied_generation = generation;
        self.dashboard = snapshot.dashboard;
        self.todos = snapshot.tasks;
        Ok(true)
    }

    /// Fetch the dashboard and filtered list and replace the snapshot.
    /// No-op without a session.
    pub fn load_data(&mut self) -> Result<(), ClientError> {
        let Some(request) = self.begin_load() else {
            return Ok(());
        };
        let result = fetch_snapshot(&self.api, &request);
        self.apply_load(request.generation, result)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Validate form fields into a creation payload for the current user
    pub fn prepare_create(&self, fields: &TaskFields) -> Result<NewTask, ClientError> {
        let session = self.require_session()?;
        let title = fields.title.trim();
        if title.is_empty() {
            return Err(ClientError::EmptyTitle);
        }
        let due = fields.due_date.trim();
        let due_date = if due.is_empty() {
            None
        } else {
            NaiveDate::parse_from_str(due, "%Y-%m-%d")
                .map_err(|_| ClientError::InvalidDueDate(due.to_string()))?;
            Some(due.to_string())
        };
        Ok(NewTask {
            user_id: session.user_id.clone(),
            title: title.to_string(),
            description: fields.description.trim().to_string(),
            category: fields.category.trim().to_string(),
            due_date,
        })
    }

    pub fn create_task(&mut self, fields: &TaskFields) -> Result<(), ClientError> {
        let task = self.prepare_create(fields)?;
        note_mutation("create", self.api.create_task(&task)?);
        self.load_data()
    }

    /// Send any status, recognized or not, then reload
    pub fn update_task_status(&mut self, task_id: i64, status: &TaskStatus) -> Result<(), ClientError> {
        self.require_session()?;
        note_mutation("update status", self.api.update_status(task_id, status)?);
        self.load_data()
    }

    /// Delete after `confirm` agrees. Returns whether a request was sent.
    pub fn delete_task(&mut self, task_id: i64, confirm: impl FnOnce() -> bool) -> Result<bool, ClientError> {
        self.require_session()?;
        if !confirm() {
            return Ok(false);
        }
        note_mutation("delete", self.api.delete_task(task_id)?);
        self.load_data()?;
        Ok(true)
    }

    /// Validate import text into payloads for the current user
    pub fn prepare_import(&self, json_text: &str) -> Result<Vec<ImportedTask>, ClientError> {
        let session = self.require_session()?;
        Ok(import::parse_import(json_text, &session.user_id)?)
    }

    /// Import a JSON array of todos. Returns how many were sent.
    pub fn import_tasks(&mut self, json_text: &str) -> Result<usize, ClientError> {
        let payloads = self.prepare_import(json_text)?;
        let count = send_imports(&self.api, &payloads)?;
        self.load_data()?;
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Snapshot views
    // -----------------------------------------------------------------------

    /// Write the in-memory snapshot (no refetch) to `dir`
    pub fn export_tasks(&self, dir: &Path, date: NaiveDate) -> Result<PathBuf, ClientError> {
        Ok(export::write_export(&self.todos, dir, date)?)
    }

    /// Pretty JSON of the in-memory snapshot
    pub fn tasks_json(&self) -> Result<String, ClientError> {
        Ok(export::tasks_to_json(&self.todos)?)
    }
}
