use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture, Event,
    KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use regex::Regex;

use crate::api::{AuthAction, HttpApi};
use crate::client::{self, Client};
use crate::model::{ClientConfig, Task, TaskFields};
use crate::ops::import;

use super::input;
use super::render;
use super::text_input::TextInput;
use super::theme::Theme;
use super::worker::{Job, JobResult, Worker};

/// Event poll interval; also the granularity of the search debounce
const TICK: Duration = Duration::from_millis(100);

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this task?";

/// Which top-level screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Login/register form (LOGGED_OUT)
    Auth,
    /// Dashboard and task list (LOGGED_IN)
    Main,
}

/// Current interaction mode on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    Search,
    Form,
    Confirm,
    ImportPrompt,
    JsonOverlay,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthField {
    #[default]
    Username,
    Password,
}

/// Login/register form state
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub username: TextInput,
    pub password: TextInput,
    pub focus: AuthField,
    /// Last error shown under the form
    pub message: Option<String>,
    /// A request is in flight; further submits are ignored
    pub pending: bool,
}

impl AuthForm {
    pub fn focused_input(&mut self) -> &mut TextInput {
        match self.focus {
            AuthField::Username => &mut self.username,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            AuthField::Username => AuthField::Password,
            AuthField::Password => AuthField::Username,
        };
    }
}

pub const FORM_LABELS: [&str; 4] = ["Title", "Description", "Category", "Due date"];

/// New-task form. Field order follows [`FORM_LABELS`].
#[derive(Debug, Clone)]
pub struct TaskForm {
    pub fields: [TextInput; 4],
    pub focus: usize,
    pub error: Option<String>,
}

impl Default for TaskForm {
    fn default() -> Self {
        TaskForm {
            fields: [
                TextInput::default(),
                TextInput::default(),
                TextInput::with_text(import::DEFAULT_CATEGORY),
                TextInput::default(),
            ],
            focus: 0,
            error: None,
        }
    }
}

impl TaskForm {
    pub fn focused_input(&mut self) -> &mut TextInput {
        &mut self.fields[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn to_fields(&self) -> TaskFields {
        let [title, description, category, due_date] = &self.fields;
        TaskFields {
            title: title.text().to_string(),
            description: description.text().to_string(),
            category: category.text().to_string(),
            due_date: due_date.text().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask { id: i64, title: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmState {
    pub message: String,
    pub action: ConfirmAction,
}

/// Read-only JSON view of the current snapshot
#[derive(Debug, Clone, Default)]
pub struct JsonOverlay {
    pub text: String,
    pub scroll: usize,
    /// Screen area of the popup from the last render, for click-outside
    pub area: Option<Rect>,
}

impl JsonOverlay {
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// One-line feedback shown in the status row until the next action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Main application state
pub struct App {
    pub client: Client<HttpApi>,
    pub theme: Theme,
    pub screen: Screen,
    pub mode: Mode,
    pub should_quit: bool,
    /// Cursor index into the task list
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    pub auth: AuthForm,
    pub search_input: TextInput,
    pub task_form: TaskForm,
    pub import_input: TextInput,
    pub confirm: Option<ConfirmState>,
    pub json_overlay: Option<JsonOverlay>,
    pub status: Option<StatusMessage>,
    /// Jobs waiting to be handed to the network worker
    pub outbox: Vec<Job>,
    /// Where `e` writes export files
    pub export_dir: PathBuf,
    search_debounce: Duration,
    reload_due: Option<Instant>,
}

impl App {
    pub fn new(client: Client<HttpApi>, config: &ClientConfig, export_dir: PathBuf) -> Self {
        let screen = if client.is_logged_in() {
            Screen::Main
        } else {
            Screen::Auth
        };
        let mut app = App {
            client,
            theme: Theme::from_config(&config.ui),
            screen,
            mode: Mode::Navigate,
            should_quit: false,
            cursor: 0,
            scroll_offset: 0,
            auth: AuthForm::default(),
            search_input: TextInput::default(),
            task_form: TaskForm::default(),
            import_input: TextInput::default(),
            confirm: None,
            json_overlay: None,
            status: None,
            outbox: Vec::new(),
            export_dir,
            search_debounce: Duration::from_millis(config.ui.search_debounce_ms),
            reload_due: None,
        };
        app.request_reload();
        app
    }

    // -----------------------------------------------------------------------
    // Feedback
    // -----------------------------------------------------------------------

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        tracing::warn!(text = %text, "error shown in status row");
        self.status = Some(StatusMessage { text, is_error: true });
    }

    // -----------------------------------------------------------------------
    // Loading
    // -----------------------------------------------------------------------

    /// Queue a fresh load with the current filter. Cancels any pending
    /// debounced reload. No-op when logged out.
    pub fn request_reload(&mut self) {
        self.reload_due = None;
        if let Some(request) = self.client.begin_load() {
            self.outbox.push(Job::Load(request));
        }
    }

    /// Search text changed: update the filter and restart the quiet period
    pub fn on_search_changed(&mut self, now: Instant) {
        self.client.filter.search = self.search_input.text().to_string();
        self.reload_due = Some(now + self.search_debounce);
    }

    /// Fire a debounced reload once its quiet period has passed
    pub fn tick(&mut self, now: Instant) {
        if self.reload_due.is_some_and(|due| now >= due) {
            self.request_reload();
        }
    }

    /// Send a pending debounced reload right away
    pub fn flush_search(&mut self) {
        if self.reload_due.is_some() {
            self.request_reload();
        }
    }

    pub fn reload_pending(&self) -> bool {
        self.reload_due.is_some()
    }

    pub fn cycle_status_filter(&mut self) {
        self.client.filter.cycle_status();
        self.request_reload();
    }

    /// Case-insensitive literal matcher for the active search term
    pub fn active_search_re(&self) -> Option<Regex> {
        let term = self.client.filter.search.trim();
        if term.is_empty() {
            return None;
        }
        Regex::new(&format!("(?i){}", regex::escape(term))).ok()
    }

    // -----------------------------------------------------------------------
    // Worker results
    // -----------------------------------------------------------------------

    pub fn handle_result(&mut self, result: JobResult) {
        match result {
            JobResult::Authenticated(outcome) => {
                self.auth.pending = false;
                match outcome {
                    Ok(session) => {
                        let username = session.username.clone();
                        if let Err(e) = self.client.establish_session(session) {
                            self.auth.message = Some(e.to_string());
                            return;
                        }
                        self.auth = AuthForm::default();
                        self.screen = Screen::Main;
                        self.mode = Mode::Navigate;
                        self.set_status(format!("Logged in as {}", username));
                        self.request_reload();
                    }
                    Err(e) => self.auth.message = Some(e.to_string()),
                }
            }
            JobResult::Loaded { generation, result } => {
                match self.client.apply_load(generation, result) {
                    Ok(true) => self.clamp_cursor(),
                    Ok(false) => {}
                    Err(e) => self.set_error(format!("Failed to load tasks: {}", e)),
                }
            }
            JobResult::Mutated { action, result } => match result {
                Ok(status) => {
                    client::note_mutation(action, status);
                    self.request_reload();
                }
                Err(e) => self.set_error(format!("Could not {}: {}", action, e)),
            },
            JobResult::Imported(outcome) => {
                match outcome {
                    Ok(count) => self.set_status(format!("Successfully imported {} todos!", count)),
                    Err(e) => self.set_error(e.to_string()),
                }
                // Partial imports are not rolled back, so resync either way
                self.request_reload();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// Validate locally, then queue the credential request
    pub fn submit_auth(&mut self, action: AuthAction) {
        if self.auth.pending {
            return;
        }
        match client::validate_credentials(self.auth.username.text(), self.auth.password.text()) {
            Ok(credentials) => {
                self.auth.message = None;
                self.auth.pending = true;
                self.outbox.push(Job::Authenticate {
                    action,
                    credentials,
                });
            }
            Err(e) => self.auth.message = Some(e.to_string()),
        }
    }

    /// Clear the session and return every piece of UI state to its initial value
    pub fn logout(&mut self) {
        if let Err(e) = self.client.logout() {
            tracing::warn!(error = %e, "could not remove session file");
        }
        self.screen = Screen::Auth;
        self.mode = Mode::Navigate;
        self.cursor = 0;
        self.scroll_offset = 0;
        self.auth = AuthForm::default();
        self.search_input.clear();
        self.task_form = TaskForm::default();
        self.import_input.clear();
        self.confirm = None;
        self.json_overlay = None;
        self.status = None;
        self.reload_due = None;
    }

    // -----------------------------------------------------------------------
    // Task list
    // -----------------------------------------------------------------------

    pub fn selected_task(&self) -> Option<&Task> {
        self.client.todos().get(self.cursor)
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.client.todos().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.client.todos().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Flip the selected task between Done and To Do
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let job = Job::UpdateStatus {
            task_id: task.id,
            status: task.status.toggled(),
        };
        self.outbox.push(job);
    }

    /// Ask before deleting the selected task
    pub fn request_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.confirm = Some(ConfirmState {
            message: DELETE_PROMPT.to_string(),
            action: ConfirmAction::DeleteTask {
                id: task.id,
                title: task.title.clone(),
            },
        });
        self.mode = Mode::Confirm;
    }

    pub fn resolve_confirm(&mut self, accepted: bool) {
        let Some(confirm) = self.confirm.take() else {
            self.mode = Mode::Navigate;
            return;
        };
        self.mode = Mode::Navigate;
        if !accepted {
            return;
        }
        match confirm.action {
            ConfirmAction::DeleteTask { id, title } => {
                tracing::info!(task_id = id, title = %title, "deleting task");
                self.outbox.push(Job::Delete { task_id: id });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Create
    // -----------------------------------------------------------------------

    pub fn open_task_form(&mut self) {
        self.task_form.error = None;
        self.mode = Mode::Form;
    }

    /// Validate and queue the new task; the form resets on success
    pub fn submit_task_form(&mut self) {
        match self.client.prepare_create(&self.task_form.to_fields()) {
            Ok(task) => {
                self.outbox.push(Job::Create(task));
                self.task_form = TaskForm::default();
                self.mode = Mode::Navigate;
            }
            Err(e) => self.task_form.error = Some(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Import / export / JSON view
    // -----------------------------------------------------------------------

    pub fn open_import_prompt(&mut self) {
        self.import_input.clear();
        self.mode = Mode::ImportPrompt;
    }

    /// Read and validate the file at the prompt path, then queue the uploads
    pub fn submit_import(&mut self) {
        let path = PathBuf::from(self.import_input.text().trim());
        self.mode = Mode::Navigate;
        let payloads = import::read_import_file(&path)
            .map_err(client::ClientError::from)
            .and_then(|text| self.client.prepare_import(&text));
        match payloads {
            Ok(payloads) => {
                self.set_status(format!("Importing {} todos...", payloads.len()));
                self.outbox.push(Job::Import(payloads));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Write the snapshot currently in memory to the export directory
    pub fn export(&mut self, date: NaiveDate) {
        match self.client.export_tasks(&self.export_dir, date) {
            Ok(path) => self.set_status(format!(
                "Exported {} tasks to {}",
                self.client.todos().len(),
                path.display()
            )),
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn open_json_overlay(&mut self) {
        match self.client.tasks_json() {
            Ok(text) => {
                self.json_overlay = Some(JsonOverlay {
                    text,
                    ..Default::default()
                });
                self.mode = Mode::JsonOverlay;
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn close_json_overlay(&mut self) {
        self.json_overlay = None;
        self.mode = Mode::Navigate;
    }

    /// Copy the JSON shown in the overlay to the system clipboard
    pub fn copy_json(&mut self) {
        let Some(overlay) = &self.json_overlay else {
            return;
        };
        let copied = arboard::Clipboard::new().and_then(|mut cb| cb.set_text(overlay.text.clone()));
        match copied {
            Ok(()) => self.set_status("JSON copied to clipboard!"),
            Err(e) => self.set_error(format!("Could not copy to clipboard: {}", e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal lifecycle
// ---------------------------------------------------------------------------

pub fn run(client: Client<HttpApi>, config: &ClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let worker = Worker::spawn(client.api().clone())?;
    let mut app = App::new(client, config, std::env::current_dir()?);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &worker);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    worker: &Worker,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }
        app.tick(Instant::now());

        while let Some(result) = worker.try_recv() {
            app.handle_result(result);
        }
        for job in app.outbox.drain(..) {
            worker.submit(job);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, Credentials, MutationStatus};
    use crate::model::{DashboardSummary, Session, TaskStatus, UserId};
    use crate::tui::render::test_helpers::{logged_in_app, logged_out_app, snapshot, with_snapshot};

    fn loaded_app(tasks: Vec<Task>) -> (tempfile::TempDir, App) {
        let (dir, mut app) = logged_in_app();
        with_snapshot(&mut app, tasks);
        (dir, app)
    }

    #[test]
    fn starts_on_screen_matching_session() {
        let (_dir, app) = logged_out_app();
        assert_eq!(app.screen, Screen::Auth);
        assert!(app.outbox.is_empty());

        let (_dir, app) = logged_in_app();
        assert_eq!(app.screen, Screen::Main);
        assert!(matches!(app.outbox.as_slice(), [Job::Load(_)]));
    }

    #[test]
    fn empty_credentials_show_message_without_request() {
        let (_dir, mut app) = logged_out_app();
        app.auth.username = TextInput::with_text("ada");
        app.submit_auth(AuthAction::Login);
        assert!(app.outbox.is_empty());
        assert_eq!(
            app.auth.message.as_deref(),
            Some("please enter both username and password")
        );
    }

    #[test]
    fn login_round_trip_switches_screen_and_loads() {
        let (_dir, mut app) = logged_out_app();
        app.auth.username = TextInput::with_text("ada");
        app.auth.password = TextInput::with_text("pw");
        app.submit_auth(AuthAction::Login);
        assert_eq!(
            app.outbox.drain(..).collect::<Vec<_>>(),
            vec![Job::Authenticate {
                action: AuthAction::Login,
                credentials: Credentials {
                    username: "ada".into(),
                    password: "pw".into(),
                },
            }]
        );
        assert!(app.auth.pending);

        app.handle_result(JobResult::Authenticated(Ok(Session {
            user_id: UserId::new("3"),
            username: "ada".into(),
        })));
        assert_eq!(app.screen, Screen::Main);
        assert!(app.auth.password.is_empty());
        assert!(matches!(app.outbox.as_slice(), [Job::Load(_)]));
    }

    #[test]
    fn rejected_login_shows_detail() {
        let (_dir, mut app) = logged_out_app();
        app.auth.pending = true;
        app.handle_result(JobResult::Authenticated(Err(ApiError::Rejected(
            "Username already registered".into(),
        ))));
        assert_eq!(app.screen, Screen::Auth);
        assert!(!app.auth.pending);
        assert_eq!(app.auth.message.as_deref(), Some("Username already registered"));
    }

    #[test]
    fn search_reload_is_debounced() {
        let (_dir, mut app) = loaded_app(vec![]);
        let start = Instant::now();

        for (i, c) in "milk".chars().enumerate() {
            app.search_input.insert_str(&c.to_string());
            app.on_search_changed(start + Duration::from_millis(50 * i as u64));
        }
        app.tick(start + Duration::from_millis(200));
        assert!(app.outbox.is_empty());

        app.tick(start + Duration::from_millis(450));
        match app.outbox.as_slice() {
            [Job::Load(request)] => assert_eq!(request.filter.search, "milk"),
            other => panic!("expected one load, got {:?}", other),
        }
    }

    #[test]
    fn status_filter_reloads_immediately() {
        let (_dir, mut app) = loaded_app(vec![]);
        app.cycle_status_filter();
        match app.outbox.as_slice() {
            [Job::Load(request)] => assert_eq!(request.filter.status, Some(TaskStatus::Todo)),
            other => panic!("expected one load, got {:?}", other),
        }
    }

    #[test]
    fn stale_load_result_is_ignored() {
        let (_dir, mut app) = logged_in_app();
        let Some(Job::Load(first)) = app.outbox.pop() else {
            panic!("expected initial load");
        };
        app.request_reload();
        let Some(Job::Load(second)) = app.outbox.pop() else {
            panic!("expected second load");
        };

        app.handle_result(JobResult::Loaded {
            generation: second.generation,
            result: Ok(snapshot(vec![Task::new(1, "new")])),
        });
        app.handle_result(JobResult::Loaded {
            generation: first.generation,
            result: Ok(snapshot(vec![Task::new(2, "old")])),
        });
        assert_eq!(app.client.todos()[0].title, "new");
    }

    #[test]
    fn failed_load_shows_error_and_keeps_list() {
        let (_dir, mut app) = loaded_app(vec![Task::new(1, "kept")]);
        app.request_reload();
        let Some(Job::Load(request)) = app.outbox.pop() else {
            panic!("expected load");
        };
        app.handle_result(JobResult::Loaded {
            generation: request.generation,
            result: Err(ApiError::Rejected("server down".into())),
        });
        assert_eq!(app.client.todos().len(), 1);
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn toggle_sends_opposite_status() {
        let mut done = Task::new(5, "done");
        done.status = TaskStatus::Done;
        let (_dir, mut app) = loaded_app(vec![Task::new(4, "open"), done]);

        app.toggle_selected();
        app.move_cursor(1);
        app.toggle_selected();
        assert_eq!(
            app.outbox,
            vec![
                Job::UpdateStatus {
                    task_id: 4,
                    status: TaskStatus::Done
                },
                Job::UpdateStatus {
                    task_id: 5,
                    status: TaskStatus::Todo
                },
            ]
        );
    }

    #[test]
    fn mutation_result_triggers_reload_even_on_failure_status() {
        let (_dir, mut app) = loaded_app(vec![]);
        app.handle_result(JobResult::Mutated {
            action: "delete",
            result: Ok(MutationStatus(404)),
        });
        assert!(matches!(app.outbox.as_slice(), [Job::Load(_)]));
    }

    #[test]
    fn delete_requires_confirmation() {
        let (_dir, mut app) = loaded_app(vec![Task::new(8, "old")]);

        app.request_delete();
        assert_eq!(app.mode, Mode::Confirm);
        app.resolve_confirm(false);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.outbox.is_empty());

        app.request_delete();
        app.resolve_confirm(true);
        assert_eq!(app.outbox, vec![Job::Delete { task_id: 8 }]);
    }

    #[test]
    fn task_form_validates_then_resets() {
        let (_dir, mut app) = loaded_app(vec![]);
        app.open_task_form();
        app.submit_task_form();
        assert_eq!(app.mode, Mode::Form);
        assert!(app.task_form.error.is_some());
        assert!(app.outbox.is_empty());

        app.task_form.fields[0] = TextInput::with_text("Buy milk");
        app.submit_task_form();
        assert_eq!(app.mode, Mode::Navigate);
        match app.outbox.as_slice() {
            [Job::Create(task)] => {
                assert_eq!(task.title, "Buy milk");
                assert_eq!(task.category, "General");
            }
            other => panic!("expected create, got {:?}", other),
        }
        assert!(app.task_form.fields[0].is_empty());
    }

    #[test]
    fn import_of_non_json_path_is_rejected() {
        let (dir, mut app) = loaded_app(vec![]);
        let path = dir.path().join("tasks.txt");
        std::fs::write(&path, "[]").unwrap();
        app.open_import_prompt();
        app.import_input.insert_str(&path.to_string_lossy());
        app.submit_import();
        assert!(app.outbox.is_empty());
        assert!(app.status.as_ref().is_some_and(|s| s.is_error));
    }

    #[test]
    fn import_queues_validated_payloads() {
        let (dir, mut app) = loaded_app(vec![]);
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, r#"[{"title":"A"},{"title":"B","status":"Done"}]"#).unwrap();
        app.open_import_prompt();
        app.import_input.insert_str(&path.to_string_lossy());
        app.submit_import();
        match app.outbox.as_slice() {
            [Job::Import(payloads)] => {
                assert_eq!(payloads.len(), 2);
                assert_eq!(payloads[1].status, TaskStatus::Done);
            }
            other => panic!("expected import, got {:?}", other),
        }

        app.outbox.clear();
        app.handle_result(JobResult::Imported(Ok(2)));
        assert_eq!(
            app.status.as_ref().map(|s| s.text.as_str()),
            Some("Successfully imported 2 todos!")
        );
        assert!(matches!(app.outbox.as_slice(), [Job::Load(_)]));
    }

    #[test]
    fn export_writes_dated_file() {
        let (dir, mut app) = loaded_app(vec![Task::new(1, "a")]);
        app.export_dir = dir.path().to_path_buf();
        app.export(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert!(dir.path().join("todos_2025-01-31.json").exists());
        assert!(app.status.as_ref().is_some_and(|s| !s.is_error));
    }

    #[test]
    fn json_overlay_shows_snapshot() {
        let (_dir, mut app) = loaded_app(vec![Task::new(1, "a")]);
        app.open_json_overlay();
        assert_eq!(app.mode, Mode::JsonOverlay);
        assert_eq!(
            app.json_overlay.as_ref().map(|o| o.text.clone()),
            app.client.tasks_json().ok()
        );
        app.close_json_overlay();
        assert!(app.json_overlay.is_none());
    }

    #[test]
    fn logout_resets_everything() {
        let (_dir, mut app) = loaded_app(vec![Task::new(1, "a")]);
        app.search_input.insert_str("milk");
        app.on_search_changed(Instant::now());
        app.open_json_overlay();
        app.outbox.clear();

        app.logout();
        assert_eq!(app.screen, Screen::Auth);
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.client.todos().is_empty());
        assert_eq!(app.client.dashboard(), DashboardSummary::default());
        assert!(app.search_input.is_empty());
        assert!(app.json_overlay.is_none());
        assert!(!app.reload_pending());

        // A debounced reload scheduled before logout never fires
        app.tick(Instant::now() + Duration::from_secs(5));
        assert!(app.outbox.is_empty());
    }

    #[test]
    fn search_regex_is_literal_and_case_insensitive() {
        let (_dir, mut app) = loaded_app(vec![]);
        app.client.filter.search = " a.b ".into();
        let re = app.active_search_re().unwrap();
        assert!(re.is_match("xA.By"));
        assert!(!re.is_match("axb"));
    }
}
