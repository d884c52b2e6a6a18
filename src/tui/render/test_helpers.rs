use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::text::Line;
use tempfile::TempDir;

use crate::api::HttpApi;
use crate::client::{Client, Snapshot};
use crate::io::session_store::SessionStore;
use crate::model::{ClientConfig, DashboardSummary, Session, Task, UserId};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app screen
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// Plain text of a rendered line
pub fn line_text(line: &Line) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

fn app_with_store(dir: &TempDir, store: SessionStore) -> App {
    // Nothing listens here; jobs are inspected in the outbox, never sent
    let api = HttpApi::new("http://127.0.0.1:9", None).unwrap();
    let client = Client::new(api, store);
    App::new(client, &ClientConfig::default(), dir.path().to_path_buf())
}

/// An app on the login screen
pub fn logged_out_app() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    let app = app_with_store(&dir, store);
    (dir, app)
}

/// An app with a persisted session for user 7 "ada". Its outbox holds the
/// initial load.
pub fn logged_in_app() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let store = SessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session {
            user_id: UserId::new("7"),
            username: "ada".into(),
        })
        .unwrap();
    let app = app_with_store(&dir, store);
    (dir, app)
}

/// A snapshot whose dashboard counts match `tasks`
pub fn snapshot(tasks: Vec<Task>) -> Snapshot {
    let done = tasks.iter().filter(|t| t.status.is_done()).count() as u64;
    let total = tasks.len() as u64;
    Snapshot {
        dashboard: DashboardSummary {
            total_tasks: total,
            todo_tasks: total - done,
            done_tasks: done,
            overdue_tasks: 0,
        },
        tasks,
    }
}

/// Apply `tasks` as a freshly loaded snapshot and clear the outbox
pub fn with_snapshot(app: &mut App, tasks: Vec<Task>) {
    let request = app.client.begin_load().unwrap();
    app.client
        .apply_load(request.generation, Ok(snapshot(tasks)))
        .unwrap();
    app.outbox.clear();
}
