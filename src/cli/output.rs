use serde::Serialize;

use crate::model::{DashboardSummary, Session, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct WhoamiJson<'a> {
    pub user_id: &'a str,
    pub username: &'a str,
}

pub fn whoami_to_json(session: &Session) -> WhoamiJson<'_> {
    WhoamiJson {
        user_id: session.user_id.as_str(),
        username: &session.username,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per counter, labels aligned
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    format!(
        "Total:    {}\nTo Do:    {}\nDone:     {}\nOverdue:  {}",
        summary.total_tasks, summary.todo_tasks, summary.done_tasks, summary.overdue_tasks
    )
}

/// `  #12 [Done ] Title  (Work, due Mar 9, 2025)` plus an indented description
pub fn format_task_line(task: &Task) -> String {
    let marker = if task.status.is_done() { "x" } else { " " };
    let mut line = format!("#{:<4} [{}] {}", task.id, marker, task.title);

    let mut details = Vec::new();
    if !task.category.is_empty() {
        details.push(task.category.clone());
    }
    if let Some(due) = task.due_label() {
        details.push(format!("due {}", due));
    }
    if !matches!(task.status, crate::model::TaskStatus::Todo | crate::model::TaskStatus::Done) {
        details.push(task.status.to_string());
    }
    if !details.is_empty() {
        line.push_str(&format!("  ({})", details.join(", ")));
    }
    if let Some(desc) = task.description_text() {
        for desc_line in desc.lines() {
            line.push_str(&format!("\n        {}", desc_line));
        }
    }
    line
}

pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks.".to_string();
    }
    tasks
        .iter()
        .map(format_task_line)
        .collect::<Vec<_>>()
        .join("\n")
}
