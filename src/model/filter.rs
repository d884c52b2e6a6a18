use super::task::TaskStatus;

/// Search/status filter applied to the task list fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Query parameters for `GET /tasks/{user_id}`. The search term is trimmed
    /// and omitted when blank; the status is omitted when unset or blank.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let search = self.search.trim();
        if !search.is_empty() {
            pairs.push(("search", search.to_string()));
        }
        if let Some(status) = &self.status {
            let status = status.as_str().trim();
            if !status.is_empty() {
                pairs.push(("status", status.to_string()));
            }
        }
        pairs
    }

    /// Advance the status selector: all → To Do → Done → all
    pub fn cycle_status(&mut self) {
        self.status = match self.status {
            None => Some(TaskStatus::Todo),
            Some(TaskStatus::Todo) => Some(TaskStatus::Done),
            Some(_) => None,
        };
    }

    pub fn status_label(&self) -> &str {
        self.status.as_ref().map_or("All", |s| s.as_str())
    }
}
