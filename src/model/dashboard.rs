use serde::{Deserialize, Serialize};

/// Aggregate counts for a user's tasks, computed by the API per request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_tasks: u64,
    #[serde(default)]
    pub todo_tasks: u64,
    #[serde(default)]
    pub done_tasks: u64,
    #[serde(default)]
    pub overdue_tasks: u64,
}
