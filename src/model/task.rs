use std::fmt;

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::session::UserId;

/// Task status as reported by the API.
///
/// The API only knows `"To Do"` and `"Done"`, but the client never validates
/// statuses it sends or receives, so anything else is carried through as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
    Other(String),
}

impl TaskStatus {
    pub const TODO_LABEL: &'static str = "To Do";
    pub const DONE_LABEL: &'static str = "Done";

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Todo => Self::TODO_LABEL,
            TaskStatus::Done => Self::DONE_LABEL,
            TaskStatus::Other(s) => s,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    /// The status a toggle control moves to: Done → To Do, anything else → Done
    pub fn toggled(&self) -> TaskStatus {
        if self.is_done() {
            TaskStatus::Todo
        } else {
            TaskStatus::Done
        }
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            TaskStatus::TODO_LABEL => TaskStatus::Todo,
            TaskStatus::DONE_LABEL => TaskStatus::Done,
            _ => TaskStatus::Other(s),
        }
    }
}

impl From<&str> for TaskStatus {
    fn from(s: &str) -> Self {
        TaskStatus::from(s.to_string())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as returned by `GET /tasks/{user_id}`.
///
/// The typed fields are the client's view of the row. The fetched object is
/// kept alongside them, and serializing writes it back unchanged (`null`s,
/// absent keys, `user_id`, `created_at`, ...) so an export reproduces exactly
/// what was fetched. Only a field changed since fetching is overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub due_date: Option<String>,
    pub status: TaskStatus,
    source: Map<String, Value>,
}

/// The typed columns, read leniently: missing optional keys take defaults
#[derive(Deserialize)]
struct TaskRow {
    id: i64,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    category: String,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    status: TaskStatus,
}

impl TaskRow {
    fn into_task(self, source: Map<String, Value>) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            due_date: self.due_date,
            status: self.status,
            source,
        }
    }
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        let mut task = Task {
            id,
            title: title.into(),
            description: None,
            category: String::new(),
            due_date: None,
            status: TaskStatus::Todo,
            source: Map::new(),
        };
        task.source = task.columns();
        task
    }

    /// A column as fetched, including ones the client does not interpret
    pub fn column(&self, key: &str) -> Option<&Value> {
        self.source.get(key)
    }

    /// The typed fields in their wire form
    fn columns(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), self.id.into());
        map.insert("title".into(), self.title.clone().into());
        map.insert("description".into(), self.description.clone().into());
        map.insert("category".into(), self.category.clone().into());
        map.insert("due_date".into(), self.due_date.clone().into());
        map.insert("status".into(), self.status.as_str().into());
        map
    }

    /// Description if present and non-blank
    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
    }

    /// Parsed due date. The API stores `YYYY-MM-DD` but may append a time part.
    pub fn due(&self) -> Option<NaiveDate> {
        let raw = self.due_date.as_deref()?.trim();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }

    /// Human-readable due date, falling back to the raw value when unparseable
    pub fn due_label(&self) -> Option<String> {
        let raw = self.due_date.as_deref().filter(|d| !d.is_empty())?;
        Some(match self.due() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => raw.to_string(),
        })
    }
}

impl<'de> Deserialize<'de> for Task {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = Map::<String, Value>::deserialize(deserializer)?;
        let row = TaskRow::deserialize(Value::Object(source.clone()))
            .map_err(<D::Error as de::Error>::custom)?;
        Ok(row.into_task(source))
    }
}

impl Serialize for Task {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fetched = TaskRow::deserialize(Value::Object(self.source.clone()))
            .ok()
            .map(|row| row.into_task(Map::new()).columns());
        let mut out = self.source.clone();
        for (key, value) in self.columns() {
            if fetched.as_ref().and_then(|f| f.get(&key)) != Some(&value) {
                out.insert(key, value);
            }
        }
        out.serialize(serializer)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Payload for `POST /tasks`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: Option<String>,
}

/// Payload for `POST /todos/`, one per imported element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedTask {
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: Option<String>,
    pub status: TaskStatus,
}

/// User-entered fields for a new task, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_known_and_unknown_values() {
        let parsed: Vec<TaskStatus> =
            serde_json::from_str(r#"["To Do", "Done", "Blocked"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                TaskStatus::Todo,
                TaskStatus::Done,
                TaskStatus::Other("Blocked".into())
            ]
        );
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"["To Do","Done","Blocked"]"#
        );
    }

    #[test]
    fn toggled_flips_between_todo_and_done() {
        assert_eq!(TaskStatus::Todo.toggled(), TaskStatus::Done);
        assert_eq!(TaskStatus::Done.toggled(), TaskStatus::Todo);
        assert_eq!(TaskStatus::Other("x".into()).toggled(), TaskStatus::Done);
    }

    #[test]
    fn task_keeps_unknown_columns() {
        let json = r#"{"id":3,"title":"Buy milk","description":null,"category":"Home",
            "due_date":"2025-06-01","status":"To Do","user_id":7,"created_at":"2025-05-01T10:00:00"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 3);
        assert_eq!(task.column("user_id"), Some(&serde_json::json!(7)));
        assert!(task.column("created_at").is_some());

        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["user_id"], 7);
        assert_eq!(value["description"], Value::Null);
    }

    #[test]
    fn serializing_reproduces_the_fetched_object() {
        let fetched = serde_json::json!({"id": 2, "title": "Call mom", "category": null, "status": "To Do"});
        let task: Task = serde_json::from_value(fetched.clone()).unwrap();
        assert_eq!(task.category, "");
        assert_eq!(task.description, None);
        assert_eq!(serde_json::to_value(&task).unwrap(), fetched);

        let sparse = serde_json::json!({"id": 4, "title": "No status"});
        let task: Task = serde_json::from_value(sparse.clone()).unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(serde_json::to_value(&task).unwrap(), sparse);
    }

    #[test]
    fn changed_fields_overwrite_the_fetched_object() {
        let fetched = serde_json::json!({"id": 2, "title": "Call mom", "category": null, "created_at": "x"});
        let mut task: Task = serde_json::from_value(fetched).unwrap();
        task.status = TaskStatus::Done;
        task.category = "Family".into();
        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            serde_json::json!({
                "id": 2, "title": "Call mom", "category": "Family",
                "status": "Done", "created_at": "x"
            })
        );
    }

    #[test]
    fn new_task_serializes_every_column() {
        assert_eq!(
            serde_json::to_value(Task::new(5, "x")).unwrap(),
            serde_json::json!({
                "id": 5, "title": "x", "description": null,
                "category": "", "due_date": null, "status": "To Do"
            })
        );
    }

    #[test]
    fn missing_title_is_rejected() {
        assert!(serde_json::from_str::<Task>(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn null_category_becomes_empty() {
        let task: Task =
            serde_json::from_str(r#"{"id":1,"title":"a","category":null,"status":"Done"}"#)
                .unwrap();
        assert_eq!(task.category, "");
        assert!(task.status.is_done());
    }

    #[test]
    fn due_label_formats_dates_and_timestamps() {
        let mut task = Task::new(1, "a");
        assert_eq!(task.due_label(), None);

        task.due_date = Some("2025-03-09".into());
        assert_eq!(task.due_label().as_deref(), Some("Mar 9, 2025"));

        task.due_date = Some("2025-03-09T00:00:00+00:00".into());
        assert_eq!(task.due_label().as_deref(), Some("Mar 9, 2025"));

        task.due_date = Some("someday".into());
        assert_eq!(task.due_label().as_deref(), Some("someday"));
    }

    #[test]
    fn blank_description_is_hidden() {
        let mut task = Task::new(1, "a");
        task.description = Some("   ".into());
        assert_eq!(task.description_text(), None);
        task.description = Some("details".into());
        assert_eq!(task.description_text(), Some("details"));
    }
}
