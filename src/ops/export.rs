use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use crate::model::Task;

/// Pretty-printed JSON of a task snapshot (2-space indent)
pub fn tasks_to_json(tasks: &[Task]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tasks)
}

/// `todos_YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("todos_{}.json", date.format("%Y-%m-%d"))
}

/// Write the snapshot into `dir` under the dated export name, returning the path
pub fn write_export(tasks: &[Task], dir: &Path, date: NaiveDate) -> Result<PathBuf, std::io::Error> {
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(date));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(tasks_to_json(tasks)?.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&path).map_err(|e| e.error)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use tempfile::TempDir;

    fn fetched() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "user_id": 3, "title": "Write report", "description": "quarterly",
             "category": "Work", "due_date": "2025-04-30", "status": "To Do"},
            {"id": 2, "title": "Water <plants> & \"herbs\"", "category": null, "status": "Done"}
        ])
    }

    fn snapshot() -> Vec<Task> {
        serde_json::from_value(fetched()).unwrap()
    }

    #[test]
    fn file_name_uses_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();
        assert_eq!(export_file_name(date), "todos_2025-01-07.json");
    }

    #[test]
    fn export_round_trips_snapshot() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
        let tasks = snapshot();

        let path = write_export(&tasks, dir.path(), date).unwrap();
        assert_eq!(path, dir.path().join("todos_2025-05-02.json"));

        let text = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Task> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, tasks);
        assert!(parsed[1].status.is_done());

        let as_value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(as_value, fetched());
    }

    #[test]
    fn json_is_two_space_indented() {
        let text = tasks_to_json(&snapshot()[..1]).unwrap();
        assert!(text.starts_with("[\n  {\n    \""));
        assert!(text.contains("\n    \"id\": 1,"));
    }

    #[test]
    fn empty_snapshot_exports_empty_array() {
        assert_eq!(tasks_to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn status_change_shows_in_export() {
        let mut tasks = snapshot();
        tasks[0].status = TaskStatus::Done;
        let value: serde_json::Value = serde_json::from_str(&tasks_to_json(&tasks).unwrap()).unwrap();
        assert_eq!(value[0]["status"], "Done");
        assert_eq!(value[1]["category"], serde_json::Value::Null);
    }
}
