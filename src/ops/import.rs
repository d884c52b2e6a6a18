use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::model::{ImportedTask, TaskStatus, UserId};

/// Error type for import operations
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("only .json files can be imported: {0}")]
    NotJsonFile(PathBuf),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("error parsing JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid JSON format: expected an array of todos")]
    NotAnArray,
    #[error("each todo must have a title (item {index} has none)")]
    MissingTitle { index: usize },
}

pub const DEFAULT_CATEGORY: &str = "General";

/// Read an import file, accepting only `.json` paths
pub fn read_import_file(path: &Path) -> Result<String, ImportError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(ImportError::NotJsonFile(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| ImportError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate import text and build one creation payload per element.
///
/// Every element is checked before any payload is returned, so a bad element
/// anywhere in the file means nothing is imported. Missing or empty optional
/// fields take their defaults: description `""`, category `"General"`,
/// due date `null`, status `"To Do"`.
pub fn parse_import(json_text: &str, user_id: &UserId) -> Result<Vec<ImportedTask>, ImportError> {
    let value: Value = serde_json::from_str(json_text)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Err(ImportError::NotAnArray),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let title = non_empty_str(item, "title").ok_or(ImportError::MissingTitle { index })?;
            Ok(ImportedTask {
                user_id: user_id.clone(),
                title: title.to_string(),
                description: non_empty_str(item, "description").unwrap_or_default().to_string(),
                category: non_empty_str(item, "category")
                    .unwrap_or(DEFAULT_CATEGORY)
                    .to_string(),
                due_date: non_empty_str(item, "due_date").map(str::to_string),
                status: non_empty_str(item, "status")
                    .map(TaskStatus::from)
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn non_empty_str<'a>(item: &'a Value, key: &str) -> Option<&'a str> {
    item.get(key)?.as_str().filter(|s| !s.is_empty())
}
