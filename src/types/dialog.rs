use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name/extension pair shown in a file dialog's type selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// Options for the open and save dialogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogOptions {
    pub title: Option<String>,
    pub default_path: Option<PathBuf>,
    pub filters: Vec<FileFilter>,
    pub create_directory: bool,
}

fn mind_map_filters() -> Vec<FileFilter> {
    vec![
        FileFilter::new("Mind Map Files", &["json"]),
        FileFilter::new("All Files", &["*"]),
    ]
}

impl DialogOptions {
    /// Options used by the bridge's `show-open-dialog` request.
    pub fn open_mind_map() -> Self {
        Self {
            title: Some("Open Mind Map".to_string()),
            default_path: None,
            filters: mind_map_filters(),
            create_directory: false,
        }
    }

    /// Options used by the File > Open menu item.
    pub fn menu_open() -> Self {
        Self {
            title: None,
            ..Self::open_mind_map()
        }
    }

    /// Options used by the bridge's `show-save-dialog` request.
    pub fn save_mind_map() -> Self {
        Self {
            title: Some("Save Mind Map".to_string()),
            default_path: Some(PathBuf::from("mindmap.json")),
            filters: mind_map_filters(),
            create_directory: true,
        }
    }
}

/// Result of an open dialog, shaped the way the UI expects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenDialogResult {
    pub canceled: bool,
    pub file_paths: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OpenDialogResult {
    pub fn picked(path: PathBuf) -> Self {
        Self {
            canceled: false,
            file_paths: vec![path],
            error: None,
        }
    }

    pub fn canceled() -> Self {
        Self {
            canceled: true,
            ..Self::default()
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            canceled: true,
            file_paths: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// Result of a save dialog, shaped the way the UI expects it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDialogResult {
    pub canceled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SaveDialogResult {
    pub fn picked(path: PathBuf) -> Self {
        Self {
            canceled: false,
            file_path: Some(path),
            error: None,
        }
    }

    pub fn canceled() -> Self {
        Self {
            canceled: true,
            ..Self::default()
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            canceled: true,
            file_path: None,
            error: Some(error.to_string()),
        }
    }
}
