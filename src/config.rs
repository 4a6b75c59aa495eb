//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;
use crate::model::LinkType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Type given to dependencies created by dragging.
    pub default_link_type: LinkType,
    pub show_dependencies: bool,
    pub last_project: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_link_type: LinkType::EndStart,
            show_dependencies: true,
            last_project: None,
        }
    }
}

impl Settings {
    /// `settings.json` under the platform config directory, or the working
    /// directory when none can be determined.
    pub fn default_path() -> PathBuf {
        match directories::ProjectDirs::from("", "", "GanttLinks") {
            Some(dirs) => dirs.config_dir().join("settings.json"),
            None => PathBuf::from("settings.json"),
        }
    }

    /// Load settings, falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                if path.exists() {
                    warn!(path = %path.display(), %err, "ignoring unreadable settings");
                }
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_link_type":"END_END"}"#).unwrap();
        assert_eq!(settings.default_link_type, LinkType::EndEnd);
        assert!(settings.show_dependencies);
        assert_eq!(settings.last_project, None);
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            default_link_type: LinkType::StartStart,
            show_dependencies: false,
            last_project: Some(PathBuf::from("plan.gantt.json")),
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2").unwrap();
        assert_eq!(Settings::load_or_default(&path), Settings::default());
    }
}
