use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a task bar on the chart.
pub type TaskId = Uuid;

/// Which edges of the two task bars a dependency arrow connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LinkType {
    /// Origin's trailing edge to the destination's leading edge.
    #[default]
    #[serde(rename = "END_START")]
    EndStart,
    /// Both leading edges.
    #[serde(rename = "START_START")]
    StartStart,
    /// Both trailing edges.
    #[serde(rename = "END_END")]
    EndEnd,
}

impl LinkType {
    pub const ALL: [LinkType; 3] = [LinkType::EndStart, LinkType::StartStart, LinkType::EndEnd];

    pub fn label(self) -> &'static str {
        match self {
            LinkType::EndStart => "End → Start",
            LinkType::StartStart => "Start → Start",
            LinkType::EndEnd => "End → End",
        }
    }
}

/// A dependency link between two tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub from_task: TaskId,
    pub to_task: TaskId,
    #[serde(default)]
    pub kind: LinkType,
}

impl Dependency {
    pub fn new(from_task: TaskId, to_task: TaskId, kind: LinkType) -> Self {
        Self {
            from_task,
            to_task,
            kind,
        }
    }

    /// True if either endpoint is `task`.
    pub fn touches(&self, task: TaskId) -> bool {
        self.from_task == task || self.to_task == task
    }
}

/// A single task or milestone in the Gantt chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Progress from 0.0 (not started) to 1.0 (complete).
    pub progress: f32,
    /// Display color for the task bar (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
    /// If true, this is a milestone (rendered as a diamond, zero-duration).
    #[serde(default)]
    pub is_milestone: bool,
}

impl Task {
    /// Create a new task with sensible defaults.
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            progress: 0.0,
            color: Color32::from_rgb(70, 130, 180), // Steel blue
            is_milestone: false,
        }
    }

    /// Create a new milestone.
    pub fn new_milestone(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            color: Color32::from_rgb(255, 165, 0), // Orange
            is_milestone: true,
            ..Self::new(name, date, date)
        }
    }

    /// Case-insensitive name match used by the search filter.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_type_uses_upper_case_wire_names() {
        let json = serde_json::to_string(&LinkType::StartStart).unwrap();
        assert_eq!(json, "\"START_START\"");
        let parsed: LinkType = serde_json::from_str("\"END_END\"").unwrap();
        assert_eq!(parsed, LinkType::EndEnd);
    }

    #[test]
    fn dependency_without_kind_defaults_to_end_start() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let json = format!(r#"{{"from_task":"{from}","to_task":"{to}"}}"#);
        let dep: Dependency = serde_json::from_str(&json).unwrap();
        assert_eq!(dep.kind, LinkType::EndStart);
        assert!(dep.touches(from));
        assert!(dep.touches(to));
        assert!(!dep.touches(Uuid::new_v4()));
    }

    #[test]
    fn search_filter_is_case_insensitive() {
        let day = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let task = Task::new("Backend Development", day, day);
        assert!(task.matches(""));
        assert!(task.matches("backend"));
        assert!(!task.matches("frontend"));
    }
}
