use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::{Dependency, LinkType, Task, TaskId};

/// A Gantt project containing tasks, dependencies, and metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            tasks: Vec::new(),
            dependencies: Vec::new(),
            created: Utc::now(),
            modified: Utc::now(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Touch the modified timestamp.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_name(&self, id: TaskId) -> String {
        self.task(id).map(|t| t.name.clone()).unwrap_or_default()
    }

    /// Record a dependency between two existing tasks.
    ///
    /// Returns `false` for self links, unknown tasks and duplicates. Legality
    /// beyond that (cycles, scheduling) is not checked here.
    pub fn add_dependency(&mut self, from: TaskId, to: TaskId, kind: LinkType) -> bool {
        if from == to || self.task(from).is_none() || self.task(to).is_none() {
            return false;
        }
        if self
            .dependencies
            .iter()
            .any(|d| d.from_task == from && d.to_task == to)
        {
            return false;
        }
        self.dependencies.push(Dependency::new(from, to, kind));
        self.touch();
        true
    }

    pub fn remove_dependency(&mut self, from: TaskId, to: TaskId) {
        self.dependencies
            .retain(|d| !(d.from_task == from && d.to_task == to));
        self.touch();
    }

    pub fn set_dependency_kind(&mut self, from: TaskId, to: TaskId, kind: LinkType) {
        if let Some(dep) = self
            .dependencies
            .iter_mut()
            .find(|d| d.from_task == from && d.to_task == to)
        {
            dep.kind = kind;
            self.touch();
        }
    }

    /// Remove a task together with every dependency touching it.
    pub fn remove_task(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
        self.dependencies.retain(|d| !d.touches(id));
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn project_with_two_tasks() -> (Project, TaskId, TaskId) {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let a = Task::new("A", day, day + chrono::Duration::days(3));
        let b = Task::new("B", day + chrono::Duration::days(4), day + chrono::Duration::days(8));
        let (a_id, b_id) = (a.id, b.id);
        let mut project = Project::new("Test");
        project.tasks = vec![a, b];
        (project, a_id, b_id)
    }

    #[test]
    fn add_dependency_rejects_self_links_and_duplicates() {
        let (mut project, a, b) = project_with_two_tasks();
        assert!(!project.add_dependency(a, a, LinkType::EndStart));
        assert!(project.add_dependency(a, b, LinkType::EndStart));
        assert!(!project.add_dependency(a, b, LinkType::EndEnd));
        assert_eq!(project.dependencies.len(), 1);
    }

    #[test]
    fn removing_a_task_drops_its_dependencies() {
        let (mut project, a, b) = project_with_two_tasks();
        project.add_dependency(a, b, LinkType::StartStart);
        project.remove_task(b);
        assert!(project.dependencies.is_empty());
        assert_eq!(project.tasks.len(), 1);
    }

    #[test]
    fn retyping_keeps_endpoints() {
        let (mut project, a, b) = project_with_two_tasks();
        project.add_dependency(a, b, LinkType::EndStart);
        project.set_dependency_kind(a, b, LinkType::EndEnd);
        assert_eq!(project.dependencies[0], Dependency::new(a, b, LinkType::EndEnd));
    }
}
