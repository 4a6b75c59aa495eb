use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::model::Project;

/// Save a project to a JSON file.
pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(project)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), tasks = project.tasks.len(), "project saved");
    Ok(())
}

/// Load a project from a JSON file.
pub fn load_project(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path)?;
    let project: Project = serde_json::from_str(&json)?;
    debug!(
        path = %path.display(),
        tasks = project.tasks.len(),
        dependencies = project.dependencies.len(),
        "project loaded"
    );
    Ok(project)
}
