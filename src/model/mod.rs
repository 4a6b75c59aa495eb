pub mod project;
pub mod task;
pub mod timeline;

pub use project::Project;
pub use task::{Dependency, LinkType, Task, TaskId};
pub use timeline::{TimelineScale, TimelineViewport};
