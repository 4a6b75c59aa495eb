use tracing::debug;

use super::anchor::adjust_endpoints;
use super::geometry::{compute_path, Path};
use super::host::{Collaborators, CoordinateResolver, LinkKey};
use super::LinkWidget;
use crate::model::{LinkType, TaskId};

/// An arrow between two existing tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundLink {
    origin: TaskId,
    destination: TaskId,
    link_type: LinkType,
}

impl BoundLink {
    pub fn new(origin: TaskId, destination: TaskId, link_type: LinkType) -> Self {
        Self {
            origin,
            destination,
            link_type,
        }
    }

    pub fn key(&self) -> LinkKey {
        LinkKey::Dependency {
            from: self.origin,
            to: self.destination,
        }
    }

    pub fn origin(&self) -> TaskId {
        self.origin
    }

    pub fn destination(&self) -> TaskId {
        self.destination
    }

    pub fn link_type(&self) -> LinkType {
        self.link_type
    }

    pub fn set_link_type(&mut self, link_type: LinkType) {
        self.link_type = link_type;
    }

    pub fn contains(&self, task: TaskId) -> bool {
        self.origin == task || self.destination == task
    }

    pub fn connects(&self, origin: TaskId, destination: TaskId) -> bool {
        self.origin == origin && self.destination == destination
    }

    /// The arrow for the current layout, or `None` if either bar is gone.
    pub fn path(&self, resolver: &dyn CoordinateResolver) -> Option<Path> {
        let origin = resolver.resolve_rectangle(self.origin)?;
        let destination = resolver.resolve_rectangle(self.destination)?;
        let (orig, dest) = adjust_endpoints(origin, destination, self.link_type);
        Some(compute_path(&orig, &dest, self.link_type))
    }
}

impl LinkWidget for BoundLink {
    fn redraw(&mut self, env: &mut Collaborators<'_>) {
        match self.path(env.resolver) {
            Some(path) => env.host.render(self.key(), &path),
            None => debug!(
                origin = %self.origin,
                destination = %self.destination,
                "endpoint not laid out, skipping redraw"
            ),
        }
    }

    fn dispose(&mut self, env: &mut Collaborators<'_>) {
        env.host.remove(self.key());
    }
}
