//! The set of arrows shown on one chart.

use std::collections::HashSet;

use tracing::debug;

use super::host::{Collaborators, InputEvent};
use super::{BoundLink, Link, LinkWidget, ProvisionalLink};
use crate::model::{Dependency, LinkType, TaskId};

/// Owns every bound arrow plus at most one arrow being dragged.
///
/// Nothing is drawn before [`LinkList::on_ready`]; after that, bound arrows
/// are only redrawn when the host asks for it.
#[derive(Debug, Default)]
pub struct LinkList {
    links: Vec<Link>,
    hidden_tasks: HashSet<TaskId>,
    ready: bool,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn bound_links(&self) -> impl Iterator<Item = &BoundLink> {
        self.links.iter().filter_map(|link| match link {
            Link::Bound(bound) => Some(bound),
            Link::Provisional(_) => None,
        })
    }

    pub fn provisional(&self) -> Option<&ProvisionalLink> {
        self.links.iter().find_map(|link| match link {
            Link::Provisional(provisional) => Some(provisional),
            Link::Bound(_) => None,
        })
    }

    /// Initial layout is done: draw every visible bound arrow once.
    pub fn on_ready(&mut self, env: &mut Collaborators<'_>) {
        if self.ready {
            return;
        }
        self.ready = true;
        debug!(links = self.links.len(), "layout ready");
        self.redraw_all(env);
    }

    /// Redraw every visible arrow, e.g. after zooming or moving a bar.
    pub fn redraw_all(&mut self, env: &mut Collaborators<'_>) {
        if !self.ready {
            return;
        }
        for link in &mut self.links {
            if Self::shown(&self.hidden_tasks, link) {
                link.redraw(env);
            }
        }
    }

    /// Add an arrow for an existing dependency, replacing any arrow between
    /// the same two tasks.
    pub fn create_bound_link(
        &mut self,
        origin: TaskId,
        destination: TaskId,
        link_type: LinkType,
        env: &mut Collaborators<'_>,
    ) {
        self.remove(origin, destination, env);
        let mut link = Link::Bound(BoundLink::new(origin, destination, link_type));
        if self.ready && Self::shown(&self.hidden_tasks, &link) {
            link.redraw(env);
        }
        self.links.push(link);
    }

    /// Replace every bound arrow with one per dependency.
    pub fn sync(&mut self, dependencies: &[Dependency], env: &mut Collaborators<'_>) {
        self.dispose_where(env, |link| matches!(link, Link::Bound(_)));
        for dep in dependencies {
            self.create_bound_link(dep.from_task, dep.to_task, dep.kind, env);
        }
    }

    /// Retype an arrow. Returns `false` if no such arrow exists.
    pub fn change_type(
        &mut self,
        origin: TaskId,
        destination: TaskId,
        link_type: LinkType,
        env: &mut Collaborators<'_>,
    ) -> bool {
        let ready = self.ready;
        let Some(link) = self.links.iter_mut().find(|link| {
            matches!(link, Link::Bound(bound) if bound.connects(origin, destination))
        }) else {
            return false;
        };
        if let Link::Bound(bound) = &mut *link {
            bound.set_link_type(link_type);
        }
        if ready && Self::shown(&self.hidden_tasks, link) {
            link.redraw(env);
        }
        true
    }

    /// Drop the arrow between two tasks.
    pub fn remove(&mut self, origin: TaskId, destination: TaskId, env: &mut Collaborators<'_>) {
        self.dispose_where(env, |link| {
            matches!(link, Link::Bound(bound) if bound.connects(origin, destination))
        });
    }

    /// Drop every arrow touching a task that no longer exists.
    pub fn task_removed(&mut self, task: TaskId, env: &mut Collaborators<'_>) {
        self.dispose_where(env, |link| match link {
            Link::Bound(bound) => bound.contains(task),
            Link::Provisional(provisional) => provisional.origin() == task,
        });
    }

    /// An arrow is shown only while both of its tasks are visible.
    pub fn set_task_visible(&mut self, task: TaskId, visible: bool, env: &mut Collaborators<'_>) {
        let changed = if visible {
            self.hidden_tasks.remove(&task)
        } else {
            self.hidden_tasks.insert(task)
        };
        if !changed {
            return;
        }

        for link in &mut self.links {
            if !matches!(link, Link::Bound(bound) if bound.contains(task)) {
                continue;
            }
            if !visible {
                link.dispose(env);
            } else if self.ready && Self::shown(&self.hidden_tasks, link) {
                link.redraw(env);
            }
        }
    }

    /// Start dragging a new dependency out of `origin`, cancelling any
    /// drag already in progress.
    pub fn begin_provisional_link(&mut self, origin: TaskId, env: &mut Collaborators<'_>) -> bool {
        self.dispose_where(env, |link| matches!(link, Link::Provisional(_)));

        let mut provisional = ProvisionalLink::new(origin);
        if !provisional.activate(env) {
            return false;
        }
        self.links.push(Link::Provisional(provisional));
        true
    }

    /// Route host input to the arrow being dragged.
    pub fn handle_input(&mut self, event: InputEvent, env: &mut Collaborators<'_>) {
        let Some(index) = self
            .links
            .iter()
            .position(|link| matches!(link, Link::Provisional(_)))
        else {
            return;
        };
        let finished = match &mut self.links[index] {
            Link::Provisional(provisional) => {
                provisional.handle(event, env);
                provisional.is_finished()
            }
            Link::Bound(_) => false,
        };
        if finished {
            self.links.remove(index);
        }
    }

    /// Host teardown: remove every arrow and release all listeners.
    pub fn teardown(&mut self, env: &mut Collaborators<'_>) {
        self.dispose_where(env, |_| true);
        self.hidden_tasks.clear();
        self.ready = false;
    }

    fn dispose_where(&mut self, env: &mut Collaborators<'_>, mut pred: impl FnMut(&Link) -> bool) {
        self.links.retain_mut(|link| {
            if pred(link) {
                link.dispose(env);
                false
            } else {
                true
            }
        });
    }

    fn shown(hidden: &HashSet<TaskId>, link: &Link) -> bool {
        match link {
            Link::Bound(bound) => {
                !hidden.contains(&bound.origin()) && !hidden.contains(&bound.destination())
            }
            Link::Provisional(_) => true,
        }
    }
}
