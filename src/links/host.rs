//! The collaborators a link needs from the surface that displays it.

use std::collections::BTreeSet;

use super::geometry::{Path, Point, Rectangle};
use crate::model::TaskId;

/// Identifies one drawn arrow on the layout host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkKey {
    Dependency { from: TaskId, to: TaskId },
    Provisional { origin: TaskId },
}

/// Raw input a link can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Listener {
    MouseMove,
    Click,
    KeyUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// Input delivered to links by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MouseMove,
    Click,
    KeyUp(Key),
}

impl InputEvent {
    pub fn listener(&self) -> Listener {
        match self {
            InputEvent::MouseMove => Listener::MouseMove,
            InputEvent::Click => Listener::Click,
            InputEvent::KeyUp(_) => Listener::KeyUp,
        }
    }
}

/// Maps task ids and the pointer into dependency-container coordinates.
pub trait CoordinateResolver {
    /// `None` when the task is not laid out (removed or never shown).
    fn resolve_rectangle(&self, task: TaskId) -> Option<Rectangle>;

    /// `None` when the pointer is outside the surface.
    fn mouse_position(&self) -> Option<Point>;
}

/// Displays paths and routes raw input.
pub trait LayoutHost {
    fn render(&mut self, key: LinkKey, path: &Path);
    fn remove(&mut self, key: LinkKey);
    fn listen(&mut self, key: LinkKey, listener: Listener);
    fn unlisten(&mut self, key: LinkKey, listener: Listener);
}

/// Knows which task bars are under the pointer.
pub trait TaskRegistry {
    fn hovered_tasks(&self) -> BTreeSet<TaskId>;
}

/// Receives dependencies confirmed by dragging.
pub trait DependencySink {
    fn create_dependency(&mut self, origin: TaskId, destination: TaskId);
}

/// Everything a link controller talks to, injected per call.
pub struct Collaborators<'a> {
    pub resolver: &'a dyn CoordinateResolver,
    pub host: &'a mut dyn LayoutHost,
    pub registry: &'a dyn TaskRegistry,
    pub dependencies: &'a mut dyn DependencySink,
}

/// Listeners acquired by one link, released together.
#[derive(Debug, Default)]
pub struct Subscriptions {
    key: Option<LinkKey>,
    active: Vec<Listener>,
}

impl Subscriptions {
    pub fn acquire(&mut self, host: &mut dyn LayoutHost, key: LinkKey, listeners: &[Listener]) {
        self.key = Some(key);
        for &listener in listeners {
            if !self.active.contains(&listener) {
                host.listen(key, listener);
                self.active.push(listener);
            }
        }
    }

    /// Release everything acquired so far. Safe to call more than once.
    pub fn release(&mut self, host: &mut dyn LayoutHost) {
        if let Some(key) = self.key {
            for listener in self.active.drain(..) {
                host.unlisten(key, listener);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingHost {
        listening: Vec<(LinkKey, Listener)>,
    }

    impl LayoutHost for CountingHost {
        fn render(&mut self, _key: LinkKey, _path: &Path) {}
        fn remove(&mut self, _key: LinkKey) {}
        fn listen(&mut self, key: LinkKey, listener: Listener) {
            self.listening.push((key, listener));
        }
        fn unlisten(&mut self, key: LinkKey, listener: Listener) {
            self.listening.retain(|entry| *entry != (key, listener));
        }
    }

    #[test]
    fn release_undoes_every_acquire() {
        let mut host = CountingHost::default();
        let key = LinkKey::Provisional {
            origin: Uuid::new_v4(),
        };
        let mut subs = Subscriptions::default();
        subs.acquire(&mut host, key, &[Listener::MouseMove, Listener::Click]);
        subs.acquire(&mut host, key, &[Listener::Click, Listener::KeyUp]);
        assert_eq!(host.listening.len(), 3);

        subs.release(&mut host);
        subs.release(&mut host);
        assert!(host.listening.is_empty());
        assert!(subs.is_empty());
    }
}
