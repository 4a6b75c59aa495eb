use tracing::{debug, trace};

use super::anchor::drag_anchor;
use super::geometry::{compute_path, Path, Point, Rectangle};
use super::host::{Collaborators, InputEvent, Key, LinkKey, Listener, Subscriptions};
use super::LinkWidget;
use crate::model::{LinkType, TaskId};

const LISTENERS: [Listener; 3] = [Listener::MouseMove, Listener::Click, Listener::KeyUp];

/// Lifecycle of a link being dragged out of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
    Confirmed { destination: TaskId },
    Cancelled,
}

/// An arrow following the pointer until it is dropped on a task or cancelled.
///
/// Always drawn as END_START from an anchor captured once when the drag
/// begins, so moving the origin bar mid-drag does not move the tail.
#[derive(Debug)]
pub struct ProvisionalLink {
    origin: TaskId,
    anchor: Option<Rectangle>,
    state: DragState,
    subscriptions: Subscriptions,
}

impl ProvisionalLink {
    pub fn new(origin: TaskId) -> Self {
        Self {
            origin,
            anchor: None,
            state: DragState::Idle,
            subscriptions: Subscriptions::default(),
        }
    }

    pub fn key(&self) -> LinkKey {
        LinkKey::Provisional {
            origin: self.origin,
        }
    }

    pub fn origin(&self) -> TaskId {
        self.origin
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn anchor(&self) -> Option<Rectangle> {
        self.anchor
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.state,
            DragState::Confirmed { .. } | DragState::Cancelled
        )
    }

    /// Capture the anchor, subscribe to input and draw the first frame.
    ///
    /// Returns `false` if the link was not idle or the origin bar could not
    /// be resolved; in the latter case the link ends up cancelled.
    pub fn activate(&mut self, env: &mut Collaborators<'_>) -> bool {
        if self.state != DragState::Idle {
            return false;
        }
        let Some(origin) = env.resolver.resolve_rectangle(self.origin) else {
            debug!(origin = %self.origin, "origin not laid out, drag not started");
            self.state = DragState::Cancelled;
            return false;
        };

        self.anchor = Some(drag_anchor(origin));
        self.subscriptions.acquire(env.host, self.key(), &LISTENERS);
        self.state = DragState::Dragging;
        debug!(origin = %self.origin, "dependency drag started");
        self.redraw(env);
        true
    }

    /// The arrow from the captured anchor to `mouse`.
    pub fn path_to(&self, mouse: Point) -> Option<Path> {
        let anchor = self.anchor?;
        Some(compute_path(&anchor, &Rectangle::at(mouse), LinkType::EndStart))
    }

    /// React to one input event. Ignored unless dragging.
    pub fn handle(&mut self, event: InputEvent, env: &mut Collaborators<'_>) {
        if !self.is_dragging() {
            return;
        }
        match event {
            InputEvent::MouseMove => self.redraw(env),
            InputEvent::Click => self.drop_on_hovered(env),
            InputEvent::KeyUp(Key::Escape) => {
                debug!(origin = %self.origin, "dependency drag cancelled by key");
                self.finish(DragState::Cancelled, env);
            }
            InputEvent::KeyUp(Key::Other) => {}
        }
    }

    fn drop_on_hovered(&mut self, env: &mut Collaborators<'_>) {
        let target = env
            .registry
            .hovered_tasks()
            .into_iter()
            .find(|task| *task != self.origin);

        match target {
            Some(destination) => {
                debug!(origin = %self.origin, %destination, "dependency drag confirmed");
                env.dependencies.create_dependency(self.origin, destination);
                self.finish(DragState::Confirmed { destination }, env);
            }
            None => {
                debug!(origin = %self.origin, "dependency dropped on empty space");
                self.finish(DragState::Cancelled, env);
            }
        }
    }

    fn finish(&mut self, state: DragState, env: &mut Collaborators<'_>) {
        self.state = state;
        self.subscriptions.release(env.host);
        env.host.remove(self.key());
    }
}

impl LinkWidget for ProvisionalLink {
    fn redraw(&mut self, env: &mut Collaborators<'_>) {
        if !self.is_dragging() {
            return;
        }
        let Some(mouse) = env.resolver.mouse_position() else {
            trace!("pointer outside surface, waiting for next move");
            return;
        };
        if let Some(path) = self.path_to(mouse) {
            env.host.render(self.key(), &path);
        }
    }

    fn dispose(&mut self, env: &mut Collaborators<'_>) {
        if self.is_finished() {
            return;
        }
        self.finish(DragState::Cancelled, env);
    }
}
