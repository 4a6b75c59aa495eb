//! The chart's side of the arrow collaborators: what is laid out where, what
//! is drawn, and which input the arrows listen to.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use egui::{Color32, Painter, Pos2, Rect, Rounding, Stroke, Vec2};

use crate::links::{
    Arrowhead, Collaborators, CoordinateResolver, DependencySink, InputEvent, Key, LayoutHost,
    LinkKey, Listener, Orientation, Path, Point, Rectangle, TaskRegistry,
};
use crate::model::TaskId;
use crate::ui::theme;

/// Where the bars ended up in the last laid-out frame.
#[derive(Debug, Default)]
pub struct ChartLayout {
    rects: HashMap<TaskId, Rectangle>,
    mouse: Option<Point>,
    hovered: BTreeSet<TaskId>,
}

impl ChartLayout {
    /// Store a new frame. Returns `true` if any bar moved, appeared or vanished.
    pub fn update(
        &mut self,
        rects: HashMap<TaskId, Rectangle>,
        mouse: Option<Point>,
        hovered: BTreeSet<TaskId>,
    ) -> bool {
        let changed = rects != self.rects;
        self.rects = rects;
        self.mouse = mouse;
        self.hovered = hovered;
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

impl CoordinateResolver for ChartLayout {
    fn resolve_rectangle(&self, task: TaskId) -> Option<Rectangle> {
        self.rects.get(&task).copied()
    }

    fn mouse_position(&self) -> Option<Point> {
        self.mouse
    }
}

impl TaskRegistry for ChartLayout {
    fn hovered_tasks(&self) -> BTreeSet<TaskId> {
        self.hovered.clone()
    }
}

/// Paths handed over by the arrows, plus their input subscriptions.
#[derive(Debug, Default)]
pub struct LinkOverlay {
    paths: BTreeMap<LinkKey, Path>,
    listeners: BTreeSet<(LinkKey, Listener)>,
}

impl LinkOverlay {
    pub fn is_listening(&self, listener: Listener) -> bool {
        self.listeners.iter().any(|(_, l)| *l == listener)
    }

    pub fn path(&self, key: &LinkKey) -> Option<&Path> {
        self.paths.get(key)
    }

    /// Paint every rendered path. A link being dragged is always painted.
    pub fn paint(&self, painter: &Painter, origin: Pos2, show_dependencies: bool) {
        for (key, path) in &self.paths {
            let color = match key {
                LinkKey::Dependency { .. } if !show_dependencies => continue,
                LinkKey::Dependency { .. } => theme::LINK_COLOR,
                LinkKey::Provisional { .. } => theme::LINK_DRAGGING,
            };
            paint_path(painter, origin, path, color);
        }
    }
}

impl LayoutHost for LinkOverlay {
    fn render(&mut self, key: LinkKey, path: &Path) {
        self.paths.insert(key, *path);
    }

    fn remove(&mut self, key: LinkKey) {
        self.paths.remove(&key);
    }

    fn listen(&mut self, key: LinkKey, listener: Listener) {
        self.listeners.insert((key, listener));
    }

    fn unlisten(&mut self, key: LinkKey, listener: Listener) {
        self.listeners.remove(&(key, listener));
    }
}

/// Dependencies confirmed by dropping a dragged arrow, waiting for the app.
#[derive(Debug, Default)]
pub struct ConfirmedDependencies(Vec<(TaskId, TaskId)>);

impl DependencySink for ConfirmedDependencies {
    fn create_dependency(&mut self, origin: TaskId, destination: TaskId) {
        self.0.push((origin, destination));
    }
}

/// Everything the chart shares with the arrows.
#[derive(Debug, Default)]
pub struct ChartSurface {
    pub layout: ChartLayout,
    pub overlay: LinkOverlay,
    confirmed: ConfirmedDependencies,
}

impl ChartSurface {
    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators {
            resolver: &self.layout,
            host: &mut self.overlay,
            registry: &self.layout,
            dependencies: &mut self.confirmed,
        }
    }

    pub fn take_confirmed(&mut self) -> Vec<(TaskId, TaskId)> {
        std::mem::take(&mut self.confirmed.0)
    }
}

/// Translate this frame's raw input into arrow events.
pub fn input_events(input: &egui::InputState) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if input.pointer.is_moving() {
        events.push(InputEvent::MouseMove);
    }
    if input.pointer.primary_released() {
        events.push(InputEvent::Click);
    }
    for event in &input.events {
        if let egui::Event::Key {
            key, pressed: false, ..
        } = event
        {
            let key = if *key == egui::Key::Escape {
                Key::Escape
            } else {
                Key::Other
            };
            events.push(InputEvent::KeyUp(key));
        }
    }
    events
}

pub fn to_rect(origin: Pos2, rect: &Rectangle) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(rect.left, rect.top),
        Vec2::new(rect.width, rect.height),
    )
}

pub fn from_rect(origin: Pos2, rect: Rect) -> Rectangle {
    Rectangle::new(
        rect.left() - origin.x,
        rect.top() - origin.y,
        rect.width(),
        rect.height(),
    )
}

fn paint_path(painter: &Painter, origin: Pos2, path: &Path, color: Color32) {
    for segment in path.visible_segments() {
        painter.rect_filled(to_rect(origin, &segment), Rounding::ZERO, color);
    }
    let points = arrow_points(&path.arrow)
        .iter()
        .map(|p| origin + p.to_vec2())
        .collect();
    painter.add(egui::Shape::convex_polygon(points, color, Stroke::NONE));
}

/// Triangle filling the arrowhead box, tip on the side it points to.
pub fn arrow_points(arrow: &Arrowhead) -> [Pos2; 3] {
    let (l, t, s) = (arrow.left, arrow.top, theme::ARROW_SIZE);
    let h = s / 2.0;
    match arrow.orientation {
        Orientation::East => [Pos2::new(l, t), Pos2::new(l + s, t + h), Pos2::new(l, t + s)],
        Orientation::West => [Pos2::new(l + s, t), Pos2::new(l + s, t + s), Pos2::new(l, t + h)],
        Orientation::South => [Pos2::new(l, t), Pos2::new(l + s, t), Pos2::new(l + h, t + s)],
        Orientation::North => [Pos2::new(l + h, t), Pos2::new(l + s, t + s), Pos2::new(l, t + s)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{compute_path, LinkList};
    use crate::model::LinkType;
    use uuid::Uuid;

    #[test]
    fn end_start_arrow_tip_meets_the_padded_anchor() {
        let origin = Rectangle::at(Point::new(40.0, 10.0));
        let destination = Rectangle::at(Point::new(120.0, 60.0));
        let path = compute_path(&origin, &destination, LinkType::EndStart);
        let tip = arrow_points(&path.arrow)[1];
        // destination anchor minus DEPENDENCY_PADDING / HALF_DEPENDENCY_PADDING
        assert_eq!(tip, Pos2::new(116.0, 58.0));
    }

    #[test]
    fn rect_conversion_is_relative_to_origin() {
        let origin = Pos2::new(300.0, 50.0);
        let rect = Rect::from_min_size(Pos2::new(320.0, 94.0), Vec2::new(80.0, 10.0));
        let local = from_rect(origin, rect);
        assert_eq!(local, Rectangle::new(20.0, 44.0, 80.0, 10.0));
        assert_eq!(to_rect(origin, &local), rect);
    }

    #[test]
    fn layout_update_reports_moves_only() {
        let mut layout = ChartLayout::default();
        let id = Uuid::new_v4();
        let rects: HashMap<_, _> = [(id, Rectangle::new(0.0, 0.0, 50.0, 10.0))].into();
        assert!(layout.update(rects.clone(), None, BTreeSet::new()));
        assert!(!layout.update(rects, Some(Point::new(5.0, 5.0)), BTreeSet::new()));
        assert_eq!(layout.mouse_position(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn drag_subscribes_the_overlay_until_dropped() {
        let mut surface = ChartSurface::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let rects: HashMap<_, _> = [
            (a, Rectangle::new(0.0, 44.0, 100.0, 10.0)),
            (b, Rectangle::new(200.0, 76.0, 100.0, 10.0)),
        ]
        .into();
        surface
            .layout
            .update(rects.clone(), Some(Point::new(150.0, 60.0)), BTreeSet::new());

        let mut links = LinkList::new();
        assert!(links.begin_provisional_link(a, &mut surface.collaborators()));
        assert!(surface.overlay.is_listening(Listener::Click));
        assert!(surface
            .overlay
            .path(&LinkKey::Provisional { origin: a })
            .is_some());

        surface
            .layout
            .update(rects, Some(Point::new(210.0, 80.0)), [b].into());
        links.handle_input(InputEvent::Click, &mut surface.collaborators());

        assert_eq!(surface.take_confirmed(), vec![(a, b)]);
        assert!(!surface.overlay.is_listening(Listener::MouseMove));
        assert!(surface
            .overlay
            .path(&LinkKey::Provisional { origin: a })
            .is_none());
    }
}
