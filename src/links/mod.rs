//! Dependency arrows: pure path geometry plus the controllers that keep
//! arrows in sync with the chart.

pub mod anchor;
pub mod bound;
pub mod geometry;
pub mod host;
pub mod list;
pub mod provisional;

pub use bound::BoundLink;
pub use geometry::{compute_path, Arrowhead, Orientation, Path, Point, Rectangle, Segment};
pub use host::{
    Collaborators, CoordinateResolver, DependencySink, InputEvent, Key, LayoutHost, LinkKey,
    Listener, TaskRegistry,
};
pub use list::LinkList;
pub use provisional::{DragState, ProvisionalLink};

/// Shared behaviour of every arrow variant.
pub trait LinkWidget {
    /// Recompute the path and hand it to the host.
    fn redraw(&mut self, env: &mut Collaborators<'_>);
    /// Remove the arrow from the host and release anything it holds.
    fn dispose(&mut self, env: &mut Collaborators<'_>);
}

/// An arrow on the chart.
#[derive(Debug)]
pub enum Link {
    Bound(BoundLink),
    Provisional(ProvisionalLink),
}

impl Link {
    pub fn key(&self) -> LinkKey {
        match self {
            Link::Bound(link) => link.key(),
            Link::Provisional(link) => link.key(),
        }
    }
}

impl LinkWidget for Link {
    fn redraw(&mut self, env: &mut Collaborators<'_>) {
        match self {
            Link::Bound(link) => link.redraw(env),
            Link::Provisional(link) => link.redraw(env),
        }
    }

    fn dispose(&mut self, env: &mut Collaborators<'_>) {
        match self {
            Link::Bound(link) => link.dispose(env),
            Link::Provisional(link) => link.dispose(env),
        }
    }
}
