//! Arrow path geometry.
//!
//! A dependency arrow is drawn as three orthogonal segments (`start`, `mid`,
//! `end`) plus an arrowhead. Everything here is a pure function of the two
//! endpoint anchors and the [`LinkType`]: no allocation, no hidden state, so
//! it can run on every pointer move while a link is being dragged.
//!
//! All coordinates are pixels in the dependency container, origin top-left,
//! y growing downward.

use crate::model::LinkType;

/// Inset applied to the narrow side of an arrow's attachment.
pub const HALF_DEPENDENCY_PADDING: f32 = 2.0;
/// Inset applied to the wide side of an arrow's attachment.
pub const DEPENDENCY_PADDING: f32 = 4.0;
/// Width of the rounded corner at either end of a task bar.
pub const CORNER_WIDTH: f32 = 20.0;
/// Height of a task bar as seen by the arrow layer.
pub const BAR_HEIGHT: f32 = 10.0;
pub const HALF_HEIGHT: f32 = BAR_HEIGHT / 2.0;
/// Extra length on an END_END riser that climbs back up past its origin.
pub const END_END_CLEARANCE: f32 = 10.0;
/// Stroke width of every segment.
pub const SEGMENT_THICKNESS: f32 = 1.0;

/// A position in container space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in container space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rectangle {
    pub top: f32,
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// A zero-sized rectangle sitting on `point`.
    pub const fn at(point: Point) -> Self {
        Self::new(point.x, point.y, 0.0, 0.0)
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}

/// One of the three pieces of an arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Not drawn at all.
    Hidden,
    Visible(Rectangle),
}

impl Segment {
    fn horizontal(left: f32, top: f32, width: f32) -> Self {
        Segment::Visible(Rectangle::new(left, top, width, SEGMENT_THICKNESS))
    }

    fn vertical(left: f32, top: f32, height: f32) -> Self {
        Segment::Visible(Rectangle::new(left, top, SEGMENT_THICKNESS, height))
    }

    pub fn rect(&self) -> Option<Rectangle> {
        match self {
            Segment::Hidden => None,
            Segment::Visible(rect) => Some(*rect),
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Segment::Hidden)
    }
}

/// Compass direction the arrowhead points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    pub left: f32,
    pub top: f32,
    pub orientation: Orientation,
}

/// A fully computed arrow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Path {
    pub start: Segment,
    pub mid: Segment,
    pub end: Segment,
    pub arrow: Arrowhead,
}

impl Path {
    /// The visible segment rectangles, in drawing order.
    pub fn visible_segments(&self) -> impl Iterator<Item = Rectangle> {
        [self.start, self.mid, self.end]
            .into_iter()
            .filter_map(|segment| segment.rect())
    }
}

/// Compute the arrow between two anchors.
///
/// Only `left` and `top` of the inputs are read: callers pass anchors that
/// were already shifted onto the bar edges (see [`super::anchor`]).
pub fn compute_path(origin: &Rectangle, destination: &Rectangle, link_type: LinkType) -> Path {
    match link_type {
        LinkType::StartStart => start_start(origin, destination),
        LinkType::EndEnd => end_end(origin, destination),
        LinkType::EndStart => end_start(origin, destination),
    }
}

/// Drop down (or climb up) from the origin, then run horizontally into the
/// destination.
fn end_start(origin: &Rectangle, destination: &Rectangle) -> Path {
    let xorig = origin.left - DEPENDENCY_PADDING;
    let yorig = origin.top - HALF_DEPENDENCY_PADDING;
    let xend = destination.left - DEPENDENCY_PADDING;
    let yend = destination.top - HALF_DEPENDENCY_PADDING;
    let width = xend - xorig;

    let mid = Segment::vertical(xorig, yorig.min(yend), (yend - yorig).abs());

    // Vertically aligned anchors collapse to the riser alone.
    if width == 0.0 {
        let arrow = if yend > yorig {
            Arrowhead {
                left: xend - 5.0,
                top: yend - 10.0,
                orientation: Orientation::South,
            }
        } else {
            Arrowhead {
                left: xend - 5.0,
                top: yend,
                orientation: Orientation::North,
            }
        };
        return Path {
            start: Segment::Hidden,
            mid,
            end: Segment::Hidden,
            arrow,
        };
    }

    let end = Segment::horizontal(xorig.min(xend), yend, width.abs());
    let arrow = if width > 0.0 {
        Arrowhead {
            left: xend - 10.0,
            top: yend - 5.0,
            orientation: Orientation::East,
        }
    } else {
        Arrowhead {
            left: xend,
            top: yend - 5.0,
            orientation: Orientation::West,
        }
    };

    Path {
        start: Segment::Hidden,
        mid,
        end,
        arrow,
    }
}

/// Leave the origin's leading edge to the left, turn, and enter the
/// destination from its leading edge.
fn start_start(origin: &Rectangle, destination: &Rectangle) -> Path {
    let xorig = origin.left - HALF_DEPENDENCY_PADDING;
    let mut yorig = origin.top - CORNER_WIDTH / 2.0 + HALF_DEPENDENCY_PADDING;
    let xend = destination.left + HALF_DEPENDENCY_PADDING;
    let yend = destination.top - HALF_DEPENDENCY_PADDING;

    // Climbing to a bar above: leave from the top of the origin instead so
    // the arrow does not cut back through it.
    if yend < yorig {
        yorig = origin.top + DEPENDENCY_PADDING;
    }

    // The leg on the side of the rightmost edge carries the horizontal run.
    let mut width1 = CORNER_WIDTH;
    let mut width2 = (xend - xorig).abs() + CORNER_WIDTH;
    if xorig > xend {
        std::mem::swap(&mut width1, &mut width2);
    }

    let left = xorig - width1;
    Path {
        start: Segment::horizontal(left, yorig, width1),
        mid: Segment::vertical(left, yorig.min(yend), (yend - yorig).abs()),
        end: Segment::horizontal(left, yend, width2 - HALF_HEIGHT),
        arrow: Arrowhead {
            left: xend - 15.0,
            top: yend - HALF_HEIGHT,
            orientation: Orientation::East,
        },
    }
}

/// Leave the origin's trailing edge to the right, turn, and enter the
/// destination from its trailing edge.
fn end_end(origin: &Rectangle, destination: &Rectangle) -> Path {
    let xorig = origin.left - DEPENDENCY_PADDING;
    let yorig = origin.top - CORNER_WIDTH / 2.0 + HALF_DEPENDENCY_PADDING;
    let xend = destination.left + HALF_DEPENDENCY_PADDING;
    let yend = destination.top - DEPENDENCY_PADDING;

    let mut width1 = (xend - xorig).abs() + CORNER_WIDTH;
    let mut width2 = CORNER_WIDTH;
    if xorig > xend {
        std::mem::swap(&mut width1, &mut width2);
    }

    let height = (yend - yorig).abs();
    let (start_top, mid_top, mid_height) = if yend > yorig {
        (yorig, yorig, height)
    } else {
        // Going up: start under the origin bar and extend the riser to meet it.
        (yorig + BAR_HEIGHT, yend, height + END_END_CLEARANCE)
    };

    Path {
        start: Segment::horizontal(xorig, start_top, width1),
        mid: Segment::vertical(xorig + width1, mid_top, mid_height),
        end: Segment::horizontal(xorig + width1 - width2, yend, width2),
        arrow: Arrowhead {
            left: xend - 8.0,
            top: yend - 5.0,
            orientation: Orientation::West,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor(left: f32, top: f32) -> Rectangle {
        Rectangle::at(Point::new(left, top))
    }

    fn visible(segment: Segment) -> Rectangle {
        segment.rect().expect("segment should be visible")
    }

    #[test]
    fn end_start_to_the_right_and_below() {
        let path = compute_path(&anchor(100.0, 10.0), &anchor(150.0, 45.0), LinkType::EndStart);

        assert!(path.start.is_hidden());
        assert_eq!(visible(path.mid), Rectangle::new(96.0, 8.0, 1.0, 35.0));
        assert_eq!(visible(path.end), Rectangle::new(96.0, 43.0, 50.0, 1.0));
        assert_eq!(
            path.arrow,
            Arrowhead {
                left: 136.0,
                top: 38.0,
                orientation: Orientation::East
            }
        );
    }

    #[test]
    fn end_start_backwards_and_above() {
        let path = compute_path(&anchor(200.0, 80.0), &anchor(120.0, 20.0), LinkType::EndStart);

        assert_eq!(visible(path.mid), Rectangle::new(196.0, 18.0, 1.0, 60.0));
        assert_eq!(visible(path.end), Rectangle::new(116.0, 18.0, 80.0, 1.0));
        assert_eq!(path.arrow.orientation, Orientation::West);
        assert_eq!((path.arrow.left, path.arrow.top), (116.0, 13.0));
    }

    #[test]
    fn end_start_aligned_collapses_to_riser() {
        let down = compute_path(&anchor(50.0, 0.0), &anchor(50.0, 40.0), LinkType::EndStart);
        assert!(down.start.is_hidden());
        assert!(down.end.is_hidden());
        assert_eq!(visible(down.mid), Rectangle::new(46.0, -2.0, 1.0, 40.0));
        assert_eq!(down.arrow.orientation, Orientation::South);
        assert_eq!((down.arrow.left, down.arrow.top), (41.0, 28.0));

        let up = compute_path(&anchor(50.0, 40.0), &anchor(50.0, 0.0), LinkType::EndStart);
        assert_eq!(up.arrow.orientation, Orientation::North);
        assert_eq!((up.arrow.left, up.arrow.top), (41.0, -2.0));

        // Same row too: equality is never treated as "below".
        let level = compute_path(&anchor(50.0, 40.0), &anchor(50.0, 40.0), LinkType::EndStart);
        assert_eq!(level.arrow.orientation, Orientation::North);
        assert_eq!(visible(level.mid).height, 0.0);
    }

    #[test]
    fn start_start_forward() {
        let path = compute_path(&anchor(100.0, 30.0), &anchor(160.0, 60.0), LinkType::StartStart);

        // xorig 98, yorig 22, xend 162, yend 58
        assert_eq!(visible(path.start), Rectangle::new(78.0, 22.0, 20.0, 1.0));
        assert_eq!(visible(path.mid), Rectangle::new(78.0, 22.0, 1.0, 36.0));
        assert_eq!(visible(path.end), Rectangle::new(78.0, 58.0, 79.0, 1.0));
        assert_eq!(
            path.arrow,
            Arrowhead {
                left: 147.0,
                top: 53.0,
                orientation: Orientation::East
            }
        );
    }

    #[test]
    fn start_start_backwards_swaps_legs() {
        let path = compute_path(&anchor(160.0, 30.0), &anchor(100.0, 60.0), LinkType::StartStart);

        // xorig 158, xend 102: the first leg now carries the run.
        let start = visible(path.start);
        assert_eq!(start.width, 76.0);
        assert_eq!(start.left, 82.0);
        assert_eq!(visible(path.end).width, CORNER_WIDTH - HALF_HEIGHT);
        assert_eq!(path.arrow.left, 87.0);
    }

    #[test]
    fn start_start_upwards_leaves_from_bar_top() {
        let path = compute_path(&anchor(100.0, 60.0), &anchor(160.0, 10.0), LinkType::StartStart);

        // yend 8 is above yorig 52, so yorig moves to 60 + 4.
        assert_eq!(visible(path.start).top, 64.0);
        assert_eq!(visible(path.mid), Rectangle::new(78.0, 8.0, 1.0, 56.0));
        assert_eq!(path.arrow.orientation, Orientation::East);
    }

    #[test]
    fn end_end_downwards() {
        let path = compute_path(&anchor(100.0, 30.0), &anchor(180.0, 60.0), LinkType::EndEnd);

        // xorig 96, yorig 22, xend 182, yend 56
        assert_eq!(visible(path.start), Rectangle::new(96.0, 22.0, 106.0, 1.0));
        assert_eq!(visible(path.mid), Rectangle::new(202.0, 22.0, 1.0, 34.0));
        assert_eq!(visible(path.end), Rectangle::new(182.0, 56.0, 20.0, 1.0));
        assert_eq!(
            path.arrow,
            Arrowhead {
                left: 174.0,
                top: 51.0,
                orientation: Orientation::West
            }
        );
    }

    #[test]
    fn end_end_upwards_clears_the_corner() {
        let path = compute_path(&anchor(100.0, 60.0), &anchor(180.0, 10.0), LinkType::EndEnd);

        // yorig 52, yend 6
        assert_eq!(visible(path.start).top, 62.0);
        assert_eq!(visible(path.mid), Rectangle::new(202.0, 6.0, 1.0, 56.0));
    }

    #[test]
    fn end_end_backwards_swaps_legs() {
        let path = compute_path(&anchor(200.0, 30.0), &anchor(100.0, 60.0), LinkType::EndEnd);

        // xorig 196, xend 102
        assert_eq!(visible(path.start).width, CORNER_WIDTH);
        assert_eq!(visible(path.end), Rectangle::new(102.0, 56.0, 114.0, 1.0));
        assert_eq!(visible(path.mid).left, 216.0);
    }

    #[test]
    fn only_anchor_corner_matters() {
        let small = compute_path(&anchor(10.0, 10.0), &anchor(90.0, 50.0), LinkType::EndStart);
        let sized = compute_path(
            &Rectangle::new(10.0, 10.0, 300.0, 25.0),
            &Rectangle::new(90.0, 50.0, 5.0, 5.0),
            LinkType::EndStart,
        );
        assert_eq!(small, sized);
    }

    #[test]
    fn visible_segments_skip_hidden() {
        let path = compute_path(&anchor(50.0, 0.0), &anchor(50.0, 40.0), LinkType::EndStart);
        assert_eq!(path.visible_segments().count(), 1);
        let path = compute_path(&anchor(0.0, 0.0), &anchor(50.0, 40.0), LinkType::EndEnd);
        assert_eq!(path.visible_segments().count(), 3);
    }
}
