//! Where on a task bar an arrow attaches.

use super::geometry::{Rectangle, BAR_HEIGHT, CORNER_WIDTH, HALF_HEIGHT};
use crate::model::LinkType;

/// Shift two bar rectangles onto the points a bound link connects.
///
/// For END_START the origin anchor moves towards its trailing corner, but
/// never past the destination's leading edge; when the bars overlap so much
/// that the offset would go negative it is pinned at the origin's own left
/// edge. END_END moves both anchors to their trailing edges. Vertically the
/// origin attaches below its bar and the destination at its midline, unless
/// that would start the arrow lower than where it ends.
pub fn adjust_endpoints(
    origin: Rectangle,
    destination: Rectangle,
    link_type: LinkType,
) -> (Rectangle, Rectangle) {
    let mut orig = origin;
    let mut dest = destination;

    let mut offset_x = origin.width - CORNER_WIDTH;
    let separation = origin.right() - destination.left;
    if separation > 0.0 {
        offset_x -= separation;
    }

    match link_type {
        LinkType::EndStart => orig.left += offset_x.max(0.0),
        LinkType::EndEnd => {
            orig.left += origin.width;
            dest.left += destination.width;
        }
        LinkType::StartStart => {}
    }

    orig.top += BAR_HEIGHT;
    dest.top += HALF_HEIGHT;
    if orig.top > dest.top {
        orig.top -= BAR_HEIGHT;
    }

    (orig, dest)
}

/// The fixed origin point of a link being dragged out of `origin`.
pub fn drag_anchor(origin: Rectangle) -> Rectangle {
    Rectangle {
        left: origin.left + (origin.width - CORNER_WIDTH).max(0.0),
        top: origin.top + BAR_HEIGHT,
        ..origin
    }
}
