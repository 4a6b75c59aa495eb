use gantt_links::links::geometry::{CORNER_WIDTH, HALF_HEIGHT};
use gantt_links::links::{compute_path, Orientation, Point, Rectangle};
use gantt_links::model::LinkType;
use proptest::prelude::*;

// Whole-pixel coordinates keep every sum exact in f32.
fn anchor() -> impl Strategy<Value = Rectangle> {
    (-2000i32..2000, -2000i32..2000).prop_map(|(x, y)| Rectangle::at(Point::new(x as f32, y as f32)))
}

fn link_type() -> impl Strategy<Value = LinkType> {
    prop_oneof![
        Just(LinkType::EndStart),
        Just(LinkType::StartStart),
        Just(LinkType::EndEnd),
    ]
}

proptest! {
    #[test]
    fn segments_never_have_negative_size(o in anchor(), d in anchor(), t in link_type()) {
        let path = compute_path(&o, &d, t);
        for rect in path.visible_segments() {
            prop_assert!(rect.width >= 0.0, "{:?}", path);
            prop_assert!(rect.height >= 0.0, "{:?}", path);
        }
    }

    #[test]
    fn same_inputs_same_path(o in anchor(), d in anchor(), t in link_type()) {
        prop_assert_eq!(compute_path(&o, &d, t), compute_path(&o, &d, t));
    }

    #[test]
    fn end_start_run_matches_horizontal_distance(o in anchor(), d in anchor()) {
        let path = compute_path(&o, &d, LinkType::EndStart);
        prop_assert!(path.start.is_hidden());
        match path.end.rect() {
            Some(end) => prop_assert_eq!(end.width, (d.left - o.left).abs()),
            None => prop_assert_eq!(d.left, o.left),
        }
    }

    #[test]
    fn end_start_direction_follows_destination(o in anchor(), d in anchor()) {
        let orientation = compute_path(&o, &d, LinkType::EndStart).arrow.orientation;
        let expected = if d.left > o.left {
            Orientation::East
        } else if d.left < o.left {
            Orientation::West
        } else if d.top > o.top {
            Orientation::South
        } else {
            Orientation::North
        };
        prop_assert_eq!(orientation, expected);
    }

    #[test]
    fn start_start_legs_span_distance_plus_two_corners(o in anchor(), d in anchor()) {
        let path = compute_path(&o, &d, LinkType::StartStart);
        let (start, end) = (path.start.rect().unwrap(), path.end.rect().unwrap());
        // leading edges are inset by half a padding on opposite sides
        let span = (d.left - o.left + 4.0).abs();
        prop_assert_eq!(start.width + end.width + HALF_HEIGHT, span + 2.0 * CORNER_WIDTH);
        prop_assert_eq!(path.arrow.orientation, Orientation::East);
    }

    #[test]
    fn end_end_legs_span_distance_plus_two_corners(o in anchor(), d in anchor()) {
        let path = compute_path(&o, &d, LinkType::EndEnd);
        let (start, end) = (path.start.rect().unwrap(), path.end.rect().unwrap());
        let span = (d.left - o.left + 6.0).abs();
        prop_assert_eq!(start.width + end.width, span + 2.0 * CORNER_WIDTH);
        prop_assert_eq!(path.arrow.orientation, Orientation::West);
    }
}
