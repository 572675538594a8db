//! Touch hit-testing against the view tree
//!
//! Raw touch coordinates are window coordinates, the same space as
//! [`ViewTree::global_visible_rect`].

use motus_core::{Point, Rect, ViewId, ViewTree};

/// Side length of the touch square used when none is given
pub const DEFAULT_TOUCH_RADIUS: f32 = 1.0;

/// Convert a raw touch position into coordinates relative to the visible
/// top-left corner of `view`, truncated to whole pixels.
///
/// Returns `None` when the view is not on screen.
pub fn touch_to_view_position(
    views: &ViewTree,
    view: ViewId,
    raw_x: f32,
    raw_y: f32,
) -> Option<Point> {
    let rect = views.global_visible_rect(view)?;
    Some(Point::new(raw_x - rect.x(), raw_y - rect.y()).truncate())
}

/// First candidate whose visible area overlaps the `radius`-sized square
/// whose top-left corner is `point`
pub fn find_view_containing_point(
    views: &ViewTree,
    candidates: &[ViewId],
    point: Point,
    radius: f32,
) -> Option<ViewId> {
    let touched = Rect::new(point.x, point.y, radius, radius);
    candidates.iter().copied().find(|&candidate| {
        views
            .global_visible_rect(candidate)
            .is_some_and(|rect| rect.intersects(&touched))
    })
}
