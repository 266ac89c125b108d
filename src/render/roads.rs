use super::ScreenEdge;
use crate::canvas::{Canvas, LineCap, Stroke};
use crate::transform::Transform;
use crate::Style;

/// Strokes the road surface of every edge, as wide as all its lanes together.
pub(super) fn draw_surfaces(
    canvas: &mut dyn Canvas,
    edges: &[ScreenEdge],
    transform: &Transform,
    style: &Style,
) {
    for edge in edges {
        let width = transform.length(edge.edge.total_width());
        let stroke = Stroke::solid(width, style.road_color, LineCap::Round);
        canvas.stroke_polyline(&edge.points, &stroke);
    }
}

/// Strokes a dashed line along every multi-lane edge to suggest its lane divisions.
pub(super) fn draw_markings(canvas: &mut dyn Canvas, edges: &[ScreenEdge], style: &Style) {
    let stroke = Stroke::dashed(style.marking_width, style.marking_color, &style.marking_dash);
    for edge in edges.iter().filter(|edge| edge.edge.lane_count > 1) {
        canvas.stroke_polyline(&edge.points, &stroke);
    }
}
