use cgmath::{EuclideanSpace, Rad};

use crate::canvas::Canvas;
use crate::math::{heading_to_rotation, Point2d, Vector2d};
use crate::snapshot::VehicleState;
use crate::transform::Transform;
use crate::util::short_id;
use crate::Style;

/// Gap between a vehicle and its label, in pixels.
const LABEL_GAP: f64 = 2.0;

/// Draws every vehicle as an oriented rectangle with a windshield and a label.
pub(super) fn draw(
    canvas: &mut dyn Canvas,
    vehicles: &[VehicleState],
    transform: &Transform,
    style: &Style,
) {
    let length = transform.length(style.vehicle_length);
    let width = transform.length(style.vehicle_width);

    for vehicle in vehicles {
        let centre = transform.apply(vehicle.position());
        if !(centre.x.is_finite() && centre.y.is_finite()) {
            log::debug!("Vehicle {:?} has no finite position", vehicle.id);
            continue;
        }
        let rotation = if vehicle.angle.is_finite() {
            heading_to_rotation(vehicle.angle)
        } else {
            Rad(0.0)
        };

        canvas.save();
        canvas.translate(centre.to_vec());
        canvas.rotate(rotation);

        // The body is centred on the vehicle's position, with its front along +x.
        canvas.fill_rect(
            Point2d::new(-0.5 * length, -0.5 * width),
            Vector2d::new(length, width),
            style.vehicle_color(vehicle.speed),
        );
        canvas.fill_rect(
            Point2d::new(0.15 * length, -0.4 * width),
            Vector2d::new(0.2 * length, 0.8 * width),
            style.windshield_color,
        );

        // Labels stay upright whatever the heading.
        canvas.rotate(-rotation);
        let label_y = -(0.5 * length.max(width) + LABEL_GAP + 0.5 * style.label_size);
        canvas.fill_text(
            short_id(&vehicle.id),
            Point2d::new(0.0, label_y),
            style.label_size,
            style.label_color,
        );

        canvas.restore();
    }
}
