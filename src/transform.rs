//! The mapping from simulation coordinates to screen pixels.

use crate::math::{Bounds2d, Point2d};
use crate::Network;

/// The default margin between the network and the edge of the viewport, in pixels.
pub const DEFAULT_PADDING: f64 = 20.0;

/// Extents below this size are treated as zero.
const MIN_EXTENT: f64 = 1e-9;

/// The visible drawing area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// The width in logical pixels.
    pub width: f64,
    /// The height in logical pixels.
    pub height: f64,
    /// The number of device pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

/// A uniform scale and offset which maps simulation coordinates, with y pointing up,
/// onto screen coordinates, with y pointing down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Pixels per simulation unit.
    pub scale: f64,
    /// The horizontal offset in pixels.
    pub offset_x: f64,
    /// The vertical offset in pixels, measured up from the bottom of the viewport.
    pub offset_y: f64,
    /// The height of the viewport, about which the vertical axis is flipped.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport with a device pixel ratio of one.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    /// Sets the device pixel ratio.
    pub fn with_device_pixel_ratio(self, device_pixel_ratio: f64) -> Self {
        Self {
            device_pixel_ratio,
            ..self
        }
    }

    /// The device pixel ratio, or one if it is not a positive number.
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    /// The size of the backing pixel buffer in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let device = |len: f64| (len * ratio).round().max(0.0) as u32;
        (device(self.width), device(self.height))
    }
}

impl Transform {
    /// The transform that only flips the vertical axis.
    pub fn identity(viewport: Viewport) -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            height: viewport.height,
        }
    }

    /// Fits the whole network inside the viewport, leaving `padding` pixels on every side.
    pub fn fit(network: &Network, viewport: Viewport, padding: f64) -> Self {
        Self::fit_bounds(network.bounds(), viewport, padding)
    }

    /// Fits a bounding box inside the viewport, leaving `padding` pixels on every side.
    ///
    /// The box is centred in the viewport and scaled uniformly so that its
    /// limiting dimension fills the padded area. A box with zero extent along
    /// one axis is fitted along the other. If no finite positive scale exists,
    /// a scale of one is used; if there is no box at all, the identity is used.
    pub fn fit_bounds(bounds: Option<Bounds2d>, viewport: Viewport, padding: f64) -> Self {
        let Some(bounds) = bounds else {
            log::warn!("Network has no geometry; using the identity transform");
            return Self::identity(viewport);
        };

        let axis_scale = |available: f64, extent: f64| {
            if extent > MIN_EXTENT {
                available.max(0.0) / extent
            } else {
                f64::INFINITY
            }
        };
        let mut scale = f64::min(
            axis_scale(viewport.width - 2.0 * padding, bounds.width()),
            axis_scale(viewport.height - 2.0 * padding, bounds.height()),
        );
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!(
                "Cannot fit {:?} into {}x{}; falling back to unit scale",
                bounds,
                viewport.width,
                viewport.height
            );
            scale = 1.0;
        }

        // Map the centre of the box onto the centre of the viewport.
        let centre = bounds.centre();
        let transform = Self {
            scale,
            offset_x: 0.5 * viewport.width - centre.x * scale,
            offset_y: 0.5 * viewport.height - centre.y * scale,
            height: viewport.height,
        };
        log::debug!("Computed {:?}", transform);
        transform
    }

    /// Maps a point in simulation space to screen space.
    pub fn apply(&self, point: Point2d) -> Point2d {
        Point2d::new(
            point.x * self.scale + self.offset_x,
            self.height - (point.y * self.scale + self.offset_y),
        )
    }

    /// Maps a point in screen space back to simulation space.
    pub fn invert(&self, point: Point2d) -> Point2d {
        Point2d::new(
            (point.x - self.offset_x) / self.scale,
            (self.height - point.y - self.offset_y) / self.scale,
        )
    }

    /// Converts a length in simulation units to pixels.
    pub fn length(&self, length: f64) -> f64 {
        length * self.scale
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::util::Interval;
    use assert_approx_eq::assert_approx_eq;

    fn bounds(x: (f64, f64), y: (f64, f64)) -> Option<Bounds2d> {
        Some(Bounds2d {
            x: Interval::new(x.0, x.1),
            y: Interval::new(y.0, y.1),
        })
    }

    #[test]
    fn centres_the_bounds() {
        let viewport = Viewport::new(800.0, 600.0);
        let transform = Transform::fit_bounds(bounds((-50.0, 150.0), (10.0, 60.0)), viewport, 20.0);
        assert_approx_eq!(transform.scale, 3.8);
        let centre = transform.apply(Point2d::new(50.0, 35.0));
        assert_approx_eq!(centre.x, 400.0);
        assert_approx_eq!(centre.y, 300.0);
    }

    #[test]
    fn y_axis_points_up() {
        let viewport = Viewport::new(400.0, 400.0);
        let transform = Transform::fit_bounds(bounds((0.0, 10.0), (0.0, 10.0)), viewport, 20.0);
        let low = transform.apply(Point2d::new(5.0, 0.0));
        let high = transform.apply(Point2d::new(5.0, 10.0));
        assert_approx_eq!(low.y, 380.0);
        assert_approx_eq!(high.y, 20.0);
    }

    #[test]
    fn limited_by_height() {
        let viewport = Viewport::new(1000.0, 240.0);
        let transform = Transform::fit_bounds(bounds((0.0, 100.0), (0.0, 100.0)), viewport, 20.0);
        assert_approx_eq!(transform.scale, 2.0);
    }

    #[test]
    fn degenerate_bounds() {
        let viewport = Viewport::new(400.0, 300.0);

        let transform = Transform::fit_bounds(None, viewport, 20.0);
        assert_eq!(transform, Transform::identity(viewport));

        // A single point is centred at unit scale.
        let transform = Transform::fit_bounds(bounds((5.0, 5.0), (7.0, 7.0)), viewport, 20.0);
        assert_eq!(transform.scale, 1.0);
        let p = transform.apply(Point2d::new(5.0, 7.0));
        assert_approx_eq!(p.x, 200.0);
        assert_approx_eq!(p.y, 150.0);

        // A vertical line is fitted by its height.
        let transform = Transform::fit_bounds(bounds((0.0, 0.0), (0.0, 26.0)), viewport, 20.0);
        assert_approx_eq!(transform.scale, 10.0);
    }

    #[test]
    fn tiny_viewport() {
        let viewport = Viewport::new(30.0, 30.0);
        let transform = Transform::fit_bounds(bounds((0.0, 10.0), (0.0, 10.0)), viewport, 20.0);
        assert_eq!(transform.scale, 1.0);
        let p = transform.apply(Point2d::new(0.0, 0.0));
        assert!(p.x.is_finite() && p.y.is_finite());
    }

    #[test]
    fn backing_size() {
        let viewport = Viewport::new(400.0, 300.5).with_device_pixel_ratio(2.0);
        assert_eq!(viewport.backing_size(), (800, 601));
        let viewport = viewport.with_device_pixel_ratio(f64::NAN);
        assert_eq!(viewport.pixel_ratio(), 1.0);
        assert_eq!(viewport.backing_size(), (400, 301));
    }

    #[test]
    fn lengths() {
        let viewport = Viewport::new(140.0, 100.0);
        let transform = Transform::fit_bounds(bounds((0.0, 10.0), (0.0, 1.0)), viewport, 20.0);
        assert_approx_eq!(transform.length(5.0), 50.0);
    }
}
