use super::Point2d;
use crate::util::Interval;

/// An axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds2d {
    /// The extents along the x-axis.
    pub x: Interval<f64>,
    /// The extents along the y-axis.
    pub y: Interval<f64>,
}

impl Bounds2d {
    /// Computes the bounding box of a set of points,
    /// or `None` if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = Point2d>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let init = Self {
            x: Interval::point(first.x),
            y: Interval::point(first.y),
        };
        Some(points.fold(init, |bounds, p| bounds.extend(p)))
    }

    /// Returns the smallest bounding box containing both this box and the point.
    pub fn extend(&self, point: Point2d) -> Self {
        Self {
            x: self.x.extend(point.x),
            y: self.y.extend(point.y),
        }
    }

    /// The extent along the x-axis.
    pub fn width(&self) -> f64 {
        self.x.length()
    }

    /// The extent along the y-axis.
    pub fn height(&self) -> f64 {
        self.y.length()
    }

    /// The centre of the bounding box.
    pub fn centre(&self) -> Point2d {
        Point2d::new(self.x.midpoint(), self.y.midpoint())
    }

    /// Returns true if the point lies within the bounding box.
    pub fn contains(&self, point: Point2d) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bounds_of_points() {
        let points = [(1.0, 2.0), (-3.0, 5.0), (4.0, -1.0)].map(|(x, y)| Point2d::new(x, y));
        let bounds = Bounds2d::from_points(points).unwrap();
        assert_eq!(bounds.width(), 7.0);
        assert_eq!(bounds.height(), 6.0);
        assert_eq!(bounds.centre(), Point2d::new(0.5, 2.0));
        assert!(points.into_iter().all(|p| bounds.contains(p)));
    }

    #[test]
    fn no_points() {
        assert!(Bounds2d::from_points(std::iter::empty()).is_none());
    }
}
