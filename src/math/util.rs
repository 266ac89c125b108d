use super::{Point2d, Vector2d};
use cgmath::prelude::*;
use cgmath::{Deg, Matrix3, Rad, Vector3};

/// Converts a compass heading into a rotation in screen space.
///
/// Headings are measured in degrees clockwise from north (the positive y-axis
/// of the simulation). The returned angle rotates the screen's positive x-axis,
/// clockwise since the screen's y-axis points down, so that a shape drawn
/// along +x ends up pointing along the heading.
pub fn heading_to_rotation(heading: f64) -> Rad<f64> {
    Deg(heading - 90.0).into()
}

/// A homogeneous 2D translation matrix.
pub fn translation(offset: Vector2d) -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, offset.x, offset.y, 1.0)
}

/// A homogeneous 2D rotation matrix.
pub fn rotation(angle: Rad<f64>) -> Matrix3<f64> {
    let (sin, cos) = angle.sin_cos();
    Matrix3::new(cos, sin, 0.0, -sin, cos, 0.0, 0.0, 0.0, 1.0)
}

/// A homogeneous 2D uniform scaling matrix.
pub fn scaling(scale: f64) -> Matrix3<f64> {
    Matrix3::new(scale, 0.0, 0.0, 0.0, scale, 0.0, 0.0, 0.0, 1.0)
}

/// Applies a homogeneous 2D transformation to a point.
pub fn transform_point(matrix: &Matrix3<f64>, point: Point2d) -> Point2d {
    let v = *matrix * Vector3::new(point.x, point.y, 1.0);
    Point2d::new(v.x, v.y)
}

/// Gets the uniform scale factor of a similarity transformation.
pub fn matrix_scale(matrix: &Matrix3<f64>) -> f64 {
    Vector2d::new(matrix.x.x, matrix.x.y).magnitude()
}

/// Gets the rotation of a similarity transformation.
pub fn matrix_rotation(matrix: &Matrix3<f64>) -> Rad<f64> {
    Rad(matrix.x.y.atan2(matrix.x.x))
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn compass_headings() {
        let east = rotation(heading_to_rotation(90.0));
        let p = transform_point(&east, Point2d::new(1.0, 0.0));
        assert_approx_eq!(p.x, 1.0);
        assert_approx_eq!(p.y, 0.0);

        // North is up the screen, i.e. towards negative y.
        let north = rotation(heading_to_rotation(0.0));
        let p = transform_point(&north, Point2d::new(1.0, 0.0));
        assert_approx_eq!(p.x, 0.0);
        assert_approx_eq!(p.y, -1.0);

        let south = rotation(heading_to_rotation(180.0));
        let p = transform_point(&south, Point2d::new(1.0, 0.0));
        assert_approx_eq!(p.x, 0.0);
        assert_approx_eq!(p.y, 1.0);
    }

    #[test]
    fn composed_matrix() {
        let matrix = scaling(2.0)
            * translation(Vector2d::new(10.0, 5.0))
            * rotation(Rad(std::f64::consts::FRAC_PI_2));
        let p = transform_point(&matrix, Point2d::new(1.0, 0.0));
        assert_approx_eq!(p.x, 20.0);
        assert_approx_eq!(p.y, 12.0);
        assert_approx_eq!(matrix_scale(&matrix), 2.0);
        assert_approx_eq!(matrix_rotation(&matrix).0, std::f64::consts::FRAC_PI_2);
    }
}
