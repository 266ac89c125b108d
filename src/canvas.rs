//! The drawing surface.
//!
//! [Canvas] is modelled on an immediate-mode 2D context: a stack of local
//! transformations plus a handful of stroke and fill primitives. Coordinates
//! passed to the primitives are in logical pixels and are mapped through the
//! current transformation, beneath which sits the device pixel ratio.

use std::fmt;

use cgmath::{Matrix3, Rad, SquareMatrix};
use serde::{Deserialize, Serialize};

use crate::math::{matrix_rotation, matrix_scale, rotation, scaling, transform_point, translation};
use crate::math::{Point2d, Vector2d};
use crate::Error;
pub use record::{DrawCommand, Recorder};
pub use svg::SvgCanvas;

mod record;
mod svg;

/// A 2D drawing surface.
pub trait Canvas {
    /// Resizes the backing pixel buffer, clearing it and resetting all state.
    fn resize(&mut self, width: u32, height: u32);

    /// Sets the number of device pixels per logical pixel.
    fn set_base_scale(&mut self, scale: f64);

    /// Clears the entire surface.
    fn clear(&mut self);

    /// Pushes the current transformation onto the stack.
    fn save(&mut self);

    /// Pops the most recently saved transformation off the stack.
    fn restore(&mut self);

    /// Moves the origin of the local coordinate system.
    fn translate(&mut self, offset: Vector2d);

    /// Rotates the local coordinate system clockwise on screen.
    fn rotate(&mut self, angle: Rad<f64>);

    /// Strokes a connected sequence of line segments.
    fn stroke_polyline(&mut self, points: &[Point2d], stroke: &Stroke);

    /// Fills a circle.
    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: Color);

    /// Fills an axis-aligned rectangle in the local coordinate system.
    fn fill_rect(&mut self, origin: Point2d, size: Vector2d, color: Color);

    /// Draws a line of text horizontally centred on `position`.
    fn fill_text(&mut self, text: &str, position: Point2d, size: f64, color: Color);
}

/// An sRGB colour with alpha.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// The shape of the ends of a stroked line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
}

/// How a line is stroked.
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    /// The line width in pixels.
    pub width: f64,
    /// The line colour.
    pub color: Color,
    /// The shape of the line ends.
    pub cap: LineCap,
    /// Alternating dash and gap lengths in pixels; empty for a solid line.
    pub dash: Vec<f64>,
}

/// The transformation state shared by the canvas implementations.
#[derive(Clone, Debug)]
struct ContextState {
    /// The device pixel ratio.
    base_scale: f64,
    /// The current local transformation.
    current: Matrix3<f64>,
    /// The saved transformations.
    stack: Vec<Matrix3<f64>>,
}

impl Color {
    /// Creates an opaque colour.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parses a colour of the form `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |idx: usize| u8::from_str_radix(&digits[2 * idx..2 * idx + 2], 16).ok();
        match digits.len() {
            3 => {
                let mut short = digits.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(short.next()??, short.next()??, short.next()??))
            }
            6 => Some(Self::rgb(channel(0)?, channel(1)?, channel(2)?)),
            8 => Some(Self {
                r: channel(0)?,
                g: channel(1)?,
                b: channel(2)?,
                a: channel(3)?,
            }),
            _ => None,
        }
    }

    /// The opacity in the range `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Formats the colour as `#rrggbb`, ignoring the alpha channel.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rgb_hex())?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or(Error::Color(value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl Stroke {
    /// A solid line.
    pub fn solid(width: f64, color: Color, cap: LineCap) -> Self {
        Self {
            width,
            color,
            cap,
            dash: vec![],
        }
    }

    /// A dashed line with butt ends.
    pub fn dashed(width: f64, color: Color, dash: &[f64]) -> Self {
        Self {
            width,
            color,
            cap: LineCap::Butt,
            dash: dash.to_vec(),
        }
    }
}

impl Default for ContextState {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            current: Matrix3::identity(),
            stack: vec![],
        }
    }
}

impl ContextState {
    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(matrix) = self.stack.pop() {
            self.current = matrix;
        }
    }

    fn translate(&mut self, offset: Vector2d) {
        self.current = self.current * translation(offset);
    }

    fn rotate(&mut self, angle: Rad<f64>) {
        self.current = self.current * rotation(angle);
    }

    /// The full transformation from local to device coordinates.
    fn matrix(&self) -> Matrix3<f64> {
        scaling(self.base_scale) * self.current
    }

    /// Maps a local point into device coordinates.
    fn device_point(&self, point: Point2d) -> Point2d {
        transform_point(&self.matrix(), point)
    }

    /// Maps a local length into device pixels.
    fn device_length(&self, length: f64) -> f64 {
        length * matrix_scale(&self.matrix())
    }

    /// The rotation of the local coordinate system on screen.
    fn device_rotation(&self) -> Rad<f64> {
        matrix_rotation(&self.matrix())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn parse_colors() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("#f80"), Some(Color::rgb(255, 136, 0)));
        assert_eq!(
            Color::from_hex("#00000080"),
            Some(Color { r: 0, g: 0, b: 0, a: 128 })
        );
        assert_eq!(Color::from_hex("ff8000"), None);
        assert_eq!(Color::from_hex("#ff80"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn color_serde() {
        let color: Color = serde_json::from_str(r##""#1e88e5""##).unwrap();
        assert_eq!(color, Color::rgb(0x1e, 0x88, 0xe5));
        assert_eq!(serde_json::to_string(&color).unwrap(), r##""#1e88e5""##);
        assert!(serde_json::from_str::<Color>(r#""blue""#).is_err());
    }

    #[test]
    fn line_caps() {
        assert_eq!(serde_json::from_str::<LineCap>(r#""round""#).unwrap(), LineCap::Round);
        assert_eq!(serde_json::to_string(&LineCap::Butt).unwrap(), r#""butt""#);
        assert!(serde_json::from_str::<LineCap>(r#""square""#).is_err());
    }

    #[test]
    fn save_and_restore() {
        let mut state = ContextState::default();
        state.base_scale = 2.0;
        state.save();
        state.translate(Vector2d::new(10.0, 20.0));
        state.rotate(Rad(std::f64::consts::FRAC_PI_2));
        let p = state.device_point(Point2d::new(1.0, 0.0));
        assert_approx_eq!(p.x, 20.0);
        assert_approx_eq!(p.y, 42.0);
        assert_approx_eq!(state.device_length(3.0), 6.0);
        assert_approx_eq!(state.device_rotation().0, std::f64::consts::FRAC_PI_2);

        state.restore();
        let p = state.device_point(Point2d::new(1.0, 0.0));
        assert_approx_eq!(p.x, 2.0);
        assert_approx_eq!(p.y, 0.0);

        // Unbalanced restores are ignored.
        state.restore();
        assert_approx_eq!(state.device_point(Point2d::new(1.0, 1.0)).y, 2.0);
    }
}
