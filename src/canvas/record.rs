use cgmath::Rad;
use serde::Serialize;

use super::{Canvas, Color, ContextState, LineCap, Stroke};
use crate::math::{Point2d, Vector2d};

/// A canvas which records every draw call in device coordinates.
///
/// Useful for debugging, where the recording can be dumped as JSON,
/// and for inspecting rendered frames in tests.
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    /// The size of the backing buffer in device pixels.
    size: (u32, u32),
    /// The transformation state.
    state: ContextState,
    /// The commands drawn since the last clear.
    commands: Vec<DrawCommand>,
}

/// A single recorded draw call.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DrawCommand {
    Polyline {
        points: Vec<Point2d>,
        width: f64,
        color: Color,
        cap: LineCap,
        dash: Vec<f64>,
    },
    Circle {
        centre: Point2d,
        radius: f64,
        color: Color,
    },
    /// A filled rectangle, possibly rotated, given by its four corners.
    Quad {
        corners: [Point2d; 4],
        color: Color,
    },
    Text {
        text: String,
        position: Point2d,
        size: f64,
        /// The clockwise rotation of the text baseline in radians.
        angle: f64,
        color: Color,
    },
}

impl Recorder {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Default::default()
    }

    /// The size of the backing buffer in device pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The commands drawn since the surface was last cleared.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Gets the recording as a JSON array.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(self.commands)
    }
}

impl Canvas for Recorder {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.state = ContextState::default();
        self.commands.clear();
    }

    fn set_base_scale(&mut self, scale: f64) {
        self.state.base_scale = scale;
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn translate(&mut self, offset: Vector2d) {
        self.state.translate(offset);
    }

    fn rotate(&mut self, angle: Rad<f64>) {
        self.state.rotate(angle);
    }

    fn stroke_polyline(&mut self, points: &[Point2d], stroke: &Stroke) {
        self.commands.push(DrawCommand::Polyline {
            points: points.iter().map(|p| self.state.device_point(*p)).collect(),
            width: self.state.device_length(stroke.width),
            color: stroke.color,
            cap: stroke.cap,
            dash: stroke.dash.iter().map(|d| self.state.device_length(*d)).collect(),
        });
    }

    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            centre: self.state.device_point(centre),
            radius: self.state.device_length(radius),
            color,
        });
    }

    fn fill_rect(&mut self, origin: Point2d, size: Vector2d, color: Color) {
        let corners = [
            origin,
            origin + Vector2d::new(size.x, 0.0),
            origin + size,
            origin + Vector2d::new(0.0, size.y),
        ];
        self.commands.push(DrawCommand::Quad {
            corners: corners.map(|p| self.state.device_point(p)),
            color,
        });
    }

    fn fill_text(&mut self, text: &str, position: Point2d, size: f64, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position: self.state.device_point(position),
            size: self.state.device_length(size),
            angle: self.state.device_rotation().0,
            color,
        });
    }
}
