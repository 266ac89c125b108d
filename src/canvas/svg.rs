use std::fmt::Write;

use cgmath::{Deg, Rad};
use itertools::Itertools;

use super::{Canvas, Color, ContextState, LineCap, Stroke};
use crate::math::{Point2d, Vector2d};

/// A canvas which renders each frame as an SVG document.
#[derive(Clone, Debug, Default)]
pub struct SvgCanvas {
    /// The size of the backing buffer in device pixels.
    size: (u32, u32),
    /// The transformation state.
    state: ContextState,
    /// The SVG elements drawn since the last clear.
    body: String,
}

impl SvgCanvas {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Default::default()
    }

    /// Gets the current frame as a complete SVG document.
    pub fn document(&self) -> String {
        let (width, height) = self.size;
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{body}</svg>\n",
            w = width,
            h = height,
            body = self.body
        )
    }

    fn fill_attrs(color: Color) -> String {
        if color.a == 255 {
            format!("fill=\"{}\"", color.to_rgb_hex())
        } else {
            format!(
                "fill=\"{}\" fill-opacity=\"{:.3}\"",
                color.to_rgb_hex(),
                color.opacity()
            )
        }
    }
}

impl Canvas for SvgCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.state = ContextState::default();
        self.body.clear();
    }

    fn set_base_scale(&mut self, scale: f64) {
        self.state.base_scale = scale;
    }

    fn clear(&mut self) {
        self.body.clear();
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
        let points = points
            .iter()
            .map(|p| self.state.device_point(*p))
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .join(" ");
        let cap = match stroke.cap {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        };
        let mut attrs = format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{:.2}\" \
             stroke-linecap=\"{}\" stroke-linejoin=\"round\"",
            stroke.color.to_rgb_hex(),
            self.state.device_length(stroke.width),
            cap
        );
        if stroke.color.a != 255 {
            let _ = write!(attrs, " stroke-opacity=\"{:.3}\"", stroke.color.opacity());
        }
        if !stroke.dash.is_empty() {
            let dash = stroke
                .dash
                .iter()
                .map(|d| format!("{:.2}", self.state.device_length(*d)))
                .join(" ");
            let _ = write!(attrs, " stroke-dasharray=\"{}\"", dash);
        }
        let _ = writeln!(self.body, "<polyline points=\"{}\" {}/>", points, attrs);
    }

    fn fill_circle(&mut self, centre: Point2d, radius: f64, color: Color) {
        let centre = self.state.device_point(centre);
        let _ = writeln!(
            self.body,
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>",
            centre.x,
            centre.y,
            self.state.device_length(radius),
            Self::fill_attrs(color)
        );
    }

    fn fill_rect(&mut self, origin: Point2d, size: Vector2d, color: Color) {
        let corners = [
            origin,
            origin + Vector2d::new(size.x, 0.0),
            origin + size,
            origin + Vector2d::new(0.0, size.y),
        ];
        let points = corners
            .iter()
            .map(|p| self.state.device_point(*p))
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .join(" ");
        let _ = writeln!(
            self.body,
            "<polygon points=\"{}\" {}/>",
            points,
            Self::fill_attrs(color)
        );
    }

    fn fill_text(&mut self, text: &str, position: Point2d, size: f64, color: Color) {
        let position = self.state.device_point(position);
        let angle: Deg<f64> = self.state.device_rotation().into();
        let _ = writeln!(
            self.body,
            "<text x=\"{x:.2}\" y=\"{y:.2}\" font-size=\"{size:.2}\" font-family=\"sans-serif\" \
             text-anchor=\"middle\" dominant-baseline=\"middle\" \
             transform=\"rotate({angle:.2} {x:.2} {y:.2})\" {fill}>{text}</text>",
            x = position.x,
            y = position.y,
            size = self.state.device_length(size),
            angle = angle.0,
            fill = Self::fill_attrs(color),
            text = escape(text)
        );
    }
}

/// Escapes text for inclusion in XML character data.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn svg_document() {
        let mut canvas = SvgCanvas::new();
        canvas.resize(100, 50);
        canvas.fill_circle(Point2d::new(10.0, 20.0), 4.0, Color::rgb(255, 0, 0));
        canvas.stroke_polyline(
            &[Point2d::new(0.0, 0.0), Point2d::new(50.0, 25.0)],
            &Stroke::dashed(1.0, Color::rgb(255, 255, 255), &[6.0, 4.0]),
        );
        canvas.fill_text("a<b", Point2d::new(5.0, 5.0), 10.0, Color::rgb(0, 0, 0));

        let svg = canvas.document();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("viewBox=\"0 0 100 50\""));
        assert!(svg.contains("<circle cx=\"10.00\" cy=\"20.00\" r=\"4.00\" fill=\"#ff0000\"/>"));
        assert!(svg.contains("points=\"0.00,0.00 50.00,25.00\""));
        assert!(svg.contains("stroke-dasharray=\"6.00 4.00\""));
        assert!(svg.contains("stroke-linecap=\"butt\" stroke-linejoin=\"round\""));
        assert!(svg.contains("font-family=\"sans-serif\" text-anchor=\"middle\""));
        assert!(svg.contains(">a&lt;b</text>"));

        canvas.clear();
        assert!(!canvas.document().contains("<circle"));
    }

    #[test]
    fn scaled_for_device() {
        let mut canvas = SvgCanvas::new();
        canvas.resize(200, 100);
        canvas.set_base_scale(2.0);
        canvas.fill_rect(
            Point2d::new(1.0, 1.0),
            Vector2d::new(2.0, 3.0),
            Color { r: 0, g: 0, b: 255, a: 128 },
        );
        let svg = canvas.document();
        assert!(svg.contains("points=\"2.00,2.00 6.00,2.00 6.00,8.00 2.00,8.00\""));
        assert!(svg.contains("fill-opacity=\"0.502\""));
    }
}
