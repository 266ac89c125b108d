//! Visual configuration of the rendered scene.

use serde::{Deserialize, Serialize};

use crate::canvas::Color;
use crate::light::LightState;
use crate::transform::DEFAULT_PADDING;
use crate::Result;

/// Colours and dimensions used when drawing a frame.
///
/// Every field may be omitted from a JSON style, in which case its default is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    /// The margin around the network in pixels.
    pub padding: f64,
    /// The colour of road surfaces.
    pub road_color: Color,
    /// The colour of lane markings.
    pub marking_color: Color,
    /// The width of lane markings in pixels.
    pub marking_width: f64,
    /// Alternating dash and gap lengths of lane markings in pixels.
    pub marking_dash: Vec<f64>,
    /// The radius of signal indicators in pixels.
    pub signal_radius: f64,
    pub red_color: Color,
    pub yellow_color: Color,
    pub green_color: Color,
    /// The length of a vehicle in m.
    pub vehicle_length: f64,
    /// The width of a vehicle in m.
    pub vehicle_width: f64,
    /// Vehicles slower than this, in m/s, are drawn as stopped.
    pub stopped_speed: f64,
    pub stopped_color: Color,
    pub moving_color: Color,
    pub windshield_color: Color,
    pub label_color: Color,
    /// The font size of vehicle labels in pixels.
    pub label_size: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            road_color: Color::rgb(0x55, 0x55, 0x55),
            marking_color: Color::rgb(0xff, 0xff, 0xff),
            marking_width: 1.0,
            marking_dash: vec![6.0, 6.0],
            signal_radius: 4.0,
            red_color: Color::rgb(0xe5, 0x39, 0x35),
            yellow_color: Color::rgb(0xfd, 0xd8, 0x35),
            green_color: Color::rgb(0x43, 0xa0, 0x47),
            vehicle_length: 5.0,
            vehicle_width: 2.0,
            stopped_speed: 0.2,
            stopped_color: Color::rgb(0xff, 0x57, 0x22),
            moving_color: Color::rgb(0x1e, 0x88, 0xe5),
            windshield_color: Color::rgb(0xb3, 0xe5, 0xfc),
            label_color: Color::rgb(0x21, 0x21, 0x21),
            label_size: 10.0,
        }
    }
}

impl Style {
    /// Decodes a style from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The colour of a signal indicator.
    pub fn light_color(&self, state: LightState) -> Color {
        match state {
            LightState::Red => self.red_color,
            LightState::Yellow => self.yellow_color,
            LightState::Green => self.green_color,
        }
    }

    /// The body colour of a vehicle travelling at the given speed.
    pub fn vehicle_color(&self, speed: f64) -> Color {
        if speed < self.stopped_speed {
            self.stopped_color
        } else {
            self.moving_color
        }
    }
}
