//! Dynamic simulation state delivered by the live update feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::math::Point2d;
use crate::Result;

/// The state of the simulation at one step.
///
/// Each snapshot replaces the previous one wholesale.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The simulation step counter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: u64,
    /// The current state of each signal controller.
    #[serde(rename = "tlsState", default, deserialize_with = "null_as_default")]
    pub signals: BTreeMap<String, SignalState>,
    /// The vehicles currently in the network.
    #[serde(default, deserialize_with = "null_as_default")]
    pub vehicles: Vec<VehicleState>,
    /// The number of halted vehicles on each monitored approach.
    #[serde(default, deserialize_with = "null_as_default")]
    pub waiting_vehicles: BTreeMap<String, u32>,
    /// A description of the approach that currently has a green light.
    #[serde(default)]
    pub green_direction: Option<String>,
    /// Whether the signals are under automatic or manual control.
    #[serde(default)]
    pub control_mode: Option<String>,
}

/// The current state of a signal controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalState {
    /// One state character per controlled link.
    pub state: String,
}

/// The state of a single vehicle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleState {
    /// The vehicle ID.
    pub id: String,
    /// The x-coordinate of the vehicle in m.
    pub x: f64,
    /// The y-coordinate of the vehicle in m.
    pub y: f64,
    /// The heading in degrees clockwise from north.
    #[serde(default)]
    pub angle: f64,
    /// The speed in m/s.
    #[serde(default)]
    pub speed: f64,
}

/// A message received from the live update feed.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedMessage {
    /// A new simulation snapshot.
    Snapshot(Snapshot),
    /// The simulation has ended and no further snapshots will arrive.
    Finished,
    /// Any other status notification.
    Status(String),
}

/// Decodes an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Snapshot {
    /// Gets the state string of the given signal controller.
    pub fn signal_state(&self, id: &str) -> Option<&str> {
        self.signals.get(id).map(|signal| signal.state.as_str())
    }
}

impl VehicleState {
    /// The position of the vehicle.
    pub fn position(&self) -> Point2d {
        Point2d::new(self.x, self.y)
    }
}

impl FeedMessage {
    /// Decodes a JSON-encoded feed message.
    pub fn parse(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        if let Some(status) = value.get("status").and_then(|status| status.as_str()) {
            return Ok(match status {
                "finished" => Self::Finished,
                other => Self::Status(other.to_string()),
            });
        }
        Ok(Self::Snapshot(serde_json::from_value(value)?))
    }
}
