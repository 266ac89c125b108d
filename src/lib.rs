pub use canvas::{Canvas, Color, DrawCommand, Recorder, SvgCanvas};
pub use cgmath;
pub use error::{Error, Result};
pub use light::LightState;
pub use network::{Edge, Lane, Network, SignalController, SignalLink};
pub use render::Renderer;
pub use snapshot::{FeedMessage, SignalState, Snapshot, VehicleState};
pub use style::Style;
pub use transform::{Transform, Viewport};
pub use util::Interval;

pub mod canvas;
mod error;
mod light;
pub mod math;
pub mod network;
mod render;
mod snapshot;
mod style;
pub mod transform;
mod util;
