//! Drawing of complete frames.

use smallvec::SmallVec;

use crate::canvas::Canvas;
use crate::math::Point2d;
use crate::network::Edge;
use crate::transform::{Transform, Viewport};
use crate::{Network, Snapshot, Style};

mod roads;
mod signals;
mod vehicles;

/// Renders a road network and the latest simulation snapshot.
///
/// The renderer owns the current transform and snapshot; each call to
/// [update](Self::update) replaces the snapshot and redraws the whole frame.
pub struct Renderer {
    /// The static road network.
    network: Network,
    /// The visual configuration.
    style: Style,
    /// The current viewport.
    viewport: Viewport,
    /// The mapping from simulation to screen coordinates for `viewport`.
    transform: Transform,
    /// The most recent snapshot, if one has been received.
    snapshot: Option<Snapshot>,
}

/// An edge together with its centre line in screen coordinates.
struct ScreenEdge<'a> {
    edge: &'a Edge,
    points: SmallVec<[Point2d; 8]>,
}

impl Renderer {
    /// Creates a renderer for the network.
    ///
    /// The canvas should be sized with [resize](Self::resize) before the first frame is drawn.
    pub fn new(network: Network, viewport: Viewport, style: Style) -> Self {
        let transform = Transform::fit(&network, viewport, style.padding);
        Self {
            network,
            style,
            viewport,
            transform,
            snapshot: None,
        }
    }

    /// The road network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// The visual configuration.
    pub fn style(&self) -> &Style {
        &self.style
    }

    /// The current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The current mapping from simulation to screen coordinates.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// The most recently received snapshot.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    /// Adapts to a new viewport size or device pixel ratio.
    ///
    /// Recomputes the transform, resizes the canvas's backing buffer to match
    /// the device pixel ratio, and redraws the current frame.
    pub fn resize(&mut self, viewport: Viewport, canvas: &mut dyn Canvas) {
        self.viewport = viewport;
        self.transform = Transform::fit(&self.network, viewport, self.style.padding);
        let (width, height) = viewport.backing_size();
        canvas.resize(width, height);
        canvas.set_base_scale(viewport.pixel_ratio());
        self.draw(canvas);
    }

    /// Replaces the current snapshot and draws it.
    pub fn update(&mut self, snapshot: Snapshot, canvas: &mut dyn Canvas) {
        self.snapshot = Some(snapshot);
        self.draw(canvas);
    }

    /// Draws the current frame.
    ///
    /// Layers are drawn bottom to top: road surfaces, lane markings,
    /// signal indicators, then vehicles.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear();

        let edges = self.screen_edges();
        roads::draw_surfaces(canvas, &edges, &self.transform, &self.style);
        roads::draw_markings(canvas, &edges, &self.style);

        if let Some(snapshot) = &self.snapshot {
            signals::draw(canvas, &self.network, snapshot, &self.transform, &self.style);
            vehicles::draw(canvas, &snapshot.vehicles, &self.transform, &self.style);
        }
    }

    /// Finds the signal controller whose state is shown: the controller with the
    /// lexicographically smallest ID among those with a state in the snapshot.
    pub fn active_signal(&self) -> Option<(&str, &str)> {
        let snapshot = self.snapshot.as_ref()?;
        signals::active_signal(&self.network, snapshot)
    }

    /// Maps the centre line of every drawable edge to screen coordinates.
    fn screen_edges(&self) -> Vec<ScreenEdge<'_>> {
        self.network
            .edges()
            .iter()
            .filter(|edge| edge.shape.len() >= 2)
            .map(|edge| ScreenEdge {
                edge,
                points: edge.shape.iter().map(|p| self.transform.apply(*p)).collect(),
            })
            .collect()
    }
}
