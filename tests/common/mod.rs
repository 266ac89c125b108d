//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use traffic_view::math::Point2d;
use traffic_view::{DrawCommand, Edge, Lane, Network, SignalController, SignalLink};

/// Creates an edge from a list of `(x, y)` pairs.
pub fn edge(id: &str, shape: &[(f64, f64)], lane_count: u32) -> Edge {
    Edge {
        id: id.to_string(),
        shape: points(shape),
        lane_width: 3.2,
        lane_count,
    }
}

/// Creates a lane from a list of `(x, y)` pairs.
pub fn lane(id: &str, shape: &[(f64, f64)]) -> Lane {
    Lane {
        id: id.to_string(),
        shape: points(shape),
    }
}

/// Creates a signal link.
pub fn link(index: usize, lane: &str) -> SignalLink {
    SignalLink {
        index,
        lane: Some(lane.to_string()),
        from: None,
        to: None,
    }
}

/// Creates a network of edges and lanes, with the given signal controllers.
pub fn network(
    edges: Vec<Edge>,
    lanes: Vec<Lane>,
    signals: Vec<(&str, Vec<SignalLink>)>,
) -> Network {
    let signals = signals
        .into_iter()
        .map(|(id, links)| (id.to_string(), SignalController { links }))
        .collect::<BTreeMap<_, _>>();
    Network::new(edges, lanes, signals)
}

pub fn points(shape: &[(f64, f64)]) -> Vec<Point2d> {
    shape.iter().map(|(x, y)| Point2d::new(*x, *y)).collect()
}

/// The recorded circles, as `(centre, colour)` pairs.
pub fn circles(commands: &[DrawCommand]) -> Vec<(Point2d, traffic_view::Color)> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Circle { centre, color, .. } => Some((*centre, *color)),
            _ => None,
        })
        .collect()
}
