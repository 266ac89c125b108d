//! Import of SUMO `.net.xml` road networks.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::{Edge, Lane, Network, SignalController, SignalLink, DEFAULT_LANE_WIDTH};
use crate::math::Point2d;
use crate::{Error, Result};

#[derive(Deserialize)]
struct XmlNet {
    #[serde(rename = "edge", default)]
    edges: Vec<XmlEdge>,
    #[serde(rename = "tlLogic", default)]
    tl_logics: Vec<XmlTlLogic>,
    #[serde(rename = "connection", default)]
    connections: Vec<XmlConnection>,
}

#[derive(Deserialize)]
struct XmlEdge {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@function")]
    function: Option<String>,
    #[serde(rename = "lane", default)]
    lanes: Vec<XmlLane>,
}

#[derive(Deserialize)]
struct XmlLane {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@width")]
    width: Option<f64>,
    #[serde(rename = "@shape")]
    shape: Option<String>,
}

#[derive(Deserialize)]
struct XmlTlLogic {
    #[serde(rename = "@id")]
    id: String,
}

#[derive(Deserialize)]
struct XmlConnection {
    #[serde(rename = "@from")]
    from: String,
    #[serde(rename = "@to")]
    to: String,
    #[serde(rename = "@fromLane")]
    from_lane: Option<String>,
    #[serde(rename = "@via")]
    via: Option<String>,
    #[serde(rename = "@tl")]
    tl: Option<String>,
    #[serde(rename = "@linkIndex")]
    link_index: Option<usize>,
}

/// Parses a SUMO network document.
pub(super) fn parse(xml: &str) -> Result<Network> {
    let net: XmlNet = quick_xml::de::from_str(xml)?;

    let mut edges = vec![];
    let mut lanes = vec![];
    for edge in &net.edges {
        for lane in &edge.lanes {
            if let Some(shape) = &lane.shape {
                lanes.push(Lane {
                    id: lane.id.clone(),
                    shape: parse_shape(shape)?,
                });
            }
        }

        if edge.function.as_deref() == Some("internal") {
            continue;
        }
        let Some(first) = edge.lanes.first() else {
            continue;
        };
        let Some(shape) = &first.shape else {
            log::warn!("Edge {:?} has no lane shape; skipping", edge.id);
            continue;
        };
        edges.push(Edge {
            id: edge.id.clone(),
            shape: parse_shape(shape)?,
            lane_width: first.width.unwrap_or(DEFAULT_LANE_WIDTH),
            lane_count: edge.lanes.len() as u32,
        });
    }

    let mut signals = BTreeMap::new();
    for logic in &net.tl_logics {
        let mut links = net
            .connections
            .iter()
            .filter(|conn| conn.tl.as_deref() == Some(logic.id.as_str()))
            .filter_map(|conn| {
                let index = conn.link_index?;
                let lane = conn.via.clone().or_else(|| {
                    let from_lane = conn.from_lane.as_ref()?;
                    Some(format!("{}_{}", conn.from, from_lane))
                });
                Some(SignalLink {
                    index,
                    lane,
                    from: Some(conn.from.clone()),
                    to: Some(conn.to.clone()),
                })
            })
            .collect::<Vec<_>>();
        links.sort_by_key(|link| link.index);
        signals.insert(logic.id.clone(), SignalController { links });
    }

    Ok(Network::new(edges, lanes, signals))
}

/// Parses a SUMO shape attribute of the form `"x1,y1 x2,y2 ..."`.
///
/// Tokens without a comma are ignored, as is any elevation component.
fn parse_shape(shape: &str) -> Result<Vec<Point2d>> {
    shape
        .split_whitespace()
        .filter(|token| token.contains(','))
        .map(|token| {
            let mut coords = token.split(',').map(str::parse::<f64>);
            match (coords.next(), coords.next()) {
                (Some(Ok(x)), Some(Ok(y))) => Ok(Point2d::new(x, y)),
                _ => Err(Error::Shape(token.to_string())),
            }
        })
        .collect()
}
