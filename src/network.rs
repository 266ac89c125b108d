//! The static road network: edges, lanes and traffic signal topology.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::math::{Bounds2d, Point2d};
use crate::Result;

mod sumo;

/// The default width of a lane in m.
pub const DEFAULT_LANE_WIDTH: f64 = 3.2;

/// A road network, loaded once and immutable thereafter.
#[derive(Clone, Debug, Default)]
pub struct Network {
    /// The road segments.
    edges: Vec<Edge>,
    /// Every lane, internal junction lanes included.
    lanes: Vec<Lane>,
    /// The index into `lanes` of each lane ID.
    lane_index: HashMap<String, usize>,
    /// The signal controllers, ordered by ID.
    signals: BTreeMap<String, SignalController>,
}

/// A directed road segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// The edge ID.
    #[serde(default)]
    pub id: String,
    /// The centre line of the edge.
    pub shape: Vec<Point2d>,
    /// The width of each lane in m.
    #[serde(rename = "width", default = "default_lane_width")]
    pub lane_width: f64,
    /// The number of lanes.
    #[serde(rename = "lanes", default = "default_lane_count")]
    pub lane_count: u32,
}

/// A single traffic lane.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    /// The lane ID, unique within the network.
    pub id: String,
    /// The centre line of the lane.
    #[serde(default)]
    pub shape: Vec<Point2d>,
}

/// A traffic signal controller.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalController {
    /// The controlled links, ordered by state index.
    #[serde(default)]
    pub links: Vec<SignalLink>,
}

/// A movement through a junction governed by one character of a controller's state string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalLink {
    /// The index of this link's character within the state string.
    #[serde(rename = "linkIndex", alias = "index")]
    pub index: usize,
    /// The lane governed by this link.
    #[serde(alias = "via", default)]
    pub lane: Option<String>,
    /// The edge the movement starts on.
    #[serde(default)]
    pub from: Option<String>,
    /// The edge the movement ends on.
    #[serde(default)]
    pub to: Option<String>,
}

/// The network document served to clients at startup.
#[derive(Deserialize)]
struct NetworkData {
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    lanes: Vec<Lane>,
    #[serde(rename = "tls", default)]
    signals: BTreeMap<String, SignalController>,
}

fn default_lane_width() -> f64 {
    DEFAULT_LANE_WIDTH
}

fn default_lane_count() -> u32 {
    1
}

impl Network {
    /// Creates a network from its parts.
    ///
    /// Where lane IDs are duplicated, the first lane with that ID is used.
    pub fn new(
        edges: Vec<Edge>,
        lanes: Vec<Lane>,
        signals: BTreeMap<String, SignalController>,
    ) -> Self {
        let mut lane_index = HashMap::with_capacity(lanes.len());
        for (idx, lane) in lanes.iter().enumerate() {
            if lane_index.contains_key(&lane.id) {
                log::warn!("Duplicate lane ID {:?}", lane.id);
                continue;
            }
            lane_index.insert(lane.id.clone(), idx);
        }
        log::info!(
            "Loaded network with {} edges, {} lanes and {} signal controllers",
            edges.len(),
            lanes.len(),
            signals.len()
        );
        Self {
            edges,
            lanes,
            lane_index,
            signals,
        }
    }

    /// Decodes a network from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: NetworkData = serde_json::from_str(json)?;
        Ok(Self::new(data.edges, data.lanes, data.signals))
    }

    /// Decodes a network from a SUMO `.net.xml` document.
    pub fn from_sumo_xml(xml: &str) -> Result<Self> {
        sumo::parse(xml)
    }

    /// Loads a network from a file, which is read as SUMO XML
    /// if its extension is `xml` and as JSON otherwise.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("xml") => Self::from_sumo_xml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// The road segments.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Every lane in the network.
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    /// Gets the lane with the given ID.
    pub fn lane(&self, id: &str) -> Option<&Lane> {
        self.lane_index.get(id).map(|idx| &self.lanes[*idx])
    }

    /// Gets the signal controller with the given ID.
    pub fn signal(&self, id: &str) -> Option<&SignalController> {
        self.signals.get(id)
    }

    /// Iterates over the signal controllers in lexicographic order of their IDs.
    pub fn signals(&self) -> impl Iterator<Item = (&str, &SignalController)> {
        self.signals.iter().map(|(id, signal)| (id.as_str(), signal))
    }

    /// The bounding box of every edge's shape, or `None` if there are no shape points.
    pub fn bounds(&self) -> Option<Bounds2d> {
        Bounds2d::from_points(self.edges.iter().flat_map(|edge| edge.shape.iter().copied()))
    }
}

impl Edge {
    /// The total width of the road surface in m.
    pub fn total_width(&self) -> f64 {
        self.lane_width * self.lane_count as f64
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const NETWORK: &str = r#"{
        "edges": [
            {"id": "E0", "shape": [{"x": 0.0, "y": 0.0}, {"x": 100.0, "y": 0.0}], "width": 3.5, "lanes": 2},
            {"id": "E1", "shape": [{"x": 100.0, "y": 0.0}, {"x": 100.0, "y": -50.0}]}
        ],
        "lanes": [
            {"id": "E0_0", "shape": [{"x": 0.0, "y": -1.6}, {"x": 100.0, "y": -1.6}]},
            {"id": "E0_1", "shape": [{"x": 0.0, "y": 1.6}, {"x": 100.0, "y": 1.6}]}
        ],
        "tls": {
            "J1": {"links": [
                {"from": "E0", "to": "E1", "via": "E0_0", "linkIndex": 0},
                {"from": "E0", "to": "E1", "via": null, "linkIndex": 1}
            ]}
        }
    }"#;

    #[test]
    fn decode_json() {
        let network = Network::from_json(NETWORK).unwrap();
        assert_eq!(network.edges().len(), 2);
        assert_eq!(network.edges()[0].lane_count, 2);
        assert_eq!(network.edges()[0].total_width(), 7.0);
        assert_eq!(network.edges()[1].lane_width, DEFAULT_LANE_WIDTH);
        assert_eq!(network.edges()[1].lane_count, 1);

        let lane = network.lane("E0_1").unwrap();
        assert_eq!(lane.shape[0], Point2d::new(0.0, 1.6));
        assert!(network.lane("E9_0").is_none());

        let signal = network.signal("J1").unwrap();
        assert_eq!(signal.links[0].lane.as_deref(), Some("E0_0"));
        assert_eq!(signal.links[1].lane, None);
        assert_eq!(signal.links[1].index, 1);
    }

    #[test]
    fn network_bounds() {
        let network = Network::from_json(NETWORK).unwrap();
        let bounds = network.bounds().unwrap();
        assert_eq!(bounds.width(), 100.0);
        assert_eq!(bounds.height(), 50.0);
        assert!(Network::default().bounds().is_none());
    }

    #[test]
    fn signals_are_ordered() {
        let signals = ["b", "c", "a"]
            .into_iter()
            .map(|id| (id.to_string(), SignalController::default()))
            .collect();
        let network = Network::new(vec![], vec![], signals);
        let ids = network.signals().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn duplicate_lanes() {
        let lane = |id: &str, x: f64| Lane {
            id: id.into(),
            shape: vec![Point2d::new(x, 0.0)],
        };
        let network = Network::new(vec![], vec![lane("a", 1.0), lane("a", 2.0)], BTreeMap::new());
        assert_eq!(network.lane("a").unwrap().shape[0].x, 1.0);
    }
}
