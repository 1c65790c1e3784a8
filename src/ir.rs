use chrono::{DateTime, Utc};

/// One node of a level graph. Positions are in data space; the scale mapper
/// converts them to canvas space at layout time.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub data: Option<serde_json::Value>,
}

/// Connection between two node ids. Endpoints may dangle (reference an id
/// missing from the level); downstream consumers skip such edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: Option<f64>,
}

/// One named, independently selectable node/edge diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelGraph {
    pub level: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl LevelGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// The ordered level sequence from one load, replaced wholesale on every
/// successful reload.
#[derive(Debug, Clone, Default)]
pub struct LevelSet {
    pub levels: Vec<LevelGraph>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl LevelSet {
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_named(&self, name: &str) -> Option<&LevelGraph> {
        self.levels.iter().find(|level| level.level == name)
    }
}
