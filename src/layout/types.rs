use super::label_placement::LabelOffset;

/// A node mapped into canvas space. The circle is drawn at (x, y); only the
/// text element is translated by `label_offset`.
#[derive(Debug, Clone)]
pub struct NodeLayout {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub label_offset: LabelOffset,
}

/// An edge whose endpoints both resolved, with mapped segment coordinates.
#[derive(Debug, Clone)]
pub struct EdgeLayout {
    pub from: String,
    pub to: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub level: String,
    pub nodes: Vec<NodeLayout>,
    pub edges: Vec<EdgeLayout>,
    pub width: f64,
    pub height: f64,
}
