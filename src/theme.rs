use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub label_weight: String,
    pub node_fill: String,
    pub edge_stroke: String,
    pub label_color: String,
    pub background: String,
    pub border_color: String,
}

impl Theme {
    pub fn compass_default() -> Self {
        Self {
            font_family: "verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            label_weight: "normal".to_string(),
            node_fill: "#69b3a2".to_string(),
            edge_stroke: "#999".to_string(),
            label_color: "black".to_string(),
            background: "#FFFFFF".to_string(),
            border_color: "#000000".to_string(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 12.0,
            label_weight: "bold".to_string(),
            node_fill: "#1f77b4".to_string(),
            edge_stroke: "#999".to_string(),
            label_color: "#666".to_string(),
            background: "#FFFFFF".to_string(),
            border_color: "#000000".to_string(),
        }
    }
}
