pub(crate) mod label_placement;
mod scale;
pub(crate) mod types;

pub use label_placement::{LabelOffset, place};
pub use scale::{Extents, ScaleMapper};
pub use types::*;

use crate::config::GraphConfig;
use crate::ir::LevelGraph;

/// Map one level into canvas space and place every node label.
///
/// `extents` should cover the whole level set so the mapping stays stable
/// across level switches. Edges whose endpoints do not both resolve are left
/// out of the layout entirely; they are also invisible to label placement.
pub fn compute_layout(level: &LevelGraph, extents: Extents, config: &GraphConfig) -> Layout {
    let x_scale = ScaleMapper::fit(
        extents.x_min,
        extents.x_max,
        config.margin.left,
        config.width - config.margin.right,
    );
    let y_scale = ScaleMapper::fit(
        extents.y_min,
        extents.y_max,
        config.margin.top,
        config.height - config.margin.bottom,
    );

    let nodes = level
        .nodes
        .iter()
        .map(|node| NodeLayout {
            id: node.id.clone(),
            x: x_scale.map(node.x),
            y: y_scale.map(node.y),
            label_offset: label_placement::place(
                node,
                &level.nodes,
                &level.edges,
                config.node_radius,
            ),
        })
        .collect();

    let mut edges = Vec::new();
    for edge in &level.edges {
        let (Some(source), Some(target)) = (level.node(&edge.source), level.node(&edge.target))
        else {
            continue;
        };
        edges.push(EdgeLayout {
            from: edge.source.clone(),
            to: edge.target.clone(),
            x1: x_scale.map(source.x),
            y1: y_scale.map(source.y),
            x2: x_scale.map(target.x),
            y2: y_scale.map(target.y),
        });
    }

    Layout {
        level: level.level.clone(),
        nodes,
        edges,
        width: config.width,
        height: config.height,
    }
}
