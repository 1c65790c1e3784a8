// Linear min-max mapping from data space to canvas space.

use crate::ir::LevelGraph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleMapper {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleMapper {
    pub fn fit(domain_min: f64, domain_max: f64, range_min: f64, range_max: f64) -> Self {
        Self {
            domain: (domain_min, domain_max),
            range: (range_min, range_max),
        }
    }

    /// Map a data-space value into the range. A degenerate domain collapses
    /// every input onto the range midpoint instead of dividing by zero.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span.abs() < f64::EPSILON {
            return (r0 + r1) * 0.5;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Coordinate bounds across every level of a set. Derived once per load so
/// switching levels never re-scales the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Extents {
    fn default() -> Self {
        Self {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        }
    }
}

impl Extents {
    pub fn of_levels(levels: &[LevelGraph]) -> Self {
        let mut extents: Option<Extents> = None;
        for level in levels {
            for node in &level.nodes {
                let current = extents.get_or_insert(Extents {
                    x_min: node.x,
                    x_max: node.x,
                    y_min: node.y,
                    y_max: node.y,
                });
                current.x_min = current.x_min.min(node.x);
                current.x_max = current.x_max.max(node.x);
                current.y_min = current.y_min.min(node.y);
                current.y_max = current.y_max.max(node.y);
            }
        }
        extents.unwrap_or_default()
    }
}
