// Level-set loading. The document shape is strict (a top-level array of
// levels) but individual entries are decoded leniently: coordinates given as
// strings are coerced, unusable scalars collapse to 0, and entries without an
// identifier are dropped rather than failing the whole load.

use crate::ir::{Edge, LevelGraph, LevelSet, Node};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: expected a top-level array of levels")]
    Shape { path: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
    Other(serde_json::Value),
}

impl NumberOrString {
    /// Numeric coercion: strings are parsed, anything unusable (including
    /// NaN/infinite values) becomes 0.0 so one bad entry cannot poison the
    /// scale domain.
    fn as_f64(&self) -> f64 {
        match self {
            NumberOrString::Number(value) if value.is_finite() => *value,
            NumberOrString::Number(_) => 0.0,
            NumberOrString::String(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite())
                .unwrap_or(0.0),
            NumberOrString::Other(_) => 0.0,
        }
    }

    /// Identifier coercion: numeric ids are formatted, blank strings and
    /// structured values are rejected.
    fn as_id(&self) -> Option<String> {
        match self {
            NumberOrString::Number(value) => Some(format!("{value}")),
            NumberOrString::String(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            NumberOrString::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawNode {
    #[serde(default)]
    id: Option<NumberOrString>,
    #[serde(default)]
    x: Option<NumberOrString>,
    #[serde(default)]
    y: Option<NumberOrString>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    #[serde(default)]
    source: Option<NumberOrString>,
    #[serde(default)]
    target: Option<NumberOrString>,
    #[serde(default)]
    weight: Option<NumberOrString>,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

/// Load a level-set document. A successful load replaces the previous set
/// wholesale; on any error the caller keeps whatever it already had.
pub fn load_levels(path: &Path) -> Result<LevelSet, LoadError> {
    let display_path = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: display_path.clone(),
        source,
    })?;

    let raw: Vec<RawLevel> = match serde_json::from_str(&contents) {
        Ok(raw) => raw,
        Err(source) => {
            let not_an_array = serde_json::from_str::<serde_json::Value>(&contents)
                .map(|value| !value.is_array())
                .unwrap_or(false);
            if not_an_array {
                return Err(LoadError::Shape { path: display_path });
            }
            return Err(LoadError::Parse {
                path: display_path,
                source,
            });
        }
    };

    let last_modified = std::fs::metadata(path)
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(DateTime::<Utc>::from);

    let levels = raw
        .into_iter()
        .enumerate()
        .map(|(index, level)| convert_level(index, level))
        .collect();

    Ok(LevelSet {
        levels,
        last_modified,
    })
}

fn convert_level(index: usize, raw: RawLevel) -> LevelGraph {
    let level = raw
        .level
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Graph {}", index + 1));

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    for raw_node in raw.nodes {
        let Some(id) = raw_node.id.as_ref().and_then(NumberOrString::as_id) else {
            debug!(level = %level, "dropping node without id");
            continue;
        };
        if !seen.insert(id.clone()) {
            debug!(level = %level, node = %id, "dropping duplicate node id");
            continue;
        }
        nodes.push(Node {
            id,
            x: raw_node.x.as_ref().map(NumberOrString::as_f64).unwrap_or(0.0),
            y: raw_node.y.as_ref().map(NumberOrString::as_f64).unwrap_or(0.0),
            data: raw_node.data,
        });
    }

    let mut edges = Vec::new();
    for raw_edge in raw.edges {
        let source = raw_edge.source.as_ref().and_then(NumberOrString::as_id);
        let target = raw_edge.target.as_ref().and_then(NumberOrString::as_id);
        let (Some(source), Some(target)) = (source, target) else {
            debug!(level = %level, "dropping edge without endpoints");
            continue;
        };
        edges.push(Edge {
            source,
            target,
            weight: raw_edge.weight.as_ref().map(NumberOrString::as_f64),
        });
    }

    LevelGraph {
        level,
        nodes,
        edges,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_levels(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write levels");
        file
    }

    #[test]
    fn loads_a_well_formed_document() {
        let file = write_levels(
            r#"[
                {
                    "level": "Base Camp",
                    "nodes": [
                        { "id": "a", "x": 1, "y": 2 },
                        { "id": "b", "x": 3, "y": 4, "data": { "kind": "hut" } }
                    ],
                    "edges": [ { "source": "a", "target": "b", "weight": 2.5 } ]
                }
            ]"#,
        );
        let set = load_levels(file.path()).unwrap();
        assert_eq!(set.levels.len(), 1);
        assert!(set.last_modified.is_some());

        let level = &set.levels[0];
        assert_eq!(level.level, "Base Camp");
        assert_eq!(level.nodes.len(), 2);
        assert_eq!(level.edges[0].weight, Some(2.5));
        assert!(level.nodes[1].data.is_some());
    }

    #[test]
    fn coerces_string_coordinates() {
        let file = write_levels(
            r#"[{ "level": "l", "nodes": [
                { "id": "a", "x": "3.5", "y": " 4 " },
                { "id": "b", "x": "not a number", "y": null }
            ], "edges": [] }]"#,
        );
        let set = load_levels(file.path()).unwrap();
        let level = &set.levels[0];
        assert_eq!((level.nodes[0].x, level.nodes[0].y), (3.5, 4.0));
        assert_eq!((level.nodes[1].x, level.nodes[1].y), (0.0, 0.0));
    }

    #[test]
    fn drops_entries_without_identifiers() {
        let file = write_levels(
            r#"[{ "level": "l",
                "nodes": [ { "x": 1, "y": 1 }, { "id": "a" }, { "id": "  " } ],
                "edges": [ { "source": "a" }, { "target": "a" }, { "source": "a", "target": "a" } ]
            }]"#,
        );
        let set = load_levels(file.path()).unwrap();
        let level = &set.levels[0];
        assert_eq!(level.nodes.len(), 1);
        assert_eq!(level.nodes[0].id, "a");
        assert_eq!((level.nodes[0].x, level.nodes[0].y), (0.0, 0.0));
        assert_eq!(level.edges.len(), 1);
    }

    #[test]
    fn first_duplicate_node_id_wins() {
        let file = write_levels(
            r#"[{ "level": "l", "nodes": [
                { "id": "a", "x": 1, "y": 1 },
                { "id": "a", "x": 9, "y": 9 }
            ], "edges": [] }]"#,
        );
        let set = load_levels(file.path()).unwrap();
        assert_eq!(set.levels[0].nodes.len(), 1);
        assert_eq!(set.levels[0].nodes[0].x, 1.0);
    }

    #[test]
    fn numeric_ids_are_stringified() {
        let file = write_levels(
            r#"[{ "level": "l",
                "nodes": [ { "id": 1, "x": 0, "y": 0 }, { "id": 2, "x": 1, "y": 1 } ],
                "edges": [ { "source": 1, "target": 2 } ]
            }]"#,
        );
        let set = load_levels(file.path()).unwrap();
        let level = &set.levels[0];
        assert_eq!(level.nodes[0].id, "1");
        assert_eq!(level.edges[0].source, "1");
        assert_eq!(level.edges[0].target, "2");
    }

    #[test]
    fn missing_level_name_gets_a_positional_fallback() {
        let file = write_levels(r#"[ { "nodes": [], "edges": [] }, { "level": "" } ]"#);
        let set = load_levels(file.path()).unwrap();
        assert_eq!(set.levels[0].level, "Graph 1");
        assert_eq!(set.levels[1].level, "Graph 2");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_levels(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn non_array_document_is_a_shape_error() {
        let file = write_levels(r#"{ "level": "not wrapped in an array" }"#);
        let err = load_levels(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Shape { .. }));
    }

    #[test]
    fn unparseable_document_is_a_parse_error() {
        let file = write_levels("[ { level: oops ");
        let err = load_levels(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }
}
