use crate::schedule::RefreshSchedule;
use crate::theme::Theme;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 10.0,
            bottom: 10.0,
            left: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphConfig {
    pub node_radius: f64,
    pub edge_stroke_width: f64,
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_radius: 8.0,
            edge_stroke_width: 1.5,
            width: 800.0,
            height: 600.0,
            margin: Margin::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefreshConfig {
    pub timezone: String,
    pub hour: u32,
    pub minute: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            timezone: "Pacific/Auckland".to_string(),
            hour: 12,
            minute: 0,
        }
    }
}

impl RefreshConfig {
    pub fn schedule(&self) -> anyhow::Result<RefreshSchedule> {
        let timezone = chrono_tz::Tz::from_str(&self.timezone)
            .map_err(|_| anyhow::anyhow!("unknown timezone {:?}", self.timezone))?;
        Ok(RefreshSchedule::new(timezone, self.hour, self.minute))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/compass.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub graph: GraphConfig,
    pub refresh: RefreshConfig,
    pub data: DataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::compass_default(),
            graph: GraphConfig::default(),
            refresh: RefreshConfig::default(),
            data: DataConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    label_weight: Option<String>,
    node_fill: Option<String>,
    edge_stroke: Option<String>,
    label_color: Option<String>,
    background: Option<String>,
    border_color: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct MarginFile {
    top: Option<f64>,
    right: Option<f64>,
    bottom: Option<f64>,
    left: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GraphConfigFile {
    node_radius: Option<f64>,
    edge_stroke_width: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    margin: Option<MarginFile>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RefreshConfigFile {
    timezone: Option<String>,
    hour: Option<u32>,
    minute: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct DataConfigFile {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    graph: Option<GraphConfigFile>,
    refresh: Option<RefreshConfigFile>,
    data: Option<DataConfigFile>,
}

/// Load a config file over the built-in defaults. Every field is optional;
/// plain JSON is tried first, then json5 so hand-written files may carry
/// comments and trailing commas.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = match serde_json::from_str(&contents) {
        Ok(parsed) => parsed,
        Err(_) => json5::from_str(&contents)?,
    };

    if let Some(theme_name) = parsed.theme.as_deref() {
        if theme_name == "modern" {
            config.theme = Theme::modern();
        } else if theme_name == "compass" || theme_name == "default" {
            config.theme = Theme::compass_default();
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.label_weight {
            config.theme.label_weight = v;
        }
        if let Some(v) = vars.node_fill {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.edge_stroke {
            config.theme.edge_stroke = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.border_color {
            config.theme.border_color = v;
        }
    }

    if let Some(graph) = parsed.graph {
        if let Some(v) = graph.node_radius {
            // The radius sizes every label offset; a non-positive value would
            // fold labels back into the circle.
            if v > 0.0 {
                config.graph.node_radius = v;
            }
        }
        if let Some(v) = graph.edge_stroke_width {
            config.graph.edge_stroke_width = v;
        }
        if let Some(v) = graph.width {
            config.graph.width = v;
        }
        if let Some(v) = graph.height {
            config.graph.height = v;
        }
        if let Some(margin) = graph.margin {
            if let Some(v) = margin.top {
                config.graph.margin.top = v;
            }
            if let Some(v) = margin.right {
                config.graph.margin.right = v;
            }
            if let Some(v) = margin.bottom {
                config.graph.margin.bottom = v;
            }
            if let Some(v) = margin.left {
                config.graph.margin.left = v;
            }
        }
    }

    if let Some(refresh) = parsed.refresh {
        if let Some(v) = refresh.timezone {
            config.refresh.timezone = v;
        }
        if let Some(v) = refresh.hour {
            config.refresh.hour = v.min(23);
        }
        if let Some(v) = refresh.minute {
            config.refresh.minute = v.min(59);
        }
    }

    if let Some(data) = parsed.data {
        if let Some(v) = data.path {
            config.data.path = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn no_file_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.graph, GraphConfig::default());
        assert_eq!(config.refresh, RefreshConfig::default());
        assert_eq!(config.theme.node_fill, "#69b3a2");
    }

    #[test]
    fn file_fields_override_defaults() {
        let file = write_config(
            r#"{
                "theme": "modern",
                "graph": { "nodeRadius": 10, "margin": { "left": 40 } },
                "refresh": { "timezone": "UTC", "hour": 6 }
            }"#,
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.theme.node_fill, "#1f77b4");
        assert_eq!(config.graph.node_radius, 10.0);
        assert_eq!(config.graph.margin.left, 40.0);
        assert_eq!(config.graph.margin.top, 20.0);
        assert_eq!(config.refresh.timezone, "UTC");
        assert_eq!(config.refresh.hour, 6);
        assert_eq!(config.refresh.minute, 0);
    }

    #[test]
    fn json5_fallback_accepts_comments() {
        let file = write_config(
            "{\n  // hand-written config\n  graph: { width: 1024, height: 768 },\n}\n",
        );
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.graph.width, 1024.0);
        assert_eq!(config.graph.height, 768.0);
    }

    #[test]
    fn non_positive_radius_is_ignored() {
        let file = write_config(r#"{ "graph": { "nodeRadius": -3 } }"#);
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.graph.node_radius, 8.0);
    }

    #[test]
    fn refresh_config_resolves_named_timezone() {
        let schedule = RefreshConfig::default().schedule().unwrap();
        assert_eq!(schedule.timezone, chrono_tz::Pacific::Auckland);
    }

    #[test]
    fn unknown_timezone_is_an_error() {
        let refresh = RefreshConfig {
            timezone: "Atlantis/Citadel".to_string(),
            ..RefreshConfig::default()
        };
        assert!(refresh.schedule().is_err());
    }
}
