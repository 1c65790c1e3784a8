#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod loader;
pub mod render;
pub mod schedule;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, DataConfig, GraphConfig, Margin, RefreshConfig, load_config};
pub use ir::{Edge, LevelGraph, LevelSet, Node};
pub use layout::{Extents, LabelOffset, Layout, ScaleMapper, compute_layout, place};
pub use loader::{LoadError, load_levels};
pub use render::{render_svg, write_output_svg};
pub use schedule::{RefreshSchedule, RefreshTimer, Tick, format_countdown};
pub use theme::Theme;
