use crate::config::{Config, load_config};
use crate::ir::{LevelGraph, LevelSet};
use crate::layout::{Extents, compute_layout};
use crate::loader::load_levels;
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::schedule::{RefreshTimer, Tick, format_countdown};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "cmpr", version, about = "Level-graph renderer for compass data files")]
pub struct Args {
    /// Input level-set JSON file. Defaults to the configured data path.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (camelCase keys; json5 accepted)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Level to render, by name. Defaults to the first level.
    #[arg(short = 'l', long = "level")]
    pub level: Option<String>,

    /// Print the level names in the input and exit
    #[arg(long = "listLevels")]
    pub list_levels: bool,

    /// Canvas width override
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height override
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Keep running: reload the input and re-render at each scheduled
    /// refresh instant, logging the countdown in between
    #[arg(long = "watch")]
    pub watch: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Log debug detail
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    let level = if args.quiet {
        tracing::Level::ERROR
    } else if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.graph.width = width;
    }
    if let Some(height) = args.height {
        config.graph.height = height;
    }

    let input = args
        .input
        .clone()
        .unwrap_or_else(|| config.data.path.clone());

    let set = load_levels(&input)?;
    if args.list_levels {
        for level in &set.levels {
            println!("{}", level.level);
        }
        return Ok(());
    }

    if args.watch && args.output.is_none() {
        return Err(anyhow::anyhow!("--watch requires an output path"));
    }

    render_set(&set, &args, &config)?;

    if args.watch {
        watch_loop(&input, &args, &config, set)?;
    }

    Ok(())
}

/// Pick the level to draw: by name when requested, else the first one.
fn select_level<'a>(set: &'a LevelSet, name: Option<&str>) -> Result<&'a LevelGraph> {
    match name {
        Some(name) => set.level_named(name).ok_or_else(|| {
            let available: Vec<&str> = set.levels.iter().map(|l| l.level.as_str()).collect();
            anyhow::anyhow!("no level named {:?} (available: {})", name, available.join(", "))
        }),
        None => set
            .levels
            .first()
            .ok_or_else(|| anyhow::anyhow!("input contains no levels")),
    }
}

fn render_set(set: &LevelSet, args: &Args, config: &Config) -> Result<()> {
    let level = select_level(set, args.level.as_deref())?;
    let extents = Extents::of_levels(&set.levels);
    let layout = compute_layout(level, extents, &config.graph);
    let svg = render_svg(&layout, &config.theme, &config.graph);

    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            #[cfg(feature = "png")]
            {
                write_output_png(&svg, &output, &config.graph)?;
            }
            #[cfg(not(feature = "png"))]
            {
                let _ = output;
                return Err(anyhow::anyhow!(
                    "PNG output requires the 'png' feature"
                ));
            }
        }
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

/// Re-render at every scheduled refresh, keeping the previous set when a
/// reload fails. Runs until the process is stopped.
fn watch_loop(input: &Path, args: &Args, config: &Config, mut set: LevelSet) -> Result<()> {
    let schedule = config.refresh.schedule()?;
    let (sender, ticks) = mpsc::channel();
    let _timer = RefreshTimer::start(schedule, move |tick| {
        let _ = sender.send(tick);
    });

    info!(
        levels = set.levels.len(),
        timezone = %schedule.timezone,
        "watching {}; next refresh at {:02}:{:02}",
        input.display(),
        schedule.hour,
        schedule.minute
    );

    let mut last_logged_minutes = i64::MIN;
    while let Ok(tick) = ticks.recv() {
        match tick {
            Tick::Countdown(remaining) => {
                let minutes = remaining.num_minutes();
                if minutes != last_logged_minutes {
                    info!("next data refresh in {}", format_countdown(remaining));
                    last_logged_minutes = minutes;
                }
            }
            Tick::Refresh => {
                match load_levels(input) {
                    Ok(reloaded) => {
                        set = reloaded;
                        render_set(&set, args, config)?;
                        info!(levels = set.levels.len(), "refreshed and re-rendered");
                    }
                    Err(err) => {
                        warn!("reload failed, keeping previous data: {err}");
                    }
                }
                last_logged_minutes = i64::MIN;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_with(names: &[&str]) -> LevelSet {
        LevelSet {
            levels: names
                .iter()
                .map(|name| LevelGraph {
                    level: name.to_string(),
                    nodes: Vec::new(),
                    edges: Vec::new(),
                })
                .collect(),
            last_modified: None,
        }
    }

    #[test]
    fn selects_the_first_level_by_default() {
        let set = set_with(&["alpha", "beta"]);
        assert_eq!(select_level(&set, None).unwrap().level, "alpha");
    }

    #[test]
    fn selects_a_level_by_name() {
        let set = set_with(&["alpha", "beta"]);
        assert_eq!(select_level(&set, Some("beta")).unwrap().level, "beta");
    }

    #[test]
    fn unknown_level_names_the_alternatives() {
        let set = set_with(&["alpha", "beta"]);
        let err = select_level(&set, Some("gamma")).unwrap_err();
        assert!(err.to_string().contains("alpha, beta"));
    }

    #[test]
    fn empty_set_is_an_error() {
        let set = set_with(&[]);
        assert!(select_level(&set, None).is_err());
    }
}
