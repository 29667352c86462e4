//! Command-line arguments and the optional JSON config file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use wf_model::osm::LoadOptions;
use wf_search::{ExpansionPolicy, SearchConfig, TieBreak};

#[derive(Parser, Debug)]
#[command(
    name = "wayfinder",
    version,
    about = "A* route planning over OpenStreetMap road graphs"
)]
pub struct Cli {
    /// Map file: OSM XML, an OSM PBF extract (`.pbf`), or a nodes CSV when --roads is given
    #[arg(short = 'f', long = "file", default_value = "map.osm")]
    pub file: PathBuf,

    /// Roads CSV (`from,to`); loads the map from CSV instead of OSM
    #[arg(long, requires = "scale")]
    pub roads: Option<PathBuf>,

    /// Metres per normalized unit, for CSV maps
    #[arg(long, requires = "roads")]
    pub scale: Option<f32>,

    /// Start position as percentages of the map extent (0–100 each)
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub start: Option<Vec<f32>>,

    /// End position as percentages of the map extent (0–100 each)
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    pub end: Option<Vec<f32>>,

    /// JSON file with `search` and `map` sections
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Which node wins when several share the lowest f
    #[arg(long, value_enum)]
    pub tie_break: Option<TieBreakArg>,

    /// Re-queue nodes when a cheaper predecessor is found (optimal A*)
    #[arg(long)]
    pub relaxing: bool,

    /// Give up after expanding this many nodes
    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Route over footways, paths and steps as well
    #[arg(long)]
    pub include_footways: bool,

    /// Write the found path as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    Last,
    First,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::Last  => TieBreak::LastInserted,
            TieBreakArg::First => TieBreak::FirstInserted,
        }
    }
}

/// Contents of `--config`.  Missing sections fall back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub search: SearchConfig,
    pub map:    LoadOptions,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides.
    pub fn resolve_config(&self) -> Result<FileConfig> {
        let mut config = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        if let Some(tb) = self.tie_break {
            config.search.tie_break = tb.into();
        }
        if self.relaxing {
            config.search.expansion = ExpansionPolicy::Relaxing;
        }
        if self.max_expansions.is_some() {
            config.search.max_expansions = self.max_expansions;
        }
        if self.include_footways {
            config.map.include_footways = true;
        }
    }

    /// Default `tracing` filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
