//! wayfinder: plan a route across an OpenStreetMap extract.
//!
//! ```text
//! wayfinder -f map.osm --start 10 10 --end 90 90
//! wayfinder -f map.osm.pbf --start 10 10 --end 90 90
//! wayfinder -f nodes.csv --roads roads.csv --scale 850 --relaxing --export path.json
//! ```
//!
//! Positions are percentages of the map extent.  Missing `--start` /
//! `--end` are prompted for on stdin.

mod args;
mod export;

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wf_core::MapPercent;
use wf_model::{RouteModel, load_from_csv_paths, osm::load_from_path};
use wf_search::{RoutePlanner, SearchStatus};

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.resolve_config()?;

    // Validate input before touching the map, so a typo fails fast.
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    let start = resolve_point(cli.start.as_deref(), "starting point", "0 0", &mut input, &mut out)?;
    let end = resolve_point(cli.end.as_deref(), "end point", "90 90", &mut input, &mut out)?;

    println!("Building model for: {start}  {end}");
    let t0 = Instant::now();
    let mut model = load_model(&cli, &config.map)?;
    info!(
        nodes = model.node_count(),
        roads = model.edge_count(),
        metric_scale = model.metric_scale(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "model ready"
    );

    let mut planner = RoutePlanner::new(&mut model, start, end, config.search)?;
    let t1 = Instant::now();
    let status = planner.search();
    let distance = planner.distance();
    let expanded = planner.expanded();
    info!(
        expanded,
        elapsed_ms = t1.elapsed().as_millis() as u64,
        "search complete"
    );
    drop(planner);

    println!("{}", summary(status, distance, expanded));

    if let Some(path) = &cli.export {
        export::write_path(path, model.path(), distance)?;
        println!("Wrote {} ({} nodes)", path.display(), model.path().len());
    }

    Ok(())
}

fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_model(cli: &Cli, options: &wf_model::osm::LoadOptions) -> Result<RouteModel> {
    println!("Reading map data from: {}", cli.file.display());
    let model = match (&cli.roads, cli.scale) {
        (Some(roads), Some(scale)) => load_from_csv_paths(&cli.file, roads, scale),
        _ => load_from_path(&cli.file, options),
    };
    model.with_context(|| format!("failed to read {}", cli.file.display()))
}

/// One-line result for the terminal.
fn summary(status: SearchStatus, distance: f32, expanded: usize) -> String {
    match status {
        SearchStatus::Found => format!("Distance: {distance} meters."),
        SearchStatus::NoRoute => "Could not find a route!".to_string(),
        SearchStatus::LimitReached => {
            format!("Gave up after expanding {expanded} nodes without reaching the end point.")
        }
    }
}

/// Use the command-line pair if given, otherwise prompt for one.
fn resolve_point<R: BufRead, W: Write>(
    given: Option<&[f32]>,
    label: &str,
    example: &str,
    input: &mut R,
    out: &mut W,
) -> Result<MapPercent> {
    let point = match given {
        Some([x, y]) => MapPercent::new(*x, *y),
        Some(other) => bail!("the {label} needs exactly two values, got {}", other.len()),
        None => {
            writeln!(out, "Please enter the {label} x and y")?;
            writeln!(out, "Valid values are from 0 to 100")?;
            writeln!(out, "Example: {example}")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                bail!("no {label} given");
            }
            line.trim().parse::<MapPercent>()
        }
    };
    point.with_context(|| format!("the values for the {label} must be between 0 and 100"))
}
