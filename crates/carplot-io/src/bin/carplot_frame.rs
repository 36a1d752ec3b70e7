//! Renders one frame of a logged run and writes the scene as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use carplot_io::{log_filter, PlotConfig, VehiclePlot};
use tracing::info;

#[derive(Parser)]
#[command(name = "carplot-frame")]
#[command(about = "Render one vehicle diagram frame from a CSV log as JSON primitives")]
#[command(version)]
struct Cli {
    /// CSV log with psi, xdot, ydot, Fx_*, Fy_*, Alpha_*, Steer, Accel, Decel, time
    #[arg(short, long)]
    csv: PathBuf,

    /// Time to render; the nearest logged row is used
    #[arg(short, long, conflicts_with = "row")]
    time: Option<f32>,

    /// Row index to render
    #[arg(short, long)]
    row: Option<usize>,

    /// JSON plot config (layout, geometry, render options)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_env_filter(log_filter(cli.verbose)).with_writer(std::io::stderr).init();

    let cfg = PlotConfig::load(cli.config.as_deref())?;
    let mut plot = VehiclePlot::from_csv(cfg.build_vehicle(), &cli.csv)?;

    let scene = match (cli.row, cli.time) {
        (Some(row), _) => {
            plot.update_vehicle_by_row(row)?;
            plot.update_driver_cmd_by_row(row)?;
            plot.vehicle().render(&cfg.render)?
        }
        (None, time) => {
            let t = time.unwrap_or_else(|| plot.series().time_range().0);
            plot.frame_at(t, &cfg.render)?
        }
    };

    let json = if cli.pretty { serde_json::to_string_pretty(&scene)? } else { serde_json::to_string(&scene)? };
    let digest: String = scene.digest().iter().take(8).map(|b| format!("{b:02x}")).collect();
    info!(items = scene.len(), digest = %digest, "frame rendered");

    match cli.out {
        Some(path) => std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
