//! Renders a time range of a logged run into numbered SVG files.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use carplot_io::{log_filter, FrameSchedule, PlotConfig, SvgSettings, VehiclePlot};
use carplot_viz::{Cam, SvgSurface};
use glam::Vec2;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "carplot-svg")]
#[command(about = "Render vehicle diagrams for a time range of a CSV log as SVG frames")]
#[command(version)]
struct Cli {
    /// CSV log to animate
    #[arg(short, long)]
    csv: PathBuf,

    /// Output directory for frame_NNNNN.svg
    #[arg(short, long, default_value = "frames")]
    out_dir: PathBuf,

    /// First frame time (defaults to the first logged time)
    #[arg(long)]
    start: Option<f32>,

    /// Last frame time (defaults to the last logged time)
    #[arg(long)]
    end: Option<f32>,

    /// Seconds between frames
    #[arg(long, default_value = "0.1")]
    step: f32,

    /// JSON plot config (layout, geometry, render options)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_env_filter(log_filter(cli.verbose)).init();

    let cfg = PlotConfig::load(cli.config.as_deref())?;
    let svg = SvgSettings::from_env();
    let cam = Cam { center: Vec2::ZERO, ppm: svg.ppm };
    let mut plot = VehiclePlot::from_csv(cfg.build_vehicle(), &cli.csv)?;

    let (first, last) = plot.series().time_range();
    let schedule = FrameSchedule::new(cli.start.unwrap_or(first), cli.end.unwrap_or(last), cli.step)?;

    std::fs::create_dir_all(&cli.out_dir).with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let mut written = 0usize;
    for (i, t) in schedule.enumerate() {
        let scene = plot.frame_at(t, &cfg.render)?;
        let doc = SvgSurface::render(&scene, cam, svg.width, svg.height);
        let path = cli.out_dir.join(format!("frame_{i:05}.svg"));
        std::fs::write(&path, doc).with_context(|| format!("writing {}", path.display()))?;
        debug!(frame = i, time = t, "frame written");
        written += 1;
    }
    info!(frames = written, dir = %cli.out_dir.display(), "done");
    Ok(())
}
