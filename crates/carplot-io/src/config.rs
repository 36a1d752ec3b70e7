use std::path::Path;

use anyhow::{Context, Result};
use carplot_core::Scalar;
use carplot_vehicles::{RenderOptions, Vehicle, VehicleGeometry};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    SingleTrack,
    #[default]
    DualTrack,
}

/// Contents of the `--config` JSON file. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub layout: LayoutKind,
    pub geometry: VehicleGeometry,
    pub render: RenderOptions,
}

impl PlotConfig {
    /// Reads `path` if given; a missing file falls back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else { return Ok(Self::default()) };
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let cfg: Self = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        cfg.render.validate()?;
        tracing::info!(path = %path.display(), layout = ?cfg.layout, "config loaded");
        Ok(cfg)
    }

    pub fn build_vehicle(&self) -> Vehicle {
        match self.layout {
            LayoutKind::SingleTrack => Vehicle::single_track(self.geometry),
            LayoutKind::DualTrack => Vehicle::dual_track(self.geometry),
        }
    }
}

pub fn env_u32(key: &str, default: u32) -> u32 {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

pub fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key).ok().and_then(|s| s.parse().ok()).unwrap_or(default)
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// `RUST_LOG` when set and valid, otherwise `debug`/`info` depending on `verbose`.
pub fn log_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// SVG image size and scale, overridable with `CARPLOT_WIDTH`,
/// `CARPLOT_HEIGHT` and `CARPLOT_PPM`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SvgSettings {
    pub width: u32,
    pub height: u32,
    /// Pixels per metre.
    pub ppm: Scalar,
}

impl SvgSettings {
    pub fn from_env() -> Self {
        Self {
            width: env_u32("CARPLOT_WIDTH", 800),
            height: env_u32("CARPLOT_HEIGHT", 600),
            ppm: env_f32("CARPLOT_PPM", 80.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carplot_core::AxisConvention;

    #[test]
    fn sections_are_optional() {
        let cfg: PlotConfig = serde_json::from_str(r#"{"layout": "single_track", "render": {"convention": "z_up"}}"#).unwrap();
        assert_eq!(cfg.layout, LayoutKind::SingleTrack);
        assert_eq!(cfg.geometry, VehicleGeometry::default());
        assert_eq!(cfg.render.convention, AxisConvention::ZUp);
        assert_eq!(cfg.build_vehicle().tire_count(), 2);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = PlotConfig::load(Some(Path::new("/definitely/not/here.json"))).unwrap();
        assert_eq!(cfg, PlotConfig::default());
        assert_eq!(cfg.build_vehicle().tire_count(), 4);
    }

    #[test]
    fn verbose_lowers_default_level() {
        assert_eq!(default_directive(true), "debug");
        assert_eq!(default_directive(false), "info");
    }

    #[test]
    fn env_falls_back_on_garbage() {
        assert_eq!(env_u32("CARPLOT_TEST_UNSET_VAR", 7), 7);
        assert_eq!(env_f32("CARPLOT_TEST_UNSET_VAR", 1.5), 1.5);
    }
}
