use std::path::Path;

use anyhow::Result;
use carplot_core::{check_ratio, PlotError, Scalar};
use carplot_vehicles::{RenderOptions, Vehicle};
use carplot_viz::Scene;

use crate::series::{DriverCmd, TimeSeries};

/// A vehicle bound to its log. Each update looks up one row and pushes it in.
#[derive(Clone, Debug)]
pub struct VehiclePlot {
    vehicle: Vehicle,
    series: TimeSeries,
    driver_cmd: DriverCmd,
}

impl VehiclePlot {
    pub fn new(vehicle: Vehicle, series: TimeSeries) -> Self {
        Self { vehicle, series, driver_cmd: DriverCmd::default() }
    }

    pub fn from_csv(vehicle: Vehicle, path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(vehicle, TimeSeries::from_path(path)?))
    }

    pub fn vehicle(&self) -> &Vehicle { &self.vehicle }
    pub fn vehicle_mut(&mut self) -> &mut Vehicle { &mut self.vehicle }
    pub fn series(&self) -> &TimeSeries { &self.series }
    pub fn driver_cmd(&self) -> DriverCmd { self.driver_cmd }

    pub fn update_vehicle_by_row(&mut self, row: usize) -> Result<()> {
        let snap = self.series.state_at_row(row)?;
        snap.apply(&mut self.vehicle)?;
        tracing::trace!(row, heading = snap.heading, "vehicle updated");
        Ok(())
    }

    /// Returns the row that was applied.
    pub fn update_vehicle_by_time(&mut self, time: Scalar) -> Result<usize> {
        let row = self.series.nearest_row(time);
        self.update_vehicle_by_row(row)?;
        Ok(row)
    }

    pub fn update_driver_cmd(&mut self, steer: Scalar, accel: Scalar, decel: Scalar) {
        self.driver_cmd = DriverCmd { steer, accel, decel };
    }

    pub fn update_driver_cmd_by_row(&mut self, row: usize) -> Result<()> {
        let cmd = self.series.state_at_row(row)?.driver_cmd;
        self.update_driver_cmd(cmd.steer, cmd.accel, cmd.decel);
        Ok(())
    }

    pub fn update_driver_cmd_by_time(&mut self, time: Scalar) -> Result<()> {
        self.update_driver_cmd_by_row(self.series.nearest_row(time))
    }

    /// Applies the row nearest `time` (state and driver command) and renders.
    pub fn frame_at(&mut self, time: Scalar, opts: &RenderOptions) -> Result<Scene> {
        let row = self.update_vehicle_by_time(time)?;
        self.update_driver_cmd_by_row(row)?;
        Ok(self.vehicle.render(opts)?)
    }
}

/// Evenly spaced frame times from `start` to `end` inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameSchedule {
    start: Scalar,
    end: Scalar,
    step: Scalar,
    next: usize,
}

impl FrameSchedule {
    pub fn new(start: Scalar, end: Scalar, step: Scalar) -> Result<Self, PlotError> {
        let step = check_ratio("frame step", step)?;
        if !start.is_finite() {
            return Err(PlotError::InvalidScale { what: "frame start", value: start });
        }
        if !end.is_finite() {
            return Err(PlotError::InvalidScale { what: "frame end", value: end });
        }
        Ok(Self { start, end, step, next: 0 })
    }

    /// Frames covering the whole log.
    pub fn over(series: &TimeSeries, step: Scalar) -> Result<Self, PlotError> {
        let (start, end) = series.time_range();
        Self::new(start, end, step)
    }
}

impl Iterator for FrameSchedule {
    type Item = Scalar;

    fn next(&mut self) -> Option<Scalar> {
        // From the index, not accumulated.
        let t = self.start + self.next as Scalar * self.step;
        if t > self.end + self.step * 1e-3 {
            return None;
        }
        self.next += 1;
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn schedule_includes_end() {
        let times: Vec<Scalar> = FrameSchedule::new(0.0, 1.0, 0.1).unwrap().collect();
        assert_eq!(times.len(), 11);
        assert_relative_eq!(times[10], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn schedule_rejects_non_positive_step() {
        assert!(FrameSchedule::new(0.0, 1.0, 0.0).is_err());
        assert!(FrameSchedule::new(0.0, 1.0, -0.1).is_err());
    }

    #[test]
    fn schedule_rejects_non_finite_bounds() {
        assert!(matches!(
            FrameSchedule::new(Scalar::NAN, 1.0, 0.1),
            Err(PlotError::InvalidScale { what: "frame start", .. })
        ));
        assert!(matches!(
            FrameSchedule::new(0.0, Scalar::INFINITY, 0.1),
            Err(PlotError::InvalidScale { what: "frame end", .. })
        ));
        assert!(FrameSchedule::new(Scalar::NEG_INFINITY, 1.0, 0.1).is_err());
    }

    #[test]
    fn start_after_end_is_empty() {
        assert_eq!(FrameSchedule::new(2.0, 1.0, 0.5).unwrap().count(), 0);
    }
}
