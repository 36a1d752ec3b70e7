use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use carplot_core::{PlotError, Scalar, Vec2};
use carplot_vehicles::{TireForce, TireLayout, Vehicle};
use serde::{Deserialize, Serialize};

/// One logged sample, keyed by the CSV header names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    pub psi: Scalar,
    pub xdot: Scalar,
    pub ydot: Scalar,
    #[serde(rename = "Fx_0")] pub fx_0: Scalar,
    #[serde(rename = "Fx_1")] pub fx_1: Scalar,
    #[serde(rename = "Fx_2")] pub fx_2: Scalar,
    #[serde(rename = "Fx_3")] pub fx_3: Scalar,
    #[serde(rename = "Fy_0")] pub fy_0: Scalar,
    #[serde(rename = "Fy_1")] pub fy_1: Scalar,
    #[serde(rename = "Fy_2")] pub fy_2: Scalar,
    #[serde(rename = "Fy_3")] pub fy_3: Scalar,
    #[serde(rename = "Alpha_0")] pub alpha_0: Scalar,
    #[serde(rename = "Alpha_1")] pub alpha_1: Scalar,
    #[serde(rename = "Alpha_2")] pub alpha_2: Scalar,
    #[serde(rename = "Alpha_3")] pub alpha_3: Scalar,
    #[serde(rename = "Steer")] pub steer: Scalar,
    #[serde(rename = "Accel")] pub accel: Scalar,
    #[serde(rename = "Decel")] pub decel: Scalar,
    pub time: Scalar,
    /// Yaw rate, when the log carries it.
    #[serde(default)]
    pub r: Option<Scalar>,
}

/// Handwheel angle (rad) and pedal positions in `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverCmd {
    pub steer: Scalar,
    pub accel: Scalar,
    pub decel: Scalar,
}

/// Vehicle state for one row. Per-tire arrays are FL, FR, RL, RR.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    pub heading: Scalar,
    pub vel_body_frame: Vec2,
    pub yaw_rate: Option<Scalar>,
    pub tire_forces: [TireForce; 4],
    pub slip_angles: [Scalar; 4],
    pub driver_cmd: DriverCmd,
}

impl From<&LogRow> for VehicleSnapshot {
    fn from(row: &LogRow) -> Self {
        Self {
            heading: row.psi,
            vel_body_frame: Vec2::new(row.xdot, row.ydot),
            yaw_rate: row.r,
            tire_forces: [
                TireForce::new(row.fx_0, row.fy_0),
                TireForce::new(row.fx_1, row.fy_1),
                TireForce::new(row.fx_2, row.fy_2),
                TireForce::new(row.fx_3, row.fy_3),
            ],
            slip_angles: [row.alpha_0, row.alpha_1, row.alpha_2, row.alpha_3],
            driver_cmd: DriverCmd { steer: row.steer, accel: row.accel, decel: row.decel },
        }
    }
}

impl VehicleSnapshot {
    /// Tire forces and slip angles per axle: the two tires of an axle are
    /// summed (forces) and averaged (slip angle). Order is front, rear.
    pub fn axle_totals(&self) -> ([TireForce; 2], [Scalar; 2]) {
        let sum = |a: TireForce, b: TireForce| TireForce::new(a.longitudinal + b.longitudinal, a.lateral + b.lateral);
        let f = &self.tire_forces;
        let s = &self.slip_angles;
        ([sum(f[0], f[1]), sum(f[2], f[3])], [0.5 * (s[0] + s[1]), 0.5 * (s[2] + s[3])])
    }

    /// Pushes pose, yaw rate (when logged) and tire forces into `vehicle`.
    /// A single-track vehicle gets the per-axle totals from [`Self::axle_totals`].
    /// Tire forces go first so a mismatch leaves the vehicle as it was.
    pub fn apply(&self, vehicle: &mut Vehicle) -> Result<(), PlotError> {
        if matches!(vehicle.layout(), TireLayout::SingleTrack { .. }) {
            let (forces, slips) = self.axle_totals();
            vehicle.update_tire_forces(&forces, &slips)?;
        } else {
            vehicle.update_tire_forces(&self.tire_forces, &self.slip_angles)?;
        }
        vehicle.update_body_pose(self.heading, self.vel_body_frame);
        if let Some(r) = self.yaw_rate {
            vehicle.update_yaw_rate(r);
        }
        Ok(())
    }
}

/// An in-memory log, never empty.
#[derive(Clone, Debug)]
pub struct TimeSeries {
    rows: Vec<LogRow>,
}

impl TimeSeries {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rdr = csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
        Self::from_csv(rdr).with_context(|| format!("reading {}", path.display()))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let mut rows = Vec::new();
        for (i, rec) in rdr.deserialize::<LogRow>().enumerate() {
            rows.push(rec.with_context(|| format!("row {i}"))?);
        }
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<LogRow>) -> Result<Self> {
        if rows.is_empty() {
            bail!("time series has no rows");
        }
        tracing::debug!(rows = rows.len(), "time series loaded");
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn row(&self, index: usize) -> Option<&LogRow> { self.rows.get(index) }

    /// Row whose `time` is closest to `time`; the earliest row wins a tie.
    pub fn nearest_row(&self, time: Scalar) -> usize {
        let mut best = 0;
        let mut best_d = Scalar::INFINITY;
        for (i, row) in self.rows.iter().enumerate() {
            let d = (row.time - time).abs();
            if d < best_d {
                best = i;
                best_d = d;
            }
        }
        best
    }

    pub fn state_at_row(&self, index: usize) -> Result<VehicleSnapshot> {
        match self.rows.get(index) {
            Some(row) => Ok(VehicleSnapshot::from(row)),
            None => bail!("row {index} out of range ({} rows)", self.rows.len()),
        }
    }

    pub fn state_at_time(&self, time: Scalar) -> VehicleSnapshot {
        VehicleSnapshot::from(&self.rows[self.nearest_row(time)])
    }

    /// Smallest and largest logged time.
    pub fn time_range(&self) -> (Scalar, Scalar) {
        self.rows.iter().fold((Scalar::INFINITY, Scalar::NEG_INFINITY), |(lo, hi), r| (lo.min(r.time), hi.max(r.time)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_at(time: Scalar) -> LogRow {
        LogRow {
            psi: 0.0, xdot: 10.0, ydot: 0.0,
            fx_0: 0.0, fx_1: 0.0, fx_2: 0.0, fx_3: 0.0,
            fy_0: 0.0, fy_1: 0.0, fy_2: 0.0, fy_3: 0.0,
            alpha_0: 0.0, alpha_1: 0.0, alpha_2: 0.0, alpha_3: 0.0,
            steer: 0.0, accel: 0.0, decel: 0.0,
            time,
            r: None,
        }
    }

    #[test]
    fn nearest_prefers_earliest_on_tie() {
        let ts = TimeSeries::from_rows(vec![row_at(0.0), row_at(1.0), row_at(2.0)]).unwrap();
        assert_eq!(ts.nearest_row(0.5), 0);
        assert_eq!(ts.nearest_row(1.5), 1);
        assert_eq!(ts.nearest_row(1.6), 2);
        assert_eq!(ts.nearest_row(-3.0), 0);
        assert_eq!(ts.nearest_row(99.0), 2);
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(TimeSeries::from_rows(Vec::new()).is_err());
    }

    #[test]
    fn range_ignores_row_order() {
        let ts = TimeSeries::from_rows(vec![row_at(3.0), row_at(-1.0), row_at(2.0)]).unwrap();
        assert_eq!(ts.time_range(), (-1.0, 3.0));
        assert!(ts.state_at_row(3).is_err());
    }
}
