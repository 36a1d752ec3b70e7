//! Drives a [`Vehicle`](carplot_vehicles::Vehicle) from a logged time series
//! and loads plot configuration.
//!
//! The CSV contract is one row per sample with the columns
//! `psi, xdot, ydot, Fx_0..3, Fy_0..3, Alpha_0..3, Steer, Accel, Decel, time`
//! (tire index order FL, FR, RL, RR) and an optional `r` yaw-rate column.

pub mod config;
pub mod plot;
pub mod series;

pub use config::{env_f32, env_u32, log_filter, LayoutKind, PlotConfig, SvgSettings};
pub use plot::{FrameSchedule, VehiclePlot};
pub use series::{DriverCmd, LogRow, TimeSeries, VehicleSnapshot};
