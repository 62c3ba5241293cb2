//! Flat description of one trajectory, suitable for CSV export.
//!

use chrono::{DateTime, Utc};
use serde::Serialize;

use geotrail_formats::PltTrace;

use crate::Trajectory;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrajectorySummary {
    /// User ID of the trace
    pub user: i64,
    /// Trace file
    pub file: String,
    /// Rank of the trajectory inside the trace, starting at 0
    pub index: usize,
    /// Number of points
    pub points: usize,
    /// First timestamp
    pub start: DateTime<Utc>,
    /// Last timestamp
    pub end: DateTime<Utc>,
    /// Duration in seconds
    pub duration: i64,
}

impl TrajectorySummary {
    /// Returns `None` for an empty trajectory.
    ///
    pub fn new(trace: &PltTrace, index: usize, traj: &Trajectory) -> Option<Self> {
        Some(TrajectorySummary {
            user: trace.user(),
            file: trace.path().display().to_string(),
            index,
            points: traj.len(),
            start: traj.start_time()?,
            end: traj.latest_time()?,
            duration: traj.duration().num_seconds(),
        })
    }
}
