//! The `Trajectory` accumulator.
//!
//! A trajectory is a run of points where two consecutive points are always less than
//! `threshold` apart in time.  Points are fed one by one with `add()` which either takes the
//! point or refuses it without changing anything; a refusal means the trajectory is finished.
//!

use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::trace;

use geotrail_formats::PltPoint;

/// Default maximum gap between two points of the same trajectory, in minutes
pub const DEFAULT_THRESHOLD_MINS: i64 = 20;

/// Default maximum gap between two points of the same trajectory
///
#[inline]
pub fn default_threshold() -> TimeDelta {
    TimeDelta::minutes(DEFAULT_THRESHOLD_MINS)
}

#[derive(Clone, Debug)]
pub struct Trajectory {
    /// Maximum gap allowed between two consecutive points
    threshold: TimeDelta,
    /// Accepted points, in order
    points: Vec<PltPoint>,
}

impl Trajectory {
    /// Create an empty trajectory, the first `add()` will always succeed.
    ///
    pub fn new(threshold: TimeDelta) -> Self {
        Trajectory {
            threshold,
            points: vec![],
        }
    }

    /// Create a trajectory starting with `point`.
    ///
    pub fn with_point(threshold: TimeDelta, point: PltPoint) -> Self {
        Trajectory {
            threshold,
            points: vec![point],
        }
    }

    /// Try to append `point`.
    ///
    /// Returns `false` and leaves the trajectory untouched if the gap with the latest point is
    /// equal to or larger than the threshold.
    ///
    pub fn add(&mut self, point: PltPoint) -> bool {
        if let Some(latest) = self.latest_time() {
            let gap = point.timestamp() - latest;
            if gap >= self.threshold {
                trace!("gap {gap} >= {}, rejecting {point}", self.threshold);
                return false;
            }
        }
        self.points.push(point);
        true
    }

    #[inline]
    pub fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    #[inline]
    pub fn points(&self) -> &[PltPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Timestamp of the first point
    ///
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.points.first().map(|p| p.timestamp())
    }

    /// Timestamp of the most recently accepted point
    ///
    pub fn latest_time(&self) -> Option<DateTime<Utc>> {
        self.points.last().map(|p| p.timestamp())
    }

    /// Time between the first and latest points, zero for an empty trajectory.
    ///
    pub fn duration(&self) -> TimeDelta {
        match (self.start_time(), self.latest_time()) {
            (Some(start), Some(end)) => end - start,
            _ => TimeDelta::zero(),
        }
    }

}

/// `humantime` only knows about positive durations, the sign is ours.
///
fn signed_duration(d: TimeDelta) -> Result<String, fmt::Error> {
    let (sign, abs) = if d < TimeDelta::zero() {
        ("-", -d)
    } else {
        ("", d)
    };
    let abs = abs.to_std().map_err(|_| fmt::Error)?;
    Ok(format!("{sign}{}", humantime::format_duration(abs)))
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start_time(), self.latest_time()) {
            (Some(start), Some(end)) => write!(
                f,
                "{: >4} points, {} to {} ({})",
                self.len(),
                start.naive_utc(),
                end.naive_utc(),
                signed_duration(self.duration())?
            ),
            _ => write!(f, "{: >4} points", 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    /// Point at `HH:MM:SS` on 2009-04-22
    ///
    fn at(time: &str) -> PltPoint {
        PltPoint::new(&format!(
            "39.890275,116.453691,0,157,39925.4486111111,2009-04-22,{time}"
        ))
        .unwrap()
    }

    #[test]
    fn test_trajectory_first_add() {
        let mut t = Trajectory::new(TimeDelta::minutes(20));
        assert!(t.is_empty());
        assert_eq!(None, t.latest_time());

        assert!(t.add(at("10:00:00")));
        assert_eq!(1, t.len());
        assert_eq!(Some(at("10:00:00").timestamp()), t.start_time());
    }

    #[test]
    fn test_trajectory_keeps_together() {
        let mut t = Trajectory::new(TimeDelta::minutes(20));

        for time in ["10:00:00", "10:10:00", "10:25:00", "10:26:00"] {
            assert!(t.add(at(time)));
        }
        assert_eq!(4, t.len());
        assert_eq!(TimeDelta::minutes(26), t.duration());
    }

    #[test]
    fn test_trajectory_split() {
        let mut t = Trajectory::with_point(TimeDelta::minutes(20), at("10:00:00"));

        assert!(t.add(at("10:10:00")));
        assert!(!t.add(at("10:35:00")));

        // Rejection leaves everything as it was
        //
        assert_eq!(2, t.len());
        assert_eq!(Some(at("10:10:00").timestamp()), t.latest_time());
    }

    #[rstest]
    #[case(TimeDelta::minutes(20), "10:20:00", false)]
    #[case(TimeDelta::minutes(20), "10:19:59", true)]
    #[case(TimeDelta::seconds(5), "10:00:05", false)]
    #[case(TimeDelta::seconds(5), "10:00:04", true)]
    fn test_trajectory_boundary(
        #[case] threshold: TimeDelta,
        #[case] time: &str,
        #[case] accepted: bool,
    ) {
        let mut t = Trajectory::with_point(threshold, at("10:00:00"));

        assert_eq!(accepted, t.add(at(time)));
    }

    #[test]
    fn test_trajectory_gap_from_latest() {
        let mut t = Trajectory::with_point(TimeDelta::minutes(20), at("10:00:00"));

        // Each gap is below the threshold even though the whole is not
        //
        assert!(t.add(at("10:15:00")));
        assert!(t.add(at("10:30:00")));
        assert!(t.add(at("10:45:00")));
        assert_eq!(4, t.len());
    }

    #[test]
    fn test_trajectory_backwards() {
        let mut t = Trajectory::with_point(TimeDelta::minutes(20), at("10:00:00"));

        assert!(t.add(at("09:00:00")));
        assert_eq!(TimeDelta::hours(-1), t.duration());
        assert_eq!(
            "   2 points, 2009-04-22 10:00:00 to 2009-04-22 09:00:00 (-1h)",
            t.to_string()
        );
    }

    #[test]
    fn test_trajectory_display() {
        let mut t = Trajectory::with_point(TimeDelta::minutes(20), at("10:00:00"));
        t.add(at("10:10:00"));
        t.add(at("10:25:00"));

        assert_eq!(
            "   3 points, 2009-04-22 10:00:00 to 2009-04-22 10:25:00 (25m)",
            t.to_string()
        );
        assert_eq!("   0 points", Trajectory::new(default_threshold()).to_string());
    }
}
