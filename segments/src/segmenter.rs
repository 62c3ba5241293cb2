//! Drive a stream of points through `Trajectory` accumulators.
//!
//! The current trajectory is fed until it refuses a point; it is then returned and a new
//! trajectory is started with the refused point.  When the stream is exhausted, the last
//! trajectory is returned as well, even if it only has one point.
//!

use std::iter::FusedIterator;

use chrono::TimeDelta;
use tracing::{debug, trace};

use geotrail_formats::{FormatError, PltPoint, PltTrace};

use crate::Trajectory;

/// Iterator adapter turning points into trajectories.
///
/// The first error coming from the points ends the iteration after being returned.  The
/// trajectory being built at that moment is dropped, those already returned stay valid.
///
#[derive(Debug)]
pub struct Segments<I> {
    points: I,
    threshold: TimeDelta,
    current: Option<Trajectory>,
    done: bool,
}

impl<I> Segments<I>
where
    I: Iterator<Item = Result<PltPoint, FormatError>>,
{
    pub fn new(points: I, threshold: TimeDelta) -> Self {
        Segments {
            points,
            threshold,
            current: None,
            done: false,
        }
    }
}

impl<I> Iterator for Segments<I>
where
    I: Iterator<Item = Result<PltPoint, FormatError>>,
{
    type Item = Result<Trajectory, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.points.next() {
                Some(Ok(point)) => match self.current.as_mut() {
                    Some(current) => {
                        if !current.add(point) {
                            let fresh = Trajectory::with_point(self.threshold, point);
                            let closed = std::mem::replace(current, fresh);
                            trace!("closing {closed}");
                            return Some(Ok(closed));
                        }
                    }
                    None => self.current = Some(Trajectory::with_point(self.threshold, point)),
                },
                Some(Err(e)) => {
                    debug!("stopping on {e}");
                    self.done = true;
                    self.current = None;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    return self.current.take().map(Ok);
                }
            }
        }
    }
}

impl<I> FusedIterator for Segments<I> where I: Iterator<Item = Result<PltPoint, FormatError>> {}

/// Split any stream of points into trajectories.
///
pub fn segment<I>(points: I, threshold: TimeDelta) -> Segments<I::IntoIter>
where
    I: IntoIterator<Item = Result<PltPoint, FormatError>>,
{
    Segments::new(points.into_iter(), threshold)
}

/// Read a whole trace and return all its trajectories.
///
#[tracing::instrument(skip(trace), fields(path = %trace.path().display()))]
pub fn segment_trace(
    trace: &PltTrace,
    threshold: TimeDelta,
) -> Result<Vec<Trajectory>, FormatError> {
    let res = segment(trace.records()?, threshold).collect::<Result<Vec<_>, _>>()?;
    debug!("{} trajectories for user {}", res.len(), trace.user());
    Ok(res)
}
