//! Parsing of human-friendly durations like `20m` or `1h 30m`.
//!

use chrono::TimeDelta;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq)]
pub enum ErrDuration {
    #[error("bad duration: {0}")]
    BadDuration(String),
    #[error("duration must be positive: {0}")]
    NotPositive(String),
}

/// Parse a duration for use as a threshold.  Zero is refused.
///
#[tracing::instrument]
pub fn parse_duration(s: &str) -> Result<TimeDelta, ErrDuration> {
    let d = humantime::parse_duration(s.trim())
        .map_err(|_| ErrDuration::BadDuration(s.to_string()))?;
    trace!("{s} = {d:?}");

    let d = TimeDelta::from_std(d).map_err(|_| ErrDuration::BadDuration(s.to_string()))?;
    if d <= TimeDelta::zero() {
        return Err(ErrDuration::NotPositive(s.to_string()));
    }
    Ok(d)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("20m", TimeDelta::minutes(20))]
    #[case("20min", TimeDelta::minutes(20))]
    #[case("1h 30m", TimeDelta::minutes(90))]
    #[case("45s", TimeDelta::seconds(45))]
    #[case(" 2h ", TimeDelta::hours(2))]
    fn test_parse_duration(#[case] inp: &str, #[case] out: TimeDelta) {
        assert_eq!(Ok(out), parse_duration(inp));
    }

    #[rstest]
    #[case("", ErrDuration::BadDuration(String::new()))]
    #[case("twenty", ErrDuration::BadDuration("twenty".into()))]
    #[case("0s", ErrDuration::NotPositive("0s".into()))]
    fn test_parse_duration_bad(#[case] inp: &str, #[case] err: ErrDuration) {
        assert_eq!(Err(err), parse_duration(inp));
    }
}
