//! Decoding of a single PLT record.
//!
//! A data line looks like this:
//!
//! ```text
//! 39.890275,116.453691,0,157,39925.4486111111,2009-04-22,10:46:00
//! ```
//!
//! and maps to latitude, longitude, a reserved field, altitude in feet, the number of days
//! since 1899-12-30, then the date and the time.  Only the first two and the last two fields
//! are used, the date/time pair being counted from the end of the record.
//!

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::FormatError;

/// Position of the latitude field
const LATITUDE_INDEX: usize = 0;
/// Position of the longitude field
const LONGITUDE_INDEX: usize = 1;
/// Date is the second-to-last field
const DATE_FROM_END: usize = 2;
/// Time is the last field
const TIME_FROM_END: usize = 1;

/// One decoded GPS sample.
///
/// All fields are decoded once when the point is created and are never modified afterwards,
/// so every accessor always returns the value found in the original line.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PltPoint {
    /// Latitude in degrees
    latitude: f64,
    /// Longitude in degrees
    longitude: f64,
    /// Date & time of the sample
    timestamp: DateTime<Utc>,
}

impl PltPoint {
    /// Decode one raw line from a trace file.
    ///
    pub fn new(line: &str) -> Result<Self, FormatError> {
        let fields: Vec<&str> = line.trim_end().split(',').collect();
        trace!("fields={:?}", fields);

        let latitude = coordinate(line, &fields, LATITUDE_INDEX, "latitude")?;
        let longitude = coordinate(line, &fields, LONGITUDE_INDEX, "longitude")?;
        let timestamp = timestamp(line, &fields)?;

        Ok(PltPoint {
            latitude,
            longitude,
            timestamp,
        })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl FromStr for PltPoint {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PltPoint::new(s)
    }
}

impl fmt::Display for PltPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) @{}",
            self.latitude,
            self.longitude,
            self.timestamp.naive_utc()
        )
    }
}

/// Fetch and convert a numeric field.
///
fn coordinate(line: &str, fields: &[&str], index: usize, name: &str) -> Result<f64, FormatError> {
    let field = fields
        .get(index)
        .ok_or_else(|| FormatError::MalformedPoint(line.to_string(), format!("no {name}")))?;

    field.trim().parse::<f64>().map_err(|e| {
        FormatError::MalformedPoint(line.to_string(), format!("bad {name} '{field}': {e}"))
    })
}

/// Merge the date and time fields and run them through a general date parser.
///
/// The GPS logs are in UTC so a date without timezone is read as such.
///
fn timestamp(line: &str, fields: &[&str]) -> Result<DateTime<Utc>, FormatError> {
    let n = fields.len();
    if n < DATE_FROM_END {
        return Err(FormatError::MalformedPoint(
            line.to_string(),
            "no date/time".to_string(),
        ));
    }

    let date = fields[n - DATE_FROM_END].trim();
    let time = fields[n - TIME_FROM_END].trim();
    let stamp = [date, time].join(" ");

    dateparser::parse_with_timezone(&stamp, &Utc).map_err(|e| {
        FormatError::MalformedPoint(line.to_string(), format!("bad timestamp '{stamp}': {e}"))
    })
}
