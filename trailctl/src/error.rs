use thiserror::Error;

use geotrail_common::ErrDuration;

#[derive(Debug, Error)]
pub enum CmdError {
    #[error("Bad threshold: {0}")]
    BadThreshold(#[from] ErrDuration),
    #[error("No .{1} trace file found in {0}")]
    NoTraces(String, String),
}
