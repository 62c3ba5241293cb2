//! Configuration file for `trailctl`.
//!
//! ```hcl
//! version = 1
//!
//! threshold = "20m"
//! extension = "plt"
//! ```
//!
//! Every field except `version` is optional.
//!

use serde::Deserialize;

use geotrail_common::IntoConfig;
use geotrail_formats::PLT_EXT;
use geotrail_segments::DEFAULT_THRESHOLD_MINS;

/// Current version of the config file
pub const CVERSION: usize = 1;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Version of the file
    pub version: usize,
    /// Maximum gap inside a trajectory, in `humantime` format
    pub threshold: String,
    /// Extension of trace files when walking directories
    pub extension: String,
}

impl Default for TrailConfig {
    fn default() -> Self {
        TrailConfig {
            version: CVERSION,
            threshold: format!("{DEFAULT_THRESHOLD_MINS}m"),
            extension: PLT_EXT.to_string(),
        }
    }
}

impl IntoConfig for TrailConfig {
    const VERSION: usize = CVERSION;

    fn version(&self) -> usize {
        self.version
    }
}
