//! Geographic value types: coordinates and the visible map region.
//!
//! A [`Region`] is the map viewport: a center plus a latitude/longitude span
//! in degrees. Zoom never errors; the spans saturate at the configured
//! bounds no matter how many zoom steps arrive.

use serde::{Deserialize, Serialize};

use crate::config::{
    DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA, ZOOM_DELTA_MAX, ZOOM_DELTA_MIN, ZOOM_STEP,
};

/// A WGS84 point in decimal degrees.
///
/// The session core does not validate ranges; whatever the location or place
/// provider hands over is stored as-is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The visible map viewport: center coordinate plus degree spans.
///
/// Both deltas always lie within `[ZOOM_DELTA_MIN, ZOOM_DELTA_MAX]` after
/// construction and after every zoom step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    /// Region used when a collaborator establishes the viewport for the
    /// first time: centered on the result, with the default spans.
    pub fn centered_on(center: Coordinate) -> Self {
        Self {
            center,
            latitude_delta: DEFAULT_LATITUDE_DELTA,
            longitude_delta: DEFAULT_LONGITUDE_DELTA,
        }
    }

    /// Shrink both spans by one zoom step, saturating at the minimum.
    pub fn zoom_in(&mut self) {
        self.latitude_delta = clamp_delta(self.latitude_delta - ZOOM_STEP);
        self.longitude_delta = clamp_delta(self.longitude_delta - ZOOM_STEP);
    }

    /// Widen both spans by one zoom step, saturating at the maximum.
    pub fn zoom_out(&mut self) {
        self.latitude_delta = clamp_delta(self.latitude_delta + ZOOM_STEP);
        self.longitude_delta = clamp_delta(self.longitude_delta + ZOOM_STEP);
    }
}

fn clamp_delta(delta: f64) -> f64 {
    delta.clamp(ZOOM_DELTA_MIN, ZOOM_DELTA_MAX)
}
