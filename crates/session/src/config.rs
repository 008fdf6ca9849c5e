/// Deltas used when a location fix or place selection establishes the region
/// for the first time (roughly a neighborhood-scale viewport).
pub const DEFAULT_LATITUDE_DELTA: f64 = 0.0922;
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.0922;

/// Smallest span (in degrees) a region delta may reach; zoom-in saturates here.
pub const ZOOM_DELTA_MIN: f64 = 0.001;
/// Largest span (in degrees) a region delta may reach; zoom-out saturates here.
pub const ZOOM_DELTA_MAX: f64 = 1.0;

/// Amount added to / removed from each delta per zoom step.
pub const ZOOM_STEP: f64 = 0.005;
