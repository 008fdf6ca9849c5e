//! Gizmo overlays drawn on the ground plane: graticule, device fix,
//! sign pins, and the drop-mode cursor.
//!
//! Everything here is immediate-mode; nothing spawns entities, so the
//! overlays always reflect the current session state with no cleanup
//! systems.

use bevy::prelude::*;
use session::config::DEFAULT_LATITUDE_DELTA;
use session::geo::{Coordinate, Region};
use session::MapSession;

use crate::input::CursorMapPos;
use crate::map_space::{self, WORLD_UNITS_PER_DEGREE};

// ----------------------------------------------------------------------------
// Constants
// ----------------------------------------------------------------------------

const GRATICULE_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.08);
const CROSSHAIR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.25);
const DEVICE_COLOR: Color = Color::srgb(0.30, 0.65, 1.0);
const DEVICE_HALO_COLOR: Color = Color::srgba(0.30, 0.65, 1.0, 0.35);
const SIGN_COLOR: Color = Color::srgb(0.91, 0.27, 0.38);
const DROP_CURSOR_COLOR: Color = Color::srgb(0.96, 0.76, 0.26);

/// Sign pin radius as a fraction of the visible latitude span, so pins
/// keep a constant on-screen size across zoom levels.
const SIGN_RADIUS_FRACTION: f64 = 0.012;

/// Lift overlays slightly off y = 0 so they never z-fight the grid.
const OVERLAY_LIFT: f32 = 0.2;

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

/// Isometry for a circle lying flat on the ground plane.
#[inline]
fn flat_circle(center: Vec3) -> Isometry3d {
    Isometry3d::new(center, Quat::from_rotation_x(std::f32::consts::FRAC_PI_2))
}

/// Grid spacing in degrees: the decade step that puts roughly ten
/// lines across the visible span.
fn graticule_step(latitude_delta: f64) -> f64 {
    let target = latitude_delta / 10.0;
    10f64.powf(target.log10().ceil())
}

/// World-space pin radius for the current zoom level.
fn sign_radius(region: Option<Region>) -> f32 {
    let delta = region.map_or(DEFAULT_LATITUDE_DELTA, |r| r.latitude_delta);
    (delta * WORLD_UNITS_PER_DEGREE * SIGN_RADIUS_FRACTION) as f32
}

// ----------------------------------------------------------------------------
// Systems
// ----------------------------------------------------------------------------

/// Faint latitude/longitude lines covering the visible region.
pub fn draw_graticule(session: Res<MapSession>, mut gizmos: Gizmos) {
    let Some(region) = session.state.region else {
        return;
    };

    let step = graticule_step(region.latitude_delta);

    // Cover twice the visible span so the tilted camera never sees a
    // bare rim at the edge of the grid.
    let lat_min = region.center.latitude - region.latitude_delta;
    let lat_max = region.center.latitude + region.latitude_delta;
    let lon_min = region.center.longitude - region.longitude_delta;
    let lon_max = region.center.longitude + region.longitude_delta;

    let first = (lat_min / step).floor() as i64;
    let last = (lat_max / step).ceil() as i64;
    for i in first..=last {
        let lat = i as f64 * step;
        let a = map_space::geo_to_world(Coordinate::new(lat, lon_min));
        let b = map_space::geo_to_world(Coordinate::new(lat, lon_max));
        gizmos.line(a, b, GRATICULE_COLOR);
    }

    let first = (lon_min / step).floor() as i64;
    let last = (lon_max / step).ceil() as i64;
    for i in first..=last {
        let lon = i as f64 * step;
        let a = map_space::geo_to_world(Coordinate::new(lat_min, lon));
        let b = map_space::geo_to_world(Coordinate::new(lat_max, lon));
        gizmos.line(a, b, GRATICULE_COLOR);
    }
}

/// Small crosshair at the region center.
pub fn draw_center_crosshair(session: Res<MapSession>, mut gizmos: Gizmos) {
    let Some(region) = session.state.region else {
        return;
    };

    let center = map_space::geo_to_world(region.center) + Vec3::Y * OVERLAY_LIFT;
    let arm = sign_radius(Some(region)) * 1.5;
    gizmos.line(
        center - Vec3::X * arm,
        center + Vec3::X * arm,
        CROSSHAIR_COLOR,
    );
    gizmos.line(
        center - Vec3::Z * arm,
        center + Vec3::Z * arm,
        CROSSHAIR_COLOR,
    );
}

/// Blue dot and halo where the device last reported itself.
pub fn draw_device_location(session: Res<MapSession>, mut gizmos: Gizmos) {
    let Some(fix) = session.state.device_location else {
        return;
    };

    let pos = map_space::geo_to_world(fix) + Vec3::Y * OVERLAY_LIFT;
    let radius = sign_radius(session.state.region);
    gizmos.circle(flat_circle(pos), radius * 0.45, DEVICE_COLOR);
    gizmos.circle(flat_circle(pos), radius * 1.1, DEVICE_HALO_COLOR);
}

/// Sign pins: a post with a circular head, plus a pulsing ring around
/// the selected one.
pub fn draw_signs(session: Res<MapSession>, time: Res<Time>, mut gizmos: Gizmos) {
    let state = &session.state;
    let radius = sign_radius(state.region);

    // Sine wave: 2 Hz pulse for the selection ring.
    let sine = (time.elapsed_secs() * 2.0 * std::f32::consts::TAU).sin();
    let alpha = 0.6 + sine * 0.25;

    for sign in &state.signs {
        let base = map_space::geo_to_world(sign.coordinate);
        let head = base + Vec3::Y * (radius * 1.8);
        gizmos.line(base, head, SIGN_COLOR);
        gizmos.circle(flat_circle(base + Vec3::Y * OVERLAY_LIFT), radius * 0.5, SIGN_COLOR);

        if state.selected == Some(sign.id) {
            gizmos.circle(
                flat_circle(base + Vec3::Y * (OVERLAY_LIFT * 1.5)),
                radius * 1.2,
                Color::srgba(1.0, 1.0, 1.0, alpha),
            );
        }
    }
}

/// Amber target ring under the cursor while drop mode is armed.
pub fn draw_drop_cursor(
    session: Res<MapSession>,
    cursor: Res<CursorMapPos>,
    mut gizmos: Gizmos,
) {
    if !session.state.drop_mode || !cursor.valid {
        return;
    }

    let pos = map_space::geo_to_world(cursor.coordinate) + Vec3::Y * OVERLAY_LIFT;
    let radius = sign_radius(session.state.region);
    gizmos.circle(flat_circle(pos), radius * 0.8, DROP_CURSOR_COLOR);
    gizmos.line(
        pos - Vec3::X * radius * 0.3,
        pos + Vec3::X * radius * 0.3,
        DROP_CURSOR_COLOR,
    );
    gizmos.line(
        pos - Vec3::Z * radius * 0.3,
        pos + Vec3::Z * radius * 0.3,
        DROP_CURSOR_COLOR,
    );
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
