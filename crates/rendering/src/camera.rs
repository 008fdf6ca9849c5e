//! Region-driven map camera.
//!
//! The camera hangs above the region center at a fixed steep pitch and its
//! distance follows the region's latitude span, so session zoom steps move
//! the camera. Scroll wheel zoom routes through the session rather than
//! touching the camera directly, which keeps the span clamps in force.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use session::events::SessionEvent;
use session::MapSession;

use crate::input::egui_wants_pointer;
use crate::map_space;

/// Elevation angle above the ground plane. Steep enough to read as a map,
/// shy of vertical so `looking_at` keeps a well-defined up vector.
const CAMERA_PITCH: f32 = 80.0 * std::f32::consts::PI / 180.0;

/// Distance used before any region exists.
const OVERVIEW_DISTANCE: f32 = 400.0;

/// Camera model: a focus point on the ground plane plus a viewing distance.
#[derive(Resource)]
pub struct MapCamera {
    pub focus: Vec3,
    pub distance: f32,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: OVERVIEW_DISTANCE,
        }
    }
}

fn camera_transform(camera: &MapCamera) -> (Vec3, Vec3) {
    let y = camera.distance * CAMERA_PITCH.sin();
    let z = camera.distance * CAMERA_PITCH.cos();
    (camera.focus + Vec3::new(0.0, y, z), camera.focus)
}

pub fn setup_camera(mut commands: Commands) {
    let camera = MapCamera::default();
    let (pos, look_at) = camera_transform(&camera);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(pos).looking_at(look_at, Vec3::Y),
    ));
    commands.insert_resource(camera);
}

/// Follow the session region: recenter on its center, match its span.
pub fn sync_camera_to_region(session: Res<MapSession>, mut camera: ResMut<MapCamera>) {
    if !session.is_changed() {
        return;
    }
    let Some(region) = session.state.region else {
        return;
    };
    camera.focus = map_space::geo_to_world(region.center);
    camera.distance = map_space::delta_to_distance(region.latitude_delta);
}

/// Apply the camera model to the actual camera transform when it changed.
pub fn apply_map_camera(camera: Res<MapCamera>, mut query: Query<&mut Transform, With<Camera3d>>) {
    if !camera.is_changed() {
        return;
    }
    let (pos, look_at) = camera_transform(&camera);
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };
    *transform = Transform::from_translation(pos).looking_at(look_at, Vec3::Y);
}

/// Scroll wheel: one zoom step per wheel notch, through the session.
pub fn camera_zoom_wheel(
    mut scroll_evts: EventReader<MouseWheel>,
    mut contexts: EguiContexts,
    mut session_events: EventWriter<SessionEvent>,
) {
    // Scrollable egui panels own the wheel while hovered.
    if egui_wants_pointer(&mut contexts) {
        scroll_evts.clear();
        return;
    }

    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        if dy > 0.0 {
            session_events.send(SessionEvent::ZoomIn);
        } else if dy < 0.0 {
            session_events.send(SessionEvent::ZoomOut);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_sits_above_and_south_of_the_focus() {
        let camera = MapCamera {
            focus: Vec3::new(10.0, 0.0, -20.0),
            distance: 100.0,
        };
        let (pos, look_at) = camera_transform(&camera);
        assert_eq!(look_at, camera.focus);
        assert!(pos.y > 90.0, "steep pitch puts most of the distance in y");
        assert!(
            pos.z > camera.focus.z,
            "southward offset keeps up well-defined"
        );
        assert_eq!(pos.x, camera.focus.x);
    }

    #[test]
    fn default_camera_is_a_wide_overview() {
        let camera = MapCamera::default();
        assert_eq!(camera.focus, Vec3::ZERO);
        assert!(camera.distance > map_space::delta_to_distance(0.0922));
    }
}
