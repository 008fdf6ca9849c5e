//! Pointer and keyboard input on the map.
//!
//! Every interaction funnels into a [`SessionEvent`]; nothing here mutates
//! the session directly. Clicks resolve against the ground plane, then
//! against the live signs, and egui always gets first claim on the pointer
//! so panel clicks never fall through to the map.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use session::config::DEFAULT_LATITUDE_DELTA;
use session::events::SessionEvent;
use session::geo::Coordinate;
use session::MapSession;

use crate::map_space;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fraction of the visible latitude span a tap may miss a sign by and still
/// count as tapping it.
const PICK_RADIUS_FRACTION: f64 = 0.03;

/// Seconds a notice stays on screen.
const NOTICE_SECS: f32 = 3.0;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Where the cursor currently sits on the map plane.
#[derive(Resource, Default)]
pub struct CursorMapPos {
    pub coordinate: Coordinate,
    pub valid: bool,
}

/// One transient notice over the map.
pub struct Notice {
    pub text: String,
    pub error: bool,
    secs_left: f32,
}

/// The notice currently on screen, if any. A new notice replaces the old
/// one outright; there is no queue.
#[derive(Resource, Default)]
pub struct StatusLine {
    current: Option<Notice>,
}

impl StatusLine {
    pub fn show(&mut self, text: impl Into<String>, error: bool) {
        self.current = Some(Notice {
            text: text.into(),
            error,
            secs_left: NOTICE_SECS,
        });
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Returns `true` when egui wants the pointer. Input systems early-return
/// on it so clicks on panels never reach the map underneath.
#[inline]
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    let ctx = contexts.ctx_mut();
    ctx.is_pointer_over_area() || ctx.wants_pointer_input()
}

/// Count the visible notice down and drop it once it expires.
pub fn fade_status_line(time: Res<Time>, mut status: ResMut<StatusLine>) {
    let Some(notice) = status.current.as_mut() else {
        return;
    };
    notice.secs_left -= time.delta_secs();
    if notice.secs_left <= 0.0 {
        status.current = None;
    }
}

/// Project the cursor through the camera onto the ground plane.
pub fn update_cursor_map_pos(
    windows: Query<&Window>,
    cameras: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut cursor: ResMut<CursorMapPos>,
) {
    cursor.valid = false;
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let Some(screen) = window.cursor_position() else {
        return;
    };
    let Some(hit) = ground_hit(camera, camera_transform, screen) else {
        return;
    };
    cursor.coordinate = map_space::world_to_geo(hit);
    cursor.valid = true;
}

/// Intersection of the pointer ray with the ground plane, when the ray
/// meets it in front of the camera. Near-horizontal rays never land.
fn ground_hit(camera: &Camera, camera_transform: &GlobalTransform, screen: Vec2) -> Option<Vec3> {
    let ray = camera.viewport_to_world(camera_transform, screen).ok()?;
    let fall = ray.direction.y;
    if fall.abs() < 1e-3 {
        return None;
    }
    let along = -ray.origin.y / fall;
    (along > 0.0).then(|| ray.origin + ray.direction * along)
}

/// Left click: tap a sign when one is close enough, otherwise tap the map.
///
/// While drop mode is armed every click is a map tap, so a new sign can
/// land right next to an existing one.
pub fn handle_map_click(
    buttons: Res<ButtonInput<MouseButton>>,
    mut contexts: EguiContexts,
    cursor: Res<CursorMapPos>,
    session: Res<MapSession>,
    mut session_events: EventWriter<SessionEvent>,
) {
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    if !buttons.just_pressed(MouseButton::Left) || !cursor.valid {
        return;
    }

    let state = &session.state;
    if !state.drop_mode {
        let radius = pick_radius(state.region.map(|r| r.latitude_delta));
        if let Some(id) = map_space::pick_sign(&state.signs, cursor.coordinate, radius) {
            session_events.send(SessionEvent::MarkerTapped(id));
            return;
        }
    }
    session_events.send(SessionEvent::MapTapped(cursor.coordinate));
}

/// Keyboard shortcuts: D arms drop mode, Escape disarms it, Delete removes
/// the selected sign, plus/minus zoom.
pub fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut contexts: EguiContexts,
    session: Res<MapSession>,
    mut session_events: EventWriter<SessionEvent>,
) {
    if contexts.ctx_mut().wants_keyboard_input() {
        return;
    }

    if keys.just_pressed(KeyCode::KeyD) {
        session_events.send(SessionEvent::ToggleDropMode);
    }
    if keys.just_pressed(KeyCode::Escape) && session.state.drop_mode {
        session_events.send(SessionEvent::ToggleDropMode);
    }
    if keys.just_pressed(KeyCode::Delete) || keys.just_pressed(KeyCode::Backspace) {
        session_events.send(SessionEvent::RemoveSelected);
    }
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        session_events.send(SessionEvent::ZoomIn);
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        session_events.send(SessionEvent::ZoomOut);
    }
}

fn pick_radius(latitude_delta: Option<f64>) -> f64 {
    latitude_delta.unwrap_or(DEFAULT_LATITUDE_DELTA) * PICK_RADIUS_FRACTION
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
