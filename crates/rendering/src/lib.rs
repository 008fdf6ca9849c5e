use bevy::prelude::*;

pub mod camera;
pub mod input;
pub mod map_space;
pub mod markers;

use input::{CursorMapPos, StatusLine};
use session::app_state::AppScreen;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.07, 0.09, 0.12)))
            .init_resource::<CursorMapPos>()
            .init_resource::<StatusLine>()
            .add_systems(Startup, camera::setup_camera)
            .add_systems(
                Update,
                (
                    camera::sync_camera_to_region,
                    camera::apply_map_camera,
                    camera::camera_zoom_wheel,
                )
                    .chain()
                    .run_if(in_state(AppScreen::Map)),
            )
            .add_systems(
                Update,
                (
                    input::update_cursor_map_pos,
                    input::handle_map_click,
                    input::keyboard_shortcuts,
                    input::fade_status_line,
                )
                    .chain()
                    .run_if(in_state(AppScreen::Map)),
            )
            .add_systems(
                Update,
                (
                    markers::draw_graticule,
                    markers::draw_center_crosshair,
                    markers::draw_device_location,
                    markers::draw_signs,
                    markers::draw_drop_cursor,
                )
                    .run_if(in_state(AppScreen::Map)),
            );
    }
}
