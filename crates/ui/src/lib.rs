use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod controls;
pub mod login;
pub mod notices;
pub mod search_panel;
pub mod theme;

use session::app_state::AppScreen;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<search_panel::SearchPanelState>()
            .add_systems(Startup, theme::apply_map_theme)
            .add_systems(Update, login::login_ui.run_if(in_state(AppScreen::Login)))
            .add_systems(
                Update,
                (
                    controls::controls_ui,
                    search_panel::search_panel_ui,
                    notices::publish_notices,
                )
                    .run_if(in_state(AppScreen::Map)),
            );
    }
}
