//! Stub sign-in screen.
//!
//! Renders while [`AppScreen::Login`] is active. None of the identity
//! buttons authenticate anything; each one moves straight to the map.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use session::app_state::AppScreen;

const BUTTON_SIZE: egui::Vec2 = egui::Vec2 { x: 260.0, y: 46.0 };

const SIGN_IN_LABELS: &[&str] = &[
    "Sign in with Apple",
    "Sign in with Google",
    "Continue as guest",
];

fn wide_button(ui: &mut egui::Ui, label: &str) -> bool {
    ui.add_sized(
        BUTTON_SIZE,
        egui::Button::new(egui::RichText::new(label).size(17.0)),
    )
    .clicked()
}

pub fn login_ui(
    mut contexts: EguiContexts,
    mut next_screen: ResMut<NextState<AppScreen>>,
    mut app_exit: EventWriter<bevy::app::AppExit>,
) {
    let backdrop = egui::Color32::from_rgba_premultiplied(18, 21, 28, 242);

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(backdrop))
        .show(contexts.ctx_mut(), |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() * 0.22);

                ui.label(
                    egui::RichText::new("SIGNPOST")
                        .size(56.0)
                        .strong()
                        .color(egui::Color32::from_rgb(64, 178, 170)),
                );
                ui.label(
                    egui::RichText::new("Open-house sign mapping")
                        .size(17.0)
                        .color(egui::Color32::from_rgb(150, 162, 180)),
                );
                ui.add_space(40.0);

                for label in SIGN_IN_LABELS {
                    if wide_button(ui, label) {
                        info!("login: \"{label}\" accepted (stub)");
                        next_screen.set(AppScreen::Map);
                    }
                    ui.add_space(10.0);
                }

                ui.add_space(6.0);
                if wide_button(ui, "Quit") {
                    app_exit.send(bevy::app::AppExit::Success);
                }
            });
        });
}
