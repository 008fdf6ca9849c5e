//! Top control bar and the floating status toast.
//!
//! Reads the session through its view model; every button press goes back
//! out as a [`SessionEvent`].

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::input::StatusLine;
use session::events::SessionEvent;
use session::MapSession;

pub fn controls_ui(
    mut contexts: EguiContexts,
    session: Res<MapSession>,
    status: Res<StatusLine>,
    mut session_events: EventWriter<SessionEvent>,
) {
    let view = session.state.view();
    let has_region = view.region.is_some();

    egui::TopBottomPanel::top("map_controls")
        .exact_height(32.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                ui.label(
                    egui::RichText::new("Signpost")
                        .strong()
                        .color(egui::Color32::from_rgb(64, 178, 170)),
                );

                ui.separator();

                let drop_label = if view.drop_mode {
                    "Placing: tap the map"
                } else {
                    "Drop sign"
                };
                if ui.selectable_label(view.drop_mode, drop_label).clicked() {
                    session_events.send(SessionEvent::ToggleDropMode);
                }

                let remove = ui.add_enabled(view.selected.is_some(), egui::Button::new("Remove"));
                if view.selected.is_none() {
                    remove.on_disabled_hover_text("Select a sign first");
                } else if remove.clicked() {
                    session_events.send(SessionEvent::RemoveSelected);
                }

                ui.separator();

                let zoom_out = ui.add_enabled(has_region, egui::Button::new("-"));
                if zoom_out.clicked() {
                    session_events.send(SessionEvent::ZoomOut);
                }
                let zoom_in = ui.add_enabled(has_region, egui::Button::new("+"));
                if zoom_in.clicked() {
                    session_events.send(SessionEvent::ZoomIn);
                }

                ui.separator();

                let count = view.markers.len();
                ui.label(format!(
                    "{count} sign{}",
                    if count == 1 { "" } else { "s" }
                ));

                if let Some(marker) = view.markers.iter().find(|m| m.selected) {
                    ui.separator();
                    ui.label(format!(
                        "Sign {} at {:.4}, {:.4}",
                        marker.id, marker.coordinate.latitude, marker.coordinate.longitude
                    ));
                }
            });
        });

    // Floating notice under the control bar
    if let Some(notice) = status.current() {
        let color = if notice.error {
            egui::Color32::from_rgb(224, 92, 76)
        } else {
            egui::Color32::from_rgb(64, 178, 170)
        };
        egui::Area::new(egui::Id::new("map_notice"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 40.0))
            .show(contexts.ctx_mut(), |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_rgba_premultiplied(24, 27, 34, 230))
                    .show(ui, |ui| {
                        ui.colored_label(color, &notice.text);
                    });
            });
    }
}
