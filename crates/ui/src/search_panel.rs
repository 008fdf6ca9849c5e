//! Address search panel.
//!
//! A query box plus the candidate list from the place provider. Edits are
//! forwarded as [`PlaceQuerySubmitted`] events; the provider plugin owns
//! dispatch and the suggestion list. Picking a candidate recenters the map
//! through the session.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use providers::places::{PendingSearch, PlaceQuerySubmitted, PlaceSuggestions};
use session::events::SessionEvent;
use session::geo::Coordinate;

/// Tracks the query text between frames so only edits submit.
#[derive(Resource, Default)]
pub struct SearchPanelState {
    pub query: String,
    prev_query: String,
}

pub fn search_panel_ui(
    mut contexts: EguiContexts,
    mut state: ResMut<SearchPanelState>,
    suggestions: Res<PlaceSuggestions>,
    pending: Res<PendingSearch>,
    mut queries: EventWriter<PlaceQuerySubmitted>,
    mut session_events: EventWriter<SessionEvent>,
) {
    let mut chosen: Option<Coordinate> = None;

    egui::Window::new("Find address")
        .default_width(300.0)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(8.0, 40.0))
        .resizable(false)
        .collapsible(true)
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                ui.label("Address:");
                ui.text_edit_singleline(&mut state.query);
            });

            if state.query != state.prev_query {
                state.prev_query = state.query.clone();
                queries.send(PlaceQuerySubmitted(state.query.clone()));
            }

            if state.query.trim().is_empty() {
                ui.label("Type a street or landmark to recenter the map.");
                return;
            }

            ui.separator();

            if suggestions.results.is_empty() {
                if pending.in_flight() {
                    ui.weak("Searching...");
                } else {
                    ui.label("No matches.");
                }
                return;
            }

            for candidate in &suggestions.results {
                if ui.selectable_label(false, &candidate.name).clicked() {
                    chosen = Some(candidate.coordinate);
                }
            }
        });

    // Applied outside the closure so the panel borrows stay simple.
    if let Some(coordinate) = chosen {
        session_events.send(SessionEvent::PlaceSelected(coordinate));
        // A blank submission tears down the in-flight task and the list.
        queries.send(PlaceQuerySubmitted(String::new()));
        state.query.clear();
        state.prev_query.clear();
    }
}
