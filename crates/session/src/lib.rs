use bevy::prelude::*;

pub mod app_state;
pub mod config;
pub mod events;
pub mod geo;
pub mod state;
pub mod view;


use app_state::AppScreen;
use events::{SessionEvent, SessionOutcome};
use state::SessionState;

/// Resource holding the current session value. Only
/// [`apply_session_events`] writes it; everything else reads (usually via
/// [`SessionState::view`]).
#[derive(Resource, Debug, Clone, Default)]
pub struct MapSession {
    pub state: SessionState,
}

/// Drain queued session events and apply them strictly in arrival order.
///
/// This is the single writer of [`MapSession`], which is what makes every
/// transition serialized: provider results and input events from the same
/// frame are folded one at a time, never interleaved.
pub fn apply_session_events(
    mut session: ResMut<MapSession>,
    mut events: EventReader<SessionEvent>,
    mut outcomes: EventWriter<SessionOutcome>,
) {
    for event in events.read() {
        let outcome = session.state.apply(event);
        debug!("session: {event:?} -> {outcome:?}");
        outcomes.send(SessionOutcome {
            event: *event,
            outcome,
        });
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppScreen>()
            .init_resource::<MapSession>()
            .add_event::<SessionEvent>()
            .add_event::<SessionOutcome>()
            .add_systems(Update, apply_session_events);
    }
}
