//! Turns applied-event outcomes into the transient status line.
//!
//! Silent outcomes return `None` and leave whatever notice is already up.

use bevy::prelude::*;

use providers::location::LocationFixFailed;
use rendering::input::StatusLine;
use session::events::{IgnoreReason, Outcome, SessionOutcome};

/// Status text for an outcome, with its error flag.
fn notice_for(outcome: &Outcome) -> Option<(String, bool)> {
    match outcome {
        Outcome::LocationFixed {
            established_region: true,
        } => Some(("Centered on your location".into(), false)),
        Outcome::LocationFixed {
            established_region: false,
        } => None,
        Outcome::Recentered { .. } => Some(("Map recentered".into(), false)),
        Outcome::Zoomed => None,
        Outcome::DropMode(true) => Some(("Tap the map to place a sign".into(), false)),
        Outcome::DropMode(false) => Some(("Placement cancelled".into(), false)),
        Outcome::SignPlaced(id) => Some((format!("Sign {id} placed"), false)),
        Outcome::SignSelected(id) => Some((format!("Sign {id} selected"), false)),
        Outcome::SignRemoved(id) => Some((format!("Sign {id} removed"), false)),
        Outcome::Deselected => None,
        Outcome::Ignored(reason) => ignored_notice(*reason),
    }
}

fn ignored_notice(reason: IgnoreReason) -> Option<(String, bool)> {
    match reason {
        IgnoreReason::NoRegion => Some(("Allow location or search for a place first".into(), true)),
        IgnoreReason::DropModeArmed => Some(("Finish placing the sign first".into(), true)),
        // A vanished sign needs no toast; the map already shows the truth.
        IgnoreReason::UnknownSign => None,
        IgnoreReason::NoSelection => Some(("No sign selected".into(), true)),
    }
}

pub fn publish_notices(
    mut outcomes: EventReader<SessionOutcome>,
    mut failures: EventReader<LocationFixFailed>,
    mut status: ResMut<StatusLine>,
) {
    for applied in outcomes.read() {
        if let Some((text, is_error)) = notice_for(&applied.outcome) {
            status.show(text, is_error);
        }
    }
    for failure in failures.read() {
        status.show(failure.0.to_string(), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::state::SignId;

    #[test]
    fn placed_notice_names_the_sign() {
        let (text, is_error) = notice_for(&Outcome::SignPlaced(SignId(3))).unwrap();
        assert!(text.contains('3'), "got: {text}");
        assert!(!is_error);
    }

    #[test]
    fn removal_without_selection_is_an_error_notice() {
        let (text, is_error) = notice_for(&Outcome::Ignored(IgnoreReason::NoSelection)).unwrap();
        assert!(text.contains("selected"), "got: {text}");
        assert!(is_error);
    }

    #[test]
    fn follow_up_fixes_stay_silent() {
        assert!(notice_for(&Outcome::LocationFixed {
            established_region: false
        })
        .is_none());
    }

    #[test]
    fn zoom_and_deselect_stay_silent() {
        assert!(notice_for(&Outcome::Zoomed).is_none());
        assert!(notice_for(&Outcome::Deselected).is_none());
    }

    #[test]
    fn unknown_sign_stays_silent() {
        assert!(notice_for(&Outcome::Ignored(IgnoreReason::UnknownSign)).is_none());
    }
}
