//! The sign-placement and map-region state model.
//!
//! [`SessionState`] owns everything the map screen renders from: the region
//! viewport, the device-derived home location, the placed sign markers, the
//! drop interaction mode, and the current selection. Each [`SessionEvent`]
//! is applied by a total, synchronous transition that can never leave the
//! invariants violated:
//!
//! - the region, once established, is never un-set and never repositioned
//!   by a later location fix (first result establishing it wins);
//! - the selection, when present, always references a live sign;
//! - region deltas stay inside the zoom clamp bounds;
//! - a committed drop always disarms drop mode.

use std::fmt;

use crate::events::{IgnoreReason, Outcome, SessionEvent};
use crate::geo::{Coordinate, Region};

// =============================================================================
// Types
// =============================================================================

/// Stable identity of a placed sign. Ids are assigned monotonically starting
/// at 1 and are never reused within a session, so a removal can never make a
/// stale selection point at the wrong sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SignId(pub u64);

impl fmt::Display for SignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed yard-sign pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignMarker {
    pub id: SignId,
    pub coordinate: Coordinate,
}

// =============================================================================
// State
// =============================================================================

/// Current value of the map session. The UI layer holds one of these in a
/// resource and re-renders from [`SessionState::view`] after each event.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Latest device fix, if any. Updated by every fix; only the first one
    /// (absent an earlier search) positions the region.
    pub device_location: Option<Coordinate>,
    /// Map viewport. `None` until the first fix or place selection.
    pub region: Option<Region>,
    /// Placed signs in placement order.
    pub signs: Vec<SignMarker>,
    /// When armed, the next map tap commits a sign.
    pub drop_mode: bool,
    /// Currently selected sign, if any.
    pub selected: Option<SignId>,
    next_sign_id: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            device_location: None,
            region: None,
            signs: Vec::new(),
            drop_mode: false,
            selected: None,
            next_sign_id: 1,
        }
    }
}

impl SessionState {
    /// Apply one event, returning what happened. Total over every event in
    /// every state; failures degrade to [`Outcome::Ignored`].
    pub fn apply(&mut self, event: &SessionEvent) -> Outcome {
        match *event {
            SessionEvent::DeviceLocationResolved(coord) => self.resolve_device_location(coord),
            SessionEvent::PlaceSelected(coord) => self.select_place(coord),
            SessionEvent::ZoomIn => self.zoom_in(),
            SessionEvent::ZoomOut => self.zoom_out(),
            SessionEvent::ToggleDropMode => self.toggle_drop_mode(),
            SessionEvent::MapTapped(coord) => self.tap_map(coord),
            SessionEvent::MarkerTapped(id) => self.tap_marker(id),
            SessionEvent::RemoveSelected => self.remove_selected(),
        }
    }

    /// The marker the current selection points at.
    pub fn selected_marker(&self) -> Option<&SignMarker> {
        let id = self.selected?;
        self.signs.iter().find(|sign| sign.id == id)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    fn resolve_device_location(&mut self, coord: Coordinate) -> Outcome {
        self.device_location = Some(coord);
        // First result establishing the region wins: a fix that arrives
        // after a search (or an earlier fix) only refreshes the home dot.
        let established_region = self.region.is_none();
        if established_region {
            self.region = Some(Region::centered_on(coord));
        }
        Outcome::LocationFixed { established_region }
    }

    fn select_place(&mut self, coord: Coordinate) -> Outcome {
        match self.region.as_mut() {
            Some(region) => {
                // Re-center only. Zoom is user-owned state; a new search must
                // not reset it.
                region.center = coord;
                Outcome::Recentered {
                    established_region: false,
                }
            }
            None => {
                self.region = Some(Region::centered_on(coord));
                Outcome::Recentered {
                    established_region: true,
                }
            }
        }
    }

    fn zoom_in(&mut self) -> Outcome {
        match self.region.as_mut() {
            Some(region) => {
                region.zoom_in();
                Outcome::Zoomed
            }
            None => Outcome::Ignored(IgnoreReason::NoRegion),
        }
    }

    fn zoom_out(&mut self) -> Outcome {
        match self.region.as_mut() {
            Some(region) => {
                region.zoom_out();
                Outcome::Zoomed
            }
            None => Outcome::Ignored(IgnoreReason::NoRegion),
        }
    }

    fn toggle_drop_mode(&mut self) -> Outcome {
        self.drop_mode = !self.drop_mode;
        if self.drop_mode {
            // Placement and selection are exclusive interaction modes.
            self.selected = None;
        }
        Outcome::DropMode(self.drop_mode)
    }

    fn tap_map(&mut self, coord: Coordinate) -> Outcome {
        if self.drop_mode {
            let id = SignId(self.next_sign_id);
            self.next_sign_id += 1;
            self.signs.push(SignMarker {
                id,
                coordinate: coord,
            });
            self.drop_mode = false;
            Outcome::SignPlaced(id)
        } else {
            self.selected = None;
            Outcome::Deselected
        }
    }

    fn tap_marker(&mut self, id: SignId) -> Outcome {
        if self.drop_mode {
            // A tap on a marker while armed is ambiguous intent; the drop
            // stays pending and the selection stays empty.
            return Outcome::Ignored(IgnoreReason::DropModeArmed);
        }
        if !self.signs.iter().any(|sign| sign.id == id) {
            return Outcome::Ignored(IgnoreReason::UnknownSign);
        }
        self.selected = Some(id);
        Outcome::SignSelected(id)
    }

    fn remove_selected(&mut self) -> Outcome {
        let Some(id) = self.selected else {
            return Outcome::Ignored(IgnoreReason::NoSelection);
        };
        self.signs.retain(|sign| sign.id != id);
        self.selected = None;
        Outcome::SignRemoved(id)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA, ZOOM_STEP};

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude)
    }

    #[test]
    fn first_fix_establishes_region_with_default_deltas() {
        let mut state = SessionState::default();
        let outcome = state.apply(&SessionEvent::DeviceLocationResolved(coord(40.0, -73.0)));
        assert_eq!(
            outcome,
            Outcome::LocationFixed {
                established_region: true
            }
        );
        assert_eq!(state.device_location, Some(coord(40.0, -73.0)));
        let region = state.region.expect("region established");
        assert_eq!(region.center, coord(40.0, -73.0));
        assert_eq!(region.latitude_delta, DEFAULT_LATITUDE_DELTA);
        assert_eq!(region.longitude_delta, DEFAULT_LONGITUDE_DELTA);
    }

    #[test]
    fn later_fix_updates_location_but_not_region() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::DeviceLocationResolved(coord(40.0, -73.0)));
        let outcome = state.apply(&SessionEvent::DeviceLocationResolved(coord(40.5, -73.5)));
        assert_eq!(
            outcome,
            Outcome::LocationFixed {
                established_region: false
            }
        );
        assert_eq!(state.device_location, Some(coord(40.5, -73.5)));
        assert_eq!(state.region.unwrap().center, coord(40.0, -73.0));
    }

    #[test]
    fn fix_after_search_never_repositions_region() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::PlaceSelected(coord(41.0, -74.0)));
        let outcome = state.apply(&SessionEvent::DeviceLocationResolved(coord(40.0, -73.0)));
        assert_eq!(
            outcome,
            Outcome::LocationFixed {
                established_region: false
            }
        );
        // The late fix only refreshes the home dot.
        assert_eq!(state.region.unwrap().center, coord(41.0, -74.0));
        assert_eq!(state.device_location, Some(coord(40.0, -73.0)));
    }

    #[test]
    fn search_establishes_region_when_first() {
        let mut state = SessionState::default();
        let outcome = state.apply(&SessionEvent::PlaceSelected(coord(41.0, -74.0)));
        assert_eq!(
            outcome,
            Outcome::Recentered {
                established_region: true
            }
        );
        let region = state.region.unwrap();
        assert_eq!(region.center, coord(41.0, -74.0));
        assert_eq!(region.latitude_delta, DEFAULT_LATITUDE_DELTA);
    }

    #[test]
    fn search_recenters_without_touching_zoom() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::DeviceLocationResolved(coord(40.0, -73.0)));
        state.apply(&SessionEvent::ZoomIn);
        state.apply(&SessionEvent::ZoomIn);
        let before = state.region.unwrap();

        let outcome = state.apply(&SessionEvent::PlaceSelected(coord(41.0, -74.0)));
        assert_eq!(
            outcome,
            Outcome::Recentered {
                established_region: false
            }
        );
        let after = state.region.unwrap();
        assert_eq!(after.center, coord(41.0, -74.0));
        assert_eq!(after.latitude_delta, before.latitude_delta);
        assert_eq!(after.longitude_delta, before.longitude_delta);
    }

    #[test]
    fn zoom_without_region_is_ignored() {
        let mut state = SessionState::default();
        assert_eq!(
            state.apply(&SessionEvent::ZoomIn),
            Outcome::Ignored(IgnoreReason::NoRegion)
        );
        assert_eq!(
            state.apply(&SessionEvent::ZoomOut),
            Outcome::Ignored(IgnoreReason::NoRegion)
        );
        assert_eq!(state, SessionState::default());
    }

    #[test]
    fn zoom_steps_move_deltas_by_step() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::DeviceLocationResolved(coord(40.0, -73.0)));
        for _ in 0..3 {
            assert_eq!(state.apply(&SessionEvent::ZoomIn), Outcome::Zoomed);
        }
        let region = state.region.unwrap();
        let expected = DEFAULT_LATITUDE_DELTA - 3.0 * ZOOM_STEP;
        assert!((region.latitude_delta - expected).abs() < 1e-12);
        assert!((region.longitude_delta - expected).abs() < 1e-12);
    }

    #[test]
    fn toggle_arms_and_disarms_drop_mode() {
        let mut state = SessionState::default();
        assert_eq!(
            state.apply(&SessionEvent::ToggleDropMode),
            Outcome::DropMode(true)
        );
        assert!(state.drop_mode);
        assert_eq!(
            state.apply(&SessionEvent::ToggleDropMode),
            Outcome::DropMode(false)
        );
        assert!(!state.drop_mode);
    }

    #[test]
    fn entering_drop_mode_clears_selection() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        state.apply(&SessionEvent::MapTapped(coord(40.1, -73.1)));
        state.apply(&SessionEvent::MarkerTapped(SignId(1)));
        assert_eq!(state.selected, Some(SignId(1)));

        state.apply(&SessionEvent::ToggleDropMode);
        assert!(state.drop_mode);
        assert_eq!(state.selected, None);
    }

    #[test]
    fn armed_tap_commits_sign_and_disarms() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        let outcome = state.apply(&SessionEvent::MapTapped(coord(41.5, -74.5)));
        assert_eq!(outcome, Outcome::SignPlaced(SignId(1)));
        assert_eq!(state.signs.len(), 1);
        assert_eq!(state.signs[0].coordinate, coord(41.5, -74.5));
        assert!(!state.drop_mode);
    }

    #[test]
    fn idle_tap_only_deselects() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        state.apply(&SessionEvent::MapTapped(coord(40.1, -73.1)));
        state.apply(&SessionEvent::MarkerTapped(SignId(1)));

        let outcome = state.apply(&SessionEvent::MapTapped(coord(40.2, -73.2)));
        assert_eq!(outcome, Outcome::Deselected);
        assert_eq!(state.signs.len(), 1, "idle taps never add or remove signs");
        assert_eq!(state.selected, None);
    }

    #[test]
    fn marker_tap_selects_live_sign() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        state.apply(&SessionEvent::MapTapped(coord(40.1, -73.1)));
        let outcome = state.apply(&SessionEvent::MarkerTapped(SignId(1)));
        assert_eq!(outcome, Outcome::SignSelected(SignId(1)));
        assert_eq!(state.selected, Some(SignId(1)));
        assert_eq!(state.selected_marker().unwrap().coordinate, coord(40.1, -73.1));
    }

    #[test]
    fn marker_tap_ignored_while_armed() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        state.apply(&SessionEvent::MapTapped(coord(40.1, -73.1)));
        state.apply(&SessionEvent::ToggleDropMode);
        let outcome = state.apply(&SessionEvent::MarkerTapped(SignId(1)));
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::DropModeArmed));
        assert_eq!(state.selected, None);
        assert!(state.drop_mode, "the pending drop stays armed");
    }

    #[test]
    fn marker_tap_for_unknown_id_is_ignored() {
        let mut state = SessionState::default();
        let outcome = state.apply(&SessionEvent::MarkerTapped(SignId(7)));
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::UnknownSign));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn remove_without_selection_is_a_noop() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        state.apply(&SessionEvent::MapTapped(coord(40.1, -73.1)));
        let before = state.clone();

        let outcome = state.apply(&SessionEvent::RemoveSelected);
        assert_eq!(outcome, Outcome::Ignored(IgnoreReason::NoSelection));
        assert_eq!(state, before);
    }

    #[test]
    fn remove_selected_drops_sign_and_clears_selection() {
        let mut state = SessionState::default();
        state.apply(&SessionEvent::ToggleDropMode);
        state.apply(&SessionEvent::MapTapped(coord(40.1, -73.1)));
        state.apply(&SessionEvent::MarkerTapped(SignId(1)));

        let outcome = state.apply(&SessionEvent::RemoveSelected);
        assert_eq!(outcome, Outcome::SignRemoved(SignId(1)));
        assert!(state.signs.is_empty());
        assert_eq!(state.selected, None);
    }

    #[test]
    fn ids_stay_monotonic_across_removals() {
        let mut state = SessionState::default();
        let mut place = |state: &mut SessionState, latitude: f64| {
            state.apply(&SessionEvent::ToggleDropMode);
            state.apply(&SessionEvent::MapTapped(coord(latitude, -73.0)))
        };

        assert_eq!(place(&mut state, 40.1), Outcome::SignPlaced(SignId(1)));
        assert_eq!(place(&mut state, 40.2), Outcome::SignPlaced(SignId(2)));

        state.apply(&SessionEvent::MarkerTapped(SignId(2)));
        state.apply(&SessionEvent::RemoveSelected);

        // The freed id is never handed out again.
        assert_eq!(place(&mut state, 40.3), Outcome::SignPlaced(SignId(3)));
        let ids: Vec<u64> = state.signs.iter().map(|sign| sign.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn placement_order_is_preserved() {
        let mut state = SessionState::default();
        for longitude in [-74.0, -74.1, -74.2] {
            state.apply(&SessionEvent::ToggleDropMode);
            state.apply(&SessionEvent::MapTapped(coord(41.0, longitude)));
        }
        let longitudes: Vec<f64> = state
            .signs
            .iter()
            .map(|sign| sign.coordinate.longitude)
            .collect();
        assert_eq!(longitudes, vec![-74.0, -74.1, -74.2]);
    }

    #[test]
    fn selection_invariant_holds_after_every_transition() {
        // Drive a messy sequence and check the invariant at each step.
        let events = [
            SessionEvent::ToggleDropMode,
            SessionEvent::MapTapped(coord(40.1, -73.1)),
            SessionEvent::MarkerTapped(SignId(1)),
            SessionEvent::ToggleDropMode,
            SessionEvent::MapTapped(coord(40.2, -73.2)),
            SessionEvent::MarkerTapped(SignId(2)),
            SessionEvent::RemoveSelected,
            SessionEvent::RemoveSelected,
            SessionEvent::MarkerTapped(SignId(2)),
            SessionEvent::MapTapped(coord(40.3, -73.3)),
        ];
        let mut state = SessionState::default();
        for event in events {
            state.apply(&event);
            if let Some(id) = state.selected {
                assert!(
                    state.signs.iter().any(|sign| sign.id == id),
                    "selection {id} points at a live sign after {event:?}"
                );
            }
        }
    }
}
