//! Session event alphabet and transition outcomes.
//!
//! Every interaction that can change the session (provider results, map
//! taps, zoom steps, mode toggles) arrives as a [`SessionEvent`]. Applying
//! one yields an [`Outcome`] describing what actually happened, which the
//! session system republishes as a [`SessionOutcome`] for the UI status
//! layer. No event is fatal: anything the current state cannot honor
//! degrades to [`Outcome::Ignored`] with a reason.

use bevy::prelude::*;

use crate::geo::Coordinate;
use crate::state::SignId;

/// Input alphabet of the session state machine.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// The device location provider delivered a fix.
    DeviceLocationResolved(Coordinate),
    /// The user picked a place from the search suggestions.
    PlaceSelected(Coordinate),
    ZoomIn,
    ZoomOut,
    /// Arm or disarm sign-drop mode.
    ToggleDropMode,
    /// A tap on the map surface (not on a marker).
    MapTapped(Coordinate),
    /// A tap on an existing sign marker.
    MarkerTapped(SignId),
    /// Remove the currently selected sign, if any.
    RemoveSelected,
}

/// Why an event was dropped without changing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Zoom arrived before any region was established.
    NoRegion,
    /// Marker taps are not selections while drop mode is armed.
    DropModeArmed,
    /// The tapped sign id is no longer on the board.
    UnknownSign,
    /// Removal was requested with nothing selected.
    NoSelection,
}

/// What applying a [`SessionEvent`] did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Device location stored; `established_region` is true only for the
    /// fix that created the region.
    LocationFixed { established_region: bool },
    /// Region recentered on a searched place (deltas untouched unless this
    /// selection established the region).
    Recentered { established_region: bool },
    /// Zoom step applied; deltas remain inside the clamp bounds.
    Zoomed,
    /// Drop mode flipped; payload is the new value.
    DropMode(bool),
    SignPlaced(SignId),
    SignSelected(SignId),
    SignRemoved(SignId),
    /// Tap on empty map outside drop mode; any selection was cleared.
    Deselected,
    /// Event had no effect.
    Ignored(IgnoreReason),
}

/// Applied event plus its outcome, republished for the UI/status layer.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SessionOutcome {
    pub event: SessionEvent,
    pub outcome: Outcome,
}
