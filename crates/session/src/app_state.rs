//! Top-level application state machine.
//!
//! Defines [`AppScreen`], a Bevy [`States`] enum with two screens: a stub
//! login screen, then the map. Map systems (providers, rendering, panels)
//! gate on [`AppScreen::Map`].
//!
//! The state lives here in the core crate so that every other crate can
//! gate on it without circular dependencies.

use bevy::prelude::*;

/// Which screen the application is showing.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppScreen {
    /// Stub sign-in screen; any of its buttons moves to the map.
    #[default]
    Login,
    /// The sign-mapping screen.
    Map,
}
