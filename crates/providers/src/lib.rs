//! Capability providers feeding the map session.
//!
//! Two device-facing capabilities live here, each behind a trait so the
//! simulated implementations can be swapped without touching the session:
//!
//! - [`location`]: permission check plus an async device location fix.
//! - [`places`]: async place search with a suggestion list.
//!
//! Both pipelines follow the same shape: a request event, a dispatch system
//! that spawns work on the async compute pool, and a collect system that
//! polls the task and publishes the result.

use bevy::prelude::*;

pub mod location;
pub mod places;


pub struct ProvidersPlugin;

impl Plugin for ProvidersPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((location::LocationPlugin, places::PlaceSearchPlugin));
    }
}
