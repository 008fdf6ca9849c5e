//! Place search capability.
//!
//! Queries go through the [`PlaceSearchProvider`] seam; the bundled
//! [`Gazetteer`] matches against a built-in table of places around the
//! Newark / New York harbor area. Searches resolve on the async compute
//! pool and the latest submitted query always wins.

use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use serde::{Deserialize, Serialize};

use session::app_state::AppScreen;
use session::geo::Coordinate;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of suggestions returned per query.
pub const MAX_SUGGESTIONS: usize = 8;

/// Built-in place table: display name, latitude, longitude.
const PLACES: &[(&str, f64, f64)] = &[
    ("Newark Penn Station", 40.7344, -74.1643),
    ("Newark Museum of Art", 40.7428, -74.1711),
    ("Branch Brook Park", 40.7595, -74.1716),
    ("Military Park", 40.7391, -74.1693),
    ("Ironbound District", 40.7270, -74.1554),
    ("Journal Square", 40.7329, -74.0630),
    ("Jersey City Waterfront", 40.7178, -74.0332),
    ("Exchange Place", 40.7162, -74.0330),
    ("Grove Street Station", 40.7195, -74.0431),
    ("Liberty State Park", 40.7034, -74.0551),
    ("Hoboken Terminal", 40.7349, -74.0273),
    ("Washington Street, Hoboken", 40.7440, -74.0290),
    ("Bayonne Bridge", 40.6394, -74.1419),
    ("Statue of Liberty", 40.6892, -74.0445),
    ("Ellis Island", 40.6995, -74.0396),
    ("Battery Park", 40.7033, -74.0170),
    ("Wall Street", 40.7064, -74.0094),
    ("Union City Heights", 40.7670, -74.0326),
];

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// One search hit: a display name and the coordinate to recenter on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    pub coordinate: Coordinate,
}

/// Capability seam for place search. Runs on the async pool, so
/// implementations must be `Send + Sync`.
pub trait PlaceSearchProvider: Send + Sync {
    /// Return up to [`MAX_SUGGESTIONS`] candidates for the query, best first.
    /// An empty or whitespace query returns no candidates.
    fn search(&self, query: &str) -> Vec<PlaceCandidate>;
}

/// Offline provider backed by the built-in [`PLACES`] table.
///
/// Matching is case-insensitive substring on the place name; candidates come
/// back in table order.
#[derive(Default)]
pub struct Gazetteer;

impl PlaceSearchProvider for Gazetteer {
    fn search(&self, query: &str) -> Vec<PlaceCandidate> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut results = Vec::new();
        for &(name, latitude, longitude) in PLACES {
            if name.to_lowercase().contains(&needle) {
                results.push(PlaceCandidate {
                    name: name.to_string(),
                    coordinate: Coordinate::new(latitude, longitude),
                });
                if results.len() >= MAX_SUGGESTIONS {
                    break;
                }
            }
        }
        results
    }
}

// ---------------------------------------------------------------------------
// Resources and events
// ---------------------------------------------------------------------------

/// The active search provider, shared with in-flight search tasks.
#[derive(Resource)]
pub struct SearchProvider(pub Arc<dyn PlaceSearchProvider>);

impl Default for SearchProvider {
    fn default() -> Self {
        Self(Arc::new(Gazetteer))
    }
}

/// A search query submitted from the UI.
#[derive(Event, Debug, Clone)]
pub struct PlaceQuerySubmitted(pub String);

/// Candidates for the most recently completed query.
#[derive(Resource, Default)]
pub struct PlaceSuggestions {
    /// The query the current results answer.
    pub query: String,
    pub results: Vec<PlaceCandidate>,
}

impl PlaceSuggestions {
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
    }
}

struct InFlightSearch {
    query: String,
    task: Task<Vec<PlaceCandidate>>,
}

/// The search currently resolving on the async pool, if any.
#[derive(Resource, Default)]
pub struct PendingSearch(Option<InFlightSearch>);

impl PendingSearch {
    pub fn in_flight(&self) -> bool {
        self.0.is_some()
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Spawn an async search for the newest submitted query.
///
/// When several queries arrive in one frame only the last one runs. A new
/// query cancels whatever search was still in flight.
fn dispatch_place_search(
    mut queries: EventReader<PlaceQuerySubmitted>,
    provider: Res<SearchProvider>,
    mut pending: ResMut<PendingSearch>,
    mut suggestions: ResMut<PlaceSuggestions>,
) {
    let Some(submitted) = queries.read().last() else {
        return;
    };
    let query = submitted.0.trim().to_string();

    if query.is_empty() {
        pending.0 = None;
        suggestions.clear();
        return;
    }
    if let Some(in_flight) = &pending.0 {
        if in_flight.query == query {
            return;
        }
    }

    let provider = Arc::clone(&provider.0);
    let task_query = query.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move { provider.search(&task_query) });
    pending.0 = Some(InFlightSearch { query, task });
}

/// Poll the in-flight search and publish completed results.
fn collect_place_search(
    mut pending: ResMut<PendingSearch>,
    mut suggestions: ResMut<PlaceSuggestions>,
) {
    let Some(in_flight) = pending.0.as_mut() else {
        return;
    };
    let Some(results) = block_on(futures_lite::future::poll_once(&mut in_flight.task)) else {
        return;
    };

    debug!(
        "search: {} candidate(s) for '{}'",
        results.len(),
        in_flight.query
    );
    suggestions.query = std::mem::take(&mut in_flight.query);
    suggestions.results = results;
    pending.0 = None;
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct PlaceSearchPlugin;

impl Plugin for PlaceSearchPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SearchProvider>()
            .init_resource::<PlaceSuggestions>()
            .init_resource::<PendingSearch>()
            .add_event::<PlaceQuerySubmitted>()
            .add_systems(
                Update,
                (dispatch_place_search, collect_place_search)
                    .chain()
                    .run_if(in_state(AppScreen::Map)),
            );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
