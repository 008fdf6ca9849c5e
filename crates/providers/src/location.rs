//! Device location capability.
//!
//! The platform location stack is hidden behind [`DeviceLocationProvider`] so
//! the rest of the app only ever sees a permission check and a fix. The
//! bundled [`SimulatedGps`] produces a deterministic fix near a configured
//! home coordinate; fixes resolve on the async compute pool so a slow
//! provider never blocks a frame.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;
use bevy::tasks::{block_on, AsyncComputeTaskPool, Task};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use session::app_state::AppScreen;
use session::events::SessionEvent;
use session::geo::Coordinate;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Fallback home coordinate for the simulated receiver (Newark, NJ).
const DEFAULT_HOME: (f64, f64) = (40.7357, -74.1724);

/// Maximum offset applied to each axis of a simulated fix, in degrees.
/// Roughly a city block, so the fix lands near home but never exactly on it.
const DEFAULT_JITTER: f64 = 0.0005;

/// Seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Outcome of asking the platform for location access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Errors a location fix can fail with.
///
/// Every variant degrades to a no-op at the session level: the fix is
/// dropped, a warning is logged, and the map keeps whatever region it has.
#[derive(Debug)]
pub enum LocationError {
    /// The user (or simulated policy) refused location access.
    PermissionDenied,
    /// The receiver could not produce a fix.
    Unavailable(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::PermissionDenied => write!(f, "Location permission denied"),
            LocationError::Unavailable(msg) => write!(f, "Location unavailable: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Capability seam for device location.
///
/// Implementations must be cheap to call from the async pool; the resolve
/// path runs off the main schedule.
pub trait DeviceLocationProvider: Send + Sync {
    /// Ask for location access. Called once per fix attempt.
    fn request_permission(&self) -> Permission;

    /// Produce a fix. Only called after permission was granted.
    fn resolve(&self) -> Result<Coordinate, LocationError>;
}

// ---------------------------------------------------------------------------
// Simulated receiver
// ---------------------------------------------------------------------------

/// Deterministic stand-in for a GPS receiver.
///
/// The fix is the home coordinate plus a seeded jitter, so identical seeds
/// produce identical fixes across runs and platforms.
pub struct SimulatedGps {
    home: Coordinate,
    jitter: f64,
    permission: Permission,
    seed: u64,
}

impl SimulatedGps {
    pub fn new(home: Coordinate) -> Self {
        Self {
            home,
            jitter: DEFAULT_JITTER,
            permission: Permission::Granted,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permission = permission;
        self
    }
}

impl Default for SimulatedGps {
    fn default() -> Self {
        Self::new(Coordinate::new(DEFAULT_HOME.0, DEFAULT_HOME.1))
    }
}

impl DeviceLocationProvider for SimulatedGps {
    fn request_permission(&self) -> Permission {
        self.permission
    }

    fn resolve(&self) -> Result<Coordinate, LocationError> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let lat = self.home.latitude + rng.gen_range(-self.jitter..=self.jitter);
        let lon = self.home.longitude + rng.gen_range(-self.jitter..=self.jitter);
        Ok(Coordinate::new(lat, lon))
    }
}

// ---------------------------------------------------------------------------
// Resources and events
// ---------------------------------------------------------------------------

/// The active location provider, shared with in-flight fix tasks.
#[derive(Resource)]
pub struct LocationProvider(pub Arc<dyn DeviceLocationProvider>);

impl Default for LocationProvider {
    fn default() -> Self {
        Self(Arc::new(SimulatedGps::default()))
    }
}

/// Request a fresh device location fix.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LocationFixRequested;

/// A fix attempt ended in an error. The session never hears about
/// failures; this event exists for the status line.
#[derive(Event, Debug)]
pub struct LocationFixFailed(pub LocationError);

/// The fix currently resolving on the async pool, if any.
#[derive(Resource, Default)]
pub struct PendingLocationFix(Option<Task<Result<Coordinate, LocationError>>>);

impl PendingLocationFix {
    pub fn in_flight(&self) -> bool {
        self.0.is_some()
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Kick off the initial fix as soon as the map screen opens.
fn request_fix_on_map_entry(mut requests: EventWriter<LocationFixRequested>) {
    requests.send(LocationFixRequested);
}

/// Spawn an async resolve task for the latest fix request.
///
/// Requests arriving while a fix is already in flight are dropped; the
/// in-flight result will be at least as fresh.
fn dispatch_location_fix(
    mut requests: EventReader<LocationFixRequested>,
    provider: Res<LocationProvider>,
    mut pending: ResMut<PendingLocationFix>,
) {
    if requests.read().next().is_none() {
        return;
    }
    if pending.0.is_some() {
        debug!("location: fix already in flight, dropping request");
        return;
    }

    let provider = Arc::clone(&provider.0);
    let task = AsyncComputeTaskPool::get().spawn(async move {
        match provider.request_permission() {
            Permission::Granted => provider.resolve(),
            Permission::Denied => Err(LocationError::PermissionDenied),
        }
    });
    pending.0 = Some(task);
}

/// Poll the in-flight fix and hand a successful coordinate to the session.
///
/// A failed fix is logged and republished as [`LocationFixFailed`]; the
/// session never hears about it.
fn collect_location_fix(
    mut pending: ResMut<PendingLocationFix>,
    mut session_events: EventWriter<SessionEvent>,
    mut failures: EventWriter<LocationFixFailed>,
) {
    let Some(task) = pending.0.as_mut() else {
        return;
    };
    let Some(result) = block_on(futures_lite::future::poll_once(task)) else {
        return;
    };
    pending.0 = None;

    match result {
        Ok(coordinate) => {
            session_events.send(SessionEvent::DeviceLocationResolved(coordinate));
        }
        Err(err) => {
            warn!("location: fix failed: {err}");
            failures.send(LocationFixFailed(err));
        }
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

pub struct LocationPlugin;

impl Plugin for LocationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LocationProvider>()
            .init_resource::<PendingLocationFix>()
            .add_event::<LocationFixRequested>()
            .add_event::<LocationFixFailed>()
            .add_systems(OnEnter(AppScreen::Map), request_fix_on_map_entry)
            .add_systems(
                Update,
                (dispatch_location_fix, collect_location_fix)
                    .chain()
                    .run_if(in_state(AppScreen::Map)),
            );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
