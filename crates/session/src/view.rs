//! Render-ready projection of the session state.
//!
//! UI panels consume a [`MapViewModel`] built after the events of a frame
//! have been applied, instead of resolving selection against the sign list
//! themselves.

use crate::geo::{Coordinate, Region};
use crate::state::{SessionState, SignId};

/// One sign pin as the renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerView {
    pub id: SignId,
    pub coordinate: Coordinate,
    pub selected: bool,
}

/// Everything the map screen draws in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewModel {
    /// `None` until a fix or search establishes the viewport; the renderer
    /// shows no map surface until then.
    pub region: Option<Region>,
    /// Home dot, when a fix has arrived.
    pub device_location: Option<Coordinate>,
    /// Pins in placement order.
    pub markers: Vec<MarkerView>,
    pub drop_mode: bool,
    pub selected: Option<SignId>,
}

impl SessionState {
    /// Build the view model for the current state.
    pub fn view(&self) -> MapViewModel {
        MapViewModel {
            region: self.region,
            device_location: self.device_location,
            markers: self
                .signs
                .iter()
                .map(|sign| MarkerView {
                    id: sign.id,
                    coordinate: sign.coordinate,
                    selected: self.selected == Some(sign.id),
                })
                .collect(),
            drop_mode: self.drop_mode,
            selected: self.selected,
        }
    }
}
