//! Wiring of the controller for a single command run.
//!
//! Every command opens the persisted store, and the ones that need a map
//! ask for the current position first. A failed lookup is reported once
//! and the command carries on without a map.

use super::app::App;
use super::config::{Config, MapConfig};
use super::geolocation::Geolocator;
use super::map::GeoJsonMap;
use super::messages::Message;
use super::workout::Coords;
use crate::db::storage::LocalStorage;
use crate::{msg_debug, msg_error};
use anyhow::Result;

pub type Session = App<LocalStorage, GeoJsonMap>;

/// Opens the on-disk store and rehydrates the workouts from it.
pub fn open(config: &Config) -> Result<Session> {
    App::new(LocalStorage::new()?, config.map_config().zoom_level)
}

/// Locates the user and attaches a map centered on that position.
///
/// Returns the position, or `None` after telling the user it's unavailable.
pub async fn attach_map<G: Geolocator>(session: &mut Session, locator: &G, map_config: &MapConfig) -> Option<Coords> {
    match locator.locate().await {
        Ok(position) => {
            msg_debug!(Message::PositionFound(position.to_string()));
            session.load_map(GeoJsonMap::new(position, map_config.zoom_level, &map_config.tile_url));
            Some(position)
        }
        Err(e) => {
            msg_debug!(e);
            msg_error!(Message::PositionUnavailable);
            None
        }
    }
}
