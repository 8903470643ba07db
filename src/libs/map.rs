//! Map view collaborator.
//!
//! The controller only needs a handful of map operations: center on a
//! coordinate, add or remove a point marker carrying a popup, and
//! re-center on a marker. [`MapView`] captures exactly that; [`GeoJsonMap`]
//! implements it by keeping the markers in memory and exporting them as a
//! GeoJSON `FeatureCollection` that any map viewer can open, together with
//! an OpenStreetMap link for the current view.

use super::workout::{Coords, Workout};
use anyhow::Result;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

pub const DEFAULT_ZOOM_LEVEL: u8 = 14;
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";

/// Handle of a marker placed on a [`MapView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

/// Popup bound to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
}

impl Popup {
    /// The popup shown for a workout marker: icon plus description.
    pub fn for_workout(workout: &Workout) -> Self {
        let workout_type = workout.workout_type();
        Popup {
            content: format!("{} {}", workout_type.icon(), workout.description),
            class_name: format!("{}-popup", workout_type),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coords: Coords,
    pub popup: Popup,
    pub popup_open: bool,
}

pub trait MapView {
    /// Centers the view. `animate` pans instead of jumping.
    fn set_view(&mut self, coords: Coords, zoom: u8, animate: bool);
    fn add_marker(&mut self, coords: Coords, popup: Popup) -> MarkerId;
    /// Returns `false` when the handle is unknown.
    fn remove_marker(&mut self, marker: MarkerId) -> bool;
    fn open_popup(&mut self, marker: MarkerId);
}

#[derive(Debug, Clone)]
pub struct GeoJsonMap {
    center: Coords,
    zoom: u8,
    tile_url: String,
    markers: BTreeMap<MarkerId, Marker>,
    next_marker: u64,
}

impl GeoJsonMap {
    /// Creates the map already centered on `center`.
    pub fn new(center: Coords, zoom: u8, tile_url: &str) -> Self {
        GeoJsonMap {
            center,
            zoom,
            tile_url: tile_url.to_string(),
            markers: BTreeMap::new(),
            next_marker: 1,
        }
    }

    pub fn center(&self) -> Coords {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn marker(&self, marker: MarkerId) -> Option<&Marker> {
        self.markers.get(&marker)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// OpenStreetMap link for the current center and zoom.
    pub fn url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/#map={}/{:.5}/{:.5}",
            self.zoom,
            self.center.lat(),
            self.center.lng()
        )
    }

    /// `[min_lng, min_lat, max_lng, max_lat]` over all markers.
    pub fn bounds(&self) -> Option<[f64; 4]> {
        let mut markers = self.markers.values();
        let first = markers.next()?.coords;
        let init = [first.lng(), first.lat(), first.lng(), first.lat()];

        Some(markers.fold(init, |[min_lng, min_lat, max_lng, max_lat], marker| {
            [
                min_lng.min(marker.coords.lng()),
                min_lat.min(marker.coords.lat()),
                max_lng.max(marker.coords.lng()),
                max_lat.max(marker.coords.lat()),
            ]
        }))
    }

    pub fn to_geojson(&self) -> Value {
        let features: Vec<Value> = self
            .markers
            .values()
            .map(|marker| {
                json!({
                    "type": "Feature",
                    // GeoJSON positions are longitude first
                    "geometry": { "type": "Point", "coordinates": [marker.coords.lng(), marker.coords.lat()] },
                    "properties": {
                        "popup": marker.popup.content,
                        "className": marker.popup.class_name,
                        "maxWidth": marker.popup.max_width,
                        "minWidth": marker.popup.min_width,
                        "autoClose": marker.popup.auto_close,
                        "closeOnClick": marker.popup.close_on_click,
                        "open": marker.popup_open,
                    }
                })
            })
            .collect();

        let mut collection = json!({
            "type": "FeatureCollection",
            "features": features,
            "properties": {
                "center": [self.center.lng(), self.center.lat()],
                "zoom": self.zoom,
                "tiles": self.tile_url,
            }
        });
        if let Some(bbox) = self.bounds() {
            collection["bbox"] = json!(bbox);
        }
        collection
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(&file, &self.to_geojson())?;
        Ok(())
    }
}

impl MapView for GeoJsonMap {
    fn set_view(&mut self, coords: Coords, zoom: u8, _animate: bool) {
        self.center = coords;
        self.zoom = zoom;
    }

    fn add_marker(&mut self, coords: Coords, popup: Popup) -> MarkerId {
        let id = MarkerId(self.next_marker);
        self.next_marker += 1;
        self.markers.insert(
            id,
            Marker {
                coords,
                popup,
                popup_open: false,
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) -> bool {
        self.markers.remove(&marker).is_some()
    }

    fn open_popup(&mut self, marker: MarkerId) {
        if let Some(marker) = self.markers.get_mut(&marker) {
            marker.popup_open = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn popup(content: &str) -> Popup {
        Popup {
            content: content.to_string(),
            class_name: "running-popup".to_string(),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
        }
    }

    #[test]
    fn test_markers_add_remove() {
        let mut map = GeoJsonMap::new(Coords::new(0.0, 0.0), DEFAULT_ZOOM_LEVEL, DEFAULT_TILE_URL);
        let a = map.add_marker(Coords::new(1.0, 1.0), popup("a"));
        let b = map.add_marker(Coords::new(2.0, 2.0), popup("b"));

        assert_ne!(a, b);
        assert!(map.remove_marker(a));
        assert!(!map.remove_marker(a));
        assert_eq!(map.marker_count(), 1);
    }

    #[test]
    fn test_bounds_and_geojson() {
        let mut map = GeoJsonMap::new(Coords::new(40.7, -73.9), 12, DEFAULT_TILE_URL);
        assert_eq!(map.bounds(), None);

        map.add_marker(Coords::new(40.0, -74.0), popup("a"));
        map.add_marker(Coords::new(41.0, -73.0), popup("b"));

        assert_eq!(map.bounds(), Some([-74.0, 40.0, -73.0, 41.0]));

        let geojson = map.to_geojson();
        assert_eq!(geojson["type"], "FeatureCollection");
        assert_eq!(geojson["features"].as_array().unwrap().len(), 2);
        assert_eq!(geojson["features"][0]["geometry"]["coordinates"], json!([-74.0, 40.0]));
        assert_eq!(geojson["bbox"], json!([-74.0, 40.0, -73.0, 41.0]));
    }

    #[test]
    fn test_set_view_and_url() {
        let mut map = GeoJsonMap::new(Coords::new(0.0, 0.0), DEFAULT_ZOOM_LEVEL, DEFAULT_TILE_URL);
        map.set_view(Coords::new(38.7223, -9.1393), 13, true);

        assert_eq!(map.center(), Coords::new(38.7223, -9.1393));
        assert_eq!(map.url(), "https://www.openstreetmap.org/#map=13/38.72230/-9.13930");
    }

    #[test]
    fn test_workout_popup() {
        let ride = Workout::cycling(Coords::new(1.0, 2.0), 20.0, 60.0, 300.0);
        let popup = Popup::for_workout(&ride);

        assert_eq!(popup.class_name, "cycling-popup");
        assert!(popup.content.starts_with("🚴‍♀️ Cycling on "));
    }
}
