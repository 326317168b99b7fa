//! Map surface state: the view, the user's position marker and the safe-zone
//! markers derived from the latest safety report.
//!
//! Rendering lives in `components::map_view`; this module only holds the
//! marker set and the view so it can be reasoned about without a browser.

use safety_shared::models::{Alert, Coordinate};
use safety_shared::paths;

use crate::coords;

/// Initial view before a position is known (India).
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    latitude: 20.5937,
    longitude: 78.9629,
};
pub const DEFAULT_ZOOM: u8 = 12;

/// Zoom used when centering on the user.
pub const USER_ZOOM: u8 = 13;

pub const MIN_ZOOM: u8 = 2;
pub const MAX_ZOOM: u8 = 19;

/// Nominal view size used for fitting, matching the map container's CSS.
pub const VIEW_WIDTH: f64 = 960.0;
pub const VIEW_HEIGHT: f64 = 540.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserMarker {
    pub position: Coordinate,
    pub accuracy_m: f64,
}

/// A shelter marker. Everything the popup needs is copied in at creation,
/// so it stays valid after the alert list it came from is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeZoneMarker {
    pub name: String,
    pub distance: String,
    pub hazard: String,
    pub position: Coordinate,
}

impl SafeZoneMarker {
    pub fn title(&self) -> String {
        format!("Safe Zone: {}", self.name)
    }

    pub fn distance_line(&self) -> String {
        format!("Distance: {}", self.distance)
    }

    pub fn hazard_line(&self) -> String {
        format!("Type: {} shelter", self.hazard)
    }

    pub fn directions_url(&self) -> String {
        paths::directions_url(self.position)
    }
}

/// One straight evacuation line from the user to a shelter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Route {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    center: Coordinate,
    zoom: u8,
    user: Option<UserMarker>,
    safe_zones: Vec<SafeZoneMarker>,
    routes_visible: bool,
}

impl Default for MapSurface {
    fn default() -> Self {
        MapSurface::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl MapSurface {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        MapSurface {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            user: None,
            safe_zones: Vec::new(),
            routes_visible: false,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn user(&self) -> Option<&UserMarker> {
        self.user.as_ref()
    }

    pub fn safe_zones(&self) -> &[SafeZoneMarker] {
        &self.safe_zones
    }

    /// Replace the position marker and accuracy circle, then center on them.
    pub fn set_user_position(&mut self, position: Coordinate, accuracy_m: f64) {
        self.user = Some(UserMarker {
            position,
            accuracy_m: accuracy_m.max(0.0),
        });
        self.center = position;
        self.zoom = USER_ZOOM;
    }

    /// Drop every safe-zone marker and add one per zone in `alerts`, in order.
    /// This is the only way the safe-zone markers change.
    pub fn replace_safe_zones(&mut self, alerts: &[Alert]) {
        self.safe_zones.clear();
        self.routes_visible = false;

        for alert in alerts {
            for zone in &alert.safe_zones {
                self.safe_zones.push(SafeZoneMarker {
                    name: zone.name.clone(),
                    distance: zone.distance.clone(),
                    hazard: alert.hazard_type.clone(),
                    position: zone.coordinate(),
                });
            }
        }
    }

    /// Routes from the user to every shelter, once requested.
    pub fn evacuation_routes(&self) -> Vec<Route> {
        match (self.routes_visible, self.user) {
            (true, Some(user)) => self
                .safe_zones
                .iter()
                .map(|zone| Route {
                    from: user.position,
                    to: zone.position,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Highlight the routes to the current shelters and bring them into view.
    pub fn show_evacuation_routes(&mut self) {
        self.routes_visible = self.user.is_some() && !self.safe_zones.is_empty();
        self.fit_safe_zones();
    }

    /// Fit the view to every shelter, plus the user when known.
    pub fn fit_safe_zones(&mut self) {
        let mut points: Vec<Coordinate> = self.safe_zones.iter().map(|z| z.position).collect();
        if points.is_empty() {
            return;
        }
        if let Some(user) = self.user {
            points.push(user.position);
        }
        if let Some((center, zoom)) =
            coords::fit_bounds(&points, VIEW_WIDTH, VIEW_HEIGHT, MIN_ZOOM, USER_ZOOM)
        {
            self.center = center;
            self.zoom = zoom;
        }
    }

    pub fn zoom_by(&mut self, delta: i8) {
        let zoom = (self.zoom as i16 + delta as i16).clamp(MIN_ZOOM as i16, MAX_ZOOM as i16);
        self.zoom = zoom as u8;
    }

    /// Move the view by a screen-space drag.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.center = coords::pan(self.center, self.zoom, dx, dy);
    }
}
