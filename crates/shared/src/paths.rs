use crate::models::{Coordinate, HazardCategory};

/// Router patterns, in axum's `{param}` syntax.
pub const CHECK_SAFETY_ROUTE: &str = "/check-safety/{lat}/{lon}";
pub const GUIDELINES_ROUTE: &str = "/safety-guidelines/{category}";

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Request path for a safety check at `coord`.
pub fn check_safety_path(coord: Coordinate) -> String {
    format!("/check-safety/{}/{}", coord.latitude, coord.longitude)
}

/// Request path for the guideline set of `category`.
pub fn guidelines_path(category: HazardCategory) -> String {
    format!("/safety-guidelines/{}", category.slug())
}

/// Turn-by-turn directions to `destination` in an external maps service.
pub fn directions_url(destination: Coordinate) -> String {
    format!(
        "{}&destination={},{}",
        DIRECTIONS_BASE, destination.latitude, destination.longitude
    )
}
