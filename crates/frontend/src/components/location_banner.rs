use dioxus::prelude::*;

use crate::state::LocationStatus;

/// CSS class and text for a location status.
pub fn banner(status: &LocationStatus) -> (&'static str, String) {
    match status {
        LocationStatus::Idle => ("alert info", "Location not requested yet.".to_string()),
        LocationStatus::Detecting => ("alert info", "Detecting your location...".to_string()),
        LocationStatus::Located(coord) => ("alert success", format!("\u{1f4cd} You are at {coord}")),
        LocationStatus::Unavailable(e) => ("alert error", e.user_message().to_string()),
    }
}

#[component]
pub fn LocationBanner(status: LocationStatus, on_locate: EventHandler<()>) -> Element {
    let (class, message) = banner(&status);
    let busy = status == LocationStatus::Detecting;

    rsx! {
        div { id: "location-info",
            div { class: "{class}",
                "{message}"
                button {
                    class: "secondary",
                    disabled: busy,
                    onclick: move |_| on_locate.call(()),
                    if matches!(status, LocationStatus::Unavailable(_)) { "Try Again" } else { "Locate Me" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::LocationError;
    use safety_shared::models::Coordinate;

    #[test]
    fn test_detecting_banner() {
        let (class, text) = banner(&LocationStatus::Detecting);
        assert_eq!(class, "alert info");
        assert_eq!(text, "Detecting your location...");
    }

    #[test]
    fn test_every_failure_reads_the_same() {
        let denied = banner(&LocationStatus::Unavailable(LocationError::PermissionDenied));
        let absent = banner(&LocationStatus::Unavailable(LocationError::Unsupported));
        let timeout = banner(&LocationStatus::Unavailable(LocationError::Timeout));
        assert_eq!(denied, absent);
        assert_eq!(absent, timeout);
        assert_eq!(denied.0, "alert error");
    }

    #[test]
    fn test_located_banner_shows_position() {
        let (_, text) = banner(&LocationStatus::Located(Coordinate::new(12.97, 77.59)));
        assert!(text.contains("12.97000, 77.59000"));
    }
}
