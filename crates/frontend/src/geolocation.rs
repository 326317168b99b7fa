use safety_shared::models::Coordinate;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// How long the browser may take to produce a fix.
pub const LOCATION_TIMEOUT_MS: u32 = 10_000;

/// A one-shot position reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coordinate: Coordinate,
    /// Radius of the 95% confidence circle, in meters.
    pub accuracy_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("location services are not available")]
    Unsupported,
    #[error("location permission was denied")]
    PermissionDenied,
    #[error("position is unavailable")]
    Unavailable,
    #[error("timed out waiting for a position fix")]
    Timeout,
}

impl LocationError {
    /// Map a `PositionError.code`.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => LocationError::PermissionDenied,
            3 => LocationError::Timeout,
            _ => LocationError::Unavailable,
        }
    }

    /// Every failure reads the same to the user.
    pub fn user_message(&self) -> &'static str {
        "Unable to get location. Please enable location services and try again."
    }
}

#[allow(async_fn_in_trait)]
pub trait PositionProvider {
    /// Resolve exactly once with a fresh fix or the reason there is none.
    async fn acquire(&self) -> Result<PositionFix, LocationError>;
}

/// `navigator.geolocation`, high accuracy, no cached fixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserGeolocation;

fn browser_geolocation() -> Option<web_sys::Geolocation> {
    let navigator = web_sys::window()?.navigator();
    let supported =
        js_sys::Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false);
    if !supported {
        return None;
    }
    navigator.geolocation().ok()
}

fn position_options() -> web_sys::PositionOptions {
    let options = web_sys::PositionOptions::new();
    options.set_enable_high_accuracy(true);
    options.set_timeout(LOCATION_TIMEOUT_MS);
    options.set_maximum_age(0);
    options
}

impl PositionProvider for BrowserGeolocation {
    async fn acquire(&self) -> Result<PositionFix, LocationError> {
        let Some(geolocation) = browser_geolocation() else {
            return Err(LocationError::Unsupported);
        };
        let options = position_options();

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            if let Err(err) = geolocation.get_current_position_with_error_callback_and_options(
                &resolve,
                Some(&reject),
                &options,
            ) {
                let _ = reject.call1(&JsValue::NULL, &err);
            }
        });

        match JsFuture::from(promise).await {
            Ok(value) => {
                let position: web_sys::Position = value.unchecked_into();
                let coords = position.coords();
                Ok(PositionFix {
                    coordinate: Coordinate::new(coords.latitude(), coords.longitude()),
                    accuracy_m: coords.accuracy(),
                })
            }
            Err(err) => Err(err
                .dyn_into::<web_sys::PositionError>()
                .map(|e| LocationError::from_code(e.code()))
                .unwrap_or(LocationError::Unavailable)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_variants() {
        assert_eq!(LocationError::from_code(1), LocationError::PermissionDenied);
        assert_eq!(LocationError::from_code(2), LocationError::Unavailable);
        assert_eq!(LocationError::from_code(3), LocationError::Timeout);
        assert_eq!(LocationError::from_code(99), LocationError::Unavailable);
    }

    #[test]
    fn test_browser_fix_types_resolve() {
        fn fix(position: &web_sys::Position) -> PositionFix {
            let coords: web_sys::Coordinates = position.coords();
            PositionFix {
                coordinate: Coordinate::new(coords.latitude(), coords.longitude()),
                accuracy_m: coords.accuracy(),
            }
        }
        fn failure(error: &web_sys::PositionError) -> LocationError {
            LocationError::from_code(error.code())
        }
        let _fix: fn(&web_sys::Position) -> PositionFix = fix;
        let _failure: fn(&web_sys::PositionError) -> LocationError = failure;
        assert_eq!(web_sys::PositionError::PERMISSION_DENIED, 1);
        assert_eq!(web_sys::PositionError::TIMEOUT, 3);
    }

    #[test]
    fn test_unsupported_is_distinguishable_from_timeout() {
        assert_ne!(LocationError::Unsupported, LocationError::Timeout);
        assert_ne!(LocationError::Unsupported, LocationError::PermissionDenied);
    }

    #[test]
    fn test_all_failures_share_user_message() {
        let messages: Vec<&str> = [
            LocationError::Unsupported,
            LocationError::PermissionDenied,
            LocationError::Unavailable,
            LocationError::Timeout,
        ]
        .iter()
        .map(LocationError::user_message)
        .collect();
        assert!(messages.windows(2).all(|w| w[0] == w[1]));
        assert!(messages[0].contains("enable location"));
    }
}
