use std::cell::RefCell;

use dioxus::prelude::*;
use safety_shared::models::{Alert, Coordinate, GuidelineSet, HazardCategory, SafetyReport};

use crate::api::FetchError;
use crate::geolocation::{LocationError, PositionFix};
use crate::map::MapSurface;

pub const SAFE_MESSAGE: &str = "Your area is currently safe. Stay prepared!";

#[derive(Debug, Clone, PartialEq)]
pub enum LocationStatus {
    Idle,
    Detecting,
    Located(Coordinate),
    Unavailable(LocationError),
}

/// What the status panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusPanel {
    /// No report received yet.
    Pending,
    Safe,
    Alerts {
        alerts: Vec<Alert>,
        instructions: Option<String>,
    },
}

impl StatusPanel {
    pub fn from_report(report: SafetyReport) -> Self {
        if report.alerts.is_empty() {
            StatusPanel::Safe
        } else {
            StatusPanel::Alerts {
                alerts: report.alerts,
                instructions: report.emergency_instructions,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Hands out increasing tokens so only the newest response is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestTracker {
    latest: u64,
}

impl RequestTracker {
    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

/// How a response was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Logged; the UI keeps what it showed before.
    Failed,
    /// A newer request was issued meanwhile; dropped.
    Stale,
}

/// Location, status panel and map, updated by the location flow.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalState {
    pub location: LocationStatus,
    pub status: StatusPanel,
    pub map: MapSurface,
    checks: RequestTracker,
}

impl Default for PortalState {
    fn default() -> Self {
        PortalState {
            location: LocationStatus::Idle,
            status: StatusPanel::Pending,
            map: MapSurface::default(),
            checks: RequestTracker::default(),
        }
    }
}

impl PortalState {
    pub fn begin_locating(&mut self) {
        self.location = LocationStatus::Detecting;
    }

    pub fn location_failed(&mut self, error: LocationError) {
        self.location = LocationStatus::Unavailable(error);
    }

    /// Place the marker, then issue the token for the safety check that follows.
    pub fn position_acquired(&mut self, fix: PositionFix) -> RequestToken {
        self.location = LocationStatus::Located(fix.coordinate);
        self.map.set_user_position(fix.coordinate, fix.accuracy_m);
        self.checks.issue()
    }

    pub fn apply_check(
        &mut self,
        token: RequestToken,
        result: Result<SafetyReport, FetchError>,
    ) -> Outcome {
        if !self.checks.is_latest(token) {
            tracing::debug!(?token, "Discarding superseded safety check");
            return Outcome::Stale;
        }
        match result {
            Ok(report) => {
                self.map.replace_safe_zones(&report.alerts);
                self.status = StatusPanel::from_report(report);
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!(error = %e, "Error checking safety status");
                Outcome::Failed
            }
        }
    }
}

/// Tab selection and content of the guideline panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuidelineState {
    active: HazardCategory,
    content: Option<GuidelineSet>,
    loading: bool,
    requests: RequestTracker,
}

impl GuidelineState {
    pub fn active(&self) -> HazardCategory {
        self.active
    }

    pub fn content(&self) -> Option<&GuidelineSet> {
        self.content.as_ref()
    }

    /// Activate the tab for `category` and issue a token for its fetch.
    pub fn select(&mut self, category: HazardCategory) -> RequestToken {
        self.active = category;
        self.loading = true;
        self.requests.issue()
    }

    pub fn apply(
        &mut self,
        token: RequestToken,
        category: HazardCategory,
        result: Result<GuidelineSet, FetchError>,
    ) -> Outcome {
        if !self.requests.is_latest(token) {
            tracing::debug!(?token, %category, "Discarding superseded guideline fetch");
            return Outcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(set) => {
                self.content = Some(set);
                Outcome::Applied
            }
            Err(e) => {
                tracing::error!(%category, error = %e, "Error loading guidelines");
                Outcome::Failed
            }
        }
    }

    /// Whether a fetch for the active tab is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the tab labelled `label` is the active one.
    pub fn is_active_label(&self, label: &str) -> bool {
        HazardCategory::parse(label) == Some(self.active)
    }

    /// Every tab with its active flag, in display order.
    pub fn tabs(&self) -> Vec<(HazardCategory, bool)> {
        HazardCategory::ALL
            .into_iter()
            .map(|category| (category, self.is_active_label(category.label())))
            .collect()
    }
}

/// Mutable access to a piece of UI state, whether it lives in a Dioxus
/// signal or, in tests, a plain `RefCell`.
pub trait StateHandle<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

impl<T: 'static> StateHandle<T> for Signal<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut signal = *self;
        let mut guard = signal.write();
        f(&mut *guard)
    }
}

impl<T> StateHandle<T> for RefCell<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}
