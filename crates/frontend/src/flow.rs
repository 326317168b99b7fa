use safety_shared::models::HazardCategory;

use crate::api::SafetyApi;
use crate::geolocation::PositionProvider;
use crate::state::{GuidelineState, Outcome, PortalState, StateHandle};

/// Result of one location-to-render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    LocationFailed,
    Checked(Outcome),
}

/// Acquire a position, mark it on the map, then check it against the backend.
pub async fn locate_and_check<P, A, H>(provider: &P, api: &A, state: &H) -> Cycle
where
    P: PositionProvider,
    A: SafetyApi,
    H: StateHandle<PortalState>,
{
    state.modify(PortalState::begin_locating);

    let fix = match provider.acquire().await {
        Ok(fix) => fix,
        Err(e) => {
            tracing::warn!(error = %e, "Location unavailable");
            state.modify(|s| s.location_failed(e));
            return Cycle::LocationFailed;
        }
    };

    let token = state.modify(|s| s.position_acquired(fix));
    tracing::info!(position = %fix.coordinate, accuracy_m = fix.accuracy_m, "Checking safety status");

    let result = api.check_safety(fix.coordinate).await;
    Cycle::Checked(state.modify(|s| s.apply_check(token, result)))
}

/// Switch the guideline tab to `category` and load its content.
pub async fn select_guidelines<A, H>(api: &A, panel: &H, category: HazardCategory) -> Outcome
where
    A: SafetyApi,
    H: StateHandle<GuidelineState>,
{
    let token = panel.modify(|p| p.select(category));
    let result = api.fetch_guidelines(category).await;
    panel.modify(|p| p.apply(token, category, result))
}
