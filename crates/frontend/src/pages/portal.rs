use dioxus::prelude::*;
use safety_shared::models::HazardCategory;

use crate::api::HttpApi;
use crate::components::alert_panel::AlertPanel;
use crate::components::guideline_panel::GuidelinePanel;
use crate::components::location_banner::LocationBanner;
use crate::components::map_view::MapView;
use crate::flow;
use crate::geolocation::BrowserGeolocation;
use crate::state::{GuidelineState, PortalState};

#[component]
pub fn Portal() -> Element {
    let api = use_hook(HttpApi::same_origin);

    let mut portal = use_signal(PortalState::default);
    let guidelines = use_signal(GuidelineState::default);

    // Both startup tasks run independently; neither waits on the other.
    let _guidelines_loader = use_future({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                flow::select_guidelines(&api, &guidelines, HazardCategory::Flood).await;
            }
        }
    });

    let _locator = use_future({
        let api = api.clone();
        move || {
            let api = api.clone();
            async move {
                flow::locate_and_check(&BrowserGeolocation, &api, &portal).await;
            }
        }
    });

    let locate_api = api.clone();
    let on_locate = move |_: ()| {
        let api = locate_api.clone();
        spawn(async move {
            flow::locate_and_check(&BrowserGeolocation, &api, &portal).await;
        });
    };

    let tab_api = api.clone();
    let on_select = move |category: HazardCategory| {
        let api = tab_api.clone();
        spawn(async move {
            flow::select_guidelines(&api, &guidelines, category).await;
        });
    };

    let (location, status, surface) = {
        let view = portal.read();
        (view.location.clone(), view.status.clone(), view.map.clone())
    };

    rsx! {
        div { class: "app",
            div { class: "header",
                h1 { "Disaster Safety Portal" }
            }

            div { class: "sidebar",
                LocationBanner { status: location, on_locate: on_locate }

                div { class: "panel", id: "alert-status",
                    h3 { "Current Status" }
                    AlertPanel {
                        status: status,
                        on_show_routes: move |_| portal.write().map.show_evacuation_routes(),
                        on_show_zones: move |_| portal.write().map.fit_safe_zones(),
                    }
                }

                GuidelinePanel { state: guidelines.read().clone(), on_select: on_select }
            }

            MapView {
                surface: surface,
                on_zoom: move |delta: i8| portal.write().map.zoom_by(delta),
                on_pan: move |(dx, dy): (f64, f64)| portal.write().map.pan_by(dx, dy),
            }
        }
    }
}
