use dioxus::html::geometry::WheelDelta;
use dioxus::prelude::*;

use crate::coords;
use crate::map::{MapSurface, SafeZoneMarker};

const MAP_CONTAINER_ID: &str = "map";

/// Drag threshold in pixels; movement below this is treated as a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Area to cover with tiles around the center; larger than the container so
/// wide layouts never show gaps.
const TILE_COVER_W: f64 = 1600.0;
const TILE_COVER_H: f64 = 1000.0;

const USER_COLOR: &str = "#0d6efd";
const SAFE_COLOR: &str = "#28a745";
const ROUTE_COLOR: &str = "#dc3545";

/// Convert a wheel delta (pixels / lines / pages) to a uniform pixel-like value.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

/// Absolute placement of a marker `dx`/`dy` pixels from the map center.
fn marker_style(dx: f64, dy: f64, color: &str) -> String {
    format!("left: calc(50% + {dx:.1}px); top: calc(50% + {dy:.1}px); background-color: {color};")
}

fn offset_style(dx: f64, dy: f64) -> String {
    format!("left: calc(50% + {dx:.1}px); top: calc(50% + {dy:.1}px);")
}

/// Accuracy circle and evacuation routes, drawn around the view center.
fn build_overlay_svg(surface: &MapSurface) -> String {
    let center = surface.center();
    let zoom = surface.zoom();
    let mut shapes = String::with_capacity(1024);

    if let Some(user) = surface.user() {
        let (cx, cy) = coords::screen_offset(user.position, center, zoom);
        let r = user.accuracy_m / coords::meters_per_pixel(user.position.latitude, zoom);
        if r >= 1.0 {
            shapes.push_str(&format!(
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{USER_COLOR}" fill-opacity="0.15" stroke="{USER_COLOR}" stroke-width="1.5"/>"#
            ));
        }
    }

    for route in surface.evacuation_routes() {
        let (x1, y1) = coords::screen_offset(route.from, center, zoom);
        let (x2, y2) = coords::screen_offset(route.to, center, zoom);
        shapes.push_str(&format!(
            r#"<line x1="{x1:.1}" y1="{y1:.1}" x2="{x2:.1}" y2="{y2:.1}" stroke="{ROUTE_COLOR}" stroke-width="3" stroke-dasharray="8 6" stroke-linecap="round"/>"#
        ));
    }

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1" style="position:absolute;left:50%;top:50%;overflow:visible;pointer-events:none;">{shapes}</svg>"#
    )
}

fn open_directions(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.open_with_url_and_target(url, "_blank") {
        tracing::warn!(error = ?e, "Could not open directions");
    }
}

#[component]
pub fn MapView(
    surface: MapSurface,
    on_zoom: EventHandler<i8>,
    on_pan: EventHandler<(f64, f64)>,
) -> Element {
    let mut open_popup = use_signal(|| None::<SafeZoneMarker>);

    // Drag state (mouse)
    let mut drag_last = use_signal(|| None::<(f64, f64)>);
    let mut drag_distance = use_signal(|| 0.0_f64);

    let center = surface.center();
    let zoom = surface.zoom();
    let tiles = coords::visible_tiles(center, zoom, TILE_COVER_W, TILE_COVER_H);
    let overlay = build_overlay_svg(&surface);

    let user_style = surface.user().map(|user| {
        let (dx, dy) = coords::screen_offset(user.position, center, zoom);
        marker_style(dx, dy, USER_COLOR)
    });

    let safe_markers: Vec<(SafeZoneMarker, String)> = surface
        .safe_zones()
        .iter()
        .map(|marker| {
            let (dx, dy) = coords::screen_offset(marker.position, center, zoom);
            (marker.clone(), marker_style(dx, dy, SAFE_COLOR))
        })
        .collect();

    // A popup only survives while its marker is still on the map.
    let popup = open_popup
        .read()
        .clone()
        .filter(|marker| surface.safe_zones().contains(marker))
        .map(|marker| {
            let (dx, dy) = coords::screen_offset(marker.position, center, zoom);
            (marker, offset_style(dx, dy))
        });

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "map-container",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let delta_y = wheel_delta_y(evt.data().delta());
                on_zoom.call(if delta_y < 0.0 { 1 } else { -1 });
            },

            onmousedown: move |evt: Event<MouseData>| {
                let client = evt.data().client_coordinates();
                drag_last.set(Some((client.x, client.y)));
                drag_distance.set(0.0);
            },

            onmousemove: move |evt: Event<MouseData>| {
                let Some((last_x, last_y)) = *drag_last.read() else { return };
                let client = evt.data().client_coordinates();
                let (dx, dy) = (client.x - last_x, client.y - last_y);
                drag_last.set(Some((client.x, client.y)));
                let moved = *drag_distance.read() + (dx * dx + dy * dy).sqrt();
                drag_distance.set(moved);
                if moved >= DRAG_THRESHOLD {
                    on_pan.call((dx, dy));
                }
            },

            onmouseup: move |_| drag_last.set(None),
            onmouseleave: move |_| drag_last.set(None),

            onclick: move |_| {
                if *drag_distance.read() < DRAG_THRESHOLD {
                    open_popup.set(None);
                }
            },

            div { class: "map-tiles",
                for tile in tiles {
                    img {
                        key: "{tile.z}/{tile.x}/{tile.y}/{tile.left}",
                        class: "map-tile",
                        src: tile.url(),
                        alt: "",
                        draggable: "false",
                        style: offset_style(tile.left, tile.top),
                    }
                }
            }

            div { class: "map-overlay", dangerous_inner_html: overlay }

            if let Some(style) = user_style {
                div {
                    class: "map-marker user-marker",
                    title: "You are here",
                    style: style,
                }
            }

            for (i, (marker, style)) in safe_markers.into_iter().enumerate() {
                div {
                    key: "{i}",
                    class: "map-marker safe-zone-marker",
                    title: marker.name.clone(),
                    style: style,
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        let already_open = open_popup.read().as_ref() == Some(&marker);
                        open_popup.set(if already_open { None } else { Some(marker.clone()) });
                    },
                }
            }

            if let Some((marker, style)) = popup {
                div {
                    class: "map-popup",
                    style: style,
                    onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                    onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                    b { {marker.title()} }
                    br {}
                    {marker.distance_line()}
                    br {}
                    {marker.hazard_line()}
                    br {}
                    button {
                        class: "navigate-button",
                        onclick: {
                            let url = marker.directions_url();
                            move |_| open_directions(&url)
                        },
                        "Navigate Here"
                    }
                }
            }

            div { class: "map-controls",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                button {
                    title: "Zoom in",
                    disabled: zoom >= crate::map::MAX_ZOOM,
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_zoom.call(1);
                    },
                    "+"
                }
                button {
                    title: "Zoom out",
                    disabled: zoom <= crate::map::MIN_ZOOM,
                    onclick: move |evt: Event<MouseData>| {
                        evt.stop_propagation();
                        on_zoom.call(-1);
                    },
                    "\u{2212}"
                }
            }

            div { class: "map-attribution", "\u{a9} OpenStreetMap contributors" }
        }
    }
}
