use dioxus::prelude::*;
use safety_shared::models::{Alert, RiskLevel};

use crate::state::{StatusPanel, SAFE_MESSAGE};

/// Status panel text before any check has succeeded.
pub const PENDING_MESSAGE: &str = "Safety status not yet available.";

pub const SEVERE_COLOR: &str = "#dc3545";
pub const HIGH_COLOR: &str = "#fd7e14";
pub const MODERATE_COLOR: &str = "#ffc107";
pub const LOW_COLOR: &str = "#28a745";

/// Card accent for a risk level.
pub fn risk_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Severe => SEVERE_COLOR,
        RiskLevel::High => HIGH_COLOR,
        RiskLevel::Moderate => MODERATE_COLOR,
        RiskLevel::Low => LOW_COLOR,
    }
}

/// Display-ready contents of one alert card.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertCard {
    pub heading: String,
    pub accent: &'static str,
    pub description: String,
    pub zones: Vec<String>,
}

pub fn alert_card(alert: &Alert) -> AlertCard {
    AlertCard {
        heading: format!(
            "{} - {}",
            alert.hazard_type.to_uppercase(),
            alert.risk_level.to_uppercase()
        ),
        accent: risk_color(alert.risk()),
        description: alert.description.clone(),
        zones: alert
            .safe_zones
            .iter()
            .map(|zone| format!("\u{1f4cd} {} ({})", zone.name, zone.distance))
            .collect(),
    }
}

/// One card per alert, in the order the server sent them.
pub fn alert_cards(alerts: &[Alert]) -> Vec<AlertCard> {
    alerts.iter().map(alert_card).collect()
}

pub fn panel_heading(alert_count: usize) -> &'static str {
    if alert_count > 1 {
        "\u{26a0}\u{fe0f} MULTIPLE DISASTERS DETECTED \u{26a0}\u{fe0f}"
    } else {
        "\u{26a0}\u{fe0f} ACTIVE DISASTER ALERT \u{26a0}\u{fe0f}"
    }
}

#[component]
pub fn AlertPanel(
    status: StatusPanel,
    on_show_routes: EventHandler<()>,
    on_show_zones: EventHandler<()>,
) -> Element {
    match status {
        StatusPanel::Pending => rsx! {
            div { class: "alert info", "{PENDING_MESSAGE}" }
        },
        StatusPanel::Safe => rsx! {
            div { class: "alert success", "{SAFE_MESSAGE}" }
        },
        StatusPanel::Alerts {
            alerts,
            instructions,
        } => {
            let heading = panel_heading(alerts.len());
            let cards = alert_cards(&alerts);
            rsx! {
                div { class: "multi-alert severe",
                    h2 { "{heading}" }
                    if let Some(text) = instructions {
                        p { class: "emergency-instructions", "{text}" }
                    }
                    div { class: "alert-scroll",
                        for (i, card) in cards.into_iter().enumerate() {
                            div {
                                key: "{i}",
                                class: "alert-item",
                                style: "border-left: 4px solid {card.accent}",
                                h3 { "{card.heading}" }
                                p { "{card.description}" }
                                div { class: "safe-zones-list",
                                    strong { "Nearest Safe Zones:" }
                                    ul {
                                        for zone in card.zones {
                                            li { "{zone}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    div { class: "emergency-actions",
                        button {
                            class: "action-button",
                            onclick: move |_| on_show_routes.call(()),
                            "Show Evacuation Routes"
                        }
                        button {
                            class: "action-button",
                            onclick: move |_| on_show_zones.call(()),
                            "View All Safe Zones"
                        }
                    }
                }
            }
        }
    }
}
