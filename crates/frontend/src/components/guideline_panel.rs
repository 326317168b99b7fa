use dioxus::prelude::*;
use safety_shared::models::{GuidelineSet, HazardCategory};

use crate::state::GuidelineState;

/// The two labelled lists, in display order.
pub fn sections(set: &GuidelineSet) -> [(&'static str, &[String]); 2] {
    [
        ("Immediate Actions", set.immediate.as_slice()),
        ("Preparation", set.preparation.as_slice()),
    ]
}

/// Shown in place of content; a failed first fetch must not read as loading.
pub fn placeholder(state: &GuidelineState) -> &'static str {
    if state.is_loading() {
        "Loading guidelines..."
    } else {
        "Guidelines unavailable. Select a hazard to try again."
    }
}

#[component]
pub fn GuidelinePanel(state: GuidelineState, on_select: EventHandler<HazardCategory>) -> Element {
    rsx! {
        div { class: "panel guidelines",
            h3 { "Safety Guidelines" }
            div { class: "tabs",
                for (category, active) in state.tabs() {
                    button {
                        key: "{category}",
                        class: if active { "tab-button active" } else { "tab-button" },
                        onclick: move |_| on_select.call(category),
                        {category.label()}
                    }
                }
            }
            div { id: "guidelines-content",
                if let Some(set) = state.content() {
                    for (title, items) in sections(set) {
                        div { key: "{title}", class: "guideline-section",
                            h3 { "{title}" }
                            ul {
                                for item in items.iter() {
                                    li { "{item}" }
                                }
                            }
                        }
                    }
                } else {
                    p { class: "muted", {placeholder(&state)} }
                }
            }
        }
    }
}
