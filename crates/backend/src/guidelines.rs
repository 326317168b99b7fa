use std::collections::HashMap;
use std::path::Path;

use safety_shared::models::{GuidelineSet, HazardCategory};

/// Safety guidance per hazard category.
pub struct Guidelines {
    sets: HashMap<HazardCategory, GuidelineSet>,
}

fn set(immediate: &[&str], preparation: &[&str]) -> GuidelineSet {
    GuidelineSet {
        immediate: immediate.iter().map(|s| s.to_string()).collect(),
        preparation: preparation.iter().map(|s| s.to_string()).collect(),
    }
}

impl Guidelines {
    /// The guidance shipped with the server.
    pub fn builtin() -> Self {
        let mut sets = HashMap::new();
        sets.insert(
            HazardCategory::Flood,
            set(
                &[
                    "Move to higher ground immediately",
                    "Avoid walking or driving through flood waters",
                    "Stay away from power lines and electrical wires",
                ],
                &[
                    "Keep emergency kit ready",
                    "Store important documents in waterproof container",
                    "Know your evacuation route",
                ],
            ),
        );
        sets.insert(
            HazardCategory::Earthquake,
            set(
                &[
                    "Drop, Cover, and Hold On",
                    "Stay away from windows and exterior walls",
                    "If indoors, stay inside until shaking stops",
                ],
                &[
                    "Identify safe spots in each room",
                    "Secure heavy furniture and objects",
                    "Keep emergency supplies accessible",
                ],
            ),
        );
        sets.insert(
            HazardCategory::Cyclone,
            set(
                &[
                    "Stay indoors and away from windows",
                    "Listen to official instructions",
                    "Move to designated shelter if advised",
                ],
                &[
                    "Board up windows and secure loose items",
                    "Keep emergency supplies ready",
                    "Know your evacuation route",
                ],
            ),
        );
        sets.insert(
            HazardCategory::HeavyRain,
            set(
                &[
                    "Avoid flood-prone areas",
                    "Stay indoors if possible",
                    "Be prepared for power outages",
                ],
                &[
                    "Clear drainage systems",
                    "Keep emergency lighting ready",
                    "Store drinking water",
                ],
            ),
        );
        Guidelines { sets }
    }

    /// Load `guidelines.json` (an object keyed by category slug) from `dir`.
    /// Categories missing from the file keep their built-in guidance.
    pub fn load(dir: &Path) -> Result<Self, String> {
        let path = dir.join("guidelines.json");
        let data = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        let raw: HashMap<String, GuidelineSet> = serde_json::from_str(&data)
            .map_err(|e| format!("Failed to parse guidelines.json: {}", e))?;

        let mut guidelines = Self::builtin();
        for (key, set) in raw {
            match HazardCategory::parse(&key) {
                Some(category) => {
                    guidelines.sets.insert(category, set);
                }
                None => tracing::warn!(category = %key, "Ignoring guidelines for unknown category"),
            }
        }

        tracing::info!(categories = guidelines.sets.len(), "Loaded safety guidelines");
        Ok(guidelines)
    }

    /// Load from `dir` when a `guidelines.json` is present, built-ins otherwise.
    pub fn load_or_builtin(dir: &Path) -> Self {
        if !dir.join("guidelines.json").exists() {
            return Self::builtin();
        }
        match Self::load(dir) {
            Ok(guidelines) => guidelines,
            Err(e) => {
                tracing::error!(error = %e, "Falling back to built-in guidelines");
                Self::builtin()
            }
        }
    }

    pub fn get(&self, category: HazardCategory) -> Option<&GuidelineSet> {
        self.sets.get(&category)
    }
}
