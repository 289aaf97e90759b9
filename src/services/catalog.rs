use crate::models::{Studio, StudioTier};
use crate::services::backend::{BookingBackend, RemoteStudio};

/// The three bookable studio tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    studios: Vec<Studio>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            studios: StudioTier::ALL.iter().map(|&tier| default_studio(tier)).collect(),
        }
    }
}

impl Catalog {
    pub fn all(&self) -> &[Studio] {
        &self.studios
    }

    pub fn get(&self, tier: StudioTier) -> Option<&Studio> {
        self.studios.iter().find(|s| s.tier == tier)
    }

    /// Overlays remote metadata onto the tiers, position by position. Extra
    /// remote entries are ignored; missing fields keep their defaults.
    pub fn apply_remote(&mut self, remote: &[RemoteStudio]) {
        for (studio, meta) in self.studios.iter_mut().zip(remote) {
            if let Some(name) = meta.name.as_deref().filter(|n| !n.trim().is_empty()) {
                studio.name = name.to_string();
            }
            if let Some(rate) = meta.hourly_rate.as_ref().and_then(parse_whole_number) {
                if rate > 0 {
                    studio.hourly_rate = rate;
                }
            }
            if let Some(capacity) = meta.capacity.as_ref().and_then(parse_whole_number) {
                studio.capacity = capacity;
            }
            if let Some(badge) = &meta.badge {
                studio.badge = Some(badge.clone());
            }
            if let Some(image_url) = &meta.image_url {
                studio.image_url = Some(image_url.clone());
            }
        }
    }
}

/// Fetches the remote catalog once. Falls back to the static tiers if the
/// catalog is unreachable.
pub async fn load_catalog(backend: &dyn BookingBackend) -> Catalog {
    let mut catalog = Catalog::default();
    match backend.list_studios().await {
        Ok(remote) => {
            tracing::info!(count = remote.len(), "loaded remote studio catalog");
            catalog.apply_remote(&remote);
        }
        Err(e) => {
            tracing::warn!(error = %e, "studio catalog unavailable, using built-in tiers");
        }
    }
    catalog
}

/// Accepts `1500`, `1500.0` and `"1500.00"`.
fn parse_whole_number(value: &serde_json::Value) -> Option<u32> {
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if number.is_finite() && number >= 0.0 && number <= f64::from(u32::MAX) {
        Some(number.round() as u32)
    } else {
        None
    }
}

fn default_studio(tier: StudioTier) -> Studio {
    let (name, hourly_rate, capacity, badge, features): (&str, u32, u32, &str, [&str; 5]) =
        match tier {
            StudioTier::First => (
                "1st Class Studio",
                1500,
                10,
                "Premium",
                [
                    "Neumann U87 Ai (Microphones)",
                    "Universal Audio Apollo x8 (Audio Interface / Mixer)",
                    "Focal Trio6 Be (Studio Monitors)",
                    "Nord Stage 3 (Keyboard / Synth)",
                    "DW Collector's Drum Kit",
                ],
            ),
            StudioTier::Second => (
                "2nd Class Studio",
                800,
                6,
                "Popular",
                [
                    "Shure SM7B (Microphones)",
                    "Focusrite Scarlett 18i20 (Audio Interface / Mixer)",
                    "Yamaha HS8 (Studio Monitors)",
                    "Roland Juno-DS61 (Keyboard / Synth)",
                    "Pearl Export Series (Drum Kit)",
                ],
            ),
            StudioTier::Third => (
                "3rd Class Studio",
                500,
                4,
                "Budget",
                [
                    "Audio-Technica AT2020 (Microphones)",
                    "Behringer UMC404HD (Audio Interface / Mixer)",
                    "KRK Rokit 5 (Studio Monitors)",
                    "Casio CT-X700 (Keyboard / Synth)",
                    "Tama Imperialstar (Drum Kit)",
                ],
            ),
        };

    Studio {
        tier,
        name: name.to_string(),
        hourly_rate,
        capacity,
        badge: Some(badge.to_string()),
        image_url: None,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}
