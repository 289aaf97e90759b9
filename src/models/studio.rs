use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudioTier {
    First,
    Second,
    Third,
}

impl StudioTier {
    pub const ALL: [StudioTier; 3] = [StudioTier::First, StudioTier::Second, StudioTier::Third];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudioTier::First => "first",
            StudioTier::Second => "second",
            StudioTier::Third => "third",
        }
    }

    /// Accepts the tier name or the remote studio id.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "first" | "1" => Some(StudioTier::First),
            "second" | "2" => Some(StudioTier::Second),
            "third" | "3" => Some(StudioTier::Third),
            _ => None,
        }
    }

    /// Identifier the remote booking service knows this tier by.
    pub fn studio_id(&self) -> &'static str {
        match self {
            StudioTier::First => "1",
            StudioTier::Second => "2",
            StudioTier::Third => "3",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Studio {
    pub tier: StudioTier,
    pub name: String,
    pub hourly_rate: u32,
    pub capacity: u32,
    pub badge: Option<String>,
    pub image_url: Option<String>,
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_ids() {
        assert_eq!(StudioTier::parse("first"), Some(StudioTier::First));
        assert_eq!(StudioTier::parse(" Second "), Some(StudioTier::Second));
        assert_eq!(StudioTier::parse("3"), Some(StudioTier::Third));
        assert_eq!(StudioTier::parse("fourth"), None);
        assert_eq!(StudioTier::parse(""), None);
    }

    #[test]
    fn test_studio_id_round_trips_through_parse() {
        for tier in StudioTier::ALL {
            assert_eq!(StudioTier::parse(tier.studio_id()), Some(tier));
            assert_eq!(StudioTier::parse(tier.as_str()), Some(tier));
        }
    }
}
