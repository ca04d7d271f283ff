//! Cluster configurations for components that can be multiplied.
//!
//! Only the number of copies matters for mass properties; the placement of
//! the copies is handled by the rendering and layout code.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterConfiguration {
    #[default]
    Single,
    Double,
    #[serde(rename = "3-row")]
    TripleRow,
    #[serde(rename = "3-ring")]
    TripleRing,
    #[serde(rename = "4-row")]
    QuadRow,
    #[serde(rename = "4-ring")]
    QuadRing,
    #[serde(rename = "5-ring")]
    FiveRing,
    #[serde(rename = "6-ring")]
    SixRing,
    #[serde(rename = "7-ring")]
    SevenRing,
    #[serde(rename = "8-ring")]
    EightRing,
    #[serde(rename = "9-ring")]
    NineRing,
}

impl ClusterConfiguration {
    pub const ALL: [ClusterConfiguration; 11] = [
        ClusterConfiguration::Single,
        ClusterConfiguration::Double,
        ClusterConfiguration::TripleRow,
        ClusterConfiguration::TripleRing,
        ClusterConfiguration::QuadRow,
        ClusterConfiguration::QuadRing,
        ClusterConfiguration::FiveRing,
        ClusterConfiguration::SixRing,
        ClusterConfiguration::SevenRing,
        ClusterConfiguration::EightRing,
        ClusterConfiguration::NineRing,
    ];

    /// Number of physical copies.
    pub fn count(&self) -> u32 {
        match self {
            ClusterConfiguration::Single => 1,
            ClusterConfiguration::Double => 2,
            ClusterConfiguration::TripleRow | ClusterConfiguration::TripleRing => 3,
            ClusterConfiguration::QuadRow | ClusterConfiguration::QuadRing => 4,
            ClusterConfiguration::FiveRing => 5,
            ClusterConfiguration::SixRing => 6,
            ClusterConfiguration::SevenRing => 7,
            ClusterConfiguration::EightRing => 8,
            ClusterConfiguration::NineRing => 9,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClusterConfiguration::Single => "single",
            ClusterConfiguration::Double => "double",
            ClusterConfiguration::TripleRow => "3-row",
            ClusterConfiguration::TripleRing => "3-ring",
            ClusterConfiguration::QuadRow => "4-row",
            ClusterConfiguration::QuadRing => "4-ring",
            ClusterConfiguration::FiveRing => "5-ring",
            ClusterConfiguration::SixRing => "6-ring",
            ClusterConfiguration::SevenRing => "7-ring",
            ClusterConfiguration::EightRing => "8-ring",
            ClusterConfiguration::NineRing => "9-ring",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl Display for ClusterConfiguration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_copies() {
        assert_eq!(ClusterConfiguration::default().count(), 1);
        assert_eq!(ClusterConfiguration::TripleRow.count(), 3);
        assert_eq!(ClusterConfiguration::NineRing.count(), 9);
    }

    #[test]
    fn names_round_trip() {
        for config in ClusterConfiguration::ALL {
            assert_eq!(ClusterConfiguration::from_name(config.name()), Some(config));
        }
        assert!(ClusterConfiguration::from_name("10-ring").is_none());
    }

    #[test]
    fn serde_uses_layout_names() {
        let json = serde_json::to_string(&ClusterConfiguration::QuadRing).unwrap();
        assert_eq!(json, "\"4-ring\"");
        let back: ClusterConfiguration = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(back, ClusterConfiguration::Double);
    }
}
