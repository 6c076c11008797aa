use serde::{Deserialize, Serialize};

/// Nominal capacity labels used by the wiring rules
pub const GIGABIT: &str = "1Gbps";
pub const TEN_GIGABIT: &str = "10Gbps";
pub const FORTY_GIGABIT: &str = "40Gbps";

/// Semantic role of a link within the archetype that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    CoreLink,
    DistributionLink,
    AccessLink,
    AccessLinkRedundant,
    SpineLeafLink,
    LeafAccessLink,
    ServerLink,
    HostLink,
}

/// An undirected connection between two devices, referenced by name.
///
/// Duplicate (source, target, type) triples are legal: a primary and a
/// redundant link between the same pair are two distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub bandwidth: String,
}

impl Link {
    pub fn new(source: &str, target: &str, link_type: LinkType, bandwidth: &str) -> Self {
        Self {
            source: source.to_string(),
            target: target.to_string(),
            link_type,
            bandwidth: bandwidth.to_string(),
        }
    }
}
