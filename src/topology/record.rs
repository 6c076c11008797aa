//! Topology record.
//!
//! The aggregate returned to every downstream consumer: device list, link
//! list, derived counts, and the request parameters that produced them. A
//! record is fully populated before it is returned and never mutated
//! afterwards.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::{NetworkType, SecurityLevel};
use crate::device::{Device, DeviceKind};
use crate::topology::types::Link;

/// Requested counts plus the number of security devices actually placed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyMetadata {
    pub routers: u32,
    pub switches: u32,
    pub hosts: u32,
    pub security_devices: usize,
}

/// The aggregate root owning one generated topology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyRecord {
    pub network_type: NetworkType,
    pub devices: Vec<Device>,
    pub links: Vec<Link>,
    pub total_devices: usize,
    pub total_links: usize,
    pub segments: usize,
    pub security_level: SecurityLevel,
    pub redundancy_enabled: bool,
    pub ai_optimized: bool,
    pub metadata: TopologyMetadata,
}

impl TopologyRecord {
    /// Look up a device by name
    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name() == name)
    }

    /// Devices of one kind, in generation order
    pub fn devices_of_kind(&self, kind: DeviceKind) -> impl Iterator<Item = &Device> {
        self.devices.iter().filter(move |d| d.kind() == kind)
    }

    /// Build an adjacency structure from the link list: device name to the
    /// ordered set of its neighbors. Every device appears as a key, isolated
    /// devices with an empty set.
    pub fn adjacency(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = self
            .devices
            .iter()
            .map(|d| (d.name().to_string(), BTreeSet::new()))
            .collect();

        for link in &self.links {
            adjacency
                .entry(link.source.clone())
                .or_default()
                .insert(link.target.clone());
            adjacency
                .entry(link.target.clone())
                .or_default()
                .insert(link.source.clone());
        }

        adjacency
    }

    /// Names referenced by links that do not resolve to a device. Empty for
    /// every record the generator produces; checked defensively there.
    pub fn dangling_endpoints(&self) -> Vec<String> {
        let names: HashSet<&str> = self.devices.iter().map(|d| d.name()).collect();
        let mut dangling = Vec::new();
        for link in &self.links {
            for endpoint in [&link.source, &link.target] {
                if !names.contains(endpoint.as_str()) {
                    dangling.push(endpoint.clone());
                }
            }
        }
        dangling
    }

    /// Serialize the record to pretty-printed JSON, the only persisted form
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Count the distinct subnet prefixes (first three octets) across all
/// addressed devices. Unaddressed devices and unparseable addresses are
/// ignored, not counted as a segment.
pub fn count_segments(devices: &[Device]) -> usize {
    devices
        .iter()
        .filter_map(|d| d.subnet_prefix())
        .collect::<HashSet<String>>()
        .len()
}
