//! Layout engine.
//!
//! Computes a deterministic tiered 2-D position for every device, based only
//! on its kind and subtype, never on the link topology. Six fixed tiers from
//! top to bottom: cloud, core routers, security devices, distribution
//! switches, access switches, hosts. Within a tier devices sit on a
//! horizontal line centered at x = 0.

use std::collections::HashMap;

use crate::device::{Device, SwitchTier};
use crate::topology::TopologyRecord;

/// Device name to (x, y) coordinate, consumed only by rendering
pub type PositionMap = HashMap<String, (f64, f64)>;

const TIER_CLOUD_Y: f64 = 3.0;
const TIER_CORE_Y: f64 = 2.0;
const TIER_SECURITY_Y: f64 = 1.0;
const TIER_DISTRIBUTION_Y: f64 = 0.0;
const TIER_ACCESS_Y: f64 = -1.0;
const TIER_HOST_Y: f64 = -2.0;

const HORIZONTAL_STEP: f64 = 1.5;

/// Hosts beyond this cap receive no position; rendering treats a missing
/// position as "not drawn".
pub const MAX_POSITIONED_HOSTS: usize = 30;

/// Compute positions for every device in the record.
///
/// Recomputed on demand; the map holds no identity of its own and is never
/// persisted as part of the record.
pub fn layout(record: &TopologyRecord) -> PositionMap {
    let mut cloud: Vec<&str> = Vec::new();
    let mut routers: Vec<&str> = Vec::new();
    let mut security: Vec<&str> = Vec::new();
    let mut switches: Vec<(&str, &SwitchTier)> = Vec::new();
    let mut hosts: Vec<&str> = Vec::new();

    for device in &record.devices {
        match device {
            Device::Cloud { name, .. } => cloud.push(name),
            Device::Router { name, .. } => routers.push(name),
            Device::Firewall { name, .. } | Device::Ips { name, .. } => security.push(name),
            Device::Switch { name, subtype, .. } => switches.push((name, subtype)),
            Device::Host { name, .. } => hosts.push(name),
        }
    }

    // Partition switches by declared tier; if any tier label is unknown fall
    // back to a deterministic index split, first half distribution.
    let tiers_declared = switches
        .iter()
        .all(|(_, tier)| !matches!(tier, SwitchTier::Other(_)));
    let (distribution, access): (Vec<&str>, Vec<&str>) = if tiers_declared {
        (
            switches
                .iter()
                .filter(|(_, tier)| matches!(tier, SwitchTier::Distribution))
                .map(|(name, _)| *name)
                .collect(),
            switches
                .iter()
                .filter(|(_, tier)| matches!(tier, SwitchTier::Access))
                .map(|(name, _)| *name)
                .collect(),
        )
    } else {
        let split = switches.len() / 2;
        (
            switches[..split].iter().map(|(name, _)| *name).collect(),
            switches[split..].iter().map(|(name, _)| *name).collect(),
        )
    };

    hosts.truncate(MAX_POSITIONED_HOSTS);

    let mut positions = PositionMap::new();
    place_tier(&mut positions, &cloud, TIER_CLOUD_Y);
    place_tier(&mut positions, &routers, TIER_CORE_Y);
    place_tier(&mut positions, &security, TIER_SECURITY_Y);
    place_tier(&mut positions, &distribution, TIER_DISTRIBUTION_Y);
    place_tier(&mut positions, &access, TIER_ACCESS_Y);
    place_tier(&mut positions, &hosts, TIER_HOST_Y);
    positions
}

/// Place `names` on a centered horizontal line at the given height, so `n`
/// devices occupy `[-step*(n-1)/2, +step*(n-1)/2]`.
fn place_tier(positions: &mut PositionMap, names: &[&str], y: f64) {
    let offset = (names.len() as f64 - 1.0) / 2.0;
    for (i, name) in names.iter().enumerate() {
        let x = (i as f64 - offset) * HORIZONTAL_STEP;
        positions.insert(name.to_string(), (x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationConfig, SecurityLevel};
    use crate::device::{Device, DeviceFactory, SwitchTier};
    use crate::generator::generate;

    fn generate_record(routers: u32, switches: u32, hosts: u32) -> TopologyRecord {
        generate(&GenerationConfig {
            routers,
            switches,
            hosts,
            security_level: SecurityLevel::Critical,
            seed: Some(3),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_tier_ordering() {
        let record = generate_record(1, 2, 1);
        let positions = layout(&record);

        let (_, router_y) = positions["Router-core-01"];
        let (_, firewall_y) = positions["Firewall-01"];
        let (_, dist_y) = positions["Switch-distribution-01"];
        let (_, access_y) = positions["Switch-access-01"];
        let (_, host_y) = positions["Host-001"];

        assert!(router_y > firewall_y);
        assert!(firewall_y > dist_y);
        assert!(dist_y > access_y);
        assert!(access_y > host_y);
    }

    #[test]
    fn test_single_device_tiers_are_centered() {
        let record = generate_record(1, 2, 1);
        let positions = layout(&record);
        assert_eq!(positions["Router-core-01"].0, 0.0);
        assert_eq!(positions["Switch-distribution-01"].0, 0.0);
        assert_eq!(positions["Host-001"].0, 0.0);
    }

    #[test]
    fn test_tier_is_centered_and_stepped() {
        let record = generate_record(3, 2, 0);
        let positions = layout(&record);

        let xs: Vec<f64> = (1..=3)
            .map(|i| positions[&format!("Router-core-{:02}", i)].0)
            .collect();
        assert_eq!(xs, vec![-HORIZONTAL_STEP, 0.0, HORIZONTAL_STEP]);
        // Line is centered: endpoints are symmetric around zero
        assert_eq!(xs[0], -xs[2]);
    }

    #[test]
    fn test_host_cap() {
        let record = generate_record(1, 2, 40);
        let positions = layout(&record);

        let positioned_hosts = (1..=40)
            .filter(|i| positions.contains_key(&format!("Host-{:03}", i)))
            .count();
        assert_eq!(positioned_hosts, MAX_POSITIONED_HOSTS);
        assert!(positions.contains_key("Host-030"));
        assert!(!positions.contains_key("Host-031"));
    }

    #[test]
    fn test_layout_is_link_independent() {
        let mut record = generate_record(2, 4, 6);
        let with_links = layout(&record);
        record.links.clear();
        assert_eq!(layout(&record), with_links);
    }

    #[test]
    fn test_unknown_switch_tier_falls_back_to_index_split() {
        let mut factory = DeviceFactory::new(Some(0));
        let mut record = generate_record(1, 0, 0);
        let mut switches = factory.switches(4, SwitchTier::Access);
        if let Device::Switch { subtype, .. } = &mut switches[0] {
            *subtype = SwitchTier::Other("top_of_rack".to_string());
        }
        record.devices.extend(switches);

        let positions = layout(&record);
        // First half (indices 0..2) lands on the distribution tier
        assert_eq!(positions["Switch-access-01"].1, TIER_DISTRIBUTION_Y);
        assert_eq!(positions["Switch-access-02"].1, TIER_DISTRIBUTION_Y);
        assert_eq!(positions["Switch-access-03"].1, TIER_ACCESS_Y);
        assert_eq!(positions["Switch-access-04"].1, TIER_ACCESS_Y);
    }

    #[test]
    fn test_cloud_tier_is_topmost() {
        let mut record = generate_record(1, 0, 0);
        record.devices.push(Device::Cloud {
            name: "Cloud-Gateway-01".to_string(),
            provider: "aws".to_string(),
            ip_address: None,
        });

        let positions = layout(&record);
        assert!(positions["Cloud-Gateway-01"].1 > positions["Router-core-01"].1);
    }
}
