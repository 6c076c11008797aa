//! Topology assembler.
//!
//! Wires device groups into a link list following the archetype-specific
//! rules: full-mesh core with tiered distribution/access for the
//! hierarchical archetypes, spine-leaf for the datacenter archetype.
//! The assembler trusts that the caller has validated tier counts; it still
//! guards the partition arithmetic so an unusual combination degrades to
//! fewer links rather than a panic.

use crate::config::NetworkType;
use crate::device::Device;
use crate::topology::types::{Link, LinkType, FORTY_GIGABIT, GIGABIT, TEN_GIGABIT};

/// Build the link list for the selected archetype.
///
/// # Arguments
/// * `network_type` - the wiring template
/// * `routers` - core tier (spine tier for datacenter)
/// * `dist_switches` - distribution tier (leaf tier for datacenter)
/// * `access_switches` - access tier
/// * `hosts` - end hosts (servers for datacenter)
/// * `redundancy` - add secondary access uplinks where possible
pub fn assemble(
    network_type: NetworkType,
    routers: &[Device],
    dist_switches: &[Device],
    access_switches: &[Device],
    hosts: &[Device],
    redundancy: bool,
) -> Vec<Link> {
    match network_type {
        NetworkType::Datacenter => {
            spine_leaf_links(routers, dist_switches, access_switches, hosts)
        }
        // Enterprise and campus share the hierarchical wiring; cloud and
        // hybrid archetypes use it as their on-premise default.
        NetworkType::Enterprise | NetworkType::Campus | NetworkType::Cloud | NetworkType::Hybrid => {
            hierarchical_links(routers, dist_switches, access_switches, hosts, redundancy)
        }
    }
}

/// Hierarchical three-tier wiring: full-mesh core, dual router uplinks per
/// distribution switch, round-robin access attachment, contiguous host
/// partition.
fn hierarchical_links(
    routers: &[Device],
    dist_switches: &[Device],
    access_switches: &[Device],
    hosts: &[Device],
    redundancy: bool,
) -> Vec<Link> {
    let mut links = Vec::new();

    // Core routers in full mesh, one link per unordered pair
    for (i, r1) in routers.iter().enumerate() {
        for r2 in &routers[i + 1..] {
            links.push(Link::new(
                r1.name(),
                r2.name(),
                LinkType::CoreLink,
                TEN_GIGABIT,
            ));
        }
    }

    // Every distribution switch uplinks to the first two routers. This is
    // redundant by construction, independent of the redundancy flag.
    for dist_sw in dist_switches {
        for router in routers.iter().take(2) {
            links.push(Link::new(
                router.name(),
                dist_sw.name(),
                LinkType::DistributionLink,
                TEN_GIGABIT,
            ));
        }
    }

    // Access switches attach round-robin across the distribution tier, with
    // an optional secondary uplink to the next distribution switch.
    if !dist_switches.is_empty() {
        for (i, access_sw) in access_switches.iter().enumerate() {
            let dist_idx = i % dist_switches.len();
            links.push(Link::new(
                dist_switches[dist_idx].name(),
                access_sw.name(),
                LinkType::AccessLink,
                GIGABIT,
            ));

            if redundancy && dist_switches.len() > 1 {
                let redundant_idx = (dist_idx + 1) % dist_switches.len();
                links.push(Link::new(
                    dist_switches[redundant_idx].name(),
                    access_sw.name(),
                    LinkType::AccessLinkRedundant,
                    GIGABIT,
                ));
            }
        }
    }

    attach_hosts(&mut links, access_switches, hosts, LinkType::HostLink, GIGABIT);

    links
}

/// Spine-leaf wiring: full bipartite mesh between spine routers and leaf
/// switches, round-robin access attachment, hosts as servers.
fn spine_leaf_links(
    spines: &[Device],
    leaves: &[Device],
    access_switches: &[Device],
    hosts: &[Device],
) -> Vec<Link> {
    let mut links = Vec::new();

    for spine in spines {
        for leaf in leaves {
            links.push(Link::new(
                spine.name(),
                leaf.name(),
                LinkType::SpineLeafLink,
                FORTY_GIGABIT,
            ));
        }
    }

    if !leaves.is_empty() {
        for (i, access_sw) in access_switches.iter().enumerate() {
            let leaf_idx = i % leaves.len();
            links.push(Link::new(
                leaves[leaf_idx].name(),
                access_sw.name(),
                LinkType::LeafAccessLink,
                TEN_GIGABIT,
            ));
        }
    }

    attach_hosts(&mut links, access_switches, hosts, LinkType::ServerLink, TEN_GIGABIT);

    links
}

/// Partition hosts contiguously across the access switches.
///
/// The per-switch quota is `max(1, hosts / switches)` and the switch index is
/// clamped to the last switch, so a remainder lands on the final switch and a
/// host count smaller than the switch count spreads one-per-switch from the
/// front.
fn attach_hosts(
    links: &mut Vec<Link>,
    access_switches: &[Device],
    hosts: &[Device],
    link_type: LinkType,
    bandwidth: &str,
) {
    if access_switches.is_empty() || hosts.is_empty() {
        return;
    }

    let per_switch = (hosts.len() / access_switches.len()).max(1);
    for (i, host) in hosts.iter().enumerate() {
        let switch_idx = (i / per_switch).min(access_switches.len() - 1);
        links.push(Link::new(
            access_switches[switch_idx].name(),
            host.name(),
            link_type,
            bandwidth,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeviceFactory, RouterRole, SwitchTier};

    fn groups(
        routers: u32,
        dist: u32,
        access: u32,
        hosts: u32,
    ) -> (Vec<Device>, Vec<Device>, Vec<Device>, Vec<Device>) {
        let mut factory = DeviceFactory::new(Some(0));
        (
            factory.routers(routers, RouterRole::Core),
            factory.switches(dist, SwitchTier::Distribution),
            factory.switches(access, SwitchTier::Access),
            factory.hosts(hosts),
        )
    }

    fn count_type(links: &[Link], link_type: LinkType) -> usize {
        links.iter().filter(|l| l.link_type == link_type).count()
    }

    #[test]
    fn test_core_full_mesh() {
        for n in 1..=6u32 {
            let (routers, dist, access, hosts) = groups(n, 0, 0, 0);
            let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, false);
            let expected = (n * n.saturating_sub(1) / 2) as usize;
            assert_eq!(count_type(&links, LinkType::CoreLink), expected);
        }
    }

    #[test]
    fn test_distribution_uplinks_are_dual_homed() {
        let (routers, dist, access, hosts) = groups(3, 2, 2, 0);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, false);

        // Two uplinks per distribution switch, to the first two routers only
        assert_eq!(count_type(&links, LinkType::DistributionLink), 4);
        for link in links.iter().filter(|l| l.link_type == LinkType::DistributionLink) {
            assert!(link.source == "Router-core-01" || link.source == "Router-core-02");
        }
    }

    #[test]
    fn test_single_router_gives_single_uplink_per_dist_switch() {
        let (routers, dist, access, hosts) = groups(1, 2, 2, 0);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, false);
        assert_eq!(count_type(&links, LinkType::CoreLink), 0);
        assert_eq!(count_type(&links, LinkType::DistributionLink), 2);
    }

    #[test]
    fn test_redundant_access_links_require_second_dist_switch() {
        let (routers, dist, access, hosts) = groups(2, 1, 3, 0);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, true);
        assert_eq!(count_type(&links, LinkType::AccessLink), 3);
        assert_eq!(count_type(&links, LinkType::AccessLinkRedundant), 0);

        let (routers, dist, access, hosts) = groups(2, 2, 3, 0);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, true);
        assert_eq!(count_type(&links, LinkType::AccessLink), 3);
        assert_eq!(count_type(&links, LinkType::AccessLinkRedundant), 3);
    }

    #[test]
    fn test_redundant_link_targets_next_dist_switch() {
        let (routers, dist, access, hosts) = groups(2, 3, 1, 0);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, true);

        let primary = links
            .iter()
            .find(|l| l.link_type == LinkType::AccessLink)
            .unwrap();
        let redundant = links
            .iter()
            .find(|l| l.link_type == LinkType::AccessLinkRedundant)
            .unwrap();
        assert_eq!(primary.source, "Switch-distribution-01");
        assert_eq!(redundant.source, "Switch-distribution-02");
        assert_eq!(primary.target, redundant.target);
    }

    #[test]
    fn test_hosts_partition_contiguously_with_remainder_on_last() {
        let (routers, dist, access, hosts) = groups(1, 1, 3, 10);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, false);

        let host_links: Vec<&Link> = links
            .iter()
            .filter(|l| l.link_type == LinkType::HostLink)
            .collect();
        assert_eq!(host_links.len(), 10);

        // 10 / 3 = 3 per switch; the last switch absorbs the remainder
        let on_last = host_links
            .iter()
            .filter(|l| l.source == "Switch-access-03")
            .count();
        assert_eq!(on_last, 4);
    }

    #[test]
    fn test_fewer_hosts_than_switches_spreads_from_front() {
        let (routers, dist, access, hosts) = groups(1, 1, 4, 2);
        let links = assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, false);

        let host_links: Vec<&Link> = links
            .iter()
            .filter(|l| l.link_type == LinkType::HostLink)
            .collect();
        assert_eq!(host_links.len(), 2);
        assert_eq!(host_links[0].source, "Switch-access-01");
        assert_eq!(host_links[1].source, "Switch-access-02");
    }

    #[test]
    fn test_spine_leaf_bipartite_mesh() {
        let (spines, leaves, access, hosts) = groups(3, 4, 2, 8);
        let links = assemble(NetworkType::Datacenter, &spines, &leaves, &access, &hosts, true);

        assert_eq!(count_type(&links, LinkType::SpineLeafLink), 12);
        assert_eq!(count_type(&links, LinkType::LeafAccessLink), 2);
        assert_eq!(count_type(&links, LinkType::ServerLink), 8);
        // No hierarchical link types in a datacenter fabric
        assert_eq!(count_type(&links, LinkType::CoreLink), 0);
        assert_eq!(count_type(&links, LinkType::HostLink), 0);

        for link in links.iter().filter(|l| l.link_type == LinkType::SpineLeafLink) {
            assert_eq!(link.bandwidth, FORTY_GIGABIT);
        }
    }

    #[test]
    fn test_campus_and_cloud_use_hierarchical_wiring() {
        let (routers, dist, access, hosts) = groups(2, 1, 1, 2);
        let enterprise =
            assemble(NetworkType::Enterprise, &routers, &dist, &access, &hosts, false);
        let campus = assemble(NetworkType::Campus, &routers, &dist, &access, &hosts, false);
        let cloud = assemble(NetworkType::Cloud, &routers, &dist, &access, &hosts, false);
        assert_eq!(enterprise, campus);
        assert_eq!(enterprise, cloud);
    }

    #[test]
    fn test_no_self_links() {
        let (routers, dist, access, hosts) = groups(5, 3, 4, 20);
        for network_type in [NetworkType::Enterprise, NetworkType::Datacenter] {
            let links = assemble(network_type, &routers, &dist, &access, &hosts, true);
            for link in &links {
                assert_ne!(link.source, link.target);
            }
        }
    }
}
