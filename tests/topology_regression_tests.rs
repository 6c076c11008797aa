#[cfg(test)]
mod topology_regression_tests {
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use topogen::config::{GenerationConfig, NetworkType, SecurityLevel};
    use topogen::config_loader::load_config;
    use topogen::device::DeviceKind;
    use topogen::generator::{generate, GenerateError};
    use topogen::layout::{layout, MAX_POSITIONED_HOSTS};
    use topogen::topology::{LinkType, TopologyRecord};

    fn config(routers: u32, switches: u32, hosts: u32) -> GenerationConfig {
        GenerationConfig {
            routers,
            switches,
            hosts,
            seed: Some(1),
            ..Default::default()
        }
    }

    fn kind_count(record: &TopologyRecord, kind: DeviceKind) -> usize {
        record.devices_of_kind(kind).count()
    }

    fn link_count(record: &TopologyRecord, link_type: LinkType) -> usize {
        record
            .links
            .iter()
            .filter(|l| l.link_type == link_type)
            .count()
    }

    /// Core tier link count equals C(routers, 2) for every router count
    #[test]
    fn test_core_full_mesh_property() {
        for routers in 1..=8u32 {
            let record = generate(&config(routers, 0, 0)).unwrap();
            let expected = (routers * (routers - 1) / 2) as usize;
            assert_eq!(
                link_count(&record, LinkType::CoreLink),
                expected,
                "core mesh for {} routers",
                routers
            );
        }
    }

    /// total_devices always accounts for every requested device plus the
    /// security devices implied by the security level
    #[test]
    fn test_device_accounting_property() {
        let cases = [
            (1, 0, 0, SecurityLevel::Low, 0),
            (2, 4, 10, SecurityLevel::Medium, 0),
            (3, 6, 30, SecurityLevel::High, 1),
            (5, 9, 100, SecurityLevel::Critical, 2),
        ];

        for (routers, switches, hosts, level, security) in cases {
            let mut cfg = config(routers, switches, hosts);
            cfg.security_level = level;
            let record = generate(&cfg).unwrap();

            assert_eq!(record.metadata.security_devices, security);
            assert_eq!(
                record.total_devices,
                (routers + switches + hosts) as usize + security
            );
            assert_eq!(kind_count(&record, DeviceKind::Router), routers as usize);
            assert_eq!(kind_count(&record, DeviceKind::Switch), switches as usize);
            assert_eq!(kind_count(&record, DeviceKind::Host), hosts as usize);
        }
    }

    /// Every link endpoint resolves to a device in the same record
    #[test]
    fn test_no_dangling_links_property() {
        for network_type in [
            NetworkType::Enterprise,
            NetworkType::Datacenter,
            NetworkType::Campus,
            NetworkType::Cloud,
            NetworkType::Hybrid,
        ] {
            let mut cfg = config(4, 7, 40);
            cfg.network_type = network_type;
            let record = generate(&cfg).unwrap();

            assert!(
                record.dangling_endpoints().is_empty(),
                "dangling endpoints in {:?}",
                network_type
            );
            for link in &record.links {
                assert_ne!(link.source, link.target);
            }
        }
    }

    /// Identical parameters and seed produce identical records
    #[test]
    fn test_idempotence_property() {
        let cfg = config(3, 6, 25);
        let a = generate(&cfg).unwrap();
        let b = generate(&cfg).unwrap();
        assert_eq!(a, b);

        // Serialized forms round-trip to equivalent data
        let json = a.to_json().unwrap();
        let back: TopologyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, a);
    }

    /// With at least two distribution switches, redundancy strictly adds links
    #[test]
    fn test_redundancy_property() {
        let mut with = config(2, 4, 10);
        with.redundancy = true;
        let mut without = config(2, 4, 10);
        without.redundancy = false;

        let record_with = generate(&with).unwrap();
        let record_without = generate(&without).unwrap();

        assert!(record_with.total_links > record_without.total_links);
        assert_eq!(
            record_with.total_links - record_without.total_links,
            link_count(&record_with, LinkType::AccessLinkRedundant)
        );
    }

    /// Distinct subnet prefixes across all addressed devices
    #[test]
    fn test_segment_counting() {
        // 3 router subnets + 1 distribution + 2 access + 1 host subnet; the
        // firewall shares the first router subnet (10.0.0.x)
        let mut cfg = config(3, 3, 20);
        cfg.security_level = SecurityLevel::High;
        let record = generate(&cfg).unwrap();
        assert_eq!(record.segments, 7);
    }

    /// Routers sit strictly above switches; single-device tiers center at x=0
    #[test]
    fn test_layout_tier_property() {
        let record = generate(&config(1, 2, 0)).unwrap();
        let positions = layout(&record);

        let router = positions["Router-core-01"];
        let dist = positions["Switch-distribution-01"];
        let access = positions["Switch-access-01"];

        assert!(router.1 > dist.1);
        assert!(router.1 > access.1);
        assert_eq!(router.0, 0.0);
        assert_eq!(dist.0, 0.0);
    }

    /// The documented example scenario: enterprise, 3 routers, 6 switches,
    /// 30 hosts, high security, redundancy enabled
    #[test]
    fn test_enterprise_example_scenario() {
        let record = generate(&GenerationConfig {
            network_type: NetworkType::Enterprise,
            routers: 3,
            switches: 6,
            hosts: 30,
            security_level: SecurityLevel::High,
            redundancy: true,
            ai_optimize: true,
            seed: Some(1),
        })
        .unwrap();

        assert_eq!(kind_count(&record, DeviceKind::Firewall), 1);
        assert_eq!(kind_count(&record, DeviceKind::Ips), 0);

        // Every host has exactly one host link; redundant links exist only
        // at the switch tier
        let mut host_links: HashMap<&str, usize> = HashMap::new();
        for link in &record.links {
            if link.link_type == LinkType::HostLink {
                *host_links.entry(link.target.as_str()).or_default() += 1;
            }
            if link.link_type == LinkType::AccessLinkRedundant {
                assert!(link.target.starts_with("Switch-access-"));
            }
        }
        assert_eq!(host_links.len(), 30);
        assert!(host_links.values().all(|&count| count == 1));

        // 3 core mesh + 6 distribution uplinks + 3 access + 3 redundant + 30 host
        assert_eq!(record.total_links, 45);
        assert_eq!(record.total_devices, 40);
        assert_eq!(record.segments, 10);
    }

    /// Datacenter wiring has a full spine-leaf bipartite mesh and no
    /// hierarchical link types
    #[test]
    fn test_datacenter_scenario() {
        let mut cfg = config(4, 8, 16);
        cfg.network_type = NetworkType::Datacenter;
        let record = generate(&cfg).unwrap();

        // 4 spines x 4 leaves
        assert_eq!(link_count(&record, LinkType::SpineLeafLink), 16);
        assert_eq!(link_count(&record, LinkType::LeafAccessLink), 4);
        assert_eq!(link_count(&record, LinkType::ServerLink), 16);
        assert_eq!(link_count(&record, LinkType::CoreLink), 0);
        assert_eq!(link_count(&record, LinkType::HostLink), 0);
    }

    /// Invalid parameter combinations fail before any assembly happens
    #[test]
    fn test_invalid_parameters() {
        let invalid = [
            config(0, 4, 10),  // no routers
            config(2, 1, 0),   // single switch leaves a tier empty
            config(2, 0, 10),  // hosts with no access tier
        ];
        for cfg in invalid {
            assert!(matches!(
                generate(&cfg),
                Err(GenerateError::InvalidParameter(_))
            ));
        }
    }

    /// A generation run the size of a large campus completes and stays
    /// internally consistent
    #[test]
    fn test_large_topology() {
        let record = generate(&config(50, 100, 500)).unwrap();

        assert_eq!(kind_count(&record, DeviceKind::Router), 50);
        assert_eq!(kind_count(&record, DeviceKind::Switch), 100);
        assert_eq!(kind_count(&record, DeviceKind::Host), 500);
        assert_eq!(link_count(&record, LinkType::CoreLink), 50 * 49 / 2);
        assert!(record.dangling_endpoints().is_empty());

        // Layout still caps the host tier
        let positions = layout(&record);
        let positioned_hosts = record
            .devices_of_kind(DeviceKind::Host)
            .filter(|d| positions.contains_key(d.name()))
            .count();
        assert_eq!(positioned_hosts, MAX_POSITIONED_HOSTS);
    }

    /// End-to-end: YAML config file through generation to JSON artifacts
    #[test]
    fn test_yaml_to_json_pipeline() {
        let yaml = r#"
network_type: enterprise
routers: 2
switches: 4
hosts: 8
security_level: critical
redundancy: true
seed: 99
"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", yaml).unwrap();

        let config = load_config(temp_file.path()).unwrap();
        let record = generate(&config).unwrap();

        assert_eq!(record.metadata.security_devices, 2);
        assert_eq!(record.total_devices, 2 + 4 + 8 + 2);

        let json = record.to_json().unwrap();
        let back: TopologyRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);

        // The layout serializes independently of the record
        let positions = layout(&record);
        let layout_json = serde_json::to_string(&positions).unwrap();
        let layout_back: HashMap<String, (f64, f64)> =
            serde_json::from_str(&layout_json).unwrap();
        assert_eq!(layout_back, positions);
    }
}
