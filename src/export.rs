//! Configuration exporter.
//!
//! Renders per-device Cisco-style configuration text and network
//! documentation from a topology record, and packages everything with the
//! record itself into a JSON export bundle. Interface descriptions are
//! derived from the record's adjacency structure so each config names the
//! neighbors it actually connects to.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;

use crate::device::{Device, DeviceKind};
use crate::topology::TopologyRecord;

const EXPORT_FORMAT_VERSION: &str = "8.2";

/// IP addressing scheme documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpScheme {
    pub management_network: String,
    pub core_network: String,
    pub distribution_network: String,
    pub access_network: String,
}

/// Generated network documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Documentation {
    pub network_overview: String,
    pub total_devices: usize,
    pub total_segments: usize,
    pub ip_addressing_scheme: IpScheme,
    pub vlan_design: BTreeMap<String, String>,
    pub routing_protocols: Vec<String>,
    pub security_features: Vec<String>,
}

/// The full export bundle; serialized as the archival form of a topology
#[derive(Debug, Serialize)]
pub struct ExportBundle<'a> {
    pub version: &'static str,
    pub topology: &'a TopologyRecord,
    pub configurations: BTreeMap<String, String>,
    pub documentation: Documentation,
}

/// Export a topology record to configuration text and documentation
pub struct ConfigExporter<'a> {
    record: &'a TopologyRecord,
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl<'a> ConfigExporter<'a> {
    pub fn new(record: &'a TopologyRecord) -> Self {
        Self {
            record,
            adjacency: record.adjacency(),
        }
    }

    /// Configuration text for every configurable device (routers, switches,
    /// firewalls), keyed by device name
    pub fn device_configs(&self) -> BTreeMap<String, String> {
        self.record
            .devices
            .iter()
            .filter_map(|device| {
                let config = match device.kind() {
                    DeviceKind::Router => Some(self.router_config(device)),
                    DeviceKind::Switch => Some(self.switch_config(device)),
                    DeviceKind::Firewall => Some(self.firewall_config(device)),
                    _ => None,
                };
                config.map(|c| (device.name().to_string(), c))
            })
            .collect()
    }

    /// Lines describing each neighbor, for interface documentation
    fn neighbor_descriptions(&self, name: &str) -> String {
        let Some(neighbors) = self.adjacency.get(name) else {
            return String::new();
        };
        neighbors
            .iter()
            .enumerate()
            .map(|(i, neighbor)| {
                format!(
                    "interface GigabitEthernet0/{}\n description Link to {}\n!\n",
                    i + 1,
                    neighbor
                )
            })
            .collect()
    }

    fn router_config(&self, device: &Device) -> String {
        let ip = device.ip_address().unwrap_or("0.0.0.0");
        format!(
            "!\nhostname {name}\n!\ninterface GigabitEthernet0/0\n ip address {ip} 255.255.255.0\n no shutdown\n!\n{neighbors}router ospf 1\n network {ip} 0.0.0.255 area 0\n!\nline vty 0 4\n login local\n transport input ssh\n!\nend\n",
            name = device.name(),
            ip = ip,
            neighbors = self.neighbor_descriptions(device.name()),
        )
    }

    fn switch_config(&self, device: &Device) -> String {
        let ip = device.ip_address().unwrap_or("0.0.0.0");
        format!(
            "!\nhostname {name}\n!\nvlan 10\n name DATA\nvlan 20\n name VOICE\nvlan 30\n name MANAGEMENT\n!\ninterface vlan 30\n ip address {ip} 255.255.255.0\n!\n{neighbors}end\n",
            name = device.name(),
            ip = ip,
            neighbors = self.neighbor_descriptions(device.name()),
        )
    }

    fn firewall_config(&self, device: &Device) -> String {
        let ip = device.ip_address().unwrap_or("0.0.0.0");
        format!(
            "!\nhostname {name}\n!\ninterface GigabitEthernet0/0\n nameif outside\n security-level 0\n ip address {ip} 255.255.255.0\n!\ninterface GigabitEthernet0/1\n nameif inside\n security-level 100\n!\nssh 10.0.0.0 255.0.0.0 inside\n!\nend\n",
            name = device.name(),
            ip = ip,
        )
    }

    /// Network documentation derived from the record
    pub fn documentation(&self) -> Documentation {
        let mut vlan_design = BTreeMap::new();
        vlan_design.insert("VLAN 10".to_string(), "Data Network".to_string());
        vlan_design.insert("VLAN 20".to_string(), "Voice Network".to_string());
        vlan_design.insert("VLAN 30".to_string(), "Management Network".to_string());
        vlan_design.insert("VLAN 40".to_string(), "Guest Network".to_string());

        let mut security_features = vec![
            "ACLs configured on all routers".to_string(),
            "Port security enabled on access switches".to_string(),
            "DHCP snooping enabled".to_string(),
            "Dynamic ARP Inspection enabled".to_string(),
            "SSH enabled for management access".to_string(),
        ];
        if self.record.devices_of_kind(DeviceKind::Firewall).count() > 0 {
            security_features.insert(0, "Firewall deployed at network edge".to_string());
        }
        if self.record.devices_of_kind(DeviceKind::Ips).count() > 0 {
            security_features.push("Intrusion prevention system inline".to_string());
        }

        Documentation {
            network_overview: format!("Network Type: {}", self.record.network_type.as_str()),
            total_devices: self.record.total_devices,
            total_segments: self.record.segments,
            ip_addressing_scheme: IpScheme {
                management_network: "192.168.100.0/24".to_string(),
                core_network: "10.0.0.0/16".to_string(),
                distribution_network: "10.1.0.0/16".to_string(),
                access_network: "10.10.0.0/16".to_string(),
            },
            vlan_design,
            routing_protocols: vec!["OSPF".to_string()],
            security_features,
        }
    }

    /// Assemble the full export bundle
    pub fn export_bundle(&self) -> ExportBundle<'a> {
        ExportBundle {
            version: EXPORT_FORMAT_VERSION,
            topology: self.record,
            configurations: self.device_configs(),
            documentation: self.documentation(),
        }
    }

    /// Write the bundle as pretty-printed JSON
    pub fn write_bundle(&self, path: &Path) -> Result<()> {
        let bundle = self.export_bundle();
        let json = serde_json::to_string_pretty(&bundle)
            .wrap_err("Failed to serialize export bundle")?;
        std::fs::write(path, json)
            .wrap_err_with(|| format!("Failed to write export bundle '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationConfig, SecurityLevel};
    use crate::generator::generate;

    fn test_record() -> TopologyRecord {
        generate(&GenerationConfig {
            routers: 2,
            switches: 2,
            hosts: 4,
            security_level: SecurityLevel::High,
            seed: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_configs_cover_infrastructure_devices_only() {
        let record = test_record();
        let exporter = ConfigExporter::new(&record);
        let configs = exporter.device_configs();

        // 2 routers + 2 switches + 1 firewall; hosts get no config
        assert_eq!(configs.len(), 5);
        assert!(configs.contains_key("Router-core-01"));
        assert!(configs.contains_key("Firewall-01"));
        assert!(!configs.contains_key("Host-001"));
    }

    #[test]
    fn test_router_config_contains_address_and_ospf() {
        let record = test_record();
        let exporter = ConfigExporter::new(&record);
        let configs = exporter.device_configs();

        let router = &configs["Router-core-01"];
        assert!(router.contains("hostname Router-core-01"));
        assert!(router.contains("ip address 10.0.0.1 255.255.255.0"));
        assert!(router.contains("router ospf 1"));
        assert!(router.contains("transport input ssh"));
    }

    #[test]
    fn test_configs_describe_neighbors() {
        let record = test_record();
        let exporter = ConfigExporter::new(&record);
        let configs = exporter.device_configs();

        // Core mesh of two routers: each names the other
        assert!(configs["Router-core-01"].contains("description Link to Router-core-02"));
        assert!(configs["Router-core-02"].contains("description Link to Router-core-01"));

        // The access switch names its attached hosts
        let access = &configs["Switch-access-01"];
        assert!(access.contains("description Link to Host-001"));
    }

    #[test]
    fn test_documentation_reflects_security_devices() {
        let record = test_record();
        let exporter = ConfigExporter::new(&record);
        let docs = exporter.documentation();

        assert_eq!(docs.total_devices, record.total_devices);
        assert_eq!(docs.network_overview, "Network Type: enterprise");
        assert_eq!(docs.security_features[0], "Firewall deployed at network edge");
        assert_eq!(docs.routing_protocols, vec!["OSPF".to_string()]);
    }

    #[test]
    fn test_bundle_round_trips_topology() {
        let record = test_record();
        let exporter = ConfigExporter::new(&record);
        let bundle = exporter.export_bundle();

        let json = serde_json::to_string(&bundle).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["version"], EXPORT_FORMAT_VERSION);

        let back: TopologyRecord = serde_json::from_value(value["topology"].clone()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_write_bundle() {
        let record = test_record();
        let exporter = ConfigExporter::new(&record);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export_bundle.json");
        exporter.write_bundle(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"version\""));
        assert!(content.contains("Router-core-01"));
    }
}
