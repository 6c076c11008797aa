//! Device factory.
//!
//! Produces the typed device records a topology is built from: routers,
//! switches, hosts, and the security devices implied by the security level.
//! Names, models, and addresses are deterministic functions of the device
//! role and ordinal; only MAC addresses and host operating systems come from
//! the injected random source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::SecurityLevel;

/// Sentinel addresses near the top of the core subnet for security devices
pub const FIREWALL_ADDRESS: &str = "10.0.0.254";
pub const IPS_ADDRESS: &str = "10.0.0.253";

const CORE_ROUTER_MODEL: &str = "Cisco ISR 4451";
const EDGE_ROUTER_MODEL: &str = "Cisco ISR 4331";
const DISTRIBUTION_SWITCH_MODEL: &str = "Cisco Catalyst 9300";
const ACCESS_SWITCH_MODEL: &str = "Cisco Catalyst 2960";
const FIREWALL_MODEL: &str = "Cisco ASA 5516-X";
const IPS_MODEL: &str = "Cisco Firepower 2130";

const ROUTER_INTERFACES: usize = 8;
const SWITCH_INTERFACES: usize = 48;
const SECURITY_INTERFACES: usize = 4;

const HOST_OPERATING_SYSTEMS: [&str; 4] =
    ["Windows 10", "Windows 11", "Ubuntu 22.04", "macOS"];

/// The closed set of device kinds a topology can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Router,
    Switch,
    Host,
    Firewall,
    Ips,
    Cloud,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Router => "router",
            DeviceKind::Switch => "switch",
            DeviceKind::Host => "host",
            DeviceKind::Firewall => "firewall",
            DeviceKind::Ips => "ips",
            DeviceKind::Cloud => "cloud",
        }
    }
}

/// Router placement role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouterRole {
    Core,
    Edge,
}

impl RouterRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouterRole::Core => "core",
            RouterRole::Edge => "edge",
        }
    }

    fn model(&self) -> &'static str {
        match self {
            RouterRole::Core => CORE_ROUTER_MODEL,
            RouterRole::Edge => EDGE_ROUTER_MODEL,
        }
    }
}

/// Switch tier within the hierarchical design.
///
/// Records produced by this crate always carry `Distribution` or `Access`;
/// `Other` exists so that externally produced records with a different tier
/// label still deserialize, and lets the layout engine fall back to an
/// index-based split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchTier {
    Distribution,
    Access,
    Other(String),
}

impl SwitchTier {
    pub fn as_str(&self) -> &str {
        match self {
            SwitchTier::Distribution => "distribution",
            SwitchTier::Access => "access",
            SwitchTier::Other(label) => label,
        }
    }

    /// Second address octet distinguishing the tiers
    fn subnet_octet(&self) -> u8 {
        match self {
            SwitchTier::Distribution => 1,
            _ => 2,
        }
    }

    fn model(&self) -> &'static str {
        match self {
            SwitchTier::Distribution => DISTRIBUTION_SWITCH_MODEL,
            _ => ACCESS_SWITCH_MODEL,
        }
    }
}

impl Serialize for SwitchTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SwitchTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(match label.as_str() {
            "distribution" => SwitchTier::Distribution,
            "access" => SwitchTier::Access,
            _ => SwitchTier::Other(label),
        })
    }
}

/// A synthesized network interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,
    pub status: String,
    pub speed: String,
    pub duplex: String,
}

/// One network node, tagged by kind; each variant carries only the fields
/// meaningful to that kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Device {
    Router {
        name: String,
        subtype: RouterRole,
        model: String,
        ip_address: String,
        interfaces: Vec<Interface>,
        routing_protocol: String,
        management_ip: String,
    },
    Switch {
        name: String,
        subtype: SwitchTier,
        model: String,
        ip_address: String,
        interfaces: Vec<Interface>,
        vlan_support: bool,
        management_ip: String,
    },
    Host {
        name: String,
        subtype: String,
        ip_address: String,
        mac_address: String,
        os: String,
    },
    Firewall {
        name: String,
        model: String,
        ip_address: String,
        interfaces: Vec<Interface>,
        features: Vec<String>,
    },
    Ips {
        name: String,
        model: String,
        ip_address: String,
        interfaces: Vec<Interface>,
        features: Vec<String>,
    },
    Cloud {
        name: String,
        provider: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        ip_address: Option<String>,
    },
}

impl Device {
    pub fn name(&self) -> &str {
        match self {
            Device::Router { name, .. }
            | Device::Switch { name, .. }
            | Device::Host { name, .. }
            | Device::Firewall { name, .. }
            | Device::Ips { name, .. }
            | Device::Cloud { name, .. } => name,
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            Device::Router { .. } => DeviceKind::Router,
            Device::Switch { .. } => DeviceKind::Switch,
            Device::Host { .. } => DeviceKind::Host,
            Device::Firewall { .. } => DeviceKind::Firewall,
            Device::Ips { .. } => DeviceKind::Ips,
            Device::Cloud { .. } => DeviceKind::Cloud,
        }
    }

    /// Data-plane address. Cloud nodes may be unaddressed.
    pub fn ip_address(&self) -> Option<&str> {
        match self {
            Device::Router { ip_address, .. }
            | Device::Switch { ip_address, .. }
            | Device::Host { ip_address, .. }
            | Device::Firewall { ip_address, .. }
            | Device::Ips { ip_address, .. } => Some(ip_address),
            Device::Cloud { ip_address, .. } => ip_address.as_deref(),
        }
    }

    pub fn subtype(&self) -> Option<&str> {
        match self {
            Device::Router { subtype, .. } => Some(subtype.as_str()),
            Device::Switch { subtype, .. } => Some(subtype.as_str()),
            Device::Host { subtype, .. } => Some(subtype),
            _ => None,
        }
    }

    pub fn model(&self) -> Option<&str> {
        match self {
            Device::Router { model, .. }
            | Device::Switch { model, .. }
            | Device::Firewall { model, .. }
            | Device::Ips { model, .. } => Some(model),
            _ => None,
        }
    }

    /// First three octets of the address, the device's subnet key.
    /// Returns `None` for unaddressed devices and unparseable addresses.
    pub fn subnet_prefix(&self) -> Option<String> {
        let addr: std::net::Ipv4Addr = self.ip_address()?.parse().ok()?;
        let octets = addr.octets();
        Some(format!("{}.{}.{}", octets[0], octets[1], octets[2]))
    }
}

/// Synthesize the interface list for one device kind
fn interfaces(kind: DeviceKind, count: usize) -> Vec<Interface> {
    (0..count)
        .map(|i| {
            let name = match kind {
                DeviceKind::Router | DeviceKind::Firewall => {
                    format!("GigabitEthernet0/{}", i)
                }
                _ => format!("FastEthernet0/{}", i),
            };
            let speed = match kind {
                DeviceKind::Router | DeviceKind::Switch => "1000",
                _ => "100",
            };
            Interface {
                name,
                status: "up".to_string(),
                speed: speed.to_string(),
                duplex: "full".to_string(),
            }
        })
        .collect()
}

/// Produces device records for one generation run.
///
/// Each run owns its own factory; there is no process-wide state, so
/// concurrent generations never interfere.
pub struct DeviceFactory {
    rng: StdRng,
}

impl DeviceFactory {
    /// Create a factory with the given seed, or a fresh entropy seed when
    /// `None`. Only MAC addresses and host OS choices consume randomness.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Generate `count` routers of the given role, addressed `10.0.{i}.1`
    pub fn routers(&mut self, count: u32, role: RouterRole) -> Vec<Device> {
        (0..count)
            .map(|i| Device::Router {
                name: format!("Router-{}-{:02}", role.as_str(), i + 1),
                subtype: role,
                model: role.model().to_string(),
                ip_address: format!("10.0.{}.1", i),
                interfaces: interfaces(DeviceKind::Router, ROUTER_INTERFACES),
                routing_protocol: "OSPF".to_string(),
                management_ip: format!("192.168.100.{}", i + 1),
            })
            .collect()
    }

    /// Generate `count` switches of the given tier, addressed `10.{1|2}.{i}.1`
    pub fn switches(&mut self, count: u32, tier: SwitchTier) -> Vec<Device> {
        (0..count)
            .map(|i| Device::Switch {
                name: format!("Switch-{}-{:02}", tier.as_str(), i + 1),
                subtype: tier.clone(),
                model: tier.model().to_string(),
                ip_address: format!("10.{}.{}.1", tier.subnet_octet(), i),
                interfaces: interfaces(DeviceKind::Switch, SWITCH_INTERFACES),
                vlan_support: true,
                management_ip: format!("192.168.101.{}", i + 1),
            })
            .collect()
    }

    /// Generate `count` workstation hosts. Addressing rolls into a new third
    /// octet every 254 hosts, modeling /24 subnet exhaustion.
    pub fn hosts(&mut self, count: u32) -> Vec<Device> {
        (0..count)
            .map(|i| Device::Host {
                name: format!("Host-{:03}", i + 1),
                subtype: "workstation".to_string(),
                ip_address: format!("10.10.{}.{}", i / 254, (i % 254) + 1),
                mac_address: self.mac_address(),
                os: self.host_os().to_string(),
            })
            .collect()
    }

    /// Security devices implied by the security level: a firewall for high
    /// and critical, plus an IPS for critical.
    pub fn security_devices(&mut self, level: SecurityLevel) -> Vec<Device> {
        let mut devices = Vec::new();

        if level.requires_firewall() {
            devices.push(Device::Firewall {
                name: "Firewall-01".to_string(),
                model: FIREWALL_MODEL.to_string(),
                ip_address: FIREWALL_ADDRESS.to_string(),
                interfaces: interfaces(DeviceKind::Firewall, SECURITY_INTERFACES),
                features: vec![
                    "stateful_inspection".to_string(),
                    "ips".to_string(),
                    "vpn".to_string(),
                ],
            });
        }

        if level.requires_ips() {
            devices.push(Device::Ips {
                name: "IPS-01".to_string(),
                model: IPS_MODEL.to_string(),
                ip_address: IPS_ADDRESS.to_string(),
                interfaces: interfaces(DeviceKind::Ips, SECURITY_INTERFACES),
                features: vec![
                    "intrusion_prevention".to_string(),
                    "malware_detection".to_string(),
                    "threat_intelligence".to_string(),
                ],
            });
        }

        devices
    }

    fn mac_address(&mut self) -> String {
        let octets: Vec<String> = (0..6)
            .map(|_| format!("{:02x}", self.rng.gen_range(0..=255u8)))
            .collect();
        octets.join(":")
    }

    fn host_os(&mut self) -> &'static str {
        HOST_OPERATING_SYSTEMS[self.rng.gen_range(0..HOST_OPERATING_SYSTEMS.len())]
    }
}
