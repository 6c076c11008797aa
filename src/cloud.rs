//! Cloud network builder.
//!
//! Designs a hybrid topology around an existing on-premise record: provider
//! network resources, a site-to-site VPN, BGP routing between the two sides,
//! and a monthly cost estimate. Consumes only summary counts of the record;
//! the record itself is never modified.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::topology::TopologyRecord;

/// Supported cloud providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum CloudProvider {
    Aws,
    Azure,
    Gcp,
}

impl CloudProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "aws",
            CloudProvider::Azure => "azure",
            CloudProvider::Gcp => "gcp",
        }
    }

    fn region(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "us-east-1",
            CloudProvider::Azure => "eastus",
            CloudProvider::Gcp => "us-central1",
        }
    }

    fn network_id_prefix(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "vpc",
            CloudProvider::Azure => "vnet",
            CloudProvider::Gcp => "vpc-network",
        }
    }

    fn gateway_id_prefix(&self) -> &'static str {
        match self {
            CloudProvider::Aws => "vgw",
            CloudProvider::Azure => "vpngw",
            CloudProvider::Gcp => "vpn-gw",
        }
    }

    /// (gateway per month, data transfer per GB, connection per hour) in USD
    fn base_costs(&self) -> (f64, f64, f64) {
        match self {
            CloudProvider::Aws => (36.00, 0.09, 0.05),
            CloudProvider::Azure => (27.00, 0.087, 0.04),
            CloudProvider::Gcp => (36.50, 0.085, 0.05),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkResource {
    pub id: String,
    pub cidr_block: String,
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnetResource {
    pub id: String,
    pub cidr_block: String,
    #[serde(rename = "type")]
    pub subnet_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayResource {
    pub id: String,
    #[serde(rename = "type")]
    pub gateway_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub name: String,
    pub protocol: String,
    pub ports: Vec<u16>,
}

/// Provider-side network resources for the hybrid deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudResources {
    pub network: NetworkResource,
    pub subnets: Vec<SubnetResource>,
    pub vpn_gateway: GatewayResource,
    pub customer_gateway: GatewayResource,
    pub firewall_rules: Vec<FirewallRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IkePhase {
    pub encryption: String,
    pub authentication: String,
    pub dh_group: u8,
    pub lifetime_s: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadPeerDetection {
    pub enabled: bool,
    pub interval_s: u32,
    pub retries: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelSettings {
    pub mtu: u32,
    pub tcp_mss_adjustment: u32,
    pub dead_peer_detection: DeadPeerDetection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VpnConfiguration {
    pub integration_type: String,
    pub encryption_algorithm: String,
    pub hash: String,
    pub pfs_enabled: bool,
    pub phase1: IkePhase,
    pub phase2: IkePhase,
    pub tunnel: TunnelSettings,
    pub bandwidth_allocation: String,
    pub qos_enabled: bool,
    pub redundancy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticRoute {
    pub destination: String,
    pub next_hop: String,
    pub metric: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingConfiguration {
    pub protocol: String,
    pub local_asn: u32,
    pub remote_asn: u32,
    pub neighbor_ip: String,
    pub keepalive_s: u32,
    pub holdtime_s: u32,
    pub static_routes: Vec<StaticRoute>,
    pub route_propagation: bool,
    pub inbound_filters: Vec<String>,
    pub outbound_filters: Vec<String>,
}

/// Estimated monthly cost breakdown in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub currency: String,
    pub vpn_gateway_monthly: f64,
    pub data_transfer_monthly: f64,
    pub connection_hours_monthly: f64,
    pub total_monthly: f64,
    pub total_annual: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnPremiseSummary {
    pub total_devices: usize,
    pub network_type: String,
}

/// The full hybrid deployment design
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridConfig {
    pub deployment_id: String,
    pub cloud_provider: CloudProvider,
    pub integration_type: String,
    pub on_premise_network: OnPremiseSummary,
    pub cloud_resources: CloudResources,
    pub vpn_configuration: VpnConfiguration,
    pub routing_configuration: RoutingConfiguration,
    pub bandwidth: String,
    pub encryption: String,
    pub estimated_latency: String,
    pub availability: String,
    pub cost_estimate: CostEstimate,
}

const CLOUD_CIDR: &str = "172.16.0.0/16";
const ON_PREMISE_CIDR: &str = "10.0.0.0/8";
const HOURS_PER_MONTH: f64 = 730.0;

/// Build hybrid cloud network architectures
pub struct CloudNetworkBuilder {
    rng: StdRng,
}

impl CloudNetworkBuilder {
    /// Create a builder with the given seed, or a fresh entropy seed when
    /// `None`. Randomness only affects resource identifiers and the latency
    /// estimate.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Design a hybrid topology bridging the record's network into the cloud
    pub fn hybrid_topology(
        &mut self,
        on_premise: &TopologyRecord,
        provider: CloudProvider,
        integration_type: &str,
        vpn_encryption: &str,
        bandwidth_mbps: u32,
    ) -> HybridConfig {
        let cloud_resources = self.provision_resources(provider);
        let vpn_configuration = vpn_configuration(integration_type, vpn_encryption, bandwidth_mbps);
        let routing_configuration = routing_configuration();
        let cost_estimate = cost_estimate(provider, bandwidth_mbps);

        HybridConfig {
            deployment_id: format!("hybrid-{}", self.rng.gen_range(1000..=9999)),
            cloud_provider: provider,
            integration_type: integration_type.to_string(),
            on_premise_network: OnPremiseSummary {
                total_devices: on_premise.total_devices,
                network_type: on_premise.network_type.as_str().to_string(),
            },
            cloud_resources,
            vpn_configuration,
            routing_configuration,
            bandwidth: format!("{} Mbps", bandwidth_mbps),
            encryption: vpn_encryption.to_string(),
            estimated_latency: format!("{} ms", self.rng.gen_range(10..=30)),
            availability: "99.95%".to_string(),
            cost_estimate,
        }
    }

    fn provision_resources(&mut self, provider: CloudProvider) -> CloudResources {
        let mut resource_id =
            |prefix: &str| format!("{}-{}", prefix, self.rng.gen_range(100000..=999999u32));

        CloudResources {
            network: NetworkResource {
                id: resource_id(provider.network_id_prefix()),
                cidr_block: CLOUD_CIDR.to_string(),
                region: provider.region().to_string(),
            },
            subnets: vec![
                SubnetResource {
                    id: resource_id("subnet"),
                    cidr_block: "172.16.1.0/24".to_string(),
                    subnet_type: "public".to_string(),
                },
                SubnetResource {
                    id: resource_id("subnet"),
                    cidr_block: "172.16.2.0/24".to_string(),
                    subnet_type: "private".to_string(),
                },
            ],
            vpn_gateway: GatewayResource {
                id: resource_id(provider.gateway_id_prefix()),
                gateway_type: "ipsec.1".to_string(),
            },
            customer_gateway: GatewayResource {
                id: resource_id("cgw"),
                gateway_type: "ipsec.1".to_string(),
            },
            firewall_rules: vec![FirewallRule {
                name: "allow-vpn".to_string(),
                protocol: "udp".to_string(),
                ports: vec![500, 4500],
            }],
        }
    }
}

fn vpn_configuration(
    integration_type: &str,
    encryption: &str,
    bandwidth_mbps: u32,
) -> VpnConfiguration {
    VpnConfiguration {
        integration_type: integration_type.to_string(),
        encryption_algorithm: encryption.to_string(),
        hash: "SHA-256".to_string(),
        pfs_enabled: true,
        phase1: IkePhase {
            encryption: encryption.to_string(),
            authentication: "SHA-256".to_string(),
            dh_group: 14,
            lifetime_s: 28800,
        },
        phase2: IkePhase {
            encryption: encryption.to_string(),
            authentication: "SHA-256".to_string(),
            dh_group: 14,
            lifetime_s: 3600,
        },
        tunnel: TunnelSettings {
            mtu: 1400,
            tcp_mss_adjustment: 1360,
            dead_peer_detection: DeadPeerDetection {
                enabled: true,
                interval_s: 10,
                retries: 3,
            },
        },
        bandwidth_allocation: format!("{} Mbps", bandwidth_mbps),
        qos_enabled: true,
        redundancy: "Active-Standby".to_string(),
    }
}

fn routing_configuration() -> RoutingConfiguration {
    RoutingConfiguration {
        protocol: "BGP".to_string(),
        local_asn: 65000,
        remote_asn: 64512,
        neighbor_ip: "169.254.1.1".to_string(),
        keepalive_s: 30,
        holdtime_s: 90,
        static_routes: vec![
            StaticRoute {
                destination: CLOUD_CIDR.to_string(),
                next_hop: "vpn-tunnel".to_string(),
                metric: 100,
            },
            StaticRoute {
                destination: ON_PREMISE_CIDR.to_string(),
                next_hop: "on-premise-gateway".to_string(),
                metric: 50,
            },
        ],
        route_propagation: true,
        inbound_filters: vec![format!("permit {}", CLOUD_CIDR)],
        outbound_filters: vec![format!("permit {}", ON_PREMISE_CIDR)],
    }
}

/// Monthly cost at an assumed 70% sustained utilization of the link
fn cost_estimate(provider: CloudProvider, bandwidth_mbps: u32) -> CostEstimate {
    let (gateway, per_gb, per_hour) = provider.base_costs();

    let monthly_data_gb = (bandwidth_mbps as f64 * 0.7 * HOURS_PER_MONTH * 3600.0)
        / (8.0 * 1024.0 * 1024.0 * 1024.0);
    let data_transfer = monthly_data_gb * per_gb;
    let connection_hours = HOURS_PER_MONTH * per_hour;
    let total = gateway + data_transfer + connection_hours;

    CostEstimate {
        currency: "USD".to_string(),
        vpn_gateway_monthly: round2(gateway),
        data_transfer_monthly: round2(data_transfer),
        connection_hours_monthly: round2(connection_hours),
        total_monthly: round2(total),
        total_annual: round2(total * 12.0),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
