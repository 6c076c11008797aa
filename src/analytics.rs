//! Network analytics engine.
//!
//! Produces synthetic performance, traffic, and capacity metrics for a
//! topology record. The numbers are simulated (there is no real traffic to
//! measure) but come from the injected random source, so a fixed seed gives
//! a reproducible report.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::device::DeviceKind;
use crate::topology::TopologyRecord;

const CAPACITY_DEVICE_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub average_latency_ms: f64,
    pub peak_latency_ms: f64,
    pub throughput_gbps: f64,
    pub packet_loss_percent: f64,
    pub jitter_ms: f64,
    pub availability_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopTalker {
    pub device: String,
    pub traffic_gb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficAnalysis {
    pub total_traffic_gb: f64,
    pub peak_hour_traffic_gb: f64,
    pub protocol_distribution: BTreeMap<String, u32>,
    pub top_talkers: Vec<TopTalker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceUtilization {
    pub device: String,
    pub utilization_percent: u32,
    pub capacity_remaining_percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub three_months: String,
    pub six_months: String,
    pub twelve_months: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityPlanning {
    pub overall_utilization_percent: u32,
    pub peak_utilization_percent: u32,
    pub device_utilization: Vec<DeviceUtilization>,
    pub growth_projection: GrowthProjection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub location: String,
    #[serde(rename = "type")]
    pub bottleneck_type: String,
    pub severity: String,
    pub metric: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub performance_metrics: PerformanceMetrics,
    pub traffic_analysis: TrafficAnalysis,
    pub capacity_planning: CapacityPlanning,
    pub bottleneck_detection: Vec<Bottleneck>,
    pub optimization_suggestions: Vec<String>,
}

const OPTIMIZATION_SUGGESTIONS: [&str; 8] = [
    "Implement QoS policies for critical applications",
    "Enable link aggregation on high-traffic switches",
    "Optimize routing protocols for faster convergence",
    "Deploy caching servers to reduce WAN traffic",
    "Implement traffic shaping for bandwidth management",
    "Upgrade core router interfaces to 10Gbps",
    "Enable jumbo frames for improved throughput",
    "Implement load balancing across redundant paths",
];

/// Analyze network performance for one topology record
pub struct NetworkAnalytics<'a> {
    record: &'a TopologyRecord,
    rng: StdRng,
}

impl<'a> NetworkAnalytics<'a> {
    pub fn new(record: &'a TopologyRecord, rng: StdRng) -> Self {
        Self { record, rng }
    }

    /// Perform the full analysis
    pub fn analyze(&mut self) -> AnalyticsReport {
        AnalyticsReport {
            performance_metrics: self.performance(),
            traffic_analysis: self.traffic(),
            capacity_planning: self.capacity(),
            bottleneck_detection: self.bottlenecks(),
            optimization_suggestions: OPTIMIZATION_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    fn performance(&mut self) -> PerformanceMetrics {
        PerformanceMetrics {
            average_latency_ms: round2(self.rng.gen_range(10.0..20.0)),
            peak_latency_ms: round2(self.rng.gen_range(25.0..40.0)),
            throughput_gbps: round2(self.rng.gen_range(2.0..3.5)),
            packet_loss_percent: round3(self.rng.gen_range(0.01..0.05)),
            jitter_ms: round2(self.rng.gen_range(1.0..5.0)),
            availability_percent: round2(self.rng.gen_range(99.9..99.99)),
        }
    }

    fn traffic(&mut self) -> TrafficAnalysis {
        let mut protocol_distribution = BTreeMap::new();
        protocol_distribution.insert("HTTP".to_string(), self.rng.gen_range(30..=40));
        protocol_distribution.insert("HTTPS".to_string(), self.rng.gen_range(35..=45));
        protocol_distribution.insert("SSH".to_string(), self.rng.gen_range(5..=15));
        protocol_distribution.insert("FTP".to_string(), self.rng.gen_range(2..=8));
        protocol_distribution.insert("DNS".to_string(), self.rng.gen_range(3..=7));
        protocol_distribution.insert("Other".to_string(), self.rng.gen_range(3..=10));

        // The heaviest talkers are the first device of each backbone kind
        let talker_candidates = [
            self.record.devices_of_kind(DeviceKind::Router).next(),
            self.record.devices_of_kind(DeviceKind::Switch).next(),
            self.record.devices_of_kind(DeviceKind::Firewall).next(),
        ];
        let top_talkers = talker_candidates
            .into_iter()
            .flatten()
            .map(|device| TopTalker {
                device: device.name().to_string(),
                traffic_gb: round2(self.rng.gen_range(70.0..300.0)),
            })
            .collect();

        TrafficAnalysis {
            total_traffic_gb: round2(self.rng.gen_range(1000.0..5000.0)),
            peak_hour_traffic_gb: round2(self.rng.gen_range(200.0..500.0)),
            protocol_distribution,
            top_talkers,
        }
    }

    fn capacity(&mut self) -> CapacityPlanning {
        let device_utilization = self
            .record
            .devices
            .iter()
            .take(CAPACITY_DEVICE_LIMIT)
            .map(|device| DeviceUtilization {
                device: device.name().to_string(),
                utilization_percent: self.rng.gen_range(40..=85),
                capacity_remaining_percent: self.rng.gen_range(15..=60),
            })
            .collect();

        CapacityPlanning {
            overall_utilization_percent: self.rng.gen_range(60..=75),
            peak_utilization_percent: self.rng.gen_range(80..=95),
            device_utilization,
            growth_projection: GrowthProjection {
                three_months: format!("+{}%", self.rng.gen_range(5..=15)),
                six_months: format!("+{}%", self.rng.gen_range(10..=25)),
                twelve_months: format!("+{}%", self.rng.gen_range(20..=40)),
            },
        }
    }

    fn bottlenecks(&mut self) -> Vec<Bottleneck> {
        // Anchor the synthetic findings to devices that actually exist
        let dist_switch = self
            .record
            .devices
            .iter()
            .find(|d| d.subtype() == Some("distribution"))
            .map(|d| d.name().to_string());
        let core_link = self
            .record
            .links
            .first()
            .map(|l| format!("{} to {}", l.source, l.target));

        let mut bottlenecks = Vec::new();
        if let Some(location) = dist_switch {
            bottlenecks.push(Bottleneck {
                location,
                bottleneck_type: "Bandwidth Saturation".to_string(),
                severity: "High".to_string(),
                metric: format!("{}% utilization", self.rng.gen_range(88..=97)),
                recommendation: "Upgrade to 10Gbps uplink".to_string(),
            });
        }
        if let Some(location) = core_link {
            bottlenecks.push(Bottleneck {
                location,
                bottleneck_type: "High Latency".to_string(),
                severity: "Medium".to_string(),
                metric: format!("{}ms latency", self.rng.gen_range(35..=55)),
                recommendation: "Check for routing loops or misconfigurations".to_string(),
            });
        }
        bottlenecks
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
