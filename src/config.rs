use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Network archetype selecting the wiring template
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum NetworkType {
    /// Three-tier hierarchical network with a full-mesh core
    Enterprise,
    /// Spine-leaf fabric; routers act as spine, distribution switches as leaf
    Datacenter,
    /// Campus-wide network, wired like enterprise
    Campus,
    /// Cloud-native architecture, wired with the default hierarchical rules
    Cloud,
    /// On-premise plus cloud integration, wired with the default hierarchical rules
    Hybrid,
}

impl NetworkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkType::Enterprise => "enterprise",
            NetworkType::Datacenter => "datacenter",
            NetworkType::Campus => "campus",
            NetworkType::Cloud => "cloud",
            NetworkType::Hybrid => "hybrid",
        }
    }
}

/// Security posture controlling which security devices are placed
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SecurityLevel {
    /// A firewall is placed for high and critical postures
    pub fn requires_firewall(&self) -> bool {
        matches!(self, SecurityLevel::High | SecurityLevel::Critical)
    }

    /// An IPS is placed only for the critical posture
    pub fn requires_ips(&self) -> bool {
        matches!(self, SecurityLevel::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::Low => "low",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
            SecurityLevel::Critical => "critical",
        }
    }
}

/// Generation parameters for one topology run
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GenerationConfig {
    pub network_type: NetworkType,
    pub routers: u32,
    pub switches: u32,
    pub hosts: u32,
    pub security_level: SecurityLevel,
    pub redundancy: bool,
    pub ai_optimize: bool,
    /// Seed for the random source (MAC addresses, host OS choice, synthetic
    /// audit findings). Unset means a fresh entropy seed per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            network_type: NetworkType::Enterprise,
            routers: 5,
            switches: 10,
            hosts: 50,
            security_level: SecurityLevel::High,
            redundancy: true,
            ai_optimize: true,
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Validate the configuration.
    ///
    /// Counts are unsigned so negative input is rejected at parse time; this
    /// checks the structural requirements: at least one core router, and both
    /// switch tiers populated whenever the switch layer exists or hosts need
    /// to be attached.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.routers == 0 {
            return Err(ValidationError::InvalidRouters(
                "at least one core router is required".to_string(),
            ));
        }

        if self.switches == 1 {
            return Err(ValidationError::InvalidSwitches(
                "switch count must be 0 or at least 2 so both the distribution \
                 and access tiers are populated"
                    .to_string(),
            ));
        }

        if self.hosts > 0 && self.switches < 2 {
            return Err(ValidationError::InvalidHosts(format!(
                "{} hosts require at least 2 switches for an access tier",
                self.hosts
            )));
        }

        Ok(())
    }

    /// Split the requested switch count into (distribution, access) tiers.
    /// The remainder of an odd count goes to the access tier so the requested
    /// total is always preserved.
    pub fn switch_split(&self) -> (u32, u32) {
        let dist = self.switches / 2;
        (dist, self.switches - dist)
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid router count: {0}")]
    InvalidRouters(String),
    #[error("Invalid switch count: {0}")]
    InvalidSwitches(String),
    #[error("Invalid host count: {0}")]
    InvalidHosts(String),
}
