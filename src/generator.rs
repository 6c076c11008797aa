//! Generation orchestrator.
//!
//! This module coordinates the overall topology generation process, managing
//! the flow from parameter validation through device synthesis, wiring,
//! segmentation, and record assembly.

use log::{debug, info};

use crate::config::{GenerationConfig, ValidationError};
use crate::device::{Device, DeviceFactory, RouterRole, SwitchTier};
use crate::topology::{assemble, count_segments, Link, TopologyMetadata, TopologyRecord};

/// Errors surfaced by topology generation
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ValidationError),
    /// A link endpoint that does not resolve to a generated device. Cannot
    /// happen when the assembler is correct; checked defensively so a defect
    /// surfaces as an error instead of a dangling link.
    #[error("link endpoint '{0}' does not resolve to a generated device")]
    StructuralInconsistency(String),
}

/// Generate a topology record from the given parameters.
///
/// Fails fast on invalid parameters; on success the returned record is fully
/// populated and owns its device and link lists exclusively.
pub fn generate(config: &GenerationConfig) -> Result<TopologyRecord, GenerateError> {
    config.validate()?;

    let (dist_count, access_count) = config.switch_split();
    info!(
        "Generating {} topology: {} routers, {} switches ({} distribution / {} access), {} hosts",
        config.network_type.as_str(),
        config.routers,
        config.switches,
        dist_count,
        access_count,
        config.hosts
    );

    let mut factory = DeviceFactory::new(config.seed);
    let routers = factory.routers(config.routers, RouterRole::Core);
    let dist_switches = factory.switches(dist_count, SwitchTier::Distribution);
    let access_switches = factory.switches(access_count, SwitchTier::Access);
    let hosts = factory.hosts(config.hosts);
    let security_devices = factory.security_devices(config.security_level);
    let security_count = security_devices.len();

    let mut links = assemble(
        config.network_type,
        &routers,
        &dist_switches,
        &access_switches,
        &hosts,
        config.redundancy,
    );

    let mut devices = Vec::with_capacity(
        routers.len() + dist_switches.len() + access_switches.len() + hosts.len() + security_count,
    );
    devices.extend(routers);
    devices.extend(dist_switches);
    devices.extend(access_switches);
    devices.extend(hosts);
    devices.extend(security_devices);

    if config.ai_optimize {
        optimize_topology(&mut devices, &mut links);
    }

    check_link_integrity(&devices, &links)?;
    let segments = count_segments(&devices);

    info!(
        "Generated {} devices, {} links, {} segments",
        devices.len(),
        links.len(),
        segments
    );

    Ok(TopologyRecord {
        network_type: config.network_type,
        total_devices: devices.len(),
        total_links: links.len(),
        segments,
        security_level: config.security_level,
        redundancy_enabled: config.redundancy,
        ai_optimized: config.ai_optimize,
        metadata: TopologyMetadata {
            routers: config.routers,
            switches: config.switches,
            hosts: config.hosts,
            security_devices: security_count,
        },
        devices,
        links,
    })
}

/// Extension point for an optimization pass over the assembled graph (link
/// placement, bandwidth allocation, redundant paths). No optimizer is
/// currently wired in; the pass leaves the graph unchanged.
fn optimize_topology(_devices: &mut [Device], _links: &mut Vec<Link>) {
    debug!("optimization pass requested; no optimizer is configured");
}

/// Verify every link endpoint resolves to a device name
fn check_link_integrity(devices: &[Device], links: &[Link]) -> Result<(), GenerateError> {
    let names: std::collections::HashSet<&str> = devices.iter().map(|d| d.name()).collect();
    for link in links {
        for endpoint in [&link.source, &link.target] {
            if !names.contains(endpoint.as_str()) {
                return Err(GenerateError::StructuralInconsistency(endpoint.clone()));
            }
        }
    }
    Ok(())
}
