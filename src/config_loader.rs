use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

use crate::config::{GenerationConfig, NetworkType, SecurityLevel};

/// Load and parse a generation configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<GenerationConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration file '{}'", config_path.display()))?;

    let config: GenerationConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration file '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub network_type: Option<NetworkType>,
    pub routers: Option<u32>,
    pub switches: Option<u32>,
    pub hosts: Option<u32>,
    pub security_level: Option<SecurityLevel>,
    pub redundancy: Option<bool>,
    pub seed: Option<u64>,
}

/// Apply CLI overrides to a configuration and re-validate the result
pub fn apply_overrides(config: &mut GenerationConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(network_type) = overrides.network_type {
        info!("Network type override: {}", network_type.as_str());
        config.network_type = network_type;
    }
    if let Some(routers) = overrides.routers {
        info!("Router count override: {}", routers);
        config.routers = routers;
    }
    if let Some(switches) = overrides.switches {
        info!("Switch count override: {}", switches);
        config.switches = switches;
    }
    if let Some(hosts) = overrides.hosts {
        info!("Host count override: {}", hosts);
        config.hosts = hosts;
    }
    if let Some(security_level) = overrides.security_level {
        info!("Security level override: {}", security_level.as_str());
        config.security_level = security_level;
    }
    if let Some(redundancy) = overrides.redundancy {
        info!("Redundancy override: {}", redundancy);
        config.redundancy = redundancy;
    }
    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    Ok(())
}
