use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};

use topogen::analytics::NetworkAnalytics;
use topogen::audit::{AuditType, ComplianceStandard, SecurityAuditor};
use topogen::cloud::{CloudNetworkBuilder, CloudProvider};
use topogen::config::{GenerationConfig, NetworkType, SecurityLevel};
use topogen::config_loader::{self, CliOverrides};
use topogen::export::ConfigExporter;
use topogen::{generator, layout};

/// Synthetic network topology generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the generation configuration YAML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for the topology and report artifacts
    #[arg(short, long, default_value = "topology_output")]
    output: PathBuf,

    /// Network archetype override
    #[arg(long, value_enum)]
    network_type: Option<NetworkType>,

    /// Router count override
    #[arg(long)]
    routers: Option<u32>,

    /// Switch count override
    #[arg(long)]
    switches: Option<u32>,

    /// Host count override
    #[arg(long)]
    hosts: Option<u32>,

    /// Security level override
    #[arg(long, value_enum)]
    security_level: Option<SecurityLevel>,

    /// Redundant access uplinks override
    #[arg(long)]
    redundancy: Option<bool>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Run a security audit and write audit_report.json
    #[arg(long)]
    audit: bool,

    /// Run performance analytics and write analytics_report.json
    #[arg(long)]
    analytics: bool,

    /// Design a hybrid cloud integration and write hybrid_config.json
    #[arg(long, value_enum)]
    cloud_provider: Option<CloudProvider>,

    /// VPN bandwidth for the hybrid design, in Mbps
    #[arg(long, default_value_t = 1000)]
    cloud_bandwidth: u32,

    /// Write per-device configuration text and the export bundle
    #[arg(long)]
    export_configs: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting topogen");
    info!("Output directory: {:?}", args.output);

    // Load configuration, or start from defaults when no file is given
    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => GenerationConfig::default(),
    };

    // Apply CLI overrides and re-validate
    let overrides = CliOverrides {
        network_type: args.network_type,
        routers: args.routers,
        switches: args.switches,
        hosts: args.hosts,
        security_level: args.security_level,
        redundancy: args.redundancy,
        seed: args.seed,
    };
    config_loader::apply_overrides(&mut config, &overrides)?;

    // Clean up previous output
    if args.output.exists() && args.output != Path::new(".") {
        fs::remove_dir_all(&args.output)
            .wrap_err_with(|| format!("Failed to remove output directory '{}'", args.output.display()))?;
    }
    fs::create_dir_all(&args.output)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", args.output.display()))?;

    // Generate the topology record
    let record = generator::generate(&config)?;
    info!(
        "Generated {} topology: {} devices, {} links, {} segments",
        record.network_type.as_str(),
        record.total_devices,
        record.total_links,
        record.segments
    );

    let topology_path = args.output.join("topology.json");
    fs::write(&topology_path, record.to_json()?)
        .wrap_err_with(|| format!("Failed to write '{}'", topology_path.display()))?;
    info!("Wrote topology record: {:?}", topology_path);

    // Compute and persist the rendering layout
    let positions = layout::layout(&record);
    let layout_path = args.output.join("layout.json");
    fs::write(&layout_path, serde_json::to_string_pretty(&positions)?)
        .wrap_err_with(|| format!("Failed to write '{}'", layout_path.display()))?;
    info!("Wrote layout positions: {:?}", layout_path);

    // Collaborator modules share the configured seed so a fixed seed makes
    // the whole artifact set reproducible
    let report_rng = || match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if args.audit {
        let mut auditor = SecurityAuditor::new(&record, report_rng());
        let report = auditor.run_audit(
            &[AuditType::VulnerabilityScan, AuditType::ConfigurationAudit],
            &[ComplianceStandard::Iso27001],
        );
        let audit_path = args.output.join("audit_report.json");
        fs::write(&audit_path, serde_json::to_string_pretty(&report)?)
            .wrap_err_with(|| format!("Failed to write '{}'", audit_path.display()))?;
        info!(
            "Security audit complete: score {}/100, {} findings",
            report.security_score,
            report.vulnerabilities.len()
        );
    }

    if args.analytics {
        let mut analytics = NetworkAnalytics::new(&record, report_rng());
        let report = analytics.analyze();
        let analytics_path = args.output.join("analytics_report.json");
        fs::write(&analytics_path, serde_json::to_string_pretty(&report)?)
            .wrap_err_with(|| format!("Failed to write '{}'", analytics_path.display()))?;
        info!("Analytics complete: {:?}", analytics_path);
    }

    if let Some(provider) = args.cloud_provider {
        let mut builder = CloudNetworkBuilder::new(config.seed);
        let hybrid =
            builder.hybrid_topology(&record, provider, "site-to-site vpn", "AES-256", args.cloud_bandwidth);
        let hybrid_path = args.output.join("hybrid_config.json");
        fs::write(&hybrid_path, serde_json::to_string_pretty(&hybrid)?)
            .wrap_err_with(|| format!("Failed to write '{}'", hybrid_path.display()))?;
        info!(
            "Hybrid {} design complete: estimated ${:.2}/month",
            provider.as_str(),
            hybrid.cost_estimate.total_monthly
        );
    }

    if args.export_configs {
        let exporter = ConfigExporter::new(&record);

        let configs_dir = args.output.join("device_configs");
        fs::create_dir_all(&configs_dir)
            .wrap_err_with(|| format!("Failed to create '{}'", configs_dir.display()))?;
        for (name, config_text) in exporter.device_configs() {
            let config_path = configs_dir.join(format!("{}.cfg", name));
            fs::write(&config_path, config_text)
                .wrap_err_with(|| format!("Failed to write '{}'", config_path.display()))?;
        }

        let bundle_path = args.output.join("export_bundle.json");
        exporter.write_bundle(&bundle_path)?;
        info!("Wrote export bundle: {:?}", bundle_path);
    }

    info!("Topology generation completed successfully");
    Ok(())
}
