//! Security auditor.
//!
//! Runs synthetic security audits over a topology record: vulnerability
//! scanning, configuration auditing, penetration-test findings, CVE checks,
//! and per-standard compliance results, rolled up into a 0-100 score. All
//! randomness comes from the injected random source so reports are
//! reproducible under a fixed seed.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::device::DeviceKind;
use crate::topology::TopologyRecord;

/// Audit passes that can be selected per run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditType {
    VulnerabilityScan,
    ConfigurationAudit,
    PenetrationTest,
    CveDatabaseCheck,
}

/// Compliance standards that can be checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStandard {
    PciDss,
    Hipaa,
    Iso27001,
    Nist,
    Soc2,
}

impl ComplianceStandard {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStandard::PciDss => "PCI-DSS",
            ComplianceStandard::Hipaa => "HIPAA",
            ComplianceStandard::Iso27001 => "ISO 27001",
            ComplianceStandard::Nist => "NIST",
            ComplianceStandard::Soc2 => "SOC 2",
        }
    }

    /// (total controls, minimum passed in a synthetic run, requirement list)
    fn controls(&self) -> (u32, u32, &'static [&'static str]) {
        match self {
            ComplianceStandard::PciDss => (12, 10, PCI_DSS_REQUIREMENTS),
            ComplianceStandard::Hipaa => (10, 8, HIPAA_REQUIREMENTS),
            ComplianceStandard::Iso27001 => (14, 12, ISO_27001_REQUIREMENTS),
            ComplianceStandard::Nist => (5, 4, NIST_REQUIREMENTS),
            ComplianceStandard::Soc2 => (5, 4, SOC2_REQUIREMENTS),
        }
    }
}

const PCI_DSS_REQUIREMENTS: &[&str] = &[
    "Install and maintain firewall configuration",
    "Do not use vendor-supplied defaults",
    "Protect stored cardholder data",
    "Encrypt transmission of cardholder data",
    "Use and regularly update anti-virus software",
    "Develop and maintain secure systems",
    "Restrict access to cardholder data",
    "Assign unique ID to each person",
    "Restrict physical access to cardholder data",
    "Track and monitor all access",
    "Regularly test security systems",
    "Maintain information security policy",
];

const HIPAA_REQUIREMENTS: &[&str] = &[
    "Access control",
    "Audit controls",
    "Integrity controls",
    "Transmission security",
    "Authentication",
    "Encryption",
    "Backup and recovery",
    "Emergency access",
    "Automatic logoff",
    "Encryption and decryption",
];

const ISO_27001_REQUIREMENTS: &[&str] = &[
    "Information security policies",
    "Organization of information security",
    "Human resource security",
    "Asset management",
    "Access control",
    "Cryptography",
    "Physical and environmental security",
    "Operations security",
    "Communications security",
    "System acquisition and development",
    "Supplier relationships",
    "Incident management",
    "Business continuity",
    "Compliance",
];

const NIST_REQUIREMENTS: &[&str] = &["Identify", "Protect", "Detect", "Respond", "Recover"];

const SOC2_REQUIREMENTS: &[&str] = &[
    "Security",
    "Availability",
    "Processing integrity",
    "Confidentiality",
    "Privacy",
];

/// Finding severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Points deducted from the base security score per finding
    fn score_deduction(&self) -> i32 {
        match self {
            Severity::Critical => 10,
            Severity::High => 5,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

/// One security finding against a device (or the whole network)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub device: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub finding_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cve: Option<String>,
    pub remediation: String,
}

/// Result of checking one compliance standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceResult {
    pub standard: String,
    pub total_controls: u32,
    pub passed: u32,
    pub failed: u32,
    pub compliance_percentage: f64,
    pub status: String,
    pub requirements: Vec<String>,
}

/// Full audit report returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub timestamp: String,
    pub audit_types: Vec<AuditType>,
    pub compliance_standards: Vec<ComplianceStandard>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub compliance: BTreeMap<String, ComplianceResult>,
    pub recommendations: Vec<String>,
    pub security_score: u32,
}

struct PentestScenario {
    severity: Severity,
    finding_type: &'static str,
    description: &'static str,
    remediation: &'static str,
}

const PENTEST_SCENARIOS: [PentestScenario; 3] = [
    PentestScenario {
        severity: Severity::High,
        finding_type: "Unauthorized Access",
        description: "Able to access network resources without proper authentication",
        remediation: "Implement 802.1X port-based authentication",
    },
    PentestScenario {
        severity: Severity::Medium,
        finding_type: "VLAN Hopping",
        description: "VLAN hopping possible due to misconfigured trunk ports",
        remediation: "Disable DTP and configure trunk ports explicitly",
    },
    PentestScenario {
        severity: Severity::Critical,
        finding_type: "Man-in-the-Middle",
        description: "ARP spoofing attack successful on network segment",
        remediation: "Enable Dynamic ARP Inspection (DAI) and DHCP snooping",
    },
];

struct KnownCve {
    cve: &'static str,
    severity: Severity,
    description: &'static str,
    affected_models: &'static [&'static str],
}

const KNOWN_CVES: [KnownCve; 2] = [
    KnownCve {
        cve: "CVE-2024-1111",
        severity: Severity::Critical,
        description: "Remote code execution vulnerability in router firmware",
        affected_models: &["Cisco ISR 4451", "Cisco ISR 4331"],
    },
    KnownCve {
        cve: "CVE-2024-2222",
        severity: Severity::High,
        description: "Privilege escalation vulnerability in switch OS",
        affected_models: &["Cisco Catalyst 9300", "Cisco Catalyst 2960"],
    },
];

const GENERAL_RECOMMENDATIONS: [&str; 8] = [
    "Implement network segmentation with VLANs",
    "Enable encryption for all management protocols",
    "Deploy intrusion detection/prevention systems",
    "Implement regular security patch management",
    "Enable comprehensive logging and monitoring",
    "Conduct regular security awareness training",
    "Implement multi-factor authentication",
    "Regular backup and disaster recovery testing",
];

/// Network security auditing over one topology record
pub struct SecurityAuditor<'a> {
    record: &'a TopologyRecord,
    rng: StdRng,
}

impl<'a> SecurityAuditor<'a> {
    pub fn new(record: &'a TopologyRecord, rng: StdRng) -> Self {
        Self { record, rng }
    }

    /// Run the selected audit passes and compliance checks
    pub fn run_audit(
        &mut self,
        audit_types: &[AuditType],
        compliance_standards: &[ComplianceStandard],
    ) -> AuditReport {
        let mut vulnerabilities = Vec::new();

        if audit_types.contains(&AuditType::VulnerabilityScan) {
            vulnerabilities.extend(self.vulnerability_scan());
        }
        if audit_types.contains(&AuditType::ConfigurationAudit) {
            vulnerabilities.extend(self.configuration_audit());
        }
        if audit_types.contains(&AuditType::PenetrationTest) {
            vulnerabilities.extend(self.penetration_test());
        }
        if audit_types.contains(&AuditType::CveDatabaseCheck) {
            vulnerabilities.extend(self.cve_database_check());
        }

        let mut compliance = BTreeMap::new();
        for standard in compliance_standards {
            compliance.insert(standard.as_str().to_string(), self.check_compliance(*standard));
        }

        let recommendations = recommendations_for(&vulnerabilities);
        let security_score = security_score(&vulnerabilities, &compliance);

        AuditReport {
            timestamp: chrono::Utc::now().to_rfc3339(),
            audit_types: audit_types.to_vec(),
            compliance_standards: compliance_standards.to_vec(),
            vulnerabilities,
            compliance,
            recommendations,
            security_score,
        }
    }

    fn vulnerability_scan(&mut self) -> Vec<Vulnerability> {
        let mut findings = Vec::new();

        for device in &self.record.devices {
            match device.kind() {
                DeviceKind::Router => {
                    if self.rng.gen_bool(0.3) {
                        findings.push(Vulnerability {
                            device: device.name().to_string(),
                            severity: Severity::High,
                            finding_type: "Weak Authentication".to_string(),
                            description: "Default credentials detected on management interface"
                                .to_string(),
                            cve: Some("CVE-2024-1234".to_string()),
                            remediation:
                                "Change default credentials and implement strong password policy"
                                    .to_string(),
                        });
                    }
                }
                DeviceKind::Switch => {
                    if self.rng.gen_bool(0.2) {
                        findings.push(Vulnerability {
                            device: device.name().to_string(),
                            severity: Severity::Medium,
                            finding_type: "Unencrypted Management".to_string(),
                            description: "Management interface using unencrypted protocol"
                                .to_string(),
                            cve: None,
                            remediation: "Enable SSH and disable Telnet for management access"
                                .to_string(),
                        });
                    }
                }
                DeviceKind::Firewall => {
                    if self.rng.gen_bool(0.15) {
                        findings.push(Vulnerability {
                            device: device.name().to_string(),
                            severity: Severity::Critical,
                            finding_type: "Outdated Firmware".to_string(),
                            description:
                                "Firewall running outdated firmware with known vulnerabilities"
                                    .to_string(),
                            cve: Some("CVE-2024-5678".to_string()),
                            remediation: "Update to latest firmware version immediately".to_string(),
                        });
                    }
                }
                _ => {}
            }
        }

        findings
    }

    fn configuration_audit(&mut self) -> Vec<Vulnerability> {
        let mut issues = Vec::new();

        for device in &self.record.devices {
            if !matches!(device.kind(), DeviceKind::Router | DeviceKind::Switch) {
                continue;
            }

            if self.rng.gen_bool(0.4) {
                issues.push(Vulnerability {
                    device: device.name().to_string(),
                    severity: Severity::Low,
                    finding_type: "Weak SNMP Configuration".to_string(),
                    description: "SNMPv2 with default community string detected".to_string(),
                    cve: None,
                    remediation: "Upgrade to SNMPv3 with authentication and encryption".to_string(),
                });
            }

            if self.rng.gen_bool(0.3) {
                issues.push(Vulnerability {
                    device: device.name().to_string(),
                    severity: Severity::Medium,
                    finding_type: "Insufficient Logging".to_string(),
                    description: "Logging not configured or insufficient log levels".to_string(),
                    cve: None,
                    remediation: "Enable comprehensive logging and configure syslog server"
                        .to_string(),
                });
            }
        }

        issues
    }

    /// Pick a random non-empty subset of the pentest scenarios, network-wide
    fn penetration_test(&mut self) -> Vec<Vulnerability> {
        let k = self.rng.gen_range(1..=PENTEST_SCENARIOS.len());
        let picks = rand::seq::index::sample(&mut self.rng, PENTEST_SCENARIOS.len(), k);

        picks
            .iter()
            .map(|idx| {
                let scenario = &PENTEST_SCENARIOS[idx];
                Vulnerability {
                    device: "Network-Wide".to_string(),
                    severity: scenario.severity,
                    finding_type: scenario.finding_type.to_string(),
                    description: scenario.description.to_string(),
                    cve: None,
                    remediation: scenario.remediation.to_string(),
                }
            })
            .collect()
    }

    fn cve_database_check(&mut self) -> Vec<Vulnerability> {
        let mut findings = Vec::new();

        for device in &self.record.devices {
            let Some(model) = device.model() else {
                continue;
            };
            for cve in &KNOWN_CVES {
                if cve.affected_models.contains(&model) && self.rng.gen_bool(0.2) {
                    findings.push(Vulnerability {
                        device: device.name().to_string(),
                        severity: cve.severity,
                        finding_type: "Known CVE".to_string(),
                        description: cve.description.to_string(),
                        cve: Some(cve.cve.to_string()),
                        remediation: format!("Apply security patch for {}", cve.cve),
                    });
                }
            }
        }

        findings
    }

    fn check_compliance(&mut self, standard: ComplianceStandard) -> ComplianceResult {
        let (total, min_passed, requirements) = standard.controls();
        let passed = self.rng.gen_range(min_passed..=total);
        let percentage = round2(passed as f64 / total as f64 * 100.0);

        ComplianceResult {
            standard: standard.as_str().to_string(),
            total_controls: total,
            passed,
            failed: total - passed,
            compliance_percentage: percentage,
            status: if percentage >= 80.0 { "Pass" } else { "Fail" }.to_string(),
            requirements: requirements.iter().map(|r| r.to_string()).collect(),
        }
    }
}

fn recommendations_for(vulnerabilities: &[Vulnerability]) -> Vec<String> {
    let count = |severity: Severity| {
        vulnerabilities
            .iter()
            .filter(|v| v.severity == severity)
            .count()
    };

    let mut recommendations = Vec::new();
    let critical = count(Severity::Critical);
    let high = count(Severity::High);
    let medium = count(Severity::Medium);

    if critical > 0 {
        recommendations.push(format!(
            "URGENT: Address {} critical vulnerabilities immediately",
            critical
        ));
    }
    if high > 0 {
        recommendations.push(format!(
            "High Priority: Remediate {} high-severity issues within 7 days",
            high
        ));
    }
    if medium > 0 {
        recommendations.push(format!(
            "Medium Priority: Fix {} medium-severity issues within 30 days",
            medium
        ));
    }

    recommendations.extend(GENERAL_RECOMMENDATIONS.iter().map(|r| r.to_string()));
    recommendations
}

/// 100 minus per-finding deductions, averaged with the mean compliance
/// percentage when any standards were checked, clamped to 0..=100
fn security_score(
    vulnerabilities: &[Vulnerability],
    compliance: &BTreeMap<String, ComplianceResult>,
) -> u32 {
    let mut score = 100.0
        - vulnerabilities
            .iter()
            .map(|v| v.severity.score_deduction())
            .sum::<i32>() as f64;

    if !compliance.is_empty() {
        let avg = compliance
            .values()
            .map(|c| c.compliance_percentage)
            .sum::<f64>()
            / compliance.len() as f64;
        score = (score + avg) / 2.0;
    }

    score.clamp(0.0, 100.0) as u32
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;
    use crate::generator::generate;
    use rand::SeedableRng;

    fn test_record() -> TopologyRecord {
        generate(&GenerationConfig {
            routers: 3,
            switches: 4,
            hosts: 10,
            seed: Some(5),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_audit_is_seed_deterministic() {
        let record = test_record();
        let types = [AuditType::VulnerabilityScan, AuditType::ConfigurationAudit];
        let standards = [ComplianceStandard::Iso27001];

        let mut a = SecurityAuditor::new(&record, StdRng::seed_from_u64(9));
        let mut b = SecurityAuditor::new(&record, StdRng::seed_from_u64(9));
        let report_a = a.run_audit(&types, &standards);
        let report_b = b.run_audit(&types, &standards);

        assert_eq!(report_a.vulnerabilities, report_b.vulnerabilities);
        assert_eq!(report_a.compliance, report_b.compliance);
        assert_eq!(report_a.security_score, report_b.security_score);
    }

    #[test]
    fn test_pentest_produces_network_wide_findings() {
        let record = test_record();
        let mut auditor = SecurityAuditor::new(&record, StdRng::seed_from_u64(1));
        let report = auditor.run_audit(&[AuditType::PenetrationTest], &[]);

        assert!(!report.vulnerabilities.is_empty());
        assert!(report.vulnerabilities.len() <= PENTEST_SCENARIOS.len());
        for finding in &report.vulnerabilities {
            assert_eq!(finding.device, "Network-Wide");
        }
    }

    #[test]
    fn test_compliance_bounds() {
        let record = test_record();
        let mut auditor = SecurityAuditor::new(&record, StdRng::seed_from_u64(2));
        let standards = [
            ComplianceStandard::PciDss,
            ComplianceStandard::Hipaa,
            ComplianceStandard::Iso27001,
            ComplianceStandard::Nist,
            ComplianceStandard::Soc2,
        ];
        let report = auditor.run_audit(&[], &standards);

        assert_eq!(report.compliance.len(), 5);
        for result in report.compliance.values() {
            assert_eq!(result.passed + result.failed, result.total_controls);
            assert!(result.compliance_percentage >= 0.0);
            assert!(result.compliance_percentage <= 100.0);
            assert_eq!(result.status == "Pass", result.compliance_percentage >= 80.0);
        }
    }

    #[test]
    fn test_security_score_is_bounded() {
        let record = test_record();
        for seed in 0..20 {
            let mut auditor = SecurityAuditor::new(&record, StdRng::seed_from_u64(seed));
            let report = auditor.run_audit(
                &[
                    AuditType::VulnerabilityScan,
                    AuditType::ConfigurationAudit,
                    AuditType::PenetrationTest,
                    AuditType::CveDatabaseCheck,
                ],
                &[ComplianceStandard::Iso27001],
            );
            assert!(report.security_score <= 100);
        }
    }

    #[test]
    fn test_recommendations_reflect_severity_counts() {
        let vulnerabilities = vec![Vulnerability {
            device: "Router-core-01".to_string(),
            severity: Severity::Critical,
            finding_type: "Outdated Firmware".to_string(),
            description: "test".to_string(),
            cve: None,
            remediation: "patch".to_string(),
        }];

        let recommendations = recommendations_for(&vulnerabilities);
        assert!(recommendations[0].starts_with("URGENT: Address 1 critical"));
        // The general recommendations always follow
        assert!(recommendations.len() > GENERAL_RECOMMENDATIONS.len());
    }

    #[test]
    fn test_report_serializes() {
        let record = test_record();
        let mut auditor = SecurityAuditor::new(&record, StdRng::seed_from_u64(3));
        let report = auditor.run_audit(
            &[AuditType::VulnerabilityScan],
            &[ComplianceStandard::Nist],
        );

        let json = serde_json::to_string(&report).unwrap();
        let back: AuditReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
