//! Configuration validation utilities
//!
//! The loader rejects documents that break hard invariants. This module
//! reviews a document that already loaded and reports settings that are
//! legal but likely to surprise whoever runs against them.

use crate::schema::{CompilerSpec, ConfigDocument, NetworkProfile};
use semver::VersionReq;

/// Gas ceiling above which a profile is unlikely to fit in a block
pub const BLOCK_GAS_LIMIT_HINT: u64 = 30_000_000;

/// Profile name fragments that suggest a throwaway local chain
const LOCAL_PROFILE_HINTS: [&str; 5] = ["dev", "local", "test", "ganache", "coverage"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate complete configuration
    pub fn validate(document: &ConfigDocument) -> ValidationReport {
        let mut report = ValidationReport::new();

        Self::validate_networks(document, &mut report);
        Self::validate_compilers(document, &mut report);

        report
    }

    fn validate_networks(document: &ConfigDocument, report: &mut ValidationReport) {
        if document.networks.is_empty() {
            report.add_error("networks", "At least one network profile must be configured");
            return;
        }

        for (name, profile) in &document.networks {
            Self::validate_network(name, profile, report);
        }
    }

    fn validate_network(name: &str, profile: &NetworkProfile, report: &mut ValidationReport) {
        let field = |key: &str| format!("networks.{}.{}", name, key);

        if profile.network_id.is_wildcard() {
            if !profile.is_local() {
                report.add_warning(
                    &field("network_id"),
                    &format!(
                        "Profile {} accepts any chain but points at remote host {}",
                        name, profile.host
                    ),
                );
            }

            let lowered = name.to_ascii_lowercase();
            if !LOCAL_PROFILE_HINTS.iter().any(|hint| lowered.contains(hint)) {
                report.add_warning(
                    &field("network_id"),
                    &format!("Profile {} does not look local, consider pinning its chain id", name),
                );
            }
        }

        if profile.gas > BLOCK_GAS_LIMIT_HINT {
            report.add_warning(
                &field("gas"),
                &format!(
                    "Gas ceiling {} for {} exceeds typical block gas limit ({})",
                    profile.gas, name, BLOCK_GAS_LIMIT_HINT
                ),
            );
        }

        if profile.port < 1024 {
            report.add_warning(
                &field("port"),
                &format!("Port {} for {} is a privileged port", profile.port, name),
            );
        }
    }

    fn validate_compilers(document: &ConfigDocument, report: &mut ValidationReport) {
        if document.compilers.is_empty() {
            report.add_warning("compilers", "No compiler version pinned, the toolchain default will be used");
            return;
        }

        for (toolchain, spec) in &document.compilers {
            Self::validate_compiler(toolchain, spec, report);
        }
    }

    fn validate_compiler(toolchain: &str, spec: &CompilerSpec, report: &mut ValidationReport) {
        let field = format!("compilers.{}.version", toolchain);

        let req = match spec.requirement() {
            Ok(req) => req,
            Err(e) => {
                report.add_error(&field, &e.to_string());
                return;
            }
        };

        if req == VersionReq::STAR {
            report.add_warning(&field, &format!("{} accepts any version", toolchain));
        }

        if req.comparators.iter().any(|c| !c.pre.is_empty()) {
            report.add_warning(
                &field,
                &format!("{} range admits pre-release versions", toolchain),
            );
        }
    }
}

/// Validation report containing errors and warnings
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

/// A validation issue (error or warning)
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn summary(&self) -> String {
        format!("Validation: {} errors, {} warnings", self.errors.len(), self.warnings.len())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::NetworkId;

    fn fields(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.field.as_str()).collect()
    }

    #[test]
    fn test_default_document_is_clean() {
        let report = ConfigValidator::validate(&ConfigDocument::default());
        assert!(report.is_valid());
        assert!(!report.has_warnings(), "{:?}", report.warnings);
        assert_eq!(report.summary(), "Validation: 0 errors, 0 warnings");
    }

    #[test]
    fn test_empty_document() {
        let doc = ConfigDocument {
            networks: Default::default(),
            compilers: Default::default(),
        };
        let report = ConfigValidator::validate(&doc);
        assert!(report.has_errors());
        assert_eq!(fields(&report.errors), vec!["networks"]);
        assert_eq!(fields(&report.warnings), vec!["compilers"]);
    }

    #[test]
    fn test_remote_wildcard_profile() {
        let mut doc = ConfigDocument::default();
        doc.networks.insert(
            "staging".to_string(),
            NetworkProfile {
                host: "rpc.staging.example.org".to_string(),
                port: 443,
                network_id: NetworkId::Any,
                gas: 50_000_000,
            },
        );

        let report = ConfigValidator::validate(&doc);
        assert!(report.is_valid());
        let warned = fields(&report.warnings);
        assert_eq!(warned.iter().filter(|f| **f == "networks.staging.network_id").count(), 2);
        assert!(warned.contains(&"networks.staging.gas"));
        assert!(warned.contains(&"networks.staging.port"));
    }

    #[test]
    fn test_pinned_remote_profile_is_quiet() {
        let mut doc = ConfigDocument::default();
        doc.networks.insert(
            "sepolia".to_string(),
            NetworkProfile {
                host: "10.1.2.3".to_string(),
                port: 8545,
                network_id: NetworkId::Id(11155111),
                gas: 6_700_000,
            },
        );

        let report = ConfigValidator::validate(&doc);
        assert!(!report.has_warnings(), "{:?}", report.warnings);
    }

    #[test]
    fn test_compiler_warnings() {
        let mut doc = ConfigDocument::default();
        doc.compilers.insert("any".to_string(), CompilerSpec::new("*"));
        doc.compilers
            .insert("nightly".to_string(), CompilerSpec::new(">=0.9.0-nightly.1"));
        doc.compilers.insert("broken".to_string(), CompilerSpec::new("??"));

        let report = ConfigValidator::validate(&doc);
        assert_eq!(fields(&report.errors), vec!["compilers.broken.version"]);
        let warned = fields(&report.warnings);
        assert!(warned.contains(&"compilers.any.version"));
        assert!(warned.contains(&"compilers.nightly.version"));
    }
}
