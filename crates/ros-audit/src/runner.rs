//! One-call entry points over the built-in catalog.

use ros_audit_core::{AuditError, AuditReport, Auditor, Config, ConfigDocument};
use ros_audit_rules::catalog_from_config;
use tracing::debug;

/// Builds an auditor running the built-in catalog under `config`.
///
/// # Errors
///
/// Returns [`AuditError::Catalog`] if the catalog cannot be assembled.
pub fn auditor(config: Config) -> Result<Auditor, AuditError> {
    let catalog = catalog_from_config(&config)?;
    debug!("Built-in catalog: {} rules", catalog.len());
    Auditor::builder().catalog(catalog).config(config).build()
}

/// Audits export text with the built-in catalog and default configuration.
///
/// # Errors
///
/// Returns [`AuditError::Catalog`] if the catalog cannot be assembled.
pub fn audit(text: &str) -> Result<AuditReport, AuditError> {
    audit_with(text, Config::default())
}

/// Audits export text with the built-in catalog under `config`.
///
/// # Errors
///
/// Returns [`AuditError::Catalog`] if the catalog cannot be assembled.
pub fn audit_with(text: &str, config: Config) -> Result<AuditReport, AuditError> {
    let auditor = auditor(config)?;
    Ok(auditor.audit(&ConfigDocument::new(text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros_audit_core::FindingKind;

    #[test]
    fn empty_export_reports_only_unconditional_rules() {
        let report = audit("").unwrap();
        let rules: Vec<&str> = report.sections().iter().map(|s| s.label).collect();
        assert_eq!(
            rules,
            vec![
                "UPnP Settings",
                "SOCKS Settings",
                "ROMON Settings",
                "RMI Interfaces Status"
            ]
        );
        assert!(!report.has_warnings());
    }

    #[test]
    fn disabled_rule_is_not_evaluated() {
        let config = Config::parse("[rules.service-reachability]\nenabled = false\n").unwrap();
        let report = audit_with("", config).unwrap();
        assert_eq!(report.rules_evaluated, 18);
        assert!(report
            .findings
            .iter()
            .all(|f| f.kind == FindingKind::NotConfigured));
    }
}
