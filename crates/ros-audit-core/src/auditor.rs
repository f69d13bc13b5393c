//! Rule engine orchestrating catalog evaluation.

use crate::catalog::{CatalogError, RuleCatalog};
use crate::config::Config;
use crate::document::{ConfigDocument, DocumentError};
use crate::rule::{Rule, RuleBox};
use crate::types::{AuditReport, Finding, FindingKind};

use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur before an audit starts.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The configuration export could not be loaded.
    #[error(transparent)]
    Input(#[from] DocumentError),

    /// The rule catalog is inconsistent.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Builder for configuring an [`Auditor`].
#[derive(Default)]
pub struct AuditorBuilder {
    catalog: RuleCatalog,
    extra: Vec<RuleBox>,
    config: Option<Config>,
}

impl AuditorBuilder {
    /// Creates a new builder with an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the catalog; rules added with [`Self::rule`] run after it.
    #[must_use]
    pub fn catalog(mut self, catalog: RuleCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.extra.push(Box::new(rule));
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the auditor.
    ///
    /// # Errors
    ///
    /// Returns an error if an appended rule reuses a catalog id.
    pub fn build(self) -> Result<Auditor, AuditError> {
        let mut catalog = self.catalog;
        for rule in self.extra {
            catalog.push_box(rule)?;
        }

        Ok(Auditor {
            catalog,
            config: self.config.unwrap_or_default(),
        })
    }
}

/// Evaluates a rule catalog against configuration exports.
///
/// Use [`Auditor::builder()`] to construct an instance.
#[derive(Debug)]
pub struct Auditor {
    catalog: RuleCatalog,
    config: Config,
}

impl Auditor {
    /// Creates a new builder for configuring an auditor.
    #[must_use]
    pub fn builder() -> AuditorBuilder {
        AuditorBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.catalog.len()
    }

    /// Returns the catalog being evaluated.
    #[must_use]
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Evaluates every enabled rule in catalog order.
    ///
    /// Never fails: a rule that matches nothing simply contributes no
    /// findings, or its explicit not-configured finding.
    #[must_use]
    pub fn audit(&self, doc: &ConfigDocument) -> AuditReport {
        info!(
            "Starting audit: {} rules, {} sections",
            self.catalog.len(),
            doc.sections().len()
        );

        let mut report = AuditReport::new();

        for rule in self.catalog.iter() {
            if !self.config.is_rule_enabled(rule.id()) {
                debug!("Skipping disabled rule: {}", rule.id());
                continue;
            }

            let findings = rule.evaluate(doc);
            debug!("{} produced {} finding(s)", rule.id(), findings.len());

            let findings = self.apply_severity_override(rule.id(), findings);
            report.findings.extend(findings);
            report.rules_evaluated += 1;
        }

        info!(
            "Audit complete: {} findings from {} rules",
            report.findings.len(),
            report.rules_evaluated
        );

        report
    }

    /// Parses and audits raw export text.
    #[must_use]
    pub fn audit_str(&self, text: &str) -> AuditReport {
        self.audit(&ConfigDocument::new(text))
    }

    /// Reads and audits an export file.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Input`] if the file cannot be read; no rule is
    /// evaluated in that case.
    pub fn audit_path(&self, path: &Path) -> Result<AuditReport, AuditError> {
        debug!("Reading export: {}", path.display());
        let doc = ConfigDocument::from_path(path)?;
        Ok(self.audit(&doc))
    }

    /// Applies severity overrides from configuration to issue findings.
    fn apply_severity_override(&self, rule_id: &str, mut findings: Vec<Finding>) -> Vec<Finding> {
        if let Some(severity) = self.config.rule_severity(rule_id) {
            debug!("Overriding severity of {} to {}", rule_id, severity);
            for f in findings.iter_mut().filter(|f| f.kind == FindingKind::Issue) {
                f.severity = severity;
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Pattern, RuleKind, SettingCheck, SettingRule, Severity, ToggleRule};

    fn dns_rule() -> SettingRule {
        SettingRule::new("T001", "dns", "DNS Settings").check(
            SettingCheck::new(Pattern::section("/ip dns").with("allow-remote-requests", "yes"))
                .warn("Router is configured as a DNS server"),
        )
    }

    fn upnp_rule() -> ToggleRule {
        ToggleRule::new("T002", "upnp", "UPnP Settings", "/ip upnp").feature("UPnP")
    }

    const EXPORT: &str = "/ip dns\nset allow-remote-requests=yes\n/ip upnp\nset enabled=no\n";

    #[test]
    fn evaluates_in_catalog_order() {
        let auditor = Auditor::builder()
            .rule(upnp_rule())
            .rule(dns_rule())
            .build()
            .unwrap();
        let report = auditor.audit_str(EXPORT);
        let rules: Vec<&str> = report.findings.iter().map(|f| f.rule.as_str()).collect();
        assert_eq!(rules, vec!["upnp", "dns"]);
        assert_eq!(report.rules_evaluated, 2);
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let config = Config::parse("[rules.dns]\nenabled = false\n").unwrap();
        let auditor = Auditor::builder()
            .rule(dns_rule())
            .rule(upnp_rule())
            .config(config)
            .build()
            .unwrap();
        let report = auditor.audit_str(EXPORT);
        assert!(report.by_rule("dns").is_empty());
        assert_eq!(report.rules_evaluated, 1);
    }

    #[test]
    fn severity_override_applies_to_issues_only() {
        let toml = "[rules.dns]\nseverity = \"info\"\n[rules.upnp]\nseverity = \"warning\"\n";
        let config = Config::parse(toml).unwrap();
        let auditor = Auditor::builder()
            .rule(dns_rule())
            .rule(upnp_rule())
            .config(config)
            .build()
            .unwrap();
        let report = auditor.audit_str(EXPORT);
        assert_eq!(report.by_rule("dns")[0].severity, Severity::Info);
        assert_eq!(report.by_rule("upnp")[0].severity, Severity::Ok);
    }

    #[test]
    fn audit_is_idempotent() {
        let auditor = Auditor::builder()
            .rule(dns_rule())
            .rule(upnp_rule())
            .build()
            .unwrap();
        let doc = ConfigDocument::new(EXPORT);
        assert_eq!(auditor.audit(&doc), auditor.audit(&doc));
    }

    #[test]
    fn duplicate_rule_fails_build() {
        let result = Auditor::builder().rule(dns_rule()).rule(dns_rule()).build();
        assert!(matches!(result, Err(AuditError::Catalog(_))));
    }

    #[test]
    fn unreadable_input_produces_no_report() {
        let auditor = Auditor::builder().rule(upnp_rule()).build().unwrap();
        let result = auditor.audit_path(Path::new("/nonexistent/export.rsc"));
        assert!(matches!(result, Err(AuditError::Input(_))));
    }

    #[test]
    fn empty_document_still_reports_tri_state() {
        let auditor = Auditor::builder()
            .rule(dns_rule())
            .rule(upnp_rule())
            .build()
            .unwrap();
        let report = auditor.audit_str("");
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].kind, FindingKind::NotConfigured);
        assert_eq!(auditor.catalog().get("upnp").map(Rule::kind), Some(RuleKind::TriState));
    }
}
