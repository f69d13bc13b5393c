//! Presence-check rule builder.
//!
//! A [`SettingRule`] holds one or more independent [`SettingCheck`]s. Each
//! check whose pattern matches contributes one finding; checks that do not
//! match stay silent.
//!
//! # Example
//!
//! ```ignore
//! use ros_audit_core::{Pattern, SettingCheck, SettingRule};
//!
//! let rule = SettingRule::new("RA004", "dns-remote-requests", "DNS Settings")
//!     .describe("Router answers DNS queries from remote hosts")
//!     .check(
//!         SettingCheck::new(Pattern::section("/ip dns").with("allow-remote-requests", "yes"))
//!             .warn("Router is configured as a DNS server")
//!             .impact("DNS Flood"),
//!     );
//! ```

use crate::document::ConfigDocument;
use crate::matcher::{find_first, Pattern};
use crate::rule::{render_template, Rule, RuleKind};
use crate::types::{Finding, Severity};

/// One insecure assignment and the finding it produces.
#[derive(Debug, Clone)]
pub struct SettingCheck {
    pattern: Pattern,
    severity: Severity,
    message: String,
    impact: Option<String>,
    recommendation: Option<String>,
}

impl SettingCheck {
    /// Creates a check for the given pattern.
    #[must_use]
    pub fn new(pattern: Pattern) -> Self {
        Self {
            pattern,
            severity: Severity::Warning,
            message: String::new(),
            impact: None,
            recommendation: None,
        }
    }

    /// Sets the warning message; `{}` is replaced with the matched item.
    #[must_use]
    pub fn warn(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the impact text.
    #[must_use]
    pub fn impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    /// Sets the recommendation text.
    #[must_use]
    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }
}

/// Builder for presence-check rules.
#[derive(Debug, Clone)]
pub struct SettingRule {
    code: &'static str,
    id: &'static str,
    section: &'static str,
    description: &'static str,
    checks: Vec<SettingCheck>,
}

impl SettingRule {
    /// Creates a rule without checks.
    ///
    /// # Arguments
    ///
    /// * `code` - Rule code (e.g., "RA004")
    /// * `id` - Rule id (e.g., "dns-remote-requests")
    /// * `section` - Report section label
    #[must_use]
    pub fn new(code: &'static str, id: &'static str, section: &'static str) -> Self {
        Self {
            code,
            id,
            section,
            description: "",
            checks: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Adds an independent check.
    #[must_use]
    pub fn check(mut self, check: SettingCheck) -> Self {
        self.checks.push(check);
        self
    }
}

impl Rule for SettingRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn code(&self) -> &'static str {
        self.code
    }

    fn section(&self) -> &'static str {
        self.section
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Presence
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
        self.checks
            .iter()
            .filter_map(|check| {
                let found = find_first(doc, &check.pattern)?;
                let target = found.statement().and_then(|s| s.target());
                let message = render_template(&check.message, target.unwrap_or_default());

                let mut finding =
                    Finding::new(self.code, self.id, self.section, check.severity, message)
                        .at_line(found.line());
                if let Some(target) = target {
                    finding = finding.with_entity(target);
                }
                if let Some(impact) = &check.impact {
                    finding = finding.with_impact(impact.clone());
                }
                if let Some(recommendation) = &check.recommendation {
                    finding = finding.with_recommendation(recommendation.clone());
                }
                Some(finding)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snmp_rule() -> SettingRule {
        let community = |name: &str| {
            SettingCheck::new(Pattern::section("/snmp community").with("name", name))
                .warn(format!("SNMP community '{name}' is in use"))
                .impact("Information Gathering")
        };
        SettingRule::new("TEST001", "snmp", "SNMP")
            .check(community("public"))
            .check(community("private"))
    }

    #[test]
    fn silent_when_pattern_absent() {
        let doc = ConfigDocument::new("/snmp community\nset [ find default=yes ] name=n0c\n");
        assert!(snmp_rule().evaluate(&doc).is_empty());
    }

    #[test]
    fn checks_fire_independently() {
        let doc = ConfigDocument::new("/snmp community\nadd name=private\n");
        let findings = snmp_rule().evaluate(&doc);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "SNMP community 'private' is in use");
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn both_checks_fire_in_order() {
        let doc = ConfigDocument::new("/snmp community\nset name=public\nset name=private\n");
        let findings = snmp_rule().evaluate(&doc);
        let messages: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "SNMP community 'public' is in use",
                "SNMP community 'private' is in use"
            ]
        );
        assert!(findings.iter().all(|f| f.severity == Severity::Warning));
    }

    #[test]
    fn template_uses_statement_target() {
        let rule = SettingRule::new("TEST002", "poe", "PoE").check(
            SettingCheck::new(Pattern::section("/interface ethernet").with("poe-out", "forced-on"))
                .warn("PoE is set to forced-on on {}"),
        );
        let doc = ConfigDocument::new(
            "/interface ethernet\nset [ find default-name=ether5 ] poe-out=forced-on\n",
        );
        let findings = rule.evaluate(&doc);
        assert_eq!(findings[0].message, "PoE is set to forced-on on ether5");
        assert_eq!(findings[0].entity.as_deref(), Some("ether5"));
    }
}
