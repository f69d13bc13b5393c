//! Tri-state rule builder.
//!
//! A [`ToggleRule`] watches a single on/off assignment and always reports
//! exactly one finding: the insecure state, the safe state, or the absence
//! of the assignment from the export.

use crate::document::ConfigDocument;
use crate::matcher::{find_first, Pattern};
use crate::rule::{Rule, RuleKind};
use crate::types::{Finding, FindingKind, Severity};

/// Builder for tri-state rules.
#[derive(Debug, Clone)]
pub struct ToggleRule {
    code: &'static str,
    id: &'static str,
    section: &'static str,
    description: &'static str,
    feature: String,
    pattern: Pattern,
    key: String,
    insecure_value: String,
    impact: Option<String>,
    recommendation: Option<String>,
    absent_severity: Severity,
}

impl ToggleRule {
    /// Creates a rule watching `enabled=yes` under `path`.
    ///
    /// # Arguments
    ///
    /// * `code` - Rule code (e.g., "RA006")
    /// * `id` - Rule id (e.g., "upnp")
    /// * `section` - Report section label
    /// * `path` - Section path holding the assignment
    #[must_use]
    pub fn new(code: &'static str, id: &'static str, section: &'static str, path: &str) -> Self {
        Self {
            code,
            id,
            section,
            description: "",
            feature: id.to_string(),
            pattern: Pattern::section(path),
            key: "enabled".to_string(),
            insecure_value: "yes".to_string(),
            impact: None,
            recommendation: None,
            absent_severity: Severity::Ok,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Sets the feature name used in messages (e.g., "SOCKS proxy").
    #[must_use]
    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.feature = feature.into();
        self
    }

    /// Watches `key` and flags it when it equals `insecure_value`.
    #[must_use]
    pub fn watch(mut self, key: impl Into<String>, insecure_value: impl Into<String>) -> Self {
        self.key = key.into();
        self.insecure_value = insecure_value.into();
        self
    }

    /// Sets the impact text of the insecure finding.
    #[must_use]
    pub fn impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    /// Sets the recommendation text of the insecure finding.
    #[must_use]
    pub fn recommend(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Severity reported when the assignment is missing (default: ok).
    #[must_use]
    pub fn when_absent(mut self, severity: Severity) -> Self {
        self.absent_severity = severity;
        self
    }

    fn finding(&self, severity: Severity, message: String) -> Finding {
        Finding::new(self.code, self.id, self.section, severity, message)
    }
}

impl Rule for ToggleRule {
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
        RuleKind::TriState
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
        let pattern = self.pattern.clone().has(self.key.as_str());
        let Some(found) = find_first(doc, &pattern) else {
            return vec![self
                .finding(self.absent_severity, format!("{} is not enabled", self.feature))
                .with_kind(FindingKind::NotConfigured)];
        };

        let value = found
            .statement()
            .and_then(|s| s.get(&self.key))
            .unwrap_or_default();

        let finding = if value == self.insecure_value {
            let mut finding =
                self.finding(Severity::Warning, format!("{} is enabled", self.feature));
            if let Some(impact) = &self.impact {
                finding = finding.with_impact(impact.clone());
            }
            if let Some(recommendation) = &self.recommendation {
                finding = finding.with_recommendation(recommendation.clone());
            }
            finding
        } else {
            self.finding(Severity::Ok, format!("{} is not enabled", self.feature))
                .with_kind(FindingKind::Compliant)
        };

        vec![finding.at_line(found.line())]
    }
}
