//! Core types for audit findings and reports.

use serde::{Deserialize, Serialize};

/// Severity level for findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The checked setting is in a safe state.
    Ok,
    /// Informational message.
    Info,
    /// Insecure setting that should be addressed.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ok" => Ok(Self::Ok),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            other => Err(format!(
                "unknown severity `{other}`, expected: ok, info, warning"
            )),
        }
    }
}

/// What a finding says about the checked setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    /// The setting was found in a state worth reporting.
    Issue,
    /// The setting was found in its safe state.
    Compliant,
    /// The setting does not appear in the export.
    NotConfigured,
    /// Device metadata, no security judgement.
    Metadata,
    /// General advice not tied to a specific setting.
    Advice,
}

/// One structured result of evaluating a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Rule id (e.g., "vrrp-authentication").
    pub rule: String,
    /// Rule code (e.g., "RA013").
    pub code: String,
    /// Report section the finding belongs to.
    pub section: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// What the finding says about the setting.
    pub kind: FindingKind,
    /// Primary message.
    pub message: String,
    /// Further lines of the same finding, rendered like the message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    /// Security impact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// Suggested remediation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// Entity the finding is about (interface, community, service...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// 1-based line in the export where the setting was found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    /// Creates a new finding of kind [`FindingKind::Issue`].
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        section: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            code: code.into(),
            section: section.into(),
            severity,
            kind: FindingKind::Issue,
            message: message.into(),
            details: Vec::new(),
            impact: None,
            recommendation: None,
            entity: None,
            line: None,
        }
    }

    /// Sets the finding kind.
    #[must_use]
    pub fn with_kind(mut self, kind: FindingKind) -> Self {
        self.kind = kind;
        self
    }

    /// Appends a detail line.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Sets the impact text.
    #[must_use]
    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }

    /// Sets the recommendation text.
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Sets the entity identifier.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Sets the source line, if known.
    #[must_use]
    pub fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    /// Message followed by the detail lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.message.as_str()).chain(self.details.iter().map(String::as_str))
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] {}", self.severity, self.code, self.message)?;
        for detail in &self.details {
            write!(f, "; {detail}")?;
        }
        if let Some(line) = self.line {
            write!(f, " (line {line})")?;
        }
        Ok(())
    }
}

/// Findings sharing a report section, in emission order.
#[derive(Debug, Clone, Copy)]
pub struct ReportSection<'a> {
    /// Section label.
    pub label: &'a str,
    /// Findings under the label.
    pub findings: &'a [Finding],
}

/// Result of auditing one configuration export.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// All findings in catalog order.
    pub findings: Vec<Finding>,
    /// Number of rules evaluated.
    pub rules_evaluated: usize,
}

impl AuditReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups consecutive findings by section label.
    ///
    /// Rules emit all their findings together, so with the built-in catalog
    /// each label appears exactly once.
    #[must_use]
    pub fn sections(&self) -> Vec<ReportSection<'_>> {
        self.findings
            .chunk_by(|a, b| a.section == b.section)
            .map(|chunk| ReportSection {
                label: chunk[0].section.as_str(),
                findings: chunk,
            })
            .collect()
    }

    /// Returns true if there are any warnings.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.has_findings_at(Severity::Warning)
    }

    /// Checks if any finding meets or exceeds the given severity.
    #[must_use]
    pub fn has_findings_at(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity >= severity)
    }

    /// Returns findings filtered by severity.
    #[must_use]
    pub fn by_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect()
    }

    /// Findings produced by one rule.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Finding> {
        self.findings.iter().filter(|f| f.rule == rule).collect()
    }

    /// Counts findings as (warnings, infos, oks).
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.findings
                .iter()
                .filter(|f| f.severity == severity)
                .count()
        };
        (
            count(Severity::Warning),
            count(Severity::Info),
            count(Severity::Ok),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(section: &str, severity: Severity) -> Finding {
        Finding::new("RA001", "test-rule", section, severity, "message")
    }

    #[test]
    fn severity_orders_ok_below_warning() {
        assert!(Severity::Ok < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("WARNING".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warning));
        assert_eq!("ok".parse::<Severity>(), Ok(Severity::Ok));
        assert!("error".parse::<Severity>().is_err());
    }

    #[test]
    fn lines_start_with_message() {
        let f = make_finding("OSPF", Severity::Warning).with_detail("second");
        let lines: Vec<&str> = f.lines().collect();
        assert_eq!(lines, vec!["message", "second"]);
    }

    #[test]
    fn display_includes_details_and_line() {
        let f = make_finding("OSPF", Severity::Warning)
            .with_detail("second")
            .at_line(Some(12));
        assert_eq!(f.to_string(), "warning [RA001] message; second (line 12)");
    }

    #[test]
    fn sections_group_consecutive_findings() {
        let mut report = AuditReport::new();
        report.findings.push(make_finding("A", Severity::Warning));
        report.findings.push(make_finding("A", Severity::Info));
        report.findings.push(make_finding("B", Severity::Ok));

        let sections = report.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].label, "A");
        assert_eq!(sections[0].findings.len(), 2);
        assert_eq!(sections[1].label, "B");
    }

    #[test]
    fn empty_report_has_no_sections() {
        assert!(AuditReport::new().sections().is_empty());
    }

    #[test]
    fn counts_by_severity() {
        let mut report = AuditReport::new();
        report.findings.push(make_finding("A", Severity::Warning));
        report.findings.push(make_finding("A", Severity::Ok));
        report.findings.push(make_finding("B", Severity::Ok));
        assert_eq!(report.count_by_severity(), (1, 0, 2));
        assert!(report.has_warnings());
        assert_eq!(report.by_severity(Severity::Ok).len(), 2);
    }

    #[test]
    fn serializes_kind_in_kebab_case() {
        let f = make_finding("A", Severity::Ok).with_kind(FindingKind::NotConfigured);
        let json = serde_json::to_string(&f).unwrap();
        assert!(json.contains("\"kind\":\"not-configured\""));
        assert!(json.contains("\"severity\":\"ok\""));
        assert!(!json.contains("impact"));
    }
}
