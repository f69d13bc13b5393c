//! Rule trait for defining security checks.

use crate::document::ConfigDocument;
use crate::types::Finding;
use serde::Serialize;

/// How a rule turns matches into findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleKind {
    /// Reports only when an insecure setting is present.
    Presence,
    /// Always reports: insecure, safe or not configured.
    TriState,
    /// Reports once per non-compliant entity.
    EnumeratedEntity,
    /// Surfaces device metadata without judging it.
    Informational,
    /// Fixed per-service status lines plus blanket advice.
    ServiceSummary,
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Presence => "presence",
            Self::TriState => "tri-state",
            Self::EnumeratedEntity => "enumerated",
            Self::Informational => "informational",
            Self::ServiceSummary => "summary",
        };
        f.write_str(label)
    }
}

/// A security check evaluated against a configuration export.
///
/// Evaluation must be a pure function of the document: rules keep no state
/// between calls and never see each other's findings.
///
/// # Example
///
/// ```ignore
/// use ros_audit_core::{ConfigDocument, Finding, Rule, RuleKind, Severity};
///
/// pub struct NoIdentity;
///
/// impl Rule for NoIdentity {
///     fn id(&self) -> &'static str { "system-identity" }
///     fn code(&self) -> &'static str { "RA100" }
///     fn section(&self) -> &'static str { "Identity" }
///     fn kind(&self) -> RuleKind { RuleKind::Presence }
///
///     fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
///         if doc.sections_at("/system identity").next().is_none() {
///             vec![Finding::new(self.code(), self.id(), self.section(),
///                 Severity::Info, "No identity configured")]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case id of this rule (e.g., "vrrp-authentication").
    fn id(&self) -> &'static str;

    /// Returns the rule code (e.g., "RA013").
    fn code(&self) -> &'static str;

    /// Returns the report section label for this rule's findings.
    fn section(&self) -> &'static str;

    /// Returns how this rule reports.
    fn kind(&self) -> RuleKind;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Evaluates the rule against a document.
    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding>;

    /// Returns true if `name` is this rule's id or code.
    fn answers_to(&self, name: &str) -> bool {
        self.id() == name || self.code().eq_ignore_ascii_case(name)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

/// Replaces the `{}` placeholder of a template with `entity`.
#[must_use]
pub fn render_template(template: &str, entity: &str) -> String {
    template.replacen("{}", entity, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    struct TestRule;

    impl Rule for TestRule {
        fn id(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn section(&self) -> &'static str {
            "Test Section"
        }
        fn kind(&self) -> RuleKind {
            RuleKind::Presence
        }

        fn evaluate(&self, _doc: &ConfigDocument) -> Vec<Finding> {
            vec![Finding::new(
                self.code(),
                self.id(),
                self.section(),
                Severity::Warning,
                "Test finding",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.id(), "test-rule");
        assert_eq!(rule.description(), "");
        assert_eq!(rule.evaluate(&ConfigDocument::new("")).len(), 1);
    }

    #[test]
    fn answers_to_id_and_code() {
        let rule = TestRule;
        assert!(rule.answers_to("test-rule"));
        assert!(rule.answers_to("test001"));
        assert!(!rule.answers_to("other"));
    }

    #[test]
    fn template_placeholder() {
        assert_eq!(
            render_template("VRRP interface '{}' has no authentication", "vrrp1"),
            "VRRP interface 'vrrp1' has no authentication"
        );
        assert_eq!(render_template("static text", "x"), "static text");
    }
}
