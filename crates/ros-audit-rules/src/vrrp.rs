//! VRRP instances without authentication.

use std::collections::HashSet;

use ros_audit_core::{
    find_all, render_template, ConfigDocument, Finding, Pattern, Rule, RuleKind, Severity,
};
use tracing::trace;

const SECTION_PATH: &str = "/interface vrrp";
const WARNING: &str = "VRRP interface '{}' has no authentication";
const IMPACT: &str = "Potential unauthorized access and manipulation of VRRP settings";
const RECOMMENDATION: &str =
    "Configure authentication for VRRP interfaces to prevent unauthorized access";

/// Reports every VRRP instance declared with `authentication=none`.
///
/// An instance is named by its `name=` value, or by its `interface=` when
/// the export omits the name. Only the first declaration of a name counts.
#[derive(Debug, Default, Clone, Copy)]
pub struct VrrpAuthentication;

impl VrrpAuthentication {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Rule for VrrpAuthentication {
    fn id(&self) -> &'static str {
        "vrrp-authentication"
    }

    fn code(&self) -> &'static str {
        "RA013"
    }

    fn section(&self) -> &'static str {
        "VRRP Authentication Settings"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::EnumeratedEntity
    }

    fn description(&self) -> &'static str {
        "VRRP interfaces without authentication"
    }

    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
        let pattern = Pattern::section(SECTION_PATH)
            .verb("add")
            .capture("name")
            .capture("interface");

        let mut seen = HashSet::new();
        let mut findings = Vec::new();

        for found in find_all(doc, &pattern) {
            let Some(name) = found.get("name").or_else(|| found.get("interface")) else {
                trace!("Skipping unnamed VRRP instance at line {:?}", found.line());
                continue;
            };
            if !seen.insert(name) {
                continue;
            }

            let unauthenticated = found
                .statement()
                .and_then(|s| s.get("authentication"))
                == Some("none");
            if unauthenticated {
                findings.push(
                    Finding::new(
                        self.code(),
                        self.id(),
                        self.section(),
                        Severity::Warning,
                        render_template(WARNING, name),
                    )
                    .with_impact(IMPACT)
                    .with_recommendation(RECOMMENDATION)
                    .with_entity(name)
                    .at_line(found.line()),
                );
            }
        }

        findings
    }
}
