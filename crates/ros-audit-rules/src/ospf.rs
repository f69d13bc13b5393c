//! OSPF interface templates missing passive mode or authentication.

use std::collections::HashSet;

use ros_audit_core::{
    find_all, render_template, ConfigDocument, Finding, Pattern, Rule, RuleKind, Severity,
    Statement,
};

const SECTION_PATH: &str = "/routing ospf interface-template";
const NOT_PASSIVE: &str = "OSPF interface '{}' is not set to passive";
const NO_AUTH: &str = "OSPF interface '{}' has no authentication";
const IMPACT: &str = "Potential unauthorized access and network disruption";
const RECOMMENDATION: &str =
    "Configure authentication and passive mode for OSPF interfaces to enhance security";

/// Checks every interface named by an OSPF interface template.
///
/// A template may list several interfaces (`interfaces=ether1,ether2`); each
/// name is inspected against the first template naming it exactly. One
/// finding per non-compliant interface, with one line per missing setting.
#[derive(Debug, Default, Clone, Copy)]
pub struct OspfInterfaceTemplates;

impl OspfInterfaceTemplates {
    /// Creates the rule.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn is_passive(statement: &Statement) -> bool {
    statement.has_flag("passive") || statement.get("passive") == Some("yes")
}

fn has_auth(statement: &Statement) -> bool {
    statement.get("auth").is_some()
}

impl Rule for OspfInterfaceTemplates {
    fn id(&self) -> &'static str {
        "ospf-interface-templates"
    }

    fn code(&self) -> &'static str {
        "RA015"
    }

    fn section(&self) -> &'static str {
        "OSPF Interface Templates Check"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::EnumeratedEntity
    }

    fn description(&self) -> &'static str {
        "OSPF interfaces without passive mode or authentication"
    }

    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
        let pattern = Pattern::section(SECTION_PATH)
            .verb("add")
            .capture("interfaces");

        let mut seen = HashSet::new();
        let mut findings = Vec::new();

        for found in find_all(doc, &pattern) {
            let (Some(statement), Some(interfaces)) = (found.statement(), found.get("interfaces"))
            else {
                continue;
            };

            let mut missing = Vec::with_capacity(2);
            if !is_passive(statement) {
                missing.push(NOT_PASSIVE);
            }
            if !has_auth(statement) {
                missing.push(NO_AUTH);
            }

            for name in interfaces.split(',').map(str::trim).filter(|n| !n.is_empty()) {
                if !seen.insert(name) {
                    continue;
                }
                let Some((first, rest)) = missing.split_first() else {
                    continue;
                };

                let finding = rest.iter().fold(
                    Finding::new(
                        self.code(),
                        self.id(),
                        self.section(),
                        Severity::Warning,
                        render_template(first, name),
                    ),
                    |finding, line| finding.with_detail(render_template(line, name)),
                );
                findings.push(
                    finding
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

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<Finding> {
        OspfInterfaceTemplates::new().evaluate(&ConfigDocument::new(text))
    }

    #[test]
    fn both_settings_missing_yield_one_finding_with_two_lines() {
        let findings =
            run("/routing ospf interface-template\nadd area=backbone interfaces=ether1\n");
        assert_eq!(findings.len(), 1);
        let lines: Vec<&str> = findings[0].lines().collect();
        assert_eq!(
            lines,
            vec![
                "OSPF interface 'ether1' is not set to passive",
                "OSPF interface 'ether1' has no authentication",
            ]
        );
        assert_eq!(findings[0].impact.as_deref(), Some(IMPACT));
        assert_eq!(findings[0].recommendation.as_deref(), Some(RECOMMENDATION));
    }

    #[test]
    fn only_missing_auth() {
        let findings =
            run("/routing ospf interface-template\nadd area=backbone interfaces=ether2 passive\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "OSPF interface 'ether2' has no authentication");
        assert!(findings[0].details.is_empty());
    }

    #[test]
    fn passive_assignment_counts_as_passive() {
        let findings = run("/routing ospf interface-template\n\
             add area=backbone auth=md5 auth-key=secret interfaces=ether3 passive=yes\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn compliant_template_produces_nothing() {
        let findings = run("/routing ospf interface-template\n\
             add area=backbone auth=sha256 auth-id=1 interfaces=ether1 passive\n");
        assert!(findings.is_empty());
    }

    #[test]
    fn names_do_not_collide_on_prefix() {
        let findings = run("/routing ospf interface-template\n\
             add area=backbone auth=md5 interfaces=ether10 passive\n\
             add area=backbone interfaces=ether1\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].entity.as_deref(), Some("ether1"));
        assert_eq!(findings[0].details.len(), 1);
    }

    #[test]
    fn interface_lists_are_split() {
        let findings =
            run("/routing ospf interface-template\nadd interfaces=ether1,ether2 passive\n");
        let names: Vec<_> = findings.iter().filter_map(|f| f.entity.as_deref()).collect();
        assert_eq!(names, vec!["ether1", "ether2"]);
    }

    #[test]
    fn first_declaration_wins() {
        let findings = run("/routing ospf interface-template\n\
             add area=backbone auth=md5 interfaces=ether1 passive\n\
             add area=backbone interfaces=ether1\n");
        assert!(findings.is_empty());
    }
}
