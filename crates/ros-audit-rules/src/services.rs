//! Status summary of the remote management services under `/ip service`.

use ros_audit_core::{
    find_first, ConfigDocument, Finding, FindingKind, Pattern, Rule, RuleKind, Severity,
};

const SECTION_PATH: &str = "/ip service";
const ADVICE: &str = "Restrict access to RMI only from trusted subnets";
const RISKY_RECOMMENDATION: &str = "Consider disabling for security reasons";

/// Services in report order, as (service name, display name).
pub const SERVICES: [(&str, &str); 8] = [
    ("telnet", "Telnet"),
    ("ftp", "FTP"),
    ("www", "WWW (HTTP)"),
    ("ssh", "SSH"),
    ("www-ssl", "WWW-SSL (HTTPS)"),
    ("api", "API"),
    ("winbox", "Winbox"),
    ("api-ssl", "API-SSL"),
];

/// Services that warn when enabled unless configured otherwise.
pub const DEFAULT_RISKY: [&str; 4] = ["telnet", "ftp", "api", "api-ssl"];

/// Reports the state of every management service, then general advice.
///
/// The report always holds one finding per entry of [`SERVICES`] followed by
/// one advice finding, whatever the export contains.
#[derive(Debug, Clone)]
pub struct ServiceReachability {
    risky: Vec<String>,
}

impl Default for ServiceReachability {
    fn default() -> Self {
        Self {
            risky: DEFAULT_RISKY.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ServiceReachability {
    /// Creates the rule with the default risky set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the set of services that warn when enabled.
    #[must_use]
    pub fn risky<I, S>(mut self, services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.risky = services.into_iter().map(Into::into).collect();
        self
    }

    fn is_risky(&self, service: &str) -> bool {
        self.risky.iter().any(|r| r.eq_ignore_ascii_case(service))
    }

    fn finding(&self, severity: Severity, message: String) -> Finding {
        Finding::new(self.code(), self.id(), self.section(), severity, message)
    }

    fn service_finding(&self, doc: &ConfigDocument, service: &str, label: &str) -> Finding {
        let pattern = Pattern::section(SECTION_PATH)
            .verb("set")
            .target(service)
            .has("disabled")
            .capture("disabled");

        let Some(found) = find_first(doc, &pattern) else {
            return self
                .finding(Severity::Info, format!("{label} configuration not found"))
                .with_kind(FindingKind::NotConfigured)
                .with_entity(service);
        };

        let finding = match (found.get("disabled"), self.is_risky(service)) {
            (Some("no"), true) => self
                .finding(Severity::Warning, format!("{label} is enabled"))
                .with_recommendation(RISKY_RECOMMENDATION),
            (Some("no"), false) => self.finding(Severity::Info, format!("{label} is enabled")),
            _ => self
                .finding(Severity::Ok, format!("{label} is disabled"))
                .with_kind(FindingKind::Compliant),
        };
        finding.with_entity(service).at_line(found.line())
    }
}

impl Rule for ServiceReachability {
    fn id(&self) -> &'static str {
        "service-reachability"
    }

    fn code(&self) -> &'static str {
        "RA019"
    }

    fn section(&self) -> &'static str {
        "RMI Interfaces Status"
    }

    fn kind(&self) -> RuleKind {
        RuleKind::ServiceSummary
    }

    fn description(&self) -> &'static str {
        "Enabled state of telnet, ftp, www, ssh, www-ssl, api, winbox and api-ssl"
    }

    fn evaluate(&self, doc: &ConfigDocument) -> Vec<Finding> {
        let mut findings: Vec<Finding> = SERVICES
            .iter()
            .map(|(service, label)| self.service_finding(doc, service, label))
            .collect();
        findings.push(
            self.finding(Severity::Info, ADVICE.to_string())
                .with_kind(FindingKind::Advice),
        );
        findings
    }
}
