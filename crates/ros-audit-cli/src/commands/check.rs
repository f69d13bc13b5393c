//! Check command implementation.

use anyhow::{Context, Result};
use ros_audit_core::{AuditReport, Auditor, Config, RuleCatalog, Severity};
use ros_audit_rules::catalog_from_config;
use std::path::Path;

use crate::config_lookup;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    export: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    fail_on_warning: bool,
    explicit_config: Option<&Path>,
) -> Result<()> {
    let loaded = config_lookup::load_for_export(export, explicit_config)?;
    if let Some(origin) = &loaded.origin {
        tracing::info!("Using config: {}", origin.display());
    }
    let config = loaded.config;
    let threshold = fail_threshold(&config, fail_on_warning);

    let mut catalog = catalog_from_config(&config).context("Failed to build rule catalog")?;
    if let Some(filter) = rules_filter {
        let (selected, unknown) = select_rules(catalog, &filter);
        for name in unknown {
            tracing::warn!("Unknown rule: {}", name);
        }
        catalog = selected;
    }

    let auditor = Auditor::builder()
        .catalog(catalog)
        .config(config)
        .build()
        .context("Failed to build auditor")?;

    tracing::info!(
        "Auditing {} with {} rules",
        export.display(),
        auditor.rule_count()
    );

    let report = auditor.audit_path(export)?;

    super::output::print(&report, format)?;

    if should_fail(&report, threshold) {
        std::process::exit(1);
    }

    Ok(())
}

/// Narrows the catalog to a comma-separated list of ids or codes.
///
/// Also returns the names no rule answers to.
fn select_rules(catalog: RuleCatalog, filter: &str) -> (RuleCatalog, Vec<String>) {
    let names: Vec<&str> = filter
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .collect();
    let unknown = names
        .iter()
        .filter(|name| catalog.get(name).is_none())
        .map(ToString::to_string)
        .collect();
    (catalog.only(&names), unknown)
}

/// `--fail-on-warning` wins over the config's `fail_on`.
fn fail_threshold(config: &Config, fail_on_warning: bool) -> Option<Severity> {
    if fail_on_warning {
        Some(Severity::Warning)
    } else {
        config.fail_on
    }
}

fn should_fail(report: &AuditReport, threshold: Option<Severity>) -> bool {
    threshold.is_some_and(|severity| report.has_findings_at(severity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros_audit_core::{Finding, Rule};
    use ros_audit_rules::default_catalog;

    fn report_with(severity: Severity) -> AuditReport {
        let mut report = AuditReport::new();
        report
            .findings
            .push(Finding::new("RA003", "bandwidth-server", "Bandwidth Server", severity, "m"));
        report
    }

    #[test]
    fn flag_overrides_config_threshold() {
        let config = Config::parse("fail_on = \"info\"\n").unwrap();
        assert_eq!(fail_threshold(&config, true), Some(Severity::Warning));
        assert_eq!(fail_threshold(&config, false), Some(Severity::Info));
        assert_eq!(fail_threshold(&Config::default(), false), None);
    }

    #[test]
    fn fails_only_at_or_above_threshold() {
        assert!(should_fail(&report_with(Severity::Warning), Some(Severity::Warning)));
        assert!(!should_fail(&report_with(Severity::Info), Some(Severity::Warning)));
        assert!(should_fail(&report_with(Severity::Warning), Some(Severity::Info)));
        assert!(!should_fail(&report_with(Severity::Warning), None));
    }

    #[test]
    fn selects_by_id_or_code_and_reports_unknown_names() {
        let catalog = default_catalog().unwrap();
        let (selected, unknown) = select_rules(catalog, " upnp, RA008,bogus,,RA999");
        let ids: Vec<&str> = selected.iter().map(Rule::id).collect();
        assert_eq!(ids, vec!["upnp", "socks"]);
        assert_eq!(unknown, vec!["bogus", "RA999"]);
    }

    #[test]
    fn empty_filter_selects_nothing() {
        let (selected, unknown) = select_rules(default_catalog().unwrap(), " , ");
        assert!(selected.is_empty());
        assert!(unknown.is_empty());
    }
}
