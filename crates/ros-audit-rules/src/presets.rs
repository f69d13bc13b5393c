//! Built-in catalog construction.

use crate::{
    bandwidth_server, ddns, discovery_settings, dns_remote_requests, mac_ping_server, mac_server,
    mac_winbox_server, password_policy, poe_settings, romon, smb, snmp_community, socks,
    ssh_strong_crypto, upnp, DeviceInfo, OspfInterfaceTemplates, ServiceReachability,
    VrrpAuthentication,
};
use ros_audit_core::{CatalogError, Config, RuleBox, RuleCatalog};
use tracing::debug;

/// Returns every built-in rule in report order.
#[must_use]
pub fn default_rules() -> Vec<RuleBox> {
    rules_with(ServiceReachability::new())
}

/// Returns the built-in catalog.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicateRule`] if two built-in rules share an id.
pub fn default_catalog() -> Result<RuleCatalog, CatalogError> {
    RuleCatalog::from_rules(default_rules())
}

/// Returns the built-in catalog with rule options taken from `config`.
///
/// Reads `risky` from `[rules.service-reachability]`. Enabling and severity
/// overrides are applied by the auditor, not here.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicateRule`] if two built-in rules share an id.
pub fn catalog_from_config(config: &Config) -> Result<RuleCatalog, CatalogError> {
    let mut services = ServiceReachability::new();
    if let Some(risky) = config
        .rule("service-reachability")
        .and_then(|c| c.get_option::<Vec<String>>("risky"))
    {
        debug!("Risky services from config: {:?}", risky);
        services = services.risky(risky);
    }
    RuleCatalog::from_rules(rules_with(services))
}

fn rules_with(services: ServiceReachability) -> Vec<RuleBox> {
    vec![
        Box::new(DeviceInfo::new()),
        Box::new(discovery_settings()),
        Box::new(bandwidth_server()),
        Box::new(dns_remote_requests()),
        Box::new(ddns()),
        Box::new(upnp()),
        Box::new(ssh_strong_crypto()),
        Box::new(socks()),
        Box::new(romon()),
        Box::new(mac_server()),
        Box::new(mac_winbox_server()),
        Box::new(mac_ping_server()),
        Box::new(VrrpAuthentication::new()),
        Box::new(snmp_community()),
        Box::new(OspfInterfaceTemplates::new()),
        Box::new(password_policy()),
        Box::new(poe_settings()),
        Box::new(smb()),
        Box::new(services),
    ]
}
