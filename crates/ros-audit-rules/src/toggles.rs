//! Tri-state checks for services that should stay off.

use ros_audit_core::ToggleRule;

/// UPnP port mapping.
#[must_use]
pub fn upnp() -> ToggleRule {
    ToggleRule::new("RA006", "upnp", "UPnP Settings", "/ip upnp")
        .describe("UPnP enabled")
        .feature("UPnP")
        .impact("Potential unauthorized port forwarding and security risks")
}

/// SOCKS proxy.
#[must_use]
pub fn socks() -> ToggleRule {
    ToggleRule::new("RA008", "socks", "SOCKS Settings", "/ip socks")
        .describe("SOCKS proxy enabled")
        .feature("SOCKS proxy")
        .impact("Potential unauthorized access and misuse of network resources")
        .recommend(
            "Disable SOCKS proxy or ensure it is properly secured. SOCKS can be used \
             maliciously if RouterOS is compromised",
        )
}

/// RoMON, which can hop to neighbouring MikroTik devices.
#[must_use]
pub fn romon() -> ToggleRule {
    ToggleRule::new("RA009", "romon", "ROMON Settings", "/tool romon")
        .describe("RoMON enabled")
        .feature("ROMON")
        .impact(
            "ROMON can be a jump point to other MikroTik devices and should be monitored \
             carefully",
        )
        .recommend("Monitor ROMON activities and ensure proper security measures are in place")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros_audit_core::{ConfigDocument, FindingKind, Rule, Severity};

    #[test]
    fn socks_enabled_warns_with_recommendation() {
        let findings = socks().evaluate(&ConfigDocument::new(
            "/ip socks\nset auth-method=none enabled=yes port=1080\n",
        ));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "SOCKS proxy is enabled");
        assert!(findings[0].recommendation.is_some());
    }

    #[test]
    fn romon_disabled_is_compliant() {
        let doc = ConfigDocument::new("/tool romon\nset enabled=no id=00:00:00:00:00:00\n");
        let findings = romon().evaluate(&doc);
        assert_eq!(findings[0].kind, FindingKind::Compliant);
        assert_eq!(findings[0].message, "ROMON is not enabled");
    }

    #[test]
    fn toggles_always_report_once() {
        for rule in [upnp(), socks(), romon()] {
            let findings = rule.evaluate(&ConfigDocument::new("/system identity\nset name=r1\n"));
            assert_eq!(findings.len(), 1, "{}", rule.id());
            assert_eq!(findings[0].kind, FindingKind::NotConfigured);
            assert_eq!(findings[0].severity, Severity::Ok);
        }
    }
}
