//! Presence checks: insecure assignments reported only when found.

use ros_audit_core::{Pattern, SettingCheck, SettingRule};

const INFORMATION_GATHERING: &str = "Information Gathering";
const WINBOX_IMPACT: &str = "This reduces the security of the Winbox interface. Filter access";

/// Neighbor discovery answering on every interface.
#[must_use]
pub fn discovery_settings() -> SettingRule {
    SettingRule::new("RA002", "discovery-settings", "Discovery Protocols")
        .describe("Neighbor discovery protocols enabled on all interfaces")
        .check(
            SettingCheck::new(
                Pattern::section("/ip neighbor discovery-settings")
                    .with("discover-interface-list", "all"),
            )
            .warn("Discovery protocols are enabled on all interfaces")
            .impact(INFORMATION_GATHERING),
        )
}

/// Bandwidth test server left on.
#[must_use]
pub fn bandwidth_server() -> SettingRule {
    SettingRule::new("RA003", "bandwidth-server", "Bandwidth Server")
        .describe("Bandwidth test server enabled")
        .check(
            SettingCheck::new(
                Pattern::section("/tool bandwidth-server")
                    .verb("set")
                    .with("enabled", "yes"),
            )
            .warn("Bandwidth Server is enabled")
            .impact(
                "Potential misuse for traffic analysis and network performance degradation",
            ),
        )
}

/// Router resolving DNS for remote clients.
#[must_use]
pub fn dns_remote_requests() -> SettingRule {
    SettingRule::new("RA004", "dns-remote-requests", "DNS Settings")
        .describe("DNS server accepts remote requests")
        .check(
            SettingCheck::new(
                Pattern::section("/ip dns")
                    .verb("set")
                    .with("allow-remote-requests", "yes"),
            )
            .warn("Router is configured as a DNS server")
            .impact("DNS Flood")
            .recommend(
                "Consider closing this port from the internet to avoid unwanted traffic",
            ),
        )
}

/// Cloud dynamic DNS publishing the router's address.
#[must_use]
pub fn ddns() -> SettingRule {
    SettingRule::new("RA005", "ddns", "DDNS Settings")
        .describe("Dynamic DNS enabled")
        .check(
            SettingCheck::new(
                Pattern::section("/ip cloud")
                    .verb("set")
                    .with("ddns-enabled", "yes"),
            )
            .warn("Dynamic DNS is enabled")
            .impact("Exposure to dynamic IP changes and potential unauthorized access"),
        )
}

/// SSH server accepting weak ciphers.
#[must_use]
pub fn ssh_strong_crypto() -> SettingRule {
    SettingRule::new("RA007", "ssh-strong-crypto", "SSH Strong Crypto")
        .describe("SSH strong crypto disabled")
        .check(
            SettingCheck::new(
                Pattern::section("/ip ssh")
                    .verb("set")
                    .with("strong-crypto", "no"),
            )
            .warn("SSH strong crypto is disabled (strong-crypto=no)")
            .impact("Less secure SSH connections")
            .recommend(
                "Enable strong crypto (strong-crypto=yes) for enhanced security. This will use \
                 stronger encryption, HMAC algorithms, larger DH primes, and disallow weaker ones",
            ),
        )
}

/// MAC Telnet reachable from every interface.
#[must_use]
pub fn mac_server() -> SettingRule {
    SettingRule::new("RA010", "mac-server", "MAC Server Settings")
        .describe("MAC Telnet server allowed on all interfaces")
        .check(
            SettingCheck::new(
                Pattern::section("/tool mac-server")
                    .verb("set")
                    .with("allowed-interface-list", "all"),
            )
            .warn("MAC Telnet server is active on all interfaces")
            .impact(WINBOX_IMPACT),
        )
}

/// MAC Winbox reachable from every interface.
#[must_use]
pub fn mac_winbox_server() -> SettingRule {
    SettingRule::new("RA011", "mac-winbox-server", "MAC Winbox Server Settings")
        .describe("MAC Winbox server allowed on all interfaces")
        .check(
            SettingCheck::new(
                Pattern::section("/tool mac-server mac-winbox")
                    .verb("set")
                    .with("allowed-interface-list", "all"),
            )
            .warn("MAC Winbox Server is accessible on all interfaces")
            .impact(WINBOX_IMPACT),
        )
}

/// MAC ping responder.
#[must_use]
pub fn mac_ping_server() -> SettingRule {
    SettingRule::new("RA012", "mac-ping-server", "MAC Ping Server Settings")
        .describe("MAC ping server enabled")
        .check(
            SettingCheck::new(
                Pattern::section("/tool mac-server ping")
                    .verb("set")
                    .with("enabled", "yes"),
            )
            .warn("MAC Ping Server is enabled")
            .impact("Possible unwanted traffic"),
        )
}

/// Default SNMP community names, each reported on its own.
#[must_use]
pub fn snmp_community() -> SettingRule {
    let community = |name: &str| {
        SettingCheck::new(Pattern::section("/snmp community").with("name", name))
            .warn(format!("SNMP community '{name}' is in use"))
            .impact(INFORMATION_GATHERING)
            .recommend("Change the community name to something more secure")
    };

    SettingRule::new("RA014", "snmp-community", "SNMP")
        .describe("Default SNMP community names in use")
        .check(community("public"))
        .check(community("private"))
}

/// No password length or complexity requirements.
#[must_use]
pub fn password_policy() -> SettingRule {
    SettingRule::new("RA016", "password-policy", "Password Strength Requirements")
        .describe("No minimum password complexity or length")
        .check(
            SettingCheck::new(
                Pattern::section("/user settings")
                    .verb("set")
                    .with("minimum-categories", "0")
                    .with("minimum-password-length", "0"),
            )
            .warn("No minimum password complexity or length requirements")
            .recommend(
                "Set minimum password complexity and length requirements to enhance security",
            ),
        )
}

/// Ports supplying PoE without negotiation, one finding per mode.
#[must_use]
pub fn poe_settings() -> SettingRule {
    SettingRule::new("RA017", "poe-settings", "PoE Settings")
        .describe("PoE output set to auto-on or forced-on")
        .check(
            SettingCheck::new(Pattern::section("/interface ethernet").with("poe-out", "auto-on"))
                .warn("PoE is set to auto-on")
                .impact(
                    "There is a risk of damaging connected devices by unexpectedly supplying \
                     power to the port",
                )
                .recommend("Review and set PoE settings appropriately"),
        )
        .check(
            SettingCheck::new(Pattern::section("/interface ethernet").with("poe-out", "forced-on"))
                .warn("PoE is set to forced-on")
                .impact(
                    "There is a significant risk of damaging connected devices by unexpectedly \
                     supplying power to the port",
                )
                .recommend("Review and set PoE settings appropriately"),
        )
}

/// SMB file sharing enabled.
#[must_use]
pub fn smb() -> SettingRule {
    SettingRule::new("RA018", "smb", "SMB Settings")
        .describe("SMB file sharing enabled")
        .check(
            SettingCheck::new(Pattern::section("/ip smb").verb("set").with("enabled", "yes"))
                .warn("SMB is enabled")
                .impact("Reading files, potential CVE-2018-7445")
                .recommend(
                    "Are you sure you want SMB? If you don't need it, turn it off. Be careful",
                ),
        )
}
