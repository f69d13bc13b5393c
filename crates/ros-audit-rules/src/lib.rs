//! # ros-audit-rules
//!
//! Built-in security checks for ros-audit.
//!
//! ## Available Rules
//!
//! | Code | Name | Kind | Description |
//! |------|------|------|-------------|
//! | RA001 | `device-info` | informational | RouterOS version, software id, model, serial number |
//! | RA002 | `discovery-settings` | presence | Neighbor discovery on all interfaces |
//! | RA003 | `bandwidth-server` | presence | Bandwidth test server enabled |
//! | RA004 | `dns-remote-requests` | presence | DNS server accepts remote requests |
//! | RA005 | `ddns` | presence | Dynamic DNS enabled |
//! | RA006 | `upnp` | tri-state | UPnP enabled |
//! | RA007 | `ssh-strong-crypto` | presence | SSH strong crypto disabled |
//! | RA008 | `socks` | tri-state | SOCKS proxy enabled |
//! | RA009 | `romon` | tri-state | RoMON enabled |
//! | RA010 | `mac-server` | presence | MAC Telnet on all interfaces |
//! | RA011 | `mac-winbox-server` | presence | MAC Winbox on all interfaces |
//! | RA012 | `mac-ping-server` | presence | MAC ping server enabled |
//! | RA013 | `vrrp-authentication` | enumerated | VRRP interfaces without authentication |
//! | RA014 | `snmp-community` | presence | `public` / `private` SNMP communities |
//! | RA015 | `ospf-interface-templates` | enumerated | OSPF interfaces not passive or unauthenticated |
//! | RA016 | `password-policy` | presence | No password length or complexity rules |
//! | RA017 | `poe-settings` | presence | PoE auto-on / forced-on |
//! | RA018 | `smb` | presence | SMB file sharing enabled |
//! | RA019 | `service-reachability` | summary | State of the eight management services |
//!
//! ## Usage
//!
//! ```ignore
//! use ros_audit_core::Auditor;
//! use ros_audit_rules::default_catalog;
//!
//! let auditor = Auditor::builder().catalog(default_catalog()?).build()?;
//! let report = auditor.audit_str(&export);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod device_info;
mod ospf;
mod presets;
mod services;
mod settings;
mod toggles;
mod vrrp;

pub use device_info::DeviceInfo;
pub use ospf::OspfInterfaceTemplates;
pub use presets::{catalog_from_config, default_catalog, default_rules};
pub use services::{ServiceReachability, DEFAULT_RISKY, SERVICES};
pub use settings::{
    bandwidth_server, ddns, discovery_settings, dns_remote_requests, mac_ping_server, mac_server,
    mac_winbox_server, password_policy, poe_settings, smb, snmp_community, ssh_strong_crypto,
};
pub use toggles::{romon, socks, upnp};
pub use vrrp::VrrpAuthentication;

/// Re-export core types for convenience.
pub use ros_audit_core::{Finding, Rule, Severity};
