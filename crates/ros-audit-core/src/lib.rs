//! # ros-audit-core
//!
//! Core framework for auditing RouterOS configuration exports.
//!
//! This crate provides the foundational types for building configuration
//! security checks. It includes:
//!
//! - [`ConfigDocument`] for the parsed export (sections, statements)
//! - Matcher primitives: [`find_first`], [`find_all`], [`find_text`], [`find_block`]
//! - [`Rule`] trait plus the [`SettingRule`] and [`ToggleRule`] builders
//! - [`Auditor`] for evaluating a [`RuleCatalog`]
//! - [`Finding`] and [`AuditReport`] for the results
//!
//! ## Example
//!
//! ```ignore
//! use ros_audit_core::{Auditor, ConfigDocument, ToggleRule};
//!
//! let auditor = Auditor::builder()
//!     .rule(ToggleRule::new("RA006", "upnp", "UPnP Settings", "/ip upnp").feature("UPnP"))
//!     .build()?;
//!
//! let report = auditor.audit(&ConfigDocument::new("/ip upnp\nset enabled=yes\n"));
//! assert!(report.has_warnings());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auditor;
mod catalog;
mod config;
mod document;
mod matcher;
mod rule;
mod setting;
mod toggle;
mod types;

pub use auditor::{AuditError, Auditor, AuditorBuilder};
pub use catalog::{CatalogError, RuleCatalog};
pub use config::{Config, ConfigError, RuleConfig};
pub use document::{
    normalize_path, ConfigDocument, DocumentError, Section, Span, Statement, ROOT_PATH,
};
pub use matcher::{find_all, find_block, find_first, find_text, Match, Pattern};
pub use rule::{render_template, Rule, RuleBox, RuleKind};
pub use setting::{SettingCheck, SettingRule};
pub use toggle::ToggleRule;
pub use types::{AuditReport, Finding, FindingKind, ReportSection, Severity};
