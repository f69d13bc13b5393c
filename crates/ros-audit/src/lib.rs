//! # ros-audit
//!
//! Offline security auditor for RouterOS configuration exports.
//!
//! This is the main facade crate that re-exports the core framework and the
//! built-in rules.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! let export = std::fs::read_to_string("router.rsc")?;
//! let report = ros_audit::audit(&export)?;
//!
//! for section in report.sections() {
//!     println!("{}", section.label);
//!     for finding in section.findings {
//!         println!("  {finding}");
//!     }
//! }
//! ```
//!
//! ## With Configuration
//!
//! ```rust,ignore
//! use ros_audit::{Config, ConfigDocument};
//!
//! let config = Config::from_file("ros-audit.toml".as_ref())?;
//! let auditor = ros_audit::auditor(config)?;
//! let report = auditor.audit(&ConfigDocument::from_path("router.rsc".as_ref())?);
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use ros_audit_core::*;

/// Built-in rules and catalog constructors.
pub mod rules {
    pub use ros_audit_rules::*;
}

mod runner;

pub use runner::{audit, audit_with, auditor};
