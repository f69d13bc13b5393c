//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# ros-audit configuration

# Exit with status 1 when a finding at or above this severity is reported
# (ok, info, warning). Unset: always exit 0 after a successful audit.
# fail_on = "warning"

# Rule configurations, keyed by rule id (see `ros-audit list-rules`).
# Each rule can be disabled and have the severity of its issues overridden.

[rules.device-info]
enabled = true

# [rules.bandwidth-server]
# severity = "info"

# [rules.ddns]
# enabled = false

[rules.service-reachability]
# Services that warn, rather than inform, when enabled
risky = ["telnet", "ftp", "api", "api-ssl"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("ros-audit.toml");
    write_config(config_path, force)?;

    println!("Created ros-audit.toml");
    println!("\nNext steps:");
    println!("  1. Edit ros-audit.toml to configure rules");
    println!("  2. Run: ros-audit check <export.rsc>");

    Ok(())
}

fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros_audit_core::Config;
    use tempfile::TempDir;

    #[test]
    fn default_config_parses() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.is_rule_enabled("device-info"));
        let risky: Vec<String> = config
            .rule("service-reachability")
            .and_then(|r| r.get_option("risky"))
            .unwrap();
        assert_eq!(risky, vec!["telnet", "ftp", "api", "api-ssl"]);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("ros-audit.toml");
        std::fs::write(&path, "fail_on = \"ok\"\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fail_on = \"ok\"\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
