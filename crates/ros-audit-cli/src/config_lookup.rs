//! Finding and loading the configuration for an audit.
//!
//! Without `--config`, the first existing file wins:
//!
//! 1. `ros-audit.toml` in the directory holding the export
//! 2. `ros-audit.toml` in the current directory
//! 3. `config.toml` in `$ROS_AUDIT_CONFIG_DIR`, else in `~/.ros-audit/`
//!
//! When none exists the built-in defaults apply.

use anyhow::{Context, Result};
use ros_audit_core::Config;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "ros-audit.toml";
const USER_CONFIG_FILE: &str = "config.toml";

/// Configuration together with the file it was read from.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    /// Parsed configuration.
    pub config: Config,
    /// `None` when the defaults are in use.
    pub origin: Option<PathBuf>,
}

/// Loads the configuration that applies to auditing `export`.
///
/// # Errors
///
/// Fails when the selected file cannot be read or parsed. An explicit
/// path that does not exist is an error rather than a fallback.
pub fn load_for_export(export: &Path, explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return read(path);
    }
    let candidates = candidates(export, user_config_dir());
    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => read(path),
        None => {
            tracing::debug!("No config file found, using defaults");
            Ok(LoadedConfig::default())
        }
    }
}

fn candidates(export: &Path, user_dir: Option<PathBuf>) -> Vec<PathBuf> {
    let export_dir = export
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let cwd = Path::new(".");

    let mut paths = vec![export_dir.join(CONFIG_FILE), cwd.join(CONFIG_FILE)];
    paths.dedup();
    paths.extend(user_dir.map(|dir| dir.join(USER_CONFIG_FILE)));
    paths
}

fn read(path: &Path) -> Result<LoadedConfig> {
    tracing::debug!("Loading config: {}", path.display());
    let config = Config::from_file(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    Ok(LoadedConfig {
        config,
        origin: Some(path.to_path_buf()),
    })
}

/// `$ROS_AUDIT_CONFIG_DIR`, else `~/.ros-audit`.
fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os("ROS_AUDIT_CONFIG_DIR")
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".ros-audit")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ros_audit_core::Severity;
    use std::fs;
    use tempfile::TempDir;

    fn first_existing(paths: &[PathBuf]) -> Option<&PathBuf> {
        paths.iter().find(|path| path.is_file())
    }

    #[test]
    fn export_directory_searched_before_cwd_and_user_dir() {
        let paths = candidates(
            Path::new("backups/core/router.rsc"),
            Some(PathBuf::from("/home/ops/.ros-audit")),
        );
        assert_eq!(
            paths,
            vec![
                PathBuf::from("backups/core/ros-audit.toml"),
                PathBuf::from("./ros-audit.toml"),
                PathBuf::from("/home/ops/.ros-audit/config.toml"),
            ]
        );
    }

    #[test]
    fn export_in_cwd_yields_one_local_candidate() {
        assert_eq!(
            candidates(Path::new("router.rsc"), None),
            vec![PathBuf::from("./ros-audit.toml")]
        );
        assert_eq!(
            candidates(Path::new("./router.rsc"), None),
            vec![PathBuf::from("./ros-audit.toml")]
        );
    }

    #[test]
    fn file_next_to_export_wins_over_user_config() {
        let exports = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(exports.path().join("ros-audit.toml"), "").unwrap();
        fs::write(user.path().join("config.toml"), "").unwrap();

        let export = exports.path().join("router.rsc");
        let paths = candidates(&export, Some(user.path().to_path_buf()));
        assert_eq!(
            first_existing(&paths),
            Some(&exports.path().join("ros-audit.toml"))
        );
    }

    #[test]
    fn user_config_used_when_nothing_local() {
        let exports = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "").unwrap();

        let export = exports.path().join("router.rsc");
        let paths = candidates(&export, Some(user.path().to_path_buf()));
        assert_eq!(
            paths.last().filter(|path| path.is_file()),
            Some(&user.path().join("config.toml"))
        );
    }

    #[test]
    fn explicit_path_is_loaded_with_origin() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("strict.toml");
        fs::write(&path, "fail_on = \"info\"\n").unwrap();

        let loaded = load_for_export(Path::new("router.rsc"), Some(&path)).unwrap();
        assert_eq!(loaded.config.fail_on, Some(Severity::Info));
        assert_eq!(loaded.origin, Some(path));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let result = load_for_export(
            Path::new("router.rsc"),
            Some(Path::new("/nonexistent/ros-audit.toml")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn invalid_toml_names_the_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.toml");
        fs::write(&path, "fail_on = [").unwrap();

        let err = read(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
