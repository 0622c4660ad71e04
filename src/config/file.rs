//! Configuration file loading and discovery.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::types::MatcherConfig;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names, in search order.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".mpn-tools.yaml",
    ".mpn-tools.yml",
    "mpn-tools.yaml",
    "mpn-tools.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (`~/.config/mpn-tools/`)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("mpn-tools")) {
            return Some(path);
        }
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load a [`MatcherConfig`] from a YAML file.
pub fn load_config_file(path: &Path) -> Result<MatcherConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // an empty file is an empty mapping, not an error
    if content.trim().is_empty() {
        return Ok(MatcherConfig::default());
    }
    Ok(serde_yaml::from_str(&content)?)
}

/// Load config from the discovered file, or return the default.
///
/// A file that fails to load is logged and ignored.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (MatcherConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (MatcherConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (MatcherConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate example config file content from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    format!(
        r"# mpn-tools configuration
# Place this file at .mpn-tools.yaml in your project root or ~/.config/mpn-tools/
#
# profile: design-phase | replacement | cost-optimization | performance-upgrade | emergency-sourcing
# acceptance_threshold: 0.8
#
# type_metadata:
#   - component_type: RESISTOR
#     specs:
#       - name: resistance
#         importance: critical
#         rule: {{ kind: percentage_tolerance, percent: 0.5 }}

{}",
        serde_yaml::to_string(&MatcherConfig::default()).unwrap_or_default()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::SimilarityProfile;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_in_dir() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".mpn-tools.yaml");
        std::fs::write(&config_path, "profile: replacement\n").unwrap();

        assert_eq!(find_config_in_dir(tmp.path()), Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_hidden_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("mpn-tools.yaml"), "").unwrap();
        std::fs::write(tmp.path().join(".mpn-tools.yaml"), "").unwrap();

        assert_eq!(
            find_config_in_dir(tmp.path()),
            Some(tmp.path().join(".mpn-tools.yaml"))
        );
    }

    #[test]
    fn test_find_config_in_dir_not_found() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(find_config_in_dir(tmp.path()), None);
    }

    #[test]
    fn test_load_config_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        let yaml = r"
profile: emergency-sourcing
acceptance_threshold: 0.55
fallback:
  preset: strict
";
        std::fs::write(&config_path, yaml).unwrap();

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.profile, Some(SimilarityProfile::EmergencySourcing));
        assert_eq!(config.acceptance_threshold, Some(0.55));
        assert_eq!(config.fallback.preset, "strict");
    }

    #[test]
    fn test_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "\n").unwrap();

        assert_eq!(load_config_file(&config_path).unwrap(), MatcherConfig::default());
    }

    #[test]
    fn test_load_config_file_errors() {
        let result = load_config_file(Path::new("/nonexistent/config.yaml"));
        assert!(matches!(result, Err(ConfigFileError::NotFound(_))));

        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.yaml");
        std::fs::write(&config_path, "profile: [not, a, profile]\n").unwrap();
        assert!(matches!(
            load_config_file(&config_path),
            Err(ConfigFileError::Parse(_))
        ));
    }

    #[test]
    fn test_load_or_default_ignores_bad_file() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("broken.yaml");
        std::fs::write(&config_path, "profile: sideways\n").unwrap();

        let (config, loaded_from) = load_or_default(Some(&config_path));
        assert_eq!(config, MatcherConfig::default());
        assert_eq!(loaded_from, None);
    }

    #[test]
    fn test_discover_explicit_path() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("custom-config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "profile: design-phase").unwrap();

        assert_eq!(discover_config_file(Some(&config_path)), Some(config_path));
    }

    #[test]
    fn test_generate_example_config_parses() {
        let example = generate_example_config();
        assert!(example.contains("fallback:"));
        let parsed: MatcherConfig = serde_yaml::from_str(&example).unwrap();
        assert_eq!(parsed, MatcherConfig::default());
    }
}
