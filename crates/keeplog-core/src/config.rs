//! Multi-component project configuration
//!
//! A project may track one changelog per component:
//!
//! ```yaml
//! project:
//!   components:
//!     - name: default
//!       changelog: CHANGELOG.md
//!     - name: docs
//!       changelog: docs/CHANGELOG.md
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

/// Project configuration file contents
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub project: Project,
}

/// The `project` section
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub components: Vec<Component>,
}

/// A single component and the changelog it owns
#[derive(Debug, Clone, Deserialize)]
pub struct Component {
    pub name: String,
    pub changelog: PathBuf,
}

impl Config {
    /// Look up a component by name.
    pub fn component(&self, path: &Path, name: &str) -> Result<&Component> {
        self.project
            .components
            .iter()
            .find(|component| component.name == name)
            .ok_or_else(|| {
                ConfigError::UnknownComponent {
                    path: path.to_path_buf(),
                    name: name.to_string(),
                }
                .into()
            })
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<Config> {
    info!(path = %path.display(), "loading config");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: Config = serde_yaml::from_str(&content).map_err(ConfigError::Yaml)?;

    validate_config(path, &config)?;
    debug!(path = %path.display(), components = config.project.components.len(), "config loaded");
    Ok(config)
}

fn validate_config(path: &Path, config: &Config) -> Result<()> {
    if config.project.components.is_empty() {
        return Err(ConfigError::InvalidProject {
            path: path.to_path_buf(),
        }
        .into());
    }

    for component in &config.project.components {
        if component.name.is_empty() || component.changelog.as_os_str().is_empty() {
            return Err(ConfigError::InvalidComponent {
                path: path.to_path_buf(),
            }
            .into());
        }
    }

    Ok(())
}

/// Resolve the changelog path for `component` from the config at `path`.
pub fn component_changelog(path: &Path, component: &str) -> Result<PathBuf> {
    let config = load_config(path)?;
    let component = config.component(path, component)?;
    Ok(component.changelog.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeeplogError;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("changelog.yml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_resolve_component() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            "project:\n  components:\n    - name: default\n      changelog: CHANGELOG.md\n    - name: docs\n      changelog: docs/CHANGELOG.md\n",
        );

        assert_eq!(
            component_changelog(&path, "default").unwrap(),
            PathBuf::from("CHANGELOG.md")
        );
        assert_eq!(
            component_changelog(&path, "docs").unwrap(),
            PathBuf::from("docs/CHANGELOG.md")
        );
    }

    #[test]
    fn test_unknown_component() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            "project:\n  components:\n    - name: default\n      changelog: CHANGELOG.md\n",
        );

        let err = component_changelog(&path, "missing").unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Config(ConfigError::UnknownComponent { .. })
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("changelog.yml");

        let err = component_changelog(&path, "default").unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Config(ConfigError::NotFound(_))
        ));
    }

    #[test]
    fn test_missing_components() {
        let temp = TempDir::new().unwrap();
        let path = write_config(&temp, "project:\n  components: []\n");

        let err = component_changelog(&path, "default").unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Config(ConfigError::InvalidProject { .. })
        ));
    }

    #[test]
    fn test_component_without_changelog_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            &temp,
            "project:\n  components:\n    - name: default\n      changelog: \"\"\n",
        );

        let err = component_changelog(&path, "default").unwrap_err();
        assert!(matches!(
            err,
            KeeplogError::Config(ConfigError::InvalidComponent { .. })
        ));
    }
}
