use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Which toolkit flavour a space builds objects for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuilderFlavor {
    /// Every observable mutation notifies listeners.
    #[default]
    Default,
    /// Objects never notify, regardless of their notification gate.
    Silent,
}

/// What `add_atom` does with an atom that is already a member of the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateAtomPolicy {
    #[default]
    Ignore,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpaceConfig {
    pub flavor: BuilderFlavor,
    #[serde(default)]
    pub duplicate_atoms: DuplicateAtomPolicy,
    #[serde(default = "default_notification")]
    pub notification_default: bool,
}

fn default_notification() -> bool {
    true
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            flavor: BuilderFlavor::Default,
            duplicate_atoms: DuplicateAtomPolicy::Ignore,
            notification_default: true,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl SpaceConfig {
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigLoadError> {
        toml::from_str(content).map_err(|e| ConfigLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path.to_string_lossy())
    }
}

#[derive(Default)]
pub struct SpaceConfigBuilder {
    flavor: Option<BuilderFlavor>,
    duplicate_atoms: Option<DuplicateAtomPolicy>,
    notification_default: Option<bool>,
}

impl SpaceConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flavor(mut self, flavor: BuilderFlavor) -> Self {
        self.flavor = Some(flavor);
        self
    }
    pub fn duplicate_atoms(mut self, policy: DuplicateAtomPolicy) -> Self {
        self.duplicate_atoms = Some(policy);
        self
    }
    pub fn notification_default(mut self, enabled: bool) -> Self {
        self.notification_default = Some(enabled);
        self
    }

    pub fn build(self) -> Result<SpaceConfig, ConfigError> {
        Ok(SpaceConfig {
            flavor: self.flavor.ok_or(ConfigError::MissingParameter("flavor"))?,
            duplicate_atoms: self.duplicate_atoms.unwrap_or_default(),
            notification_default: self.notification_default.unwrap_or(true),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn builder_requires_flavor() {
        let result = SpaceConfigBuilder::new().build();
        assert_eq!(result, Err(ConfigError::MissingParameter("flavor")));
    }

    #[test]
    fn builder_fills_defaults() {
        let config = SpaceConfigBuilder::new()
            .flavor(BuilderFlavor::Silent)
            .build()
            .unwrap();
        assert_eq!(config.flavor, BuilderFlavor::Silent);
        assert_eq!(config.duplicate_atoms, DuplicateAtomPolicy::Ignore);
        assert!(config.notification_default);
    }

    #[test]
    fn builder_applies_every_setting() {
        let config = SpaceConfigBuilder::new()
            .flavor(BuilderFlavor::Default)
            .duplicate_atoms(DuplicateAtomPolicy::Reject)
            .notification_default(false)
            .build()
            .unwrap();
        assert_eq!(config.duplicate_atoms, DuplicateAtomPolicy::Reject);
        assert!(!config.notification_default);
    }

    #[test]
    fn from_toml_str_parses_all_fields() {
        let config = SpaceConfig::from_toml_str(
            r#"
            flavor = "silent"
            duplicate_atoms = "reject"
            notification_default = false
            "#,
            "inline",
        )
        .unwrap();
        assert_eq!(config.flavor, BuilderFlavor::Silent);
        assert_eq!(config.duplicate_atoms, DuplicateAtomPolicy::Reject);
        assert!(!config.notification_default);
    }

    #[test]
    fn from_toml_str_rejects_unknown_fields() {
        let result = SpaceConfig::from_toml_str("flavor = \"default\"\ncolour = \"blue\"", "inline");
        assert!(matches!(result, Err(ConfigLoadError::Toml { .. })));
    }

    #[test]
    fn load_reads_file_and_defaults_optional_fields() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("space.toml");
        fs::write(&path, "flavor = \"default\"").unwrap();
        let config = SpaceConfig::load(&path).unwrap();
        assert_eq!(config, SpaceConfig::default());
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = SpaceConfig::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigLoadError::Io { .. })));
    }
}
