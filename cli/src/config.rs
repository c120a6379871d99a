//! Analysis profiles stored in `~/.featcov/config.yaml`.
//!
//! A profile is a named set of analysis defaults (thresholds, clustering
//! parameters). One profile can be marked current; command-line flags
//! override whatever the selected profile sets.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default configuration directory name under the home directory.
pub const DEFAULT_BASE_DIR: &str = ".featcov";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Name of the profile used when none is given.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_profile: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub profiles: BTreeMap<String, Profile>,

    #[serde(skip)]
    config_path: PathBuf,
}

/// Analysis defaults. Unset fields fall through to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Coverage threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Density clustering radius in cosine distance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_points: Option<usize>,

    /// Threshold used for graph clustering and consolidation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_threshold: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cluster_size: Option<usize>,

    /// `density` or `threshold`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl Config {
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR))
    }

    pub fn default_config_path() -> Option<PathBuf> {
        Self::default_config_dir().map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Adds or replaces a profile and saves.
    pub fn add_profile(&mut self, name: &str, mut profile: Profile) -> anyhow::Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("profile name cannot be empty");
        }
        profile.name = name.to_string();
        self.profiles.insert(name.to_string(), profile);
        self.save()
    }

    pub fn delete_profile(&mut self, name: &str) -> anyhow::Result<()> {
        if self.profiles.remove(name).is_none() {
            anyhow::bail!("profile '{}' not found", name);
        }
        if self.current_profile == name {
            self.current_profile.clear();
        }
        self.save()
    }

    pub fn use_profile(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.profiles.contains_key(name) {
            anyhow::bail!("profile '{}' not found", name);
        }
        self.current_profile = name.to_string();
        self.save()
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn get_current_profile(&self) -> Option<&Profile> {
        if self.current_profile.is_empty() {
            return None;
        }
        self.profiles.get(&self.current_profile)
    }

    /// Looks up `name`, or the current profile when no name is given.
    ///
    /// Naming a profile that does not exist is an error; having no current
    /// profile is not.
    pub fn resolve_profile(&self, name: Option<&str>) -> anyhow::Result<Option<&Profile>> {
        match name {
            Some(n) if !n.is_empty() => match self.get_profile(n) {
                Some(p) => Ok(Some(p)),
                None => anyhow::bail!("profile '{}' not found", n),
            },
            _ => Ok(self.get_current_profile()),
        }
    }

    /// Profile names in sorted order.
    pub fn list_profiles(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }
}

/// Loads the configuration, creating an empty file on first use.
pub fn load_config(custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => Config::default_config_path()
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path"))?,
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg: Config = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&content)?
        }
    } else {
        let cfg = Config::default();
        std::fs::write(&config_path, serde_yaml::to_string(&cfg)?)?;
        cfg
    };

    cfg.config_path = config_path;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_config() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let cfg = load_config(path.to_str()).unwrap();
        (dir, cfg)
    }

    #[test]
    fn load_creates_file() {
        let (_dir, cfg) = temp_config();
        assert!(cfg.path().exists());
        assert!(cfg.profiles.is_empty());
        assert!(cfg.get_current_profile().is_none());
    }

    #[test]
    fn profiles_round_trip() {
        let (_dir, mut cfg) = temp_config();
        let strict = Profile {
            threshold: Some(0.9),
            min_points: Some(3),
            ..Default::default()
        };
        cfg.add_profile("strict", strict).unwrap();
        cfg.add_profile("loose", Profile {
            threshold: Some(0.7),
            ..Default::default()
        })
        .unwrap();
        cfg.use_profile("strict").unwrap();

        let reloaded = load_config(cfg.path().to_str()).unwrap();
        assert_eq!(reloaded.current_profile, "strict");
        assert_eq!(reloaded.list_profiles(), vec!["loose", "strict"]);

        let p = reloaded.get_current_profile().unwrap();
        assert_eq!(p.name, "strict");
        assert_eq!(p.threshold, Some(0.9));
        assert_eq!(p.min_points, Some(3));
        assert_eq!(p.epsilon, None);
    }

    #[test]
    fn saved_profile_lists_only_set_fields() {
        let (_dir, mut cfg) = temp_config();
        cfg.add_profile("strict", Profile {
            threshold: Some(0.9),
            strategy: Some("threshold".into()),
            ..Default::default()
        })
        .unwrap();

        let text = std::fs::read_to_string(cfg.path()).unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        let profile = doc["profiles"]["strict"].as_mapping().unwrap();
        let mut keys: Vec<&str> = profile.keys().filter_map(|k| k.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["name", "strategy", "threshold"]);
    }

    #[test]
    fn delete_current_profile_clears_selection() {
        let (_dir, mut cfg) = temp_config();
        cfg.add_profile("a", Profile::default()).unwrap();
        cfg.use_profile("a").unwrap();
        cfg.delete_profile("a").unwrap();

        assert!(cfg.current_profile.is_empty());
        assert!(cfg.delete_profile("a").is_err());
    }

    #[test]
    fn unknown_profiles_are_errors() {
        let (_dir, mut cfg) = temp_config();
        assert!(cfg.use_profile("missing").is_err());
        assert!(cfg.resolve_profile(Some("missing")).is_err());
        assert!(cfg.resolve_profile(None).unwrap().is_none());
        assert!(cfg.add_profile(" ", Profile::default()).is_err());
    }

    #[test]
    fn resolve_prefers_named_profile() {
        let (_dir, mut cfg) = temp_config();
        cfg.add_profile("a", Profile::default()).unwrap();
        cfg.add_profile("b", Profile::default()).unwrap();
        cfg.use_profile("a").unwrap();

        assert_eq!(cfg.resolve_profile(Some("b")).unwrap().unwrap().name, "b");
        assert_eq!(cfg.resolve_profile(Some("")).unwrap().unwrap().name, "a");
    }
}
