//! Configuration file support for kubeconfig

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::k8s::kubectl::Kubectl;

const LOCAL_CONFIG: &str = ".kubeconfig.toml";

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub kubectl: KubectlSettings,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub behavior: Behavior,
}

/// How to launch kubectl
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KubectlSettings {
    /// Program name or path
    #[serde(default = "default_program")]
    pub program: String,

    /// Arguments placed before every kubectl invocation,
    /// e.g. program = "minikube", leading_args = ["kubectl", "--"]
    #[serde(default)]
    pub leading_args: Vec<String>,
}

/// Which kubeconfig to work against when no flag is given
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Defaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<String>,

    /// Files kubectl should merge; ignored when `kubeconfig` is set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search_path: Vec<String>,
}

/// Behavior settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Behavior {
    #[serde(default = "default_true")]
    pub confirm_destructive: bool,
}

fn default_program() -> String {
    "kubectl".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for KubectlSettings {
    fn default() -> Self {
        Self {
            program: default_program(),
            leading_args: Vec::new(),
        }
    }
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            confirm_destructive: default_true(),
        }
    }
}

impl Settings {
    /// Load settings from file or return defaults
    pub fn load() -> Self {
        match Self::find_config_file() {
            Some(path) => Self::load_from_file(&path).unwrap_or_else(|e| {
                crate::log_warn!("Ignoring settings file: {:#}", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Find config file in standard locations
    /// Priority:
    /// 1. .kubeconfig.toml in current directory
    /// 2. ~/.config/kubeconfig/config.toml (XDG config directory)
    pub fn find_config_file() -> Option<PathBuf> {
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Some(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("kubeconfig").join("config.toml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    /// Save settings to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Build the kubectl launcher these settings describe
    pub fn kubectl(&self) -> Kubectl {
        let search_path = self.defaults.search_path.iter().map(PathBuf::from).collect();
        Kubectl::new(self.kubectl.program.clone())
            .leading_args(self.kubectl.leading_args.iter().cloned())
            .kubeconfig(self.defaults.kubeconfig.as_ref().map(PathBuf::from))
            .search_path(search_path)
    }

    /// Generate example config file content
    pub fn example_config() -> Result<String> {
        let header = "# kubeconfig settings file\n\
                      # Place this file at ~/.config/kubeconfig/config.toml or .kubeconfig.toml in your project\n\n";
        let body = toml::to_string_pretty(&Settings::default())
            .context("Failed to serialize settings")?;
        Ok(format!("{}{}", header, body))
    }
}
