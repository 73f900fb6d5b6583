//! Prerequisite and environment check

use anyhow::{Result, anyhow};
use colored::Colorize;
use std::env;
use std::path::PathBuf;

use super::Session;
use crate::utils::{CommonPrereqs, Prerequisite};

/// Where kubectl will read its configuration from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KubeconfigSource {
    Flag(PathBuf),
    Env(String),
    Default(Option<PathBuf>),
}

impl std::fmt::Display for KubeconfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KubeconfigSource::Flag(path) => write!(f, "{} (--kubeconfig)", path.display()),
            KubeconfigSource::Env(value) => write!(f, "{} (KUBECONFIG)", value),
            KubeconfigSource::Default(Some(path)) => write!(f, "{} (default)", path.display()),
            KubeconfigSource::Default(None) => write!(f, "kubectl default"),
        }
    }
}

/// Resolve the kubeconfig source for a session
pub fn kubeconfig_source(session: &Session, env_value: Option<String>) -> KubeconfigSource {
    if let Some(path) = session.config.path() {
        return KubeconfigSource::Flag(path.to_path_buf());
    }
    match env_value.filter(|v| !v.is_empty()) {
        Some(value) => KubeconfigSource::Env(value),
        None => KubeconfigSource::Default(dirs::home_dir().map(|h| h.join(".kube").join("config"))),
    }
}

/// Handle check command
pub fn check(session: &Session) -> Result<()> {
    crate::log_info!("Checking prerequisites...");

    let kubectl = CommonPrereqs::kubectl(session.config.kubectl().program());
    let prereqs: Vec<&dyn Prerequisite> = vec![&kubectl];
    let report = CommonPrereqs::check_all(&prereqs);

    for (name, path) in &report.found {
        println!("  {} {} ({})", "✓".green(), name, path.display());
    }
    for (name, hint) in &report.missing {
        println!("  {} {} - {}", "✗".red(), name, hint);
    }

    if !report.is_satisfied() {
        return Err(anyhow!("Missing {} prerequisite(s)", report.missing.len()));
    }

    let version = session.config.kubectl().run(&["version", "--client"])?;
    for line in version.lines() {
        println!("    {}", line);
    }

    println!(
        "  Kubeconfig: {}",
        kubeconfig_source(session, env::var("KUBECONFIG").ok())
    );
    crate::log_info!("All prerequisites satisfied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::kubeconfig::KubeConfig;

    fn session(path: Option<&str>) -> Session {
        Session {
            config: KubeConfig::new(path.map(PathBuf::from)),
            skip_confirm: true,
        }
    }

    #[test]
    fn test_flag_wins() {
        let source = kubeconfig_source(&session(Some("a.config")), Some("b".to_string()));
        assert_eq!(source, KubeconfigSource::Flag(PathBuf::from("a.config")));
    }

    #[test]
    fn test_env_then_default() {
        let source = kubeconfig_source(&session(None), Some("/x:/y".to_string()));
        assert_eq!(source.to_string(), "/x:/y (KUBECONFIG)");

        let source = kubeconfig_source(&session(None), Some(String::new()));
        assert!(matches!(source, KubeconfigSource::Default(_)));
    }

    #[test]
    fn test_check_fails_without_kubectl() {
        let s = Session {
            config: KubeConfig::with_kubectl(crate::Kubectl::new("kubectl-nonexistent-xyz")),
            skip_confirm: true,
        };
        assert!(check(&s).is_err());
    }
}
