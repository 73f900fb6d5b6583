//! Commands that change the kubeconfig

use anyhow::{Result, anyhow};
use std::collections::BTreeMap;

use super::Session;
use crate::k8s::options::{SetClusterOptions, SetContextOptions, SetCredentialsOptions};
use crate::utils::prompt;

/// Handle use-context command
pub fn use_context(session: &Session, name: &str) -> Result<()> {
    session.config.use_context(name)?;
    session.report(format!("Switched to context \"{}\".", name));
    Ok(())
}

/// Handle rename-context command
pub fn rename_context(session: &Session, old_name: &str, new_name: &str) -> Result<()> {
    session.config.rename_context(old_name, new_name)?;
    session.report(format!("Context \"{}\" renamed to \"{}\".", old_name, new_name));
    Ok(())
}

/// Handle set command
pub fn set(session: &Session, name: &str, value: &str) -> Result<()> {
    session.config.set(name, value)?;
    session.report(format!("Property \"{}\" set.", name));
    Ok(())
}

/// Handle unset command
pub fn unset(session: &Session, name: &str) -> Result<()> {
    session.config.unset(name)?;
    session.report(format!("Property \"{}\" unset.", name));
    Ok(())
}

/// Handle set-cluster command
pub fn set_cluster(session: &Session, name: &str, options: &SetClusterOptions) -> Result<()> {
    session.config.set_cluster(name, options)?;
    session.report(format!("Cluster \"{}\" set.", name));
    Ok(())
}

/// Handle set-context command
pub fn set_context(session: &Session, name: &str, options: &SetContextOptions) -> Result<()> {
    session.config.set_context(name, options)?;
    session.report(format!("Context \"{}\" modified.", name));
    Ok(())
}

/// Handle set-credentials command
pub fn set_credentials(session: &Session, name: &str, options: &SetCredentialsOptions) -> Result<()> {
    session.config.set_credentials(name, options)?;
    session.report(format!("User \"{}\" set.", name));
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Cluster,
    Context,
    User,
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entry::Cluster => write!(f, "cluster"),
            Entry::Context => write!(f, "context"),
            Entry::User => write!(f, "user"),
        }
    }
}

/// Handle delete-cluster, delete-context and delete-user commands
pub fn delete(session: &Session, entry: Entry, name: &str) -> Result<()> {
    let prompt_text = format!("Are you sure you want to delete {} '{}'?", entry, name);
    if !prompt::confirm_destructive(&prompt_text, session.skip_confirm)? {
        crate::log_info!("Deletion cancelled");
        return Ok(());
    }

    match entry {
        Entry::Cluster => session.config.delete_cluster(name)?,
        Entry::Context => session.config.delete_context(name)?,
        Entry::User => session.config.delete_user(name)?,
    }

    session.report(format!("Deleted {} {}", entry, name));
    Ok(())
}

/// Parse repeated `key=value` arguments
pub fn parse_key_values(pairs: &[String]) -> Result<Option<BTreeMap<String, String>>> {
    if pairs.is_empty() {
        return Ok(None);
    }

    let mut map = BTreeMap::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected key=value, got '{}'", pair))?;
        if key.is_empty() {
            return Err(anyhow!("Empty key in '{}'", pair));
        }
        map.insert(key.to_string(), value.to_string());
    }
    Ok(Some(map))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::GlobalOptions;
    use crate::config::settings::Settings;
    use crate::k8s::kubeconfig::KubeConfig;
    use crate::test_support::FakeKubectl;

    fn session(fake: &FakeKubectl, skip_confirm: bool) -> Session {
        Session {
            config: KubeConfig::with_kubectl(fake.kubectl()),
            skip_confirm,
        }
    }

    #[test]
    fn test_parse_key_values() {
        let pairs = vec!["token-key=a=b".to_string(), "expiry-key=".to_string()];
        let map = parse_key_values(&pairs).unwrap().unwrap();
        assert_eq!(map["token-key"], "a=b");
        assert_eq!(map["expiry-key"], "");

        assert!(parse_key_values(&[]).unwrap().is_none());
        assert!(parse_key_values(&["novalue".to_string()]).is_err());
        assert!(parse_key_values(&["=x".to_string()]).is_err());
    }

    #[test]
    fn test_delete_with_confirmation_skipped() {
        let fake = FakeKubectl::new("");
        delete(&session(&fake, true), Entry::Context, "dev").unwrap();
        assert_eq!(fake.last_config_args(), vec!["delete-context", "dev"]);
    }

    #[test]
    fn test_dry_run_session_runs_nothing() {
        let fake = FakeKubectl::new("exit 1");
        let mut s = Session::new(&Settings::default(), GlobalOptions { dry_run: true, ..Default::default() });
        s.config = KubeConfig::with_kubectl(fake.kubectl()).dry_run(true);

        delete(&s, Entry::Cluster, "prod").unwrap();
        use_context(&s, "prod").unwrap();
        assert!(fake.invocations().is_empty());
    }

    #[test]
    fn test_kubectl_error_propagates() {
        let fake = FakeKubectl::new("echo 'error: current-context is not set' >&2\nexit 1");
        let err = set(&session(&fake, true), "invalid", "blah").unwrap_err();
        assert!(err.to_string().contains("current-context"));
    }
}
