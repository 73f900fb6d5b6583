//! Structured form of `kubectl config view` output
//!
//! kubectl owns the format; these types only read it back. Keys this model
//! does not know about are kept in the `extra` maps.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// kubectl prints `clusters: null` for an empty config
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The full, merged kubeconfig as kubectl reports it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubeConfigDocument {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<NamedCluster>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub contexts: Vec<NamedContext>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<NamedUser>,

    #[serde(rename = "current-context", default, skip_serializing_if = "Option::is_none")]
    pub current_context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedCluster {
    pub name: String,
    #[serde(default)]
    pub cluster: Cluster,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Cluster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate_authority_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure_skip_tls_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_server_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedContext {
    pub name: String,
    #[serde(default)]
    pub context: Context,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamedUser {
    pub name: String,
    #[serde(default)]
    pub user: User,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_certificate_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_key_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_provider: Option<AuthProvider>,
    /// Credential plugin settings, executed by kubectl only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<Value>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthProvider {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: BTreeMap<String, String>,
}

impl KubeConfigDocument {
    /// Parse kubectl's YAML; empty output is an empty document
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// The selected context, `None` when missing or empty
    pub fn current_context(&self) -> Option<&str> {
        self.current_context.as_deref().filter(|c| !c.is_empty())
    }

    pub fn cluster(&self, name: &str) -> Option<&Cluster> {
        self.clusters
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.cluster)
    }

    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.context)
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name).map(|u| &u.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_path;

    fn sample(name: &str) -> KubeConfigDocument {
        let yaml = std::fs::read_to_string(sample_path(name)).unwrap();
        KubeConfigDocument::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn test_parse_simple_complete() {
        let doc = sample("simple-complete.config");
        assert_eq!(doc.api_version.as_deref(), Some("v1"));
        assert_eq!(doc.clusters[0].name, "test-cluster");
        assert_eq!(doc.contexts[0].name, "test-context");
        assert_eq!(doc.users[0].name, "test-user");
        assert_eq!(doc.current_context(), Some("test-context"));

        let cluster = doc.cluster("test-cluster").unwrap();
        assert_eq!(cluster.server.as_deref(), Some("https://192.168.1.100"));
        assert_eq!(cluster.certificate_authority_data.as_deref(), Some("REDACTED"));

        let context = doc.context("test-context").unwrap();
        assert_eq!(context.namespace.as_deref(), Some("default"));

        let provider = doc.user("test-user").unwrap().auth_provider.as_ref().unwrap();
        assert_eq!(provider.name, "gcp");
        assert_eq!(provider.config["cmd-path"], "/usr/bin/gcloud");
    }

    #[test]
    fn test_minimal_has_no_current_context() {
        let doc = sample("minimal.config");
        assert!(doc.clusters.is_empty());
        assert_eq!(doc.current_context(), None);
    }

    #[test]
    fn test_null_lists_and_empty_current_context() {
        let yaml = "apiVersion: v1\nclusters: null\ncontexts: null\ncurrent-context: \"\"\nkind: Config\npreferences: {}\nusers: null\n";
        let doc = KubeConfigDocument::from_yaml(yaml).unwrap();
        assert!(doc.clusters.is_empty());
        assert!(doc.users.is_empty());
        assert_eq!(doc.current_context.as_deref(), Some(""));
        assert_eq!(doc.current_context(), None);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let yaml = "apiVersion: v1\nkind: Config\nextensions:\n- name: foo\nclusters:\n- name: c\n  cluster:\n    server: https://x\n    disable-compression: true\n";
        let doc = KubeConfigDocument::from_yaml(yaml).unwrap();
        assert!(doc.extra.contains_key("extensions"));
        let cluster = doc.cluster("c").unwrap();
        assert_eq!(cluster.extra.get("disable-compression"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_empty_output_is_empty_document() {
        let doc = KubeConfigDocument::from_yaml("  \n").unwrap();
        assert_eq!(doc, KubeConfigDocument::default());
    }
}
