//! The top-level object for viewing and changing a kubeconfig
//!
//! Every method maps onto one `kubectl config` subcommand. Changes take
//! effect immediately; kubectl does the reading, merging and writing.

use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::error::Result;
use crate::k8s::document::KubeConfigDocument;
use crate::k8s::kubectl::Kubectl;
use crate::k8s::options::{SetClusterOptions, SetContextOptions, SetCredentialsOptions, ViewOptions};

#[derive(Debug, Clone, Default)]
pub struct KubeConfig {
    kubectl: Kubectl,
}

impl KubeConfig {
    /// Work against `path`, or kubectl's default resolution when `None`
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            kubectl: Kubectl::default().kubeconfig(path),
        }
    }

    /// Use a preconfigured kubectl, keeping its kubeconfig selection
    pub fn with_kubectl(kubectl: Kubectl) -> Self {
        Self { kubectl }
    }

    /// Let kubectl merge these files (`KUBECONFIG`)
    pub fn with_search_path(mut self, paths: Vec<PathBuf>) -> Self {
        self.kubectl = self.kubectl.search_path(paths);
        self
    }

    /// Report mutations instead of running them
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.kubectl = self.kubectl.dry_run(dry_run);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.kubectl.kubeconfig_path()
    }

    pub fn kubectl(&self) -> &Kubectl {
        &self.kubectl
    }

    fn run_config(&self, args: &[&str]) -> Result<String> {
        self.kubectl.run(&config_args(args))
    }

    fn mutate_config(&self, args: &[&str]) -> Result<()> {
        self.kubectl.run_mutation(&config_args(args))
    }

    fn mutate_with_flags(&self, subcommand: &str, name: &str, flags: &[String]) -> Result<()> {
        let mut args = vec![subcommand, name];
        args.extend(flags.iter().map(String::as_str));
        self.mutate_config(&args)
    }

    /// The config's `current-context`, `None` if unset or empty
    pub fn current_context(&self) -> Result<Option<String>> {
        Ok(self.view()?.current_context().map(str::to_string))
    }

    /// Remove a cluster entry; unknown names are a kubectl error
    pub fn delete_cluster(&self, name: &str) -> Result<()> {
        self.mutate_config(&["delete-cluster", name])
    }

    /// Remove a context entry; unknown names are a kubectl error
    pub fn delete_context(&self, name: &str) -> Result<()> {
        self.mutate_config(&["delete-context", name])
    }

    pub fn delete_user(&self, name: &str) -> Result<()> {
        self.mutate_config(&["delete-user", name])
    }

    pub fn rename_context(&self, old_name: &str, new_name: &str) -> Result<()> {
        self.mutate_config(&["rename-context", old_name, new_name])
    }

    /// Set one value by its dot-delimited key, e.g. `contexts.dev.namespace`
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        self.mutate_config(&["set", name, value])
    }

    /// Create a cluster entry or update only the given fields of an existing one
    pub fn set_cluster(&self, name: &str, options: &SetClusterOptions) -> Result<()> {
        self.mutate_with_flags("set-cluster", name, &options.to_flags())
    }

    /// Create a context entry or update only the given fields of an existing one
    pub fn set_context(&self, name: &str, options: &SetContextOptions) -> Result<()> {
        self.mutate_with_flags("set-context", name, &options.to_flags())
    }

    /// Create a user entry or update only the given fields of an existing one
    pub fn set_credentials(&self, name: &str, options: &SetCredentialsOptions) -> Result<()> {
        self.mutate_with_flags("set-credentials", name, &options.to_flags())
    }

    /// Unset one value by its dot-delimited key
    pub fn unset(&self, name: &str) -> Result<()> {
        self.mutate_config(&["unset", name])
    }

    /// Change the default context; the context must exist
    pub fn use_context(&self, name: &str) -> Result<()> {
        self.mutate_config(&["use-context", name])
    }

    /// The full kubeconfig after merging, secrets included
    pub fn view(&self) -> Result<KubeConfigDocument> {
        self.view_with(&ViewOptions::default())
    }

    pub fn view_with(&self, options: &ViewOptions) -> Result<KubeConfigDocument> {
        let yaml = self.view_yaml(options)?;
        Ok(KubeConfigDocument::from_yaml(&yaml)?)
    }

    /// Like [`view`](Self::view) but untyped
    pub fn view_value(&self) -> Result<Value> {
        let yaml = self.view_yaml(&ViewOptions::default())?;
        Ok(serde_yaml::from_str(&yaml)?)
    }

    /// The YAML text kubectl printed
    pub fn view_yaml(&self, options: &ViewOptions) -> Result<String> {
        let flags = options.to_flags();
        let mut args = vec!["view"];
        args.extend(flags.iter().map(String::as_str));
        self.run_config(&args)
    }

    pub fn get_contexts(&self) -> Result<Vec<String>> {
        let out = self.run_config(&["get-contexts", "-o", "name"])?;
        Ok(name_lines(&out, false))
    }

    pub fn get_clusters(&self) -> Result<Vec<String>> {
        let out = self.run_config(&["get-clusters"])?;
        Ok(name_lines(&out, true))
    }

    pub fn get_users(&self) -> Result<Vec<String>> {
        let out = self.run_config(&["get-users"])?;
        Ok(name_lines(&out, true))
    }
}

fn config_args<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let mut full = Vec::with_capacity(args.len() + 1);
    full.push("config");
    full.extend_from_slice(args);
    full
}

/// One name per line, optionally dropping kubectl's `NAME` header
fn name_lines(out: &str, has_header: bool) -> Vec<String> {
    out.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .enumerate()
        .filter(|(i, l)| !(has_header && *i == 0 && *l == "NAME"))
        .map(|(_, l)| l.to_string())
        .collect()
}
