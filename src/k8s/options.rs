//! Optional flags for the `kubectl config set-*` and `view` subcommands
//!
//! Only fields that are set turn into flags, so updating an existing entry
//! touches nothing else on it.

use std::collections::BTreeMap;

fn flag(name: &str, value: impl std::fmt::Display) -> String {
    format!("--{}={}", name, value)
}

fn push_opt<T: std::fmt::Display>(flags: &mut Vec<String>, name: &str, value: &Option<T>) {
    if let Some(v) = value {
        flags.push(flag(name, v));
    }
}

/// Options for `kubectl config set-cluster`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetClusterOptions {
    /// Path to a CA file for verifying the API server's certificate
    pub certificate_authority: Option<String>,
    /// Embed the CA file's contents instead of referencing its path
    pub embed_certs: Option<bool>,
    pub insecure_skip_tls_verify: Option<bool>,
    /// Full URI of the API server
    pub server: Option<String>,
    pub tls_server_name: Option<String>,
    pub proxy_url: Option<String>,
}

impl SetClusterOptions {
    pub fn certificate_authority(mut self, path: impl Into<String>) -> Self {
        self.certificate_authority = Some(path.into());
        self
    }

    pub fn embed_certs(mut self, embed: bool) -> Self {
        self.embed_certs = Some(embed);
        self
    }

    pub fn insecure_skip_tls_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_tls_verify = Some(skip);
        self
    }

    pub fn server(mut self, server: impl Into<String>) -> Self {
        self.server = Some(server.into());
        self
    }

    pub fn tls_server_name(mut self, name: impl Into<String>) -> Self {
        self.tls_server_name = Some(name.into());
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        push_opt(&mut flags, "certificate-authority", &self.certificate_authority);
        push_opt(&mut flags, "embed-certs", &self.embed_certs);
        push_opt(
            &mut flags,
            "insecure-skip-tls-verify",
            &self.insecure_skip_tls_verify,
        );
        push_opt(&mut flags, "server", &self.server);
        push_opt(&mut flags, "tls-server-name", &self.tls_server_name);
        push_opt(&mut flags, "proxy-url", &self.proxy_url);
        flags
    }
}

/// Options for `kubectl config set-context`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetContextOptions {
    pub cluster: Option<String>,
    /// Default namespace for the context
    pub namespace: Option<String>,
    pub user: Option<String>,
}

impl SetContextOptions {
    pub fn cluster(mut self, cluster: impl Into<String>) -> Self {
        self.cluster = Some(cluster.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        push_opt(&mut flags, "cluster", &self.cluster);
        push_opt(&mut flags, "namespace", &self.namespace);
        push_opt(&mut flags, "user", &self.user);
        flags
    }
}

/// Options for `kubectl config set-credentials`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetCredentialsOptions {
    /// Auth provider name, e.g. `oidc` or `gcp`
    pub auth_provider: Option<String>,
    /// Extra provider settings, one `--auth-provider-arg` each
    pub auth_provider_args: Option<BTreeMap<String, String>>,
    /// Path to an X.509 client certificate
    pub client_certificate: Option<String>,
    /// Path to the client certificate's private key
    pub client_key: Option<String>,
    /// Embed the client certificate's contents instead of its path
    pub embed_certs: Option<bool>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub username: Option<String>,
    /// Credential plugin command
    pub exec_command: Option<String>,
    pub exec_api_version: Option<String>,
    pub exec_args: Option<Vec<String>>,
    pub exec_env: Option<BTreeMap<String, String>>,
}

impl SetCredentialsOptions {
    pub fn auth_provider(mut self, provider: impl Into<String>) -> Self {
        self.auth_provider = Some(provider.into());
        self
    }

    /// Add one auth provider setting
    pub fn auth_provider_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.auth_provider_args
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn client_certificate(mut self, path: impl Into<String>) -> Self {
        self.client_certificate = Some(path.into());
        self
    }

    pub fn client_key(mut self, path: impl Into<String>) -> Self {
        self.client_key = Some(path.into());
        self
    }

    pub fn embed_certs(mut self, embed: bool) -> Self {
        self.embed_certs = Some(embed);
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn exec_command(mut self, command: impl Into<String>) -> Self {
        self.exec_command = Some(command.into());
        self
    }

    pub fn exec_api_version(mut self, version: impl Into<String>) -> Self {
        self.exec_api_version = Some(version.into());
        self
    }

    pub fn exec_arg(mut self, arg: impl Into<String>) -> Self {
        self.exec_args.get_or_insert_with(Vec::new).push(arg.into());
        self
    }

    pub fn exec_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.exec_env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        push_opt(&mut flags, "auth-provider", &self.auth_provider);
        if let Some(args) = &self.auth_provider_args {
            for (k, v) in args {
                flags.push(flag("auth-provider-arg", format!("{}={}", k, v)));
            }
        }
        push_opt(&mut flags, "client-certificate", &self.client_certificate);
        push_opt(&mut flags, "client-key", &self.client_key);
        push_opt(&mut flags, "embed-certs", &self.embed_certs);
        push_opt(&mut flags, "password", &self.password);
        push_opt(&mut flags, "token", &self.token);
        push_opt(&mut flags, "username", &self.username);
        push_opt(&mut flags, "exec-command", &self.exec_command);
        push_opt(&mut flags, "exec-api-version", &self.exec_api_version);
        if let Some(args) = &self.exec_args {
            for arg in args {
                flags.push(flag("exec-arg", arg));
            }
        }
        if let Some(env) = &self.exec_env {
            for (k, v) in env {
                flags.push(flag("exec-env", format!("{}={}", k, v)));
            }
        }
        flags
    }
}

/// Options for `kubectl config view`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Show secrets instead of `REDACTED`/`DATA+OMITTED`
    pub raw: bool,
    /// Only what the current context uses
    pub minify: bool,
    /// Inline referenced certificate files
    pub flatten: bool,
    pub merge: Option<bool>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            raw: true,
            minify: false,
            flatten: false,
            merge: None,
        }
    }
}

impl ViewOptions {
    pub fn raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = Some(merge);
        self
    }

    pub fn to_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if self.raw {
            flags.push("--raw".to_string());
        }
        if self.minify {
            flags.push("--minify".to_string());
        }
        if self.flatten {
            flags.push("--flatten".to_string());
        }
        push_opt(&mut flags, "merge", &self.merge);
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_produce_no_flags() {
        assert!(SetClusterOptions::default().to_flags().is_empty());
        assert!(SetContextOptions::default().to_flags().is_empty());
        assert!(SetCredentialsOptions::default().to_flags().is_empty());
    }

    #[test]
    fn test_cluster_flags_in_order() {
        let opts = SetClusterOptions::default()
            .server("https://yarr")
            .embed_certs(false)
            .certificate_authority("/etc/ca.crt")
            .insecure_skip_tls_verify(true);
        assert_eq!(
            opts.to_flags(),
            vec![
                "--certificate-authority=/etc/ca.crt",
                "--embed-certs=false",
                "--insecure-skip-tls-verify=true",
                "--server=https://yarr",
            ]
        );
    }

    #[test]
    fn test_context_flags() {
        let opts = SetContextOptions::default()
            .user("admin")
            .cluster("new-cluster");
        assert_eq!(opts.to_flags(), vec!["--cluster=new-cluster", "--user=admin"]);
    }

    #[test]
    fn test_credentials_provider_args_each_get_a_flag() {
        let opts = SetCredentialsOptions::default()
            .auth_provider("oidc")
            .auth_provider_arg("token-key", "test")
            .auth_provider_arg("expiry-key", "test");
        assert_eq!(
            opts.to_flags(),
            vec![
                "--auth-provider=oidc",
                "--auth-provider-arg=expiry-key=test",
                "--auth-provider-arg=token-key=test",
            ]
        );
    }

    #[test]
    fn test_credentials_exec_flags() {
        let opts = SetCredentialsOptions::default()
            .exec_command("aws")
            .exec_arg("eks")
            .exec_arg("get-token")
            .exec_env("AWS_PROFILE", "prod")
            .embed_certs(true);
        assert_eq!(
            opts.to_flags(),
            vec![
                "--embed-certs=true",
                "--exec-command=aws",
                "--exec-arg=eks",
                "--exec-arg=get-token",
                "--exec-env=AWS_PROFILE=prod",
            ]
        );
    }

    #[test]
    fn test_view_flags() {
        assert_eq!(ViewOptions::default().to_flags(), vec!["--raw"]);
        let opts = ViewOptions::default().raw(false).minify(true).merge(false);
        assert_eq!(opts.to_flags(), vec!["--minify", "--merge=false"]);
    }
}
