//! Kubectl discovery and invocation

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::error::{KubeConfigError, Result};
use crate::utils::dryrun;

/// Flags whose values never end up in logs
const SECRET_FLAGS: &[&str] = &["--password=", "--token="];

/// Flags carrying `key=value` pairs; the key stays visible
const SECRET_PAIR_FLAGS: &[&str] = &["--auth-provider-arg=", "--exec-env="];

/// Last segments of `config set` property names whose values are secret
const SECRET_PROPERTIES: &[&str] = &["token", "password", "client-key-data", "client-secret"];

/// How to launch kubectl and which kubeconfig it should work against
#[derive(Debug, Clone)]
pub struct Kubectl {
    program: String,
    leading_args: Vec<String>,
    kubeconfig: Option<PathBuf>,
    search_path: Vec<PathBuf>,
    dry_run: bool,
}

impl Default for Kubectl {
    fn default() -> Self {
        Self::new("kubectl")
    }
}

impl Kubectl {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            kubeconfig: None,
            search_path: Vec::new(),
            dry_run: false,
        }
    }

    /// Launch a different program; leading args belong to the old one and are dropped
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self.leading_args.clear();
        self
    }

    /// Arguments placed before everything else, e.g. `["kubectl", "--"]` for
    /// a `minikube` program
    pub fn leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Work against a specific kubeconfig file (`--kubeconfig`)
    pub fn kubeconfig(mut self, path: Option<PathBuf>) -> Self {
        self.kubeconfig = path.filter(|p| !p.as_os_str().is_empty());
        self
    }

    /// Files merged by kubectl through `KUBECONFIG`; ignored when a single
    /// kubeconfig file is set
    pub fn search_path(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_path = paths;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn kubeconfig_path(&self) -> Option<&Path> {
        self.kubeconfig.as_deref()
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Find the kubectl executable
    pub fn locate(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| KubeConfigError::KubectlNotFound {
            program: self.program.clone(),
        })
    }

    /// Full argv for an invocation, program first
    pub fn command_line(&self, args: &[&str]) -> Vec<String> {
        let mut line = Vec::with_capacity(1 + self.leading_args.len() + 2 + args.len());
        line.push(self.program.clone());
        line.extend(self.leading_args.iter().cloned());
        if let Some(kc) = &self.kubeconfig {
            line.push("--kubeconfig".to_string());
            line.push(kc.display().to_string());
        }
        line.extend(args.iter().map(|a| a.to_string()));
        line
    }

    /// Run kubectl and return its trimmed stdout
    ///
    /// A non-zero exit becomes [`KubeConfigError::KubectlCommand`] carrying
    /// everything kubectl printed.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let binary = self.locate()?;
        let shown = display_command(&self.command_line(args));
        tracing::debug!(command = %shown, "running kubectl");

        let output = self
            .build_command(&binary, args)?
            .output()
            .map_err(|source| KubeConfigError::Spawn {
                program: binary.clone(),
                source,
            })?;

        tracing::trace!(status = %output.status, "kubectl exited");

        if !output.status.success() {
            let message = combined_output(&output);
            tracing::debug!(command = %shown, %message, "kubectl command failed");
            return Err(KubeConfigError::KubectlCommand { message });
        }

        let stdout = String::from_utf8(output.stdout)?;
        Ok(stdout.trim().to_string())
    }

    /// Run a kubectl command that changes the kubeconfig
    ///
    /// In dry-run mode the command is only reported.
    pub fn run_mutation(&self, args: &[&str]) -> Result<()> {
        let shown = display_command(&self.command_line(args));
        dryrun::exec_unless_dry_run(self.dry_run, &shown, || {
            let out = self.run(args)?;
            if !out.is_empty() {
                tracing::debug!("{}", out);
            }
            Ok(())
        })
    }

    fn build_command(&self, binary: &Path, args: &[&str]) -> Result<Command> {
        let mut cmd = Command::new(binary);
        cmd.args(&self.leading_args);

        if let Some(kc) = &self.kubeconfig {
            cmd.arg("--kubeconfig").arg(kc);
        } else if !self.search_path.is_empty() {
            cmd.env("KUBECONFIG", env::join_paths(&self.search_path)?);
        }

        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        Ok(cmd)
    }
}

/// stdout followed by stderr, trimmed
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let parts: Vec<&str> = [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    parts.join("\n")
}

/// Shell-quoted command line with secret values masked
pub fn display_command(line: &[String]) -> String {
    let set_pos = line
        .windows(2)
        .position(|w| w[0] == "config" && w[1] == "set")
        .map(|pos| pos + 1);

    let masked = line.iter().enumerate().map(|(i, arg)| {
        // `config set <property> <value>`
        if let Some(pos) = set_pos
            && i == pos + 2
            && is_secret_property(&line[pos + 1])
        {
            return "***".to_string();
        }
        mask_flag(arg)
    });
    shell_words::join(masked)
}

fn mask_flag(arg: &str) -> String {
    if let Some(flag) = SECRET_FLAGS.iter().find(|flag| arg.starts_with(*flag)) {
        return format!("{}***", flag);
    }
    if let Some(flag) = SECRET_PAIR_FLAGS.iter().find(|flag| arg.starts_with(*flag)) {
        let pair = &arg[flag.len()..];
        let key = pair.split_once('=').map_or(pair, |(k, _)| k);
        return format!("{}{}=***", flag, key);
    }
    arg.to_string()
}

fn is_secret_property(property: &str) -> bool {
    property
        .rsplit('.')
        .next()
        .is_some_and(|last| SECRET_PROPERTIES.contains(&last))
}
