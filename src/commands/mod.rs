//! Command implementations for the kubeconfig CLI

pub mod check;
pub mod entries;
pub mod settings;
pub mod view;

use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::k8s::kubeconfig::KubeConfig;

/// Global flags that shape every command
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub kubeconfig: Option<String>,
    pub kubectl: Option<String>,
    pub dry_run: bool,
    pub yes: bool,
}

/// Everything a command needs: the kubeconfig handle and prompt policy
#[derive(Debug, Clone)]
pub struct Session {
    pub config: KubeConfig,
    pub skip_confirm: bool,
}

impl Session {
    /// CLI flags win over the settings file
    pub fn new(settings: &Settings, opts: GlobalOptions) -> Self {
        let mut kubectl = settings.kubectl();
        if let Some(program) = opts.kubectl {
            kubectl = kubectl.with_program(program);
        }
        if let Some(path) = opts.kubeconfig {
            kubectl = kubectl.kubeconfig(Some(PathBuf::from(path)));
        }

        Self {
            config: KubeConfig::with_kubectl(kubectl).dry_run(opts.dry_run),
            skip_confirm: opts.yes || opts.dry_run || !settings.behavior.confirm_destructive,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.config.kubectl().is_dry_run()
    }

    /// Print a success line unless nothing was actually changed
    pub fn report(&self, message: impl AsRef<str>) {
        if !self.is_dry_run() {
            println!("{}", message.as_ref());
        }
    }
}
