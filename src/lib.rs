//! View or manipulate your kubeconfig through `kubectl config`.
//!
//! ```no_run
//! use kubeconfig::KubeConfig;
//!
//! // Use kubectl's default kubeconfig resolution.
//! let conf = KubeConfig::new(None);
//! // The full, merged contents of the effective kubeconfig.
//! println!("{:?}", conf.view()?);
//! // Change the default context.
//! conf.use_context("another-context")?;
//! # Ok::<(), kubeconfig::KubeConfigError>(())
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod k8s;
pub mod utils;

pub use error::{KubeConfigError, Result};
pub use k8s::document::KubeConfigDocument;
pub use k8s::kubeconfig::KubeConfig;
pub use k8s::kubectl::Kubectl;
pub use k8s::options::{SetClusterOptions, SetContextOptions, SetCredentialsOptions, ViewOptions};

#[cfg(test)]
pub(crate) mod test_support;
