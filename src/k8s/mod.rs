//! kubectl-backed kubeconfig operations

pub mod document;
pub mod kubeconfig;
pub mod kubectl;
pub mod options;
