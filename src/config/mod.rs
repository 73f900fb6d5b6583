//! Configuration for the kubeconfig CLI

pub mod settings;
