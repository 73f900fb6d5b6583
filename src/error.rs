//! Errors surfaced by the kubectl wrapper

use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Top-level error for everything the library does
#[derive(Error, Debug)]
pub enum KubeConfigError {
    /// The kubectl executable could not be found
    #[error("Could not find {program} on the path.")]
    KubectlNotFound { program: String },

    /// kubectl was found but the OS refused to start it
    #[error("Failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// kubectl exited non-zero; `message` is its combined stdout and stderr
    #[error("{message}")]
    KubectlCommand { message: String },

    /// The search path could not be joined into a KUBECONFIG value
    #[error("Invalid kubeconfig search path: {0}")]
    SearchPath(#[from] std::env::JoinPathsError),

    #[error("kubectl produced output that is not UTF-8: {0}")]
    Output(#[from] FromUtf8Error),

    #[error("Failed to parse kubectl config output: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl KubeConfigError {
    /// True when kubectl itself rejected the command
    pub fn is_command_error(&self) -> bool {
        matches!(self, KubeConfigError::KubectlCommand { .. })
    }
}

pub type Result<T> = std::result::Result<T, KubeConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = KubeConfigError::KubectlNotFound {
            program: "kubectl".to_string(),
        };
        assert_eq!(err.to_string(), "Could not find kubectl on the path.");
        assert!(!err.is_command_error());
    }

    #[test]
    fn test_command_error_keeps_output() {
        let err = KubeConfigError::KubectlCommand {
            message: "error: no context exists with the name: \"invalid\"".to_string(),
        };
        assert!(err.is_command_error());
        assert!(err.to_string().contains("no context exists"));
    }
}
