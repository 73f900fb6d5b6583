//! User-facing errors with actionable suggestions

use colored::Colorize;
use thiserror::Error;

use crate::error::KubeConfigError;
use crate::utils::prereqs::KUBECTL_INSTALL_HINT;

/// Error message plus what the user can do about it
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CliError {
    pub message: String,
    pub suggestions: Vec<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Add a suggestion to the error
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Display the error with suggestions
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.message);

        if !self.suggestions.is_empty() {
            eprintln!();
            eprintln!("{}", "Suggestions:".yellow().bold());
            for suggestion in &self.suggestions {
                eprintln!("  {} {}", "→".blue(), suggestion);
            }
        }
    }

    pub fn kubectl_not_found(program: &str) -> Self {
        Self::new(format!("Could not find {} on the path", program))
            .suggest(KUBECTL_INSTALL_HINT)
            .suggest("Ensure the tool is in your PATH")
            .suggest("Or point at it with --kubectl <path> or [kubectl] program in the settings file")
    }

    pub fn context_not_found(message: &str) -> Self {
        Self::new(message)
            .suggest("List contexts with: kubeconfig get-contexts")
            .suggest("Check which file is in use with --kubeconfig or KUBECONFIG")
    }

    pub fn invalid_property(message: &str) -> Self {
        Self::new(message)
            .suggest("Property names are dot-delimited, e.g. contexts.my-context.namespace")
            .suggest("Inspect the current layout with: kubeconfig view")
    }
}

/// Helper to display error and exit
pub fn display_error_and_exit(error: CliError) -> ! {
    error.display();
    std::process::exit(1);
}

/// Convert an error from a command into a CliError with suggestions
pub fn enhance_error(err: anyhow::Error) -> CliError {
    if let Some(kc_err) = err.downcast_ref::<KubeConfigError>() {
        match kc_err {
            KubeConfigError::KubectlNotFound { program } => {
                return CliError::kubectl_not_found(program);
            }
            KubeConfigError::KubectlCommand { message } => {
                if message.contains("no context exists") || message.contains("cannot rename the context") {
                    return CliError::context_not_found(message);
                }
                if message.contains("can't set") || message.contains("current map key") || message.contains("no such property") {
                    return CliError::invalid_property(message);
                }
                return CliError::new(message.clone())
                    .suggest("Run with -vv to see the kubectl command line");
            }
            _ => {}
        }
    }

    // Default error with generic suggestion
    CliError::new(format!("{:#}", err)).suggest("Run with --verbose for more details")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_suggestions() {
        let err = CliError::new("test")
            .suggest("suggestion 1")
            .suggest("suggestion 2");
        assert_eq!(err.suggestions.len(), 2);
    }

    #[test]
    fn test_enhance_not_found() {
        let err = anyhow::Error::new(KubeConfigError::KubectlNotFound {
            program: "kubectl".to_string(),
        });
        let cli = enhance_error(err);
        assert!(cli.message.contains("kubectl"));
        assert!(cli.suggestions.iter().any(|s| s.contains("kubernetes.io")));
    }

    #[test]
    fn test_enhance_missing_context() {
        let err = anyhow::Error::new(KubeConfigError::KubectlCommand {
            message: "error: no context exists with the name: \"invalid\"".to_string(),
        });
        let cli = enhance_error(err);
        assert!(cli.message.contains("invalid"));
        assert!(cli.suggestions[0].contains("get-contexts"));
    }

    #[test]
    fn test_enhance_keeps_context_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        let cli = enhance_error(err);
        assert_eq!(cli.message, "outer: inner");
    }
}
