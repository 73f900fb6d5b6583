//! Prerequisite checking for the tools kubeconfig shells out to

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrereqError {
    #[error("Tool '{name}' not found")]
    NotFound { name: String, hint: String },
}

/// Trait for checking prerequisites
pub trait Prerequisite {
    /// Name of the prerequisite tool
    fn name(&self) -> &str;

    /// Locate the tool
    fn check(&self) -> Result<PathBuf, PrereqError>;

    /// Installation hint for the user
    fn install_hint(&self) -> &str;
}

/// Basic prerequisite that checks if a command exists
pub struct CommandPrereq {
    pub name: String,
    pub hint: String,
}

impl CommandPrereq {
    pub fn new(name: impl Into<String>, hint: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hint: hint.into(),
        }
    }
}

impl Prerequisite for CommandPrereq {
    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> Result<PathBuf, PrereqError> {
        which::which(&self.name).map_err(|_| PrereqError::NotFound {
            name: self.name.clone(),
            hint: self.hint.clone(),
        })
    }

    fn install_hint(&self) -> &str {
        &self.hint
    }
}

/// Result of checking a set of prerequisites
#[derive(Debug, Default)]
pub struct PrereqReport {
    pub found: Vec<(String, PathBuf)>,
    pub missing: Vec<(String, String)>,
}

impl PrereqReport {
    pub fn is_satisfied(&self) -> bool {
        self.missing.is_empty()
    }
}

pub const KUBECTL_INSTALL_HINT: &str = "Install from: https://kubernetes.io/docs/tasks/tools/";

/// Common prerequisites for kubeconfig
pub struct CommonPrereqs;

impl CommonPrereqs {
    /// The configured kubectl program (usually `kubectl`)
    pub fn kubectl(program: &str) -> CommandPrereq {
        CommandPrereq::new(program, KUBECTL_INSTALL_HINT)
    }

    /// Check all prerequisites
    pub fn check_all(prereqs: &[&dyn Prerequisite]) -> PrereqReport {
        let mut report = PrereqReport::default();

        for prereq in prereqs {
            match prereq.check() {
                Ok(path) => report.found.push((prereq.name().to_string(), path)),
                Err(PrereqError::NotFound { name, hint }) => report.missing.push((name, hint)),
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prereq_trait() {
        let prereq = CommandPrereq::new("sh", "Should always exist");
        assert_eq!(prereq.name(), "sh");
        assert!(prereq.check().is_ok());
    }

    #[test]
    fn test_missing_prereq() {
        let prereq = CommandPrereq::new("nonexistent-tool-xyz", "Test hint");
        assert!(prereq.check().is_err());
    }

    #[test]
    fn test_check_all_splits_found_and_missing() {
        let present = CommandPrereq::new("sh", "n/a");
        let absent = CommonPrereqs::kubectl("kubectl-nonexistent-xyz");
        let report = CommonPrereqs::check_all(&[&present, &absent]);
        assert_eq!(report.found.len(), 1);
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].1, KUBECTL_INSTALL_HINT);
        assert!(!report.is_satisfied());
    }
}
