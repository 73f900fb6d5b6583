//! Utility modules for kubeconfig

pub mod dryrun;
pub mod errors;
pub mod logger;
pub mod prereqs;
pub mod prompt;

// Re-export commonly used items
pub use logger::{init_logging, log_info, log_warn};
pub use prereqs::{CommonPrereqs, Prerequisite};
pub use prompt::confirm;
