//! Dry-run mode utilities

use colored::Colorize;

/// Print a command that would have changed the kubeconfig
pub fn log_action(action: &str) {
    tracing::info!(action, "dry run");
    println!("  {} {}", "[DRY RUN]".cyan().bold(), action);
}

/// Run `f` unless `dry_run` is set, in which case only `action_desc` is reported
pub fn exec_unless_dry_run<F, E>(dry_run: bool, action_desc: &str, f: F) -> Result<(), E>
where
    F: FnOnce() -> Result<(), E>,
{
    if dry_run {
        log_action(action_desc);
        Ok(())
    } else {
        f()
    }
}
