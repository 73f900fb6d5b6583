//! Read-only commands: view, current-context and the get-* listings

use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

use super::Session;
use crate::k8s::options::ViewOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Invalid output format: {}. Must be 'yaml' or 'json'", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewArgs {
    pub output: String,
    pub minify: bool,
    pub flatten: bool,
    /// Keep secrets as kubectl's REDACTED placeholders
    pub redacted: bool,
}

/// Render kubectl's YAML in the requested format
pub fn render(yaml: &str, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => Ok(yaml.to_string()),
        OutputFormat::Json => {
            let value: serde_json::Value =
                serde_yaml::from_str(yaml).context("Failed to parse kubectl config view output")?;
            serde_json::to_string_pretty(&value).context("Failed to render JSON")
        }
    }
}

/// Handle view command
pub fn view(session: &Session, args: ViewArgs) -> Result<()> {
    let format = OutputFormat::from_str(&args.output)?;
    let options = ViewOptions::default()
        .raw(!args.redacted)
        .minify(args.minify)
        .flatten(args.flatten);

    let yaml = session.config.view_yaml(&options)?;
    println!("{}", render(&yaml, format)?);
    Ok(())
}

/// Handle current-context command
pub fn current_context(session: &Session) -> Result<()> {
    match session.config.current_context()? {
        Some(name) => {
            println!("{}", name);
            Ok(())
        }
        None => Err(anyhow!("current-context is not set")),
    }
}

/// Handle get-contexts command; the current context is starred
pub fn get_contexts(session: &Session) -> Result<()> {
    let contexts = session.config.get_contexts()?;
    let current = session.config.current_context()?;

    if contexts.is_empty() {
        crate::log_info!("No contexts found");
    }
    for line in mark_current(&contexts, current.as_deref()) {
        println!("{}", line);
    }
    Ok(())
}

/// Handle get-clusters command
pub fn get_clusters(session: &Session) -> Result<()> {
    for name in session.config.get_clusters()? {
        println!("{}", name);
    }
    Ok(())
}

/// Handle get-users command
pub fn get_users(session: &Session) -> Result<()> {
    for name in session.config.get_users()? {
        println!("{}", name);
    }
    Ok(())
}

fn mark_current(names: &[String], current: Option<&str>) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            if Some(name.as_str()) == current {
                format!("* {}", name)
            } else {
                format!("  {}", name)
            }
        })
        .collect()
}
