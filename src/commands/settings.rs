//! Settings file commands

use anyhow::{Result, anyhow};
use std::path::PathBuf;

use crate::config::settings::Settings;

/// Handle settings init: print an example, or write it to `path`
pub fn init(path: Option<String>, force: bool) -> Result<()> {
    let example = Settings::example_config()?;

    let Some(path) = path.map(PathBuf::from) else {
        print!("{}", example);
        return Ok(());
    };

    if path.exists() && !force {
        return Err(anyhow!(
            "{} already exists; pass --force to overwrite",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Settings::default().save(&path)?;
    crate::log_info!("Wrote settings to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

/// Handle settings show: the file in use and the effective values
pub fn show(settings: &Settings) -> Result<()> {
    match Settings::find_config_file() {
        Some(path) => println!("# Loaded from {}", path.display()),
        None => println!("# No settings file found, using defaults"),
    }
    print!("{}", toml::to_string_pretty(settings)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let path_str = path.display().to_string();

        init(Some(path_str.clone()), false).unwrap();
        assert_eq!(Settings::load_from_file(&path).unwrap(), Settings::default());

        assert!(init(Some(path_str.clone()), false).is_err());
        init(Some(path_str), true).unwrap();
    }
}
