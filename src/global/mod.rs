use anyhow::{anyhow, Context, Result};
use std::path::PathBuf;

const APP_DIR: &str = "meetnotes";

pub fn config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR))
        .context("Unable to determine config directory")
}

pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = dirs::data_dir() {
        return Ok(dir.join(APP_DIR));
    }
    if let Some(home) = dirs::home_dir() {
        return Ok(home.join(".local").join("share").join(APP_DIR));
    }
    Err(anyhow!("Unable to determine data directory"))
}

pub fn exports_dir() -> Result<PathBuf> {
    Ok(data_dir()?.join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_under_app_dir() {
        let path = config_file().unwrap();
        assert!(path.ends_with("meetnotes/config.toml"));
    }

    #[test]
    fn test_exports_dir_under_data_dir() {
        let exports = exports_dir().unwrap();
        let data = data_dir().unwrap();
        assert!(exports.starts_with(data));
    }
}
