use anyhow::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::infra::shooter::SHOOTER_API_URL;

const ENDPOINT_ENV: &str = "SUB_DOWNLOADER_ENDPOINT";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    endpoint: Option<String>,
    ignore_ssl_errors: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub ignore_ssl_errors: bool,
}

pub fn load_settings() -> Result<Settings> {
    let config_path = get_config_path();
    let file = if config_path.exists() {
        let config_content = fs::read_to_string(&config_path)?;
        parse_config(&config_content)?
    } else {
        ConfigFile::default()
    };

    Ok(resolve(env::var(ENDPOINT_ENV).ok(), file))
}

fn parse_config(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

fn resolve(env_endpoint: Option<String>, file: ConfigFile) -> Settings {
    let endpoint = env_endpoint
        .or(file.endpoint)
        .unwrap_or_else(|| SHOOTER_API_URL.to_string());

    Settings {
        endpoint,
        ignore_ssl_errors: file.ignore_ssl_errors.unwrap_or(false),
    }
}

fn get_config_dir_path() -> PathBuf {
    xdir::config()
        .map(|path| path.join("sub-downloader"))
        // If the standard path could not be found (e.g.`$HOME` is not set),
        // default to the current directory.
        .unwrap_or_default()
}

fn get_config_path() -> PathBuf {
    get_config_dir_path().join("config.toml")
}
