use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spendgrid_finance::MerchantRules;
use spendgrid_ingest::{InferenceConfig, RoleDefaults};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ordered merchant rules; the first matching rule claims a transaction
    pub merchants: MerchantRules,
    /// Column indices used when inference finds nothing for a role
    pub template: RoleDefaults,
    pub inference: InferenceConfig,
    pub report: ReportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSection {
    pub top_n: usize,
    pub description_width: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            top_n: 15,
            description_width: 50,
        }
    }
}

pub fn spendgrid_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendgrid"))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(spendgrid_home()?.join("config.toml"))
}

/// Load `path`, falling back to built-in defaults when the file is absent
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    if cfg.merchants.is_empty() {
        anyhow::bail!("{} defines no merchants", path.display());
    }
    Ok(cfg)
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
