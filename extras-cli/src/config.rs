use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extract: ExtractSection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Command that renders a PDF to text (poppler's `pdftotext`)
    pub pdftotext: String,
    /// Command that prints document metadata (poppler's `pdfinfo`)
    pub pdfinfo: String,
    /// Arguments passed before `<pdf> -`. Keep `-layout`: amount columns are told
    /// apart by their indentation.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// tracing-subscriber filter used when RUST_LOG is unset
    pub filter: String,
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            pdftotext: "pdftotext".to_string(),
            pdfinfo: "pdfinfo".to_string(),
            args: vec!["-layout".to_string()],
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// `$EXTRAS_HOME`, falling back to `~/.extras`.
pub fn extras_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("EXTRAS_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".extras"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(extras_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// Missing file means defaults; a present but malformed file is an error.
pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}
