//! PDF to text, by shelling out to poppler.
//!
//! The statement parser only needs the text; page count and document metadata are
//! carried along for logging.

use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tracing::{debug, warn};

use crate::config::ExtractSection;

/// Form feed, emitted by pdftotext after every page.
const PAGE_BREAK: char = '\x0c';

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedText {
    pub text: String,
    pub page_count: usize,
    pub metadata: BTreeMap<String, String>,
}

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl Future<Output = Result<ExtractedText>> + Send;
}

/// `pdftotext -layout <pdf> -` plus `pdfinfo <pdf>`.
#[derive(Debug, Clone)]
pub struct Pdftotext {
    pdftotext: String,
    pdfinfo: String,
    args: Vec<String>,
}

impl Pdftotext {
    pub fn from_config(cfg: &ExtractSection) -> Self {
        Self {
            pdftotext: cfg.pdftotext.clone(),
            pdfinfo: cfg.pdfinfo.clone(),
            args: cfg.args.clone(),
        }
    }

    async fn read_metadata(&self, path: &Path) -> Result<BTreeMap<String, String>> {
        let bin = resolve(&self.pdfinfo)?;
        let output = tokio::process::Command::new(&bin)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("running {}", bin.display()))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                bin.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(parse_pdfinfo(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl TextExtractor for Pdftotext {
    async fn extract(&self, path: &Path) -> Result<ExtractedText> {
        let bin = resolve(&self.pdftotext)?;
        debug!(bin = %bin.display(), args = ?self.args, "running pdftotext");

        let output = tokio::process::Command::new(&bin)
            .args(&self.args)
            .arg(path)
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("running {}", bin.display()))?;

        if !output.status.success() {
            bail!(
                "{} exited with {}: {}",
                bin.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let (text, page_count) = split_pages(&String::from_utf8_lossy(&output.stdout));

        let metadata = match self.read_metadata(path).await {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "could not read PDF metadata");
                BTreeMap::new()
            }
        };

        Ok(ExtractedText {
            text,
            page_count,
            metadata,
        })
    }
}

fn resolve(cmd: &str) -> Result<PathBuf> {
    which::which(cmd).with_context(|| format!("{cmd} not found in PATH (install poppler-utils)"))
}

/// Drop page breaks, keeping line adjacency across pages. Returns (text, pages).
fn split_pages(raw: &str) -> (String, usize) {
    let breaks = raw.matches(PAGE_BREAK).count();
    let pages = if breaks == 0 && !raw.trim().is_empty() {
        1
    } else {
        breaks
    };
    (raw.replace(PAGE_BREAK, ""), pages)
}

/// "Key:   value" lines as printed by pdfinfo.
fn parse_pdfinfo(out: &str) -> BTreeMap<String, String> {
    out.lines()
        .filter_map(|l| l.split_once(':'))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}
