//! `pdftk` + `pdf2xml` page source.

use super::xml::parse_pdf2xml;
use super::PageSource;
use crate::error::{Error, Result};
use crate::model::Page;
use log::debug;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// Locations of the external tools.
#[derive(Debug, Clone)]
pub struct ToolOptions {
    /// `pdftk` executable, used to burst a PDF into single pages
    pub pdftk: PathBuf,

    /// `pdf2xml` executable, used to extract text blocks
    pub pdf2xml: PathBuf,
}

impl ToolOptions {
    /// Create tool options with defaults (both tools looked up on `PATH`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `pdftk` executable.
    pub fn with_pdftk(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdftk = path.into();
        self
    }

    /// Set the `pdf2xml` executable.
    pub fn with_pdf2xml(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdf2xml = path.into();
        self
    }
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            pdftk: PathBuf::from("pdftk"),
            pdf2xml: PathBuf::from("pdf2xml"),
        }
    }
}

/// [`PageSource`] backed by the `pdftk` and `pdf2xml` command line tools.
#[derive(Debug, Clone, Default)]
pub struct ToolSource {
    options: ToolOptions,
}

impl ToolSource {
    pub fn new(options: ToolOptions) -> Self {
        Self { options }
    }

    /// Split `pdf` into `<workdir>/<body_id>-<n>.pdf`, returned in page order.
    fn burst(&self, pdf: &Path, body_id: &str, workdir: &Path) -> Result<Vec<PathBuf>> {
        let pattern = workdir.join(format!("{}-%d.pdf", body_id));
        let mut cmd = Command::new(&self.options.pdftk);
        cmd.arg(pdf).arg("burst").arg("output").arg(&pattern);
        run(&mut cmd, &self.options.pdftk)?;

        let prefix = format!("{}-", body_id);
        let mut pages = Vec::new();
        for entry in std::fs::read_dir(workdir)? {
            let path = entry?.path();
            let is_page = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&prefix) && n.ends_with(".pdf"));
            if is_page {
                pages.push(path);
            }
        }
        natural_page_order(&mut pages);
        Ok(pages)
    }

    /// Run pdf2xml on one page file and parse its output.
    fn extract(&self, page_pdf: &Path) -> Result<Vec<Page>> {
        let mut cmd = Command::new(&self.options.pdf2xml);
        cmd.arg("-blocks").arg(page_pdf);
        run(&mut cmd, &self.options.pdf2xml)?;

        let xml_path = page_pdf.with_extension("xml");
        let xml = std::fs::read_to_string(&xml_path)?;
        parse_pdf2xml(&xml)
    }
}

impl PageSource for ToolSource {
    fn load_pages(&self, pdf: &Path, body_id: &str, workdir: &Path) -> Result<Vec<Page>> {
        let page_files = self.burst(pdf, body_id, workdir)?;
        debug!("{} split into {} pages", pdf.display(), page_files.len());

        let mut pages = Vec::new();
        for (index, page_pdf) in page_files.iter().enumerate() {
            let number = index as u32 + 1;
            for mut page in self.extract(page_pdf)? {
                page.number = number;
                pages.push(page);
            }
        }
        Ok(pages)
    }
}

fn run(cmd: &mut Command, tool: &Path) -> Result<()> {
    debug!("Running {:?}", cmd);
    let tool_name = tool.display().to_string();
    let status = cmd
        .status()
        .map_err(|e| Error::Tool(tool_name.clone(), e.to_string()))?;
    if !status.success() {
        return Err(Error::Tool(tool_name, status.to_string()));
    }
    Ok(())
}

/// Sort page files by their trailing `-<n>` number, then by name.
///
/// `doc-10.pdf` sorts after `doc-9.pdf`.
pub fn natural_page_order(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|p| {
        let name = p
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        (page_index(&name), name)
    });
}

fn page_index(name: &str) -> Option<u64> {
    static PAGE_SUFFIX: OnceLock<Regex> = OnceLock::new();
    let re = PAGE_SUFFIX.get_or_init(|| Regex::new(r"-([0-9]+)\.pdf$").unwrap());
    re.captures(name)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
