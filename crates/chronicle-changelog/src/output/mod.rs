//! Output conversion and file writing

mod html;
mod wiki;

pub use html::to_html;
pub use wiki::to_wiki;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use chronicle_core::config::OutputConfig;
use chronicle_core::error::OutputError;
use chronicle_core::Result;

/// Output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// The document as rendered
    Markdown,
    /// HTML converted from the document
    Html,
    /// Confluence wiki markup converted from the document
    Wiki,
}

impl OutputFormat {
    /// Every format, in dispatch order
    pub const ALL: [OutputFormat; 3] = [Self::Markdown, Self::Html, Self::Wiki];

    /// Get the format name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Wiki => "wiki",
        }
    }

    /// Target paths configured for this format
    pub fn targets<'a>(&self, config: &'a OutputConfig) -> &'a [PathBuf] {
        match self {
            Self::Markdown => &config.markdown,
            Self::Html => &config.html,
            Self::Wiki => &config.wiki,
        }
    }

    /// Convert a Markdown document to this format
    pub fn convert(&self, document: &str) -> String {
        match self {
            Self::Markdown => document.to_string(),
            Self::Html => to_html(document),
            Self::Wiki => to_wiki(document),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writes a finished document to every configured target
#[derive(Debug, Clone)]
pub struct OutputDispatcher {
    base_dir: PathBuf,
}

impl OutputDispatcher {
    /// Create a dispatcher resolving relative targets against `base_dir`
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Base directory for relative targets
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Convert `document` once per format with targets and write it to each
    /// target. Formats with no targets are skipped. Returns the written paths.
    #[instrument(skip(self, document, config), fields(base_dir = %self.base_dir.display()))]
    pub fn dispatch(&self, document: &str, config: &OutputConfig) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for format in OutputFormat::ALL {
            let targets = format.targets(config);
            if targets.is_empty() {
                continue;
            }

            let content = format.convert(document);
            for target in targets {
                let path = self.base_dir.join(target);
                write_file(&path, &content)?;
                info!(format = %format, path = %path.display(), "Wrote changelog");
                written.push(path);
            }
        }

        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> std::result::Result<(), OutputError> {
    let wrap = |source: std::io::Error| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(path, content).map_err(wrap)
}
