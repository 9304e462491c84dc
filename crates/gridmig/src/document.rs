//! Layout documents: the persisted form gridmig reads and writes.

use std::{fs, path::Path};

use grid_migration::{GridSize, PageId, Record};
use ron::{Options, extensions::Extensions, ser::PrettyConfig};
use serde::{Deserialize, Serialize};

use crate::{
    cli::Format,
    error::{Error, Result},
};

/// A stored home-screen layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Grid the records were placed on.
    pub grid: GridSize,
    /// Hotseat slot count the records were placed on.
    pub hotseat_size: u32,
    /// Installed packages. When absent every target is assumed to resolve.
    #[serde(default)]
    pub installed: Option<Vec<String>>,
    /// Known page ids, including pages with no items.
    #[serde(default)]
    pub pages: Vec<PageId>,
    /// Placement records.
    pub records: Vec<Record>,
}

/// RON options shared by the reader and writer.
fn ron_options() -> Options {
    Options::default().with_default_extension(Extensions::IMPLICIT_SOME)
}

/// Format implied by a file name.
pub fn format_for(path: &Path) -> Format {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
        _ => Format::Ron,
    }
}

/// Parse a document from `text`.
pub fn parse(text: &str, format: Format) -> Result<LayoutDocument> {
    Ok(match format {
        Format::Ron => ron_options().from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    })
}

/// Render a document, newline terminated.
pub fn render(doc: &LayoutDocument, format: Format) -> Result<String> {
    let mut out = match format {
        Format::Ron => ron_options().to_string_pretty(doc, PrettyConfig::new())?,
        Format::Json => serde_json::to_string_pretty(doc)?,
    };
    out.push('\n');
    Ok(out)
}

/// Load a document from `path`.
pub fn read(path: &Path) -> Result<LayoutDocument> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text, format_for(path))
}
