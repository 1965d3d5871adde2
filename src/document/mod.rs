mod command;
mod layout;
mod table;

pub use command::{
    Align, Color, DocumentScript, DrawCommand, FontWeight, ImageCommand, LayoutCursor, PageSize,
    TextCommand, TextStyle,
};
pub use layout::{assemble, format_money, format_percent, item_table_spec, PAGE_MARGIN, TABLE_HEADERS};
pub use table::{layout_table, Column, PlacedRow, TableFragment, TableLayout, TableSpec, TableStyle};

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::form::{LineItem, QuotationDetails, Totals};
use crate::pdf::PdfRenderer;

/// A rendered quotation, ready to be written out.
#[derive(Debug, Clone)]
pub struct RenderedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// File name for a client's quotation: `<client name>_quotation.pdf`.
///
/// Path separators, characters reserved on Windows and control characters
/// are replaced with `_`; surrounding whitespace is dropped.
pub fn quotation_file_name(client_name: &str) -> String {
    let sanitized: String = client_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{sanitized}_quotation.pdf")
}

/// Assemble and render a quotation. Inputs are only read.
pub fn generate_document(
    details: &QuotationDetails,
    items: &[LineItem],
    totals: &Totals,
    config: &Config,
    logo: Option<Vec<u8>>,
    renderer: &dyn PdfRenderer,
) -> Result<RenderedFile> {
    let seller = config.letterhead.name.trim();
    let company = details.company_name.trim();
    if !company.is_empty() && !company.eq_ignore_ascii_case(seller) {
        tracing::warn!(
            company,
            seller,
            "company name differs from the configured letterhead; the letterhead is printed"
        );
    }

    let logo: Option<Arc<[u8]>> = logo.map(Arc::from);
    let script = assemble(details, items, totals, config, logo);
    let bytes = renderer.render(&script)?;
    let file_name = quotation_file_name(&details.client_name);
    tracing::info!(
        file = %file_name,
        items = items.len(),
        pages = script.page_count(),
        bytes = bytes.len(),
        "rendered quotation"
    );

    Ok(RenderedFile { file_name, bytes })
}

/// Write `file` into `dir` under its own name.
pub fn save_rendered(file: &RenderedFile, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&file.file_name);
    save_rendered_as(file, &path)?;
    Ok(path)
}

/// Write `file` to `path` through a `.part` sibling that is renamed into place.
pub fn save_rendered_as(file: &RenderedFile, path: &Path) -> Result<()> {
    let mut partial = path.as_os_str().to_owned();
    partial.push(".part");
    let partial = PathBuf::from(partial);

    if let Err(e) = fs::write(&partial, &file.bytes) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&partial, path) {
        let _ = fs::remove_file(&partial);
        return Err(e.into());
    }
    Ok(())
}
