pub mod metrics;
mod render;

pub use render::LopdfRenderer;

use crate::document::DocumentScript;
use crate::error::Result;

/// Turns a finished drawing script into PDF bytes.
pub trait PdfRenderer {
    fn render(&self, script: &DocumentScript) -> Result<Vec<u8>>;
}
