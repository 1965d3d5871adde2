pub mod config;
pub mod document;
pub mod error;
pub mod form;
pub mod pdf;

pub use config::{BankDetails, Config, Footer, Letterhead, QuotationSettings};
pub use document::{generate_document, quotation_file_name, save_rendered, RenderedFile};
pub use error::{QuoteError, Result};
pub use form::{
    compute_totals, DetailField, ItemField, LineItem, PaymentTerms, QuotationDetails,
    QuotationForm, Totals, GST_RATE,
};
pub use pdf::{LopdfRenderer, PdfRenderer};
