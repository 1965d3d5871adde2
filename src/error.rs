use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Config directory not found at {0}. Run 'quote init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid tax_rate {rate} in {path}. Expected a non-negative number such as 0.18.")]
    InvalidTaxRate { path: PathBuf, rate: f64 },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invalid item format '{0}'. Expected 'name:quantity:price' (e.g., 'Sorter A:2:1000')")]
    InvalidItemFormat(String),

    #[error("Unknown terms of payment '{0}'. Use 'advance', 'pre-delivery' or 'post-delivery'.")]
    InvalidTerms(String),

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Failed to read logo {path}: {source}")]
    Logo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode embedded image: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("Failed to render PDF: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for QuoteError {
    fn from(e: lopdf::Error) -> Self {
        QuoteError::Render(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
