mod stationery;

pub use stationery::{BankDetails, Config, Footer, Letterhead, PdfSettings, QuotationSettings};

use crate::error::{QuoteError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.quote/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "quote") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        QuoteError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".quote"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a configured path; relative paths are taken from the config directory.
pub fn resolve_path(path: &str, cfg_dir: &Path) -> PathBuf {
    let expanded = expand_path(path);
    if expanded.is_absolute() {
        expanded
    } else {
        cfg_dir.join(expanded)
    }
}

pub fn resolve_output_dir(output_dir: &str, cfg_dir: &Path) -> PathBuf {
    resolve_path(output_dir, cfg_dir)
}

/// Load the main config.toml
pub fn load_config(cfg_dir: &Path) -> Result<Config> {
    if !cfg_dir.exists() {
        return Err(QuoteError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    let path = cfg_dir.join("config.toml");
    if !path.exists() {
        return Err(QuoteError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&content).map_err(|e| QuoteError::ConfigParse {
        path: path.clone(),
        source: e,
    })?;
    let rate = config.quotation.tax_rate;
    if !rate.is_finite() || rate < 0.0 {
        return Err(QuoteError::InvalidTaxRate { path, rate });
    }
    tracing::debug!(dir = %cfg_dir.display(), seller = %config.letterhead.name, "loaded config");
    Ok(config)
}

/// Read the logo configured in the letterhead, if any.
pub fn load_logo(config: &Config, cfg_dir: &Path) -> Result<Option<Vec<u8>>> {
    let Some(logo) = config.letterhead.logo.as_deref() else {
        return Ok(None);
    };
    let path = resolve_path(logo, cfg_dir);
    let bytes = fs::read(&path).map_err(|source| QuoteError::Logo { path, source })?;
    Ok(Some(bytes))
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r##"# Seller identity printed at the top of every quotation.
[letterhead]
name = "YOUR COMPANY PVT. LTD."
lines = [
    "#1, Business Park, Main Road",
    "Your City, State 000000",
    "GST No. 00AAAAA0000A0Z0",
    "Phone: +91-00000-00000",
]
reference = "Ref. No: QT/0001"
# logo = "logo.png"             # optional, PNG or JPEG, relative to this directory

[quotation]
tax_rate = 0.18                 # 18% GST
tax_label = "GST"
salutation = "Dear Sir,"
introduction = [
    "This is in reference to the discussions we had with you regarding your requirement.",
    "Please find the quotation as per your requirement.",
]
validity = "Quotation Validity:- One month only"

[bank]
holder = "YOUR COMPANY PVT. LTD."
bank = "YOUR BANK LTD."
ifsc = "BANK0000000"
account = "000000000000000"
branch = "YOUR BRANCH"

[footer]
warranty = "Warranty for One Year starts from dispatched date."
contact = [
    "Contact no. - +91-00000-00000",
    "Email - sales@yourcompany.com",
]

[pdf]
output_dir = "output"
"##;
