use serde::{Deserialize, Serialize};

use crate::form::GST_RATE;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub letterhead: Letterhead,
    #[serde(default)]
    pub quotation: QuotationSettings,
    pub bank: BankDetails,
    pub footer: Footer,
    pub pdf: PdfSettings,
}

/// Seller identity printed at the top of every quotation.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Letterhead {
    pub name: String,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuotationSettings {
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    #[serde(default = "default_tax_label")]
    pub tax_label: String,
    #[serde(default = "default_salutation")]
    pub salutation: String,
    #[serde(default)]
    pub introduction: Vec<String>,
    #[serde(default = "default_validity")]
    pub validity: String,
}

impl Default for QuotationSettings {
    fn default() -> Self {
        Self {
            tax_rate: default_tax_rate(),
            tax_label: default_tax_label(),
            salutation: default_salutation(),
            introduction: Vec::new(),
            validity: default_validity(),
        }
    }
}

fn default_tax_rate() -> f64 {
    GST_RATE
}

fn default_tax_label() -> String {
    "GST".to_string()
}

fn default_salutation() -> String {
    "Dear Sir,".to_string()
}

fn default_validity() -> String {
    "Quotation Validity:- One month only".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BankDetails {
    pub holder: String,
    pub bank: String,
    pub ifsc: String,
    pub account: String,
    pub branch: String,
}

impl BankDetails {
    /// Label/value lines in the order they appear under "ACCOUNT DETAILS".
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("AC. HOLDER :- {}", self.holder),
            format!("BANK :- {}", self.bank),
            format!("IFSC CODE :- {}", self.ifsc),
            format!("A/C NO :- {}", self.account),
            format!("BRANCH :- {}", self.branch),
        ]
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Footer {
    pub warranty: String,
    #[serde(default)]
    pub contact: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PdfSettings {
    pub output_dir: String,
}
