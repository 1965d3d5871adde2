use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{QuoteError, Result};

/// Payment timing offered on the quotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    #[default]
    FullAdvance,
    HalfPreDelivery,
    PostDelivery,
}

impl PaymentTerms {
    pub const ALL: [PaymentTerms; 3] = [
        PaymentTerms::FullAdvance,
        PaymentTerms::HalfPreDelivery,
        PaymentTerms::PostDelivery,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentTerms::FullAdvance => "full payment (advance)",
            PaymentTerms::HalfPreDelivery => "half payment (pre-delivery)",
            PaymentTerms::PostDelivery => "payment done (post delivery)",
        }
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentTerms {
    type Err = QuoteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "advance" | "full" => return Ok(PaymentTerms::FullAdvance),
            "pre-delivery" | "half" => return Ok(PaymentTerms::HalfPreDelivery),
            "post-delivery" | "post" => return Ok(PaymentTerms::PostDelivery),
            _ => {}
        }
        PaymentTerms::ALL
            .into_iter()
            .find(|terms| terms.label() == normalized)
            .ok_or_else(|| QuoteError::InvalidTerms(s.to_string()))
    }
}

/// Fields of [`QuotationDetails`] addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    CompanyName,
    SenderAddress,
    ClientName,
    ClientAddress,
    ClientGst,
    Date,
    ValidityDate,
    TermsOfPayment,
    Subject,
}

impl FromStr for DetailField {
    type Err = QuoteError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let field = match s {
            "companyName" | "company_name" => DetailField::CompanyName,
            "senderAddress" | "sender_address" => DetailField::SenderAddress,
            "clientName" | "client_name" => DetailField::ClientName,
            "clientAddress" | "client_address" => DetailField::ClientAddress,
            "clientGST" | "client_gst" => DetailField::ClientGst,
            "date" => DetailField::Date,
            "validityDate" | "validity_date" => DetailField::ValidityDate,
            "termsOfPayment" | "terms_of_payment" => DetailField::TermsOfPayment,
            "subject" => DetailField::Subject,
            _ => return Err(QuoteError::UnknownField(s.to_string())),
        };
        Ok(field)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuotationDetails {
    pub company_name: String,
    pub sender_address: String,
    pub client_name: String,
    pub client_address: String,
    pub client_gst: String,
    pub date: String,
    pub validity_date: String,
    pub terms_of_payment: PaymentTerms,
    pub subject: String,
}

impl QuotationDetails {
    pub fn set(&mut self, field: DetailField, value: &str) -> Result<()> {
        let value = value.to_string();
        match field {
            DetailField::CompanyName => self.company_name = value,
            DetailField::SenderAddress => self.sender_address = value,
            DetailField::ClientName => self.client_name = value,
            DetailField::ClientAddress => self.client_address = value,
            DetailField::ClientGst => self.client_gst = value,
            DetailField::Date => self.date = value,
            DetailField::ValidityDate => self.validity_date = value,
            DetailField::TermsOfPayment => self.terms_of_payment = value.parse()?,
            DetailField::Subject => self.subject = value,
        }
        Ok(())
    }

    /// Issue date, if the stored text is a `YYYY-MM-DD` date.
    pub fn issue_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    pub fn valid_until(&self) -> Option<NaiveDate> {
        parse_date(&self.validity_date)
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()
}
