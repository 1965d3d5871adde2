use serde::Serialize;
use std::str::FromStr;

use crate::error::QuoteError;

/// Editable fields of a line item. `amount` is derived and not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Quantity,
    UnitPrice,
}

impl FromStr for ItemField {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ItemField::Name),
            "quantity" => Ok(ItemField::Quantity),
            "unitPrice" | "unit_price" => Ok(ItemField::UnitPrice),
            _ => Err(QuoteError::UnknownField(s.to_string())),
        }
    }
}

/// A single row of the quotation.
///
/// Quantity and unit price are kept as entered so the row can be shown back
/// to the user verbatim; `amount` is recomputed on every numeric edit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LineItem {
    name: String,
    quantity: String,
    unit_price: String,
    amount: f64,
}

impl LineItem {
    pub fn new(name: &str, quantity: &str, unit_price: &str) -> Self {
        let mut item = Self::default();
        item.set(ItemField::Name, name);
        item.set(ItemField::Quantity, quantity);
        item.set(ItemField::UnitPrice, unit_price);
        item
    }

    pub fn set(&mut self, field: ItemField, raw: &str) {
        match field {
            ItemField::Name => self.name = raw.to_string(),
            ItemField::Quantity => {
                self.quantity = raw.to_string();
                self.recompute();
            }
            ItemField::UnitPrice => {
                self.unit_price = raw.to_string();
                self.recompute();
            }
        }
    }

    fn recompute(&mut self) {
        self.amount = finite_or_zero(self.quantity_value() * self.unit_price_value(), "amount");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    pub fn unit_price(&self) -> &str {
        &self.unit_price
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn quantity_value(&self) -> f64 {
        parse_numeric(&self.quantity)
    }

    pub fn unit_price_value(&self) -> f64 {
        parse_numeric(&self.unit_price)
    }
}

/// Coerce user input to a non-negative number.
///
/// Blank, unparsable, non-finite and negative input all become `0.0`.
pub fn parse_numeric(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            tracing::warn!(input = trimmed, "non-numeric input treated as 0");
            0.0
        }
    }
}

/// Results that overflow to infinity are reported and replaced with `0.0`.
pub(crate) fn finite_or_zero(value: f64, what: &'static str) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::warn!(value = %value, what, "value out of range treated as 0");
        0.0
    }
}
