mod details;
mod item;
mod totals;

pub use details::{DetailField, PaymentTerms, QuotationDetails};
pub use item::{parse_numeric, ItemField, LineItem};
pub use totals::{compute_totals, Totals, GST_RATE};

use serde::Serialize;

use crate::error::Result;

/// In-memory state of the quotation being edited.
///
/// Every mutating operation ends by recomputing the totals, so [`totals`]
/// is always consistent with the current item list.
///
/// [`totals`]: QuotationForm::totals
#[derive(Debug, Clone, Serialize)]
pub struct QuotationForm {
    items: Vec<LineItem>,
    details: QuotationDetails,
    totals: Totals,
}

impl QuotationForm {
    pub fn new() -> Self {
        Self::with_tax_rate(GST_RATE)
    }

    pub fn with_tax_rate(tax_rate: f64) -> Self {
        let items = vec![LineItem::default()];
        let totals = Totals::compute(&items, tax_rate);
        Self {
            items,
            details: QuotationDetails::default(),
            totals,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn details(&self) -> &QuotationDetails {
        &self.details
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn tax_rate(&self) -> f64 {
        self.totals.tax_rate
    }

    pub fn add_item(&mut self) {
        self.items.push(LineItem::default());
        self.recompute();
    }

    /// Remove the item at `index`. Out-of-range indices leave the list untouched.
    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        if index >= self.items.len() {
            tracing::debug!(index, len = self.items.len(), "remove_item out of range");
            return None;
        }
        let removed = self.items.remove(index);
        self.recompute();
        Some(removed)
    }

    /// Set one field of the item at `index`. Returns `false` if there is no such item.
    pub fn update_item(&mut self, index: usize, field: ItemField, raw: &str) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            tracing::debug!(index, len = self.items.len(), "update_item out of range");
            return false;
        };
        item.set(field, raw);
        self.recompute();
        true
    }

    pub fn update_details(&mut self, field: DetailField, value: &str) -> Result<()> {
        self.details.set(field, value)
    }

    /// Totals derived from the current items, independent of the cached value.
    pub fn compute_totals(&self) -> Totals {
        Totals::compute(&self.items, self.totals.tax_rate)
    }

    fn recompute(&mut self) {
        self.totals = self.compute_totals();
    }
}

impl Default for QuotationForm {
    fn default() -> Self {
        Self::new()
    }
}
