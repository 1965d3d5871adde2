use serde::Serialize;

use super::item::finite_or_zero;
use super::LineItem;

/// Default GST rate applied to the pre-tax total.
pub const GST_RATE: f64 = 0.18;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    pub total_amount: f64,
    pub gst: f64,
    pub grand_total: f64,
    pub tax_rate: f64,
}

impl Totals {
    pub fn compute(items: &[LineItem], tax_rate: f64) -> Self {
        let total_amount = finite_or_zero(items.iter().map(LineItem::amount).sum(), "total amount");
        let gst = finite_or_zero(total_amount * tax_rate, "tax");
        let grand_total = finite_or_zero(total_amount + gst, "grand total");
        Self {
            total_amount,
            gst,
            grand_total,
            tax_rate,
        }
    }
}

/// Totals at the default GST rate.
pub fn compute_totals(items: &[LineItem]) -> Totals {
    Totals::compute(items, GST_RATE)
}
