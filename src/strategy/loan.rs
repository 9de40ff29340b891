//! Shared loan math and cost aggregation.
//!
//! Every calculator that touches financing funnels through the same
//! fixed-rate amortization formula, and every calculator that sums a
//! bag of optional fee fields uses the same reducer, so the five
//! strategies cannot drift apart on either.

use std::collections::BTreeMap;

/// Standard fixed-rate amortization: the level monthly payment on
/// `principal` at `annual_rate_percent` (whole-number percent, 6 = 6%)
/// over `term_months` payments.
///
/// A monthly rate of exactly zero falls back to straight-line
/// `principal / term_months`. Callers that want a zero payment for a
/// zero rate guard before calling.
pub fn amortized_monthly_payment(principal: f64, annual_rate_percent: f64, term_months: f64) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / term_months;
    }
    let compound = (1.0 + monthly_rate).powf(term_months);
    principal * monthly_rate * compound / (compound - 1.0)
}

/// Sum a set of optional currency amounts, treating absent fields as 0.
pub fn sum_defaulted(parts: &[Option<f64>]) -> f64 {
    parts.iter().map(|p| p.unwrap_or(0.0)).sum()
}

/// Sum a bag of named line items (e.g. a rehab category or a
/// purchase-cost breakdown).
pub fn sum_line_items(items: &BTreeMap<String, f64>) -> f64 {
    items.values().sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
