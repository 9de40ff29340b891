//! Seller-financing calculator.
//!
//! The seller carries the note; the payment depends on whether the note
//! fully amortizes or is interest-only, and the return is measured on
//! the down payment alone.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::loan::amortized_monthly_payment;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// How the seller-carried note is repaid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentType {
    #[default]
    Amortization,
    #[serde(rename = "Interest Only")]
    InterestOnly,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Amortization => write!(f, "Amortization"),
            PaymentType::InterestOnly => write!(f, "Interest Only"),
        }
    }
}

/// Parameters for a seller-financed purchase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SellerFinancingInputs {
    pub purchase_price: f64,
    pub down_payment: f64,
    /// Annual rate on the seller-carried note, whole-number percent.
    pub interest_rate: f64,
    pub term_years: f64,
    pub payment_type: PaymentType,
    pub market_rent: f64,
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerFinancingCalculations {
    pub loan_amount: f64,
    pub monthly_payment: f64,
    pub spread_vs_market_rent: f64,
    pub return_on_down_payment: f64,
}

impl fmt::Display for SellerFinancingCalculations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "payment ${:.2}/mo | spread ${:.2}/mo | return on DP {:.2}%",
            self.monthly_payment, self.spread_vs_market_rent, self.return_on_down_payment,
        )
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Compute the note payment, the spread against market rent, and the
/// annualized return on the down payment (0 if no down payment).
pub fn calculate_seller_financing(inputs: &SellerFinancingInputs) -> SellerFinancingCalculations {
    let loan_amount = inputs.purchase_price - inputs.down_payment;

    let monthly_payment =
        if loan_amount > 0.0 && inputs.interest_rate > 0.0 && inputs.term_years > 0.0 {
            match inputs.payment_type {
                // The shared helper falls back to straight-line
                // loan/n if the monthly rate lands on exactly 0.
                PaymentType::Amortization => amortized_monthly_payment(
                    loan_amount,
                    inputs.interest_rate,
                    inputs.term_years * 12.0,
                ),
                PaymentType::InterestOnly => loan_amount * (inputs.interest_rate / 100.0) / 12.0,
            }
        } else {
            0.0
        };

    let spread_vs_market_rent = inputs.market_rent - monthly_payment;
    let return_on_down_payment = if inputs.down_payment > 0.0 {
        (spread_vs_market_rent * 12.0) / inputs.down_payment * 100.0
    } else {
        0.0
    };

    SellerFinancingCalculations {
        loan_amount,
        monthly_payment,
        spread_vs_market_rent,
        return_on_down_payment,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
