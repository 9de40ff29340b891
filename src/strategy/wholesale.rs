//! Wholesale calculator.
//!
//! Works backward from the after-repair value to the maximum allowable
//! offer that still preserves the target assignment fee.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Parameters for a wholesale (assignment) analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WholesaleInputs {
    /// After-repair value.
    pub arv: f64,
    /// Target MAO as a percent of ARV (70 = 70%).
    pub mao_percent: f64,
    pub estimated_rehab: f64,
    pub closing_cost: f64,
    /// Assignment fee the wholesaler wants to clear.
    pub wholesale_fee_goal: f64,
    /// Seller's asking price.
    pub seller_ask: f64,
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WholesaleCalculations {
    /// Maximum allowable offer.
    pub mao: f64,
    /// Fee actually available at the seller's ask: `mao - sellerAsk`.
    pub potential_fees: f64,
    pub is_eligible: bool,
}

impl fmt::Display for WholesaleCalculations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MAO ${:.2} | potential fee ${:.2} | {}",
            self.mao,
            self.potential_fees,
            if self.is_eligible { "eligible" } else { "not eligible" },
        )
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Compute the maximum allowable offer and whether the deal clears the
/// seller's ask with room for a fee.
pub fn calculate_wholesale(inputs: &WholesaleInputs) -> WholesaleCalculations {
    let mao = inputs.arv * (inputs.mao_percent / 100.0)
        - inputs.estimated_rehab
        - inputs.closing_cost
        - inputs.wholesale_fee_goal;
    let potential_fees = mao - inputs.seller_ask;

    WholesaleCalculations {
        mao,
        potential_fees,
        is_eligible: potential_fees > 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
