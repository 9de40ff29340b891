//! Subject-To calculator.
//!
//! Takes over the seller's existing loan: the return is the spread
//! between market rent and the loan's PITI, against the cash required
//! to reinstate and close.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Parameters for a subject-to takeover analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubjectToInputs {
    pub market_rent: f64,
    /// Full monthly payment on the existing loan being taken over.
    #[serde(rename = "monthlyPITI")]
    pub monthly_piti: f64,
    /// Cash needed to bring the existing loan current.
    pub reinstatement_needed: f64,
    /// Additional cash the seller needs to walk away.
    pub seller_cash_needed: f64,
    pub closing_costs: f64,
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectToCalculations {
    pub monthly_spread: f64,
    pub cash_needed: f64,
    pub cash_on_cash_return: f64,
}

impl fmt::Display for SubjectToCalculations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "spread ${:.2}/mo | cash needed ${:.2} | CoC {:.2}%",
            self.monthly_spread, self.cash_needed, self.cash_on_cash_return,
        )
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Compute the monthly spread and the return on the cash required to
/// take the deal over. A nonpositive cash requirement reports a 0
/// cash-on-cash return rather than dividing.
pub fn calculate_subject_to(inputs: &SubjectToInputs) -> SubjectToCalculations {
    let monthly_spread = inputs.market_rent - inputs.monthly_piti;
    let cash_needed =
        inputs.reinstatement_needed + inputs.seller_cash_needed + inputs.closing_costs;
    let cash_on_cash_return = if cash_needed > 0.0 {
        (monthly_spread * 12.0) / cash_needed * 100.0
    } else {
        0.0
    };

    SubjectToCalculations {
        monthly_spread,
        cash_needed,
        cash_on_cash_return,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
