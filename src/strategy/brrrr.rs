//! BRRRR calculator (Buy, Rehab, Rent, Refinance, Repeat).
//!
//! Four phases: acquisition cost roll-up, rehab-hold financing, the
//! refinance that pulls capital back out, and the post-refinance
//! operating model. Capital fully recovered at refinance is an
//! infinite return — a legitimate outcome, flagged rather than errored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use super::loan::{amortized_monthly_payment, sum_line_items};

/// Refinance notes amortize over a fixed 30 years.
const REFINANCE_TERM_MONTHS: f64 = 360.0;

/// Refinance LTV applied when the input leaves it unset.
const DEFAULT_REFINANCE_LTV: f64 = 75.0;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Parameters for a full BRRRR cycle on one property.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrrrrInputs {
    pub purchase_price: f64,
    /// After-repair value, the basis for the refinance appraisal.
    pub arv: f64,

    /// One-time purchase closing costs, named line items.
    pub purchase_costs: BTreeMap<String, f64>,
    pub rehab_costs: RehabCosts,

    pub financing: InitialFinancing,
    pub refinance: RefinanceTerms,
    pub operating: OperatingExpenses,

    pub monthly_rent: f64,
    pub other_monthly_income: f64,
    /// Taxes, insurance, utilities carried while the rehab runs.
    pub holding_costs_monthly: f64,
}

/// Rehab budget split into the three scope categories, each a bag of
/// named line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RehabCosts {
    pub exterior: BTreeMap<String, f64>,
    pub interior: BTreeMap<String, f64>,
    pub general: BTreeMap<String, f64>,
}

impl RehabCosts {
    /// Flat sum across all three categories.
    pub fn total(&self) -> f64 {
        sum_line_items(&self.exterior) + sum_line_items(&self.interior)
            + sum_line_items(&self.general)
    }
}

/// Terms of the loan carried during the rehab hold.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitialFinancing {
    /// True when the purchase and rehab are funded without a loan.
    pub all_cash: bool,
    pub loan_amount: f64,
    /// Annual rate, whole-number percent.
    pub interest_rate: f64,
    /// Points charged at origination, percent of the loan amount.
    pub points: f64,
    pub interest_only: bool,
    pub rehab_timeline_months: f64,
    /// Flat lender charges outside points and interest.
    pub other_lender_charges: f64,
}

/// Terms of the post-rehab refinance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefinanceTerms {
    /// Loan-to-value percent against ARV; unset means 75.
    pub loan_ltv: Option<f64>,
    /// Annual rate, whole-number percent.
    pub interest_rate: f64,
    pub closing_costs: f64,
}

/// Steady-state operating assumptions once the property is rented.
/// Rate fields are whole-number percents of monthly rent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OperatingExpenses {
    pub vacancy_rate: f64,
    pub maintenance_rate: f64,
    pub capex_rate: f64,
    pub management_rate: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrrrrCalculations {
    // Phase A: acquisition.
    pub total_purchase_closing_costs: f64,
    pub total_rehab_cost: f64,
    pub total_holding_costs: f64,

    // Phase B: rehab-hold financing.
    pub total_initial_loan_interest: f64,
    pub initial_loan_points_amount: f64,
    pub total_financing_costs: f64,
    pub total_project_cost: f64,

    // Phase C: refinance.
    pub refinance_loan_amount: f64,
    /// Capital still tied up after the refinance proceeds come back.
    /// Negative means the refinance returned more than went in.
    pub cash_left_in_deal: f64,
    /// Cash extracted at refinance; 0 unless `cashLeftInDeal` is negative.
    pub cash_out_amount: f64,

    // Phase D: post-refinance operations.
    pub refi_monthly_payment: f64,
    pub gross_monthly_income: f64,
    pub effective_monthly_income: f64,
    pub total_monthly_expenses: f64,
    pub monthly_cash_flow_post_refi: f64,
    pub annual_cash_flow: f64,

    /// Annual cash flow over cash left in the deal. `+∞` (serialized as
    /// null, matching upstream records) when no capital remains.
    #[serde(with = "json_infinity")]
    pub roi: f64,
    pub is_infinite_return: bool,
}

impl fmt::Display for BrrrrCalculations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "all-in ${:.2} | refi ${:.2} | left in deal ${:.2} | cash flow ${:.2}/mo | ROI ",
            self.total_project_cost,
            self.refinance_loan_amount,
            self.cash_left_in_deal,
            self.monthly_cash_flow_post_refi,
        )?;
        if self.is_infinite_return {
            write!(f, "∞ (all capital returned)")
        } else {
            write!(f, "{:.2}%", self.roi)
        }
    }
}

/// `f64::INFINITY` round-trips as JSON null. Callers check
/// `isInfiniteReturn` before formatting, so null never reaches a display.
mod json_infinity {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Run the four BRRRR phases and derive the return on the capital left
/// in the deal after the refinance.
pub fn calculate_brrrr(inputs: &BrrrrInputs) -> BrrrrCalculations {
    // -- Phase A: acquisition costs ---------------------------------------

    let total_purchase_closing_costs = sum_line_items(&inputs.purchase_costs);
    let total_rehab_cost = inputs.rehab_costs.total();
    let total_holding_costs =
        inputs.holding_costs_monthly * inputs.financing.rehab_timeline_months;

    // -- Phase B: rehab-hold financing ------------------------------------

    let financing = &inputs.financing;
    let (total_initial_loan_interest, initial_loan_points_amount, total_financing_costs) =
        if financing.all_cash {
            (0.0, 0.0, 0.0)
        } else {
            // Interest-only and amortizing holds both accrue the same
            // simple interest during the rehab timeline.
            let monthly_interest =
                financing.loan_amount * (financing.interest_rate / 100.0) / 12.0;
            let total_interest = monthly_interest * financing.rehab_timeline_months;
            let points_amount = financing.loan_amount * (financing.points / 100.0);
            (
                total_interest,
                points_amount,
                points_amount + financing.other_lender_charges + total_interest,
            )
        };

    let total_project_cost = inputs.purchase_price
        + total_rehab_cost
        + total_purchase_closing_costs
        + total_holding_costs
        + total_financing_costs;

    // -- Phase C: refinance ------------------------------------------------

    let loan_ltv = inputs.refinance.loan_ltv.unwrap_or(DEFAULT_REFINANCE_LTV);
    let refinance_loan_amount = inputs.arv * loan_ltv / 100.0;
    let cash_left_in_deal =
        total_project_cost - (refinance_loan_amount - inputs.refinance.closing_costs);
    let cash_out_amount = if cash_left_in_deal < 0.0 {
        -cash_left_in_deal
    } else {
        0.0
    };

    // -- Phase D: post-refinance operations --------------------------------

    let refi_monthly_payment = if inputs.refinance.interest_rate > 0.0 {
        amortized_monthly_payment(
            refinance_loan_amount,
            inputs.refinance.interest_rate,
            REFINANCE_TERM_MONTHS,
        )
    } else {
        0.0
    };

    let operating = &inputs.operating;
    let gross_monthly_income = inputs.monthly_rent + inputs.other_monthly_income;
    // Vacancy and the percent-based reserves are based on rent alone,
    // not gross income.
    let vacancy_loss = inputs.monthly_rent * operating.vacancy_rate / 100.0;
    let effective_monthly_income = gross_monthly_income - vacancy_loss;

    let percent_based = inputs.monthly_rent
        * (operating.maintenance_rate + operating.capex_rate + operating.management_rate)
        / 100.0;
    let total_monthly_expenses =
        percent_based + operating.monthly_taxes + operating.monthly_insurance;

    let monthly_cash_flow_post_refi =
        effective_monthly_income - total_monthly_expenses - refi_monthly_payment;
    let annual_cash_flow = monthly_cash_flow_post_refi * 12.0;

    // -- ROI ----------------------------------------------------------------

    let (roi, is_infinite_return) = if cash_left_in_deal <= 0.0 {
        debug!(
            cash_left_in_deal,
            cash_out_amount, "Refinance returned all capital — infinite ROI"
        );
        (f64::INFINITY, true)
    } else {
        (annual_cash_flow / cash_left_in_deal * 100.0, false)
    };

    BrrrrCalculations {
        total_purchase_closing_costs,
        total_rehab_cost,
        total_holding_costs,
        total_initial_loan_interest,
        initial_loan_points_amount,
        total_financing_costs,
        total_project_cost,
        refinance_loan_amount,
        cash_left_in_deal,
        cash_out_amount,
        refi_monthly_payment,
        gross_monthly_income,
        effective_monthly_income,
        total_monthly_expenses,
        monthly_cash_flow_post_refi,
        annual_cash_flow,
        roi,
        is_infinite_return,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
