//! Rental (buy-and-hold) calculator.
//!
//! Derives the full set of hold metrics — cash to close, debt service,
//! NOI, cap rate, cash-on-cash, DSCR — from a property's purchase,
//! operating, and financing parameters. Pure and total: every ratio
//! with a nonpositive denominator comes back as 0, never an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::loan::{amortized_monthly_payment, sum_defaulted};

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Purchase, operating, and financing parameters for a rental property.
///
/// Monetary fields are dollars; `*_rate` and `*_percent` fields are
/// whole-number percents (8 = 8%). Rates apply annually unless the field
/// is named monthly. One-time fees and seller credits are optional on
/// the wire; absent means 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Financials {
    pub purchase_price: f64,
    pub rehab_cost: f64,
    pub down_payment_percent: f64,

    /// One entry per unit; the length is the unit count.
    pub monthly_rents: Vec<f64>,

    // Operating rates, percent of gross rent.
    pub vacancy_rate: f64,
    pub maintenance_rate: f64,
    pub management_rate: f64,
    pub capex_rate: f64,

    // Fixed monthly costs.
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    pub water_sewer: f64,
    pub street_lights: f64,
    pub gas: f64,
    pub electric: f64,
    pub landscaping: f64,
    pub hoa: f64,
    pub misc_monthly: f64,

    // Loan terms.
    pub loan_interest_rate: f64,
    pub loan_term_years: f64,
    pub origination_fee_percent: f64,

    // One-time closing fees.
    pub closing_fee: Option<f64>,
    pub processing_fee: Option<f64>,
    pub appraisal_fee: Option<f64>,
    pub title_fee: Option<f64>,
    pub broker_fee: Option<f64>,
    pub home_warranty_fee: Option<f64>,
    pub attorney_fee: Option<f64>,
    pub misc_fee: Option<f64>,

    // Seller credits, offsetting cash due at close.
    pub seller_tax_credit: Option<f64>,
    pub seller_sewer_credit: Option<f64>,
    pub seller_origination_credit: Option<f64>,
    pub seller_closing_credit: Option<f64>,
}

impl Financials {
    /// Number of units, one per rent entry.
    pub fn unit_count(&self) -> usize {
        self.monthly_rents.len()
    }

    /// Combined monthly rent across all units.
    pub fn gross_monthly_rent(&self) -> f64 {
        self.monthly_rents.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

/// Metrics derived from [`Financials`]. A pure value object with no
/// identity of its own — recomputed whenever the inputs change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedMetrics {
    pub down_payment_amount: f64,
    pub loan_amount: f64,
    pub origination_fee_amount: f64,
    pub total_closing_costs: f64,
    pub total_seller_credits: f64,
    pub total_cash_to_close: f64,
    pub total_investment: f64,
    pub monthly_debt_service: f64,
    pub gross_annual_income: f64,
    pub vacancy_loss: f64,
    pub effective_gross_income: f64,
    pub total_operating_expenses_annual: f64,
    pub net_operating_income_annual: f64,
    pub net_operating_income_monthly: f64,
    pub monthly_cash_flow_no_debt: f64,
    pub monthly_cash_flow_with_debt: f64,
    pub cap_rate: f64,
    pub all_in_cap_rate: f64,
    pub cash_on_cash_return: f64,
    pub dscr: f64,
}

impl fmt::Display for CalculatedMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cap {:.2}% | CoC {:.2}% | DSCR {:.2} | cash flow ${:.2}/mo | cash to close ${:.2}",
            self.cap_rate,
            self.cash_on_cash_return,
            self.dscr,
            self.monthly_cash_flow_with_debt,
            self.total_cash_to_close,
        )
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Compute all rental hold metrics from the given financials.
///
/// A loan with a positive balance but a 0% interest rate carries a 0
/// monthly payment (not straight-line). Ratio guards return exactly 0
/// on a nonpositive denominator; callers treat a 0 cap rate or DSCR as
/// "not applicable", not as zero performance.
pub fn calculate_metrics(financials: &Financials) -> CalculatedMetrics {
    // Acquisition: down payment, loan sizing, closing costs.
    let down_payment_amount = financials.purchase_price * financials.down_payment_percent / 100.0;
    let loan_amount = financials.purchase_price - down_payment_amount;

    let origination_fee_amount = loan_amount * financials.origination_fee_percent / 100.0;
    let other_closing_fees = sum_defaulted(&[
        financials.closing_fee,
        financials.processing_fee,
        financials.appraisal_fee,
        financials.title_fee,
        financials.broker_fee,
        financials.home_warranty_fee,
        financials.attorney_fee,
        financials.misc_fee,
    ]);
    let total_closing_costs = other_closing_fees + origination_fee_amount;

    let total_seller_credits = sum_defaulted(&[
        financials.seller_tax_credit,
        financials.seller_sewer_credit,
        financials.seller_origination_credit,
        financials.seller_closing_credit,
    ]);

    let total_cash_to_close =
        down_payment_amount + financials.rehab_cost + total_closing_costs - total_seller_credits;
    let total_investment = financials.purchase_price + financials.rehab_cost;

    // Debt service. A 0% rate yields a 0 payment on purpose.
    let monthly_debt_service = if loan_amount > 0.0 && financials.loan_interest_rate > 0.0 {
        amortized_monthly_payment(
            loan_amount,
            financials.loan_interest_rate,
            financials.loan_term_years * 12.0,
        )
    } else {
        0.0
    };

    // Income.
    let gross_annual_income = financials.gross_monthly_rent() * 12.0;
    let vacancy_loss = gross_annual_income * financials.vacancy_rate / 100.0;
    let effective_gross_income = gross_annual_income - vacancy_loss;

    // Operating expenses: percent-of-gross-rent items plus annualized
    // fixed monthly items.
    let percent_based = gross_annual_income
        * (financials.maintenance_rate + financials.management_rate + financials.capex_rate)
        / 100.0;
    let fixed_monthly = financials.monthly_taxes
        + financials.monthly_insurance
        + financials.water_sewer
        + financials.street_lights
        + financials.gas
        + financials.electric
        + financials.landscaping
        + financials.hoa
        + financials.misc_monthly;
    let total_operating_expenses_annual = percent_based + fixed_monthly * 12.0;

    let net_operating_income_annual = effective_gross_income - total_operating_expenses_annual;
    let net_operating_income_monthly = net_operating_income_annual / 12.0;

    let monthly_cash_flow_no_debt = net_operating_income_monthly;
    let monthly_cash_flow_with_debt = monthly_cash_flow_no_debt - monthly_debt_service;

    // Ratios, each guarded to 0 on a nonpositive denominator.
    let cap_rate = if financials.purchase_price > 0.0 {
        net_operating_income_annual / financials.purchase_price * 100.0
    } else {
        debug!(
            purchase_price = financials.purchase_price,
            "Nonpositive purchase price — cap rate reported as 0"
        );
        0.0
    };
    let all_in_cap_rate = if total_investment > 0.0 {
        net_operating_income_annual / total_investment * 100.0
    } else {
        0.0
    };
    let cash_on_cash_return = if total_cash_to_close > 0.0 {
        (monthly_cash_flow_with_debt * 12.0) / total_cash_to_close * 100.0
    } else {
        0.0
    };
    let annual_debt_service = monthly_debt_service * 12.0;
    let dscr = if annual_debt_service > 0.0 {
        net_operating_income_annual / annual_debt_service
    } else {
        0.0
    };

    CalculatedMetrics {
        down_payment_amount,
        loan_amount,
        origination_fee_amount,
        total_closing_costs,
        total_seller_credits,
        total_cash_to_close,
        total_investment,
        monthly_debt_service,
        gross_annual_income,
        vacancy_loss,
        effective_gross_income,
        total_operating_expenses_annual,
        net_operating_income_annual,
        net_operating_income_monthly,
        monthly_cash_flow_no_debt,
        monthly_cash_flow_with_debt,
        cap_rate,
        all_in_cap_rate,
        cash_on_cash_return,
        dscr,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Single-family scenario with clean round numbers.
    fn sample_financials() -> Financials {
        Financials {
            purchase_price: 200_000.0,
            down_payment_percent: 20.0,
            monthly_rents: vec![2000.0],
            vacancy_rate: 5.0,
            maintenance_rate: 5.0,
            management_rate: 10.0,
            capex_rate: 5.0,
            loan_interest_rate: 6.0,
            loan_term_years: 30.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let metrics = calculate_metrics(&sample_financials());

        assert!((metrics.down_payment_amount - 40_000.0).abs() < 1e-10);
        assert!((metrics.loan_amount - 160_000.0).abs() < 1e-10);
        assert!((metrics.gross_annual_income - 24_000.0).abs() < 1e-10);
        assert!((metrics.vacancy_loss - 1200.0).abs() < 1e-10);
        assert!((metrics.effective_gross_income - 22_800.0).abs() < 1e-10);

        // 20% of gross rent in operating rates, no fixed costs.
        assert!((metrics.total_operating_expenses_annual - 4800.0).abs() < 1e-10);
        assert!((metrics.net_operating_income_annual - 18_000.0).abs() < 1e-10);

        // Cap rate must match an independent recomputation.
        let expected_cap = metrics.net_operating_income_annual / 200_000.0 * 100.0;
        assert!((metrics.cap_rate - expected_cap).abs() < 1e-10);
        assert!((metrics.cap_rate - 9.0).abs() < 1e-10);
        assert!((metrics.all_in_cap_rate - 9.0).abs() < 1e-10);

        // $160k at 6%/30y.
        let expected_payment = amortized_monthly_payment(160_000.0, 6.0, 360.0);
        assert!((metrics.monthly_debt_service - expected_payment).abs() < 1e-10);
        assert!((metrics.monthly_debt_service - 959.28).abs() < 0.01);

        let expected_dscr = 18_000.0 / (expected_payment * 12.0);
        assert!((metrics.dscr - expected_dscr).abs() < 1e-10);
    }

    #[test]
    fn test_determinism() {
        let financials = sample_financials();
        let a = calculate_metrics(&financials);
        let b = calculate_metrics(&financials);
        assert_eq!(a, b);
    }

    #[test]
    fn test_cash_to_close_identity() {
        let financials = Financials {
            rehab_cost: 15_000.0,
            closing_fee: Some(3000.0),
            processing_fee: Some(500.0),
            appraisal_fee: Some(600.0),
            attorney_fee: Some(900.0),
            origination_fee_percent: 1.0,
            seller_tax_credit: Some(1200.0),
            seller_closing_credit: Some(800.0),
            ..sample_financials()
        };
        let metrics = calculate_metrics(&financials);

        let identity = metrics.down_payment_amount + financials.rehab_cost
            + metrics.total_closing_costs
            - metrics.total_seller_credits;
        assert!((metrics.total_cash_to_close - identity).abs() < 1e-10);
        assert!((metrics.total_seller_credits - 2000.0).abs() < 1e-10);
        // 1% origination on the $160k loan plus $5k in listed fees.
        assert!((metrics.total_closing_costs - 6600.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_interest_rate_zero_payment() {
        let financials = Financials {
            loan_interest_rate: 0.0,
            ..sample_financials()
        };
        let metrics = calculate_metrics(&financials);
        assert!(metrics.loan_amount > 0.0);
        assert_eq!(metrics.monthly_debt_service, 0.0);
        // No debt service means DSCR is reported as not-applicable.
        assert_eq!(metrics.dscr, 0.0);
    }

    #[test]
    fn test_nonpositive_purchase_price_guards() {
        let financials = Financials {
            purchase_price: 0.0,
            ..sample_financials()
        };
        let metrics = calculate_metrics(&financials);
        assert_eq!(metrics.cap_rate, 0.0);
        assert!(metrics.cap_rate.is_finite());

        let negative = Financials {
            purchase_price: -50_000.0,
            ..sample_financials()
        };
        assert_eq!(calculate_metrics(&negative).cap_rate, 0.0);
    }

    #[test]
    fn test_all_cash_no_cash_to_close_guard() {
        // 100% seller credits can push cash-to-close to zero; the
        // cash-on-cash guard must fire rather than divide.
        let financials = Financials {
            down_payment_percent: 0.0,
            loan_interest_rate: 0.0,
            seller_closing_credit: Some(1000.0),
            ..sample_financials()
        };
        let metrics = calculate_metrics(&financials);
        assert!(metrics.total_cash_to_close <= 0.0);
        assert_eq!(metrics.cash_on_cash_return, 0.0);
    }

    #[test]
    fn test_multi_unit_rents() {
        let financials = Financials {
            monthly_rents: vec![950.0, 1050.0, 1100.0],
            ..sample_financials()
        };
        assert_eq!(financials.unit_count(), 3);
        let metrics = calculate_metrics(&financials);
        assert!((metrics.gross_annual_income - 3100.0 * 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_fixed_costs_annualized() {
        let financials = Financials {
            monthly_taxes: 250.0,
            monthly_insurance: 100.0,
            hoa: 50.0,
            ..sample_financials()
        };
        let metrics = calculate_metrics(&financials);
        // 20% of 24k rent plus 12 × $400 fixed.
        assert!((metrics.total_operating_expenses_annual - (4800.0 + 4800.0)).abs() < 1e-10);
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let metrics = calculate_metrics(&sample_financials());
        let json = serde_json::to_value(&metrics).unwrap();
        assert!(json.get("totalCashToClose").is_some());
        assert!(json.get("monthlyDebtService").is_some());
        assert!(json.get("cashOnCashReturn").is_some());
        assert!(json.get("dscr").is_some());

        let inputs_json = serde_json::to_value(sample_financials()).unwrap();
        assert!(inputs_json.get("purchasePrice").is_some());
        assert!(inputs_json.get("monthlyRents").is_some());
        assert!(inputs_json.get("downPaymentPercent").is_some());
    }

    #[test]
    fn test_inputs_with_absent_fees_parse() {
        // Fee and credit fields omitted entirely on the wire.
        let json = r#"{
            "purchasePrice": 100000,
            "downPaymentPercent": 25,
            "monthlyRents": [1200],
            "vacancyRate": 5,
            "loanInterestRate": 7,
            "loanTermYears": 30
        }"#;
        let financials: Financials = serde_json::from_str(json).unwrap();
        assert!(financials.closing_fee.is_none());
        let metrics = calculate_metrics(&financials);
        assert!((metrics.down_payment_amount - 25_000.0).abs() < 1e-10);
        assert!((metrics.total_closing_costs - 0.0).abs() < 1e-10);
    }
}
