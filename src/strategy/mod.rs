//! Strategy calculators — one pure function per acquisition strategy,
//! plus the tagged dispatch boundary for callers that recompute a deal
//! generically.
//!
//! Each calculator is free-standing and independently callable; none
//! calls another. The enums here exist only at the recompute boundary.

pub mod brrrr;
pub mod loan;
pub mod rental;
pub mod seller_financing;
pub mod subject_to;
pub mod wholesale;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Strategy;
use brrrr::{BrrrrCalculations, BrrrrInputs};
use rental::{CalculatedMetrics, Financials};
use seller_financing::{SellerFinancingCalculations, SellerFinancingInputs};
use subject_to::{SubjectToCalculations, SubjectToInputs};
use wholesale::{WholesaleCalculations, WholesaleInputs};

// ---------------------------------------------------------------------------
// Dispatch boundary
// ---------------------------------------------------------------------------

/// Inputs for any one strategy, discriminated by a `strategy` tag on
/// the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum StrategyInputs {
    Rental(Financials),
    Wholesale(WholesaleInputs),
    SubjectTo(SubjectToInputs),
    SellerFinancing(SellerFinancingInputs),
    Brrrr(BrrrrInputs),
}

impl StrategyInputs {
    /// The strategy these inputs belong to.
    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyInputs::Rental(_) => Strategy::Rental,
            StrategyInputs::Wholesale(_) => Strategy::Wholesale,
            StrategyInputs::SubjectTo(_) => Strategy::SubjectTo,
            StrategyInputs::SellerFinancing(_) => Strategy::SellerFinancing,
            StrategyInputs::Brrrr(_) => Strategy::Brrrr,
        }
    }
}

/// Calculations for any one strategy, mirroring [`StrategyInputs`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "camelCase")]
pub enum StrategyCalculations {
    Rental(CalculatedMetrics),
    Wholesale(WholesaleCalculations),
    SubjectTo(SubjectToCalculations),
    SellerFinancing(SellerFinancingCalculations),
    Brrrr(BrrrrCalculations),
}

impl StrategyCalculations {
    /// The strategy these calculations belong to.
    pub fn strategy(&self) -> Strategy {
        match self {
            StrategyCalculations::Rental(_) => Strategy::Rental,
            StrategyCalculations::Wholesale(_) => Strategy::Wholesale,
            StrategyCalculations::SubjectTo(_) => Strategy::SubjectTo,
            StrategyCalculations::SellerFinancing(_) => Strategy::SellerFinancing,
            StrategyCalculations::Brrrr(_) => Strategy::Brrrr,
        }
    }
}

impl fmt::Display for StrategyCalculations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyCalculations::Rental(c) => write!(f, "{c}"),
            StrategyCalculations::Wholesale(c) => write!(f, "{c}"),
            StrategyCalculations::SubjectTo(c) => write!(f, "{c}"),
            StrategyCalculations::SellerFinancing(c) => write!(f, "{c}"),
            StrategyCalculations::Brrrr(c) => write!(f, "{c}"),
        }
    }
}

/// Recompute the calculations for one strategy's inputs.
///
/// Pure dispatch over the five calculators; total, like each of them.
pub fn recompute(inputs: &StrategyInputs) -> StrategyCalculations {
    match inputs {
        StrategyInputs::Rental(f) => StrategyCalculations::Rental(rental::calculate_metrics(f)),
        StrategyInputs::Wholesale(w) => {
            StrategyCalculations::Wholesale(wholesale::calculate_wholesale(w))
        }
        StrategyInputs::SubjectTo(s) => {
            StrategyCalculations::SubjectTo(subject_to::calculate_subject_to(s))
        }
        StrategyInputs::SellerFinancing(s) => StrategyCalculations::SellerFinancing(
            seller_financing::calculate_seller_financing(s),
        ),
        StrategyInputs::Brrrr(b) => StrategyCalculations::Brrrr(brrrr::calculate_brrrr(b)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_covers_every_strategy() {
        let inputs = vec![
            StrategyInputs::Rental(Financials {
                purchase_price: 100_000.0,
                monthly_rents: vec![1000.0],
                ..Default::default()
            }),
            StrategyInputs::Wholesale(WholesaleInputs {
                arv: 150_000.0,
                mao_percent: 70.0,
                ..Default::default()
            }),
            StrategyInputs::SubjectTo(SubjectToInputs {
                market_rent: 1500.0,
                monthly_piti: 1000.0,
                closing_costs: 2000.0,
                ..Default::default()
            }),
            StrategyInputs::SellerFinancing(SellerFinancingInputs {
                purchase_price: 110_000.0,
                down_payment: 10_000.0,
                interest_rate: 6.0,
                term_years: 30.0,
                ..Default::default()
            }),
            StrategyInputs::Brrrr(BrrrrInputs {
                purchase_price: 80_000.0,
                arv: 160_000.0,
                ..Default::default()
            }),
        ];

        for input in &inputs {
            let calc = recompute(input);
            assert_eq!(calc.strategy(), input.strategy());
        }
    }

    #[test]
    fn test_wire_tag_is_strategy_name() {
        let inputs = StrategyInputs::SubjectTo(SubjectToInputs::default());
        let json = serde_json::to_value(&inputs).unwrap();
        assert_eq!(json.get("strategy").unwrap(), &serde_json::json!("subjectTo"));

        let calc = recompute(&inputs);
        let json = serde_json::to_value(&calc).unwrap();
        assert_eq!(json.get("strategy").unwrap(), &serde_json::json!("subjectTo"));
    }

    #[test]
    fn test_tagged_inputs_roundtrip() {
        let json = r#"{
            "strategy": "wholesale",
            "arv": 200000,
            "maoPercent": 70,
            "estimatedRehab": 25000,
            "closingCost": 3000,
            "wholesaleFeeGoal": 10000,
            "sellerAsk": 90000
        }"#;
        let inputs: StrategyInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.strategy(), Strategy::Wholesale);

        match recompute(&inputs) {
            StrategyCalculations::Wholesale(c) => {
                assert!((c.mao - 102_000.0).abs() < 1e-10);
                assert!(c.is_eligible);
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_recompute_is_deterministic_across_variants() {
        let inputs = StrategyInputs::Brrrr(BrrrrInputs {
            purchase_price: 90_000.0,
            arv: 150_000.0,
            monthly_rent: 1300.0,
            ..Default::default()
        });
        let a = serde_json::to_string(&recompute(&inputs)).unwrap();
        let b = serde_json::to_string(&recompute(&inputs)).unwrap();
        assert_eq!(a, b);
    }
}
