//! Deal record and analysis report.
//!
//! The deal is the parent record that owns one optional inputs section
//! per strategy and embeds the matching calculations. Calculations are
//! value objects with no identity of their own — `recompute_all`
//! refreshes every populated section wholesale. JSON file load/save is
//! provided for the analyzer shell; the application's real persistence
//! layer lives elsewhere.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

use crate::strategy::brrrr::{self, BrrrrCalculations, BrrrrInputs};
use crate::strategy::rental::{self, CalculatedMetrics, Financials};
use crate::strategy::seller_financing::{
    self, SellerFinancingCalculations, SellerFinancingInputs,
};
use crate::strategy::subject_to::{self, SubjectToCalculations, SubjectToInputs};
use crate::strategy::wholesale::{self, WholesaleCalculations, WholesaleInputs};
use crate::types::Strategy;

// ---------------------------------------------------------------------------
// Deal record
// ---------------------------------------------------------------------------

/// A property under analysis, with per-strategy inputs and their
/// derived calculations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deal {
    pub id: Uuid,
    pub address: String,
    pub created_at: DateTime<Utc>,
    /// When the calculations were last refreshed.
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financials: Option<Financials>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calculated_metrics: Option<CalculatedMetrics>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_inputs: Option<WholesaleInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_calculations: Option<WholesaleCalculations>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_to_inputs: Option<SubjectToInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_to_calculations: Option<SubjectToCalculations>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_financing_inputs: Option<SellerFinancingInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_financing_calculations: Option<SellerFinancingCalculations>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brrrr_inputs: Option<BrrrrInputs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brrrr_calculations: Option<BrrrrCalculations>,
}

impl Deal {
    /// Create an empty deal for the given address.
    pub fn new(address: &str) -> Self {
        Deal {
            id: Uuid::new_v4(),
            address: address.to_string(),
            created_at: Utc::now(),
            analyzed_at: None,
            financials: None,
            calculated_metrics: None,
            wholesale_inputs: None,
            wholesale_calculations: None,
            subject_to_inputs: None,
            subject_to_calculations: None,
            seller_financing_inputs: None,
            seller_financing_calculations: None,
            brrrr_inputs: None,
            brrrr_calculations: None,
        }
    }

    /// The strategies this deal carries inputs for.
    pub fn populated_strategies(&self) -> Vec<Strategy> {
        let mut strategies = Vec::new();
        if self.financials.is_some() {
            strategies.push(Strategy::Rental);
        }
        if self.wholesale_inputs.is_some() {
            strategies.push(Strategy::Wholesale);
        }
        if self.subject_to_inputs.is_some() {
            strategies.push(Strategy::SubjectTo);
        }
        if self.seller_financing_inputs.is_some() {
            strategies.push(Strategy::SellerFinancing);
        }
        if self.brrrr_inputs.is_some() {
            strategies.push(Strategy::Brrrr);
        }
        strategies
    }

    /// Recompute the calculations for every populated strategy section.
    /// Returns the number of strategies refreshed.
    pub fn recompute_all(&mut self) -> usize {
        let mut refreshed = 0;

        if let Some(financials) = &self.financials {
            self.calculated_metrics = Some(rental::calculate_metrics(financials));
            refreshed += 1;
        }
        if let Some(inputs) = &self.wholesale_inputs {
            self.wholesale_calculations = Some(wholesale::calculate_wholesale(inputs));
            refreshed += 1;
        }
        if let Some(inputs) = &self.subject_to_inputs {
            self.subject_to_calculations = Some(subject_to::calculate_subject_to(inputs));
            refreshed += 1;
        }
        if let Some(inputs) = &self.seller_financing_inputs {
            self.seller_financing_calculations =
                Some(seller_financing::calculate_seller_financing(inputs));
            refreshed += 1;
        }
        if let Some(inputs) = &self.brrrr_inputs {
            self.brrrr_calculations = Some(brrrr::calculate_brrrr(inputs));
            refreshed += 1;
        }

        if refreshed > 0 {
            self.analyzed_at = Some(Utc::now());
        }
        debug!(deal_id = %self.id, refreshed, "Calculations recomputed");
        refreshed
    }
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Load a deal record from a JSON file.
pub fn load_deal(path: &str) -> Result<Deal> {
    let json = std::fs::read_to_string(path)
        .context(format!("Failed to read deal from {path}"))?;

    let deal: Deal =
        serde_json::from_str(&json).context(format!("Failed to parse deal from {path}"))?;

    info!(
        path,
        deal_id = %deal.id,
        address = %deal.address,
        strategies = deal.populated_strategies().len(),
        "Deal loaded from disk"
    );

    Ok(deal)
}

/// Save a deal record to a JSON file.
pub fn save_deal(deal: &Deal, path: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(deal).context("Failed to serialise deal")?;

    std::fs::write(path, &json).context(format!("Failed to write deal to {path}"))?;

    debug!(path, deal_id = %deal.id, "Deal saved");
    Ok(())
}

/// Delete a deal file (for testing or reset).
pub fn delete_deal(path: &str) -> Result<()> {
    if Path::new(path).exists() {
        std::fs::remove_file(path).context(format!("Failed to delete deal file {path}"))?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Analysis report
// ---------------------------------------------------------------------------

/// Human-readable summary of a recomputed deal — one headline line per
/// populated strategy.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub deal_id: Uuid,
    pub address: String,
    pub timestamp: DateTime<Utc>,
    pub summaries: Vec<(Strategy, String)>,
}

impl AnalysisReport {
    /// Build a report from the deal's current calculations.
    pub fn from_deal(deal: &Deal) -> Self {
        let mut summaries = Vec::new();

        if let Some(c) = &deal.calculated_metrics {
            summaries.push((Strategy::Rental, c.to_string()));
        }
        if let Some(c) = &deal.wholesale_calculations {
            summaries.push((Strategy::Wholesale, c.to_string()));
        }
        if let Some(c) = &deal.subject_to_calculations {
            summaries.push((Strategy::SubjectTo, c.to_string()));
        }
        if let Some(c) = &deal.seller_financing_calculations {
            summaries.push((Strategy::SellerFinancing, c.to_string()));
        }
        if let Some(c) = &deal.brrrr_calculations {
            summaries.push((Strategy::Brrrr, c.to_string()));
        }

        AnalysisReport {
            deal_id: deal.id,
            address: deal.address.clone(),
            timestamp: deal.analyzed_at.unwrap_or(deal.created_at),
            summaries,
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis — {} [{}]", self.address, self.deal_id)?;
        if self.summaries.is_empty() {
            return write!(f, "  (no strategies computed)");
        }
        for (i, (strategy, line)) in self.summaries.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {strategy:<16} {line}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> String {
        let mut p = std::env::temp_dir();
        p.push(format!("dealscope_test_deal_{}.json", Uuid::new_v4()));
        p.to_string_lossy().to_string()
    }

    fn sample_deal() -> Deal {
        let mut deal = Deal::new("12 Maplewood Ave, Dayton OH");
        deal.financials = Some(Financials {
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
        });
        deal.subject_to_inputs = Some(SubjectToInputs {
            market_rent: 1500.0,
            monthly_piti: 1000.0,
            reinstatement_needed: 5000.0,
            seller_cash_needed: 2000.0,
            closing_costs: 1000.0,
        });
        deal
    }

    #[test]
    fn test_new_deal_is_empty() {
        let deal = Deal::new("1 Elm St");
        assert!(deal.populated_strategies().is_empty());
        assert!(deal.analyzed_at.is_none());
        assert!(deal.calculated_metrics.is_none());
    }

    #[test]
    fn test_recompute_all_refreshes_populated_sections() {
        let mut deal = sample_deal();
        let refreshed = deal.recompute_all();

        assert_eq!(refreshed, 2);
        assert!(deal.analyzed_at.is_some());
        assert!(deal.calculated_metrics.is_some());
        assert!(deal.subject_to_calculations.is_some());
        assert!(deal.wholesale_calculations.is_none());

        let subject_to = deal.subject_to_calculations.as_ref().unwrap();
        assert!((subject_to.cash_on_cash_return - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_recompute_all_empty_deal_is_noop() {
        let mut deal = Deal::new("1 Elm St");
        assert_eq!(deal.recompute_all(), 0);
        assert!(deal.analyzed_at.is_none());
    }

    #[test]
    fn test_recompute_replaces_stale_calculations() {
        let mut deal = sample_deal();
        deal.recompute_all();
        let first_cap = deal.calculated_metrics.as_ref().unwrap().cap_rate;

        // Inputs change; the embedded calculations are derived state
        // and must follow.
        deal.financials.as_mut().unwrap().purchase_price = 250_000.0;
        deal.recompute_all();
        let second_cap = deal.calculated_metrics.as_ref().unwrap().cap_rate;
        assert!(second_cap < first_cap);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path();
        let mut deal = sample_deal();
        deal.recompute_all();
        save_deal(&deal, &path).unwrap();

        let loaded = load_deal(&path).unwrap();
        assert_eq!(loaded.id, deal.id);
        assert_eq!(loaded.address, deal.address);
        assert_eq!(
            loaded.calculated_metrics.as_ref().unwrap(),
            deal.calculated_metrics.as_ref().unwrap()
        );

        delete_deal(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_errors() {
        let result = load_deal("/tmp/dealscope_nonexistent_deal_12345.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_sections_are_omitted_from_json() {
        let deal = Deal::new("1 Elm St");
        let json = serde_json::to_value(&deal).unwrap();
        assert!(json.get("financials").is_none());
        assert!(json.get("wholesaleInputs").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_report_lists_each_computed_strategy() {
        let mut deal = sample_deal();
        deal.recompute_all();
        let report = AnalysisReport::from_deal(&deal);

        assert_eq!(report.summaries.len(), 2);
        assert_eq!(report.summaries[0].0, Strategy::Rental);
        assert_eq!(report.summaries[1].0, Strategy::SubjectTo);

        let rendered = format!("{report}");
        assert!(rendered.contains("Maplewood"));
        assert!(rendered.contains("Subject-To"));
        assert!(rendered.contains("CoC 75.00%"));
    }

    #[test]
    fn test_report_for_empty_deal() {
        let deal = Deal::new("1 Elm St");
        let report = AnalysisReport::from_deal(&deal);
        assert!(report.summaries.is_empty());
        assert!(format!("{report}").contains("no strategies computed"));
    }
}
