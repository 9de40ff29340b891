//! Shared types for the DEALSCOPE engine.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that the strategy calculators,
//! the deal record, and the analyzer shell can depend on them without
//! circular references.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Strategy discriminant
// ---------------------------------------------------------------------------

/// Acquisition strategy for a deal. Each strategy has its own inputs and
/// calculations pair; the discriminant exists for dispatch and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Strategy {
    Rental,
    Wholesale,
    SubjectTo,
    SellerFinancing,
    Brrrr,
}

impl Strategy {
    /// All known strategies (useful for iteration).
    pub const ALL: &'static [Strategy] = &[
        Strategy::Rental,
        Strategy::Wholesale,
        Strategy::SubjectTo,
        Strategy::SellerFinancing,
        Strategy::Brrrr,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rental => write!(f, "Rental"),
            Strategy::Wholesale => write!(f, "Wholesale"),
            Strategy::SubjectTo => write!(f, "Subject-To"),
            Strategy::SellerFinancing => write!(f, "Seller Financing"),
            Strategy::Brrrr => write!(f, "BRRRR"),
        }
    }
}

/// Attempt to parse a string into a Strategy (case-insensitive).
impl std::str::FromStr for Strategy {
    type Err = DealscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "rental" | "rent" | "buyandhold" => Ok(Strategy::Rental),
            "wholesale" | "wholesaling" => Ok(Strategy::Wholesale),
            "subjectto" | "subto" => Ok(Strategy::SubjectTo),
            "sellerfinancing" | "sellerfinance" | "ownerfinancing" => {
                Ok(Strategy::SellerFinancing)
            }
            "brrrr" => Ok(Strategy::Brrrr),
            _ => Err(DealscopeError::UnknownStrategy(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the analyzer shell.
///
/// The calculators themselves are total and never produce these; errors
/// originate at the configuration and deal-file boundaries.
#[derive(Debug, thiserror::Error)]
pub enum DealscopeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Deal file error ({path}): {message}")]
    DealFile { path: String, message: String },

    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
