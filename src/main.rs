//! DEALSCOPE — Real-Estate Investment Deal Analysis Engine
//!
//! Entry point. Loads configuration, initialises structured logging,
//! reads the deal record named on the command line, recomputes every
//! populated strategy, and prints the analysis.

use anyhow::{Context, Result};
use tracing::{info, warn};

use dealscope::config::AppConfig;
use dealscope::deal::{self, AnalysisReport};

const BANNER: &str = r#"
 ____  _____    _    _     ____   ____ ___  ____  _____
|  _ \| ____|  / \  | |   / ___| / ___/ _ \|  _ \| ____|
| | | |  _|   / _ \ | |   \___ \| |  | | | | |_) |  _|
| |_| | |___ / ___ \| |___ ___) | |__| |_| |  __/| |___
|____/|_____/_/   \_\_____|____/ \____\___/|_|   |_____|

  Real-Estate Investment Deal Analysis Engine
  v0.1.0
"#;

fn main() -> Result<()> {
    // Load configuration from TOML (defaults when absent)
    let cfg = AppConfig::load_or_default("config.toml")?;

    // Initialise structured logging
    init_logging();

    // Print startup banner
    println!("{BANNER}");

    let path = std::env::args()
        .nth(1)
        .context("Usage: dealscope <deal.json>")?;

    info!(
        app_name = %cfg.app.name,
        currency = %cfg.app.currency,
        deal_file = %path,
        "DEALSCOPE starting up"
    );

    // -- Load, recompute, report ------------------------------------------

    let mut deal = deal::load_deal(&path)?;

    let refreshed = deal.recompute_all();
    if refreshed == 0 {
        warn!(
            deal_id = %deal.id,
            "Deal carries no strategy inputs — nothing to compute"
        );
    }

    let report = AnalysisReport::from_deal(&deal);
    println!("{report}");
    println!();

    if cfg.report.print_json {
        println!("{}", serde_json::to_string_pretty(&deal)?);
    }

    if cfg.report.write_back {
        deal::save_deal(&deal, &path)?;
        info!(deal_file = %path, "Recomputed record written back");
    }

    info!(
        deal_id = %deal.id,
        strategies = refreshed,
        "Analysis complete"
    );

    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dealscope=info"));

    let json_logging = std::env::var("DEALSCOPE_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    } else {
        fmt().with_env_filter(env_filter).with_target(true).init();
    }
}
