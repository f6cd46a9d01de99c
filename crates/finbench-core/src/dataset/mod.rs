//! Evaluation datasets
//!
//! Input items are immutable once loaded; the harness only reads them. Both
//! datasets cache to JSON so repeated runs do not hit the data API.

mod filters;
mod financials;
mod red_flags;

pub use filters::{
    BankruptcyRiskFilter, DecliningProfitabilityFilter, EarningsDeclineFilter, FilterStrategy,
    FinancialHealthIssuesFilter, GreenFlagFilter, InefficientOperationsFilter,
};
pub use financials::FinancialsDataset;
pub use red_flags::{RedFlagDataset, RedFlagDatasetBuilder, load_or_build};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Label assigned to companies selected for healthy fundamentals
pub const GREEN_FLAG_LABEL: &str = "Green Flag";

/// One classification input item: a company, its dataset label, and the
/// metrics snapshot shown to the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    /// Ticker symbol
    pub ticker: String,
    /// Label of the filter that selected this company
    pub label: String,
    /// Financial-metrics snapshot, opaque to the harness
    #[serde(default)]
    pub financial_metrics: Value,
}

impl Company {
    /// Create a company with an empty metrics snapshot
    pub fn new(ticker: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            label: label.into(),
            financial_metrics: Value::Object(serde_json::Map::new()),
        }
    }

    /// Ground truth for red-flag classification: anything not selected by the
    /// green-flag filter counts as a red flag
    pub fn is_red_flag(&self) -> bool {
        self.label != GREEN_FLAG_LABEL
    }
}

/// One regression input item: a company filing with its income-statement
/// XBRL facts and the known cost of revenue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationCompany {
    /// Ticker symbol
    pub ticker: String,
    /// SEC central index key
    #[serde(default)]
    pub cik: Option<String>,
    /// Filing type (10-Q, 10-K)
    #[serde(default)]
    pub filing_type: Option<String>,
    /// Report period end date
    #[serde(default)]
    pub report_period: Option<String>,
    /// Income-statement XBRL facts, opaque to the harness
    #[serde(default)]
    pub xbrl_facts: Vec<Value>,
    /// Ground-truth cost of revenue, when known
    #[serde(default)]
    pub cost_of_revenue: Option<f64>,
}

impl CalculationCompany {
    /// Whether any fact carries the given XBRL concept
    pub fn has_concept(&self, concept: &str) -> bool {
        self.xbrl_facts
            .iter()
            .any(|fact| fact["concept"].as_str() == Some(concept))
    }
}
