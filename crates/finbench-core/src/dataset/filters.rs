//! Filter strategies for dataset selection
//!
//! Each strategy is one search-API query plus the label its hits receive.

use crate::fd::SearchFilter;

/// A named filter configuration for the financials search endpoint
pub trait FilterStrategy: Send + Sync {
    /// Filter criteria for this strategy
    fn filters(&self) -> Vec<SearchFilter>;

    /// Label assigned to companies found with this strategy
    fn label(&self) -> &str;
}

/// Companies with poor liquidity and heavy debt loads
pub struct FinancialHealthIssuesFilter;

impl FilterStrategy for FinancialHealthIssuesFilter {
    fn filters(&self) -> Vec<SearchFilter> {
        vec![
            SearchFilter::lt("current_ratio", 1.0),
            SearchFilter::lt("quick_ratio", 0.8),
            SearchFilter::gt("debt_to_equity", 2.0),
            SearchFilter::gt("total_debt", 2_000_000_000i64),
        ]
    }

    fn label(&self) -> &str {
        "Financial Health Issues"
    }
}

/// Companies with thin or negative margins
pub struct DecliningProfitabilityFilter;

impl FilterStrategy for DecliningProfitabilityFilter {
    fn filters(&self) -> Vec<SearchFilter> {
        vec![
            SearchFilter::lt("net_margin", 5.0),
            SearchFilter::lt("operating_margin", 5.0),
            SearchFilter::lt("net_income", 0),
        ]
    }

    fn label(&self) -> &str {
        "Declining Profitability"
    }
}

/// Companies shrinking on every growth axis
pub struct EarningsDeclineFilter;

impl FilterStrategy for EarningsDeclineFilter {
    fn filters(&self) -> Vec<SearchFilter> {
        vec![
            SearchFilter::lt("earnings_growth", 0),
            SearchFilter::lt("free_cash_flow_growth", 0),
            SearchFilter::lt("revenue_growth", 0),
        ]
    }

    fn label(&self) -> &str {
        "Earnings Decline"
    }
}

/// Companies with bankruptcy-risk indicators
pub struct BankruptcyRiskFilter;

impl FilterStrategy for BankruptcyRiskFilter {
    fn filters(&self) -> Vec<SearchFilter> {
        vec![
            SearchFilter::lt("operating_cash_flow", 0),
            SearchFilter::lt("interest_coverage", 1.5),
            SearchFilter::lt("cash_ratio", 0.5),
        ]
    }

    fn label(&self) -> &str {
        "Bankruptcy Risk"
    }
}

/// Companies with inefficient operational metrics
pub struct InefficientOperationsFilter;

impl FilterStrategy for InefficientOperationsFilter {
    fn filters(&self) -> Vec<SearchFilter> {
        vec![
            SearchFilter::lt("inventory_turnover", 2.0),
            SearchFilter::lt("receivables_turnover", 4.0),
            SearchFilter::lt("asset_turnover", 0.5),
        ]
    }

    fn label(&self) -> &str {
        "Inefficient Operations"
    }
}

/// Companies with strong fundamentals across the board
pub struct GreenFlagFilter;

impl FilterStrategy for GreenFlagFilter {
    fn filters(&self) -> Vec<SearchFilter> {
        vec![
            SearchFilter::gte("net_income", 250_000_000i64),
            SearchFilter::lt("total_debt", 2_000_000_000i64),
            SearchFilter::gte("current_ratio", 1.2),
            SearchFilter::gte("free_cash_flow", 100_000_000i64),
        ]
    }

    fn label(&self) -> &str {
        super::GREEN_FLAG_LABEL
    }
}
