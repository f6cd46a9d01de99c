//! Red-flag detection dataset: container, builder, JSON cache

use crate::dataset::{Company, FilterStrategy, GREEN_FLAG_LABEL};
use crate::error::{FinbenchError, FinbenchResult};
use crate::fd::FinancialDatasetsClient;
use std::collections::BTreeSet;
use std::path::Path;

/// Dataset of labeled companies for red-flag classification
#[derive(Debug, Clone)]
pub struct RedFlagDataset {
    companies: Vec<Company>,
}

impl RedFlagDataset {
    /// Create a dataset from a list of companies
    pub fn new(companies: Vec<Company>) -> Self {
        Self { companies }
    }

    /// All companies in the dataset
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    /// Companies with red-flag labels
    pub fn red_flag_companies(&self) -> Vec<&Company> {
        self.companies.iter().filter(|c| c.is_red_flag()).collect()
    }

    /// Companies with the green-flag label
    pub fn green_flag_companies(&self) -> Vec<&Company> {
        self.companies
            .iter()
            .filter(|c| c.label == GREEN_FLAG_LABEL)
            .collect()
    }

    /// Companies with a specific label
    pub fn companies_by_label(&self, label: &str) -> Vec<&Company> {
        self.companies.iter().filter(|c| c.label == label).collect()
    }

    /// All unique labels in the dataset
    pub fn labels(&self) -> BTreeSet<String> {
        self.companies.iter().map(|c| c.label.clone()).collect()
    }

    /// Number of companies in the dataset
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    /// Whether the dataset is empty
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Save the dataset to a JSON file
    pub fn save_to_json(&self, path: &Path) -> FinbenchResult<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.companies)?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), "dataset saved");
        Ok(())
    }

    /// Load a dataset from a JSON file; `None` when the file does not exist
    pub fn load_from_json(path: &Path) -> FinbenchResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        let companies: Vec<Company> = serde_json::from_str(&content)
            .map_err(|e| FinbenchError::dataset(format!("invalid dataset file: {}", e)))?;
        tracing::info!(path = %path.display(), companies = companies.len(), "dataset loaded");
        Ok(Some(Self::new(companies)))
    }
}

/// Builder for [`RedFlagDataset`] with configurable filter strategies
pub struct RedFlagDatasetBuilder {
    strategies: Vec<Box<dyn FilterStrategy>>,
    limit: u32,
    period: String,
}

impl Default for RedFlagDatasetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RedFlagDatasetBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
            limit: 5,
            period: "ttm".to_string(),
        }
    }

    /// Add the financial-health-issues filter
    pub fn with_financial_health_issues(self) -> Self {
        self.with_custom_filter(Box::new(super::FinancialHealthIssuesFilter))
    }

    /// Add the declining-profitability filter
    pub fn with_declining_profitability(self) -> Self {
        self.with_custom_filter(Box::new(super::DecliningProfitabilityFilter))
    }

    /// Add the earnings-decline filter
    pub fn with_earnings_decline(self) -> Self {
        self.with_custom_filter(Box::new(super::EarningsDeclineFilter))
    }

    /// Add the bankruptcy-risk filter
    pub fn with_bankruptcy_risk(self) -> Self {
        self.with_custom_filter(Box::new(super::BankruptcyRiskFilter))
    }

    /// Add the inefficient-operations filter
    pub fn with_inefficient_operations(self) -> Self {
        self.with_custom_filter(Box::new(super::InefficientOperationsFilter))
    }

    /// Add the green-flag filter
    pub fn with_green_flags(self) -> Self {
        self.with_custom_filter(Box::new(super::GreenFlagFilter))
    }

    /// Add every red-flag filter
    pub fn with_all_red_flags(self) -> Self {
        self.with_financial_health_issues()
            .with_declining_profitability()
            .with_earnings_decline()
            .with_bankruptcy_risk()
            .with_inefficient_operations()
    }

    /// Add a custom filter strategy
    pub fn with_custom_filter(mut self, strategy: Box<dyn FilterStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Set the per-filter search result limit
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the reporting period ("ttm", "annual")
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = period.into();
        self
    }

    /// Run the configured searches and fetch each hit's metrics snapshot
    pub async fn build(self, fd_client: &FinancialDatasetsClient) -> FinbenchResult<RedFlagDataset> {
        if self.strategies.is_empty() {
            return Err(FinbenchError::dataset(
                "at least one filter strategy must be added before building the dataset",
            ));
        }

        let mut companies = Vec::new();
        for strategy in &self.strategies {
            let hits = fd_client
                .search(&strategy.filters(), strategy.label(), &self.period, self.limit)
                .await?;
            tracing::info!(label = strategy.label(), hits = hits.len(), "search complete");

            for mut company in hits {
                company.financial_metrics = fd_client.financial_metrics(&company.ticker).await?;
                companies.push(company);
            }
        }

        Ok(RedFlagDataset::new(companies))
    }
}

/// Load the dataset from its JSON cache, building (and caching) it from the
/// API when absent
pub async fn load_or_build(
    path: &Path,
    fd_client: &FinancialDatasetsClient,
) -> FinbenchResult<RedFlagDataset> {
    if let Some(dataset) = RedFlagDataset::load_from_json(path)? {
        return Ok(dataset);
    }

    tracing::info!("no cached dataset found, building from API");
    let dataset = RedFlagDatasetBuilder::new()
        .with_all_red_flags()
        .with_green_flags()
        .build(fd_client)
        .await?;
    dataset.save_to_json(path)?;
    Ok(dataset)
}
