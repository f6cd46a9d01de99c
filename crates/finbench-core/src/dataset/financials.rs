//! Financials-calculation dataset: container and JSON loading

use crate::dataset::CalculationCompany;
use crate::error::{FinbenchError, FinbenchResult};
use std::collections::BTreeSet;
use std::path::Path;

/// Dataset of company filings with XBRL facts for cost-of-revenue extraction
#[derive(Debug, Clone)]
pub struct FinancialsDataset {
    companies: Vec<CalculationCompany>,
}

impl FinancialsDataset {
    /// Create a dataset from a list of filings
    pub fn new(companies: Vec<CalculationCompany>) -> Self {
        Self { companies }
    }

    /// All companies in the dataset
    pub fn companies(&self) -> &[CalculationCompany] {
        &self.companies
    }

    /// Companies with a specific ticker symbol
    pub fn companies_by_ticker(&self, ticker: &str) -> Vec<&CalculationCompany> {
        self.companies.iter().filter(|c| c.ticker == ticker).collect()
    }

    /// Companies with a specific filing type (e.g. "10-Q", "10-K")
    pub fn companies_by_filing_type(&self, filing_type: &str) -> Vec<&CalculationCompany> {
        self.companies
            .iter()
            .filter(|c| c.filing_type.as_deref() == Some(filing_type))
            .collect()
    }

    /// Companies carrying a specific XBRL concept in their facts
    pub fn companies_with_concept(&self, concept: &str) -> Vec<&CalculationCompany> {
        self.companies
            .iter()
            .filter(|c| c.has_concept(concept))
            .collect()
    }

    /// All unique XBRL concepts in the dataset
    pub fn concepts(&self) -> BTreeSet<String> {
        self.companies
            .iter()
            .flat_map(|c| c.xbrl_facts.iter())
            .filter_map(|fact| fact["concept"].as_str())
            .map(|s| s.to_string())
            .collect()
    }

    /// All unique ticker symbols in the dataset
    pub fn tickers(&self) -> BTreeSet<String> {
        self.companies.iter().map(|c| c.ticker.clone()).collect()
    }

    /// Total number of XBRL facts across all companies
    pub fn total_facts(&self) -> usize {
        self.companies.iter().map(|c| c.xbrl_facts.len()).sum()
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

    /// Load a dataset from a JSON file
    pub fn load_from_json(path: &Path) -> FinbenchResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FinbenchError::dataset(format!("cannot read {}: {}", path.display(), e))
        })?;
        let companies: Vec<CalculationCompany> = serde_json::from_str(&content)
            .map_err(|e| FinbenchError::dataset(format!("invalid dataset file: {}", e)))?;
        tracing::info!(path = %path.display(), companies = companies.len(), "dataset loaded");
        Ok(Self::new(companies))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_dataset() -> FinancialsDataset {
        FinancialsDataset::new(vec![
            CalculationCompany {
                ticker: "ACME".to_string(),
                cik: Some("0000001".to_string()),
                filing_type: Some("10-K".to_string()),
                report_period: Some("2025-06-30".to_string()),
                xbrl_facts: vec![
                    json!({"concept": "us-gaap:Revenues", "numeric_value": 1_615_709_000.0}),
                    json!({"concept": "us-gaap:GrossProfit", "numeric_value": 341_328_000.0}),
                ],
                cost_of_revenue: Some(1_274_381_000.0),
            },
            CalculationCompany {
                ticker: "BOLT".to_string(),
                cik: None,
                filing_type: Some("10-Q".to_string()),
                report_period: None,
                xbrl_facts: vec![json!({
                    "concept": "us-gaap:CostOfRevenue",
                    "numeric_value": 26_932_000.0
                })],
                cost_of_revenue: Some(26_932_000.0),
            },
        ])
    }

    #[test]
    fn concept_and_ticker_queries() {
        let dataset = sample_dataset();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.total_facts(), 3);
        assert_eq!(dataset.companies_by_ticker("ACME").len(), 1);
        assert_eq!(dataset.companies_by_filing_type("10-Q").len(), 1);
        assert_eq!(
            dataset.companies_with_concept("us-gaap:CostOfRevenue").len(),
            1
        );
        assert!(dataset.concepts().contains("us-gaap:GrossProfit"));
        assert_eq!(dataset.tickers().len(), 2);
    }

    #[test]
    fn json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("financials.json");

        sample_dataset().save_to_json(&path).unwrap();
        let loaded = FinancialsDataset::load_from_json(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.companies()[0].cost_of_revenue, Some(1_274_381_000.0));
    }

    #[test]
    fn missing_file_is_a_dataset_error() {
        let result = FinancialsDataset::load_from_json(Path::new("/nonexistent/ds.json"));
        assert!(result.is_err());
    }
}
