//! Financial Datasets API client
//!
//! External collaborator that supplies the evaluation inputs: a financials
//! search endpoint used to select companies by metric filters, and a
//! per-ticker financial-metrics snapshot endpoint.

use crate::dataset::Company;
use crate::error::{FinbenchError, FinbenchResult};
use crate::llm::error_utils;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://api.financialdatasets.ai";

/// Comparison operator accepted by the financials search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
}

/// One search filter: `field <operator> value`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl SearchFilter {
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Lt, value)
    }

    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Gt, value)
    }

    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, FilterOperator::Gte, value)
    }
}

/// Client for the Financial Datasets API
pub struct FinancialDatasetsClient {
    http_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FinancialDatasetsClient {
    /// Create a new client, reading `FINANCIAL_DATASETS_API_KEY` from the
    /// environment
    pub fn new(http_client: Client) -> Self {
        Self {
            http_client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: std::env::var("FINANCIAL_DATASETS_API_KEY").ok(),
        }
    }

    /// Override the base URL (tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Search for companies matching all filters; each hit is tagged with the
    /// given label
    #[instrument(skip(self, filters), level = "debug")]
    pub async fn search(
        &self,
        filters: &[SearchFilter],
        label: &str,
        period: &str,
        limit: u32,
    ) -> FinbenchResult<Vec<Company>> {
        let url = format!("{}/financials/search", self.base_url);
        let body = json!({
            "period": period,
            "limit": limit,
            "filters": filters,
        });

        let response = self
            .request(self.http_client.post(&url).json(&body))
            .send()
            .await
            .map_err(|e| FinbenchError::backend(format!("financials search failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_utils::handle_http_error(response, "FinancialDatasets").await);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| error_utils::handle_parse_error(e, "FinancialDatasets"))?;

        let results = response_json["search_results"]
            .as_array()
            .cloned()
            .unwrap_or_default();

        Ok(results
            .iter()
            .filter_map(|r| r["ticker"].as_str())
            .map(|ticker| Company::new(ticker, label))
            .collect())
    }

    /// Fetch the financial-metrics snapshot for one ticker
    #[instrument(skip(self), level = "debug")]
    pub async fn financial_metrics(&self, ticker: &str) -> FinbenchResult<Value> {
        let url = format!(
            "{}/financial-metrics/snapshot?ticker={}",
            self.base_url, ticker
        );

        let response = self
            .request(self.http_client.get(&url))
            .send()
            .await
            .map_err(|e| FinbenchError::backend(format!("metrics snapshot failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_utils::handle_http_error(response, "FinancialDatasets").await);
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| error_utils::handle_parse_error(e, "FinancialDatasets"))?;

        Ok(response_json
            .get("snapshot")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new())))
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("X-API-KEY", key),
            None => builder,
        }
    }
}
