//! Red-flag detection experiment (binary classification)

use crate::adapter::CaseRequest;
use crate::runner::{Experiment, PredictionRecord};
use finbench_core::dataset::Company;
use finbench_core::error::{FinbenchError, FinbenchResult};
use finbench_core::llm::{ChatMessage, ToolSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

const TOOL_NAME: &str = "red_flag_detection";

/// Validated payload of the `red_flag_detection` tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedFlagOutput {
    /// True if the company has financial red flags
    pub has_red_flags: bool,
    /// Explanation citing relevant financial metrics
    pub reasoning: String,
}

/// Single red-flag prediction joined with its input item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRecord {
    pub ticker: String,
    pub model: String,
    pub prediction: bool,
    pub ground_truth: bool,
    pub ground_truth_label: String,
    pub reasoning: String,
    pub cost: f64,
    pub duration: f64,
}

impl PredictionRecord for ClassificationRecord {
    fn cost(&self) -> f64 {
        self.cost
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

/// Determine whether companies show signs of financial red flags
pub struct RedFlagExperiment;

impl RedFlagExperiment {
    /// Tool schema every backend answers through
    pub fn tool() -> ToolSchema {
        ToolSchema::new(
            TOOL_NAME,
            "Determine if a company has financial red flags based on its financial metrics.",
            json!({
                "type": "object",
                "properties": {
                    "has_red_flags": {
                        "type": "boolean",
                        "description": "True if the company has financial red flags"
                    },
                    "reasoning": {
                        "type": "string",
                        "description": "Explanation for the red flag judgment, referencing financial metrics"
                    }
                },
                "required": ["has_red_flags", "reasoning"],
                "additionalProperties": false
            }),
        )
    }

    fn prompt(company: &Company) -> String {
        let metrics = serde_json::to_string_pretty(&company.financial_metrics)
            .unwrap_or_else(|_| company.financial_metrics.to_string());
        format!(
            "You are a financial analyst. You are given the financial metrics for the public company {}.\n\n\
             Here are the financial metrics:\n{}\n\n\
             Your job is to determine whether this company shows signs of financial red flags.\n\n\
             **Respond using the red_flag_detection function call**, with:\n\
             - `has_red_flags: true` if the company appears financially risky (e.g., negative cash flow, high debt, poor liquidity, declining earnings).\n\
             - `has_red_flags: false` if the company appears financially healthy overall.\n\
             Also include a short explanation citing relevant metrics.",
            company.ticker, metrics
        )
    }
}

impl Experiment for RedFlagExperiment {
    type Item = Company;
    type Record = ClassificationRecord;

    fn name(&self) -> &str {
        "red_flag_detection"
    }

    fn ticker<'a>(&self, item: &'a Company) -> &'a str {
        &item.ticker
    }

    fn request(&self, item: &Company) -> CaseRequest {
        CaseRequest {
            ticker: item.ticker.clone(),
            messages: vec![ChatMessage::user(Self::prompt(item))],
            tool: Self::tool(),
        }
    }

    fn decode(
        &self,
        item: &Company,
        model: &str,
        args: Value,
        cost: f64,
        duration: f64,
    ) -> FinbenchResult<ClassificationRecord> {
        let output: RedFlagOutput = serde_json::from_value(args)
            .map_err(|e| FinbenchError::schema(format!("invalid {} payload: {}", TOOL_NAME, e)))?;

        Ok(ClassificationRecord {
            ticker: item.ticker.clone(),
            model: model.to_string(),
            prediction: output.has_red_flags,
            ground_truth: item.is_red_flag(),
            ground_truth_label: item.label.clone(),
            reasoning: output.reasoning,
            cost,
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_joins_output_with_ground_truth() {
        let company = Company::new("AAA", "Bankruptcy Risk");
        let args = json!({"has_red_flags": true, "reasoning": "negative operating cash flow"});
        let record = RedFlagExperiment
            .decode(&company, "o3", args, 0.01, 1.5)
            .unwrap();

        assert_eq!(record.ticker, "AAA");
        assert!(record.prediction);
        assert!(record.ground_truth);
        assert_eq!(record.ground_truth_label, "Bankruptcy Risk");
        assert_eq!(record.reasoning, "negative operating cash flow");
    }

    #[test]
    fn non_boolean_prediction_fails_validation() {
        let company = Company::new("AAA", "Green Flag");
        let args = json!({"has_red_flags": "yes", "reasoning": "r"});
        let err = RedFlagExperiment
            .decode(&company, "o3", args, 0.0, 0.0)
            .unwrap_err();
        assert!(matches!(err, FinbenchError::Schema(_)));
    }

    #[test]
    fn missing_field_fails_validation() {
        let company = Company::new("AAA", "Green Flag");
        let args = json!({"has_red_flags": false});
        assert!(RedFlagExperiment.decode(&company, "o3", args, 0.0, 0.0).is_err());
    }

    #[test]
    fn request_embeds_metrics_and_tool() {
        let mut company = Company::new("AAPL", "Green Flag");
        company.financial_metrics = json!({"current_ratio": 1.8});
        let request = RedFlagExperiment.request(&company);

        assert_eq!(request.ticker, "AAPL");
        assert_eq!(request.tool.name, "red_flag_detection");
        assert_eq!(request.messages.len(), 1);
        assert!(request.messages[0].content.contains("AAPL"));
        assert!(request.messages[0].content.contains("current_ratio"));
    }
}
