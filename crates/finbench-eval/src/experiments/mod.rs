//! The two evaluation tasks

mod cost_of_revenue;
mod red_flags;

pub use cost_of_revenue::{
    Confidence, CostOfRevenueExperiment, CostOfRevenueOutput, ExtractionMethod, RegressionRecord,
};
pub use red_flags::{ClassificationRecord, RedFlagExperiment, RedFlagOutput};
