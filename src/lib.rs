// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod explain;
pub mod formatting;
pub mod io;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod simulation;

// Re-export commonly used types
pub use crate::core::{Column, Error, Result, ZoneDataset, ZoneRecord};

pub use crate::scoring::{calculate_stress_score, normalize, StressWeights};

pub use crate::risk::{classify_risk, RiskDistribution, RiskLevel};

pub use crate::simulation::{
    assess, recalculate_stress, simulate_emission_control, simulate_waste_reduction,
    Intervention, Scenario,
};

pub use crate::explain::{
    select_explainer, ExplanationRequest, FallbackExplainer, TemplateExplainer, TextExplainer,
};

pub use crate::io::{generate_with_seed, load_dataset, read_dataset};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};

pub use crate::report::AssessmentReport;
