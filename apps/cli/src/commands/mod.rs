//! Command implementations for the RiskCrew CLI.

pub mod agents;
pub mod analyze;
pub mod ask;
pub mod pipeline;
pub mod report;
