//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod estimate;
pub mod greet;

pub use estimate::{
    ApiCredentials, EstimateInvestmentParams, EstimateInvestmentTool, EstimatePayload,
    EstimationOutcome,
};
pub use greet::GreetTool;
