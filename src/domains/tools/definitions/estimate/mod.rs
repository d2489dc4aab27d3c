//! Real estate investment estimation tool family.
//!
//! The estimation itself is performed by the remote estimateur-immo API;
//! this module owns the thin glue around it:
//!
//! - `auth.rs` - Basic-Auth header construction from per-call environment reads
//! - `payload.rs` - projection of the tool parameters into the API wire format
//! - `invoke.rs` - the tool definition, HTTP invocation, and error normalization

mod auth;
mod invoke;
mod payload;

pub use auth::ApiCredentials;
pub use invoke::{EstimateInvestmentParams, EstimateInvestmentTool, EstimationOutcome, send_estimate};
pub use payload::EstimatePayload;
