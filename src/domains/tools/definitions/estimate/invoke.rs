//! Real estate investment estimation tool.
//!
//! Shapes a request from the tool parameters, attaches optional Basic-Auth
//! read from the environment, POSTs it to the estimateur-immo API, and
//! returns the parsed JSON response. All remote failures are normalized into
//! the returned value; this tool never surfaces an error to the runtime.

use std::time::Duration;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, warn};

use super::auth::ApiCredentials;
use super::payload::EstimatePayload;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Path of the estimation endpoint, relative to the API base URL.
const API_PATH: &str = "/api/estimate";

/// Client-side timeout for one estimation call. No retries on expiry.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn default_api_base_url() -> String {
    "https://estimation-immo.ams-investissements.fr".to_string()
}

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the estimation tool. Every field has a default; callers
/// only send what differs from it.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EstimateInvestmentParams {
    // Acquisition parameters
    /// Property purchase price in euros.
    #[schemars(description = "Property purchase price in euros")]
    pub purchase_price: f64,

    /// Notary fees rate (0.08 = 8%).
    #[schemars(description = "Notary fees rate (default 0.08 = 8%)")]
    pub notary_rate: f64,

    /// Renovation costs in euros.
    #[schemars(description = "Renovation costs in euros")]
    pub renovation: f64,

    /// Furniture costs in euros.
    #[schemars(description = "Furniture costs in euros")]
    pub furniture: f64,

    /// Real estate agency fees in euros.
    #[schemars(description = "Real estate agency fees in euros")]
    pub agency_fees: f64,

    // Exploitation parameters
    /// Monthly rent in euros.
    #[schemars(description = "Monthly rent in euros")]
    pub rent: f64,

    /// Average vacancy months per year.
    #[schemars(description = "Average vacancy months per year")]
    pub vacancy_months: f64,

    /// Property management fee percentage (0.0-1.0).
    #[schemars(description = "Property management fee percentage (0.0-1.0)")]
    pub management_pct: f64,

    /// Monthly co-ownership charges in euros.
    #[schemars(description = "Monthly co-ownership charges in euros")]
    pub copro_charges: f64,

    /// Monthly landlord insurance in euros.
    #[schemars(description = "Monthly landlord insurance in euros")]
    pub ll_insurance: f64,

    /// Annual property tax in euros.
    #[schemars(description = "Annual property tax in euros")]
    pub property_tax: f64,

    /// Other annual expenses in euros.
    #[schemars(description = "Other annual expenses in euros")]
    pub other_annual: f64,

    // Depreciation & tax parameters
    /// Building depreciation period in years.
    #[schemars(description = "Building depreciation period in years")]
    pub building_years: u32,

    /// Furniture depreciation period in years.
    #[schemars(description = "Furniture depreciation period in years")]
    pub furniture_years: u32,

    /// Land share of total price (non-depreciable).
    #[schemars(description = "Land share of total price (non-depreciable)")]
    pub land_share: f64,

    // Financing parameters
    /// Loan duration in years.
    #[schemars(description = "Loan duration in years")]
    pub loan_years: u32,

    /// Annual loan interest rate (0.035 = 3.5%).
    #[schemars(description = "Annual loan interest rate (0.035 = 3.5%)")]
    pub loan_rate: f64,

    /// Annual loan insurance rate.
    #[schemars(description = "Annual loan insurance rate")]
    pub loan_insurance_rate: f64,

    /// Down payment amount in euros.
    #[schemars(description = "Down payment amount in euros")]
    pub down_payment: f64,

    // Objectives
    /// Target monthly cash flow in euros.
    #[schemars(description = "Target monthly cash flow in euros")]
    pub target_monthly_cf: f64,

    // Resale / IRR parameters
    /// Years before resale. The API defaults this to the loan duration.
    #[schemars(description = "Years before resale (API default: loan duration)")]
    pub resale_years: Option<u32>,

    /// Resale price. The API defaults this to purchase price + renovation.
    #[schemars(description = "Resale price (API default: purchase price + renovation)")]
    pub resale_price: Option<f64>,

    // API endpoint configuration
    /// Base URL of the estimateur-immo API.
    #[schemars(description = "Base URL of the estimateur-immo API")]
    pub api_base_url: String,
}

impl Default for EstimateInvestmentParams {
    fn default() -> Self {
        Self {
            purchase_price: 50000.0,
            notary_rate: 0.08,
            renovation: 10000.0,
            furniture: 0.0,
            agency_fees: 0.0,
            rent: 500.0,
            vacancy_months: 0.5,
            management_pct: 0.0,
            copro_charges: 10.0,
            ll_insurance: 10.0,
            property_tax: 500.0,
            other_annual: 0.0,
            building_years: 30,
            furniture_years: 7,
            land_share: 0.15,
            loan_years: 20,
            loan_rate: 0.035,
            loan_insurance_rate: 0.002,
            down_payment: 5000.0,
            target_monthly_cf: 0.0,
            resale_years: None,
            resale_price: None,
            api_base_url: default_api_base_url(),
        }
    }
}

// ============================================================================
// Estimation Outcome
// ============================================================================

/// Result of one estimation call.
///
/// Every call resolves to one of these variants; nothing propagates past the
/// tool boundary as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimationOutcome {
    /// The remote service answered 2xx with a JSON body, passed through
    /// verbatim and never reshaped locally.
    Success(serde_json::Value),

    /// The HTTP request/response cycle failed: connection error, non-2xx
    /// status, or timeout. The status code is carried when one exists.
    TransportError {
        message: String,
        status_code: Option<u16>,
    },

    /// Any other failure, e.g. a malformed response body.
    Other { message: String },
}

impl EstimationOutcome {
    fn transport(e: reqwest::Error) -> Self {
        Self::TransportError {
            status_code: e.status().map(|s| s.as_u16()),
            message: e.to_string(),
        }
    }

    /// Render the outcome as the value returned to the caller.
    ///
    /// Transport errors always carry a `status_code` key (null when the
    /// failure had no associated response); other errors carry none.
    pub fn into_value(self) -> serde_json::Value {
        match self {
            Self::Success(body) => body,
            Self::TransportError {
                message,
                status_code,
            } => serde_json::json!({
                "error": format!("HTTP error occurred: {}", message),
                "status_code": status_code,
            }),
            Self::Other { message } => serde_json::json!({
                "error": format!("An error occurred: {}", message),
            }),
        }
    }
}

// ============================================================================
// Estimation Invoker
// ============================================================================

/// Issue a single POST to the estimation API and normalize the outcome.
///
/// The `Content-Type: application/json` header is set by the JSON body; the
/// Authorization header, when credentials are present, is attached alongside
/// it under its own key.
pub async fn send_estimate(
    api_base_url: &str,
    payload: &EstimatePayload,
    credentials: &ApiCredentials,
) -> EstimationOutcome {
    let url = format!("{}{}", api_base_url, API_PATH);

    let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            return EstimationOutcome::Other {
                message: e.to_string(),
            };
        }
    };

    let mut request = client.post(&url).json(payload);
    if let Some(header) = credentials.basic_auth_header() {
        request = request.header(reqwest::header::AUTHORIZATION, header);
    }

    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return EstimationOutcome::transport(e),
    };

    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => return EstimationOutcome::transport(e),
    };

    match response.json::<serde_json::Value>().await {
        Ok(body) => EstimationOutcome::Success(body),
        Err(e) => EstimationOutcome::Other {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Real estate investment estimation tool implementation.
#[derive(Debug, Clone)]
pub struct EstimateInvestmentTool;

impl EstimateInvestmentTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "estimate_real_estate_investment";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Estimate real estate investment profitability using the estimateur-immo API. \
         Every parameter has a default; only send what differs from it. \
         Returns the API's analysis: acquisition costs, financing details, exploitation \
         metrics (NOI), tax calculations, cash flow, yields, DSCR, target pricing, and IRR.";

    /// Execute the tool logic.
    ///
    /// Credentials are re-read from the environment here, on every call.
    pub async fn execute(params: &EstimateInvestmentParams) -> CallToolResult {
        info!(
            "Estimation tool called: purchase price {}, base URL {}",
            params.purchase_price, params.api_base_url
        );

        let payload = EstimatePayload::from(params);
        let credentials = ApiCredentials::from_env();

        let outcome = send_estimate(&params.api_base_url, &payload, &credentials).await;

        match &outcome {
            EstimationOutcome::Success(_) => info!("Estimation call succeeded"),
            EstimationOutcome::TransportError { message, .. }
            | EstimationOutcome::Other { message } => {
                warn!("Estimation call failed: {}", message);
            }
        }

        // Error outcomes are still well-formed results for the caller, not
        // protocol-level tool failures.
        CallToolResult::success(vec![Content::text(outcome.into_value().to_string())])
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let params: EstimateInvestmentParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result = Self::execute(&params).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<EstimateInvestmentParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp transports.
    pub fn create_route<S>() -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            async move {
                let params: EstimateInvestmentParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&params).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_all_defaults() {
        let params: EstimateInvestmentParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.purchase_price, 50000.0);
        assert_eq!(params.notary_rate, 0.08);
        assert_eq!(params.copro_charges, 10.0);
        assert_eq!(params.building_years, 30);
        assert_eq!(params.loan_rate, 0.035);
        assert_eq!(params.resale_years, None);
        assert_eq!(params.resale_price, None);
        assert_eq!(
            params.api_base_url,
            "https://estimation-immo.ams-investissements.fr"
        );
    }

    #[test]
    fn test_params_partial_override() {
        let json = r#"{"purchase_price": 120000.0, "resale_years": 10, "resale_price": 80000.0}"#;
        let params: EstimateInvestmentParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.purchase_price, 120000.0);
        assert_eq!(params.resale_years, Some(10));
        assert_eq!(params.resale_price, Some(80000.0));
        // Untouched fields keep their defaults
        assert_eq!(params.rent, 500.0);
    }

    #[test]
    fn test_success_outcome_passes_body_through() {
        let body = serde_json::json!({"tri": 0.07, "noi": 4200});
        let outcome = EstimationOutcome::Success(body.clone());
        assert_eq!(outcome.into_value(), body);
    }

    #[test]
    fn test_transport_error_value_with_status() {
        let outcome = EstimationOutcome::TransportError {
            message: "HTTP status server error (500 Internal Server Error)".to_string(),
            status_code: Some(500),
        };
        let value = outcome.into_value();
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .starts_with("HTTP error occurred")
        );
        assert_eq!(value["status_code"], serde_json::json!(500));
    }

    #[test]
    fn test_transport_error_value_without_status() {
        let outcome = EstimationOutcome::TransportError {
            message: "error sending request".to_string(),
            status_code: None,
        };
        let value = outcome.into_value();
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .starts_with("HTTP error occurred")
        );
        // The key is present but null when no response was associated
        assert!(value.as_object().unwrap().contains_key("status_code"));
        assert_eq!(value["status_code"], serde_json::Value::Null);
    }

    #[test]
    fn test_other_error_value_has_no_status_code() {
        let outcome = EstimationOutcome::Other {
            message: "error decoding response body".to_string(),
        };
        let value = outcome.into_value();
        assert!(
            value["error"]
                .as_str()
                .unwrap()
                .starts_with("An error occurred")
        );
        assert!(!value.as_object().unwrap().contains_key("status_code"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = EstimateInvestmentTool::to_tool();
        assert_eq!(tool.name.as_ref(), "estimate_real_estate_investment");
        assert!(tool.description.is_some());
    }
}
