//! Greeting tool.
//!
//! A trivial tool that greets a person by name. Mostly useful as a liveness
//! check for the tool-calling runtime.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the greet tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GreetParams {
    /// The name of the person to greet.
    #[schemars(description = "The name of the person to greet")]
    pub name: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Greeting tool implementation.
#[derive(Debug, Clone)]
pub struct GreetTool;

impl GreetTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "greet";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Greet a person by name.";

    /// Format the greeting for a name.
    ///
    /// The exact formatting (comma, space, exclamation mark) is part of the
    /// tool's contract.
    pub fn greeting(name: &str) -> String {
        format!("Hello, {}!", name)
    }

    /// Execute the tool logic.
    pub fn execute(params: &GreetParams) -> CallToolResult {
        info!("Greet tool called for: {}", params.name);
        CallToolResult::success(vec![Content::text(Self::greeting(&params.name))])
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub fn http_handler(arguments: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let params: GreetParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;

        let result = Self::execute(&params);

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
            input_schema: cached_schema_for_type::<GreetParams>(),
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
                let params: GreetParams = serde_json::from_value(serde_json::Value::Object(args))
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

                Ok(Self::execute(&params))
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    #[test]
    fn test_greeting_format() {
        assert_eq!(GreetTool::greeting("World"), "Hello, World!");
    }

    #[test]
    fn test_greeting_empty_name() {
        assert_eq!(GreetTool::greeting(""), "Hello, !");
    }

    #[test]
    fn test_execute_returns_text_content() {
        let params = GreetParams {
            name: "Alice".to_string(),
        };
        let result = GreetTool::execute(&params);
        assert!(!result.is_error.unwrap_or(false));

        let content = &result.content[0];
        if let RawContent::Text(text) = &content.raw {
            assert_eq!(text.text, "Hello, Alice!");
        } else {
            panic!("expected text content");
        }
    }

    #[test]
    fn test_params_require_name() {
        let parsed: Result<GreetParams, _> = serde_json::from_str("{}");
        assert!(parsed.is_err());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_handler_rejects_bad_arguments() {
        let result = GreetTool::http_handler(serde_json::json!({ "name": 42 }));
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
