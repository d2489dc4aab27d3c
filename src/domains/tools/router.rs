//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! This module builds the ToolRouter for the rmcp transports by delegating
//! to the tool definitions themselves. Each tool knows how to create its own
//! route.

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{EstimateInvestmentTool, GreetTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>() -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GreetTool::create_route())
        .with_route(EstimateInvestmentTool::create_route())
}
