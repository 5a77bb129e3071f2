//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered tool becomes one dynamic route. The route decodes nothing
//! itself and hands the raw arguments to the tool's `ToolHandler::call`.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
};

use super::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: &ToolRegistry) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .iter()
        .fold(ToolRouter::new(), |router, tool| {
            let handler = tool.clone();
            router.with_route(ToolRoute::new_dyn(
                tool.to_tool(),
                move |ctx: ToolCallContext<'_, S>| {
                    let args = ctx.arguments.clone().unwrap_or_default();
                    let handler = handler.clone();
                    async move {
                        Ok::<_, McpError>(handler.call(serde_json::Value::Object(args)).await)
                    }
                    .boxed()
                },
            ))
        })
}
