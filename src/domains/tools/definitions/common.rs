//! Result helpers shared across tool definitions.

use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use crate::domains::tools::ToolError;

/// Create an error result from a tool error, logging it.
pub fn error_result(err: &ToolError) -> CallToolResult {
    warn!("{}", err);
    CallToolResult::error(vec![Content::text(err.to_string())])
}

/// Create a success result with text content.
pub fn success_result(content: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content)])
}

/// Convert a handler outcome into the result returned to the client.
pub fn into_call_result(outcome: Result<String, ToolError>) -> CallToolResult {
    match outcome {
        Ok(text) => success_result(text),
        Err(e) => error_result(&e),
    }
}
