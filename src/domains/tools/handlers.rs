//! Tool handler abstraction.
//!
//! Every tool exposed by the server implements [`ToolHandler`]. The registry
//! keeps them as trait objects so both the rmcp router (STDIO) and the HTTP
//! dispatcher call into the same code.

use rmcp::model::{CallToolResult, Tool};

/// A named, schema-described tool that can be invoked by MCP clients.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Get the name of this tool. Unique within a registry.
    fn name(&self) -> &'static str;

    /// Get the description of this tool.
    fn description(&self) -> &'static str;

    /// Tool metadata (name, description, input schema) for discovery.
    fn to_tool(&self) -> Tool;

    /// Execute the tool with the raw call arguments.
    ///
    /// Failures are reported through `CallToolResult::error`, never by
    /// panicking or returning early to the transport.
    async fn call(&self, arguments: serde_json::Value) -> CallToolResult;
}
