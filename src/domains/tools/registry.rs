//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The ordered list of all available tools
//! - Tool metadata for listing
//! - Dispatch of tool calls by name (used by the HTTP transport)

use std::sync::Arc;

use rmcp::model::{CallToolResult, Tool};
use tracing::{info, warn};

use crate::core::config::Config;
use crate::core::http_client::{HttpClient, ReqwestHttpClient};

use super::ToolError;
use super::ToolHandler;
use super::definitions::QueryJsonTool;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns every tool for the lifetime of the server.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create a registry whose tools share one reqwest client.
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    /// Create a registry whose tools use the given HTTP client.
    pub fn with_client(config: Arc<Config>, client: Arc<dyn HttpClient>) -> Self {
        let tools = Self::get_all(&config, client);
        info!("Registered {} tool(s)", tools.len());
        Self { tools }
    }

    /// Build every available tool.
    ///
    /// This is the single source of truth for the tool list. Adding a tool
    /// means appending it here.
    pub fn get_all(config: &Config, client: Arc<dyn HttpClient>) -> Vec<Arc<dyn ToolHandler>> {
        vec![Arc::new(QueryJsonTool::new(config, client))]
    }

    /// All tools, in registration order.
    pub fn tools(&self) -> &[Arc<dyn ToolHandler>] {
        &self.tools
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Dispatch a tool call to the matching handler.
    ///
    /// Only an unknown tool name is an `Err`; failures inside the tool are
    /// reported in the returned `CallToolResult`.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<CallToolResult, ToolError> {
        match self.get(name) {
            Some(tool) => Ok(tool.call(arguments).await),
            None => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
