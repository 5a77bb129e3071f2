//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `handlers.rs` - The `ToolHandler` trait every tool implements
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - The list of available tools and dispatch by name
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO transport)
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Append it to `ToolRegistry::get_all()`
//!
//! The router and the HTTP dispatcher both read from the registry, so
//! nothing else needs to change.

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use error::ToolError;
pub use handlers::ToolHandler;
pub use registry::ToolRegistry;
pub use router::build_tool_router;
