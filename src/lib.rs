//! Events MCP Server Library
//!
//! A Model Context Protocol (MCP) server that exposes a remote events search
//! API as a tool. A client calls `get_query_json` with optional search
//! parameters; the server forwards them as a `GET {base_url}/query.json`
//! request and returns the JSON response.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the outbound HTTP client, the
//!   MCP server handler and transports
//! - **domains::tools**: the tool trait, the event search tool and the
//!   registry that publishes it
//!
//! # Example
//!
//! ```rust,no_run
//! use events_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     config.validate()?;
//!     let transport = TransportService::new(config.transport.clone());
//!     transport.run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
