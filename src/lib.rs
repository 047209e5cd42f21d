//! Team Prompt Server Library
//!
//! This crate serves a directory of YAML prompt templates over the Model
//! Context Protocol (MCP). Each file defines one prompt with typed arguments
//! and a `{{placeholder}}` template; clients list prompts, render them with
//! arguments, read their sources as resources, and trigger reloads.
//!
//! # Architecture
//!
//! - **cli**: Command-line flags layered over the environment configuration
//! - **core**: Configuration, error handling, the MCP server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **prompts**: Prompt model, validation, resolution, loading and storage
//!   - **resources**: Prompt source files published as `prompt://` resources
//!   - **tools**: Reload and search tools
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_mcp_server::{core::Config, core::McpServer};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut config = Config::from_env();
//!     config.prompts.directory = "./prompts".into();
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::prompts::{PromptDefinition, PromptLibrary, PromptLoader, PromptStore};
