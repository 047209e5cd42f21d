//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use rmcp::model::Tool;

use super::definitions::{PromptReloadTool, PromptSearchByTagTool};
#[cfg(feature = "http")]
use super::error::ToolError;
use crate::domains::prompts::PromptStore;

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    store: Arc<PromptStore>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(store: Arc<PromptStore>) -> Self {
        Self { store }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![PromptReloadTool::NAME, PromptSearchByTagTool::NAME]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![PromptReloadTool::to_tool(), PromptSearchByTagTool::to_tool()]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        match name {
            PromptReloadTool::NAME => {
                PromptReloadTool::http_handler(arguments, self.store.clone()).await
            }
            PromptSearchByTagTool::NAME => {
                PromptSearchByTagTool::http_handler(arguments, self.store.clone()).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name).to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::{PromptLibrary, PromptLoader};

    fn test_store() -> Arc<PromptStore> {
        Arc::new(PromptStore::with_library(
            PromptLoader::new("./prompts"),
            PromptLibrary::new(),
        ))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_store());
        let names = registry.tool_names();
        assert_eq!(names, vec!["prompt_reload", "prompt_search_by_tag"]);
        assert_eq!(ToolRegistry::get_all_tools().len(), names.len());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_search() {
        let registry = ToolRegistry::new(test_store());
        let result = registry
            .call_tool("prompt_search_by_tag", serde_json::json!({ "tag": "dev" }))
            .await;
        assert!(result.is_ok());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_store());
        let result = registry.call_tool("unknown", serde_json::json!({})).await;
        assert_eq!(result.unwrap_err(), "Tool not found: unknown");
    }
}
