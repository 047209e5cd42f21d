//! Search-by-tag tool definition.
//!
//! Lists the prompts carrying an exact tag, in load order.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::prompts::PromptStore;
use crate::domains::tools::ToolError;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the search-by-tag tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PromptSearchByTagParams {
    /// Tag to look for (exact, case-sensitive match).
    pub tag: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Search-by-tag tool - finds prompts by tag.
pub struct PromptSearchByTagTool;

impl PromptSearchByTagTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "prompt_search_by_tag";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Find prompt templates carrying the given tag. Returns each matching prompt's id and name.";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(tag = %params.tag))]
    pub async fn execute(params: &PromptSearchByTagParams, store: &PromptStore) -> CallToolResult {
        info!("Search by tag tool called for tag: {}", params.tag);

        let matches = store.snapshot().await.filter_by_tag(&params.tag);

        if matches.is_empty() {
            return CallToolResult::success(vec![Content::text(format!(
                "No prompts tagged '{}'",
                params.tag
            ))]);
        }

        let mut response = format!("Prompts tagged '{}':\n", params.tag);
        for prompt in &matches {
            response.push_str(&format!("- {} ({})\n", prompt.id(), prompt.metadata.name));
        }
        response.push_str(&format!("\nTotal: {} prompts", matches.len()));

        info!("Found {} prompts tagged '{}'", matches.len(), params.tag);

        CallToolResult::success(vec![Content::text(response)])
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        store: Arc<PromptStore>,
    ) -> Result<serde_json::Value, String> {
        let tag = arguments
            .get("tag")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ToolError::invalid_arguments("Missing or invalid 'tag' parameter"))
            .map_err(|e| e.to_string())?
            .to_string();

        let result = Self::execute(&PromptSearchByTagParams { tag }, &store).await;

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
            input_schema: cached_schema_for_type::<PromptSearchByTagParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Search Prompts by Tag".into()),
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(store: Arc<PromptStore>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let store = store.clone();
            async move {
                let params: PromptSearchByTagParams =
                    serde_json::from_value(serde_json::Value::Object(args)).map_err(|e| {
                        McpError::invalid_params(
                            ToolError::invalid_arguments(e.to_string()).to_string(),
                            None,
                        )
                    })?;
                Ok(Self::execute(&params, &store).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
