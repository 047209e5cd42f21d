//! Prompt reload tool definition.
//!
//! Re-reads the prompts directory and swaps the new library in atomically.
//! A failed reload leaves the previous prompts in place.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Content, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::domains::prompts::PromptStore;

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the prompt reload tool. It takes none.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct PromptReloadParams {}

// ============================================================================
// Tool Definition
// ============================================================================

/// Prompt reload tool - reloads every prompt file from disk.
pub struct PromptReloadTool;

impl PromptReloadTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "prompt_reload";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Reload all prompt templates from the prompts directory. \
        Returns the number of prompts loaded. On failure the previously loaded prompts stay active.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(_params: &PromptReloadParams, store: &PromptStore) -> CallToolResult {
        info!("Prompt reload tool called");

        match store.reload().await {
            Ok(count) => CallToolResult::success(vec![Content::text(format!(
                "Reloaded {} prompts from {}",
                count,
                store.loader().root().display()
            ))]),
            Err(e) => {
                warn!("Prompt reload failed: {}", e);
                CallToolResult::error(vec![Content::text(format!(
                    "Reload failed, previous prompts remain active: {}",
                    e
                ))])
            }
        }
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        _arguments: serde_json::Value,
        store: Arc<PromptStore>,
    ) -> Result<serde_json::Value, String> {
        let result = Self::execute(&PromptReloadParams::default(), &store).await;

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
            input_schema: cached_schema_for_type::<PromptReloadParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: Some("Reload Prompts".into()),
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
                let params: PromptReloadParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &store).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
