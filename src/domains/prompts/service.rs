//! Prompt service implementation.
//!
//! The PromptService exposes the prompt library through MCP types. Every
//! loaded prompt becomes one MCP prompt named by its id; `get_prompt` forwards
//! straight to the resolver. The service owns no prompt logic of its own.

use rmcp::model::{GetPromptResult, Prompt, PromptArgument, PromptMessage, PromptMessageRole};
use std::sync::Arc;
use tracing::{info, warn};

use super::error::PromptError;
use super::model::{ArgumentMap, PromptDefinition};
use super::resolver::resolve;
use super::store::PromptStore;
use crate::core::config::PromptsConfig;

/// Service for listing and resolving prompts.
pub struct PromptService {
    /// Shared prompt store.
    store: Arc<PromptStore>,
}

impl PromptService {
    /// Create a new PromptService over the given store.
    pub fn new(config: &PromptsConfig, store: Arc<PromptStore>) -> Self {
        info!("Initializing PromptService");

        if config.watch_changes {
            warn!("Watching prompt files for changes is not supported; use the prompt_reload tool");
        }

        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<PromptStore> {
        &self.store
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.store
            .snapshot()
            .await
            .list()
            .iter()
            .map(|definition| to_mcp_prompt(definition))
            .collect()
    }

    /// Render a prompt by id with the given arguments.
    pub async fn resolve(
        &self,
        id: &str,
        arguments: &ArgumentMap,
    ) -> Result<String, PromptError> {
        let library = self.store.snapshot().await;
        let definition = library.get(id).ok_or_else(|| PromptError::not_found(id))?;
        resolve_definition(definition, arguments)
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        id: &str,
        arguments: Option<ArgumentMap>,
    ) -> Result<GetPromptResult, PromptError> {
        let library = self.store.snapshot().await;
        let definition = library.get(id).ok_or_else(|| PromptError::not_found(id))?;

        let content = resolve_definition(definition, &arguments.unwrap_or_default())?;

        Ok(GetPromptResult {
            description: Some(definition.metadata.description.clone()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

fn resolve_definition(
    definition: &PromptDefinition,
    arguments: &ArgumentMap,
) -> Result<String, PromptError> {
    resolve(definition, arguments).map_err(|e| {
        warn!("Failed to resolve prompt '{}': {}", definition.id(), e);
        PromptError::resolution(definition.id(), e)
    })
}

/// Build the MCP listing entry for a prompt.
fn to_mcp_prompt(definition: &PromptDefinition) -> Prompt {
    let arguments = definition
        .arguments
        .iter()
        .map(|arg| PromptArgument {
            name: arg.name.clone(),
            title: None,
            description: Some(arg.description.clone()),
            required: Some(arg.required),
        })
        .collect();

    Prompt {
        name: definition.id().to_string(),
        title: Some(definition.metadata.name.clone()),
        description: Some(definition.metadata.description.clone()),
        arguments: Some(arguments),
        icons: None,
        meta: None,
    }
}
