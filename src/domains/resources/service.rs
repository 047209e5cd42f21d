//! Resource service implementation.
//!
//! The ResourceService publishes the source file of every loaded prompt. It
//! keeps no registry of its own: each call reads the current library snapshot
//! from the shared store, so a reload is visible immediately.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ResourceError;
use super::registry::{get_all_resource_templates, prompt_resource};
use crate::core::config::ResourcesConfig;
use crate::domains::prompts::PromptStore;
use crate::domains::prompts::loader::PROMPT_URI_SCHEME;

/// Service for listing and reading prompt resources.
pub struct ResourceService {
    /// Configuration for the resources domain.
    config: ResourcesConfig,

    /// Shared prompt store.
    store: Arc<PromptStore>,
}

impl ResourceService {
    /// Create a new ResourceService with the given configuration.
    pub fn new(config: ResourcesConfig, store: Arc<PromptStore>) -> Self {
        info!(
            "Initializing ResourceService (expose_prompts: {})",
            config.expose_prompts
        );
        Self { config, store }
    }

    /// Whether prompts are published as resources.
    pub fn is_enabled(&self) -> bool {
        self.config.expose_prompts
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        if !self.is_enabled() {
            return Vec::new();
        }

        let library = self.store.snapshot().await;
        let loader = self.store.loader();

        library
            .list()
            .iter()
            .filter_map(|definition| {
                let source = definition.source()?;
                Some(prompt_resource(loader.uri_for(source), definition))
            })
            .collect()
    }

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        if !self.is_enabled() {
            return Vec::new();
        }
        get_all_resource_templates()
    }

    /// Read a resource by URI.
    ///
    /// When two files map to the same URI, the first one in load order wins.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        if !uri.starts_with(&format!("{}://", PROMPT_URI_SCHEME)) {
            return Err(ResourceError::invalid_uri(uri));
        }

        if !self.is_enabled() {
            return Err(ResourceError::not_found(uri));
        }

        let library = self.store.snapshot().await;
        let loader = self.store.loader();

        let source = library
            .list()
            .iter()
            .filter_map(|definition| definition.source())
            .find(|source| loader.uri_for(source) == uri)
            .map(Path::to_path_buf)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!("Reading resource {} from {}", uri, source.display());
        let text = tokio::task::spawn_blocking(move || std::fs::read_to_string(source))
            .await
            .map_err(std::io::Error::other)
            .and_then(|result| result)
            .map_err(|e| ResourceError::io(uri, e))?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::PromptLoader;
    use std::fs;
    use tempfile::TempDir;

    fn bundled_store() -> Arc<PromptStore> {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts");
        Arc::new(PromptStore::open(PromptLoader::new(root)).unwrap())
    }

    #[tokio::test]
    async fn test_resource_service_creation() {
        let service = ResourceService::new(ResourcesConfig::default(), bundled_store());

        let resources = service.list_resources().await;
        assert!(!resources.is_empty());

        let uris: Vec<_> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert!(uris.contains(&"prompt://general/greeting"));
        assert!(uris.contains(&"prompt://development/code_review"));
        assert!(uris.contains(&"prompt://uncategorized/standup"));
    }

    #[tokio::test]
    async fn test_read_existing_resource() {
        let service = ResourceService::new(ResourcesConfig::default(), bundled_store());

        let result = service
            .read_resource("prompt://general/greeting")
            .await
            .unwrap();
        assert_eq!(result.contents.len(), 1);
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => {
                assert!(text.contains("id: \"greeting\""));
            }
            other => panic!("Expected text contents, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = ResourceService::new(ResourcesConfig::default(), bundled_store());

        let result = service.read_resource("prompt://general/nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));

        let result = service.read_resource("mcp://server/info").await;
        assert!(matches!(result, Err(ResourceError::InvalidUri(_))));
    }

    #[tokio::test]
    async fn test_disabled_publishes_nothing() {
        let config = ResourcesConfig {
            expose_prompts: false,
        };
        let service = ResourceService::new(config, bundled_store());

        assert!(service.list_resources().await.is_empty());
        assert!(service.list_resource_templates().await.is_empty());
        assert!(
            service
                .read_resource("prompt://general/greeting")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_read_deleted_source_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("ops");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("deploy.yaml"),
            "metadata:\n  id: deploy\n  name: Deploy\n  description: d\n  author: a\n  \
             created: 2025-01-01T00:00:00Z\n  modified: 2025-01-01T00:00:00Z\n  version: '1'\n\
             prompt: ship it\n",
        )
        .unwrap();
        let store = Arc::new(PromptStore::open(PromptLoader::new(temp_dir.path())).unwrap());
        let service = ResourceService::new(ResourcesConfig::default(), store);

        let result = service.read_resource("prompt://ops/deploy").await.unwrap();
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => {
                assert!(text.contains("prompt: ship it"));
            }
            other => panic!("Expected text contents, got {other:?}"),
        }

        fs::remove_file(dir.join("deploy.yaml")).unwrap();
        let result = service.read_resource("prompt://ops/deploy").await;
        assert!(matches!(result, Err(ResourceError::Io { .. })));
    }
}
