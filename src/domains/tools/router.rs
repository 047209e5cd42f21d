//! Tool Router - builds the rmcp ToolRouter from the tool definitions.
//!
//! Each tool knows how to create its own route; this module only lists them.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{PromptReloadTool, PromptSearchByTagTool};
use crate::domains::prompts::PromptStore;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(store: Arc<PromptStore>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(PromptReloadTool::create_route(store.clone()))
        .with_route(PromptSearchByTagTool::create_route(store))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::prompts::{PromptLibrary, PromptLoader};

    struct TestServer {}

    fn test_store() -> Arc<PromptStore> {
        Arc::new(PromptStore::with_library(
            PromptLoader::new("./prompts"),
            PromptLibrary::new(),
        ))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_store());
        let tools = router.list_all();
        assert_eq!(tools.len(), 2);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"prompt_reload"));
        assert!(names.contains(&"prompt_search_by_tag"));
    }

    #[test]
    fn test_registry_matches_router() {
        let store = test_store();
        let registry = ToolRegistry::new(store.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(store);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
