//! Resource Registry - builds MCP resources from loaded prompts.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

use crate::domains::prompts::PromptDefinition;
use crate::domains::prompts::loader::PROMPT_URI_SCHEME;

/// MIME type of a prompt resource.
pub const PROMPT_MIME_TYPE: &str = "text/yaml";

/// Build the resource entry for a prompt published at `uri`.
pub fn prompt_resource(uri: impl Into<String>, definition: &PromptDefinition) -> Resource {
    let mut raw = RawResource::new(uri, definition.metadata.name.clone());
    raw.description = Some(definition.metadata.description.clone());
    raw.mime_type = Some(PROMPT_MIME_TYPE.to_string());
    raw.no_annotation()
}

/// Get all resource templates.
///
/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: format!("{}://{{category}}/{{name}}", PROMPT_URI_SCHEME),
            name: "Prompt Templates".to_string(),
            title: Some("Prompt Template Source".to_string()),
            description: Some(
                "Read a prompt's YAML source by category and file name".to_string(),
            ),
            mime_type: Some(PROMPT_MIME_TYPE.to_string()),
        }
        .no_annotation(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::PromptMetadata;

    #[test]
    fn test_prompt_resource() {
        let definition = PromptDefinition {
            metadata: PromptMetadata {
                id: "code_review".to_string(),
                name: "Code Review".to_string(),
                description: "Review code".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let resource = prompt_resource("prompt://development/code_review", &definition);
        assert_eq!(resource.raw.uri, "prompt://development/code_review");
        assert_eq!(resource.raw.name, "Code Review");
        assert_eq!(resource.raw.description.as_deref(), Some("Review code"));
        assert_eq!(resource.raw.mime_type.as_deref(), Some("text/yaml"));
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "prompt://{category}/{name}");
    }
}
