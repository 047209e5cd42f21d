//! Prompt library - the in-memory registry of validated prompts.
//!
//! Definitions live in an arena (`Vec<Arc<_>>`) with a separate id index.
//! A library is built once and never edited in place afterwards: reloading
//! builds a fresh library and swaps it in through [`PromptStore`](super::PromptStore).

use std::collections::HashMap;
use std::sync::Arc;

use super::error::LibraryError;
use super::model::PromptDefinition;
use super::validator::validate;

/// Collection of validated prompt definitions keyed by id.
#[derive(Debug, Default)]
pub struct PromptLibrary {
    /// Definitions in insertion order.
    prompts: Vec<Arc<PromptDefinition>>,

    /// Key: prompt id, Value: slot in `prompts`
    index: HashMap<String, usize>,
}

impl PromptLibrary {
    /// Create an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    ///
    /// The definition is validated first, so nothing invalid is ever
    /// observable through a library. Existing ids are never overwritten.
    pub fn add(
        &mut self,
        definition: PromptDefinition,
    ) -> Result<Arc<PromptDefinition>, LibraryError> {
        validate(&definition).map_err(|source| LibraryError::Invalid {
            id: definition.id().to_string(),
            source,
        })?;

        if self.index.contains_key(definition.id()) {
            return Err(LibraryError::DuplicateId(definition.id().to_string()));
        }

        let definition = Arc::new(definition);
        self.index.insert(definition.id().to_string(), self.prompts.len());
        self.prompts.push(Arc::clone(&definition));
        Ok(definition)
    }

    /// Look up a prompt by id.
    pub fn get(&self, id: &str) -> Option<&Arc<PromptDefinition>> {
        self.index.get(id).map(|&slot| &self.prompts[slot])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All prompts, in insertion order.
    pub fn list(&self) -> &[Arc<PromptDefinition>] {
        &self.prompts
    }

    /// Prompts carrying `tag`, in insertion order.
    pub fn filter_by_tag(&self, tag: &str) -> Vec<Arc<PromptDefinition>> {
        self.prompts
            .iter()
            .filter(|prompt| prompt.has_tag(tag))
            .cloned()
            .collect()
    }

    /// All prompt ids, in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        self.prompts.iter().map(|prompt| prompt.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}
