//! Prompts domain module.
//!
//! This module handles all prompt-related functionality for the MCP server.
//! Prompts are YAML template files loaded from the prompts directory, checked
//! by the validator, and rendered on request with caller-supplied arguments.
//!
//! ## Architecture
//!
//! - `model.rs` - Prompt definitions, arguments and argument values
//! - `validator.rs` - Well-formedness rules a prompt must pass to be served
//! - `templates.rs` - `{{name}}` placeholder scanning and substitution
//! - `resolver.rs` - Default merging, type conversion and rendering
//! - `library.rs` - In-memory registry of validated prompts
//! - `loader.rs` - Reading and writing prompt files
//! - `store.rs` - Shared, atomically reloadable handle to the library
//! - `service.rs` - MCP-facing prompt listing and retrieval
//!
//! ## Adding a New Prompt
//!
//! Drop a YAML file anywhere under the prompts directory and restart the
//! server (or call the `prompt_reload` tool). No code changes are needed.

mod error;
mod library;
pub mod loader;
pub mod model;
pub mod resolver;
mod service;
mod store;
pub mod templates;
pub mod validator;

pub use error::{LibraryError, LoadError, PromptError, ResolutionError, ValidationError};
pub use library::PromptLibrary;
pub use loader::PromptLoader;
pub use model::{
    ArgValue, ArgumentMap, ArgumentType, PromptArgumentSpec, PromptDefinition, PromptMetadata,
    UsageStats,
};
pub use resolver::{render, resolve};
pub use service::PromptService;
pub use store::PromptStore;
pub use validator::validate;
