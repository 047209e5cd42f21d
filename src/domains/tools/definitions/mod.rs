//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

mod reload;
mod search;

pub use reload::{PromptReloadParams, PromptReloadTool};
pub use search::{PromptSearchByTagParams, PromptSearchByTagTool};
