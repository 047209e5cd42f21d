//! Resources domain module.
//!
//! Every loaded prompt is published as a read-only resource whose content is
//! the prompt's YAML source file. Resource URIs follow
//! `prompt://<category>/<file stem>`, where the category is the first
//! directory below the prompts root.
//!
//! ## Architecture
//!
//! - `registry.rs` - Resource and template construction
//! - `service.rs` - Resource service for listing and reading
//!
//! Publishing can be switched off with `resources.expose_prompts`.

mod error;
mod registry;
mod service;

pub use error::ResourceError;
pub use registry::{PROMPT_MIME_TYPE, get_all_resource_templates, prompt_resource};
pub use service::ResourceService;
