//! Prompt-specific error types.
//!
//! Errors are layered the same way the prompt domain is:
//! - [`ValidationError`] for a definition that is not well-formed
//! - [`ResolutionError`] for a single failed render
//! - [`LibraryError`] for registry insertions
//! - [`LoadError`] for anything that goes wrong reading or writing files
//! - [`PromptError`] for the service boundary seen by transports

use std::path::{Path, PathBuf};
use thiserror::Error;

/// A failed validation check. The first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required metadata field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A required timestamp is absent or zero.
    #[error("{0} timestamp is required")]
    MissingTimestamp(&'static str),

    #[error("id '{0}' must contain only alphanumeric characters, hyphens, and underscores")]
    InvalidId(String),

    #[error("argument {index}: name is required")]
    MissingArgumentName { index: usize },

    #[error(
        "argument {index}: name '{name}' must start with a letter and contain only alphanumeric characters and underscores"
    )]
    InvalidArgumentName { index: usize, name: String },

    #[error("argument {index}: duplicate name '{name}'")]
    DuplicateArgument { index: usize, name: String },

    #[error("argument {index} ({name}): description is required")]
    MissingArgumentDescription { index: usize, name: String },

    #[error("argument {index} ({name}): invalid type '{kind}'")]
    InvalidArgumentType {
        index: usize,
        name: String,
        kind: String,
    },

    #[error("argument {index} ({name}): default value must be a {expected}")]
    DefaultTypeMismatch {
        index: usize,
        name: String,
        expected: &'static str,
    },

    #[error("prompt content is required")]
    EmptyTemplate,

    #[error("undefined variable '{0}' used in prompt")]
    UndefinedVariable(String),

    #[error("required argument '{0}' is not used in prompt")]
    UnusedRequiredArgument(String),
}

impl ValidationError {
    /// Name of the argument the failure is attributed to, if any.
    pub fn argument(&self) -> Option<&str> {
        match self {
            Self::InvalidArgumentName { name, .. }
            | Self::DuplicateArgument { name, .. }
            | Self::MissingArgumentDescription { name, .. }
            | Self::InvalidArgumentType { name, .. }
            | Self::DefaultTypeMismatch { name, .. }
            | Self::UndefinedVariable(name)
            | Self::UnusedRequiredArgument(name) => Some(name),
            _ => None,
        }
    }
}

/// A failed resolution of one prompt request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    #[error("required argument '{0}' not provided")]
    MissingArgument(String),

    #[error("argument '{argument}': cannot convert '{value}' to number")]
    InvalidNumber { argument: String, value: String },

    #[error("argument '{argument}': invalid {expected} value: {value}")]
    InvalidValue {
        argument: String,
        expected: &'static str,
        value: String,
    },

    #[error("argument '{argument}': unsupported argument type: {kind}")]
    UnsupportedType { argument: String, kind: String },
}

impl ResolutionError {
    pub fn missing_argument(name: impl Into<String>) -> Self {
        Self::MissingArgument(name.into())
    }

    /// Name of the argument that failed.
    pub fn argument(&self) -> &str {
        match self {
            Self::MissingArgument(argument)
            | Self::InvalidNumber { argument, .. }
            | Self::InvalidValue { argument, .. }
            | Self::UnsupportedType { argument, .. } => argument,
        }
    }
}

/// Errors raised by [`PromptLibrary`](super::PromptLibrary) insertions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("duplicate prompt ID '{0}'")]
    DuplicateId(String),

    #[error("prompt '{id}' failed validation: {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },
}

/// Errors raised while loading or saving prompt files.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("prompts directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("failed to walk prompts directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("validation failed for {}: {source}", .path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("duplicate prompt ID '{id}' found in file {}", .path.display())]
    DuplicateId { id: String, path: PathBuf },

    #[error("failed to serialize prompt '{id}': {source}")]
    Serialize {
        id: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("prompt loading task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl LoadError {
    pub fn directory_not_found(path: impl AsRef<Path>) -> Self {
        Self::DirectoryNotFound(path.as_ref().to_path_buf())
    }

    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn parse(path: impl AsRef<Path>, source: serde_yaml::Error) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn validation(path: impl AsRef<Path>, source: ValidationError) -> Self {
        Self::Validation {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Errors that can occur during prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The requested prompt was not found.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// Resolving the prompt's arguments failed.
    #[error("Failed to resolve prompt '{id}': {source}")]
    Resolution {
        id: String,
        #[source]
        source: ResolutionError,
    },

    /// Loading the prompt library failed.
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Create a new "resolution" error.
    pub fn resolution(id: impl Into<String>, source: ResolutionError) -> Self {
        Self::Resolution {
            id: id.into(),
            source,
        }
    }
}
