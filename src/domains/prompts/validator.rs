//! Prompt definition validation.
//!
//! [`validate`] is the only gate a definition passes before it can enter a
//! [`PromptLibrary`](super::PromptLibrary). It is pure: it never touches the
//! filesystem and never mutates its input.
//!
//! Checks run in a fixed order and the first failure is reported:
//! 1. metadata completeness
//! 2. id format
//! 3. each argument, in declaration order
//! 4. template non-empty
//! 5. every placeholder is a declared argument
//! 6. every required argument appears as a placeholder

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::error::ValidationError;
use super::model::{
    ArgValue, ArgumentType, PromptArgumentSpec, PromptDefinition, PromptMetadata,
    is_zero_timestamp,
};
use super::templates::{placeholder_names, uses_placeholder};

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("id pattern is a valid regex"));

static ARGUMENT_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("argument name pattern is a valid regex")
});

/// Validate a prompt definition.
pub fn validate(definition: &PromptDefinition) -> Result<(), ValidationError> {
    validate_metadata(&definition.metadata)?;
    validate_arguments(&definition.arguments)?;
    validate_template(&definition.template, &definition.arguments)
}

/// Whether `id` is a well-formed prompt identifier.
pub fn is_valid_id(id: &str) -> bool {
    ID_PATTERN.is_match(id)
}

/// Whether `name` is a well-formed argument name.
pub fn is_valid_argument_name(name: &str) -> bool {
    ARGUMENT_NAME_PATTERN.is_match(name)
}

fn validate_metadata(metadata: &PromptMetadata) -> Result<(), ValidationError> {
    if metadata.id.trim().is_empty() {
        return Err(ValidationError::MissingField("id"));
    }

    if !is_valid_id(&metadata.id) {
        return Err(ValidationError::InvalidId(metadata.id.clone()));
    }

    let text_fields = [
        ("name", &metadata.name),
        ("description", &metadata.description),
        ("author", &metadata.author),
        ("version", &metadata.version),
    ];
    for (field, value) in text_fields {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field));
        }
    }

    if is_zero_timestamp(metadata.created.as_ref()) {
        return Err(ValidationError::MissingTimestamp("created"));
    }

    if is_zero_timestamp(metadata.modified.as_ref()) {
        return Err(ValidationError::MissingTimestamp("modified"));
    }

    Ok(())
}

fn validate_arguments(arguments: &[PromptArgumentSpec]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for (index, arg) in arguments.iter().enumerate() {
        if arg.name.trim().is_empty() {
            return Err(ValidationError::MissingArgumentName { index });
        }

        if !is_valid_argument_name(&arg.name) {
            return Err(ValidationError::InvalidArgumentName {
                index,
                name: arg.name.clone(),
            });
        }

        if !seen.insert(arg.name.as_str()) {
            return Err(ValidationError::DuplicateArgument {
                index,
                name: arg.name.clone(),
            });
        }

        if arg.description.trim().is_empty() {
            return Err(ValidationError::MissingArgumentDescription {
                index,
                name: arg.name.clone(),
            });
        }

        if !arg.kind.is_recognized() {
            return Err(ValidationError::InvalidArgumentType {
                index,
                name: arg.name.clone(),
                kind: arg.kind.to_string(),
            });
        }

        if let Some(default) = &arg.default {
            if let Some(expected) = default_mismatch(default, &arg.kind) {
                return Err(ValidationError::DefaultTypeMismatch {
                    index,
                    name: arg.name.clone(),
                    expected,
                });
            }
        }
    }

    Ok(())
}

/// Returns the expected kind name when `value` does not fit `kind`.
fn default_mismatch(value: &ArgValue, kind: &ArgumentType) -> Option<&'static str> {
    match kind {
        ArgumentType::String if !matches!(value, ArgValue::String(_)) => Some("string"),
        ArgumentType::Number if !value.is_number() => Some("number"),
        ArgumentType::Boolean if !matches!(value, ArgValue::Bool(_)) => Some("boolean"),
        _ => None,
    }
}

fn validate_template(
    template: &str,
    arguments: &[PromptArgumentSpec],
) -> Result<(), ValidationError> {
    if template.trim().is_empty() {
        return Err(ValidationError::EmptyTemplate);
    }

    let declared: HashSet<&str> = arguments.iter().map(|arg| arg.name.as_str()).collect();
    if let Some(undefined) = placeholder_names(template)
        .into_iter()
        .find(|name| !declared.contains(name))
    {
        return Err(ValidationError::UndefinedVariable(undefined.to_string()));
    }

    if let Some(unused) = arguments
        .iter()
        .find(|arg| arg.required && !uses_placeholder(template, &arg.name))
    {
        return Err(ValidationError::UnusedRequiredArgument(unused.name.clone()));
    }

    Ok(())
}
