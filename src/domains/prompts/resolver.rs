//! Argument resolution and template rendering.
//!
//! Resolution turns a validated [`PromptDefinition`] plus caller-supplied
//! arguments into rendered text:
//!
//! 1. seed effective values with declared defaults
//! 2. overlay caller arguments (unknown names are accepted and ignored)
//! 3. check that every required argument has a value
//! 4. convert each value to its declared type
//! 5. substitute placeholders
//! 6. bump the definition's usage counter
//!
//! Boolean parsing is deliberately lenient: an unrecognised string such as
//! `"maybe"` resolves to `false` with a warning instead of failing.

use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use super::error::ResolutionError;
use super::model::{ArgValue, ArgumentMap, ArgumentType, PromptDefinition};
use super::templates::substitute;

/// A value after conversion to its declared argument type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // f64's Display never switches to exponent notation.
            Self::Number(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Resolve a prompt and record the use.
///
/// On success the definition's usage counter is incremented by exactly one.
/// Failed resolutions leave it untouched.
pub fn resolve(
    definition: &PromptDefinition,
    caller_args: &ArgumentMap,
) -> Result<String, ResolutionError> {
    let rendered = render(definition, caller_args)?;
    let count = definition.usage_stats.usage_count.increment();
    debug!(prompt = %definition.id(), usage_count = count, "Prompt resolved");
    Ok(rendered)
}

/// Render a prompt without touching its usage statistics.
pub fn render(
    definition: &PromptDefinition,
    caller_args: &ArgumentMap,
) -> Result<String, ResolutionError> {
    let values = typed_values(definition, caller_args)?;
    let rendered = substitute(&definition.template, |name| {
        values.get(name).map(ToString::to_string)
    });
    Ok(rendered.into_owned())
}

/// Merge defaults with caller arguments and convert every declared argument
/// that ends up with a value.
pub fn typed_values(
    definition: &PromptDefinition,
    caller_args: &ArgumentMap,
) -> Result<HashMap<String, TypedValue>, ResolutionError> {
    let mut effective: HashMap<&str, &ArgValue> = definition
        .arguments
        .iter()
        .filter_map(|arg| arg.default.as_ref().map(|value| (arg.name.as_str(), value)))
        .collect();

    for (name, value) in caller_args {
        effective.insert(name.as_str(), value);
    }

    if let Some(missing) = definition
        .arguments
        .iter()
        .find(|arg| arg.required && !effective.contains_key(arg.name.as_str()))
    {
        return Err(ResolutionError::missing_argument(&missing.name));
    }

    let mut typed = HashMap::with_capacity(definition.arguments.len());
    for arg in &definition.arguments {
        let Some(value) = effective.get(arg.name.as_str()) else {
            continue;
        };
        let converted = convert_value(&arg.name, value, &arg.kind)?;
        debug!(
            argument = %arg.name,
            kind = %arg.kind,
            from = value.kind(),
            value = %converted,
            "Converted argument"
        );
        typed.insert(arg.name.clone(), converted);
    }

    Ok(typed)
}

/// Convert one value to the declared argument type.
pub fn convert_value(
    argument: &str,
    value: &ArgValue,
    kind: &ArgumentType,
) -> Result<TypedValue, ResolutionError> {
    match kind {
        ArgumentType::String => Ok(TypedValue::Text(value.to_string())),
        ArgumentType::Number => to_number(argument, value).map(TypedValue::Number),
        ArgumentType::Boolean => to_bool(argument, value).map(TypedValue::Bool),
        ArgumentType::Unrecognized(other) => Err(ResolutionError::UnsupportedType {
            argument: argument.to_string(),
            kind: other.clone(),
        }),
    }
}

fn to_number(argument: &str, value: &ArgValue) -> Result<f64, ResolutionError> {
    match value {
        ArgValue::Integer(i) => Ok(*i as f64),
        ArgValue::Float(n) => Ok(*n),
        ArgValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| ResolutionError::InvalidNumber {
                argument: argument.to_string(),
                value: s.clone(),
            }),
        other => Err(ResolutionError::InvalidValue {
            argument: argument.to_string(),
            expected: "number",
            value: other.to_string(),
        }),
    }
}

fn to_bool(argument: &str, value: &ArgValue) -> Result<bool, ResolutionError> {
    match value {
        ArgValue::Bool(b) => Ok(*b),
        ArgValue::String(s) => Ok(parse_lenient_bool(argument, s)),
        other => Err(ResolutionError::InvalidValue {
            argument: argument.to_string(),
            expected: "boolean",
            value: other.to_string(),
        }),
    }
}

/// Parse a boolean from text. Unrecognised text yields `false`.
pub fn parse_lenient_bool(argument: &str, text: &str) -> bool {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => true,
        "false" | "no" | "0" | "off" | "" => false,
        _ => {
            warn!(
                argument,
                value = text,
                "Unable to parse value as boolean, defaulting to false"
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::model::{PromptArgumentSpec, PromptMetadata};

    fn definition(arguments: Vec<PromptArgumentSpec>, template: &str) -> PromptDefinition {
        PromptDefinition {
            metadata: PromptMetadata {
                id: "test".to_string(),
                ..Default::default()
            },
            arguments,
            template: template.to_string(),
            ..Default::default()
        }
    }

    fn hello() -> PromptDefinition {
        definition(
            vec![PromptArgumentSpec::new(
                "name",
                "Who to greet",
                ArgumentType::String,
                true,
            )],
            "Hello {{name}}!",
        )
    }

    fn args<const N: usize>(pairs: [(&str, ArgValue); N]) -> ArgumentMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_hello_world() {
        let prompt = hello();
        let result = resolve(&prompt, &args([("name", "World".into())])).unwrap();
        assert_eq!(result, "Hello World!");
        assert_eq!(prompt.usage_count(), 1);
    }

    #[test]
    fn test_missing_required_argument() {
        let prompt = hello();
        let err = resolve(&prompt, &ArgumentMap::new()).unwrap_err();
        assert_eq!(err, ResolutionError::MissingArgument("name".to_string()));
        assert_eq!(err.argument(), "name");
        assert_eq!(prompt.usage_count(), 0);
    }

    #[test]
    fn test_resolution_is_deterministic_and_counts_each_call() {
        let prompt = definition(
            vec![
                PromptArgumentSpec::new("a", "a", ArgumentType::Number, true),
                PromptArgumentSpec::new("b", "b", ArgumentType::Boolean, false)
                    .with_default(true),
                PromptArgumentSpec::new("c", "c", ArgumentType::String, false)
                    .with_default("x"),
            ],
            "{{a}}/{{b}}/{{c}}",
        );
        let caller = args([("a", ArgValue::Float(0.1)), ("unknown", "ignored".into())]);

        let first = resolve(&prompt, &caller).unwrap();
        for _ in 0..4 {
            assert_eq!(resolve(&prompt, &caller).unwrap(), first);
        }
        assert_eq!(first, "0.1/true/x");
        assert_eq!(prompt.usage_count(), 5);
    }

    #[test]
    fn test_caller_overrides_default() {
        let prompt = definition(
            vec![
                PromptArgumentSpec::new("tone", "Tone", ArgumentType::String, false)
                    .with_default("formal"),
            ],
            "Tone: {{tone}}",
        );

        assert_eq!(render(&prompt, &ArgumentMap::new()).unwrap(), "Tone: formal");
        assert_eq!(
            render(&prompt, &args([("tone", "casual".into())])).unwrap(),
            "Tone: casual"
        );
    }

    #[test]
    fn test_default_satisfies_required() {
        let prompt = definition(
            vec![
                PromptArgumentSpec::new("lang", "Language", ArgumentType::String, true)
                    .with_default("Rust"),
            ],
            "Write {{lang}}",
        );
        assert_eq!(render(&prompt, &ArgumentMap::new()).unwrap(), "Write Rust");
    }

    #[test]
    fn test_number_conversion() {
        let kind = ArgumentType::Number;
        assert_eq!(
            convert_value("n", &ArgValue::Integer(42), &kind).unwrap(),
            TypedValue::Number(42.0)
        );
        assert_eq!(
            convert_value("n", &" 3.5 ".into(), &kind).unwrap(),
            TypedValue::Number(3.5)
        );

        let err = convert_value("n", &"abc".into(), &kind).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::InvalidNumber {
                argument: "n".to_string(),
                value: "abc".to_string()
            }
        );

        let err = convert_value("n", &ArgValue::Bool(true), &kind).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidValue { expected: "number", .. }));
    }

    #[test]
    fn test_number_formatting_is_plain_decimal() {
        assert_eq!(TypedValue::Number(42.0).to_string(), "42");
        assert_eq!(TypedValue::Number(2.5).to_string(), "2.5");
        assert_eq!(TypedValue::Number(1e21).to_string(), "1000000000000000000000");
        assert_eq!(TypedValue::Number(-0.001).to_string(), "-0.001");
    }

    #[test]
    fn test_boolean_conversion() {
        let kind = ArgumentType::Boolean;
        for text in ["true", "YES", " 1 ", "On"] {
            assert_eq!(
                convert_value("b", &text.into(), &kind).unwrap(),
                TypedValue::Bool(true),
                "{text}"
            );
        }
        for text in ["false", "No", "0", "off", "", "  "] {
            assert_eq!(
                convert_value("b", &text.into(), &kind).unwrap(),
                TypedValue::Bool(false),
                "{text:?}"
            );
        }

        let err = convert_value("b", &ArgValue::Integer(1), &kind).unwrap_err();
        assert!(matches!(err, ResolutionError::InvalidValue { expected: "boolean", .. }));
    }

    #[test]
    fn test_unrecognised_boolean_text_is_false() {
        let prompt = definition(
            vec![PromptArgumentSpec::new("flag", "Flag", ArgumentType::Boolean, true)],
            "flag={{flag}}",
        );
        let result = resolve(&prompt, &args([("flag", "maybe".into())])).unwrap();
        assert_eq!(result, "flag=false");
    }

    #[test]
    fn test_string_conversion_of_other_values() {
        let kind = ArgumentType::String;
        assert_eq!(
            convert_value("s", &ArgValue::Integer(7), &kind).unwrap(),
            TypedValue::Text("7".to_string())
        );
        assert_eq!(
            convert_value("s", &ArgValue::Bool(false), &kind).unwrap(),
            TypedValue::Text("false".to_string())
        );
        assert_eq!(
            convert_value("s", &ArgValue::Null, &kind).unwrap(),
            TypedValue::Text(String::new())
        );
    }

    #[test]
    fn test_unsupported_type() {
        let err = convert_value("x", &"1".into(), &ArgumentType::Unrecognized("date".into()))
            .unwrap_err();
        assert_eq!(
            err,
            ResolutionError::UnsupportedType {
                argument: "x".to_string(),
                kind: "date".to_string()
            }
        );
    }

    #[test]
    fn test_conversion_failure_aborts_and_does_not_count() {
        let prompt = definition(
            vec![PromptArgumentSpec::new("n", "n", ArgumentType::Number, true)],
            "{{n}}",
        );
        let err = resolve(&prompt, &args([("n", "ten".into())])).unwrap_err();
        assert_eq!(err.argument(), "n");
        assert_eq!(prompt.usage_count(), 0);
    }

    #[test]
    fn test_placeholder_without_value_is_left_verbatim() {
        let prompt = definition(
            vec![PromptArgumentSpec::new("opt", "Optional", ArgumentType::String, false)],
            "[{{opt}}]",
        );
        assert_eq!(render(&prompt, &ArgumentMap::new()).unwrap(), "[{{opt}}]");
    }

    #[test]
    fn test_substituted_values_are_not_rescanned() {
        let prompt = definition(
            vec![
                PromptArgumentSpec::new("a", "a", ArgumentType::String, true),
                PromptArgumentSpec::new("b", "b", ArgumentType::String, true),
            ],
            "{{a}} {{b}}",
        );
        let result = render(&prompt, &args([("a", "{{b}}".into()), ("b", "B".into())])).unwrap();
        assert_eq!(result, "{{b}} B");
    }

    #[test]
    fn test_concurrent_resolutions_never_lose_counts() {
        use std::sync::Arc;

        let prompt = Arc::new(hello());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let prompt = Arc::clone(&prompt);
                std::thread::spawn(move || {
                    let caller = args([("name", "x".into())]);
                    for _ in 0..100 {
                        resolve(&prompt, &caller).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(prompt.usage_count(), 800);
    }
}
