//! Prompt definition model.
//!
//! These types mirror the on-disk YAML layout one-to-one:
//!
//! ```yaml
//! metadata:
//!   id: greet
//!   name: Greeting
//!   description: Greets someone
//!   author: team
//!   created: 2025-08-27T10:00:00Z
//!   modified: 2025-08-27T10:00:00Z
//!   version: 1.0.0
//!   tags: [general]
//! arguments:
//!   - name: name
//!     description: Who to greet
//!     type: string
//!     required: true
//! prompt: |
//!   Hello {{name}}!
//! usage_stats:
//!   usage_count: 0
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Caller-supplied arguments keyed by argument name.
pub type ArgumentMap = HashMap<String, ArgValue>;

/// Unix timestamp of `0001-01-01T00:00:00Z`, the "unset" instant written by
/// some prompt tooling for missing timestamps.
const ZERO_INSTANT_UNIX: i64 = -62_135_596_800;

/// Returns true if the timestamp is absent or the zero instant.
pub fn is_zero_timestamp(timestamp: Option<&DateTime<Utc>>) -> bool {
    match timestamp {
        None => true,
        Some(ts) => ts.timestamp() == ZERO_INSTANT_UNIX && ts.timestamp_subsec_nanos() == 0,
    }
}

/// Layouts tried after RFC 3339. Values without an offset are read as UTC.
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a metadata timestamp.
///
/// Accepts RFC 3339, a date and time without offset, or a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .map(|naive| naive.and_utc())
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(text) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_timestamp(&text)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{text}'")))
}

/// A single prompt template loaded from one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Descriptive metadata.
    #[serde(default)]
    pub metadata: PromptMetadata,

    /// Declared arguments, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<PromptArgumentSpec>,

    /// Raw template text with `{{name}}` placeholders.
    #[serde(rename = "prompt", default)]
    pub template: String,

    /// In-memory usage statistics.
    #[serde(default)]
    pub usage_stats: UsageStats,

    /// File the definition was loaded from. Not serialized and not part of equality.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl PromptDefinition {
    /// The unique identifier of this prompt.
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    /// Number of successful resolutions so far.
    pub fn usage_count(&self) -> u64 {
        self.usage_stats.usage_count.get()
    }

    /// Look up a declared argument by name.
    pub fn argument(&self, name: &str) -> Option<&PromptArgumentSpec> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// Whether the prompt carries the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.metadata.tags.iter().any(|t| t == tag)
    }

    /// Where the prompt was loaded from, if known.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl PartialEq for PromptDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.metadata == other.metadata
            && self.arguments == other.arguments
            && self.template == other.template
            && self.usage_stats == other.usage_stats
    }
}

/// Prompt metadata block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub modified: Option<DateTime<Utc>>,
    pub version: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// One declared argument of a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptArgumentSpec {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "type", default)]
    pub kind: ArgumentType,

    #[serde(default)]
    pub required: bool,

    /// Value used when the caller does not supply one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ArgValue>,
}

impl PromptArgumentSpec {
    /// Create a new argument spec without a default.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ArgumentType,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            required,
            default: None,
        }
    }

    /// Attach a default value.
    pub fn with_default(mut self, value: impl Into<ArgValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Declared type of an argument.
///
/// Unknown type names are kept verbatim so that validation, not parsing,
/// reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    String,
    Number,
    Boolean,
    #[serde(untagged)]
    Unrecognized(String),
}

impl ArgumentType {
    /// Whether this is one of the supported kinds.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Unrecognized(other) => other,
        }
    }
}

impl Default for ArgumentType {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An untyped argument value as supplied by a file default or a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl ArgValue {
    /// Short name of the representation, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(_) | Self::Float(_))
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<serde_json::Value> for ArgValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::String(s),
            // Structured values travel as their JSON text.
            other @ (Value::Array(_) | Value::Object(_)) => Self::String(other.to_string()),
        }
    }
}

/// Convert a JSON object of caller arguments into an [`ArgumentMap`].
pub fn arguments_from_json(object: serde_json::Map<String, serde_json::Value>) -> ArgumentMap {
    object
        .into_iter()
        .map(|(name, value)| (name, ArgValue::from(value)))
        .collect()
}

/// Usage statistics kept alongside a prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageStats {
    #[serde(default)]
    pub usage_count: UsageCounter,

    #[serde(
        default,
        deserialize_with = "deserialize_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_used: Option<DateTime<Utc>>,
}

/// Lock-free resolution counter.
///
/// Concurrent resolutions of the same prompt never lose increments.
#[derive(Debug, Default)]
pub struct UsageCounter(AtomicU64);

impl UsageCounter {
    pub fn new(count: u64) -> Self {
        Self(AtomicU64::new(count))
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    /// Increment and return the new count.
    pub fn increment(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Clone for UsageCounter {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl PartialEq for UsageCounter {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Serialize for UsageCounter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.get())
    }
}

impl<'de> Deserialize<'de> for UsageCounter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::new)
    }
}
