// ABOUTME: Defines ToolResult - the normalized, status-bearing outcome of a
// ABOUTME: tool invocation - and Outcome, the typed form tool authors return.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::warn;

/// Key under which error results carry their human-readable message.
pub const ERROR_MESSAGE_KEY: &str = "error_message";

/// Key used for non-object return values and plain text results.
pub const RESULT_KEY: &str = "result";

const STATUS_KEY: &str = "status";

/// Status marker carried by every tool result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Success,
    Error,
    /// A long-running tool accepted the request; the answer comes later.
    Pending,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Pending => "pending",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "error" => Some(Self::Error),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Result of a tool execution.
///
/// Serializes to a JSON object that always contains `status`, so the calling
/// model can branch on success or failure without transport-level errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    /// The status marker.
    pub status: ToolStatus,

    /// Domain fields returned alongside the status.
    pub fields: Map<String, Value>,
}

impl ToolResult {
    /// Create an empty successful result.
    pub fn success() -> Self {
        Self {
            status: ToolStatus::Success,
            fields: Map::new(),
        }
    }

    /// Create a successful result carrying plain text under `result`.
    pub fn text(content: impl Into<String>) -> Self {
        Self::success().with_field(RESULT_KEY, content.into())
    }

    /// Create an error result with a human-readable message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            fields: Map::new(),
        }
        .with_field(ERROR_MESSAGE_KEY, message.into())
    }

    /// Create a pending result for a long-running tool.
    pub fn pending() -> Self {
        Self {
            status: ToolStatus::Pending,
            fields: Map::new(),
        }
    }

    /// Add a field to the result. A value that fails to serialize is logged
    /// and left out; use `try_with_field` to handle the failure instead.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(v) => {
                self.fields.insert(key, v);
            }
            Err(e) => {
                warn!(field = %key, error = %e, "dropping result field that failed to serialize");
            }
        }
        self
    }

    /// Add a field to the result, failing if the value does not serialize.
    pub fn try_with_field(
        mut self,
        key: impl Into<String>,
        value: impl Serialize,
    ) -> Result<Self, serde_json::Error> {
        self.fields.insert(key.into(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Normalize an arbitrary JSON value into a result.
    ///
    /// Objects with a recognized `status` keep it; objects without one are
    /// successes; any other value is a success wrapped under `result`.
    /// Unrecognized status markers are treated as success.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => {
                let status = fields
                    .remove(STATUS_KEY)
                    .as_ref()
                    .and_then(Value::as_str)
                    .and_then(ToolStatus::parse)
                    .unwrap_or(ToolStatus::Success);
                Self { status, fields }
            }
            other => Self::success().with_field(RESULT_KEY, other),
        }
    }

    /// Whether this result represents an error.
    pub fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    /// Whether this result is a pending long-running acknowledgement.
    pub fn is_pending(&self) -> bool {
        self.status == ToolStatus::Pending
    }

    /// Get a field by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a string field by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// The error message, if this is an error result.
    ///
    /// Falls back to a `message` field, which some tools use instead.
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error() {
            return None;
        }
        self.get_str(ERROR_MESSAGE_KEY)
            .or_else(|| self.get_str("message"))
    }

    /// Render as a JSON object with `status` first.
    pub fn to_value(&self) -> Value {
        let mut map = Map::with_capacity(self.fields.len() + 1);
        map.insert(STATUS_KEY.into(), Value::String(self.status.as_str().into()));
        for (k, v) in &self.fields {
            if k != STATUS_KEY {
                map.insert(k.clone(), v.clone());
            }
        }
        Value::Object(map)
    }
}

impl Default for ToolResult {
    fn default() -> Self {
        Self::success()
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<Value> for ToolResult {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Typed outcome returned by tool functions.
///
/// `Success` payloads must serialize to a JSON object; their fields are
/// flattened next to `status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Success(T),
    Error { error_message: String },
}

impl<T> Outcome<T> {
    /// Create an error outcome.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error_message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl<T: Serialize> Outcome<T> {
    /// Convert into the normalized result form.
    pub fn into_result(self) -> Result<ToolResult, serde_json::Error> {
        match self {
            Self::Success(payload) => Ok(ToolResult::from_value(serde_json::to_value(payload)?)),
            Self::Error { error_message } => Ok(ToolResult::error(error_message)),
        }
    }
}
