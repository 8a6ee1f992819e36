use crate::activity::ExecutionResult;
use serde_json::Value;

/// Raw executor output before normalization.
///
/// Agent frameworks either hand back a structured result exposing a `raw`
/// (or `response`) text field, or plain text.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentOutput {
    Structured(Value),
    Text(String),
}

impl AgentOutput {
    /// Normalize to the reply string used for the envelope and the audit log.
    pub fn into_result(self) -> ExecutionResult {
        let text = match self {
            Self::Text(text) => text,
            Self::Structured(value) => structured_text(value),
        };
        ExecutionResult { text }
    }
}

fn structured_text(value: Value) -> String {
    if let Value::String(text) = value {
        return text;
    }
    let field_text = value.as_object().and_then(|fields| {
        ["raw", "response"].iter().find_map(|key| {
            fields
                .get(*key)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
                .map(ToString::to_string)
        })
    });
    field_text.unwrap_or_else(|| value.to_string())
}

impl From<String> for AgentOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AgentOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
