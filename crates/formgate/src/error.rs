use serde_json::Value;
use thiserror::Error;

/// Configuration failures detected while building a form for sending.
///
/// These indicate a mistake in the caller's form definition. They are raised
/// synchronously at build time and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("failed to build {element} element: {reason}")]
    Element {
        element: &'static str,
        reason: String,
    },
    #[error("the {kind} element cannot be used in a {form} form")]
    UnsupportedElement {
        kind: &'static str,
        form: &'static str,
    },
    #[error("failed to build custom form: add at least one element")]
    NoElements,
    #[error("invalid validator pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
    #[error("failed to load country codes: {0}")]
    CountryCodes(String),
}

impl BuildError {
    pub(crate) fn element(element: &'static str, reason: impl Into<String>) -> Self {
        BuildError::Element {
            element,
            reason: reason.into(),
        }
    }
}

/// Runtime failures while driving a form round-trip.
///
/// `UnexpectedResponse` means the remote client answered with data whose shape
/// does not match the outstanding form kind; it aborts the exchange and is
/// surfaced to the caller rather than retried.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("expected {expected}, got {got}")]
    UnexpectedResponse {
        expected: &'static str,
        got: String,
    },
    #[error("no form is awaiting a response from '{0}'")]
    NoPendingForm(String),
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl FlowError {
    pub(crate) fn unexpected(expected: &'static str, got: &Value) -> Self {
        FlowError::UnexpectedResponse {
            expected,
            got: json_type_name(got).to_string(),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unexpected_names_the_json_type() {
        let error = FlowError::unexpected("a confirmation choice", &json!([1, 2]));
        assert_eq!(error.to_string(), "expected a confirmation choice, got array");
    }

    #[test]
    fn build_error_names_the_element() {
        let error = BuildError::element("dropdown", "cannot find index 3 in the option list");
        assert_eq!(
            error.to_string(),
            "failed to build dropdown element: cannot find index 3 in the option list"
        );
    }
}
