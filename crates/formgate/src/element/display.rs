use serde_json::{Map, Value, json};

/// Static text shown between fields. Never part of the response array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    text: String,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn render(&self) -> Value {
        json!({ "type": "label", "text": self.text })
    }
}

/// Section heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    text: String,
}

impl Header {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn render(&self) -> Value {
        json!({ "type": "header", "text": self.text })
    }
}

/// Horizontal rule between sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Divider;

impl Divider {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn render(&self) -> Value {
        json!({ "type": "divider", "text": "" })
    }
}

/// Annotation injected by the pipeline ahead of a field that failed
/// validation. Renders as a plain label; the distinct variant lets the
/// annotate-and-resend pass find and drop stale annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLabel {
    message: String,
}

impl ErrorLabel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("label".into()));
        map.insert("text".into(), Value::String(self.message.clone()));
        Value::Object(map)
    }
}
