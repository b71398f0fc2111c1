use std::fmt;

use serde_json::Value;

use crate::element::Element;
use crate::error::{BuildError, FlowError};

/// A normalized, strongly typed value produced from one element's raw answer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric view of the value; integers are widened to floats.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(value) => Some(*value as f64),
            FieldValue::Float(value) => Some(*value),
            FieldValue::Text(text) => text.trim().parse().ok(),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::Int(value) => Value::from(*value),
            FieldValue::Float(value) => Value::from(*value),
            FieldValue::Bool(value) => Value::Bool(*value),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Map a raw response value onto the typed value appropriate to the element.
///
/// Selection elements receive an index and resolve it against their option
/// list; inputs delegate to an attached type validator's parser when present;
/// readonly elements map to their own static text. Out-of-range indices and
/// wrong-shaped raw values are protocol failures.
pub fn coerce(element: &Element, raw: &Value) -> Result<FieldValue, FlowError> {
    match element {
        Element::Dropdown(dropdown) => {
            let index = raw
                .as_u64()
                .ok_or_else(|| FlowError::unexpected("a dropdown option index", raw))?
                as usize;
            let option = dropdown.options().get(index).ok_or_else(|| {
                FlowError::UnexpectedResponse {
                    expected: "an index inside the dropdown option list",
                    got: index.to_string(),
                }
            })?;
            Ok(FieldValue::Text(option.clone()))
        }
        Element::Input(input) => {
            let text = scalar_text(raw)
                .ok_or_else(|| FlowError::unexpected("text for the input element", raw))?;
            match input.validator().and_then(|validator| validator.as_type()) {
                Some(parser) => Ok(parser.parse(&text)),
                None => Ok(FieldValue::Text(text)),
            }
        }
        Element::Slider(_) => {
            let value = raw
                .as_f64()
                .ok_or_else(|| FlowError::unexpected("a numeric slider value", raw))?;
            Ok(FieldValue::Int(value.trunc() as i64))
        }
        Element::StepSlider(slider) => {
            let index = raw
                .as_u64()
                .ok_or_else(|| FlowError::unexpected("a step slider index", raw))?
                as usize;
            let step = slider.steps().get(index).ok_or_else(|| {
                FlowError::UnexpectedResponse {
                    expected: "an index inside the step list",
                    got: index.to_string(),
                }
            })?;
            Ok(FieldValue::Int(*step))
        }
        Element::Toggle(_) => {
            let value = raw
                .as_bool()
                .ok_or_else(|| FlowError::unexpected("a boolean toggle state", raw))?;
            Ok(FieldValue::Bool(value))
        }
        Element::Label(label) => Ok(FieldValue::Text(label.text().to_string())),
        Element::Header(header) => Ok(FieldValue::Text(header.text().to_string())),
        Element::Divider(_) => Ok(FieldValue::Text(String::new())),
        Element::Error(error) => Ok(FieldValue::Text(error.message().to_string())),
        Element::Button(_) => Err(BuildError::element(
            "button",
            "this element does not produce a response value",
        )
        .into()),
    }
}

/// Text rendering of a scalar raw value; the remote client is allowed to echo
/// input text as a bare number or boolean.
pub(crate) fn scalar_text(raw: &Value) -> Option<String> {
    match raw {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Label, Slider, StepSlider};
    use serde_json::json;

    #[test]
    fn slider_values_truncate_to_integers() {
        let slider = Element::from(Slider::new("Age", 0, 100));
        assert_eq!(coerce(&slider, &json!(42.9)).unwrap(), FieldValue::Int(42));
        assert_eq!(coerce(&slider, &json!(17)).unwrap(), FieldValue::Int(17));
    }

    #[test]
    fn step_slider_indices_resolve_to_steps() {
        let slider = Element::from(StepSlider::new("Render distance", vec![4, 8, 16]));
        assert_eq!(coerce(&slider, &json!(2)).unwrap(), FieldValue::Int(16));
        assert!(coerce(&slider, &json!(3)).is_err());
    }

    #[test]
    fn readonly_elements_coerce_to_their_text() {
        let label = Element::from(Label::new("fine print"));
        assert_eq!(
            coerce(&label, &json!(null)).unwrap(),
            FieldValue::Text("fine print".into())
        );
    }
}
