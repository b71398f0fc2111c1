use serde_json::{Map, Value};

use crate::error::BuildError;
use crate::validator::Validator;

/// A single-choice selection rendered as a dropdown list.
#[derive(Debug, Clone)]
pub struct Dropdown {
    label: String,
    options: Vec<String>,
    default: Option<usize>,
    tooltip: Option<String>,
    validator: Option<Validator>,
}

impl Dropdown {
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            label: label.into(),
            options,
            default: None,
            tooltip: None,
            validator: None,
        }
    }

    pub fn with_default(mut self, index: usize) -> Self {
        self.default = Some(index);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn default_index(&self) -> Option<usize> {
        self.default
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub(crate) fn set_default(&mut self, index: usize) {
        self.default = Some(index);
    }

    pub(crate) fn pre_build_check(&self) -> Result<(), BuildError> {
        if let Some(index) = self.default
            && self.options.get(index).is_none()
        {
            return Err(BuildError::element(
                "dropdown",
                format!("cannot find index {index} in the option list"),
            ));
        }
        reject_type_validator("dropdown", self.validator.as_ref())
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("dropdown".into()));
        map.insert("text".into(), Value::String(self.label.clone()));
        map.insert(
            "options".into(),
            Value::Array(self.options.iter().cloned().map(Value::String).collect()),
        );
        if let Some(index) = self.default {
            map.insert("default".into(), Value::from(index));
        }
        if let Some(tooltip) = &self.tooltip {
            map.insert("tooltip".into(), Value::String(tooltip.clone()));
        }
        Value::Object(map)
    }
}

/// A free-text entry field.
#[derive(Debug, Clone)]
pub struct Input {
    label: String,
    placeholder: String,
    default: Option<String>,
    tooltip: Option<String>,
    validator: Option<Validator>,
}

impl Input {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: String::new(),
            default: None,
            tooltip: None,
            validator: None,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn default_text(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub(crate) fn set_default(&mut self, text: String) {
        self.default = Some(text);
    }

    pub(crate) fn pre_build_check(&self) -> Result<(), BuildError> {
        // Inputs are the only element kind allowed to carry a type validator.
        Ok(())
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("input".into()));
        map.insert("text".into(), Value::String(self.label.clone()));
        map.insert(
            "placeholder".into(),
            Value::String(self.placeholder.clone()),
        );
        if let Some(default) = &self.default {
            map.insert("default".into(), Value::String(default.clone()));
        }
        if let Some(tooltip) = &self.tooltip {
            map.insert("tooltip".into(), Value::String(tooltip.clone()));
        }
        Value::Object(map)
    }
}

/// A numeric slider over an inclusive range.
#[derive(Debug, Clone)]
pub struct Slider {
    label: String,
    min: i64,
    max: i64,
    step: Option<i64>,
    default: Option<i64>,
    tooltip: Option<String>,
    validator: Option<Validator>,
}

impl Slider {
    pub fn new(label: impl Into<String>, min: i64, max: i64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            step: None,
            default: None,
            tooltip: None,
            validator: None,
        }
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_default(mut self, default: i64) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn default_value(&self) -> Option<i64> {
        self.default
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub(crate) fn set_default(&mut self, value: i64) {
        self.default = Some(value);
    }

    pub(crate) fn pre_build_check(&self) -> Result<(), BuildError> {
        if self.min < 0 {
            return Err(BuildError::element("slider", "min must be 0 or greater"));
        }
        if self.max < 0 {
            return Err(BuildError::element("slider", "max must be 0 or greater"));
        }
        if self.max < self.min {
            return Err(BuildError::element("slider", "max must not be below min"));
        }
        if let Some(step) = self.step
            && step < 0
        {
            return Err(BuildError::element("slider", "step must be 0 or greater"));
        }
        if let Some(default) = self.default
            && (default < self.min || default > self.max)
        {
            return Err(BuildError::element(
                "slider",
                format!("default {default} is outside {}..={}", self.min, self.max),
            ));
        }
        reject_type_validator("slider", self.validator.as_ref())
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("slider".into()));
        map.insert("text".into(), Value::String(self.label.clone()));
        map.insert("min".into(), Value::from(self.min));
        map.insert("max".into(), Value::from(self.max));
        if let Some(step) = self.step {
            map.insert("step".into(), Value::from(step));
        }
        if let Some(default) = self.default {
            map.insert("default".into(), Value::from(default));
        }
        if let Some(tooltip) = &self.tooltip {
            map.insert("tooltip".into(), Value::String(tooltip.clone()));
        }
        Value::Object(map)
    }
}

/// A slider over a discrete, ordered list of steps.
#[derive(Debug, Clone)]
pub struct StepSlider {
    label: String,
    steps: Vec<i64>,
    default: Option<usize>,
    tooltip: Option<String>,
    validator: Option<Validator>,
}

impl StepSlider {
    pub fn new(label: impl Into<String>, steps: Vec<i64>) -> Self {
        Self {
            label: label.into(),
            steps,
            default: None,
            tooltip: None,
            validator: None,
        }
    }

    pub fn with_default(mut self, index: usize) -> Self {
        self.default = Some(index);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn steps(&self) -> &[i64] {
        &self.steps
    }

    pub fn default_index(&self) -> Option<usize> {
        self.default
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub(crate) fn set_default(&mut self, index: usize) {
        self.default = Some(index);
    }

    pub(crate) fn pre_build_check(&self) -> Result<(), BuildError> {
        if let Some(index) = self.default
            && self.steps.get(index).is_none()
        {
            return Err(BuildError::element(
                "step_slider",
                format!("cannot find index {index} in the step list"),
            ));
        }
        reject_type_validator("step_slider", self.validator.as_ref())
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("step_slider".into()));
        map.insert("text".into(), Value::String(self.label.clone()));
        map.insert(
            "steps".into(),
            Value::Array(
                self.steps
                    .iter()
                    .map(|step| Value::String(step.to_string()))
                    .collect(),
            ),
        );
        if let Some(index) = self.default {
            map.insert("default".into(), Value::from(index));
        }
        if let Some(tooltip) = &self.tooltip {
            map.insert("tooltip".into(), Value::String(tooltip.clone()));
        }
        Value::Object(map)
    }
}

/// An on/off switch.
#[derive(Debug, Clone)]
pub struct Toggle {
    label: String,
    default: Option<bool>,
    tooltip: Option<String>,
    validator: Option<Validator>,
}

impl Toggle {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default: None,
            tooltip: None,
            validator: None,
        }
    }

    pub fn with_default(mut self, state: bool) -> Self {
        self.default = Some(state);
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn default_state(&self) -> Option<bool> {
        self.default
    }

    pub fn validator(&self) -> Option<&Validator> {
        self.validator.as_ref()
    }

    pub(crate) fn set_default(&mut self, state: bool) {
        self.default = Some(state);
    }

    pub(crate) fn pre_build_check(&self) -> Result<(), BuildError> {
        reject_type_validator("toggle", self.validator.as_ref())
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("toggle".into()));
        map.insert("text".into(), Value::String(self.label.clone()));
        if let Some(default) = self.default {
            map.insert("default".into(), Value::Bool(default));
        }
        if let Some(tooltip) = &self.tooltip {
            map.insert("tooltip".into(), Value::String(tooltip.clone()));
        }
        Value::Object(map)
    }
}

/// Type validators parse input text; attaching one anywhere else is a
/// configuration mistake.
fn reject_type_validator(
    kind: &'static str,
    validator: Option<&Validator>,
) -> Result<(), BuildError> {
    if let Some(validator) = validator
        && validator.as_type().is_some()
    {
        return Err(BuildError::element(
            kind,
            "a type validator can only be attached to an input element",
        ));
    }
    Ok(())
}
