use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::country::CountryCodes;
use crate::error::BuildError;
use crate::value::FieldValue;

/// Default error message used when a validator is built without one.
pub const DEFAULT_ERROR: &str = "Invalid input type specified.";

const EMAIL_PATTERN: &str = r"^[\w.\-]+@([\w\-]+\.)+[a-zA-Z]{2,7}$";

/// Pluggable validation strategy mapping a coerced value to an optional
/// error message. `None` means the value was accepted.
#[derive(Clone)]
pub enum Validator {
    Pattern(PatternValidator),
    Range(RangeValidator),
    Type(TypeValidator),
    Phone(PhoneValidator),
    Custom(CustomValidator),
    Chain(ValidatorChain),
}

impl Validator {
    pub fn pattern(pattern: &str, error: impl Into<String>) -> Result<Self, BuildError> {
        let regex = compile(pattern)?;
        Ok(Validator::Pattern(PatternValidator {
            regex,
            error: error.into(),
        }))
    }

    pub fn email() -> Self {
        Validator::pattern(EMAIL_PATTERN, "Please enter a valid email address.")
            .expect("built-in email pattern compiles")
    }

    /// Inclusive numeric range with a templated default message.
    pub fn range(min: f64, max: f64) -> Self {
        Self::range_with_error(min, max, format!("Please enter a value between {min} and {max}."))
    }

    pub fn range_with_error(min: f64, max: f64, error: impl Into<String>) -> Self {
        Validator::Range(RangeValidator {
            min,
            max,
            error: error.into(),
        })
    }

    pub fn text() -> Self {
        Validator::Type(TypeValidator::new(TypeTarget::Text))
    }

    pub fn number() -> Self {
        Validator::Type(TypeValidator::new(TypeTarget::Number))
    }

    pub fn decimal() -> Self {
        Validator::Type(TypeValidator::new(TypeTarget::Decimal))
    }

    /// Phone-number validator backed by the given dialing-code lookup.
    pub fn phone(
        codes: &CountryCodes,
        require_plus: bool,
        check_code: bool,
    ) -> Result<Self, BuildError> {
        let pattern = codes.phone_pattern(require_plus, check_code);
        let regex = compile(&pattern)?;
        Ok(Validator::Phone(PhoneValidator {
            regex,
            error: "Please enter a valid phone number.".to_string(),
        }))
    }

    pub fn custom(
        key: impl Into<String>,
        check: impl Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Validator::Custom(CustomValidator {
            key: key.into(),
            check: Arc::new(check),
        })
    }

    pub fn chain(validators: Vec<Validator>) -> Self {
        Validator::Chain(ValidatorChain {
            validators,
            collect_all: false,
        })
    }

    /// Identifying key used in debug output.
    pub fn key(&self) -> &str {
        match self {
            Validator::Pattern(inner) => inner.regex.as_str(),
            Validator::Range(_) => "range",
            Validator::Type(inner) => inner.target.label(),
            Validator::Phone(_) => "phone",
            Validator::Custom(inner) => &inner.key,
            Validator::Chain(_) => "chain",
        }
    }

    /// Run the validator, returning an error message on failure.
    pub fn validate(&self, value: &FieldValue) -> Option<String> {
        match self {
            Validator::Pattern(inner) => inner.validate(value),
            Validator::Range(inner) => inner.validate(value),
            Validator::Type(inner) => inner.validate(value),
            Validator::Phone(inner) => inner.validate(value),
            Validator::Custom(inner) => (inner.check)(value),
            Validator::Chain(inner) => inner.validate(value),
        }
    }

    /// The type validator doubles as the input element's parser.
    pub fn as_type(&self) -> Option<&TypeValidator> {
        match self {
            Validator::Type(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.key()).finish()
    }
}

impl From<ValidatorChain> for Validator {
    fn from(chain: ValidatorChain) -> Self {
        Validator::Chain(chain)
    }
}

fn compile(pattern: &str) -> Result<Regex, BuildError> {
    Regex::new(pattern).map_err(|error| BuildError::Pattern {
        pattern: pattern.to_string(),
        reason: error.to_string(),
    })
}

#[derive(Debug, Clone)]
pub struct PatternValidator {
    regex: Regex,
    error: String,
}

impl PatternValidator {
    fn validate(&self, value: &FieldValue) -> Option<String> {
        let text = value.to_string();
        if self.regex.is_match(&text) {
            None
        } else {
            Some(self.error.clone())
        }
    }
}

#[derive(Debug, Clone)]
pub struct RangeValidator {
    min: f64,
    max: f64,
    error: String,
}

impl RangeValidator {
    fn validate(&self, value: &FieldValue) -> Option<String> {
        let Some(number) = value.as_number() else {
            return Some("The input must be a number.".to_string());
        };
        if number < self.min || number > self.max {
            Some(self.error.clone())
        } else {
            None
        }
    }
}

/// Target type for input-text coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeTarget {
    Text,
    Number,
    Decimal,
}

impl TypeTarget {
    fn label(&self) -> &'static str {
        match self {
            TypeTarget::Text => "string",
            TypeTarget::Number => "integer",
            TypeTarget::Decimal => "float",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeValidator {
    target: TypeTarget,
    error: String,
}

impl TypeValidator {
    fn new(target: TypeTarget) -> Self {
        let error = match target {
            TypeTarget::Text => "Please enter a valid Text.",
            TypeTarget::Number => "Please enter a valid Number.",
            TypeTarget::Decimal => "Please enter a valid Decimal.",
        };
        Self {
            target,
            error: error.to_string(),
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    pub fn target(&self) -> TypeTarget {
        self.target
    }

    /// Parse input text into the target type. A failed numeric parse falls
    /// back to the original text so that `validate` reports it.
    pub fn parse(&self, text: &str) -> FieldValue {
        match self.target {
            TypeTarget::Text => FieldValue::Text(text.to_string()),
            TypeTarget::Number => match text.trim().parse::<i64>() {
                Ok(value) => FieldValue::Int(value),
                Err(_) => FieldValue::Text(text.to_string()),
            },
            TypeTarget::Decimal => match text.trim().parse::<f64>() {
                Ok(value) => FieldValue::Float(value),
                Err(_) => FieldValue::Text(text.to_string()),
            },
        }
    }

    fn validate(&self, value: &FieldValue) -> Option<String> {
        let accepted = match self.target {
            TypeTarget::Text => value.as_text().is_some_and(|text| !text.is_empty()),
            TypeTarget::Number => matches!(value, FieldValue::Int(_)),
            TypeTarget::Decimal => matches!(value, FieldValue::Int(_) | FieldValue::Float(_)),
        };
        if accepted { None } else { Some(self.error.clone()) }
    }
}

#[derive(Debug, Clone)]
pub struct PhoneValidator {
    regex: Regex,
    error: String,
}

impl PhoneValidator {
    fn validate(&self, value: &FieldValue) -> Option<String> {
        let text = value.to_string();
        if self.regex.is_match(&text) {
            None
        } else {
            Some(self.error.clone())
        }
    }
}

pub struct CustomValidator {
    key: String,
    check: Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>,
}

impl Clone for CustomValidator {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

/// Ordered sequence of validators run against the same value.
#[derive(Debug, Clone, Default)]
pub struct ValidatorChain {
    validators: Vec<Validator>,
    collect_all: bool,
}

impl ValidatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Collect every failure message (joined with a newline) instead of
    /// stopping at the first.
    pub fn collect_all(mut self, value: bool) -> Self {
        self.collect_all = value;
        self
    }

    fn validate(&self, value: &FieldValue) -> Option<String> {
        let mut errors = Vec::new();
        for validator in &self.validators {
            if let Some(error) = validator.validate(value) {
                if !self.collect_all {
                    return Some(error);
                }
                errors.push(error);
            }
        }
        if errors.is_empty() {
            None
        } else {
            Some(errors.join("\n"))
        }
    }
}
