mod button;
mod display;
mod field;

pub use button::{Button, ButtonImage, ClickHandler};
pub use display::{Divider, ErrorLabel, Header, Label};
pub use field::{Dropdown, Input, Slider, StepSlider, Toggle};

use serde_json::Value;

use crate::error::BuildError;
use crate::form::FormKind;
use crate::validator::Validator;
use crate::value::scalar_text;

/// One field or static piece of content inside a form.
///
/// Variants are dispatched exhaustively in coercion and the build pass, so
/// adding a new element kind is a compile-time-checked exercise.
#[derive(Debug)]
pub enum Element {
    Dropdown(Dropdown),
    Input(Input),
    Slider(Slider),
    StepSlider(StepSlider),
    Toggle(Toggle),
    Label(Label),
    Header(Header),
    Divider(Divider),
    Error(ErrorLabel),
    Button(Button),
}

impl Element {
    /// Stable tag used in the wire format and in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Dropdown(_) => "dropdown",
            Element::Input(_) => "input",
            Element::Slider(_) => "slider",
            Element::StepSlider(_) => "step_slider",
            Element::Toggle(_) => "toggle",
            Element::Label(_) | Element::Error(_) => "label",
            Element::Header(_) => "header",
            Element::Divider(_) => "divider",
            Element::Button(_) => "button",
        }
    }

    /// Readonly elements are never echoed back in the response array.
    pub fn is_readonly(&self) -> bool {
        matches!(
            self,
            Element::Label(_) | Element::Header(_) | Element::Divider(_) | Element::Error(_)
        )
    }

    /// Form kinds this element may legally be placed in.
    pub fn supported_forms(&self) -> &'static [FormKind] {
        match self {
            Element::Dropdown(_)
            | Element::Input(_)
            | Element::Slider(_)
            | Element::StepSlider(_)
            | Element::Toggle(_)
            | Element::Label(_)
            | Element::Error(_) => &[FormKind::Custom],
            Element::Header(_) | Element::Divider(_) => &[FormKind::Menu, FormKind::Custom],
            Element::Button(_) => &[FormKind::Menu],
        }
    }

    /// Validate the element's own configuration before it is rendered.
    pub fn pre_build_check(&self) -> Result<(), BuildError> {
        match self {
            Element::Dropdown(dropdown) => dropdown.pre_build_check(),
            Element::Slider(slider) => slider.pre_build_check(),
            Element::StepSlider(slider) => slider.pre_build_check(),
            Element::Input(input) => input.pre_build_check(),
            Element::Toggle(toggle) => toggle.pre_build_check(),
            _ => Ok(()),
        }
    }

    /// Wire representation of the element.
    pub fn render(&self) -> Value {
        match self {
            Element::Dropdown(dropdown) => dropdown.render(),
            Element::Input(input) => input.render(),
            Element::Slider(slider) => slider.render(),
            Element::StepSlider(slider) => slider.render(),
            Element::Toggle(toggle) => toggle.render(),
            Element::Label(label) => label.render(),
            Element::Header(header) => header.render(),
            Element::Divider(divider) => divider.render(),
            Element::Error(error) => error.render(),
            Element::Button(button) => button.render(),
        }
    }

    /// Validator attached to the element, if any.
    pub fn validator(&self) -> Option<&Validator> {
        match self {
            Element::Dropdown(dropdown) => dropdown.validator(),
            Element::Input(input) => input.validator(),
            Element::Slider(slider) => slider.validator(),
            Element::StepSlider(slider) => slider.validator(),
            Element::Toggle(toggle) => toggle.validator(),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<&Button> {
        match self {
            Element::Button(button) => Some(button),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Element::Button(button) => Some(button),
            _ => None,
        }
    }

    /// Store a submitted raw value back onto the element as its new default,
    /// so a resent form shows what the user last entered.
    pub(crate) fn set_default_from(&mut self, raw: &Value) {
        match self {
            Element::Dropdown(dropdown) => {
                if let Some(index) = raw.as_u64() {
                    dropdown.set_default(index as usize);
                }
            }
            Element::Input(input) => {
                if let Some(text) = scalar_text(raw) {
                    input.set_default(text);
                }
            }
            Element::Slider(slider) => {
                if let Some(value) = raw.as_f64() {
                    slider.set_default(value.trunc() as i64);
                }
            }
            Element::StepSlider(slider) => {
                if let Some(index) = raw.as_u64() {
                    slider.set_default(index as usize);
                }
            }
            Element::Toggle(toggle) => {
                if let Some(state) = raw.as_bool() {
                    toggle.set_default(state);
                }
            }
            _ => {}
        }
    }
}

impl From<Dropdown> for Element {
    fn from(element: Dropdown) -> Self {
        Element::Dropdown(element)
    }
}

impl From<Input> for Element {
    fn from(element: Input) -> Self {
        Element::Input(element)
    }
}

impl From<Slider> for Element {
    fn from(element: Slider) -> Self {
        Element::Slider(element)
    }
}

impl From<StepSlider> for Element {
    fn from(element: StepSlider) -> Self {
        Element::StepSlider(element)
    }
}

impl From<Toggle> for Element {
    fn from(element: Toggle) -> Self {
        Element::Toggle(element)
    }
}

impl From<Label> for Element {
    fn from(element: Label) -> Self {
        Element::Label(element)
    }
}

impl From<Header> for Element {
    fn from(element: Header) -> Self {
        Element::Header(element)
    }
}

impl From<Divider> for Element {
    fn from(element: Divider) -> Self {
        Element::Divider(element)
    }
}

impl From<ErrorLabel> for Element {
    fn from(element: ErrorLabel) -> Self {
        Element::Error(element)
    }
}

impl From<Button> for Element {
    fn from(element: Button) -> Self {
        Element::Button(element)
    }
}
