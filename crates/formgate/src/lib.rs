#![allow(missing_docs)]

pub mod align;
pub mod country;
pub mod element;
pub mod elements;
pub mod error;
pub mod form;
pub mod session;
pub mod validator;
pub mod value;

pub use align::align_response;
pub use country::{Country, CountryCodes};
pub use element::{
    Button, ButtonImage, Divider, Dropdown, Element, ErrorLabel, Header, Input, Label, Slider,
    StepSlider, Toggle,
};
pub use elements::Elements;
pub use error::{BuildError, FlowError};
pub use form::{
    ChoiceHandler, CloseHandler, ConfirmForm, CustomForm, Form, FormKind, MenuChoice, MenuForm,
    SelectHandler, SubmitHandler,
};
pub use session::{Outcome, Session, Transport};
pub use validator::{TypeTarget, Validator, ValidatorChain};
pub use value::{FieldValue, coerce};
