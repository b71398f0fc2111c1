mod confirm;
mod custom;
mod menu;

pub use confirm::{ChoiceHandler, ConfirmForm, DEFAULT_CANCEL, DEFAULT_YES};
pub use custom::{CustomForm, DEFAULT_SUBMIT, SubmitHandler};
pub use menu::{MenuChoice, MenuForm, SelectHandler};

use serde_json::Value;

use crate::error::BuildError;

/// Invoked when the recipient dismisses a form without submitting.
pub type CloseHandler = Box<dyn FnMut(&str) + Send>;

/// The three dialog kinds understood by the remote client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Menu,
    Confirm,
    Custom,
}

impl FormKind {
    /// Wire tag for the form kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Menu => "form",
            FormKind::Confirm => "modal",
            FormKind::Custom => "custom_form",
        }
    }
}

/// One complete request/response unit sent to a recipient.
pub enum Form {
    Menu(MenuForm),
    Confirm(ConfirmForm),
    Custom(CustomForm),
}

impl Form {
    pub fn kind(&self) -> FormKind {
        match self {
            Form::Menu(_) => FormKind::Menu,
            Form::Confirm(_) => FormKind::Confirm,
            Form::Custom(_) => FormKind::Custom,
        }
    }

    /// Serialize the form for sending. Runs every element's build checks.
    pub fn build(&self) -> Result<Value, BuildError> {
        match self {
            Form::Menu(form) => form.build(),
            Form::Confirm(form) => Ok(form.build()),
            Form::Custom(form) => form.build(),
        }
    }

    pub(crate) fn take_close_handler(&mut self) -> Option<CloseHandler> {
        match self {
            Form::Menu(form) => form.take_close_handler(),
            Form::Confirm(form) => form.take_close_handler(),
            Form::Custom(form) => form.take_close_handler(),
        }
    }
}

impl From<MenuForm> for Form {
    fn from(form: MenuForm) -> Self {
        Form::Menu(form)
    }
}

impl From<ConfirmForm> for Form {
    fn from(form: ConfirmForm) -> Self {
        Form::Confirm(form)
    }
}

impl From<CustomForm> for Form {
    fn from(form: CustomForm) -> Self {
        Form::Custom(form)
    }
}
