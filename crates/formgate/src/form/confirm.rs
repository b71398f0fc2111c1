use serde_json::{Value, json};

use crate::form::CloseHandler;

/// Invoked with the recipient's yes/no choice.
pub type ChoiceHandler = Box<dyn FnMut(&str, bool) + Send>;

pub const DEFAULT_YES: &str = "gui.yes";
pub const DEFAULT_CANCEL: &str = "gui.no";

/// Two-button yes/no dialog. Used standalone or as the gate in front of a
/// custom-form submission or a menu button's action.
pub struct ConfirmForm {
    title: String,
    body: String,
    submit: String,
    cancel: String,
    on_choice: Option<ChoiceHandler>,
    on_close: Option<CloseHandler>,
}

impl ConfirmForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            submit: DEFAULT_YES.to_string(),
            cancel: DEFAULT_CANCEL.to_string(),
            on_choice: None,
            on_close: None,
        }
    }

    /// Shorthand constructing a body and choice handler in one go.
    pub fn ask(
        title: impl Into<String>,
        body: impl Into<String>,
        on_choice: impl FnMut(&str, bool) + Send + 'static,
    ) -> Self {
        Self::new(title).with_body(body).on_choice(on_choice)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_submit_caption(mut self, caption: impl Into<String>) -> Self {
        self.submit = caption.into();
        self
    }

    pub fn with_cancel_caption(mut self, caption: impl Into<String>) -> Self {
        self.cancel = caption.into();
        self
    }

    pub fn on_choice(mut self, handler: impl FnMut(&str, bool) + Send + 'static) -> Self {
        self.on_choice = Some(Box::new(handler));
        self
    }

    pub fn on_close(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn build(&self) -> Value {
        json!({
            "type": "modal",
            "title": self.title,
            "content": self.body,
            "button1": self.submit,
            "button2": self.cancel,
        })
    }

    pub(crate) fn take_choice_handler(&mut self) -> Option<ChoiceHandler> {
        self.on_choice.take()
    }

    pub(crate) fn take_close_handler(&mut self) -> Option<CloseHandler> {
        self.on_close.take()
    }
}
