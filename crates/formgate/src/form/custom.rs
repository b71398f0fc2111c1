use serde_json::{Value, json};

use crate::element::Element;
use crate::elements::Elements;
use crate::error::BuildError;
use crate::form::{CloseHandler, ConfirmForm, FormKind};
use crate::value::FieldValue;

/// Invoked with the recipient and the validated, coerced values once a
/// submission passes every validator (and any confirmation gate).
pub type SubmitHandler = Box<dyn FnMut(&str, Vec<FieldValue>) + Send>;

pub const DEFAULT_SUBMIT: &str = "gui.submit";

/// Ordered multi-element input form.
pub struct CustomForm {
    title: String,
    submit: String,
    elements: Elements,
    confirm: Option<ConfirmForm>,
    on_submit: Option<SubmitHandler>,
    on_close: Option<CloseHandler>,
}

impl CustomForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            submit: DEFAULT_SUBMIT.to_string(),
            elements: Elements::new(),
            confirm: None,
            on_submit: None,
            on_close: None,
        }
    }

    /// Form from a prepared element list and a submit handler.
    pub fn with_elements(
        title: impl Into<String>,
        elements: Vec<Element>,
        on_submit: impl FnMut(&str, Vec<FieldValue>) + Send + 'static,
    ) -> Self {
        let mut form = Self::new(title).on_submit(on_submit);
        form.elements.replace_all(elements);
        form
    }

    pub fn with_submit_caption(mut self, caption: impl Into<String>) -> Self {
        self.submit = caption.into();
        self
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element);
        self
    }

    /// Gate the submission behind a yes/no dialog. Each call replaces any
    /// previous gate with a freshly constructed confirm form.
    pub fn with_confirm(
        mut self,
        title: impl Into<String>,
        body: impl Into<String>,
        submit: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        self.confirm = Some(
            ConfirmForm::new(title)
                .with_body(body)
                .with_submit_caption(submit)
                .with_cancel_caption(cancel),
        );
        self
    }

    pub fn on_submit(mut self, handler: impl FnMut(&str, Vec<FieldValue>) + Send + 'static) -> Self {
        self.on_submit = Some(Box::new(handler));
        self
    }

    pub fn on_close(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut Elements {
        &mut self.elements
    }

    pub fn confirm(&self) -> Option<&ConfirmForm> {
        self.confirm.as_ref()
    }

    /// A custom form must hold at least one element before it can be sent.
    pub fn build(&self) -> Result<Value, BuildError> {
        if self.elements.is_empty() {
            return Err(BuildError::NoElements);
        }
        let content = self.elements.build(FormKind::Custom)?;
        Ok(json!({
            "type": "custom_form",
            "title": self.title,
            "submit": self.submit,
            "content": content,
        }))
    }

    pub(crate) fn take_submit_handler(&mut self) -> Option<SubmitHandler> {
        self.on_submit.take()
    }

    pub(crate) fn take_close_handler(&mut self) -> Option<CloseHandler> {
        self.on_close.take()
    }
}
