use serde_json::{Value, json};

use crate::element::{Button, Element};
use crate::elements::Elements;
use crate::error::BuildError;
use crate::form::{CloseHandler, FormKind};

/// The button picked from a menu. `id` carries the button's caller-chosen
/// identifier when one was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuChoice {
    pub index: usize,
    pub caption: String,
    pub id: Option<String>,
}

/// Invoked with the recipient and the chosen button when no per-button click
/// handler intercepts the selection.
pub type SelectHandler = Box<dyn FnMut(&str, MenuChoice) + Send>;

/// Single-choice button list, optionally interleaved with headers and
/// dividers. The submitted index counts buttons only.
pub struct MenuForm {
    title: String,
    body: String,
    elements: Elements,
    on_select: Option<SelectHandler>,
    on_close: Option<CloseHandler>,
}

impl MenuForm {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            elements: Elements::new(),
            on_select: None,
            on_close: None,
        }
    }

    /// Menu from plain captions.
    pub fn with_buttons(
        title: impl Into<String>,
        body: impl Into<String>,
        captions: Vec<String>,
    ) -> Self {
        let mut form = Self::new(title).with_body(body);
        for caption in captions {
            form.elements.add_button(caption);
        }
        form
    }

    /// Menu from caption/action pairs; each action runs as the button's own
    /// click handler.
    pub fn with_actions(
        title: impl Into<String>,
        body: impl Into<String>,
        actions: Vec<(String, Box<dyn FnMut(&str) + Send>)>,
    ) -> Self {
        let mut form = Self::new(title).with_body(body);
        for (caption, action) in actions {
            let mut handler = action;
            form.elements
                .push(Button::new(caption).on_click(move |recipient| handler(recipient)));
        }
        form
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_element(mut self, element: impl Into<Element>) -> Self {
        self.elements.push(element);
        self
    }

    pub fn on_select(mut self, handler: impl FnMut(&str, MenuChoice) + Send + 'static) -> Self {
        self.on_select = Some(Box::new(handler));
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

    pub fn build(&self) -> Result<Value, BuildError> {
        let buttons = self.elements.build(FormKind::Menu)?;
        Ok(json!({
            "type": "form",
            "title": self.title,
            "content": self.body,
            "buttons": buttons,
        }))
    }

    /// Element index of the `n`-th interactive entry; readonly headers and
    /// dividers are invisible to the client's numbering.
    pub(crate) fn nth_button_index(&self, n: usize) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| !element.is_readonly())
            .nth(n)
            .map(|(index, _)| index)
    }

    pub(crate) fn button(&self, element_index: usize) -> Option<&Button> {
        self.elements.get(element_index).and_then(Element::as_button)
    }

    pub(crate) fn button_mut(&mut self, element_index: usize) -> Option<&mut Button> {
        self.elements
            .get_mut(element_index)
            .and_then(Element::as_button_mut)
    }

    pub(crate) fn take_select_handler(&mut self) -> Option<SelectHandler> {
        self.on_select.take()
    }

    pub(crate) fn take_close_handler(&mut self) -> Option<CloseHandler> {
        self.on_close.take()
    }
}
