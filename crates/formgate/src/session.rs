use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::align::align_response;
use crate::element::{Element, ErrorLabel};
use crate::error::FlowError;
use crate::form::{ConfirmForm, CustomForm, Form, MenuChoice, MenuForm};
use crate::value::{FieldValue, coerce};

/// Fire-and-forget delivery of a serialized form to a recipient. The answer
/// arrives later, out-of-band, through [`Session::handle_event`].
pub trait Transport {
    fn send(&mut self, recipient: &str, payload: &Value);
}

/// Where one event left the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The recipient dismissed the form.
    Closed,
    /// Validation failed; the annotated form was sent again.
    Resent,
    /// The submission is valid and the gating confirm dialog went out.
    ConfirmRequested,
    /// The final handler ran.
    Completed,
    /// The gating confirm dialog was declined; no handler ran.
    Cancelled,
}

enum Pending {
    Submission(Vec<FieldValue>),
    MenuChoice {
        element_index: usize,
        button_index: usize,
    },
}

enum State {
    AwaitingResponse,
    ConfirmPending(Pending),
}

struct Active {
    form: Form,
    state: State,
}

/// Drives sent forms through the submit/validate/resend cycle.
///
/// Each recipient has at most one outstanding form, which the session owns
/// exclusively until the exchange completes. Events arrive as
/// `(recipient, raw data | none)` pairs; `none` signals close/cancel (a
/// caller-side transport is expected to synthesize it on disconnect).
pub struct Session<T: Transport> {
    transport: T,
    active: BTreeMap<String, Active>,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            active: BTreeMap::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn is_active(&self, recipient: &str) -> bool {
        self.active.contains_key(recipient)
    }

    /// Build and send a form, replacing any form already outstanding for the
    /// recipient.
    pub fn open(&mut self, recipient: &str, form: impl Into<Form>) -> Result<(), FlowError> {
        let form = form.into();
        let payload = form.build()?;
        debug!(recipient, kind = form.kind().as_str(), "sending form");
        self.transport.send(recipient, &payload);
        self.active.insert(
            recipient.to_string(),
            Active {
                form,
                state: State::AwaitingResponse,
            },
        );
        Ok(())
    }

    /// Feed one transport event into the pipeline.
    ///
    /// Wrong-shaped data is a fatal protocol error: the outstanding form is
    /// dropped and the error surfaces to the caller.
    pub fn handle_event(
        &mut self,
        recipient: &str,
        data: Option<Value>,
    ) -> Result<Outcome, FlowError> {
        let mut active = self
            .active
            .remove(recipient)
            .ok_or_else(|| FlowError::NoPendingForm(recipient.to_string()))?;

        let Some(data) = data else {
            debug!(recipient, "form closed");
            if matches!(active.state, State::AwaitingResponse)
                && let Some(mut on_close) = active.form.take_close_handler()
            {
                on_close(recipient);
            }
            return Ok(Outcome::Closed);
        };

        match active.state {
            State::ConfirmPending(pending) => {
                self.finish_confirm(recipient, active.form, pending, &data)
            }
            State::AwaitingResponse => match active.form {
                Form::Confirm(form) => finish_choice(recipient, form, &data),
                Form::Menu(form) => self.handle_menu(recipient, form, &data),
                Form::Custom(form) => self.handle_custom(recipient, form, &data),
            },
        }
    }

    fn handle_custom(
        &mut self,
        recipient: &str,
        mut form: CustomForm,
        data: &Value,
    ) -> Result<Outcome, FlowError> {
        let raw = data
            .as_array()
            .ok_or_else(|| FlowError::unexpected("an array of element values", data))?;
        let aligned = align_response(form.elements(), raw);

        let mut values = Vec::new();
        let mut failures: BTreeMap<usize, String> = BTreeMap::new();

        for (index, element) in form.elements_mut().iter_mut().enumerate() {
            if element.is_readonly() {
                continue;
            }
            let raw_value = aligned.get(index).cloned().flatten().ok_or_else(|| {
                FlowError::UnexpectedResponse {
                    expected: "a value for every interactive element",
                    got: format!("nothing at index {index}"),
                }
            })?;
            let value = coerce(element, &raw_value)?;
            if let Some(message) = element
                .validator()
                .and_then(|validator| validator.validate(&value))
            {
                failures.insert(index, message);
            }
            // Seed the element with what the user entered so a resend shows
            // it back, valid or not.
            element.set_default_from(&raw_value);
            values.push(value);
        }

        if !failures.is_empty() {
            let rebuilt = annotate(form.elements_mut().take_all(), &failures);
            form.elements_mut().replace_all(rebuilt);
            let payload = form.build()?;
            debug!(recipient, failures = failures.len(), "validation failed, resending");
            self.transport.send(recipient, &payload);
            self.active.insert(
                recipient.to_string(),
                Active {
                    form: Form::Custom(form),
                    state: State::AwaitingResponse,
                },
            );
            return Ok(Outcome::Resent);
        }

        if let Some(confirm) = form.confirm() {
            let payload = confirm.build();
            debug!(recipient, "submission valid, requesting confirmation");
            self.transport.send(recipient, &payload);
            self.active.insert(
                recipient.to_string(),
                Active {
                    form: Form::Custom(form),
                    state: State::ConfirmPending(Pending::Submission(values)),
                },
            );
            return Ok(Outcome::ConfirmRequested);
        }

        if let Some(mut on_submit) = form.take_submit_handler() {
            on_submit(recipient, values);
        }
        Ok(Outcome::Completed)
    }

    fn handle_menu(
        &mut self,
        recipient: &str,
        mut form: MenuForm,
        data: &Value,
    ) -> Result<Outcome, FlowError> {
        let button_index = data
            .as_u64()
            .ok_or_else(|| FlowError::unexpected("a selected button index", data))?
            as usize;
        let element_index = form.nth_button_index(button_index).ok_or_else(|| {
            FlowError::UnexpectedResponse {
                expected: "an index inside the button list",
                got: button_index.to_string(),
            }
        })?;

        let confirm_payload = form
            .button(element_index)
            .and_then(|button| button.confirm())
            .map(ConfirmForm::build);
        if let Some(payload) = confirm_payload {
            debug!(recipient, button_index, "button gated, requesting confirmation");
            self.transport.send(recipient, &payload);
            self.active.insert(
                recipient.to_string(),
                Active {
                    form: Form::Menu(form),
                    state: State::ConfirmPending(Pending::MenuChoice {
                        element_index,
                        button_index,
                    }),
                },
            );
            return Ok(Outcome::ConfirmRequested);
        }

        dispatch_menu(recipient, form, element_index, button_index);
        Ok(Outcome::Completed)
    }

    fn finish_confirm(
        &mut self,
        recipient: &str,
        form: Form,
        pending: Pending,
        data: &Value,
    ) -> Result<Outcome, FlowError> {
        let choice = data
            .as_bool()
            .ok_or_else(|| FlowError::unexpected("a confirmation choice", data))?;
        if !choice {
            debug!(recipient, "confirmation declined");
            return Ok(Outcome::Cancelled);
        }

        match (form, pending) {
            (Form::Custom(mut form), Pending::Submission(values)) => {
                if let Some(mut on_submit) = form.take_submit_handler() {
                    on_submit(recipient, values);
                }
            }
            (
                Form::Menu(form),
                Pending::MenuChoice {
                    element_index,
                    button_index,
                },
            ) => dispatch_menu(recipient, form, element_index, button_index),
            _ => {
                return Err(FlowError::UnexpectedResponse {
                    expected: "a pending action matching the form kind",
                    got: "mismatched pipeline state".to_string(),
                });
            }
        }
        Ok(Outcome::Completed)
    }
}

/// A button's own click handler takes precedence over the menu's generic
/// select handler; the gating confirm (when present) gates either one.
fn dispatch_menu(recipient: &str, mut form: MenuForm, element_index: usize, button_index: usize) {
    let choice = form.button(element_index).map(|button| MenuChoice {
        index: button_index,
        caption: button.caption().to_string(),
        id: button.custom_id().map(str::to_string),
    });
    if let Some(mut on_click) = form
        .button_mut(element_index)
        .and_then(|button| button.take_click_handler())
    {
        on_click(recipient);
        return;
    }
    if let (Some(mut on_select), Some(choice)) = (form.take_select_handler(), choice) {
        on_select(recipient, choice);
    }
}

fn finish_choice(
    recipient: &str,
    mut form: ConfirmForm,
    data: &Value,
) -> Result<Outcome, FlowError> {
    let choice = data
        .as_bool()
        .ok_or_else(|| FlowError::unexpected("a confirmation choice", data))?;
    if let Some(mut on_choice) = form.take_choice_handler() {
        on_choice(recipient, choice);
    }
    Ok(Outcome::Completed)
}

/// Rebuild the element list for a resend: every stale error annotation is
/// dropped and a fresh one is inserted immediately before each element that
/// failed this pass. Rebuilding (rather than splicing in place) keeps the
/// failure indices stable.
fn annotate(elements: Vec<Element>, failures: &BTreeMap<usize, String>) -> Vec<Element> {
    let mut rebuilt = Vec::with_capacity(elements.len() + failures.len());
    for (index, element) in elements.into_iter().enumerate() {
        if matches!(element, Element::Error(_)) {
            continue;
        }
        if let Some(message) = failures.get(&index) {
            rebuilt.push(Element::Error(ErrorLabel::new(message.clone())));
        }
        rebuilt.push(element);
    }
    rebuilt
}
