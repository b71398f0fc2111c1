use serde_json::Value;

use crate::element::{
    Button, Divider, Dropdown, Element, Header, Input, Label, Slider, StepSlider, Toggle,
};
use crate::error::BuildError;
use crate::form::FormKind;

/// Ordered, mutable collection of form elements.
///
/// The mutating operations return `&mut Self` for chaining; the pipeline's
/// annotation pass always swaps in a freshly rebuilt list via
/// [`replace_all`](Elements::replace_all) rather than splicing in place.
#[derive(Debug, Default)]
pub struct Elements {
    items: Vec<Element>,
}

impl Elements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(items: Vec<Element>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Element> {
        self.items.iter_mut()
    }

    pub fn push(&mut self, element: impl Into<Element>) -> &mut Self {
        self.items.push(element.into());
        self
    }

    /// Replace the element at `index`; appends when the index is past the end.
    pub fn set(&mut self, index: usize, element: impl Into<Element>) -> &mut Self {
        let element = element.into();
        if index < self.items.len() {
            self.items[index] = element;
        } else {
            self.items.push(element);
        }
        self
    }

    pub fn remove(&mut self, index: usize) -> &mut Self {
        if index < self.items.len() {
            self.items.remove(index);
        }
        self
    }

    pub fn merge(&mut self, elements: Vec<Element>) -> &mut Self {
        self.items.extend(elements);
        self
    }

    pub fn replace_all(&mut self, items: Vec<Element>) -> &mut Self {
        self.items = items;
        self
    }

    pub(crate) fn take_all(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.items)
    }

    pub fn add_dropdown(&mut self, label: impl Into<String>, options: Vec<String>) -> &mut Self {
        self.push(Dropdown::new(label, options))
    }

    pub fn add_input(&mut self, label: impl Into<String>, placeholder: impl Into<String>) -> &mut Self {
        self.push(Input::new(label).with_placeholder(placeholder))
    }

    pub fn add_slider(&mut self, label: impl Into<String>, min: i64, max: i64) -> &mut Self {
        self.push(Slider::new(label, min, max))
    }

    pub fn add_step_slider(&mut self, label: impl Into<String>, steps: Vec<i64>) -> &mut Self {
        self.push(StepSlider::new(label, steps))
    }

    pub fn add_toggle(&mut self, label: impl Into<String>) -> &mut Self {
        self.push(Toggle::new(label))
    }

    pub fn add_label(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Label::new(text))
    }

    pub fn add_header(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(Header::new(text))
    }

    pub fn add_divider(&mut self) -> &mut Self {
        self.push(Divider::new())
    }

    pub fn add_button(&mut self, caption: impl Into<String>) -> &mut Self {
        self.push(Button::new(caption))
    }

    /// Render every element for the given form kind, enforcing per-kind
    /// compatibility and each element's own pre-build invariants.
    pub fn build(&self, form: FormKind) -> Result<Vec<Value>, BuildError> {
        let mut rendered = Vec::with_capacity(self.items.len());
        for element in &self.items {
            if !element.supported_forms().contains(&form) {
                return Err(BuildError::UnsupportedElement {
                    kind: element.kind(),
                    form: form.as_str(),
                });
            }
            element.pre_build_check()?;
            rendered.push(element.render());
        }
        Ok(rendered)
    }
}

impl From<Vec<Element>> for Elements {
    fn from(items: Vec<Element>) -> Self {
        Self::from_vec(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chained_helpers_preserve_order() {
        let mut elements = Elements::new();
        elements
            .add_header("Profile")
            .add_input("Name", "Steve")
            .add_divider()
            .add_toggle("Subscribe");
        let kinds: Vec<&str> = elements.iter().map(Element::kind).collect();
        assert_eq!(kinds, vec!["header", "input", "divider", "toggle"]);
    }

    #[test]
    fn build_rejects_elements_from_other_form_kinds() {
        let mut elements = Elements::new();
        elements.add_button("Play");
        let error = elements.build(FormKind::Custom).unwrap_err();
        assert_eq!(
            error,
            BuildError::UnsupportedElement {
                kind: "button",
                form: "custom_form",
            }
        );
    }

    #[test]
    fn build_runs_pre_build_checks() {
        let mut elements = Elements::new();
        elements.push(Dropdown::new("Color", vec!["Red".into()]).with_default(2));
        assert!(elements.build(FormKind::Custom).is_err());
    }

    #[test]
    fn remove_ignores_out_of_range_indices() {
        let mut elements = Elements::new();
        elements.add_label("only");
        elements.remove(5);
        assert_eq!(elements.len(), 1);
    }
}
