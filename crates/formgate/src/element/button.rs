use std::fmt;

use serde_json::{Map, Value, json};

use crate::form::ConfirmForm;

/// Action invoked when a specific menu button is chosen, taking precedence
/// over the menu's generic select handler.
pub type ClickHandler = Box<dyn FnMut(&str) + Send>;

/// Icon shown next to a menu button, resolved from a resource path or a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonImage {
    Path(String),
    Url(String),
}

impl ButtonImage {
    pub fn path(uri: impl Into<String>) -> Self {
        ButtonImage::Path(uri.into())
    }

    pub fn url(uri: impl Into<String>) -> Self {
        ButtonImage::Url(uri.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            ButtonImage::Path(_) => "path",
            ButtonImage::Url(_) => "url",
        }
    }

    fn uri(&self) -> &str {
        match self {
            ButtonImage::Path(uri) | ButtonImage::Url(uri) => uri,
        }
    }

    pub(crate) fn render(&self) -> Value {
        json!({ "type": self.kind(), "data": self.uri() })
    }
}

/// One entry in a menu form's button list.
pub struct Button {
    caption: String,
    image: Option<ButtonImage>,
    custom_id: Option<String>,
    confirm: Option<ConfirmForm>,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            image: None,
            custom_id: None,
            confirm: None,
            on_click: None,
        }
    }

    pub fn with_image(mut self, image: ButtonImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Caller-chosen identifier handed back in the menu choice instead of the
    /// positional index.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.custom_id = Some(id.into());
        self
    }

    /// Attach a gating yes/no dialog; the button's action only runs after an
    /// affirmative choice. A fresh confirm form is constructed each call.
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

    pub fn on_click(mut self, handler: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn image(&self) -> Option<&ButtonImage> {
        self.image.as_ref()
    }

    pub fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    pub fn confirm(&self) -> Option<&ConfirmForm> {
        self.confirm.as_ref()
    }

    pub(crate) fn take_click_handler(&mut self) -> Option<ClickHandler> {
        self.on_click.take()
    }

    pub(crate) fn render(&self) -> Value {
        let mut map = Map::new();
        map.insert("type".into(), Value::String("button".into()));
        map.insert("text".into(), Value::String(self.caption.clone()));
        if let Some(image) = &self.image {
            map.insert("image".into(), image.render());
        }
        Value::Object(map)
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("caption", &self.caption)
            .field("image", &self.image)
            .field("custom_id", &self.custom_id)
            .field("confirm", &self.confirm.is_some())
            .field("on_click", &self.on_click.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_renders_its_source_kind() {
        let path = Button::new("Play").with_image(ButtonImage::path("textures/ui/play"));
        assert_eq!(
            path.render(),
            json!({
                "type": "button",
                "text": "Play",
                "image": {"type": "path", "data": "textures/ui/play"},
            })
        );

        let url = Button::new("Site").with_image(ButtonImage::url("https://formgate.dev/icon.png"));
        assert_eq!(url.render()["image"]["type"], "url");
    }

    #[test]
    fn plain_buttons_carry_no_image_key() {
        let button = Button::new("Play").with_id("play");
        assert_eq!(button.render(), json!({"type": "button", "text": "Play"}));
        assert_eq!(button.custom_id(), Some("play"));
    }
}
