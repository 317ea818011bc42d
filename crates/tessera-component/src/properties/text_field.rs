use crate::Component;
use crate::layout::Layout;
use crate::style::{StyleSheet, TextFieldStyleSheet};

/// Messages emitted around an editing session.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldEvents<M> {
    pub on_editing_begin: Option<M>,
    pub on_editing_changed: Option<M>,
    pub on_editing_end: Option<M>,
}

impl<M> TextFieldEvents<M> {
    pub fn map<N>(self, transform: impl Fn(M) -> N) -> TextFieldEvents<N> {
        TextFieldEvents {
            on_editing_begin: self.on_editing_begin.map(&transform),
            on_editing_changed: self.on_editing_changed.map(&transform),
            on_editing_end: self.on_editing_end.map(&transform),
        }
    }
}

impl<M> Default for TextFieldEvents<M> {
    fn default() -> Self {
        Self {
            on_editing_begin: None,
            on_editing_changed: None,
            on_editing_end: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextFieldProperties<M> {
    pub text: String,
    pub placeholder: Option<String>,
    pub is_secure: bool,
    pub on_events: TextFieldEvents<M>,
}

impl<M> TextFieldProperties<M> {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            placeholder: None,
            is_secure: false,
            on_events: TextFieldEvents::default(),
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn secure(mut self, is_secure: bool) -> Self {
        self.is_secure = is_secure;
        self
    }

    pub fn on_events(mut self, events: TextFieldEvents<M>) -> Self {
        self.on_events = events;
        self
    }

    pub fn map<N>(self, transform: impl Fn(M) -> N) -> TextFieldProperties<N> {
        TextFieldProperties {
            text: self.text,
            placeholder: self.placeholder,
            is_secure: self.is_secure,
            on_events: self.on_events.map(transform),
        }
    }
}

pub fn text_field<M>(properties: TextFieldProperties<M>) -> Component<M> {
    text_field_with(properties, StyleSheet::default(), Layout::default())
}

pub fn text_field_with<M>(
    properties: TextFieldProperties<M>,
    style: StyleSheet<TextFieldStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::TextField(properties, style, layout)
}
