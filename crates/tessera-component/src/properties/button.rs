use crate::Component;
use crate::layout::Layout;
use crate::style::{ButtonStyleSheet, Image, StyleSheet};

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonProperties<M> {
    pub text: Option<String>,
    pub icon: Option<Image>,
    pub is_highlighted: bool,
    pub on_tap: Option<M>,
}

impl<M> ButtonProperties<M> {
    /// A titled button that emits nothing.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn on_tap(mut self, message: M) -> Self {
        self.on_tap = Some(message);
        self
    }

    pub fn icon(mut self, icon: Image) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn highlighted(mut self, is_highlighted: bool) -> Self {
        self.is_highlighted = is_highlighted;
        self
    }

    pub fn map<N>(self, transform: impl Fn(M) -> N) -> ButtonProperties<N> {
        ButtonProperties {
            text: self.text,
            icon: self.icon,
            is_highlighted: self.is_highlighted,
            on_tap: self.on_tap.map(transform),
        }
    }
}

impl<M> Default for ButtonProperties<M> {
    fn default() -> Self {
        Self {
            text: None,
            icon: None,
            is_highlighted: false,
            on_tap: None,
        }
    }
}

pub fn button<M>(properties: ButtonProperties<M>) -> Component<M> {
    button_with(properties, StyleSheet::default(), Layout::default())
}

pub fn button_with<M>(
    properties: ButtonProperties<M>,
    style: StyleSheet<ButtonStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Button(properties, style, layout)
}
