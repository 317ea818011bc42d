use crate::Component;
use crate::layout::Layout;
use crate::style::{LabelStyleSheet, StyleSheet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelProperties {
    pub text: String,
    /// Replaces `text` once the whole tree has been laid out, so the label
    /// is sized by `text` but displays this.
    pub text_after_layout: Option<String>,
}

impl LabelProperties {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_after_layout: None,
        }
    }

    pub fn text_after_layout(mut self, text: impl Into<String>) -> Self {
        self.text_after_layout = Some(text.into());
        self
    }
}

/// A label with default style and layout.
pub fn label<M>(text: impl Into<String>) -> Component<M> {
    label_with(
        LabelProperties::new(text),
        StyleSheet::default(),
        Layout::default(),
    )
}

pub fn label_with<M>(
    properties: LabelProperties,
    style: StyleSheet<LabelStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Label(properties, style, layout)
}
