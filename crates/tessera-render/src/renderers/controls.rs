//! Interactive leaves. Each one owns a fresh mailbox fed by its control
//! events.

use super::styled_view;
use crate::dispatcher::{ControlEvent, bind_optional_message};
use crate::render::{Render, RenderContext};
use crate::view::{ViewContent, ViewKind};
use tessera_component::{
    ButtonProperties, ButtonStyleSheet, Layout, SegmentContent, SegmentedProperties,
    SegmentedStyleSheet, StyleSheet, TextFieldProperties, TextFieldStyleSheet,
};
use tessera_core::Mailbox;

pub(crate) fn button<M: Clone + 'static>(
    properties: ButtonProperties<M>,
    style: StyleSheet<ButtonStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Button, &style, &layout, context);
    view.set_content(ViewContent::Button {
        title: properties.text,
        icon: properties.icon,
        is_highlighted: properties.is_highlighted,
    });

    let mailbox = Mailbox::new();
    bind_optional_message(&view, ControlEvent::Tap, &mailbox, properties.on_tap);
    Render::new(view).with_mailbox(mailbox)
}

pub(crate) fn text_field<M: Clone + 'static>(
    properties: TextFieldProperties<M>,
    style: StyleSheet<TextFieldStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::TextField, &style, &layout, context);
    view.set_content(ViewContent::TextField {
        text: properties.text,
        placeholder: properties.placeholder,
        is_secure: properties.is_secure,
    });

    let mailbox = Mailbox::new();
    let events = properties.on_events;
    bind_optional_message(&view, ControlEvent::EditingBegin, &mailbox, events.on_editing_begin);
    bind_optional_message(
        &view,
        ControlEvent::EditingChanged,
        &mailbox,
        events.on_editing_changed,
    );
    bind_optional_message(&view, ControlEvent::EditingEnd, &mailbox, events.on_editing_end);
    Render::new(view).with_mailbox(mailbox)
}

/// A segmented control dispatches the `on_tap` of whichever segment
/// becomes selected.
pub(crate) fn segmented<M: Clone + 'static>(
    properties: SegmentedProperties<M>,
    style: StyleSheet<SegmentedStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Segmented, &style, &layout, context);
    let selected = properties.selected_index();

    let mut titles = Vec::with_capacity(properties.segments.len());
    let mut enabled = Vec::with_capacity(properties.segments.len());
    let mut messages = Vec::with_capacity(properties.segments.len());
    for segment in properties.segments {
        titles.push(match segment.content {
            SegmentContent::Title(title) => title,
            SegmentContent::Image(image) => image.name,
        });
        enabled.push(segment.is_enabled);
        messages.push(segment.on_tap);
    }
    view.set_content(ViewContent::Segments {
        titles,
        enabled,
        selected,
    });

    let mailbox = Mailbox::new();
    let sink = mailbox.clone();
    view.remove_actions(ControlEvent::ValueChanged);
    view.on(ControlEvent::ValueChanged, move |view| {
        if let ViewContent::Segments { selected, .. } = view.content() {
            if let Some(Some(message)) = messages.get(selected) {
                sink.dispatch(message.clone());
            }
        }
    });
    Render::new(view).with_mailbox(mailbox)
}
