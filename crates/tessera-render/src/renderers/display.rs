//! Non-interactive leaves. None of these produce a mailbox.

use super::styled_view;
use crate::render::{Render, RenderContext};
use crate::view::{ViewContent, ViewKind};
use tessera_component::{
    EmptyStyleSheet, Image, LabelProperties, LabelStyleSheet, Layout, MapProperties,
    ProgressStyleSheet, SpinnerStyleSheet, StyleSheet,
};
use tessera_core::ProgressCounter;

/// A label with `text_after_layout` swaps its text once the tree has
/// been laid out, keeping the geometry computed for the first text.
pub(crate) fn label<M: 'static>(
    properties: LabelProperties,
    style: StyleSheet<LabelStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Label, &style, &layout, context);
    view.set_content(ViewContent::Text {
        text: properties.text,
    });

    let render = Render::new(view.clone());
    match properties.text_after_layout {
        Some(text) => {
            let view = view.downgrade();
            render.with_after_layout(move || {
                if let Some(view) = view.upgrade() {
                    view.set_text(text);
                }
            })
        }
        None => render,
    }
}

pub(crate) fn map_view<M>(
    properties: MapProperties,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Map, &style, &layout, context);
    view.set_user_interaction_enabled(properties.is_scroll_enabled || properties.is_zoom_enabled);
    view.set_content(ViewContent::Map {
        placemarks: properties.placemarks.len(),
        zoom_level: properties.zoom_level,
    });
    Render::new(view)
}

pub(crate) fn image_view<M>(
    image: Image,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Image, &style, &layout, context);
    view.set_content(ViewContent::Image { image });
    Render::new(view)
}

pub(crate) fn progress<M>(
    counter: ProgressCounter,
    style: StyleSheet<ProgressStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Progress, &style, &layout, context);
    view.set_content(ViewContent::Progress {
        partial: counter.partial(),
        total: counter.total(),
    });
    Render::new(view)
}

pub(crate) fn spinner<M>(
    is_active: bool,
    style: StyleSheet<SpinnerStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Spinner, &style, &layout, context);
    view.set_content(ViewContent::Spinner { is_active });
    Render::new(view)
}
