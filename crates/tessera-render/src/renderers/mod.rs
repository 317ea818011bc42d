//! Per-kind renderers called from [`crate::render::render_component`].

pub(crate) mod container;
pub(crate) mod controls;
pub(crate) mod display;
pub(crate) mod lists;

use crate::render::RenderContext;
use crate::view::{View, ViewKind};
use serde::Serialize;
use tessera_component::{Layout, StyleSheet};

/// Creates a view of `kind` carrying `style` and the layout hints.
fn styled_view<M, S: Serialize>(
    kind: ViewKind,
    style: &StyleSheet<S>,
    layout: &Layout,
    context: &RenderContext<M>,
) -> View {
    let view = View::new(kind);
    view.set_base_style(style.base.clone());
    view.set_component_style(&style.component);
    context.layout_engine.apply(layout, &view);
    view
}
