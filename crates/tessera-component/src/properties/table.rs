use super::{ItemRenderer, Transform, map_renderer};
use crate::Component;
use crate::layout::Layout;
use crate::style::{StyleSheet, TableStyleSheet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Highlight shown while a tappable row is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableItemSelectionStyle {
    None,
    #[default]
    Default,
    Blue,
    Gray,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableProperties<M> {
    pub items: Vec<TableItemProperties<M>>,
    pub shows_vertical_scroll_indicator: bool,
    pub shows_horizontal_scroll_indicator: bool,
}

impl<M> TableProperties<M> {
    pub fn new(items: Vec<TableItemProperties<M>>) -> Self {
        Self {
            items,
            shows_vertical_scroll_indicator: true,
            shows_horizontal_scroll_indicator: true,
        }
    }
}

impl<M> Default for TableProperties<M> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<M: 'static> TableProperties<M> {
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> TableProperties<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(self, transform: &Transform<M, N>) -> TableProperties<N> {
        TableProperties {
            items: self
                .items
                .into_iter()
                .map(|item| item.map_with(transform))
                .collect(),
            shows_vertical_scroll_indicator: self.shows_vertical_scroll_indicator,
            shows_horizontal_scroll_indicator: self.shows_horizontal_scroll_indicator,
        }
    }
}

/// One row of a table.
pub struct TableItemProperties<M> {
    /// Declared row height; the rendered height of the row's content wins
    /// once it is known.
    pub height: u32,
    /// Reuse pool key.
    pub identifier: String,
    pub selection_style: TableItemSelectionStyle,
    pub on_tap: Option<M>,
    pub renderer: ItemRenderer<M>,
}

impl<M> TableItemProperties<M> {
    pub fn on_tap(mut self, message: M) -> Self {
        self.on_tap = Some(message);
        self
    }

    pub fn selection_style(mut self, style: TableItemSelectionStyle) -> Self {
        self.selection_style = style;
        self
    }

    /// Materializes the row body.
    pub fn render(&self) -> Component<M> {
        (self.renderer)()
    }
}

impl<M: 'static> TableItemProperties<M> {
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> TableItemProperties<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(
        self,
        transform: &Transform<M, N>,
    ) -> TableItemProperties<N> {
        TableItemProperties {
            height: self.height,
            identifier: self.identifier,
            selection_style: self.selection_style,
            on_tap: self.on_tap.map(|message| transform(message)),
            renderer: map_renderer(self.renderer, transform),
        }
    }
}

impl<M: Clone> Clone for TableItemProperties<M> {
    fn clone(&self) -> Self {
        Self {
            height: self.height,
            identifier: self.identifier.clone(),
            selection_style: self.selection_style,
            on_tap: self.on_tap.clone(),
            renderer: Rc::clone(&self.renderer),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for TableItemProperties<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableItemProperties")
            .field("height", &self.height)
            .field("identifier", &self.identifier)
            .field("selection_style", &self.selection_style)
            .field("on_tap", &self.on_tap)
            .finish_non_exhaustive()
    }
}

/// Items are equal when their fields and their materialized bodies are.
impl<M: PartialEq> PartialEq for TableItemProperties<M> {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height
            && self.identifier == other.identifier
            && self.selection_style == other.selection_style
            && self.on_tap == other.on_tap
            && self.render() == other.render()
    }
}

pub fn table_item<M>(
    height: u32,
    identifier: impl Into<String>,
    renderer: impl Fn() -> Component<M> + 'static,
) -> TableItemProperties<M> {
    TableItemProperties {
        height,
        identifier: identifier.into(),
        selection_style: TableItemSelectionStyle::Default,
        on_tap: None,
        renderer: Rc::new(renderer),
    }
}

pub fn table<M>(properties: TableProperties<M>) -> Component<M> {
    table_with(properties, StyleSheet::default(), Layout::default())
}

pub fn table_with<M>(
    properties: TableProperties<M>,
    style: StyleSheet<TableStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Table(properties, style, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ButtonProperties, button};
    use std::cell::Cell;

    #[test]
    fn test_map_does_not_force_renderer() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let item = table_item(44, "row", move || {
            counter.set(counter.get() + 1);
            button(ButtonProperties::new("tap").on_tap(1u8))
        })
        .on_tap(2u8);

        let mapped = item.map(|n| u32::from(n) * 100);
        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.on_tap, Some(200));

        let body = mapped.render();
        assert_eq!(calls.get(), 1);
        match body {
            Component::Button(properties, _, _) => assert_eq!(properties.on_tap, Some(100)),
            other => panic!("unexpected body {:?}", other.kind()),
        }
    }

    #[test]
    fn test_repeated_maps_compose_lazily() {
        let item = table_item(10, "row", || button(ButtonProperties::new("x").on_tap(3i64)));
        let mapped = item.map(|n| n + 1).map(|n| n * 10).map(|n| n.to_string());

        match mapped.render() {
            Component::Button(properties, _, _) => {
                assert_eq!(properties.on_tap.as_deref(), Some("40"))
            }
            other => panic!("unexpected body {:?}", other.kind()),
        }
    }
}
