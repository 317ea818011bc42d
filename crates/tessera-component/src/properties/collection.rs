use super::{ItemRenderer, Transform, map_renderer};
use crate::Component;
use crate::layout::{Edges, Layout};
use crate::style::{EmptyStyleSheet, StyleSheet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    #[default]
    Vertical,
    Horizontal,
}

/// Grid geometry of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionLayoutValues {
    pub item_width: u32,
    pub item_height: u32,
    pub minimum_interitem_spacing: u32,
    pub minimum_line_spacing: u32,
    pub section_inset: Edges,
    pub scroll_direction: ScrollDirection,
}

impl CollectionLayoutValues {
    pub fn new(item_width: u32, item_height: u32) -> Self {
        Self {
            item_width,
            item_height,
            ..Self::default()
        }
    }
}

impl Default for CollectionLayoutValues {
    fn default() -> Self {
        Self {
            item_width: 50,
            item_height: 50,
            minimum_interitem_spacing: 0,
            minimum_line_spacing: 0,
            section_inset: Edges::default(),
            scroll_direction: ScrollDirection::Vertical,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionProperties<M> {
    pub items: Vec<CollectionItemProperties<M>>,
    pub layout_values: CollectionLayoutValues,
    pub shows_vertical_scroll_indicator: bool,
    pub shows_horizontal_scroll_indicator: bool,
    pub is_snap_to_cell_enabled: bool,
}

impl<M> CollectionProperties<M> {
    pub fn new(items: Vec<CollectionItemProperties<M>>, layout_values: CollectionLayoutValues) -> Self {
        Self {
            items,
            layout_values,
            shows_vertical_scroll_indicator: false,
            shows_horizontal_scroll_indicator: false,
            is_snap_to_cell_enabled: false,
        }
    }
}

impl<M: 'static> CollectionProperties<M> {
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> CollectionProperties<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(
        self,
        transform: &Transform<M, N>,
    ) -> CollectionProperties<N> {
        CollectionProperties {
            items: self
                .items
                .into_iter()
                .map(|item| item.map_with(transform))
                .collect(),
            layout_values: self.layout_values,
            shows_vertical_scroll_indicator: self.shows_vertical_scroll_indicator,
            shows_horizontal_scroll_indicator: self.shows_horizontal_scroll_indicator,
            is_snap_to_cell_enabled: self.is_snap_to_cell_enabled,
        }
    }
}

/// One cell of a collection.
pub struct CollectionItemProperties<M> {
    pub on_tap: Option<M>,
    pub identifier: String,
    pub renderer: ItemRenderer<M>,
}

impl<M> CollectionItemProperties<M> {
    pub fn on_tap(mut self, message: M) -> Self {
        self.on_tap = Some(message);
        self
    }

    pub fn render(&self) -> Component<M> {
        (self.renderer)()
    }
}

impl<M: 'static> CollectionItemProperties<M> {
    pub fn map<N: 'static>(
        self,
        transform: impl Fn(M) -> N + 'static,
    ) -> CollectionItemProperties<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(
        self,
        transform: &Transform<M, N>,
    ) -> CollectionItemProperties<N> {
        CollectionItemProperties {
            on_tap: self.on_tap.map(|message| transform(message)),
            identifier: self.identifier,
            renderer: map_renderer(self.renderer, transform),
        }
    }
}

impl<M: Clone> Clone for CollectionItemProperties<M> {
    fn clone(&self) -> Self {
        Self {
            on_tap: self.on_tap.clone(),
            identifier: self.identifier.clone(),
            renderer: Rc::clone(&self.renderer),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for CollectionItemProperties<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionItemProperties")
            .field("on_tap", &self.on_tap)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

impl<M: PartialEq> PartialEq for CollectionItemProperties<M> {
    fn eq(&self, other: &Self) -> bool {
        self.on_tap == other.on_tap
            && self.identifier == other.identifier
            && self.render() == other.render()
    }
}

pub fn collection_item<M>(
    identifier: impl Into<String>,
    renderer: impl Fn() -> Component<M> + 'static,
) -> CollectionItemProperties<M> {
    CollectionItemProperties {
        on_tap: None,
        identifier: identifier.into(),
        renderer: Rc::new(renderer),
    }
}

pub fn collection<M>(properties: CollectionProperties<M>) -> Component<M> {
    collection_with(properties, StyleSheet::default(), Layout::default())
}

pub fn collection_with<M>(
    properties: CollectionProperties<M>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Collection(properties, style, layout)
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
        let item = collection_item("cell", move || {
            counter.set(counter.get() + 1);
            button(ButtonProperties::new("tap").on_tap(4u8))
        })
        .on_tap(5u8);
        let mut properties = CollectionProperties::new(vec![item], CollectionLayoutValues::new(60, 30));
        properties.is_snap_to_cell_enabled = true;

        let mapped = properties.map(|n| format!("#{n}"));
        assert_eq!(calls.get(), 0);
        assert!(mapped.is_snap_to_cell_enabled);
        assert_eq!(mapped.layout_values, CollectionLayoutValues::new(60, 30));
        assert_eq!(mapped.items[0].on_tap.as_deref(), Some("#5"));
        assert_eq!(mapped.items[0].identifier, "cell");

        match mapped.items[0].render() {
            Component::Button(properties, _, _) => {
                assert_eq!(properties.on_tap.as_deref(), Some("#4"))
            }
            other => panic!("unexpected body {:?}", other.kind()),
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_item_map_composes() {
        let item = collection_item("cell", || button(ButtonProperties::new("x").on_tap(2i32)))
            .on_tap(7i32);
        let composed = item.clone().map(|n| n * 3).map(|n| n - 1);
        let direct = item.map(|n| n * 3 - 1);

        assert_eq!(composed, direct);
        assert_eq!(composed.on_tap, Some(20));
    }
}
