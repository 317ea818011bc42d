use super::{CollectionItemProperties, ItemRenderer, Transform, map_renderer};
use crate::Component;
use crate::layout::{Edges, Layout};
use crate::style::{EmptyStyleSheet, StyleSheet};
use std::fmt;
use std::rc::Rc;
use tessera_core::{ShiftOperation, ZipList};

/// Turns a snapped selection change into an optional message.
pub type SelectionChangeHandler<M> = Rc<dyn Fn(ShiftOperation) -> Option<M>>;

/// A horizontally paged list with a selected item.
///
/// The selected item is the center of `items`.
pub struct CarouselProperties<M> {
    pub items: Option<ZipList<CarouselItemProperties<M>>>,
    pub shows_scroll_indicator: bool,
    pub is_snap_to_cell_enabled: bool,
    pub item_width: u32,
    pub item_height: u32,
    pub minimum_interitem_spacing: u32,
    pub minimum_line_spacing: u32,
    pub section_inset: Edges,
    pub on_selection_change: Option<SelectionChangeHandler<M>>,
}

impl<M> CarouselProperties<M> {
    pub fn new(
        items: Option<ZipList<CarouselItemProperties<M>>>,
        item_width: u32,
        item_height: u32,
    ) -> Self {
        Self {
            items,
            shows_scroll_indicator: false,
            is_snap_to_cell_enabled: false,
            item_width,
            item_height,
            minimum_interitem_spacing: 0,
            minimum_line_spacing: 0,
            section_inset: Edges::default(),
            on_selection_change: None,
        }
    }

    pub fn snap_to_cell(mut self, enabled: bool) -> Self {
        self.is_snap_to_cell_enabled = enabled;
        self
    }

    pub fn on_selection_change(
        mut self,
        handler: impl Fn(ShiftOperation) -> Option<M> + 'static,
    ) -> Self {
        self.on_selection_change = Some(Rc::new(handler));
        self
    }

    /// Position of the selected item, if there are items.
    pub fn selected_index(&self) -> Option<usize> {
        self.items.as_ref().map(ZipList::center_index)
    }
}

impl<M: 'static> CarouselProperties<M> {
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> CarouselProperties<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(self, transform: &Transform<M, N>) -> CarouselProperties<N> {
        let on_selection_change = self.on_selection_change.map(|handler| {
            let transform = Rc::clone(transform);
            Rc::new(move |operation: ShiftOperation| handler(operation).map(|message| transform(message)))
                as SelectionChangeHandler<N>
        });
        CarouselProperties {
            items: self
                .items
                .map(|items| items.map(|item| item.map_with(transform))),
            shows_scroll_indicator: self.shows_scroll_indicator,
            is_snap_to_cell_enabled: self.is_snap_to_cell_enabled,
            item_width: self.item_width,
            item_height: self.item_height,
            minimum_interitem_spacing: self.minimum_interitem_spacing,
            minimum_line_spacing: self.minimum_line_spacing,
            section_inset: self.section_inset,
            on_selection_change,
        }
    }
}

impl<M: Clone> Clone for CarouselProperties<M> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            shows_scroll_indicator: self.shows_scroll_indicator,
            is_snap_to_cell_enabled: self.is_snap_to_cell_enabled,
            item_width: self.item_width,
            item_height: self.item_height,
            minimum_interitem_spacing: self.minimum_interitem_spacing,
            minimum_line_spacing: self.minimum_line_spacing,
            section_inset: self.section_inset,
            on_selection_change: self.on_selection_change.clone(),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for CarouselProperties<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselProperties")
            .field("items", &self.items)
            .field("is_snap_to_cell_enabled", &self.is_snap_to_cell_enabled)
            .field("item_width", &self.item_width)
            .field("item_height", &self.item_height)
            .field("on_selection_change", &self.on_selection_change.is_some())
            .finish_non_exhaustive()
    }
}

/// Selection handlers are compared by what they produce for a single step
/// in each direction.
impl<M: PartialEq> PartialEq for CarouselProperties<M> {
    fn eq(&self, other: &Self) -> bool {
        let handlers_match = match (&self.on_selection_change, &other.on_selection_change) {
            (None, None) => true,
            (Some(a), Some(b)) => [ShiftOperation::Left(1), ShiftOperation::Right(1)]
                .into_iter()
                .all(|operation| a(operation) == b(operation)),
            _ => false,
        };
        handlers_match
            && self.items == other.items
            && self.shows_scroll_indicator == other.shows_scroll_indicator
            && self.is_snap_to_cell_enabled == other.is_snap_to_cell_enabled
            && self.item_width == other.item_width
            && self.item_height == other.item_height
            && self.minimum_interitem_spacing == other.minimum_interitem_spacing
            && self.minimum_line_spacing == other.minimum_line_spacing
            && self.section_inset == other.section_inset
    }
}

/// One page of a carousel.
pub struct CarouselItemProperties<M> {
    pub on_tap: Option<M>,
    /// Emitted when the item becomes the selected page.
    pub on_scrolled: Option<M>,
    pub identifier: String,
    pub renderer: ItemRenderer<M>,
}

impl<M> CarouselItemProperties<M> {
    pub fn on_tap(mut self, message: M) -> Self {
        self.on_tap = Some(message);
        self
    }

    pub fn on_scrolled(mut self, message: M) -> Self {
        self.on_scrolled = Some(message);
        self
    }

    pub fn render(&self) -> Component<M> {
        (self.renderer)()
    }
}

impl<M: Clone> CarouselItemProperties<M> {
    /// The same page as a plain collection cell.
    pub fn to_collection_item(&self) -> CollectionItemProperties<M> {
        CollectionItemProperties {
            on_tap: self.on_tap.clone(),
            identifier: self.identifier.clone(),
            renderer: Rc::clone(&self.renderer),
        }
    }
}

impl<M: 'static> CarouselItemProperties<M> {
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> CarouselItemProperties<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(
        self,
        transform: &Transform<M, N>,
    ) -> CarouselItemProperties<N> {
        CarouselItemProperties {
            on_tap: self.on_tap.map(|message| transform(message)),
            on_scrolled: self.on_scrolled.map(|message| transform(message)),
            identifier: self.identifier,
            renderer: map_renderer(self.renderer, transform),
        }
    }
}

impl<M: Clone> Clone for CarouselItemProperties<M> {
    fn clone(&self) -> Self {
        Self {
            on_tap: self.on_tap.clone(),
            on_scrolled: self.on_scrolled.clone(),
            identifier: self.identifier.clone(),
            renderer: Rc::clone(&self.renderer),
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for CarouselItemProperties<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselItemProperties")
            .field("on_tap", &self.on_tap)
            .field("on_scrolled", &self.on_scrolled)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

impl<M: PartialEq> PartialEq for CarouselItemProperties<M> {
    fn eq(&self, other: &Self) -> bool {
        self.on_tap == other.on_tap
            && self.on_scrolled == other.on_scrolled
            && self.identifier == other.identifier
            && self.render() == other.render()
    }
}

pub fn carousel_item<M>(
    identifier: impl Into<String>,
    renderer: impl Fn() -> Component<M> + 'static,
) -> CarouselItemProperties<M> {
    CarouselItemProperties {
        on_tap: None,
        on_scrolled: None,
        identifier: identifier.into(),
        renderer: Rc::new(renderer),
    }
}

pub fn carousel<M>(properties: CarouselProperties<M>) -> Component<M> {
    carousel_with(properties, StyleSheet::default(), Layout::default())
}

pub fn carousel_with<M>(
    properties: CarouselProperties<M>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Carousel(properties, style, layout)
}
