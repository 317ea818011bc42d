//! Carousels: a horizontal collection with a selected page.
//!
//! The selected page starts out as the center of the items' `ZipList`.
//! When snapping is enabled, every drag moves the selection at most one
//! page in the drag's direction and reports the move as a
//! [`ShiftOperation`]. Scrolling the selected page into the middle of the
//! viewport is always deferred to the next UI cycle, so it never happens
//! in the middle of a layout pass.

use super::collection::CollectionController;
use crate::RenderResult;
use crate::render::RenderContext;
use crate::view::View;
use std::cell::Cell;
use std::rc::{Rc, Weak};
use tessera_component::{
    CarouselProperties, CollectionLayoutValues, CollectionProperties, ScrollDirection,
    SelectionChangeHandler,
};
use tessera_core::{Mailbox, ShiftOperation, UiScheduler};

pub struct CarouselController<M> {
    this: Weak<Self>,
    collection: Rc<CollectionController<M>>,
    scrolled_messages: Vec<Option<M>>,
    selected: Cell<usize>,
    snaps_to_cell: bool,
    on_selection_change: Option<SelectionChangeHandler<M>>,
    drag_start: Cell<Option<f32>>,
    scheduler: UiScheduler,
}

impl<M: Clone + 'static> CarouselController<M> {
    /// Creates the controller and schedules the initial scroll to the
    /// selected page.
    pub fn new(view: &View, properties: CarouselProperties<M>, context: RenderContext<M>) -> Rc<Self> {
        let (items, selected) = match properties.items {
            Some(items) => {
                let selected = items.center_index();
                (items.into_vec(), selected)
            }
            None => (Vec::new(), 0),
        };

        let layout_values = CollectionLayoutValues {
            item_width: properties.item_width,
            item_height: properties.item_height,
            minimum_interitem_spacing: properties.minimum_interitem_spacing,
            minimum_line_spacing: properties.minimum_line_spacing,
            section_inset: properties.section_inset,
            scroll_direction: ScrollDirection::Horizontal,
        };
        let mut collection_properties = CollectionProperties::new(
            items.iter().map(|item| item.to_collection_item()).collect(),
            layout_values,
        );
        collection_properties.shows_horizontal_scroll_indicator = properties.shows_scroll_indicator;

        let scheduler = context.scheduler.clone();
        let collection = CollectionController::new(view, collection_properties, context);

        let controller = Rc::new_cyclic(|this: &Weak<Self>| Self {
            this: this.clone(),
            collection,
            scrolled_messages: items.into_iter().map(|item| item.on_scrolled).collect(),
            selected: Cell::new(selected),
            snaps_to_cell: properties.is_snap_to_cell_enabled,
            on_selection_change: properties.on_selection_change,
            drag_start: Cell::new(None),
            scheduler,
        });
        controller.schedule_scroll_to_selected();
        controller
    }

    pub fn mailbox(&self) -> Mailbox<M> {
        self.collection.mailbox()
    }

    /// The collection laying out the pages.
    pub fn collection(&self) -> &Rc<CollectionController<M>> {
        &self.collection
    }

    pub fn len(&self) -> usize {
        self.scrolled_messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrolled_messages.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected.get()
    }

    pub fn offset(&self) -> f32 {
        self.collection.offset()
    }

    pub fn reload(&self) -> RenderResult<()> {
        self.collection.reload()
    }

    /// Starts a user drag at the current offset.
    pub fn begin_drag(&self) {
        self.drag_start.set(Some(self.collection.offset()));
    }

    /// Moves the content during a drag.
    pub fn drag_to(&self, offset: f32) -> RenderResult<()> {
        self.collection.scroll_to(offset)
    }

    /// Ends a drag, moving the selection one page in the drag direction
    /// when snapping is enabled.
    ///
    /// Returns the selection change, if any.
    pub fn end_drag(&self) -> Option<ShiftOperation> {
        let start = self.drag_start.take()?;
        if !self.snaps_to_cell {
            return None;
        }

        let offset = self.collection.offset();
        let selected = self.selected.get();
        let operation = if offset > start && selected + 1 < self.len() {
            self.selected.set(selected + 1);
            Some(ShiftOperation::Left(1))
        } else if offset < start && selected >= 1 {
            self.selected.set(selected - 1);
            Some(ShiftOperation::Right(1))
        } else {
            None
        };

        if let Some(operation) = operation {
            tracing::debug!(?operation, selected = self.selected.get(), "Carousel selection changed");
            let mailbox = self.collection.mailbox();
            if let Some(message) = self
                .on_selection_change
                .as_ref()
                .and_then(|handler| handler(operation))
            {
                mailbox.dispatch(message);
            }
            if let Some(Some(message)) = self.scrolled_messages.get(self.selected.get()) {
                mailbox.dispatch(message.clone());
            }
        }

        self.schedule_scroll_to_selected();
        operation
    }

    /// Scrolls so page `index` is centered horizontally.
    pub fn scroll_to_item(&self, index: usize) -> RenderResult<()> {
        if index >= self.len() {
            return Ok(());
        }
        let frame = self.collection.item_frame(index);
        let centered = frame.x + frame.width / 2.0 - self.collection.viewport_length() / 2.0;
        self.collection.scroll_to(centered)
    }

    fn schedule_scroll_to_selected(&self) {
        let this = self.this.clone();
        self.scheduler.post(move || {
            if let Some(controller) = this.upgrade() {
                if let Err(error) = controller.scroll_to_item(controller.selected_index()) {
                    tracing::error!(%error, "Failed to scroll carousel to selected page");
                }
            }
        });
    }
}
