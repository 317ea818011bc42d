//! Collection lists: fixed-size items flowing in lines.
//!
//! Items fill a line across the non-scrolling axis, then wrap to the next
//! line along the scrolling axis. All geometry follows from
//! [`CollectionLayoutValues`] and the host's bounds.

use super::cell::ListCell;
use super::host::ListHost;
use crate::RenderResult;
use crate::geometry::Frame;
use crate::render::RenderContext;
use crate::view::View;
use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::{Rc, Weak};
use tessera_component::{
    CollectionItemProperties, CollectionLayoutValues, CollectionProperties, ScrollDirection,
};
use tessera_core::Mailbox;

pub struct CollectionController<M> {
    host: ListHost<M>,
    items: RefCell<Vec<CollectionItemProperties<M>>>,
    layout: CollectionLayoutValues,
    snaps_to_cell: bool,
    offset: Cell<f32>,
    selected: Cell<Option<usize>>,
}

impl<M: Clone + 'static> CollectionController<M> {
    pub fn new(
        view: &View,
        properties: CollectionProperties<M>,
        context: RenderContext<M>,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let this = this.clone();
            Self {
                host: ListHost::new(view, context, move |cell_view| {
                    if let Some(controller) = this.upgrade() {
                        if let Some(index) = controller.host.index_of(cell_view) {
                            controller.select_item(index);
                        }
                    }
                }),
                items: RefCell::new(properties.items),
                layout: properties.layout_values,
                snaps_to_cell: properties.is_snap_to_cell_enabled,
                offset: Cell::new(0.0),
                selected: Cell::new(None),
            }
        })
    }

    pub fn mailbox(&self) -> Mailbox<M> {
        self.host.mailbox().clone()
    }

    pub fn layout_values(&self) -> &CollectionLayoutValues {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn viewport(&self) -> Frame {
        self.host.view().map(|view| view.bounds()).unwrap_or_default()
    }

    fn is_vertical(&self) -> bool {
        self.layout.scroll_direction == ScrollDirection::Vertical
    }

    /// Item size along the scrolling axis, and across it.
    fn item_extent(&self) -> (f32, f32) {
        let (width, height) = (self.layout.item_width as f32, self.layout.item_height as f32);
        if self.is_vertical() {
            (height, width)
        } else {
            (width, height)
        }
    }

    /// Insets before and after the content along the scrolling axis.
    fn scroll_insets(&self) -> (f32, f32) {
        let inset = self.layout.section_inset;
        if self.is_vertical() {
            (inset.top, inset.bottom)
        } else {
            (inset.left, inset.right)
        }
    }

    fn line_pitch(&self) -> f32 {
        self.item_extent().0 + self.layout.minimum_line_spacing as f32
    }

    /// Length of the viewport along the scrolling axis.
    pub fn viewport_length(&self) -> f32 {
        let viewport = self.viewport();
        if self.is_vertical() {
            viewport.height
        } else {
            viewport.width
        }
    }

    /// Number of items that fit in one line.
    pub fn items_per_line(&self) -> usize {
        let viewport = self.viewport();
        let inset = self.layout.section_inset;
        let (across, available) = if self.is_vertical() {
            (self.layout.item_width as f32, viewport.width - inset.horizontal())
        } else {
            (self.layout.item_height as f32, viewport.height - inset.vertical())
        };
        let spacing = self.layout.minimum_interitem_spacing as f32;
        if across + spacing <= 0.0 {
            return 1;
        }
        ((available + spacing) / (across + spacing)).floor().max(1.0) as usize
    }

    pub fn line_count(&self) -> usize {
        self.len().div_ceil(self.items_per_line())
    }

    /// Frame of item `index` in content coordinates.
    pub fn item_frame(&self, index: usize) -> Frame {
        let per_line = self.items_per_line();
        let line = (index / per_line) as f32;
        let position = (index % per_line) as f32;
        let inset = self.layout.section_inset;
        let (width, height) = (self.layout.item_width as f32, self.layout.item_height as f32);
        let line_spacing = self.layout.minimum_line_spacing as f32;
        let interitem = self.layout.minimum_interitem_spacing as f32;

        if self.is_vertical() {
            Frame::new(
                inset.left + position * (width + interitem),
                inset.top + line * (height + line_spacing),
                width,
                height,
            )
        } else {
            Frame::new(
                inset.left + line * (width + line_spacing),
                inset.top + position * (height + interitem),
                width,
                height,
            )
        }
    }

    /// Length of the content along the scrolling axis.
    pub fn content_length(&self) -> f32 {
        let (before, after) = self.scroll_insets();
        let lines = self.line_count();
        if lines == 0 {
            return before + after;
        }
        before + after + lines as f32 * self.line_pitch() - self.layout.minimum_line_spacing as f32
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_length() - self.viewport_length()).max(0.0)
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    /// Items on lines intersecting the viewport extended by the overscan.
    pub fn visible_range(&self) -> Range<usize> {
        let overscan = self.host.context().config.lists.overscan;
        let top = self.offset.get() - overscan;
        let bottom = self.offset.get() + self.viewport_length() + overscan;
        let (before, _) = self.scroll_insets();
        let (extent, _) = self.item_extent();
        let pitch = self.line_pitch();
        let per_line = self.items_per_line();

        let mut lines = None::<Range<usize>>;
        for line in 0..self.line_count() {
            let start = before + line as f32 * pitch;
            if start >= bottom {
                break;
            }
            if start + extent > top {
                lines = Some(lines.map_or(line..line + 1, |range| range.start..line + 1));
            }
        }
        match lines {
            Some(lines) => lines.start * per_line..(lines.end * per_line).min(self.len()),
            None => 0..0,
        }
    }

    /// Items that currently have a cell.
    pub fn visible_items(&self) -> Vec<usize> {
        self.host.visible_indices()
    }

    pub fn cell_for_item(&self, index: usize) -> Option<Rc<ListCell<M>>> {
        self.host.cell(index)
    }

    pub fn cells_created(&self) -> usize {
        self.host.cells_created()
    }

    pub fn selected_item(&self) -> Option<usize> {
        self.selected.get()
    }

    /// Re-renders every visible item.
    pub fn reload(&self) -> RenderResult<()> {
        self.host.recycle_all();
        self.update_visible_cells()?;
        tracing::debug!(
            items = self.len(),
            visible = self.host.visible_indices().len(),
            "Reloaded collection"
        );
        Ok(())
    }

    pub fn set_items(&self, items: Vec<CollectionItemProperties<M>>) -> RenderResult<()> {
        *self.items.borrow_mut() = items;
        self.selected.set(None);
        self.offset.set(self.offset.get().clamp(0.0, self.max_offset()));
        self.reload()
    }

    /// Scrolls along the scrolling axis, clamped to the content.
    pub fn scroll_to(&self, offset: f32) -> RenderResult<()> {
        self.offset.set(offset.clamp(0.0, self.max_offset()));
        self.update_visible_cells()
    }

    /// Ends a scroll. With snapping enabled the offset settles on the
    /// nearest line.
    pub fn settle(&self) -> RenderResult<()> {
        if !self.snaps_to_cell || self.line_pitch() <= 0.0 {
            return Ok(());
        }
        let (before, _) = self.scroll_insets();
        let line = ((self.offset.get() - before) / self.line_pitch()).round().max(0.0);
        self.scroll_to(before + line * self.line_pitch())
    }

    /// Selects `index` as if it had been tapped, dispatching its `on_tap`.
    pub fn select_item(&self, index: usize) -> bool {
        let message = match self.items.borrow().get(index) {
            Some(item) => item.on_tap.clone(),
            None => return false,
        };
        self.selected.set(Some(index));
        if let Some(message) = message {
            self.host.mailbox().dispatch(message);
        }
        true
    }

    /// `frame` moved from content coordinates into the host's.
    fn displayed(&self, frame: Frame) -> Frame {
        let offset = self.offset.get();
        if self.is_vertical() {
            Frame::new(frame.x, frame.y - offset, frame.width, frame.height)
        } else {
            Frame::new(frame.x - offset, frame.y, frame.width, frame.height)
        }
    }

    fn update_visible_cells(&self) -> RenderResult<()> {
        let wanted: Vec<usize> = self.visible_range().collect();
        self.host.retain(&wanted);

        for &index in &wanted {
            let item = self.items.borrow()[index].clone();
            let (cell, needs_bind) = self.host.materialize(index, &item.identifier);
            let frame = self.displayed(self.item_frame(index));
            if needs_bind {
                cell.bind(index, item.render(), frame)?;
            } else {
                cell.view().set_frame(frame);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewKind;
    use tessera_component::{Edges, collection_item, label};
    use tessera_core::Config;

    fn items(count: usize) -> Vec<CollectionItemProperties<usize>> {
        (0..count)
            .map(|index| collection_item("tile", move || label(format!("tile {index}"))).on_tap(index))
            .collect()
    }

    fn controller(
        frame: Frame,
        count: usize,
        layout: CollectionLayoutValues,
    ) -> (View, Rc<CollectionController<usize>>) {
        let view = View::with_frame(ViewKind::Collection, frame);
        let controller = CollectionController::new(
            &view,
            CollectionProperties::new(items(count), layout),
            RenderContext::new(Config::default()),
        );
        (view, controller)
    }

    #[test]
    fn test_vertical_grid_geometry() {
        let layout = CollectionLayoutValues {
            minimum_interitem_spacing: 10,
            minimum_line_spacing: 5,
            section_inset: Edges::all(10.0),
            ..CollectionLayoutValues::new(50, 50)
        };
        let (_view, collection) = controller(Frame::sized(200.0, 100.0), 7, layout);

        // 180 points across fit three 50 point items with 10 point gaps
        assert_eq!(collection.items_per_line(), 3);
        assert_eq!(collection.line_count(), 3);
        assert_eq!(collection.item_frame(4), Frame::new(70.0, 65.0, 50.0, 50.0));
        assert_eq!(collection.content_length(), 180.0);
        assert_eq!(collection.max_offset(), 80.0);
    }

    #[test]
    fn test_visible_items_follow_scroll() {
        let (view, collection) =
            controller(Frame::sized(100.0, 100.0), 20, CollectionLayoutValues::new(50, 50));
        collection.reload().unwrap();
        assert_eq!(collection.visible_items(), vec![0, 1, 2, 3]);
        assert_eq!(view.subviews().len(), 4);

        collection.scroll_to(125.0).unwrap();
        assert_eq!(collection.visible_items(), vec![4, 5, 6, 7, 8, 9]);
        assert_eq!(
            collection.cell_for_item(4).unwrap().view().frame(),
            Frame::new(0.0, -25.0, 50.0, 50.0)
        );
        assert!(collection.cells_created() <= 10);
    }

    #[test]
    fn test_horizontal_single_line() {
        let layout = CollectionLayoutValues {
            scroll_direction: ScrollDirection::Horizontal,
            minimum_line_spacing: 10,
            ..CollectionLayoutValues::new(80, 100)
        };
        let (_view, collection) = controller(Frame::sized(200.0, 100.0), 5, layout);
        collection.reload().unwrap();

        assert_eq!(collection.items_per_line(), 1);
        assert_eq!(collection.item_frame(2), Frame::new(180.0, 0.0, 80.0, 100.0));
        assert_eq!(collection.visible_items(), vec![0, 1, 2]);
    }

    #[test]
    fn test_tapping_item_dispatches_on_tap() {
        let (view, collection) =
            controller(Frame::sized(100.0, 100.0), 4, CollectionLayoutValues::new(50, 50));
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        collection
            .mailbox()
            .subscribe(move |index: &usize| sink.borrow_mut().push(*index));
        collection.reload().unwrap();

        view.find_by_text("tile 3").unwrap().simulate_tap();
        assert_eq!(*log.borrow(), vec![3]);
        assert_eq!(collection.selected_item(), Some(3));
    }

    #[test]
    fn test_settle_snaps_to_nearest_line() {
        let view = View::with_frame(ViewKind::Collection, Frame::sized(50.0, 50.0));
        let mut properties =
            CollectionProperties::new(items(10), CollectionLayoutValues::new(50, 50));
        properties.is_snap_to_cell_enabled = true;
        let snapping =
            CollectionController::new(&view, properties, RenderContext::new(Config::default()));

        snapping.scroll_to(80.0).unwrap();
        snapping.settle().unwrap();
        assert_eq!(snapping.offset(), 100.0);
        snapping.scroll_to(120.0).unwrap();
        snapping.settle().unwrap();
        assert_eq!(snapping.offset(), 100.0);
    }
}
