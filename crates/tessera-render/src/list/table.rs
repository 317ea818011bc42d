//! Table lists: one column of rows with individual heights.
//!
//! A row's height starts out as the height its item declares. Once the
//! row has been rendered, the height of its laid-out content is cached
//! and used from then on, until the items are replaced.

use super::cell::ListCell;
use super::height_cache::HeightCache;
use super::host::ListHost;
use crate::RenderResult;
use crate::geometry::Frame;
use crate::render::RenderContext;
use crate::view::View;
use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::{Rc, Weak};
use tessera_component::{TableItemProperties, TableProperties};
use tessera_core::Mailbox;

pub struct TableController<M> {
    host: ListHost<M>,
    items: RefCell<Vec<TableItemProperties<M>>>,
    heights: RefCell<HeightCache>,
    offset: Cell<f32>,
    selected: Cell<Option<usize>>,
}

impl<M: Clone + 'static> TableController<M> {
    /// Creates the controller for the table hosted by `view`.
    ///
    /// Nothing is rendered until [`reload`](Self::reload).
    pub fn new(view: &View, properties: TableProperties<M>, context: RenderContext<M>) -> Rc<Self> {
        Rc::new_cyclic(|this: &Weak<Self>| {
            let this = this.clone();
            let len = properties.items.len();
            Self {
                host: ListHost::new(view, context, move |cell_view| {
                    if let Some(controller) = this.upgrade() {
                        if let Some(row) = controller.host.index_of(cell_view) {
                            controller.select_row(row);
                        }
                    }
                }),
                items: RefCell::new(properties.items),
                heights: RefCell::new(HeightCache::new(len)),
                offset: Cell::new(0.0),
                selected: Cell::new(None),
            }
        })
    }

    /// Receives the messages of every row, including row taps.
    pub fn mailbox(&self) -> Mailbox<M> {
        self.host.mailbox().clone()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// The cached rendered height of `row`, or its declared height.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    pub fn height_for_row(&self, row: usize) -> f32 {
        self.heights
            .borrow()
            .get(row)
            .unwrap_or_else(|| self.items.borrow()[row].height as f32)
    }

    /// Distance from the top of the table to the top of `row`.
    pub fn row_offset(&self, row: usize) -> f32 {
        (0..row).map(|row| self.height_for_row(row)).sum()
    }

    pub fn content_height(&self) -> f32 {
        self.row_offset(self.len())
    }

    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    fn viewport(&self) -> Frame {
        self.host.view().map(|view| view.bounds()).unwrap_or_default()
    }

    /// Rows intersecting the viewport extended by the overscan distance.
    pub fn visible_range(&self) -> Range<usize> {
        let overscan = self.host.context().config.lists.overscan;
        let top = self.offset.get() - overscan;
        let bottom = self.offset.get() + self.viewport().height + overscan;

        let mut start = None;
        let mut end = 0;
        let mut y = 0.0;
        for row in 0..self.len() {
            if y >= bottom {
                break;
            }
            let height = self.height_for_row(row);
            if y + height > top {
                start.get_or_insert(row);
                end = row + 1;
            }
            y += height;
        }
        match start {
            Some(start) => start..end,
            None => 0..0,
        }
    }

    /// Rows that currently have a cell.
    pub fn visible_rows(&self) -> Vec<usize> {
        self.host.visible_indices()
    }

    pub fn cell_for_row(&self, row: usize) -> Option<Rc<ListCell<M>>> {
        self.host.cell(row)
    }

    /// Number of cells created so far; reused cells are not counted again.
    pub fn cells_created(&self) -> usize {
        self.host.cells_created()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.selected.get()
    }

    /// Re-renders every visible row.
    pub fn reload(&self) -> RenderResult<()> {
        self.host.recycle_all();
        self.update_visible_cells()?;
        tracing::debug!(
            rows = self.len(),
            visible = self.host.visible_indices().len(),
            "Reloaded table"
        );
        Ok(())
    }

    /// Replaces the rows, forgetting every cached height.
    pub fn set_items(&self, items: Vec<TableItemProperties<M>>) -> RenderResult<()> {
        self.heights.borrow_mut().invalidate(items.len());
        *self.items.borrow_mut() = items;
        self.selected.set(None);
        self.offset.set(self.clamped_offset(self.offset.get()));
        self.reload()
    }

    /// Scrolls so the top of the viewport is `offset` points into the
    /// table. Rows that stay visible keep their cells.
    pub fn scroll_to(&self, offset: f32) -> RenderResult<()> {
        self.offset.set(self.clamped_offset(offset));
        self.update_visible_cells()
    }

    pub fn scroll_to_row(&self, row: usize) -> RenderResult<()> {
        if row >= self.len() {
            return Ok(());
        }
        self.scroll_to(self.row_offset(row))
    }

    /// Selects `row` as if it had been tapped, dispatching its `on_tap`.
    pub fn select_row(&self, row: usize) -> bool {
        let message = match self.items.borrow().get(row) {
            Some(item) => item.on_tap.clone(),
            None => return false,
        };
        self.selected.set(Some(row));
        if let Some(message) = message {
            self.host.mailbox().dispatch(message);
        }
        true
    }

    fn clamped_offset(&self, offset: f32) -> f32 {
        let max = (self.content_height() - self.viewport().height).max(0.0);
        offset.clamp(0.0, max)
    }

    /// Gives every row in the visible range a cell.
    ///
    /// Binding a row can replace its declared height with a measured one,
    /// which moves the rows below it and so the range itself. Rows are
    /// materialized until the range is stable. Heights only change on a
    /// row's first bind after invalidation, so this settles within
    /// `len() + 1` passes.
    fn update_visible_cells(&self) -> RenderResult<()> {
        let mut wanted = self.visible_range();
        for _ in 0..=self.len() {
            self.host.retain(&wanted.clone().collect::<Vec<_>>());
            for row in wanted.clone() {
                let identifier = self.items.borrow()[row].identifier.clone();
                let (cell, needs_bind) = self.host.materialize(row, &identifier);
                if needs_bind {
                    self.bind_row(&cell, row)?;
                }
            }

            self.offset.set(self.clamped_offset(self.offset.get()));
            let settled = self.visible_range();
            if settled == wanted {
                break;
            }
            wanted = settled;
        }
        self.position_cells();
        Ok(())
    }

    fn bind_row(&self, cell: &ListCell<M>, row: usize) -> RenderResult<()> {
        let (component, identifier) = {
            let items = self.items.borrow();
            (items[row].render(), items[row].identifier.clone())
        };

        let declares_height = component
            .layout()
            .height
            .is_some_and(|height| height.declared().is_some());
        if !declares_height && self.host.context().config.lists.warn_missing_item_height {
            tracing::warn!(
                row,
                identifier = %identifier,
                "Table item component declares neither a height nor a maximum height"
            );
        }

        let frame = Frame::new(
            0.0,
            self.row_offset(row) - self.offset.get(),
            self.viewport().width,
            self.height_for_row(row),
        );
        cell.bind(row, component, frame)?;

        if let Some(height) = cell.content_height() {
            self.heights.borrow_mut().record(row, height);
        }
        Ok(())
    }

    fn position_cells(&self) {
        let width = self.viewport().width;
        for row in self.host.visible_indices() {
            if let Some(cell) = self.host.cell(row) {
                cell.view().set_frame(Frame::new(
                    0.0,
                    self.row_offset(row) - self.offset.get(),
                    width,
                    self.height_for_row(row),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewKind;
    use tessera_component::{
        Dimension, LabelProperties, LabelStyleSheet, Layout, StyleSheet, label, label_with,
        table_item,
    };
    use proptest::prelude::*;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tessera_core::Config;
    use tracing::field::{Field, Visit};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Collects the message of every `WARN` event.
    struct WarningCapture(Arc<Mutex<Vec<String>>>);

    struct MessageVisitor(String);

    impl Visit for MessageVisitor {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    impl<S: tracing::Subscriber> Layer<S> for WarningCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::WARN {
                let mut visitor = MessageVisitor(String::new());
                event.record(&mut visitor);
                self.0.lock().unwrap().push(visitor.0);
            }
        }
    }

    fn warnings_during(f: impl FnOnce()) -> Vec<String> {
        let warnings = Arc::new(Mutex::new(Vec::new()));
        let subscriber =
            tracing_subscriber::registry().with(WarningCapture(Arc::clone(&warnings)));
        tracing::subscriber::with_default(subscriber, f);
        let captured = warnings.lock().unwrap().clone();
        captured
    }

    fn host_view(height: f32) -> View {
        View::with_frame(ViewKind::Table, Frame::sized(200.0, height))
    }

    fn rows(count: usize, height: u32) -> Vec<TableItemProperties<usize>> {
        (0..count)
            .map(|row| {
                table_item(height, "row", move || label(format!("row {row}")))
                    .on_tap(row)
            })
            .collect()
    }

    fn content_sized_row(text: &'static str) -> TableItemProperties<usize> {
        table_item(80, "dynamic", move || {
            label_with(
                LabelProperties::new(text),
                StyleSheet::<LabelStyleSheet>::default(),
                Layout::new().with_height(Dimension::at_most(200.0)),
            )
        })
    }

    #[test]
    fn test_height_is_declared_until_rendered_then_observed() {
        let view = host_view(300.0);
        let context = RenderContext::new(Config::default());
        let table = TableController::new(
            &view,
            TableProperties::new(vec![content_sized_row("short")]),
            context,
        );

        assert_eq!(table.height_for_row(0), 80.0);
        table.reload().unwrap();
        let observed = Config::default().text.line_height;
        assert_eq!(table.height_for_row(0), observed);
        assert_eq!(table.cell_for_row(0).unwrap().view().frame().height, observed);

        table.set_items(vec![content_sized_row("replaced")]).unwrap();
        assert_eq!(table.heights.borrow().get(0), Some(observed));
        table.set_items(vec![]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_set_items_invalidates_cache_before_render() {
        let view = host_view(0.0);
        let table = TableController::new(
            &view,
            TableProperties::new(vec![content_sized_row("a")]),
            RenderContext::new(Config::default()),
        );
        table.heights.borrow_mut().record(0, 12.0);
        assert_eq!(table.height_for_row(0), 12.0);

        table.set_items(vec![content_sized_row("b")]).unwrap();
        assert_eq!(table.height_for_row(0), 80.0);
    }

    #[test]
    fn test_only_visible_rows_are_materialized() {
        let view = host_view(100.0);
        let table = TableController::new(
            &view,
            TableProperties::new(rows(50, 40)),
            RenderContext::new(Config::default()),
        );
        table.reload().unwrap();

        assert_eq!(table.visible_range(), 0..3);
        assert_eq!(table.visible_rows(), vec![0, 1, 2]);
        assert_eq!(view.subviews().len(), 3);
        assert_eq!(table.cells_created(), 3);
    }

    #[test]
    fn test_scrolling_reuses_cells_and_forwards_once() {
        let view = host_view(100.0);
        let table = TableController::new(
            &view,
            TableProperties::new(rows(50, 40)),
            RenderContext::new(Config::default()),
        );
        let mailbox = table.mailbox();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mailbox.subscribe(move |row: &usize| sink.borrow_mut().push(*row));

        table.reload().unwrap();
        for step in 1..=20 {
            table.scroll_to(step as f32 * 40.0).unwrap();
        }

        assert_eq!(table.offset(), 800.0);
        assert_eq!(table.visible_rows(), vec![20, 21, 22]);
        assert!(table.cells_created() <= 6);
        assert!(view.find_by_text("row 0").is_none());

        let cell = table.cell_for_row(21).unwrap();
        assert_eq!(cell.view().frame().y, 40.0);
        view.find_by_text("row 21").unwrap().simulate_tap();
        assert_eq!(*log.borrow(), vec![21]);
        assert_eq!(table.selected_row(), Some(21));
    }

    #[test]
    fn test_scroll_offset_is_clamped() {
        let view = host_view(100.0);
        let table = TableController::new(
            &view,
            TableProperties::new(rows(5, 40)),
            RenderContext::new(Config::default()),
        );
        table.reload().unwrap();
        table.scroll_to(1_000.0).unwrap();
        assert_eq!(table.offset(), 100.0);
        table.scroll_to(-5.0).unwrap();
        assert_eq!(table.offset(), 0.0);
    }

    #[test]
    fn test_rows_moved_up_by_measured_heights_get_cells() {
        let view = host_view(100.0);
        let items = (0..10)
            .map(|row| {
                table_item(100, "dynamic", move || {
                    label_with::<usize>(
                        LabelProperties::new(format!("row {row}")),
                        StyleSheet::<LabelStyleSheet>::default(),
                        Layout::new().with_height(Dimension::at_most(200.0)),
                    )
                })
            })
            .collect();
        let table = TableController::new(
            &view,
            TableProperties::new(items),
            RenderContext::new(Config::default()),
        );
        table.reload().unwrap();

        // Six 17pt rows cover the 100pt viewport
        assert_eq!(table.visible_range(), 0..6);
        assert_eq!(table.visible_rows(), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(table.height_for_row(1), 17.0);
        assert_eq!(table.height_for_row(6), 100.0);

        let last = table.cell_for_row(5).unwrap();
        assert_eq!(last.view().frame(), Frame::new(0.0, 85.0, 200.0, 17.0));
        assert!(view.find_by_text("row 5").is_some());
        assert!(view.find_by_text("row 6").is_none());
    }

    #[test]
    fn test_missing_item_height_is_reported() {
        let view = host_view(100.0);
        let table = TableController::new(
            &view,
            TableProperties::new(rows(3, 40)),
            RenderContext::new(Config::default()),
        );

        let warnings = warnings_during(|| table.reload().unwrap());
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains("declares neither a height nor a maximum height"));

        // Rows that keep their cells are not bound again
        assert!(warnings_during(|| table.scroll_to(0.0).unwrap()).is_empty());
    }

    #[test]
    fn test_missing_item_height_report_can_be_disabled() {
        let mut config = Config::default();
        config.lists.warn_missing_item_height = false;
        let view = host_view(100.0);
        let table =
            TableController::new(&view, TableProperties::new(rows(3, 40)), RenderContext::new(config));
        assert!(warnings_during(|| table.reload().unwrap()).is_empty());

        let view = host_view(100.0);
        let table = TableController::new(
            &view,
            TableProperties::new(vec![content_sized_row("bounded")]),
            RenderContext::new(Config::default()),
        );
        assert!(warnings_during(|| table.reload().unwrap()).is_empty());
    }

    #[test]
    fn test_select_out_of_range_row() {
        let view = host_view(100.0);
        let table = TableController::new(
            &view,
            TableProperties::new(rows(2, 40)),
            RenderContext::new(Config::default()),
        );
        assert!(!table.select_row(2));
        assert_eq!(table.selected_row(), None);
    }

    fn table_rows() -> impl Strategy<Value = Vec<(u32, bool)>> {
        prop::collection::vec((10u32..120, any::<bool>()), 1..30)
    }

    proptest! {
        #[test]
        fn prop_every_visible_row_has_a_cell(
            specs in table_rows(),
            viewport in 50.0f32..300.0,
            offset in 0.0f32..3_000.0,
        ) {
            let view = host_view(viewport);
            let items = specs
                .into_iter()
                .enumerate()
                .map(|(row, (height, content_sized))| {
                    table_item(height, "row", move || {
                        let layout = if content_sized {
                            Layout::new().with_height(Dimension::at_most(200.0))
                        } else {
                            Layout::new()
                        };
                        label_with::<usize>(
                            LabelProperties::new(format!("row {row}")),
                            StyleSheet::<LabelStyleSheet>::default(),
                            layout,
                        )
                    })
                })
                .collect();
            let mut config = Config::default();
            config.lists.warn_missing_item_height = false;
            let table = TableController::new(&view, TableProperties::new(items), RenderContext::new(config));

            table.reload().unwrap();
            prop_assert_eq!(table.visible_rows(), table.visible_range().collect::<Vec<_>>());

            table.scroll_to(offset).unwrap();
            prop_assert_eq!(table.visible_rows(), table.visible_range().collect::<Vec<_>>());
            for row in table.visible_rows() {
                let frame = table.cell_for_row(row).unwrap().view().frame();
                prop_assert_eq!(frame.y, table.row_offset(row) - table.offset());
            }
        }
    }
}
