//! Bookkeeping shared by every list controller: the host view, the list
//! mailbox, the cell pool and the cells currently on screen.

use super::cell::{CellPool, ListCell};
use crate::dispatcher::ControlEvent;
use crate::render::RenderContext;
use crate::view::{View, WeakView};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tessera_core::Mailbox;

type CellTapHandler = Rc<dyn Fn(&View)>;

pub(crate) struct ListHost<M> {
    view: WeakView,
    context: RenderContext<M>,
    mailbox: Mailbox<M>,
    pool: RefCell<CellPool<M>>,
    visible: RefCell<BTreeMap<usize, Rc<ListCell<M>>>>,
    on_cell_tap: CellTapHandler,
}

impl<M: Clone + 'static> ListHost<M> {
    /// `on_cell_tap` receives the cell view that was tapped.
    pub(crate) fn new(
        view: &View,
        context: RenderContext<M>,
        on_cell_tap: impl Fn(&View) + 'static,
    ) -> Self {
        Self {
            view: view.downgrade(),
            pool: RefCell::new(CellPool::new(context.clone())),
            context,
            mailbox: Mailbox::new(),
            visible: RefCell::new(BTreeMap::new()),
            on_cell_tap: Rc::new(on_cell_tap),
        }
    }

    pub(crate) fn view(&self) -> Option<View> {
        self.view.upgrade()
    }

    pub(crate) fn context(&self) -> &RenderContext<M> {
        &self.context
    }

    pub(crate) fn mailbox(&self) -> &Mailbox<M> {
        &self.mailbox
    }

    pub(crate) fn cell(&self, index: usize) -> Option<Rc<ListCell<M>>> {
        self.visible.borrow().get(&index).cloned()
    }

    pub(crate) fn visible_indices(&self) -> Vec<usize> {
        self.visible.borrow().keys().copied().collect()
    }

    /// The item shown by the cell whose view is `view`.
    pub(crate) fn index_of(&self, view: &View) -> Option<usize> {
        self.visible
            .borrow()
            .iter()
            .find(|(_, cell)| cell.view().ptr_eq(view))
            .map(|(index, _)| *index)
    }

    pub(crate) fn cells_created(&self) -> usize {
        self.pool.borrow().created()
    }

    /// Recycles every visible cell whose index is not in `wanted`.
    pub(crate) fn retain(&self, wanted: &[usize]) {
        let gone: Vec<Rc<ListCell<M>>> = {
            let mut visible = self.visible.borrow_mut();
            let indices: Vec<usize> = visible
                .keys()
                .filter(|index| !wanted.contains(index))
                .copied()
                .collect();
            indices
                .into_iter()
                .filter_map(|index| visible.remove(&index))
                .collect()
        };
        let mut pool = self.pool.borrow_mut();
        for cell in gone {
            pool.recycle(cell);
        }
    }

    pub(crate) fn recycle_all(&self) {
        self.retain(&[]);
    }

    /// The cell for `index`, dequeuing and attaching one if none is
    /// visible. The flag is true when the cell needs to be bound.
    pub(crate) fn materialize(&self, index: usize, identifier: &str) -> (Rc<ListCell<M>>, bool) {
        if let Some(cell) = self.cell(index) {
            if cell.identifier() == identifier {
                return (cell, false);
            }
            if let Some(stale) = self.visible.borrow_mut().remove(&index) {
                self.pool.borrow_mut().recycle(stale);
            }
        }

        let cell = self.pool.borrow_mut().dequeue(identifier);
        if cell.forward_once(&self.mailbox) {
            let on_tap = Rc::clone(&self.on_cell_tap);
            cell.view().on(ControlEvent::Tap, move |view| on_tap(view));
        }
        if let Some(host) = self.view() {
            host.add_subview(cell.view());
        }
        self.visible.borrow_mut().insert(index, Rc::clone(&cell));
        (cell, true)
    }
}
