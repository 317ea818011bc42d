//! Reusable cells and their pools.

use crate::RenderResult;
use crate::geometry::Frame;
use crate::render::RenderContext;
use crate::renderer::{ComponentRenderer, Renderer};
use crate::view::{View, ViewKind};
use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tessera_component::Component;
use tessera_core::Mailbox;

/// A cell that can show any item with its reuse identifier.
pub struct ListCell<M> {
    identifier: String,
    view: View,
    content: ComponentRenderer<M>,
    mailbox: Mailbox<M>,
    forwarded: Cell<bool>,
    index: Cell<Option<usize>>,
}

impl<M: Clone + 'static> ListCell<M> {
    pub fn new(identifier: impl Into<String>, context: RenderContext<M>) -> Self {
        let view = View::new(ViewKind::Cell);
        Self {
            identifier: identifier.into(),
            content: ComponentRenderer::new(view.clone(), context),
            view,
            mailbox: Mailbox::new(),
            forwarded: Cell::new(false),
            index: Cell::new(None),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// The cell's mailbox, stable across binds.
    pub fn mailbox(&self) -> &Mailbox<M> {
        &self.mailbox
    }

    /// The item the cell currently shows.
    pub fn index(&self) -> Option<usize> {
        self.index.get()
    }

    pub fn is_forwarded(&self) -> bool {
        self.forwarded.get()
    }

    /// Forwards the cell's mailbox into `target` unless it already was.
    ///
    /// Returns true on the first call only.
    pub fn forward_once(&self, target: &Mailbox<M>) -> bool {
        if self.forwarded.replace(true) {
            return false;
        }
        self.mailbox.forward(target);
        true
    }

    /// Shows `component` as item `index`, replacing the previous content.
    pub fn bind(&self, index: usize, component: Component<M>, frame: Frame) -> RenderResult<()> {
        self.view.set_frame(frame);
        let content_mailbox = self.content.render(component)?;
        content_mailbox.forward(&self.mailbox);
        self.index.set(Some(index));
        tracing::trace!(index, identifier = %self.identifier, "Bound list cell");
        Ok(())
    }

    /// Height of the rendered content, once bound.
    pub fn content_height(&self) -> Option<f32> {
        self.content.rendered_view().map(|view| view.frame().height)
    }

    /// Detaches the cell from its list so it can wait in a pool.
    pub fn prepare_for_reuse(&self) {
        self.index.set(None);
        self.view.remove_from_superview();
    }
}

impl<M> fmt::Debug for ListCell<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListCell")
            .field("identifier", &self.identifier)
            .field("index", &self.index.get())
            .field("forwarded", &self.forwarded.get())
            .finish()
    }
}

/// Idle cells grouped by reuse identifier.
pub struct CellPool<M> {
    context: RenderContext<M>,
    idle: HashMap<String, Vec<Rc<ListCell<M>>>>,
    created: usize,
}

impl<M: Clone + 'static> CellPool<M> {
    pub fn new(context: RenderContext<M>) -> Self {
        Self {
            context,
            idle: HashMap::new(),
            created: 0,
        }
    }

    /// An idle cell for `identifier`, or a new one if none is idle.
    pub fn dequeue(&mut self, identifier: &str) -> Rc<ListCell<M>> {
        if let Some(cell) = self.idle.get_mut(identifier).and_then(Vec::pop) {
            return cell;
        }
        self.created += 1;
        Rc::new(ListCell::new(identifier, self.context.clone()))
    }

    /// Returns `cell` to the pool of its identifier.
    pub fn recycle(&mut self, cell: Rc<ListCell<M>>) {
        cell.prepare_for_reuse();
        self.idle
            .entry(cell.identifier().to_string())
            .or_default()
            .push(cell);
    }

    /// Number of idle cells for `identifier`.
    pub fn idle(&self, identifier: &str) -> usize {
        self.idle.get(identifier).map_or(0, Vec::len)
    }

    /// Number of cells this pool has ever created.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl<M> fmt::Debug for CellPool<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let idle: HashMap<&str, usize> = self
            .idle
            .iter()
            .map(|(identifier, cells)| (identifier.as_str(), cells.len()))
            .collect();
        f.debug_struct("CellPool")
            .field("idle", &idle)
            .field("created", &self.created)
            .finish()
    }
}
