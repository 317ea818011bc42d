//! The renderer contract and its container-backed implementation.

use crate::RenderResult;
use crate::render::{Render, RenderContext, render_component};
use crate::view::View;
use std::cell::{Cell, RefCell};
use tessera_component::Component;
use tessera_core::Mailbox;

/// Turns a component into views and returns the mailbox its messages
/// arrive in.
pub trait Renderer<M> {
    fn render(&self, component: Component<M>) -> RenderResult<Mailbox<M>>;
}

/// Renders components into a fixed container view.
///
/// Every call to [`render`](Renderer::render) is a full rebuild: the
/// previous mailbox loses all of its subscribers and the previous views
/// are detached before the new tree is built.
pub struct ComponentRenderer<M> {
    container: View,
    context: RenderContext<M>,
    debug_mode: Cell<bool>,
    mailbox: RefCell<Option<Mailbox<M>>>,
}

impl<M: Clone + 'static> ComponentRenderer<M> {
    pub fn new(container: View, context: RenderContext<M>) -> Self {
        let debug_mode = context.config.renderer.debug_mode;
        Self {
            container,
            context,
            debug_mode: Cell::new(debug_mode),
            mailbox: RefCell::new(None),
        }
    }

    pub fn container(&self) -> &View {
        &self.container
    }

    pub fn context(&self) -> &RenderContext<M> {
        &self.context
    }

    pub fn set_debug_mode(&self, enabled: bool) {
        self.debug_mode.set(enabled);
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug_mode.get()
    }

    /// The root view of the last render.
    pub fn rendered_view(&self) -> Option<View> {
        self.container.subview(0)
    }

    /// The mailbox returned by the last render.
    pub fn mailbox(&self) -> Option<Mailbox<M>> {
        self.mailbox.borrow().clone()
    }
}

impl<M: Clone + 'static> Renderer<M> for ComponentRenderer<M> {
    fn render(&self, component: Component<M>) -> RenderResult<Mailbox<M>> {
        if let Some(previous) = self.mailbox.borrow_mut().take() {
            previous.unregister_subscribers();
        }
        self.container.remove_all_subviews();

        let kind = component.kind();
        let Render {
            view,
            mailbox,
            after_layout,
        } = render_component(component, &self.context);

        self.container.add_subview(&view);
        self.context.layout_engine.layout(&view, &self.container)?;
        if let Some(task) = after_layout {
            task();
        }
        if self.debug_mode.get() {
            view.traverse(&mut |view| view.set_debug_frame(true));
        }

        let mailbox = mailbox.unwrap_or_default();
        *self.mailbox.borrow_mut() = Some(mailbox.clone());
        tracing::debug!(%kind, frame = ?view.frame(), "Rendered component");
        Ok(mailbox)
    }
}
