//! One render pass over a component tree.
//!
//! [`render_component`] is a structural recursion: it matches every
//! component variant and returns the view it produced, the mailbox that
//! will receive the subtree's messages, and an optional task to run once
//! the whole tree has been laid out.
//!
//! ## Learning: Exhaustive Matches as Contracts
//!
//! The match below has no wildcard arm. A new `Component` variant fails to
//! compile here until it has a renderer, so a variant can never silently
//! render as nothing.

use crate::custom::{CustomComponentRenderer, VoidCustomComponentRenderer};
use crate::layout_engine::{LayoutEngine, TaffyLayoutEngine};
use crate::renderers::{container, controls, display, lists};
use crate::view::View;
use std::fmt;
use std::rc::Rc;
use tessera_component::Component;
use tessera_core::{Config, Mailbox, UiScheduler};

/// Work deferred until the root of the tree has been laid out.
pub type AfterLayoutTask = Box<dyn FnOnce()>;

/// The result of rendering one component.
pub struct Render<M> {
    pub view: View,
    /// Receives every message the subtree emits, if it can emit any.
    pub mailbox: Option<Mailbox<M>>,
    pub after_layout: Option<AfterLayoutTask>,
}

impl<M> Render<M> {
    /// A render result that emits nothing.
    pub fn new(view: View) -> Self {
        Self {
            view,
            mailbox: None,
            after_layout: None,
        }
    }

    pub fn with_mailbox(mut self, mailbox: Mailbox<M>) -> Self {
        self.mailbox = Some(mailbox);
        self
    }

    /// Adds a task that runs after this task's existing ones.
    pub fn with_after_layout(mut self, task: impl FnOnce() + 'static) -> Self {
        self.after_layout = match self.after_layout.take() {
            Some(previous) => Some(Box::new(move || {
                previous();
                task();
            })),
            None => Some(Box::new(task)),
        };
        self
    }
}

impl<M> fmt::Debug for Render<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Render")
            .field("view", &self.view.kind())
            .field("has_mailbox", &self.mailbox.is_some())
            .field("has_after_layout", &self.after_layout.is_some())
            .finish()
    }
}

/// Collaborators shared by every renderer of one presentation.
pub struct RenderContext<M> {
    pub layout_engine: Rc<dyn LayoutEngine>,
    pub custom_components: Rc<dyn CustomComponentRenderer<M>>,
    pub scheduler: UiScheduler,
    pub config: Rc<Config>,
}

impl<M: 'static> RenderContext<M> {
    /// A context with flexbox layout and no custom components.
    pub fn new(config: Config) -> Self {
        Self {
            layout_engine: Rc::new(TaffyLayoutEngine::new(config.text.clone())),
            custom_components: Rc::new(VoidCustomComponentRenderer),
            scheduler: UiScheduler::new(),
            config: Rc::new(config),
        }
    }

    pub fn with_custom_components(
        mut self,
        custom_components: impl CustomComponentRenderer<M> + 'static,
    ) -> Self {
        self.custom_components = Rc::new(custom_components);
        self
    }

    pub fn with_layout_engine(mut self, layout_engine: impl LayoutEngine + 'static) -> Self {
        self.layout_engine = Rc::new(layout_engine);
        self
    }

    pub fn with_scheduler(mut self, scheduler: UiScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }
}

impl<M> Clone for RenderContext<M> {
    fn clone(&self) -> Self {
        Self {
            layout_engine: Rc::clone(&self.layout_engine),
            custom_components: Rc::clone(&self.custom_components),
            scheduler: self.scheduler.clone(),
            config: Rc::clone(&self.config),
        }
    }
}

/// Materializes `component` and wires its interactions to a mailbox.
///
/// Geometry is not computed here; see [`crate::ComponentRenderer`].
pub fn render_component<M: Clone + 'static>(
    component: Component<M>,
    context: &RenderContext<M>,
) -> Render<M> {
    match component {
        Component::Button(properties, style, layout) => {
            controls::button(properties, style, layout, context)
        }
        Component::Label(properties, style, layout) => {
            display::label(properties, style, layout, context)
        }
        Component::TextField(properties, style, layout) => {
            controls::text_field(properties, style, layout, context)
        }
        Component::MapView(properties, style, layout) => {
            display::map_view(properties, style, layout, context)
        }
        Component::ImageView(image, style, layout) => {
            display::image_view(image, style, layout, context)
        }
        Component::Container(children, style, layout) => {
            container::container(children, style, layout, context)
        }
        Component::Table(properties, style, layout) => {
            lists::table(properties, style, layout, context)
        }
        Component::Collection(properties, style, layout) => {
            lists::collection(properties, style, layout, context)
        }
        Component::Carousel(properties, style, layout) => {
            lists::carousel(properties, style, layout, context)
        }
        Component::Segmented(properties, style, layout) => {
            controls::segmented(properties, style, layout, context)
        }
        Component::Progress(counter, style, layout) => {
            display::progress(counter, style, layout, context)
        }
        Component::Spinner(is_active, style, layout) => {
            display::spinner(is_active, style, layout, context)
        }
        Component::Touchable(gesture, child) => container::touchable(gesture, *child, context),
        Component::Custom(identifier, style, layout) => {
            container::custom(identifier, style, layout, context)
        }
    }
}
