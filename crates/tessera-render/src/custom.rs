//! Host-supplied rendering for `custom` components.
//!
//! The renderer is closed over its own component kinds. Anything else is
//! declared as `custom("identifier")` and rendered by a
//! [`CustomComponentRenderer`] the application hands to the
//! [`RenderContext`](crate::RenderContext).

use crate::view::View;
use std::collections::HashMap;
use std::fmt;
use tessera_core::Mailbox;

/// Renders custom components by identifier.
pub trait CustomComponentRenderer<M> {
    /// Called once per screen for each identifier the screen declares,
    /// before the first render that contains it.
    fn handle_initialization(&self, screen: &View, identifier: &str);

    /// Fills `view` for `identifier`. Messages go into `mailbox`.
    fn render_component(&self, identifier: &str, view: &View, mailbox: &Mailbox<M>);
}

/// Renders nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidCustomComponentRenderer;

impl<M> CustomComponentRenderer<M> for VoidCustomComponentRenderer {
    fn handle_initialization(&self, _screen: &View, _identifier: &str) {}

    fn render_component(&self, _identifier: &str, _view: &View, _mailbox: &Mailbox<M>) {}
}

type RenderHandler<M> = Box<dyn Fn(&View, &Mailbox<M>)>;
type InitializationHandler = Box<dyn Fn(&View)>;

struct Registration<M> {
    render: RenderHandler<M>,
    initialize: Option<InitializationHandler>,
}

/// A [`CustomComponentRenderer`] backed by closures.
pub struct CustomComponentRegistry<M> {
    registrations: HashMap<String, Registration<M>>,
}

impl<M> CustomComponentRegistry<M> {
    pub fn new() -> Self {
        Self {
            registrations: HashMap::new(),
        }
    }

    /// Registers the renderer for `identifier`, replacing any previous one.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        render: impl Fn(&View, &Mailbox<M>) + 'static,
    ) -> &mut Self {
        self.registrations.insert(
            identifier.into(),
            Registration {
                render: Box::new(render),
                initialize: None,
            },
        );
        self
    }

    /// Like [`register`](Self::register), with a per-screen initializer.
    pub fn register_with_initializer(
        &mut self,
        identifier: impl Into<String>,
        initialize: impl Fn(&View) + 'static,
        render: impl Fn(&View, &Mailbox<M>) + 'static,
    ) -> &mut Self {
        self.registrations.insert(
            identifier.into(),
            Registration {
                render: Box::new(render),
                initialize: Some(Box::new(initialize)),
            },
        );
        self
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.registrations.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<M> Default for CustomComponentRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for CustomComponentRegistry<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut identifiers: Vec<_> = self.registrations.keys().collect();
        identifiers.sort();
        f.debug_struct("CustomComponentRegistry")
            .field("identifiers", &identifiers)
            .finish()
    }
}

impl<M> CustomComponentRenderer<M> for CustomComponentRegistry<M> {
    fn handle_initialization(&self, screen: &View, identifier: &str) {
        if let Some(initialize) = self
            .registrations
            .get(identifier)
            .and_then(|registration| registration.initialize.as_ref())
        {
            tracing::debug!(identifier, "Initializing custom component for screen");
            initialize(screen);
        }
    }

    fn render_component(&self, identifier: &str, view: &View, mailbox: &Mailbox<M>) {
        match self.registrations.get(identifier) {
            Some(registration) => (registration.render)(view, mailbox),
            None => tracing::warn!(identifier, "No renderer registered for custom component"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{ViewContent, ViewKind};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_registry_renders_registered_identifier() {
        let mut registry = CustomComponentRegistry::<()>::new();
        registry.register("title", |view, _| {
            view.set_content(ViewContent::Text {
                text: "custom".to_string(),
            })
        });

        let view = View::new(ViewKind::Custom);
        registry.render_component("title", &view, &Mailbox::new());
        assert_eq!(view.text().as_deref(), Some("custom"));
    }

    #[test]
    fn test_unknown_identifier_leaves_view_untouched() {
        let registry = CustomComponentRegistry::<()>::new();
        let view = View::new(ViewKind::Custom);
        registry.render_component("missing", &view, &Mailbox::new());
        assert!(view.subviews().is_empty());
        assert_eq!(view.content(), ViewContent::Empty);
    }

    #[test]
    fn test_initializer_runs_only_when_registered() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let mut registry = CustomComponentRegistry::<()>::new();
        registry
            .register_with_initializer("map", move |_| counter.set(counter.get() + 1), |_, _| {})
            .register("plain", |_, _| {});

        let screen = View::new(ViewKind::Screen);
        registry.handle_initialization(&screen, "map");
        registry.handle_initialization(&screen, "plain");
        registry.handle_initialization(&screen, "missing");
        assert_eq!(count.get(), 1);
        assert_eq!(registry.len(), 2);
    }
}
