//! One screen: a view, the renderer that fills it and a mailbox that
//! outlives every render.
//!
//! Component mailboxes are rebuilt on every render. The screen mailbox is
//! not, so whoever listens to a screen subscribes once and keeps receiving
//! messages across re-renders.

use crate::RenderResult;
use crate::geometry::Frame;
use crate::render::RenderContext;
use crate::renderer::{ComponentRenderer, Renderer};
use crate::view::{View, ViewKind};
use std::cell::RefCell;
use std::collections::HashSet;
use tessera_component::Component;
use tessera_core::Mailbox;

pub struct ScreenController<M> {
    view: View,
    renderer: ComponentRenderer<M>,
    mailbox: Mailbox<M>,
    initialized: RefCell<HashSet<String>>,
}

impl<M: Clone + 'static> ScreenController<M> {
    pub fn new(frame: Frame, context: RenderContext<M>) -> Self {
        let view = View::with_frame(ViewKind::Screen, frame);
        Self {
            renderer: ComponentRenderer::new(view.clone(), context),
            view,
            mailbox: Mailbox::new(),
            initialized: RefCell::new(HashSet::new()),
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Receives the messages of every render of this screen.
    pub fn mailbox(&self) -> &Mailbox<M> {
        &self.mailbox
    }

    pub fn renderer(&self) -> &ComponentRenderer<M> {
        &self.renderer
    }

    /// Moves the screen. Takes effect on the next render.
    pub fn set_frame(&self, frame: Frame) {
        self.view.set_frame(frame);
    }

    /// Identifiers whose custom initialization has run on this screen.
    pub fn initialized_identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.initialized.borrow().iter().cloned().collect();
        identifiers.sort();
        identifiers
    }

    fn initialize_custom_components(&self, component: &Component<M>) {
        let custom_components = &self.renderer.context().custom_components;
        for identifier in component.custom_component_identifiers() {
            if self.initialized.borrow_mut().insert(identifier.clone()) {
                tracing::debug!(identifier = %identifier, "Initializing custom component");
                custom_components.handle_initialization(&self.view, &identifier);
            }
        }
    }
}

impl<M: Clone + 'static> Renderer<M> for ScreenController<M> {
    /// Rebuilds the screen from `component` and returns the screen mailbox.
    fn render(&self, component: Component<M>) -> RenderResult<Mailbox<M>> {
        self.initialize_custom_components(&component);
        let mailbox = self.renderer.render(component)?;
        mailbox.forward(&self.mailbox);
        Ok(self.mailbox.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::custom::CustomComponentRegistry;
    use std::rc::Rc;
    use tessera_component::{ButtonProperties, button, container, custom};
    use tessera_core::Config;

    fn record<M: Clone + 'static>(mailbox: &Mailbox<M>) -> Rc<RefCell<Vec<M>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mailbox.subscribe(move |message: &M| sink.borrow_mut().push(message.clone()));
        log
    }

    #[test]
    fn test_screen_mailbox_survives_rerender() {
        let screen = ScreenController::new(
            Frame::sized(320.0, 480.0),
            RenderContext::new(Config::default()),
        );
        let first = screen
            .render(button(ButtonProperties::new("one").on_tap(1)))
            .unwrap();
        let log = record(&first);

        let second = screen
            .render(button(ButtonProperties::new("two").on_tap(2)))
            .unwrap();
        assert!(first.ptr_eq(&second));

        screen.view().find_by_text("two").unwrap().simulate_tap();
        assert_eq!(*log.borrow(), vec![2]);
    }

    #[test]
    fn test_custom_initialization_runs_once_per_identifier() {
        let initialized = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CustomComponentRegistry::<()>::new();
        for identifier in ["chart", "badge"] {
            let initialized = Rc::clone(&initialized);
            registry.register_with_initializer(
                identifier,
                move |_screen: &View| initialized.borrow_mut().push(identifier),
                |_view: &View, _mailbox: &Mailbox<()>| {},
            );
        }
        let context = RenderContext::new(Config::default()).with_custom_components(registry);
        let screen = ScreenController::new(Frame::sized(100.0, 100.0), context);

        screen
            .render(container(vec![custom("chart"), custom("chart")]))
            .unwrap();
        screen
            .render(container(vec![custom("badge"), custom("chart")]))
            .unwrap();

        assert_eq!(*initialized.borrow(), vec!["chart", "badge"]);
        assert_eq!(screen.initialized_identifiers(), vec!["badge", "chart"]);
    }
}
