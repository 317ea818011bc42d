//! The component manager: owns the window and decides which screen is
//! visible.
//!
//! Two layers can be presented: the root and, above it, an optional modal.
//! Each layer is a single screen or a navigation stack, chosen by whether
//! the root component carries a navigation bar.
//!
//! ## Learning: One Mailbox for the Application
//!
//! Screens come and go, but the application subscribes exactly once, to
//! [`ComponentManager::mailbox`]. Every screen forwards into it as soon as
//! it is created, and only then, so a message is never delivered twice no
//! matter how often a screen is re-rendered.

use crate::geometry::Frame;
use crate::navigation::NavigationController;
use crate::render::RenderContext;
use crate::renderer::Renderer;
use crate::screen::ScreenController;
use crate::view::{View, ViewKind};
use crate::{RenderError, RenderResult};
use std::cell::RefCell;
use std::rc::Rc;
use tessera_component::{Component, NavigationBar, NavigationBarTitle, RootComponent};
use tessera_core::{Config, Mailbox};

/// How [`ComponentManager::present`] installs a root component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentationMode {
    /// Replaces the root layer.
    #[default]
    Replace,
    /// Pushes onto the visible navigation stack, or replaces the root when
    /// there is none.
    Push,
    /// Presents above the root, dismissing any previous modal.
    Modal,
}

enum Presented<M> {
    Screen(Rc<ScreenController<M>>),
    Navigation(Rc<NavigationController<M>>),
}

impl<M: Clone + 'static> Presented<M> {
    fn view(&self) -> View {
        match self {
            Presented::Screen(screen) => screen.view().clone(),
            Presented::Navigation(navigation) => navigation.view().clone(),
        }
    }

    fn visible_screen(&self) -> Option<Rc<ScreenController<M>>> {
        match self {
            Presented::Screen(screen) => Some(Rc::clone(screen)),
            Presented::Navigation(navigation) => navigation.top(),
        }
    }
}

pub struct ComponentManager<M> {
    window: View,
    context: RenderContext<M>,
    mailbox: Mailbox<M>,
    root: RefCell<Option<Presented<M>>>,
    modal: RefCell<Option<Presented<M>>>,
}

impl<M: Clone + 'static> ComponentManager<M> {
    /// A manager with a window sized by `config`.
    pub fn new(config: Config) -> Self {
        Self::with_context(RenderContext::new(config))
    }

    pub fn with_context(context: RenderContext<M>) -> Self {
        let renderer = &context.config.renderer;
        let window = View::with_frame(
            ViewKind::Window,
            Frame::sized(renderer.window_width, renderer.window_height),
        );
        Self {
            window,
            context,
            mailbox: Mailbox::new(),
            root: RefCell::new(None),
            modal: RefCell::new(None),
        }
    }

    pub fn window(&self) -> &View {
        &self.window
    }

    pub fn context(&self) -> &RenderContext<M> {
        &self.context
    }

    /// Receives the messages of every screen this manager presents.
    pub fn mailbox(&self) -> &Mailbox<M> {
        &self.mailbox
    }

    /// Presents `root` and renders its component.
    ///
    /// Returns the mailbox of the new screen.
    pub fn present(&self, root: RootComponent<M>, mode: PresentationMode) -> RenderResult<Mailbox<M>> {
        if matches!(root, RootComponent::WithTabBar(..)) {
            tracing::error!("Tab bar root components are not supported");
            return Err(RenderError::UnsupportedRoot("tab bar"));
        }

        let (bar, component) = root.into_parts();
        let screen = match mode {
            PresentationMode::Replace => self.install(bar, false)?,
            PresentationMode::Modal => self.install(bar, true)?,
            PresentationMode::Push => match self.visible_navigation() {
                Some(navigation) => navigation.push(bar.unwrap_or_else(untitled_bar))?,
                None => {
                    tracing::debug!("No navigation stack to push onto, replacing the root");
                    self.install(bar, false)?
                }
            },
        };
        screen.mailbox().forward(&self.mailbox);

        tracing::debug!(?mode, "Presented root component");
        screen.render(component)
    }

    /// Re-renders the visible screen with `component`.
    pub fn render(&self, component: Component<M>) -> RenderResult<Mailbox<M>> {
        self.visible_screen()
            .ok_or(RenderError::NoVisibleScreen)?
            .render(component)
    }

    /// The top screen of the modal if there is one, of the root otherwise.
    pub fn visible_screen(&self) -> Option<Rc<ScreenController<M>>> {
        if let Some(modal) = self.modal.borrow().as_ref() {
            return modal.visible_screen();
        }
        self.root
            .borrow()
            .as_ref()
            .and_then(|root| root.visible_screen())
    }

    pub fn has_modal(&self) -> bool {
        self.modal.borrow().is_some()
    }

    /// Removes the modal. Returns false if none was presented.
    pub fn dismiss_modal(&self) -> bool {
        let Some(modal) = self.modal.borrow_mut().take() else {
            return false;
        };
        modal.view().remove_from_superview();
        tracing::debug!("Dismissed modal");
        true
    }

    /// Pops the visible navigation stack.
    pub fn pop(&self) -> RenderResult<Rc<ScreenController<M>>> {
        self.visible_navigation()
            .ok_or(RenderError::EmptyNavigationStack)?
            .pop()
    }

    /// Runs the work deferred to the next UI cycle.
    pub fn run_pending_tasks(&self) -> usize {
        self.context.scheduler.run_pending()
    }

    fn visible_navigation(&self) -> Option<Rc<NavigationController<M>>> {
        let modal = self.modal.borrow();
        let root = self.root.borrow();
        match modal.as_ref().or(root.as_ref()) {
            Some(Presented::Navigation(navigation)) => Some(Rc::clone(navigation)),
            Some(Presented::Screen(_)) | None => None,
        }
    }

    /// Creates a layer for `bar` and puts it in the root or modal slot.
    fn install(
        &self,
        bar: Option<NavigationBar<M>>,
        modal: bool,
    ) -> RenderResult<Rc<ScreenController<M>>> {
        let frame = self.window.bounds();
        let (presented, screen) = match bar {
            Some(bar) => {
                let navigation = NavigationController::new(frame, self.context.clone());
                let screen = navigation.push(bar)?;
                (Presented::Navigation(navigation), screen)
            }
            None => {
                let screen = Rc::new(ScreenController::new(frame, self.context.clone()));
                (Presented::Screen(Rc::clone(&screen)), screen)
            }
        };

        let slot = if modal { &self.modal } else { &self.root };
        if let Some(previous) = slot.borrow_mut().take() {
            previous.view().remove_from_superview();
        }
        self.window.add_subview(&presented.view());
        *slot.borrow_mut() = Some(presented);

        // keep the modal above a replaced root
        if !modal {
            if let Some(modal) = self.modal.borrow().as_ref() {
                let view = modal.view();
                view.remove_from_superview();
                self.window.add_subview(&view);
            }
        }
        Ok(screen)
    }
}

fn untitled_bar<M>() -> NavigationBar<M> {
    NavigationBar::new(NavigationBarTitle::Text(String::new()))
}
