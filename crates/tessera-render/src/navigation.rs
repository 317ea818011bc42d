//! Navigation stacks: screens under a shared navigation bar.
//!
//! Only the top screen is attached to the navigation view. The bar shows
//! the top screen's title and, below the root, a back button that pops.
//! A title given as a component is rendered like any other component and
//! its messages are delivered through the top screen's mailbox.

use crate::geometry::Frame;
use crate::render::RenderContext;
use crate::renderer::{ComponentRenderer, Renderer};
use crate::screen::ScreenController;
use crate::view::{View, ViewContent, ViewKind};
use crate::{ControlEvent, RenderError, RenderResult};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tessera_component::{
    Component, LabelProperties, LabelStyleSheet, Layout, NavigationBar, NavigationBarStyleSheet,
    NavigationBarTitle, TextAlignment, image_view, label_with, style_sheet,
};

const BACK_BUTTON_WIDTH: f32 = 80.0;
const BACK_BUTTON_TITLE: &str = "Back";

struct Entry<M> {
    screen: Rc<ScreenController<M>>,
    bar: NavigationBar<M>,
}

pub struct NavigationController<M> {
    this: Weak<Self>,
    view: View,
    bar: View,
    title: ComponentRenderer<M>,
    back_button: RefCell<Option<View>>,
    context: RenderContext<M>,
    stack: RefCell<Vec<Entry<M>>>,
}

impl<M: Clone + 'static> NavigationController<M> {
    /// Creates an empty stack filling `frame`.
    pub fn new(frame: Frame, context: RenderContext<M>) -> Rc<Self> {
        let status_bar_height = context.config.renderer.status_bar_height;
        let bar_height = context.config.renderer.navigation_bar_height;

        let view = View::with_frame(ViewKind::Plain, frame);
        let bar = View::with_frame(
            ViewKind::NavigationBar,
            Frame::new(0.0, status_bar_height, frame.width, bar_height),
        );
        let title_view = View::with_frame(
            ViewKind::Plain,
            Frame::new(
                BACK_BUTTON_WIDTH,
                0.0,
                (frame.width - 2.0 * BACK_BUTTON_WIDTH).max(0.0),
                bar_height,
            ),
        );
        bar.add_subview(&title_view);
        view.add_subview(&bar);

        Rc::new_cyclic(|this: &Weak<Self>| Self {
            this: this.clone(),
            view,
            bar,
            title: ComponentRenderer::new(title_view, context.clone()),
            back_button: RefCell::new(None),
            context,
            stack: RefCell::new(Vec::new()),
        })
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn bar(&self) -> &View {
        &self.bar
    }

    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    pub fn top(&self) -> Option<Rc<ScreenController<M>>> {
        self.stack
            .borrow()
            .last()
            .map(|entry| Rc::clone(&entry.screen))
    }

    /// The area left for screens below the status and navigation bars.
    pub fn screen_frame(&self) -> Frame {
        let renderer = &self.context.config.renderer;
        self.view
            .bounds()
            .inset_top(renderer.status_bar_height + renderer.navigation_bar_height)
    }

    /// Pushes an empty screen titled by `bar` and returns it for rendering.
    pub fn push(&self, bar: NavigationBar<M>) -> RenderResult<Rc<ScreenController<M>>> {
        let screen = Rc::new(ScreenController::new(
            self.screen_frame(),
            self.context.clone(),
        ));
        if let Some(previous) = self.top() {
            previous.view().remove_from_superview();
        }
        self.view.add_subview(screen.view());
        self.stack.borrow_mut().push(Entry {
            screen: Rc::clone(&screen),
            bar,
        });
        self.update_bar()?;

        tracing::debug!(depth = self.depth(), "Pushed screen");
        Ok(screen)
    }

    /// Pops the top screen. The root screen cannot be popped.
    pub fn pop(&self) -> RenderResult<Rc<ScreenController<M>>> {
        if self.depth() <= 1 {
            return Err(RenderError::EmptyNavigationStack);
        }
        let entry = self
            .stack
            .borrow_mut()
            .pop()
            .ok_or(RenderError::EmptyNavigationStack)?;
        entry.screen.view().remove_from_superview();
        if let Some(top) = self.top() {
            self.view.add_subview(top.view());
        }
        self.update_bar()?;

        tracing::debug!(depth = self.depth(), "Popped screen");
        Ok(entry.screen)
    }

    fn update_bar(&self) -> RenderResult<()> {
        let (title, style, hide_back_button_title, screen) = {
            let stack = self.stack.borrow();
            let Some(entry) = stack.last() else {
                return Ok(());
            };
            (
                entry.bar.properties.title.clone(),
                entry.bar.style.clone(),
                entry.bar.properties.hide_back_button_title,
                Rc::clone(&entry.screen),
            )
        };

        self.bar.set_base_style(style.base.clone());
        self.bar.set_component_style(&style.component);

        let mailbox = self.title.render(title_component(title, &style.component))?;
        mailbox.forward(screen.mailbox());

        self.update_back_button(hide_back_button_title);
        Ok(())
    }

    fn update_back_button(&self, hide_title: bool) {
        if let Some(button) = self.back_button.borrow_mut().take() {
            button.remove_from_superview();
        }
        if self.depth() < 2 {
            return;
        }

        let button = View::with_frame(
            ViewKind::Button,
            Frame::new(0.0, 0.0, BACK_BUTTON_WIDTH, self.bar.frame().height),
        );
        button.set_content(ViewContent::Button {
            title: (!hide_title).then(|| BACK_BUTTON_TITLE.to_string()),
            icon: None,
            is_highlighted: false,
        });
        let this = self.this.clone();
        button.on(ControlEvent::Tap, move |_| {
            if let Some(navigation) = this.upgrade() {
                if let Err(error) = navigation.pop() {
                    tracing::error!(%error, "Back button failed to pop");
                }
            }
        });
        self.bar.add_subview(&button);
        *self.back_button.borrow_mut() = Some(button);
    }
}

fn title_component<M>(
    title: NavigationBarTitle<M>,
    style: &NavigationBarStyleSheet,
) -> Component<M> {
    match title {
        NavigationBarTitle::Text(text) => label_with(
            LabelProperties::new(text),
            style_sheet(|_, label: &mut LabelStyleSheet| {
                label.text_color = style.title_text_color;
                label.text_font = style.title_text_font.clone();
                label.text_size = style.title_text_size;
                label.text_alignment = TextAlignment::Center;
            }),
            Layout::default(),
        ),
        NavigationBarTitle::Image(image) => image_view(image),
        NavigationBarTitle::Component(component) => component,
    }
}
