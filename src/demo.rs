//! Demo applications and the loop that drives them.
//!
//! Each demo is an Elm-style app: a state, an `update` function that
//! folds messages into it and a `view` function that describes the whole
//! screen. The [`Runtime`] presents the view once and re-renders after
//! every batch of messages.
//!
//! ## Learning: Queue, Then Update
//!
//! Taps dispatch messages synchronously, in the middle of the renderer's
//! event handling. Updating and re-rendering right there would tear down
//! the view tree that is still delivering the tap. The runtime only
//! queues messages from the mailbox and drains the queue once the tap has
//! returned.

use anyhow::Context;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;
use tessera_component::{
    ButtonProperties, CarouselProperties, Component, Dimension, Flex, LabelProperties, Layout,
    RootComponent, ShiftOperation, StyleSheet, TableProperties, ZipList, button, carousel_item,
    carousel_with, container, container_with, label, label_with, navigation_bar, table_item,
    table_with,
};
use tessera_core::Config;
use tessera_render::{ComponentManager, PresentationMode, View};

/// An application the runtime can drive.
pub trait App {
    type Message: Clone + fmt::Debug + 'static;

    /// Describes the whole screen for the current state.
    fn view(&self) -> RootComponent<Self::Message>;

    fn update(&mut self, message: Self::Message);
}

pub struct Runtime<A: App> {
    app: A,
    manager: ComponentManager<A::Message>,
    queue: Rc<RefCell<VecDeque<A::Message>>>,
}

impl<A: App> Runtime<A> {
    /// Presents the app's first view.
    pub fn start(app: A, config: Config) -> anyhow::Result<Self> {
        let manager = ComponentManager::new(config);
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&queue);
        manager
            .mailbox()
            .subscribe(move |message: &A::Message| sink.borrow_mut().push_back(message.clone()));

        manager.present(app.view(), PresentationMode::Replace)?;
        manager.run_pending_tasks();
        Ok(Self {
            app,
            manager,
            queue,
        })
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn window(&self) -> &View {
        self.manager.window()
    }

    /// Taps the first view showing `text`, then handles the resulting
    /// messages. Returns how many were handled.
    pub fn tap(&mut self, text: &str) -> anyhow::Result<usize> {
        let target = self
            .manager
            .window()
            .find_by_text(text)
            .with_context(|| format!("No view displays {text:?}"))?;
        if !target.simulate_tap() {
            anyhow::bail!("{text:?} does not respond to taps");
        }
        self.process()
    }

    /// Applies every queued message and re-renders once.
    pub fn process(&mut self) -> anyhow::Result<usize> {
        let mut handled = 0;
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(message) = next else { break };
            tracing::info!(?message, "Handling message");
            self.app.update(message);
            handled += 1;
        }

        if handled > 0 {
            let (_, component) = self.app.view().into_parts();
            self.manager.render(component)?;
            self.manager.run_pending_tasks();
        }
        Ok(handled)
    }
}

fn row<M>(children: Vec<Component<M>>) -> Component<M> {
    container_with(children, StyleSheet::default(), Layout::new().with_flex(Flex::row()))
}

// -- Counter --

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMessage {
    Increment,
    Decrement,
    Reset,
}

#[derive(Debug, Default)]
pub struct CounterApp {
    pub count: i64,
}

impl App for CounterApp {
    type Message = CounterMessage;

    fn view(&self) -> RootComponent<CounterMessage> {
        RootComponent::WithNavigationBar(
            navigation_bar("Counter"),
            container(vec![
                label(format!("Count: {}", self.count)),
                row(vec![
                    button(ButtonProperties::new("-").on_tap(CounterMessage::Decrement)),
                    button(ButtonProperties::new("+").on_tap(CounterMessage::Increment)),
                ]),
                button(ButtonProperties::new("Reset").on_tap(CounterMessage::Reset)),
            ]),
        )
    }

    fn update(&mut self, message: CounterMessage) {
        match message {
            CounterMessage::Increment => self.count += 1,
            CounterMessage::Decrement => self.count -= 1,
            CounterMessage::Reset => self.count = 0,
        }
    }
}

// -- Table --

const TABLE_ROW_HEIGHT: u32 = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMessage {
    Select(usize),
}

#[derive(Debug)]
pub struct TableApp {
    pub rows: usize,
    pub selected: Option<usize>,
}

impl Default for TableApp {
    fn default() -> Self {
        Self {
            rows: 1_000,
            selected: None,
        }
    }
}

impl App for TableApp {
    type Message = TableMessage;

    fn view(&self) -> RootComponent<TableMessage> {
        let status = match self.selected {
            Some(row) => format!("Selected: Row {row}"),
            None => "Nothing selected".to_string(),
        };
        let items = (0..self.rows)
            .map(|row| {
                table_item(TABLE_ROW_HEIGHT, "row", move || {
                    label_with(
                        LabelProperties::new(format!("Row {row}")),
                        StyleSheet::default(),
                        Layout::new().with_height(Dimension::fixed(TABLE_ROW_HEIGHT as f32)),
                    )
                })
                .on_tap(TableMessage::Select(row))
            })
            .collect();

        RootComponent::WithNavigationBar(
            navigation_bar("Rows"),
            container(vec![
                label(status),
                table_with(
                    TableProperties::new(items),
                    StyleSheet::default(),
                    Layout::new().with_flex(Flex::grow(1.0)),
                ),
            ]),
        )
    }

    fn update(&mut self, message: TableMessage) {
        match message {
            TableMessage::Select(row) => self.selected = Some(row),
        }
    }
}

// -- Carousel --

const PAGE_WIDTH: u32 = 300;
const PAGE_HEIGHT: u32 = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselMessage {
    Shift(ShiftOperation),
    Viewed(String),
    Open(String),
}

#[derive(Debug)]
pub struct CarouselApp {
    pub pages: ZipList<String>,
    pub viewed: Vec<String>,
    pub opened: Option<String>,
}

impl Default for CarouselApp {
    fn default() -> Self {
        let pages = ["Red", "Green", "Blue", "Yellow", "Purple"]
            .into_iter()
            .map(String::from)
            .collect();
        Self {
            pages: ZipList::from_vec(pages, 0)
                .unwrap_or_else(|| ZipList::singleton("Red".to_string())),
            viewed: Vec::new(),
            opened: None,
        }
    }
}

impl App for CarouselApp {
    type Message = CarouselMessage;

    fn view(&self) -> RootComponent<CarouselMessage> {
        let items = self.pages.clone().map(|name| {
            let title = name.clone();
            carousel_item("page", move || label(title.clone()))
                .on_tap(CarouselMessage::Open(name.clone()))
                .on_scrolled(CarouselMessage::Viewed(name))
        });
        let properties = CarouselProperties::new(Some(items), PAGE_WIDTH, PAGE_HEIGHT)
            .snap_to_cell(true)
            .on_selection_change(|operation| Some(CarouselMessage::Shift(operation)));

        let opened = match &self.opened {
            Some(name) => format!("Opened: {name}"),
            None => "Tap a page to open it".to_string(),
        };

        RootComponent::Simple(container(vec![
            carousel_with(
                properties,
                StyleSheet::default(),
                Layout::new().with_height(Dimension::fixed(PAGE_HEIGHT as f32)),
            ),
            label(format!("Page: {}", self.pages.center())),
            label(opened),
            row(vec![
                button(
                    ButtonProperties::new("Previous")
                        .on_tap(CarouselMessage::Shift(ShiftOperation::Right(1))),
                ),
                button(
                    ButtonProperties::new("Next")
                        .on_tap(CarouselMessage::Shift(ShiftOperation::Left(1))),
                ),
            ]),
        ]))
    }

    fn update(&mut self, message: CarouselMessage) {
        match message {
            CarouselMessage::Shift(operation) => match self.pages.shifted(operation) {
                Some(pages) => self.pages = pages,
                None => tracing::debug!(?operation, "Carousel is already at its edge"),
            },
            CarouselMessage::Viewed(name) => self.viewed.push(name),
            CarouselMessage::Open(name) => self.opened = Some(name),
        }
    }
}
