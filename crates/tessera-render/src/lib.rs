//! # Tessera Render
//!
//! Turns component trees into a tree of [`View`]s and wires every
//! interactive element to a [`Mailbox`](tessera_core::Mailbox).
//!
//! ## Architecture
//!
//! ```text
//! ComponentManager ── present(RootComponent) ──► NavigationController
//!        │                                             │
//!        │ render(Component)                           ▼
//!        └──────────────────────────────────────► ScreenController
//!                                                      │
//!                                                      ▼
//!                                              ComponentRenderer
//!                                   (clear → render → layout → after-layout)
//!                                                      │
//!                        ┌──────────────┬──────────────┼───────────────┐
//!                        ▼              ▼              ▼               ▼
//!                     controls      container      list hosts     custom components
//!                                  (forwarding)  (cells, reuse)
//! ```
//!
//! Every render is a full rebuild. The previous mailbox is cleared and the
//! previous views are detached before the new tree is built.
//!
//! ## Learning: Interior Mutability on One Thread
//!
//! Views, cells and controllers are shared through `Rc` and mutated
//! through `RefCell`/`Cell`. Nothing here is `Send`: the whole render
//! pipeline is confined to the UI thread, the same contract the mailbox
//! has.

pub mod custom;
pub mod dispatcher;
pub mod geometry;
pub mod layout_engine;
pub mod list;
pub mod manager;
pub mod navigation;
pub mod render;
pub mod renderer;
mod renderers;
pub mod screen;
pub mod view;

pub use custom::{CustomComponentRegistry, CustomComponentRenderer, VoidCustomComponentRenderer};
pub use dispatcher::ControlEvent;
pub use geometry::{Frame, Point};
pub use layout_engine::{LayoutEngine, TaffyLayoutEngine};
pub use list::{CarouselController, CellPool, CollectionController, HeightCache, ListCell, TableController};
pub use manager::{ComponentManager, PresentationMode};
pub use navigation::NavigationController;
pub use render::{AfterLayoutTask, Render, RenderContext, render_component};
pub use renderer::{ComponentRenderer, Renderer};
pub use screen::ScreenController;
pub use view::{View, ViewContent, ViewId, ViewKind, ViewSnapshot, WeakView};

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rendering or presenting
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Unsupported root component: {0}")]
    UnsupportedRoot(&'static str),

    #[error("No screen is visible")]
    NoVisibleScreen,

    #[error("Navigation stack cannot be popped below its root screen")]
    EmptyNavigationStack,

    #[error("Layout error: {0}")]
    Layout(#[from] taffy::TaffyError),
}
