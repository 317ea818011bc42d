//! Virtualized lists: tables, collections and carousels.
//!
//! A list host view only ever contains cells for the items that intersect
//! its viewport (plus the configured overscan). Items are described by
//! lazy renderers, so an item's component is produced when a cell is
//! bound to it, not when the list is built.
//!
//! ## Cell reuse
//!
//! Cells are pooled by their item's reuse identifier. A cell that scrolls
//! out of view goes back to its pool and is handed to the next item with
//! the same identifier, which re-renders the cell from scratch.
//!
//! Each cell has one mailbox for its whole life. The content rendered into
//! it forwards into that mailbox on every bind, and the cell mailbox is
//! forwarded into the list's mailbox exactly once, when the cell first
//! enters the list.
//!
//! ## Learning: Rc::new_cyclic
//!
//! Controllers hand closures to their cells (tap handling) that need to
//! call back into the controller. Building the controller with
//! `Rc::new_cyclic` gives it a `Weak` to itself up front, so those
//! closures never keep the controller alive on their own.

mod carousel;
mod cell;
mod collection;
mod height_cache;
mod host;
mod table;

pub use carousel::CarouselController;
pub use cell::{CellPool, ListCell};
pub use collection::CollectionController;
pub use height_cache::HeightCache;
pub use table::TableController;
