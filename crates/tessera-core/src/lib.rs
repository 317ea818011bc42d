//! # Tessera Core
//!
//! Shared primitives used by every other tessera crate.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      tessera-core                         │
//! │  ┌───────────┐  ┌───────────┐  ┌────────────────────────┐│
//! │  │  Mailbox  │  │  ZipList  │  │  UiScheduler (deferred) ││
//! │  └───────────┘  └───────────┘  └────────────────────────┘│
//! │  ┌─────────────────┐  ┌──────────────────────────────┐   │
//! │  │ ProgressCounter │  │ Config (renderer/lists/text) │   │
//! │  └─────────────────┘  └──────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Learning: Single-Threaded Shared State
//!
//! Everything in this crate that is shared (`Mailbox`, `UiScheduler`) is
//! built on `Rc` + `RefCell`/`Cell` rather than `Arc` + `Mutex`. The types
//! are deliberately `!Send`: the compiler enforces that all rendering and
//! message dispatch stays on the UI thread.

pub mod config;
pub mod mailbox;
pub mod progress;
pub mod scheduler;
pub mod zip_list;

pub use config::{Config, ConfigError, ListConfig, LoggingConfig, RendererConfig, TextConfig};
pub use mailbox::Mailbox;
pub use progress::ProgressCounter;
pub use scheduler::UiScheduler;
pub use zip_list::{ShiftOperation, ZipList};
