//! Tessera Component - Declarative UI trees
//!
//! A [`Component<M>`] describes a piece of UI that can emit messages of
//! type `M`. Trees are plain values: they are built with the constructor
//! functions in this crate, never mutated, and adapted to another message
//! type with [`Component::map`].
//!
//! ```text
//! container(vec![
//!     label("Count: 3"),
//!     button(ButtonProperties::new("+").on_tap(Msg::Increment)),
//! ])
//! ```
//!
//! ## Learning: Generic Message Types
//!
//! Components are generic over the message type instead of storing
//! callbacks. A library can build its widgets with its own message enum
//! and the application lifts them into its own with `map`, the same way
//! `Option::map` lifts a value.

pub mod component;
pub mod layout;
pub mod properties;
pub mod root;
pub mod style;

pub use component::{
    Component, ComponentKind, container, container_with, custom, custom_with, image_view,
    image_view_with, progress, progress_with, spinner, spinner_with,
};
pub use layout::{Alignment, Dimension, Edges, Flex, FlexDirection, JustifyContent, Layout};
pub use properties::*;
pub use root::{
    NavigationBar, NavigationBarProperties, NavigationBarTitle, RootComponent, TabBar,
    navigation_bar,
};
pub use style::{
    BaseStyleSheet, ButtonStyleSheet, Color, EmptyStyleSheet, Font, Image, LabelStyleSheet,
    NavigationBarStyleSheet, ProgressStyleSheet, SegmentedStyleSheet, SpinnerStyleSheet,
    StyleSheet, TableStyleSheet, TextAlignment, TextFieldStyleSheet, base_style_sheet,
    style_sheet,
};

pub use tessera_core::{ProgressCounter, ShiftOperation, ZipList};
