//! Layout hints.
//!
//! A [`Layout`] is a flexbox description attached to every component. The
//! component model never computes geometry from it; the layout engine in
//! `tessera-render` reads it when the tree is materialized.

use serde::{Deserialize, Serialize};

/// A size along one axis: an exact value and/or bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dimension {
    pub value: Option<f32>,
    pub minimum: Option<f32>,
    pub maximum: Option<f32>,
}

impl Dimension {
    /// An exact size.
    pub fn fixed(value: f32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// Content-driven size capped at `maximum`.
    pub fn at_most(maximum: f32) -> Self {
        Self {
            maximum: Some(maximum),
            ..Self::default()
        }
    }

    /// Content-driven size of at least `minimum`.
    pub fn at_least(minimum: f32) -> Self {
        Self {
            minimum: Some(minimum),
            ..Self::default()
        }
    }

    pub fn between(minimum: f32, maximum: f32) -> Self {
        Self {
            value: None,
            minimum: Some(minimum),
            maximum: Some(maximum),
        }
    }

    /// The exact value if set, otherwise the maximum.
    ///
    /// This is what a list uses as the provisional size of an item before
    /// the item has been laid out.
    pub fn declared(&self) -> Option<f32> {
        self.value.or(self.maximum)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlexDirection {
    #[default]
    Column,
    ColumnReverse,
    Row,
    RowReverse,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
    Baseline,
}

/// Flex container and item attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flex {
    pub direction: FlexDirection,
    pub grow: f32,
    pub shrink: f32,
    pub basis: Option<f32>,
    pub wrap: bool,
}

impl Flex {
    pub fn grow(grow: f32) -> Self {
        Self {
            grow,
            ..Self::default()
        }
    }

    pub fn row() -> Self {
        Self {
            direction: FlexDirection::Row,
            ..Self::default()
        }
    }
}

impl Default for Flex {
    fn default() -> Self {
        Self {
            direction: FlexDirection::Column,
            grow: 0.0,
            shrink: 1.0,
            basis: None,
            wrap: false,
        }
    }
}

/// Insets on four sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Edges {
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Layout hints for one component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub flex: Flex,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub margin: Option<Edges>,
    pub padding: Option<Edges>,
    pub justify_content: Option<JustifyContent>,
    pub align_items: Option<Alignment>,
    pub align_self: Option<Alignment>,
    pub aspect_ratio: Option<f32>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flex(mut self, flex: Flex) -> Self {
        self.flex = flex;
        self
    }

    pub fn with_width(mut self, width: Dimension) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: Dimension) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_justify_content(mut self, justify: JustifyContent) -> Self {
        self.justify_content = Some(justify);
        self
    }

    pub fn with_align_items(mut self, align: Alignment) -> Self {
        self.align_items = Some(align);
        self
    }

    pub fn with_align_self(mut self, align: Alignment) -> Self {
        self.align_self = Some(align);
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: f32) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }
}
