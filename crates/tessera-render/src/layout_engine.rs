//! Layout engines.
//!
//! The renderer talks to layout through two calls: [`LayoutEngine::apply`]
//! records a component's layout hints on its view while the tree is being
//! built, and [`LayoutEngine::layout`] computes frames for a finished tree
//! inside a container.
//!
//! [`TaffyLayoutEngine`] implements flexbox with `taffy`. It stops at list
//! hosts (tables, collections, carousels): their cells are positioned by
//! the list controllers, not by flexbox.
//!
//! ## Root sizing
//!
//! The root view always spans the container's width unless its layout
//! fixes a width. Its height is the fixed height if there is one, the
//! content height clamped to the declared bounds if only bounds are given,
//! and the container's height otherwise.

use crate::RenderResult;
use crate::view::{View, ViewContent, ViewKind};
use taffy::{
    AlignItems as TaffyAlignItems, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, FlexWrap, JustifyContent as TaffyJustifyContent,
    LengthPercentage, LengthPercentageAuto, NodeId, Rect, Size, Style, TaffyTree,
};
use tessera_component::{Alignment, Dimension, Edges, FlexDirection, JustifyContent, Layout};
use tessera_core::TextConfig;

/// Computes and applies geometry.
pub trait LayoutEngine {
    /// Records layout hints on a freshly created view.
    fn apply(&self, layout: &Layout, view: &View);

    /// Lays out `view` and its subtree inside `container`.
    fn layout(&self, view: &View, container: &View) -> RenderResult<()>;
}

/// Intrinsic size of spinners.
const SPINNER_SIZE: f32 = 20.0;
/// Intrinsic height of progress bars.
const PROGRESS_HEIGHT: f32 = 2.0;
/// Intrinsic height of segmented controls.
const SEGMENTED_HEIGHT: f32 = 28.0;
/// Horizontal padding inside one segment.
const SEGMENT_PADDING: f32 = 16.0;

/// What a leaf node needs to be measured.
#[derive(Debug, Clone)]
enum Measure {
    Text(String),
    Intrinsic { width: f32, height: f32 },
}

/// Flexbox layout backed by taffy.
#[derive(Debug, Clone, Default)]
pub struct TaffyLayoutEngine {
    text: TextConfig,
}

impl TaffyLayoutEngine {
    pub fn new(text: TextConfig) -> Self {
        Self { text }
    }

    fn build(
        &self,
        tree: &mut TaffyTree<Measure>,
        view: &View,
        nodes: &mut Vec<(View, NodeId)>,
    ) -> RenderResult<NodeId> {
        let style = to_taffy_style(&view.layout());
        let kind = view.kind();

        let node = if kind.hosts_list() || kind == ViewKind::Custom {
            tree.new_leaf(style)?
        } else if let Some(measure) = self.measure_for(view) {
            tree.new_leaf_with_context(style, measure)?
        } else {
            let children = view
                .subviews()
                .iter()
                .map(|subview| self.build(tree, subview, nodes))
                .collect::<RenderResult<Vec<_>>>()?;
            tree.new_with_children(style, &children)?
        };

        nodes.push((view.clone(), node));
        Ok(node)
    }

    fn measure_text(
        &self,
        text: &str,
        known: Size<Option<f32>>,
        available: Size<AvailableSpace>,
    ) -> Size<f32> {
        if text.is_empty() {
            return Size {
                width: known.width.unwrap_or(0.0),
                height: known.height.unwrap_or(0.0),
            };
        }

        let natural_width = self.text_width(text);
        let longest_word = text
            .split_whitespace()
            .map(|word| self.text_width(word))
            .fold(0.0, f32::max);

        let max_width = match available.width {
            AvailableSpace::Definite(width) => width,
            AvailableSpace::MinContent => longest_word,
            AvailableSpace::MaxContent => natural_width,
        };
        let width = known.width.unwrap_or(natural_width.min(max_width));
        let lines = if width > 0.0 {
            (natural_width / width).ceil().max(1.0)
        } else {
            1.0
        };

        Size {
            width,
            height: known.height.unwrap_or(lines * self.text.line_height),
        }
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.text.char_width
    }

    fn measure_for(&self, view: &View) -> Option<Measure> {
        match view.content() {
            ViewContent::Text { text } => Some(Measure::Text(text)),
            ViewContent::Button { title, icon, .. } => match (title, icon) {
                (Some(title), _) => Some(Measure::Text(title)),
                (None, Some(icon)) => Some(Measure::Intrinsic {
                    width: icon.width,
                    height: icon.height,
                }),
                (None, None) => Some(Measure::Text(String::new())),
            },
            ViewContent::TextField {
                text, placeholder, ..
            } => {
                let shown = if text.is_empty() {
                    placeholder.unwrap_or_default()
                } else {
                    text
                };
                // an empty field stays one line tall
                Some(Measure::Text(if shown.is_empty() {
                    " ".to_string()
                } else {
                    shown
                }))
            }
            ViewContent::Image { image } => Some(Measure::Intrinsic {
                width: image.width,
                height: image.height,
            }),
            ViewContent::Segments { titles, .. } => Some(Measure::Intrinsic {
                width: titles
                    .iter()
                    .map(|title| self.text_width(title) + SEGMENT_PADDING)
                    .sum(),
                height: SEGMENTED_HEIGHT,
            }),
            ViewContent::Progress { .. } => Some(Measure::Intrinsic {
                width: 0.0,
                height: PROGRESS_HEIGHT,
            }),
            ViewContent::Spinner { .. } => Some(Measure::Intrinsic {
                width: SPINNER_SIZE,
                height: SPINNER_SIZE,
            }),
            ViewContent::Map { .. } | ViewContent::Custom { .. } | ViewContent::Empty => None,
        }
    }
}

impl LayoutEngine for TaffyLayoutEngine {
    fn apply(&self, layout: &Layout, view: &View) {
        view.set_layout(layout.clone());
    }

    fn layout(&self, view: &View, container: &View) -> RenderResult<()> {
        let bounds = container.bounds();
        let mut tree: TaffyTree<Measure> = TaffyTree::new();
        let mut nodes = Vec::new();
        let root = self.build(&mut tree, view, &mut nodes)?;

        let hints = view.layout();
        let mut root_style = tree.style(root)?.clone();
        if !has_value(hints.width) {
            root_style.size.width = TaffyDimension::Length(bounds.width);
        }
        let height_is_bounded = hints
            .height
            .is_some_and(|height| height.minimum.is_some() || height.maximum.is_some());
        if !has_value(hints.height) && !height_is_bounded {
            root_style.size.height = TaffyDimension::Length(bounds.height);
        }
        tree.set_style(root, root_style)?;

        let available = Size {
            width: AvailableSpace::Definite(bounds.width),
            height: AvailableSpace::Definite(bounds.height),
        };
        tree.compute_layout_with_measure(
            root,
            available,
            |known, available, _node, context: Option<&mut Measure>, _style| match context {
                Some(Measure::Text(text)) => self.measure_text(text, known, available),
                Some(Measure::Intrinsic { width, height }) => Size {
                    width: known.width.unwrap_or(*width),
                    height: known.height.unwrap_or(*height),
                },
                None => Size::ZERO,
            },
        )?;

        for (view, node) in &nodes {
            let layout = tree.layout(*node)?;
            view.set_frame(crate::geometry::Frame::new(
                layout.location.x,
                layout.location.y,
                layout.size.width,
                layout.size.height,
            ));
        }

        tracing::trace!(nodes = nodes.len(), width = bounds.width, "Laid out view tree");
        Ok(())
    }
}

fn has_value(dimension: Option<Dimension>) -> bool {
    dimension.is_some_and(|dimension| dimension.value.is_some())
}

/// Converts layout hints into a taffy style.
fn to_taffy_style(layout: &Layout) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: to_taffy_flex_direction(layout.flex.direction),
        flex_wrap: if layout.flex.wrap {
            FlexWrap::Wrap
        } else {
            FlexWrap::NoWrap
        },
        flex_grow: layout.flex.grow,
        flex_shrink: layout.flex.shrink,
        flex_basis: layout
            .flex
            .basis
            .map_or(TaffyDimension::Auto, TaffyDimension::Length),
        justify_content: layout.justify_content.map(to_taffy_justify_content),
        align_items: layout.align_items.map(to_taffy_alignment),
        align_self: layout.align_self.map(to_taffy_alignment),
        size: Size {
            width: to_taffy_dimension(layout.width.and_then(|d| d.value)),
            height: to_taffy_dimension(layout.height.and_then(|d| d.value)),
        },
        min_size: Size {
            width: to_taffy_dimension(layout.width.and_then(|d| d.minimum)),
            height: to_taffy_dimension(layout.height.and_then(|d| d.minimum)),
        },
        max_size: Size {
            width: to_taffy_dimension(layout.width.and_then(|d| d.maximum)),
            height: to_taffy_dimension(layout.height.and_then(|d| d.maximum)),
        },
        margin: layout.margin.map_or(Rect::zero(), to_taffy_margin),
        padding: layout.padding.map_or(Rect::zero(), to_taffy_padding),
        aspect_ratio: layout.aspect_ratio,
        ..Default::default()
    }
}

fn to_taffy_dimension(value: Option<f32>) -> TaffyDimension {
    value.map_or(TaffyDimension::Auto, TaffyDimension::Length)
}

fn to_taffy_margin(edges: Edges) -> Rect<LengthPercentageAuto> {
    Rect {
        left: LengthPercentageAuto::Length(edges.left),
        right: LengthPercentageAuto::Length(edges.right),
        top: LengthPercentageAuto::Length(edges.top),
        bottom: LengthPercentageAuto::Length(edges.bottom),
    }
}

fn to_taffy_padding(edges: Edges) -> Rect<LengthPercentage> {
    Rect {
        left: LengthPercentage::Length(edges.left),
        right: LengthPercentage::Length(edges.right),
        top: LengthPercentage::Length(edges.top),
        bottom: LengthPercentage::Length(edges.bottom),
    }
}

fn to_taffy_flex_direction(direction: FlexDirection) -> TaffyFlexDirection {
    match direction {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> TaffyJustifyContent {
    match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    }
}

fn to_taffy_alignment(alignment: Alignment) -> TaffyAlignItems {
    match alignment {
        Alignment::Stretch => TaffyAlignItems::Stretch,
        Alignment::FlexStart => TaffyAlignItems::FlexStart,
        Alignment::Center => TaffyAlignItems::Center,
        Alignment::FlexEnd => TaffyAlignItems::FlexEnd,
        Alignment::Baseline => TaffyAlignItems::Baseline,
    }
}
