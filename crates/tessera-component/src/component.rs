//! The component tree.
//!
//! ## Learning: Closed Sum Types
//!
//! `Component<M>` is a plain enum. Every consumer (`map`, the renderer,
//! the layout accessors) matches on it exhaustively, so adding a variant
//! is a compile error everywhere it has not been handled yet.
//!
//! ## Learning: Functors over Trees
//!
//! `map` rebuilds the tree with every message passed through a transform.
//! The transform is put behind an `Rc` once and shared by the whole
//! traversal, which lets lazy item renderers capture it and apply it to
//! bodies that will only be produced later.

use crate::layout::Layout;
use crate::properties::{
    ButtonProperties, CarouselProperties, CollectionProperties, Gesture, LabelProperties,
    MapProperties, SegmentedProperties, TableProperties, TextFieldProperties, Transform,
};
use crate::style::{
    BaseStyleSheet, ButtonStyleSheet, EmptyStyleSheet, Image, LabelStyleSheet,
    ProgressStyleSheet, SegmentedStyleSheet, SpinnerStyleSheet, StyleSheet, TableStyleSheet,
    TextFieldStyleSheet,
};
use std::fmt;
use std::rc::Rc;
use tessera_core::ProgressCounter;

/// A UI element and its subtree, emitting messages of type `M`.
#[derive(Debug, Clone, PartialEq)]
pub enum Component<M> {
    Button(ButtonProperties<M>, StyleSheet<ButtonStyleSheet>, Layout),
    Label(LabelProperties, StyleSheet<LabelStyleSheet>, Layout),
    TextField(TextFieldProperties<M>, StyleSheet<TextFieldStyleSheet>, Layout),
    MapView(MapProperties, StyleSheet<EmptyStyleSheet>, Layout),
    ImageView(Image, StyleSheet<EmptyStyleSheet>, Layout),
    Container(Vec<Component<M>>, StyleSheet<EmptyStyleSheet>, Layout),
    Table(TableProperties<M>, StyleSheet<TableStyleSheet>, Layout),
    Collection(CollectionProperties<M>, StyleSheet<EmptyStyleSheet>, Layout),
    Carousel(CarouselProperties<M>, StyleSheet<EmptyStyleSheet>, Layout),
    Segmented(SegmentedProperties<M>, StyleSheet<SegmentedStyleSheet>, Layout),
    Progress(ProgressCounter, StyleSheet<ProgressStyleSheet>, Layout),
    /// Activity indicator; `true` while animating.
    Spinner(bool, StyleSheet<SpinnerStyleSheet>, Layout),
    /// Attaches a gesture to the child. Style and layout are the child's.
    Touchable(Gesture<M>, Box<Component<M>>),
    /// Rendered by the host application, looked up by identifier.
    Custom(String, StyleSheet<EmptyStyleSheet>, Layout),
}

/// Variant tag of a [`Component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Button,
    Label,
    TextField,
    MapView,
    ImageView,
    Container,
    Table,
    Collection,
    Carousel,
    Segmented,
    Progress,
    Spinner,
    Touchable,
    Custom,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Label => "label",
            ComponentKind::TextField => "text_field",
            ComponentKind::MapView => "map_view",
            ComponentKind::ImageView => "image_view",
            ComponentKind::Container => "container",
            ComponentKind::Table => "table",
            ComponentKind::Collection => "collection",
            ComponentKind::Carousel => "carousel",
            ComponentKind::Segmented => "segmented",
            ComponentKind::Progress => "progress",
            ComponentKind::Spinner => "spinner",
            ComponentKind::Touchable => "touchable",
            ComponentKind::Custom => "custom",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<M> Component<M> {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Button(..) => ComponentKind::Button,
            Component::Label(..) => ComponentKind::Label,
            Component::TextField(..) => ComponentKind::TextField,
            Component::MapView(..) => ComponentKind::MapView,
            Component::ImageView(..) => ComponentKind::ImageView,
            Component::Container(..) => ComponentKind::Container,
            Component::Table(..) => ComponentKind::Table,
            Component::Collection(..) => ComponentKind::Collection,
            Component::Carousel(..) => ComponentKind::Carousel,
            Component::Segmented(..) => ComponentKind::Segmented,
            Component::Progress(..) => ComponentKind::Progress,
            Component::Spinner(..) => ComponentKind::Spinner,
            Component::Touchable(..) => ComponentKind::Touchable,
            Component::Custom(..) => ComponentKind::Custom,
        }
    }

    /// Layout hints of this node; a touchable reports its child's.
    pub fn layout(&self) -> &Layout {
        match self {
            Component::Button(_, _, layout)
            | Component::Label(_, _, layout)
            | Component::TextField(_, _, layout)
            | Component::MapView(_, _, layout)
            | Component::ImageView(_, _, layout)
            | Component::Container(_, _, layout)
            | Component::Table(_, _, layout)
            | Component::Collection(_, _, layout)
            | Component::Carousel(_, _, layout)
            | Component::Segmented(_, _, layout)
            | Component::Progress(_, _, layout)
            | Component::Spinner(_, _, layout)
            | Component::Custom(_, _, layout) => layout,
            Component::Touchable(_, child) => child.layout(),
        }
    }

    fn layout_mut(&mut self) -> &mut Layout {
        match self {
            Component::Button(_, _, layout)
            | Component::Label(_, _, layout)
            | Component::TextField(_, _, layout)
            | Component::MapView(_, _, layout)
            | Component::ImageView(_, _, layout)
            | Component::Container(_, _, layout)
            | Component::Table(_, _, layout)
            | Component::Collection(_, _, layout)
            | Component::Carousel(_, _, layout)
            | Component::Segmented(_, _, layout)
            | Component::Progress(_, _, layout)
            | Component::Spinner(_, _, layout)
            | Component::Custom(_, _, layout) => layout,
            Component::Touchable(_, child) => child.layout_mut(),
        }
    }

    /// The universal part of this node's style; a touchable reports its
    /// child's.
    pub fn base_style(&self) -> &BaseStyleSheet {
        match self {
            Component::Button(_, style, _) => &style.base,
            Component::Label(_, style, _) => &style.base,
            Component::TextField(_, style, _) => &style.base,
            Component::MapView(_, style, _)
            | Component::ImageView(_, style, _)
            | Component::Container(_, style, _)
            | Component::Collection(_, style, _)
            | Component::Carousel(_, style, _)
            | Component::Custom(_, style, _) => &style.base,
            Component::Table(_, style, _) => &style.base,
            Component::Segmented(_, style, _) => &style.base,
            Component::Progress(_, style, _) => &style.base,
            Component::Spinner(_, style, _) => &style.base,
            Component::Touchable(_, child) => child.base_style(),
        }
    }

    fn base_style_mut(&mut self) -> &mut BaseStyleSheet {
        match self {
            Component::Button(_, style, _) => &mut style.base,
            Component::Label(_, style, _) => &mut style.base,
            Component::TextField(_, style, _) => &mut style.base,
            Component::MapView(_, style, _)
            | Component::ImageView(_, style, _)
            | Component::Container(_, style, _)
            | Component::Collection(_, style, _)
            | Component::Carousel(_, style, _)
            | Component::Custom(_, style, _) => &mut style.base,
            Component::Table(_, style, _) => &mut style.base,
            Component::Segmented(_, style, _) => &mut style.base,
            Component::Progress(_, style, _) => &mut style.base,
            Component::Spinner(_, style, _) => &mut style.base,
            Component::Touchable(_, child) => child.base_style_mut(),
        }
    }

    /// Replaces the layout hints.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        *self.layout_mut() = layout;
        self
    }

    /// Replaces the universal style, keeping the kind-specific one.
    pub fn with_base_style(mut self, base: BaseStyleSheet) -> Self {
        *self.base_style_mut() = base;
        self
    }

    /// Identifiers of every custom component in the tree, depth-first,
    /// without duplicates.
    ///
    /// List item bodies are produced lazily and are not visited.
    pub fn custom_component_identifiers(&self) -> Vec<String> {
        let mut identifiers = Vec::new();
        self.collect_custom_identifiers(&mut identifiers);
        identifiers
    }

    fn collect_custom_identifiers(&self, identifiers: &mut Vec<String>) {
        match self {
            Component::Custom(identifier, _, _) => {
                if !identifiers.contains(identifier) {
                    identifiers.push(identifier.clone());
                }
            }
            Component::Container(children, _, _) => {
                for child in children {
                    child.collect_custom_identifiers(identifiers);
                }
            }
            Component::Touchable(_, child) => child.collect_custom_identifiers(identifiers),
            _ => {}
        }
    }
}

impl<M: 'static> Component<M> {
    /// Rewrites every message in the tree with `transform`.
    ///
    /// Structure, styles and layouts are preserved. Lazy item renderers are
    /// wrapped, not invoked.
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> Component<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        self.map_with(&transform)
    }

    pub(crate) fn map_with<N: 'static>(self, transform: &Transform<M, N>) -> Component<N> {
        let f = |message: M| transform(message);
        match self {
            Component::Button(properties, style, layout) => {
                Component::Button(properties.map(f), style, layout)
            }
            Component::Label(properties, style, layout) => {
                Component::Label(properties, style, layout)
            }
            Component::TextField(properties, style, layout) => {
                Component::TextField(properties.map(f), style, layout)
            }
            Component::MapView(properties, style, layout) => {
                Component::MapView(properties, style, layout)
            }
            Component::ImageView(image, style, layout) => {
                Component::ImageView(image, style, layout)
            }
            Component::Container(children, style, layout) => Component::Container(
                children
                    .into_iter()
                    .map(|child| child.map_with(transform))
                    .collect(),
                style,
                layout,
            ),
            Component::Table(properties, style, layout) => {
                Component::Table(properties.map_with(transform), style, layout)
            }
            Component::Collection(properties, style, layout) => {
                Component::Collection(properties.map_with(transform), style, layout)
            }
            Component::Carousel(properties, style, layout) => {
                Component::Carousel(properties.map_with(transform), style, layout)
            }
            Component::Segmented(properties, style, layout) => {
                Component::Segmented(properties.map(f), style, layout)
            }
            Component::Progress(counter, style, layout) => {
                Component::Progress(counter, style, layout)
            }
            Component::Spinner(is_active, style, layout) => {
                Component::Spinner(is_active, style, layout)
            }
            Component::Touchable(gesture, child) => {
                Component::Touchable(gesture.map(f), Box::new(child.map_with(transform)))
            }
            Component::Custom(identifier, style, layout) => {
                Component::Custom(identifier, style, layout)
            }
        }
    }
}

pub fn container<M>(children: Vec<Component<M>>) -> Component<M> {
    container_with(children, StyleSheet::default(), Layout::default())
}

pub fn container_with<M>(
    children: Vec<Component<M>>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Container(children, style, layout)
}

pub fn image_view<M>(image: Image) -> Component<M> {
    image_view_with(image, StyleSheet::default(), Layout::default())
}

pub fn image_view_with<M>(
    image: Image,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::ImageView(image, style, layout)
}

pub fn progress<M>(counter: ProgressCounter) -> Component<M> {
    progress_with(counter, StyleSheet::default(), Layout::default())
}

pub fn progress_with<M>(
    counter: ProgressCounter,
    style: StyleSheet<ProgressStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Progress(counter, style, layout)
}

pub fn spinner<M>(is_active: bool) -> Component<M> {
    spinner_with(is_active, StyleSheet::default(), Layout::default())
}

pub fn spinner_with<M>(
    is_active: bool,
    style: StyleSheet<SpinnerStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Spinner(is_active, style, layout)
}

pub fn custom<M>(identifier: impl Into<String>) -> Component<M> {
    custom_with(identifier, StyleSheet::default(), Layout::default())
}

pub fn custom_with<M>(
    identifier: impl Into<String>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Custom(identifier.into(), style, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Dimension;
    use crate::properties::*;
    use crate::style::Color;
    use proptest::prelude::*;
    use tessera_core::ZipList;

    #[test]
    fn test_map_reaches_nested_messages() {
        let tree = container(vec![
            label("A"),
            button(ButtonProperties::new("B").on_tap(1u8)),
            touchable(Gesture::Tap(2u8), label("C")),
        ]);

        let mapped = tree.map(|n| format!("m{n}"));
        let Component::Container(children, _, _) = mapped else {
            panic!("expected a container");
        };
        assert_eq!(children.len(), 3);
        assert!(matches!(&children[0], Component::Label(p, _, _) if p.text == "A"));
        assert!(
            matches!(&children[1], Component::Button(p, _, _) if p.on_tap.as_deref() == Some("m1"))
        );
        assert!(matches!(&children[2], Component::Touchable(Gesture::Tap(m), _) if m == "m2"));
    }

    #[test]
    fn test_touchable_delegates_layout_and_style() {
        let child = label::<()>("x").with_layout(Layout::new().with_height(Dimension::fixed(30.0)));
        let wrapped = touchable(Gesture::Tap(()), child).with_base_style(BaseStyleSheet {
            background_color: Some(Color::RED),
            ..BaseStyleSheet::default()
        });

        assert_eq!(wrapped.kind(), ComponentKind::Touchable);
        assert_eq!(wrapped.layout().height, Some(Dimension::fixed(30.0)));
        assert_eq!(wrapped.base_style().background_color, Some(Color::RED));
    }

    #[test]
    fn test_custom_component_identifiers_are_unique_and_ordered() {
        let tree: Component<()> = container(vec![
            custom("chart"),
            container(vec![custom("map"), custom("chart")]),
            touchable(Gesture::Tap(()), custom("avatar")),
        ]);
        assert_eq!(
            tree.custom_component_identifiers(),
            vec!["chart".to_string(), "map".to_string(), "avatar".to_string()]
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(spinner::<()>(true).kind().to_string(), "spinner");
        assert_eq!(ComponentKind::TextField.as_str(), "text_field");
    }

    fn leaf() -> impl Strategy<Value = Component<u8>> {
        prop_oneof![
            "[a-z]{0,6}".prop_map(label::<u8>),
            (any::<Option<u8>>(), any::<bool>()).prop_map(|(on_tap, is_highlighted)| {
                button(ButtonProperties {
                    text: Some("b".to_string()),
                    icon: None,
                    is_highlighted,
                    on_tap,
                })
            }),
            (any::<Option<u8>>(), any::<Option<u8>>(), any::<Option<u8>>()).prop_map(
                |(begin, changed, end)| {
                    text_field(TextFieldProperties::new("t").on_events(TextFieldEvents {
                        on_editing_begin: begin,
                        on_editing_changed: changed,
                        on_editing_end: end,
                    }))
                }
            ),
            (1.0f32..64.0).prop_map(|side| image_view::<u8>(Image::new("icon", side, side))),
            any::<bool>().prop_map(|is_zoom_enabled| {
                map_view::<u8>(MapProperties {
                    is_zoom_enabled,
                    ..MapProperties::default()
                })
            }),
            any::<bool>().prop_map(spinner::<u8>),
            (0u32..5, 5u32..10).prop_map(|(partial, total)| {
                progress::<u8>(ProgressCounter::new(partial, total).unwrap())
            }),
            "[a-z]{1,4}".prop_map(custom::<u8>),
            prop::collection::vec(any::<Option<u8>>(), 1..4).prop_map(|taps| {
                let segments: Vec<SegmentProperties<u8>> = taps
                    .into_iter()
                    .map(|on_tap| SegmentProperties {
                        content: SegmentContent::Title("s".to_string()),
                        on_tap,
                        is_enabled: true,
                    })
                    .collect();
                segmented(ZipList::from_vec(segments, 0).unwrap())
            }),
        ]
    }

    fn component() -> impl Strategy<Value = Component<u8>> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(container),
                (any::<u8>(), inner.clone())
                    .prop_map(|(message, child)| touchable(Gesture::Tap(message), child)),
                (prop::collection::vec(inner.clone(), 0..3), any::<Option<u8>>()).prop_map(
                    |(bodies, on_tap)| {
                        let items = bodies
                            .into_iter()
                            .map(|body| {
                                let mut item = table_item(44, "row", move || body.clone());
                                item.on_tap = on_tap;
                                item
                            })
                            .collect();
                        table(TableProperties::new(items))
                    }
                ),
                (prop::collection::vec((inner.clone(), any::<Option<u8>>()), 0..3), any::<bool>())
                    .prop_map(|(cells, is_snap_to_cell_enabled)| {
                        let items = cells
                            .into_iter()
                            .map(|(body, on_tap)| {
                                let mut item = collection_item("cell", move || body.clone());
                                item.on_tap = on_tap;
                                item
                            })
                            .collect();
                        let mut properties =
                            CollectionProperties::new(items, CollectionLayoutValues::new(40, 40));
                        properties.is_snap_to_cell_enabled = is_snap_to_cell_enabled;
                        collection(properties)
                    }),
                (inner.clone(), any::<u8>(), any::<bool>()).prop_map(
                    |(body, scrolled, with_handler)| {
                        let page = carousel_item("page", move || body.clone()).on_scrolled(scrolled);
                        let mut properties =
                            CarouselProperties::new(Some(ZipList::singleton(page)), 100, 80);
                        if with_handler {
                            properties = properties.on_selection_change(|operation| {
                                match operation {
                                    tessera_core::ShiftOperation::Left(n) => Some(n as u8),
                                    tessera_core::ShiftOperation::Right(_) => None,
                                }
                            });
                        }
                        carousel(properties)
                    }
                ),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_map_identity(tree in component()) {
            prop_assert_eq!(tree.clone().map(|message| message), tree);
        }

        #[test]
        fn prop_map_composition(tree in component()) {
            let f = |message: u8| u16::from(message) * 3;
            let g = |n: u16| format!("<{n}>");
            prop_assert_eq!(tree.clone().map(f).map(g), tree.map(move |m| g(f(m))));
        }

        #[test]
        fn prop_map_preserves_kind_and_layout(tree in component()) {
            let kind = tree.kind();
            let layout = tree.layout().clone();
            let mapped = tree.map(u32::from);
            prop_assert_eq!(mapped.kind(), kind);
            prop_assert_eq!(mapped.layout(), &layout);
        }
    }
}
