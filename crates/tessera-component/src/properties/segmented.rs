use crate::Component;
use crate::layout::Layout;
use crate::style::{Image, SegmentedStyleSheet, StyleSheet};
use tessera_core::ZipList;

/// What a segment displays.
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentContent {
    Title(String),
    Image(Image),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentProperties<M> {
    pub content: SegmentContent,
    pub on_tap: Option<M>,
    pub is_enabled: bool,
}

impl<M> SegmentProperties<M> {
    pub fn on_tap(mut self, message: M) -> Self {
        self.on_tap = Some(message);
        self
    }

    pub fn enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    pub fn map<N>(self, transform: impl Fn(M) -> N) -> SegmentProperties<N> {
        SegmentProperties {
            content: self.content,
            on_tap: self.on_tap.map(transform),
            is_enabled: self.is_enabled,
        }
    }
}

/// Segments of a segmented control; the center is the selected segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedProperties<M> {
    pub segments: ZipList<SegmentProperties<M>>,
}

impl<M> SegmentedProperties<M> {
    pub fn new(segments: ZipList<SegmentProperties<M>>) -> Self {
        Self { segments }
    }

    pub fn selected_index(&self) -> usize {
        self.segments.center_index()
    }

    pub fn map<N>(self, transform: impl Fn(M) -> N) -> SegmentedProperties<N> {
        SegmentedProperties {
            segments: self.segments.map(|segment| segment.map(&transform)),
        }
    }
}

pub fn segment<M>(title: impl Into<String>) -> SegmentProperties<M> {
    SegmentProperties {
        content: SegmentContent::Title(title.into()),
        on_tap: None,
        is_enabled: true,
    }
}

pub fn segment_image<M>(image: Image) -> SegmentProperties<M> {
    SegmentProperties {
        content: SegmentContent::Image(image),
        on_tap: None,
        is_enabled: true,
    }
}

pub fn segmented<M>(segments: ZipList<SegmentProperties<M>>) -> Component<M> {
    segmented_with(
        SegmentedProperties::new(segments),
        StyleSheet::default(),
        Layout::default(),
    )
}

pub fn segmented_with<M>(
    properties: SegmentedProperties<M>,
    style: StyleSheet<SegmentedStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::Segmented(properties, style, layout)
}
