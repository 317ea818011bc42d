use crate::Component;
use crate::layout::Layout;
use crate::style::{EmptyStyleSheet, Image, StyleSheet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPlacemark {
    pub coordinates: Coordinates,
    pub icon: Option<Image>,
}

/// A map viewport. Maps never emit messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapProperties {
    pub placemarks: Vec<MapPlacemark>,
    pub center: Option<Coordinates>,
    pub is_zoom_enabled: bool,
    pub zoom_level: f64,
    pub is_scroll_enabled: bool,
}

impl Default for MapProperties {
    fn default() -> Self {
        Self {
            placemarks: Vec::new(),
            center: None,
            is_zoom_enabled: true,
            zoom_level: 1.0,
            is_scroll_enabled: true,
        }
    }
}

pub fn map_view<M>(properties: MapProperties) -> Component<M> {
    map_view_with(properties, StyleSheet::default(), Layout::default())
}

pub fn map_view_with<M>(
    properties: MapProperties,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
) -> Component<M> {
    Component::MapView(properties, style, layout)
}
