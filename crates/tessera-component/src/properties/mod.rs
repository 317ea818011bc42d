//! Per-kind component properties.
//!
//! Every properties type that can hold a message has its own `map`. Types
//! holding lazy item renderers take the transform behind an `Rc` so the
//! same transform can be captured by every wrapped renderer.

mod button;
mod carousel;
mod collection;
mod gesture;
mod label;
mod map_view;
mod segmented;
mod table;
mod text_field;

pub use button::{ButtonProperties, button, button_with};
pub use carousel::{
    CarouselItemProperties, CarouselProperties, SelectionChangeHandler, carousel, carousel_item,
    carousel_with,
};
pub use collection::{
    CollectionItemProperties, CollectionLayoutValues, CollectionProperties, ScrollDirection,
    collection, collection_item, collection_with,
};
pub use gesture::{Gesture, touchable};
pub use label::{LabelProperties, label, label_with};
pub use map_view::{Coordinates, MapPlacemark, MapProperties, map_view, map_view_with};
pub use segmented::{
    SegmentContent, SegmentProperties, SegmentedProperties, segment, segment_image, segmented,
    segmented_with,
};
pub use table::{
    TableItemProperties, TableItemSelectionStyle, TableProperties, table, table_item, table_with,
};
pub use text_field::{TextFieldEvents, TextFieldProperties, text_field, text_field_with};

use crate::Component;
use std::rc::Rc;

/// Produces a list item's body on demand.
pub type ItemRenderer<M> = Rc<dyn Fn() -> Component<M>>;

/// A message transform shared by every renderer it wraps.
pub(crate) type Transform<M, N> = Rc<dyn Fn(M) -> N>;

/// Wraps `renderer` so its future output is remapped by `transform`.
///
/// The renderer is not invoked here.
pub(crate) fn map_renderer<M: 'static, N: 'static>(
    renderer: ItemRenderer<M>,
    transform: &Transform<M, N>,
) -> ItemRenderer<N> {
    let transform = Rc::clone(transform);
    Rc::new(move || renderer().map_with(&transform))
}
