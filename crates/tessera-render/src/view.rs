//! Native view handles.
//!
//! A [`View`] is the renderer's stand-in for a platform widget: it has a
//! kind, a frame, subviews, the style and layout it was configured with,
//! its displayed content and the actions bound to its control events.
//! Views are shared handles; cloning a `View` clones the handle.
//!
//! ## Learning: Rc + Weak Trees
//!
//! Children are owned through `Rc` by their parent, and each child points
//! back with a `Weak`, so a subtree is freed as soon as it is detached and
//! nothing else holds it.

use crate::dispatcher::ControlEvent;
use crate::geometry::Frame;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use tessera_component::{BaseStyleSheet, Image, Layout};
use uuid::Uuid;

/// Unique identifier for a view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Window,
    Screen,
    NavigationBar,
    Plain,
    Button,
    Label,
    TextField,
    Map,
    Image,
    Table,
    Collection,
    Carousel,
    Cell,
    Segmented,
    Progress,
    Spinner,
    Custom,
}

impl ViewKind {
    /// Kinds that receive touches by default.
    fn is_interactive(&self) -> bool {
        matches!(
            self,
            ViewKind::Button
                | ViewKind::TextField
                | ViewKind::Segmented
                | ViewKind::Table
                | ViewKind::Collection
                | ViewKind::Carousel
                | ViewKind::Cell
        )
    }

    /// Kinds that lay out their own subviews.
    pub fn hosts_list(&self) -> bool {
        matches!(
            self,
            ViewKind::Table | ViewKind::Collection | ViewKind::Carousel
        )
    }
}

/// What a view displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewContent {
    #[default]
    Empty,
    Text {
        text: String,
    },
    Button {
        title: Option<String>,
        icon: Option<Image>,
        is_highlighted: bool,
    },
    TextField {
        text: String,
        placeholder: Option<String>,
        is_secure: bool,
    },
    Image {
        image: Image,
    },
    Map {
        placemarks: usize,
        zoom_level: f64,
    },
    Segments {
        titles: Vec<String>,
        enabled: Vec<bool>,
        selected: usize,
    },
    Progress {
        partial: u32,
        total: u32,
    },
    Spinner {
        is_active: bool,
    },
    Custom {
        identifier: String,
    },
}

impl ViewContent {
    /// The visible text, if the content has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            ViewContent::Text { text } | ViewContent::TextField { text, .. } => Some(text),
            ViewContent::Button { title, .. } => title.as_deref(),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, ViewContent::Empty)
    }
}

/// Callback bound to a control event.
pub type ActionHandler = Rc<dyn Fn(&View)>;

/// A shared handle to a view.
#[derive(Clone)]
pub struct View {
    inner: Rc<ViewInner>,
}

/// A non-owning handle to a view.
#[derive(Clone, Default)]
pub struct WeakView {
    inner: Weak<ViewInner>,
}

impl WeakView {
    pub fn upgrade(&self) -> Option<View> {
        self.inner.upgrade().map(|inner| View { inner })
    }
}

struct ViewInner {
    id: ViewId,
    kind: ViewKind,
    state: RefCell<ViewState>,
}

#[derive(Default)]
struct ViewState {
    frame: Frame,
    subviews: Vec<View>,
    parent: WeakView,
    layout: Layout,
    base_style: BaseStyleSheet,
    component_style: Option<serde_json::Value>,
    content: ViewContent,
    actions: Vec<(ControlEvent, ActionHandler)>,
    user_interaction_enabled: bool,
    debug_frame: bool,
    controller: Option<Rc<dyn Any>>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        let state = ViewState {
            user_interaction_enabled: kind.is_interactive(),
            ..ViewState::default()
        };
        Self {
            inner: Rc::new(ViewInner {
                id: ViewId::new(),
                kind,
                state: RefCell::new(state),
            }),
        }
    }

    /// A view with the given kind and frame.
    pub fn with_frame(kind: ViewKind, frame: Frame) -> Self {
        let view = Self::new(kind);
        view.set_frame(frame);
        view
    }

    pub fn id(&self) -> ViewId {
        self.inner.id
    }

    pub fn kind(&self) -> ViewKind {
        self.inner.kind
    }

    pub fn downgrade(&self) -> WeakView {
        WeakView {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn ptr_eq(&self, other: &View) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // -- Geometry --

    pub fn frame(&self) -> Frame {
        self.inner.state.borrow().frame
    }

    pub fn set_frame(&self, frame: Frame) {
        self.inner.state.borrow_mut().frame = frame;
    }

    /// The frame at the origin, for laying out subviews.
    pub fn bounds(&self) -> Frame {
        self.frame().bounds()
    }

    // -- Hierarchy --

    /// Appends `child`, detaching it from its previous parent first.
    pub fn add_subview(&self, child: &View) {
        child.remove_from_superview();
        child.inner.state.borrow_mut().parent = self.downgrade();
        self.inner.state.borrow_mut().subviews.push(child.clone());
    }

    pub fn remove_from_superview(&self) {
        let parent = std::mem::take(&mut self.inner.state.borrow_mut().parent);
        if let Some(parent) = parent.upgrade() {
            parent
                .inner
                .state
                .borrow_mut()
                .subviews
                .retain(|view| !view.ptr_eq(self));
        }
    }

    pub fn remove_all_subviews(&self) {
        let subviews = std::mem::take(&mut self.inner.state.borrow_mut().subviews);
        for subview in subviews {
            subview.inner.state.borrow_mut().parent = WeakView::default();
        }
    }

    pub fn subviews(&self) -> Vec<View> {
        self.inner.state.borrow().subviews.clone()
    }

    pub fn subview(&self, index: usize) -> Option<View> {
        self.inner.state.borrow().subviews.get(index).cloned()
    }

    pub fn superview(&self) -> Option<View> {
        self.inner.state.borrow().parent.upgrade()
    }

    /// Visits this view and every descendant, parents first.
    pub fn traverse(&self, visit: &mut impl FnMut(&View)) {
        visit(self);
        for subview in self.subviews() {
            subview.traverse(visit);
        }
    }

    /// First view in pre-order that satisfies `predicate`.
    pub fn find(&self, predicate: &impl Fn(&View) -> bool) -> Option<View> {
        if predicate(self) {
            return Some(self.clone());
        }
        self.subviews()
            .iter()
            .find_map(|subview| subview.find(predicate))
    }

    /// First view displaying exactly `text`.
    pub fn find_by_text(&self, text: &str) -> Option<View> {
        self.find(&|view| view.text().as_deref() == Some(text))
    }

    pub fn find_by_kind(&self, kind: ViewKind) -> Option<View> {
        self.find(&|view| view.kind() == kind)
    }

    // -- Configuration --

    pub fn layout(&self) -> Layout {
        self.inner.state.borrow().layout.clone()
    }

    pub fn set_layout(&self, layout: Layout) {
        self.inner.state.borrow_mut().layout = layout;
    }

    pub fn base_style(&self) -> BaseStyleSheet {
        self.inner.state.borrow().base_style.clone()
    }

    pub fn set_base_style(&self, style: BaseStyleSheet) {
        self.inner.state.borrow_mut().base_style = style;
    }

    pub fn component_style(&self) -> Option<serde_json::Value> {
        self.inner.state.borrow().component_style.clone()
    }

    /// Stores the kind-specific style in a kind-independent form.
    pub fn set_component_style(&self, style: &impl Serialize) {
        let value = match serde_json::to_value(style) {
            Ok(serde_json::Value::Null) => None,
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, kind = ?self.kind(), "Style could not be captured");
                None
            }
        };
        self.inner.state.borrow_mut().component_style = value;
    }

    pub fn content(&self) -> ViewContent {
        self.inner.state.borrow().content.clone()
    }

    pub fn set_content(&self, content: ViewContent) {
        self.inner.state.borrow_mut().content = content;
    }

    pub fn text(&self) -> Option<String> {
        self.inner.state.borrow().content.text().map(str::to_string)
    }

    /// Replaces the displayed text of a label, button or text field.
    pub fn set_text(&self, new_text: impl Into<String>) {
        let mut state = self.inner.state.borrow_mut();
        match &mut state.content {
            ViewContent::Text { text } | ViewContent::TextField { text, .. } => {
                *text = new_text.into()
            }
            ViewContent::Button { title, .. } => *title = Some(new_text.into()),
            _ => {}
        }
    }

    pub fn is_user_interaction_enabled(&self) -> bool {
        self.inner.state.borrow().user_interaction_enabled
    }

    pub fn set_user_interaction_enabled(&self, enabled: bool) {
        self.inner.state.borrow_mut().user_interaction_enabled = enabled;
    }

    pub fn has_debug_frame(&self) -> bool {
        self.inner.state.borrow().debug_frame
    }

    pub fn set_debug_frame(&self, enabled: bool) {
        self.inner.state.borrow_mut().debug_frame = enabled;
    }

    /// Attaches an object whose lifetime is tied to this view.
    pub fn set_controller<T: Any>(&self, controller: Rc<T>) {
        self.inner.state.borrow_mut().controller = Some(controller);
    }

    /// The attached object, if it has type `T`.
    pub fn controller<T: Any>(&self) -> Option<Rc<T>> {
        let controller = self.inner.state.borrow().controller.clone()?;
        controller.downcast::<T>().ok()
    }

    // -- Actions --

    pub fn on(&self, event: ControlEvent, handler: impl Fn(&View) + 'static) {
        self.inner
            .state
            .borrow_mut()
            .actions
            .push((event, Rc::new(handler)));
    }

    pub fn remove_actions(&self, event: ControlEvent) {
        self.inner
            .state
            .borrow_mut()
            .actions
            .retain(|(bound, _)| *bound != event);
    }

    pub fn has_action(&self, event: ControlEvent) -> bool {
        self.inner
            .state
            .borrow()
            .actions
            .iter()
            .any(|(bound, _)| *bound == event)
    }

    /// Invokes every handler bound to `event`, in binding order.
    ///
    /// Returns the number of handlers invoked.
    pub fn send_action(&self, event: ControlEvent) -> usize {
        let handlers: Vec<ActionHandler> = self
            .inner
            .state
            .borrow()
            .actions
            .iter()
            .filter(|(bound, _)| *bound == event)
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in &handlers {
            handler(self);
        }
        handlers.len()
    }

    /// Delivers a tap to the nearest interactive view, starting here and
    /// walking up the hierarchy.
    pub fn simulate_tap(&self) -> bool {
        let mut current = Some(self.clone());
        while let Some(view) = current {
            if view.is_user_interaction_enabled() && view.has_action(ControlEvent::Tap) {
                view.send_action(ControlEvent::Tap);
                return true;
            }
            current = view.superview();
        }
        false
    }

    /// Selects segment `index` of a segmented control as a user would.
    pub fn select_segment(&self, index: usize) -> bool {
        {
            let mut state = self.inner.state.borrow_mut();
            match &mut state.content {
                ViewContent::Segments {
                    enabled, selected, ..
                } if enabled.get(index) == Some(&true) => *selected = index,
                _ => return false,
            }
        }
        self.send_action(ControlEvent::ValueChanged);
        true
    }

    /// Runs a whole editing session on a text field.
    pub fn edit_text(&self, text: impl Into<String>) -> bool {
        if !matches!(self.content(), ViewContent::TextField { .. }) {
            return false;
        }
        self.send_action(ControlEvent::EditingBegin);
        self.set_text(text);
        self.send_action(ControlEvent::EditingChanged);
        self.send_action(ControlEvent::EditingEnd);
        true
    }

    // -- Inspection --

    pub fn snapshot(&self) -> ViewSnapshot {
        let state = self.inner.state.borrow();
        ViewSnapshot {
            kind: self.kind(),
            frame: state.frame,
            content: state.content.clone(),
            style: state.component_style.clone(),
            base_style: state.base_style.clone(),
            debug_frame: state.debug_frame,
            subviews: state.subviews.iter().map(View::snapshot).collect(),
        }
    }

    /// An indented, one-line-per-view description of the tree.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        self.write_outline(0, &mut out);
        out
    }

    fn write_outline(&self, depth: usize, out: &mut String) {
        let frame = self.frame();
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{:?}", self.kind()).to_lowercase());
        if let Some(text) = self.text() {
            out.push_str(&format!(" {text:?}"));
        }
        out.push_str(&format!(
            " ({}, {}, {}x{})\n",
            frame.x, frame.y, frame.width, frame.height
        ));
        for subview in self.subviews() {
            subview.write_outline(depth + 1, out);
        }
    }
}

impl PartialEq for View {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("id", &self.id())
            .field("kind", &self.kind())
            .field("frame", &self.frame())
            .finish_non_exhaustive()
    }
}

fn is_default_base(style: &BaseStyleSheet) -> bool {
    *style == BaseStyleSheet::default()
}

/// Serializable copy of a view tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    pub kind: ViewKind,
    pub frame: Frame,
    #[serde(default, skip_serializing_if = "ViewContent::is_empty")]
    pub content: ViewContent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "is_default_base")]
    pub base_style: BaseStyleSheet,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub debug_frame: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subviews: Vec<ViewSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_add_subview_reparents() {
        let a = View::new(ViewKind::Plain);
        let b = View::new(ViewKind::Plain);
        let child = View::new(ViewKind::Label);

        a.add_subview(&child);
        b.add_subview(&child);

        assert!(a.subviews().is_empty());
        assert_eq!(b.subviews(), vec![child.clone()]);
        assert_eq!(child.superview(), Some(b));
    }

    #[test]
    fn test_remove_all_subviews_detaches() {
        let parent = View::new(ViewKind::Plain);
        let child = View::new(ViewKind::Label);
        parent.add_subview(&child);

        parent.remove_all_subviews();
        assert!(parent.subviews().is_empty());
        assert!(child.superview().is_none());
    }

    #[test]
    fn test_simulate_tap_bubbles_to_interactive_ancestor() {
        let cell = View::new(ViewKind::Cell);
        let label = View::new(ViewKind::Label);
        label.set_content(ViewContent::Text {
            text: "row".to_string(),
        });
        cell.add_subview(&label);

        let taps = Rc::new(Cell::new(0));
        let counter = Rc::clone(&taps);
        cell.on(ControlEvent::Tap, move |_| counter.set(counter.get() + 1));

        let found = cell.find_by_text("row").unwrap();
        assert!(found.simulate_tap());
        assert_eq!(taps.get(), 1);

        let orphan = View::new(ViewKind::Label);
        assert!(!orphan.simulate_tap());
    }

    #[test]
    fn test_handler_may_mutate_its_view() {
        let button = View::new(ViewKind::Button);
        button.set_content(ViewContent::Button {
            title: Some("off".to_string()),
            icon: None,
            is_highlighted: false,
        });
        button.on(ControlEvent::Tap, |view| view.set_text("on"));

        assert_eq!(button.send_action(ControlEvent::Tap), 1);
        assert_eq!(button.text().as_deref(), Some("on"));
    }

    #[test]
    fn test_select_segment_respects_enabled() {
        let control = View::new(ViewKind::Segmented);
        control.set_content(ViewContent::Segments {
            titles: vec!["a".into(), "b".into()],
            enabled: vec![true, false],
            selected: 0,
        });
        assert!(!control.select_segment(1));
        assert!(!control.select_segment(5));
        assert!(control.select_segment(0));
    }

    #[test]
    fn test_controller_downcast() {
        let view = View::new(ViewKind::Table);
        view.set_controller(Rc::new(42u32));
        assert_eq!(view.controller::<u32>().as_deref(), Some(&42));
        assert!(view.controller::<String>().is_none());
    }

    #[test]
    fn test_snapshot_skips_defaults() {
        let view = View::with_frame(ViewKind::Plain, Frame::sized(10.0, 20.0));
        let json = serde_json::to_value(view.snapshot()).unwrap();
        assert_eq!(json["kind"], "plain");
        assert!(json.get("content").is_none());
        assert!(json.get("subviews").is_none());
    }
}
