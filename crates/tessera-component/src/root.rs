//! Root components: a screen's content plus optional chrome.

use crate::Component;
use crate::properties::Transform;
use crate::style::{Image, NavigationBarStyleSheet, StyleSheet};
use std::marker::PhantomData;
use std::rc::Rc;

/// What a navigation bar shows as its title.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationBarTitle<M> {
    Text(String),
    Image(Image),
    /// An arbitrary component; its messages are delivered with the screen's.
    Component(Component<M>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationBarProperties<M> {
    pub title: NavigationBarTitle<M>,
    pub hide_back_button_title: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationBar<M> {
    pub properties: NavigationBarProperties<M>,
    pub style: StyleSheet<NavigationBarStyleSheet>,
}

impl<M> NavigationBar<M> {
    pub fn new(title: NavigationBarTitle<M>) -> Self {
        Self {
            properties: NavigationBarProperties {
                title,
                hide_back_button_title: false,
            },
            style: StyleSheet::default(),
        }
    }

    pub fn hide_back_button_title(mut self, hide: bool) -> Self {
        self.properties.hide_back_button_title = hide;
        self
    }

    pub fn with_style(mut self, style: StyleSheet<NavigationBarStyleSheet>) -> Self {
        self.style = style;
        self
    }
}

impl<M: 'static> NavigationBar<M> {
    pub(crate) fn map_with<N: 'static>(self, transform: &Transform<M, N>) -> NavigationBar<N> {
        let title = match self.properties.title {
            NavigationBarTitle::Text(text) => NavigationBarTitle::Text(text),
            NavigationBarTitle::Image(image) => NavigationBarTitle::Image(image),
            NavigationBarTitle::Component(component) => {
                NavigationBarTitle::Component(component.map_with(transform))
            }
        };
        NavigationBar {
            properties: NavigationBarProperties {
                title,
                hide_back_button_title: self.properties.hide_back_button_title,
            },
            style: self.style,
        }
    }
}

/// A navigation bar titled with text.
pub fn navigation_bar<M>(title: impl Into<String>) -> NavigationBar<M> {
    NavigationBar::new(NavigationBarTitle::Text(title.into()))
}

/// Placeholder for tab bar chrome, which is not supported by any renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabBar<M> {
    _message: PhantomData<M>,
}

impl<M> TabBar<M> {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            _message: PhantomData,
        }
    }

    pub fn map<N>(self) -> TabBar<N> {
        TabBar::new()
    }
}

/// The component tree of a whole screen.
#[derive(Debug, Clone, PartialEq)]
pub enum RootComponent<M> {
    Simple(Component<M>),
    WithNavigationBar(NavigationBar<M>, Component<M>),
    WithTabBar(TabBar<M>, Component<M>),
}

impl<M> RootComponent<M> {
    pub fn component(&self) -> &Component<M> {
        match self {
            RootComponent::Simple(component)
            | RootComponent::WithNavigationBar(_, component)
            | RootComponent::WithTabBar(_, component) => component,
        }
    }

    pub fn navigation_bar(&self) -> Option<&NavigationBar<M>> {
        match self {
            RootComponent::WithNavigationBar(bar, _) => Some(bar),
            RootComponent::Simple(_) | RootComponent::WithTabBar(..) => None,
        }
    }

    pub fn into_parts(self) -> (Option<NavigationBar<M>>, Component<M>) {
        match self {
            RootComponent::Simple(component) | RootComponent::WithTabBar(_, component) => {
                (None, component)
            }
            RootComponent::WithNavigationBar(bar, component) => (Some(bar), component),
        }
    }
}

impl<M: 'static> RootComponent<M> {
    pub fn map<N: 'static>(self, transform: impl Fn(M) -> N + 'static) -> RootComponent<N> {
        let transform: Transform<M, N> = Rc::new(transform);
        match self {
            RootComponent::Simple(component) => RootComponent::Simple(component.map_with(&transform)),
            RootComponent::WithNavigationBar(bar, component) => RootComponent::WithNavigationBar(
                bar.map_with(&transform),
                component.map_with(&transform),
            ),
            RootComponent::WithTabBar(bar, component) => {
                RootComponent::WithTabBar(bar.map(), component.map_with(&transform))
            }
        }
    }
}

impl<M> From<Component<M>> for RootComponent<M> {
    fn from(component: Component<M>) -> Self {
        RootComponent::Simple(component)
    }
}
