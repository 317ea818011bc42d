use crate::Component;

/// A gesture attached to an arbitrary component.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture<M> {
    /// Dispatches the message on tap.
    Tap(M),
}

impl<M> Gesture<M> {
    pub fn map<N>(self, transform: impl Fn(M) -> N) -> Gesture<N> {
        match self {
            Gesture::Tap(message) => Gesture::Tap(transform(message)),
        }
    }
}

/// Makes `child` respond to `gesture`.
pub fn touchable<M>(gesture: Gesture<M>, child: Component<M>) -> Component<M> {
    Component::Touchable(gesture, Box::new(child))
}
