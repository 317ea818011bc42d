//! Binding messages to control events.
//!
//! A control owns the closures bound to it, and each closure owns a handle
//! to the mailbox it dispatches into. Dropping the view drops the
//! bindings; nothing else has to be cleaned up.

use crate::view::View;
use serde::{Deserialize, Serialize};
use tessera_core::Mailbox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    Tap,
    EditingBegin,
    EditingChanged,
    EditingEnd,
    ValueChanged,
}

/// Dispatches `message` into `mailbox` whenever `event` fires on `view`.
///
/// Previous bindings for the same event are replaced.
pub fn bind_message<M: Clone + 'static>(
    view: &View,
    event: ControlEvent,
    mailbox: &Mailbox<M>,
    message: M,
) {
    let mailbox = mailbox.clone();
    view.remove_actions(event);
    view.on(event, move |_| mailbox.dispatch(message.clone()));
}

/// Like [`bind_message`], skipping absent messages.
pub fn bind_optional_message<M: Clone + 'static>(
    view: &View,
    event: ControlEvent,
    mailbox: &Mailbox<M>,
    message: Option<M>,
) {
    match message {
        Some(message) => bind_message(view, event, mailbox, message),
        None => view.remove_actions(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ViewKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_rebinding_replaces_previous_target() {
        let view = View::new(ViewKind::Button);
        let mailbox = Mailbox::new();
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        mailbox.subscribe(move |message: &&str| sink.borrow_mut().push(*message));

        bind_message(&view, ControlEvent::Tap, &mailbox, "first");
        bind_message(&view, ControlEvent::Tap, &mailbox, "second");
        view.send_action(ControlEvent::Tap);

        assert_eq!(*received.borrow(), vec!["second"]);
    }

    #[test]
    fn test_absent_message_unbinds() {
        let view = View::new(ViewKind::Button);
        let mailbox = Mailbox::<u8>::new();
        bind_message(&view, ControlEvent::Tap, &mailbox, 1);
        bind_optional_message(&view, ControlEvent::Tap, &mailbox, None);
        assert!(!view.has_action(ControlEvent::Tap));
    }
}
