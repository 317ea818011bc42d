//! Components that compose other renders: containers, gestures and host
//! supplied custom components.

use super::styled_view;
use crate::dispatcher::ControlEvent;
use crate::render::{AfterLayoutTask, Render, RenderContext, render_component};
use crate::view::{ViewContent, ViewKind};
use tessera_component::{Component, EmptyStyleSheet, Gesture, Layout, StyleSheet};
use tessera_core::Mailbox;

/// Renders children in order and merges their mailboxes into one.
pub(crate) fn container<M: Clone + 'static>(
    children: Vec<Component<M>>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Plain, &style, &layout, context);
    let mailbox = Mailbox::new();
    let mut tasks: Vec<AfterLayoutTask> = Vec::new();

    for child in children {
        let rendered = render_component(child, context);
        view.add_subview(&rendered.view);
        if let Some(child_mailbox) = &rendered.mailbox {
            child_mailbox.forward(&mailbox);
        }
        tasks.extend(rendered.after_layout);
    }

    let render = Render::new(view).with_mailbox(mailbox);
    if tasks.is_empty() {
        render
    } else {
        render.with_after_layout(move || {
            for task in tasks {
                task();
            }
        })
    }
}

/// Adds the gesture to the child's view. The gesture dispatches into the
/// child's mailbox so the child's own messages keep flowing.
pub(crate) fn touchable<M: Clone + 'static>(
    gesture: Gesture<M>,
    child: Component<M>,
    context: &RenderContext<M>,
) -> Render<M> {
    let Render {
        view,
        mailbox,
        after_layout,
    } = render_component(child, context);
    let mailbox = mailbox.unwrap_or_default();

    match gesture {
        Gesture::Tap(message) => {
            let sink = mailbox.clone();
            view.set_user_interaction_enabled(true);
            view.on(ControlEvent::Tap, move |_| sink.dispatch(message.clone()));
        }
    }

    Render {
        view,
        mailbox: Some(mailbox),
        after_layout,
    }
}

/// Hands the view to the host's custom component renderer along with a
/// fresh mailbox to dispatch into.
pub(crate) fn custom<M: Clone + 'static>(
    identifier: String,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Custom, &style, &layout, context);
    view.set_content(ViewContent::Custom {
        identifier: identifier.clone(),
    });

    let mailbox = Mailbox::new();
    context
        .custom_components
        .render_component(&identifier, &view, &mailbox);
    Render::new(view).with_mailbox(mailbox)
}

#[cfg(test)]
mod tests {
    use crate::custom::CustomComponentRegistry;
    use crate::dispatcher::ControlEvent;
    use crate::render::{RenderContext, render_component};
    use crate::view::{View, ViewKind};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tessera_component::{
        ButtonProperties, Gesture, LabelProperties, Layout, StyleSheet, button, container,
        custom, label, label_with, touchable,
    };
    use tessera_core::{Config, Mailbox};

    fn record<M: Clone + 'static>(mailbox: &Mailbox<M>) -> Rc<RefCell<Vec<M>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mailbox.subscribe(move |message: &M| sink.borrow_mut().push(message.clone()));
        log
    }

    #[test]
    fn test_container_merges_children_in_order() {
        let context = RenderContext::new(Config::default());
        let rendered = render_component(
            container(vec![
                button(ButtonProperties::new("first").on_tap(1)),
                label("between"),
                container(vec![button(ButtonProperties::new("second").on_tap(2))]),
            ]),
            &context,
        );
        let log = record(rendered.mailbox.as_ref().unwrap());

        assert_eq!(rendered.view.subviews().len(), 3);
        rendered.view.find_by_text("second").unwrap().simulate_tap();
        rendered.view.find_by_text("first").unwrap().simulate_tap();
        assert_eq!(*log.borrow(), vec![2, 1]);
    }

    #[test]
    fn test_container_runs_child_tasks_in_order() {
        let context = RenderContext::<()>::new(Config::default());
        let rendered = render_component(
            container(vec![
                label_with(
                    LabelProperties::new("a").text_after_layout("A"),
                    StyleSheet::default(),
                    Layout::default(),
                ),
                label_with(
                    LabelProperties::new("b").text_after_layout("B"),
                    StyleSheet::default(),
                    Layout::default(),
                ),
            ]),
            &context,
        );

        (rendered.after_layout.unwrap())();
        let texts: Vec<_> = rendered
            .view
            .subviews()
            .iter()
            .filter_map(View::text)
            .collect();
        assert_eq!(texts, vec!["A", "B"]);
    }

    #[test]
    fn test_touchable_without_child_mailbox() {
        let context = RenderContext::new(Config::default());
        let rendered = render_component(touchable(Gesture::Tap("touched"), label("tap me")), &context);
        let log = record(rendered.mailbox.as_ref().unwrap());

        assert!(rendered.view.is_user_interaction_enabled());
        assert!(rendered.view.simulate_tap());
        assert_eq!(*log.borrow(), vec!["touched"]);
    }

    #[test]
    fn test_touchable_keeps_child_messages() {
        let context = RenderContext::new(Config::default());
        let rendered = render_component(
            touchable(
                Gesture::Tap("gesture"),
                button(ButtonProperties::new("b").on_tap("button")),
            ),
            &context,
        );
        let log = record(rendered.mailbox.as_ref().unwrap());

        assert_eq!(rendered.view.send_action(ControlEvent::Tap), 2);
        assert_eq!(*log.borrow(), vec!["button", "gesture"]);
    }

    #[test]
    fn test_custom_component_gets_fresh_mailbox() {
        let seen: Rc<RefCell<Vec<Mailbox<&'static str>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut registry = CustomComponentRegistry::new();
        registry.register("badge", move |view: &View, mailbox: &Mailbox<&'static str>| {
            assert_eq!(view.kind(), ViewKind::Custom);
            sink.borrow_mut().push(mailbox.clone());
            mailbox.dispatch("ignored before subscription");
        });
        let context = RenderContext::new(Config::default()).with_custom_components(registry);

        let first = render_component(custom("badge"), &context);
        let second = render_component(custom("badge"), &context);
        let first_mailbox = first.mailbox.unwrap();
        let second_mailbox = second.mailbox.unwrap();

        assert!(!first_mailbox.ptr_eq(&second_mailbox));
        assert!(seen.borrow()[0].ptr_eq(&first_mailbox));
        let log = record(&first_mailbox);
        seen.borrow()[0].dispatch("from host");
        assert_eq!(*log.borrow(), vec!["from host"]);
    }
}
