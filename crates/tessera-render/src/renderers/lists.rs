//! List hosts. The host view owns its controller; cells are materialized
//! after layout, once the host knows its size.

use super::styled_view;
use crate::list::{CarouselController, CollectionController, TableController};
use crate::render::{Render, RenderContext};
use crate::view::ViewKind;
use std::rc::Rc;
use tessera_component::{
    CarouselProperties, CollectionProperties, EmptyStyleSheet, Layout, StyleSheet,
    TableProperties, TableStyleSheet,
};

pub(crate) fn table<M: Clone + 'static>(
    properties: TableProperties<M>,
    style: StyleSheet<TableStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Table, &style, &layout, context);
    let controller = TableController::new(&view, properties, context.clone());
    let mailbox = controller.mailbox();
    let weak = Rc::downgrade(&controller);
    view.set_controller(controller);

    Render::new(view).with_mailbox(mailbox).with_after_layout(move || {
        if let Some(controller) = weak.upgrade() {
            if let Err(error) = controller.reload() {
                tracing::error!(%error, "Failed to reload table");
            }
        }
    })
}

pub(crate) fn collection<M: Clone + 'static>(
    properties: CollectionProperties<M>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Collection, &style, &layout, context);
    let controller = CollectionController::new(&view, properties, context.clone());
    let mailbox = controller.mailbox();
    let weak = Rc::downgrade(&controller);
    view.set_controller(controller);

    Render::new(view).with_mailbox(mailbox).with_after_layout(move || {
        if let Some(controller) = weak.upgrade() {
            if let Err(error) = controller.reload() {
                tracing::error!(%error, "Failed to reload collection");
            }
        }
    })
}

pub(crate) fn carousel<M: Clone + 'static>(
    properties: CarouselProperties<M>,
    style: StyleSheet<EmptyStyleSheet>,
    layout: Layout,
    context: &RenderContext<M>,
) -> Render<M> {
    let view = styled_view(ViewKind::Carousel, &style, &layout, context);
    let controller = CarouselController::new(&view, properties, context.clone());
    let mailbox = controller.mailbox();
    let weak = Rc::downgrade(&controller);
    view.set_controller(controller);

    Render::new(view).with_mailbox(mailbox).with_after_layout(move || {
        if let Some(controller) = weak.upgrade() {
            if let Err(error) = controller.reload() {
                tracing::error!(%error, "Failed to reload carousel");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use crate::geometry::Frame;
    use crate::list::{CarouselController, TableController};
    use crate::render::RenderContext;
    use crate::renderer::{ComponentRenderer, Renderer};
    use crate::view::{View, ViewKind};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tessera_component::{
        CarouselProperties, Flex, Layout, TableProperties, ZipList, carousel, carousel_item,
        container, label, table, table_item,
    };
    use tessera_core::Config;

    #[test]
    fn test_table_in_container_renders_visible_rows_lazily() {
        let invoked = Rc::new(RefCell::new(Vec::new()));
        let items = (0..100)
            .map(|row| {
                let invoked = Rc::clone(&invoked);
                table_item(44, "row", move || {
                    invoked.borrow_mut().push(row);
                    label(format!("row {row}"))
                })
                .on_tap(row)
            })
            .collect();
        let renderer = ComponentRenderer::new(
            View::with_frame(ViewKind::Screen, Frame::sized(320.0, 200.0)),
            RenderContext::new(Config::default()),
        );

        let mailbox = renderer
            .render(container(vec![
                table(TableProperties::new(items))
                    .with_layout(Layout::new().with_flex(Flex::grow(1.0))),
            ]))
            .unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        mailbox.subscribe(move |row: &usize| sink.borrow_mut().push(*row));

        assert_eq!(*invoked.borrow(), vec![0, 1, 2, 3, 4]);
        let table_view = renderer.container().find_by_kind(ViewKind::Table).unwrap();
        assert_eq!(table_view.frame().height, 200.0);
        let controller = table_view.controller::<TableController<usize>>().unwrap();
        assert_eq!(controller.visible_rows().len(), 5);

        table_view.find_by_text("row 3").unwrap().simulate_tap();
        assert_eq!(*log.borrow(), vec![3]);
    }

    #[test]
    fn test_carousel_host_owns_controller() {
        let items = ZipList::new(
            vec![carousel_item("page", || label::<()>("a"))],
            carousel_item("page", || label("b")),
            vec![],
        );
        let context = RenderContext::new(Config::default());
        let scheduler = context.scheduler.clone();
        let renderer = ComponentRenderer::new(
            View::with_frame(ViewKind::Screen, Frame::sized(100.0, 100.0)),
            context,
        );
        renderer
            .render(carousel(CarouselProperties::new(Some(items), 100, 100)))
            .unwrap();

        let host = renderer.rendered_view().unwrap();
        let controller = host.controller::<CarouselController<()>>().unwrap();
        assert_eq!(controller.selected_index(), 1);
        scheduler.run_pending();
        assert_eq!(controller.offset(), 100.0);
        assert!(host.find_by_text("b").is_some());
    }
}
