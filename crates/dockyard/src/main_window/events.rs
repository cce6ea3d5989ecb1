//! Event delivery.

use dockyard_core::logging::targets;
use dockyard_core::{ConnectionId, Signal, WidgetId};

use super::MainWindow;
use crate::event::{Event, Listener};

impl MainWindow {
    /// Register a handler for events fired by `id`.
    ///
    /// Handlers run in connection order, before the central handler.
    /// Returns `None` for unknown widgets.
    pub fn connect<F>(&mut self, id: WidgetId, handler: F) -> Option<ConnectionId>
    where
        F: FnMut(&Event) + 'static,
    {
        if !self.nodes.contains_key(id) {
            return None;
        }
        if !self.handlers.contains_key(id) {
            self.handlers.insert(id, Signal::new());
        }
        self.handlers.get_mut(id).map(|signal| signal.connect(handler))
    }

    /// Remove a handler registered with [`connect`](Self::connect).
    pub fn disconnect(&mut self, id: WidgetId, connection: ConnectionId) -> bool {
        self.handlers
            .get_mut(id)
            .is_some_and(|signal| signal.disconnect(connection))
    }

    /// Set the centralized handler, which sees every event after the
    /// per-widget handlers.
    pub fn set_event_handler<F>(&mut self, handler: F)
    where
        F: FnMut(&Event) + 'static,
    {
        self.central_handler = Some(Box::new(handler));
    }

    pub fn clear_event_handler(&mut self) {
        self.central_handler = None;
    }

    /// Block or unblock every event fired by `id`.
    ///
    /// While blocked, the widget's handlers, the central handler and its
    /// internal listeners are all skipped.
    pub fn set_events_blocked(&mut self, id: WidgetId, blocked: bool) {
        if !self.nodes.contains_key(id) {
            return;
        }
        if !self.handlers.contains_key(id) {
            self.handlers.insert(id, Signal::new());
        }
        if let Some(signal) = self.handlers.get_mut(id) {
            signal.set_blocked(blocked);
        }
    }

    pub fn events_blocked(&self, id: WidgetId) -> bool {
        self.handlers.get(id).is_some_and(Signal::is_blocked)
    }

    /// Deliver an event: widget handlers, then the central handler, then the
    /// internal `listeners` of the firing code.
    pub(crate) fn emit(&mut self, event: Event, listeners: &[Listener]) {
        if self.events_blocked(event.source) {
            tracing::trace!(target: targets::INPUT, source = ?event.source, kind = ?event.kind, "emit blocked");
            return;
        }
        tracing::trace!(target: targets::INPUT, source = ?event.source, kind = ?event.kind, "emit");

        if let Some(signal) = self.handlers.get_mut(event.source) {
            signal.emit(&event);
        }
        if let Some(handler) = self.central_handler.as_mut() {
            handler(&event);
        }
        for listener in listeners {
            listener(self, &event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dockyard_core::Size;
    use dockyard_render::RecordingRenderer;

    use super::*;
    use crate::event::EventKind;

    thread_local! {
        static LISTENED: RefCell<Vec<&'static str>> = const { RefCell::new(Vec::new()) };
    }

    fn listener(_ui: &mut MainWindow, _event: &Event) {
        LISTENED.with(|l| l.borrow_mut().push("listener"));
    }

    #[test]
    fn test_delivery_order() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(100, 100))
            .expect("recording renderer never fails");
        let source = ui.create_container();
        let order = Rc::new(RefCell::new(Vec::new()));

        let o = order.clone();
        ui.connect(source, move |_| o.borrow_mut().push("first"));
        let o = order.clone();
        ui.connect(source, move |_| o.borrow_mut().push("second"));
        let o = order.clone();
        ui.set_event_handler(move |_| o.borrow_mut().push("central"));

        ui.emit(Event::new(source, EventKind::ButtonPressed), &[listener]);

        assert_eq!(*order.borrow(), vec!["first", "second", "central"]);
        LISTENED.with(|l| assert_eq!(*l.borrow(), vec!["listener"]));
    }

    fn counting_listener(_ui: &mut MainWindow, _event: &Event) {
        LISTENED.with(|l| l.borrow_mut().push("counted"));
    }

    #[test]
    fn test_blocked_source_skips_all_delivery() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(100, 100))
            .expect("recording renderer never fails");
        let source = ui.create_container();
        let order = Rc::new(RefCell::new(Vec::new()));
        let o = order.clone();
        ui.set_event_handler(move |_| o.borrow_mut().push("central"));

        ui.set_events_blocked(source, true);
        assert!(ui.events_blocked(source));
        ui.emit(Event::new(source, EventKind::ButtonPressed), &[counting_listener]);
        assert!(order.borrow().is_empty());
        LISTENED.with(|l| assert!(l.borrow().is_empty()));

        ui.set_events_blocked(source, false);
        ui.emit(Event::new(source, EventKind::ButtonPressed), &[counting_listener]);
        assert_eq!(*order.borrow(), vec!["central"]);
        LISTENED.with(|l| assert_eq!(*l.borrow(), vec!["counted"]));
    }

    #[test]
    fn test_disconnect() {
        let mut ui = MainWindow::new(Box::new(RecordingRenderer::new()), Size::new(100, 100))
            .expect("recording renderer never fails");
        let source = ui.create_container();
        let count = Rc::new(RefCell::new(0));
        let c = count.clone();
        let conn = ui
            .connect(source, move |_| *c.borrow_mut() += 1)
            .expect("live widget");

        assert!(ui.disconnect(source, conn));
        ui.emit(Event::new(source, EventKind::ButtonPressed), &[]);
        assert_eq!(*count.borrow(), 0);
        assert!(!ui.disconnect(source, conn));
    }
}
