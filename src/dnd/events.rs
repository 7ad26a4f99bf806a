use std::cell::{Cell, RefCell};
use std::rc::Rc;

use egui::Pos2;

use super::geometry::event_position;
use super::host::PointerEvent;
use super::session::DraggableSession;
use super::types::NodeId;

/// Session lifecycle events, always observed in `Start` → `Dragging`* → `Complete` order
/// for one interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Start,
    Dragging,
    Complete,
}

/// Token returned by [`DraggableSession::on`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

/// A lifecycle event dispatched to session subscribers.
///
/// Wraps the underlying input sample with `prevent_default` / `stop_propagation`
/// semantics. A `Complete` event produced by cancellation arrives with the
/// default-prevented flag already set, which is how callers distinguish a cancel from a
/// real release.
pub struct DragEvent<P> {
    kind: EventKind,
    session: DraggableSession<P>,
    pointer: PointerEvent,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl<P> DragEvent<P> {
    pub(super) fn new(kind: EventKind, session: DraggableSession<P>, pointer: PointerEvent) -> Self {
        Self {
            kind,
            session,
            pointer,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub(super) fn cancelled(session: DraggableSession<P>) -> Self {
        let ev = Self::new(EventKind::Complete, session, PointerEvent::Synthetic);
        ev.default_prevented.set(true);
        ev
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// The session this event originated from.
    pub fn session(&self) -> &DraggableSession<P> {
        &self.session
    }

    pub fn element(&self) -> NodeId {
        self.session.element()
    }

    /// The underlying native input sample.
    pub fn pointer(&self) -> &PointerEvent {
        &self.pointer
    }

    /// Pointer position, unwrapped from the underlying input sample.
    pub fn position(&self) -> Pos2 {
        event_position(&self.pointer)
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Which side of the drop protocol a [`DropEvent`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DropEventKind {
    /// The pointer entered the target while dragging.
    Hover,
    /// The drag was released over the target.
    Complete,
}

/// Event handed to a drop target's hover/complete callbacks.
///
/// `prevent_default` on a hover event suppresses the `Accept` feedback marker;
/// on a complete event it suppresses the DOM re-parenting step (the model binding is
/// applied regardless, see the drop protocol on the coordinator).
pub struct DropEvent<P> {
    kind: DropEventKind,
    session: DraggableSession<P>,
    target: NodeId,
    pointer: PointerEvent,
    default_prevented: Cell<bool>,
}

impl<P> DropEvent<P> {
    pub(super) fn new(
        kind: DropEventKind,
        session: DraggableSession<P>,
        target: NodeId,
        pointer: PointerEvent,
    ) -> Self {
        Self {
            kind,
            session,
            target,
            pointer,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> DropEventKind {
        self.kind
    }

    pub fn session(&self) -> &DraggableSession<P> {
        &self.session
    }

    /// The drop target element under the pointer.
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn pointer(&self) -> &PointerEvent {
        &self.pointer
    }

    pub fn position(&self) -> Pos2 {
        event_position(&self.pointer)
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl<P: Clone> DropEvent<P> {
    /// The dragged payload carried through the interaction, if any.
    pub fn payload(&self) -> Option<P> {
        self.session.data()
    }
}

type Handler<P> = Rc<dyn Fn(&DragEvent<P>)>;

/// Per-session event bus: event kind → ordered list of handlers.
///
/// Emission iterates a snapshot of the handler list, so a handler may subscribe or
/// unsubscribe (itself included) without invalidating the iteration. Handler panics are
/// not caught; these run in the UI dispatch context and suppressing them would hide
/// application bugs.
pub(super) struct EventBus<P> {
    handlers: RefCell<ahash::HashMap<EventKind, Vec<(HandlerId, Handler<P>)>>>,
    next_id: Cell<u64>,
}

impl<P> Default for EventBus<P> {
    fn default() -> Self {
        Self {
            handlers: RefCell::new(ahash::HashMap::default()),
            next_id: Cell::new(1),
        }
    }
}

impl<P> EventBus<P> {
    pub(super) fn on(&self, kind: EventKind, handler: Handler<P>) -> HandlerId {
        let id = HandlerId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.handlers
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push((id, handler));
        id
    }

    /// Remove a previously subscribed handler. Returns whether it was present.
    pub(super) fn off(&self, kind: EventKind, id: HandlerId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let Some(list) = handlers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(hid, _)| *hid != id);
        list.len() != before
    }

    pub(super) fn emit(&self, event: &DragEvent<P>) {
        // Snapshot first: handlers may mutate the subscription list while we iterate.
        let snapshot: Vec<Handler<P>> = {
            let handlers = self.handlers.borrow();
            handlers
                .get(&event.kind())
                .map(|list| list.iter().map(|(_, h)| Rc::clone(h)).collect())
                .unwrap_or_default()
        };
        for handler in snapshot {
            handler(event);
        }
    }
}
