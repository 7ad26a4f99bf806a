use std::cell::RefCell;
use std::rc::Rc;

use egui::{Pos2, Rect};

use super::events::{DragEvent, EventBus, EventKind, HandlerId};
use super::geometry::{event_distance, event_position};
use super::host::{Feedback, IndicatorContent, IndicatorSpec, PointerEvent, VisualHost};
use super::indicator::{PlacementInput, indicator_pos};
use super::options::DragOptions;
use super::types::NodeId;

/// Where one interaction currently stands.
///
/// `Completed`/`Cancelled` are transient: the machine emits `Complete` and immediately
/// resets to `Idle` so the element is ready for the next interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Phase {
    Idle,
    /// Pointer is down but the start-distance threshold has not been crossed yet.
    /// Time-unbounded: it ends on travel distance or pointer-up, never on a timer.
    Pending,
    Dragging,
}

struct SessionState<P> {
    element: NodeId,
    payload: Option<P>,
    drag_type: Option<String>,
    options: DragOptions,
    phase: Phase,
    /// The down event that armed this interaction.
    down: Option<PointerEvent>,
    current: Pos2,
    /// Source element box captured at drag start, the clone placement anchor.
    origin: Rect,
    indicator: Option<NodeId>,
}

struct SessionShared<P> {
    state: RefCell<SessionState<P>>,
    bus: EventBus<P>,
}

/// One element's drag lifecycle: pending → dragging → complete, indicator included.
///
/// Cheaply clonable handle; [`super::DragCoordinator::register`] returns the same
/// underlying session for the same element every time. Exactly one session is in the
/// dragging phase process-wide, enforced by the coordinator's pointer capture.
///
/// To cancel an in-progress drag, call [`super::DragCoordinator::cancel`]; the
/// coordinator's capture and drop-zone bookkeeping have to unwind together with the
/// session, so there is no session-level cancel.
pub struct DraggableSession<P> {
    shared: Rc<SessionShared<P>>,
}

impl<P> Clone for DraggableSession<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<P> std::fmt::Debug for DraggableSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.borrow();
        f.debug_struct("DraggableSession")
            .field("element", &state.element)
            .field("phase", &state.phase)
            .field("drag_type", &state.drag_type)
            .finish_non_exhaustive()
    }
}

impl<P> DraggableSession<P> {
    pub(super) fn new(element: NodeId) -> Self {
        Self {
            shared: Rc::new(SessionShared {
                state: RefCell::new(SessionState {
                    element,
                    payload: None,
                    drag_type: None,
                    options: DragOptions::default(),
                    phase: Phase::Idle,
                    down: None,
                    current: Pos2::ZERO,
                    origin: Rect::ZERO,
                    indicator: None,
                }),
                bus: EventBus::default(),
            }),
        }
    }

    /// Whether two handles refer to the same session.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    pub fn element(&self) -> NodeId {
        self.shared.state.borrow().element
    }

    pub fn dragging(&self) -> bool {
        self.shared.state.borrow().phase == Phase::Dragging
    }

    pub fn set_data(&self, payload: P) {
        self.shared.state.borrow_mut().payload = Some(payload);
    }

    pub fn data(&self) -> Option<P>
    where
        P: Clone,
    {
        self.shared.state.borrow().payload.clone()
    }

    /// Type tag used for drop-target compatibility matching. `None` means untyped,
    /// which only matches untyped targets.
    pub fn set_drag_type(&self, drag_type: Option<&str>) {
        self.shared.state.borrow_mut().drag_type = drag_type.map(str::to_owned);
    }

    pub fn drag_type(&self) -> Option<String> {
        self.shared.state.borrow().drag_type.clone()
    }

    /// Subscribe to a lifecycle event. Handlers for one kind run in subscription order.
    pub fn on(&self, kind: EventKind, handler: impl Fn(&DragEvent<P>) + 'static) -> HandlerId {
        self.shared.bus.on(kind, Rc::new(handler))
    }

    /// Unsubscribe a handler. Returns whether it was still subscribed.
    pub fn off(&self, kind: EventKind, id: HandlerId) -> bool {
        self.shared.bus.off(kind, id)
    }

    /// Dispatch an event to this session's subscribers, synchronously and in order.
    pub fn emit(&self, event: &DragEvent<P>) {
        self.shared.bus.emit(event);
    }

    pub(super) fn phase(&self) -> Phase {
        self.shared.state.borrow().phase
    }

    pub(super) fn apply_options(&self, options: &DragOptions) {
        self.shared.state.borrow_mut().options = options.clone();
    }

    /// Idle → Pending on pointer-down. Ignored in any other phase.
    pub(super) fn arm(&self, event: &PointerEvent) {
        let mut state = self.shared.state.borrow_mut();
        if state.phase != Phase::Idle {
            return;
        }
        state.phase = Phase::Pending;
        state.current = event_position(event);
        state.down = Some(event.clone());
    }

    /// Pending → Idle without any event emission (release or pointer-leave before the
    /// threshold was crossed).
    pub(super) fn disarm(&self) {
        let mut state = self.shared.state.borrow_mut();
        if state.phase == Phase::Pending {
            state.phase = Phase::Idle;
            state.down = None;
        }
    }

    pub(super) fn threshold_exceeded(&self, event: &PointerEvent) -> bool {
        let state = self.shared.state.borrow();
        match &state.down {
            Some(down) => event_distance(down, event) > state.options.start_distance,
            None => false,
        }
    }

    /// Pending → Dragging: create and position the indicator, then emit `Start`.
    pub(super) fn begin_drag(
        &self,
        host: &mut dyn VisualHost<P>,
        content: IndicatorContent,
        event: &PointerEvent,
    ) {
        {
            let mut state = self.shared.state.borrow_mut();
            debug_assert_eq!(state.phase, Phase::Pending, "begin_drag outside Pending");
            state.phase = Phase::Dragging;
            state.origin = host.node_rect(state.element);
            state.current = event_position(event);

            let spec = IndicatorSpec {
                source: state.element,
                content,
                scale: state.options.indicator_scale,
                style: &state.options.indicator_style,
                show_feedback: state.options.show_feedback,
            };
            let indicator = host.create_indicator(&spec, state.payload.as_ref());
            state.indicator = Some(indicator);
            let pos = Self::placed(&state, host, indicator);
            host.move_indicator(indicator, pos);
        }
        self.emit(&DragEvent::new(EventKind::Start, self.clone(), event.clone()));
    }

    /// Dragging → Dragging: track the pointer and emit `Dragging`.
    pub(super) fn drag_to(&self, host: &mut dyn VisualHost<P>, event: &PointerEvent) {
        {
            let mut state = self.shared.state.borrow_mut();
            if state.phase != Phase::Dragging {
                return;
            }
            state.current = event_position(event);
            if let Some(indicator) = state.indicator {
                let pos = Self::placed(&state, host, indicator);
                host.move_indicator(indicator, pos);
            }
        }
        self.emit(&DragEvent::new(
            EventKind::Dragging,
            self.clone(),
            event.clone(),
        ));
    }

    /// Terminate the interaction. Removes the indicator and emits exactly one `Complete`
    /// if a drag was in progress; a pre-threshold release just disarms. Returns whether
    /// a drag actually ended.
    pub(super) fn finish(
        &self,
        host: &mut dyn VisualHost<P>,
        pointer: PointerEvent,
        cancelled: bool,
    ) -> bool {
        {
            let mut state = self.shared.state.borrow_mut();
            match state.phase {
                Phase::Idle => return false,
                Phase::Pending => {
                    state.phase = Phase::Idle;
                    state.down = None;
                    return false;
                }
                Phase::Dragging => {
                    state.phase = Phase::Idle;
                    state.down = None;
                    if let Some(indicator) = state.indicator.take() {
                        host.remove_indicator(indicator);
                    }
                }
            }
        }
        let event = if cancelled {
            DragEvent::cancelled(self.clone())
        } else {
            DragEvent::new(EventKind::Complete, self.clone(), pointer)
        };
        self.emit(&event);
        true
    }

    /// Update the indicator's accept/reject marker. No-op when feedback display is
    /// disabled or no indicator exists.
    pub(super) fn set_feedback(&self, host: &mut dyn VisualHost<P>, feedback: Feedback) {
        let state = self.shared.state.borrow();
        if !state.options.show_feedback {
            return;
        }
        if let Some(indicator) = state.indicator {
            host.set_feedback(indicator, feedback);
        }
    }

    fn placed(state: &SessionState<P>, host: &dyn VisualHost<P>, indicator: NodeId) -> Pos2 {
        let down = state
            .down
            .as_ref()
            .map(event_position)
            .unwrap_or(state.current);
        indicator_pos(
            state.options.placement,
            &PlacementInput {
                pointer: state.current,
                offset: state.options.drag_offset,
                indicator: host.node_rect(indicator),
                origin: state.origin,
                down,
            },
        )
    }
}
