mod events;
mod geometry;
mod host;
mod indicator;
mod options;
mod registry;
mod session;
mod target;
mod types;

#[cfg(test)]
mod mock_host;


pub use events::{DragEvent, DropEvent, DropEventKind, EventKind, HandlerId};
pub use geometry::{event_distance, event_position};
pub use host::{Feedback, IndicatorContent, IndicatorSpec, PointerEvent, VisualHost};
pub use options::{DragOptions, IndicatorFactory, Placement};
pub use registry::TemplateRegistryError;
pub use session::DraggableSession;
pub use target::{DropBinding, DropCallback, DropTarget};
pub use types::NodeId;

use registry::TemplateRegistry;
use session::Phase;
use target::types_compatible;

/// Registry and drop resolution for all draggable elements and drop targets of one
/// application surface.
///
/// Construct one per application (multiple independent coordinators are fine, e.g. in
/// tests) and route the host's input events through it:
/// - `pointer_down` / `pointer_move` / `pointer_up` / `pointer_leave` for the pointer
///   stream of draggable elements;
/// - `pointer_over` / `pointer_out` for native hover events on drop targets
///   (mouse environments only — on touch hosts the coordinator instead hit-tests every
///   registered target on each move, since hover events are unreliable for touch).
///
/// Overlapping drop targets resolve by registration order, not visual stacking order.
pub struct DragCoordinator<P> {
    options: DragOptions,
    templates: TemplateRegistry,
    sessions: ahash::HashMap<NodeId, DraggableSession<P>>,
    targets: Vec<DropTarget<P>>,

    /// Element that received the pointer-down of the current interaction. While set,
    /// further pointer-downs are ignored (single pointer stream, single active drag).
    capture: Option<NodeId>,
    active: Option<NodeId>,
    /// Index into `targets`; `None` while the pointer is not over a compatible target.
    dropzone: Option<usize>,

    dragging: bool,
    settle_pending: bool,

    /// Captured once at construction; treated as static for the process lifetime.
    touch: bool,
}

impl<P> DragCoordinator<P> {
    pub fn new(host: &dyn VisualHost<P>) -> Self {
        Self::new_with_options(host, DragOptions::default())
    }

    pub fn new_with_options(host: &dyn VisualHost<P>, options: DragOptions) -> Self {
        Self {
            options,
            templates: TemplateRegistry::default(),
            sessions: ahash::HashMap::default(),
            targets: Vec::new(),
            capture: None,
            active: None,
            dropzone: None,
            dragging: false,
            settle_pending: false,
            touch: host.touch_capable(),
        }
    }

    /// Make an element draggable. Idempotent: the same element always yields the same
    /// session, with no duplicate bookkeeping, so re-registration mid-drag is harmless.
    pub fn register(&mut self, element: NodeId) -> DraggableSession<P> {
        if let Some(session) = self.sessions.get(&element) {
            return session.clone();
        }
        let session = DraggableSession::new(element);
        session.apply_options(&self.options);
        self.sessions.insert(element, session.clone());
        log::debug!("registered draggable {element}");
        session
    }

    /// Register a drop target. Idempotent by element identity: a second registration for
    /// the same element is ignored. Registration order is the overlap tie-break.
    pub fn add_drop_target(&mut self, target: DropTarget<P>) {
        if self.targets.iter().any(|t| t.element == target.element) {
            return;
        }
        log::debug!("registered drop target {}", target.element);
        self.targets.push(target);
    }

    /// Update the type tag of an already-registered drop target. Returns whether the
    /// element was registered.
    pub fn set_drop_type(&mut self, element: NodeId, drop_type: Option<&str>) -> bool {
        match self.targets.iter_mut().find(|t| t.element == element) {
            Some(target) => {
                target.drop_type = drop_type.map(str::to_owned);
                true
            }
            None => false,
        }
    }

    /// Register a named indicator template for the default indicator factory.
    ///
    /// # Errors
    /// Fails if a template is already registered for this key; that is a setup mistake,
    /// not a runtime condition.
    pub fn register_indicator(
        &mut self,
        markup: impl Into<String>,
        drag_type: Option<&str>,
    ) -> Result<(), TemplateRegistryError> {
        self.templates.register(markup, drag_type)
    }

    /// True from the moment a drag is confirmed until the post-drop [`Self::settle`]
    /// call. Deliberately still true while the release's same-tick click fires, so click
    /// handlers can suppress themselves after a drag.
    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// The currently active session, if a drag is in progress.
    pub fn active(&self) -> Option<DraggableSession<P>> {
        self.active
            .and_then(|element| self.sessions.get(&element))
            .cloned()
    }

    /// Finish deferred post-drop cleanup. The host adapter must call this on the
    /// scheduler tick after a drag ends.
    pub fn settle(&mut self) {
        if self.settle_pending {
            self.settle_pending = false;
            self.dragging = false;
        }
    }

    /// Pointer-down on a draggable element. Arms the session; dragging starts only once
    /// the pointer travels past the start distance.
    pub fn pointer_down(&mut self, element: NodeId, event: &PointerEvent) {
        if self.capture.is_some() {
            return;
        }
        let Some(session) = self.sessions.get(&element) else {
            return;
        };
        session.arm(event);
        self.capture = Some(element);
    }

    /// Pointer left a draggable element. Aborts a pending (pre-threshold) interaction;
    /// an active drag is unaffected.
    pub fn pointer_leave(&mut self, element: NodeId) {
        if self.capture != Some(element) {
            return;
        }
        let Some(session) = self.sessions.get(&element) else {
            return;
        };
        if session.phase() == Phase::Pending {
            session.disarm();
            self.capture = None;
        }
    }

    /// Pointer movement for the captured interaction.
    pub fn pointer_move(&mut self, host: &mut dyn VisualHost<P>, event: &PointerEvent) {
        let Some(element) = self.capture else {
            return;
        };
        let Some(session) = self.sessions.get(&element).cloned() else {
            return;
        };
        match session.phase() {
            Phase::Pending => {
                if session.threshold_exceeded(event) {
                    let drag_type = session.drag_type();
                    let content = self.resolve_indicator_content(drag_type.as_deref());
                    self.active = Some(element);
                    self.dragging = true;
                    self.settle_pending = false;
                    session.begin_drag(host, content, event);
                    log::debug!("drag start {element}");
                }
            }
            Phase::Dragging => {
                session.drag_to(host, event);
                if self.touch {
                    self.poll_dropzone(host, &session, event);
                }
            }
            Phase::Idle => {}
        }
    }

    /// Native hover entered a registered drop target (mouse environments).
    pub fn pointer_over(
        &mut self,
        host: &mut dyn VisualHost<P>,
        element: NodeId,
        event: &PointerEvent,
    ) {
        if !self.dragging {
            return;
        }
        let Some(session) = self.active() else {
            return;
        };
        let drag_type = session.drag_type();
        let Some(index) = self.targets.iter().position(|t| t.element == element) else {
            return;
        };
        let compatible = self
            .targets
            .get(index)
            .is_some_and(|t| types_compatible(drag_type.as_deref(), t.drop_type.as_deref()));
        if !compatible {
            return;
        }
        if self.dropzone == Some(index) {
            return;
        }
        // Hosts may deliver the next target's over-event before the previous
        // target's out-event; the old zone still needs its leave bookkeeping.
        if self.dropzone.is_some() {
            self.leave_dropzone(host);
        }
        self.enter_dropzone(host, index, &session, event);
    }

    /// Native hover left the current drop target (mouse environments).
    pub fn pointer_out(&mut self, host: &mut dyn VisualHost<P>) {
        self.leave_dropzone(host);
    }

    fn resolve_indicator_content(&self, drag_type: Option<&str>) -> IndicatorContent {
        if let Some(factory) = &self.options.indicator_factory {
            if let Some(content) = factory(drag_type) {
                return content;
            }
        }
        if let Some(markup) = self.templates.lookup(drag_type) {
            return IndicatorContent::Template(markup.to_owned());
        }
        IndicatorContent::Snapshot
    }

    /// Touch hit-testing: first registered target whose current box contains the pointer
    /// and whose type tag is compatible with the active drag.
    fn poll_dropzone(
        &mut self,
        host: &mut dyn VisualHost<P>,
        session: &DraggableSession<P>,
        event: &PointerEvent,
    ) {
        let pos = event_position(event);
        let drag_type = session.drag_type();
        let hit = self.targets.iter().position(|t| {
            host.node_rect(t.element).contains(pos)
                && types_compatible(drag_type.as_deref(), t.drop_type.as_deref())
        });
        match hit {
            Some(index) if self.dropzone == Some(index) => {}
            Some(index) => {
                if self.dropzone.is_some() {
                    self.leave_dropzone(host);
                }
                self.enter_dropzone(host, index, session, event);
            }
            None => self.leave_dropzone(host),
        }
    }

    fn enter_dropzone(
        &mut self,
        host: &mut dyn VisualHost<P>,
        index: usize,
        session: &DraggableSession<P>,
        event: &PointerEvent,
    ) {
        let Some(target) = self.targets.get(index) else {
            return;
        };
        self.dropzone = Some(index);
        host.set_drop_highlight(target.element, true);
        log::trace!("drop zone enter {}", target.element);

        let hover = DropEvent::new(
            DropEventKind::Hover,
            session.clone(),
            target.element,
            event.clone(),
        );
        if let Some(callback) = &target.on_hover {
            callback(&hover);
        }
        if !hover.is_default_prevented() {
            session.set_feedback(host, Feedback::Accept);
        }
    }

    fn leave_dropzone(&mut self, host: &mut dyn VisualHost<P>) {
        if let Some(index) = self.dropzone.take() {
            if let Some(target) = self.targets.get(index) {
                host.set_drop_highlight(target.element, false);
                log::trace!("drop zone leave {}", target.element);
            }
        }
        if let Some(session) = self.active() {
            session.set_feedback(host, Feedback::Reject);
        }
    }
}

impl<P: Clone> DragCoordinator<P> {
    /// Pointer released. A pre-threshold release quietly disarms; an active drag runs
    /// the drop-completion protocol.
    pub fn pointer_up(&mut self, host: &mut dyn VisualHost<P>, event: &PointerEvent) {
        let Some(element) = self.capture.take() else {
            return;
        };
        let Some(session) = self.sessions.get(&element).cloned() else {
            return;
        };
        if session.finish(host, event.clone(), false) {
            self.complete_drop(host, &session, event);
        }
    }

    /// Cancel the active drag, if any. Unwinds through the normal cleanup path — exactly
    /// one `Complete` emission (default-prevented), indicator removed — with no
    /// drop-zone side effects regardless of the current pointer position.
    pub fn cancel(&mut self, host: &mut dyn VisualHost<P>) -> bool {
        let Some(element) = self.active else {
            return false;
        };
        let Some(session) = self.sessions.get(&element).cloned() else {
            return false;
        };
        if let Some(index) = self.dropzone.take() {
            if let Some(target) = self.targets.get(index) {
                host.set_drop_highlight(target.element, false);
            }
        }
        session.finish(host, PointerEvent::Synthetic, true);
        self.capture = None;
        self.active = None;
        self.settle_pending = true;
        log::debug!("drag cancelled {element}");
        true
    }

    /// The drop-completion protocol.
    ///
    /// The `dragging` flag stays set until [`Self::settle`]: the click event that fires
    /// synchronously right after a release must still observe it, or drag releases get
    /// misread as clicks. The completion callback runs before re-parenting, and the
    /// model binding applies regardless of `prevent_default`.
    fn complete_drop(
        &mut self,
        host: &mut dyn VisualHost<P>,
        session: &DraggableSession<P>,
        event: &PointerEvent,
    ) {
        self.settle_pending = true;

        let Some(index) = self.dropzone.take() else {
            // Released outside any compatible target: silent no-op drop.
            self.active = None;
            log::debug!("drag complete {} (no drop zone)", session.element());
            return;
        };
        let Some(target) = self.targets.get(index) else {
            self.active = None;
            return;
        };
        host.set_drop_highlight(target.element, false);

        let complete = DropEvent::new(
            DropEventKind::Complete,
            session.clone(),
            target.element,
            event.clone(),
        );
        if let Some(callback) = &target.on_complete {
            callback(&complete);
        }
        if !complete.is_default_prevented() {
            host.reparent(session.element(), target.element);
        }
        if let (Some(binding), Some(payload)) = (&target.binding, session.data()) {
            binding.apply(&payload);
        }
        log::debug!("drop complete {} -> {}", session.element(), target.element);
        self.active = None;
    }
}
