//! Pointer drag & drop engine: a drag lifecycle state machine plus drop-zone
//! hit-testing, decoupled from any concrete rendering surface through the
//! [`VisualHost`] trait.

#![forbid(unsafe_code)]

pub mod dnd;

pub use dnd::{
    DragCoordinator, DragEvent, DragOptions, DraggableSession, DropBinding, DropCallback,
    DropEvent, DropEventKind, DropTarget, EventKind, Feedback, HandlerId, IndicatorContent,
    IndicatorFactory, IndicatorSpec, NodeId, Placement, PointerEvent, TemplateRegistryError,
    VisualHost, event_distance, event_position,
};
