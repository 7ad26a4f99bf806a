use egui::{Pos2, Rect};

use super::types::NodeId;

/// A pointer input sample, normalized over mouse and touch devices.
///
/// Touch samples carry the full active touch list; the engine only ever reads the first
/// point (multi-touch drags are out of scope). An empty touch list is not an error: it
/// degrades to a zero position (touch-end events legitimately carry no touch points).
#[derive(Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Mouse { pos: Pos2 },
    Touch { touches: Vec<Pos2> },
    /// Synthesized when a drag is cancelled programmatically; carries no position.
    Synthetic,
}

impl PointerEvent {
    pub fn mouse(x: f32, y: f32) -> Self {
        Self::Mouse {
            pos: Pos2::new(x, y),
        }
    }

    pub fn touch(touches: Vec<Pos2>) -> Self {
        Self::Touch { touches }
    }
}

/// Visual accept/reject marker shown on the indicator while hovering a drop target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feedback {
    Accept,
    Reject,
}

/// What the host should render as the drag indicator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndicatorContent {
    /// A caller-supplied markup template, instantiated by the host and bound against the
    /// session payload (the payload is handed to
    /// [`VisualHost::create_indicator`] alongside this spec).
    Template(String),
    /// A generated visual snapshot of the source node: hosts are expected to deep-clone
    /// the node with fully inlined computed styles and wrap it in a self-contained
    /// vector-image container, so the proxy renders identically wherever it is appended.
    Snapshot,
}

/// Everything the host needs to build one drag indicator.
#[derive(Clone, Debug)]
pub struct IndicatorSpec<'a> {
    /// The node being dragged (the snapshot source).
    pub source: NodeId,
    pub content: IndicatorContent,
    /// Uniform scale applied to the indicator.
    pub scale: f32,
    /// Inline style overrides, applied after the content is built.
    pub style: &'a [(String, String)],
    /// Whether a feedback marker should be attached. When true, the marker starts in the
    /// [`Feedback::Reject`] state.
    pub show_feedback: bool,
}

/// The rendering-surface capability the engine drives.
///
/// All geometry and node manipulation goes through this trait, so the drag state machine
/// and hit-testing are unit-testable without a real surface. Implementations must not
/// call back into the engine from these methods.
pub trait VisualHost<P> {
    /// Current bounding box of a node in viewport coordinates.
    ///
    /// Called on every query; layout can change mid-drag, so hosts must return fresh
    /// geometry rather than a cached box.
    fn node_rect(&self, node: NodeId) -> Rect;

    /// Whether this is a touch-driven environment. Read once per coordinator and treated
    /// as static for the process lifetime.
    fn touch_capable(&self) -> bool;

    /// Build a detached indicator node and return its handle. `payload` is present when
    /// the session carries data, for template binding.
    fn create_indicator(&mut self, spec: &IndicatorSpec<'_>, payload: Option<&P>) -> NodeId;

    /// Move the indicator so its top-left corner sits at `pos` (viewport coordinates).
    fn move_indicator(&mut self, indicator: NodeId, pos: Pos2);

    fn remove_indicator(&mut self, indicator: NodeId);

    /// Update the indicator's feedback marker. Only called for indicators created with
    /// `show_feedback == true`.
    fn set_feedback(&mut self, indicator: NodeId, feedback: Feedback);

    /// Toggle the "drop zone under the pointer" highlight on a target node.
    fn set_drop_highlight(&mut self, target: NodeId, highlighted: bool);

    /// Physically move `node` to be the last child of `new_parent`. Called on a
    /// successful, non-default-prevented drop.
    fn reparent(&mut self, node: NodeId, new_parent: NodeId);
}
