//! Test double for [`VisualHost`]: records every engine-driven mutation so tests can
//! assert on indicator lifecycles, feedback, highlights and re-parenting without a
//! rendering surface.

use egui::{Pos2, Rect};

use super::host::{Feedback, IndicatorContent, IndicatorSpec, VisualHost};
use super::types::NodeId;

pub(super) struct MockHost {
    touch: bool,
    rects: ahash::HashMap<NodeId, Rect>,

    next_indicator: u64,
    pub(super) live_indicators: Vec<NodeId>,
    pub(super) indicators_created: usize,
    pub(super) indicators_removed: usize,
    pub(super) last_indicator_content: Option<IndicatorContent>,
    pub(super) indicator_positions: ahash::HashMap<NodeId, Pos2>,
    pub(super) feedback: ahash::HashMap<NodeId, Feedback>,
    pub(super) highlights: ahash::HashMap<NodeId, bool>,
    pub(super) parents: ahash::HashMap<NodeId, NodeId>,
}

impl MockHost {
    pub(super) fn new(touch: bool) -> Self {
        Self {
            touch,
            rects: ahash::HashMap::default(),
            next_indicator: 0,
            live_indicators: Vec::new(),
            indicators_created: 0,
            indicators_removed: 0,
            last_indicator_content: None,
            indicator_positions: ahash::HashMap::default(),
            feedback: ahash::HashMap::default(),
            highlights: ahash::HashMap::default(),
            parents: ahash::HashMap::default(),
        }
    }

    pub(super) fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.rects.insert(node, rect);
    }

    pub(super) fn highlighted(&self, node: NodeId) -> bool {
        self.highlights.get(&node).copied().unwrap_or(false)
    }
}

// Indicator handles live in their own id range so tests never collide with element ids.
const INDICATOR_BASE: u64 = 0x1000_0000;

impl<P> VisualHost<P> for MockHost {
    fn node_rect(&self, node: NodeId) -> Rect {
        self.rects.get(&node).copied().unwrap_or(Rect::ZERO)
    }

    fn touch_capable(&self) -> bool {
        self.touch
    }

    fn create_indicator(&mut self, spec: &IndicatorSpec<'_>, _payload: Option<&P>) -> NodeId {
        let id = NodeId::new(INDICATOR_BASE + self.next_indicator);
        self.next_indicator += 1;
        self.indicators_created += 1;
        self.last_indicator_content = Some(spec.content.clone());
        self.live_indicators.push(id);
        // The indicator starts with the same box as its snapshot source.
        if let Some(rect) = self.rects.get(&spec.source).copied() {
            self.rects.insert(id, rect);
        }
        if spec.show_feedback {
            self.feedback.insert(id, Feedback::Reject);
        }
        id
    }

    fn move_indicator(&mut self, indicator: NodeId, pos: Pos2) {
        self.indicator_positions.insert(indicator, pos);
        if let Some(rect) = self.rects.get(&indicator) {
            self.rects
                .insert(indicator, Rect::from_min_size(pos, rect.size()));
        }
    }

    fn remove_indicator(&mut self, indicator: NodeId) {
        self.indicators_removed += 1;
        self.live_indicators.retain(|&id| id != indicator);
        self.indicator_positions.remove(&indicator);
        self.feedback.remove(&indicator);
        self.rects.remove(&indicator);
    }

    fn set_feedback(&mut self, indicator: NodeId, feedback: Feedback) {
        self.feedback.insert(indicator, feedback);
    }

    fn set_drop_highlight(&mut self, target: NodeId, highlighted: bool) {
        self.highlights.insert(target, highlighted);
    }

    fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        self.parents.insert(node, new_parent);
    }
}
