use std::rc::Rc;

use egui::Vec2;

use super::host::IndicatorContent;

/// Maps the pointer position to the indicator position while dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Placement {
    /// The indicator's top-left corner tracks the pointer (plus the configured offset).
    #[default]
    Corner,
    /// The indicator is centered on the pointer. Uses the indicator's current rendered
    /// size, so it stays centered even if the indicator resizes mid-drag.
    Center,
    /// The indicator keeps its initial offset from the pointer's down-position, so the
    /// element appears to move rigidly with the cursor from its original location.
    Clone,
}

/// Pluggable indicator factory: given the active session's drag type, produce indicator
/// content, or `None` to fall back to the template registry / automatic snapshot.
pub type IndicatorFactory = Rc<dyn Fn(Option<&str>) -> Option<IndicatorContent>>;

/// Options for [`super::DragCoordinator`].
///
/// Consumed at startup: sessions snapshot these at registration time, so set them before
/// the first `register` call.
#[derive(Clone)]
pub struct DragOptions {
    /// Pointer travel (in viewport units) from the down-position required before a
    /// pressed element starts actually dragging. Presses that release earlier are left
    /// for the host's click handling.
    pub start_distance: f32,

    /// Fixed offset added to the indicator position in every placement strategy.
    pub drag_offset: Vec2,

    pub placement: Placement,

    /// Uniform scale applied to the indicator by the host.
    pub indicator_scale: f32,

    /// Inline style overrides applied to the indicator by the host, in order.
    pub indicator_style: Vec<(String, String)>,

    /// Whether the indicator carries an accept/reject feedback marker. When false,
    /// feedback updates are a no-op.
    pub show_feedback: bool,

    /// Custom indicator factory, consulted before the named-template registry.
    pub indicator_factory: Option<IndicatorFactory>,
}

impl Default for DragOptions {
    fn default() -> Self {
        Self {
            start_distance: 20.0,
            drag_offset: Vec2::ZERO,
            placement: Placement::default(),
            indicator_scale: 1.0,
            indicator_style: Vec::new(),
            show_feedback: true,
            indicator_factory: None,
        }
    }
}

impl std::fmt::Debug for DragOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragOptions")
            .field("start_distance", &self.start_distance)
            .field("drag_offset", &self.drag_offset)
            .field("placement", &self.placement)
            .field("indicator_scale", &self.indicator_scale)
            .field("indicator_style", &self.indicator_style)
            .field("show_feedback", &self.show_feedback)
            .field(
                "indicator_factory",
                &self.indicator_factory.as_ref().map(|_| "Fn"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = DragOptions::default();
        assert_eq!(opts.start_distance, 20.0);
        assert_eq!(opts.drag_offset, Vec2::ZERO);
        assert_eq!(opts.placement, Placement::Corner);
        assert_eq!(opts.indicator_scale, 1.0);
        assert!(opts.indicator_style.is_empty());
        assert!(opts.show_feedback);
        assert!(opts.indicator_factory.is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn placement_serde_round_trip() {
        for placement in [Placement::Corner, Placement::Center, Placement::Clone] {
            let json = serde_json::to_string(&placement).expect("serialize");
            let back: Placement = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(placement, back);
        }
    }
}
