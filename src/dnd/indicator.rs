use egui::{Pos2, Rect, Vec2};

use super::options::Placement;

/// Geometry inputs for one indicator placement computation.
#[derive(Clone, Copy, Debug)]
pub(super) struct PlacementInput {
    /// Current pointer position.
    pub(super) pointer: Pos2,
    /// Configured fixed offset.
    pub(super) offset: Vec2,
    /// The indicator's current rendered box (center placement needs its size).
    pub(super) indicator: Rect,
    /// The source element's box at drag start (clone placement anchors to it).
    pub(super) origin: Rect,
    /// Pointer position of the original down event.
    pub(super) down: Pos2,
}

/// Top-left position for the indicator under the given placement strategy.
pub(super) fn indicator_pos(placement: Placement, input: &PlacementInput) -> Pos2 {
    match placement {
        Placement::Corner => input.pointer + input.offset,
        Placement::Center => input.pointer + input.offset - input.indicator.size() / 2.0,
        Placement::Clone => {
            input.origin.min + (input.pointer - input.down) + input.offset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> PlacementInput {
        PlacementInput {
            pointer: Pos2::new(100.0, 50.0),
            offset: Vec2::new(4.0, 6.0),
            indicator: Rect::from_min_size(Pos2::ZERO, Vec2::new(40.0, 20.0)),
            origin: Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(40.0, 20.0)),
            down: Pos2::new(90.0, 45.0),
        }
    }

    #[test]
    fn corner_tracks_pointer_plus_offset() {
        assert_eq!(
            indicator_pos(Placement::Corner, &input()),
            Pos2::new(104.0, 56.0)
        );
    }

    #[test]
    fn center_subtracts_half_rendered_size() {
        assert_eq!(
            indicator_pos(Placement::Center, &input()),
            Pos2::new(84.0, 46.0)
        );
    }

    #[test]
    fn clone_keeps_initial_offset_from_down_position() {
        // Pointer moved (+10, +5) from the down event, so the indicator sits at the
        // origin box shifted by the same delta (plus the fixed offset).
        assert_eq!(
            indicator_pos(Placement::Clone, &input()),
            Pos2::new(24.0, 21.0)
        );
    }
}
