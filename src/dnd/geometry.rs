use egui::Pos2;

use super::host::PointerEvent;

/// Normalized pointer position of an input sample.
///
/// Touch events report the first active touch point. A touch event without touch points
/// (e.g. touch-end) degrades to `Pos2::ZERO` rather than failing the interaction.
pub fn event_position(event: &PointerEvent) -> Pos2 {
    match event {
        PointerEvent::Mouse { pos } => *pos,
        PointerEvent::Touch { touches } => touches.first().copied().unwrap_or(Pos2::ZERO),
        PointerEvent::Synthetic => Pos2::ZERO,
    }
}

/// Euclidean distance between the positions of two input samples.
pub fn event_distance(a: &PointerEvent, b: &PointerEvent) -> f32 {
    event_position(a).distance(event_position(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_position_is_direct() {
        assert_eq!(
            event_position(&PointerEvent::mouse(3.0, 4.0)),
            Pos2::new(3.0, 4.0)
        );
    }

    #[test]
    fn touch_position_uses_first_point() {
        let ev = PointerEvent::touch(vec![Pos2::new(1.0, 2.0), Pos2::new(9.0, 9.0)]);
        assert_eq!(event_position(&ev), Pos2::new(1.0, 2.0));
    }

    #[test]
    fn empty_touch_degrades_to_zero() {
        assert_eq!(event_position(&PointerEvent::touch(vec![])), Pos2::ZERO);
        assert_eq!(event_position(&PointerEvent::Synthetic), Pos2::ZERO);
    }

    #[test]
    fn distance_is_euclidean() {
        let a = PointerEvent::mouse(0.0, 0.0);
        let b = PointerEvent::mouse(3.0, 4.0);
        assert_eq!(event_distance(&a, &b), 5.0);
    }
}
