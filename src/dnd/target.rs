use std::cell::RefCell;
use std::rc::Rc;

use super::events::DropEvent;
use super::types::NodeId;

/// Callback invoked with a [`DropEvent`] when the pointer hovers a target mid-drag or
/// releases over it.
pub type DropCallback<P> = Rc<dyn Fn(&DropEvent<P>)>;

/// A model field bound to a drop target.
///
/// Applied on every successful drop: a collection binding appends the dropped payload
/// (preserving drop order), a scalar binding replaces its value outright.
#[derive(Clone)]
pub enum DropBinding<P> {
    Collection(Rc<RefCell<Vec<P>>>),
    Scalar(Rc<RefCell<Option<P>>>),
}

impl<P: Clone> DropBinding<P> {
    pub(super) fn apply(&self, payload: &P) {
        match self {
            Self::Collection(list) => list.borrow_mut().push(payload.clone()),
            Self::Scalar(slot) => *slot.borrow_mut() = Some(payload.clone()),
        }
    }
}

/// A registered element eligible to receive a completed drag.
///
/// Built with the fluent setters and handed to
/// [`super::DragCoordinator::add_drop_target`]; registration is idempotent by element
/// identity.
pub struct DropTarget<P> {
    pub(super) element: NodeId,
    pub(super) drop_type: Option<String>,
    pub(super) on_hover: Option<DropCallback<P>>,
    pub(super) on_complete: Option<DropCallback<P>>,
    pub(super) binding: Option<DropBinding<P>>,
}

impl<P> DropTarget<P> {
    pub fn new(element: NodeId) -> Self {
        Self {
            element,
            drop_type: None,
            on_hover: None,
            on_complete: None,
            binding: None,
        }
    }

    /// Restrict this target to drags carrying the same type tag.
    pub fn with_drop_type(mut self, drop_type: impl Into<String>) -> Self {
        self.drop_type = Some(drop_type.into());
        self
    }

    pub fn on_hover(mut self, callback: impl Fn(&DropEvent<P>) + 'static) -> Self {
        self.on_hover = Some(Rc::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl Fn(&DropEvent<P>) + 'static) -> Self {
        self.on_complete = Some(Rc::new(callback));
        self
    }

    pub fn bind(mut self, binding: DropBinding<P>) -> Self {
        self.binding = Some(binding);
        self
    }

    pub fn element(&self) -> NodeId {
        self.element
    }
}

/// Type-compatibility rule between a drag and a drop target: the tags must be equal, and
/// an absent tag only matches another absent tag.
pub(super) fn types_compatible(drag_type: Option<&str>, drop_type: Option<&str>) -> bool {
    drag_type == drop_type
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_tags_are_compatible() {
        assert!(types_compatible(Some("card"), Some("card")));
        assert!(types_compatible(None, None));
    }

    #[test]
    fn mismatched_tags_are_rejected_symmetrically() {
        assert!(!types_compatible(Some("card"), Some("file")));
        assert!(!types_compatible(Some("file"), Some("card")));
        assert!(!types_compatible(Some("card"), None));
        assert!(!types_compatible(None, Some("card")));
    }

    #[test]
    fn collection_binding_appends_in_order() {
        let list = Rc::new(RefCell::new(Vec::new()));
        let binding = DropBinding::Collection(Rc::clone(&list));
        binding.apply(&1);
        binding.apply(&2);
        binding.apply(&3);
        assert_eq!(*list.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn scalar_binding_replaces() {
        let slot = Rc::new(RefCell::new(None));
        let binding = DropBinding::Scalar(Rc::clone(&slot));
        binding.apply(&1);
        binding.apply(&2);
        assert_eq!(*slot.borrow(), Some(2));
    }
}
