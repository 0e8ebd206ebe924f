//! Hit testing for input processing
//!
//! Determines which element the pointer is over using each element's last resolved view box.
//! Layout must run before hit testing for the results to match what is on screen.

use std::rc::Rc;

use crate::foundation::math::Vec2;
use crate::ui::element::UIRef;

/// Find the deepest visible element under `point`
///
/// Later siblings are on top of earlier ones. Hidden elements hide their whole subtree.
/// Pointer-transparent elements (labels) are never the result themselves.
///
/// # Returns
/// `None` if the point is outside `root`'s view box
pub fn hit_test(root: &UIRef, point: Vec2) -> Option<UIRef> {
    let element = root.borrow();
    if !element.is_visible() || !element.layout.is_point_inside_view(point) {
        return None;
    }

    let deepest = element
        .children()
        .iter()
        .rev()
        .find_map(|child| hit_test(child, point));
    if deepest.is_some() || element.variant().ignores_pointer() {
        return deepest;
    }
    Some(Rc::clone(root))
}

/// True when `element` is `root` or one of its descendants
pub fn is_attached(element: &UIRef, root: &UIRef) -> bool {
    let mut cursor = Some(Rc::clone(element));
    while let Some(node) = cursor {
        if Rc::ptr_eq(&node, root) {
            return true;
        }
        cursor = node.borrow().parent();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BoundingBox, LayoutBase, PositionXY, ScaleXY};
    use crate::ui::element::UIBase;

    fn boxed(x: f32, y: f32, w: f32, h: f32) -> LayoutBase {
        LayoutBase::new()
            .with_position(PositionXY::px(x, y))
            .with_scale(ScaleXY::px(w, h))
    }

    fn laid_out(root: &UIRef) {
        let screen = BoundingBox::from_size(400.0, 300.0);
        UIBase::layout_pass(root, &screen, &screen);
    }

    #[test]
    fn test_deepest_element_wins() {
        let root = UIBase::window_root();
        let outer = UIBase::pane(boxed(0.0, 0.0, 200.0, 200.0));
        let inner = UIBase::button(boxed(50.0, 50.0, 50.0, 50.0));
        outer.borrow_mut().add_child(Rc::clone(&inner)).unwrap();
        root.borrow_mut().add_child(Rc::clone(&outer)).unwrap();
        laid_out(&root);

        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(75.0, 75.0)).unwrap(), &inner));
        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(10.0, 10.0)).unwrap(), &outer));
        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(300.0, 10.0)).unwrap(), &root));
        assert!(hit_test(&root, Vec2::new(500.0, 10.0)).is_none());
    }

    #[test]
    fn test_later_sibling_on_top() {
        let root = UIBase::window_root();
        let first = UIBase::pane(boxed(0.0, 0.0, 100.0, 100.0));
        let second = UIBase::pane(boxed(50.0, 0.0, 100.0, 100.0));
        root.borrow_mut().add_child(Rc::clone(&first)).unwrap();
        root.borrow_mut().add_child(Rc::clone(&second)).unwrap();
        laid_out(&root);

        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(75.0, 50.0)).unwrap(), &second));
        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(25.0, 50.0)).unwrap(), &first));
    }

    #[test]
    fn test_clipped_and_hidden_elements_not_hit() {
        let root = UIBase::window_root();
        let pane = UIBase::pane(boxed(0.0, 0.0, 100.0, 100.0));
        let overflow = UIBase::button(boxed(80.0, 0.0, 100.0, 50.0));
        let hidden = UIBase::button(boxed(0.0, 60.0, 50.0, 40.0));
        pane.borrow_mut().add_child(Rc::clone(&overflow)).unwrap();
        pane.borrow_mut().add_child(Rc::clone(&hidden)).unwrap();
        root.borrow_mut().add_child(Rc::clone(&pane)).unwrap();
        hidden.borrow_mut().set_visible(false);
        laid_out(&root);

        // Outside the pane: the overflowing part of the child is clipped away
        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(150.0, 20.0)).unwrap(), &root));
        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(90.0, 20.0)).unwrap(), &overflow));
        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(20.0, 80.0)).unwrap(), &pane));
    }

    #[test]
    fn test_label_lets_pointer_through() {
        let root = UIBase::window_root();
        let button = UIBase::button(boxed(0.0, 0.0, 100.0, 40.0));
        let caption = UIBase::label(boxed(10.0, 10.0, 80.0, 20.0), "Open");
        root.borrow_mut().add_child(Rc::clone(&button)).unwrap();
        root.borrow_mut().add_child(Rc::clone(&caption)).unwrap();
        laid_out(&root);

        assert!(Rc::ptr_eq(&hit_test(&root, Vec2::new(50.0, 20.0)).unwrap(), &button));
    }

    #[test]
    fn test_attachment() {
        let root = UIBase::window_root();
        let child = UIBase::pane(LayoutBase::new());
        assert!(!is_attached(&child, &root));
        root.borrow_mut().add_child(Rc::clone(&child)).unwrap();
        assert!(is_attached(&child, &root));
        assert!(is_attached(&root, &root));
        root.borrow_mut().remove_child(&child).unwrap();
        assert!(!is_attached(&child, &root));
    }
}
