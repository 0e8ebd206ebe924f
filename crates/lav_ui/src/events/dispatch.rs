//! Tree dispatch
//!
//! Events go to the target first and bubble towards the root until consumed. At every
//! element the variant reaction runs before the user handlers. No element borrow is held
//! while user handlers run, so handlers are free to mutate any element, including the one
//! they are registered on.

use std::rc::Rc;

use log::{debug, warn};

use super::registry;
use super::types::UIEvent;
use crate::ui::element::{ElementId, UIRef};
use crate::ui::widgets::ReactionContext;

/// Holds the dispatch lock on a set of elements
///
/// Child-sequence mutations on a locked element are queued and applied when the last
/// guard covering it is dropped.
pub struct DispatchGuard {
    elements: Vec<UIRef>,
}

impl DispatchGuard {
    /// Lock every element in `elements`
    pub fn lock(elements: &[UIRef]) -> Self {
        for element in elements {
            element.borrow_mut().lock_dispatch();
        }
        Self { elements: elements.to_vec() }
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        for element in self.elements.iter().rev() {
            match element.try_borrow_mut() {
                Ok(mut element) => element.unlock_dispatch(),
                Err(_) => warn!("Element still borrowed while releasing dispatch lock"),
            }
        }
    }
}

/// The element followed by its ancestors up to the root
pub fn ancestry(element: &UIRef) -> Vec<UIRef> {
    let mut path = vec![Rc::clone(element)];
    let mut cursor = element.borrow().parent();
    while let Some(node) = cursor {
        cursor = node.borrow().parent();
        path.push(node);
    }
    path
}

/// Route an event to `target`, bubbling up unless the kind does not bubble
///
/// # Returns
/// `true` if a reaction or handler consumed the event
pub fn dispatch(target: &UIRef, event: &UIEvent) -> bool {
    let path = if event.kind().bubbles() {
        ancestry(target)
    } else {
        vec![Rc::clone(target)]
    };
    let target_id = target.borrow().id();
    let _guard = DispatchGuard::lock(&path);

    for element in &path {
        if deliver(element, target_id, event) {
            debug!("{:?} for {} consumed at {}", event.kind(), target_id, element.borrow().id());
            return true;
        }
    }
    false
}

/// Deliver to a single element without bubbling
pub fn dispatch_to(element: &UIRef, event: &UIEvent) -> bool {
    let id = element.borrow().id();
    let _guard = DispatchGuard::lock(std::slice::from_ref(element));
    deliver(element, id, event)
}

fn deliver(element: &UIRef, target: ElementId, event: &UIEvent) -> bool {
    let reaction = {
        let mut node = element.borrow_mut();
        let ctx = ReactionContext { element: node.id(), target };
        node.react(&ctx, event)
    };

    for follow_up in &reaction.raised {
        dispatch(element, follow_up);
    }
    if reaction.consumed {
        return true;
    }

    invoke_handlers(element, event)
}

fn invoke_handlers(element: &UIRef, event: &UIEvent) -> bool {
    let handlers = element.borrow().events.snapshot(event.kind());
    for (id, handler) in handlers {
        // Unsubscribed by an earlier handler of this dispatch
        if !element.borrow().events.is_subscribed(id) {
            continue;
        }
        if registry::invoke(&handler, event) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventKind, MouseButtonEvt, MouseEnterEvt};
    use crate::foundation::math::Vec2;
    use crate::input::{ButtonAction, MouseButton};
    use crate::layout::LayoutBase;
    use crate::ui::element::UIBase;
    use std::cell::RefCell;

    fn click() -> UIEvent {
        MouseButtonEvt { button: MouseButton::Left, action: ButtonAction::Press, pos: Vec2::zeros() }.into()
    }

    fn nested() -> (UIRef, UIRef) {
        let outer = UIBase::pane(LayoutBase::new());
        let inner = UIBase::pane(LayoutBase::new());
        outer.borrow_mut().add_child(Rc::clone(&inner)).unwrap();
        (outer, inner)
    }

    fn record(element: &UIRef, log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str, consume: bool) {
        let log = Rc::clone(log);
        element.borrow_mut().events.subscribe_kind(EventKind::MouseButton, move |_| {
            log.borrow_mut().push(name);
            consume
        });
    }

    #[test]
    fn test_ancestry_order() {
        let (outer, inner) = nested();
        let path = ancestry(&inner);
        assert_eq!(path.len(), 2);
        assert!(Rc::ptr_eq(&path[0], &inner));
        assert!(Rc::ptr_eq(&path[1], &outer));
    }

    #[test]
    fn test_bubbles_inner_first() {
        let (outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&outer, &log, "outer", false);
        record(&inner, &log, "inner", false);

        assert!(!dispatch(&inner, &click()));
        assert_eq!(*log.borrow(), ["inner", "outer"]);
    }

    #[test]
    fn test_consumed_stops_bubbling() {
        let (outer, inner) = nested();
        let log = Rc::new(RefCell::new(Vec::new()));
        record(&outer, &log, "outer", false);
        record(&inner, &log, "inner", true);

        assert!(dispatch(&inner, &click()));
        assert_eq!(*log.borrow(), ["inner"]);
    }

    #[test]
    fn test_enter_does_not_bubble() {
        let (outer, inner) = nested();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        outer.borrow_mut().events.subscribe::<MouseEnterEvt, _>(move |_| {
            *counter.borrow_mut() += 1;
            false
        });

        dispatch(&inner, &MouseEnterEvt { pos: Vec2::zeros() }.into());
        assert_eq!(*hits.borrow(), 0);
        dispatch(&outer, &MouseEnterEvt { pos: Vec2::zeros() }.into());
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn test_handler_may_unsubscribe_later_handler() {
        let element = UIBase::pane(LayoutBase::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let second_id = Rc::new(RefCell::new(None));
        {
            let weak = Rc::downgrade(&element);
            let second_id = Rc::clone(&second_id);
            let log = Rc::clone(&log);
            element.borrow_mut().events.subscribe_kind(EventKind::MouseButton, move |_| {
                log.borrow_mut().push("first");
                if let (Some(el), Some(id)) = (weak.upgrade(), *second_id.borrow()) {
                    el.borrow_mut().events.unsubscribe(id);
                }
                false
            });
        }
        let log2 = Rc::clone(&log);
        let id = element.borrow_mut().events.subscribe_kind(EventKind::MouseButton, move |_| {
            log2.borrow_mut().push("second");
            false
        });
        *second_id.borrow_mut() = Some(id);

        dispatch_to(&element, &click());
        assert_eq!(*log.borrow(), ["first"]);
        assert_eq!(element.borrow().events.handler_count(EventKind::MouseButton), 1);
    }

    #[test]
    fn test_handler_may_mutate_own_element() {
        let element = UIBase::pane(LayoutBase::new());
        let weak = Rc::downgrade(&element);
        element.borrow_mut().events.subscribe::<MouseButtonEvt, _>(move |_| {
            if let Some(el) = weak.upgrade() {
                el.borrow_mut().props.set("clicked", true);
            }
            true
        });

        assert!(dispatch(&element, &click()));
        assert!(element.borrow().props.get_as::<bool>("clicked").unwrap());
    }

    #[test]
    fn test_reentrant_handler_is_skipped() {
        let element = UIBase::pane(LayoutBase::new());
        let calls = Rc::new(RefCell::new(0));
        let weak = Rc::downgrade(&element);
        let counter = Rc::clone(&calls);
        element.borrow_mut().events.subscribe::<MouseButtonEvt, _>(move |e| {
            *counter.borrow_mut() += 1;
            if let Some(el) = weak.upgrade() {
                // Same handler again: must be skipped, not recursed into
                dispatch_to(&el, &UIEvent::MouseButton(*e));
            }
            false
        });

        dispatch_to(&element, &click());
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_child_mutation_during_dispatch_is_deferred() {
        let (outer, inner) = nested();
        let extra = UIBase::pane(LayoutBase::new());
        let weak_outer = Rc::downgrade(&outer);
        let pending = Rc::clone(&extra);
        let observed = Rc::new(RefCell::new(None));
        let seen = Rc::clone(&observed);
        inner.borrow_mut().events.subscribe::<MouseButtonEvt, _>(move |_| {
            if let Some(outer) = weak_outer.upgrade() {
                let change = outer.borrow_mut().add_child(Rc::clone(&pending));
                *seen.borrow_mut() = Some((change, outer.borrow().children().len()));
            }
            false
        });

        dispatch(&inner, &click());
        let (change, during) = observed.borrow().clone().unwrap();
        assert_eq!(change, Ok(crate::ui::element::TreeChange::Deferred));
        assert_eq!(during, 1);
        assert_eq!(outer.borrow().children().len(), 2);
        assert!(extra.borrow().is_parented());
    }

    #[test]
    fn test_add_then_remove_during_dispatch_leaves_no_child() {
        let (outer, _inner) = nested();
        let extra = UIBase::pane(LayoutBase::new());
        let weak_outer = Rc::downgrade(&outer);
        let pending = Rc::clone(&extra);
        let observed = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&observed);
        outer.borrow_mut().events.subscribe::<MouseButtonEvt, _>(move |_| {
            if let Some(outer) = weak_outer.upgrade() {
                let added = outer.borrow_mut().add_child(Rc::clone(&pending));
                let removed = outer.borrow_mut().remove_child(&pending);
                seen.borrow_mut().extend([added, removed]);
            }
            false
        });

        dispatch(&outer, &click());
        let deferred = Ok(crate::ui::element::TreeChange::Deferred);
        assert_eq!(*observed.borrow(), [deferred.clone(), deferred]);
        assert_eq!(outer.borrow().children().len(), 1);
        assert!(!extra.borrow().is_parented());
    }
}
