//! Integration tests for the tree view: row generation, toggling and scrolling

use std::rc::Rc;

use crate::core::config::UiConfig;
use crate::foundation::math::Vec2;
use crate::input::{InputEvent, MouseButton};
use crate::layout::{LayoutBase, ScaleXY};
use crate::props::keys;
use crate::ui::{ItemPath, TreeItem, UIRef, UIWindow};

/// a ( c, d ( g ), e ), b ( f ) in a 200x300 tree view
fn explorer() -> (UIWindow, UIRef) {
    let window = UIWindow::new(400, 400);
    let tree = window.create_tree_view(LayoutBase::new().with_scale(ScaleXY::px(200.0, 300.0)));
    {
        let mut element = tree.borrow_mut();
        let view = element.as_tree_view_mut().unwrap();
        view.add_item(
            TreeItem::new("a")
                .with_child(TreeItem::new("c"))
                .with_child(TreeItem::new("d").with_child(TreeItem::new("g")))
                .with_child(TreeItem::new("e")),
        );
        view.add_item(TreeItem::new("b").with_child(TreeItem::new("f")));
    }
    window.add(Rc::clone(&tree)).unwrap();
    (window, tree)
}

fn row_labels(tree: &UIRef) -> Vec<String> {
    tree.borrow()
        .children()
        .iter()
        .map(|row| row.borrow().props.get_as::<String>(keys::TEXT).unwrap())
        .collect()
}

fn click(window: &mut UIWindow, x: f32, y: f32) {
    window.send(InputEvent::cursor(x, y));
    window.send(InputEvent::press(MouseButton::Left));
    window.send(InputEvent::release(MouseButton::Left));
    window.update();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_visible_items() {
        let (window, tree) = explorer();
        window.layout();

        assert_eq!(row_labels(&tree), ["a", "c", "d", "g", "e", "b", "f"]);

        let rows = tree.borrow().children().to_vec();
        let g = rows[3].borrow();
        assert_eq!(g.as_tree_row().unwrap().path, ItemPath::from_indices([0, 1, 0]));
        // depth 2 with the default 20px indent, default 30px rows
        assert_eq!(g.layout.bbox().x(), 40.0);
        assert_eq!(g.layout.bbox().y(), 90.0);
        assert_eq!(g.layout.bbox().width(), 160.0);
        assert_eq!(g.layout.bbox().height(), 30.0);
    }

    #[test]
    fn test_configured_row_geometry() {
        let window = UIWindow::from_config(UiConfig::new("rows").with_tree_rows(18.0, 12.0)).unwrap();
        let tree = window.create_tree_view(LayoutBase::fill());
        tree.borrow_mut()
            .as_tree_view_mut()
            .unwrap()
            .add_item(TreeItem::new("root").with_child(TreeItem::new("leaf")));
        window.add(Rc::clone(&tree)).unwrap();
        window.layout();

        let leaf = tree.borrow().children()[1].clone();
        assert_eq!(leaf.borrow().layout.bbox().x(), 12.0);
        assert_eq!(leaf.borrow().layout.bbox().y(), 18.0);
    }

    #[test]
    fn test_rows_kept_while_clean() {
        let (window, tree) = explorer();
        window.layout();
        let first = tree.borrow().children()[0].clone();

        window.layout();
        assert!(Rc::ptr_eq(&first, &tree.borrow().children()[0]));
    }

    #[test]
    fn test_click_row_collapses_item() {
        let (mut window, tree) = explorer();
        click(&mut window, 100.0, 15.0);

        // Toggled during input; rows follow on the next layout
        assert!(!tree.borrow().as_tree_view().unwrap().item(&ItemPath::root(0)).unwrap().open);
        assert_eq!(tree.borrow().children().len(), 7);

        window.layout();
        assert_eq!(row_labels(&tree), ["a", "b", "f"]);

        // Hidden items keep their data and are no longer hit-testable
        let g = ItemPath::from_indices([0, 1, 0]);
        assert_eq!(tree.borrow().as_tree_view().unwrap().item(&g).unwrap().label, "g");
        let hit = window.element_at(Vec2::new(100.0, 100.0)).unwrap();
        assert!(Rc::ptr_eq(&hit, &tree));
    }

    #[test]
    fn test_click_collapsed_row_expands_again() {
        let (mut window, tree) = explorer();
        click(&mut window, 100.0, 15.0);
        click(&mut window, 100.0, 15.0);
        window.layout();

        assert_eq!(row_labels(&tree), ["a", "c", "d", "g", "e", "b", "f"]);
    }

    #[test]
    fn test_click_nested_row_collapses_only_subtree() {
        let (mut window, tree) = explorer();
        // Row 2 is "d"
        click(&mut window, 100.0, 75.0);
        window.layout();

        assert_eq!(row_labels(&tree), ["a", "c", "d", "e", "b", "f"]);
    }

    #[test]
    fn test_edit_item_relabels_row() {
        let (window, tree) = explorer();
        window.layout();

        let edited = tree
            .borrow_mut()
            .as_tree_view_mut()
            .unwrap()
            .edit_item(&ItemPath::root(1), |item| item.label = "renamed".to_string());
        assert!(edited);
        window.layout();

        assert_eq!(row_labels(&tree)[5], "renamed");
    }

    #[test]
    fn test_wheel_over_rows_scrolls_tree() {
        let mut window = UIWindow::new(400, 400);
        let tree = window.create_tree_view(LayoutBase::new().with_scale(ScaleXY::px(200.0, 300.0)));
        {
            let mut element = tree.borrow_mut();
            let view = element.as_tree_view_mut().unwrap();
            for i in 0..20 {
                view.add_item(TreeItem::new(format!("item {i}")));
            }
        }
        window.add(Rc::clone(&tree)).unwrap();

        window.send(InputEvent::cursor(100.0, 15.0));
        window.send(InputEvent::scroll(-3.0));
        window.update();
        assert_eq!(tree.borrow().variant().pane().unwrap().scroll().y, 60.0);

        window.layout();
        let hit = window.element_at(Vec2::new(100.0, 15.0)).unwrap();
        assert_eq!(hit.borrow().as_tree_row().unwrap().path, ItemPath::root(2));
        // Rows scrolled past the top are clipped away
        assert!(tree.borrow().children()[1].borrow().layout.view_box().is_empty());
    }
}
