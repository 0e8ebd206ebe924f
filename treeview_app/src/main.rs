//! Tree view demo application
//!
//! Builds a small explorer UI (tree view, row-size slider, collapse button), drives it with
//! a scripted input sequence and logs what a renderer would be asked to draw each frame.
//!
//! Usage: `treeview_demo [config.toml|config.ron]`

use std::cell::Cell;
use std::rc::Rc;

use lav_ui::core::config::{Config, UiConfig};
use lav_ui::events::{MouseButtonEvt, SliderEvt};
use lav_ui::foundation::logging;
use lav_ui::input::{InputEvent, MouseButton};
use lav_ui::layout::{Anchor, LayoutBase, PositionXY, Scale, ScaleXY, TBLR};
use lav_ui::props::keys;
use lav_ui::ui::{DrawElement, ItemPath, TreeItem, UIBase, UIRef, UIRenderBackend, UIWindow};
use lav_ui::{TreeError, UIError};

/// Demo failures
#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error("UI error: {0}")]
    Ui(#[from] UIError),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Render failed: {0}")]
    Render(String),
}

/// Backend that logs draw calls instead of issuing GPU work
#[derive(Default)]
struct LogBackend {
    drawn: usize,
    updated: usize,
}

impl UIRenderBackend for LogBackend {
    fn begin_ui_pass(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.drawn = 0;
        self.updated = 0;
        Ok(())
    }

    fn draw_element(&mut self, element: &DrawElement<'_>) -> Result<(), Box<dyn std::error::Error>> {
        self.drawn += 1;
        if element.changed.is_empty() {
            return Ok(());
        }
        self.updated += 1;

        let label = element.props.get_or(keys::TEXT, String::new());
        log::debug!(
            "{:indent$}{:?} {} at ({:.0}, {:.0}) {}x{} '{}' changed: {:?}",
            "",
            element.kind,
            element.id,
            element.bbox.x(),
            element.bbox.y(),
            element.bbox.width(),
            element.bbox.height(),
            label,
            element.changed,
            indent = element.depth * 2,
        );
        for (name, part) in element.parts {
            log::trace!("  part {} at ({:.0}, {:.0})", name, part.x(), part.y());
        }
        Ok(())
    }

    fn end_ui_pass(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        log::info!("UI pass: {} elements drawn, {} with changes", self.drawn, self.updated);
        Ok(())
    }
}

struct TreeViewDemo {
    window: UIWindow,
    backend: LogBackend,
    tree: UIRef,
    collapses: Rc<Cell<u32>>,
}

impl TreeViewDemo {
    fn new(config: UiConfig) -> Result<Self, DemoError> {
        log::info!("Creating tree view demo...");
        let window = UIWindow::from_config(config)?;

        let tree = window.create_tree_view(
            LayoutBase::new()
                .with_scale(ScaleXY::rel(0.6, 1.0))
                .with_tblr(TBLR::all(Scale::px(8.0))),
        );
        populate(&tree);

        let sidebar = window.create_pane(
            LayoutBase::new()
                .with_position(PositionXY::rel(1.0, 0.0))
                .with_scale(ScaleXY::rel(0.4, 1.0))
                .with_anchor(Anchor::TopRight),
        );
        let slider = window.create_slider(
            LayoutBase::new()
                .with_position(PositionXY::px(16.0, 16.0))
                .with_scale(ScaleXY::new(Scale::rel(0.8), Scale::px(24.0))),
            16.0,
            48.0,
        );
        let collapse = UIBase::button_with_text(
            LayoutBase::new()
                .with_position(PositionXY::px(16.0, 64.0))
                .with_scale(ScaleXY::px(140.0, 32.0)),
            "Collapse all",
        );

        sidebar.borrow_mut().add_child(Rc::clone(&slider))?;
        sidebar.borrow_mut().add_child(Rc::clone(&collapse))?;
        window.add(Rc::clone(&tree))?;
        window.add(sidebar)?;

        // Slider drives the row height
        {
            let tree = Rc::downgrade(&tree);
            slider.borrow_mut().events.subscribe::<SliderEvt, _>(move |e| {
                if let Some(tree) = tree.upgrade() {
                    if let Some(view) = tree.borrow_mut().as_tree_view_mut() {
                        view.set_row_size(e.value.round());
                    }
                }
                true
            });
        }

        let collapses = Rc::new(Cell::new(0));
        {
            let tree = Rc::downgrade(&tree);
            let collapses = Rc::clone(&collapses);
            collapse.borrow_mut().events.subscribe::<MouseButtonEvt, _>(move |e| {
                if !e.is_left_release() {
                    return false;
                }
                if let Some(tree) = tree.upgrade() {
                    if let Some(view) = tree.borrow_mut().as_tree_view_mut() {
                        for index in 0..view.items().len() {
                            view.set_open(&ItemPath::root(index), false);
                        }
                    }
                }
                collapses.set(collapses.get() + 1);
                true
            });
        }

        Ok(Self {
            window,
            backend: LogBackend::default(),
            tree,
            collapses,
        })
    }

    fn frame(&mut self, inputs: &[InputEvent]) -> Result<(), DemoError> {
        for input in inputs {
            self.window.send(*input);
        }
        let dispatched = self.window.update();
        log::info!("Frame {}: {} events dispatched", self.window.frame(), dispatched);

        // Pick up changes made by handlers before drawing
        self.window.layout();
        self.window
            .render(&mut self.backend)
            .map_err(|e| DemoError::Render(e.to_string()))
    }

    fn click(x: f32, y: f32) -> [InputEvent; 3] {
        [
            InputEvent::cursor(x, y),
            InputEvent::press(MouseButton::Left),
            InputEvent::release(MouseButton::Left),
        ]
    }

    fn run(&mut self) -> Result<(), DemoError> {
        self.frame(&[])?;
        self.log_rows();

        log::info!("Collapsing 'src' by clicking its row");
        self.frame(&Self::click(60.0, 20.0))?;
        self.log_rows();

        log::info!("Dragging the row-size slider");
        self.frame(&[
            InputEvent::cursor(500.0, 28.0),
            InputEvent::press(MouseButton::Left),
            InputEvent::cursor(620.0, 28.0),
            InputEvent::release(MouseButton::Left),
        ])?;
        self.log_rows();

        log::info!("Scrolling the tree");
        self.frame(&[InputEvent::cursor(60.0, 100.0), InputEvent::scroll(-2.0)])?;

        log::info!("Collapse all");
        self.frame(&Self::click(540.0, 80.0))?;
        self.log_rows();

        self.frame(&[InputEvent::CursorLeft])?;
        log::info!("Collapse button used {} time(s)", self.collapses.get());
        Ok(())
    }

    fn log_rows(&self) {
        let tree = self.tree.borrow();
        let Some(view) = tree.as_tree_view() else {
            return;
        };
        log::info!("{} visible rows ({}px each):", view.visible_items().len(), view.row_size());
        for visible in view.visible_items() {
            if let Some(item) = view.item(&visible.path) {
                let marker = if item.is_leaf() { " " } else if item.open { "-" } else { "+" };
                log::info!("{:indent$}{} {}", "", marker, item.label, indent = visible.depth * 2);
            }
        }
    }
}

fn populate(tree: &UIRef) {
    let mut element = tree.borrow_mut();
    let Some(view) = element.as_tree_view_mut() else {
        return;
    };
    view.add_item(
        TreeItem::new("src")
            .with_child(TreeItem::new("layout").with_child(TreeItem::new("calculator.rs")))
            .with_child(TreeItem::new("events").with_child(TreeItem::new("dispatch.rs")))
            .with_child(TreeItem::new("lib.rs")),
    );
    view.add_item(TreeItem::new("tests").with_child(TreeItem::new("integration.rs")));
    view.add_item(TreeItem::new("Cargo.toml"));
}

fn load_config() -> Result<UiConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(UiConfig::load_from_file(&path).map_err(UIError::from)?),
        None => Ok(UiConfig::new("Tree View Demo").with_window_size(800, 600)),
    }
}

fn main() {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    logging::init_with_level(&config.logging.level);

    let result = TreeViewDemo::new(config).and_then(|mut demo| demo.run());
    if let Err(e) = result {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
    log::info!("Demo finished");
}
