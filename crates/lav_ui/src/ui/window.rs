//! UI Window
//!
//! Root container: owns the root element, the window input state and the input queue, and
//! runs the per-frame contract (layout first, then queued input dispatch).

use std::collections::VecDeque;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::core::config::UiConfig;
use crate::error::{TreeError, UIError};
use crate::events::dispatch;
use crate::foundation::math::{Vec2, Vec4};
use crate::input::{hit_test, is_attached, InputEvent, RoutedEvent, UIInputProcessor};
use crate::layout::LayoutBase;
use crate::props::{keys, PropsBase};
use crate::state::UIWindowState;

use super::backend::{DrawElement, UIRenderBackend};
use super::element::{TreeChange, UIBase, UIRef};
use super::widgets::{Orientation, UIPane, UISlider, UISplitPane, UIVariant};

/// Top-level UI container seeded by window geometry
pub struct UIWindow {
    root: UIRef,
    state: UIWindowState,
    queue: VecDeque<InputEvent>,
    processor: UIInputProcessor,
    config: UiConfig,
    frame: u64,
}

impl UIWindow {
    /// Window with default configuration and the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self::build(UiConfig::default().with_window_size(width, height))
    }

    /// Window from a validated configuration
    pub fn from_config(config: UiConfig) -> Result<Self, UIError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: UiConfig) -> Self {
        let (width, height) = (config.window.width, config.window.height);
        info!("Creating UI window '{}' ({}x{})", config.window.title, width, height);
        Self {
            root: UIBase::window_root(),
            state: UIWindowState::new(width as f32, height as f32),
            queue: VecDeque::new(),
            processor: UIInputProcessor::new(),
            config,
            frame: 0,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Root element
    pub fn root(&self) -> &UIRef {
        &self.root
    }

    /// Input state
    pub fn state(&self) -> &UIWindowState {
        &self.state
    }

    /// Completed frames
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Append a top-level element
    pub fn add(&self, child: UIRef) -> Result<TreeChange, TreeError> {
        self.root.borrow_mut().add_child(child)
    }

    /// Pane using the configured scroll step
    pub fn create_pane(&self, layout: LayoutBase) -> UIRef {
        let pane = UIPane::new(self.config.input.pane_scroll_step);
        UIBase::create(layout, PropsBase::new(), UIVariant::Pane(pane))
    }

    /// Pane with scrollbars of the configured thickness on the requested axes
    pub fn create_scroll_pane(&self, layout: LayoutBase, horizontal: bool, vertical: bool) -> UIRef {
        let pane = UIPane::new(self.config.input.pane_scroll_step).with_scrollbars(
            horizontal,
            vertical,
            self.config.pane.scrollbar_size,
        );
        UIBase::pane_with(layout, pane)
    }

    /// Split pane with one empty child pane per fraction
    ///
    /// Handle thickness and color come from the configuration.
    pub fn create_split_pane(&self, layout: LayoutBase, orientation: Orientation, fractions: &[f32]) -> UIRef {
        let split = UISplitPane::with_fractions(orientation, fractions)
            .with_handle_size(self.config.split_pane.handle_size);
        let color = self.config.split_pane.handle_color().unwrap_or_else(|| {
            warn!("Bad split handle color {:?}, using grey", self.config.split_pane.handle_color);
            Vec4::new(0.5, 0.5, 0.5, 1.0)
        });
        let element = UIBase::split_pane(layout, split);
        element.borrow_mut().props.set(keys::HANDLE_COLOR, color);
        element
    }

    /// Slider using the configured scroll sensitivity
    pub fn create_slider(&self, layout: LayoutBase, from: f32, to: f32) -> UIRef {
        let slider = UISlider::new(from, to).with_sensitivity(self.config.input.slider_scroll_sensitivity);
        UIBase::slider_with(layout, slider)
    }

    /// Tree view using the configured row geometry and scroll step
    pub fn create_tree_view(&self, layout: LayoutBase) -> UIRef {
        let tree = UIBase::tree_view(layout, &self.config.tree_view);
        if let Some(view) = tree.borrow_mut().as_tree_view_mut() {
            view.pane.set_scroll_step(self.config.input.pane_scroll_step);
            if self.config.tree_view.scrollbar {
                let scrolled = std::mem::take(&mut view.pane);
                view.pane = scrolled.with_scrollbars(false, true, self.config.pane.scrollbar_size);
            }
        }
        tree
    }

    /// Queue backend input for the next [`Self::process_input`]
    pub fn send(&mut self, input: InputEvent) {
        self.queue.push_back(input);
    }

    /// Queued input count
    pub fn pending_input(&self) -> usize {
        self.queue.len()
    }

    /// Apply a new window size; the next layout pass picks it up
    pub fn resize(&mut self, width: f32, height: f32) {
        info!("UI window resized to {}x{}", width, height);
        self.state.resize(width, height);
    }

    /// Resolve the whole tree against the window box
    pub fn layout(&self) {
        let root_box = self.state.root_box();
        UIBase::layout_pass(&self.root, &root_box, &root_box);
    }

    /// Deepest visible element at `point`, using the last layout
    pub fn element_at(&self, point: Vec2) -> Option<UIRef> {
        hit_test(&self.root, point)
    }

    /// Classify and dispatch all queued input
    ///
    /// # Returns
    /// Number of events dispatched
    pub fn process_input(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(input) = self.queue.pop_front() {
            let routed = self.processor.process(&mut self.state, &self.root, &input);
            for RoutedEvent { target, event } in routed {
                // Removed by an earlier handler in this batch
                if !is_attached(&target, &self.root) {
                    debug!("Dropping {:?} for detached element", event.kind());
                    continue;
                }
                dispatch(&target, &event);
                dispatched += 1;
            }
        }
        self.processor.reset_frame_flags();
        dispatched
    }

    /// Run one frame: layout, then dispatch of queued input
    ///
    /// Property changes made by handlers become visible to the next frame's layout.
    pub fn update(&mut self) -> usize {
        self.layout();
        let dispatched = self.process_input();
        self.frame += 1;
        dispatched
    }

    /// Hand every visible element to `backend`, parents first
    ///
    /// Drains each drawn element's changed-key set.
    pub fn render(&self, backend: &mut dyn UIRenderBackend) -> Result<(), Box<dyn std::error::Error>> {
        backend.begin_ui_pass()?;
        render_element(&self.root, 0, backend)?;
        backend.end_ui_pass()
    }
}

fn render_element(
    element: &UIRef,
    depth: usize,
    backend: &mut dyn UIRenderBackend,
) -> Result<(), Box<dyn std::error::Error>> {
    if !element.borrow().is_visible() {
        return Ok(());
    }

    let changed = element.borrow_mut().props.take_changed();
    let children = {
        let node = element.borrow();
        let parts = node.variant().parts();
        backend.draw_element(&DrawElement {
            id: node.id(),
            kind: node.variant().kind(),
            depth,
            bbox: node.layout.bbox(),
            view: node.layout.view_box(),
            props: &node.props,
            changed: &changed,
            parts: &parts,
        })?;
        node.children().iter().map(Rc::clone).collect::<Vec<_>>()
    };

    for child in &children {
        render_element(child, depth + 1, backend)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigError;
    use crate::layout::{BoundingBox, ScaleXY};
    use crate::ui::backend::RecordingBackend;
    use crate::ui::widgets::VariantKind;

    #[test]
    fn test_from_config_validates() {
        let result = UIWindow::from_config(UiConfig::new("bad").with_window_size(0, 0));
        assert!(matches!(result, Err(UIError::Config(ConfigError::Invalid(_)))));
    }

    #[test]
    fn test_resize_reaches_layout() {
        let mut window = UIWindow::new(800, 600);
        let pane = window.create_pane(LayoutBase::new().with_scale(ScaleXY::rel(0.5, 1.0)));
        window.add(Rc::clone(&pane)).unwrap();

        window.layout();
        assert_eq!(pane.borrow().layout.bbox(), BoundingBox::new(0.0, 0.0, 400.0, 600.0));

        window.send(InputEvent::Resized { width: 1000.0, height: 500.0 });
        window.update();
        // Resize input is classified after this frame's layout
        assert_eq!(pane.borrow().layout.bbox().width(), 400.0);
        window.update();
        assert_eq!(pane.borrow().layout.bbox(), BoundingBox::new(0.0, 0.0, 500.0, 500.0));
    }

    #[test]
    fn test_render_walk_order_and_drain() {
        let window = UIWindow::new(200, 100);
        let pane = window.create_pane(LayoutBase::new());
        let button = UIBase::button(LayoutBase::new());
        let hidden = UIBase::image(LayoutBase::new(), "hidden.png");
        pane.borrow_mut().add_child(Rc::clone(&button)).unwrap();
        window.add(Rc::clone(&pane)).unwrap();
        window.add(Rc::clone(&hidden)).unwrap();
        hidden.borrow_mut().set_visible(false);
        window.layout();

        let mut backend = RecordingBackend::default();
        window.render(&mut backend).unwrap();
        let kinds: Vec<(VariantKind, usize)> = backend.drawn.iter().map(|d| (d.1, d.2)).collect();
        assert_eq!(
            kinds,
            [(VariantKind::Window, 0), (VariantKind::Pane, 1), (VariantKind::Button, 2)]
        );
        assert_eq!(backend.drawn[2].4, ["color", "state"]);

        // Second pass sees no changes
        window.render(&mut backend).unwrap();
        assert!(backend.drawn.iter().all(|d| d.4.is_empty()));
        assert_eq!(backend.passes, 2);
    }

    #[test]
    fn test_widget_factories_follow_config() {
        let mut config = UiConfig::new("factories");
        config.tree_view.scrollbar = true;
        config.pane.scrollbar_size = 12.0;
        config.split_pane.handle_size = 6.0;
        config.split_pane.handle_color = "#ff0000".to_string();
        let window = UIWindow::from_config(config).unwrap();

        let tree = window.create_tree_view(LayoutBase::new());
        assert!(tree.borrow().as_pane().unwrap().scrollbar(Orientation::Vertical).is_some());
        assert!(tree.borrow().as_pane().unwrap().scrollbar(Orientation::Horizontal).is_none());

        let split = window.create_split_pane(LayoutBase::new(), Orientation::Vertical, &[0.3, 0.7]);
        assert_eq!(split.borrow().children().len(), 2);
        assert_eq!(split.borrow().as_split_pane().unwrap().handle_size(), 6.0);
        let color = split.borrow().props.get_as::<Vec4>(keys::HANDLE_COLOR).unwrap();
        assert_eq!(color, Vec4::new(1.0, 0.0, 0.0, 1.0));
    }
}
