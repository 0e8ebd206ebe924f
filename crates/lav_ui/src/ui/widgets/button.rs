//! Button widget - interactive clickable buttons

use crate::events::UIEvent;
use crate::foundation::math::Vec4;
use crate::input::{ButtonAction, MouseButton};
use crate::props::{keys, PropsBase};

use super::Reaction;

/// Button state for visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Normal resting state
    Normal,
    /// Mouse is hovering over button
    Hovered,
    /// Button is being pressed
    Pressed,
    /// Button is disabled (non-interactive)
    Disabled,
}

impl ButtonState {
    /// Name written to the `state` property
    pub fn name(self) -> &'static str {
        match self {
            ButtonState::Normal => "normal",
            ButtonState::Hovered => "hovered",
            ButtonState::Pressed => "pressed",
            ButtonState::Disabled => "disabled",
        }
    }
}

/// UI button component
#[derive(Debug, Clone)]
pub struct UIButton {
    /// Current button state
    state: ButtonState,

    /// Colors for different states
    pub normal_color: Vec4,
    /// Hover state color
    pub hover_color: Vec4,
    /// Pressed state color
    pub pressed_color: Vec4,
    /// Disabled state color
    pub disabled_color: Vec4,

    enabled: bool,
}

impl Default for UIButton {
    fn default() -> Self {
        Self {
            state: ButtonState::Normal,
            normal_color: Vec4::new(0.3, 0.3, 0.3, 0.9),
            hover_color: Vec4::new(0.4, 0.4, 0.5, 1.0),
            pressed_color: Vec4::new(0.5, 0.5, 0.6, 1.0),
            disabled_color: Vec4::new(0.2, 0.2, 0.2, 0.5),
            enabled: true,
        }
    }
}

impl UIButton {
    /// Current interaction state
    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Whether the button reacts to input
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the current color based on button state
    pub fn get_current_color(&self) -> Vec4 {
        if !self.enabled {
            return self.disabled_color;
        }

        match self.state {
            ButtonState::Normal => self.normal_color,
            ButtonState::Hovered => self.hover_color,
            ButtonState::Pressed => self.pressed_color,
            ButtonState::Disabled => self.disabled_color,
        }
    }

    /// Write state and color into the element's properties
    pub fn apply(&self, props: &mut PropsBase) {
        props.set(keys::STATE, self.state.name());
        props.set(keys::COLOR, self.get_current_color());
    }

    /// Enable or disable the button
    pub fn set_enabled(&mut self, enabled: bool, props: &mut PropsBase) {
        self.enabled = enabled;
        self.state = if enabled { ButtonState::Normal } else { ButtonState::Disabled };
        self.apply(props);
    }

    /// Drive the state machine from pointer events
    ///
    /// Never consumes, so ancestors still see the event.
    pub fn react(&mut self, event: &UIEvent, props: &mut PropsBase) -> Reaction {
        if !self.enabled {
            return Reaction::ignored();
        }

        let next = match event {
            UIEvent::MouseEnter(_) => ButtonState::Hovered,
            UIEvent::MouseExit(_) => ButtonState::Normal,
            UIEvent::MouseButton(e) if e.button == MouseButton::Left => match e.action {
                ButtonAction::Press => ButtonState::Pressed,
                ButtonAction::Release => ButtonState::Hovered,
            },
            _ => return Reaction::ignored(),
        };

        if next != self.state {
            self.state = next;
            self.apply(props);
        }
        Reaction::ignored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{MouseButtonEvt, MouseEnterEvt, MouseExitEvt};
    use crate::foundation::math::Vec2;

    fn button_event(action: ButtonAction) -> UIEvent {
        MouseButtonEvt { button: MouseButton::Left, action, pos: Vec2::zeros() }.into()
    }

    #[test]
    fn test_state_machine() {
        let mut button = UIButton::default();
        let mut props = PropsBase::new();

        button.react(&MouseEnterEvt { pos: Vec2::zeros() }.into(), &mut props);
        assert_eq!(button.state(), ButtonState::Hovered);
        assert_eq!(props.get_as::<String>(keys::STATE).unwrap(), "hovered");

        button.react(&button_event(ButtonAction::Press), &mut props);
        assert_eq!(button.state(), ButtonState::Pressed);
        assert_eq!(props.get_as::<Vec4>(keys::COLOR).unwrap(), button.pressed_color);

        button.react(&button_event(ButtonAction::Release), &mut props);
        assert_eq!(button.state(), ButtonState::Hovered);

        button.react(&MouseExitEvt { pos: Vec2::zeros() }.into(), &mut props);
        assert_eq!(button.state(), ButtonState::Normal);
    }

    #[test]
    fn test_disabled_ignores_input() {
        let mut button = UIButton::default();
        let mut props = PropsBase::new();
        button.set_enabled(false, &mut props);

        button.react(&MouseEnterEvt { pos: Vec2::zeros() }.into(), &mut props);
        assert_eq!(button.state(), ButtonState::Disabled);
        assert_eq!(props.get_as::<Vec4>(keys::COLOR).unwrap(), button.disabled_color);
    }

    #[test]
    fn test_right_button_ignored() {
        let mut button = UIButton::default();
        let mut props = PropsBase::new();
        let event: UIEvent = MouseButtonEvt {
            button: MouseButton::Right,
            action: ButtonAction::Press,
            pos: Vec2::zeros(),
        }
        .into();
        button.react(&event, &mut props);
        assert_eq!(button.state(), ButtonState::Normal);
        assert!(!props.has(keys::STATE));
    }
}
