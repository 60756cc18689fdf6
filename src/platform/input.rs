//! Keyboard and touch-overlay input
//!
//! Browser events are mapped to actions here; `Controls` folds them into the
//! per-tick `TickInput` the simulation consumes.

use crate::sim::{GameEvent, TickInput};

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Left,
    Right,
    Jump,
    Restart,
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value to an action
pub fn action_for_key(key: &str) -> Option<Action> {
    match key {
        "ArrowLeft" => Some(Action::Left),
        "ArrowRight" => Some(Action::Right),
        "ArrowUp" | " " | "Space" | "Spacebar" => Some(Action::Jump),
        _ => match key.to_ascii_lowercase().as_str() {
            "a" => Some(Action::Left),
            "d" => Some(Action::Right),
            "w" => Some(Action::Jump),
            "r" => Some(Action::Restart),
            "i" => Some(Action::ToggleAutopilot),
            _ => None,
        },
    }
}

/// On-screen buttons for touch devices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayButton {
    Left,
    Right,
    Jump,
    Restart,
}

impl OverlayButton {
    pub const ALL: [OverlayButton; 4] = [
        OverlayButton::Left,
        OverlayButton::Right,
        OverlayButton::Jump,
        OverlayButton::Restart,
    ];

    /// DOM element id
    pub fn element_id(&self) -> &'static str {
        match self {
            OverlayButton::Left => "btn-left",
            OverlayButton::Right => "btn-right",
            OverlayButton::Jump => "btn-jump",
            OverlayButton::Restart => "btn-restart",
        }
    }

    /// Held buttons stay active until released; the rest fire once
    pub fn is_held(&self) -> bool {
        matches!(self, OverlayButton::Left | OverlayButton::Right)
    }

    /// DOM events that press the button
    pub fn press_events(&self) -> &'static [&'static str] {
        match self {
            OverlayButton::Restart => &["touchstart", "click"],
            _ => &["touchstart", "mousedown"],
        }
    }

    /// DOM events that release a held button
    pub fn release_events(&self) -> &'static [&'static str] {
        if self.is_held() {
            &["touchend", "touchcancel", "mouseup", "mouseleave"]
        } else {
            &[]
        }
    }
}

/// Accumulated input state between frames
#[derive(Debug, Clone, Default)]
pub struct Controls {
    key_left: bool,
    key_right: bool,
    touch_left: bool,
    touch_right: bool,
    /// One-shot: cleared once a substep has seen it
    jump: bool,
    restart: bool,
    /// Demo mode toggle
    pub autopilot: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a keydown; returns true when the key is bound
    pub fn key_down(&mut self, key: &str, repeat: bool) -> bool {
        let Some(action) = action_for_key(key) else {
            return false;
        };
        match action {
            Action::Left => self.key_left = true,
            Action::Right => self.key_right = true,
            // Auto-repeat must not re-trigger presses
            _ if repeat => {}
            Action::Jump => self.jump = true,
            Action::Restart => self.restart = true,
            Action::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                log::info!("Autopilot {}", if self.autopilot { "on" } else { "off" });
            }
        }
        true
    }

    /// Handle a keyup; returns true when the key is bound
    pub fn key_up(&mut self, key: &str) -> bool {
        match action_for_key(key) {
            Some(Action::Left) => self.key_left = false,
            Some(Action::Right) => self.key_right = false,
            Some(_) => {}
            None => return false,
        }
        true
    }

    pub fn button_down(&mut self, button: OverlayButton) {
        match button {
            OverlayButton::Left => self.touch_left = true,
            OverlayButton::Right => self.touch_right = true,
            OverlayButton::Jump => self.jump = true,
            OverlayButton::Restart => self.restart = true,
        }
    }

    pub fn button_up(&mut self, button: OverlayButton) {
        match button {
            OverlayButton::Left => self.touch_left = false,
            OverlayButton::Right => self.touch_right = false,
            _ => {}
        }
    }

    /// Drop everything held (window blur, restart)
    pub fn release_held(&mut self) {
        self.key_left = false;
        self.key_right = false;
        self.touch_left = false;
        self.touch_right = false;
    }

    /// React to simulation events; a new run starts with nothing held
    pub fn observe(&mut self, event: &GameEvent) {
        if *event == GameEvent::Restarted {
            self.release_held();
        }
    }

    /// Snapshot for the next substep
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            left: self.key_left || self.touch_left,
            right: self.key_right || self.touch_right,
            jump: self.jump,
            restart: self.restart,
            autopilot: self.autopilot,
        }
    }

    /// Called after the first substep of a frame
    pub fn consume_one_shots(&mut self) {
        self.jump = false;
        self.restart = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for_key("ArrowLeft"), Some(Action::Left));
        assert_eq!(action_for_key("A"), Some(Action::Left));
        assert_eq!(action_for_key("d"), Some(Action::Right));
        assert_eq!(action_for_key(" "), Some(Action::Jump));
        assert_eq!(action_for_key("W"), Some(Action::Jump));
        assert_eq!(action_for_key("ArrowUp"), Some(Action::Jump));
        assert_eq!(action_for_key("R"), Some(Action::Restart));
        assert_eq!(action_for_key("i"), Some(Action::ToggleAutopilot));
        assert_eq!(action_for_key("Enter"), None);
        assert_eq!(action_for_key("ArrowDown"), None);
    }

    #[test]
    fn test_held_keys_and_release() {
        let mut controls = Controls::new();
        assert!(controls.key_down("ArrowLeft", false));
        assert!(controls.tick_input().left);

        // Keyboard and touch are independent sources
        controls.button_down(OverlayButton::Left);
        controls.key_up("ArrowLeft");
        assert!(controls.tick_input().left);
        controls.button_up(OverlayButton::Left);
        assert!(!controls.tick_input().left);

        controls.key_down("d", false);
        controls.release_held();
        assert!(!controls.tick_input().right);
    }

    #[test]
    fn test_jump_is_one_shot() {
        let mut controls = Controls::new();
        controls.key_down(" ", false);
        assert!(controls.tick_input().jump);
        controls.consume_one_shots();
        assert!(!controls.tick_input().jump);

        // Held key repeating does not jump again
        controls.key_down(" ", true);
        assert!(!controls.tick_input().jump);
    }

    #[test]
    fn test_overlay_buttons() {
        let mut controls = Controls::new();
        controls.button_down(OverlayButton::Jump);
        controls.button_down(OverlayButton::Restart);
        let input = controls.tick_input();
        assert!(input.jump && input.restart);
        controls.consume_one_shots();
        let input = controls.tick_input();
        assert!(!input.jump && !input.restart);

        assert!(OverlayButton::Left.is_held());
        assert!(!OverlayButton::Jump.is_held());
        assert_eq!(OverlayButton::Restart.element_id(), "btn-restart");
        assert!(OverlayButton::Right.release_events().contains(&"mouseleave"));
        assert!(OverlayButton::Jump.release_events().is_empty());
        assert_eq!(OverlayButton::Restart.press_events(), &["touchstart", "click"]);
    }

    #[test]
    fn test_autopilot_toggle() {
        let mut controls = Controls::new();
        controls.key_down("i", false);
        assert!(controls.tick_input().autopilot);
        controls.key_down("I", true);
        assert!(controls.tick_input().autopilot);
        controls.key_down("I", false);
        assert!(!controls.tick_input().autopilot);
    }

    #[test]
    fn test_restart_releases_held_buttons() {
        let mut controls = Controls::new();
        controls.button_down(OverlayButton::Right);
        controls.key_down("a", false);

        controls.observe(&GameEvent::Landed);
        assert!(controls.tick_input().right);

        controls.observe(&GameEvent::Restarted);
        let input = controls.tick_input();
        assert!(!input.left && !input.right);
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut controls = Controls::new();
        assert!(!controls.key_down("Tab", false));
        assert!(!controls.key_up("Tab"));
    }
}
