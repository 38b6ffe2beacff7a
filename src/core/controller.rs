/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    KeyQ,
    KeyE,
    Space,
    Shift,
}

/// Controller - handles button input states
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];
}

/// Controller fed by code instead of a window, for headless viewports
#[derive(Debug, Clone, Default)]
pub struct ScriptedController {
    pressed: Vec<Button>,
}

impl ScriptedController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: Button) {
        if !self.pressed.contains(&button) {
            self.pressed.push(button);
        }
    }

    pub fn release(&mut self, button: Button) {
        self.pressed.retain(|&b| b != button);
    }

    /// Replace the held buttons with exactly `buttons`
    pub fn hold(&mut self, buttons: &[Button]) {
        self.pressed.clear();
        for &button in buttons {
            self.press(button);
        }
    }
}

impl Controller for ScriptedController {
    fn is_down(&self, button: Button) -> bool {
        self.pressed.contains(&button)
    }

    fn get_down_keys(&self) -> &[Button] {
        &self.pressed
    }
}
