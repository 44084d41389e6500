// Per-player controller state management

use super::action::{Device, PlayerId, Stick, TriggerCode};
use super::buffer::PressBuffer;
use super::host::Sample;
use glam::Vec2;
use std::collections::HashSet;

/// A stick sample past this magnitude marks its gamepad as the active controller
const STICK_ACTIVITY_THRESHOLD: f32 = 0.5;

/// Button state of a single device (a keyboard, or a gamepad's buttons)
#[derive(Debug, Default)]
pub struct ButtonState {
    /// Codes that are currently held
    pressed: HashSet<TriggerCode>,

    /// Codes whose press started this frame
    just_pressed: HashSet<TriggerCode>,

    /// Codes whose press this frame completed a double press
    double_pressed: HashSet<TriggerCode>,

    /// Codes released this frame
    just_released: HashSet<TriggerCode>,

    /// Recent presses for double-press detection
    buffer: PressBuffer,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, code: TriggerCode) -> bool {
        self.pressed.contains(&code)
    }

    pub fn just_pressed(&self, code: TriggerCode) -> bool {
        self.just_pressed.contains(&code)
    }

    pub fn double_pressed(&self, code: TriggerCode) -> bool {
        self.double_pressed.contains(&code)
    }

    pub fn just_released(&self, code: TriggerCode) -> bool {
        self.just_released.contains(&code)
    }

    /// Register a press. Returns true if this started a new press.
    pub(crate) fn press(&mut self, code: TriggerCode) -> bool {
        if !self.pressed.insert(code) {
            return false;
        }
        self.just_pressed.insert(code);
        if self.buffer.record(code) {
            self.double_pressed.insert(code);
        }
        true
    }

    pub(crate) fn release(&mut self, code: TriggerCode) {
        if self.pressed.remove(&code) {
            self.just_released.insert(code);
        }
    }

    /// Clear edges for a new frame
    pub(crate) fn update(&mut self) {
        self.just_pressed.clear();
        self.double_pressed.clear();
        self.just_released.clear();
        self.buffer.update();
    }

    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.double_pressed.clear();
        self.just_released.clear();
        self.buffer.clear();
    }
}

/// Current and previous-frame position of one analog stick
#[derive(Debug, Default, Clone, Copy)]
pub struct StickState {
    current: Vec2,
    previous: Vec2,
}

impl StickState {
    pub fn get(&self, sample: Sample) -> Vec2 {
        match sample {
            Sample::Current => self.current,
            Sample::Previous => self.previous,
        }
    }

    pub(crate) fn set(&mut self, value: Vec2) {
        self.current = value;
    }

    pub(crate) fn update(&mut self) {
        self.previous = self.current;
    }
}

/// One gamepad: digital buttons plus two sticks
#[derive(Debug, Default)]
pub struct JoystickState {
    pub buttons: ButtonState,
    sticks: [StickState; 2],
}

impl JoystickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stick(&self, stick: Stick) -> &StickState {
        &self.sticks[stick.index()]
    }

    pub(crate) fn set_stick(&mut self, stick: Stick, value: Vec2) {
        self.sticks[stick.index()].set(value);
    }

    pub(crate) fn update(&mut self) {
        self.buttons.update();
        for stick in &mut self.sticks {
            stick.update();
        }
    }

    pub fn reset(&mut self) {
        self.buttons.reset();
        self.sticks = [StickState::default(); 2];
    }
}

/// Controller state for a single player
#[derive(Debug)]
pub struct PlayerInput {
    player_id: PlayerId,

    keyboard: Option<ButtonState>,

    joysticks: Vec<JoystickState>,

    /// Device and index that most recently produced input
    last_active: Option<(Device, usize)>,
}

impl PlayerInput {
    /// Create a player with no controllers attached
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            keyboard: None,
            joysticks: Vec::new(),
            last_active: None,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }

    pub fn attach_keyboard(&mut self) {
        if self.keyboard.is_none() {
            self.keyboard = Some(ButtonState::new());
        }
    }

    /// Attach a gamepad, returning its index
    pub fn attach_joystick(&mut self) -> usize {
        self.joysticks.push(JoystickState::new());
        self.joysticks.len() - 1
    }

    /// Detach a gamepad; later gamepads shift down one index
    pub fn detach_joystick(&mut self, index: usize) {
        if index < self.joysticks.len() {
            self.joysticks.remove(index);
            if let Some((Device::Gamepad, active)) = self.last_active {
                if active == index {
                    self.last_active = None;
                } else if active > index {
                    self.last_active = Some((Device::Gamepad, active - 1));
                }
            }
        }
    }

    pub fn keyboard(&self) -> Option<&ButtonState> {
        self.keyboard.as_ref()
    }

    pub fn joystick(&self, index: usize) -> Option<&JoystickState> {
        self.joysticks.get(index)
    }

    pub fn joystick_count(&self) -> usize {
        self.joysticks.len()
    }

    /// Device and index of the most recently used controller, if still attached
    pub fn last_active(&self) -> Option<(Device, usize)> {
        match self.last_active {
            Some((Device::Keyboard, _)) if self.keyboard.is_some() => self.last_active,
            Some((Device::Gamepad, index)) if index < self.joysticks.len() => self.last_active,
            _ => None,
        }
    }

    /// Buttons of the given device, if attached
    pub fn buttons(&self, device: Device, index: usize) -> Option<&ButtonState> {
        match device {
            Device::Keyboard => self.keyboard.as_ref(),
            Device::Gamepad => self.joysticks.get(index).map(|pad| &pad.buttons),
        }
    }

    pub(crate) fn press_key(&mut self, code: TriggerCode) {
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.press(code);
            self.last_active = Some((Device::Keyboard, 0));
        }
    }

    pub(crate) fn release_key(&mut self, code: TriggerCode) {
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.release(code);
        }
    }

    pub(crate) fn press_button(&mut self, index: usize, code: TriggerCode) {
        if let Some(pad) = self.joysticks.get_mut(index) {
            pad.buttons.press(code);
            self.last_active = Some((Device::Gamepad, index));
        }
    }

    pub(crate) fn release_button(&mut self, index: usize, code: TriggerCode) {
        if let Some(pad) = self.joysticks.get_mut(index) {
            pad.buttons.release(code);
        }
    }

    pub(crate) fn set_stick(&mut self, index: usize, stick: Stick, value: Vec2) {
        if let Some(pad) = self.joysticks.get_mut(index) {
            pad.set_stick(stick, value);
            if value.length() > STICK_ACTIVITY_THRESHOLD {
                self.last_active = Some((Device::Gamepad, index));
            }
        }
    }

    /// Advance to a new frame. Call once per frame after all input is processed.
    pub(crate) fn update(&mut self) {
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.update();
        }
        for pad in &mut self.joysticks {
            pad.update();
        }
    }

    /// Reset all input state, keeping attached controllers
    pub fn reset(&mut self) {
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.reset();
        }
        for pad in &mut self.joysticks {
            pad.reset();
        }
        self.last_active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_press_edge_only_once_while_held() {
        let mut buttons = ButtonState::new();
        assert!(buttons.press(11));
        assert!(buttons.just_pressed(11));

        buttons.update();
        assert!(!buttons.press(11), "Held key must not restart the press");
        assert!(!buttons.just_pressed(11));
        assert!(buttons.is_pressed(11));
    }

    #[test]
    fn test_release() {
        let mut buttons = ButtonState::new();
        buttons.press(11);
        buttons.update();
        buttons.release(11);
        assert!(!buttons.is_pressed(11));
        assert!(buttons.just_released(11));
    }

    #[test]
    fn test_release_unpressed_code() {
        let mut buttons = ButtonState::new();
        buttons.release(11);
        assert!(!buttons.just_released(11));
    }

    #[test]
    fn test_double_press_edge() {
        let mut buttons = ButtonState::new();
        buttons.press(11);
        buttons.update();
        buttons.release(11);
        buttons.update();
        buttons.press(11);
        assert!(buttons.double_pressed(11));

        buttons.update();
        assert!(!buttons.double_pressed(11));
    }

    #[test]
    fn test_stick_previous_sample() {
        let mut pad = JoystickState::new();
        pad.set_stick(Stick::Right, Vec2::new(0.0, 0.3));
        pad.update();
        pad.set_stick(Stick::Right, Vec2::new(0.0, 0.6));

        let stick = pad.stick(Stick::Right);
        assert_relative_eq!(stick.get(Sample::Previous).y, 0.3);
        assert_relative_eq!(stick.get(Sample::Current).y, 0.6);
        assert_relative_eq!(pad.stick(Stick::Left).get(Sample::Current).length(), 0.0);
    }

    #[test]
    fn test_last_active_follows_input() {
        let mut player = PlayerInput::new(0);
        player.attach_keyboard();
        let pad = player.attach_joystick();
        assert_eq!(player.last_active(), None);

        player.press_key(11);
        assert_eq!(player.last_active(), Some((Device::Keyboard, 0)));

        player.set_stick(pad, Stick::Left, Vec2::new(0.1, 0.0));
        assert_eq!(
            player.last_active(),
            Some((Device::Keyboard, 0)),
            "Small stick noise must not steal focus"
        );

        player.press_button(pad, 6);
        assert_eq!(player.last_active(), Some((Device::Gamepad, pad)));
    }

    #[test]
    fn test_detach_active_joystick() {
        let mut player = PlayerInput::new(1);
        let first = player.attach_joystick();
        let second = player.attach_joystick();
        player.press_button(second, 6);

        player.detach_joystick(first);
        assert_eq!(player.last_active(), Some((Device::Gamepad, 0)));

        player.detach_joystick(0);
        assert_eq!(player.last_active(), None);
        assert_eq!(player.joystick_count(), 0);
    }

    #[test]
    fn test_press_without_keyboard_is_ignored() {
        let mut player = PlayerInput::new(2);
        player.press_key(11);
        assert!(player.keyboard().is_none());
        assert_eq!(player.last_active(), None);
    }

    #[test]
    fn test_reset() {
        let mut player = PlayerInput::new(0);
        player.attach_keyboard();
        player.press_key(11);
        player.reset();

        assert!(!player.keyboard().unwrap().is_pressed(11));
        assert_eq!(player.last_active(), None);
    }
}
