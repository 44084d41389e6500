// Input manager - host-side controller state for all local players

use super::action::{Device, KeyId, PlayerId, Stick, TriggerCode};
use super::host::{ControllerHandle, InputHost, Sample};
use super::player::PlayerInput;
use glam::Vec2;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Owns the controller state of every local player and answers the
/// shortcut core's [`InputHost`] queries
pub struct InputManager {
    players: Vec<PlayerInput>,
}

impl InputManager {
    /// Create a manager for `max_players` players with no controllers attached
    pub fn new(max_players: usize) -> Self {
        let players = (0..max_players).map(PlayerInput::new).collect();
        Self { players }
    }

    /// Process a keyboard event from winit for the given player
    pub fn process_keyboard_event(&mut self, player_id: PlayerId, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };
        let Some(key) = KeyId::from_winit(key_code) else {
            log::trace!("Ignoring unmapped key {:?}", key_code);
            return;
        };

        match event.state {
            // Key repeats are not new presses
            ElementState::Pressed if !event.repeat => self.press_key(player_id, key.code()),
            ElementState::Pressed => {}
            ElementState::Released => self.release_key(player_id, key.code()),
        }
    }

    pub fn press_key(&mut self, player_id: PlayerId, code: TriggerCode) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.press_key(code);
        }
    }

    pub fn release_key(&mut self, player_id: PlayerId, code: TriggerCode) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.release_key(code);
        }
    }

    pub fn press_button(&mut self, player_id: PlayerId, pad: usize, code: TriggerCode) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.press_button(pad, code);
        }
    }

    pub fn release_button(&mut self, player_id: PlayerId, pad: usize, code: TriggerCode) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.release_button(pad, code);
        }
    }

    pub fn set_stick(&mut self, player_id: PlayerId, pad: usize, stick: Stick, value: Vec2) {
        if let Some(player) = self.players.get_mut(player_id) {
            player.set_stick(pad, stick, value);
        }
    }

    /// Advance all players to a new frame.
    /// Call once per frame after the shortcut core has polled.
    pub fn update(&mut self) {
        for player in &mut self.players {
            player.update();
        }
    }

    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerInput> {
        self.players.get(player_id)
    }

    pub fn player_mut(&mut self, player_id: PlayerId) -> Option<&mut PlayerInput> {
        self.players.get_mut(player_id)
    }

    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    fn buttons(&self, controller: &ControllerHandle) -> Option<&super::player::ButtonState> {
        self.players
            .get(controller.player)?
            .buttons(controller.device, controller.index)
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(4)
    }
}

impl InputHost for InputManager {
    fn players(&self) -> Vec<PlayerId> {
        self.players.iter().map(PlayerInput::player_id).collect()
    }

    fn active_controller(&self, player: PlayerId) -> Option<ControllerHandle> {
        let (device, index) = self.players.get(player)?.last_active()?;
        Some(ControllerHandle {
            player,
            device,
            index,
        })
    }

    fn press_edge(&self, controller: &ControllerHandle, code: TriggerCode) -> bool {
        self.buttons(controller)
            .is_some_and(|buttons| buttons.just_pressed(code))
    }

    fn double_press_edge(&self, controller: &ControllerHandle, code: TriggerCode) -> bool {
        self.buttons(controller)
            .is_some_and(|buttons| buttons.double_pressed(code))
    }

    fn stick(&self, controller: &ControllerHandle, stick: Stick, sample: Sample) -> Vec2 {
        if controller.device != Device::Gamepad {
            return Vec2::ZERO;
        }
        self.players
            .get(controller.player)
            .and_then(|player| player.joystick(controller.index))
            .map(|pad| pad.stick(stick).get(sample))
            .unwrap_or(Vec2::ZERO)
    }
}
