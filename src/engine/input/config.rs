// Shortcut configuration and validation

use super::action::{
    Device, GamepadElement, KeyId, PlayerId, TriggerCode, NO_TRIGGER,
};
use crate::core::CycleRange;

/// Shortcut configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown key code: {0}")]
    UnknownKey(TriggerCode),

    #[error("Unknown gamepad element code: {0}")]
    UnknownGamepadElement(TriggerCode),

    #[error("Player {player} out of range: only {max_players} players supported")]
    PlayerOutOfRange { player: PlayerId, max_players: usize },

    #[error("Inverted cycle range: low {low} is above high {high}")]
    InvertedRange { low: usize, high: usize },
}

/// Check that `code` names a real key or gamepad element. `0` is always valid.
pub fn validate_code(device: Device, code: TriggerCode) -> Result<(), ConfigError> {
    if code == NO_TRIGGER {
        return Ok(());
    }
    match device {
        Device::Keyboard => KeyId::from_code(code)
            .map(|_| ())
            .ok_or(ConfigError::UnknownKey(code)),
        Device::Gamepad => GamepadElement::from_code(code)
            .map(|_| ())
            .ok_or(ConfigError::UnknownGamepadElement(code)),
    }
}

/// Triggers for one player's forward/backward cycling shortcuts on one device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleTriggers {
    pub player: PlayerId,
    pub device: Device,
    pub forward: TriggerCode,
    pub backward: TriggerCode,
    /// Applies to keys and buttons only; stick directions ignore it
    pub double_tap: bool,
    pub range: CycleRange,
}

impl CycleTriggers {
    pub fn new(player: PlayerId, device: Device, forward: TriggerCode, backward: TriggerCode) -> Self {
        Self {
            player,
            device,
            forward,
            backward,
            double_tap: false,
            range: CycleRange::FULL,
        }
    }

    pub fn with_double_tap(mut self, double_tap: bool) -> Self {
        self.double_tap = double_tap;
        self
    }

    pub fn with_range(mut self, range: CycleRange) -> Self {
        self.range = range;
        self
    }

    fn validate(&self, max_players: usize) -> Result<(), ConfigError> {
        if self.player >= max_players {
            return Err(ConfigError::PlayerOutOfRange {
                player: self.player,
                max_players,
            });
        }
        validate_code(self.device, self.forward)?;
        validate_code(self.device, self.backward)?;
        if let (Some(low), Some(high)) = (self.range.low, self.range.high) {
            if low > high {
                return Err(ConfigError::InvertedRange { low, high });
            }
        }
        Ok(())
    }
}

/// A keyboard key that jumps straight to a list index (player 1 only)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickSlot {
    pub key: TriggerCode,
    pub index: usize,
}

/// Trigger configuration for one cycling feature.
///
/// Holds a keyboard pair for player 1, a gamepad pair for every player and
/// a row of quick-slot keys. Setting any code to `0` disables that shortcut.
#[derive(Debug, Clone)]
pub struct ShortcutConfig {
    max_players: usize,
    cycles: Vec<CycleTriggers>,
    quick_slots: Vec<QuickSlot>,
}

impl ShortcutConfig {
    /// Palette-swap layout: Page Up/Down, double-tapped left stick click, F1-F4
    pub fn palette_defaults(max_players: usize) -> Self {
        let mut cycles = vec![CycleTriggers::new(
            0,
            Device::Keyboard,
            KeyId::PageDown.code(),
            KeyId::PageUp.code(),
        )];
        cycles.extend((0..max_players).map(|player| {
            CycleTriggers::new(
                player,
                Device::Gamepad,
                GamepadElement::LeftStickButton.code(),
                NO_TRIGGER,
            )
            .with_double_tap(true)
        }));

        let quick_slots = [KeyId::F1, KeyId::F2, KeyId::F3, KeyId::F4]
            .iter()
            .enumerate()
            .map(|(index, key)| QuickSlot {
                key: key.code(),
                index,
            })
            .collect();

        Self {
            max_players,
            cycles,
            quick_slots,
        }
    }

    /// Accessory-set layout: Insert/Delete, right stick up/down, 7-8-9-0
    pub fn accessory_defaults(max_players: usize) -> Self {
        let mut cycles = vec![CycleTriggers::new(
            0,
            Device::Keyboard,
            KeyId::Delete.code(),
            KeyId::Insert.code(),
        )];
        cycles.extend((0..max_players).map(|player| {
            CycleTriggers::new(
                player,
                Device::Gamepad,
                GamepadElement::RightStickDown.code(),
                GamepadElement::RightStickUp.code(),
            )
        }));

        let quick_slots = [KeyId::NumRow7, KeyId::NumRow8, KeyId::NumRow9, KeyId::NumRow0]
            .iter()
            .enumerate()
            .map(|(index, key)| QuickSlot {
                key: key.code(),
                index,
            })
            .collect();

        Self {
            max_players,
            cycles,
            quick_slots,
        }
    }

    pub fn max_players(&self) -> usize {
        self.max_players
    }

    pub fn cycles(&self) -> &[CycleTriggers] {
        &self.cycles
    }

    /// Cycle triggers for a player's device
    pub fn get_cycle(&self, player: PlayerId, device: Device) -> Option<&CycleTriggers> {
        self.cycles
            .iter()
            .find(|c| c.player == player && c.device == device)
    }

    pub fn get_cycle_mut(&mut self, player: PlayerId, device: Device) -> Option<&mut CycleTriggers> {
        self.cycles
            .iter_mut()
            .find(|c| c.player == player && c.device == device)
    }

    pub fn quick_slots(&self) -> &[QuickSlot] {
        &self.quick_slots
    }

    pub fn quick_slot_mut(&mut self, slot: usize) -> Option<&mut QuickSlot> {
        self.quick_slots.get_mut(slot)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for cycle in &self.cycles {
            cycle.validate(self.max_players)?;
        }
        for slot in &self.quick_slots {
            validate_code(Device::Keyboard, slot.key)?;
        }
        Ok(())
    }
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self::palette_defaults(4)
    }
}
