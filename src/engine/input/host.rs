// Host input interface consumed by the activation detector

use super::action::{Device, PlayerId, Stick, TriggerCode};
use glam::Vec2;

/// Identifies one physical controller of one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerHandle {
    pub player: PlayerId,
    pub device: Device,
    /// Index among the player's controllers of that device kind
    pub index: usize,
}

impl ControllerHandle {
    pub fn keyboard(player: PlayerId) -> Self {
        Self {
            player,
            device: Device::Keyboard,
            index: 0,
        }
    }

    pub fn gamepad(player: PlayerId, index: usize) -> Self {
        Self {
            player,
            device: Device::Gamepad,
            index,
        }
    }
}

/// Which stick sample to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    Current,
    Previous,
}

/// What the shortcut core needs from the host's input layer.
///
/// All queries describe the state of the frame currently being polled.
pub trait InputHost {
    /// Players known to the host, in a stable order
    fn players(&self) -> Vec<PlayerId>;

    /// The controller the player used most recently, if any is connected
    fn active_controller(&self, player: PlayerId) -> Option<ControllerHandle>;

    /// A press of `code` started this frame
    fn press_edge(&self, controller: &ControllerHandle, code: TriggerCode) -> bool;

    /// A second press of `code` started this frame within the double-press window
    fn double_press_edge(&self, controller: &ControllerHandle, code: TriggerCode) -> bool;

    /// Stick position for this frame or the one before
    fn stick(&self, controller: &ControllerHandle, stick: Stick, sample: Sample) -> Vec2;
}
