// Input shortcut system
//
// Maps keys, gamepad buttons and stick directions to player-scoped actions and
// applies them on the committed frame of a rollback simulation.
//
// ## Architecture
//
// - `action`: Trigger codes, devices and the key/gamepad element tables
// - `binding`: One shortcut: owner, device, code and the action it runs
// - `registry`: The set of live bindings
// - `detector`: Per-update activation checks (press, double press, stick edge)
// - `dispatch`: Runs activated bindings from the pre-finalize hook
// - `host`: What the detector needs from the input backend
// - `buffer`, `player`, `manager`: Reference input backend
// - `config`: Shortcut trigger configuration and validation
//
// ## Usage Example
//
// ```rust
// use engine::input::{Binding, Device, InputManager, KeyId, ShortcutDispatcher};
// use engine::rollback::PreFinalizeHook;
//
// let mut shortcuts = ShortcutDispatcher::new();
// let binding = Binding::new(0, Device::Keyboard, KeyId::F1.code(), false, |frame, entity| {
//     // Change the entity on the committed frame
// });
// shortcuts.add(&binding);
//
// // Every host update, before the simulation ticks
// shortcuts.poll(&input_manager, &hook);
// simulation.advance(&hook);
// input_manager.update();
// ```

pub mod action;
pub mod binding;
pub mod buffer;
pub mod config;
pub mod detector;
pub mod dispatch;
pub mod host;
pub mod manager;
pub mod player;
pub mod registry;

// Re-export commonly used types
pub use action::{
    Device, GamepadElement, KeyId, PlayerId, Stick, StickDirection, Trigger, TriggerCode,
    NO_TRIGGER,
};
pub use binding::{Binding, SharedBinding};
pub use config::{ConfigError, CycleTriggers, QuickSlot, ShortcutConfig};
pub use detector::ActivationDetector;
pub use dispatch::ShortcutDispatcher;
pub use host::{ControllerHandle, InputHost, Sample};
pub use manager::InputManager;
pub use player::PlayerInput;
pub use registry::BindingRegistry;
