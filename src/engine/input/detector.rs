// Activation detection: turns controller state into "fired this frame"

use super::action::{Device, StickDirection, Trigger};
use super::binding::SharedBinding;
use super::host::{ControllerHandle, InputHost, Sample};
use super::registry::BindingRegistry;
use crate::engine::rollback::SimulationFrame;
use glam::Vec2;
use std::rc::Rc;

/// Counter-axis magnitude beyond which a stick tilt counts as diagonal
pub const COUNTER_DEADZONE: f32 = 0.35;

/// Primary-axis magnitude a stick must cross to activate
pub const ACTIVATION_THRESHOLD: f32 = 0.5;

/// Bindings that activated during the current frame, without duplicates
pub struct ActivationQueue<F: SimulationFrame> {
    activated: Vec<SharedBinding<F>>,
}

impl<F: SimulationFrame> ActivationQueue<F> {
    pub fn new() -> Self {
        Self {
            activated: Vec::new(),
        }
    }

    /// Queue a binding unless it is already queued
    pub fn push(&mut self, binding: &SharedBinding<F>) {
        if !self.activated.iter().any(|queued| Rc::ptr_eq(queued, binding)) {
            self.activated.push(Rc::clone(binding));
        }
    }

    /// Empty the queue, returning what was in it
    pub fn take(&mut self) -> Vec<SharedBinding<F>> {
        std::mem::take(&mut self.activated)
    }

    pub fn len(&self) -> usize {
        self.activated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activated.is_empty()
    }

    pub fn clear(&mut self) {
        self.activated.clear();
    }
}

impl<F: SimulationFrame> Default for ActivationQueue<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame evaluator for registered bindings
#[derive(Debug, Clone, Copy)]
pub struct ActivationDetector {
    pub counter_deadzone: f32,
    pub threshold: f32,
}

impl ActivationDetector {
    pub fn new() -> Self {
        Self {
            counter_deadzone: COUNTER_DEADZONE,
            threshold: ACTIVATION_THRESHOLD,
        }
    }

    /// Evaluate every registered binding against the players' active
    /// controllers and queue the ones that fired
    pub fn poll<F: SimulationFrame>(
        &self,
        registry: &BindingRegistry<F>,
        host: &impl InputHost,
        queue: &mut ActivationQueue<F>,
    ) {
        if registry.is_empty() {
            return;
        }

        for player in host.players() {
            let Some(active) = host.active_controller(player) else {
                continue;
            };

            // Gamepad shortcuts always read the player's first joystick
            let controller = match active.device {
                Device::Keyboard => ControllerHandle::keyboard(player),
                Device::Gamepad => ControllerHandle::gamepad(player, 0),
            };

            for binding in registry
                .iter()
                .filter(|b| b.owner() == player && b.device() == controller.device)
            {
                let Some(trigger) = binding.trigger() else {
                    continue;
                };
                if self.is_activated(host, &controller, trigger) {
                    log::debug!("Shortcut activated: {:?}", binding);
                    queue.push(binding);
                }
            }
        }
    }

    /// Whether `trigger` fired this frame on `controller`
    pub fn is_activated(
        &self,
        host: &impl InputHost,
        controller: &ControllerHandle,
        trigger: Trigger,
    ) -> bool {
        match trigger {
            Trigger::Digital {
                code,
                double_tap: true,
            } => host.double_press_edge(controller, code),
            Trigger::Digital {
                code,
                double_tap: false,
            } => host.press_edge(controller, code),
            Trigger::Stick { stick, direction } => self.stick_crossed(
                direction,
                host.stick(controller, stick, Sample::Current),
                host.stick(controller, stick, Sample::Previous),
            ),
        }
    }

    /// Rising edge of a stick past the threshold in one direction.
    ///
    /// The tilt must be on the direction's side of center and must not lean
    /// past the deadzone on the other axis, so a diagonal cannot fire both
    /// an up and a side shortcut.
    pub fn stick_crossed(&self, direction: StickDirection, current: Vec2, previous: Vec2) -> bool {
        let (primary, counter, previous_primary) = match direction {
            StickDirection::Up | StickDirection::Down => (current.y, current.x, previous.y),
            StickDirection::Left | StickDirection::Right => (current.x, current.y, previous.x),
        };

        let correct_side = match direction {
            StickDirection::Up | StickDirection::Right => primary > 0.0,
            StickDirection::Down | StickDirection::Left => primary < 0.0,
        };
        if !correct_side || counter.abs() > self.counter_deadzone {
            return false;
        }

        primary.abs() > self.threshold && previous_primary.abs() <= self.threshold
    }
}

impl Default for ActivationDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action::{GamepadElement, KeyId, PlayerId, Stick};
    use crate::engine::input::binding::Binding;
    use crate::engine::input::buffer::DOUBLE_PRESS_WINDOW;
    use crate::engine::input::manager::InputManager;
    use crate::engine::rollback::Stream;

    struct Frame;

    impl SimulationFrame for Frame {
        type Entity = ();

        fn stream(&self) -> Stream {
            Stream::Primary
        }

        fn frame(&self) -> u64 {
            0
        }

        fn controlled_entities(&self) -> Vec<(PlayerId, ())> {
            Vec::new()
        }
    }

    struct Rig {
        input: InputManager,
        registry: BindingRegistry<Frame>,
        queue: ActivationQueue<Frame>,
        detector: ActivationDetector,
    }

    impl Rig {
        fn new() -> Self {
            let mut input = InputManager::new(2);
            input.player_mut(0).unwrap().attach_keyboard();
            input.player_mut(1).unwrap().attach_joystick();
            Self {
                input,
                registry: BindingRegistry::new(),
                queue: ActivationQueue::new(),
                detector: ActivationDetector::new(),
            }
        }

        fn bind(&mut self, player: PlayerId, device: Device, code: u16, double_tap: bool) {
            let binding = Binding::new(player, device, code, double_tap, |_: &mut Frame, _: &()| {});
            self.registry.add(&binding);
        }

        /// Poll, report how many bindings fired, then start the next frame
        fn frame(&mut self) -> usize {
            self.detector.poll(&self.registry, &self.input, &mut self.queue);
            let fired = self.queue.take().len();
            self.input.update();
            fired
        }
    }

    #[test]
    fn test_held_key_fires_once() {
        let mut rig = Rig::new();
        rig.bind(0, Device::Keyboard, KeyId::K.code(), false);

        rig.input.press_key(0, KeyId::K.code());
        assert_eq!(rig.frame(), 1);
        for _ in 0..10 {
            rig.input.press_key(0, KeyId::K.code());
            assert_eq!(rig.frame(), 0, "Holding the key must not fire again");
        }
    }

    #[test]
    fn test_double_tap_inside_window() {
        let mut rig = Rig::new();
        rig.bind(0, Device::Keyboard, KeyId::K.code(), true);

        rig.input.press_key(0, KeyId::K.code());
        assert_eq!(rig.frame(), 0, "Single press must not fire a double-tap binding");
        rig.input.release_key(0, KeyId::K.code());
        assert_eq!(rig.frame(), 0);
        rig.input.press_key(0, KeyId::K.code());
        assert_eq!(rig.frame(), 1);
    }

    #[test]
    fn test_double_tap_outside_window() {
        let mut rig = Rig::new();
        rig.bind(0, Device::Keyboard, KeyId::K.code(), true);

        rig.input.press_key(0, KeyId::K.code());
        rig.frame();
        rig.input.release_key(0, KeyId::K.code());
        for _ in 0..DOUBLE_PRESS_WINDOW {
            assert_eq!(rig.frame(), 0);
        }
        rig.input.press_key(0, KeyId::K.code());
        assert_eq!(rig.frame(), 0);
    }

    #[test]
    fn test_binding_only_matches_its_player_and_device() {
        let mut rig = Rig::new();
        rig.bind(1, Device::Keyboard, KeyId::K.code(), false);
        rig.bind(0, Device::Gamepad, KeyId::K.code(), false);

        rig.input.press_key(0, KeyId::K.code());
        assert_eq!(rig.frame(), 0);
    }

    #[test]
    fn test_gamepad_button() {
        let mut rig = Rig::new();
        rig.bind(1, Device::Gamepad, GamepadElement::A.code(), false);

        rig.input.press_button(1, 0, GamepadElement::A.code());
        assert_eq!(rig.frame(), 1);
    }

    #[test]
    fn test_gamepad_reads_first_joystick() {
        let mut rig = Rig::new();
        rig.bind(1, Device::Gamepad, GamepadElement::A.code(), false);
        let second = rig.input.player_mut(1).unwrap().attach_joystick();

        // The second pad becomes active, but shortcuts read pad 0
        rig.input.press_button(1, second, GamepadElement::A.code());
        assert_eq!(rig.frame(), 0);
    }

    #[test]
    fn test_stick_crossing_fires_once() {
        let mut rig = Rig::new();
        rig.bind(1, Device::Gamepad, GamepadElement::LeftStickUp.code(), false);

        rig.input.set_stick(1, 0, Stick::Left, Vec2::new(0.1, 0.3));
        rig.input.press_button(1, 0, GamepadElement::Start.code());
        assert_eq!(rig.frame(), 0);

        rig.input.set_stick(1, 0, Stick::Left, Vec2::new(0.1, 0.6));
        assert_eq!(rig.frame(), 1);

        for _ in 0..5 {
            rig.input.set_stick(1, 0, Stick::Left, Vec2::new(0.1, 0.6));
            assert_eq!(rig.frame(), 0, "Holding past the threshold must not repeat");
        }
    }

    #[test]
    fn test_stick_diagonal_rejected() {
        let detector = ActivationDetector::new();
        let previous = Vec2::new(0.4, 0.3);
        let current = Vec2::new(0.4, 0.6);
        assert!(!detector.stick_crossed(StickDirection::Up, current, previous));
        assert!(!detector.stick_crossed(StickDirection::Right, current, previous));
    }

    #[test]
    fn test_stick_each_direction() {
        let detector = ActivationDetector::new();
        let rest = Vec2::ZERO;
        assert!(detector.stick_crossed(StickDirection::Up, Vec2::new(0.0, 0.6), rest));
        assert!(detector.stick_crossed(StickDirection::Down, Vec2::new(0.0, -0.6), rest));
        assert!(detector.stick_crossed(StickDirection::Left, Vec2::new(-0.6, 0.0), rest));
        assert!(detector.stick_crossed(StickDirection::Right, Vec2::new(0.6, 0.0), rest));
    }

    #[test]
    fn test_stick_wrong_side_rejected() {
        let detector = ActivationDetector::new();
        assert!(!detector.stick_crossed(StickDirection::Up, Vec2::new(0.0, -0.6), Vec2::ZERO));
        assert!(!detector.stick_crossed(StickDirection::Left, Vec2::new(0.6, 0.0), Vec2::ZERO));
        assert!(!detector.stick_crossed(StickDirection::Down, Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn test_stick_flick_through_center() {
        // Previous magnitude counts regardless of side
        let detector = ActivationDetector::new();
        assert!(!detector.stick_crossed(
            StickDirection::Up,
            Vec2::new(0.0, 0.7),
            Vec2::new(0.0, -0.7)
        ));
    }

    #[test]
    fn test_keyboard_high_code_is_digital() {
        let mut rig = Rig::new();
        rig.bind(0, Device::Keyboard, KeyId::F4.code(), false);

        rig.input.press_key(0, KeyId::F4.code());
        assert_eq!(rig.frame(), 1);
    }

    #[test]
    fn test_no_active_controller_no_activation() {
        let mut rig = Rig::new();
        rig.bind(1, Device::Gamepad, GamepadElement::LeftStickUp.code(), false);
        assert_eq!(rig.frame(), 0);
    }

    #[test]
    fn test_queue_dedups_across_polls() {
        let mut rig = Rig::new();
        rig.bind(0, Device::Keyboard, KeyId::K.code(), false);
        rig.input.press_key(0, KeyId::K.code());

        rig.detector.poll(&rig.registry, &rig.input, &mut rig.queue);
        rig.detector.poll(&rig.registry, &rig.input, &mut rig.queue);
        assert_eq!(rig.queue.len(), 1);

        rig.queue.clear();
        assert!(rig.queue.is_empty());
    }
}
