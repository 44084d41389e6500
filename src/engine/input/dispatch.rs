// Shortcut dispatch: polls bindings and applies activated ones on the committed frame

use super::binding::SharedBinding;
use super::detector::{ActivationDetector, ActivationQueue};
use super::host::InputHost;
use super::registry::BindingRegistry;
use crate::engine::rollback::{DeferredCallback, PreFinalizeHook, SimulationFrame};
use std::cell::RefCell;
use std::rc::Rc;

/// Owns the binding registry and the activation queue, and bridges them to
/// the pre-finalize hook.
///
/// Call [`poll`](Self::poll) once per host update. When anything activated,
/// the dispatcher subscribes itself to the hook; on the next primary frame
/// each activated binding runs against its player's entity and the queue
/// is cleared.
pub struct ShortcutDispatcher<F: SimulationFrame + 'static> {
    registry: BindingRegistry<F>,
    detector: ActivationDetector,
    queue: Rc<RefCell<ActivationQueue<F>>>,
    dispatch: DeferredCallback<F>,
}

impl<F: SimulationFrame + 'static> ShortcutDispatcher<F> {
    pub fn new() -> Self {
        Self::with_detector(ActivationDetector::new())
    }

    pub fn with_detector(detector: ActivationDetector) -> Self {
        let queue = Rc::new(RefCell::new(ActivationQueue::new()));
        let pending = Rc::clone(&queue);
        let dispatch: DeferredCallback<F> =
            Rc::new(move |frame: &mut F| dispatch_activated(&pending, frame));

        Self {
            registry: BindingRegistry::new(),
            detector,
            queue,
            dispatch,
        }
    }

    pub fn registry(&self) -> &BindingRegistry<F> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BindingRegistry<F> {
        &mut self.registry
    }

    pub fn add(&mut self, binding: &SharedBinding<F>) -> bool {
        self.registry.add(binding)
    }

    pub fn remove(&mut self, binding: &SharedBinding<F>) -> bool {
        self.registry.remove(binding)
    }

    pub fn refresh(&mut self, binding: &SharedBinding<F>) {
        self.registry.refresh(binding);
    }

    /// Number of bindings waiting for the next primary frame
    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Evaluate bindings for this update and schedule dispatch if any fired
    pub fn poll(&mut self, host: &impl InputHost, hook: &PreFinalizeHook<F>) {
        let mut queue = self.queue.borrow_mut();
        self.detector.poll(&self.registry, host, &mut queue);

        if !queue.is_empty() {
            hook.subscribe(Rc::clone(&self.dispatch));
        }
    }
}

impl<F: SimulationFrame + 'static> Default for ShortcutDispatcher<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs on the primary frame's pre-finalize point
fn dispatch_activated<F: SimulationFrame>(queue: &RefCell<ActivationQueue<F>>, frame: &mut F) {
    // Taking the queue clears it even if some players have no entity
    let activated = queue.borrow_mut().take();
    let entities = frame.controlled_entities();

    for binding in activated {
        match entities.iter().find(|(player, _)| *player == binding.owner()) {
            Some((_, entity)) => binding.execute(frame, entity),
            None => log::debug!(
                "No entity for player {} on frame {}, dropping shortcut",
                binding.owner(),
                frame.frame()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action::{Device, GamepadElement, KeyId, PlayerId, Stick};
    use crate::engine::input::binding::Binding;
    use crate::engine::input::manager::InputManager;
    use crate::engine::rollback::{Simulation, SimulationIteration, World};
    use glam::Vec2;
    use std::cell::Cell;

    #[derive(Debug, Clone, Default)]
    struct Arena {
        /// (player, entity id)
        controllers: Vec<(PlayerId, u32)>,
        flag: bool,
        flag_sets: u32,
        touched: Vec<u32>,
    }

    impl World for Arena {
        type Entity = u32;

        fn step(&mut self, _frame: u64) {}

        fn controlled_entities(&self) -> Vec<(PlayerId, u32)> {
            self.controllers.clone()
        }
    }

    type Frame = SimulationIteration<Arena>;

    struct Rig {
        input: InputManager,
        hook: PreFinalizeHook<Frame>,
        shortcuts: ShortcutDispatcher<Frame>,
        sim: Simulation<Arena>,
    }

    impl Rig {
        fn new(resimulations: u32) -> Self {
            let mut input = InputManager::new(2);
            input.player_mut(0).unwrap().attach_keyboard();
            input.player_mut(1).unwrap().attach_joystick();
            let arena = Arena {
                controllers: vec![(0, 10), (1, 11)],
                ..Arena::default()
            };
            Self {
                input,
                hook: PreFinalizeHook::new(),
                shortcuts: ShortcutDispatcher::new(),
                sim: Simulation::new(arena, resimulations),
            }
        }

        fn set_flag_binding(&mut self, player: PlayerId, device: Device, code: u16) -> SharedBinding<Frame> {
            let binding = Binding::new(player, device, code, false, |frame: &mut Frame, entity: &u32| {
                let world = frame.world_mut();
                world.flag = true;
                world.flag_sets += 1;
                world.touched.push(*entity);
            });
            self.shortcuts.add(&binding);
            binding
        }

        /// One host tick: poll input, simulate and commit, advance input
        fn tick(&mut self) {
            self.shortcuts.poll(&self.input, &self.hook);
            self.sim.advance(&self.hook);
            self.input.update();
        }
    }

    #[test]
    fn test_keyboard_shortcut_end_to_end() {
        let mut rig = Rig::new(2);
        rig.set_flag_binding(0, Device::Keyboard, KeyId::K.code());

        rig.input.press_key(0, KeyId::K.code());
        // Input lag: the same press edge is seen by two polls before the frame commits
        rig.shortcuts.poll(&rig.input, &rig.hook);
        rig.tick();

        assert!(rig.sim.world().flag);
        assert_eq!(rig.sim.world().flag_sets, 1);
        assert_eq!(rig.sim.world().touched, vec![10]);
        assert_eq!(rig.shortcuts.queued(), 0);

        rig.tick();
        rig.tick();
        assert_eq!(rig.sim.world().flag_sets, 1);
    }

    #[test]
    fn test_speculative_only_frames_keep_queue() {
        let mut rig = Rig::new(0);
        rig.set_flag_binding(0, Device::Keyboard, KeyId::K.code());
        rig.input.press_key(0, KeyId::K.code());
        rig.shortcuts.poll(&rig.input, &rig.hook);

        let mut speculative = SimulationIteration::new(
            crate::engine::rollback::Stream::Speculative,
            0,
            rig.sim.world().clone(),
        );
        rig.hook.pre_finalize(&mut speculative);
        assert!(!speculative.world().flag);
        assert_eq!(rig.shortcuts.queued(), 1);

        rig.sim.advance(&rig.hook);
        assert_eq!(rig.sim.world().flag_sets, 1);
    }

    #[test]
    fn test_missing_entity_is_skipped_and_queue_cleared() {
        let mut rig = Rig::new(1);
        rig.set_flag_binding(0, Device::Keyboard, KeyId::K.code());
        rig.input.press_key(0, KeyId::K.code());
        rig.shortcuts.poll(&rig.input, &rig.hook);

        // Player 0 disconnects between polling and dispatch
        let mut frame = SimulationIteration::new(
            crate::engine::rollback::Stream::Primary,
            0,
            Arena {
                controllers: vec![(1, 11)],
                ..Arena::default()
            },
        );
        rig.hook.pre_finalize(&mut frame);

        assert!(!frame.world().flag);
        assert_eq!(rig.shortcuts.queued(), 0);
        assert!(rig.hook.is_idle());
    }

    #[test]
    fn test_stick_shortcut_targets_its_player() {
        let mut rig = Rig::new(1);
        rig.set_flag_binding(1, Device::Gamepad, GamepadElement::RightStickDown.code());

        rig.input.set_stick(1, 0, Stick::Right, Vec2::new(0.0, -0.3));
        rig.input.press_button(1, 0, GamepadElement::B.code());
        rig.tick();
        assert!(!rig.sim.world().flag);

        rig.input.set_stick(1, 0, Stick::Right, Vec2::new(0.1, -0.6));
        rig.tick();
        assert_eq!(rig.sim.world().touched, vec![11]);
    }

    #[test]
    fn test_removed_binding_stops_firing() {
        let mut rig = Rig::new(0);
        let binding = rig.set_flag_binding(0, Device::Keyboard, KeyId::K.code());
        binding.set_trigger_code(crate::engine::input::action::NO_TRIGGER);
        rig.shortcuts.refresh(&binding);
        assert!(rig.shortcuts.registry().is_empty());

        rig.input.press_key(0, KeyId::K.code());
        rig.tick();
        assert!(!rig.sim.world().flag);
        assert!(rig.hook.is_idle());
    }

    #[test]
    fn test_empty_poll_does_not_subscribe() {
        let mut rig = Rig::new(0);
        rig.set_flag_binding(0, Device::Keyboard, KeyId::K.code());
        rig.shortcuts.poll(&rig.input, &rig.hook);
        assert!(rig.hook.is_idle());
    }

    #[test]
    fn test_each_activated_binding_runs_once_per_frame() {
        let mut rig = Rig::new(3);
        let hits = Rc::new(Cell::new(0));
        for code in [KeyId::J.code(), KeyId::K.code()] {
            let seen = Rc::clone(&hits);
            let binding = Binding::new(0, Device::Keyboard, code, false, move |_: &mut Frame, _: &u32| {
                seen.set(seen.get() + 1)
            });
            rig.shortcuts.add(&binding);
        }

        rig.input.press_key(0, KeyId::J.code());
        rig.input.press_key(0, KeyId::K.code());
        rig.tick();
        assert_eq!(hits.get(), 2);
    }
}
