// Shortcut bindings: one trigger on one player's device, mapped to an action

use super::action::{Device, PlayerId, Trigger, TriggerCode, NO_TRIGGER};
use crate::engine::rollback::SimulationFrame;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// What a binding does once dispatched. Receives the primary frame and the
/// entity controlled by the binding's player.
pub type BindingAction<F> = Box<dyn Fn(&mut F, &<F as SimulationFrame>::Entity)>;

/// A binding shared between the feature that owns it and the registry.
/// Registry membership is by identity, not by value.
pub type SharedBinding<F> = Rc<Binding<F>>;

/// One shortcut trigger.
///
/// The owner, device and action are fixed at creation. The trigger code and
/// double-tap flag follow configuration changes; after changing them, call
/// [`BindingRegistry::refresh`](super::registry::BindingRegistry::refresh)
/// so a binding set to [`NO_TRIGGER`] leaves the registry.
pub struct Binding<F: SimulationFrame> {
    owner: PlayerId,
    device: Device,
    trigger_code: Cell<TriggerCode>,
    double_tap: Cell<bool>,
    action: BindingAction<F>,
}

impl<F: SimulationFrame> Binding<F> {
    pub fn new(
        owner: PlayerId,
        device: Device,
        trigger_code: TriggerCode,
        double_tap: bool,
        action: impl Fn(&mut F, &F::Entity) + 'static,
    ) -> SharedBinding<F> {
        Rc::new(Self {
            owner,
            device,
            trigger_code: Cell::new(trigger_code),
            double_tap: Cell::new(double_tap),
            action: Box::new(action),
        })
    }

    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn trigger_code(&self) -> TriggerCode {
        self.trigger_code.get()
    }

    pub fn set_trigger_code(&self, code: TriggerCode) {
        self.trigger_code.set(code);
    }

    pub fn requires_double_tap(&self) -> bool {
        self.double_tap.get()
    }

    pub fn set_double_tap(&self, double_tap: bool) {
        self.double_tap.set(double_tap);
    }

    pub fn is_unbound(&self) -> bool {
        self.trigger_code.get() == NO_TRIGGER
    }

    /// How this binding is evaluated, or `None` if it can never activate
    pub fn trigger(&self) -> Option<Trigger> {
        Trigger::resolve(self.device, self.trigger_code(), self.requires_double_tap())
    }

    /// Run the bound action
    pub fn execute(&self, frame: &mut F, entity: &F::Entity) {
        (self.action)(frame, entity);
    }
}

impl<F: SimulationFrame> fmt::Debug for Binding<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("owner", &self.owner)
            .field("device", &self.device)
            .field("trigger_code", &self.trigger_code.get())
            .field("double_tap", &self.double_tap.get())
            .finish_non_exhaustive()
    }
}
