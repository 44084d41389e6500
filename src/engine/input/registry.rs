// Registry of bindings scanned by the activation detector each frame

use super::binding::SharedBinding;
use crate::engine::rollback::SimulationFrame;
use std::rc::Rc;

/// Set of live bindings, in insertion order.
///
/// Membership is by identity. Unbound bindings (trigger code 0) are never
/// admitted, and adding or removing twice is harmless.
pub struct BindingRegistry<F: SimulationFrame> {
    bindings: Vec<SharedBinding<F>>,
}

impl<F: SimulationFrame> BindingRegistry<F> {
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Add a binding. Returns true if it was inserted.
    pub fn add(&mut self, binding: &SharedBinding<F>) -> bool {
        if binding.is_unbound() {
            log::trace!("Not registering unbound {:?}", binding);
            return false;
        }
        if self.contains(binding) {
            return false;
        }
        self.bindings.push(Rc::clone(binding));
        true
    }

    /// Remove a binding. Returns true if it was present.
    pub fn remove(&mut self, binding: &SharedBinding<F>) -> bool {
        let before = self.bindings.len();
        self.bindings.retain(|existing| !Rc::ptr_eq(existing, binding));
        self.bindings.len() != before
    }

    /// Re-sync after a configuration change: bound bindings are added,
    /// unbound ones removed
    pub fn refresh(&mut self, binding: &SharedBinding<F>) {
        if binding.is_unbound() {
            self.remove(binding);
        } else {
            self.add(binding);
        }
    }

    pub fn contains(&self, binding: &SharedBinding<F>) -> bool {
        self.bindings.iter().any(|existing| Rc::ptr_eq(existing, binding))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedBinding<F>> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

impl<F: SimulationFrame> Default for BindingRegistry<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::action::{Device, PlayerId, NO_TRIGGER};
    use crate::engine::input::binding::Binding;
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

    fn binding(code: u16) -> SharedBinding<Frame> {
        Binding::new(0, Device::Keyboard, code, false, |_: &mut Frame, _: &()| {})
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let mut registry = BindingRegistry::new();
        let shortcut = binding(11);

        assert!(registry.add(&shortcut));
        assert!(!registry.add(&shortcut));
        assert_eq!(registry.len(), 1);

        assert!(registry.remove(&shortcut));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_identity_not_value() {
        let mut registry = BindingRegistry::new();
        registry.add(&binding(11));
        registry.add(&binding(11));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unbound_is_never_added() {
        let mut registry = BindingRegistry::new();
        assert!(!registry.add(&binding(NO_TRIGGER)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry: BindingRegistry<Frame> = BindingRegistry::new();
        assert!(!registry.remove(&binding(11)));
    }

    #[test]
    fn test_refresh_follows_trigger_code() {
        let mut registry = BindingRegistry::new();
        let shortcut = binding(11);
        registry.add(&shortcut);

        shortcut.set_trigger_code(NO_TRIGGER);
        registry.refresh(&shortcut);
        assert!(!registry.contains(&shortcut));

        shortcut.set_trigger_code(12);
        registry.refresh(&shortcut);
        registry.refresh(&shortcut);
        assert!(registry.contains(&shortcut));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = BindingRegistry::new();
        let first = binding(3);
        let second = binding(1);
        registry.add(&first);
        registry.add(&second);

        let codes: Vec<u16> = registry.iter().map(|b| b.trigger_code()).collect();
        assert_eq!(codes, vec![3, 1]);

        registry.clear();
        assert!(registry.is_empty());
    }
}
