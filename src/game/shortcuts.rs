// Cycling and quick-slot shortcuts for arena cosmetics

use super::arena::{ArenaWorld, CycleFeature, FighterId};
use crate::core::CycleRange;
use crate::engine::input::{
    Binding, ConfigError, CycleTriggers, Device, PlayerId, SharedBinding, ShortcutConfig,
    ShortcutDispatcher, TriggerCode, NO_TRIGGER,
};
use crate::engine::rollback::SimulationIteration;
use std::cell::Cell;
use std::rc::Rc;

pub type ArenaFrame = SimulationIteration<ArenaWorld>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Forward,
    Backward,
}

/// Forward/backward pair for one player's device
struct CyclePair {
    player: PlayerId,
    device: Device,
    forward: SharedBinding<ArenaFrame>,
    backward: SharedBinding<ArenaFrame>,
    range: Rc<Cell<CycleRange>>,
}

struct SlotBinding {
    binding: SharedBinding<ArenaFrame>,
    index: Rc<Cell<usize>>,
}

/// All shortcuts for one [`CycleFeature`], built from a [`ShortcutConfig`].
///
/// Bindings stay alive for the lifetime of this value; [`refresh`](Self::refresh)
/// re-reads the config and registers or unregisters each one depending on
/// whether its code is still set.
pub struct CycleShortcuts {
    feature: CycleFeature,
    pairs: Vec<CyclePair>,
    slots: Vec<SlotBinding>,
}

impl CycleShortcuts {
    pub fn install(
        feature: CycleFeature,
        config: &ShortcutConfig,
        dispatcher: &mut ShortcutDispatcher<ArenaFrame>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let pairs: Vec<CyclePair> = config
            .cycles()
            .iter()
            .map(|triggers| {
                let range = Rc::new(Cell::new(triggers.range));
                CyclePair {
                    player: triggers.player,
                    device: triggers.device,
                    forward: cycle_binding(feature, Step::Forward, triggers, &range),
                    backward: cycle_binding(feature, Step::Backward, triggers, &range),
                    range,
                }
            })
            .collect();

        let slots: Vec<SlotBinding> = config
            .quick_slots()
            .iter()
            .map(|slot| {
                let index = Rc::new(Cell::new(slot.index));
                SlotBinding {
                    binding: slot_binding(feature, slot.key, &index),
                    index,
                }
            })
            .collect();

        let shortcuts = Self {
            feature,
            pairs,
            slots,
        };
        for binding in shortcuts.bindings() {
            // Unset codes are rejected here and picked up by a later refresh
            dispatcher.add(binding);
        }

        log::info!(
            "Installed {} shortcuts ({} registered)",
            feature.name(),
            dispatcher.registry().len()
        );
        Ok(shortcuts)
    }

    pub fn feature(&self) -> CycleFeature {
        self.feature
    }

    /// Apply an edited config to the existing bindings.
    ///
    /// Triggers missing from `config` are treated as unset.
    pub fn refresh(
        &self,
        config: &ShortcutConfig,
        dispatcher: &mut ShortcutDispatcher<ArenaFrame>,
    ) -> Result<(), ConfigError> {
        config.validate()?;

        for pair in &self.pairs {
            match config.get_cycle(pair.player, pair.device) {
                Some(triggers) => {
                    pair.forward.set_trigger_code(triggers.forward);
                    pair.backward.set_trigger_code(triggers.backward);
                    pair.forward.set_double_tap(triggers.double_tap);
                    pair.backward.set_double_tap(triggers.double_tap);
                    pair.range.set(triggers.range);
                }
                None => {
                    pair.forward.set_trigger_code(NO_TRIGGER);
                    pair.backward.set_trigger_code(NO_TRIGGER);
                }
            }
        }

        for (position, slot) in self.slots.iter().enumerate() {
            match config.quick_slots().get(position) {
                Some(configured) => {
                    slot.binding.set_trigger_code(configured.key);
                    slot.index.set(configured.index);
                }
                None => slot.binding.set_trigger_code(NO_TRIGGER),
            }
        }

        for binding in self.bindings() {
            dispatcher.refresh(binding);
        }
        log::debug!("Refreshed {} shortcuts", self.feature.name());
        Ok(())
    }

    /// Unregister every binding
    pub fn uninstall(&self, dispatcher: &mut ShortcutDispatcher<ArenaFrame>) {
        for binding in self.bindings() {
            dispatcher.remove(binding);
        }
    }

    fn bindings(&self) -> impl Iterator<Item = &SharedBinding<ArenaFrame>> {
        self.pairs
            .iter()
            .flat_map(|pair| [&pair.backward, &pair.forward])
            .chain(self.slots.iter().map(|slot| &slot.binding))
    }
}

fn cycle_binding(
    feature: CycleFeature,
    step: Step,
    triggers: &CycleTriggers,
    range: &Rc<Cell<CycleRange>>,
) -> SharedBinding<ArenaFrame> {
    let code = match step {
        Step::Forward => triggers.forward,
        Step::Backward => triggers.backward,
    };
    let range = Rc::clone(range);

    Binding::new(
        triggers.player,
        triggers.device,
        code,
        triggers.double_tap,
        move |frame: &mut ArenaFrame, entity: &FighterId| {
            let world = frame.world_mut();
            let len = world.choice_count(feature);
            let Some(fighter) = world.fighter_mut(*entity) else {
                return;
            };

            let slot = feature.slot_mut(fighter);
            let target = match step {
                Step::Forward => range.get().next(*slot, len),
                Step::Backward => range.get().previous(*slot, len),
            };
            if let Some(target) = target {
                log::debug!("Fighter {} {} {} -> {}", entity, feature.name(), slot, target);
                *slot = target;
            }
        },
    )
}

/// Quick slots belong to player 1's keyboard
fn slot_binding(
    feature: CycleFeature,
    key: TriggerCode,
    index: &Rc<Cell<usize>>,
) -> SharedBinding<ArenaFrame> {
    let index = Rc::clone(index);

    Binding::new(
        0,
        Device::Keyboard,
        key,
        false,
        move |frame: &mut ArenaFrame, entity: &FighterId| {
            let world = frame.world_mut();
            let len = world.choice_count(feature);
            let target = index.get();
            if target >= len {
                log::debug!("No {} {} (only {}), ignoring", feature.name(), target, len);
                return;
            }
            if let Some(fighter) = world.fighter_mut(*entity) {
                *feature.slot_mut(fighter) = target;
            }
        },
    )
}
