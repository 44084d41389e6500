// Arena state: fighters with cosmetic choices, stepped by the rollback host

use crate::engine::game_loop::TICK_RATE;
use crate::engine::input::PlayerId;
use crate::engine::rollback::World;
use glam::Vec2;

pub type FighterId = u32;

/// Cosmetic list a shortcut can cycle through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleFeature {
    Palette,
    Accessory,
}

impl CycleFeature {
    pub fn name(self) -> &'static str {
        match self {
            CycleFeature::Palette => "palette",
            CycleFeature::Accessory => "accessory set",
        }
    }

    pub(crate) fn slot_mut(self, fighter: &mut Fighter) -> &mut usize {
        match self {
            CycleFeature::Palette => &mut fighter.palette,
            CycleFeature::Accessory => &mut fighter.accessory_set,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fighter {
    pub id: FighterId,
    /// Controlling player, `None` for CPU fighters
    pub player: Option<PlayerId>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub palette: usize,
    pub accessory_set: usize,
}

impl Fighter {
    pub fn choice(&self, feature: CycleFeature) -> usize {
        match feature {
            CycleFeature::Palette => self.palette,
            CycleFeature::Accessory => self.accessory_set,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArenaWorld {
    fighters: Vec<Fighter>,
    palette_count: usize,
    accessory_count: usize,
    next_id: FighterId,
    frames_stepped: u64,
}

impl ArenaWorld {
    pub fn new(palette_count: usize, accessory_count: usize) -> Self {
        Self {
            fighters: Vec::new(),
            palette_count,
            accessory_count,
            next_id: 1,
            frames_stepped: 0,
        }
    }

    /// Add a fighter at `position`, owned by `player` if any
    pub fn spawn(&mut self, player: Option<PlayerId>, position: Vec2) -> FighterId {
        let id = self.next_id;
        self.next_id += 1;
        self.fighters.push(Fighter {
            id,
            player,
            position,
            velocity: Vec2::ZERO,
            palette: 0,
            accessory_set: 0,
        });
        log::info!("Spawned fighter {} for player {:?}", id, player);
        id
    }

    pub fn despawn(&mut self, id: FighterId) -> bool {
        let before = self.fighters.len();
        self.fighters.retain(|f| f.id != id);
        self.fighters.len() != before
    }

    pub fn fighter(&self, id: FighterId) -> Option<&Fighter> {
        self.fighters.iter().find(|f| f.id == id)
    }

    pub fn fighter_mut(&mut self, id: FighterId) -> Option<&mut Fighter> {
        self.fighters.iter_mut().find(|f| f.id == id)
    }

    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    /// Number of entries in a feature's list
    pub fn choice_count(&self, feature: CycleFeature) -> usize {
        match feature {
            CycleFeature::Palette => self.palette_count,
            CycleFeature::Accessory => self.accessory_count,
        }
    }

    pub fn frames_stepped(&self) -> u64 {
        self.frames_stepped
    }
}

impl World for ArenaWorld {
    type Entity = FighterId;

    fn step(&mut self, _frame: u64) {
        let dt = 1.0 / TICK_RATE as f32;
        for fighter in &mut self.fighters {
            fighter.position += fighter.velocity * dt;
        }
        self.frames_stepped += 1;
    }

    fn controlled_entities(&self) -> Vec<(PlayerId, FighterId)> {
        self.fighters
            .iter()
            .filter_map(|f| f.player.map(|player| (player, f.id)))
            .collect()
    }
}
