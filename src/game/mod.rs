// Demo game layer: an arena of fighters with cosmetic cycling shortcuts

pub mod arena;
pub mod shortcuts;

pub use arena::{ArenaWorld, CycleFeature, Fighter, FighterId};
pub use shortcuts::{ArenaFrame, CycleShortcuts};
