// Engine modules: fixed-step clock, input shortcuts, rollback simulation

pub mod game_loop;
pub mod input;
pub mod rollback;
