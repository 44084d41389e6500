// Input shortcuts with rollback-safe, frame-deferred dispatch

pub mod core;
pub mod engine;
pub mod game;
