// Core utilities shared by engine and game code

pub mod cycle;

pub use cycle::CycleRange;
