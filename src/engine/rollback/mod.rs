// Rollback-aware frame hooks
//
// Hosts with rollback netcode simulate the same frame several times before
// committing it. Anything that mutates game state from outside the
// simulation (input shortcuts, debug tools) has to land exactly once, on the
// committed frame. This module provides that point.
//
// - `frame`: stream tags and the `SimulationFrame` trait hosts implement
// - `hook`: the pre-finalize hook, a one-shot callback list fired on primary frames
// - `simulation`: a reference host that re-simulates and commits frames

pub mod frame;
pub mod hook;
pub mod simulation;

pub use frame::{SimulationFrame, Stream};
pub use hook::{DeferredCallback, HookState, PreFinalizeHook, Scheduling};
pub use simulation::{Simulation, SimulationIteration, World};
