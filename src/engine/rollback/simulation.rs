// Reference rollback host: speculative re-simulation plus one committed frame per tick

use super::frame::{SimulationFrame, Stream};
use super::hook::PreFinalizeHook;
use crate::engine::input::PlayerId;

/// Game state that can be stepped and cloned for re-simulation
pub trait World: Clone {
    type Entity: Clone;

    /// Advance the state by one frame
    fn step(&mut self, frame: u64);

    /// Entities owned by local players, paired with the owning player
    fn controlled_entities(&self) -> Vec<(PlayerId, Self::Entity)>;
}

/// One pass over a frame on either stream
#[derive(Debug, Clone)]
pub struct SimulationIteration<W> {
    stream: Stream,
    frame: u64,
    world: W,
}

impl<W: World> SimulationIteration<W> {
    pub fn new(stream: Stream, frame: u64, world: W) -> Self {
        Self {
            stream,
            frame,
            world,
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }
}

impl<W: World> SimulationFrame for SimulationIteration<W> {
    type Entity = W::Entity;

    fn stream(&self) -> Stream {
        self.stream
    }

    fn frame(&self) -> u64 {
        self.frame
    }

    fn controlled_entities(&self) -> Vec<(PlayerId, W::Entity)> {
        self.world.controlled_entities()
    }
}

/// Drives a [`World`] the way a rollback session does.
///
/// Each tick first runs `resimulations` speculative iterations on copies of
/// the committed state, then one primary iteration that is committed. Every
/// iteration reaches the pre-finalize hook after stepping and before it is
/// finalized; only the primary one has lasting effects.
pub struct Simulation<W: World> {
    committed: W,
    frame: u64,
    resimulations: u32,
}

impl<W: World> Simulation<W> {
    pub fn new(world: W, resimulations: u32) -> Self {
        Self {
            committed: world,
            frame: 0,
            resimulations,
        }
    }

    /// Number of the next frame to be simulated
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Last committed state
    pub fn world(&self) -> &W {
        &self.committed
    }

    pub fn resimulations(&self) -> u32 {
        self.resimulations
    }

    pub fn set_resimulations(&mut self, resimulations: u32) {
        self.resimulations = resimulations;
    }

    /// Simulate and commit one frame
    pub fn advance(&mut self, hook: &PreFinalizeHook<SimulationIteration<W>>) {
        for _ in 0..self.resimulations {
            let mut speculative =
                SimulationIteration::new(Stream::Speculative, self.frame, self.committed.clone());
            speculative.world.step(self.frame);
            hook.pre_finalize(&mut speculative);
        }

        let mut primary =
            SimulationIteration::new(Stream::Primary, self.frame, self.committed.clone());
        primary.world.step(self.frame);
        hook.pre_finalize(&mut primary);
        self.finalize(primary);
    }

    fn finalize(&mut self, iteration: SimulationIteration<W>) {
        self.committed = iteration.into_world();
        self.frame += 1;
    }
}
