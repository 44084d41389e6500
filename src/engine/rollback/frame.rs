// Simulation frame identity as seen by the pre-finalize hook

use crate::engine::input::PlayerId;

/// Which simulation stream an iteration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    /// The authoritative frame sequence whose results are committed
    Primary,
    /// A prediction or re-simulation whose side effects are thrown away
    Speculative,
}

/// One iteration of the host simulation
pub trait SimulationFrame {
    /// Handle to an entity controlled by a player
    type Entity;

    fn stream(&self) -> Stream;

    /// Number of the frame being simulated
    fn frame(&self) -> u64;

    /// Entities owned by local players this frame, paired with the owning player
    fn controlled_entities(&self) -> Vec<(PlayerId, Self::Entity)>;

    fn is_primary(&self) -> bool {
        self.stream() == Stream::Primary
    }
}
