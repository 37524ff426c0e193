//! In-memory game client.

use std::convert::Infallible;

use crate::client::GameClient;
use crate::grid::{Grid, Move};
use crate::sim::TurnSimulator;

/// A [`GameClient`] that plays a fixed number of turns on a local grid.
///
/// The first frame is the initial map handed out before planning. After
/// that, each frame reflects every batch of moves submitted so far, applied
/// with production. Nothing else moves on the map.
#[derive(Debug, Clone)]
pub struct LocalClient {
    grid: Grid,
    simulator: TurnSimulator,
    frames: u32,
    served: u32,
    initialized: bool,
    identity: Option<String>,
    submitted: Vec<Vec<Move>>,
}

impl LocalClient {
    /// Serve the initial frame plus `frames` turn frames of `grid`.
    #[must_use]
    pub fn new(grid: Grid, frames: u32) -> Self {
        Self::with_simulator(grid, frames, TurnSimulator::default())
    }

    /// Like [`LocalClient::new`] with an explicit simulator.
    #[must_use]
    pub fn with_simulator(grid: Grid, frames: u32, simulator: TurnSimulator) -> Self {
        Self {
            grid,
            simulator,
            frames,
            served: 0,
            initialized: false,
            identity: None,
            submitted: Vec::new(),
        }
    }

    /// The current map.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The announced bot name, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Every submitted batch, in turn order.
    #[must_use]
    pub fn submitted(&self) -> &[Vec<Move>] {
        &self.submitted
    }
}

impl GameClient for LocalClient {
    type Error = Infallible;

    fn read_frame(&mut self) -> Result<Option<Grid>, Self::Error> {
        if !self.initialized {
            self.initialized = true;
            return Ok(Some(self.grid.clone()));
        }
        if self.served >= self.frames {
            return Ok(None);
        }
        self.served += 1;
        Ok(Some(self.grid.clone()))
    }

    fn submit_moves(&mut self, moves: &[Move]) -> Result<(), Self::Error> {
        self.simulator.apply(&mut self.grid, moves, true);
        self.submitted.push(moves.to_vec());
        Ok(())
    }

    fn announce_identity(&mut self, name: &str) -> Result<(), Self::Error> {
        self.identity = Some(name.to_string());
        Ok(())
    }
}
