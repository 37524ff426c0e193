//! The game-server collaborator.
//!
//! The engine never speaks a wire protocol itself. Anything that can hand
//! over the current grid and accept a batch of moves can drive a campaign:
//! the offline arena's [`LocalClient`](crate::arena::LocalClient) in tests
//! and tournaments, or a protocol adapter in a real match.

use crate::grid::{Grid, Move};

/// A source of frames and a sink for moves.
pub trait GameClient {
    /// Transport failure.
    type Error;

    /// Read the grid for the next turn. `Ok(None)` means the game is over.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame could not be read.
    fn read_frame(&mut self) -> Result<Option<Grid>, Self::Error>;

    /// Submit this turn's moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the moves could not be delivered.
    fn submit_moves(&mut self, moves: &[Move]) -> Result<(), Self::Error>;

    /// Announce the bot's name once planning is done.
    ///
    /// # Errors
    ///
    /// Returns an error if the announcement could not be delivered.
    fn announce_identity(&mut self, name: &str) -> Result<(), Self::Error>;
}
