//! Deterministic map generation for local games.

// Map generation uses intentional casts for RNG and noise operations
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use crate::arena::ArenaError;
use crate::grid::{Coord, Grid, MAX_STRENGTH, NEUTRAL, OwnerId};

/// Smallest tile edge handed to a single player.
pub const MIN_TILE: u16 = 3;

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
struct Rng {
    state: u64,
}

impl Rng {
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Random u16 in [0, max).
    fn next_u16(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u16
    }

    /// Random f64 in [0, 1].
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }
}

/// How players are laid out: `cols` tiles across, `rows` tiles down.
#[must_use]
pub const fn tile_layout(players: u8) -> Option<(u16, u16)> {
    match players {
        2 => Some((2, 1)),
        3 => Some((3, 1)),
        4 => Some((2, 2)),
        5 => Some((5, 1)),
        6 => Some((3, 2)),
        _ => None,
    }
}

/// Generate a map for `players` players.
///
/// The map is cut into one tile per player; every tile carries the same
/// noise pattern, so the map looks identical from every start cell. Players
/// start with a single cell of strength 255 at the same offset in their tile.
///
/// # Errors
///
/// Returns an error for an unsupported player count, or if the map cannot
/// be split into equal tiles of at least [`MIN_TILE`] cells per side.
pub fn generate_grid(seed: u64, width: u16, height: u16, players: u8) -> Result<Grid, ArenaError> {
    let (cols, rows) = tile_layout(players).ok_or(ArenaError::PlayerCount(players))?;
    let tile_w = width / cols;
    let tile_h = height / rows;
    if tile_w < MIN_TILE || tile_h < MIN_TILE {
        return Err(ArenaError::MapTooSmall {
            width,
            height,
            players,
        });
    }
    if width % cols != 0 || height % rows != 0 {
        return Err(ArenaError::UnevenMap {
            width,
            height,
            cols,
            rows,
        });
    }

    let mut rng = Rng::new(seed);
    let richness = smooth(&noise(&mut rng, tile_w, tile_h), tile_w, tile_h);
    let density = smooth(&noise(&mut rng, tile_w, tile_h), tile_w, tile_h);
    let start = Coord::new(rng.next_u16(tile_w), rng.next_u16(tile_h));

    let mut grid = Grid::from_fn(width, height, |coord| {
        let i = usize::from(coord.y % tile_h) * usize::from(tile_w) + usize::from(coord.x % tile_w);
        let production = 1.0 + richness[i] * 9.0;
        let strength = 10.0 + density[i] * 200.0;
        (NEUTRAL, strength as u8, production as u8)
    })
    .ok_or(ArenaError::MapTooSmall {
        width,
        height,
        players,
    })?;

    for player in 0..u16::from(players) {
        let coord = Coord::new(
            (player % cols) * tile_w + start.x,
            (player / cols) * tile_h + start.y,
        );
        let cell = grid.cell(coord);
        grid.set(cell.with_state((player + 1) as OwnerId, MAX_STRENGTH));
    }

    Ok(grid)
}

fn noise(rng: &mut Rng, width: u16, height: u16) -> Vec<f64> {
    (0..usize::from(width) * usize::from(height))
        .map(|_| rng.next_f64())
        .collect()
}

/// Two passes of wrapped 3x3 box blur, rescaled to [0, 1].
fn smooth(values: &[f64], width: u16, height: u16) -> Vec<f64> {
    let (w, h) = (i32::from(width), i32::from(height));
    let mut current = values.to_vec();
    for _ in 0..2 {
        current = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .map(|(x, y)| {
                let mut sum = 0.0;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        let nx = (x + dx).rem_euclid(w);
                        let ny = (y + dy).rem_euclid(h);
                        sum += current[(ny * w + nx) as usize];
                    }
                }
                sum / 9.0
            })
            .collect();
    }

    let lo = current.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = current.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    if span <= f64::EPSILON {
        return vec![0.5; current.len()];
    }
    current.iter().map(|v| (v - lo) / span).collect()
}
