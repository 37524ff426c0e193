//! Direction finding for single cells.

use crate::grid::{CARDINALS, Coord, Direction, Grid, NEUTRAL, OwnerId};

/// Indices into [`CARDINALS`] in the order enemy ties resolve: S, N, W, E.
const ENEMY_TIE_ORDER: [usize; 4] = [2, 0, 3, 1];

/// Where an interior or border cell should head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    /// Whether an enemy cell was found in `direction`.
    pub enemy: bool,
    /// The nearest direction with something worth reaching.
    pub direction: Direction,
}

/// The cardinal step from `from` that lands closest to `to`.
///
/// Returns `Still` when `from == to`. Ties resolve in N, E, S, W order.
#[must_use]
pub fn relative_direction(grid: &Grid, from: Coord, to: Coord) -> Direction {
    if from == to {
        return Direction::Still;
    }
    CARDINALS
        .into_iter()
        .min_by_key(|&direction| grid.distance(grid.step(from, direction), to))
        .unwrap_or(Direction::Still)
}

/// Scan outward in each cardinal direction for the nearest target.
///
/// Walks up to `min(width, height) / 2` steps. Only cells with strength
/// stop a walk: an enemy cell records an enemy hit, an unclaimed cell an
/// empty hit, and owned cells are walked through. Enemy hits win over empty
/// ones; directions with no hit count as the full scan length.
///
/// Equally near enemies resolve in S, N, W, E order. Equally near empty
/// cells resolve in N, E, S, W order.
#[must_use]
pub fn nearest_target_direction(grid: &Grid, owner: OwnerId, coord: Coord) -> Heading {
    let reach = grid.width().min(grid.height()) / 2;
    let mut enemy_at: [Option<u16>; 4] = [None; 4];
    let mut empty_at: [u16; 4] = [reach; 4];

    for (i, direction) in CARDINALS.into_iter().enumerate() {
        let mut current = coord;
        for distance in 1..reach {
            current = grid.step(current, direction);
            let cell = grid.cell(current);
            if cell.strength == 0 {
                continue;
            }
            if cell.is_enemy_of(owner) {
                enemy_at[i] = Some(distance);
                break;
            }
            if cell.owner == NEUTRAL {
                empty_at[i] = distance;
                break;
            }
        }
    }

    let nearest_enemy = ENEMY_TIE_ORDER
        .into_iter()
        .filter_map(|i| enemy_at[i].map(|distance| (i, distance)))
        .min_by_key(|&(_, distance)| distance);
    if let Some((i, _)) = nearest_enemy {
        return Heading {
            enemy: true,
            direction: CARDINALS[i],
        };
    }

    let nearest_empty = (0..4).min_by_key(|&i| empty_at[i]).unwrap_or(0);
    Heading {
        enemy: false,
        direction: CARDINALS[nearest_empty],
    }
}
