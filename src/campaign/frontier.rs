//! The frontier: cells the player reaches before any opponent.

use std::cmp::Ordering;

use crate::grid::{Coord, Grid, OwnerId};
use crate::heuristic::local_potential;

/// Cells whose nearest owned cell is strictly closer than every enemy cell.
///
/// Owned cells are always included; enemy cells never are. With no enemy on
/// the grid every cell qualifies. The result is ranked by
/// [`local_potential`], best first, keeping row-major order among equals.
#[must_use]
pub fn frontier_cells(grid: &Grid, owner: OwnerId) -> Vec<Coord> {
    let owned: Vec<Coord> = grid.owned_by(owner).map(|cell| cell.coord).collect();
    if owned.is_empty() {
        return Vec::new();
    }
    let enemies: Vec<Coord> = grid
        .iter()
        .filter(|cell| cell.is_enemy_of(owner))
        .map(|cell| cell.coord)
        .collect();

    let mut ranked: Vec<(Coord, f64)> = grid
        .iter()
        .map(|cell| cell.coord)
        .filter(|&coord| {
            let mine = nearest_distance(grid, coord, &owned);
            enemies.iter().all(|&enemy| mine < grid.distance(coord, enemy))
        })
        .map(|coord| (coord, local_potential(grid, coord)))
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().map(|(coord, _)| coord).collect()
}

/// The enemy cell nearest to `from`, earliest in row-major order on ties.
#[must_use]
pub fn nearest_enemy(grid: &Grid, owner: OwnerId, from: Coord) -> Option<Coord> {
    grid.iter()
        .filter(|cell| cell.is_enemy_of(owner))
        .min_by_key(|cell| grid.distance(from, cell.coord))
        .map(|cell| cell.coord)
}

fn nearest_distance(grid: &Grid, coord: Coord, from: &[Coord]) -> u32 {
    from.iter()
        .map(|&other| grid.distance(coord, other))
        .min()
        .unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn test_frontier_splits_between_players() {
        let mut grid = Grid::from_fn(10, 1, |_| (0, 10, 1)).unwrap();
        grid.set(Cell::new(Coord::new(1, 0), 1, 50, 1));
        grid.set(Cell::new(Coord::new(6, 0), 2, 50, 1));

        let mut frontier = frontier_cells(&grid, 1);
        frontier.sort();
        // x = 9 wraps to within 2 of x = 1 but is 3 from x = 6.
        let expected: Vec<Coord> = [0, 1, 2, 3, 9].into_iter().map(|x| Coord::new(x, 0)).collect();
        assert_eq!(frontier, expected);
    }

    #[test]
    fn test_frontier_without_enemies_is_everything() {
        let mut grid = Grid::from_fn(4, 4, |_| (0, 10, 1)).unwrap();
        grid.set(Cell::new(Coord::new(0, 0), 1, 50, 1));
        assert_eq!(frontier_cells(&grid, 1).len(), 16);
    }

    #[test]
    fn test_frontier_ranked_by_potential() {
        let mut grid = Grid::from_fn(12, 12, |_| (0, 100, 1)).unwrap();
        grid.set(Cell::new(Coord::new(2, 2), 1, 50, 1));
        grid.set(Cell::new(Coord::new(9, 9), 0, 1, 20));
        let frontier = frontier_cells(&grid, 1);
        assert!(grid.distance(frontier[0], Coord::new(9, 9)) <= 3);
        assert!(grid.distance(frontier[frontier.len() - 1], Coord::new(9, 9)) > 3);
    }

    #[test]
    fn test_no_owned_cells_gives_empty_frontier() {
        let grid = Grid::new(4, 4).unwrap();
        assert!(frontier_cells(&grid, 1).is_empty());
    }

    #[test]
    fn test_nearest_enemy() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(Cell::new(Coord::new(8, 0), 2, 5, 1));
        grid.set(Cell::new(Coord::new(3, 0), 3, 5, 1));
        grid.set(Cell::new(Coord::new(1, 0), 1, 5, 1));
        assert_eq!(nearest_enemy(&grid, 1, Coord::new(1, 0)), Some(Coord::new(3, 0)));
        assert_eq!(nearest_enemy(&grid, 1, Coord::new(9, 0)), Some(Coord::new(8, 0)));
        assert_eq!(nearest_enemy(&Grid::new(3, 3).unwrap(), 1, Coord::new(0, 0)), None);
    }
}
