#![no_main]

//! Pathfinding fuzzer: restricted searches over arbitrary strength maps.

use arbitrary::Arbitrary;
use frontier::grid::{Coord, Grid, NEUTRAL};
use frontier::path::shortest_path;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PathInput {
    width: u8,
    height: u8,
    strengths: Vec<u8>,
    target: (u8, u8),
    start: Option<(u8, u8)>,
    available: Option<Vec<(u8, u8)>>,
}

fuzz_target!(|input: PathInput| {
    let width = u16::from(input.width % 40) + 1;
    let height = u16::from(input.height % 40) + 1;
    let strengths = &input.strengths;
    let Some(grid) = Grid::from_fn(width, height, |c| {
        let i = usize::from(c.y) * usize::from(width) + usize::from(c.x);
        (NEUTRAL, strengths.get(i).copied().unwrap_or(0), 1)
    }) else {
        return;
    };

    let wrap = |(x, y): (u8, u8)| Coord::new(u16::from(x) % width, u16::from(y) % height);
    let target = wrap(input.target);
    let start = input.start.map(wrap);
    let available: Option<Vec<Coord>> = input
        .available
        .map(|cells| cells.into_iter().map(wrap).collect());

    let result = shortest_path(&grid, target, start, available.as_deref());
    assert_eq!(result.cost(target), Some(0));

    if let Some(start) = start {
        if let Some(route) = result.reconstruct(start) {
            if start != target {
                assert_eq!(route.last().copied(), Some(target));
            }
            let mut previous = start;
            for &cell in &route {
                assert_eq!(grid.distance(previous, cell), 1, "corridor not contiguous");
                if let Some(allowed) = &available {
                    assert!(cell == target || allowed.contains(&cell));
                }
                previous = cell;
            }
        }
    }
});
