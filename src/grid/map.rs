//! The toroidal grid.

use crate::grid::{CARDINALS, Cell, Coord, Direction, NEUTRAL, OwnerId};

/// Fixed-size toroidal grid of cells.
///
/// Cells are stored in row-major order. The grid exclusively owns its cell
/// array, so `clone` is a deep copy suitable for speculative simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width of the grid in cells.
    width: u16,
    /// Height of the grid in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid of neutral cells with zero strength and production.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        Self::from_fn(width, height, |_| (NEUTRAL, 0, 0))
    }

    /// Create a grid from a function returning `(owner, strength, production)`
    /// for each coordinate.
    ///
    /// Returns `None` if width or height is zero.
    pub fn from_fn<F>(width: u16, height: u16, mut f: F) -> Option<Self>
    where
        F: FnMut(Coord) -> (OwnerId, u8, u8),
    {
        if width == 0 || height == 0 {
            return None;
        }

        let mut cells = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                let coord = Coord::new(x, y);
                let (owner, strength, production) = f(coord);
                cells.push(Cell::new(coord, owner, strength, production));
            }
        }

        Some(Self {
            width,
            height,
            cells,
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of cells on the grid.
    #[must_use]
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Raw cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major index of a coordinate. Coordinates outside the grid wrap.
    #[must_use]
    #[inline]
    pub fn index(&self, coord: Coord) -> usize {
        let x = usize::from(coord.x % self.width);
        let y = usize::from(coord.y % self.height);
        y * usize::from(self.width) + x
    }

    /// Coordinate of a row-major index.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coord_at(&self, index: usize) -> Coord {
        let width = usize::from(self.width);
        Coord::new((index % width) as u16, (index / width) as u16)
    }

    /// The cell at a coordinate.
    #[must_use]
    #[inline]
    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[self.index(coord)]
    }

    /// Replace the record at the cell's coordinate.
    pub fn set(&mut self, cell: Cell) {
        let idx = self.index(cell.coord);
        self.cells[idx] = Cell {
            coord: self.coord_at(idx),
            ..cell
        };
    }

    /// Iterate over all cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Iterate over the cells owned by `owner` in row-major order.
    pub fn owned_by(&self, owner: OwnerId) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(move |cell| cell.owner == owner)
    }

    /// The coordinate reached by moving `steps` times in `direction`.
    #[must_use]
    pub fn target(&self, coord: Coord, direction: Direction, steps: u16) -> Coord {
        let (dx, dy) = direction.offset();
        self.offset(coord, dx * i32::from(steps), dy * i32::from(steps))
    }

    /// The adjacent coordinate in `direction`.
    #[must_use]
    #[inline]
    pub fn step(&self, coord: Coord, direction: Direction) -> Coord {
        self.target(coord, direction, 1)
    }

    /// The four cardinal neighbors in N, E, S, W order.
    #[must_use]
    pub fn cardinal_neighbors(&self, coord: Coord) -> [Coord; 4] {
        CARDINALS.map(|direction| self.step(coord, direction))
    }

    /// All coordinates within wrapped Manhattan `radius` of `coord`,
    /// excluding `coord` itself.
    ///
    /// Radius 1 yields the cardinal neighbors in N, E, S, W order. Larger
    /// radii enumerate offsets row by row, top to bottom, left to right.
    pub fn neighbors(&self, coord: Coord, radius: u16) -> impl Iterator<Item = Coord> + '_ {
        let r = i32::from(radius);
        let offsets: Vec<(i32, i32)> = if radius == 1 {
            CARDINALS.iter().map(|d| d.offset()).collect()
        } else {
            (-r..=r)
                .flat_map(|dy| (-r..=r).map(move |dx| (dx, dy)))
                .filter(|&(dx, dy)| dx.abs() + dy.abs() <= r && (dx, dy) != (0, 0))
                .collect()
        };
        offsets
            .into_iter()
            .map(move |(dx, dy)| self.offset(coord, dx, dy))
    }

    /// Wrapped Manhattan distance between two coordinates.
    #[must_use]
    pub fn distance(&self, a: Coord, b: Coord) -> u32 {
        let dx = u32::from(a.x.abs_diff(b.x));
        let dy = u32::from(a.y.abs_diff(b.y));
        let width = u32::from(self.width);
        let height = u32::from(self.height);
        dx.min(width - dx) + dy.min(height - dy)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn offset(&self, coord: Coord, dx: i32, dy: i32) -> Coord {
        let width = i32::from(self.width);
        let height = i32::from(self.height);
        let x = (i32::from(coord.x) + dx).rem_euclid(width);
        let y = (i32::from(coord.y) + dy).rem_euclid(height);
        Coord::new(x as u16, y as u16)
    }
}
