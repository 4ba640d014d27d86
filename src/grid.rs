use std::ops::Add;

use rand::Rng;

use crate::{Coords, TermInt};

pub const CELL_COUNT: i32 = 15;
pub const CELL_SIZE: TermInt = 2;
pub const OFFSET: TermInt = 2;

/// A logical position on the board. Coordinates are signed so that a step
/// off the edge can be represented before it gets wrapped back in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, other: Cell) -> Cell {
        Cell::new(self.x + other.x, self.y + other.y)
    }
}

/// The square play area.
///
/// `cell_size` is the number of terminal columns a cell takes up. Rows are
/// not scaled, since a terminal character is roughly twice as tall as it is
/// wide, so one row per cell keeps cells close to square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cell_count: i32,
    cell_size: TermInt,
    offset: TermInt,
}

impl Grid {
    pub fn new(cell_count: i32, cell_size: TermInt, offset: TermInt) -> Self {
        assert!(cell_count > 0, "grid needs at least one cell");
        Grid { cell_count, cell_size, offset }
    }

    pub fn cell_count(&self) -> i32 {
        self.cell_count
    }

    pub fn cell_size(&self) -> TermInt {
        self.cell_size
    }

    pub fn offset(&self) -> TermInt {
        self.offset
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.cell_count).contains(&cell.x) && (0..self.cell_count).contains(&cell.y)
    }

    /// Brings a cell that stepped past an edge back in from the opposite side.
    /// Each axis is handled on its own.
    pub fn wrap(&self, cell: Cell) -> Cell {
        Cell::new(self.wrap_axis(cell.x), self.wrap_axis(cell.y))
    }

    fn wrap_axis(&self, v: i32) -> i32 {
        if v >= self.cell_count {
            0
        } else if v < 0 {
            self.cell_count - 1
        } else {
            v
        }
    }

    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.cell_count), rng.gen_range(0..self.cell_count))
    }

    /// Top left terminal position of a cell: `offset + cell * cell_size`
    /// horizontally, `offset + cell` vertically.
    pub fn to_screen(&self, cell: Cell) -> Coords {
        let x = self.offset + cell.x as TermInt * self.cell_size;
        let y = self.offset + cell.y as TermInt;
        (x, y)
    }

    /// Terminal columns and rows the board covers, border included.
    pub fn screen_size(&self) -> Coords {
        let width = self.cell_count as TermInt * self.cell_size;
        let height = self.cell_count as TermInt;
        (2 * self.offset + width, 2 * self.offset + height)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(CELL_COUNT, CELL_SIZE, OFFSET)
    }
}
