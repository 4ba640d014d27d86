use log::warn;
use rand::Rng;

use crate::grid::{Cell, Grid};

// Past this many rejected draws the board is getting crowded.
const CROWDED_DRAWS: u32 = 64;

pub struct Food {
    position: Cell,
}

impl Food {
    pub fn new<'a, R, I>(grid: &Grid, occupied: I, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell> + Clone,
    {
        Food { position: generate_random_position(grid, occupied, rng) }
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn relocate<'a, R, I>(&mut self, grid: &Grid, occupied: I, rng: &mut R)
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = &'a Cell> + Clone,
    {
        self.position = generate_random_position(grid, occupied, rng);
    }

    #[cfg(test)]
    pub fn at(position: Cell) -> Self {
        Food { position }
    }
}

/// Draws random cells until one is not occupied.
///
/// Never returns if every cell of the grid is occupied. The board is far
/// bigger than any snake a player reaches, so this is left unguarded.
pub fn generate_random_position<'a, R, I>(grid: &Grid, occupied: I, rng: &mut R) -> Cell
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Cell> + Clone,
{
    let mut draws = 0u32;
    loop {
        let cell = grid.random_cell(rng);
        draws += 1;
        if !occupied.clone().into_iter().any(|&c| c == cell) {
            if draws > CROWDED_DRAWS {
                warn!("food placement took {} draws", draws);
            }
            return cell;
        }
    }
}
