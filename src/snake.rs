use std::collections::VecDeque;

use crate::grid::Cell;
use Direction::*;

const INITIAL_BODY: [Cell; 3] = [Cell::new(6, 9), Cell::new(5, 9), Cell::new(4, 9)];
const INITIAL_DIRECTION: Direction = Right;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step on the grid, with y growing downwards.
    pub fn delta(self) -> Cell {
        match self {
            Up => Cell::new(0, -1),
            Down => Cell::new(0, 1),
            Left => Cell::new(-1, 0),
            Right => Cell::new(1, 0),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Up | Down)
    }
}

pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    last_moved: Direction,
    growth_pending: bool,
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: INITIAL_BODY.iter().copied().collect(),
            direction: INITIAL_DIRECTION,
            last_moved: INITIAL_DIRECTION,
            growth_pending: false,
        }
    }

    /// Head first. Panics on an empty body.
    #[cfg(test)]
    pub fn from_body(body: &[Cell], direction: Direction) -> Self {
        assert!(!body.is_empty());
        Snake {
            body: body.iter().copied().collect(),
            direction,
            last_moved: direction,
            growth_pending: false,
        }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Moves the head one step along the current direction. The tail is kept
    /// if a segment was pending, dropped otherwise. No bounds handling here.
    pub fn update(&mut self) {
        let new_head = self.head() + self.direction.delta();
        self.body.push_front(new_head);
        self.last_moved = self.direction;

        if self.growth_pending {
            self.growth_pending = false;
        } else {
            self.body.pop_back();
        }
    }

    pub fn reset(&mut self) {
        self.body = INITIAL_BODY.iter().copied().collect();
        self.direction = INITIAL_DIRECTION;
        self.last_moved = INITIAL_DIRECTION;
    }

    #[cfg(test)]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction used by the most recent step.
    pub fn last_moved(&self) -> Direction {
        self.last_moved
    }

    /// Not validated: callers decide which turns are legal.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn grow(&mut self) {
        self.growth_pending = true;
    }

    #[cfg(test)]
    pub fn growth_pending(&self) -> bool {
        self.growth_pending
    }

    pub fn head_char(&self) -> char {
        match self.direction {
            Up => '^',
            Down => 'v',
            Left => '<',
            Right => '>',
        }
    }

    pub(crate) fn set_head(&mut self, cell: Cell) {
        self.body[0] = cell;
    }

    /// True if the head shares a cell with any other segment.
    pub fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }
}
