use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn translate(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self::new(self.row + d_row, self.col + d_col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit `(row, col)` step.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Snake,
    Food,
}

/// What a candidate head cell holds. `Outside` is never stored in a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    Empty,
    Snake,
    Food,
    Outside,
}

impl From<Cell> for Hit {
    fn from(cell: Cell) -> Self {
        match cell {
            Cell::Empty => Hit::Empty,
            Cell::Snake => Hit::Snake,
            Cell::Food => Hit::Food,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    WallCollision,
    SelfCollision,
}
