use std::collections::VecDeque;

use super::types::{Direction, Position};

pub const INITIAL_LENGTH: usize = 3;

/// Ordered snake body, head at the front and tail at the back.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Lays out `length` cells ending at `head`, trailing away from `direction`.
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut segment = head;
        for _ in 0..length {
            body.push_back(segment);
            segment = segment.translate(behind);
        }
        Self { body }
    }

    #[cfg(test)]
    pub(crate) fn from_positions(positions: &[Position]) -> Self {
        Self {
            body: positions.iter().copied().collect(),
        }
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Position {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}
