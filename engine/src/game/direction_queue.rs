use ringbuffer::{AllocRingBuffer, RingBuffer};

use super::types::Direction;

const DIRECTION_QUEUE_CAPACITY: usize = 2;

/// Turns requested between ticks, consumed one per tick in request order.
pub struct DirectionQueue {
    pending: AllocRingBuffer<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self {
            pending: AllocRingBuffer::new(DIRECTION_QUEUE_CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Direction the snake will face once every queued turn is applied.
    pub fn last_or(&self, current: Direction) -> Direction {
        self.pending.back().copied().unwrap_or(current)
    }

    pub fn can_push(&self, direction: Direction, current: Direction) -> bool {
        if self.pending.len() >= DIRECTION_QUEUE_CAPACITY {
            return false;
        }
        let last = self.last_or(current);
        direction != last && !direction.is_opposite(&last)
    }

    /// Returns whether the turn was queued.
    pub fn push(&mut self, direction: Direction, current: Direction) -> bool {
        if !self.can_push(direction, current) {
            return false;
        }
        let _ = self.pending.enqueue(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.dequeue()
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.pending.iter().copied().collect()
    }
}

impl Default for DirectionQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DirectionQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.pending.iter()).finish()
    }
}
