use crate::log;
use super::direction_queue::DirectionQueue;
use super::grid::Grid;
use super::session_rng::SessionRng;
use super::settings::{GameSettings, MIN_COLS, MIN_ROWS};
use super::snake::{INITIAL_LENGTH, Snake};
use super::types::{Cell, Direction, GameOverReason, Hit, Position};

const INITIAL_DIRECTION: Direction = Direction::Right;

/// One single-snake game. The grid always mirrors the snake body: a cell is
/// `Snake` exactly when its position is in the body.
#[derive(Debug)]
pub struct GameState {
    grid: Grid,
    snake: Snake,
    direction: Direction,
    pending_directions: DirectionQueue,
    score: u32,
    game_over_reason: Option<GameOverReason>,
    tick: u64,
    rng: SessionRng,
}

impl GameState {
    /// Seeds a three-cell snake on row `rows / 2`, columns 1..=3, heading right,
    /// and places the first food.
    pub fn new(rows: usize, cols: usize, rng: SessionRng) -> Self {
        debug_assert!(rows >= MIN_ROWS && cols >= MIN_COLS, "field {}x{} is too small", rows, cols);

        let head = Position::new((rows / 2) as i32, INITIAL_LENGTH as i32);
        let snake = Snake::new(head, INITIAL_DIRECTION, INITIAL_LENGTH);
        let mut grid = Grid::new(rows, cols);
        for &pos in snake.positions() {
            grid.set(pos, Cell::Snake);
        }

        let mut state = Self {
            grid,
            snake,
            direction: INITIAL_DIRECTION,
            pending_directions: DirectionQueue::new(),
            score: 0,
            game_over_reason: None,
            tick: 0,
            rng,
        };
        log!("New {}x{} game, seed {}", rows, cols, state.rng.seed());
        state.spawn_food();
        state
    }

    pub fn from_settings(settings: &GameSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        Self::new(settings.rows, settings.cols, rng)
    }

    #[cfg(test)]
    pub(crate) fn from_layout(
        rows: usize,
        cols: usize,
        body: &[Position],
        direction: Direction,
        food: Option<Position>,
        rng: SessionRng,
    ) -> Self {
        let snake = Snake::from_positions(body);
        let mut grid = Grid::new(rows, cols);
        for &pos in snake.positions() {
            grid.set(pos, Cell::Snake);
        }
        if let Some(food) = food {
            grid.set(food, Cell::Food);
        }
        Self {
            grid,
            snake,
            direction,
            pending_directions: DirectionQueue::new(),
            score: 0,
            game_over_reason: None,
            tick: 0,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over_reason.is_some()
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_directions(&self) -> Vec<Direction> {
        self.pending_directions.to_vec()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn head_position(&self) -> Position {
        self.snake.head()
    }

    pub fn tail_position(&self) -> Position {
        self.snake.tail()
    }

    /// Head first, tail last.
    pub fn snake_positions(&self) -> Vec<Position> {
        self.snake.positions().copied().collect()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn food_position(&self) -> Option<Position> {
        self.grid.positions_of(Cell::Food).into_iter().next()
    }

    /// Queues a turn for a later tick. Repeats, reversals, turns beyond the
    /// second pending one and turns after game over are silently dropped.
    pub fn request_direction_change(&mut self, direction: Direction) {
        if self.is_game_over() {
            return;
        }
        self.pending_directions.push(direction, self.direction);
    }

    /// Moves the snake one cell. Does nothing once the game is over.
    pub fn advance(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.tick += 1;

        if let Some(direction) = self.pending_directions.pop() {
            self.direction = direction;
        }

        let new_head = self.snake.head().translate(self.direction);
        match self.classify(new_head) {
            Hit::Outside => self.end_game(GameOverReason::WallCollision),
            Hit::Snake => self.end_game(GameOverReason::SelfCollision),
            Hit::Empty => {
                self.remove_tail();
                self.add_head(new_head);
            }
            Hit::Food => {
                self.add_head(new_head);
                self.score += 1;
                self.spawn_food();
            }
        }
    }

    /// The tail leaves its cell during this same tick, so stepping onto it is
    /// a legal move even though the grid still marks it `Snake`.
    fn classify(&self, pos: Position) -> Hit {
        match self.grid.get(pos) {
            None => Hit::Outside,
            Some(_) if pos == self.snake.tail() => Hit::Empty,
            Some(cell) => Hit::from(cell),
        }
    }

    fn add_head(&mut self, pos: Position) {
        self.snake.push_head(pos);
        self.grid.set(pos, Cell::Snake);
    }

    fn remove_tail(&mut self) {
        if let Some(tail) = self.snake.pop_tail() {
            self.grid.set(tail, Cell::Empty);
        }
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.game_over_reason = Some(reason);
        log!(
            "Game over at tick {} ({:?}), score {}, length {}",
            self.tick,
            reason,
            self.score,
            self.snake.len()
        );
    }

    fn spawn_food(&mut self) {
        let empty = self.grid.empty_positions();
        if let Some(&pos) = self.rng.choose(&empty) {
            self.grid.set(pos, Cell::Food);
            log!("Food spawned at ({}, {})", pos.row, pos.col);
        }
    }
}
