use log::{debug, info};
use rand::Rng;

use crate::food::Food;
use crate::grid::{Cell, Grid};
use crate::input::Intent;
use crate::snake::{Direction, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
}

/// One-shot signals for whoever plays sounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Eat,
    Crash,
}

pub struct Game<R: Rng> {
    grid: Grid,
    snake: Snake,
    food: Food,
    running: bool,
    score: u32,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(grid: Grid, mut rng: R) -> Self {
        let snake = Snake::new();
        let food = Food::new(&grid, snake.body(), &mut rng);
        Game { grid, snake, food, running: true, score: 0, rng }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food.position()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        if self.running {
            GameState::Running
        } else {
            GameState::GameOver
        }
    }

    /// Applies a player intent, returning whether it was accepted.
    /// `Quit` belongs to the frame loop and is never accepted here.
    pub fn handle(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Steer(dir) => self.steer(dir),
            Intent::Restart => self.restart(),
            Intent::Quit => false,
        }
    }

    /// Only turns onto the other axis are taken. The check is against the
    /// direction of the last step, so two quick presses can't reverse.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_vertical() == self.snake.last_moved().is_vertical() {
            return false;
        }
        self.snake.set_direction(direction);
        true
    }

    /// Leaves GameOver. Snake and food were already put back when the round
    /// ended, so only the flag and the score change.
    pub fn restart(&mut self) -> bool {
        if self.running {
            return false;
        }
        info!("restarting, previous score {}", self.score);
        self.running = true;
        self.score = 0;
        true
    }

    /// One simulation step. Does nothing while the round is over.
    pub fn update(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }

        self.snake.update();
        if self.check_collision_with_food() {
            events.push(GameEvent::Eat);
        }
        self.wrap_edges();
        if self.check_collision_with_body() {
            events.push(GameEvent::Crash);
        }

        events
    }

    fn wrap_edges(&mut self) {
        let head = self.snake.head();
        if !self.grid.contains(head) {
            self.snake.set_head(self.grid.wrap(head));
        }
    }

    fn check_collision_with_food(&mut self) -> bool {
        if self.snake.head() != self.food.position() {
            return false;
        }

        self.food.relocate(&self.grid, self.snake.body(), &mut self.rng);
        self.snake.grow();
        self.score += 1;
        debug!("ate, score {}, food moved to {:?}", self.score, self.food.position());
        true
    }

    fn check_collision_with_body(&mut self) -> bool {
        if !self.snake.bites_itself() {
            return false;
        }
        self.game_over();
        true
    }

    fn game_over(&mut self) {
        info!("You Died!");
        info!("Your Score: {}", self.score);
        self.snake.reset();
        self.food.relocate(&self.grid, self.snake.body(), &mut self.rng);
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn game() -> Game<StdRng> {
        Game::new(Grid::default(), StdRng::seed_from_u64(42))
    }

    fn with(snake: Snake, food: Cell) -> Game<StdRng> {
        let mut game = game();
        game.snake = snake;
        game.food = Food::at(food);
        game
    }

    fn food_clear_of_snake(game: &Game<StdRng>) -> bool {
        !game.snake.body().contains(&game.food())
    }

    #[test]
    fn eating_scores_and_grows_on_the_next_step() {
        let mut game = with(Snake::new(), Cell::new(7, 9));
        assert_eq!(game.snake.head(), Cell::new(6, 9));

        let events = game.update();
        assert_eq!(events, vec![GameEvent::Eat]);
        assert_eq!(game.snake.head(), Cell::new(7, 9));
        assert_eq!(game.score(), 1);
        assert!(game.snake.growth_pending());
        assert!(food_clear_of_snake(&game));

        let before = game.snake.len();
        game.food = Food::at(Cell::new(0, 0));
        game.update();
        assert_eq!(game.snake.len(), before + 1);
    }

    #[test]
    fn length_changes_only_by_pending_growth() {
        let mut game = game();
        for _ in 0..200 {
            if game.state() == GameState::GameOver {
                game.restart();
            }
            let before = game.snake.len();
            let pending = game.snake.growth_pending();
            let events = game.update();
            if events.contains(&GameEvent::Crash) {
                continue;
            }
            let expected = if pending { before + 1 } else { before };
            assert_eq!(game.snake.len(), expected);
            if events.contains(&GameEvent::Eat) {
                assert!(food_clear_of_snake(&game));
            }
        }
    }

    #[test]
    fn head_wraps_around_every_edge() {
        let cases = [
            (Cell::new(14, 3), Right, Cell::new(0, 3)),
            (Cell::new(0, 3), Left, Cell::new(14, 3)),
            (Cell::new(3, 0), Up, Cell::new(3, 14)),
            (Cell::new(3, 14), Down, Cell::new(3, 0)),
        ];
        for (start, dir, expected) in cases {
            let mut game = with(Snake::from_body(&[start], dir), Cell::new(8, 8));
            game.update();
            assert_eq!(game.snake.head(), expected);
            assert!(game.grid.contains(game.snake.head()));
        }
    }

    #[test]
    fn food_is_checked_before_the_head_wraps() {
        let body = [Cell::new(14, 3), Cell::new(13, 3), Cell::new(12, 3)];
        let mut game = with(Snake::from_body(&body, Right), Cell::new(0, 3));

        assert!(game.update().is_empty());
        assert_eq!(game.snake.head(), Cell::new(0, 3));
        assert_eq!(game.score(), 0);
        assert!(!game.snake.growth_pending());
        assert_eq!(game.food(), Cell::new(0, 3));
    }

    #[test]
    fn head_on_body_ends_the_round() {
        let mut game = with(
            Snake::from_body(
                &[Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5), Cell::new(4, 5)],
                Right,
            ),
            Cell::new(10, 10),
        );
        assert!(game.check_collision_with_body());
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.snake.body(), Snake::new().body());
        assert!(food_clear_of_snake(&game));
    }

    #[test]
    fn stepping_onto_the_body_emits_crash() {
        // Moving left from (5,5) lands on (4,5), which stays in the body.
        let body = [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5), Cell::new(4, 5)];
        let mut game = with(Snake::from_body(&body, Left), Cell::new(10, 10));

        assert_eq!(game.update(), vec![GameEvent::Crash]);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.snake.body(), Snake::new().body());
        assert_eq!(game.snake.direction(), Right);
        assert!(food_clear_of_snake(&game));
    }

    #[test]
    fn crash_on_an_eating_step_keeps_the_pending_segment() {
        // Head at (5,5) going up eats at (5,4) and bites the body there too.
        let body = [
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
            Cell::new(4, 4),
        ];
        let mut game = with(Snake::from_body(&body, Up), Cell::new(5, 4));

        assert_eq!(game.update(), vec![GameEvent::Eat, GameEvent::Crash]);
        assert_eq!(game.score(), 1);
        assert!(game.snake.growth_pending());

        game.restart();
        game.update();
        assert_eq!(game.snake.len(), 4);
    }

    #[test]
    fn crash_resets_snake_and_keeps_score() {
        // Head at (5,5) going up into (5,4), which is part of the body.
        let body = [
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
            Cell::new(4, 4),
        ];
        let mut game = with(Snake::from_body(&body, Up), Cell::new(10, 10));
        game.score = 7;

        let events = game.update();
        assert_eq!(events, vec![GameEvent::Crash]);
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.score(), 7);
        assert_eq!(game.snake.body(), Snake::new().body());
        assert_eq!(game.snake.direction(), Right);
        assert!(food_clear_of_snake(&game));
    }

    #[test]
    fn game_over_ignores_ticks() {
        let mut game = game();
        game.running = false;
        let body = game.snake.body().clone();
        let food = game.food();

        assert!(game.update().is_empty());
        assert_eq!(*game.snake.body(), body);
        assert_eq!(game.food(), food);
    }

    #[test]
    fn restart_only_from_game_over() {
        let mut game = game();
        game.score = 3;
        assert!(!game.handle(Intent::Restart));
        assert_eq!(game.score(), 3);

        game.game_over();
        game.score = 7;
        let body = game.snake.body().clone();
        let food = game.food();

        assert!(game.handle(Intent::Restart));
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(*game.snake.body(), body);
        assert_eq!(game.food(), food);
    }

    #[test]
    fn reversing_is_ignored() {
        let mut game = game();
        assert_eq!(game.snake.direction(), Right);
        assert!(!game.handle(Intent::Steer(Left)));
        assert_eq!(game.snake.direction(), Right);
        assert!(!game.steer(Right));
        assert!(game.steer(Up));
        assert_eq!(game.snake.direction(), Up);
    }

    #[test]
    fn two_turns_in_one_tick_cannot_reverse() {
        let mut game = game();
        assert!(game.steer(Up));
        assert!(!game.steer(Left));
        assert_eq!(game.snake.direction(), Up);

        game.update();
        assert!(!game.steer(Down));
        assert!(game.steer(Left));
    }

    #[test]
    fn quit_is_not_a_game_intent() {
        let mut game = game();
        assert!(!game.handle(Intent::Quit));
        assert_eq!(game.state(), GameState::Running);
    }
}
