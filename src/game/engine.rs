use tracing::{debug, info, trace};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::FoodPlacer,
    state::{CollisionType, GameState, Position, Snake, Status},
};

/// Information about a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the accumulator crossed the threshold and the snake moved
    pub moved: bool,
    /// Whether the snake ate food this step
    pub ate_food: bool,
}

/// Result of a game step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    pub status: Status,
    pub info: StepInfo,
}

impl StepResult {
    fn idle(status: Status) -> Self {
        Self {
            status,
            info: StepInfo {
                moved: false,
                ate_food: false,
            },
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::GameOver { .. })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    food: FoodPlacer,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let food = FoodPlacer::new(config.food_policy, config.seed);
        Self { config, food }
    }

    /// Fresh game: centred snake heading up, food placed
    pub fn reset(&mut self) -> GameState {
        let grid = self.config.grid();
        let snake = Snake::initialize(&grid, self.config.initial_snake_length);
        let food = self.food.place(&grid, &snake);

        GameState::new(grid, snake, food, Direction::Up, self.config.base_velocity)
    }

    /// Apply a decoded input. Reversals are dropped; turns overwrite each
    /// other until the next movement.
    pub fn apply(&self, state: &mut GameState, action: Action) {
        match action {
            Action::Steer(direction) => {
                if !state.direction.is_opposite(direction) {
                    state.direction = direction;
                }
            }
            Action::Accelerate => {
                if !state.accelerating {
                    debug!(velocity = state.velocity, "acceleration held");
                }
                state.accelerating = true;
            }
            Action::ReleaseAccelerate => {
                state.accelerating = false;
                state.velocity = self.config.base_velocity;
                debug!(velocity = state.velocity, "acceleration released");
            }
        }
    }

    /// Advance the simulation by `dt` seconds of wall time
    pub fn step(&mut self, state: &mut GameState, dt: f64) -> StepResult {
        if !state.is_alive() {
            return StepResult::idle(state.status);
        }

        if state.accelerating {
            state.velocity += self.config.acceleration_rate * dt;
        }
        state.accumulated_time += dt * state.velocity;

        if state.accumulated_time < self.config.step_threshold {
            return StepResult::idle(state.status);
        }
        state.accumulated_time = 0.0;

        let new_head = state.snake.peek_next_head(state.direction);

        if let Some(reason) = self.check_collision(state, new_head) {
            state.status = Status::GameOver { reason };
            info!(
                %reason,
                length = state.snake.len(),
                steps = state.steps,
                "game over"
            );
            return StepResult::idle(state.status);
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.food = self.food.place(&state.grid, &state.snake);
        }

        trace!(
            x = new_head.x,
            y = new_head.y,
            ate_food,
            velocity = state.velocity,
            "snake moved"
        );

        StepResult {
            status: state.status,
            info: StepInfo {
                moved: true,
                ate_food,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if state.grid.is_wall(pos) {
            return Some(CollisionType::Boundary);
        }

        if state.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::grid::Grid;

    /// dt that moves the snake exactly once at base velocity
    const ONE_MOVE: f64 = 0.5;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::default().with_seed(11))
    }

    fn state_with(segments: Vec<Position>, direction: Direction, food: Position) -> GameState {
        GameState::new(
            Grid::new(40, 30),
            Snake::from_segments(segments).unwrap(),
            food,
            direction,
            2.0,
        )
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(state.is_alive());
        assert_eq!(state.steps, 0);
        assert_eq!(state.direction, Direction::Up);
        assert_eq!(state.velocity, 2.0);
        assert_eq!(state.accumulated_time, 0.0);
        assert_eq!(
            state.snake.segments(),
            &[
                Position::new(20, 15),
                Position::new(20, 16),
                Position::new(20, 17)
            ]
        );
        assert!(state.grid.is_playable(state.food));
    }

    #[test]
    fn test_first_move_on_fifth_frame() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(1, 1);

        for frame in 1..=4 {
            let result = engine.step(&mut state, 0.1);
            assert!(!result.info.moved, "moved early on frame {frame}");
            assert_eq!(state.snake.head(), Position::new(20, 15));
        }

        let result = engine.step(&mut state, 0.1);
        assert!(result.info.moved);
        assert_eq!(result.status, Status::Running);
        assert_eq!(state.snake.head(), Position::new(20, 14));
        assert_eq!(state.accumulated_time, 0.0);
    }

    #[test]
    fn test_excess_time_is_discarded() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(1, 1);

        // 3.0 scaled units still only move once
        let result = engine.step(&mut state, 1.5);
        assert!(result.info.moved);
        assert_eq!(state.steps, 1);
        assert_eq!(state.accumulated_time, 0.0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = engine.reset();

        state.food = state.snake.peek_next_head(state.direction);
        let initial_length = state.snake.len();

        let result = engine.step(&mut state, ONE_MOVE);

        assert!(result.info.ate_food);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert!(state.grid.is_playable(state.food));
        assert!((1..=38).contains(&state.food.x));
        assert!((1..=28).contains(&state.food.y));
    }

    #[test]
    fn test_moving_without_food_keeps_length_and_food() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(2, 2);

        engine.step(&mut state, ONE_MOVE);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.food, Position::new(2, 2));
    }

    #[test]
    fn test_boundary_collision_on_every_wall() {
        let cases = [
            (Position::new(1, 10), Direction::Left),
            (Position::new(38, 10), Direction::Right),
            (Position::new(10, 1), Direction::Up),
            (Position::new(10, 28), Direction::Down),
        ];

        for (head, direction) in cases {
            let mut engine = engine();
            let mut state = state_with(vec![head], direction, Position::new(20, 20));

            let result = engine.step(&mut state, ONE_MOVE);

            assert_eq!(
                result.status,
                Status::GameOver {
                    reason: CollisionType::Boundary
                }
            );
            assert!(!state.is_alive());
            assert_eq!(state.snake.head(), head);
        }
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        // Head at (5,5) heading up into (5,4), which is segment 3
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
                Position::new(4, 4),
            ],
            Direction::Up,
            Position::new(20, 20),
        );

        let result = engine.step(&mut state, ONE_MOVE);

        assert_eq!(
            result.status,
            Status::GameOver {
                reason: CollisionType::SelfCollision
            }
        );
        assert_eq!(
            state.game_over_reason(),
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_moving_into_current_tail_collides() {
        let mut engine = engine();
        // 2x2 loop: the tail at (5,4) still counts before the move
        let mut state = state_with(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
            ],
            Direction::Up,
            Position::new(20, 20),
        );

        let result = engine.step(&mut state, ONE_MOVE);
        assert!(result.is_game_over());
    }

    #[test]
    fn test_reversal_is_rejected() {
        let engine = engine();
        let mut state = state_with(
            vec![Position::new(10, 10), Position::new(11, 10)],
            Direction::Left,
            Position::new(20, 20),
        );

        engine.apply(&mut state, Action::Steer(Direction::Right));
        assert_eq!(state.direction, Direction::Left);

        engine.apply(&mut state, Action::Steer(Direction::Up));
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_last_turn_before_move_wins() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(1, 1);

        engine.step(&mut state, 0.1);
        engine.apply(&mut state, Action::Steer(Direction::Left));
        engine.apply(&mut state, Action::Steer(Direction::Up));
        engine.apply(&mut state, Action::Steer(Direction::Right));
        engine.step(&mut state, 0.4);

        assert_eq!(state.snake.head(), Position::new(21, 15));
    }

    #[test]
    fn test_acceleration_increases_and_resets() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(1, 1);

        engine.apply(&mut state, Action::Accelerate);
        let mut previous = state.velocity;
        for _ in 0..5 {
            engine.step(&mut state, 0.1);
            assert!(state.velocity > previous);
            assert!((state.velocity - previous - 0.5 * 0.1).abs() < 1e-12);
            previous = state.velocity;
        }

        engine.apply(&mut state, Action::ReleaseAccelerate);
        assert!(!state.accelerating);
        assert_eq!(state.velocity, 2.0);

        engine.step(&mut state, 0.1);
        assert_eq!(state.velocity, 2.0);
    }

    #[test]
    fn test_acceleration_applies_before_accumulation() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(1, 1);

        // velocities 2.05, 2.10, 2.15, 2.20 sum to 0.85 after four frames
        engine.apply(&mut state, Action::Accelerate);
        for _ in 0..4 {
            assert!(!engine.step(&mut state, 0.1).info.moved);
        }
        assert!(engine.step(&mut state, 0.1).info.moved);
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.status = Status::GameOver {
            reason: CollisionType::Boundary,
        };
        let before = state.clone();

        let result = engine.step(&mut state, 10.0);

        assert!(result.is_game_over());
        assert!(!result.info.moved);
        assert_eq!(state, before);
    }
}
