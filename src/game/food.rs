use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::grid::Grid;
use super::state::{Position, Snake};

/// Where new food may appear
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodPolicy {
    /// Any playable cell, including ones under the snake
    #[default]
    AnyPlayable,
    /// Only playable cells not covered by the snake
    AvoidSnake,
}

/// Picks food cells from a generator seeded once at construction
pub struct FoodPlacer {
    rng: StdRng,
    policy: FoodPolicy,
}

impl FoodPlacer {
    pub fn new(policy: FoodPolicy, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, policy }
    }

    /// Uniformly random playable cell. Under `AvoidSnake` the cells covered by
    /// `snake` are excluded unless that leaves nothing to choose from.
    pub fn place(&mut self, grid: &Grid, snake: &Snake) -> Position {
        let pos = match self.policy {
            FoodPolicy::AnyPlayable => self.any_playable(grid),
            FoodPolicy::AvoidSnake => {
                let free: Vec<Position> = grid
                    .playable_y()
                    .flat_map(|y| grid.playable_x().map(move |x| Position::new(x, y)))
                    .filter(|pos| !snake.contains(*pos))
                    .collect();
                match free.choose(&mut self.rng) {
                    Some(pos) => *pos,
                    None => self.any_playable(grid),
                }
            }
        };

        debug!(x = pos.x, y = pos.y, policy = ?self.policy, "placed food");
        pos
    }

    fn any_playable(&mut self, grid: &Grid) -> Position {
        let x = self.rng.gen_range(grid.playable_x());
        let y = self.rng.gen_range(grid.playable_y());
        Position::new(x, y)
    }
}
