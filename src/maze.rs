//! Maze minigame grid.
//!
//! Fixed 8x8 corridor layout with randomly seeded obstacles. Walls and the
//! border cannot be entered; obstacles can, at a score penalty. The store only
//! keeps the player's position; this module decides which moves are legal.

use std::str::FromStr;

use rand::Rng;

use crate::error::GameError;
use crate::store::MazePosition;

pub const MAZE_SIZE: i32 = 8;
pub const MAZE_START: MazePosition = MazePosition::new(1, 1);
pub const MAZE_FINISH: MazePosition = MazePosition::new(MAZE_SIZE - 2, MAZE_SIZE - 2);
/// Chance that a corridor cell holds an obstacle.
pub const OBSTACLE_CHANCE: f64 = 0.15;
pub const OBSTACLE_PENALTY: i32 = -10;
pub const FINISH_POINTS: i32 = 150;
/// Seconds / moves under which the finish bonus still grants extra points.
pub const TIME_BONUS_WINDOW: u32 = 60;
pub const MOVE_BONUS_WINDOW: u32 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
    Start,
    Finish,
    Obstacle,
}

impl Cell {
    pub fn is_walkable(self) -> bool {
        !matches!(self, Cell::Wall)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts direction names plus the arrow / WASD keys the maze listens to.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "ArrowUp" | "w" | "W" => Ok(Direction::Up),
            "down" | "ArrowDown" | "s" | "S" => Ok(Direction::Down),
            "left" | "ArrowLeft" | "a" | "A" => Ok(Direction::Left),
            "right" | "ArrowRight" | "d" | "D" => Ok(Direction::Right),
            other => Err(GameError::UnknownDirection(other.to_string())),
        }
    }
}

/// Result of trying to move one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Wall or outside the grid; position unchanged.
    Blocked,
    Moved(MazePosition),
    HitObstacle(MazePosition),
    Finished(MazePosition),
}

/// Whether (x, y) lies on the carved corridor network.
fn is_corridor(x: i32, y: i32) -> bool {
    let inner = |v: i32| v > 0 && v < MAZE_SIZE - 1;
    (y == 1 && inner(x))
        || (x == 1 && inner(y))
        || (y == MAZE_SIZE - 2 && inner(x))
        || (x == MAZE_SIZE - 2 && inner(y))
        || (x == 3 && (3..=5).contains(&y))
        || (y == 3 && (3..=5).contains(&x))
        || (x == 5 && (1..=3).contains(&y))
}

/// Row-major grid, `MAZE_SIZE` x `MAZE_SIZE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Cell>,
}

impl Maze {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::build(|_, _| rng.gen_bool(OBSTACLE_CHANCE))
    }

    /// Layout with obstacles wherever `obstacle(x, y)` says so (corridor cells only).
    pub fn build(mut obstacle: impl FnMut(i32, i32) -> bool) -> Self {
        let mut cells = Vec::with_capacity((MAZE_SIZE * MAZE_SIZE) as usize);
        for y in 0..MAZE_SIZE {
            for x in 0..MAZE_SIZE {
                let pos = MazePosition::new(x, y);
                let cell = if pos == MAZE_START {
                    Cell::Start
                } else if pos == MAZE_FINISH {
                    Cell::Finish
                } else if is_corridor(x, y) {
                    if obstacle(x, y) { Cell::Obstacle } else { Cell::Path }
                } else {
                    Cell::Wall
                };
                cells.push(cell);
            }
        }
        Self { cells }
    }

    pub fn cell(&self, pos: MazePosition) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 || pos.x >= MAZE_SIZE || pos.y >= MAZE_SIZE {
            return None;
        }
        self.cells.get((pos.y * MAZE_SIZE + pos.x) as usize).copied()
    }

    pub fn step(&self, from: MazePosition, dir: Direction) -> MoveOutcome {
        let (dx, dy) = dir.delta();
        let to = MazePosition::new(from.x + dx, from.y + dy);
        match self.cell(to) {
            None | Some(Cell::Wall) => MoveOutcome::Blocked,
            Some(Cell::Obstacle) => MoveOutcome::HitObstacle(to),
            Some(Cell::Finish) => MoveOutcome::Finished(to),
            Some(Cell::Path | Cell::Start) => MoveOutcome::Moved(to),
        }
    }
}

/// Points for reaching the finish: base plus time and move bonuses.
pub fn finish_points(elapsed_secs: u32, moves: u32) -> i32 {
    let time_bonus = TIME_BONUS_WINDOW.saturating_sub(elapsed_secs) as i32;
    let move_bonus = MOVE_BONUS_WINDOW.saturating_sub(moves) as i32;
    FINISH_POINTS + time_bonus + move_bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn clear_maze() -> Maze {
        Maze::build(|_, _| false)
    }

    #[test]
    fn border_is_wall_and_endpoints_fixed() {
        let maze = Maze::generate(&mut StdRng::seed_from_u64(5));
        for i in 0..MAZE_SIZE {
            assert_eq!(maze.cell(MazePosition::new(i, 0)), Some(Cell::Wall));
            assert_eq!(maze.cell(MazePosition::new(0, i)), Some(Cell::Wall));
            assert_eq!(maze.cell(MazePosition::new(i, MAZE_SIZE - 1)), Some(Cell::Wall));
        }
        assert_eq!(maze.cell(MAZE_START), Some(Cell::Start));
        assert_eq!(maze.cell(MAZE_FINISH), Some(Cell::Finish));
    }

    #[test]
    fn moves_into_walls_and_off_grid_are_blocked() {
        let maze = clear_maze();
        assert_eq!(maze.step(MAZE_START, Direction::Up), MoveOutcome::Blocked);
        assert_eq!(maze.step(MAZE_START, Direction::Left), MoveOutcome::Blocked);
        assert_eq!(maze.step(MazePosition::new(0, 0), Direction::Up), MoveOutcome::Blocked);
        assert_eq!(
            maze.step(MAZE_START, Direction::Right),
            MoveOutcome::Moved(MazePosition::new(2, 1))
        );
    }

    #[test]
    fn obstacles_are_passable() {
        let maze = Maze::build(|x, y| (x, y) == (2, 1));
        assert_eq!(
            maze.step(MAZE_START, Direction::Right),
            MoveOutcome::HitObstacle(MazePosition::new(2, 1))
        );
    }

    #[test]
    fn corridor_reaches_finish() {
        let maze = clear_maze();
        let mut pos = MAZE_START;
        let mut last = MoveOutcome::Blocked;
        for dir in [Direction::Down; 5].into_iter().chain([Direction::Right; 5]) {
            last = maze.step(pos, dir);
            pos = match last {
                MoveOutcome::Moved(p) | MoveOutcome::HitObstacle(p) | MoveOutcome::Finished(p) => p,
                MoveOutcome::Blocked => panic!("blocked at {pos:?}"),
            };
        }
        assert_eq!(last, MoveOutcome::Finished(MAZE_FINISH));
    }

    #[test]
    fn direction_keys() {
        assert_eq!("ArrowLeft".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("W".parse::<Direction>(), Ok(Direction::Up));
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn finish_points_bonuses_floor_at_zero() {
        assert_eq!(finish_points(0, 0), 150 + 60 + 30);
        assert_eq!(finish_points(45, 10), 150 + 15 + 20);
        assert_eq!(finish_points(600, 99), 150);
    }
}
