use rand::Rng;

/// A position in source pixels. Snake segments and the food start
/// tile-aligned but drift onto fractional coordinates once the speed
/// multiplier passes its starting value; collision checks compare these
/// coordinates exactly.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
}

impl Cell {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Cell) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Unit step per tick. `STILL` means the run has started but no arrow
/// key has been pressed yet.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

impl Direction {
    pub const STILL: Direction = Direction { dx: 0, dy: 0 };
    pub const UP: Direction = Direction { dx: 0, dy: -1 };
    pub const DOWN: Direction = Direction { dx: 0, dy: 1 };
    pub const LEFT: Direction = Direction { dx: -1, dy: 0 };
    pub const RIGHT: Direction = Direction { dx: 1, dy: 0 };

    pub fn is_still(self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    /// True when applying `next` would exactly reverse nonzero travel on
    /// the same axis. Any direction is reachable from `STILL`.
    fn reverses(self, next: Direction) -> bool {
        (next.dx != 0 && next.dx == -self.dx) || (next.dy != 0 && next.dy == -self.dy)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RunState {
    Idle,
    Running,
    GameOver,
}

/// Fixed per-run tuning. Playfield dimensions are in pixels and must be
/// whole multiples of `grid_size`.
#[derive(Copy, Clone, Debug)]
pub struct Rules {
    pub grid_size: f32,
    pub width: f32,
    pub height: f32,
    pub extra_grow: usize,
    pub start_speed: f32,
    pub speed_increase: f32,
    pub food_reward: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            width: 800.0,
            height: 600.0,
            extra_grow: 3,
            start_speed: 2.0,
            speed_increase: 0.1,
            food_reward: 10,
        }
    }
}

impl Rules {
    fn tiles_x(&self) -> i32 {
        (self.width / self.grid_size) as i32
    }

    fn tiles_y(&self) -> i32 {
        (self.height / self.grid_size) as i32
    }
}

/// What a single tick did, so the shell can fire sounds and popups
/// without the simulation knowing about them.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum StepOutcome {
    /// Not running, or no direction chosen yet; nothing moved.
    Idle,
    /// Normal move, tail vacated.
    Advanced,
    /// Food eaten at the carried cell; snake grew and food moved.
    Pickup { at: Cell },
    /// Hit a wall or the body; the run is over.
    Died,
}

pub struct Game {
    pub rules: Rules,
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub speed: f32,
    pub state: RunState,
}

impl Game {
    pub fn new(rules: Rules) -> Self {
        let mut game = Self {
            rules,
            snake: Vec::new(),
            food: Cell::new(0.0, 0.0),
            direction: Direction::STILL,
            score: 0,
            speed: rules.start_speed,
            state: RunState::Idle,
        };
        game.reset();
        game
    }

    /// Full reset to the fixed start layout: one segment on the center
    /// tile, food on the 3/4 tile, no direction, starting speed.
    fn reset(&mut self) {
        let g = self.rules.grid_size;
        let center = Cell::new(
            (self.rules.tiles_x() / 2) as f32 * g,
            (self.rules.tiles_y() / 2) as f32 * g,
        );
        self.snake = vec![center];
        self.food = Cell::new(
            (self.rules.tiles_x() * 3 / 4) as f32 * g,
            (self.rules.tiles_y() * 3 / 4) as f32 * g,
        );
        self.direction = Direction::STILL;
        self.score = 0;
        self.speed = self.rules.start_speed;
    }

    /// Enter `Running` from `Idle` or `GameOver`; no-op mid-run.
    pub fn start(&mut self) {
        if self.state == RunState::Running {
            return;
        }
        self.reset();
        self.state = RunState::Running;
    }

    /// Apply a steering input. Ignored unless running, and ignored when
    /// it would reverse the current nonzero direction.
    pub fn steer(&mut self, next: Direction) {
        if self.state != RunState::Running || self.direction.reverses(next) {
            return;
        }
        self.direction = next;
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// One simulation tick. Runs the move/collide/eat sequence and
    /// reports what happened; does nothing outside `Running`.
    pub fn step(&mut self, rng: &mut impl Rng) -> StepOutcome {
        if self.state != RunState::Running || self.direction.is_still() {
            return StepOutcome::Idle;
        }

        let head = self.head();
        let candidate = Cell::new(
            head.x + self.direction.dx as f32 * self.speed,
            head.y + self.direction.dy as f32 * self.speed,
        );

        if candidate.x < 0.0
            || candidate.x >= self.rules.width
            || candidate.y < 0.0
            || candidate.y >= self.rules.height
        {
            self.state = RunState::GameOver;
            return StepOutcome::Died;
        }

        // The tail cell vacates this tick unless the move also picks up
        // food, so it is not a collision target; every other body cell
        // is.
        let body = &self.snake[..self.snake.len() - 1];
        if body.contains(&candidate) {
            self.state = RunState::GameOver;
            return StepOutcome::Died;
        }

        self.snake.insert(0, candidate);

        if candidate.distance(self.food) < self.rules.grid_size / 2.0 {
            let eaten = self.food;
            self.score += self.rules.food_reward;
            let tail = *self.snake.last().unwrap();
            for _ in 0..self.rules.extra_grow {
                self.snake.push(tail);
            }
            self.speed += self.rules.speed_increase;
            self.food = self.spawn_food(rng);
            StepOutcome::Pickup { at: eaten }
        } else {
            self.snake.pop();
            StepOutcome::Advanced
        }
    }

    /// Uniform tile chosen by rejection sampling against every snake
    /// cell. The board is far larger than the snake can get before the
    /// fractional drift makes exact overlap impossible, so the loop
    /// terminates quickly in practice.
    fn spawn_food(&self, rng: &mut impl Rng) -> Cell {
        let g = self.rules.grid_size;
        loop {
            let cell = Cell::new(
                rng.gen_range(0..self.rules.tiles_x()) as f32 * g,
                rng.gen_range(0..self.rules.tiles_y()) as f32 * g,
            );
            if !self.snake.contains(&cell) {
                return cell;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn running_game() -> Game {
        let mut game = Game::new(Rules {
            width: 400.0,
            height: 400.0,
            ..Rules::default()
        });
        game.start();
        game
    }

    #[test]
    fn still_direction_moves_nothing() {
        let mut game = running_game();
        let snake = game.snake.clone();
        assert_eq!(game.step(&mut rng()), StepOutcome::Idle);
        assert_eq!(game.snake, snake);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn plain_move_shifts_head_and_drops_tail() {
        let mut game = running_game();
        game.snake = vec![Cell::new(200.0, 200.0)];
        game.food = Cell::new(300.0, 300.0);
        game.steer(Direction::RIGHT);

        assert_eq!(game.step(&mut rng()), StepOutcome::Advanced);
        assert_eq!(game.snake, vec![Cell::new(202.0, 200.0)]);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn pickup_grows_scores_and_accelerates() {
        let mut game = running_game();
        game.snake = vec![Cell::new(200.0, 200.0)];
        game.food = Cell::new(202.0, 200.0);
        game.steer(Direction::RIGHT);

        let outcome = game.step(&mut rng());
        assert_eq!(
            outcome,
            StepOutcome::Pickup {
                at: Cell::new(202.0, 200.0)
            }
        );
        // New head plus three tail duplicates, nothing popped.
        assert_eq!(game.snake.len(), 5);
        assert_eq!(game.score, 10);
        assert!((game.speed - 2.1).abs() < f32::EPSILON);
        assert!(!game.snake.contains(&game.food));
    }

    #[test]
    fn reversal_steering_is_ignored() {
        let mut game = running_game();
        game.steer(Direction::RIGHT);
        game.steer(Direction::LEFT);
        assert_eq!(game.direction, Direction::RIGHT);

        game.steer(Direction::UP);
        assert_eq!(game.direction, Direction::UP);
        game.steer(Direction::DOWN);
        assert_eq!(game.direction, Direction::UP);
    }

    #[test]
    fn any_direction_is_reachable_from_still() {
        for dir in [
            Direction::UP,
            Direction::DOWN,
            Direction::LEFT,
            Direction::RIGHT,
        ] {
            let mut game = running_game();
            game.steer(dir);
            assert_eq!(game.direction, dir);
        }
    }

    #[test]
    fn leaving_the_playfield_ends_the_run() {
        let edges = [
            (Cell::new(398.0, 200.0), Direction::RIGHT),
            (Cell::new(0.0, 200.0), Direction::LEFT),
            (Cell::new(200.0, 0.0), Direction::UP),
            (Cell::new(200.0, 398.0), Direction::DOWN),
        ];
        for (start, dir) in edges {
            let mut game = running_game();
            game.snake = vec![start];
            game.steer(dir);
            assert_eq!(game.step(&mut rng()), StepOutcome::Died);
            assert_eq!(game.state, RunState::GameOver);
        }
    }

    #[test]
    fn game_over_freezes_the_snake_until_restart() {
        let mut game = running_game();
        game.snake = vec![Cell::new(398.0, 200.0)];
        game.steer(Direction::RIGHT);
        assert_eq!(game.step(&mut rng()), StepOutcome::Died);

        let frozen = game.snake.clone();
        for _ in 0..5 {
            assert_eq!(game.step(&mut rng()), StepOutcome::Idle);
        }
        assert_eq!(game.snake, frozen);

        game.start();
        assert_eq!(game.state, RunState::Running);
        assert_eq!(game.snake.len(), 1);
        assert_eq!(game.score, 0);
    }

    #[test]
    fn hitting_the_body_ends_the_run() {
        let mut game = running_game();
        // Head about to re-enter a body cell that is not the tail.
        game.snake = vec![
            Cell::new(100.0, 100.0),
            Cell::new(120.0, 100.0),
            Cell::new(120.0, 120.0),
            Cell::new(100.0, 120.0),
            Cell::new(80.0, 120.0),
        ];
        game.food = Cell::new(300.0, 300.0);
        game.speed = 20.0;
        game.steer(Direction::DOWN);

        assert_eq!(game.step(&mut rng()), StepOutcome::Died);
        assert_eq!(game.state, RunState::GameOver);
    }

    #[test]
    fn moving_into_the_vacating_tail_is_legal() {
        let mut game = running_game();
        game.snake = vec![
            Cell::new(100.0, 100.0),
            Cell::new(120.0, 100.0),
            Cell::new(120.0, 120.0),
            Cell::new(100.0, 120.0),
        ];
        game.food = Cell::new(300.0, 300.0);
        game.speed = 20.0;
        game.steer(Direction::DOWN);

        assert_eq!(game.step(&mut rng()), StepOutcome::Advanced);
        assert_eq!(game.head(), Cell::new(100.0, 120.0));
        assert_eq!(game.snake.len(), 4);
    }

    /// Counts random draws and fails the test if sampling runs away.
    struct BudgetedRng {
        inner: SmallRng,
        draws: u32,
        budget: u32,
    }

    impl rand::RngCore for BudgetedRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            assert!(
                self.draws <= self.budget,
                "food sampling exceeded {} draws",
                self.budget
            );
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            assert!(
                self.draws <= self.budget,
                "food sampling exceeded {} draws",
                self.budget
            );
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.inner.try_fill_bytes(dest)
        }
    }

    #[test]
    fn food_sampling_stays_bounded_on_a_nearly_full_board() {
        let mut game = running_game();
        let g = game.rules.grid_size;
        // Every tile occupied except one; sampling must still land on
        // the free tile within a sane number of draws.
        let free = Cell::new(7.0 * g, 11.0 * g);
        game.snake = (0..20)
            .flat_map(|x| (0..20).map(move |y| Cell::new(x as f32 * g, y as f32 * g)))
            .filter(|c| *c != free)
            .collect();

        let mut rng = BudgetedRng {
            inner: SmallRng::seed_from_u64(7),
            draws: 0,
            budget: 200_000,
        };
        assert_eq!(game.spawn_food(&mut rng), free);
    }

    #[test]
    fn food_never_lands_on_the_snake() {
        let mut game = running_game();
        let g = game.rules.grid_size;
        game.snake = (0..15).map(|i| Cell::new(i as f32 * g, 100.0)).collect();

        let mut rng = rng();
        for _ in 0..500 {
            let food = game.spawn_food(&mut rng);
            assert!(!game.snake.contains(&food));
            assert_eq!(food.x % g, 0.0);
            assert_eq!(food.y % g, 0.0);
            assert!(food.x >= 0.0 && food.x < game.rules.width);
            assert!(food.y >= 0.0 && food.y < game.rules.height);
        }
    }
}
