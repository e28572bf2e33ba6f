//! One player's run through a maze, and the best time across retries.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

use crate::cells::{Direction, Position};
use crate::clock::Timestamp;
use crate::generators;
use crate::geometry::{Geometry, Rect};
use crate::grid::Grid;
use crate::input::Key;
use crate::units::PixelPoint;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SessionState {
    /// Fresh maze, the clock starts on the first key press.
    Ready,
    Running,
    /// Goal reached, waiting for the retry control.
    Finished,
}

/// The game state driven by the frame loop.
///
/// Every operation is total: moves into walls, clicks outside the retry control and
/// repeated goal checks are quietly ignored.
#[derive(Debug)]
pub struct GameSession {
    geometry: Geometry,
    rng: StdRng,
    grid: Grid,
    player: Position,
    goal: Position,
    start_time: Option<Timestamp>,
    goal_time: Duration,
    finished: bool,
    best_time: Option<Duration>,
    rounds: u32,
}

impl GameSession {
    /// A ready to play session with a randomly seeded maze generator.
    pub fn new(geometry: Geometry) -> GameSession {
        GameSession::with_rng(geometry, StdRng::from_entropy())
    }

    /// Same seed, same sequence of mazes.
    pub fn with_seed(geometry: Geometry, seed: u64) -> GameSession {
        GameSession::with_rng(geometry, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(geometry: Geometry, rng: StdRng) -> GameSession {
        let mut session = GameSession {
            geometry,
            rng,
            grid: Grid::new(geometry.columns(), geometry.rows()),
            player: Position::ORIGIN,
            goal: Position::ORIGIN,
            start_time: None,
            goal_time: Duration::default(),
            finished: false,
            best_time: None,
            rounds: 0,
        };
        session.reset();
        session
    }

    /// Start over on a brand new maze. The best time survives.
    pub fn reset(&mut self) {
        let (grid, goal) = generators::maze_with_goal(self.geometry.columns(),
                                                      self.geometry.rows(),
                                                      &mut self.rng);
        self.grid = grid;
        self.goal = goal;
        self.player = Position::ORIGIN;
        self.start_time = None;
        self.goal_time = Duration::default();
        self.finished = false;
        self.rounds += 1;

        info!(round = self.rounds,
              columns = self.grid.width().0,
              rows = self.grid.height().0,
              goal = %self.goal,
              "new maze");
    }

    /// Any key press starts the clock; the arrow keys also move the player.
    pub fn handle_key(&mut self, key: Key, now: Timestamp) {
        if self.finished {
            return;
        }
        self.start_clock(now);
        if let Some(direction) = key.direction() {
            self.step(direction);
        }
    }

    /// Move the player one cell, unless the way is blocked.
    ///
    /// The first call after a reset starts the clock, whether or not the move succeeds.
    pub fn handle_move(&mut self, direction: Direction, now: Timestamp) {
        if self.finished {
            return;
        }
        self.start_clock(now);
        self.step(direction);
    }

    /// Finish the run if the player is standing on the goal.
    pub fn check_goal(&mut self, now: Timestamp) {
        if self.finished || self.player != self.goal {
            return;
        }

        self.finished = true;
        self.goal_time = self.start_time.map_or(Duration::default(), |start| now.duration_since(start));

        let is_best = self.best_time.map_or(true, |best| self.goal_time < best);
        if is_best {
            self.best_time = Some(self.goal_time);
        }
        info!(round = self.rounds,
              time_secs = self.goal_time.as_secs_f64(),
              new_best = is_best,
              "goal reached");
    }

    /// Time on the clock: running time, the final time once finished, zero before the first move.
    pub fn current_elapsed(&self, now: Timestamp) -> Duration {
        match (self.finished, self.start_time) {
            (true, _) => self.goal_time,
            (false, Some(start)) => now.duration_since(start),
            (false, None) => Duration::default(),
        }
    }

    /// Clicking the retry control after finishing starts a new maze.
    pub fn handle_retry_click(&mut self, point: PixelPoint) {
        if self.finished && self.retry_region().contains(point) {
            debug!(x = point.x, y = point.y, "retry");
            self.reset();
        }
    }

    pub fn state(&self) -> SessionState {
        if self.finished {
            SessionState::Finished
        } else if self.start_time.is_some() {
            SessionState::Running
        } else {
            SessionState::Ready
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn player(&self) -> Position {
        self.player
    }

    #[inline]
    pub fn goal(&self) -> Position {
        self.goal
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[inline]
    pub fn start_time(&self) -> Option<Timestamp> {
        self.start_time
    }

    /// Only meaningful once finished.
    #[inline]
    pub fn goal_time(&self) -> Duration {
        self.goal_time
    }

    #[inline]
    pub fn best_time(&self) -> Option<Duration> {
        self.best_time
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    #[inline]
    pub fn retry_region(&self) -> Rect {
        self.geometry.retry_button()
    }

    fn start_clock(&mut self, now: Timestamp) {
        if self.start_time.is_none() {
            debug!(round = self.rounds, "clock started");
            self.start_time = Some(now);
        }
    }

    fn step(&mut self, direction: Direction) {
        match self.grid.neighbour_at_direction(self.player, direction) {
            Some(next) if self.grid.is_passage(next) => {
                trace!(from = %self.player, to = %next, "move");
                self.player = next;
            }
            _ => trace!(at = %self.player, ?direction, "blocked"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pathing::{self, Distances};
    use crate::units::{CellPixels, PixelHeight, PixelWidth};

    use quickcheck::{quickcheck, TestResult};

    fn five_by_five() -> Geometry {
        Geometry::new(PixelWidth(200), PixelHeight(200), CellPixels(40)).unwrap()
    }

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    /// Directions that walk the shortest route from the player to the goal.
    fn route_to_goal(session: &GameSession) -> Vec<Direction> {
        let distances = Distances::new(session.grid(), session.player()).unwrap();
        let path = pathing::shortest_path(session.grid(), &distances, session.goal())
            .expect("goal must be reachable");
        path.windows(2)
            .map(|pair| {
                *Direction::ALL
                    .iter()
                    .find(|dir| pair[0].offset(**dir, 1) == Some(pair[1]))
                    .unwrap()
            })
            .collect()
    }

    /// Walk to the goal with every move at `start`, then let the frame loop see it at `finish`.
    fn play_round(session: &mut GameSession, start: u64, finish: u64) {
        for dir in route_to_goal(session) {
            session.handle_move(dir, at(start));
        }
        session.check_goal(at(finish));
    }

    fn click_retry(session: &mut GameSession) {
        let centre = session.retry_region().centre();
        session.handle_retry_click(centre);
    }

    #[test]
    fn new_session_is_ready() {
        let session = GameSession::with_seed(Geometry::default(), 1);
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.player(), Position::ORIGIN);
        assert_eq!(session.goal(), Position::new(19, 14));
        assert!(session.grid().is_passage(session.goal()));
        assert_eq!(session.start_time(), None);
        assert_eq!(session.best_time(), None);
        assert_eq!(session.current_elapsed(at(5_000)), Duration::default());
    }

    #[test]
    fn first_move_starts_clock_even_when_blocked() {
        let mut session = GameSession::with_seed(five_by_five(), 3);
        // row -1 does not exist
        session.handle_move(Direction::Up, at(1_000));
        assert_eq!(session.player(), Position::ORIGIN);
        assert_eq!(session.start_time(), Some(at(1_000)));
        assert_eq!(session.state(), SessionState::Running);

        session.handle_move(Direction::Left, at(2_000));
        assert_eq!(session.start_time(), Some(at(1_000)));
        assert_eq!(session.current_elapsed(at(4_500)), Duration::from_millis(3_500));
    }

    #[test]
    fn any_key_starts_clock() {
        let mut session = GameSession::with_seed(five_by_five(), 3);
        session.handle_key(Key::Other, at(700));
        assert_eq!(session.player(), Position::ORIGIN);
        assert_eq!(session.start_time(), Some(at(700)));
    }

    #[test]
    fn arrow_keys_move() {
        let mut session = GameSession::with_seed(five_by_five(), 8);
        let first = route_to_goal(&session)[0];
        let key = match first {
            Direction::Up => Key::Up,
            Direction::Down => Key::Down,
            Direction::Left => Key::Left,
            Direction::Right => Key::Right,
        };
        session.handle_key(key, at(10));
        assert_eq!(Some(session.player()), Position::ORIGIN.offset(first, 1));
    }

    #[test]
    fn five_by_five_scenario() {
        let mut session = GameSession::with_seed(five_by_five(), 21);
        assert_eq!(session.goal(), Position::new(4, 4));

        let route = route_to_goal(&session);
        let mut now = 1_000;
        for dir in route {
            session.handle_move(dir, at(now));
            session.check_goal(at(now));
            now += 250;
        }
        let at_goal = now - 250;

        assert_eq!(session.player(), Position::new(4, 4));
        assert!(session.is_finished());
        assert_eq!(session.state(), SessionState::Finished);
        assert_eq!(session.goal_time(), Duration::from_millis(at_goal - 1_000));
        assert_eq!(session.best_time(), Some(session.goal_time()));
        assert_eq!(session.current_elapsed(at(99_999)), session.goal_time());
    }

    #[test]
    fn finished_session_is_frozen() {
        let mut session = GameSession::with_seed(five_by_five(), 4);
        play_round(&mut session, 0, 5_000);
        assert!(session.is_finished());

        let player = session.player();
        let goal_time = session.goal_time();
        for dir in Direction::ALL.iter() {
            session.handle_move(*dir, at(6_000));
        }
        session.handle_key(Key::Up, at(6_000));
        session.check_goal(at(9_000));

        assert_eq!(session.player(), player);
        assert_eq!(session.goal_time(), goal_time);
        assert_eq!(session.best_time(), Some(goal_time));
        assert_eq!(session.start_time(), Some(at(0)));
    }

    #[test]
    fn check_goal_away_from_goal_does_nothing() {
        let mut session = GameSession::with_seed(five_by_five(), 4);
        session.handle_move(Direction::Up, at(0));
        session.check_goal(at(100));
        assert!(!session.is_finished());
        assert_eq!(session.best_time(), None);
    }

    #[test]
    fn best_time_improves() {
        let mut session = GameSession::with_seed(Geometry::default(), 12);
        play_round(&mut session, 0, 12_300);
        assert_eq!(session.best_time(), Some(Duration::from_millis(12_300)));
        click_retry(&mut session);
        play_round(&mut session, 20_000, 28_100);
        assert_eq!(session.best_time(), Some(Duration::from_millis(8_100)));
    }

    #[test]
    fn best_time_keeps_the_fastest() {
        let mut session = GameSession::with_seed(Geometry::default(), 12);
        play_round(&mut session, 0, 8_100);
        click_retry(&mut session);
        play_round(&mut session, 20_000, 32_300);
        assert_eq!(session.goal_time(), Duration::from_millis(12_300));
        assert_eq!(session.best_time(), Some(Duration::from_millis(8_100)));
    }

    #[test]
    fn retry_click_only_counts_when_finished_and_inside() {
        let mut session = GameSession::with_seed(five_by_five(), 6);
        let grid_before = session.grid().clone();
        session.handle_move(Direction::Right, at(0));

        click_retry(&mut session);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(session.start_time(), Some(at(0)));

        play_round(&mut session, 0, 1_000);
        assert!(session.is_finished());
        session.handle_retry_click(PixelPoint::new(0, 0));
        assert!(session.is_finished());

        click_retry(&mut session);
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.player(), Position::ORIGIN);
        assert_eq!(session.best_time(), Some(Duration::from_millis(1_000)));
        // a 5x5 grid has few layouts, so only check the new grid is a valid maze
        assert_eq!(session.grid().width(), grid_before.width());
        assert!(session.grid().is_passage(session.goal()));
    }

    #[test]
    fn reset_mid_run() {
        let mut session = GameSession::with_seed(Geometry::default(), 30);
        play_round(&mut session, 0, 4_000);
        click_retry(&mut session);
        let best = session.best_time();
        let old_grid = session.grid().clone();

        for dir in route_to_goal(&session).into_iter().take(3) {
            session.handle_move(dir, at(10_000));
        }
        assert_ne!(session.player(), Position::ORIGIN);

        session.reset();
        assert_eq!(session.player(), Position::ORIGIN);
        assert!(!session.is_finished());
        assert_eq!(session.start_time(), None);
        assert_eq!(session.goal_time(), Duration::default());
        assert_eq!(session.best_time(), best);
        assert_ne!(session.grid(), &old_grid);
    }

    #[test]
    fn same_seed_same_mazes() {
        let mut a = GameSession::with_seed(Geometry::default(), 77);
        let mut b = GameSession::with_seed(Geometry::default(), 77);
        assert_eq!(a.grid(), b.grid());
        a.reset();
        b.reset();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn player_never_enters_walls() {
        fn prop(moves: Vec<u8>, seed: u64) -> TestResult {
            let mut session = GameSession::with_seed(Geometry::default(), seed);
            for (i, m) in moves.into_iter().enumerate() {
                let dir = Direction::ALL[m as usize % 4];
                session.handle_move(dir, Timestamp::from_millis(i as u64));
                let player = session.player();
                if !session.grid().is_valid_coordinate(player) || !session.grid().is_passage(player) {
                    return TestResult::failed();
                }
            }
            TestResult::passed()
        }
        quickcheck(prop as fn(Vec<u8>, u64) -> TestResult);
    }

    #[test]
    fn clock_set_once_per_round() {
        fn prop(moves: Vec<u8>) -> bool {
            let mut session = GameSession::with_seed(Geometry::default(), 99);
            for (i, m) in moves.iter().enumerate() {
                session.handle_move(Direction::ALL[*m as usize % 4], Timestamp::from_millis(100 + i as u64));
            }
            moves.is_empty() || session.start_time() == Some(Timestamp::from_millis(100))
        }
        quickcheck(prop as fn(Vec<u8>) -> bool);
    }
}
