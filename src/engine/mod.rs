//! The game state engine: everything about a game of snake that isn't drawing
//! it or reading the keyboard.
//!
//! The engine is single-threaded.  It changes only when the shell calls
//! [`Engine::advance()`] on a tick, issues a command, or polls the bonus
//! expiry timer, all from the same event loop.
mod direction;
mod phase;
mod placement;
mod snake;
mod timer;
pub(crate) use self::direction::Direction;
pub(crate) use self::phase::Phase;
use self::phase::Trigger;
use self::snake::Snake;
pub(crate) use self::timer::{BonusId, Clock, SystemClock};
use self::timer::ExpiryTimer;
use crate::consts;
use crate::highscore::HighScoreStore;
use crate::settings::{GameSettings, Speed};
use log::{debug, info, warn};
use rand::Rng;
use ratatui::layout::{Position, Positions, Rect, Size};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub(crate) struct Engine<S, R = rand::rngs::ThreadRng, C = SystemClock> {
    settings: GameSettings,
    store: S,
    rng: R,
    clock: C,
    snake: Snake,
    /// The direction the snake will move on the next tick
    direction: Direction,
    /// The direction the snake moved on the last tick.  Turning back along
    /// this is refused, so that two quick turns between ticks can't fold the
    /// snake onto its own neck.
    heading: Direction,
    /// `None` only when the board is full
    food: Option<Position>,
    bonus: Option<Bonus>,
    last_bonus_id: BonusId,
    expiry: ExpiryTimer,
    score: u32,
    high_score: u32,
    difficulty: u32,
    phase: Phase,
}

impl<S: HighScoreStore, R: Rng, C: Clock> Engine<S, R, C> {
    pub(crate) fn new_with_parts(settings: GameSettings, store: S, rng: R, clock: C) -> Self {
        let high_score = store.load();
        let start = start_position(settings);
        let mut engine = Engine {
            settings,
            store,
            rng,
            clock,
            snake: Snake::new(start),
            direction: Direction::Right,
            heading: Direction::Right,
            food: None,
            bonus: None,
            last_bonus_id: BonusId::default(),
            expiry: ExpiryTimer::default(),
            score: 0,
            high_score,
            difficulty: 1,
            phase: Phase::Idle,
        };
        engine.reset();
        engine
    }

    /// Start a new game with the same settings
    pub(crate) fn reset(&mut self) {
        self.snake = Snake::new(start_position(self.settings));
        self.direction = Direction::Right;
        self.heading = Direction::Right;
        self.bonus = None;
        self.expiry.clear();
        self.score = 0;
        self.difficulty = 1;
        self.food = None;
        if !self.place_food() {
            warn!("No room for food on a fresh board");
        }
        self.transition(Trigger::Reset);
        debug!("New game on a {0}×{0} board", self.settings.grid_size);
    }

    /// Advance the game by one tick
    pub(crate) fn advance(&mut self) -> Tick {
        if !self.transition(Trigger::Tick) {
            return if self.phase == Phase::Paused {
                Tick::Paused
            } else {
                Tick::Halted
            };
        }
        // A bonus whose lifetime ran out before this tick is gone, even if
        // nobody polled for it yet.
        self.poll_expiry();
        let snake = &self.snake;
        let Some(head) = self
            .direction
            .advance(snake.head(), self.bounds())
            .filter(|&p| !snake.contains(p))
        else {
            return self.crash();
        };
        self.heading = self.direction;
        self.snake.push_head(head);
        if Some(head) == self.food {
            self.score += consts::FOOD_POINTS;
            self.difficulty = self.difficulty.max(level_for(self.score));
            if !self.place_food() {
                return self.fill_board();
            }
            let bonus_spawned = self.score % consts::LEVEL_POINTS == 0 && self.spawn_bonus();
            debug!(
                "Ate food; score = {}, difficulty = {}",
                self.score, self.difficulty
            );
            Tick::AteFood { bonus_spawned }
        } else if let Some(bonus) = self.bonus.filter(|b| b.position == head) {
            self.score += consts::BONUS_POINTS;
            self.bonus = None;
            self.expiry.cancel(bonus.id);
            debug!("Ate bonus {:?}; score = {}", bonus.id, self.score);
            Tick::AteBonus
        } else {
            self.snake.drop_tail();
            Tick::Moved
        }
    }

    /// Change the direction the snake will move in on the next tick.  Turning
    /// back the way the snake came is ignored, as is steering while the game
    /// isn't live.
    pub(crate) fn set_direction(&mut self, direction: Direction) {
        if self.phase.is_live() && direction != self.heading.reverse() {
            self.direction = direction;
        }
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.transition(if paused {
            Trigger::Pause
        } else {
            Trigger::Resume
        });
    }

    /// Expire the bonus if its time is up.  This is the bonus timer "firing";
    /// it keeps counting while the game is paused.  Returns the ID of the
    /// expired bonus, if any.
    pub(crate) fn poll_expiry(&mut self) -> Option<BonusId> {
        let id = self.expiry.take_due(self.clock.now())?;
        self.expire_bonus(id).then_some(id)
    }

    /// Remove bonus `id` from the board.  Does nothing if that bonus has
    /// already been eaten or replaced.
    pub(crate) fn expire_bonus(&mut self, id: BonusId) -> bool {
        if self.bonus.is_some_and(|b| b.id == id) {
            self.bonus = None;
            self.expiry.cancel(id);
            debug!("Bonus {id:?} expired");
            true
        } else {
            false
        }
    }

    fn crash(&mut self) -> Tick {
        self.transition(Trigger::Crash);
        let score = self.score;
        let new_high_score = self.record_high_score();
        info!("Game over with score {score}");
        self.reset();
        Tick::Crashed {
            score,
            new_high_score,
        }
    }

    fn fill_board(&mut self) -> Tick {
        self.transition(Trigger::BoardFull);
        self.bonus = None;
        self.expiry.clear();
        self.record_high_score();
        info!("Board filled with score {}", self.score);
        Tick::BoardFull
    }

    fn record_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            info!("New high score: {}", self.score);
            self.high_score = self.score;
            self.store.save(self.score);
            true
        } else {
            false
        }
    }

    /// Put the food on a random cell not covered by the snake or the bonus.
    /// If the bonus is in the only free cell, the bonus is dropped to make
    /// room.  Returns `false` if the board is full.
    fn place_food(&mut self) -> bool {
        let bounds = self.bounds();
        let snake = &self.snake;
        let bonus = self.bonus.map(|b| b.position);
        self.food = placement::place(&mut self.rng, bounds, |p| {
            Some(p) == bonus || snake.contains(p)
        });
        if self.food.is_none() {
            if let Some(b) = self.bonus.take() {
                self.expiry.cancel(b.id);
                self.food = Some(b.position);
            }
        }
        self.food.is_some()
    }

    /// Put a new bonus on a random cell not covered by the snake or the food
    /// and start its expiry timer.  Returns `false` if there was no room.
    fn spawn_bonus(&mut self) -> bool {
        let bounds = self.bounds();
        let snake = &self.snake;
        let food = self.food;
        let Some(position) =
            placement::place(&mut self.rng, bounds, |p| Some(p) == food || snake.contains(p))
        else {
            warn!("No room for a bonus; skipping it");
            return false;
        };
        self.last_bonus_id = self.last_bonus_id.next();
        let id = self.last_bonus_id;
        self.bonus = Some(Bonus { id, position });
        self.expiry
            .schedule(id, self.clock.now() + consts::BONUS_LIFETIME);
        debug!("Spawned bonus {id:?} at {position}");
        true
    }

    /// Apply `trigger` to the current phase.  Returns `false` if the trigger
    /// isn't allowed in this phase, in which case nothing changes.
    fn transition(&mut self, trigger: Trigger) -> bool {
        match self.phase.on(trigger) {
            Some(phase) => {
                if phase != self.phase {
                    debug!("{:?} --{trigger:?}--> {phase:?}", self.phase);
                }
                self.phase = phase;
                true
            }
            None => false,
        }
    }
}

impl<S, R, C> Engine<S, R, C> {
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: self.snake.segments(),
            food: self.food,
            bonus: self.bonus.map(|b| b.position),
            score: self.score,
            high_score: self.high_score,
            direction: self.direction,
            paused: self.phase == Phase::Paused,
            difficulty: self.difficulty,
            phase: self.phase,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn settings(&self) -> GameSettings {
        self.settings
    }

    /// How long the shell should wait between ticks at the current difficulty
    pub(crate) fn tick_interval(&self) -> Duration {
        tick_interval(self.settings.speed, self.difficulty)
    }

    /// When the pending bonus expiry is due, if there is one
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.expiry.deadline()
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            size: self.settings.grid_size.get(),
            wrap: self.settings.borderless,
        }
    }
}

/// A read-only view of an [`Engine`]'s state
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    /// Head first
    pub(crate) snake: &'a VecDeque<Position>,
    pub(crate) food: Option<Position>,
    pub(crate) bonus: Option<Position>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) direction: Direction,
    pub(crate) paused: bool,
    pub(crate) difficulty: u32,
    pub(crate) phase: Phase,
}

/// What happened during a call to [`Engine::advance()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Tick {
    /// The game is paused, so nothing happened
    Paused,
    /// The game is over for good (the board is full), so nothing happened
    Halted,
    Moved,
    AteFood {
        bonus_spawned: bool,
    },
    AteBonus,
    /// The snake hit a wall or itself, and a new game has begun
    Crashed {
        score: u32,
        new_high_score: bool,
    },
    /// The snake ate the last piece of food there was room for
    BoardFull,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Bonus {
    id: BonusId,
    position: Position,
}

/// The square playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    size: u16,
    wrap: bool,
}

impl Bounds {
    fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, Size::new(self.size, self.size))).positions()
    }
}

/// The difficulty level for a given score
pub(crate) fn level_for(score: u32) -> u32 {
    score / consts::LEVEL_POINTS + 1
}

/// `speed` shortened by [`LEVEL_SPEEDUP`][consts::LEVEL_SPEEDUP] per
/// difficulty level, but never below
/// [`MIN_TICK_INTERVAL`][consts::MIN_TICK_INTERVAL]
pub(crate) fn tick_interval(speed: Speed, difficulty: u32) -> Duration {
    speed
        .as_duration()
        .saturating_sub(consts::LEVEL_SPEEDUP.saturating_mul(difficulty))
        .max(consts::MIN_TICK_INTERVAL)
}

fn start_position(settings: GameSettings) -> Position {
    let mid = settings.grid_size.get() / 2;
    Position::new(mid, mid)
}
