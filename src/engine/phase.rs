/// Where a game is in its lifecycle
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Freshly reset; the first tick starts the game
    #[default]
    Idle,
    Running,
    /// Ticks are ignored and the game state is frozen.  The bonus expiry clock
    /// keeps running.
    Paused,
    /// The snake just crashed.  Only observable between the collision and the
    /// reset that immediately follows it.
    Over,
    /// The snake fills the board, so there is nowhere left to put food.  Stays
    /// here until reset.
    Exhausted,
}

/// Something that may move a game from one [`Phase`] to another
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Trigger {
    Tick,
    Pause,
    Resume,
    Crash,
    BoardFull,
    Reset,
}

impl Phase {
    /// Return the phase that `trigger` leads to from `self`, or `None` if the
    /// trigger is not allowed in this phase
    pub(crate) fn on(self, trigger: Trigger) -> Option<Phase> {
        match (self, trigger) {
            (_, Trigger::Reset) => Some(Phase::Idle),
            (Phase::Idle | Phase::Running, Trigger::Tick) => Some(Phase::Running),
            (Phase::Idle | Phase::Running | Phase::Paused, Trigger::Pause) => Some(Phase::Paused),
            (Phase::Paused | Phase::Running, Trigger::Resume) => Some(Phase::Running),
            (Phase::Idle, Trigger::Resume) => Some(Phase::Idle),
            (Phase::Running, Trigger::Crash) => Some(Phase::Over),
            (Phase::Running, Trigger::BoardFull) => Some(Phase::Exhausted),
            _ => None,
        }
    }

    /// Is the game accepting ticks & steering?
    pub(crate) fn is_live(self) -> bool {
        matches!(self, Phase::Idle | Phase::Running)
    }
}
