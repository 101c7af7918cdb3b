use std::time::Instant;

/// Source of the current time for bonus expiry
pub(crate) trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.  Clones share the same time.
#[cfg(test)]
#[derive(Clone, Debug)]
pub(crate) struct ManualClock(std::rc::Rc<std::cell::Cell<Instant>>);

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> ManualClock {
        ManualClock(std::rc::Rc::new(std::cell::Cell::new(Instant::now())))
    }

    pub(crate) fn advance(&self, d: std::time::Duration) {
        self.0.set(self.0.get() + d);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

/// Identifies one bonus instance.  Each spawned bonus gets a larger ID than
/// the last.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct BonusId(u64);

impl BonusId {
    pub(super) fn next(self) -> BonusId {
        BonusId(self.0 + 1)
    }
}

/// The pending expiry of the current bonus, if any.  Scheduling a new expiry
/// replaces the old one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct ExpiryTimer(Option<Expiry>);

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Expiry {
    bonus: BonusId,
    due: Instant,
}

impl ExpiryTimer {
    pub(super) fn schedule(&mut self, bonus: BonusId, due: Instant) {
        self.0 = Some(Expiry { bonus, due });
    }

    /// Cancel the pending expiry if it belongs to `bonus`.  Returns `true` if
    /// something was cancelled.
    pub(super) fn cancel(&mut self, bonus: BonusId) -> bool {
        if self.0.is_some_and(|ex| ex.bonus == bonus) {
            self.0 = None;
            true
        } else {
            false
        }
    }

    pub(super) fn clear(&mut self) {
        self.0 = None;
    }

    pub(super) fn deadline(&self) -> Option<Instant> {
        self.0.map(|ex| ex.due)
    }

    /// If the pending expiry is due at `now`, remove it and return the bonus
    /// it belongs to
    pub(super) fn take_due(&mut self, now: Instant) -> Option<BonusId> {
        let ex = self.0.filter(|ex| ex.due <= now)?;
        self.0 = None;
        Some(ex.bonus)
    }
}
