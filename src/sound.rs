use crate::engine::Tick;
use log::trace;
use std::io::{self, Write};

/// The terminal bell
const BEL: &[u8] = b"\x07";

/// Something worth making a noise about
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    Eat,
    GameOver,
}

impl Cue {
    /// The cue, if any, for the outcome of a tick
    pub(crate) fn for_tick(tick: Tick) -> Option<Cue> {
        match tick {
            Tick::AteFood { .. } | Tick::AteBonus => Some(Cue::Eat),
            Tick::Crashed { .. } | Tick::BoardFull => Some(Cue::GameOver),
            Tick::Paused | Tick::Halted | Tick::Moved => None,
        }
    }

    /// Number of bells to ring
    fn rings(self) -> usize {
        match self {
            Cue::Eat => 1,
            Cue::GameOver => 2,
        }
    }
}

/// Plays cues by ringing the terminal bell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Sound {
    enabled: bool,
}

impl Sound {
    pub(crate) fn new(enabled: bool) -> Sound {
        Sound { enabled }
    }

    pub(crate) fn play<W: Write>(&self, cue: Cue, out: &mut W) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        trace!("Playing {cue:?} cue");
        for _ in 0..cue.rings() {
            out.write_all(BEL)?;
        }
        out.flush()
    }
}
