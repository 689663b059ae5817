use std::io::{self, Write};

use crate::game::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Pellet,
    PowerPellet,
    GhostEaten,
    Completion,
}

impl Cue {
    pub fn for_event(event: &GameEvent) -> Cue {
        match event {
            GameEvent::Pellet => Cue::Pellet,
            GameEvent::SectionUnlocked(_) => Cue::PowerPellet,
            GameEvent::GhostEaten { .. } | GameEvent::GhostCaught { .. } => Cue::GhostEaten,
            GameEvent::Completed => Cue::Completion,
        }
    }

    /// How many bells a terminal rings for this cue.
    fn bells(self) -> usize {
        match self {
            Cue::Pellet | Cue::PowerPellet => 1,
            Cue::GhostEaten => 2,
            Cue::Completion => 3,
        }
    }
}

pub trait CueSink {
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        (**self).play(cue)
    }
}

/// Plays a cue and forgets about it; a missing or broken sink is not an error.
pub fn play_best_effort(sink: &mut impl CueSink, cue: Cue) {
    let _ = sink.play(cue);
}

pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        for _ in 0..cue.bells() {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}
