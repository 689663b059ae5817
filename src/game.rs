//! Session state and lifecycle.
//!
//! `Game` is the single owner of everything the maze simulation mutates.
//! Movement lives in `player.rs`, ghost motion in `ghost.rs`; both are
//! further `impl Game` blocks over the same state.

use std::collections::{BTreeSet, HashSet};

use log::info;
use serde::Serialize;

use crate::components::{Dir, Pos, Section};
use crate::ghost::Ghost;
use crate::level::{self, Grid, GRID, PLAYER_START, PLAYER_START_DIR, POWER_PELLETS};

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 100;
pub const GHOST_SCORE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    Active,
    Completed,
}

/// Something that happened during a move or a ghost tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Pellet,
    SectionUnlocked(Section),
    /// Player walked into a ghost.
    GhostEaten { id: u8 },
    /// A ghost walked into the player.
    GhostCaught { id: u8 },
    Completed,
}

#[derive(Debug, Clone)]
pub struct Game {
    pub(crate) player: Pos,
    pub(crate) dir: Dir,
    pub(crate) score: u32,
    pub(crate) pellets: HashSet<Pos>,
    pub(crate) unlocked: BTreeSet<Section>,
    pub(crate) ghosts: Vec<Ghost>,
    pub(crate) ghosts_eaten: u32,
    pub(crate) phase: Phase,
    pub(crate) current_section: Option<Section>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Game {
            player: PLAYER_START,
            dir: PLAYER_START_DIR,
            score: 0,
            pellets: HashSet::new(),
            unlocked: BTreeSet::new(),
            ghosts: Ghost::roster(),
            ghosts_eaten: 0,
            phase: Phase::NotStarted,
            current_section: None,
        }
    }

    pub fn start(&mut self) {
        if self.phase == Phase::NotStarted {
            self.phase = Phase::Active;
            info!("session started");
        }
    }

    /// Back to the initial values; the caller decides when to `start` again.
    pub fn reset(&mut self) {
        info!("session reset at score {}", self.score);
        *self = Game::new();
    }

    pub fn open_section(&mut self, section: Section) {
        self.current_section = Some(section);
    }

    pub fn close_section(&mut self) {
        self.current_section = None;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase != Phase::NotStarted
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    pub fn player(&self) -> Pos {
        self.player
    }

    pub fn direction(&self) -> Dir {
        self.dir
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn pellets(&self) -> &HashSet<Pos> {
        &self.pellets
    }

    pub fn unlocked(&self) -> &BTreeSet<Section> {
        &self.unlocked
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghosts_eaten(&self) -> u32 {
        self.ghosts_eaten
    }

    pub fn current_section(&self) -> Option<Section> {
        self.current_section
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut pellets: Vec<Pos> = self.pellets.iter().copied().collect();
        pellets.sort();
        Snapshot {
            player: self.player,
            direction: self.dir,
            score: self.score,
            pellets,
            unlocked: self.unlocked.iter().copied().collect(),
            ghosts: self.ghosts.clone(),
            ghosts_eaten: self.ghosts_eaten,
            is_playing: self.is_playing(),
            is_completed: self.is_completed(),
            current_section: self.current_section,
            maze: &GRID,
            power_pellets: POWER_PELLETS,
        }
    }

    /// Removes every live ghost standing on `pos`, scoring each one.
    pub(crate) fn take_ghosts_at(&mut self, pos: Pos) -> Vec<u8> {
        let mut taken = Vec::new();
        self.ghosts.retain(|ghost| {
            if ghost.pos == pos {
                taken.push(ghost.id);
                false
            } else {
                true
            }
        });
        for _ in &taken {
            self.score += GHOST_SCORE;
            self.ghosts_eaten += 1;
        }
        taken
    }
}

/// What the presentation layer sees. Owned, so it can outlive the borrow.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub player: Pos,
    pub direction: Dir,
    pub score: u32,
    pub pellets: Vec<Pos>,
    pub unlocked: Vec<Section>,
    pub ghosts: Vec<Ghost>,
    pub ghosts_eaten: u32,
    pub is_playing: bool,
    pub is_completed: bool,
    pub current_section: Option<Section>,
    #[serde(skip)]
    pub maze: &'static Grid,
    pub power_pellets: [(Section, Pos); 4],
}

impl Snapshot {
    pub fn is_collected(&self, pos: Pos) -> bool {
        self.pellets.binary_search(&pos).is_ok()
    }

    pub fn is_unlocked(&self, section: Section) -> bool {
        self.unlocked.contains(&section)
    }

    /// A power pellet is still drawn while its section is locked.
    pub fn power_pellet_at(&self, pos: Pos) -> Option<Section> {
        level::section_at(pos).filter(|section| !self.is_unlocked(*section))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_waits_at_center() {
        let game = Game::new();
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.player(), PLAYER_START);
        assert_eq!(game.direction(), Dir::Right);
        assert_eq!(game.ghosts().len(), 4);
        assert_eq!(game.score(), 0);
        assert!(!game.is_playing());
    }

    #[test]
    fn start_only_leaves_not_started() {
        let mut game = Game::new();
        game.start();
        assert_eq!(game.phase(), Phase::Active);
        game.phase = Phase::Completed;
        game.start();
        assert_eq!(game.phase(), Phase::Completed);
    }

    #[test]
    fn sections_open_and_close_without_touching_phase() {
        let mut game = Game::new();
        game.start();
        game.open_section(Section::Projects);
        assert_eq!(game.current_section(), Some(Section::Projects));
        assert!(game.unlocked().is_empty());
        game.close_section();
        assert_eq!(game.current_section(), None);
        assert_eq!(game.phase(), Phase::Active);
    }

    #[test]
    fn completed_session_still_accepts_panel_shortcuts() {
        let mut game = Game::new();
        game.phase = Phase::Completed;
        game.open_section(Section::Contact);
        assert_eq!(game.current_section(), Some(Section::Contact));
    }

    #[test]
    fn reset_restores_initial_values() {
        let mut game = Game::new();
        game.start();
        game.score = 540;
        game.pellets.insert(Pos::new(6, 7));
        game.unlocked.insert(Section::Skills);
        game.ghosts.pop();
        game.current_section = Some(Section::Skills);
        game.reset();
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.score(), 0);
        assert!(game.pellets().is_empty());
        assert!(game.unlocked().is_empty());
        assert_eq!(game.ghosts().len(), 4);
        assert_eq!(game.current_section(), None);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut game = Game::new();
        game.start();
        let json = serde_json::to_value(game.snapshot()).unwrap();
        assert_eq!(json["direction"], "right");
        assert_eq!(json["is_playing"], true);
        assert_eq!(json["ghosts"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn taking_ghosts_scores_each_one() {
        let mut game = Game::new();
        let spot = game.ghosts[0].pos;
        game.ghosts[1].pos = spot;
        let taken = game.take_ghosts_at(spot);
        assert_eq!(taken, vec![0, 1]);
        assert_eq!(game.score(), 2 * GHOST_SCORE);
        assert_eq!(game.ghosts_eaten(), 2);
        assert_eq!(game.ghosts().len(), 2);
    }
}
