use log::debug;
use rand::Rng;
use serde::Serialize;

use crate::components::{Dir, GhostColor, Pos};
use crate::game::{Game, GameEvent, Phase};
use crate::level::{self, GHOST_STARTS, GHOST_START_DIR};

/// Chance that a ghost restricts itself to directions closing in on the player.
pub const CHASE_BIAS: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ghost {
    pub id: u8,
    pub pos: Pos,
    pub dir: Dir,
    pub color: GhostColor,
}

impl Ghost {
    pub fn roster() -> Vec<Ghost> {
        GHOST_STARTS
            .iter()
            .zip(0u8..)
            .map(|(&(pos, color), id)| Ghost {
                id,
                pos,
                dir: GHOST_START_DIR,
                color,
            })
            .collect()
    }
}

/// Source of the ghosts' random decisions.
pub trait Dice {
    /// Whether this ghost chases on this tick.
    fn chase(&mut self) -> bool;
    /// Uniform index in `0..len`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

pub struct RngDice<R>(pub R);

impl<R: Rng> Dice for RngDice<R> {
    fn chase(&mut self) -> bool {
        self.0.gen_bool(CHASE_BIAS)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// Directions that would shrink the distance to `target` on either axis.
pub fn preferred_dirs(from: Pos, target: Pos) -> Vec<Dir> {
    let mut dirs = Vec::with_capacity(2);
    if target.x > from.x {
        dirs.push(Dir::Right);
    } else if target.x < from.x {
        dirs.push(Dir::Left);
    }
    if target.y > from.y {
        dirs.push(Dir::Down);
    } else if target.y < from.y {
        dirs.push(Dir::Up);
    }
    dirs
}

pub fn next_dir(from: Pos, target: Pos, dice: &mut impl Dice) -> Option<Dir> {
    let valid = level::valid_moves(from);
    if valid.is_empty() {
        return None;
    }
    let chasing: Vec<Dir> = preferred_dirs(from, target)
        .into_iter()
        .filter(|dir| valid.contains(dir))
        .collect();
    if !chasing.is_empty() && dice.chase() {
        Some(chasing[dice.pick(chasing.len())])
    } else {
        Some(valid[dice.pick(valid.len())])
    }
}

impl Game {
    /// One step for every live ghost, then ghost-on-player collisions.
    pub fn tick_ghosts(&mut self, dice: &mut impl Dice) -> Vec<GameEvent> {
        if self.phase != Phase::Active {
            return Vec::new();
        }
        let target = self.player;
        for ghost in self.ghosts.iter_mut() {
            if let Some(dir) = next_dir(ghost.pos, target, dice) {
                if let Some(next) = level::neighbor(ghost.pos, dir) {
                    ghost.pos = next;
                    ghost.dir = dir;
                }
            }
        }

        self.take_ghosts_at(target)
            .into_iter()
            .map(|id| {
                debug!("ghost {id} caught the player at {target}");
                GameEvent::GhostCaught { id }
            })
            .collect()
    }
}
