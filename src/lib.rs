//! A Pac-Man style maze that doubles as a portfolio.
//!
//! The simulation (`game`, `player`, `ghost`, `level`) is pure state; the
//! terminal front-end in `app` and `render` only reads snapshots and posts
//! intents.

pub mod app;
pub mod components;
pub mod config;
pub mod contact;
pub mod cue;
pub mod error;
pub mod game;
pub mod ghost;
pub mod input;
pub mod level;
pub mod panels;
mod player;
pub mod render;
pub mod visits;

pub use components::{Dir, GhostColor, Pos, Section, Tile};
pub use error::{AppError, AppResult};
pub use game::{Game, GameEvent, Phase, Snapshot};
pub use ghost::{Dice, Ghost, RngDice};
