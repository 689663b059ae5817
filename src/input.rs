//! Turning raw terminal input into movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::components::Dir;

/// Shortest drag, in pixels along the dominant axis, that counts as a swipe.
pub const SWIPE_MIN_PX: i32 = 30;
/// Approximate pixel size of one terminal cell.
pub const CELL_PX_W: i32 = 8;
pub const CELL_PX_H: i32 = 16;

/// Arrow keys and WASD, either case.
pub fn key_to_dir(code: KeyCode) -> Option<Dir> {
    match code {
        KeyCode::Up => Some(Dir::Up),
        KeyCode::Down => Some(Dir::Down),
        KeyCode::Left => Some(Dir::Left),
        KeyCode::Right => Some(Dir::Right),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(Dir::Up),
            's' => Some(Dir::Down),
            'a' => Some(Dir::Left),
            'd' => Some(Dir::Right),
            _ => None,
        },
        _ => None,
    }
}

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}

/// Classifies a drag by its dominant axis. Ties go vertical.
pub fn swipe_dir(dx: i32, dy: i32) -> Option<Dir> {
    if dx.abs() > dy.abs() {
        if dx.abs() < SWIPE_MIN_PX {
            None
        } else if dx > 0 {
            Some(Dir::Right)
        } else {
            Some(Dir::Left)
        }
    } else if dy.abs() < SWIPE_MIN_PX {
        None
    } else if dy > 0 {
        Some(Dir::Down)
    } else {
        Some(Dir::Up)
    }
}

/// Tracks a mouse press until its release.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(i32, i32)>,
}

impl SwipeTracker {
    pub fn begin(&mut self, column: u16, row: u16) {
        self.origin = Some(to_px(column, row));
    }

    pub fn cancel(&mut self) {
        self.origin = None;
    }

    pub fn finish(&mut self, column: u16, row: u16) -> Option<Dir> {
        let (x0, y0) = self.origin.take()?;
        let (x1, y1) = to_px(column, row);
        swipe_dir(x1 - x0, y1 - y0)
    }
}

fn to_px(column: u16, row: u16) -> (i32, i32) {
    (i32::from(column) * CELL_PX_W, i32::from(row) * CELL_PX_H)
}
