use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tile {
    Wall,
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Pos { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }
}

/// One of the four portfolio panels a power pellet unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Skills,
    Experience,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Skills,
        Section::Experience,
        Section::Projects,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }

    /// Number keys `1..=4` act as the shortcut buttons.
    pub fn from_shortcut(c: char) -> Option<Section> {
        match c {
            '1' => Some(Section::Skills),
            '2' => Some(Section::Experience),
            '3' => Some(Section::Projects),
            '4' => Some(Section::Contact),
            _ => None,
        }
    }

    pub fn shortcut(self) -> char {
        match self {
            Section::Skills => '1',
            Section::Experience => '2',
            Section::Projects => '3',
            Section::Contact => '4',
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GhostColor {
    Red,
    Pink,
    Cyan,
    Orange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pos_displays_as_pellet_key() {
        assert_eq!(Pos::new(3, 11).to_string(), "3,11");
    }

    #[test]
    fn shortcuts_round_trip_every_section() {
        for section in Section::ALL {
            assert_eq!(Section::from_shortcut(section.shortcut()), Some(section));
        }
        assert_eq!(Section::from_shortcut('5'), None);
    }
}
