use crate::components::{Dir, GhostColor, Pos, Section, Tile};

pub const GRID_SIZE: usize = 15;

pub const PLAYER_START: Pos = Pos::new(7, 7);
pub const PLAYER_START_DIR: Dir = Dir::Right;
pub const GHOST_START_DIR: Dir = Dir::Left;

pub const GHOST_STARTS: [(Pos, GhostColor); 4] = [
    (Pos::new(6, 6), GhostColor::Red),
    (Pos::new(8, 6), GhostColor::Pink),
    (Pos::new(6, 8), GhostColor::Cyan),
    (Pos::new(8, 8), GhostColor::Orange),
];

/// One power pellet per quadrant, in `Section::ALL` order.
pub const POWER_PELLETS: [(Section, Pos); 4] = [
    (Section::Skills, power_pellet(Section::Skills)),
    (Section::Experience, power_pellet(Section::Experience)),
    (Section::Projects, power_pellet(Section::Projects)),
    (Section::Contact, power_pellet(Section::Contact)),
];

const W: Tile = Tile::Wall;
const O: Tile = Tile::Path;

pub type Grid = [[Tile; GRID_SIZE]; GRID_SIZE];

/// Indexed `GRID[y][x]`.
pub static GRID: Grid = [
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W],
    [W, O, O, O, O, O, O, W, O, O, O, O, O, O, W],
    [W, O, W, O, W, W, O, W, O, W, W, O, W, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, W, O, W, O, W, W, W, O, W, O, W, O, W],
    [W, O, O, O, W, O, O, W, O, O, W, O, O, O, W],
    [W, W, W, O, W, W, O, W, O, W, W, O, W, W, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, W, W, O, W, W, O, W, O, W, W, O, W, W, W],
    [W, O, O, O, W, O, O, W, O, O, W, O, O, O, W],
    [W, O, W, O, W, O, W, W, W, O, W, O, W, O, W],
    [W, O, O, O, O, O, O, O, O, O, O, O, O, O, W],
    [W, O, W, O, W, W, O, W, O, W, W, O, W, O, W],
    [W, O, O, O, O, O, O, W, O, O, O, O, O, O, W],
    [W, W, W, W, W, W, W, W, W, W, W, W, W, W, W],
];

pub fn tile_at(pos: Pos) -> Option<Tile> {
    GRID.get(pos.y).and_then(|row| row.get(pos.x)).copied()
}

pub fn is_open(x: isize, y: isize) -> bool {
    if x < 0 || y < 0 {
        return false;
    }
    tile_at(Pos::new(x as usize, y as usize)) == Some(Tile::Path)
}

/// The cell one step from `pos` in `dir`, if that cell can be entered.
pub fn neighbor(pos: Pos, dir: Dir) -> Option<Pos> {
    let (dx, dy) = dir.delta();
    let nx = pos.x as isize + dx;
    let ny = pos.y as isize + dy;
    if is_open(nx, ny) {
        Some(Pos::new(nx as usize, ny as usize))
    } else {
        None
    }
}

pub fn valid_moves(pos: Pos) -> Vec<Dir> {
    Dir::ALL
        .into_iter()
        .filter(|&dir| neighbor(pos, dir).is_some())
        .collect()
}

pub const fn power_pellet(section: Section) -> Pos {
    match section {
        Section::Skills => Pos::new(1, 1),
        Section::Experience => Pos::new(13, 1),
        Section::Projects => Pos::new(1, 13),
        Section::Contact => Pos::new(13, 13),
    }
}

pub fn section_at(pos: Pos) -> Option<Section> {
    POWER_PELLETS
        .iter()
        .find(|(_, p)| *p == pos)
        .map(|(section, _)| *section)
}
