use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::View;
use crate::components::{Dir, GhostColor, Pos, Section, Tile};
use crate::contact::{ContactForm, Field};
use crate::game::Snapshot;
use crate::level::GRID_SIZE;
use crate::panels;

const CELL_W: usize = 2;
const PAGE_W: usize = 64;
const MIN_W: u16 = PAGE_W as u16;
const MIN_H: u16 = 24;
/// HUD rows above the maze.
const HUD_ROWS: u16 = 2;

#[derive(Clone, Copy, PartialEq)]
enum Glyph {
    Player(Dir),
    Ghost,
    Wall,
    Empty,
    Pellet,
    Power,
}

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    glyph: Glyph,
    color: Color,
}

#[derive(Debug, Clone, PartialEq)]
struct Span {
    text: String,
    color: Color,
}

impl Span {
    fn new(text: impl Into<String>, color: Color) -> Self {
        Span {
            text: text.into(),
            color,
        }
    }
}

type Line = Vec<Span>;

fn plain(text: impl Into<String>, color: Color) -> Line {
    vec![Span::new(text, color)]
}

pub struct Renderer {
    last: Vec<Cell>,
    last_hud: Vec<Line>,
    last_page: Option<Vec<Line>>,
    needs_full: bool,
    origin_x: u16,
    origin_y: u16,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            last: vec![
                Cell {
                    glyph: Glyph::Empty,
                    color: Color::Reset,
                };
                GRID_SIZE * GRID_SIZE
            ],
            last_hud: Vec::new(),
            last_page: None,
            needs_full: true,
            origin_x: 0,
            origin_y: HUD_ROWS,
        }
    }

    pub fn render(&mut self, out: &mut impl Write, view: &View<'_>) -> io::Result<()> {
        let (term_w, term_h) = terminal::size()?;
        if term_w < MIN_W || term_h < MIN_H {
            out.queue(Clear(ClearType::All))?;
            out.queue(MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small. Need at least {}x{} (cols x rows). Current: {}x{}.",
                MIN_W, MIN_H, term_w, term_h
            );
            out.queue(Print(msg))?;
            out.flush()?;
            self.needs_full = true;
            self.last_page = None;
            return Ok(());
        }

        match page_for(view) {
            Some(page) => self.render_page(out, page, term_w, term_h),
            None => self.render_board(out, view, term_w, term_h),
        }
    }

    fn render_page(&mut self, out: &mut impl Write, page: Vec<Line>, term_w: u16, term_h: u16) -> io::Result<()> {
        if !self.needs_full && self.last_page.as_ref() == Some(&page) {
            return Ok(());
        }
        out.queue(Clear(ClearType::All))?;
        let left = (term_w - MIN_W) / 2;
        let top = term_h.saturating_sub(page.len() as u16) / 2;
        for (row, line) in page.iter().take(term_h as usize).enumerate() {
            out.queue(MoveTo(left, top + row as u16))?;
            draw_line(out, line)?;
        }
        out.flush()?;
        self.last_page = Some(page);
        self.needs_full = false;
        Ok(())
    }

    fn render_board(&mut self, out: &mut impl Write, view: &View<'_>, term_w: u16, term_h: u16) -> io::Result<()> {
        if self.last_page.take().is_some() {
            self.needs_full = true;
        }
        let (origin_x, origin_y) = board_origin(term_w, term_h);
        if origin_x != self.origin_x || origin_y != self.origin_y {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.needs_full = true;
        }
        if self.needs_full {
            out.queue(Clear(ClearType::All))?;
        }

        let hud = hud_lines(view);
        if self.needs_full || hud != self.last_hud {
            let left = (term_w - MIN_W) / 2;
            let rows = [origin_y - HUD_ROWS, origin_y - 1, origin_y + GRID_SIZE as u16];
            for (line, row) in hud.iter().zip(rows) {
                out.queue(MoveTo(left, row))?;
                out.queue(Clear(ClearType::CurrentLine))?;
                draw_line(out, line)?;
            }
            self.last_hud = hud;
        }

        let snapshot = &view.snapshot;
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let cell = cell_for(snapshot, Pos::new(x, y));
                let idx = y * GRID_SIZE + x;
                if self.needs_full || cell != self.last[idx] {
                    self.last[idx] = cell;
                    self.draw_cell(out, x, y, cell)?;
                }
            }
        }
        self.needs_full = false;

        out.flush()
    }

    fn draw_cell(&self, out: &mut impl Write, x: usize, y: usize, cell: Cell) -> io::Result<()> {
        let text = match cell.glyph {
            Glyph::Player(Dir::Right) => "ᗧ",
            Glyph::Player(Dir::Left) => "ᗤ",
            Glyph::Player(Dir::Up) => "ᗢ",
            Glyph::Player(Dir::Down) => "ᗣ",
            Glyph::Ghost => "👻",
            Glyph::Wall => "██",
            Glyph::Empty => "  ",
            Glyph::Pellet => "· ",
            Glyph::Power => "● ",
        };
        let x_pos = self.origin_x + (x * CELL_W) as u16;
        let y_pos = self.origin_y + y as u16;
        out.queue(MoveTo(x_pos, y_pos))?;
        out.queue(SetForegroundColor(cell.color))?;
        out.queue(Print(text))?;
        let w = UnicodeWidthStr::width(text);
        if w < CELL_W {
            for _ in 0..(CELL_W - w) {
                out.queue(Print(' '))?;
            }
        }
        out.queue(ResetColor)?;
        Ok(())
    }
}

/// Top-left of the maze for a terminal at least `MIN_W` x `MIN_H`.
fn board_origin(term_w: u16, term_h: u16) -> (u16, u16) {
    let needed_w = (GRID_SIZE * CELL_W) as u16;
    let needed_h = GRID_SIZE as u16 + HUD_ROWS + 1;
    ((term_w - needed_w) / 2, (term_h - needed_h) / 2 + HUD_ROWS)
}

/// The HUD section chip drawn at (`column`, `row`) on the maze screen.
pub fn chip_at(term_w: u16, term_h: u16, column: u16, row: u16) -> Option<Section> {
    if term_w < MIN_W || term_h < MIN_H {
        return None;
    }
    let (_, origin_y) = board_origin(term_w, term_h);
    if row != origin_y - 1 {
        return None;
    }
    let mut left = (term_w - MIN_W) / 2;
    for section in Section::ALL {
        let width = chip_label(section, false).width() as u16;
        // the trailing space separates chips
        if (left..left + width - 1).contains(&column) {
            return Some(section);
        }
        left += width;
    }
    None
}

fn chip_label(section: Section, unlocked: bool) -> String {
    let mark = if unlocked { "✓" } else { " " };
    format!("[{} {}{}] ", section.shortcut(), section.label(), mark)
}

fn draw_line(out: &mut impl Write, line: &Line) -> io::Result<()> {
    for span in line {
        out.queue(SetForegroundColor(span.color))?;
        out.queue(Print(&span.text))?;
    }
    out.queue(ResetColor)?;
    Ok(())
}

fn cell_for(snapshot: &Snapshot, pos: Pos) -> Cell {
    if pos == snapshot.player {
        return Cell {
            glyph: Glyph::Player(snapshot.direction),
            color: Color::Yellow,
        };
    }
    if let Some(ghost) = snapshot.ghosts.iter().find(|g| g.pos == pos) {
        return Cell {
            glyph: Glyph::Ghost,
            color: ghost_color(ghost.color),
        };
    }
    if snapshot.maze[pos.y][pos.x] == Tile::Wall {
        return Cell {
            glyph: Glyph::Wall,
            color: Color::Blue,
        };
    }
    if snapshot.power_pellet_at(pos).is_some() {
        return Cell {
            glyph: Glyph::Power,
            color: Color::Magenta,
        };
    }
    if snapshot.is_collected(pos) {
        Cell {
            glyph: Glyph::Empty,
            color: Color::Reset,
        }
    } else {
        Cell {
            glyph: Glyph::Pellet,
            color: Color::White,
        }
    }
}

fn ghost_color(color: GhostColor) -> Color {
    match color {
        GhostColor::Red => Color::Red,
        GhostColor::Pink => Color::Magenta,
        GhostColor::Cyan => Color::Cyan,
        GhostColor::Orange => Color::DarkYellow,
    }
}

fn section_color(section: Section) -> Color {
    match section {
        Section::Skills => Color::Yellow,
        Section::Experience => Color::Magenta,
        Section::Projects => Color::Cyan,
        Section::Contact => Color::DarkYellow,
    }
}

/// Score line, section chips, then the line under the maze.
fn hud_lines(view: &View<'_>) -> Vec<Line> {
    let snapshot = &view.snapshot;
    let score = vec![
        Span::new("SCORE: ", Color::Yellow),
        Span::new(group_thousands(u64::from(snapshot.score)), Color::White),
        Span::new(
            format!("   {}/4 Sections", snapshot.unlocked.len()),
            Color::DarkGrey,
        ),
    ];
    let chips = Section::ALL
        .iter()
        .map(|&section| {
            let unlocked = snapshot.is_unlocked(section);
            let color = if unlocked { section_color(section) } else { Color::DarkGrey };
            Span::new(chip_label(section, unlocked), color)
        })
        .collect();
    let footer = match view.toast {
        Some(toast) => plain(toast, Color::Green),
        None => plain(
            "arrows/WASD move  drag to swipe  1-4 panels  q quit",
            Color::DarkGrey,
        ),
    };
    vec![score, chips, footer]
}

fn page_for(view: &View<'_>) -> Option<Vec<Line>> {
    let snapshot = &view.snapshot;
    if !snapshot.is_playing {
        return Some(start_page(view.visits));
    }
    if let Some(section) = snapshot.current_section {
        return Some(panel_page(section, view.form, view.toast));
    }
    if snapshot.is_completed {
        return Some(completion_page(snapshot.score));
    }
    None
}

fn start_page(visits: u64) -> Vec<Line> {
    vec![
        plain("· · · ᗧ", Color::Yellow),
        Vec::new(),
        plain("M A Z E F O L I O", Color::Yellow),
        plain("Full Stack Developer / DevOps Engineer", Color::Grey),
        Vec::new(),
        plain(
            "Navigate the maze and collect power pellets to unlock",
            Color::Blue,
        ),
        plain("the portfolio sections!", Color::Blue),
        Vec::new(),
        plain("PRESS ENTER TO START", Color::Yellow),
        Vec::new(),
        plain("Arrow keys / WASD to move", Color::DarkGrey),
        plain("Drag with the mouse to swipe", Color::DarkGrey),
        plain("Eat ghosts for bonus points!", Color::DarkGrey),
        Vec::new(),
        vec![
            Span::new("👻 ", Color::Red),
            Span::new("👻 ", Color::Magenta),
            Span::new("👻 ", Color::Cyan),
            Span::new("👻", Color::DarkYellow),
        ],
        Vec::new(),
        plain(format!("{} visitors", group_thousands(visits)), Color::DarkGrey),
    ]
}

fn panel_page(section: Section, form: &ContactForm, toast: Option<&str>) -> Vec<Line> {
    let panel = panels::panel(section);
    let color = section_color(section);
    let mut lines = vec![
        plain(panel.title, color),
        plain("─".repeat(PAGE_W), color),
    ];
    for entry in panel.entries {
        lines.push(plain(entry.heading, Color::White));
        for row in wrap(entry.detail, PAGE_W - 2) {
            lines.push(plain(format!("  {row}"), Color::Grey));
        }
        if !entry.tags.is_empty() {
            for row in wrap(&entry.tags.join(" · "), PAGE_W - 2) {
                lines.push(plain(format!("  {row}"), color));
            }
        }
        lines.push(Vec::new());
    }
    if section == Section::Contact {
        lines.extend(form_lines(form));
        if let Some(toast) = toast {
            lines.push(plain(toast, Color::Green));
        }
        lines.push(Vec::new());
    }
    lines.push(plain("Esc close  1-4 switch panels", Color::DarkGrey));
    lines
}

fn form_lines(form: &ContactForm) -> Vec<Line> {
    let draft = form.draft();
    Field::ALL
        .iter()
        .map(|&field| {
            let focused = form.focus() == Some(field);
            let marker = if focused { "> " } else { "  " };
            let value = if field.is_text() {
                let cursor = if focused { "_" } else { "" };
                format!("{}{}", draft.text(field), cursor)
            } else if draft.collaboration {
                "[x]".to_string()
            } else {
                "[ ]".to_string()
            };
            let color = if focused { Color::White } else { Color::Grey };
            vec![
                Span::new(format!("{marker}{:<22}", field.label()), Color::DarkYellow),
                Span::new(truncate(&value, PAGE_W - 24), color),
            ]
        })
        .collect()
}

fn completion_page(score: u32) -> Vec<Line> {
    let mut lines = vec![
        plain("🎉 GAME COMPLETE! 🎉", Color::Yellow),
        Vec::new(),
        plain("Final Score", Color::DarkGrey),
        plain(group_thousands(u64::from(score)), Color::Yellow),
        Vec::new(),
    ];
    lines.push(plain(panels::GREETING, Color::Yellow));
    for paragraph in panels::THANK_YOU {
        lines.push(Vec::new());
        lines.extend(wrap(paragraph, PAGE_W).into_iter().map(|row| plain(row, Color::Grey)));
    }
    lines.push(Vec::new());
    lines.push(plain(panels::LINKS.join("  ·  "), Color::Cyan));
    lines.push(Vec::new());
    lines.push(plain("1-4 reopen a panel", Color::DarkGrey));
    lines.push(plain("R play again  Q quit", Color::DarkGrey));
    lines
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();
    for word in text.split_whitespace() {
        let needed = if row.is_empty() { word.width() } else { row.width() + 1 + word.width() };
        if needed > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(word);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Keeps the tail of `text`, so the cursor stays visible while typing.
fn truncate(text: &str, width: usize) -> String {
    let mut kept: Vec<char> = Vec::new();
    let mut used = 0;
    for c in text.chars().rev() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        kept.push(c);
    }
    kept.into_iter().rev().collect()
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    #[test]
    fn cells_reflect_snapshot() {
        let mut game = Game::new();
        game.start();
        game.move_player(Dir::Left);
        let snapshot = game.snapshot();
        assert!(cell_for(&snapshot, Pos::new(6, 7)).glyph == Glyph::Player(Dir::Left));
        assert!(cell_for(&snapshot, Pos::new(7, 7)).glyph == Glyph::Pellet);
        assert!(cell_for(&snapshot, Pos::new(0, 0)).glyph == Glyph::Wall);
        assert!(cell_for(&snapshot, Pos::new(1, 1)).glyph == Glyph::Power);
        assert!(cell_for(&snapshot, Pos::new(6, 6)).glyph == Glyph::Ghost);
    }

    #[test]
    fn visited_cells_and_unlocked_pellets_go_blank() {
        let mut game = Game::new();
        game.start();
        game.move_player(Dir::Left);
        game.move_player(Dir::Right);
        game.unlocked.insert(Section::Skills);
        let snapshot = game.snapshot();
        assert!(cell_for(&snapshot, Pos::new(6, 7)).glyph == Glyph::Empty);
        assert!(cell_for(&snapshot, Pos::new(1, 1)).glyph == Glyph::Pellet);
    }

    #[test]
    fn wrap_respects_width() {
        let rows = wrap("one two three four five", 9);
        assert_eq!(rows, vec!["one two", "three", "four five"]);
        assert!(wrap("", 10).is_empty());
    }

    #[test]
    fn truncate_keeps_the_tail() {
        assert_eq!(truncate("hello world", 5), "world");
        assert_eq!(truncate("hi", 5), "hi");
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(1247), "1,247");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn pages_follow_session_state() {
        let form = ContactForm::default();
        let mut game = Game::new();
        let page = |game: &Game| {
            page_for(&View {
                snapshot: game.snapshot(),
                form: &form,
                visits: 1247,
                toast: None,
            })
        };
        let start = page(&game).unwrap();
        assert!(start.iter().flatten().any(|s| s.text == "1,247 visitors"));

        game.start();
        assert!(page(&game).is_none());

        game.open_section(Section::Contact);
        let contact = page(&game).unwrap();
        assert!(contact.iter().flatten().any(|s| s.text.contains("Regarding")));

        game.close_section();
        game.phase = crate::game::Phase::Completed;
        let done = page(&game).unwrap();
        assert!(done[0][0].text.contains("GAME COMPLETE"));
    }

    #[test]
    fn completion_page_carries_the_thank_you_note() {
        let page = completion_page(12_340);
        let text: Vec<&str> = page.iter().flatten().map(|s| s.text.as_str()).collect();
        assert!(text.contains(&"12,340"));
        assert!(text.iter().any(|t| t.contains("Thanks for playing through my portfolio")));
        assert!(text.iter().any(|t| t.contains("contact@saimanish.dev")));
        assert!(page.len() <= MIN_H as usize);
        for line in &page {
            let width: usize = line.iter().map(|s| s.text.width()).sum();
            assert!(width <= PAGE_W, "{width} wide");
        }
    }

    #[test]
    fn chips_are_found_where_the_hud_draws_them() {
        // 80x24: maze origin row 5, HUD block starts at column 8
        assert_eq!(board_origin(80, 24), (25, 5));
        assert_eq!(chip_at(80, 24, 8, 4), Some(Section::Skills));
        assert_eq!(chip_at(80, 24, 18, 4), Some(Section::Skills));
        assert_eq!(chip_at(80, 24, 19, 4), None);
        assert_eq!(chip_at(80, 24, 20, 4), Some(Section::Experience));
        assert_eq!(chip_at(80, 24, 8, 5), None);
        assert_eq!(chip_at(80, 24, 7, 4), None);
        assert_eq!(chip_at(40, 20, 8, 4), None);
    }

    #[test]
    fn unlocked_chip_keeps_its_width() {
        for section in Section::ALL {
            assert_eq!(chip_label(section, true).width(), chip_label(section, false).width());
        }
    }
}
