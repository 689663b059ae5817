use log::{debug, info};

use crate::components::{Dir, Section};
use crate::game::{Game, GameEvent, Phase, PELLET_SCORE, POWER_PELLET_SCORE};
use crate::level;

impl Game {
    /// Moves the player one cell, applying pickups and ghost collisions.
    ///
    /// Walls and the maze edge turn the player without moving it. Outside
    /// an active session the call changes nothing.
    pub fn move_player(&mut self, dir: Dir) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Active {
            return events;
        }

        self.dir = dir;
        let Some(next) = level::neighbor(self.player, dir) else {
            return events;
        };
        self.player = next;

        if self.pellets.insert(next) {
            self.score += PELLET_SCORE;
            events.push(GameEvent::Pellet);
        }

        if let Some(section) = level::section_at(next) {
            if self.unlocked.insert(section) {
                self.score += POWER_PELLET_SCORE;
                self.current_section = Some(section);
                info!("unlocked {section} ({}/4)", self.unlocked.len());
                events.push(GameEvent::SectionUnlocked(section));
            }
        }

        for id in self.take_ghosts_at(next) {
            debug!("player ate ghost {id} at {next}");
            events.push(GameEvent::GhostEaten { id });
        }

        if self.unlocked.len() == Section::ALL.len() {
            self.phase = Phase::Completed;
            info!("all sections unlocked, final score {}", self.score);
            events.push(GameEvent::Completed);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Pos;
    use crate::game::GHOST_SCORE;
    use crate::level::{power_pellet, PLAYER_START};

    fn active() -> Game {
        let mut game = Game::new();
        game.start();
        game
    }

    #[test]
    fn ignored_before_start() {
        let mut game = Game::new();
        assert!(game.move_player(Dir::Left).is_empty());
        assert_eq!(game.player(), PLAYER_START);
        assert_eq!(game.direction(), Dir::Right);
    }

    #[test]
    fn three_steps_left_collect_three_pellets() {
        let mut game = active();
        for _ in 0..3 {
            game.move_player(Dir::Left);
        }
        assert_eq!(game.player(), Pos::new(4, 7));
        assert_eq!(game.score(), 30);
        assert_eq!(game.pellets().len(), 3);
    }

    #[test]
    fn wall_turns_without_moving() {
        let mut game = active();
        let events = game.move_player(Dir::Up);
        assert!(events.is_empty());
        assert_eq!(game.player(), PLAYER_START);
        assert_eq!(game.direction(), Dir::Up);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn revisiting_a_cell_scores_nothing() {
        let mut game = active();
        game.move_player(Dir::Left);
        game.move_player(Dir::Right);
        game.move_player(Dir::Left);
        // (6,7) twice and (7,7) once
        assert_eq!(game.score(), 20);
        assert_eq!(game.pellets().len(), 2);
    }

    #[test]
    fn power_pellet_unlocks_its_section_once() {
        let mut game = active();
        game.player = Pos::new(2, 1);
        let events = game.move_player(Dir::Left);
        assert_eq!(game.player(), power_pellet(Section::Skills));
        assert_eq!(
            events,
            vec![GameEvent::Pellet, GameEvent::SectionUnlocked(Section::Skills)]
        );
        assert_eq!(game.score(), PELLET_SCORE + POWER_PELLET_SCORE);
        assert_eq!(game.current_section(), Some(Section::Skills));

        game.close_section();
        game.move_player(Dir::Right);
        game.move_player(Dir::Left);
        assert_eq!(game.current_section(), None);
        assert_eq!(game.unlocked().len(), 1);
    }

    #[test]
    fn walking_into_a_ghost_eats_it() {
        let mut game = active();
        game.ghosts[2].pos = Pos::new(6, 7);
        let events = game.move_player(Dir::Left);
        assert!(events.contains(&GameEvent::GhostEaten { id: 2 }));
        assert_eq!(game.ghosts().len(), 3);
        assert_eq!(game.score(), PELLET_SCORE + GHOST_SCORE);
        assert_eq!(game.ghosts_eaten(), 1);
        assert!(game.ghosts().iter().all(|g| g.id != 2));
    }

    #[test]
    fn fourth_unlock_completes_and_freezes() {
        let mut game = active();
        game.unlocked.extend([Section::Skills, Section::Experience, Section::Projects]);
        game.player = Pos::new(12, 13);
        let events = game.move_player(Dir::Right);
        assert_eq!(events.last(), Some(&GameEvent::Completed));
        assert!(game.is_completed());

        let before = game.snapshot();
        assert!(game.move_player(Dir::Left).is_empty());
        assert_eq!(game.player(), before.player);
        assert_eq!(game.score(), before.score);
        assert_eq!(game.direction(), before.direction);
    }

    #[test]
    fn not_completed_before_fourth_unlock() {
        let mut game = active();
        game.unlocked.extend([Section::Skills, Section::Experience]);
        game.player = Pos::new(12, 13);
        game.move_player(Dir::Right);
        assert_eq!(game.unlocked().len(), 3);
        assert!(!game.is_completed());
    }
}
