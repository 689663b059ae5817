//! The consumer loop.
//!
//! Terminal input and the ghost timer run on their own threads and only
//! post `Intent`s; `App::handle` applies them one at a time.

use std::io::{self, Stdout};
use std::iter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, info, warn};

use crate::components::Section;
use crate::config::Config;
use crate::contact::{ContactForm, FormAction};
use crate::cue::{play_best_effort, Cue, CueSink, Silent, TerminalBell};
use crate::error::{AppError, AppResult};
use crate::game::{Game, GameEvent, Snapshot};
use crate::ghost::{Dice, RngDice};
use crate::input::{self, SwipeTracker};
use crate::render::{self, Renderer};
use crate::visits;

const INPUT_POLL: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum Intent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    GhostTick,
    /// The terminal reader died; nothing else will arrive from it.
    InputFailed(io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the renderer needs for one frame.
pub struct View<'a> {
    pub snapshot: Snapshot,
    pub form: &'a ContactForm,
    pub visits: u64,
    pub toast: Option<&'a str>,
}

pub struct App<D, S> {
    game: Game,
    dice: D,
    cues: S,
    form: ContactForm,
    swipe: SwipeTracker,
    /// Chip under the last left press, if any.
    chip_press: Option<Section>,
    term_size: (u16, u16),
    visits: u64,
    toast: Option<String>,
}

impl<D: Dice, S: CueSink> App<D, S> {
    pub fn new(dice: D, cues: S, visits: u64) -> Self {
        App {
            game: Game::new(),
            dice,
            cues,
            form: ContactForm::default(),
            swipe: SwipeTracker::default(),
            chip_press: None,
            term_size: (0, 0),
            visits,
            toast: None,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn toast(&self) -> Option<&str> {
        self.toast.as_deref()
    }

    pub fn view(&self) -> View<'_> {
        View {
            snapshot: self.game.snapshot(),
            form: &self.form,
            visits: self.visits,
            toast: self.toast.as_deref(),
        }
    }

    pub fn handle(&mut self, intent: Intent) -> Flow {
        match intent {
            Intent::Key(key) => self.on_key(key),
            Intent::Mouse(mouse) => {
                self.on_mouse(mouse);
                Flow::Continue
            }
            Intent::Resize(width, height) => {
                self.term_size = (width, height);
                Flow::Continue
            }
            Intent::GhostTick => {
                let events = self.game.tick_ghosts(&mut self.dice);
                self.emit(&events);
                Flow::Continue
            }
            Intent::InputFailed(e) => {
                warn!("input reader stopped: {e}");
                Flow::Quit
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if input::is_interrupt(&key) {
            return Flow::Quit;
        }
        if key.kind == KeyEventKind::Release {
            return Flow::Continue;
        }

        if !self.game.is_playing() {
            match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.game.start(),
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
                _ => {}
            }
            return Flow::Continue;
        }

        if self.form_active() && self.form.has_focus() {
            self.on_form_key(key);
            return Flow::Continue;
        }

        let popup = self.game.is_completed() && self.game.current_section().is_none();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
            KeyCode::Esc => self.close_section(),
            KeyCode::Tab if self.form_active() => self.form.focus_first(),
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter if popup => {
                self.game.reset();
                self.toast = None;
            }
            KeyCode::Char(c) if Section::from_shortcut(c).is_some() => {
                if let Some(section) = Section::from_shortcut(c) {
                    self.game.open_section(section);
                }
            }
            code => {
                if let Some(dir) = input::key_to_dir(code) {
                    let events = self.game.move_player(dir);
                    self.emit(&events);
                }
            }
        }
        Flow::Continue
    }

    fn on_form_key(&mut self, key: KeyEvent) {
        match self.form.handle_key(key) {
            FormAction::Submitted(message) => {
                match serde_json::to_string(&message) {
                    Ok(json) => info!("contact form submitted: {json}"),
                    Err(e) => warn!("contact form submitted but could not be encoded: {e}"),
                }
                self.toast = Some("Message saved! There is no backend yet, so it went to the log.".into());
            }
            FormAction::Rejected(field) => {
                self.toast = Some(format!("{} needs a value", field.label()));
            }
            FormAction::Edited | FormAction::Blurred => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if !self.game.is_playing() || self.form.has_focus() {
            self.swipe.cancel();
            self.chip_press = None;
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.chip_press = self.chip_at(mouse.column, mouse.row);
                if self.chip_press.is_some() {
                    self.swipe.cancel();
                } else {
                    self.swipe.begin(mouse.column, mouse.row);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(section) = self.chip_press.take() {
                    if self.chip_at(mouse.column, mouse.row) == Some(section) {
                        self.game.open_section(section);
                    }
                } else if let Some(dir) = self.swipe.finish(mouse.column, mouse.row) {
                    let events = self.game.move_player(dir);
                    self.emit(&events);
                }
            }
            _ => {}
        }
    }

    /// HUD chips are only on screen while the maze is.
    fn chip_at(&self, column: u16, row: u16) -> Option<Section> {
        if self.game.is_completed() || self.game.current_section().is_some() {
            return None;
        }
        let (width, height) = self.term_size;
        render::chip_at(width, height, column, row)
    }

    fn form_active(&self) -> bool {
        self.game.current_section() == Some(Section::Contact)
    }

    fn close_section(&mut self) {
        self.form.blur();
        self.toast = None;
        self.game.close_section();
    }

    fn emit(&mut self, events: &[GameEvent]) {
        for event in events {
            if let GameEvent::GhostCaught { id } = event {
                debug!("ghost {id} removed after reaching the player");
            }
            play_best_effort(&mut self.cues, Cue::for_event(event));
        }
    }
}

/// Producer threads; stopped and joined when dropped.
struct Producers {
    stop: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl Producers {
    fn spawn(tx: Sender<Intent>, ghost_tick: Duration) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let input = {
            let stop = Arc::clone(&stop);
            let tx = tx.clone();
            thread::spawn(move || read_input(tx, stop))
        };
        let ticker = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || tick_ghosts(tx, stop, ghost_tick))
        };
        Producers {
            stop,
            handles: vec![input, ticker],
        }
    }
}

impl Drop for Producers {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

fn read_input(tx: Sender<Intent>, stop: Arc<AtomicBool>) {
    while !stop.load(Ordering::Relaxed) {
        match event::poll(INPUT_POLL) {
            Ok(false) => continue,
            Ok(true) => {}
            Err(e) => {
                let _ = tx.send(Intent::InputFailed(e));
                return;
            }
        }
        let intent = match event::read() {
            Ok(Event::Key(key)) => Intent::Key(key),
            Ok(Event::Mouse(mouse)) => Intent::Mouse(mouse),
            Ok(Event::Resize(width, height)) => Intent::Resize(width, height),
            Ok(_) => continue,
            Err(e) => Intent::InputFailed(e),
        };
        let failed = matches!(intent, Intent::InputFailed(_));
        if tx.send(intent).is_err() || failed {
            return;
        }
    }
}

fn tick_ghosts(tx: Sender<Intent>, stop: Arc<AtomicBool>, interval: Duration) {
    let mut next = Instant::now() + interval;
    while !stop.load(Ordering::Relaxed) {
        let now = Instant::now();
        if now >= next {
            if tx.send(Intent::GhostTick).is_err() {
                return;
            }
            next += interval;
        } else {
            thread::sleep((next - now).min(INPUT_POLL));
        }
    }
}

pub fn run(stdout: &mut Stdout, config: &Config) -> AppResult<()> {
    let visits = visits::record_visit(&config.visits_path).unwrap_or_else(|e| {
        warn!("{e}");
        visits::FIRST_VISIT
    });
    let cues: Box<dyn CueSink> = if config.sound {
        Box::new(TerminalBell::new(std::io::stdout()))
    } else {
        Box::new(Silent)
    };
    let mut app = App::new(RngDice(rand::thread_rng()), cues, visits);
    let (width, height) = crossterm::terminal::size()?;
    app.handle(Intent::Resize(width, height));
    info!("visit #{visits}, ghost tick {:?}", config.ghost_tick);

    let (tx, rx) = mpsc::channel();
    let producers = Producers::spawn(tx, config.ghost_tick);
    let result = consume(stdout, &mut app, &rx, config.frame_time());
    drop(producers);

    if let Ok(json) = serde_json::to_string(&app.game().snapshot()) {
        debug!("final state: {json}");
    }
    result
}

fn consume<D: Dice, S: CueSink>(
    stdout: &mut Stdout,
    app: &mut App<D, S>,
    rx: &Receiver<Intent>,
    frame_time: Duration,
) -> AppResult<()> {
    let mut renderer = Renderer::new();
    loop {
        renderer.render(stdout, &app.view())?;
        let first = match rx.recv_timeout(frame_time) {
            Ok(intent) => intent,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        };
        if drain(app, first, rx)? == Flow::Quit {
            return Ok(());
        }
    }
}

/// Applies `first` and everything already queued behind it.
fn drain<D: Dice, S: CueSink>(app: &mut App<D, S>, first: Intent, rx: &Receiver<Intent>) -> AppResult<Flow> {
    for intent in iter::once(first).chain(rx.try_iter()) {
        if let Intent::InputFailed(e) = intent {
            return Err(AppError::Io(e));
        }
        if app.handle(intent) == Flow::Quit {
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}
