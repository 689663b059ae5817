use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::process::ExitCode;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use env_logger::{Env, Target};

use mazefolio::config::Config;
use mazefolio::{app, AppError, AppResult};

fn main() -> ExitCode {
    let config = Config::from_env();
    if let Err(e) = init_logging(&config) {
        eprintln!("{e}; continuing without a log");
    }

    let mut stdout = io::stdout();
    let result = enter(&mut stdout).and_then(|()| app::run(&mut stdout, &config));
    let restored = leave(&mut stdout);

    match result.and(restored) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("mazefolio: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &Config) -> AppResult<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .map_err(|source| AppError::LogFile {
            path: config.log_path.clone(),
            source,
        })?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn enter(stdout: &mut Stdout) -> AppResult<()> {
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    stdout.execute(Hide)?;
    Ok(())
}

fn leave(stdout: &mut Stdout) -> AppResult<()> {
    stdout.execute(Show)?;
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    Ok(())
}
