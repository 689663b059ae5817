use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GHOST_TICK_MS: u64 = 500;
pub const DEFAULT_RENDER_FPS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ghost_tick: Duration,
    pub render_fps: u64,
    pub sound: bool,
    pub visits_path: PathBuf,
    pub log_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let positive = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|v| *v > 0)
        };
        let ghost_tick_ms = positive("MAZEFOLIO_GHOST_TICK_MS").unwrap_or(DEFAULT_GHOST_TICK_MS);
        let render_fps = positive("MAZEFOLIO_FPS").unwrap_or(DEFAULT_RENDER_FPS);
        let sound = lookup("MAZEFOLIO_SOUND")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "off" | "false" | "no"))
            .unwrap_or(true);
        let visits_path = lookup("MAZEFOLIO_VISITS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                lookup("HOME")
                    .map(PathBuf::from)
                    .unwrap_or_else(std::env::temp_dir)
                    .join(".mazefolio_visits.json")
            });
        let log_path = lookup("MAZEFOLIO_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("mazefolio.log"));

        Config {
            ghost_tick: Duration::from_millis(ghost_tick_ms),
            render_fps,
            sound,
            visits_path,
            log_path,
        }
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.render_fps.max(1))
    }
}
