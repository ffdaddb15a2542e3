use nusantara_core::Difficulty;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Persistent player statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub games_played: usize,
    pub games_won: usize,
    /// Best winning time in seconds, keyed by difficulty key ("jawa" ..).
    #[serde(default)]
    pub best_times: HashMap<String, u64>,
}

impl PlayerStats {
    pub fn win_rate(&self) -> f32 {
        if self.games_played > 0 {
            self.games_won as f32 / self.games_played as f32 * 100.0
        } else {
            0.0
        }
    }

    pub fn best_time(&self, difficulty: Difficulty) -> Option<u64> {
        self.best_times.get(difficulty.key()).copied()
    }
}

/// Loads and saves [`PlayerStats`] as JSON. Persistence failures degrade to
/// in-memory stats; the game never refuses to run over them.
pub struct StatsManager {
    pub stats: PlayerStats,
    path: PathBuf,
}

impl StatsManager {
    /// Load stats from the platform data directory, or start fresh.
    pub fn load() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sudoku_nusantara_stats.json");
        Self::load_from(path)
    }

    fn load_from(path: PathBuf) -> Self {
        let stats = fs::read_to_string(&path)
            .ok()
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default();
        Self { stats, path }
    }

    /// Count a session that reached an end state.
    pub fn record_played(&mut self) {
        self.stats.games_played += 1;
        self.save();
    }

    /// Count a win; returns true when it sets a new best time for the tier.
    pub fn record_win(&mut self, difficulty: Difficulty, time_secs: u64) -> bool {
        self.stats.games_played += 1;
        self.stats.games_won += 1;

        let key = difficulty.key().to_string();
        let new_best = match self.stats.best_times.get(&key) {
            Some(&best) => time_secs < best,
            None => true,
        };
        if new_best {
            self.stats.best_times.insert(key, time_secs);
        }
        self.save();
        new_best
    }

    fn save(&self) {
        if let Ok(json) = serde_json::to_string_pretty(&self.stats) {
            // Best effort; a read-only data dir should not kill the game.
            let _ = fs::write(&self.path, json);
        }
    }
}

/// Format seconds as MM:SS (H:MM:SS past the hour).
pub fn format_time(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}
