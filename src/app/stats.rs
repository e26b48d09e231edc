use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::Local;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::difficulty::Difficulty;

/// Outcome of one finished round, handed to the store once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundResult {
    pub won: bool,
    pub attempts: u32,
    /// Seconds.
    pub duration: f64,
    pub difficulty: Difficulty,
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DifficultyCounts {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl DifficultyCounts {
    pub fn get(&self, difficulty: Difficulty) -> u32 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    fn increment(&mut self, difficulty: Difficulty) {
        let count = match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        };
        *count = count.saturating_add(1);
    }

    pub fn total(&self) -> u64 {
        self.easy as u64 + self.medium as u64 + self.hard as u64
    }

    pub fn iter(&self) -> impl Iterator<Item = (Difficulty, u32)> + '_ {
        Difficulty::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

/// All-time counters. Only ever grows, except through a full reset.
#[derive(Default, Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AggregateStats {
    pub games_played: u32,
    pub games_won: u32,
    pub total_attempts: u64,
    /// Fewest attempts in a won round.
    pub best_score: Option<u32>,
    /// Seconds.
    pub total_time: f64,
    #[serde(rename = "difficulty_stats")]
    pub difficulty_counts: DifficultyCounts,
}

impl AggregateStats {
    pub fn fold(&self, result: &RoundResult) -> Self {
        let mut next = *self;

        next.games_played = next.games_played.saturating_add(1);
        next.total_attempts = next.total_attempts.saturating_add(result.attempts as u64);
        next.total_time += result.duration.max(0.0);
        next.difficulty_counts.increment(result.difficulty);

        if result.won {
            next.games_won = next.games_won.saturating_add(1);
            next.best_score = Some(match self.best_score {
                Some(best) => best.min(result.attempts),
                None => result.attempts,
            });
        }

        next
    }

    pub fn win_rate(&self) -> Option<f64> {
        self.per_game(self.games_won as f64 * 100.0)
    }

    pub fn average_attempts(&self) -> Option<f64> {
        self.per_game(self.total_attempts as f64)
    }

    pub fn average_time(&self) -> Option<f64> {
        self.per_game(self.total_time)
    }

    /// Share of all games played at `difficulty`, in percent.
    pub fn difficulty_share(&self, difficulty: Difficulty) -> Option<f64> {
        self.per_game(self.difficulty_counts.get(difficulty) as f64 * 100.0)
    }

    fn per_game(&self, value: f64) -> Option<f64> {
        (self.games_played > 0).then(|| value / self.games_played as f64)
    }

    pub fn is_consistent(&self) -> bool {
        self.games_won <= self.games_played
            && self.difficulty_counts.total() == self.games_played as u64
            && self.total_attempts >= self.games_played as u64
            && self.best_score.is_none() == (self.games_won == 0)
            && self.best_score.is_none_or(|best| best >= 1)
            && self.total_time.is_finite()
            && self.total_time >= 0.0
    }
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed stats record: {0}")]
    Format(#[from] serde_json::Error),

    #[error("stats record contradicts itself")]
    Inconsistent,
}

#[derive(Serialize)]
struct Record<'a> {
    #[serde(flatten)]
    stats: &'a AggregateStats,
    last_played: String,
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> StatsError + use<> {
    let path = path.to_owned();
    move |source| StatsError::Write { path, source }
}

/// The JSON file the all-time counters live in.
#[derive(Debug, Clone)]
pub struct StatsFile {
    path: PathBuf,
}

impl StatsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Never fails: a missing, unreadable or corrupted file yields fresh
    /// counters.
    pub fn load(&self) -> AggregateStats {
        match self.read() {
            Ok(stats) => stats,
            Err(StatsError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                debug!("no stats at {}, starting fresh", self.path.display());
                AggregateStats::default()
            }
            Err(err) => {
                warn!("ignoring stats file: {err}");
                AggregateStats::default()
            }
        }
    }

    fn read(&self) -> Result<AggregateStats, StatsError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| StatsError::Read {
            path: self.path.clone(),
            source,
        })?;

        let stats: AggregateStats = serde_json::from_str(&contents)?;
        if !stats.is_consistent() {
            return Err(StatsError::Inconsistent);
        }

        Ok(stats)
    }

    /// Replaces the whole file. The record is written next to the target
    /// and renamed over it, so a reader sees either the old or the new one.
    pub fn persist(&self, stats: &AggregateStats) -> Result<(), StatsError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(write_error(dir))?;
            }
        }

        let record = Record {
            stats,
            last_played: Local::now().to_rfc3339(),
        };
        let contents = serde_json::to_string_pretty(&record)?;

        let tmp = self.temp_path();
        fs::write(&tmp, contents).map_err(write_error(&tmp))?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_error(&self.path)(source));
        }

        debug!("saved stats to {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => {
                let mut name = name.to_os_string();
                name.push(".tmp");
                self.path.with_file_name(name)
            }
            None => self.path.with_extension("tmp"),
        }
    }
}

/// Owns the counters for the lifetime of the program and writes every
/// change straight through to its file.
#[derive(Debug)]
pub struct StatsStore {
    file: StatsFile,
    stats: AggregateStats,
}

impl StatsStore {
    pub fn open(file: StatsFile) -> Self {
        let stats = file.load();
        info!(
            "loaded stats from {}: {} played, {} won",
            file.path().display(),
            stats.games_played,
            stats.games_won
        );
        Self { file, stats }
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn record(&mut self, result: &RoundResult) -> Result<(), StatsError> {
        self.stats = self.stats.fold(result);
        info!(
            "recorded {} round in {} attempts ({})",
            if result.won { "won" } else { "lost" },
            result.attempts,
            result.difficulty
        );
        self.file.persist(&self.stats)
    }

    /// Back to zero, on disk as well. The counters in memory are only
    /// cleared once the file has been replaced.
    pub fn reset(&mut self) -> Result<(), StatsError> {
        let fresh = AggregateStats::default();
        self.file.persist(&fresh)?;
        self.stats = fresh;
        info!("stats reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn result(won: bool, attempts: u32, difficulty: Difficulty) -> RoundResult {
        RoundResult {
            won,
            attempts,
            duration: 1.5,
            difficulty,
        }
    }

    fn sample() -> AggregateStats {
        [
            result(false, 5, Difficulty::Easy),
            result(true, 2, Difficulty::Easy),
            result(true, 7, Difficulty::Hard),
        ]
        .iter()
        .fold(AggregateStats::default(), |stats, r| stats.fold(r))
    }

    #[test]
    fn fold_three_rounds() {
        let stats = sample();

        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.games_won, 2);
        assert_eq!(stats.best_score, Some(2));
        assert_eq!(stats.total_attempts, 14);
        assert!((stats.total_time - 4.5).abs() < 1e-9);
        assert_eq!(
            stats.difficulty_counts,
            DifficultyCounts {
                easy: 2,
                medium: 0,
                hard: 1
            }
        );
        assert!(stats.is_consistent());
    }

    #[test]
    fn fold_leaves_input_untouched() {
        let before = AggregateStats::default();
        let after = before.fold(&result(true, 3, Difficulty::Medium));

        assert_eq!(before, AggregateStats::default());
        assert_eq!(after.games_played, 1);
    }

    #[test]
    fn invariants_hold_over_long_sequences() {
        let mut stats = AggregateStats::default();
        let mut best: Option<u32> = None;

        for i in 0..200u32 {
            let won = i % 3 != 0;
            let attempts = 1 + (i * 7) % 10;
            let difficulty = Difficulty::ALL[(i % 3) as usize];
            stats = stats.fold(&result(won, attempts, difficulty));
            if won {
                best = Some(best.map_or(attempts, |b| b.min(attempts)));
            }

            assert_eq!(stats.games_played, i + 1);
            assert_eq!(stats.difficulty_counts.total(), (i + 1) as u64);
            assert!(stats.games_won <= stats.games_played);
            assert_eq!(stats.best_score, best);
            assert!(stats.is_consistent());
        }
    }

    #[test]
    fn no_best_score_without_a_win() {
        let stats = AggregateStats::default()
            .fold(&result(false, 8, Difficulty::Medium))
            .fold(&result(false, 6, Difficulty::Hard));

        assert_eq!(stats.games_won, 0);
        assert_eq!(stats.best_score, None);
        assert!(stats.is_consistent());
    }

    #[test]
    fn derived_views() {
        let stats = sample();

        assert_eq!(AggregateStats::default().win_rate(), None);
        assert!((stats.win_rate().unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert!((stats.average_attempts().unwrap() - 14.0 / 3.0).abs() < 1e-9);
        assert!((stats.average_time().unwrap() - 1.5).abs() < 1e-9);
        assert!((stats.difficulty_share(Difficulty::Hard).unwrap() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let file = StatsFile::new(dir.path().join("nested/game_stats.json"));
        let stats = sample();

        file.persist(&stats).unwrap();

        assert_eq!(file.load(), stats);
        assert!(!dir.path().join("nested/game_stats.json.tmp").exists());
    }

    #[test]
    fn uneven_durations_round_trip() {
        let dir = TempDir::new().unwrap();
        let file = StatsFile::new(dir.path().join("game_stats.json"));
        let durations = [0.1, 12.345, 7.777, 464.97642721371517, 1e-7, 93.3];

        let mut stats = AggregateStats::default();
        for (i, duration) in durations.iter().cycle().take(500).enumerate() {
            stats = stats.fold(&RoundResult {
                won: i % 2 == 0,
                attempts: 1 + (i as u32 % 8),
                duration: *duration * (1.0 + i as f64 / 997.0),
                difficulty: Difficulty::ALL[i % 3],
            });
            file.persist(&stats).unwrap();

            let loaded = file.load();
            assert_eq!(loaded.total_time.to_bits(), stats.total_time.to_bits());
            assert_eq!(loaded, stats);
        }
    }

    #[test]
    fn persisted_record_layout() {
        let dir = TempDir::new().unwrap();
        let file = StatsFile::new(dir.path().join("game_stats.json"));

        file.persist(&AggregateStats::default()).unwrap();

        let contents = fs::read_to_string(file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["games_played"], 0);
        assert!(json["best_score"].is_null());
        assert_eq!(json["difficulty_stats"]["medium"], 0);
        assert!(json["last_played"].is_string());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let file = StatsFile::new(dir.path().join("absent.json"));

        assert_eq!(file.load(), AggregateStats::default());
    }

    #[test]
    fn corrupted_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game_stats.json");
        fs::write(&path, "not valid json {").unwrap();

        assert_eq!(StatsFile::new(&path).load(), AggregateStats::default());
    }

    #[test]
    fn contradictory_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game_stats.json");
        fs::write(&path, r#"{"games_played": 1, "games_won": 4}"#).unwrap();

        assert_eq!(StatsFile::new(&path).load(), AggregateStats::default());
    }

    #[test]
    fn loads_older_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game_stats.json");
        fs::write(
            &path,
            r#"{
  "games_played": 2,
  "games_won": 1,
  "total_attempts": 9,
  "best_score": 4,
  "total_time": 31,
  "difficulty_stats": {"easy": 0, "medium": 2, "hard": 0},
  "last_played": "2024-05-01T10:00:00"
}"#,
        )
        .unwrap();

        let stats = StatsFile::new(&path).load();
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.best_score, Some(4));
        assert_eq!(stats.total_time, 31.0);
        assert_eq!(stats.difficulty_counts.medium, 2);
    }

    #[test]
    fn write_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let file = StatsFile::new(blocker.join("game_stats.json"));

        let err = file.persist(&sample()).unwrap_err();
        assert!(matches!(err, StatsError::Write { .. }));
    }

    #[test]
    fn store_writes_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game_stats.json");
        let mut store = StatsStore::open(StatsFile::new(&path));

        store.record(&result(true, 4, Difficulty::Hard)).unwrap();

        let reloaded = StatsFile::new(&path).load();
        assert_eq!(&reloaded, store.stats());
        assert_eq!(reloaded.best_score, Some(4));
    }

    #[test]
    fn failed_reset_keeps_counters() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game_stats.json");
        let file = StatsFile::new(&path);
        file.persist(&sample()).unwrap();

        let mut store = StatsStore::open(file);
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(store.reset().is_err());
        assert_eq!(store.stats(), &sample());
    }

    #[test]
    fn store_reset_is_durable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("game_stats.json");
        let file = StatsFile::new(&path);
        file.persist(&sample()).unwrap();

        let mut store = StatsStore::open(file);
        assert_eq!(store.stats().games_played, 3);
        store.reset().unwrap();

        assert_eq!(store.stats(), &AggregateStats::default());
        assert_eq!(StatsFile::new(&path).load(), AggregateStats::default());
    }
}
