use std::{
    cmp::Ordering,
    fmt::Display,
    time::{Duration, Instant},
};

use rand::Rng;

use super::{difficulty::Difficulty, difficulty::Level, stats::RoundResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    TooLow,
    TooHigh,
    Correct,
}

pub fn evaluate(guess: u32, target: u32) -> Verdict {
    match guess.cmp(&target) {
        Ordering::Less => Verdict::TooLow,
        Ordering::Greater => Verdict::TooHigh,
        Ordering::Equal => Verdict::Correct,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Debug, Clone)]
pub struct Round {
    target: u32,
    level: Level,
    attempts: u32,
    guesses: Vec<(u32, Verdict)>,
    started: Instant,
    finished: Option<Duration>,
}

impl Round {
    pub fn new<R: Rng>(level: Level, rng: &mut R) -> Self {
        let target = rng.random_range(1..=level.bound.max(1));
        Self::with_target(target, level)
    }

    pub fn with_target(target: u32, level: Level) -> Self {
        Self {
            target,
            level,
            attempts: 0,
            guesses: Vec::new(),
            started: Instant::now(),
            finished: None,
        }
    }

    /// `None` once the round is over.
    pub fn guess(&mut self, guess: u32) -> Option<Verdict> {
        if self.outcome().is_some() {
            return None;
        }

        self.attempts += 1;
        let verdict = evaluate(guess, self.target);
        self.guesses.push((guess, verdict));

        if self.outcome().is_some() {
            self.finished = Some(self.started.elapsed());
        }

        Some(verdict)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if let Some((_, Verdict::Correct)) = self.guesses.last() {
            return Some(Outcome::Won);
        }
        match self.level.budget {
            Some(budget) if self.attempts >= budget => Some(Outcome::Lost),
            _ => None,
        }
    }

    pub fn remaining(&self) -> Option<u32> {
        self.level
            .budget
            .map(|budget| budget.saturating_sub(self.attempts))
    }

    pub fn elapsed(&self) -> Duration {
        self.finished.unwrap_or_else(|| self.started.elapsed())
    }

    pub fn result(&self, difficulty: Difficulty) -> RoundResult {
        RoundResult {
            won: self.outcome() == Some(Outcome::Won),
            attempts: self.attempts,
            duration: self.elapsed().as_secs_f64(),
            difficulty,
        }
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn last_guess(&self) -> Option<(u32, Verdict)> {
        self.guesses.last().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    FirstTry,
    Phenomenal,
    Excellent,
    Good,
    CloseCall,
}

/// How well a won round went, on the scale of the edition that rated it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Standard(Grade),
    Ratio(Grade),
}

impl Rating {
    pub fn standard(attempts: u32, budget: u32) -> Self {
        let grade = if attempts == 1 {
            Grade::FirstTry
        } else if attempts <= 3 {
            Grade::Excellent
        } else if attempts <= budget / 2 {
            Grade::Good
        } else {
            Grade::CloseCall
        };

        Self::Standard(grade)
    }

    pub fn by_ratio(attempts: u32, budget: u32) -> Self {
        let ratio = attempts as f64 / budget.max(1) as f64;

        let grade = if attempts == 1 {
            Grade::FirstTry
        } else if ratio <= 0.25 {
            Grade::Phenomenal
        } else if ratio <= 0.5 {
            Grade::Excellent
        } else if ratio <= 0.75 {
            Grade::Good
        } else {
            Grade::CloseCall
        };

        Self::Ratio(grade)
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Rating::Standard(Grade::FirstTry) => "INCREDIBLE! First try!",
            Rating::Standard(Grade::Phenomenal | Grade::Excellent) => "Excellent guessing!",
            Rating::Standard(Grade::Good) => "Good job!",
            Rating::Standard(Grade::CloseCall) => "That was close!",
            Rating::Ratio(Grade::FirstTry) => "UNBELIEVABLE! One shot, one kill!",
            Rating::Ratio(Grade::Phenomenal) => "PHENOMENAL! You're a guessing genius!",
            Rating::Ratio(Grade::Excellent) => "EXCELLENT! Great intuition!",
            Rating::Ratio(Grade::Good) => "GOOD JOB! Solid performance!",
            Rating::Ratio(Grade::CloseCall) => "CLOSE CALL! That was intense!",
        };

        write!(f, "{text}")
    }
}
