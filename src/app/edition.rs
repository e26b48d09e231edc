use clap::ValueEnum;

use super::{
    difficulty::{Difficulty, Level},
    hint::{self, Hint},
    round::Rating,
};

const CLASSIC: Level = Level {
    bound: 10,
    budget: None,
};

/// The three ways to play, from a bare guessing loop up to difficulty
/// levels, smart hints and all-time stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Edition {
    Classic,
    Standard,
    Advanced,
}

impl Edition {
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Standard => "Standard",
            Self::Advanced => "Advanced",
        }
    }

    pub fn needs_difficulty(self) -> bool {
        self != Self::Classic
    }

    pub fn tracks_stats(self) -> bool {
        self == Self::Advanced
    }

    pub fn level(self, difficulty: Difficulty) -> Level {
        let (bound, budget) = match (self, difficulty) {
            (Self::Classic, _) => return CLASSIC,
            (Self::Standard, Difficulty::Easy) => (50, 8),
            (Self::Standard, Difficulty::Medium) => (100, 7),
            (Self::Standard, Difficulty::Hard) => (200, 6),
            (Self::Advanced, Difficulty::Easy) => (50, 10),
            (Self::Advanced, Difficulty::Medium) => (100, 8),
            (Self::Advanced, Difficulty::Hard) => (200, 6),
        };

        Level {
            bound,
            budget: Some(budget),
        }
    }

    pub fn hint(self, attempts: u32, target: u32, bound: u32) -> Option<Hint> {
        match self {
            Self::Classic => None,
            Self::Standard => hint::standard_hint(attempts, target),
            Self::Advanced => hint::smart_hint(attempts, target, bound),
        }
    }

    pub fn rate(self, attempts: u32, budget: Option<u32>) -> Option<Rating> {
        match (self, budget) {
            (Self::Standard, Some(budget)) => Some(Rating::standard(attempts, budget)),
            (Self::Advanced, Some(budget)) => Some(Rating::by_ratio(attempts, budget)),
            _ => None,
        }
    }
}
