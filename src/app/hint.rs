use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hint {
    Even,
    Odd,
    DivisibleBy5,
    DivisibleBy3,
    NotDivisibleBy3Or5,
    LowestQuarter,
    HighestQuarter,
    MiddleRange,
    EndsInOne,
}

impl Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Hint::Even => "The number is even!",
            Hint::Odd => "The number is odd!",
            Hint::DivisibleBy5 => "The number is divisible by 5!",
            Hint::DivisibleBy3 => "The number is divisible by 3!",
            Hint::NotDivisibleBy3Or5 => "The number is not divisible by 3 or 5!",
            Hint::LowestQuarter => "The number is in the lowest quarter!",
            Hint::HighestQuarter => "The number is in the highest quarter!",
            Hint::MiddleRange => "The number is somewhere in the middle range!",
            Hint::EndsInOne => "The number ends in 1!",
        };

        write!(f, "{text}")
    }
}

fn parity(target: u32) -> Hint {
    if target % 2 == 0 { Hint::Even } else { Hint::Odd }
}

/// Hints for the standard edition: parity on the third attempt, a
/// divisibility clue on the fifth, nothing otherwise.
pub fn standard_hint(attempts: u32, target: u32) -> Option<Hint> {
    match attempts {
        3 => Some(parity(target)),
        5 => Some(if target % 5 == 0 {
            Hint::DivisibleBy5
        } else if target % 3 == 0 {
            Hint::DivisibleBy3
        } else {
            Hint::NotDivisibleBy3Or5
        }),
        _ => None,
    }
}

/// Hints for the advanced edition. Every rule that applies adds a
/// candidate and the last one wins.
pub fn smart_hint(attempts: u32, target: u32, bound: u32) -> Option<Hint> {
    let mut hints = Vec::new();

    if attempts == 3 {
        hints.push(parity(target));
    }

    if attempts == 5 {
        if target <= bound / 4 {
            hints.push(Hint::LowestQuarter);
        } else if target >= 3 * bound / 4 {
            hints.push(Hint::HighestQuarter);
        } else {
            hints.push(Hint::MiddleRange);
        }
    }

    if attempts >= 6 {
        if target % 5 == 0 {
            hints.push(Hint::DivisibleBy5);
        } else if target % 10 == 1 {
            hints.push(Hint::EndsInOne);
        }
    }

    hints.pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_parity_on_third_attempt() {
        assert_eq!(standard_hint(3, 42), Some(Hint::Even));
        assert_eq!(standard_hint(3, 41), Some(Hint::Odd));
    }

    #[test]
    fn standard_divisibility_on_fifth_attempt() {
        assert_eq!(standard_hint(5, 30), Some(Hint::DivisibleBy5));
        assert_eq!(standard_hint(5, 27), Some(Hint::DivisibleBy3));
        assert_eq!(standard_hint(5, 49), Some(Hint::NotDivisibleBy3Or5));
    }

    #[test]
    fn standard_silent_on_other_attempts() {
        for attempts in [1, 2, 4, 6, 7] {
            assert_eq!(standard_hint(attempts, 42), None);
        }
    }

    #[test]
    fn smart_quarters_on_fifth_attempt() {
        assert_eq!(smart_hint(5, 25, 100), Some(Hint::LowestQuarter));
        assert_eq!(smart_hint(5, 75, 100), Some(Hint::HighestQuarter));
        assert_eq!(smart_hint(5, 50, 100), Some(Hint::MiddleRange));
        // 50 / 4 == 12 and 3 * 50 / 4 == 37
        assert_eq!(smart_hint(5, 12, 50), Some(Hint::LowestQuarter));
        assert_eq!(smart_hint(5, 13, 50), Some(Hint::MiddleRange));
        assert_eq!(smart_hint(5, 37, 50), Some(Hint::HighestQuarter));
    }

    #[test]
    fn smart_late_hints() {
        assert_eq!(smart_hint(6, 35, 100), Some(Hint::DivisibleBy5));
        assert_eq!(smart_hint(7, 61, 100), Some(Hint::EndsInOne));
        assert_eq!(smart_hint(6, 42, 100), None);
    }

    #[test]
    fn smart_parity_and_gaps() {
        assert_eq!(smart_hint(3, 8, 50), Some(Hint::Even));
        assert_eq!(smart_hint(1, 8, 50), None);
        assert_eq!(smart_hint(4, 8, 50), None);
    }
}
