/// Wins and losses since the player sat down, never written anywhere.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub played: u32,
    pub won: u32,
}

impl Session {
    pub fn record(&mut self, won: bool) {
        self.played += 1;
        if won {
            self.won += 1;
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.played == 0 {
            return 0.0;
        }
        self.won as f64 / self.played as f64 * 100.0
    }

    pub fn remark(&self) -> Option<&'static str> {
        if self.played <= 1 {
            None
        } else if self.won == self.played {
            Some("Perfect record! You're a guessing champion!")
        } else if self.won >= self.played / 2 {
            Some("Great performance!")
        } else {
            None
        }
    }
}
