mod mode;

use log::{error, info};
use mode::Mode;
use rand::rngs::StdRng;
use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Style, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::{
    Game,
    difficulty::Difficulty,
    edition::Edition,
    input::BoundedInput,
    round::{Outcome, Round, Verdict},
    session::Session,
    stats::StatsStore,
};

pub struct Guessing<'a> {
    exit: bool,
    mode: Mode,
    edition: Edition,
    difficulty: Difficulty,
    input: BoundedInput,
    round: Option<Round>,
    session: Session,
    save_error: Option<String>,

    store: &'a mut StatsStore,
    rng: &'a mut StdRng,
}

impl<'a> Guessing<'a> {
    pub fn new(edition: Edition, store: &'a mut StatsStore, rng: &'a mut StdRng) -> Self {
        let mut game = Self {
            exit: false,
            mode: Mode::Choosing,
            edition,
            difficulty: Difficulty::default(),
            input: BoundedInput::new(1, Difficulty::ALL.len() as u32),
            round: None,
            session: Session::default(),
            save_error: None,
            store,
            rng,
        };
        game.next_round();
        game
    }

    fn next_round(&mut self) {
        if self.edition.needs_difficulty() {
            self.mode = Mode::Choosing;
            self.input = BoundedInput::new(1, Difficulty::ALL.len() as u32);
            self.round = None;
        } else {
            self.start(Difficulty::default());
        }
    }

    fn start(&mut self, difficulty: Difficulty) {
        let level = self.edition.level(difficulty);
        let round = Round::new(level, &mut *self.rng);
        info!(
            "new {} round: 1-{}, {:?} attempts",
            self.edition.name(),
            level.bound,
            level.budget
        );

        self.difficulty = difficulty;
        self.input = BoundedInput::new(1, level.bound);
        self.round = Some(round);
        self.save_error = None;
        self.mode = Mode::Playing;
    }

    fn choose(&mut self) {
        if let Some(difficulty) = self.input.submit().and_then(Difficulty::from_choice) {
            self.start(difficulty);
        }
    }

    fn guess(&mut self) {
        let Some(value) = self.input.submit() else {
            return;
        };
        let Some(round) = self.round.as_mut() else {
            return;
        };

        round.guess(value);
        if round.outcome().is_some() {
            self.finish();
        }
    }

    fn finish(&mut self) {
        let Some(round) = self.round.as_ref() else {
            return;
        };
        let result = round.result(self.difficulty);
        self.mode = Mode::Results;

        if self.edition == Edition::Standard {
            self.session.record(result.won);
        }

        if self.edition.tracks_stats() {
            if let Err(err) = self.store.record(&result) {
                error!("stats not saved: {err}");
                self.save_error = Some(err.to_string());
            }
        }
    }

    fn body(&self) -> Vec<Line> {
        match self.mode {
            Mode::Choosing => self.choosing_lines(),
            Mode::Playing => self.playing_lines(),
            Mode::Results => self.results_lines(),
        }
    }

    fn choosing_lines(&self) -> Vec<Line> {
        let mut lines = vec![Line::from("Choose your challenge:"), Line::default()];

        for (i, difficulty) in Difficulty::ALL.into_iter().enumerate() {
            let level = self.edition.level(difficulty);
            let budget = level.budget.map_or("unlimited".to_owned(), |b| b.to_string());
            lines.push(Line::from(format!(
                "{}. {difficulty} (1-{}, {budget} attempts)",
                i + 1,
                level.bound
            )));
        }

        lines.push(Line::default());
        lines.extend(self.prompt_lines("Enter your choice"));
        lines
    }

    fn playing_lines(&self) -> Vec<Line> {
        let Some(round) = &self.round else {
            return Vec::new();
        };
        let level = round.level();

        let mut lines = vec![Line::from(format!(
            "I'm thinking of a number between 1 and {}...",
            level.bound
        ))];

        match round.remaining() {
            Some(remaining) if round.attempts() == 0 => {
                lines.push(Line::from(format!("You have {remaining} attempts to guess it!")))
            }
            Some(remaining) => lines.push(Line::from(format!("Attempts remaining: {remaining}"))),
            None => lines.push(Line::from(format!("Attempts so far: {}", round.attempts()))),
        }
        lines.push(Line::default());

        if let Some((guess, verdict)) = round.last_guess() {
            let text = match verdict {
                Verdict::TooLow => format!("{guess} is too low! Aim higher!"),
                Verdict::TooHigh => format!("{guess} is too high! Go lower!"),
                Verdict::Correct => String::new(),
            };
            lines.push(Line::from(text).fg(Color::Yellow));

            if let Some(hint) = self.edition.hint(round.attempts(), round.target(), level.bound) {
                lines.push(Line::from(format!("Hint: {hint}")).fg(Color::Cyan));
            }
        }
        lines.push(Line::default());

        lines.extend(self.prompt_lines("Enter your guess"));
        lines
    }

    fn results_lines(&self) -> Vec<Line> {
        let Some(round) = &self.round else {
            return Vec::new();
        };

        let mut lines = Vec::new();
        match round.outcome() {
            Some(Outcome::Won) => {
                lines.push(
                    Line::from(format!(
                        "CONGRATULATIONS! You found it in {} attempts!",
                        round.attempts()
                    ))
                    .fg(Color::Green),
                );
                if let Some(rating) = self.edition.rate(round.attempts(), round.level().budget) {
                    lines.push(Line::from(rating.to_string()));
                }
            }
            _ => {
                lines.push(
                    Line::from(format!("Game Over! The number was {}", round.target()))
                        .fg(Color::Red),
                );
                lines.push(Line::from("Don't give up, every expert was once a beginner!"));
            }
        }
        lines.push(Line::from(format!(
            "Time taken: {:.1} seconds",
            round.elapsed().as_secs_f64()
        )));
        lines.push(Line::default());

        match self.edition {
            Edition::Standard => {
                lines.push(Line::from(format!(
                    "Session: {}/{} wins ({:.1}%)",
                    self.session.won,
                    self.session.played,
                    self.session.win_rate()
                )));
                if let Some(remark) = self.session.remark() {
                    lines.push(Line::from(remark));
                }
            }
            Edition::Advanced => {
                let stats = self.store.stats();
                lines.push(Line::from(format!(
                    "Progress: {}/{} wins ({:.1}%)",
                    stats.games_won,
                    stats.games_played,
                    stats.win_rate().unwrap_or_default()
                )));
                if let Some(err) = &self.save_error {
                    lines.push(
                        Line::from(format!("Statistics were not saved: {err}")).fg(Color::Red),
                    );
                }
            }
            Edition::Classic => (),
        }

        lines
    }

    fn prompt_lines(&self, label: &str) -> Vec<Line> {
        let mut lines = vec![Line::from(vec![
            Span::raw(format!("{label} {}: ", self.input.prompt())),
            Span::raw(self.input.text().to_owned()).bold(),
            Span::styled("_", Style::default().add_modifier(ratatui::style::Modifier::SLOW_BLINK)),
        ])];

        if let Some(err) = self.input.error() {
            lines.push(Line::from(err.to_string()).fg(Color::Red));
        }
        lines
    }
}

impl Game for Guessing<'_> {
    fn exited(&self) -> bool {
        self.exit
    }

    fn key_event(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Choosing | Mode::Playing => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Char(ch) => self.input.push(ch),
                KeyCode::Backspace => self.input.pop(),
                KeyCode::Enter if self.mode == Mode::Choosing => self.choose(),
                KeyCode::Enter => self.guess(),
                _ => (),
            },
            Mode::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char(' ') => self.next_round(),
                _ => (),
            },
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &Guessing<'_> {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Footer
            ])
            .split(area);

        let title = format!("{} Number Guessing", self.edition.name());
        Paragraph::new(Span::from(title).fg(Color::Red))
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(vert[0], buf);

        let title = match self.mode {
            Mode::Choosing => "╡ Difficulty ╞".to_owned(),
            Mode::Playing if self.edition.needs_difficulty() => {
                format!("╡ Playing: {} ╞", self.difficulty)
            }
            Mode::Playing => "╡ Playing ╞".to_owned(),
            Mode::Results => "╡ Results ╞".to_owned(),
        };
        Block::bordered()
            .border_set(border::DOUBLE)
            .title(title)
            .render(vert[1], buf);

        let main = vert[1].inner(Margin {
            horizontal: 2,
            vertical: 1,
        });
        Paragraph::new(self.body()).render(main, buf);

        let footer = match self.mode {
            Mode::Results => "ENTER to play again and Esc/'q' to go back",
            _ => "ENTER to submit and Esc/'q' to go back",
        };
        Paragraph::new(footer).centered().render(vert[2], buf);
    }
}
