mod mode;

use mode::Mode;
use ratatui::{
    Frame,
    crossterm::event::{KeyCode, KeyEvent},
    layout::{Constraint, Direction, Layout, Margin},
    style::{Color, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use super::{Game, stats::StatsStore};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Reset,
    Cancelled,
    Failed(String),
}

pub struct StatsView<'a> {
    exit: bool,
    mode: Mode,
    notice: Option<Notice>,
    store: &'a mut StatsStore,
}

impl<'a> StatsView<'a> {
    pub fn new(store: &'a mut StatsStore) -> Self {
        Self {
            exit: false,
            mode: Mode::default(),
            notice: None,
            store,
        }
    }

    fn confirm(&mut self, yes: bool) {
        self.mode = Mode::Viewing;

        if !yes {
            self.notice = Some(Notice::Cancelled);
            return;
        }

        self.notice = Some(match self.store.reset() {
            Ok(()) => Notice::Reset,
            Err(err) => {
                log::error!("reset not saved: {err}");
                Notice::Failed(err.to_string())
            }
        });
    }

    fn stat_lines(&self) -> Vec<Line> {
        let stats = self.store.stats();

        let (Some(win_rate), Some(avg_attempts), Some(avg_time)) = (
            stats.win_rate(),
            stats.average_attempts(),
            stats.average_time(),
        ) else {
            return vec![Line::from("No games played yet!")];
        };

        let mut lines = vec![
            Line::from(format!("Games played: {}", stats.games_played)),
            Line::from(format!("Games won: {}", stats.games_won)),
            Line::from(format!("Win rate: {win_rate:.1}%")),
            Line::from(format!("Average attempts: {avg_attempts:.1}")),
            Line::from(format!("Average time: {avg_time:.1} seconds")),
        ];

        if let Some(best) = stats.best_score {
            lines.push(Line::from(format!("Best score: {best} attempts")).fg(Color::Green));
        }

        lines.push(Line::default());
        lines.push(Line::from("Difficulty breakdown:"));
        for (difficulty, count) in stats.difficulty_counts.iter() {
            if count == 0 {
                continue;
            }
            let share = stats.difficulty_share(difficulty).unwrap_or_default();
            lines.push(Line::from(format!(
                "  {difficulty}: {count} games ({share:.1}%)"
            )));
        }

        lines
    }
}

impl Game for StatsView<'_> {
    fn exited(&self) -> bool {
        self.exit
    }

    fn key_event(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Viewing => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.exit = true,
                KeyCode::Char('r') => {
                    self.notice = None;
                    self.mode = Mode::Confirming;
                }
                _ => (),
            },
            Mode::Confirming => self.confirm(matches!(key.code, KeyCode::Char('y' | 'Y'))),
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &StatsView<'_> {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(0),    // Body
                Constraint::Length(1), // Notice
                Constraint::Length(1), // Footer
            ])
            .split(area);

        Paragraph::new(Span::from("All-Time Statistics").fg(Color::Red))
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(vert[0], buf);

        Block::bordered()
            .border_set(border::DOUBLE)
            .title("╡ Statistics ╞")
            .render(vert[1], buf);

        let main = vert[1].inner(Margin {
            horizontal: 2,
            vertical: 1,
        });
        Paragraph::new(self.stat_lines()).render(main, buf);

        let notice = match (&self.mode, &self.notice) {
            (Mode::Confirming, _) => {
                Line::from("Are you sure you want to reset all statistics? (y/n)").fg(Color::Yellow)
            }
            (_, Some(Notice::Reset)) => {
                Line::from("Statistics reset successfully!").fg(Color::Green)
            }
            (_, Some(Notice::Cancelled)) => Line::from("Reset cancelled."),
            (_, Some(Notice::Failed(err))) => {
                Line::from(format!("Reset was not saved: {err}")).fg(Color::Red)
            }
            (_, None) => Line::default(),
        };
        Paragraph::new(notice).centered().render(vert[2], buf);

        Paragraph::new("'r' to reset and Esc/'q' to go back")
            .centered()
            .render(vert[3], buf);
    }
}
