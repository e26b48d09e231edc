mod difficulty;
mod edition;
mod guessing;
mod hint;
mod input;
mod round;
mod session;
mod stats;
mod stats_view;

pub use edition::Edition;
pub use stats::{StatsFile, StatsStore};

use std::{io, path::PathBuf, time::Duration};

use directories::BaseDirs;
use guessing::Guessing;
use rand::rngs::StdRng;
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Styled},
    symbols::border,
    widgets::{Block, Paragraph, Widget},
};
use stats_view::StatsView;

const DIR_NAME: &str = "GuessingGame";
const STATS_FILE: &str = "game_stats.json";

const ITEMS: [&str; 5] = ["Classic", "Standard", "Advanced", "Statistics", "Quit"];

/// Where everything the game keeps between runs lives.
pub fn data_dir() -> Option<PathBuf> {
    let dirs = BaseDirs::new()?;
    Some(dirs.data_dir().join(DIR_NAME))
}

pub fn default_stats_path() -> PathBuf {
    data_dir()
        .map(|dir| dir.join(STATS_FILE))
        .unwrap_or_else(|| PathBuf::from(STATS_FILE))
}

/// A full-screen mode that reads keys until it decides to exit.
pub trait Game {
    fn exited(&self) -> bool;
    fn key_event(&mut self, key: KeyEvent);
    fn draw(&self, frame: &mut Frame);

    fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.exited() {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_input()?;
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if event::poll(Duration::MAX)? {
            if let event::Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.key_event(key);
                }
            }
        }
        Ok(())
    }
}

pub struct Menu {
    exit: bool,
    index: usize,
    store: StatsStore,
    rng: StdRng,
}

impl Menu {
    pub fn new(store: StatsStore, rng: StdRng) -> Self {
        Self {
            exit: false,
            index: 0,
            store,
            rng,
        }
    }

    pub fn run(
        &mut self,
        terminal: &mut DefaultTerminal,
        start: Option<Edition>,
    ) -> io::Result<()> {
        if let Some(edition) = start {
            self.play(terminal, edition)?;
        }

        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_input(terminal)?;
        }

        Ok(())
    }

    fn handle_input(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        if event::poll(Duration::MAX)? {
            let event = event::read()?;
            if let event::Event::Key(key) = event {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                    KeyCode::Enter => self.go(terminal)?,
                    KeyCode::Up => self.up(),
                    KeyCode::Down => self.down(),
                    KeyCode::Char(ch @ '1'..='5') => {
                        self.index = (ch as u8 - b'1') as usize;
                        self.go(terminal)?;
                    }
                    _ => (),
                }
            }
        }
        Ok(())
    }

    fn go(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        match self.index {
            0 => self.play(terminal, Edition::Classic)?,
            1 => self.play(terminal, Edition::Standard)?,
            2 => self.play(terminal, Edition::Advanced)?,
            3 => StatsView::new(&mut self.store).run(terminal)?,
            _ => self.exit = true,
        }
        Ok(())
    }

    fn play(&mut self, terminal: &mut DefaultTerminal, edition: Edition) -> io::Result<()> {
        log::info!("starting {} edition", edition.name());
        Guessing::new(edition, &mut self.store, &mut self.rng).run(terminal)
    }

    fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    fn down(&mut self) {
        if self.index + 1 < ITEMS.len() {
            self.index += 1;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &Menu {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let mut constraints = vec![
            Constraint::Length(3), // Title
            Constraint::Min(0),    // ---
        ];
        constraints.extend([Constraint::Length(3); ITEMS.len()]);
        constraints.extend([
            Constraint::Min(0),    // ---
            Constraint::Length(1), // Summary
        ]);

        let vert = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        Paragraph::new("Number Guessing Game")
            .set_style(Color::Blue)
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(vert[0], buf);

        for (i, item) in ITEMS.iter().enumerate() {
            let row = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Min(0),         // ---
                    Constraint::Percentage(30), // Item
                    Constraint::Min(0),         // ---
                ])
                .split(vert[i + 2]);

            widget(&format!("{}. {item}", i + 1), self.index == i, row[1], buf);
        }

        let stats = self.store.stats();
        let summary = match stats.win_rate() {
            Some(rate) => format!(
                "All-time: {}/{} wins ({rate:.1}%)",
                stats.games_won, stats.games_played
            ),
            None => "No games played yet!".to_owned(),
        };
        Paragraph::new(summary)
            .centered()
            .render(vert[ITEMS.len() + 3], buf);
    }
}

fn widget(text: &str, color: bool, area: Rect, buf: &mut ratatui::prelude::Buffer) {
    if color {
        Paragraph::new(text)
            .set_style(Color::LightRed)
            .centered()
            .block(Block::bordered().border_set(border::THICK))
            .render(area, buf);
    } else {
        Paragraph::new(text)
            .centered()
            .block(Block::bordered().border_set(border::THICK))
            .render(area, buf);
    }
}
