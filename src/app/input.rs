use thiserror::Error;

const MAX_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Type a number first!")]
    Empty,
    #[error("Please enter a valid number!")]
    NotANumber,
    #[error("Please enter a number between {min} and {max}!")]
    OutOfRange { min: u32, max: u32 },
}

pub fn parse_bounded(text: &str, min: u32, max: u32) -> Result<u32, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    let value: i64 = text.parse().map_err(|_| InputError::NotANumber)?;
    if value < min as i64 || value > max as i64 {
        return Err(InputError::OutOfRange { min, max });
    }

    Ok(value as u32)
}

/// A line of typed text that only lets go of a value in `min..=max`.
/// Anything else is rejected, the buffer is cleared and the player is
/// asked again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedInput {
    min: u32,
    max: u32,
    text: String,
    error: Option<InputError>,
}

impl BoundedInput {
    pub fn new(min: u32, max: u32) -> Self {
        Self {
            min,
            max,
            text: String::new(),
            error: None,
        }
    }

    pub fn push(&mut self, ch: char) {
        if self.text.chars().count() < MAX_LEN && !ch.is_control() {
            self.text.push(ch);
        }
    }

    pub fn pop(&mut self) {
        let _ = self.text.pop();
    }

    pub fn submit(&mut self) -> Option<u32> {
        let parsed = parse_bounded(&self.text, self.min, self.max);
        self.text.clear();

        match parsed {
            Ok(value) => {
                self.error = None;
                Some(value)
            }
            Err(err) => {
                log::debug!("rejected input: {err}");
                self.error = Some(err);
                None
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<InputError> {
        self.error
    }

    pub fn prompt(&self) -> String {
        format!("({}-{})", self.min, self.max)
    }
}
