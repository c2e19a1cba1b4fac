use crossterm::{
    cursor, execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// Draws the countdown on a single, continuously rewritten terminal line.
pub struct Renderer {
    bar_width: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer { bar_width: 20 }
    }

    pub fn draw(&self, remaining_secs: u64, total_secs: u64) -> io::Result<()> {
        let progress = if total_secs > 0 {
            1.0 - (remaining_secs as f64 / total_secs as f64)
        } else {
            1.0
        };
        let filled = ((progress * self.bar_width as f64) as usize).min(self.bar_width);
        let empty = self.bar_width - filled;

        // green → yellow (last 20%) → red (last 60s)
        let bar_color = if remaining_secs <= 60 {
            Color::Red
        } else if remaining_secs as f64 <= total_secs as f64 * 0.2 {
            Color::Yellow
        } else {
            Color::Green
        };

        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
            Print("⏳ "),
            SetAttribute(Attribute::Bold),
            Print(format_clock(remaining_secs)),
            SetAttribute(Attribute::Reset),
            Print(" remaining "),
            SetForegroundColor(bar_color),
            Print("\u{2588}".repeat(filled)),
            SetForegroundColor(Color::DarkGrey),
            Print("\u{2591}".repeat(empty)),
            ResetColor,
        )?;
        stdout.flush()
    }

    pub fn clear(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::MoveToColumn(0),
            terminal::Clear(ClearType::CurrentLine),
        )?;
        stdout.flush()
    }
}

/// `MM:SS`, switching to `H:MM:SS` past an hour.
pub fn format_clock(secs: u64) -> String {
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}
