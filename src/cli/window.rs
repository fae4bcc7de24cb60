use std::io::{stdout, Write};

use crossterm::{cursor, terminal, QueueableCommand};

/// A single line noting progress through a stage, redrawn in place.
pub struct ProgressLine {
    label: &'static str,
    drawn: bool,
}

impl ProgressLine {
    pub fn new(label: &'static str) -> Self {
        ProgressLine { label, drawn: false }
    }

    #[allow(unused_must_use)]
    pub fn update(&mut self, done: usize, total: usize) {
        let mut stdout = stdout();

        stdout.queue(cursor::MoveToColumn(0));
        stdout.queue(terminal::Clear(terminal::ClearType::CurrentLine));
        write!(stdout, "c {:<24} {done:>5}/{total}", self.label);
        stdout.flush();

        self.drawn = true;
    }

    /// Moves past the line, if drawn.
    pub fn finish(&mut self) {
        if self.drawn {
            println!();
            self.drawn = false;
        }
    }
}
