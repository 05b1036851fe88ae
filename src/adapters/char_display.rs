//! In-memory 16x2 character display.
//!
//! Implements [`DisplayPort`] by writing into a frame buffer, the way an
//! HD44780-style controller's DDRAM behaves: characters stay until
//! overwritten, and text past the end of a row is dropped.

use core::fmt::Write as _;

use heapless::String;

use crate::app::ports::DisplayPort;

pub const ROWS: usize = 2;
pub const COLS: usize = 16;

pub struct CharDisplay {
    cells: [[u8; COLS]; ROWS],
    writes: u32,
}

impl CharDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLS]; ROWS],
            writes: 0,
        }
    }

    /// Contents of a 1-based row. Out-of-range rows read as empty.
    pub fn line(&self, row: u8) -> String<COLS> {
        let mut out = String::new();
        if let Some(cells) = Self::row_index(row).map(|r| &self.cells[r]) {
            for &c in cells {
                // Capacity equals COLS, so this cannot fail.
                let _ = out.push(c as char);
            }
        }
        out
    }

    /// Number of set_text / set_number calls so far.
    pub fn writes(&self) -> u32 {
        self.writes
    }

    fn row_index(row: u8) -> Option<usize> {
        let r = usize::from(row).checked_sub(1)?;
        (r < ROWS).then_some(r)
    }

    fn put(&mut self, row: u8, col: u8, bytes: &[u8]) {
        self.writes += 1;
        let (Some(r), Some(start)) = (Self::row_index(row), usize::from(col).checked_sub(1))
        else {
            log::trace!("display: write outside panel at ({}, {})", row, col);
            return;
        };
        for (offset, &b) in bytes.iter().enumerate() {
            let c = start + offset;
            if c >= COLS {
                break;
            }
            self.cells[r][c] = if b.is_ascii() { b } else { b'?' };
        }
    }
}

impl Default for CharDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for CharDisplay {
    fn set_text(&mut self, row: u8, col: u8, text: &str) {
        self.put(row, col, text.as_bytes());
    }

    fn set_number(&mut self, row: u8, col: u8, value: u32, width: u8) {
        let mut digits: String<10> = String::new();
        // u32::MAX has 10 digits; the width is clamped to the same bound.
        let width = usize::from(width).min(10);
        let _ = write!(digits, "{:0width$}", value, width = width);
        self.put(row, col, digits.as_bytes());
    }
}
