//! A single bi-infinite tape addressed by signed positions.
//!
//! Only the seeded input and whatever was written outside of it are stored.
//! Every other position reads as [`BLANK_SYMBOL`].

use crate::types::BLANK_SYMBOL;
use std::collections::VecDeque;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tape {
    cells: VecDeque<char>,
    /// Position of `cells[0]`. Negative once the tape has grown to the left.
    origin: isize,
    /// Number of cells seeded from the input, starting at position 0.
    seeded: usize,
}

impl Tape {
    /// Creates a tape holding one symbol per character of `input`, starting at position 0.
    pub fn new(input: &str) -> Self {
        let cells: VecDeque<char> = input.chars().collect();
        let seeded = cells.len();

        Self {
            cells,
            origin: 0,
            seeded,
        }
    }

    /// Returns the symbol at `position`, or the blank symbol outside the stored extent.
    pub fn read(&self, position: isize) -> char {
        self.index(position)
            .and_then(|i| self.cells.get(i).copied())
            .unwrap_or(BLANK_SYMBOL)
    }

    /// Writes `symbol` at `position`, growing the tape with blanks as needed.
    pub fn write(&mut self, position: isize, symbol: char) {
        if let Some(i) = self.index(position) {
            self.cells[i] = symbol;
            if symbol == BLANK_SYMBOL {
                self.trim();
            }
            return;
        }

        // Outside the stored extent a blank is already there.
        if symbol == BLANK_SYMBOL {
            return;
        }

        if position < self.origin {
            for _ in position..self.origin {
                self.cells.push_front(BLANK_SYMBOL);
            }
            self.origin = position;
            self.cells[0] = symbol;
        } else {
            let end = self.end();
            for _ in end..position {
                self.cells.push_back(BLANK_SYMBOL);
            }
            self.cells.push_back(symbol);
        }
    }

    /// Returns a copy of the stored cells, leftmost first.
    pub fn to_vec(&self) -> Vec<char> {
        self.cells.iter().copied().collect()
    }

    /// The range of positions currently stored.
    pub fn bounds(&self) -> Range<isize> {
        self.origin..self.end()
    }

    /// Position of the leftmost stored cell.
    pub fn origin(&self) -> isize {
        self.origin
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn end(&self) -> isize {
        self.origin + self.cells.len() as isize
    }

    fn index(&self, position: isize) -> Option<usize> {
        if self.bounds().contains(&position) {
            usize::try_from(position - self.origin).ok()
        } else {
            None
        }
    }

    /// Drops blank cells at either edge that lie outside the seeded input.
    fn trim(&mut self) {
        while self.origin < 0 && self.cells.front() == Some(&BLANK_SYMBOL) {
            self.cells.pop_front();
            self.origin += 1;
        }

        while self.end() > self.seeded as isize && self.cells.back() == Some(&BLANK_SYMBOL) {
            self.cells.pop_back();
        }
    }
}

impl From<&str> for Tape {
    fn from(input: &str) -> Self {
        Tape::new(input)
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cells.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
