use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// A cell holds a digit 1..=9 or nothing.
pub type CellValue = Option<u8>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("expected 81 digits/dots, got {0}")]
    WrongLength(usize),
}

/// 9x9 Sudoku grid. Serializes as bare nested arrays of integers/null,
/// which is the shape the storage layer persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    pub(crate) cells: [[CellValue; 9]; 9],
}

impl Grid {
    pub fn empty() -> Self {
        Self { cells: [[None; 9]; 9] }
    }

    /// Build from rows of digits, 0 meaning empty.
    pub fn from_rows(rows: [[u8; 9]; 9]) -> Self {
        let mut g = Self::empty();
        for r in 0..9 {
            for c in 0..9 {
                let v = rows[r][c];
                g.cells[r][c] = if v == 0 { None } else { Some(v) };
            }
        }
        g
    }

    /// Accepts 81 characters of digits with `0`/`.`/`_` for blanks;
    /// whitespace and separators are ignored.
    pub fn parse(text: &str) -> Result<Self, ParseGridError> {
        let mut values = Vec::with_capacity(81);
        for ch in text.chars() {
            match ch {
                '1'..='9' => values.push(Some(ch as u8 - b'0')),
                '0' | '.' | '_' => values.push(None),
                _ => {}
            }
        }
        if values.len() != 81 {
            return Err(ParseGridError::WrongLength(values.len()));
        }
        let mut g = Self::empty();
        for (i, v) in values.into_iter().enumerate() {
            g.cells[i / 9][i % 9] = v;
        }
        Ok(g)
    }

    pub fn to_compact(&self) -> String {
        self.cells
            .iter()
            .flatten()
            .map(|v| match v {
                Some(d) => (b'0' + d) as char,
                None => '.',
            })
            .collect()
    }

    pub fn get(&self, row: usize, col: usize) -> CellValue {
        self.cells[row][col]
    }

    /// `value` must be `None` or `Some(1..=9)`.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        self.cells[row][col] = value;
    }

    pub fn rows(&self) -> &[[CellValue; 9]; 9] {
        &self.cells
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|v| v.is_some())
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|v| v.is_none()).count()
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    pub(crate) fn swap_cols(&mut self, a: usize, b: usize) {
        for row in &mut self.cells {
            row.swap(a, b);
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..9 {
            if r % 3 == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            for c in 0..9 {
                if c % 3 == 0 {
                    write!(f, "| ")?;
                }
                match self.cells[r][c] {
                    Some(d) => write!(f, "{} ", d)?,
                    None => write!(f, "· ")?,
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "+-------+-------+-------+")
    }
}
