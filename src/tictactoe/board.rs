//! 3x3 board, marks, and terminal evaluation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Number of cells.
pub const CELLS: usize = 9;

/// The 8 winning triples: rows, columns, diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Player symbol. X always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Terminal check result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    InProgress,
    Win { mark: Mark, line: [usize; 3] },
    Draw,
}

impl Evaluation {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Evaluation::InProgress)
    }

    #[must_use]
    pub fn winner(self) -> Option<Mark> {
        match self {
            Evaluation::Win { mark, .. } => Some(mark),
            _ => None,
        }
    }
}

/// Empty cells, at most nine.
pub type EmptyCells = SmallVec<[usize; CELLS]>;

/// Tic-tac-toe board. `Copy`, so search can work on snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cells(cells: [Option<Mark>; CELLS]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Mark>; CELLS] {
        &self.cells
    }

    /// `None` past the end, `Some(None)` for an empty cell.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Option<Mark>> {
        self.cells.get(index).copied()
    }

    #[must_use]
    pub fn is_empty_at(&self, index: usize) -> bool {
        matches!(self.get(index), Some(None))
    }

    /// Copy of this board with `mark` at `index`. Caller checks the cell.
    #[must_use]
    pub fn with_move(mut self, index: usize, mark: Mark) -> Self {
        self.cells[index] = Some(mark);
        self
    }

    pub(crate) fn place(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Some(mark);
    }

    #[must_use]
    pub fn empty_cells(&self) -> EmptyCells {
        (0..CELLS).filter(|&i| self.cells[i].is_none()).collect()
    }

    #[must_use]
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Side to move, assuming X started.
    #[must_use]
    pub fn side_to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    /// X has made as many moves as O, or one more.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        x == o || x == o + 1
    }

    /// First completed line in `WIN_LINES` order, else draw if full,
    /// else in progress.
    #[must_use]
    pub fn evaluate(&self) -> Evaluation {
        for line in WIN_LINES {
            let [a, b, c] = line;
            if let Some(mark) = self.cells[a] {
                if self.cells[b] == Some(mark) && self.cells[c] == Some(mark) {
                    return Evaluation::Win { mark, line };
                }
            }
        }
        if self.is_full() {
            Evaluation::Draw
        } else {
            Evaluation::InProgress
        }
    }
}

/// Bad board literal.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 9 cells, found {0}")]
    Length(usize),
    #[error("unexpected character {0:?}")]
    Char(char),
}

/// Parses nine cells of `X`, `O`, and `_`/`.`; whitespace is ignored.
///
/// ```
/// use portfolio_games::tictactoe::{Board, Mark};
///
/// let board: Board = "XX_ OO_ ___".parse().unwrap();
/// assert_eq!(board.get(3), Some(Some(Mark::O)));
/// ```
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; CELLS];
        let mut n = 0;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '_' | '.' => None,
                other => return Err(ParseBoardError::Char(other)),
            };
            if n < CELLS {
                cells[n] = cell;
            }
            n += 1;
        }
        if n != CELLS {
            return Err(ParseBoardError::Length(n));
        }
        Ok(Self { cells })
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(3) {
            let line: String = row.iter().map(|c| c.map_or('_', Mark::as_char)).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
