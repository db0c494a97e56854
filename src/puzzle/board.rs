//! 4x4 tile permutation.
//!
//! Cells are stored row-major. Each holds a tile `1..=15` or `None` for the
//! single empty cell. Every mutation is a swap with the empty cell, so the
//! multiset of values never changes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Side length of the grid.
pub const SIDE: usize = 4;

/// Number of cells.
pub const CELLS: usize = SIDE * SIDE;

/// One cell: a tile number, or `None` for the empty cell.
pub type Tile = Option<u8>;

/// Indices adjacent to the empty cell. At most four, never heap-allocated.
pub type LegalMoves = SmallVec<[usize; 4]>;

/// Sliding puzzle board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleBoard {
    cells: [Tile; CELLS],
}

impl Default for PuzzleBoard {
    fn default() -> Self {
        Self::solved()
    }
}

impl PuzzleBoard {
    /// Tiles 1..15 in order, empty cell last.
    #[must_use]
    pub fn solved() -> Self {
        let mut cells = [None; CELLS];
        for (i, cell) in cells.iter_mut().take(CELLS - 1).enumerate() {
            *cell = Some(i as u8 + 1);
        }
        Self { cells }
    }

    /// Build from raw cells. Returns `None` unless the cells hold exactly
    /// `1..=15` plus one empty cell.
    #[must_use]
    pub fn from_cells(cells: [Tile; CELLS]) -> Option<Self> {
        let board = Self { cells };
        board.is_permutation().then_some(board)
    }

    /// Row-major cell values.
    #[must_use]
    pub fn cells(&self) -> &[Tile; CELLS] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<Tile> {
        self.cells.get(index).copied()
    }

    /// Index of the empty cell.
    #[must_use]
    pub fn empty_index(&self) -> usize {
        // Construction guarantees exactly one empty cell.
        self.cells.iter().position(Option::is_none).unwrap_or(CELLS - 1)
    }

    /// Indices orthogonally adjacent to the empty cell, in the order
    /// up, down, left, right.
    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        neighbors(self.empty_index())
    }

    /// Whether `index` may slide into the empty cell.
    #[must_use]
    pub fn is_legal(&self, index: usize) -> bool {
        self.legal_moves().contains(&index)
    }

    /// Swap `index` with the empty cell. Caller checks legality.
    pub(crate) fn swap_with_empty(&mut self, index: usize) {
        let empty = self.empty_index();
        self.cells.swap(index, empty);
    }

    /// Cell `i < 15` holds `i + 1` and the last cell is empty.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(i, &v)| if i < CELLS - 1 { v == Some(i as u8 + 1) } else { v.is_none() })
    }

    /// Cells hold exactly `{1..=15, empty}`.
    #[must_use]
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; CELLS];
        for cell in &self.cells {
            let slot = match cell {
                None => 0,
                Some(v @ 1..=15) => *v as usize,
                Some(_) => return false,
            };
            if seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        true
    }

    /// Inversion-parity solvability test for an even-width grid.
    ///
    /// Solvable iff inversions plus the empty cell's row counted from the
    /// bottom (1-based) is odd.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        let tiles: SmallVec<[u8; CELLS]> = self.cells.iter().flatten().copied().collect();
        let mut inversions = 0usize;
        for i in 0..tiles.len() {
            for j in i + 1..tiles.len() {
                if tiles[i] > tiles[j] {
                    inversions += 1;
                }
            }
        }
        let row_from_bottom = SIDE - self.empty_index() / SIDE;
        (inversions + row_from_bottom) % 2 == 1
    }

    /// Number of tiles not on their home cell.
    #[must_use]
    pub fn misplaced(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(i, v)| matches!(v, Some(t) if *t as usize != i + 1))
            .count()
    }
}

/// Orthogonal neighbors of `index`, bounds-checked by row and column.
#[must_use]
pub fn neighbors(index: usize) -> LegalMoves {
    let row = index / SIDE;
    let col = index % SIDE;
    let mut out = LegalMoves::new();

    if row > 0 {
        out.push(index - SIDE);
    }
    if row < SIDE - 1 {
        out.push(index + SIDE);
    }
    if col > 0 {
        out.push(index - 1);
    }
    if col < SIDE - 1 {
        out.push(index + 1);
    }
    out
}

impl std::fmt::Display for PuzzleBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(SIDE) {
            let line: Vec<String> = row
                .iter()
                .map(|c| c.map_or_else(|| " .".to_string(), |v| format!("{v:2}")))
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(moves: LegalMoves) -> Vec<usize> {
        let mut v = moves.to_vec();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_solved_layout() {
        let board = PuzzleBoard::solved();
        assert_eq!(board.get(0), Some(Some(1)));
        assert_eq!(board.get(14), Some(Some(15)));
        assert_eq!(board.get(15), Some(None));
        assert_eq!(board.get(16), None);
        assert_eq!(board.empty_index(), 15);
        assert!(board.is_solved());
        assert!(board.is_permutation());
        assert!(board.is_solvable());
        assert_eq!(board.misplaced(), 0);
    }

    #[test]
    fn test_neighbor_counts() {
        for index in 0..CELLS {
            let row = index / SIDE;
            let col = index % SIDE;
            let edges = usize::from(row == 0 || row == SIDE - 1) + usize::from(col == 0 || col == SIDE - 1);
            let expected = 4 - edges;
            assert_eq!(neighbors(index).len(), expected, "index {index}");
        }
    }

    #[test]
    fn test_neighbor_order() {
        assert_eq!(neighbors(5).as_slice(), &[1, 9, 4, 6]);
        assert_eq!(neighbors(15).as_slice(), &[11, 14]);
        assert_eq!(sorted(neighbors(0)), vec![1, 4]);
        assert_eq!(sorted(neighbors(3)), vec![2, 7]);
    }

    #[test]
    fn test_no_wraparound() {
        // Index 4 is the start of row 1; index 3 is the end of row 0.
        assert!(!neighbors(4).contains(&3));
        assert!(!neighbors(3).contains(&4));
    }

    #[test]
    fn test_swap_and_unswap() {
        let mut board = PuzzleBoard::solved();
        board.swap_with_empty(11);
        assert_eq!(board.empty_index(), 11);
        assert_eq!(board.get(15), Some(Some(12)));
        assert!(!board.is_solved());
        assert!(board.is_solvable());

        board.swap_with_empty(15);
        assert!(board.is_solved());
    }

    #[test]
    fn test_from_cells_rejects_bad_multisets() {
        let mut cells = *PuzzleBoard::solved().cells();
        cells[0] = Some(2);
        assert!(PuzzleBoard::from_cells(cells).is_none());

        let mut cells = *PuzzleBoard::solved().cells();
        cells[0] = None;
        assert!(PuzzleBoard::from_cells(cells).is_none());

        let mut cells = *PuzzleBoard::solved().cells();
        cells[0] = Some(16);
        assert!(PuzzleBoard::from_cells(cells).is_none());
    }

    #[test]
    fn test_single_transposition_is_unsolvable() {
        let mut cells = *PuzzleBoard::solved().cells();
        cells.swap(13, 14);
        let board = PuzzleBoard::from_cells(cells).unwrap();
        assert!(!board.is_solvable());
    }

    #[test]
    fn test_display() {
        let text = PuzzleBoard::solved().to_string();
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().last().unwrap().ends_with(" ."));
    }
}
