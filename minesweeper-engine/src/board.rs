use core::fmt;
use std::collections::VecDeque;
use std::ops::{Add, Index, IndexMut};

// row, column offsets of the eight surrounding cells
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
  (-1, -1),
  (-1, 0),
  (-1, 1),
  (0, -1),
  (0, 1),
  (1, -1),
  (1, 0),
  (1, 1),
];

/// A cell coordinate. Components are signed so that neighbour offsets may
/// point off the board; the board itself decides what is in range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
  pub row: i32,
  pub col: i32,
}

impl Pos {
  pub const fn new(row: i32, col: i32) -> Pos {
    Pos { row, col }
  }

  pub fn neighbours(self) -> impl Iterator<Item = Pos> {
    NEIGHBOUR_OFFSETS
      .iter()
      .map(move |&(row, col)| self + Pos::new(row, col))
  }

  /// Chebyshev distance, i.e. the number of king moves between two cells.
  pub fn distance(self, other: Pos) -> u32 {
    self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
  }
}

impl fmt::Debug for Pos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.row, self.col)
  }
}

impl fmt::Display for Pos {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{},{}", self.row, self.col)
  }
}

impl Add<Pos> for Pos {
  type Output = Pos;

  fn add(self, rhs: Pos) -> Self::Output {
    Pos::new(self.row + rhs.row, self.col + rhs.col)
  }
}

/// Dense row-major grid.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board<T> {
  pub rows: u32,
  pub columns: u32,
  cells: Vec<T>,
}

impl<T> Board<T> {
  /// # Panics
  ///
  /// If `rows * columns` does not fit in `usize`.
  pub fn new(rows: u32, columns: u32, default: T) -> Self
  where
    T: Clone,
  {
    let len = (rows as usize)
      .checked_mul(columns as usize)
      .unwrap_or_else(|| panic!("a {}x{} board does not fit in memory", rows, columns));
    Self {
      rows,
      columns,
      cells: vec![default; len],
    }
  }

  fn index_of(&self, pos: Pos) -> Option<usize> {
    let row = u32::try_from(pos.row).ok().filter(|&row| row < self.rows)?;
    let col = u32::try_from(pos.col).ok().filter(|&col| col < self.columns)?;
    Some(row as usize * self.columns as usize + col as usize)
  }

  pub fn contains(&self, pos: Pos) -> bool {
    self.index_of(pos).is_some()
  }

  pub fn get(&self, pos: Pos) -> Option<&T> {
    let index = self.index_of(pos)?;
    self.cells.get(index)
  }

  pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
    let index = self.index_of(pos)?;
    self.cells.get_mut(index)
  }

  /// Every position on the board, row by row.
  pub fn positions(&self) -> impl Iterator<Item = Pos> {
    let (rows, columns) = (self.rows as i32, self.columns as i32);
    (0..rows).flat_map(move |row| (0..columns).map(move |col| Pos::new(row, col)))
  }

  pub fn enumerate(&self) -> impl Iterator<Item = (Pos, &T)> {
    self.positions().zip(&self.cells)
  }

  pub fn cell_count(&self) -> usize {
    self.cells.len()
  }
}

impl<T> Index<Pos> for Board<T> {
  type Output = T;

  fn index(&self, pos: Pos) -> &T {
    match self.index_of(pos) {
      Some(index) => &self.cells[index],
      None => panic!("{:?} is outside of the {}x{} board", pos, self.rows, self.columns),
    }
  }
}

impl<T> IndexMut<Pos> for Board<T> {
  fn index_mut(&mut self, pos: Pos) -> &mut T {
    match self.index_of(pos) {
      Some(index) => &mut self.cells[index],
      None => panic!("{:?} is outside of the {}x{} board", pos, self.rows, self.columns),
    }
  }
}

/// Breadth-first worklist for flood fills. A position is handed out at most
/// once; positions off the board are dropped.
#[derive(Clone)]
pub struct BoardExplorer {
  queue: VecDeque<Pos>,
  visited: Board<bool>,
}

impl BoardExplorer {
  pub fn enqueue(&mut self, pos: Pos) -> bool {
    match self.visited.get_mut(pos) {
      Some(seen) if !*seen => {
        *seen = true;
        self.queue.push_back(pos);
        true
      }
      _ => false,
    }
  }

  pub fn enqueue_all(&mut self, all: impl IntoIterator<Item = Pos>) {
    all.into_iter().for_each(|pos| {
      self.enqueue(pos);
    });
  }

  pub fn pop(&mut self) -> Option<Pos> {
    self.queue.pop_front()
  }
}

impl<T> From<&Board<T>> for BoardExplorer {
  fn from(board: &Board<T>) -> Self {
    Self {
      queue: VecDeque::new(),
      visited: Board::new(board.rows, board.columns, false),
    }
  }
}
