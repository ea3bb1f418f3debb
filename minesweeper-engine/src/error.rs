use crate::board::Pos;

/// The error type for building and playing a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
  OutOfBounds { pos: Pos, rows: u32, columns: u32 },
  TooManyMines { mines: u64, cells: u64 },
  EmptyBoard,
}

impl std::error::Error for BoardError {}

impl std::fmt::Display for BoardError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BoardError::OutOfBounds { pos, rows, columns } => write!(
        f,
        "Position {} is outside of the {}x{} board",
        pos, rows, columns
      ),
      BoardError::TooManyMines { mines, cells } => write!(
        f,
        "Cannot place {} mines on a board with {} cells, at least one cell must stay safe",
        mines, cells
      ),
      BoardError::EmptyBoard => write!(f, "The board needs at least one row and one column"),
    }
  }
}

/// Rejected player input. The session answers these with a new prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
  InvalidMoveFormat { input: String },
  MoveOutOfBounds { row: u32, col: u32, rows: u32, columns: u32 },
  InvalidReplayAnswer { input: String },
}

impl std::error::Error for InputError {}

impl std::fmt::Display for InputError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      InputError::InvalidMoveFormat { input } => {
        write!(f, "'{}' is not a move, expected row,column", input)
      }
      InputError::MoveOutOfBounds { row, col, rows, columns } => write!(
        f,
        "{},{} is off the board, rows go from 0 to {} and columns from 0 to {}",
        row,
        col,
        rows.saturating_sub(1),
        columns.saturating_sub(1)
      ),
      InputError::InvalidReplayAnswer { input } => {
        write!(f, "'{}' is neither y nor n", input)
      }
    }
  }
}
