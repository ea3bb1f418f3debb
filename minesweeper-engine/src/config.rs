use crate::error::BoardError;

pub const DEFAULT_ROWS: u32 = 8;
pub const DEFAULT_COLUMNS: u32 = 8;
pub const DEFAULT_MINES: u32 = 8;

/// Board dimensions and mine count for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameConfig {
  pub rows: u32,
  pub columns: u32,
  pub mines: u32,
}

impl GameConfig {
  pub fn new(rows: u32, columns: u32, mines: u32) -> Self {
    Self { rows, columns, mines }
  }

  pub fn cells(&self) -> u64 {
    u64::from(self.rows) * u64::from(self.columns)
  }

  pub fn validate(&self) -> Result<(), BoardError> {
    if self.rows == 0 || self.columns == 0 {
      return Err(BoardError::EmptyBoard);
    }
    if u64::from(self.mines) >= self.cells() {
      return Err(BoardError::TooManyMines {
        mines: u64::from(self.mines),
        cells: self.cells(),
      });
    }
    Ok(())
  }
}

impl Default for GameConfig {
  fn default() -> Self {
    Self::new(DEFAULT_ROWS, DEFAULT_COLUMNS, DEFAULT_MINES)
  }
}
