//! Parsing of the two kinds of lines a player types: moves and replay answers.

use crate::board::Pos;
use crate::error::InputError;

/// Parses `row,col` and checks it against a `rows` x `columns` board.
pub fn parse_move(text: &str, rows: u32, columns: u32) -> Result<Pos, InputError> {
  let text = text.trim();
  let invalid = || InputError::InvalidMoveFormat { input: text.to_owned() };

  let (row, col) = text.split_once(',').ok_or_else(invalid)?;
  let row: u32 = row.trim().parse().map_err(|_| invalid())?;
  let col: u32 = col.trim().parse().map_err(|_| invalid())?;

  if row >= rows || col >= columns {
    return Err(InputError::MoveOutOfBounds { row, col, rows, columns });
  }
  Ok(Pos::new(row as i32, col as i32))
}

/// `y` means play again, `n` means stop. Case does not matter.
pub fn parse_replay(text: &str) -> Result<bool, InputError> {
  match text.trim() {
    "y" | "Y" => Ok(true),
    "n" | "N" => Ok(false),
    other => Err(InputError::InvalidReplayAnswer { input: other.to_owned() }),
  }
}
