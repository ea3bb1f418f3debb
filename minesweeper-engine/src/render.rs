use std::fmt;

use crate::board::Pos;
use crate::{Field, Game};

const MINE: &str = "*";

fn digits(n: u32) -> usize {
  n.to_string().len()
}

/// Draws the board as a text grid.
///
/// Hidden cells show their own `row,col` so the player can type them back in;
/// revealed cells show `*` for a mine or the number of neighbouring mines.
pub fn render(game: &Game) -> String {
  BoardView(game).to_string()
}

/// `Display` adapter behind [`render`].
pub struct BoardView<'a>(pub &'a Game);

impl fmt::Display for BoardView<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let game = self.0;
    let (rows, columns) = (game.rows(), game.columns());
    let label_width = digits(rows.saturating_sub(1));
    let cell_width = label_width + digits(columns.saturating_sub(1)) + 4;
    let padding = " ".repeat(label_width + 1);
    let divider = format!("{}{}", padding, "-".repeat((cell_width + 1) * columns as usize));

    write!(f, "{}", padding)?;
    for col in 0..columns {
      write!(f, "{:^w$} ", col, w = cell_width)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", divider)?;

    for row in 0..rows {
      write!(f, "{:>w$}|", row, w = label_width)?;
      for col in 0..columns {
        let pos = Pos::new(row as i32, col as i32);
        let text = match game.field(pos) {
          Some(Field::Mine) if game.is_revealed(pos) => MINE.to_owned(),
          Some(Field::Safe(mines)) if game.is_revealed(pos) => mines.to_string(),
          _ => pos.to_string(),
        };
        write!(f, "{:^w$}|", text, w = cell_width)?;
      }
      writeln!(f)?;
      writeln!(f, "{}", divider)?;
    }

    Ok(())
  }
}
