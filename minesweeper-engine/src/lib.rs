use core::fmt;
use std::borrow::Borrow;

use board::{Board, BoardExplorer, Pos};
use rand::Rng;
use tracing::debug;

pub use config::GameConfig;
pub use error::{BoardError, InputError};

pub mod board;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod session;

/// What a cell holds, independent of whether the player has seen it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Field {
  Mine,
  /// A safe cell with the number of mines among its eight neighbours.
  Safe(u8),
}

impl Field {
  pub fn is_mine(self) -> bool {
    matches!(self, Field::Mine)
  }

  pub fn is_blank(self) -> bool {
    matches!(self, Field::Safe(0))
  }

  fn notify_mine(field: &mut Field) {
    if let Field::Safe(mines) = field {
      *mines += 1;
      debug_assert!(*mines <= 8);
    }
  }
}

impl fmt::Display for Field {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Field::Mine => write!(f, "*"),
      Field::Safe(mines) => write!(f, "{}", mines),
    }
  }
}

/// A field together with its reveal state.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Cell {
  pub field: Field,
  pub revealed: bool,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum GameOutcome {
  InProgress,
  Lost,
  Won,
}

pub type GameBoard = Board<Field>;
pub type ViewBoard = Board<bool>;

/// The hidden layout of a round: where the mines are and the counts they induce.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GameSetup {
  board: GameBoard,
  mines: u32,
}

impl GameSetup {
  pub fn new(mines: &Board<bool>) -> Self {
    let mut board = GameBoard::new(mines.rows, mines.columns, Field::Safe(0));
    let mut count = 0;
    for (pos, &is_mine) in mines.enumerate() {
      if is_mine {
        count += 1;
        board[pos] = Field::Mine;
        for neighbour_pos in pos.neighbours() {
          if let Some(neighbour) = board.get_mut(neighbour_pos) {
            Field::notify_mine(neighbour);
          }
        }
      }
    }

    GameSetup { board, mines: count }
  }

  pub fn rows(&self) -> u32 {
    self.board.rows
  }

  pub fn columns(&self) -> u32 {
    self.board.columns
  }

  pub fn mines(&self) -> u32 {
    self.mines
  }
}

impl<B: Borrow<GameSetupBuilder>> From<B> for GameSetup {
  fn from(builder: B) -> Self {
    let builder: &GameSetupBuilder = builder.borrow();
    Self::new(&builder.mines)
  }
}

impl fmt::Debug for GameSetup {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for row in 0..self.rows() {
      for col in 0..self.columns() {
        let pos = Pos::new(row as i32, col as i32);
        write!(f, "{}", self.board[pos])?;
      }
      writeln!(f)?;
    }

    Ok(())
  }
}

/// Collects mine positions before the counts are derived.
pub struct GameSetupBuilder {
  mines: Board<bool>,
  placed: u32,
}

impl GameSetupBuilder {
  pub fn new(rows: u32, columns: u32) -> Self {
    Self {
      mines: Board::new(rows, columns, false),
      placed: 0,
    }
  }

  pub fn has_mine(&self, pos: Pos) -> bool {
    self.mines.get(pos).copied().unwrap_or(false)
  }

  pub fn mines(&self) -> u32 {
    self.placed
  }

  pub fn set_mine(&mut self, pos: Pos) -> Result<(), BoardError> {
    let (rows, columns) = (self.mines.rows, self.mines.columns);
    let field = self
      .mines
      .get_mut(pos)
      .ok_or(BoardError::OutOfBounds { pos, rows, columns })?;
    if !*field {
      *field = true;
      self.placed += 1;
    }
    Ok(())
  }

  /// Places `count` further mines on free cells, drawing row and column
  /// uniformly and drawing again whenever the cell is already taken.
  pub fn add_random_mines<R: Rng + ?Sized>(&mut self, count: u32, rng: &mut R) -> Result<(), BoardError> {
    let cells = self.mines.cell_count() as u64;
    if cells == 0 {
      return Err(BoardError::EmptyBoard);
    }
    let total = u64::from(self.placed) + u64::from(count);
    if total >= cells {
      return Err(BoardError::TooManyMines { mines: total, cells });
    }

    for _ in 0..count {
      let pos = loop {
        let pos = Pos::new(
          rng.gen_range(0..self.mines.rows) as i32,
          rng.gen_range(0..self.mines.columns) as i32,
        );
        if !self.has_mine(pos) {
          break pos;
        }
      };
      self.set_mine(pos)?;
    }

    Ok(())
  }
}

/// One round of minesweeper: the setup plus what the player has uncovered.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Game {
  setup: GameSetup,
  view: ViewBoard,
}

impl Game {
  /// Creates a board for `config` with mines placed at random.
  pub fn create<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Game, BoardError> {
    config.validate()?;
    let mut builder = GameSetupBuilder::new(config.rows, config.columns);
    builder.add_random_mines(config.mines, rng)?;
    let game = Game::from(builder);
    debug!(rows = config.rows, columns = config.columns, mines = config.mines, "created board");
    Ok(game)
  }

  pub fn setup(&self) -> &GameSetup {
    &self.setup
  }

  pub fn board(&self) -> &GameBoard {
    &self.setup.board
  }

  pub fn rows(&self) -> u32 {
    self.board().rows
  }

  pub fn columns(&self) -> u32 {
    self.board().columns
  }

  pub fn mine_count(&self) -> u32 {
    self.setup.mines()
  }

  pub fn contains(&self, pos: Pos) -> bool {
    self.board().contains(pos)
  }

  pub fn field(&self, pos: Pos) -> Option<Field> {
    self.board().get(pos).copied()
  }

  pub fn is_revealed(&self, pos: Pos) -> bool {
    self.view.get(pos).copied().unwrap_or(false)
  }

  pub fn cell(&self, pos: Pos) -> Option<Cell> {
    let field = self.field(pos)?;
    Some(Cell {
      field,
      revealed: self.view[pos],
    })
  }

  fn check_bounds(&self, pos: Pos) -> Result<(), BoardError> {
    if self.contains(pos) {
      Ok(())
    } else {
      Err(BoardError::OutOfBounds {
        pos,
        rows: self.rows(),
        columns: self.columns(),
      })
    }
  }

  /// Uncovers `pos` and returns every cell that became visible.
  ///
  /// A mine only uncovers itself. A blank cell also uncovers its whole blank
  /// region together with the numbered cells bordering it. Mines are never
  /// reached that way since a blank cell has no mine neighbours.
  pub fn reveal(&mut self, pos: Pos) -> Result<Vec<Pos>, BoardError> {
    self.check_bounds(pos)?;

    let mut opened = Vec::new();
    if self.board()[pos].is_mine() {
      if !self.view[pos] {
        self.view[pos] = true;
        opened.push(pos);
      }
      return Ok(opened);
    }

    let mut explorer = BoardExplorer::from(self.board());
    explorer.enqueue(pos);

    while let Some(pos) = explorer.pop() {
      if !self.view[pos] {
        self.view[pos] = true;
        opened.push(pos);
      }
      if self.board()[pos].is_blank() {
        explorer.enqueue_all(pos.neighbours());
      }
    }

    debug!(%pos, opened = opened.len(), "revealed");
    Ok(opened)
  }

  pub fn reveal_all_mines(&mut self) {
    let Game { setup, view } = self;
    for (pos, field) in setup.board.enumerate() {
      if field.is_mine() {
        view[pos] = true;
      }
    }
  }

  /// True once every safe cell is visible; mines do not matter.
  pub fn is_complete(&self) -> bool {
    self
      .board()
      .enumerate()
      .all(|(pos, field)| field.is_mine() || self.view[pos])
  }

  pub fn is_lost(&self) -> bool {
    self
      .board()
      .enumerate()
      .any(|(pos, field)| field.is_mine() && self.view[pos])
  }

  pub fn outcome(&self) -> GameOutcome {
    if self.is_lost() {
      GameOutcome::Lost
    } else if self.is_complete() {
      GameOutcome::Won
    } else {
      GameOutcome::InProgress
    }
  }
}

impl From<GameSetup> for Game {
  fn from(setup: GameSetup) -> Self {
    Self {
      view: ViewBoard::new(setup.rows(), setup.columns(), false),
      setup,
    }
  }
}

impl<B: Borrow<GameSetupBuilder>> From<B> for Game {
  fn from(setup: B) -> Self {
    Self::from(GameSetup::from(setup))
  }
}


#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use quickcheck::quickcheck;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::testing::game_with_mines;
  use super::*;

  fn random_game(seed: u64, mines: u8) -> Game {
    let config = GameConfig::new(8, 8, u32::from(mines % 64));
    Game::create(&config, &mut StdRng::seed_from_u64(seed)).unwrap()
  }

  fn revealed_count(game: &Game) -> usize {
    game.board().positions().filter(|&pos| game.is_revealed(pos)).count()
  }

  fn mine_positions(game: &Game) -> Vec<Pos> {
    game
      .board()
      .enumerate()
      .filter(|(_, field)| field.is_mine())
      .map(|(pos, _)| pos)
      .collect()
  }

  quickcheck! {
    fn places_exactly_the_requested_mines(seed: u64, mines: u8) -> bool {
      let game = random_game(seed, mines);
      let positions = mine_positions(&game);
      let unique: HashSet<_> = positions.iter().copied().collect();
      positions.len() as u32 == u32::from(mines % 64)
        && unique.len() == positions.len()
        && game.mine_count() == u32::from(mines % 64)
    }

    fn counts_match_brute_force(seed: u64, mines: u8) -> bool {
      let game = random_game(seed, mines);
      let mines = mine_positions(&game);
      let consistent = game.board().enumerate().all(|(pos, field)| match field {
        Field::Mine => true,
        Field::Safe(count) => {
          let expected = mines.iter().filter(|&&mine| mine.distance(pos) == 1).count();
          usize::from(*count) == expected
        }
      });
      consistent
    }

    fn flood_fill_opens_region_and_border(seed: u64, mines: u8, row: u8, col: u8) -> bool {
      let mut game = random_game(seed, mines % 16);
      let start = Pos::new(i32::from(row % 8), i32::from(col % 8));
      if game.board()[start].is_mine() {
        return true;
      }
      let opened: HashSet<Pos> = game.reveal(start).unwrap().into_iter().collect();

      // recursive walk over blank cells
      fn expand(game: &Game, pos: Pos, seen: &mut HashSet<Pos>) {
        if !seen.insert(pos) || !game.board()[pos].is_blank() {
          return;
        }
        for neighbour in pos.neighbours().filter(|&n| game.contains(n)) {
          expand(game, neighbour, seen);
        }
      }
      let mut expected = HashSet::new();
      expand(&game, start, &mut expected);

      opened == expected
        && opened.iter().all(|&pos| !game.board()[pos].is_mine())
        && game.board().positions().all(|pos| game.is_revealed(pos) == opened.contains(&pos))
    }

    fn complete_iff_all_safe_cells_revealed(seed: u64, mines: u8, reveal_mines: bool) -> bool {
      let mut game = random_game(seed, mines);
      if reveal_mines {
        game.reveal_all_mines();
      }
      let safe: Vec<Pos> = game.board().positions().filter(|&p| !game.board()[p].is_mine()).collect();
      let (last, rest) = match safe.split_last() {
        Some(split) => split,
        None => return true,
      };
      for &pos in rest {
        game.view[pos] = true;
      }
      let before = !game.is_complete();
      game.view[*last] = true;
      before && game.is_complete()
    }
  }

  #[test]
  fn mine_reveal_does_not_cascade() {
    let mut game = game_with_mines(8, 8, &[(0, 0), (0, 1), (5, 5)]);
    assert_eq!(game.reveal(Pos::new(0, 0)), Ok(vec![Pos::new(0, 0)]));
    assert!(!game.is_revealed(Pos::new(0, 1)));
    assert!(!game.is_revealed(Pos::new(5, 5)));
    assert!(!game.is_revealed(Pos::new(1, 1)));
    assert_eq!(game.outcome(), GameOutcome::Lost);

    game.reveal_all_mines();
    assert!(game.is_revealed(Pos::new(0, 1)));
    assert!(game.is_revealed(Pos::new(5, 5)));
    assert!(!game.is_revealed(Pos::new(1, 1)));
  }

  #[test]
  fn empty_board_is_won_with_one_reveal() {
    let mut game = Game::create(&GameConfig::new(8, 8, 0), &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(game.outcome(), GameOutcome::InProgress);
    let opened = game.reveal(Pos::new(3, 4)).unwrap();
    assert_eq!(opened.len(), 64);
    assert!(game.is_complete());
    assert_eq!(game.outcome(), GameOutcome::Won);
  }

  #[test]
  fn corner_mine_stays_hidden() {
    let mut game = game_with_mines(8, 8, &[(0, 0)]);
    assert_eq!(game.field(Pos::new(7, 7)), Some(Field::Safe(0)));
    let opened = game.reveal(Pos::new(7, 7)).unwrap();
    assert_eq!(opened.len(), 63);
    assert!(!game.is_revealed(Pos::new(0, 0)));
    assert_eq!(game.outcome(), GameOutcome::Won);
  }

  #[test]
  fn numbered_cell_reveals_only_itself() {
    let mut game = game_with_mines(8, 8, &[(0, 0)]);
    assert_eq!(game.field(Pos::new(1, 1)), Some(Field::Safe(1)));
    assert_eq!(game.reveal(Pos::new(1, 1)), Ok(vec![Pos::new(1, 1)]));
    assert_eq!(revealed_count(&game), 1);
    assert_eq!(game.reveal(Pos::new(1, 1)), Ok(vec![]));
  }

  #[test]
  fn reveal_outside_fails() {
    let mut game = game_with_mines(8, 8, &[]);
    assert_eq!(
      game.reveal(Pos::new(9, 9)),
      Err(BoardError::OutOfBounds {
        pos: Pos::new(9, 9),
        rows: 8,
        columns: 8
      })
    );
    assert_eq!(revealed_count(&game), 0);
  }

  #[test]
  fn counts_around_a_cluster() {
    let game = game_with_mines(3, 3, &[(0, 0), (0, 2), (2, 1)]);
    assert_eq!(format!("{:?}", game.setup()), "*2*\n232\n1*1\n");
    assert_eq!(game.cell(Pos::new(1, 1)), Some(Cell { field: Field::Safe(3), revealed: false }));
    assert_eq!(game.cell(Pos::new(3, 0)), None);
  }

  #[test]
  fn random_mines_need_a_safe_cell() {
    let mut builder = GameSetupBuilder::new(2, 2);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
      builder.add_random_mines(4, &mut rng),
      Err(BoardError::TooManyMines { mines: 4, cells: 4 })
    );
    assert_eq!(builder.add_random_mines(3, &mut rng), Ok(()));
    assert_eq!(builder.mines(), 3);
  }

  #[test]
  fn set_mine_twice_counts_once() {
    let mut builder = GameSetupBuilder::new(2, 2);
    builder.set_mine(Pos::new(1, 1)).unwrap();
    builder.set_mine(Pos::new(1, 1)).unwrap();
    assert_eq!(builder.mines(), 1);
    assert!(builder.set_mine(Pos::new(2, 0)).is_err());
  }
}
