//! The interactive game loop, kept apart from any concrete terminal.

use std::io;

use rand::Rng;
use tracing::{debug, info};

use crate::board::Pos;
use crate::input::{parse_move, parse_replay};
use crate::render::render;
use crate::{BoardError, Game, GameConfig, GameOutcome};

pub const MOVE_PROMPT: &str = "Enter the row,column where you would like to move next:";
pub const LOST_PROMPT: &str = "You have lost! Play again? (y or n)";
pub const WON_PROMPT: &str = "You won! Play again? (y or n)";

/// Where the player's lines come from.
pub trait Prompt {
  /// Shows `prompt` and waits for one line. `None` means the input is closed.
  fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Where boards are shown.
pub trait Screen {
  fn write_screen(&mut self, text: &str) -> io::Result<()>;
}

impl<P: Prompt + ?Sized> Prompt for &mut P {
  fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
    (**self).ask_line(prompt)
  }
}

impl<S: Screen + ?Sized> Screen for &mut S {
  fn write_screen(&mut self, text: &str) -> io::Result<()> {
    (**self).write_screen(text)
  }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
  pub rounds: u32,
  pub wins: u32,
  pub losses: u32,
}

/// How a finished round ended and whether the player wants another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundEnd {
  pub outcome: GameOutcome,
  pub play_again: bool,
}

pub struct Session<P, S, R> {
  config: GameConfig,
  prompt: P,
  screen: S,
  rng: R,
  stats: SessionStats,
}

fn invalid_board(err: BoardError) -> io::Error {
  io::Error::new(io::ErrorKind::InvalidInput, err)
}

impl<P: Prompt, S: Screen, R: Rng> Session<P, S, R> {
  pub fn new(config: GameConfig, prompt: P, screen: S, rng: R) -> Result<Self, BoardError> {
    config.validate()?;
    Ok(Self {
      config,
      prompt,
      screen,
      rng,
      stats: SessionStats::default(),
    })
  }

  pub fn stats(&self) -> SessionStats {
    self.stats
  }

  /// Plays rounds until the player declines another one or the input closes.
  pub fn run(&mut self) -> io::Result<SessionStats> {
    while let Some(end) = self.play_round()? {
      if !end.play_again {
        break;
      }
    }
    Ok(self.stats)
  }

  /// Plays one round on a fresh board. Returns `None` if the input closed
  /// before the round was decided or before the replay question was answered.
  pub fn play_round(&mut self) -> io::Result<Option<RoundEnd>> {
    let mut game = Game::create(&self.config, &mut self.rng).map_err(invalid_board)?;
    self.stats.rounds += 1;

    let outcome = loop {
      self.screen.write_screen(&render(&game))?;
      let pos = match self.ask_move(&game)? {
        Some(pos) => pos,
        None => return Ok(None),
      };
      game.reveal(pos).map_err(invalid_board)?;

      match game.outcome() {
        GameOutcome::InProgress => {}
        outcome => break outcome,
      }
    };

    let question = if outcome == GameOutcome::Lost {
      game.reveal_all_mines();
      self.stats.losses += 1;
      LOST_PROMPT
    } else {
      self.stats.wins += 1;
      WON_PROMPT
    };
    info!(round = self.stats.rounds, ?outcome, "round finished");
    self.screen.write_screen(&render(&game))?;

    let play_again = self.ask_replay(question)?;
    Ok(play_again.map(|play_again| RoundEnd { outcome, play_again }))
  }

  fn ask_move(&mut self, game: &Game) -> io::Result<Option<Pos>> {
    let mut prompt = MOVE_PROMPT.to_owned();
    loop {
      let line = match self.prompt.ask_line(&prompt)? {
        Some(line) => line,
        None => return Ok(None),
      };
      match parse_move(&line, game.rows(), game.columns()) {
        Ok(pos) => {
          debug!(%pos, "move");
          return Ok(Some(pos));
        }
        Err(err) => {
          debug!(%err, "rejected move");
          prompt = format!("{}\n{}", err, MOVE_PROMPT);
        }
      }
    }
  }

  fn ask_replay(&mut self, question: &str) -> io::Result<Option<bool>> {
    let mut prompt = question.to_owned();
    loop {
      let line = match self.prompt.ask_line(&prompt)? {
        Some(line) => line,
        None => return Ok(None),
      };
      match parse_replay(&line) {
        Ok(answer) => return Ok(Some(answer)),
        Err(err) => {
          debug!(%err, "rejected replay answer");
          prompt = format!("{}\n{}", err, question);
        }
      }
    }
  }
}
