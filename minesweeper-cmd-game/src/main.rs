use std::io::{self, BufRead, Write};

use anyhow::Context;
use minesweeper_engine::session::{Prompt, Screen, Session};
use minesweeper_engine::GameConfig;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[0f";

/// Reads answers from `input` after printing the prompt to `output`.
struct LinePrompt<I, O> {
  input: I,
  output: O,
}

impl<I: BufRead, O: Write> Prompt for LinePrompt<I, O> {
  fn ask_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
    writeln!(self.output, "{}", prompt)?;
    self.output.flush()?;

    // bytes that are not UTF-8 still make a line; parsing rejects it later
    let mut buf = Vec::new();
    if self.input.read_until(b'\n', &mut buf)? == 0 {
      return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_owned()))
  }
}

struct Console<O> {
  output: O,
}

impl<O: Write> Screen for Console<O> {
  fn write_screen(&mut self, text: &str) -> io::Result<()> {
    write!(self.output, "{}{}", CLEAR_SCREEN, text)?;
    self.output.flush()
  }
}

fn main() -> anyhow::Result<()> {
  initialize_logging(LevelFilter::WARN);

  let prompt = LinePrompt {
    input: io::stdin().lock(),
    output: io::stdout(),
  };
  let screen = Console { output: io::stdout() };
  let mut session = Session::new(GameConfig::default(), prompt, screen, rand::thread_rng())
    .context("invalid board configuration")?;

  let stats = session.run().context("terminal I/O failed")?;
  info!(rounds = stats.rounds, wins = stats.wins, losses = stats.losses, "session finished");

  println!("Thanks for playing!");
  Ok(())
}

fn initialize_logging(level: LevelFilter) {
  let format = tracing_subscriber::fmt::format()
    .with_target(false)
    .compact();

  let filter = Targets::new().with_default(level);

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::fmt::layer()
        .event_format(format)
        .with_writer(io::stderr),
    )
    .with(filter)
    .init();
}
