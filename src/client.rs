use log::{debug, error, info, warn};
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::board::{Board, Error as BoardError};
use crate::bot::Bot;
use crate::game::{Error as GameError, Game};
use crate::game_interface::{
    parse_numbers, Action, CellInput, ParseError, PlayerState, Tree, Turn,
};
use crate::strategies::Decision;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not talk to the judge ({0})")]
    IoError(#[from] std::io::Error),
    #[error("Input ended in the middle of a block, after line {0}")]
    Truncated(usize),
    #[error("Malformed input on line {line} ({source})")]
    ParseError { line: usize, source: ParseError },
    #[error("Invalid board ({0})")]
    BoardError(#[from] BoardError),
    #[error("Invalid turn ({0})")]
    GameError(#[from] GameError),
}

/// Reads the judge's input line by line, keeping track of line numbers for
/// error messages.
pub struct LineReader<R> {
    input: R,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(input: R) -> Self {
        LineReader { input, line_number: 0 }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Next line without its line ending, None at end of input.
    pub fn next_line(&mut self) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let trimmed = line.trim_end_matches(['\n', '\r']);
        debug!("< {trimmed}");
        Ok(Some(trimmed.to_string()))
    }

    /// Next line, when the protocol guarantees there is one.
    pub fn expect_line(&mut self) -> Result<String, Error> {
        self.next_line()?.ok_or(Error::Truncated(self.line_number))
    }

    fn parse<T, F>(&mut self, parse: F) -> Result<T, Error>
        where F: FnOnce(&str) -> Result<T, ParseError> {
        let line = self.expect_line()?;
        parse(&line).map_err(|source| Error::ParseError { line: self.line_number, source })
    }

    fn parse_count(&mut self, what: &'static str) -> Result<usize, Error> {
        self.parse(|line| {
            let [count] = parse_numbers::<1>(line)?;
            usize::try_from(count).map_err(|_| ParseError::OutOfRange { what, value: count })
        })
    }
}

fn to_u32(what: &'static str, value: i64) -> Result<u32, ParseError> {
    u32::try_from(value).map_err(|_| ParseError::OutOfRange { what, value })
}

/// Reads the initialization block: the number of cells, then one line per
/// cell.
pub fn read_board<R: BufRead>(lines: &mut LineReader<R>) -> Result<Board, Error> {
    let number_of_cells = lines.parse_count("number of cells")?;
    let mut cells = Vec::with_capacity(number_of_cells);
    for _ in 0..number_of_cells {
        cells.push(lines.parse(str::parse::<CellInput>)?);
    }
    Ok(Board::new(cells)?)
}

/// Reads one turn, None if the input ended cleanly before it. Blank lines
/// between turns are skipped.
pub fn read_turn<R: BufRead>(lines: &mut LineReader<R>) -> Result<Option<Turn>, Error> {
    let day_line = loop {
        match lines.next_line()? {
            Some(line) if line.trim().is_empty() => continue,
            Some(line) => break line,
            None => return Ok(None),
        }
    };
    let day = parse_numbers::<1>(&day_line)
        .and_then(|[day]| u8::try_from(day)
                  .map_err(|_| ParseError::OutOfRange { what: "day", value: day }))
        .map_err(|source| Error::ParseError { line: lines.line_number(), source })?;
    let nutrients = lines.parse(|line| {
        let [nutrients] = parse_numbers::<1>(line)?;
        to_u32("nutrients", nutrients)
    })?;
    let me = lines.parse(|line| {
        let [sun, score] = parse_numbers::<2>(line)?;
        Ok(PlayerState { sun: to_u32("sun", sun)?, score: to_u32("score", score)? })
    })?;
    let (opponent, opponent_is_waiting) = lines.parse(|line| {
        let [sun, score, is_waiting] = parse_numbers::<3>(line)?;
        let opponent = PlayerState { sun: to_u32("sun", sun)?, score: to_u32("score", score)? };
        Ok((opponent, is_waiting != 0))
    })?;

    let number_of_trees = lines.parse_count("number of trees")?;
    let mut trees = Vec::with_capacity(number_of_trees);
    for _ in 0..number_of_trees {
        trees.push(lines.parse(str::parse::<Tree>)?);
    }

    let number_of_actions = lines.parse_count("number of possible actions")?;
    let mut actions = Vec::with_capacity(number_of_actions);
    for _ in 0..number_of_actions {
        let line = lines.expect_line()?;
        match line.parse::<Action>() {
            Ok(action) => actions.push(action),
            Err(err) => warn!("Skipping legal action on line {} ({err})", lines.line_number()),
        }
    }

    Ok(Some(Turn {
        day, nutrients, me, opponent, opponent_is_waiting, trees, actions,
    }))
}

/// Plays a whole game over the judge's text protocol: one command line out
/// for every turn read in, until the input closes.
pub struct GameClient<R, W> {
    bot: Bot,
    lines: LineReader<R>,
    output: W,
    with_message: bool,
}

impl<R: BufRead, W: Write> GameClient<R, W> {
    pub fn new(bot: Bot, input: R, output: W) -> Self {
        GameClient {
            bot,
            lines: LineReader::new(input),
            output,
            with_message: true,
        }
    }

    /// Whether to append the decision's reason as the in-game message.
    pub fn with_message(mut self, with_message: bool) -> Self {
        self.with_message = with_message;
        self
    }

    pub fn run(&mut self) -> Result<(), Error> {
        let board = read_board(&mut self.lines)?;
        info!("Board of {} cells, {} usable",
              board.len(), board.cells().filter(|cell| board.is_usable(cell.index)).count());
        let mut game = Game::new(board);

        while let Some(turn) = read_turn(&mut self.lines)? {
            game.update(turn)?;
            let decision = match self.bot.get_next_move(&game) {
                Ok(decision) => decision,
                Err(err) => {
                    error!("Bot failed, waiting instead: {err}");
                    Decision::wait("")
                },
            };
            let command = decision.command(self.with_message);
            debug!("> {command}");
            writeln!(self.output, "{command}")?;
            self.output.flush()?;
        }
        info!("Input closed after day {}, final score estimate {}",
              game.day, crate::challenge::final_score(game.me.score, game.me.sun));
        Ok(())
    }
}
