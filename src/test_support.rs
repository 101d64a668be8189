// Shared fixtures for unit tests.

use crate::board::Board;
use crate::client::{read_board, read_turn, LineReader};
use crate::game::Game;
use crate::game_interface::{PlayerState, Tree, Turn};

// Standard board, every cell usable.
const BOARD_GAME: &str = include_str!("../games/1001.txt");

pub fn make_board() -> Board {
    let mut lines = LineReader::new(BOARD_GAME.as_bytes());
    read_board(&mut lines).expect("Couldn't parse board in game file")
}

/// Game state after each turn of a recorded transcript.
pub fn make_transcript_games(transcript: &str) -> Vec<Game> {
    let mut lines = LineReader::new(transcript.as_bytes());
    let board = read_board(&mut lines).expect("Couldn't parse board in game file");
    let mut game = Game::new(board);
    let mut games = Vec::new();
    while let Some(turn) = read_turn(&mut lines).expect("Couldn't parse turn in game file") {
        game.update(turn).expect("Invalid turn in game file");
        games.push(game.clone());
    }
    games
}

pub fn tree(cell: usize, size: u8, is_mine: bool) -> Tree {
    Tree { cell, size, is_mine, is_dormant: false }
}

pub fn turn(day: u8, trees: &[Tree], actions: &[&str]) -> Turn {
    Turn {
        day,
        nutrients: 20,
        me: PlayerState { sun: 20, score: 0 },
        opponent: PlayerState { sun: 20, score: 0 },
        opponent_is_waiting: false,
        trees: trees.to_vec(),
        actions: actions.iter().map(|action| action.parse().expect("bad action")).collect(),
    }
}

/// Game on the standard board with the given trees and legal actions.
pub fn make_game(day: u8, trees: &[Tree], actions: &[&str]) -> Game {
    let mut game = Game::new(make_board());
    game.update(turn(day, trees, actions)).expect("Invalid test turn");
    game
}
