// Binary that replays recorded judge transcripts from a folder through every
// strategy iteration, to compare how often they agree with the latest one.
//
// Note that this does not simulate the game -- turns after the first were
// produced by whatever bot played the recorded game, so only the per-turn
// decisions are meaningful.

use std::fs::File;
use std::io::BufReader;

use env_logger::Env;
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashMap;
use serde_json::json;
use thiserror::Error;

use photosynthesis_bot::client::{read_board, read_turn, Error as ClientError, LineReader};
use photosynthesis_bot::game::Game;
use photosynthesis_bot::game_interface::ActionKind;
use photosynthesis_bot::strategies::all_strategies;
use photosynthesis_bot::tuning::Tuning;

#[derive(Debug, Clone)]
struct SavedGame {
    id: u32,
    path: String,
}

#[derive(Error, Debug)]
enum ReplayError {
    #[error("Failed reading the saved game")]
    ReadError(#[from] std::io::Error),
    #[error("Failed parsing the saved game ({0})")]
    ParseError(#[from] ClientError),
}

fn read_saved_games(directory: &str) -> Result<Vec<SavedGame>, std::io::Error> {
    lazy_static! {
        static ref GAME_PATH: Regex = Regex::new(r"(\d+)\.txt$").unwrap();
    }
    let mut out = Vec::new();
    for entry in std::fs::read_dir(directory)? {
        let path = entry?.path().to_string_lossy().to_string();
        if let Some(id) = GAME_PATH.captures(&path)
            .and_then(|caps| caps.get(1))
            .and_then(|id| id.as_str().parse::<u32>().ok()) {
            out.push(SavedGame { id, path });
        }
    }
    out.sort_by_key(|game| game.id);
    Ok(out)
}

struct Tally {
    name: String,
    kinds: FxHashMap<ActionKind, usize>,
    agreements: usize,
}

fn replay_game(saved_game: &SavedGame, tuning: &Tuning) -> Result<serde_json::Value, ReplayError> {
    let mut lines = LineReader::new(BufReader::new(File::open(&saved_game.path)?));
    let mut game = Game::new(read_board(&mut lines)?);
    let mut strategies = all_strategies(tuning);
    let mut tallies: Vec<Tally> = strategies.iter().map(|strategy| Tally {
        name: strategy.name().to_string(),
        kinds: FxHashMap::default(),
        agreements: 0,
    }).collect();

    let mut turns = 0;
    while let Some(turn) = read_turn(&mut lines)? {
        game.update(turn).map_err(ClientError::from)?;
        turns += 1;
        let decisions: Vec<_> = strategies.iter_mut()
            .map(|strategy| strategy.do_decide(&game))
            .collect();
        let latest = decisions.last().map(|decision| decision.action);
        for (tally, decision) in tallies.iter_mut().zip(&decisions) {
            *tally.kinds.entry(decision.action.kind()).or_default() += 1;
            if Some(decision.action) == latest {
                tally.agreements += 1;
            }
        }
    }

    let strategies: serde_json::Map<String, serde_json::Value> = tallies.into_iter()
        .map(|tally| (tally.name, json!({
            "actions": tally.kinds,
            "agrees_with_latest": tally.agreements,
        })))
        .collect();
    Ok(json!({
        "game": saved_game.id,
        "turns": turns,
        "strategies": strategies,
    }))
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let directory = std::env::args().nth(1).unwrap_or_else(|| "games".to_string());
    let tuning = match std::env::args().nth(2).map(|path| Tuning::load(&path)) {
        Some(Ok(tuning)) => tuning,
        Some(Err(err)) => {
            eprintln!("Invalid tuning file: {err}");
            std::process::exit(1);
        },
        None => Tuning::default(),
    };

    let saved_games = match read_saved_games(&directory) {
        Ok(saved_games) => saved_games,
        Err(err) => {
            eprintln!("Cannot list {directory}: {err}");
            std::process::exit(1);
        },
    };
    println!("{} saved game(s) in {directory}", saved_games.len());
    for saved_game in saved_games {
        match replay_game(&saved_game, &tuning) {
            Ok(summary) => println!("{summary}"),
            Err(err) => println!("  game #{}: error: {err}", saved_game.id),
        }
    }
}
