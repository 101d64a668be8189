use log::info;
use std::time::Instant;
use thiserror::Error;

use crate::challenge_consts::LAST_DAY;
use crate::game::Game;
use crate::game_interface::Action;
use crate::strategies::{Decision, Strategy};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Strategy {strategy} picked {action}, which is not a legal action")]
    IllegalAction { strategy: String, action: Action },
}

pub struct Bot {
    strategy: Box<dyn Strategy>,
}

impl Bot {
    pub fn new(strategy: Box<dyn Strategy>) -> Self {
        info!("Initializing bot with strategy {}", strategy.name());
        Bot { strategy }
    }

    /// Pick the action for the current turn.
    ///
    /// WAIT is always accepted. Any other action must come from the judge's
    /// legal list.
    pub fn get_next_move(&mut self, game: &Game) -> Result<Decision, Error> {
        let start = Instant::now();
        info!("Day {day}/{last}, nutrients: {nutrients}, sun: {sun}, score: {score}",
              day = game.day, last = LAST_DAY, nutrients = game.nutrients,
              sun = game.me.sun, score = game.me.score);
        info!("Opponent sun: {sun}, score: {score}{waiting}",
              sun = game.opponent.sun, score = game.opponent.score,
              waiting = if game.opponent_is_waiting { " (waiting)" } else { "" });
        let tomorrow = game.tomorrow_sun_direction();
        info!("Sun forecast for tomorrow: me={mine}, opponent={theirs}",
              mine = game.sun_income(true, tomorrow),
              theirs = game.sun_income(false, tomorrow));

        let decision = self.strategy.decide(game);
        if decision.action != Action::Wait && !game.legal.contains(&decision.action) {
            return Err(Error::IllegalAction {
                strategy: self.strategy.name().to_string(),
                action: decision.action,
            });
        }
        info!("Turn overall time: {:?}", start.elapsed());
        Ok(decision)
    }
}
