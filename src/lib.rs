pub mod board;
pub mod bot;
pub mod challenge;
pub mod challenge_consts;
pub mod client;
pub mod game;
pub mod game_interface;
pub mod shadows;
pub mod strategies;
pub mod tuning;

#[cfg(test)]
mod test_support;
