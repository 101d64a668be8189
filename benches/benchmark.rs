use criterion::{criterion_group, criterion_main, Criterion};
use std::fs;

use photosynthesis_bot::client::{read_board, read_turn, LineReader};
use photosynthesis_bot::game::Game;
use photosynthesis_bot::shadows::{ShadowMap, ALL_DIRECTIONS};
use photosynthesis_bot::strategies::all_strategies;
use photosynthesis_bot::tuning::Tuning;


fn make_game() -> Game {
    // Note this isn't great, we ideally shouldn't read from disk here.
    let game_file = "./games/1001.txt";
    let transcript = fs::read_to_string(game_file)
        .expect("Couldn't read game file");
    let mut lines = LineReader::new(transcript.as_bytes());
    let mut game = Game::new(read_board(&mut lines)
        .expect("Couldn't parse board in game file"));
    // Last turn has the most trees on the board.
    while let Some(turn) = read_turn(&mut lines).expect("Couldn't parse turn in game file") {
        game.update(turn).expect("Invalid turn in game file");
    }
    game
}

fn bench_shadows(c: &mut Criterion) {
    let game = make_game();
    let mut group = c.benchmark_group("shadows");
    group.bench_function("cast today", |b| b.iter(|| {
        game.cast_shadows(&[game.sun_direction()])
    }));
    group.bench_function("cast full cycle", |b| b.iter(|| {
        ShadowMap::cast(&game.board, game.trees(), &ALL_DIRECTIONS)
    }));
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let game = make_game();
    let mut group = c.benchmark_group("strategies");
    for mut strategy in all_strategies(&Tuning::default()) {
        let name = strategy.name().to_string();
        group.bench_function(name, |b| b.iter(|| {
            strategy.do_decide(&game)
        }));
    }
    group.finish();
}

criterion_group!(benches, bench_shadows, bench_strategies);
criterion_main!(benches);
