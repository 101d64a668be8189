use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{error, info, warn};
use std::io;

use photosynthesis_bot::bot::Bot;
use photosynthesis_bot::client::GameClient;
use photosynthesis_bot::strategies::{
    FirstLegalStrategy, LeastShadowedStrategy, RichestCellStrategy, Strategy, SunCycleStrategy,
};
use photosynthesis_bot::tuning::Tuning;

#[derive(ValueEnum, Clone)]
enum StrategyName {
    /// Iteration 1: grow, else complete, else seed, whatever comes first.
    FirstLegal,
    /// Iteration 2: richest cells first, biggest trees grow first.
    RichestCell,
    /// Iteration 3: seeds out of tomorrow's shade, least shadowed grows.
    LeastShadowed,
    /// Iteration 4: shadows judged over a whole sun cycle.
    SunCycle,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Heuristic used to pick each turn's action.
    #[arg(short, long, value_enum,
          default_value_t = StrategyName::SunCycle)]
    strategy: StrategyName,

    /// JSON file overriding the strategies' thresholds. Defaults to the
    /// BOT_TUNING env var when set.
    #[arg(long)]
    tuning_file: Option<String>,

    /// Only print the command, without the decision reason as message.
    #[arg(long)]
    no_message: bool,
}

fn load_tuning(cli: &Cli) -> Tuning {
    let path = cli.tuning_file.clone().or_else(|| dotenvy::var("BOT_TUNING").ok());
    match path {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                warn!("[TUNING] Ignoring {path}: {err}");
                Tuning::default()
            },
        },
        None => {
            info!("[TUNING] Using default tuning.");
            Tuning::default()
        },
    }
}

fn new_strategy(name: &StrategyName, tuning: Tuning) -> Box<dyn Strategy> {
    match name {
        StrategyName::FirstLegal => Box::new(FirstLegalStrategy {}),
        StrategyName::RichestCell => Box::new(RichestCellStrategy::new(tuning)),
        StrategyName::LeastShadowed => Box::new(LeastShadowedStrategy::new(tuning)),
        StrategyName::SunCycle => Box::new(SunCycleStrategy::new(tuning)),
    }
}

fn main() {
    // Load .env file
    dotenvy::dotenv().ok();
    // Init logger with default value of info, on stderr since stdout belongs
    // to the judge. This can be overriden with RUST_LOG env var
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let tuning = load_tuning(&cli);
    info!("[TUNING] {tuning:?}");
    let bot = Bot::new(new_strategy(&cli.strategy, tuning));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut client = GameClient::new(bot, stdin.lock(), stdout.lock())
        .with_message(!cli.no_message);
    if let Err(err) = client.run() {
        error!("Error while running bot with underlying error:");
        error!("  {}", err);
        std::process::exit(1);
    }
}
