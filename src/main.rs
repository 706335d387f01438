// main.rs - one match between two players (human or computer)
use clap::Parser;
use std::error::Error;
use std::io::{self, BufRead, Write};

use mancala_mcts::agents::agent::Agent;
use mancala_mcts::game::environment::Mancala;
use mancala_mcts::game::game_state::{Action, GameState};
use mancala_mcts::game::get_legal_moves::{check_action, valid_actions};
use mancala_mcts::game::player::Player;
use mancala_mcts::game::render::{action_to_letter, letter_to_action, render};
use mancala_mcts::logging::setup_logging;
use mancala_mcts::mcts::hyperparameters::{RolloutHyperparameters, UctHyperparameters};
use mancala_mcts::scoring::scoring::{scores, winner};
use mancala_mcts::strategy::heuristic::ReadoutWeights;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum PlayerKind {
    /// Moves typed on stdin
    Human,
    /// Full random rollouts
    RandomRollout,
    /// Truncated rollouts scored by a readout vector
    Heuristic,
    /// UCT tree search
    Uct,
}

#[derive(Parser, Debug)]
#[command(name = "mancala", about = "Play Kalah against Monte Carlo agents")]
struct Config {
    /// Player one
    #[arg(value_enum)]
    player1: PlayerKind,

    /// Player two
    #[arg(value_enum)]
    player2: PlayerKind,

    /// Rollouts per candidate action
    #[arg(short = 's', long, default_value_t = 3000)]
    samples: usize,

    /// Plies per heuristic rollout, the first move included
    #[arg(short = 'k', long, default_value_t = 4)]
    horizon: usize,

    /// UCT time budget per move in milliseconds
    #[arg(short = 't', long, conflicts_with = "iterations")]
    time_limit: Option<u64>,

    /// UCT iterations per move (instead of a time budget)
    #[arg(short = 'i', long)]
    iterations: Option<u32>,

    /// JSON array of 14 readout weights for the heuristic player
    #[arg(long)]
    weights: Option<String>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Evaluate candidate actions in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Draw stone counts with unicode glyphs
    #[arg(long, default_value_t = false)]
    unicode: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

enum Seat {
    Human,
    Cpu(Agent),
}

fn build_seat(kind: PlayerKind, player: Player, config: &Config) -> Result<Seat, Box<dyn Error>> {
    let name = format!("P{}", player);
    // each computer player gets its own stream when seeded
    let seed = config.seed.map(|s| s.wrapping_add(player.index() as u64));
    let rollout = RolloutHyperparameters {
        num_samples: config.samples,
        horizon: config.horizon,
        parallel: config.parallel,
        seed,
    };

    let agent = match kind {
        PlayerKind::Human => return Ok(Seat::Human),
        PlayerKind::RandomRollout => Agent::random_rollout(name, rollout)?,
        PlayerKind::Heuristic => {
            let weights = match &config.weights {
                Some(path) => ReadoutWeights::from_json_file(path)?,
                None => ReadoutWeights::initial(),
            };
            Agent::heuristic_rollout(name, rollout, Box::new(weights))?
        }
        PlayerKind::Uct => {
            let params = UctHyperparameters {
                time_limit_ms: match config.iterations {
                    Some(_) => None,
                    None => Some(config.time_limit.unwrap_or(1000)),
                },
                iteration_limit: config.iterations,
                seed,
                ..UctHyperparameters::default()
            };
            log::info!("{}: uct {}", name, params.to_config_string());
            Agent::uct(name, &params)?
        }
    };
    Ok(Seat::Cpu(agent.verbose(true)))
}

/// Prompts until the human types the letter of a legal pit
fn read_human_action(state: &GameState) -> Result<Action, Box<dyn Error>> {
    let letters: String = valid_actions(state).into_iter().map(action_to_letter).collect();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("player {}'s next move? ({}): ", state.turn, letters);
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => return Err("stdin closed before the game ended".into()),
        };

        let mut chars = line.trim().chars();
        let action = match (chars.next(), chars.next()) {
            (Some(letter), None) => letter_to_action(letter),
            _ => None,
        };
        match action {
            Some(action) => match check_action(state, action) {
                Ok(()) => return Ok(action),
                Err(e) => log::warn!("{}", e),
            },
            None => log::warn!("'{}' is not a pit letter", line.trim()),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config::parse();
    let _logger = setup_logging(&config.log_level, None)?;

    let mut seats = [
        build_seat(config.player1, Player::One, &config)?,
        build_seat(config.player2, Player::Two, &config)?,
    ];

    let mut env = Mancala::new();
    let (mut state, _) = env.reset();
    println!("{}\n", render(&state, None, config.unicode));

    let mut terminated = false;
    while !terminated {
        let index = env.moves_played();
        let action = match &mut seats[state.turn.index()] {
            Seat::Human => read_human_action(&state)?,
            Seat::Cpu(agent) => agent.get_action(&state, Some(index))?,
        };

        let step = env.step(action)?;
        for seat in seats.iter_mut() {
            if let Seat::Cpu(agent) = seat {
                agent.update(action);
            }
        }
        state = step.state;
        terminated = step.terminated;
        println!("{}\n", render(&state, Some(action), config.unicode));
    }

    let (one, two) = scores(&state);
    log::info!("{} ({}-{})", winner(&state), one, two);
    Ok(())
}
