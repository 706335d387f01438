//! Head-to-head comparison of computer players.
//!
//! Plays `--reps` pairs of games between two agent kinds, swapping seats in
//! each pair, and reports the tally. With `--round-robin N` it instead lets N
//! heuristic agents with random readout vectors play every other one in both
//! seatings.

use clap::Parser;
use rand::Rng;
use std::error::Error;

use mancala_mcts::agents::agent::Agent;
use mancala_mcts::agents::play::{play_game, MatchResult};
use mancala_mcts::game::player::{Outcome, Player};
use mancala_mcts::logging::setup_logging;
use mancala_mcts::mcts::hyperparameters::{RolloutHyperparameters, UctHyperparameters};
use mancala_mcts::strategy::heuristic::ReadoutWeights;
use mancala_mcts::utils::rng::make_rng;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AgentChoice {
    RandomRollout,
    Heuristic,
    Uct,
}

#[derive(Parser, Debug)]
#[command(name = "compare-agents", about = "Compare Monte Carlo agents over repeated games")]
struct Args {
    /// First agent kind
    #[arg(value_enum, default_value = "random-rollout")]
    first: AgentChoice,

    /// Second agent kind
    #[arg(value_enum, default_value = "random-rollout")]
    second: AgentChoice,

    /// Game pairs to play (each pair swaps seats)
    #[arg(short, long, default_value_t = 20)]
    reps: usize,

    /// Rollouts per candidate action for the first agent
    #[arg(long, default_value_t = 1000)]
    samples_first: usize,

    /// Rollouts per candidate action for the second agent
    #[arg(long, default_value_t = 3000)]
    samples_second: usize,

    /// Plies per heuristic rollout
    #[arg(short = 'k', long, default_value_t = 4)]
    horizon: usize,

    /// UCT iterations per move
    #[arg(short, long, default_value_t = 1000)]
    iterations: u32,

    /// Round robin among this many random-readout heuristic agents
    #[arg(long)]
    round_robin: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Evaluate candidate actions in parallel
    #[arg(long, default_value_t = false)]
    parallel: bool,
}

fn rollout_params(args: &Args, num_samples: usize, seed: Option<u64>) -> RolloutHyperparameters {
    RolloutHyperparameters {
        num_samples,
        horizon: args.horizon,
        parallel: args.parallel,
        seed,
    }
}

fn build_agent(
    args: &Args,
    choice: AgentChoice,
    name: &str,
    num_samples: usize,
    seed: Option<u64>,
) -> Result<Agent, Box<dyn Error>> {
    let agent = match choice {
        AgentChoice::RandomRollout => Agent::random_rollout(name, rollout_params(args, num_samples, seed))?,
        AgentChoice::Heuristic => Agent::heuristic_rollout(
            name,
            rollout_params(args, num_samples, seed),
            Box::new(ReadoutWeights::initial()),
        )?,
        AgentChoice::Uct => {
            let mut params = UctHyperparameters::with_iterations(args.iterations);
            params.seed = seed;
            Agent::uct(name, &params)?
        }
    };
    Ok(agent)
}

/// +1 when `seat` won, -1 when it lost, 0 on a tie
fn points_for(result: &MatchResult, seat: Player) -> i32 {
    match result.outcome {
        Outcome::Winner(player) if player == seat => 1,
        Outcome::Winner(_) => -1,
        Outcome::Tie => 0,
    }
}

fn head_to_head(args: &Args) -> Result<(), Box<dyn Error>> {
    log::info!(
        "Players: {:?} vs {:?}, reps={}, samples=[{}, {}]",
        args.first,
        args.second,
        args.reps,
        args.samples_first,
        args.samples_second
    );

    let mut seed_rng = make_rng(args.seed);
    // wins, ties, losses of the first agent
    let mut tally = [0usize; 3];
    for rep in 0..args.reps {
        let mut a = build_agent(args, args.first, "A", args.samples_first, Some(seed_rng.random()))?;
        let mut b = build_agent(args, args.second, "B", args.samples_second, Some(seed_rng.random()))?;
        let outcome1 = play_game(&mut a, &mut b)?;

        let mut a = build_agent(args, args.first, "A", args.samples_first, Some(seed_rng.random()))?;
        let mut b = build_agent(args, args.second, "B", args.samples_second, Some(seed_rng.random()))?;
        let outcome2 = play_game(&mut b, &mut a)?;

        log::info!("{}th outcome: {}, {}", rep, outcome1.outcome, outcome2.outcome);
        for points in [points_for(&outcome1, Player::One), points_for(&outcome2, Player::Two)] {
            tally[(1 - points) as usize] += 1;
        }
    }

    log::info!(
        "{:?} against {:?}: {} wins, {} ties, {} losses",
        args.first,
        args.second,
        tally[0],
        tally[1],
        tally[2]
    );
    Ok(())
}

fn round_robin(args: &Args, size: usize) -> Result<(), Box<dyn Error>> {
    let mut rng = make_rng(args.seed);
    let readouts: Vec<ReadoutWeights> = (0..size).map(|_| ReadoutWeights::random(&mut rng)).collect();
    let mut points = vec![0i32; size];

    for i in 0..size {
        for j in 0..size {
            if i == j {
                continue;
            }
            log::info!("Opponent #{} vs #{}", i, j);
            let params_i = rollout_params(args, args.samples_first, Some(rng.random()));
            let params_j = rollout_params(args, args.samples_first, Some(rng.random()));
            let mut first = Agent::heuristic_rollout(format!("H{}", i), params_i, Box::new(readouts[i]))?;
            let mut second = Agent::heuristic_rollout(format!("H{}", j), params_j, Box::new(readouts[j]))?;
            let result = play_game(&mut first, &mut second)?;
            points[i] += points_for(&result, Player::One);
            points[j] += points_for(&result, Player::Two);
        }
    }

    let mut ranking: Vec<usize> = (0..size).collect();
    ranking.sort_by_key(|&k| std::cmp::Reverse(points[k]));
    for k in ranking {
        log::info!("H{}: {} points, readout {:?}", k, points[k], readouts[k].0);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging("info", None)?;

    match args.round_robin {
        Some(size) if size < 2 => Err("a round robin needs at least two agents".into()),
        Some(size) => round_robin(&args, size),
        None => head_to_head(&args),
    }
}
