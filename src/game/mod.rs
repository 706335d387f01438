pub mod environment;
pub mod game_state;
pub mod get_legal_moves;
pub mod is_terminated;
pub mod next_state;
pub mod player;
pub mod render;
pub mod simulate_game;
