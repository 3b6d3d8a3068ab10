use bg_core::board::Seat;
use bg_core::config::{Config, FeatureSchema, StartSeat};
use bg_features::{FULL_INPUT, MOVES_INPUT, PLANE_LEN};

use crate::env::{BoardEnv, ALLOWED_MOVE_REWARD, WRONG_MOVE_REWARD};

fn config(seed: u64) -> Config {
    let mut config = Config::default();
    config.session.seed = seed;
    config.session.start_seat = StartSeat::P1;
    config.env.reward_window = 1;
    config
}

fn legal_and_illegal_actions(observation: &[f32]) -> (usize, usize) {
    let plane = &observation[2 * PLANE_LEN..];
    let legal = plane.iter().position(|&v| v == 1.0).unwrap();
    let illegal = plane.iter().position(|&v| v == 0.0).unwrap();
    (legal, illegal)
}

#[test]
fn observation_length_follows_the_schema() {
    let mut full = BoardEnv::new(&config(1));
    assert_eq!(full.reset().len(), FULL_INPUT);

    let mut cfg = config(1);
    cfg.env.feature_schema = FeatureSchema::Moves;
    let mut moves = BoardEnv::new(&cfg);
    assert_eq!(moves.reset().len(), MOVES_INPUT);
}

#[test]
fn legal_action_scores_a_full_reward() {
    let mut env = BoardEnv::new(&config(2));
    let observation = env.reset();
    let (legal, _) = legal_and_illegal_actions(&observation);

    let result = env.step(legal).unwrap();
    assert_eq!(result.reward, ALLOWED_MOVE_REWARD);
    assert!(!result.done);
    assert_eq!(env.session().external_moves_accepted(), 1);
    // The scripted opponent finished its answer inside the step.
    assert_eq!(env.session().turn_player(), Seat::P1);
}

#[test]
fn illegal_action_scores_zero_and_the_game_still_advances() {
    let mut env = BoardEnv::new(&config(3));
    let observation = env.reset();
    let (_, illegal) = legal_and_illegal_actions(&observation);

    let result = env.step(illegal).unwrap();
    assert_eq!(result.reward, WRONG_MOVE_REWARD);
    assert_eq!(env.session().external_moves_accepted(), 0);
    assert_eq!(env.session().turn_player(), Seat::P1);
}

#[test]
fn window_average_reaches_the_shared_maximum() {
    let mut env = BoardEnv::new(&config(4));
    let observation = env.reset();
    let (legal, _) = legal_and_illegal_actions(&observation);

    let result = env.step(legal).unwrap();
    // Window length 1: the first average is this step's reward.
    assert_eq!(env.shared_max().get(), f64::from(result.reward));
}

#[test]
fn model_plays_to_the_end_with_legal_actions() {
    let mut env = BoardEnv::new(&config(5));
    let mut observation = env.reset();
    for _ in 0..20_000 {
        let plane = &observation[2 * PLANE_LEN..];
        let result = match plane.iter().position(|&v| v == 1.0) {
            // No legal action: any index passes the ply to the picker.
            None => env.step(0).unwrap(),
            Some(action) => env.step(action).unwrap(),
        };
        if result.done {
            return;
        }
        observation = result.observation;
    }
    panic!("game did not finish");
}
