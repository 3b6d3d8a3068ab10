//! Gym-style environment over a session. The model plays the first
//! seat through a flat action index; the second seat answers with its
//! scripted picker inside the same step.

use std::sync::Arc;

use bg_core::board::Seat;
use bg_core::config::{Config, FeatureSchema};
use bg_core::rules::moves_by_checker;
use bg_features::{decode_action, encode_full, encode_moves};

use crate::reward::RewardMax;
use crate::session::{GameSession, SessionError};

pub const WRONG_MOVE_REWARD: f32 = 0.0;
pub const ALLOWED_MOVE_REWARD: f32 = 1.0;
pub const WIN_REWARD: f32 = 0.1;

pub struct StepResult {
    pub observation: Vec<f32>,
    pub reward: f32,
    pub done: bool,
}

pub struct BoardEnv {
    session: GameSession,
    schema: FeatureSchema,
    reward_window: u32,
    window_steps: u32,
    window_reward_sum: f64,
    shared_max: Arc<RewardMax>,
}

impl BoardEnv {
    pub fn new(config: &Config) -> Self {
        Self::with_shared_max(config, Arc::new(RewardMax::new()))
    }

    pub fn with_shared_max(config: &Config, shared_max: Arc<RewardMax>) -> Self {
        Self {
            session: GameSession::new(&config.session),
            schema: config.env.feature_schema,
            reward_window: config.env.reward_window.max(1),
            window_steps: 0,
            window_reward_sum: 0.0,
            shared_max,
        }
    }

    /// Start a new game and return its first observation.
    pub fn reset(&mut self) -> Vec<f32> {
        self.session.reset();
        self.observation()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn shared_max(&self) -> &Arc<RewardMax> {
        &self.shared_max
    }

    /// Race progress `(p1, p2)` of the running game.
    pub fn progress(&self) -> (f32, f32) {
        self.session.progress()
    }

    /// Apply the model's action for the first seat, then play the second
    /// seat's answer. An illegal action scores zero and the first seat's
    /// own picker moves instead, so the game always advances.
    ///
    /// # Panics
    /// Panics when called on a finished game; call [`reset`](Self::reset)
    /// first.
    pub fn step(&mut self, action: usize) -> Result<StepResult, SessionError> {
        assert!(!self.session.is_over(), "step on a finished game");
        let (slot, to) = decode_action(action);
        let checker_id = slot as u8;

        let legal = {
            let game = self.session.game();
            game.player1.checker_by_id(checker_id).is_some_and(|checker| {
                moves_by_checker(&game.player1, &game.player2, &game.dice, Seat::P1)
                    .iter()
                    .any(|(c, moves)| {
                        c.position == checker.position && moves.iter().any(|m| m.to == to)
                    })
            })
        };

        let mut reward = if legal {
            self.session.external_move(Seat::P1, checker_id, to)?;
            ALLOWED_MOVE_REWARD
        } else {
            self.session.ai_move(Seat::P1)?;
            WRONG_MOVE_REWARD
        };

        while self.session.turn_player() == Seat::P2 && !self.session.is_over() {
            self.session.ai_move(Seat::P2)?;
        }

        let done = self.session.is_over();
        if done {
            reward = WIN_REWARD;
        }
        self.track_window(reward);

        Ok(StepResult {
            observation: self.observation(),
            reward,
            done,
        })
    }

    pub fn observation(&self) -> Vec<f32> {
        match self.schema {
            FeatureSchema::Full => encode_full(self.session.game()).to_vec(),
            FeatureSchema::Moves => encode_moves(self.session.game()).to_vec(),
        }
    }

    fn track_window(&mut self, reward: f32) {
        self.window_reward_sum += f64::from(reward);
        self.window_steps += 1;
        if self.window_steps >= self.reward_window {
            let average = self.window_reward_sum / f64::from(self.window_steps);
            self.shared_max.observe(average);
            self.window_reward_sum = 0.0;
            self.window_steps = 0;
        }
    }
}
